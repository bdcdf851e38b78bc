//! Maps weather gateway errors to skycast_core::AppError for consistent
//! notification text.

use skycast_core::{AppError, NetworkError, WeatherError as CoreWeatherError};
use skycast_weather::WeatherError;

use crate::events::CurrentQuery;

/// Shown when a lookup by coordinates fails without a gateway message
const COORDS_FAILURE_MESSAGE: &str = "Could not determine location weather";

pub fn to_app_error(err: &WeatherError) -> AppError {
    match err {
        WeatherError::LocationNotFound { query, .. } => {
            AppError::Weather(CoreWeatherError::LocationNotFound(query.clone()))
        }
        WeatherError::NetworkFailure(s) => AppError::Network(NetworkError::ConnectionFailed(s.clone())),
        WeatherError::Gateway { status, message } => AppError::Network(NetworkError::ServerError {
            status: *status,
            message: message.clone().unwrap_or_default(),
        }),
        WeatherError::MissingApiKey => AppError::Weather(CoreWeatherError::MissingApiKey),
        WeatherError::GeolocationUnavailable(s) => {
            AppError::Weather(CoreWeatherError::GeolocationUnavailable(s.clone()))
        }
    }
}

/// Notification text for a failed current-conditions request.
///
/// The gateway's own message wins when it sent one.
pub fn notification_text(err: &WeatherError, query: Option<&CurrentQuery>) -> String {
    if let Some(message) = err.gateway_message() {
        return message.to_string();
    }

    let rejected_by_gateway = matches!(
        err,
        WeatherError::LocationNotFound { .. } | WeatherError::Gateway { .. }
    );
    if rejected_by_gateway && matches!(query, Some(CurrentQuery::Coords(_))) {
        return COORDS_FAILURE_MESSAGE.to_string();
    }

    to_app_error(err).user_message().to_string()
}
