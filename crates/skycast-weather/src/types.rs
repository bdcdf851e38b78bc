use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Format of the gateway's local forecast timestamp (`dt_txt`).
pub const LOCAL_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Display unit preference. Only affects rendering, never stored data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitPreference {
    #[default]
    Metric,
    Imperial,
}

impl UnitPreference {
    pub fn toggled(self) -> Self {
        match self {
            Self::Metric => Self::Imperial,
            Self::Imperial => Self::Metric,
        }
    }

    pub fn temperature_symbol(self) -> &'static str {
        match self {
            Self::Metric => "°C",
            Self::Imperial => "°F",
        }
    }
}

/// Visual theme derived from conditions and day/night state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeTag {
    Sunny,
    Cloudy,
    Rainy,
    Snow,
    Night,
}

impl ThemeTag {
    /// Name shown in the dashboard header
    pub fn label(self) -> &'static str {
        match self {
            Self::Sunny => "sunny",
            Self::Cloudy => "cloudy",
            Self::Rainy => "rainy",
            Self::Snow => "snow",
            Self::Night => "night",
        }
    }
}

/// Geographic coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// One entry of the 3-hourly forecast feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    pub timestamp: DateTime<Utc>,
    /// Calendar date in the gateway's local timestamp
    pub calendar_date: NaiveDate,
    /// Time of day in the gateway's local timestamp, e.g. `12:00:00`
    pub local_time_label: String,
    pub temperature_c: f64,
    pub condition: String,
    pub icon_code: String,
}

impl ForecastSample {
    /// Build a sample from the gateway's `YYYY-MM-DD HH:MM:SS` local timestamp.
    pub fn from_local_timestamp(
        timestamp: DateTime<Utc>,
        local_timestamp: &str,
        temperature_c: f64,
        condition: impl Into<String>,
        icon_code: impl Into<String>,
    ) -> Result<Self, WeatherError> {
        let local = NaiveDateTime::parse_from_str(local_timestamp, LOCAL_TIMESTAMP_FORMAT)
            .map_err(|e| {
                WeatherError::NetworkFailure(format!(
                    "Invalid forecast timestamp {local_timestamp:?}: {e}"
                ))
            })?;

        Ok(Self {
            timestamp,
            calendar_date: local.date(),
            local_time_label: local.time().format("%H:%M:%S").to_string(),
            temperature_c,
            condition: condition.into(),
            icon_code: icon_code.into(),
        })
    }
}

/// Current conditions for one location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub city: String,
    pub country: String,
    pub observed_at: DateTime<Utc>,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    /// Short condition group, e.g. "Clouds"
    pub condition: String,
    /// Longer description, e.g. "broken clouds"
    pub description: String,
    pub icon_code: String,
    pub humidity: u8,
    pub pressure_hpa: f64,
    pub wind_speed_ms: f64,
    pub wind_deg: u16,
    pub visibility_m: f64,
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
    /// Offset of the location's local time from UTC
    pub timezone_offset_secs: i32,
}

/// Forecast feed for one city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub city: String,
    pub country: String,
    pub samples: Vec<ForecastSample>,
}

/// Location service errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location service unavailable")]
    ServiceUnavailable,
    #[error("Location error: {0}")]
    Other(String),
}

/// Weather gateway errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum WeatherError {
    #[error("Location not found: {query}")]
    LocationNotFound {
        query: String,
        message: Option<String>,
    },
    #[error("Network failure: {0}")]
    NetworkFailure(String),
    #[error("Geolocation unavailable: {0}")]
    GeolocationUnavailable(String),
    #[error("Gateway returned {status}")]
    Gateway { status: u16, message: Option<String> },
    #[error("API Key not configured")]
    MissingApiKey,
}

impl WeatherError {
    /// Message supplied by the gateway itself, if any
    pub fn gateway_message(&self) -> Option<&str> {
        match self {
            Self::LocationNotFound { message, .. } | Self::Gateway { message, .. } => {
                message.as_deref().filter(|m| !m.trim().is_empty())
            }
            _ => None,
        }
    }
}

impl From<LocationError> for WeatherError {
    fn from(e: LocationError) -> Self {
        Self::GeolocationUnavailable(e.to_string())
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(e: reqwest::Error) -> Self {
        Self::NetworkFailure(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_unit_toggle_round_trips() {
        assert_eq!(UnitPreference::Metric.toggled(), UnitPreference::Imperial);
        assert_eq!(UnitPreference::Metric.toggled().toggled(), UnitPreference::Metric);
        assert_eq!(UnitPreference::Imperial.temperature_symbol(), "°F");
    }

    #[test]
    fn test_sample_from_local_timestamp() {
        let ts = Utc.with_ymd_and_hms(2026, 3, 4, 12, 0, 0).unwrap();
        let sample =
            ForecastSample::from_local_timestamp(ts, "2026-03-04 12:00:00", 21.5, "Clear", "01d")
                .unwrap();

        assert_eq!(sample.calendar_date, NaiveDate::from_ymd_opt(2026, 3, 4).unwrap());
        assert_eq!(sample.local_time_label, "12:00:00");
        assert_eq!(sample.icon_code, "01d");
    }

    #[test]
    fn test_sample_rejects_malformed_timestamp() {
        let ts = Utc.with_ymd_and_hms(2026, 3, 4, 12, 0, 0).unwrap();
        let err = ForecastSample::from_local_timestamp(ts, "2026-03-04T12:00", 1.0, "Rain", "10d")
            .unwrap_err();
        assert!(matches!(err, WeatherError::NetworkFailure(_)));
    }

    #[test]
    fn test_gateway_message() {
        let err = WeatherError::LocationNotFound {
            query: "Atlantis".into(),
            message: Some("city not found".into()),
        };
        assert_eq!(err.gateway_message(), Some("city not found"));

        let err = WeatherError::Gateway {
            status: 500,
            message: Some("  ".into()),
        };
        assert_eq!(err.gateway_message(), None);
        assert_eq!(WeatherError::MissingApiKey.gateway_message(), None);
    }

    #[test]
    fn test_location_error_maps_to_geolocation_unavailable() {
        let err: WeatherError = LocationError::PermissionDenied.into();
        assert!(matches!(err, WeatherError::GeolocationUnavailable(_)));
    }
}
