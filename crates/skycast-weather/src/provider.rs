//! Weather gateway client (OpenWeatherMap 2.5 REST API).

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

use crate::types::{Coordinates, CurrentConditions, Forecast, WeatherError};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const USER_AGENT: &str = concat!("skycast/", env!("CARGO_PKG_VERSION"));

/// Connection settings for the gateway
#[derive(Debug, Clone)]
pub struct GatewaySettings {
    pub base_url: String,
    pub api_key: Option<String>,
    /// `None` keeps the HTTP client's default
    pub timeout: Option<Duration>,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    base_url: String,
    api_key: Option<String>,
}

impl WeatherProvider {
    pub fn new(settings: GatewaySettings) -> Result<Self, WeatherError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key,
        })
    }

    /// Current conditions for a city name.
    #[instrument(skip(self), level = "info")]
    pub async fn current_by_city(&self, city: &str) -> Result<CurrentConditions, WeatherError> {
        let city = require_city(city)?;
        let body: owm::CurrentResponse = self.get("weather", city, &[("q", city.to_string())]).await?;
        body.into_conditions()
    }

    /// Current conditions for a coordinate pair.
    #[instrument(skip(self), level = "info")]
    pub async fn current_by_coords(
        &self,
        coords: Coordinates,
    ) -> Result<CurrentConditions, WeatherError> {
        let label = format!("{:.2},{:.2}", coords.latitude, coords.longitude);
        let params = [
            ("lat", coords.latitude.to_string()),
            ("lon", coords.longitude.to_string()),
        ];
        let body: owm::CurrentResponse = self.get("weather", &label, &params).await?;
        body.into_conditions()
    }

    /// 3-hourly forecast feed for a city name, in gateway order.
    #[instrument(skip(self), level = "info")]
    pub async fn forecast(&self, city: &str) -> Result<Forecast, WeatherError> {
        let city = require_city(city)?;
        let body: owm::ForecastResponse =
            self.get("forecast", city, &[("q", city.to_string())]).await?;
        let forecast = body.into_forecast()?;
        tracing::debug!(samples = forecast.samples.len(), "Forecast feed received");
        Ok(forecast)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query_label: &str,
        params: &[(&str, String)],
    ) -> Result<T, WeatherError> {
        let api_key = self.api_key.as_deref().ok_or(WeatherError::MissingApiKey)?;
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("appid", api_key), ("units", "metric")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<owm::ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message);
            tracing::debug!("Gateway returned {} for {}: {:?}", status, query_label, message);

            return Err(if status == StatusCode::NOT_FOUND {
                WeatherError::LocationNotFound {
                    query: query_label.to_string(),
                    message,
                }
            } else {
                WeatherError::Gateway {
                    status: status.as_u16(),
                    message,
                }
            });
        }

        response.json::<T>().await.map_err(|e| {
            WeatherError::NetworkFailure(format!("Malformed {endpoint} response: {e}"))
        })
    }
}

fn require_city(city: &str) -> Result<&str, WeatherError> {
    let city = city.trim();
    if city.is_empty() {
        return Err(WeatherError::LocationNotFound {
            query: String::new(),
            message: Some("City parameter is required".to_string()),
        });
    }
    Ok(city)
}

/// Wire format of the gateway responses
mod owm {
    use super::*;
    use crate::types::ForecastSample;
    use chrono::{DateTime, Utc};

    /// Visibility reported when the gateway omits it
    const DEFAULT_VISIBILITY_M: f64 = 10_000.0;

    #[derive(Debug, Deserialize)]
    pub struct ErrorBody {
        pub message: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Condition {
        pub main: String,
        #[serde(default)]
        pub description: String,
        pub icon: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct MainBlock {
        pub temp: f64,
        pub feels_like: f64,
        pub temp_min: f64,
        pub temp_max: f64,
        pub pressure: f64,
        pub humidity: u8,
    }

    #[derive(Debug, Deserialize)]
    pub struct Wind {
        pub speed: f64,
        #[serde(default)]
        pub deg: u16,
    }

    #[derive(Debug, Deserialize)]
    pub struct Sys {
        #[serde(default)]
        pub country: String,
        pub sunrise: i64,
        pub sunset: i64,
    }

    #[derive(Debug, Deserialize)]
    pub struct CurrentResponse {
        pub name: String,
        pub weather: Vec<Condition>,
        pub main: MainBlock,
        pub wind: Wind,
        pub visibility: Option<f64>,
        pub dt: i64,
        pub sys: Sys,
        #[serde(default)]
        pub timezone: i32,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastMain {
        pub temp: f64,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastEntry {
        pub dt: i64,
        pub main: ForecastMain,
        pub weather: Vec<Condition>,
        pub dt_txt: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct City {
        pub name: String,
        #[serde(default)]
        pub country: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub list: Vec<ForecastEntry>,
        pub city: City,
    }

    fn instant(secs: i64, field: &str) -> Result<DateTime<Utc>, WeatherError> {
        DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| WeatherError::NetworkFailure(format!("Invalid {field} timestamp: {secs}")))
    }

    fn first_condition(conditions: Vec<Condition>) -> Result<Condition, WeatherError> {
        conditions
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::NetworkFailure("Response has no weather condition".into()))
    }

    impl CurrentResponse {
        pub fn into_conditions(self) -> Result<CurrentConditions, WeatherError> {
            let condition = first_condition(self.weather)?;

            Ok(CurrentConditions {
                city: self.name,
                country: self.sys.country,
                observed_at: instant(self.dt, "observation")?,
                temperature_c: self.main.temp,
                feels_like_c: self.main.feels_like,
                temp_min_c: self.main.temp_min,
                temp_max_c: self.main.temp_max,
                condition: condition.main,
                description: condition.description,
                icon_code: condition.icon,
                humidity: self.main.humidity,
                pressure_hpa: self.main.pressure,
                wind_speed_ms: self.wind.speed,
                wind_deg: self.wind.deg,
                visibility_m: self.visibility.unwrap_or(DEFAULT_VISIBILITY_M),
                sunrise: instant(self.sys.sunrise, "sunrise")?,
                sunset: instant(self.sys.sunset, "sunset")?,
                timezone_offset_secs: self.timezone,
            })
        }
    }

    impl ForecastResponse {
        pub fn into_forecast(self) -> Result<Forecast, WeatherError> {
            let samples = self
                .list
                .into_iter()
                .map(|entry| {
                    let condition = first_condition(entry.weather)?;
                    ForecastSample::from_local_timestamp(
                        instant(entry.dt, "forecast")?,
                        &entry.dt_txt,
                        entry.main.temp,
                        condition.main,
                        condition.icon,
                    )
                })
                .collect::<Result<Vec<_>, _>>()?;

            Ok(Forecast {
                city: self.city.name,
                country: self.city.country,
                samples,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let provider = WeatherProvider::new(GatewaySettings {
            base_url: "http://localhost:9000/data/2.5/".into(),
            ..GatewaySettings::default()
        })
        .unwrap();
        assert_eq!(provider.base_url, "http://localhost:9000/data/2.5");
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_without_request() {
        let provider = WeatherProvider::new(GatewaySettings {
            base_url: "http://127.0.0.1:1".into(),
            ..GatewaySettings::default()
        })
        .unwrap();
        let err = provider.current_by_city("Delhi").await.unwrap_err();
        assert!(matches!(err, WeatherError::MissingApiKey));
    }

    #[tokio::test]
    async fn test_blank_city_is_rejected_locally() {
        let provider = WeatherProvider::new(GatewaySettings {
            api_key: Some("key".into()),
            ..GatewaySettings::default()
        })
        .unwrap();
        let err = provider.forecast("   ").await.unwrap_err();
        assert!(matches!(err, WeatherError::LocationNotFound { .. }));
        assert_eq!(err.gateway_message(), Some("City parameter is required"));
    }

    #[test]
    fn test_current_response_defaults() {
        let body = serde_json::json!({
            "name": "Delhi",
            "weather": [{"main": "Haze", "description": "haze", "icon": "50d"}],
            "main": {"temp": 30.2, "feels_like": 33.0, "temp_min": 29.0, "temp_max": 31.0, "pressure": 1008, "humidity": 62},
            "wind": {"speed": 2.57},
            "dt": 1767261600,
            "sys": {"country": "IN", "sunrise": 1767231000, "sunset": 1767269000},
            "timezone": 19800
        });
        let parsed: owm::CurrentResponse = serde_json::from_value(body).unwrap();
        let current = parsed.into_conditions().unwrap();

        assert_eq!(current.visibility_m, 10_000.0);
        assert_eq!(current.wind_deg, 0);
        assert_eq!(current.pressure_hpa, 1008.0);
        assert_eq!(current.timezone_offset_secs, 19800);
    }

    #[test]
    fn test_current_response_without_condition_is_malformed() {
        let body = serde_json::json!({
            "name": "Delhi",
            "weather": [],
            "main": {"temp": 30.2, "feels_like": 33.0, "temp_min": 29.0, "temp_max": 31.0, "pressure": 1008, "humidity": 62},
            "wind": {"speed": 2.57},
            "dt": 1767261600,
            "sys": {"country": "IN", "sunrise": 1767231000, "sunset": 1767269000}
        });
        let parsed: owm::CurrentResponse = serde_json::from_value(body).unwrap();
        assert!(matches!(
            parsed.into_conditions(),
            Err(WeatherError::NetworkFailure(_))
        ));
    }
}
