//! Integration tests for WeatherProvider using wiremock.
//!
//! These tests verify the gateway client against a mock HTTP server.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use skycast_weather::{
    aggregate_daily, select_theme, Coordinates, FallbackOrdering, GatewaySettings, ThemeTag,
    WeatherError, WeatherProvider,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider(server: &MockServer) -> WeatherProvider {
    WeatherProvider::new(GatewaySettings {
        base_url: server.uri(),
        api_key: Some("test-key".to_string()),
        timeout: None,
    })
    .unwrap()
}

fn current_body(city: &str, condition: &str, icon: &str) -> serde_json::Value {
    serde_json::json!({
        "name": city,
        "weather": [{"id": 800, "main": condition, "description": "clear sky", "icon": icon}],
        "main": {
            "temp": 18.4, "feels_like": 17.9, "temp_min": 16.0, "temp_max": 20.1,
            "pressure": 1021, "humidity": 55
        },
        "visibility": 8000,
        "wind": {"speed": 4.1, "deg": 250},
        "dt": 1767261600,
        "sys": {"country": "GB", "sunrise": 1767254400, "sunset": 1767283200},
        "timezone": 0,
        "cod": 200
    })
}

/// 40 entries at 3-hour steps starting 2026-01-01 00:00 local time
fn forecast_body() -> serde_json::Value {
    let start = 1767225600_i64; // 2026-01-01T00:00:00Z
    let list: Vec<serde_json::Value> = (0..40)
        .map(|i| {
            let dt = start + i * 3 * 3600;
            let ts = chrono::DateTime::from_timestamp(dt, 0).unwrap();
            serde_json::json!({
                "dt": dt,
                "main": {"temp": 5.0 + i as f64 * 0.5},
                "weather": [{"main": "Clouds", "description": "overcast clouds", "icon": "04d"}],
                "dt_txt": ts.format("%Y-%m-%d %H:%M:%S").to_string()
            })
        })
        .collect();

    serde_json::json!({
        "cod": "200",
        "list": list,
        "city": {"name": "London", "country": "GB"}
    })
}

#[tokio::test]
async fn test_current_by_city_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "London"))
        .and(query_param("appid", "test-key"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body("London", "Clear", "01d")))
        .mount(&server)
        .await;

    let current = provider(&server).current_by_city("London").await.unwrap();

    assert_eq!(current.city, "London");
    assert_eq!(current.country, "GB");
    assert_eq!(current.temperature_c, 18.4);
    assert_eq!(current.humidity, 55);
    assert_eq!(current.wind_speed_ms, 4.1);
    assert_eq!(current.visibility_m, 8000.0);
    assert_eq!(current.observed_at.timestamp(), 1767261600);
    assert_eq!(select_theme(&current.condition, &current.icon_code), ThemeTag::Sunny);
}

#[tokio::test]
async fn test_current_by_city_trims_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "New York"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body("New York", "Clouds", "03n")))
        .expect(1)
        .mount(&server)
        .await;

    let current = provider(&server).current_by_city("  New York ").await.unwrap();
    assert_eq!(current.city, "New York");
}

#[tokio::test]
async fn test_current_by_coords_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", "51.5"))
        .and(query_param("lon", "-0.12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body("London", "Rain", "10d")))
        .mount(&server)
        .await;

    let coords = Coordinates {
        latitude: 51.5,
        longitude: -0.12,
    };
    let current = provider(&server).current_by_coords(coords).await.unwrap();
    assert_eq!(current.city, "London");
    assert_eq!(current.condition, "Rain");
}

#[tokio::test]
async fn test_unknown_city_is_location_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "cod": "404",
            "message": "city not found"
        })))
        .mount(&server)
        .await;

    let err = provider(&server).current_by_city("Atlantis").await.unwrap_err();

    match &err {
        WeatherError::LocationNotFound { query, .. } => assert_eq!(query, "Atlantis"),
        other => panic!("expected LocationNotFound, got {other:?}"),
    }
    assert_eq!(err.gateway_message(), Some("city not found"));
}

#[tokio::test]
async fn test_rejected_key_is_gateway_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "cod": 401,
            "message": "Invalid API key."
        })))
        .mount(&server)
        .await;

    let err = provider(&server).current_by_city("London").await.unwrap_err();
    assert!(matches!(err, WeatherError::Gateway { status: 401, .. }));
    assert_eq!(err.gateway_message(), Some("Invalid API key."));
}

#[tokio::test]
async fn test_error_without_body_has_no_gateway_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = provider(&server).current_by_city("London").await.unwrap_err();
    assert!(matches!(err, WeatherError::Gateway { status: 503, .. }));
    assert_eq!(err.gateway_message(), None);
}

#[tokio::test]
async fn test_malformed_body_is_network_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = provider(&server).current_by_city("London").await.unwrap_err();
    assert!(matches!(err, WeatherError::NetworkFailure(_)));
}

#[tokio::test]
async fn test_unreachable_gateway_is_network_failure() {
    let provider = WeatherProvider::new(GatewaySettings {
        base_url: "http://127.0.0.1:1".to_string(),
        api_key: Some("test-key".to_string()),
        timeout: None,
    })
    .unwrap();

    let err = provider.current_by_city("London").await.unwrap_err();
    assert!(matches!(err, WeatherError::NetworkFailure(_)));
}

#[tokio::test]
async fn test_forecast_feed_reduces_to_five_days() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", "London"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(&server)
        .await;

    let forecast = provider(&server).forecast("London").await.unwrap();
    assert_eq!(forecast.city, "London");
    assert_eq!(forecast.samples.len(), 40);
    assert_eq!(forecast.samples[0].local_time_label, "00:00:00");

    let daily = aggregate_daily(&forecast.samples, FallbackOrdering::MergeByDate);
    assert_eq!(daily.len(), 5);
    assert!(daily.iter().all(|s| s.local_time_label == "12:00:00"));
    assert!(daily.windows(2).all(|w| w[0].calendar_date < w[1].calendar_date));
}

#[tokio::test]
async fn test_forecast_with_bad_timestamp_is_network_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "list": [{
                "dt": 1767225600,
                "main": {"temp": 3.0},
                "weather": [{"main": "Snow", "icon": "13d"}],
                "dt_txt": "yesterday"
            }],
            "city": {"name": "Oslo", "country": "NO"}
        })))
        .mount(&server)
        .await;

    let err = provider(&server).forecast("Oslo").await.unwrap_err();
    assert!(matches!(err, WeatherError::NetworkFailure(_)));
}
