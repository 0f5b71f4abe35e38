//! HTTP surface tests: the axum router driven in-process against a mocked NWS API

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use weather_service::config::{ServerConfig, WeatherConfig};
use weather_service::{NwsClient, TemperatureThresholds, WeatherService, web};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const POINTS_PATH: &str = "/points/39.7456,-97.0892";
const FORECAST_PATH: &str = "/gridpoints/TOP/32,81/forecast";

fn app_for(server: &MockServer) -> axum::Router {
    let config = WeatherConfig {
        api_base_url: server.uri(),
        timeout_seconds: 2,
        ..WeatherConfig::default()
    };
    let provider = NwsClient::new(&config).unwrap();
    let service = WeatherService::new(Arc::new(provider), TemperatureThresholds::new(90, 32));
    web::app(Arc::new(service), &ServerConfig::default())
}

async fn mount_points(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(POINTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "properties": {
                "forecast": format!("{}{}", server.uri(), FORECAST_PATH),
                "gridId": "TOP",
                "gridX": 32,
                "gridY": 81,
                "timeZone": "America/Chicago",
                "relativeLocation": {"properties": {"city": "Linn", "state": "KS"}}
            }
        })))
        .mount(server)
        .await;
}

async fn mount_forecast(server: &MockServer, periods: Value) {
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "properties": {"units": "us", "periods": periods}
        })))
        .mount(server)
        .await;
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_health_check() {
    let server = MockServer::start().await;
    let (status, _, body) = get(app_for(&server), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn test_weather_hot_afternoon() {
    let server = MockServer::start().await;
    mount_points(&server).await;
    mount_forecast(
        &server,
        json!([
            {"number": 1, "name": "Tonight", "isDaytime": false, "temperature": 70,
             "startTime": "2024-06-15T18:00:00-05:00", "endTime": "2024-06-16T06:00:00-05:00",
             "shortForecast": "Clear"},
            {"number": 2, "name": "This Afternoon", "isDaytime": true, "temperature": 95,
             "startTime": "2024-06-15T13:00:00-05:00", "endTime": "2024-06-15T18:00:00-05:00",
             "shortForecast": "Sunny"}
        ]),
    )
    .await;

    let (status, content_type, body) =
        get(app_for(&server), "/weather?lat=39.7456&lon=-97.0892").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body, json!({"forecast": "Sunny", "temperature": "hot"}));
}

#[tokio::test]
async fn test_weather_missing_lon() {
    let server = MockServer::start().await;
    let (status, _, body) = get(app_for(&server), "/weather?lat=39.7456").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("missing required parameters"));
    // Nothing should have reached the provider
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_weather_malformed_and_out_of_range() {
    let server = MockServer::start().await;

    let (status, _, body) = get(app_for(&server), "/weather?lat=north&lon=-97").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "invalid latitude parameter");

    let (status, _, body) = get(app_for(&server), "/weather?lat=95&lon=-97").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "invalid coordinates");
}

#[tokio::test]
async fn test_points_lookup_failure_is_generic_500() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(POINTS_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("NWS maintenance window"))
        .mount(&server)
        .await;

    let (status, _, body) = get(app_for(&server), "/weather?lat=39.7456&lon=-97.0892").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Failed to fetch weather data");
    assert!(!body.contains("503"));
    assert!(!body.contains("maintenance"));
}

#[tokio::test]
async fn test_empty_forecast_is_404() {
    let server = MockServer::start().await;
    mount_points(&server).await;
    mount_forecast(&server, json!([])).await;

    let (status, _, body) = get(app_for(&server), "/weather?lat=39.7456&lon=-97.0892").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "no forecast periods available");
}

#[tokio::test]
async fn test_post_not_allowed() {
    let server = MockServer::start().await;
    let response = app_for(&server)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/weather?lat=1&lon=1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_repeated_query_keys_use_first_value() {
    let server = MockServer::start().await;
    mount_points(&server).await;
    mount_forecast(
        &server,
        json!([
            {"number": 1, "name": "Today", "isDaytime": true, "temperature": 20,
             "startTime": "2024-06-15T06:00:00-05:00", "endTime": "2024-06-15T18:00:00-05:00",
             "shortForecast": "Snow"}
        ]),
    )
    .await;

    let (status, _, body) = get(
        app_for(&server),
        "/weather?lat=39.7456&lat=north&lon=-97.0892&lon=500",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body, json!({"forecast": "Snow", "temperature": "cold"}));
}

#[tokio::test]
async fn test_slow_handler_times_out_with_408() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(POINTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_delay(std::time::Duration::from_secs(3)))
        .mount(&server)
        .await;

    let weather = WeatherConfig {
        api_base_url: server.uri(),
        timeout_seconds: 10,
        ..WeatherConfig::default()
    };
    let service = WeatherService::new(
        Arc::new(NwsClient::new(&weather).unwrap()),
        TemperatureThresholds::new(90, 32),
    );
    let server_config = ServerConfig {
        write_timeout_seconds: 1,
        ..ServerConfig::default()
    };
    let app = web::app(Arc::new(service), &server_config);

    let (status, _, _) = get(app, "/weather?lat=39.7456&lon=-97.0892").await;
    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
}
