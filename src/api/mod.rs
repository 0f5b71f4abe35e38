use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};

use crate::error::RequestError;
use crate::service::WeatherService;

/// `lat`/`lon` taken from the query string; a repeated key keeps its first value
#[derive(Debug, Default, PartialEq)]
pub struct WeatherQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
}

impl WeatherQuery {
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "lat" => &mut query.lat,
                "lon" => &mut query.lon,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }
        (status, self.user_message()).into_response()
    }
}

pub fn router(service: Arc<WeatherService>) -> Router {
    Router::new()
        .route("/weather", get(get_weather))
        .route("/health", get(health_check))
        .with_state(service)
}

async fn get_weather(
    State(service): State<Arc<WeatherService>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, RequestError> {
    let query = WeatherQuery::from_pairs(pairs);
    let summary = service
        .handle(
            query.lat.as_deref().unwrap_or_default(),
            query.lon.as_deref().unwrap_or_default(),
        )
        .await?;

    let body = serde_json::to_vec(&summary)?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response())
}

/// Liveness only; no dependency is checked
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_repeated_keys_keep_first_value() {
        let query = WeatherQuery::from_pairs(pairs(&[
            ("lat", "39.7456"),
            ("lat", "2"),
            ("units", "si"),
            ("lon", "-97.0892"),
            ("lon", "abc"),
        ]));
        assert_eq!(query.lat.as_deref(), Some("39.7456"));
        assert_eq!(query.lon.as_deref(), Some("-97.0892"));
    }

    #[test]
    fn test_missing_keys_stay_empty() {
        let query = WeatherQuery::from_pairs(pairs(&[("lat", "1")]));
        assert_eq!(query.lat.as_deref(), Some("1"));
        assert!(query.lon.is_none());
    }
}
