//! National Weather Service (api.weather.gov) implementation of [`ForecastProvider`]

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::ForecastProvider;
use crate::config::WeatherConfig;
use crate::error::{GatewayError, Stage};
use crate::models::forecast::{ForecastResponse, PointResponse};
use crate::models::{Coordinate, ForecastDocument};

const GEO_JSON: &str = "application/geo+json";
/// Upper bound on how much of an error body is kept for the logs
const MAX_ERROR_BODY_CHARS: usize = 256;

fn truncate_body(body: &str) -> &str {
    match body.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        Some((end, _)) => &body[..end],
        None => body,
    }
}

/// NWS API client
#[derive(Debug, Clone)]
pub struct NwsClient {
    client: Client,
    base_url: String,
}

impl NwsClient {
    /// Create a new client
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, stage: Stage) -> std::result::Result<T, GatewayError> {
        debug!("Calling NWS {} API: {}", stage, url);

        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, GEO_JSON)
            .send()
            .await
            .map_err(|e| {
                if e.is_builder() {
                    GatewayError::upstream(stage, None, format!("invalid request URL: {e}"))
                } else {
                    GatewayError::unavailable(stage, e.to_string())
                }
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::upstream(
                stage,
                Some(status.as_u16()),
                format!("NWS API returned status {status}: {}", truncate_body(&body)),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| GatewayError::unavailable(stage, e.to_string()))?;

        serde_json::from_slice(&bytes).map_err(|e| {
            GatewayError::upstream(
                stage,
                Some(status.as_u16()),
                format!("Failed to parse NWS response: {e}"),
            )
        })
    }
}

#[async_trait]
impl ForecastProvider for NwsClient {
    #[instrument(skip(self))]
    async fn resolve(&self, coordinate: &Coordinate) -> std::result::Result<String, GatewayError> {
        let url = format!(
            "{}/points/{}",
            self.base_url,
            coordinate.format_coordinates()
        );
        let point: PointResponse = self.get_json(&url, Stage::PointsLookup).await?;
        let properties = point.properties;

        let (city, state) = properties
            .relative_location
            .as_ref()
            .map(|l| (l.properties.city.as_str(), l.properties.state.as_str()))
            .unwrap_or_default();
        debug!(
            "Location info - {}, {} (Grid: {} {},{}, Timezone: {})",
            city, state, properties.grid_id, properties.grid_x, properties.grid_y, properties.time_zone
        );

        properties
            .forecast
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                GatewayError::upstream(
                    Stage::PointsLookup,
                    Some(StatusCode::OK.as_u16()),
                    "points response carries no forecast URL",
                )
            })
    }

    #[instrument(skip(self))]
    async fn fetch(&self, locator: &str) -> std::result::Result<ForecastDocument, GatewayError> {
        let forecast: ForecastResponse = self.get_json(locator, Stage::ForecastFetch).await?;
        debug!(
            "Successfully fetched forecast with {} periods",
            forecast.properties.periods.len()
        );
        Ok(forecast.properties)
    }
}
