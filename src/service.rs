//! Request orchestration: validate, fetch, select, classify

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::instrument;

use crate::error::RequestError;
use crate::forecast::{classify, select_today};
use crate::models::{Coordinate, TemperatureThresholds, WeatherSummary};
use crate::weather::{ForecastProvider, fetch_forecast};

/// Turns a raw `lat`/`lon` pair into a condensed today-forecast
///
/// Holds no mutable state; one instance is shared by all requests.
pub struct WeatherService {
    provider: Arc<dyn ForecastProvider>,
    thresholds: TemperatureThresholds,
}

impl WeatherService {
    pub fn new(provider: Arc<dyn ForecastProvider>, thresholds: TemperatureThresholds) -> Self {
        Self {
            provider,
            thresholds,
        }
    }

    /// Handle a request against the current wall clock
    pub async fn handle(&self, raw_lat: &str, raw_lon: &str) -> Result<WeatherSummary, RequestError> {
        self.handle_at(raw_lat, raw_lon, Utc::now()).await
    }

    /// Handle a request as if it were `now`
    #[instrument(skip(self))]
    pub async fn handle_at(
        &self,
        raw_lat: &str,
        raw_lon: &str,
        now: DateTime<Utc>,
    ) -> Result<WeatherSummary, RequestError> {
        let coordinate = Coordinate::validate(raw_lat, raw_lon)?;
        let document = fetch_forecast(self.provider.as_ref(), &coordinate).await?;
        let period = select_today(&document.periods, now)?;
        let temperature = classify(period.temperature, &self.thresholds);

        tracing::debug!(
            period = %period.name,
            temperature = period.temperature,
            band = %temperature,
            "Classified today's forecast"
        );

        Ok(WeatherSummary {
            forecast: period.short_forecast.clone(),
            temperature,
        })
    }
}
