//! Forecast gateway: coordinate to forecast document in two provider calls

use async_trait::async_trait;
use tracing::instrument;

use crate::error::GatewayError;
use crate::models::{Coordinate, ForecastDocument};

pub mod nws;

pub use nws::NwsClient;

/// The two-call contract a weather provider has to satisfy
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    /// Resolve a coordinate to the locator of its forecast document
    async fn resolve(&self, coordinate: &Coordinate) -> Result<String, GatewayError>;

    /// Fetch the forecast document behind a locator
    async fn fetch(&self, locator: &str) -> Result<ForecastDocument, GatewayError>;
}

/// Run both provider calls in sequence. No retries; the first failure ends it.
#[instrument(skip(provider), fields(lat = coordinate.latitude, lon = coordinate.longitude))]
pub async fn fetch_forecast(
    provider: &dyn ForecastProvider,
    coordinate: &Coordinate,
) -> Result<ForecastDocument, GatewayError> {
    let locator = provider.resolve(coordinate).await.inspect_err(|e| {
        tracing::error!(
            "Failed to get forecast URL for {}: {}",
            coordinate.format_coordinates(),
            e
        );
    })?;

    provider.fetch(&locator).await
}
