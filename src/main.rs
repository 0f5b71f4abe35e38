use std::sync::Arc;

use anyhow::{Context, Result};
use weather_service::{NwsClient, WeatherService, WeatherServiceConfig, telemetry, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = WeatherServiceConfig::get_config_path();
    let config = WeatherServiceConfig::load_from_path(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let telemetry = telemetry::init(&config.logging)?;
    tracing::info!("Using config from {}", config_path.display());
    for warning in config.warnings() {
        tracing::warn!("{}", warning);
    }

    let provider = NwsClient::new(&config.weather)?;
    let service = Arc::new(WeatherService::new(
        Arc::new(provider),
        config.weather.temperature_ranges,
    ));

    let result = web::run(service, &config.server).await;
    telemetry.shutdown();
    result
}
