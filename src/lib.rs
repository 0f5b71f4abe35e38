//! `weather-service` - condensed "today" forecasts over the National Weather Service API
//!
//! A request's coordinates are validated, resolved to a forecast document in
//! two provider calls, reduced to the period that best represents today, and
//! answered with that period's short forecast and a coarse temperature band.

pub mod api;
pub mod config;
pub mod error;
pub mod forecast;
pub mod models;
pub mod service;
pub mod telemetry;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use config::WeatherServiceConfig;
pub use error::{ConfigError, GatewayError, RequestError, SelectionError, ValidationError};
pub use models::{Coordinate, ForecastDocument, ForecastPeriod, TemperatureBand, TemperatureThresholds, WeatherSummary};
pub use service::WeatherService;
pub use weather::{ForecastProvider, NwsClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
