//! Data models for the weather service
//!
//! - Location: validated request coordinates
//! - Forecast: provider periods and payloads
//! - Weather: temperature thresholds, bands and the response summary

pub mod forecast;
pub mod location;
pub mod weather;

pub use forecast::{ForecastDocument, ForecastPeriod};
pub use location::Coordinate;
pub use weather::{TemperatureBand, TemperatureThresholds, WeatherSummary};
