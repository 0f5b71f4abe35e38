//! Temperature classification inputs and the condensed response model

use std::fmt;

use serde::{Deserialize, Serialize};

/// Hot/cold boundaries in the provider's temperature unit
///
/// The two values are independent; nothing requires `cold < hot`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct TemperatureThresholds {
    #[serde(rename = "hot_threshold")]
    pub hot: i32,
    #[serde(rename = "cold_threshold")]
    pub cold: i32,
}

impl TemperatureThresholds {
    #[must_use]
    pub fn new(hot: i32, cold: i32) -> Self {
        Self { hot, cold }
    }

    /// True when some temperature satisfies both boundary tests
    #[must_use]
    pub fn overlaps(&self) -> bool {
        self.cold >= self.hot
    }
}

/// Coarse temperature band reported to callers
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureBand {
    Hot,
    Cold,
    Moderate,
}

impl fmt::Display for TemperatureBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemperatureBand::Hot => write!(f, "hot"),
            TemperatureBand::Cold => write!(f, "cold"),
            TemperatureBand::Moderate => write!(f, "moderate"),
        }
    }
}

/// Body of a successful `/weather` response
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct WeatherSummary {
    pub forecast: String,
    pub temperature: TemperatureBand,
}
