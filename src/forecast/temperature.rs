use crate::models::{TemperatureBand, TemperatureThresholds};

/// Map a temperature to its band.
///
/// The hot test runs first, so with overlapping thresholds
/// (`cold >= hot`) a value satisfying both is reported as hot.
#[must_use]
pub fn classify(temperature: i32, thresholds: &TemperatureThresholds) -> TemperatureBand {
    if temperature >= thresholds.hot {
        TemperatureBand::Hot
    } else if temperature <= thresholds.cold {
        TemperatureBand::Cold
    } else {
        TemperatureBand::Moderate
    }
}
