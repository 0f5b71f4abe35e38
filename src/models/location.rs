//! Coordinate model and query-parameter validation

use serde::{Deserialize, Serialize};

use crate::error::{Axis, ValidationError};

/// Geographic coordinate inside the valid latitude/longitude ranges
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees, within [-90, 90]
    pub latitude: f64,
    /// Longitude in decimal degrees, within [-180, 180]
    pub longitude: f64,
}

impl Coordinate {
    /// Parse and bounds-check raw `lat`/`lon` query values.
    ///
    /// Empty input is reported before malformed input, and both values must
    /// parse before the range check runs.
    pub fn validate(raw_lat: &str, raw_lon: &str) -> Result<Self, ValidationError> {
        if raw_lat.is_empty() || raw_lon.is_empty() {
            return Err(ValidationError::MissingParameter);
        }

        let latitude = parse_axis(raw_lat, Axis::Latitude)?;
        let longitude = parse_axis(raw_lon, Axis::Longitude)?;

        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::OutOfRange {
                latitude,
                longitude,
            });
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Format as `lat,lon` with 4 decimal places, the precision the points endpoint expects
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4},{:.4}", self.latitude, self.longitude)
    }
}

fn parse_axis(raw: &str, axis: Axis) -> Result<f64, ValidationError> {
    raw.parse::<f64>()
        .map_err(|_| ValidationError::MalformedNumber {
            axis,
            raw: raw.to_string(),
        })
}
