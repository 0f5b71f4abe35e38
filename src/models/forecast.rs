//! Forecast periods and the provider payloads they arrive in

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit `null` like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One time segment of a multi-day forecast ("Tonight", "This Afternoon", ...)
///
/// Timestamps are kept as the raw strings the provider sent so that a single
/// malformed entry does not fail decoding of the whole document.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPeriod {
    #[serde(default, deserialize_with = "null_as_default")]
    pub number: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub start_time: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub end_time: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_daytime: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub temperature: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub temperature_unit: String,
    #[serde(default)]
    pub temperature_trend: Option<String>,
    #[serde(default)]
    pub probability_of_precipitation: Option<QuantitativeValue>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub wind_speed: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub wind_direction: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub icon: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub short_forecast: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub detailed_forecast: String,
}

impl ForecastPeriod {
    /// Start time with its embedded UTC offset, `None` if not RFC 3339
    #[must_use]
    pub fn starts_at(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.start_time).ok()
    }

    /// End time with its embedded UTC offset, `None` if not RFC 3339
    #[must_use]
    pub fn ends_at(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.end_time).ok()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct QuantitativeValue {
    #[serde(default, deserialize_with = "null_as_default")]
    pub unit_code: String,
    #[serde(default)]
    pub value: Option<f64>,
}

/// Ordered forecast periods for one location, chronological as returned upstream
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ForecastDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub units: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub forecast_generator: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub generated_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub update_time: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub valid_times: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub periods: Vec<ForecastPeriod>,
}

impl ForecastDocument {
    #[must_use]
    pub fn new(periods: Vec<ForecastPeriod>) -> Self {
        Self {
            periods,
            ..Self::default()
        }
    }
}

/// Forecast endpoint payload (GeoJSON feature)
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub properties: ForecastDocument,
}

/// Points endpoint payload (GeoJSON feature)
#[derive(Debug, Deserialize)]
pub struct PointResponse {
    pub properties: PointProperties,
}

/// Location metadata resolved for a coordinate; `forecast` is the locator for the next call
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PointProperties {
    #[serde(default)]
    pub forecast: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub grid_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub grid_x: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub grid_y: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cwa: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub forecast_office: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub time_zone: String,
    #[serde(default)]
    pub relative_location: Option<RelativeLocation>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RelativeLocation {
    pub properties: RelativeLocationProperties,
}

#[derive(Debug, Deserialize, Default)]
pub struct RelativeLocationProperties {
    #[serde(default, deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub state: String,
}
