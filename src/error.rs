//! Error types and handling for the weather service
//!
//! Each component returns its own error kind; the request orchestrator wraps
//! them in [`RequestError`], which owns the mapping to HTTP status codes and
//! caller-facing messages.

use std::fmt;

use axum::http::StatusCode;
use thiserror::Error;

/// Which coordinate axis a validation failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Latitude => write!(f, "latitude"),
            Axis::Longitude => write!(f, "longitude"),
        }
    }
}

/// Caller input was malformed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("missing required parameters: lat and lon")]
    MissingParameter,

    #[error("invalid {axis} parameter")]
    MalformedNumber { axis: Axis, raw: String },

    #[error("invalid coordinates")]
    OutOfRange { latitude: f64, longitude: f64 },
}

/// The two sequential calls made against the weather provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    PointsLookup,
    ForecastFetch,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::PointsLookup => write!(f, "points-lookup"),
            Stage::ForecastFetch => write!(f, "forecast-fetch"),
        }
    }
}

/// Failures talking to the weather provider
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    /// The provider answered, but not with something usable
    #[error("{stage} failed (status {}): {detail}", display_status(.status))]
    Upstream {
        stage: Stage,
        status: Option<u16>,
        detail: String,
    },

    /// The provider could not be reached in time
    #[error("{stage} unavailable: {detail}")]
    Unavailable { stage: Stage, detail: String },
}

fn display_status(status: &Option<u16>) -> String {
    status.map_or_else(|| "n/a".to_string(), |code| code.to_string())
}

impl GatewayError {
    pub fn upstream<S: Into<String>>(stage: Stage, status: Option<u16>, detail: S) -> Self {
        Self::Upstream {
            stage,
            status,
            detail: detail.into(),
        }
    }

    pub fn unavailable<S: Into<String>>(stage: Stage, detail: S) -> Self {
        Self::Unavailable {
            stage,
            detail: detail.into(),
        }
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        match self {
            GatewayError::Upstream { stage, .. } | GatewayError::Unavailable { stage, .. } => *stage,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("no forecast periods available")]
    NoPeriodsAvailable,
}

/// Settings that loaded but failed validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error: {message}")]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Everything that can end a `/weather` request early
#[derive(Error, Debug)]
pub enum RequestError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("response encoding failed: {source}")]
    Encoding {
        #[from]
        source: serde_json::Error,
    },
}

impl RequestError {
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::Validation(_) => StatusCode::BAD_REQUEST,
            RequestError::Selection(_) => StatusCode::NOT_FOUND,
            RequestError::Gateway(_) | RequestError::Encoding { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Body text sent to the caller. Provider details stay in the logs.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            RequestError::Validation(err) => err.to_string(),
            RequestError::Selection(err) => err.to_string(),
            RequestError::Gateway(_) => "Failed to fetch weather data".to_string(),
            RequestError::Encoding { .. } => "Failed to encode response".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::MissingParameter.to_string(),
            "missing required parameters: lat and lon"
        );
        let err = ValidationError::MalformedNumber {
            axis: Axis::Longitude,
            raw: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "invalid longitude parameter");
    }

    #[test]
    fn test_status_mapping() {
        let validation: RequestError = ValidationError::MissingParameter.into();
        assert_eq!(validation.status_code(), StatusCode::BAD_REQUEST);

        let selection: RequestError = SelectionError::NoPeriodsAvailable.into();
        assert_eq!(selection.status_code(), StatusCode::NOT_FOUND);

        let gateway: RequestError =
            GatewayError::unavailable(Stage::ForecastFetch, "timed out").into();
        assert_eq!(gateway.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_gateway_detail_not_in_user_message() {
        let err: RequestError =
            GatewayError::upstream(Stage::PointsLookup, Some(503), "upstream maintenance").into();
        let message = err.user_message();
        assert_eq!(message, "Failed to fetch weather data");
        assert!(!message.contains("503"));
        assert!(!message.contains("maintenance"));
        // Operators still get the detail through Display
        assert!(err.to_string().contains("points-lookup"));
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_serde_error_conversion() {
        let serde_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: RequestError = serde_err.into();
        assert!(matches!(err, RequestError::Encoding { .. }));
        assert_eq!(err.user_message(), "Failed to encode response");
    }
}
