//! Configuration management for the weather service
//!
//! Settings are read once at startup from a config file layered under
//! `WEATHER_SERVICE_` environment variables, then validated. The resulting
//! value is immutable and shared by reference for the process lifetime.

use crate::error::ConfigError;
use crate::models::TemperatureThresholds;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming an alternative config file
pub const CONFIG_PATH_ENV: &str = "WEATHER_SERVICE_CONFIG";

const DEFAULT_CONFIG_FILE: &str = "config.json";
const MAX_TIMEOUT_SECONDS: u64 = 300;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherServiceConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Weather provider and classification settings
    pub weather: WeatherConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    /// Deadline for receiving a request body
    #[serde(default = "default_read_timeout")]
    pub read_timeout_seconds: u64,
    /// Deadline for producing a response
    #[serde(default = "default_write_timeout")]
    pub write_timeout_seconds: u64,
    /// How long in-flight requests may drain after a shutdown signal
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_seconds: u64,
}

/// Weather provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    pub temperature_ranges: TemperatureThresholds,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Per-call timeout for provider requests
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u64,
    /// NWS rejects requests that do not identify themselves
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
    /// OTLP/HTTP collector endpoint; export is off when unset
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

fn default_port() -> u16 {
    8080
}

fn default_read_timeout() -> u64 {
    15
}

fn default_write_timeout() -> u64 {
    15
}

fn default_shutdown_timeout() -> u64 {
    30
}

fn default_api_base_url() -> String {
    "https://api.weather.gov".to_string()
}

fn default_weather_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("weather-service/{}", crate::VERSION)
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            read_timeout_seconds: default_read_timeout(),
            write_timeout_seconds: default_write_timeout(),
            shutdown_timeout_seconds: default_shutdown_timeout(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            temperature_ranges: TemperatureThresholds::new(85, 50),
            api_base_url: default_api_base_url(),
            timeout_seconds: default_weather_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            otlp_endpoint: None,
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_seconds)
    }

    #[must_use]
    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout_seconds)
    }

    #[must_use]
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_seconds)
    }
}

impl WeatherServiceConfig {
    /// Load configuration from the given file, with environment overrides
    pub fn load_from_path(config_path: impl AsRef<Path>) -> Result<Self> {
        let config_path = config_path.as_ref();

        let settings = Config::builder()
            .add_source(File::from(config_path).required(true))
            .add_source(
                Environment::with_prefix("WEATHER_SERVICE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read config file {}", config_path.display()))?;

        let config: WeatherServiceConfig = settings
            .try_deserialize()
            .with_context(|| format!("Failed to parse config file {}", config_path.display()))?;

        config.validate()?;

        Ok(config)
    }

    /// Config file path: `$WEATHER_SERVICE_CONFIG` or `config.json` in the working directory
    #[must_use]
    pub fn get_config_path() -> PathBuf {
        std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::new("Server port must be non-zero"));
        }

        let timeouts = [
            ("server.read_timeout_seconds", self.server.read_timeout_seconds),
            ("server.write_timeout_seconds", self.server.write_timeout_seconds),
            (
                "server.shutdown_timeout_seconds",
                self.server.shutdown_timeout_seconds,
            ),
            ("weather.timeout_seconds", self.weather.timeout_seconds),
        ];
        for (name, seconds) in timeouts {
            if seconds == 0 || seconds > MAX_TIMEOUT_SECONDS {
                return Err(ConfigError::new(format!(
                    "{name} must be between 1 and {MAX_TIMEOUT_SECONDS} seconds, got {seconds}"
                )));
            }
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<(), ConfigError> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::new(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            )));
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::new(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            )));
        }

        let base_url = &self.weather.api_base_url;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::new(
                "Weather API base URL must be a valid HTTP or HTTPS URL",
            ));
        }

        if self.weather.user_agent.trim().is_empty() {
            return Err(ConfigError::new("Weather API user agent cannot be empty"));
        }

        Ok(())
    }

    /// Settings that load fine but are probably a mistake
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        let thresholds = self.weather.temperature_ranges;
        if thresholds.overlaps() {
            warnings.push(format!(
                "cold_threshold ({}) >= hot_threshold ({}): temperatures in the overlap are classified as hot",
                thresholds.cold, thresholds.hot
            ));
        }
        warnings
    }
}
