//! Engine configuration.
//!
//! Loaded from YAML with serde; every section and field has a default so an
//! empty file (or no file) yields a working engine. Configuration is handed
//! to components explicitly — there is no global config singleton.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::protocol;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file '{path}': {source}")]
    Read {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("failed to parse config YAML: {0}")]
    Parse(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("config validation failed: {0}")]
    Validation(String),
}

/// Root configuration for the sizing engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Price feed configuration.
    #[serde(default)]
    pub feed: FeedConfig,
    /// Client-side protocol limit overrides.
    #[serde(default)]
    pub limits: LimitsConfig,
}

/// Price feed configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Base URL of the Hermes price API.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Poll interval in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// HTTP request timeout in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Maximum accepted price age in seconds.
    #[serde(default = "default_max_age_secs")]
    pub max_age_secs: u64,
    /// Maximum accepted confidence interval, basis points of the price.
    #[serde(default = "default_max_confidence_bps")]
    pub max_confidence_bps: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            poll_interval_ms: default_poll_interval_ms(),
            request_timeout_ms: default_request_timeout_ms(),
            max_age_secs: default_max_age_secs(),
            max_confidence_bps: default_max_confidence_bps(),
        }
    }
}

impl FeedConfig {
    /// Poll interval as a `Duration`.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Request timeout as a `Duration`.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Client-side protocol limit overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Leverage cap in basis points (10000 = 1x).
    #[serde(default = "default_max_leverage_bps")]
    pub max_leverage_bps: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_leverage_bps: default_max_leverage_bps(),
        }
    }
}

fn default_endpoint() -> String {
    "https://hermes.pyth.network".to_string()
}

const fn default_poll_interval_ms() -> u64 {
    3_000
}

const fn default_request_timeout_ms() -> u64 {
    5_000
}

const fn default_max_age_secs() -> u64 {
    protocol::MAX_PRICE_AGE_SECS
}

const fn default_max_confidence_bps() -> u64 {
    protocol::MAX_CONFIDENCE_BPS
}

const fn default_max_leverage_bps() -> u64 {
    // 100x; the program's own cap is set at market initialization.
    1_000_000
}

/// Load configuration from a YAML file.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "config.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<EngineConfig, ConfigError> {
    let path = path.unwrap_or("config.yaml");

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<EngineConfig, ConfigError> {
    let config: EngineConfig = serde_yaml_bw::from_str(yaml)?;
    validate_config(&config)?;
    Ok(config)
}

/// Validate configuration values.
///
/// Called by the loaders; exposed for callers that build an [`EngineConfig`]
/// in code rather than from YAML.
pub fn validate_config(config: &EngineConfig) -> Result<(), ConfigError> {
    if config.feed.endpoint.is_empty() {
        return Err(ConfigError::Validation(
            "feed.endpoint must not be empty".to_string(),
        ));
    }
    if config.feed.poll_interval_ms == 0 {
        return Err(ConfigError::Validation(
            "feed.poll_interval_ms must be greater than zero".to_string(),
        ));
    }
    if config.feed.max_age_secs == 0 {
        return Err(ConfigError::Validation(
            "feed.max_age_secs must be greater than zero".to_string(),
        ));
    }
    if config.limits.max_leverage_bps < protocol::BASIS_POINTS {
        return Err(ConfigError::Validation(
            "limits.max_leverage_bps must allow at least 1x".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.feed.max_age_secs, 60);
        assert_eq!(config.feed.max_confidence_bps, 100);
        assert_eq!(config.limits.max_leverage_bps, 1_000_000);
    }

    #[test]
    fn empty_yaml_yields_defaults() {
        let config = load_config_from_string("{}").unwrap();
        assert_eq!(config.feed.endpoint, "https://hermes.pyth.network");
        assert_eq!(config.feed.poll_interval(), Duration::from_millis(3_000));
    }

    #[test]
    fn partial_yaml_overrides_only_named_fields() {
        let yaml = r"
feed:
  poll_interval_ms: 1000
limits:
  max_leverage_bps: 500000
";
        let config = load_config_from_string(yaml).unwrap();
        assert_eq!(config.feed.poll_interval_ms, 1_000);
        assert_eq!(config.feed.max_age_secs, 60); // untouched default
        assert_eq!(config.limits.max_leverage_bps, 500_000);
    }

    #[test]
    fn zero_poll_interval_fails_validation() {
        let yaml = r"
feed:
  poll_interval_ms: 0
";
        let err = load_config_from_string(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn sub_1x_leverage_cap_fails_validation() {
        let yaml = r"
limits:
  max_leverage_bps: 9999
";
        let err = load_config_from_string(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = load_config(Some("does-not-exist.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("does-not-exist.yaml"));
    }
}
