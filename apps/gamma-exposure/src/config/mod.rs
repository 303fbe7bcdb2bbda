//! Configuration module for the gamma exposure engine.
//!
//! Provides configuration loading, validation, and environment variable
//! interpolation for the aggregation, statistics, projection and logging
//! settings.
//!
//! # Usage
//!
//! ```rust,ignore
//! use gamma_exposure::config::{EngineConfig, load_config};
//!
//! // Load from default path (gamma-exposure.yaml)
//! let config = load_config(None)?;
//!
//! // Load from custom path
//! let config = load_config(Some("custom/gamma-exposure.yaml"))?;
//!
//! println!("grid step: {}", config.projection.price_step);
//! ```

mod aggregation;
mod observability;
mod projection;
mod statistics;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use aggregation::AggregationConfig;
pub use observability::{LoggingConfig, ObservabilityConfig};
pub use projection::ProjectionConfig;
pub use statistics::StatisticsConfig;

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "gamma-exposure.yaml";

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const VALID_LOG_FORMATS: [&str; 3] = ["compact", "pretty", "json"];

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Aggregation filters.
    #[serde(default)]
    pub aggregation: AggregationConfig,
    /// Statistics policy.
    #[serde(default)]
    pub statistics: StatisticsConfig,
    /// Projected profile grid.
    #[serde(default)]
    pub projection: ProjectionConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to [`DEFAULT_CONFIG_PATH`].
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<EngineConfig, ConfigError> {
    let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string.
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<EngineConfig, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    // An empty document means "all defaults".
    let config: EngineConfig = if interpolated.trim().is_empty() {
        EngineConfig::default()
    } else {
        serde_yaml_bw::from_str(&interpolated)?
    };
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let var_name = &cap[1];
        let default_value = cap.get(2).map(|m| m.as_str());

        match std::env::var(var_name) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.map_or_else(String::new, str::to_string),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &EngineConfig) -> Result<(), ConfigError> {
    let aggregation = &config.aggregation;
    if let (Some(min), Some(max)) = (aggregation.min_strike, aggregation.max_strike) {
        if min > max {
            return Err(ConfigError::ValidationError(format!(
                "aggregation.min_strike ({min}) must not exceed aggregation.max_strike ({max})"
            )));
        }
    }

    if let Some(bound) = aggregation.max_abs_gamma {
        if !bound.is_finite() || bound < 0.0 {
            return Err(ConfigError::ValidationError(
                "aggregation.max_abs_gamma must be a non-negative number".to_string(),
            ));
        }
    }

    let projection = &config.projection;
    if let Some(bound) = projection.max_abs_gamma {
        if !bound.is_finite() || bound < 0.0 {
            return Err(ConfigError::ValidationError(
                "projection.max_abs_gamma must be a non-negative number".to_string(),
            ));
        }
    }

    if !projection.price_step.is_finite() || projection.price_step <= 0.0 {
        return Err(ConfigError::ValidationError(
            "projection.price_step must be positive".to_string(),
        ));
    }

    if !(-1.0..=1.0).contains(&projection.risk_free_rate) {
        return Err(ConfigError::ValidationError(
            "projection.risk_free_rate must be between -1.0 and 1.0".to_string(),
        ));
    }

    if projection.max_grid_points == 0 {
        return Err(ConfigError::ValidationError(
            "projection.max_grid_points must be positive".to_string(),
        ));
    }

    let logging = &config.observability.logging;
    if !VALID_LOG_LEVELS.contains(&logging.level.to_ascii_lowercase().as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.level must be one of: {VALID_LOG_LEVELS:?}"
        )));
    }

    if !VALID_LOG_FORMATS.contains(&logging.format.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.format must be one of: {VALID_LOG_FORMATS:?}"
        )));
    }

    Ok(())
}
