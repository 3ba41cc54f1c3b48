//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read codec settings from environment variables.
//! - Apply them to a `ConfigLoader`.
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed.
//! - Invalid values return `ConfigError::InvalidValue`.

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::constants::{ENV_LOG_ENUM_SUBSTITUTIONS, ENV_TIMESTAMP_PRECISION};
use crate::types::TimestampPrecision;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var: var.to_string(),
            message: "must be true or false".to_string(),
        }),
    }
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(raw) = env_var_or_none(ENV_TIMESTAMP_PRECISION) {
        let precision: TimestampPrecision =
            raw.parse().map_err(|message| ConfigError::InvalidValue {
                var: ENV_TIMESTAMP_PRECISION.to_string(),
                message,
            })?;
        loader.set_timestamp_precision(Some(precision));
    }
    if let Some(raw) = env_var_or_none(ENV_LOG_ENUM_SUBSTITUTIONS) {
        loader.set_log_enum_substitutions(Some(parse_bool(ENV_LOG_ENUM_SUBSTITUTIONS, &raw)?));
    }
    Ok(())
}
