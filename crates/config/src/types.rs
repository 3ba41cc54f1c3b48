//! Codec configuration types.
//!
//! Responsibilities:
//! - Define [`CodecConfig`], the settings consumed by the model marshaling layer.
//! - Define [`TimestampPrecision`] and its string forms.
//!
//! Does NOT handle:
//! - Loading from env/files (see `loader` module).
//!
//! Invariants:
//! - `CodecConfig::default()` renders timestamps with millisecond precision and
//!   logs enum substitutions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::DEFAULT_LOG_ENUM_SUBSTITUTIONS;

/// Fractional-second digits emitted for date/time fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimestampPrecision {
    /// Whole seconds, no fraction.
    Seconds,
    /// Three fractional digits.
    #[default]
    Millis,
    /// Six fractional digits.
    Micros,
    /// Nine fractional digits.
    Nanos,
    /// As many digits as needed, none when the fraction is zero.
    Auto,
}

impl fmt::Display for TimestampPrecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Seconds => "seconds",
            Self::Millis => "millis",
            Self::Micros => "micros",
            Self::Nanos => "nanos",
            Self::Auto => "auto",
        };
        write!(f, "{s}")
    }
}

impl FromStr for TimestampPrecision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "seconds" | "secs" => Ok(Self::Seconds),
            "millis" | "milliseconds" => Ok(Self::Millis),
            "micros" | "microseconds" => Ok(Self::Micros),
            "nanos" | "nanoseconds" => Ok(Self::Nanos),
            "auto" => Ok(Self::Auto),
            other => Err(format!(
                "unknown timestamp precision '{other}' (expected seconds, millis, micros, nanos or auto)"
            )),
        }
    }
}

/// Settings for the model marshaling layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Precision used when projecting date/time fields to the wire.
    #[serde(default)]
    pub timestamp_precision: TimestampPrecision,
    /// Emit a `tracing` debug event for each lenient enum substitution when
    /// the caller does not inject its own sink.
    #[serde(default = "default_log_enum_substitutions")]
    pub log_enum_substitutions: bool,
}

fn default_log_enum_substitutions() -> bool {
    DEFAULT_LOG_ENUM_SUBSTITUTIONS
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            timestamp_precision: TimestampPrecision::default(),
            log_enum_substitutions: DEFAULT_LOG_ENUM_SUBSTITUTIONS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_codec_config() {
        let config = CodecConfig::default();
        assert_eq!(config.timestamp_precision, TimestampPrecision::Millis);
        assert!(config.log_enum_substitutions);
    }

    #[test]
    fn test_precision_from_str_is_case_insensitive() {
        assert_eq!(
            "MICROS".parse::<TimestampPrecision>().unwrap(),
            TimestampPrecision::Micros
        );
        assert_eq!(
            " auto ".parse::<TimestampPrecision>().unwrap(),
            TimestampPrecision::Auto
        );
        assert!("hours".parse::<TimestampPrecision>().is_err());
    }

    #[test]
    fn test_precision_display_parses_back() {
        for precision in [
            TimestampPrecision::Seconds,
            TimestampPrecision::Millis,
            TimestampPrecision::Micros,
            TimestampPrecision::Nanos,
            TimestampPrecision::Auto,
        ] {
            assert_eq!(
                precision.to_string().parse::<TimestampPrecision>().unwrap(),
                precision
            );
        }
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: CodecConfig = serde_json::from_str(r#"{"timestamp_precision": "nanos"}"#).unwrap();
        assert_eq!(config.timestamp_precision, TimestampPrecision::Nanos);
        assert!(config.log_enum_substitutions);

        let config: CodecConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, CodecConfig::default());
    }
}
