//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` for layered configuration merging.
//! - Support loading from `.env`, environment variables, JSON files and direct setters.
//! - Build the final `CodecConfig`.
//!
//! Invariants / Assumptions:
//! - Later layers overwrite earlier ones; callers apply file before env.
//! - Unset layers leave earlier values untouched.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::env::{apply_env, env_var_or_none};
use super::error::ConfigError;
use crate::constants::{ENV_CONFIG_PATH, ENV_DOTENV_DISABLED};
use crate::types::{CodecConfig, TimestampPrecision};

/// Partial config as read from a JSON file.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    timestamp_precision: Option<TimestampPrecision>,
    log_enum_substitutions: Option<bool>,
}

/// Configuration loader that merges defaults, files and environment variables.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    timestamp_precision: Option<TimestampPrecision>,
    log_enum_substitutions: Option<bool>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var(ENV_DOTENV_DISABLED).ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// Missing `.env` files are silently ignored. Parse and I/O failures are
    /// reported without any of the file's contents.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(path) => {
                tracing::debug!(path = %path.display(), "Loaded .env file");
                Ok(self)
            }
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Read a JSON config file. Keys missing from the file are left untouched.
    pub fn from_file(mut self, path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::ConfigFileRead {
                path: path.to_path_buf(),
                kind: e.kind(),
            })?;
        let file: FileConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::ConfigFileParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        if file.timestamp_precision.is_some() {
            self.timestamp_precision = file.timestamp_precision;
        }
        if file.log_enum_substitutions.is_some() {
            self.log_enum_substitutions = file.log_enum_substitutions;
        }
        tracing::debug!(path = %path.display(), "Loaded codec config file");
        Ok(self)
    }

    /// Read the file named by `LOGAN_CONFIG_PATH`, if set.
    pub fn from_env_path(self) -> Result<Self, ConfigError> {
        match env_var_or_none(ENV_CONFIG_PATH) {
            Some(path) => self.from_file(&PathBuf::from(path)),
            None => Ok(self),
        }
    }

    /// Apply environment variable overrides.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    pub fn with_timestamp_precision(mut self, precision: TimestampPrecision) -> Self {
        self.timestamp_precision = Some(precision);
        self
    }

    pub fn with_log_enum_substitutions(mut self, enabled: bool) -> Self {
        self.log_enum_substitutions = Some(enabled);
        self
    }

    pub(crate) fn set_timestamp_precision(&mut self, precision: Option<TimestampPrecision>) {
        if precision.is_some() {
            self.timestamp_precision = precision;
        }
    }

    pub(crate) fn set_log_enum_substitutions(&mut self, enabled: Option<bool>) {
        if enabled.is_some() {
            self.log_enum_substitutions = enabled;
        }
    }

    /// Build the final configuration, filling gaps with defaults.
    pub fn build(self) -> CodecConfig {
        let defaults = CodecConfig::default();
        CodecConfig {
            timestamp_precision: self
                .timestamp_precision
                .unwrap_or(defaults.timestamp_precision),
            log_enum_substitutions: self
                .log_enum_substitutions
                .unwrap_or(defaults.log_enum_substitutions),
        }
    }
}
