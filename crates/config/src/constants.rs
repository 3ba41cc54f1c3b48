//! Centralized constants for the codec configuration.
//!
//! Environment variable names and defaults live here so the loader and its
//! tests never repeat string literals.

// =============================================================================
// Environment Variables
// =============================================================================

/// Fractional-second precision used when rendering timestamps.
pub const ENV_TIMESTAMP_PRECISION: &str = "LOGAN_TIMESTAMP_PRECISION";

/// Whether lenient enum substitutions are logged when no sink is injected.
pub const ENV_LOG_ENUM_SUBSTITUTIONS: &str = "LOGAN_LOG_ENUM_SUBSTITUTIONS";

/// Path to an optional JSON codec configuration file.
pub const ENV_CONFIG_PATH: &str = "LOGAN_CONFIG_PATH";

/// Set to `1` or `true` to skip `.env` loading.
pub const ENV_DOTENV_DISABLED: &str = "DOTENV_DISABLED";

// =============================================================================
// Defaults
// =============================================================================

/// Substitutions are logged at debug level unless disabled.
pub const DEFAULT_LOG_ENUM_SUBSTITUTIONS: bool = true;
