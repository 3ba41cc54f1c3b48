//! Configuration loader for environment variables and files.
//!
//! Responsibilities:
//! - Load codec settings from `.env` files, environment variables, and JSON files.
//! - Provide a builder-pattern `ConfigLoader` for layered merging.
//! - Enforce the `DOTENV_DISABLED` gate to prevent accidental dotenv loading in tests.
//!
//! Invariants / Assumptions:
//! - Environment variables take precedence over file values.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.

mod builder;
mod env;
mod error;

pub use builder::ConfigLoader;
pub use env::env_var_or_none;
pub use error::ConfigError;

#[cfg(test)]
mod tests;
