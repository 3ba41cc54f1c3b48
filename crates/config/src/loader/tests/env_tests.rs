//! Environment variable tests for the configuration loader builder.

use serial_test::serial;

use super::env_lock;
use crate::constants::{ENV_LOG_ENUM_SUBSTITUTIONS, ENV_TIMESTAMP_PRECISION};
use crate::loader::builder::ConfigLoader;
use crate::loader::env::env_var_or_none;
use crate::loader::error::ConfigError;
use crate::types::TimestampPrecision;

#[test]
#[serial]
fn test_env_sets_precision_and_logging() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_vars(
        [
            (ENV_TIMESTAMP_PRECISION, Some("micros")),
            (ENV_LOG_ENUM_SUBSTITUTIONS, Some("false")),
        ],
        || {
            let config = ConfigLoader::new().from_env().unwrap().build();
            assert_eq!(config.timestamp_precision, TimestampPrecision::Micros);
            assert!(!config.log_enum_substitutions);
        },
    );
}

#[test]
#[serial]
fn test_empty_env_vars_ignored() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_vars(
        [
            (ENV_TIMESTAMP_PRECISION, Some("   ")),
            (ENV_LOG_ENUM_SUBSTITUTIONS, Some("")),
        ],
        || {
            let config = ConfigLoader::new()
                .with_timestamp_precision(TimestampPrecision::Nanos)
                .from_env()
                .unwrap()
                .build();
            assert_eq!(config.timestamp_precision, TimestampPrecision::Nanos);
            assert!(config.log_enum_substitutions);
        },
    );
}

#[test]
#[serial]
fn test_invalid_precision_is_rejected() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_var(ENV_TIMESTAMP_PRECISION, Some("fortnights"), || {
        let err = ConfigLoader::new().from_env().unwrap_err();
        match err {
            ConfigError::InvalidValue { var, .. } => assert_eq!(var, ENV_TIMESTAMP_PRECISION),
            other => panic!("expected InvalidValue, got {other}"),
        }
    });
}

#[test]
#[serial]
fn test_invalid_bool_is_rejected() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_var(ENV_LOG_ENUM_SUBSTITUTIONS, Some("sometimes"), || {
        assert!(matches!(
            ConfigLoader::new().from_env(),
            Err(ConfigError::InvalidValue { .. })
        ));
    });
}

#[test]
#[serial]
fn test_env_var_or_none_trims() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_var("LOGAN_TEST_TRIM", Some("  value  "), || {
        assert_eq!(env_var_or_none("LOGAN_TEST_TRIM").as_deref(), Some("value"));
    });
    temp_env::with_var_unset("LOGAN_TEST_TRIM", || {
        assert_eq!(env_var_or_none("LOGAN_TEST_TRIM"), None);
    });
}
