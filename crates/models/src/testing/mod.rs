//! Testing utilities for model tests.
//!
//! This module provides helper functions for loading wire fixtures and
//! generating realistic wire payloads.
//! Available when running tests or when the `test-utils` feature is enabled.
//!
//! # Example
//! ```ignore
//! use loganalytics_models::testing::{load_fixture, generators::ScheduledTaskGenerator};
//!
//! // Load a static fixture
//! let fixture = load_fixture("scheduled_tasks/acceleration_task.json");
//!
//! // Generate dynamic wire payloads
//! let payload = ScheduledTaskGenerator::new().with_schedule_count(3).generate();
//! ```

#[cfg(any(feature = "test-utils", test))]
pub mod generators;

use std::path::Path;

/// Load a JSON fixture file from the fixtures directory.
///
/// # Arguments
/// * `fixture_path` - Relative path within the fixtures directory (e.g., "schedules/cron.json")
///
/// # Panics
/// - If the fixture file cannot be read
/// - If the file content is not valid JSON
pub fn load_fixture(fixture_path: &str) -> serde_json::Value {
    let full_path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(fixture_path);
    let content = std::fs::read_to_string(&full_path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", full_path.display()));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Invalid JSON in fixture {}: {e}", full_path.display()))
}
