//! Typed models for the Log Analytics REST API.
//!
//! Every resource is a plain struct of tri-state [`Field`]s described by a
//! static [`Schema`]. The schema drives decoding from loosely keyed JSON
//! (wire keys or local names), projection back to ordered JSON, structural
//! hashing, and per-field enum validation.
//!
//! # Example
//! ```ignore
//! use loganalytics_models::{FixedFrequencySchedule, Model};
//! use serde_json::json;
//!
//! let schedule = FixedFrequencySchedule::unmarshal(&json!({"recurringInterval": "PT1H"}))?;
//! assert_eq!(schedule.repeat_count.value(), Some(&-1));
//! ```

#[macro_use]
mod macros;

pub mod codec;
pub mod diagnostics;
pub mod enums;
pub mod error;
pub mod field;
pub mod hashing;
pub mod marshal;
pub mod models;
pub mod schema;
pub mod timestamp;

#[cfg(any(feature = "test-utils", test))]
pub mod testing;

pub use codec::{DecodeContext, FromWire, ToWire};
pub use diagnostics::{CollectingSink, DiagnosticSink, EnumSubstitution, TracingSink};
pub use enums::{
    Lenient, UNKNOWN_ENUM_VALUE, WireEnum, assign_lenient, assign_lenient_with, assign_strict,
};
pub use error::{ModelError, Result};
pub use field::Field;
pub use loganalytics_config::{CodecConfig, TimestampPrecision};
pub use marshal::{FieldReader, FieldWriter, Model};
pub use models::*;
pub use schema::{FieldKind, FieldSpec, Schema, SchemaIssue};
pub use timestamp::Timestamp;
