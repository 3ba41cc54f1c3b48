//! Common types shared across Log Analytics models.
//!
//! This module contains the lifecycle enum and the tag shapes used by multiple
//! resource modules. It does NOT contain resource-specific models.

use serde_json::Value;
use std::collections::BTreeMap;

use crate::schema::{FieldKind, FieldSpec};

wire_enum! {
    /// Lifecycle of a persisted resource.
    pub enum LifecycleState {
        Active => "ACTIVE",
        Deleted => "DELETED",
    }
}

/// Simple key/value tags, e.g. `{"Department": "Finance"}`.
pub type FreeformTags = BTreeMap<String, String>;

/// Namespaced tags, e.g. `{"Operations": {"CostCenter": "42"}}`.
pub type DefinedTags = BTreeMap<String, BTreeMap<String, Value>>;

pub(crate) const FREEFORM_TAGS: FieldSpec = FieldSpec::new(
    "freeform_tags",
    "freeformTags",
    FieldKind::Map(&FieldKind::String),
);

pub(crate) const DEFINED_TAGS: FieldSpec = FieldSpec::new(
    "defined_tags",
    "definedTags",
    FieldKind::Map(&FieldKind::Map(&FieldKind::Opaque)),
);
