//! Static field schemas that drive marshaling.
//!
//! Responsibilities:
//! - Describe every model attribute as a `(local_name, wire_key, declared_type)` triple.
//! - Derive the attribute map (local name -> wire key) and the type map
//!   (local name -> declared type) from the same table so their key sets always match.
//! - Check the subtype ordering contract for models that compose a parent schema.
//!
//! Explicitly does NOT handle:
//! - Reading or writing values (see [`crate::marshal`]).
//!
//! Invariants / assumptions:
//! - Schemas are `static` data and never mutated after program start.
//! - A subtype schema lists its discriminator first, then the parent's remaining
//!   entries in parent order, then its own entries.

use std::collections::HashSet;
use std::fmt;

/// Declared type of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Boolean,
    Float,
    DateTime,
    /// Untyped JSON passed through unchanged.
    Opaque,
    /// Named enum type.
    Enum(&'static str),
    /// Named nested model type.
    Model(&'static str),
    /// String-keyed map of the inner kind.
    Map(&'static FieldKind),
    /// Sequence of the inner kind.
    List(&'static FieldKind),
}

impl FieldKind {
    /// Whether values of this kind are sequences.
    pub fn is_sequence(&self) -> bool {
        matches!(self, Self::List(_))
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "String"),
            Self::Integer => write!(f, "Integer"),
            Self::Boolean => write!(f, "Boolean"),
            Self::Float => write!(f, "Float"),
            Self::DateTime => write!(f, "DateTime"),
            Self::Opaque => write!(f, "Object"),
            Self::Enum(name) => write!(f, "Enum<{name}>"),
            Self::Model(name) => write!(f, "{name}"),
            Self::Map(inner) => write!(f, "Hash<String, {inner}>"),
            Self::List(inner) => write!(f, "Array<{inner}>"),
        }
    }
}

/// One declared attribute of a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub local_name: &'static str,
    pub wire_key: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(local_name: &'static str, wire_key: &'static str, kind: FieldKind) -> Self {
        Self {
            local_name,
            wire_key,
            kind,
        }
    }

    /// Whether the local name is a distinct accepted spelling of this field.
    pub fn has_alternate_key(&self) -> bool {
        self.local_name != self.wire_key
    }
}

/// The full attribute table of one model.
#[derive(Debug)]
pub struct Schema {
    pub model: &'static str,
    pub fields: &'static [FieldSpec],
}

/// Problems detected by [`Schema::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaIssue {
    DuplicateLocalName(&'static str),
    DuplicateWireKey(&'static str),
}

impl Schema {
    pub const fn new(model: &'static str, fields: &'static [FieldSpec]) -> Self {
        Self { model, fields }
    }

    /// Look up a field by local name.
    pub fn field(&self, local_name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.local_name == local_name)
    }

    /// Position of a field in schema order.
    pub fn position(&self, local_name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.local_name == local_name)
    }

    /// Local name -> wire key, in schema order.
    pub fn attribute_map(&self) -> Vec<(&'static str, &'static str)> {
        self.fields
            .iter()
            .map(|f| (f.local_name, f.wire_key))
            .collect()
    }

    /// Local name -> declared type, in schema order.
    pub fn type_map(&self) -> Vec<(&'static str, FieldKind)> {
        self.fields.iter().map(|f| (f.local_name, f.kind)).collect()
    }

    pub fn wire_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.wire_key)
    }

    /// Report duplicate local names or wire keys.
    pub fn validate(&self) -> Vec<SchemaIssue> {
        let mut issues = Vec::new();
        let mut locals = HashSet::new();
        let mut wires = HashSet::new();
        for field in self.fields {
            if !locals.insert(field.local_name) {
                issues.push(SchemaIssue::DuplicateLocalName(field.local_name));
            }
            if !wires.insert(field.wire_key) {
                issues.push(SchemaIssue::DuplicateWireKey(field.wire_key));
            }
        }
        issues
    }

    /// Check that this schema composes `parent` with `discriminator` positioned first.
    ///
    /// The discriminator must be declared by the parent; every other parent entry
    /// must follow it unchanged and in order before the subtype's own entries.
    pub fn extends(&self, parent: &Schema, discriminator: &str) -> bool {
        let Some(disc) = parent.field(discriminator) else {
            return false;
        };
        let expected = std::iter::once(disc).chain(
            parent
                .fields
                .iter()
                .filter(|f| f.local_name != discriminator),
        );
        let mut own = self.fields.iter();
        for parent_field in expected {
            if own.next() != Some(parent_field) {
                return false;
            }
        }
        true
    }
}
