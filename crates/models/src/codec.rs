//! Value-level conversions between JSON and typed attribute values.
//!
//! Responsibilities:
//! - Coerce loosely typed JSON into the declared primitive types
//!   (numbers from numeric strings, booleans from `"true"`/`"false"`).
//! - Project typed values back into JSON.
//! - Carry decode state (current model/field, diagnostic sink) through nested calls.
//!
//! Explicitly does NOT handle:
//! - Key resolution, defaults or the sequence skip rule (see [`crate::marshal`]).
//! - Date/time text (see [`crate::timestamp`]).
//!
//! Invariants / assumptions:
//! - Errors name the model and field being decoded; they never echo full payloads.
//! - Opaque values pass through unchanged in both directions.

use loganalytics_config::CodecConfig;
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

use crate::diagnostics::{DiagnosticSink, EnumSubstitution, TracingSink};
use crate::error::{ModelError, Result};

/// Where in the object graph a decode is currently positioned.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Location {
    model: &'static str,
    field: &'static str,
}

/// Mutable state threaded through one unmarshal call.
pub struct DecodeContext<'a> {
    sink: Option<&'a mut dyn DiagnosticSink>,
    log_substitutions: bool,
    location: Location,
}

impl<'a> DecodeContext<'a> {
    pub fn new(config: &CodecConfig, sink: Option<&'a mut dyn DiagnosticSink>) -> Self {
        Self {
            sink,
            log_substitutions: config.log_enum_substitutions,
            location: Location {
                model: "",
                field: "",
            },
        }
    }

    pub fn model(&self) -> &'static str {
        self.location.model
    }

    pub fn field(&self) -> &'static str {
        self.location.field
    }

    pub(crate) fn enter(&mut self, model: &'static str) -> Location {
        let saved = self.location;
        self.location = Location { model, field: "" };
        saved
    }

    pub(crate) fn restore(&mut self, saved: Location) {
        self.location = saved;
    }

    pub(crate) fn set_field(&mut self, field: &'static str) {
        self.location.field = field;
    }

    /// Build a type mismatch error for the current location.
    pub fn mismatch(&self, expected: &'static str, found: &Value) -> ModelError {
        ModelError::TypeMismatch {
            model: self.location.model,
            field: self.location.field,
            expected,
            found: json_type_name(found).to_string(),
        }
    }

    /// Note that a lenient enum value at the current location became the sentinel.
    pub fn report_substitution(&mut self, enum_name: &'static str, received: String) {
        let substitution = EnumSubstitution {
            model: self.location.model,
            field: self.location.field,
            enum_name,
            received,
        };
        match self.sink.as_deref_mut() {
            Some(sink) => sink.enum_substituted(substitution),
            None if self.log_substitutions => TracingSink.enum_substituted(substitution),
            None => {}
        }
    }
}

/// Short name of a JSON value's type, for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Conversion from a present, non-null JSON value.
pub trait FromWire: Sized {
    fn from_wire(value: &Value, ctx: &mut DecodeContext<'_>) -> Result<Self>;
}

/// Projection into JSON.
pub trait ToWire {
    fn to_wire(&self, config: &CodecConfig) -> Value;
}

impl FromWire for String {
    fn from_wire(value: &Value, ctx: &mut DecodeContext<'_>) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            other => Err(ctx.mismatch("string", other)),
        }
    }
}

impl ToWire for String {
    fn to_wire(&self, _config: &CodecConfig) -> Value {
        Value::String(self.clone())
    }
}

impl FromWire for i64 {
    fn from_wire(value: &Value, ctx: &mut DecodeContext<'_>) -> Result<Self> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| {
                    n.as_f64()
                        .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                        .map(|f| f as i64)
                })
                .ok_or_else(|| ctx.mismatch("integer", value)),
            Value::String(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| ctx.mismatch("integer", value)),
            other => Err(ctx.mismatch("integer", other)),
        }
    }
}

impl ToWire for i64 {
    fn to_wire(&self, _config: &CodecConfig) -> Value {
        Value::from(*self)
    }
}

impl FromWire for bool {
    fn from_wire(value: &Value, ctx: &mut DecodeContext<'_>) -> Result<Self> {
        match value {
            Value::Bool(b) => Ok(*b),
            Value::String(s) if s.eq_ignore_ascii_case("true") => Ok(true),
            Value::String(s) if s.eq_ignore_ascii_case("false") => Ok(false),
            other => Err(ctx.mismatch("boolean", other)),
        }
    }
}

impl ToWire for bool {
    fn to_wire(&self, _config: &CodecConfig) -> Value {
        Value::Bool(*self)
    }
}

impl FromWire for f64 {
    fn from_wire(value: &Value, ctx: &mut DecodeContext<'_>) -> Result<Self> {
        match value {
            Value::Number(n) => n.as_f64().ok_or_else(|| ctx.mismatch("float", value)),
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| ctx.mismatch("float", value)),
            other => Err(ctx.mismatch("float", other)),
        }
    }
}

impl ToWire for f64 {
    fn to_wire(&self, _config: &CodecConfig) -> Value {
        Number::from_f64(*self).map_or(Value::Null, Value::Number)
    }
}

impl FromWire for Value {
    fn from_wire(value: &Value, _ctx: &mut DecodeContext<'_>) -> Result<Self> {
        Ok(value.clone())
    }
}

impl ToWire for Value {
    fn to_wire(&self, _config: &CodecConfig) -> Value {
        self.clone()
    }
}

impl<T: FromWire> FromWire for Vec<T> {
    fn from_wire(value: &Value, ctx: &mut DecodeContext<'_>) -> Result<Self> {
        match value {
            Value::Array(items) => items.iter().map(|item| T::from_wire(item, ctx)).collect(),
            other => Err(ctx.mismatch("array", other)),
        }
    }
}

impl<T: ToWire> ToWire for Vec<T> {
    fn to_wire(&self, config: &CodecConfig) -> Value {
        Value::Array(self.iter().map(|item| item.to_wire(config)).collect())
    }
}

impl<T: FromWire> FromWire for BTreeMap<String, T> {
    fn from_wire(value: &Value, ctx: &mut DecodeContext<'_>) -> Result<Self> {
        match value {
            Value::Object(entries) => entries
                .iter()
                .map(|(k, v)| Ok((k.clone(), T::from_wire(v, ctx)?)))
                .collect(),
            other => Err(ctx.mismatch("object", other)),
        }
    }
}

impl<T: ToWire> ToWire for BTreeMap<String, T> {
    fn to_wire(&self, config: &CodecConfig) -> Value {
        Value::Object(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_wire(config)))
                .collect::<Map<String, Value>>(),
        )
    }
}
