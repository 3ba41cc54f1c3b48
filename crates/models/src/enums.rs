//! Enum validation policies.
//!
//! Every enum type is a closed set of wire strings declared with the
//! `wire_enum!` macro. Each enum-typed field picks one policy:
//!
//! - **Strict**: the field is typed `Field<E>`. Out-of-set values fail with
//!   [`ModelError::InvalidEnumValue`].
//! - **Lenient**: the field is typed `Field<Lenient<E>>`. Out-of-set values
//!   become [`Lenient::Unknown`] and the original text is dropped; the
//!   substitution is reported to the decode's diagnostic sink.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

use crate::CodecConfig;
use crate::codec::{DecodeContext, FromWire, ToWire};
use crate::diagnostics::DiagnosticSink;
use crate::error::{ModelError, Result};

/// Wire text of the sentinel for unrecognized lenient values.
pub const UNKNOWN_ENUM_VALUE: &str = "UNKNOWN_ENUM_VALUE";

/// A closed set of wire strings.
pub trait WireEnum: Copy + Eq + fmt::Debug + 'static {
    const NAME: &'static str;
    const VARIANTS: &'static [Self];

    fn as_wire_str(&self) -> &'static str;

    fn from_wire_str(value: &str) -> Option<Self> {
        Self::VARIANTS
            .iter()
            .copied()
            .find(|v| v.as_wire_str() == value)
    }

    fn allowed_values() -> Vec<&'static str> {
        Self::VARIANTS.iter().map(|v| v.as_wire_str()).collect()
    }
}

/// A lenient enum value: a recognized variant or the sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lenient<E> {
    Known(E),
    /// Received but not recognized.
    Unknown,
}

impl<E: WireEnum> Lenient<E> {
    /// Map text to a variant, falling back to the sentinel without reporting.
    pub fn parse(value: &str) -> Self {
        E::from_wire_str(value).map_or(Self::Unknown, Self::Known)
    }

    pub fn known(&self) -> Option<E> {
        match self {
            Self::Known(e) => Some(*e),
            Self::Unknown => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    pub fn as_wire_str(&self) -> &'static str {
        match self {
            Self::Known(e) => e.as_wire_str(),
            Self::Unknown => UNKNOWN_ENUM_VALUE,
        }
    }
}

impl<E> From<E> for Lenient<E> {
    fn from(value: E) -> Self {
        Self::Known(value)
    }
}

impl<E: WireEnum> fmt::Display for Lenient<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire_str())
    }
}

impl<E: WireEnum> FromWire for Lenient<E> {
    fn from_wire(value: &Value, ctx: &mut DecodeContext<'_>) -> Result<Self> {
        let parsed = value.as_str().and_then(E::from_wire_str);
        match parsed {
            Some(e) => Ok(Self::Known(e)),
            None => {
                let received = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                ctx.report_substitution(E::NAME, received);
                Ok(Self::Unknown)
            }
        }
    }
}

impl<E: WireEnum> ToWire for Lenient<E> {
    fn to_wire(&self, _config: &CodecConfig) -> Value {
        Value::String(self.as_wire_str().to_string())
    }
}

impl<E: WireEnum> Serialize for Lenient<E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire_str())
    }
}

impl<'de, E: WireEnum> Deserialize<'de> for Lenient<E> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// Validate text for a strict enum field.
pub fn assign_strict<E: WireEnum>(model: &'static str, field: &'static str, value: &str) -> Result<E> {
    E::from_wire_str(value).ok_or_else(|| {
        tracing::warn!(model, field, value, "Rejected value outside strict enum set");
        ModelError::InvalidEnumValue {
            model,
            field,
            value: value.to_string(),
            allowed: E::allowed_values(),
        }
    })
}

/// Map text for a lenient enum field, reporting any substitution.
///
/// Uses the default [`CodecConfig`], so with no sink the substitution is
/// logged through `tracing`. See [`assign_lenient_with`] to silence it.
pub fn assign_lenient<E: WireEnum>(
    model: &'static str,
    field: &'static str,
    value: &str,
    sink: Option<&mut dyn DiagnosticSink>,
) -> Lenient<E> {
    assign_lenient_with(model, field, value, &CodecConfig::default(), sink)
}

/// Like [`assign_lenient`], honoring `config.log_enum_substitutions` when no
/// sink is given.
pub fn assign_lenient_with<E: WireEnum>(
    model: &'static str,
    field: &'static str,
    value: &str,
    config: &CodecConfig,
    sink: Option<&mut dyn DiagnosticSink>,
) -> Lenient<E> {
    let parsed = Lenient::<E>::parse(value);
    if parsed.is_unknown() {
        let mut ctx = DecodeContext::new(config, sink);
        ctx.enter(model);
        ctx.set_field(field);
        ctx.report_substitution(E::NAME, value.to_string());
    }
    parsed
}

/// Decode a strict enum at the context's current location.
pub fn decode_strict<E: WireEnum>(value: &Value, ctx: &mut DecodeContext<'_>) -> Result<E> {
    match value {
        Value::String(s) => assign_strict(ctx.model(), ctx.field(), s),
        other => assign_strict(ctx.model(), ctx.field(), &other.to_string()),
    }
}
