//! Schema-driven marshal and unmarshal.
//!
//! Responsibilities:
//! - Resolve each schema field from an input object under either of its accepted
//!   spellings, rejecting input that supplies both.
//! - Apply declared defaults only when a field is absent under every spelling.
//! - Skip sequence fields whose present value is not an array.
//! - Project models back to JSON objects in schema order, omitting unset fields.
//!
//! Explicitly does NOT handle:
//! - Primitive coercion (see [`crate::codec`]).
//! - Choosing a concrete subtype for polymorphic input (see `polymorphic_model!`).
//!
//! Invariants / assumptions:
//! - Input `null` decodes to [`Field::Unset`]; [`Field::Null`] only comes from setters.
//! - A failed decode never yields a partially populated model.

use serde_json::{Map, Value};

use crate::CodecConfig;
use crate::codec::{DecodeContext, FromWire, ToWire, json_type_name};
use crate::diagnostics::DiagnosticSink;
use crate::error::{ModelError, Result};
use crate::field::Field;
use crate::schema::{FieldSpec, Schema};

/// A type whose wire shape is described by a static [`Schema`].
pub trait Model: Sized {
    fn schema() -> &'static Schema;

    /// Build an instance from the fields of one input object.
    fn decode_fields(reader: &mut FieldReader<'_, '_, '_>) -> Result<Self>;

    /// Write every field into `writer`.
    fn encode_fields(&self, writer: &mut FieldWriter<'_>);

    /// Decode with the default configuration; substitutions go to `tracing`.
    fn unmarshal(value: &Value) -> Result<Self> {
        Self::unmarshal_configured(value, &CodecConfig::default(), None)
    }

    /// Decode with the default configuration, reporting substitutions to `sink`.
    fn unmarshal_with(value: &Value, sink: &mut dyn DiagnosticSink) -> Result<Self> {
        Self::unmarshal_configured(value, &CodecConfig::default(), Some(sink))
    }

    fn unmarshal_configured(
        value: &Value,
        config: &CodecConfig,
        sink: Option<&mut dyn DiagnosticSink>,
    ) -> Result<Self> {
        let mut ctx = DecodeContext::new(config, sink);
        decode_model(value, &mut ctx)
    }

    /// Parse JSON text and decode it.
    fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::unmarshal(&value)
    }

    fn marshal(&self) -> Value {
        self.marshal_with(&CodecConfig::default())
    }

    fn marshal_with(&self, config: &CodecConfig) -> Value {
        let mut writer = FieldWriter::new(Self::schema(), config);
        self.encode_fields(&mut writer);
        Value::Object(writer.finish())
    }
}

/// Decode `value` as model `M` within an existing context.
pub fn decode_model<M: Model>(value: &Value, ctx: &mut DecodeContext<'_>) -> Result<M> {
    let schema = M::schema();
    let Value::Object(object) = value else {
        return Err(ModelError::NotAnObject {
            model: schema.model,
            found: json_type_name(value).to_string(),
        });
    };

    let saved = ctx.enter(schema.model);
    let result = {
        let mut reader = FieldReader::new(schema, object, &mut *ctx);
        M::decode_fields(&mut reader)
    };
    ctx.restore(saved);
    result
}

/// Reads schema fields out of one input object.
pub struct FieldReader<'v, 'c, 's> {
    schema: &'static Schema,
    object: &'v Map<String, Value>,
    ctx: &'c mut DecodeContext<'s>,
}

impl<'v, 'c, 's> FieldReader<'v, 'c, 's> {
    pub fn new(
        schema: &'static Schema,
        object: &'v Map<String, Value>,
        ctx: &'c mut DecodeContext<'s>,
    ) -> Self {
        Self {
            schema,
            object,
            ctx,
        }
    }

    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    /// Decode one field; absent and `null` values leave it unset.
    pub fn read<T: FromWire>(&mut self, local_name: &'static str) -> Result<Field<T>> {
        let spec = self.spec(local_name)?;
        let value = self.lookup(spec)?;
        self.convert(spec, value)
    }

    /// Decode one field, using `default` when no accepted spelling is present.
    ///
    /// A present spelling suppresses the default even when its value is `null`.
    pub fn read_or<T: FromWire>(&mut self, local_name: &'static str, default: T) -> Result<Field<T>> {
        let spec = self.spec(local_name)?;
        match self.lookup(spec)? {
            None => Ok(Field::Value(default)),
            present => self.convert(spec, present),
        }
    }

    /// Whether any accepted spelling of the field is present.
    pub fn contains(&self, local_name: &str) -> bool {
        self.schema.field(local_name).is_some_and(|spec| {
            self.object.contains_key(spec.wire_key) || self.object.contains_key(spec.local_name)
        })
    }

    fn spec(&self, local_name: &'static str) -> Result<&'static FieldSpec> {
        self.schema
            .field(local_name)
            .ok_or(ModelError::UnknownField {
                model: self.schema.model,
                field: local_name,
            })
    }

    fn lookup(&self, spec: &'static FieldSpec) -> Result<Option<&'v Value>> {
        let by_wire = self.object.get(spec.wire_key);
        if !spec.has_alternate_key() {
            return Ok(by_wire);
        }
        match (by_wire, self.object.get(spec.local_name)) {
            (Some(_), Some(_)) => Err(ModelError::AmbiguousInput {
                model: self.schema.model,
                field: spec.local_name,
                wire_key: spec.wire_key,
                local_name: spec.local_name,
            }),
            (by_wire, by_local) => Ok(by_wire.or(by_local)),
        }
    }

    fn convert<T: FromWire>(&mut self, spec: &'static FieldSpec, value: Option<&'v Value>) -> Result<Field<T>> {
        let Some(value) = value.filter(|v| !v.is_null()) else {
            return Ok(Field::Unset);
        };
        if spec.kind.is_sequence() && !value.is_array() {
            tracing::trace!(
                model = self.schema.model,
                field = spec.local_name,
                found = json_type_name(value),
                "Skipping non-array value for sequence field"
            );
            return Ok(Field::Unset);
        }
        self.ctx.set_field(spec.local_name);
        T::from_wire(value, self.ctx).map(Field::Value)
    }
}

/// Collects projected fields and emits them in schema order.
pub struct FieldWriter<'c> {
    schema: &'static Schema,
    config: &'c CodecConfig,
    slots: Vec<Option<Value>>,
}

impl<'c> FieldWriter<'c> {
    pub fn new(schema: &'static Schema, config: &'c CodecConfig) -> Self {
        Self {
            schema,
            config,
            slots: vec![None; schema.fields.len()],
        }
    }

    /// Record one field. Unset fields are not emitted.
    pub fn put<T: ToWire>(&mut self, local_name: &'static str, field: &Field<T>) {
        let projected = match field {
            Field::Unset => return,
            Field::Null => Value::Null,
            Field::Value(value) => value.to_wire(self.config),
        };
        match self.schema.position(local_name) {
            Some(index) => self.slots[index] = Some(projected),
            None => {
                tracing::warn!(
                    model = self.schema.model,
                    field = local_name,
                    "Dropping field missing from schema"
                );
            }
        }
    }

    pub fn finish(self) -> Map<String, Value> {
        self.schema
            .fields
            .iter()
            .zip(self.slots)
            .filter_map(|(spec, slot)| slot.map(|value| (spec.wire_key.to_string(), value)))
            .collect()
    }
}
