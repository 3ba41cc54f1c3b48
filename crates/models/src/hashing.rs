//! Structural hashing for models.
//!
//! Equal models always produce equal wire projections, so hashing the
//! projection field by field in schema order is consistent with the derived
//! `PartialEq`. JSON objects are hashed with their keys sorted, which makes the
//! result independent of insertion order.

use serde_json::Value;
use std::hash::{Hash, Hasher};

use crate::marshal::Model;

/// Hash the model name followed by every schema field.
pub fn hash_model<M: Model, H: Hasher>(model: &M, state: &mut H) {
    let schema = M::schema();
    let projection = model.marshal();
    schema.model.hash(state);
    for spec in schema.fields {
        spec.wire_key.hash(state);
        match projection.get(spec.wire_key) {
            None => state.write_u8(0),
            Some(value) => {
                state.write_u8(1);
                hash_value(value, state);
            }
        }
    }
}

/// Hash a JSON value with object keys in sorted order.
pub fn hash_value<H: Hasher>(value: &Value, state: &mut H) {
    match value {
        Value::Null => state.write_u8(0),
        Value::Bool(b) => {
            state.write_u8(1);
            b.hash(state);
        }
        Value::Number(n) => {
            state.write_u8(2);
            if let Some(i) = n.as_i64() {
                i.hash(state);
            } else if let Some(u) = n.as_u64() {
                u.hash(state);
            } else if let Some(f) = n.as_f64() {
                // -0.0 == 0.0
                let f = if f == 0.0 { 0.0 } else { f };
                f.to_bits().hash(state);
            }
        }
        Value::String(s) => {
            state.write_u8(3);
            s.hash(state);
        }
        Value::Array(items) => {
            state.write_u8(4);
            items.len().hash(state);
            for item in items {
                hash_value(item, state);
            }
        }
        Value::Object(entries) => {
            state.write_u8(5);
            entries.len().hash(state);
            let mut keys: Vec<&String> = entries.keys().collect();
            keys.sort();
            for key in keys {
                key.hash(state);
                hash_value(&entries[key.as_str()], state);
            }
        }
    }
}
