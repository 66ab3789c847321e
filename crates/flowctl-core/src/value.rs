//! # Recursive Value Helpers
//!
//! Spec payloads are loosely-typed trees of scalars, sequences, and
//! mappings. This module defines the two operations the rest of the
//! workspace needs over them: structural equality (used by the manifest
//! merge to decide whether a candidate changes anything) and conversion
//! between the YAML and JSON value models (the schema engine validates
//! JSON values, manifests persist YAML).
//!
//! Equality semantics are explicit rather than derived:
//!
//! - mappings compare **key-order-insensitively** — `{a: 1, b: 2}` equals
//!   `{b: 2, a: 1}`;
//! - sequences compare **order-sensitively** — `[1, 2]` differs from
//!   `[2, 1]`.

use serde_yaml::Value;
use thiserror::Error;

/// Error converting between YAML and JSON value trees.
#[derive(Error, Debug)]
pub enum ConversionError {
    /// Non-finite floats have no JSON representation.
    #[error("cannot represent float {0} in JSON")]
    NonFiniteFloat(f64),

    /// Mapping keys must be scalars to become JSON object keys.
    #[error("unsupported mapping key: {0}")]
    UnsupportedKey(String),
}

/// Recursive structural equality over two YAML values.
///
/// Mappings are equal when they hold the same key set and each key maps
/// to structurally equal values, regardless of insertion order.
/// Sequences are equal only element-by-element in order. Tagged values
/// compare by tag and inner value.
pub fn structural_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Sequence(x), Value::Sequence(y)) => {
            x.len() == y.len() && x.iter().zip(y.iter()).all(|(u, v)| structural_eq(u, v))
        }
        (Value::Mapping(x), Value::Mapping(y)) => {
            x.len() == y.len()
                && x.iter().all(|(k, v)| match y.get(k) {
                    Some(w) => structural_eq(v, w),
                    None => false,
                })
        }
        (Value::Tagged(x), Value::Tagged(y)) => {
            x.tag == y.tag && structural_eq(&x.value, &y.value)
        }
        _ => false,
    }
}

/// Convert a YAML value tree into the equivalent JSON value tree.
///
/// YAML has a richer type system than JSON (tags, non-string keys), but
/// spec payloads use only the JSON-compatible subset. Non-string mapping
/// keys are stringified the way YAML scalars print; tags are dropped and
/// the inner value converted.
pub fn yaml_to_json(value: &Value) -> Result<serde_json::Value, ConversionError> {
    match value {
        Value::Null => Ok(serde_json::Value::Null),
        Value::Bool(b) => Ok(serde_json::Value::Bool(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(serde_json::Value::Number(serde_json::Number::from(i)))
            } else if let Some(u) = n.as_u64() {
                Ok(serde_json::Value::Number(serde_json::Number::from(u)))
            } else {
                let f = n.as_f64().unwrap_or(f64::NAN);
                serde_json::Number::from_f64(f)
                    .map(serde_json::Value::Number)
                    .ok_or(ConversionError::NonFiniteFloat(f))
            }
        }
        Value::String(s) => Ok(serde_json::Value::String(s.clone())),
        Value::Sequence(seq) => {
            let items: Result<Vec<serde_json::Value>, ConversionError> =
                seq.iter().map(yaml_to_json).collect();
            Ok(serde_json::Value::Array(items?))
        }
        Value::Mapping(map) => {
            let mut out = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    other => {
                        return Err(ConversionError::UnsupportedKey(format!("{other:?}")))
                    }
                };
                out.insert(key, yaml_to_json(v)?);
            }
            Ok(serde_json::Value::Object(out))
        }
        Value::Tagged(tagged) => yaml_to_json(&tagged.value),
    }
}

/// Convert a JSON value tree into the equivalent YAML value tree.
///
/// Total: every JSON value has a YAML representation.
pub fn json_to_yaml(value: &serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                Value::Number(u.into())
            } else {
                Value::Number(n.as_f64().unwrap_or(f64::NAN).into())
            }
        }
        serde_json::Value::String(s) => Value::String(s.clone()),
        serde_json::Value::Array(items) => {
            Value::Sequence(items.iter().map(json_to_yaml).collect())
        }
        serde_json::Value::Object(map) => {
            let mut out = serde_yaml::Mapping::new();
            for (k, v) in map {
                out.insert(Value::String(k.clone()), json_to_yaml(v));
            }
            Value::Mapping(out)
        }
    }
}
