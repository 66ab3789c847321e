//! # Spec Schema Engine
//!
//! [`FieldSchema`] wraps the OpenAPI-v3-subset schema embedded in a
//! definition version and implements the two halves of the spec
//! contract:
//!
//! - [`FieldSchema::process`] normalizes a raw nested mapping: declared
//!   defaults are applied, and string scalars (the natural shape of CLI
//!   input) are coerced into the declared `integer`/`number`/`boolean`
//!   types. Comma-joined strings become sequences for `array` properties.
//!   Undeclared keys pass through untouched; validation decides their
//!   fate.
//! - [`FieldSchema::validate`] checks the normalized mapping against the
//!   compiled schema and reports the **first** violated constraint,
//!   verbatim, with its instance path.

use jsonschema::{Draft, Validator};
use serde_yaml::{Mapping, Value};

use flowctl_core::{json_to_yaml, yaml_to_json};

use crate::error::BuildError;
use crate::registry::DefinitionVersion;

/// Compiled field schema for the configurable section of an object.
pub struct FieldSchema {
    schema: serde_json::Value,
    validator: Validator,
}

impl std::fmt::Debug for FieldSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldSchema")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

impl FieldSchema {
    /// Compile a spec field schema. `kind` and `version` only feed error
    /// context.
    ///
    /// # Errors
    ///
    /// `SchemaExtraction` when the schema is not an object schema or
    /// does not compile.
    pub fn new(
        schema: serde_json::Value,
        kind: &str,
        version: &str,
    ) -> Result<Self, BuildError> {
        let extraction = |reason: String| BuildError::SchemaExtraction {
            kind: kind.to_string(),
            version: version.to_string(),
            reason,
        };

        if !schema.is_object() {
            return Err(extraction("spec schema is not an object".to_string()));
        }
        let validator = jsonschema::options()
            .with_draft(Draft::Draft202012)
            .build(&schema)
            .map_err(|e| extraction(format!("schema does not compile: {e}")))?;
        Ok(Self { schema, validator })
    }

    /// Extract and compile the spec field schema embedded in a
    /// definition version, at `schema.openAPIV3Schema.properties.spec`.
    pub fn extract(version: &DefinitionVersion, kind: &str) -> Result<Self, BuildError> {
        let extraction = |reason: &str| BuildError::SchemaExtraction {
            kind: kind.to_string(),
            version: version.name.clone(),
            reason: reason.to_string(),
        };

        let object_schema = version
            .schema
            .as_ref()
            .and_then(|s| s.open_api_v3.as_ref())
            .ok_or_else(|| extraction("version carries no schema"))?;
        let spec_schema = object_schema
            .get("properties")
            .and_then(|p| p.get("spec"))
            .ok_or_else(|| extraction("object schema declares no spec section"))?;
        let json = yaml_to_json(spec_schema)
            .map_err(|e| extraction(&format!("unusable spec schema: {e}")))?;
        Self::new(json, kind, &version.name)
    }

    /// Normalize a raw spec mapping: apply defaults, coerce scalars.
    ///
    /// # Errors
    ///
    /// `SpecProcessing` on structural mismatch — a scalar where the
    /// schema declares an object, an uncoercible string, a non-mapping
    /// root.
    pub fn process(&self, raw: &Value) -> Result<Value, BuildError> {
        let mapping = match raw {
            Value::Null => Mapping::new(),
            Value::Mapping(m) => m.clone(),
            other => {
                return Err(mismatch("", "mapping", other));
            }
        };
        Ok(Value::Mapping(process_object(&self.schema, &mapping, "")?))
    }

    /// Validate a normalized spec against the compiled schema.
    ///
    /// # Errors
    ///
    /// `Validation` carrying the first violation encountered.
    pub fn validate(&self, spec: &Value) -> Result<(), BuildError> {
        let instance = yaml_to_json(spec).map_err(|e| BuildError::SpecProcessing {
            path: String::new(),
            reason: e.to_string(),
        })?;
        if let Some(first) = self.validator.iter_errors(&instance).next() {
            return Err(BuildError::Validation {
                instance_path: first.instance_path.to_string(),
                violation: first.to_string(),
            });
        }
        Ok(())
    }
}

/// Process one mapping level: coerce declared properties, pass
/// undeclared ones through, then fill in defaults for absent declared
/// properties.
fn process_object(
    schema: &serde_json::Value,
    raw: &Mapping,
    path: &str,
) -> Result<Mapping, BuildError> {
    let properties = schema.get("properties").and_then(serde_json::Value::as_object);

    let mut out = Mapping::new();
    for (key, value) in raw {
        let name = key.as_str();
        let property = name.and_then(|n| properties.and_then(|p| p.get(n)));
        let field_path = join_path(path, name.unwrap_or("<non-string key>"));
        let processed = match property {
            Some(property_schema) => process_value(property_schema, value, &field_path)?,
            None => value.clone(),
        };
        out.insert(key.clone(), processed);
    }

    if let Some(properties) = properties {
        for (name, property_schema) in properties {
            let key = Value::String(name.clone());
            if !out.contains_key(&key) {
                if let Some(default) = property_schema.get("default") {
                    out.insert(key, json_to_yaml(default));
                }
            }
        }
    }
    Ok(out)
}

/// Coerce one value against its declared property schema.
fn process_value(
    schema: &serde_json::Value,
    value: &Value,
    path: &str,
) -> Result<Value, BuildError> {
    // Absent-by-null passes through; validation decides whether null is
    // acceptable for the declared type.
    if value.is_null() {
        return Ok(Value::Null);
    }

    match schema.get("type").and_then(serde_json::Value::as_str) {
        Some("object") => match value {
            Value::Mapping(m) => Ok(Value::Mapping(process_object(schema, m, path)?)),
            other => Err(mismatch(path, "mapping", other)),
        },
        Some("array") => process_array(schema.get("items"), value, path),
        Some("integer") => match value {
            Value::Number(_) => Ok(value.clone()),
            Value::String(s) => s
                .trim()
                .parse::<i64>()
                .map(|i| Value::Number(i.into()))
                .map_err(|_| mismatch(path, "integer", value)),
            other => Err(mismatch(path, "integer", other)),
        },
        Some("number") => match value {
            Value::Number(_) => Ok(value.clone()),
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map(|f| Value::Number(f.into()))
                .map_err(|_| mismatch(path, "number", value)),
            other => Err(mismatch(path, "number", other)),
        },
        Some("boolean") => match value {
            Value::Bool(_) => Ok(value.clone()),
            Value::String(s) => match s.trim() {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                _ => Err(mismatch(path, "boolean", value)),
            },
            other => Err(mismatch(path, "boolean", other)),
        },
        Some("string") => match value {
            Value::String(_) => Ok(value.clone()),
            Value::Number(n) => Ok(Value::String(n.to_string())),
            Value::Bool(b) => Ok(Value::String(b.to_string())),
            other => Err(mismatch(path, "string", other)),
        },
        // No declared type: pass through untouched.
        _ => Ok(value.clone()),
    }
}

/// Coerce a declared `array` property. A plain string is treated as a
/// comma-joined list, the shape free-form CLI arguments arrive in.
fn process_array(
    items: Option<&serde_json::Value>,
    value: &Value,
    path: &str,
) -> Result<Value, BuildError> {
    let elements: Vec<Value> = match value {
        Value::Sequence(seq) => seq.clone(),
        Value::String(s) => s
            .split(',')
            .map(|part| Value::String(part.trim().to_string()))
            .collect(),
        other => return Err(mismatch(path, "sequence", other)),
    };

    let processed: Result<Vec<Value>, BuildError> = elements
        .iter()
        .enumerate()
        .map(|(i, element)| match items {
            Some(item_schema) => {
                process_value(item_schema, element, &format!("{path}[{i}]"))
            }
            None => Ok(element.clone()),
        })
        .collect();
    Ok(Value::Sequence(processed?))
}

fn join_path(path: &str, field: &str) -> String {
    if path.is_empty() {
        field.to_string()
    } else {
        format!("{path}.{field}")
    }
}

fn mismatch(path: &str, expected: &str, got: &Value) -> BuildError {
    BuildError::SpecProcessing {
        path: path.to_string(),
        reason: format!("expected {expected}, got {}", type_name(got)),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> FieldSchema {
        FieldSchema::new(
            json!({
                "type": "object",
                "properties": {
                    "endpoint": {"type": "string"},
                    "interval": {"type": "integer", "default": 30},
                    "insecure": {"type": "boolean"},
                    "topics": {"type": "array", "items": {"type": "string"}},
                    "auth": {
                        "type": "object",
                        "properties": {
                            "token": {"type": "string"},
                            "retries": {"type": "integer"}
                        }
                    }
                },
                "required": ["endpoint"]
            }),
            "WebhookSource",
            "v1alpha1",
        )
        .unwrap()
    }

    fn yaml(s: &str) -> Value {
        serde_yaml::from_str(s).unwrap()
    }

    #[test]
    fn process_applies_defaults() {
        let spec = schema().process(&yaml("{endpoint: 'https://x'}")).unwrap();
        assert_eq!(spec["interval"], Value::Number(30.into()));
    }

    #[test]
    fn process_keeps_explicit_value_over_default() {
        let spec = schema()
            .process(&yaml("{endpoint: 'https://x', interval: 5}"))
            .unwrap();
        assert_eq!(spec["interval"], Value::Number(5.into()));
    }

    #[test]
    fn process_coerces_cli_strings() {
        let spec = schema()
            .process(&yaml("{endpoint: 'https://x', interval: '7', insecure: 'true'}"))
            .unwrap();
        assert_eq!(spec["interval"], Value::Number(7.into()));
        assert_eq!(spec["insecure"], Value::Bool(true));
    }

    #[test]
    fn process_splits_comma_joined_arrays() {
        let spec = schema()
            .process(&yaml("{endpoint: 'https://x', topics: 'a, b,c'}"))
            .unwrap();
        assert_eq!(spec["topics"], yaml("[a, b, c]"));
    }

    #[test]
    fn process_recurses_into_declared_objects() {
        let spec = schema()
            .process(&yaml("{endpoint: 'https://x', auth: {retries: '3'}}"))
            .unwrap();
        assert_eq!(spec["auth"]["retries"], Value::Number(3.into()));
    }

    #[test]
    fn process_passes_undeclared_keys_through() {
        let spec = schema()
            .process(&yaml("{endpoint: 'https://x', extra: [1, 2]}"))
            .unwrap();
        assert_eq!(spec["extra"], yaml("[1, 2]"));
    }

    #[test]
    fn process_rejects_scalar_for_declared_object() {
        let err = schema()
            .process(&yaml("{endpoint: 'https://x', auth: token}"))
            .unwrap_err();
        assert!(
            matches!(err, BuildError::SpecProcessing { ref path, .. } if path == "auth"),
            "got: {err}"
        );
    }

    #[test]
    fn process_rejects_uncoercible_integer() {
        let err = schema()
            .process(&yaml("{endpoint: 'https://x', interval: soon}"))
            .unwrap_err();
        assert!(matches!(err, BuildError::SpecProcessing { .. }), "got: {err}");
    }

    #[test]
    fn process_rejects_non_mapping_root() {
        let err = schema().process(&yaml("[1, 2]")).unwrap_err();
        assert!(matches!(err, BuildError::SpecProcessing { .. }), "got: {err}");
    }

    #[test]
    fn validate_accepts_processed_spec() {
        let s = schema();
        let spec = s.process(&yaml("{endpoint: 'https://x'}")).unwrap();
        s.validate(&spec).unwrap();
    }

    #[test]
    fn validate_reports_first_missing_required_field() {
        let s = schema();
        let spec = s.process(&yaml("{interval: 5}")).unwrap();
        let err = s.validate(&spec).unwrap_err();
        match err {
            BuildError::Validation { violation, .. } => {
                assert!(violation.contains("endpoint"), "violation: {violation}");
            }
            other => panic!("expected Validation, got: {other}"),
        }
    }

    #[test]
    fn validate_reports_wrong_type() {
        let s = schema();
        let err = s
            .validate(&yaml("{endpoint: 'https://x', topics: 42}"))
            .unwrap_err();
        match err {
            BuildError::Validation { instance_path, .. } => {
                assert_eq!(instance_path, "/topics");
            }
            other => panic!("expected Validation, got: {other}"),
        }
    }

    #[test]
    fn non_object_schema_is_rejected() {
        let err = FieldSchema::new(json!("noschema"), "K", "v1").unwrap_err();
        assert!(matches!(err, BuildError::SchemaExtraction { .. }), "got: {err}");
    }
}
