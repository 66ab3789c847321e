//! # Object Builder
//!
//! Turns `(kind, name, context, schema source, raw spec)` into a
//! schema-validated [`Object`]. Pure: identical inputs against an
//! unchanged definitions file produce an identical object or an
//! identical error, and nothing else happens — the builder never touches
//! the manifest store.
//!
//! Pipeline: resolve definition → select the first served version in
//! declared order → extract the embedded spec schema → process → validate
//! → assemble.

use std::path::Path;

use serde_json::json;
use serde_yaml::Value;

use flowctl_core::{yaml_to_json, Object, CONTEXT_LABEL};

use crate::engine::FieldSchema;
use crate::error::BuildError;
use crate::registry::Definition;

/// Build a typed resource object.
///
/// # Errors
///
/// One [`BuildError`] variant per failed stage; the first validation
/// violation is surfaced verbatim.
pub fn build_object(
    kind: &str,
    name: &str,
    context: &str,
    schema_source: &Path,
    raw_spec: &Value,
) -> Result<Object, BuildError> {
    let definition = Definition::find(schema_source, kind)?;
    let (schema, version) = served_schema(&definition)?;

    let spec = schema.process(raw_spec)?;
    schema.validate(&spec)?;

    Ok(Object::new(
        format!("{}/{}", definition.spec.group, version),
        definition.spec.names.kind.clone(),
        name,
        context,
        spec,
    ))
}

/// Build a generic structural document instead of a typed object.
///
/// Same pipeline as [`build_object`]; the result is a plain JSON value
/// (`apiVersion`/`kind`/`metadata`/`spec`) for callers handing the
/// object to a generic structured-data consumer.
pub fn build_unstructured(
    kind: &str,
    name: &str,
    context: &str,
    schema_source: &Path,
    raw_spec: &Value,
) -> Result<serde_json::Value, BuildError> {
    let definition = Definition::find(schema_source, kind)?;
    let (schema, version) = served_schema(&definition)?;

    let spec = schema.process(raw_spec)?;
    schema.validate(&spec)?;

    let spec_json = yaml_to_json(&spec).map_err(|e| BuildError::SpecProcessing {
        path: String::new(),
        reason: e.to_string(),
    })?;
    Ok(json!({
        "apiVersion": format!("{}/{}", definition.spec.group, version),
        "kind": definition.spec.names.kind,
        "metadata": {
            "name": name,
            "labels": { CONTEXT_LABEL: context },
        },
        "spec": spec_json,
    }))
}

/// Select the first served version, in declared order, and compile its
/// embedded spec schema.
///
/// Never depends on map iteration order: the definition's version list
/// is scanned front to back.
fn served_schema(definition: &Definition) -> Result<(FieldSchema, &str), BuildError> {
    let kind = &definition.spec.names.kind;
    for version in &definition.spec.versions {
        if version.served {
            let schema = FieldSchema::extract(version, kind)?;
            return Ok((schema, &version.name));
        }
    }
    Err(BuildError::DefinitionNotFound {
        kind: kind.clone(),
        reason: "definition has no served version".to_string(),
    })
}
