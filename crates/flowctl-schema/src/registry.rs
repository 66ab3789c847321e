//! # Resource Definition Registry Adapter
//!
//! Resource definitions are CRD-style YAML documents concatenated in a
//! single definitions file (the "schema source"). Each document exposes
//! the API group, the kind name, and an ordered version list; every
//! version carries a served flag and the embedded spec schema.
//!
//! The adapter is read-only: it resolves kinds and lists what is
//! available, nothing more.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_yaml::Value;

use crate::error::BuildError;

/// An externally supplied resource definition.
#[derive(Debug, Clone, Deserialize)]
pub struct Definition {
    /// Definition body.
    pub spec: DefinitionSpec,
}

/// The `spec` section of a definition document.
#[derive(Debug, Clone, Deserialize)]
pub struct DefinitionSpec {
    /// API group, the left half of `apiVersion`.
    pub group: String,
    /// Declared names for the defined kind.
    pub names: DefinitionNames,
    /// Versions in declared order. Selection must follow this order,
    /// never a map iteration order.
    pub versions: Vec<DefinitionVersion>,
}

/// Declared names of a defined kind.
#[derive(Debug, Clone, Deserialize)]
pub struct DefinitionNames {
    /// Kind name, e.g. `WebhookSource`.
    pub kind: String,
}

/// One version of a definition.
#[derive(Debug, Clone, Deserialize)]
pub struct DefinitionVersion {
    /// Version name, e.g. `v1alpha1`.
    pub name: String,
    /// Whether this version is eligible for use.
    #[serde(default)]
    pub served: bool,
    /// Embedded validation schema for objects of this version.
    #[serde(default)]
    pub schema: Option<VersionSchema>,
}

/// Schema container of a definition version.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionSchema {
    /// OpenAPI-v3-subset object schema. The spec field schema lives at
    /// `properties.spec` inside it.
    #[serde(rename = "openAPIV3Schema", default)]
    pub open_api_v3: Option<Value>,
}

impl Definition {
    /// Resolve the definition for `kind` (case-insensitive) from the
    /// definitions file at `source`.
    ///
    /// # Errors
    ///
    /// `DefinitionNotFound` when the source is unreadable, unparseable,
    /// or holds no matching document — from the caller's view the
    /// definition is unavailable either way.
    pub fn find(source: &Path, kind: &str) -> Result<Definition, BuildError> {
        let documents = parse_source(source).map_err(|e| BuildError::DefinitionNotFound {
            kind: kind.to_string(),
            reason: e.to_string(),
        })?;
        for document in documents {
            if document.spec.names.kind.eq_ignore_ascii_case(kind) {
                return Ok(document);
            }
        }
        Err(BuildError::DefinitionNotFound {
            kind: kind.to_string(),
            reason: format!("no matching definition in '{}'", source.display()),
        })
    }
}

/// All kind names declared in the definitions file, in file order.
pub fn list_kinds(source: &Path) -> Result<Vec<String>, BuildError> {
    Ok(parse_source(source)?
        .into_iter()
        .map(|d| d.spec.names.kind)
        .collect())
}

/// Kinds whose name ends in `Source`, lowercased with the suffix
/// stripped, in file order: `WebhookSource` lists as `webhook`, the
/// shape `create source` accepts back.
pub fn list_sources(source: &Path) -> Result<Vec<String>, BuildError> {
    list_suffixed(source, "source")
}

/// Kinds whose name ends in `Target`, lowercased with the suffix
/// stripped, in file order.
pub fn list_targets(source: &Path) -> Result<Vec<String>, BuildError> {
    list_suffixed(source, "target")
}

fn list_suffixed(source: &Path, suffix: &str) -> Result<Vec<String>, BuildError> {
    Ok(list_kinds(source)?
        .into_iter()
        .filter_map(|kind| {
            let lowered = kind.to_ascii_lowercase();
            lowered
                .strip_suffix(suffix)
                .map(|stripped| stripped.to_string())
        })
        .collect())
}

/// Decode every definition document in the source file, skipping empty
/// documents.
fn parse_source(source: &Path) -> Result<Vec<Definition>, BuildError> {
    let unusable = |reason: String| BuildError::SchemaSource {
        source: source.display().to_string(),
        reason,
    };

    let content =
        fs::read_to_string(source).map_err(|e| unusable(format!("cannot read file: {e}")))?;

    let mut result = Vec::new();
    for document in serde_yaml::Deserializer::from_str(&content) {
        let value = Value::deserialize(document)
            .map_err(|e| unusable(format!("malformed definitions file: {e}")))?;
        if value.is_null() {
            continue;
        }
        let definition: Definition = serde_yaml::from_value(value)
            .map_err(|e| unusable(format!("malformed definition document: {e}")))?;
        result.push(definition);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DEFINITIONS: &str = r#"
apiVersion: apiextensions.k8s.io/v1
kind: CustomResourceDefinition
metadata:
  name: webhooksources.sources.flow.dev
spec:
  group: sources.flow.dev
  names:
    kind: WebhookSource
  versions:
    - name: v1alpha1
      served: true
      schema:
        openAPIV3Schema:
          type: object
          properties:
            spec:
              type: object
              properties:
                path: {type: string}
---
apiVersion: apiextensions.k8s.io/v1
kind: CustomResourceDefinition
metadata:
  name: kafkatargets.targets.flow.dev
spec:
  group: targets.flow.dev
  names:
    kind: KafkaTarget
  versions:
    - name: v1alpha1
      served: true
      schema:
        openAPIV3Schema:
          type: object
          properties:
            spec:
              type: object
              properties:
                topic: {type: string}
"#;

    fn definitions_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DEFINITIONS.as_bytes()).unwrap();
        file
    }

    #[test]
    fn find_matches_kind_case_insensitively() {
        let file = definitions_file();
        let def = Definition::find(file.path(), "webhooksource").unwrap();
        assert_eq!(def.spec.names.kind, "WebhookSource");
        assert_eq!(def.spec.group, "sources.flow.dev");
        assert_eq!(def.spec.versions.len(), 1);
    }

    #[test]
    fn find_unknown_kind_fails() {
        let file = definitions_file();
        let err = Definition::find(file.path(), "NoSuchSource").unwrap_err();
        assert!(
            matches!(err, BuildError::DefinitionNotFound { ref kind, .. } if kind == "NoSuchSource"),
            "got: {err}"
        );
    }

    #[test]
    fn find_missing_file_fails_as_not_found() {
        let err = Definition::find(Path::new("/nonexistent/defs.yaml"), "WebhookSource")
            .unwrap_err();
        assert!(matches!(err, BuildError::DefinitionNotFound { .. }), "got: {err}");
    }

    #[test]
    fn listing_splits_sources_and_targets() {
        let file = definitions_file();
        assert_eq!(
            list_kinds(file.path()).unwrap(),
            ["WebhookSource", "KafkaTarget"]
        );
    }

    #[test]
    fn listed_kinds_are_lowercased_with_suffix_stripped() {
        let file = definitions_file();
        assert_eq!(list_sources(file.path()).unwrap(), ["webhook"]);
        assert_eq!(list_targets(file.path()).unwrap(), ["kafka"]);
    }

    #[test]
    fn listing_failure_names_the_source_not_a_kind() {
        let err = list_kinds(Path::new("/nonexistent/defs.yaml")).unwrap_err();
        match err {
            BuildError::SchemaSource { source, .. } => {
                assert_eq!(source, "/nonexistent/defs.yaml");
            }
            other => panic!("expected SchemaSource, got: {other}"),
        }
    }
}
