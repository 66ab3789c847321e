//! # Resource Object Model
//!
//! [`Object`] is the unit of persistence for the whole toolchain: a named,
//! labeled, schema-validated configuration document. The wire shape is one
//! YAML document per object:
//!
//! ```text
//! apiVersion: <group>/<version>
//! kind: <Kind>
//! metadata:
//!   name: <name>
//!   labels:
//!     triggermesh.io/context: <context-name>
//! spec:
//!   <arbitrary nested mapping>
//! ```
//!
//! Identity is the `(apiVersion, kind, metadata.name)` triple; labels and
//! spec carry state but never identity.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::value::structural_eq;

/// Label key tying an object to the broker context that owns it.
///
/// Kept byte-compatible with manifests produced by the original tooling.
pub const CONTEXT_LABEL: &str = "triggermesh.io/context";

/// A single schema-validated, named, labeled configuration document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Object {
    /// `"<group>/<version>"` of the definition the spec was validated against.
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    /// Declared kind name from the resource definition.
    pub kind: String,
    /// Name and labels.
    pub metadata: Metadata,
    /// Normalized, schema-validated configuration payload.
    #[serde(default)]
    pub spec: Value,
}

/// Object metadata: caller-supplied name plus string labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    /// Unique identifier within the identity triple. Never generated.
    pub name: String,
    /// String labels; always carries [`CONTEXT_LABEL`] for built objects.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

impl Object {
    /// Assemble an object owned by `context`.
    pub fn new(
        api_version: impl Into<String>,
        kind: impl Into<String>,
        name: impl Into<String>,
        context: impl Into<String>,
        spec: Value,
    ) -> Self {
        let mut labels = BTreeMap::new();
        labels.insert(CONTEXT_LABEL.to_string(), context.into());
        Self {
            api_version: api_version.into(),
            kind: kind.into(),
            metadata: Metadata {
                name: name.into(),
                labels,
            },
            spec,
        }
    }

    /// True when `other` denotes the same entity: equal
    /// `(apiVersion, kind, metadata.name)`.
    pub fn matches(&self, other: &Object) -> bool {
        self.api_version == other.api_version
            && self.kind == other.kind
            && self.metadata.name == other.metadata.name
    }

    /// Full structural equality: identity triple, labels, and spec.
    ///
    /// Spec comparison follows [`structural_eq`] — mapping key order is
    /// irrelevant, sequence order is not.
    pub fn structurally_equals(&self, other: &Object) -> bool {
        self.matches(other)
            && self.metadata.labels == other.metadata.labels
            && structural_eq(&self.spec, &other.spec)
    }

    /// The owning context name, when the context label is present.
    pub fn context(&self) -> Option<&str> {
        self.metadata.labels.get(CONTEXT_LABEL).map(String::as_str)
    }
}
