//! # Build Pipeline Errors
//!
//! One variant per pipeline stage, so a caller can always tell whether a
//! failure came from definition lookup, schema extraction, normalization,
//! or validation. Nothing is retried; nothing is downgraded to a warning.

use std::fmt;

/// Error building a resource object from user input.
#[derive(Debug)]
pub enum BuildError {
    /// No definition matches the requested kind, or the matching
    /// definition has no served version.
    DefinitionNotFound {
        /// Kind the caller asked for.
        kind: String,
        /// Why resolution failed (missing entry, unreadable source,
        /// no served version).
        reason: String,
    },

    /// The definitions file itself could not be read or parsed while
    /// enumerating what it offers.
    SchemaSource {
        /// Path of the definitions file.
        source: String,
        /// Why it was unusable.
        reason: String,
    },

    /// The selected version carries no usable spec schema.
    SchemaExtraction {
        /// Kind whose definition was matched.
        kind: String,
        /// Version selected from the definition.
        version: String,
        /// What was missing or malformed.
        reason: String,
    },

    /// Raw input cannot be normalized against the schema.
    SpecProcessing {
        /// Dotted path of the field that failed.
        path: String,
        /// Structural mismatch description.
        reason: String,
    },

    /// The normalized spec violates a schema constraint. Carries the
    /// first violation encountered, verbatim.
    Validation {
        /// JSON-pointer path of the violating field; `/` for the root.
        instance_path: String,
        /// The violated constraint, as reported by the schema engine.
        violation: String,
    },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::DefinitionNotFound { kind, reason } => {
                write!(f, "definition not found for kind '{kind}': {reason}")
            }
            BuildError::SchemaSource { source, reason } => {
                write!(f, "cannot read definitions from '{source}': {reason}")
            }
            BuildError::SchemaExtraction {
                kind,
                version,
                reason,
            } => {
                write!(
                    f,
                    "schema extraction failed for '{kind}' version '{version}': {reason}"
                )
            }
            BuildError::SpecProcessing { path, reason } => {
                write!(f, "spec processing failed at '{path}': {reason}")
            }
            BuildError::Validation {
                instance_path,
                violation,
            } => {
                write!(f, "validation failed at '{instance_path}': {violation}")
            }
        }
    }
}

impl std::error::Error for BuildError {}
