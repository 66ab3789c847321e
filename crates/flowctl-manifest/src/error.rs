//! # Manifest Store Errors
//!
//! Every failure surfaces to the immediate caller with the path or object
//! that failed; nothing is retried or downgraded to a warning.

use thiserror::Error;

/// Error during manifest load or save.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Filesystem failure while reading or writing the backing path.
    #[error("manifest io error at '{path}': {source}")]
    Io {
        /// Path that failed.
        path: String,
        /// Underlying filesystem error.
        #[source]
        source: std::io::Error,
    },

    /// A non-empty document could not be decoded as a resource object.
    #[error("malformed document in '{path}': {source}")]
    Decode {
        /// File the document came from.
        path: String,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },

    /// An in-memory object could not be encoded as YAML.
    #[error("cannot encode object '{name}': {source}")]
    Encode {
        /// `metadata.name` of the object that failed to encode.
        name: String,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },
}
