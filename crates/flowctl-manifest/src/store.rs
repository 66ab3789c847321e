//! # Manifest Load / Merge / Save
//!
//! [`Manifest`] mirrors the on-disk layout: a backing path plus the
//! ordered object list decoded from it. All operations are synchronous
//! and run to completion on the caller's thread.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_yaml::Value;

use flowctl_core::Object;

use crate::error::ManifestError;

/// Ordered collection of resource objects backed by a file or directory.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    /// Backing path: a single YAML file or a flat directory of them.
    pub path: PathBuf,
    /// Objects in first-appearance order.
    pub objects: Vec<Object>,
}

impl Manifest {
    /// Create an empty manifest bound to `path`. Nothing is read.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            objects: Vec::new(),
        }
    }

    /// Read every object found at the backing path, replacing the
    /// in-memory list.
    ///
    /// A file parses as a `---`-separated YAML document stream; documents
    /// that decode to nothing (stray separators, blank content, comments)
    /// are skipped. A directory contributes its immediate files in
    /// file-name order; subdirectories are skipped, not recursed into —
    /// nested directories are intentionally invisible to the loader, for
    /// compatibility with manifests written by earlier tooling.
    ///
    /// # Errors
    ///
    /// Propagates filesystem errors and any decode error for a non-empty
    /// malformed document. No partial result is kept on error.
    pub fn read(&mut self) -> Result<(), ManifestError> {
        self.objects = parse_path(&self.path)?;
        Ok(())
    }

    /// Convenience constructor: bind to `path` and read it.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ManifestError> {
        let mut manifest = Self::new(path);
        manifest.read()?;
        Ok(manifest)
    }

    /// Merge-insert `object`, keyed by the identity triple.
    ///
    /// Returns `true` when the manifest changed: the object was appended,
    /// or an existing entry with the same identity was structurally
    /// different and got replaced in place (its position preserved).
    /// Returns `false` when a structurally equal entry already exists.
    pub fn insert(&mut self, object: Object) -> bool {
        for existing in self.objects.iter_mut() {
            if existing.matches(&object) {
                if existing.structurally_equals(&object) {
                    return false;
                }
                *existing = object;
                return true;
            }
        }
        self.objects.push(object);
        true
    }

    /// (Re)create the backing file and write each object as a YAML
    /// document preceded by a `---` line, in list order.
    ///
    /// The file handle is scoped to this call and closed on every exit
    /// path. No atomic replace: a failed write leaves the file in an
    /// undefined partial state.
    pub fn write(&self) -> Result<(), ManifestError> {
        let mut file = File::create(&self.path).map_err(|source| ManifestError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        for object in &self.objects {
            let body =
                serde_yaml::to_string(object).map_err(|source| ManifestError::Encode {
                    name: object.metadata.name.clone(),
                    source,
                })?;
            file.write_all(b"---\n")
                .and_then(|()| file.write_all(body.as_bytes()))
                .map_err(|source| ManifestError::Io {
                    path: self.path.display().to_string(),
                    source,
                })?;
        }
        Ok(())
    }
}

/// Parse a file or directory into its object list.
fn parse_path(path: &Path) -> Result<Vec<Object>, ManifestError> {
    let meta = fs::metadata(path).map_err(|source| ManifestError::Io {
        path: path.display().to_string(),
        source,
    })?;

    if !meta.is_dir() {
        return parse_file(path);
    }

    let mut entries = fs::read_dir(path)
        .and_then(|dir| dir.collect::<Result<Vec<_>, _>>())
        .map_err(|source| ManifestError::Io {
            path: path.display().to_string(),
            source,
        })?;
    // Sort for a deterministic load order; read_dir order is OS-defined.
    entries.sort_by_key(|entry| entry.file_name());

    let mut result = Vec::new();
    for entry in entries {
        let entry_path = entry.path();
        if entry_path.is_dir() {
            // Skip directories.
            continue;
        }
        result.extend(parse_file(&entry_path)?);
    }
    Ok(result)
}

/// Decode every document in one YAML file, skipping empty documents.
fn parse_file(path: &Path) -> Result<Vec<Object>, ManifestError> {
    let content = fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let mut result = Vec::new();
    for document in serde_yaml::Deserializer::from_str(&content) {
        let value = Value::deserialize(document).map_err(|source| ManifestError::Decode {
            path: path.display().to_string(),
            source,
        })?;
        if value.is_null() {
            // Stray separator or blank document.
            continue;
        }
        let object: Object =
            serde_yaml::from_value(value).map_err(|source| ManifestError::Decode {
                path: path.display().to_string(),
                source,
            })?;
        result.push(object);
    }
    Ok(result)
}
