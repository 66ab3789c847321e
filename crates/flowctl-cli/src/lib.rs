//! # flowctl-cli — Command-Line Interface
//!
//! Thin glue over the domain crates: command handlers build objects with
//! `flowctl-schema` and persist them with `flowctl-manifest`; no business
//! logic lives here.
//!
//! ## Subcommands
//!
//! - `create source|target` — build a schema-validated object from
//!   free-form `--key value` arguments and merge it into the manifest
//! - `sources` / `targets` — list the kinds available in the definitions
//!   file
//! - `dump` — print the manifest as a multi-document YAML stream
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from handlers.
//! - Handlers delegate to domain crates and report through `anyhow`.

use std::path::PathBuf;

use anyhow::{Context, Result};

pub mod args;
pub mod create;
pub mod dump;
pub mod list;

/// Environment variable naming the definitions file when the
/// `--schema-source` flag is absent.
pub const SCHEMA_SOURCE_ENV: &str = "FLOWCTL_SCHEMA_SOURCE";

/// Default manifest path, relative to the working directory.
pub const DEFAULT_MANIFEST: &str = "manifest.yaml";

/// Resolve the definitions file: flag first, then the environment.
pub fn schema_source(flag: Option<&PathBuf>) -> Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path.clone());
    }
    std::env::var(SCHEMA_SOURCE_ENV)
        .map(PathBuf::from)
        .with_context(|| {
            format!("no definitions file: pass --schema-source or set {SCHEMA_SOURCE_ENV}")
        })
}

/// Resolve the manifest path: flag first, then the default.
pub fn manifest_path(flag: Option<&PathBuf>) -> PathBuf {
    flag.cloned().unwrap_or_else(|| PathBuf::from(DEFAULT_MANIFEST))
}
