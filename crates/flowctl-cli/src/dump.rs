//! # Dump Subcommand
//!
//! Prints the manifest as the same multi-document YAML stream the store
//! persists, optionally filtered to one broker context.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use flowctl_manifest::Manifest;

/// Arguments for `dump`.
#[derive(Args, Debug)]
pub struct DumpArgs {
    /// Only dump objects owned by this broker context.
    #[arg(long)]
    pub broker: Option<String>,
}

/// Run `dump`.
pub fn run_dump(args: &DumpArgs, manifest_path: &Path) -> Result<()> {
    let manifest = Manifest::load(manifest_path)
        .with_context(|| format!("cannot load manifest at '{}'", manifest_path.display()))?;

    for object in &manifest.objects {
        if let Some(broker) = &args.broker {
            if object.context() != Some(broker.as_str()) {
                continue;
            }
        }
        let body = serde_yaml::to_string(object)
            .with_context(|| format!("cannot encode '{}'", object.metadata.name))?;
        print!("---\n{body}");
    }
    Ok(())
}
