//! # Kind Listing Subcommands
//!
//! `flowctl sources` and `flowctl targets` enumerate the kinds declared
//! in the definitions file.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use flowctl_schema::{list_sources, list_targets};

/// Arguments for `sources` / `targets`.
#[derive(Args, Debug)]
pub struct ListArgs {}

/// Print available source kinds, one per line.
pub fn run_sources(_args: &ListArgs, schema_source: Option<&PathBuf>) -> Result<()> {
    let source = crate::schema_source(schema_source)?;
    for kind in list_sources(&source)? {
        println!("{kind}");
    }
    Ok(())
}

/// Print available target kinds, one per line.
pub fn run_targets(_args: &ListArgs, schema_source: Option<&PathBuf>) -> Result<()> {
    let source = crate::schema_source(schema_source)?;
    for kind in list_targets(&source)? {
        println!("{kind}");
    }
    Ok(())
}
