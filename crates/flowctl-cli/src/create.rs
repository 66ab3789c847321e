//! # Create Subcommand
//!
//! `flowctl create source|target <kind> --name <n> [--key value ...]`
//! builds a schema-validated object and merges it into the manifest.
//! Invoked without a kind, it lists what the definitions file offers.
//! `flowctl create trigger --name <n> --target <t> [--filter ...]`
//! builds a trigger subscribing a target to event types, through the
//! same pipeline.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde_json::json;
use serde_yaml::Value;

use flowctl_core::{json_to_yaml, Object};
use flowctl_manifest::Manifest;
use flowctl_schema::{build_object, list_sources, list_targets};

use crate::args::parse_spec_args;

/// Arguments for the `create` subcommand.
#[derive(Args, Debug)]
pub struct CreateArgs {
    #[command(subcommand)]
    pub command: CreateCommand,
}

/// What to create.
#[derive(Subcommand, Debug)]
pub enum CreateCommand {
    /// Create an event source object.
    Source(CreateObjectArgs),
    /// Create an event target object.
    Target(CreateObjectArgs),
    /// Create a trigger subscribing a target to event types.
    Trigger(CreateTriggerArgs),
}

/// Shared arguments for source/target creation.
#[derive(Args, Debug)]
pub struct CreateObjectArgs {
    /// Resource kind, with or without the source/target suffix
    /// (`webhook` resolves to `WebhookSource`). Omit to list available
    /// kinds.
    pub kind: Option<String>,

    /// Object name. Defaults to `<broker>-<kind>`.
    #[arg(long)]
    pub name: Option<String>,

    /// Owning broker context.
    #[arg(long, default_value = "default")]
    pub broker: String,

    /// Free-form spec fields: `--key value`, `--key=value`, dotted keys
    /// nest.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub spec: Vec<String>,
}

/// Arguments for trigger creation.
#[derive(Args, Debug)]
pub struct CreateTriggerArgs {
    /// Trigger name. Defaults to `<target>-trigger`.
    #[arg(long)]
    pub name: Option<String>,

    /// Name of the target object the trigger delivers to.
    #[arg(long)]
    pub target: String,

    /// Owning broker context.
    #[arg(long, default_value = "default")]
    pub broker: String,

    /// Event type to subscribe to; repeatable.
    #[arg(long = "filter")]
    pub filters: Vec<String>,
}

/// Run `create source`, `create target`, or `create trigger`.
pub fn run_create(
    args: &CreateArgs,
    schema_source: Option<&PathBuf>,
    manifest_path: &Path,
) -> Result<()> {
    let source = crate::schema_source(schema_source)?;

    let (kind, name, broker, raw_spec) = match &args.command {
        CreateCommand::Source(a) => {
            let Some(kind) = &a.kind else {
                return list_available(&source, "source");
            };
            object_inputs(a, kind, "source")?
        }
        CreateCommand::Target(a) => {
            let Some(kind) = &a.kind else {
                return list_available(&source, "target");
            };
            object_inputs(a, kind, "target")?
        }
        CreateCommand::Trigger(a) => trigger_inputs(a),
    };

    let object = build_object(&kind, &name, &broker, &source, &raw_spec)
        .with_context(|| format!("cannot build '{name}'"))?;
    merge_and_write(object, manifest_path)
}

/// Kind, name, and raw spec for a source/target creation.
fn object_inputs(
    args: &CreateObjectArgs,
    kind: &str,
    suffix: &str,
) -> Result<(String, String, String, Value)> {
    let kind = qualify_kind(kind, suffix);
    let name = args
        .name
        .clone()
        .unwrap_or_else(|| format!("{}-{}", args.broker, kind.to_ascii_lowercase()));
    let raw_spec = parse_spec_args(&args.spec)?;
    Ok((kind, name, args.broker.clone(), raw_spec))
}

/// Kind, name, and raw spec for a trigger creation. The spec shape is
/// `target.ref.name` plus one exact-type filter per `--filter`.
fn trigger_inputs(args: &CreateTriggerArgs) -> (String, String, String, Value) {
    let name = args
        .name
        .clone()
        .unwrap_or_else(|| format!("{}-trigger", args.target));

    let mut spec = json!({
        "target": { "ref": { "name": args.target } },
    });
    if !args.filters.is_empty() {
        spec["filters"] = args
            .filters
            .iter()
            .map(|event_type| json!({ "exact": { "type": event_type } }))
            .collect();
    }
    (
        "Trigger".to_string(),
        name,
        args.broker.clone(),
        json_to_yaml(&spec),
    )
}

/// Merge the built object into the manifest and persist it.
fn merge_and_write(object: Object, manifest_path: &Path) -> Result<()> {
    let name = object.metadata.name.clone();
    tracing::info!(name = %name, kind = %object.kind, "updating manifest");

    let mut manifest = if manifest_path.exists() {
        Manifest::load(manifest_path)?
    } else {
        Manifest::new(manifest_path)
    };
    let changed = manifest.insert(object);
    manifest.write()?;

    if changed {
        println!("{name} written to {}", manifest_path.display());
    } else {
        println!("{name} is up to date");
    }
    Ok(())
}

/// Append the expected suffix when the caller gave a bare kind name.
fn qualify_kind(kind: &str, suffix: &str) -> String {
    if kind.to_ascii_lowercase().ends_with(suffix) {
        kind.to_string()
    } else {
        format!("{kind}{suffix}")
    }
}

/// Print the kinds the definitions file offers for this suffix, in the
/// bare lowercase shape `create` accepts back.
fn list_available(source: &Path, suffix: &str) -> Result<()> {
    let kinds = match suffix {
        "source" => list_sources(source)?,
        _ => list_targets(source)?,
    };
    println!("Available {suffix}s:\n---\n{}", kinds.join("\n"));
    Ok(())
}
