//! # flowctl entry point
//!
//! Parses command-line arguments and dispatches to handler modules.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use flowctl_cli::create::{run_create, CreateArgs};
use flowctl_cli::dump::{run_dump, DumpArgs};
use flowctl_cli::list::{run_sources, run_targets, ListArgs};

/// flowctl — local event-flow manifest toolchain.
///
/// Builds schema-validated resource objects from loosely-typed command
/// arguments and keeps a local YAML manifest consistent across repeated
/// invocations.
#[derive(Parser, Debug)]
#[command(name = "flowctl", version, about)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the resource definitions file.
    #[arg(long, global = true)]
    schema_source: Option<PathBuf>,

    /// Path to the manifest file or directory.
    #[arg(long, global = true)]
    manifest: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a resource object and merge it into the manifest.
    Create(CreateArgs),

    /// List available source kinds.
    Sources(ListArgs),

    /// List available target kinds.
    Targets(ListArgs),

    /// Print the manifest as a multi-document YAML stream.
    Dump(DumpArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let manifest = flowctl_cli::manifest_path(cli.manifest.as_ref());

    let result = match &cli.command {
        Commands::Create(args) => run_create(args, cli.schema_source.as_ref(), &manifest),
        Commands::Sources(args) => run_sources(args, cli.schema_source.as_ref()),
        Commands::Targets(args) => run_targets(args, cli.schema_source.as_ref()),
        Commands::Dump(args) => run_dump(args, &manifest),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_create_source_with_spec_args() {
        let cli = Cli::try_parse_from([
            "flowctl", "create", "source", "webhook", "--name", "hook", "--endpoint",
            "https://x",
        ])
        .unwrap();
        let Commands::Create(create) = cli.command else {
            panic!("expected create");
        };
        let flowctl_cli::create::CreateCommand::Source(args) = create.command else {
            panic!("expected source");
        };
        assert_eq!(args.kind.as_deref(), Some("webhook"));
        assert_eq!(args.name.as_deref(), Some("hook"));
        assert_eq!(args.spec, ["--endpoint", "https://x"]);
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "flowctl",
            "dump",
            "--manifest",
            "custom.yaml",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.manifest.as_deref(), Some(std::path::Path::new("custom.yaml")));
        assert!(matches!(cli.command, Commands::Dump(_)));
    }

    #[test]
    fn parses_create_trigger_with_filters() {
        let cli = Cli::try_parse_from([
            "flowctl", "create", "trigger", "--name", "t", "--target", "sink", "--filter",
            "com.example.created", "--filter", "com.example.deleted",
        ])
        .unwrap();
        let Commands::Create(create) = cli.command else {
            panic!("expected create");
        };
        let flowctl_cli::create::CreateCommand::Trigger(args) = create.command else {
            panic!("expected trigger");
        };
        assert_eq!(args.name.as_deref(), Some("t"));
        assert_eq!(args.target, "sink");
        assert_eq!(args.filters, ["com.example.created", "com.example.deleted"]);
    }

    #[test]
    fn parses_target_without_kind() {
        let cli = Cli::try_parse_from(["flowctl", "create", "target"]).unwrap();
        let Commands::Create(create) = cli.command else {
            panic!("expected create");
        };
        let flowctl_cli::create::CreateCommand::Target(args) = create.command else {
            panic!("expected target");
        };
        assert!(args.kind.is_none());
    }
}
