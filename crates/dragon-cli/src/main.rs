//! # dragon CLI entry point
//!
//! Parses command-line arguments, loads the schema registry and dispatches
//! to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dragon_cli::field::{run_field, FieldArgs};
use dragon_cli::init::{run_init, InitArgs};
use dragon_cli::schemas::run_schemas;
use dragon_cli::validate::{run_validate, ValidateArgs};
use dragon_cli::{load_registry, EXIT_FAILURE};

/// Dragon Copilot manifest toolkit.
///
/// Validates extension and connector manifests together with their
/// publisher configuration, and scaffolds new projects.
#[derive(Parser, Debug)]
#[command(name = "dragon", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory holding the JSON schema files.
    #[arg(long, global = true, value_name = "DIR")]
    schema_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a manifest and its publisher.json.
    Validate(ValidateArgs),

    /// Validate a single field value.
    Field(FieldArgs),

    /// Write a starter manifest and publisher.json.
    Init(InitArgs),

    /// Show the resolved schema directory and loaded schemas.
    Schemas,
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
        .with_writer(std::io::stderr)
        .init();

    let result = load_registry(cli.schema_dir.as_deref()).and_then(|registry| {
        tracing::debug!(dir = %registry.schema_dir().display(), "schemas loaded");
        match cli.command {
            Commands::Validate(args) => run_validate(&args, &registry),
            Commands::Field(args) => run_field(&args, &registry),
            Commands::Init(args) => run_init(&args, &registry),
            Commands::Schemas => run_schemas(&registry),
        }
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_parse_validate_defaults() {
        let cli = Cli::try_parse_from(["dragon", "validate", "extension.yaml"]).unwrap();
        match cli.command {
            Commands::Validate(args) => {
                assert_eq!(args.manifest, PathBuf::from("extension.yaml"));
                assert_eq!(args.profile, dragon_cli::validate::ProfileArg::Auto);
                assert_eq!(args.format, dragon_cli::validate::OutputFormat::Text);
                assert!(args.publisher.is_none());
            }
            other => panic!("expected validate, got {other:?}"),
        }
    }

    #[test]
    fn cli_parse_validate_options() {
        let cli = Cli::try_parse_from([
            "dragon",
            "validate",
            "integration.yaml",
            "--profile",
            "connector",
            "--publisher",
            "pub.json",
            "--format",
            "json",
        ])
        .unwrap();
        match cli.command {
            Commands::Validate(args) => {
                assert_eq!(args.profile, dragon_cli::validate::ProfileArg::Connector);
                assert_eq!(args.publisher, Some(PathBuf::from("pub.json")));
                assert_eq!(args.format, dragon_cli::validate::OutputFormat::Json);
            }
            other => panic!("expected validate, got {other:?}"),
        }
    }

    #[test]
    fn cli_parse_field() {
        let cli = Cli::try_parse_from([
            "dragon", "field", "version", "1.0.0", "--schema", "publisher",
        ])
        .unwrap();
        match cli.command {
            Commands::Field(args) => {
                assert_eq!(args.path, "version");
                assert_eq!(args.schema, dragon_core::SchemaKind::Publisher);
            }
            other => panic!("expected field, got {other:?}"),
        }
    }

    #[test]
    fn cli_parse_field_rejects_unknown_schema() {
        assert!(Cli::try_parse_from(["dragon", "field", "a", "b", "--schema", "zone"]).is_err());
    }

    #[test]
    fn cli_parse_init() {
        let cli = Cli::try_parse_from([
            "dragon",
            "init",
            "--profile",
            "connector",
            "--name",
            "Contoso EHR",
            "--description",
            "Connector",
            "--publisher-id",
            "contoso.healthcare",
            "--publisher-name",
            "Contoso",
            "--website-url",
            "https://contoso.com",
            "--privacy-policy-url",
            "https://contoso.com/privacy",
            "--support-url",
            "https://contoso.com/support",
            "--contact-email",
            "support@contoso.com",
            "--output",
            "out",
        ])
        .unwrap();
        match cli.command {
            Commands::Init(args) => {
                assert_eq!(args.profile, dragon_manifest::ManifestProfile::Connector);
                assert_eq!(args.version, "1.0.0");
                assert_eq!(args.output, PathBuf::from("out"));
                assert!(!args.force);
            }
            other => panic!("expected init, got {other:?}"),
        }
    }

    #[test]
    fn cli_parse_global_options() {
        let cli =
            Cli::try_parse_from(["dragon", "-vv", "schemas", "--schema-dir", "/opt/schemas"])
                .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.schema_dir, Some(PathBuf::from("/opt/schemas")));
        assert!(matches!(cli.command, Commands::Schemas));
    }

    #[test]
    fn cli_parse_no_subcommand_errors() {
        assert!(Cli::try_parse_from(["dragon"]).is_err());
    }
}
