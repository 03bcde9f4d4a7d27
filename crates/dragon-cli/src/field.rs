//! # Field Subcommand
//!
//! Checks one value against the sub-schema of a dotted field path, the same
//! check an authoring form runs while the user types.

use anyhow::Result;
use clap::Args;
use dragon_core::SchemaKind;
use dragon_manifest::ManifestValidator;
use dragon_schema::SchemaRegistry;
use serde_json::Value;

use crate::EXIT_INVALID;

/// Arguments for the `dragon field` subcommand.
#[derive(Args, Debug)]
pub struct FieldArgs {
    /// Dotted field path, e.g. `version` or `tools.items.name`.
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Value to check. Parsed as JSON when possible, otherwise taken as a
    /// string.
    #[arg(value_name = "VALUE")]
    pub value: String,

    /// Schema to resolve the path in: extension, connector or publisher.
    #[arg(long, default_value = "extension")]
    pub schema: SchemaKind,
}

/// Interpret a command-line value: `42`, `true` and `["a"]` are JSON,
/// `1.0.0` and `hello` are strings.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

pub fn run_field(args: &FieldArgs, registry: &SchemaRegistry) -> Result<u8> {
    let value = parse_value(&args.value);
    let validator = ManifestValidator::new(registry);
    match validator.validate_field_value(&value, &args.path, args.schema) {
        Ok(()) => {
            println!("ok");
            Ok(0)
        }
        Err(message) => {
            println!("{}: {message}", args.path);
            Ok(EXIT_INVALID)
        }
    }
}
