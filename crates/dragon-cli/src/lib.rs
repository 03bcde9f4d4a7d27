//! # dragon-cli: Manifest Toolkit Command Line
//!
//! Provides the `dragon` command-line interface.
//!
//! ## Subcommands
//!
//! - `dragon validate`: Manifest and publisher config validation.
//! - `dragon field`: Check one value against its field's sub-schema.
//! - `dragon init`: Write a starter manifest and `publisher.json`.
//! - `dragon schemas`: Show the resolved schema directory.
//!
//! Every handler returns the process exit code: 0 on success, 1 when a
//! document is invalid, 2 when a file cannot be read or parsed.
//!
//! ```bash
//! dragon validate extension.yaml
//! dragon validate integration.yaml --profile connector --format json
//! dragon field version 1.0 --schema publisher
//! ```

pub mod field;
pub mod init;
pub mod schemas;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use dragon_schema::SchemaRegistry;

/// Exit code for invalid documents.
pub const EXIT_INVALID: u8 = 1;
/// Exit code for unreadable or unparsable input.
pub const EXIT_FAILURE: u8 = 2;

/// Load schemas from `schema_dir`, or from the resolved default location.
pub fn load_registry(schema_dir: Option<&Path>) -> Result<SchemaRegistry> {
    match schema_dir {
        Some(dir) => SchemaRegistry::load(dir)
            .with_context(|| format!("failed to load schemas from {}", dir.display())),
        None => SchemaRegistry::load_default().context("failed to load bundled schemas"),
    }
}
