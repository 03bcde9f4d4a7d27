//! # Schemas Subcommand
//!
//! Shows which schema directory was resolved and what it holds. Useful when
//! the tool runs from an unusual install layout.

use std::fmt;

use anyhow::Result;
use dragon_schema::{schema_dir_candidates, SchemaRegistry, SCHEMA_DIR_ENV};

/// Display adapter listing the resolved directory and each loaded schema.
pub struct RegistryListing<'a>(pub &'a SchemaRegistry);

impl fmt::Display for RegistryListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.0;
        writeln!(f, "Schema directory: {}", registry.schema_dir().display())?;
        for kind in registry.kinds() {
            writeln!(
                f,
                "  • {kind} ({}): {}",
                kind.file_name(),
                registry.title(kind).unwrap_or("untitled")
            )?;
        }
        Ok(())
    }
}

pub fn describe_registry(registry: &SchemaRegistry) -> String {
    RegistryListing(registry).to_string()
}

pub fn run_schemas(registry: &SchemaRegistry) -> Result<u8> {
    print!("{}", describe_registry(registry));
    if tracing::enabled!(tracing::Level::DEBUG) {
        for candidate in schema_dir_candidates() {
            tracing::debug!(candidate = %candidate.display(), "schema directory candidate");
        }
        tracing::debug!("set {SCHEMA_DIR_ENV} to override the search");
    }
    Ok(0)
}
