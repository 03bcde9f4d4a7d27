//! Errors raised while loading schemas or input documents.
//!
//! Validation failures are not errors: they are returned as
//! [`dragon_core::ValidationResult`] data.

use thiserror::Error;

/// Error loading a schema, compiling it, or reading an input document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A schema file could not be read or is not valid JSON.
    #[error("schema load error for '{schema_name}': {reason}")]
    SchemaLoad {
        /// Schema filename.
        schema_name: String,
        /// Reason the schema could not be loaded.
        reason: String,
    },

    /// The schema parsed as JSON but could not be compiled.
    #[error("validator build error for schema '{schema_name}': {reason}")]
    ValidatorBuild {
        /// Schema filename.
        schema_name: String,
        /// Reason the validator could not be built.
        reason: String,
    },

    /// An input document could not be read or parsed.
    #[error("document load error for '{path}': {reason}")]
    DocumentLoad {
        /// Path to the document.
        path: String,
        /// Reason the document could not be loaded.
        reason: String,
    },
}
