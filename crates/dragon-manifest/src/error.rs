//! Error types for manifest authoring.
//!
//! Validation failures are not errors: they are returned as a
//! [`ValidationResult`]. These variants cover the cases where a document
//! cannot be produced at all.

use dragon_core::ValidationResult;
use dragon_schema::SchemaError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    /// The schema registry could not be loaded.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A typed document could not be converted to its on-disk form.
    #[error("failed to render {document}: {reason}")]
    Render {
        document: &'static str,
        reason: String,
    },

    /// A generated document did not pass validation.
    #[error("generated {document} is invalid:\n{result}")]
    Invalid {
        document: &'static str,
        result: ValidationResult,
    },
}
