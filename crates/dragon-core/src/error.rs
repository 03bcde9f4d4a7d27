//! # Error Types
//!
//! Errors raised by the core value types. Validation failures are never
//! represented here: they are data ([`crate::ValidationError`]), not errors.

use thiserror::Error;

/// Error produced when parsing a core enum from its string form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The string does not name any variant of the target enum.
    #[error("unknown {kind}: {value:?} (expected one of: {expected})")]
    UnknownVariant {
        /// Human name of the enum being parsed.
        kind: &'static str,
        /// The rejected input.
        value: String,
        /// Comma-separated list of accepted values.
        expected: &'static str,
    },
}
