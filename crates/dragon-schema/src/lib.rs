//! # dragon-schema: Schema Registry & Structural Validation
//!
//! Runtime JSON Schema validation of manifest and publisher documents.
//!
//! ## Responsibilities
//!
//! - **Schema registry:** locate the `schemas/` directory (source tree,
//!   installed layout, or working directory), load every schema document
//!   once and compile it into a reusable validator.
//!
//! - **Structural validation:** run a compiled validator against a
//!   document, collecting *all* violations, and normalize them into
//!   [`dragon_core::ValidationError`].
//!
//! - **Single-field validation:** walk a dotted field path down the schema
//!   tree, compile just that fragment and check one value against it.
//!
//! - **Document loading:** read YAML or JSON files into `serde_json::Value`.
//!
//! ## Design
//!
//! [`SchemaRegistry`] owns the compiled validators. A process-wide instance
//! is available through [`SchemaRegistry::global`]; it is built on first use
//! and never mutated afterwards. Load failures (missing or malformed schema
//! files) are defects in the tool's packaging and surface as
//! [`SchemaError`], not as validation results.

pub mod document;
pub mod error;
pub mod field;
pub mod registry;
pub mod structural;

pub use document::{load_document, parse_document, DocumentFormat};
pub use error::SchemaError;
pub use field::{extract_field_schema, SchemaNode};
pub use registry::{
    resolve_schema_directory, schema_dir_candidates, SchemaRegistry, SCHEMA_DIR_ENV,
};
