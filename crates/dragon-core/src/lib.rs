//! # dragon-core: Foundational Types for the Manifest Toolkit
//!
//! This crate defines the value types shared by every other crate in the
//! workspace. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **One error shape.** Structural (schema engine) errors and hand-written
//!    business-rule errors both surface as [`ValidationError`]. Callers never
//!    see the schema engine's native error vocabulary.
//!
//! 2. **Collected, not thrown.** A [`ValidationResult`] always carries the
//!    complete error list; `is_valid()` is derived from it.
//!
//! 3. **Closed enums for schema kinds and yes/no tokens.** `SchemaKind` and
//!    `YesNo` replace bare strings at API boundaries.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `dragon-*` crates.
//! - No `unsafe` code.
//! - No `.unwrap()` outside tests.

pub mod display;
pub mod error;
pub mod input;
pub mod kind;
pub mod validation;

pub use display::field_display_name;
pub use error::CoreError;
pub use kind::{SchemaKind, YesNo};
pub use validation::{display_path, ValidationError, ValidationResult};
