//! # dragon-manifest: Manifest Validation and Authoring
//!
//! Combines structural schema validation from `dragon-schema` with the
//! cross-field rules JSON Schema cannot express, and provides the building
//! blocks for authoring new manifests.
//!
//! - **Profiles** (`profile.rs`): a [`ManifestProfile`] pairs a schema
//!   document with a business-rule set. Extensions and connectors share
//!   one validation pipeline and differ only in their profile.
//!
//! - **Rules** (`rules/`): duplicate-name detection, trigger-to-script
//!   reference integrity, conditional web-launch issuer requiredness and
//!   context-retrieval catalog matching.
//!
//! - **Catalog** (`catalog.rs`) and **note sections** (`note_sections.rs`):
//!   the fixed connector vocabularies and their defaults.
//!
//! - **Publisher** (`publisher.rs`) and **templates** (`template.rs`):
//!   typed documents used when scaffolding a new project.
//!
//! - **Validator** (`validator.rs`): the public entry points.
//!
//! ## Crate Policy
//!
//! - Rules are collected, never thrown. Every rule sees the whole document
//!   and returns its own error list.
//! - Structural errors precede rule errors in every combined result.

pub mod catalog;
pub mod error;
pub mod note_sections;
pub mod profile;
pub mod publisher;
pub mod rules;
pub mod template;
pub mod validator;

pub use catalog::{context_item, default_context_items, ContextItemDefinition, ContextRetrievalItem};
pub use error::ManifestError;
pub use note_sections::{default_note_sections, normalize_note_sections, NoteSectionValue, NoteSections};
pub use profile::ManifestProfile;
pub use publisher::PublisherConfig;
pub use rules::{check_business_rules, BusinessRule};
pub use template::ManifestTemplate;
pub use validator::{validate_field_value, validate_manifest, validate_publisher_config, ManifestValidator};
