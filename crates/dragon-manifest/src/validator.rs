//! # Validation Entry Points
//!
//! [`ManifestValidator`] binds a [`SchemaRegistry`]; the free functions use
//! the process-wide registry from [`SchemaRegistry::global`].
//!
//! A manifest result lists structural errors first, then business-rule
//! errors in profile rule order. Publisher configs are checked structurally
//! only.

use dragon_core::{SchemaKind, ValidationResult};
use dragon_schema::{SchemaError, SchemaRegistry};
use serde_json::Value;

use crate::profile::ManifestProfile;
use crate::rules::check_business_rules;

#[derive(Debug, Clone, Copy)]
pub struct ManifestValidator<'r> {
    registry: &'r SchemaRegistry,
}

impl<'r> ManifestValidator<'r> {
    pub fn new(registry: &'r SchemaRegistry) -> Self {
        Self { registry }
    }

    /// Validator over the process-wide registry.
    pub fn global() -> Result<ManifestValidator<'static>, SchemaError> {
        SchemaRegistry::global().map(ManifestValidator::new)
    }

    pub fn registry(&self) -> &'r SchemaRegistry {
        self.registry
    }

    /// Structural validation against the profile's schema, followed by the
    /// profile's business rules.
    pub fn validate_manifest(&self, document: &Value, profile: ManifestProfile) -> ValidationResult {
        let structural = self.registry.validate_schema(document, profile.schema_kind());
        let rules = check_business_rules(document, profile.rules());
        tracing::debug!(
            %profile,
            structural = structural.len(),
            rules = rules.len(),
            "validated manifest"
        );
        structural.merge(ValidationResult::from_errors(rules))
    }

    pub fn validate_publisher_config(&self, document: &Value) -> ValidationResult {
        self.registry.validate_schema(document, SchemaKind::Publisher)
    }

    pub fn validate_field_value(
        &self,
        value: &Value,
        path: &str,
        kind: SchemaKind,
    ) -> Result<(), String> {
        self.registry.validate_field_value(value, path, kind)
    }
}

/// Validate a manifest with the global registry.
///
/// # Errors
///
/// Returns [`SchemaError`] only when the schemas cannot be loaded; a
/// failing document is reported through the returned result.
pub fn validate_manifest(
    document: &Value,
    profile: ManifestProfile,
) -> Result<ValidationResult, SchemaError> {
    Ok(ManifestValidator::global()?.validate_manifest(document, profile))
}

pub fn validate_publisher_config(document: &Value) -> Result<ValidationResult, SchemaError> {
    Ok(ManifestValidator::global()?.validate_publisher_config(document))
}

pub fn validate_field_value(
    value: &Value,
    path: &str,
    kind: SchemaKind,
) -> Result<Result<(), String>, SchemaError> {
    Ok(ManifestValidator::global()?.validate_field_value(value, path, kind))
}
