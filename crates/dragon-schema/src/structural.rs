//! # Structural Validation
//!
//! Runs a compiled schema against a document and maps every engine error
//! into the toolkit's [`ValidationError`] shape:
//!
//! | Field           | Source                                              |
//! |-----------------|-----------------------------------------------------|
//! | `instance_path` | engine instance pointer                             |
//! | `path`          | dotted form of the pointer; for `required`, the     |
//! |                 | pointer of the missing property                     |
//! | `schema_path`   | engine schema pointer                               |
//! | `keyword`       | last segment of the schema pointer                  |
//! | `message`       | engine message, verbatim                            |
//! | `data`          | the offending value                                 |
//! | `params`        | keyword-specific detail                             |
//!
//! Validation is pure: the same document always yields the same list.

use dragon_core::{display_path, SchemaKind, ValidationError, ValidationResult};
use jsonschema::error::ValidationErrorKind;
use jsonschema::Validator;
use serde_json::{json, Value};

use crate::registry::SchemaRegistry;

impl SchemaRegistry {
    /// Validate `document` against the compiled schema for `kind`.
    pub fn validate_schema(&self, document: &Value, kind: SchemaKind) -> ValidationResult {
        let errors = collect_errors(&self.compiled(kind).validator, document);
        if !errors.is_empty() {
            tracing::debug!(schema = %kind, count = errors.len(), "structural violations");
        }
        ValidationResult::from_errors(errors)
    }
}

/// Every violation the validator reports, in engine order.
///
/// An engine that says "invalid" without yielding errors produces an empty
/// list, which callers read as valid.
pub(crate) fn collect_errors(validator: &Validator, document: &Value) -> Vec<ValidationError> {
    validator.iter_errors(document).map(|e| convert(&e)).collect()
}

fn convert(err: &jsonschema::ValidationError<'_>) -> ValidationError {
    let instance_path = err.instance_path.to_string();
    let schema_path = err.schema_path.to_string();
    let keyword = keyword_of(&schema_path);

    let mut converted = ValidationError::new(instance_path.clone(), keyword, err.to_string())
        .with_schema_path(schema_path)
        .with_data(err.instance.as_ref().clone())
        .with_params(params_of(&err.kind));

    if let ValidationErrorKind::Required { property, .. } = &err.kind {
        if let Some(missing) = property.as_str() {
            let pointer = format!("{}/{}", instance_path, escape_token(missing));
            converted.path = display_path(&pointer);
        }
    }
    converted
}

/// The failing keyword is the last segment of the schema pointer
/// (`/properties/tools/items/required` -> `required`).
fn keyword_of(schema_path: &str) -> String {
    schema_path
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
        .unwrap_or_else(|| "unknown".to_string())
}

fn escape_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

fn params_of(kind: &ValidationErrorKind) -> Value {
    match kind {
        ValidationErrorKind::Required { property, .. } => json!({ "missingProperty": property }),
        ValidationErrorKind::Enum { options, .. } => json!({ "allowedValues": options }),
        ValidationErrorKind::Pattern { pattern, .. } => json!({ "pattern": pattern }),
        ValidationErrorKind::Format { format, .. } => json!({ "format": format }),
        ValidationErrorKind::AdditionalProperties { unexpected, .. } => {
            json!({ "additionalProperties": unexpected })
        }
        ValidationErrorKind::MinLength { limit, .. }
        | ValidationErrorKind::MaxLength { limit, .. }
        | ValidationErrorKind::MinItems { limit, .. }
        | ValidationErrorKind::MaxItems { limit, .. } => json!({ "limit": limit }),
        ValidationErrorKind::Minimum { limit, .. } | ValidationErrorKind::Maximum { limit, .. } => {
            json!({ "limit": limit })
        }
        _ => json!({}),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::compile_schema;

    fn validate(schema: Value, document: Value) -> Vec<ValidationError> {
        let validator = compile_schema(&schema).unwrap();
        collect_errors(&validator, &document)
    }

    #[test]
    fn test_keyword_of() {
        assert_eq!(keyword_of("/properties/tools/items/required"), "required");
        assert_eq!(keyword_of("/properties/version/pattern"), "pattern");
        assert_eq!(keyword_of(""), "unknown");
    }

    #[test]
    fn test_valid_document_has_no_errors() {
        let errors = validate(
            json!({"type": "object", "required": ["name"]}),
            json!({"name": "x"}),
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn test_required_points_at_missing_property() {
        let errors = validate(
            json!({"type": "object", "required": ["name", "description"]}),
            json!({"name": "x"}),
        );
        assert_eq!(errors.len(), 1);
        let err = &errors[0];
        assert_eq!(err.keyword, "required");
        assert_eq!(err.instance_path, "");
        assert_eq!(err.path, "description");
        assert_eq!(err.params, json!({"missingProperty": "description"}));
        assert!(err.message.contains("description"));
    }

    #[test]
    fn test_nested_path_uses_dots() {
        let errors = validate(
            json!({
                "type": "object",
                "properties": {
                    "tools": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": { "name": { "type": "string", "pattern": "^[a-z]+$" } }
                        }
                    }
                }
            }),
            json!({"tools": [{"name": "ok"}, {"name": "Not OK"}]}),
        );
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, "tools.1.name");
        assert_eq!(errors[0].instance_path, "/tools/1/name");
        assert_eq!(errors[0].keyword, "pattern");
        assert_eq!(errors[0].data, Some(json!("Not OK")));
        assert_eq!(errors[0].params, json!({"pattern": "^[a-z]+$"}));
    }

    #[test]
    fn test_all_errors_are_collected() {
        let errors = validate(
            json!({
                "type": "object",
                "required": ["a", "b"],
                "properties": { "c": { "type": "integer" } }
            }),
            json!({"c": "not-an-int"}),
        );
        let mut keywords: Vec<&str> = errors.iter().map(|e| e.keyword.as_str()).collect();
        keywords.sort();
        assert_eq!(keywords, vec!["required", "required", "type"]);
    }

    #[test]
    fn test_enum_params() {
        let errors = validate(
            json!({"type": "string", "enum": ["yes", "no"]}),
            json!("maybe"),
        );
        assert_eq!(errors[0].keyword, "enum");
        assert_eq!(errors[0].params, json!({"allowedValues": ["yes", "no"]}));
        assert_eq!(errors[0].path, "");
    }

    #[test]
    fn test_format_is_asserted() {
        let errors = validate(json!({"type": "string", "format": "email"}), json!("nope"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].keyword, "format");
    }

    #[test]
    fn test_deterministic() {
        let schema = json!({"type": "object", "required": ["a", "b", "c"]});
        let first = validate(schema.clone(), json!({}));
        let second = validate(schema, json!({}));
        assert_eq!(first, second);
    }
}
