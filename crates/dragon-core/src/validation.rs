//! # Validation Errors and Results
//!
//! The stable error shape returned by every validation entry point, whether
//! the failure came from the JSON Schema engine or from a business rule.
//!
//! Paths are kept in two forms:
//!
//! - `instance_path`: the raw JSON Pointer (`/tools/0/name`).
//! - `path`: the display form with the leading slash removed and the
//!   remaining slashes replaced by dots (`tools.0.name`).

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    /// Dotted display path to the offending field (empty for the document root).
    pub path: String,
    /// JSON Pointer to the offending field.
    pub instance_path: String,
    /// Location of the failing rule inside the schema, or `#/<list>` for rules.
    pub schema_path: String,
    /// Name of the failing rule (`required`, `pattern`, `uniqueToolNames`, ...).
    pub keyword: String,
    /// Human-readable message.
    pub message: String,
    /// The offending value, when one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Structured detail of the failing rule.
    #[serde(default)]
    pub params: Value,
}

impl ValidationError {
    /// Create an error located at `instance_path` (a JSON Pointer).
    pub fn new(
        instance_path: impl Into<String>,
        keyword: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let instance_path = instance_path.into();
        Self {
            path: display_path(&instance_path),
            schema_path: String::new(),
            instance_path,
            keyword: keyword.into(),
            message: message.into(),
            data: None,
            params: Value::Object(serde_json::Map::new()),
        }
    }

    pub fn with_schema_path(mut self, schema_path: impl Into<String>) -> Self {
        self.schema_path = schema_path.into();
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_params(mut self, params: Value) -> Self {
        self.params = params;
        self
    }

    /// Path suitable for showing to a user; the root is rendered as `(root)`.
    pub fn field_label(&self) -> &str {
        if self.path.is_empty() {
            "(root)"
        } else {
            &self.path
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field_label(), self.message)
    }
}

/// Convert a JSON Pointer to the dotted display form.
///
/// `"/tools/0/name"` becomes `"tools.0.name"`; the root pointer `""` stays
/// empty. Escaped tokens (`~1`, `~0`) are decoded.
pub fn display_path(pointer: &str) -> String {
    let trimmed = pointer.strip_prefix('/').unwrap_or(pointer);
    if trimmed.is_empty() {
        return String::new();
    }
    trimmed
        .split('/')
        .map(|token| token.replace("~1", "/").replace("~0", "~"))
        .collect::<Vec<_>>()
        .join(".")
}

/// Outcome of a validation run: the complete list of errors.
///
/// `is_valid()` is derived, never stored, so the two cannot disagree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// A passing result.
    pub fn valid() -> Self {
        Self::default()
    }

    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    /// Append another result's errors after this one's.
    pub fn merge(mut self, other: ValidationResult) -> Self {
        self.errors.extend(other.errors);
        self
    }

    /// Errors whose keyword matches `keyword`.
    pub fn with_keyword<'a>(
        &'a self,
        keyword: &'a str,
    ) -> impl Iterator<Item = &'a ValidationError> + 'a {
        self.errors.iter().filter(move |e| e.keyword == keyword)
    }
}

impl From<Vec<ValidationError>> for ValidationResult {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::from_errors(errors)
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationResult", 2)?;
        state.serialize_field("isValid", &self.is_valid())?;
        state.serialize_field("errors", &self.errors)?;
        state.end()
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {e}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_path_root() {
        assert_eq!(display_path(""), "");
        assert_eq!(display_path("/"), "");
    }

    #[test]
    fn test_display_path_nested() {
        assert_eq!(display_path("/tools/0/name"), "tools.0.name");
        assert_eq!(display_path("/description"), "description");
    }

    #[test]
    fn test_display_path_decodes_escapes() {
        assert_eq!(display_path("/note-sections/a~1b/c~0d"), "note-sections.a/b.c~d");
    }

    #[test]
    fn test_new_derives_display_path() {
        let err = ValidationError::new("/instance/web-launch-token/issuer", "k", "m");
        assert_eq!(err.path, "instance.web-launch-token.issuer");
        assert_eq!(err.instance_path, "/instance/web-launch-token/issuer");
        assert_eq!(err.params, json!({}));
        assert!(err.data.is_none());
    }

    #[test]
    fn test_field_label_root() {
        let err = ValidationError::new("", "required", "missing name");
        assert_eq!(err.field_label(), "(root)");
        assert_eq!(err.to_string(), "(root): missing name");
    }

    #[test]
    fn test_result_validity_is_derived() {
        assert!(ValidationResult::valid().is_valid());
        let result = ValidationResult::from_errors(vec![ValidationError::new("/a", "k", "m")]);
        assert!(!result.is_valid());
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_merge_preserves_order() {
        let first = ValidationResult::from_errors(vec![ValidationError::new("/a", "one", "m")]);
        let second = ValidationResult::from_errors(vec![ValidationError::new("/b", "two", "m")]);
        let merged = first.merge(second);
        let keywords: Vec<&str> = merged.errors().iter().map(|e| e.keyword.as_str()).collect();
        assert_eq!(keywords, vec!["one", "two"]);
    }

    #[test]
    fn test_serialize_shape() {
        let result = ValidationResult::from_errors(vec![ValidationError::new(
            "/tools",
            "uniqueToolNames",
            "Duplicate tool names found: a",
        )
        .with_params(json!({"duplicates": ["a"]}))]);
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["isValid"], json!(false));
        assert_eq!(value["errors"][0]["path"], json!("tools"));
        assert_eq!(value["errors"][0]["instancePath"], json!("/tools"));
        assert_eq!(value["errors"][0]["params"]["duplicates"], json!(["a"]));
        assert!(value["errors"][0].get("data").is_none());
    }
}
