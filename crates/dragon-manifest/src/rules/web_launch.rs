//! Web launch token issuers.
//!
//! `instance.web-launch-token.use-client-authentication` selects where
//! token issuers come from. With `yes` the client authentication issuer is
//! reused and the `issuer` list is ignored. With `no` the list must name at
//! least one field, and each entry must be a complete field definition.

use dragon_core::{ValidationError, YesNo};
use serde_json::{json, Value};
use url::Url;

use super::non_empty_str;

const TOKEN_POINTER: &str = "/instance/web-launch-token";
const ISSUER_KEYWORD: &str = "issuerFieldDefinition";

pub(super) fn check_web_launch_issuers(document: &Value) -> Vec<ValidationError> {
    let Some(token) = document.pointer(TOKEN_POINTER) else {
        return Vec::new();
    };
    let use_client_auth = token.get("use-client-authentication").and_then(YesNo::from_value);
    if use_client_auth != Some(YesNo::No) {
        return Vec::new();
    }

    let issuer_pointer = format!("{TOKEN_POINTER}/issuer");
    let entries = match token.get("issuer").and_then(Value::as_array) {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            return vec![ValidationError::new(
                issuer_pointer,
                "issuerRequired",
                "At least one web launch issuer field is required when use-client-authentication is 'no'",
            )
            .with_schema_path("#/definitions/webLaunchToken/properties/issuer")
            .with_params(json!({ "use-client-authentication": "no" }))];
        }
    };

    entries
        .iter()
        .enumerate()
        .flat_map(|(index, entry)| check_issuer_entry(&format!("{issuer_pointer}/{index}"), index, entry))
        .collect()
}

fn check_issuer_entry(pointer: &str, index: usize, entry: &Value) -> Vec<ValidationError> {
    let issue = |field: Option<&str>, message: String| {
        let at = match field {
            Some(field) => format!("{pointer}/{field}"),
            None => pointer.to_string(),
        };
        ValidationError::new(at, ISSUER_KEYWORD, message)
            .with_schema_path("#/definitions/fieldConfig")
            .with_data(entry.clone())
            .with_params(json!({ "index": index }))
    };

    if !entry.is_object() {
        return vec![issue(None, format!("Web launch issuer {} must be an object", index + 1))];
    }

    let label = non_empty_str(entry, "name")
        .map(str::to_string)
        .unwrap_or_else(|| format!("#{}", index + 1));
    let mut errors = Vec::new();

    let field_type = non_empty_str(entry, "type");
    if field_type.is_none() {
        errors.push(issue(Some("type"), format!("Web launch issuer '{label}' must define a type")));
    }
    if non_empty_str(entry, "description").is_none() {
        errors.push(issue(
            Some("description"),
            format!("Web launch issuer '{label}' must define a description"),
        ));
    }
    if entry.get("required").and_then(YesNo::from_value).is_none() {
        errors.push(issue(
            Some("required"),
            format!("Web launch issuer '{label}' must set required to 'yes' or 'no'"),
        ));
    }
    if field_type.map(str::trim) == Some("url") {
        if let Some(default) = entry.get("default-value") {
            let valid = default.as_str().is_some_and(|s| Url::parse(s).is_ok());
            if !valid {
                errors.push(issue(
                    Some("default-value"),
                    format!("Web launch issuer '{label}' default-value must be a valid URL"),
                ));
            }
        }
    }
    errors
}
