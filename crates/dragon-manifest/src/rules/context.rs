//! Context-retrieval entries against the fixed catalog.

use dragon_core::{ValidationError, YesNo};
use serde_json::{json, Value};

use crate::catalog::context_item;

const ITEMS_POINTER: &str = "/instance/context-retrieval/instance";

pub(super) fn check_context_items(document: &Value) -> Vec<ValidationError> {
    let Some(items) = document.pointer(ITEMS_POINTER).and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.is_object())
        .flat_map(|(index, item)| check_item(index, item))
        .collect()
}

fn check_item(index: usize, item: &Value) -> Vec<ValidationError> {
    let pointer = format!("{ITEMS_POINTER}/{index}");
    let name = item.get("name").and_then(Value::as_str);
    let label = name.unwrap_or("unknown");
    let issue = |field: &str, keyword: &str, message: String, params: Value| {
        ValidationError::new(format!("{pointer}/{field}"), keyword, message)
            .with_schema_path("#/definitions/contextItem")
            .with_data(item.clone())
            .with_params(params)
    };

    let mut errors = Vec::new();

    if let Some(name) = name {
        match context_item(name) {
            None => errors.push(issue(
                "name",
                "contextItemUnknown",
                format!("Context item '{name}' is not a supported context item"),
                json!({ "name": name }),
            )),
            Some(definition) => {
                let actual_type = item.get("type").and_then(Value::as_str);
                if actual_type != Some(definition.item_type) {
                    errors.push(issue(
                        "type",
                        "contextItemType",
                        format!(
                            "Context item '{name}' must have type '{}'",
                            definition.item_type
                        ),
                        json!({ "expected": definition.item_type, "actual": actual_type }),
                    ));
                }
                let actual_description = item.get("description").and_then(Value::as_str);
                if actual_description != Some(definition.description) {
                    errors.push(issue(
                        "description",
                        "contextItemDescription",
                        format!("Context item '{name}' description must match the catalog definition"),
                        json!({ "expected": definition.description }),
                    ));
                }
            }
        }
    }

    if item.get("required").and_then(YesNo::from_value).is_none() {
        errors.push(issue(
            "required",
            "contextItemRequired",
            format!("Context item '{label}' must set required to 'yes' or 'no'"),
            json!({ "allowedValues": ["yes", "no"] }),
        ));
    }

    if item.get("default-value").is_some() {
        errors.push(issue(
            "default-value",
            "contextItemDefaultValue",
            format!("Default values are not supported for context item '{label}'"),
            json!({ "name": label }),
        ));
    }

    errors
}
