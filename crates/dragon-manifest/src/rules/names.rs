//! Name uniqueness and trigger-to-script references.

use std::collections::HashSet;

use dragon_core::ValidationError;
use serde_json::{json, Value};

/// A named list checked for duplicates.
struct NamedList {
    field: &'static str,
    keyword: &'static str,
    noun: &'static str,
}

const NAMED_LISTS: [NamedList; 3] = [
    NamedList {
        field: "tools",
        keyword: "uniqueToolNames",
        noun: "tool",
    },
    NamedList {
        field: "automationScripts",
        keyword: "uniqueAutomationScriptNames",
        noun: "automation script",
    },
    NamedList {
        field: "eventTriggers",
        keyword: "uniqueEventTriggerNames",
        noun: "event trigger",
    },
];

fn entry_name(entry: &Value) -> Option<&str> {
    entry
        .get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
}

/// Distinct names that occur more than once, in the order their second
/// occurrence is seen. Entries without a name are skipped.
pub fn duplicate_names(entries: &[Value]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates: Vec<String> = Vec::new();
    for name in entries.iter().filter_map(entry_name) {
        if !seen.insert(name) && !duplicates.iter().any(|d| d == name) {
            duplicates.push(name.to_string());
        }
    }
    duplicates
}

pub(super) fn check_unique_names(document: &Value) -> Vec<ValidationError> {
    NAMED_LISTS
        .iter()
        .filter_map(|list| {
            let entries = document.get(list.field)?.as_array()?;
            let duplicates = duplicate_names(entries);
            if duplicates.is_empty() {
                return None;
            }
            let message = format!(
                "Duplicate {} names found: {}",
                list.noun,
                duplicates.join(", ")
            );
            Some(
                ValidationError::new(format!("/{}", list.field), list.keyword, message)
                    .with_schema_path(format!("#/{}", list.field))
                    .with_data(Value::Array(entries.clone()))
                    .with_params(json!({ "duplicates": duplicates })),
            )
        })
        .collect()
}

pub(super) fn check_script_references(document: &Value) -> Vec<ValidationError> {
    let Some(triggers) = document.get("eventTriggers").and_then(Value::as_array) else {
        return Vec::new();
    };
    let scripts: HashSet<&str> = document
        .get("automationScripts")
        .and_then(Value::as_array)
        .map(|scripts| scripts.iter().filter_map(entry_name).collect())
        .unwrap_or_default();

    triggers
        .iter()
        .enumerate()
        .filter_map(|(index, trigger)| {
            let script = trigger
                .get("scriptName")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())?;
            if scripts.contains(script) {
                return None;
            }
            let name = entry_name(trigger).unwrap_or("unknown");
            Some(
                ValidationError::new(
                    format!("/eventTriggers/{index}/scriptName"),
                    "missingAutomationScript",
                    format!("Event trigger '{name}' references unknown script '{script}'"),
                )
                .with_schema_path("#/eventTriggers/items")
                .with_data(trigger.clone())
                .with_params(json!({ "trigger": name, "script": script })),
            )
        })
        .collect()
}
