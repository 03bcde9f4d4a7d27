//! # Business Rules
//!
//! Cross-field checks that JSON Schema cannot express. Each rule reads the
//! raw document tree, tolerates missing or mistyped sections (structural
//! validation already reports those) and returns every violation it finds.
//!
//! Rules are independent: their order only affects the order of the
//! combined error list.

mod context;
mod names;
mod web_launch;

use dragon_core::ValidationError;
use serde::Serialize;
use serde_json::Value;

pub use names::duplicate_names;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BusinessRule {
    /// Names are unique within `tools`, `automationScripts` and
    /// `eventTriggers`.
    UniqueNames,
    /// Every event trigger's `scriptName` names an automation script.
    ScriptReferences,
    /// `use-client-authentication: no` requires a well-formed web launch
    /// issuer list.
    WebLaunchTokenIssuers,
    /// Context-retrieval entries match the fixed item catalog.
    ContextCatalog,
}

impl BusinessRule {
    pub fn name(&self) -> &'static str {
        match self {
            Self::UniqueNames => "unique-names",
            Self::ScriptReferences => "script-references",
            Self::WebLaunchTokenIssuers => "web-launch-token-issuers",
            Self::ContextCatalog => "context-catalog",
        }
    }

    pub fn check(&self, document: &Value) -> Vec<ValidationError> {
        match self {
            Self::UniqueNames => names::check_unique_names(document),
            Self::ScriptReferences => names::check_script_references(document),
            Self::WebLaunchTokenIssuers => web_launch::check_web_launch_issuers(document),
            Self::ContextCatalog => context::check_context_items(document),
        }
    }
}

/// Run `rules` in order and concatenate their errors.
pub fn check_business_rules(document: &Value, rules: &[BusinessRule]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for rule in rules {
        let found = rule.check(document);
        if !found.is_empty() {
            tracing::debug!(rule = rule.name(), count = found.len(), "business rule violations");
        }
        errors.extend(found);
    }
    errors
}

/// Non-empty string at `key`, if any.
pub(crate) fn non_empty_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rules_run_in_order() {
        let doc = json!({
            "tools": [{ "name": "a" }, { "name": "a" }],
            "eventTriggers": [{ "name": "t", "scriptName": "missing" }]
        });
        let errors = check_business_rules(
            &doc,
            &[BusinessRule::ScriptReferences, BusinessRule::UniqueNames],
        );
        let keywords: Vec<&str> = errors.iter().map(|e| e.keyword.as_str()).collect();
        assert_eq!(keywords, vec!["missingAutomationScript", "uniqueToolNames"]);
    }

    #[test]
    fn test_rules_tolerate_non_object_documents() {
        let rules = [
            BusinessRule::UniqueNames,
            BusinessRule::ScriptReferences,
            BusinessRule::WebLaunchTokenIssuers,
            BusinessRule::ContextCatalog,
        ];
        for doc in [json!(null), json!("text"), json!([1, 2, 3]), json!({"tools": "nope"})] {
            assert!(check_business_rules(&doc, &rules).is_empty(), "{doc}");
        }
    }

    #[test]
    fn test_non_empty_str() {
        let v = json!({ "a": "x", "b": "  ", "c": 3 });
        assert_eq!(non_empty_str(&v, "a"), Some("x"));
        assert_eq!(non_empty_str(&v, "b"), None);
        assert_eq!(non_empty_str(&v, "c"), None);
        assert_eq!(non_empty_str(&v, "d"), None);
    }
}
