//! # Single-Field Validation
//!
//! Checks one value against the sub-schema for a dotted field path, before
//! a full document exists.
//!
//! Path segments are resolved by recursive descent over [`SchemaNode`]:
//!
//! - `properties.<name>` and `definitions.<name>` step into that table;
//! - `items` steps into an array's item schema;
//! - a bare `<name>` tries a property, then a definition, then a raw
//!   schema key.
//!
//! Local `$ref`s (`#/definitions/...`) are followed at every step, and
//! `allOf` branches are searched for properties.
//!
//! An unresolved path is not an error: [`SchemaRegistry::validate_field_value`]
//! passes it. Full-document validation remains the authority.

use dragon_core::SchemaKind;
use serde_json::{Map, Value};

use crate::registry::{compile_schema, SchemaRegistry};

/// Bound on `$ref` chains so a self-referencing schema cannot loop.
const MAX_REF_HOPS: usize = 16;

/// A schema fragment, classified by shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SchemaNode<'a> {
    /// Declares `properties` and/or `definitions`.
    Object {
        schema: &'a Value,
        properties: Option<&'a Map<String, Value>>,
        definitions: Option<&'a Map<String, Value>>,
    },
    /// Declares an `items` schema.
    Array { schema: &'a Value, items: &'a Value },
    /// Anything else.
    Leaf(&'a Value),
}

impl<'a> SchemaNode<'a> {
    pub fn classify(schema: &'a Value) -> Self {
        let properties = schema.get("properties").and_then(Value::as_object);
        let definitions = schema.get("definitions").and_then(Value::as_object);
        if properties.is_some() || definitions.is_some() {
            return Self::Object {
                schema,
                properties,
                definitions,
            };
        }
        match schema.get("items") {
            Some(items) => Self::Array { schema, items },
            None => Self::Leaf(schema),
        }
    }

    /// The underlying schema value.
    pub fn schema(&self) -> &'a Value {
        match self {
            Self::Object { schema, .. } | Self::Array { schema, .. } => schema,
            Self::Leaf(schema) => schema,
        }
    }

    fn property(&self, root: &'a Value, name: &str) -> Option<&'a Value> {
        if let Self::Object {
            properties: Some(props),
            ..
        } = self
        {
            if let Some(found) = props.get(name) {
                return Some(found);
            }
        }
        // Properties contributed by `allOf` branches.
        self.schema()
            .get("allOf")
            .and_then(Value::as_array)?
            .iter()
            .find_map(|branch| {
                SchemaNode::classify(follow_refs(root, branch)?).property(root, name)
            })
    }

    fn definition(&self, name: &str) -> Option<&'a Value> {
        match self {
            Self::Object {
                definitions: Some(defs),
                ..
            } => defs.get(name),
            _ => None,
        }
    }

    fn items(&self) -> Option<&'a Value> {
        match self {
            Self::Array { items, .. } => Some(items),
            _ => None,
        }
    }
}

/// Locate the schema fragment for `path` inside `root`.
pub fn extract_field_schema<'a>(path: &str, root: &'a Value) -> Option<SchemaNode<'a>> {
    let segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return None;
    }
    descend(root, root, &segments)
}

fn descend<'a>(root: &'a Value, schema: &'a Value, segments: &[&str]) -> Option<SchemaNode<'a>> {
    let node = SchemaNode::classify(follow_refs(root, schema)?);
    match segments {
        [] => Some(node),
        ["properties", name, rest @ ..] => {
            let child = node.property(root, name)?;
            descend(root, child, rest)
        }
        ["definitions", name, rest @ ..] => {
            let child = node.definition(name)?;
            descend(root, child, rest)
        }
        ["items", rest @ ..] if node.items().is_some() => descend(root, node.items()?, rest),
        [name, rest @ ..] => {
            let child = node
                .property(root, name)
                .or_else(|| node.definition(name))
                .or_else(|| node.schema().get(*name))?;
            descend(root, child, rest)
        }
    }
}

/// Follow local `$ref`s until reaching a schema without one.
fn follow_refs<'a>(root: &'a Value, mut schema: &'a Value) -> Option<&'a Value> {
    for _ in 0..MAX_REF_HOPS {
        match schema.get("$ref").and_then(Value::as_str) {
            Some(reference) => {
                let pointer = reference.strip_prefix('#')?;
                schema = root.pointer(pointer)?;
            }
            None => return Some(schema),
        }
    }
    None
}

/// Make a fragment compilable on its own: nested `#/definitions/...`
/// references need the root's definitions table alongside.
fn standalone(root: &Value, fragment: &Value) -> Value {
    let mut owned = fragment.clone();
    if let (Some(obj), Some(defs)) = (owned.as_object_mut(), root.get("definitions")) {
        obj.entry("definitions").or_insert_with(|| defs.clone());
    }
    owned
}

impl SchemaRegistry {
    /// Validate a single value against the schema fragment at `path`.
    ///
    /// Returns `Ok(())` when the value conforms *or* when `path` does not
    /// resolve; otherwise the first violation's message. The fragment is
    /// compiled on every call.
    pub fn validate_field_value(
        &self,
        value: &Value,
        path: &str,
        kind: SchemaKind,
    ) -> Result<(), String> {
        let root = self.schema(kind);
        let Some(node) = extract_field_schema(path, root) else {
            tracing::trace!(path, schema = %kind, "field path does not resolve; accepting value");
            return Ok(());
        };

        let validator = match compile_schema(&standalone(root, node.schema())) {
            Ok(v) => v,
            Err(reason) => {
                tracing::warn!(path, schema = %kind, %reason, "field fragment did not compile");
                return Ok(());
            }
        };

        let first = validator.iter_errors(value).next().map(|e| e.to_string());
        match first {
            Some(message) => Err(message),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "type": "object",
            "properties": {
                "name": { "type": "string", "pattern": "^[a-z-]+$" },
                "tools": { "type": "array", "items": { "$ref": "#/definitions/tool" } },
                "launch": { "$ref": "#/definitions/named" }
            },
            "definitions": {
                "tool": {
                    "type": "object",
                    "properties": { "endpoint": { "type": "string", "format": "uri" } }
                },
                "base": {
                    "type": "object",
                    "properties": { "required": { "enum": ["yes", "no"] } }
                },
                "named": {
                    "allOf": [
                        { "$ref": "#/definitions/base" },
                        { "properties": { "name": { "type": "string" } } }
                    ]
                }
            }
        })
    }

    #[test]
    fn test_bare_property() {
        let root = sample();
        let node = extract_field_schema("name", &root).unwrap();
        assert!(matches!(node, SchemaNode::Leaf(_)));
        assert_eq!(node.schema()["pattern"], json!("^[a-z-]+$"));
    }

    #[test]
    fn test_properties_keyword_segment() {
        let root = sample();
        let node = extract_field_schema("properties.tools", &root).unwrap();
        assert!(matches!(node, SchemaNode::Array { .. }));
    }

    #[test]
    fn test_items_follow_ref() {
        let root = sample();
        let node = extract_field_schema("tools.items.endpoint", &root).unwrap();
        assert_eq!(node.schema()["format"], json!("uri"));
    }

    #[test]
    fn test_definitions_segment() {
        let root = sample();
        let node = extract_field_schema("definitions.tool", &root).unwrap();
        assert!(matches!(node, SchemaNode::Object { .. }));
        assert!(extract_field_schema("tool.endpoint", &root).is_some());
    }

    #[test]
    fn test_all_of_properties() {
        let root = sample();
        assert!(extract_field_schema("launch.required", &root).is_some());
        assert!(extract_field_schema("launch.name", &root).is_some());
    }

    #[test]
    fn test_unresolved_paths() {
        let root = sample();
        assert!(extract_field_schema("some.totally.unknown.path", &root).is_none());
        assert!(extract_field_schema("tools.items.missing", &root).is_none());
        assert!(extract_field_schema("", &root).is_none());
        assert!(extract_field_schema("name.", &root).is_none());
    }

    #[test]
    fn test_ref_cycle_does_not_loop() {
        let root = json!({
            "properties": { "a": { "$ref": "#/definitions/x" } },
            "definitions": { "x": { "$ref": "#/definitions/x" } }
        });
        assert!(extract_field_schema("a", &root).is_none());
    }

    #[test]
    fn test_standalone_carries_definitions() {
        let root = sample();
        let fragment = root["properties"]["tools"].clone();
        let owned = standalone(&root, &fragment);
        assert!(owned["definitions"]["tool"].is_object());
        assert!(compile_schema(&owned).is_ok());
    }
}
