//! # Context-Retrieval Catalog
//!
//! The context items a connector may ask the client admin to supply. Names,
//! types and descriptions are fixed; a manifest only chooses which items to
//! include and whether each is required.

use dragon_core::YesNo;
use serde::{Deserialize, Serialize};

/// One catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextItemDefinition {
    pub name: &'static str,
    /// `url` or `string`.
    pub item_type: &'static str,
    pub description: &'static str,
    pub default_required: YesNo,
    /// Whether new manifests include this item.
    pub default_include: bool,
}

impl ContextItemDefinition {
    /// The manifest entry for this item with its default requiredness.
    pub fn to_manifest_item(&self) -> ContextRetrievalItem {
        ContextRetrievalItem {
            name: self.name.to_string(),
            item_type: self.item_type.to_string(),
            description: self.description.to_string(),
            required: self.default_required,
            default_value: None,
        }
    }
}

pub const CONTEXT_ITEM_CATALOG: [ContextItemDefinition; 7] = [
    ContextItemDefinition {
        name: "base_url",
        item_type: "url",
        description: "base url need for API calls.  These are typically FHIR calls.",
        default_required: YesNo::Yes,
        default_include: true,
    },
    ContextItemDefinition {
        name: "ehr-user_id",
        item_type: "string",
        description: "optional EHR user id for FHIR API calls.",
        default_required: YesNo::No,
        default_include: false,
    },
    ContextItemDefinition {
        name: "in-bound-client-id",
        item_type: "string",
        description: "credential for inbound calls to interop",
        default_required: YesNo::Yes,
        default_include: true,
    },
    ContextItemDefinition {
        name: "in-bound-issuer",
        item_type: "url",
        description: "issuer claim of access tokens used by the partner to call Dragon Copilot Interop",
        default_required: YesNo::Yes,
        default_include: true,
    },
    ContextItemDefinition {
        name: "out-bound-issuer",
        item_type: "url",
        description: "endpoint used to issue access token for Dragon Copilot Interop to call partner",
        default_required: YesNo::Yes,
        default_include: true,
    },
    ContextItemDefinition {
        name: "out-bound-client-id",
        item_type: "string",
        description: "Partner-provided client ID used to issue access tokens for Dragon Copilot Interop to call the partner",
        default_required: YesNo::Yes,
        default_include: true,
    },
    ContextItemDefinition {
        name: "out-bound-secret",
        item_type: "string",
        description: "Partner-provided secret used to issue access tokens for Dragon Copilot Interop to call the partner",
        default_required: YesNo::Yes,
        default_include: true,
    },
];

/// Look up a catalog entry by name.
pub fn context_item(name: &str) -> Option<&'static ContextItemDefinition> {
    CONTEXT_ITEM_CATALOG.iter().find(|item| item.name == name)
}

/// Manifest entries for every item included by default, in catalog order.
pub fn default_context_items() -> Vec<ContextRetrievalItem> {
    CONTEXT_ITEM_CATALOG
        .iter()
        .filter(|item| item.default_include)
        .map(ContextItemDefinition::to_manifest_item)
        .collect()
}

/// A `context-retrieval.instance` entry as written in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextRetrievalItem {
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub description: String,
    pub required: YesNo,
    /// Never valid for catalog items; kept so a parsed manifest round-trips
    /// and the rule can report it.
    #[serde(rename = "default-value", default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}
