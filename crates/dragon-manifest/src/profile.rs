//! # Manifest Profiles
//!
//! A profile is the pair (schema document, business-rule set). Extension
//! and connector manifests run through the same pipeline; only the profile
//! differs.

use std::fmt;
use std::str::FromStr;

use dragon_core::{CoreError, SchemaKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::rules::BusinessRule;

/// Keys that only appear in connector manifests.
const CONNECTOR_MARKERS: [&str; 3] = ["partner-id", "instance", "server-authentication"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestProfile {
    /// Extension manifest: tools, automation scripts and event triggers.
    Extension,
    /// Connector (partner integration) manifest: authentication, web
    /// launch and context retrieval.
    Connector,
}

impl ManifestProfile {
    pub const ALL: [ManifestProfile; 2] = [Self::Extension, Self::Connector];

    pub fn schema_kind(&self) -> SchemaKind {
        match self {
            Self::Extension => SchemaKind::ExtensionManifest,
            Self::Connector => SchemaKind::ConnectorManifest,
        }
    }

    /// Business rules applied after structural validation, in order.
    pub fn rules(&self) -> &'static [BusinessRule] {
        match self {
            Self::Extension => &[BusinessRule::UniqueNames, BusinessRule::ScriptReferences],
            Self::Connector => &[
                BusinessRule::UniqueNames,
                BusinessRule::ScriptReferences,
                BusinessRule::WebLaunchTokenIssuers,
                BusinessRule::ContextCatalog,
            ],
        }
    }

    /// Guess the profile from a document's top-level keys.
    ///
    /// Any connector-only key selects [`ManifestProfile::Connector`];
    /// everything else, including non-objects, is treated as an extension.
    pub fn detect(document: &Value) -> Self {
        let is_connector = document
            .as_object()
            .is_some_and(|obj| CONNECTOR_MARKERS.iter().any(|key| obj.contains_key(*key)));
        if is_connector {
            Self::Connector
        } else {
            Self::Extension
        }
    }

    /// Publisher `scope` written by default for this kind of project.
    pub fn default_scope(&self) -> &'static str {
        match self {
            Self::Extension => "Workflow",
            Self::Connector => "EHR Connector",
        }
    }

    /// Conventional manifest file name.
    pub fn manifest_file_name(&self) -> &'static str {
        match self {
            Self::Extension => "extension.yaml",
            Self::Connector => "integration.yaml",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Extension => "extension",
            Self::Connector => "connector",
        }
    }
}

impl fmt::Display for ManifestProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ManifestProfile {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "extension" | "extension-manifest" => Ok(Self::Extension),
            "connector" | "connector-manifest" | "partner" => Ok(Self::Connector),
            other => Err(CoreError::UnknownVariant {
                kind: "manifest profile",
                value: other.to_string(),
                expected: "extension, connector",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detect_connector_markers() {
        for key in CONNECTOR_MARKERS {
            let mut doc = json!({ "name": "x" });
            doc[key] = json!({});
            assert_eq!(ManifestProfile::detect(&doc), ManifestProfile::Connector, "{key}");
        }
    }

    #[test]
    fn test_detect_defaults_to_extension() {
        assert_eq!(
            ManifestProfile::detect(&json!({"name": "x", "tools": []})),
            ManifestProfile::Extension
        );
        assert_eq!(ManifestProfile::detect(&json!([1, 2])), ManifestProfile::Extension);
    }

    #[test]
    fn test_connector_rules_extend_extension_rules() {
        let ext = ManifestProfile::Extension.rules();
        let conn = ManifestProfile::Connector.rules();
        assert!(ext.iter().all(|r| conn.contains(r)));
        assert!(conn.contains(&BusinessRule::ContextCatalog));
        assert!(!ext.contains(&BusinessRule::WebLaunchTokenIssuers));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("partner".parse::<ManifestProfile>().unwrap(), ManifestProfile::Connector);
        assert_eq!("extension".parse::<ManifestProfile>().unwrap(), ManifestProfile::Extension);
        assert!("auto".parse::<ManifestProfile>().is_err());
    }

    #[test]
    fn test_schema_kind_mapping() {
        assert_eq!(ManifestProfile::Extension.schema_kind(), SchemaKind::ExtensionManifest);
        assert_eq!(ManifestProfile::Connector.schema_kind(), SchemaKind::ConnectorManifest);
    }
}
