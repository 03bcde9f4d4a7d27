//! # Schema Kinds and Yes/No Tokens
//!
//! [`SchemaKind`] names the schema documents shipped with the toolkit. Each
//! kind maps to exactly one file in the `schemas/` directory.
//!
//! [`YesNo`] is the `"yes"` / `"no"` token used by connector manifests for
//! flags such as `required` and `use-client-authentication`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Logical schema document type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaKind {
    /// Extension manifest (`extension-manifest.json`).
    ExtensionManifest,
    /// Connector / partner integration manifest (`connector-manifest.json`).
    ConnectorManifest,
    /// Publisher configuration (`publisher-config.json`).
    Publisher,
}

impl SchemaKind {
    /// All schema kinds, in load order.
    pub const ALL: [SchemaKind; 3] = [
        Self::ExtensionManifest,
        Self::ConnectorManifest,
        Self::Publisher,
    ];

    /// The schema file name inside the schema directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::ExtensionManifest => "extension-manifest.json",
            Self::ConnectorManifest => "connector-manifest.json",
            Self::Publisher => "publisher-config.json",
        }
    }

    /// The kebab-case identifier, matching the serde format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExtensionManifest => "extension-manifest",
            Self::ConnectorManifest => "connector-manifest",
            Self::Publisher => "publisher",
        }
    }

    /// Whether this kind describes a manifest (as opposed to publisher metadata).
    pub fn is_manifest(&self) -> bool {
        !matches!(self, Self::Publisher)
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaKind {
    type Err = CoreError;

    /// Accepts the kebab-case identifiers plus the short aliases used on
    /// the command line (`extension`, `connector`, `partner`, `manifest`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "extension-manifest" | "extension" | "manifest" => Ok(Self::ExtensionManifest),
            "connector-manifest" | "connector" | "partner-manifest" | "partner" => {
                Ok(Self::ConnectorManifest)
            }
            "publisher" | "publisher-config" => Ok(Self::Publisher),
            other => Err(CoreError::UnknownVariant {
                kind: "schema kind",
                value: other.to_string(),
                expected: "extension-manifest, connector-manifest, publisher",
            }),
        }
    }
}

/// A `"yes"` / `"no"` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
        }
    }

    /// Parse a JSON value as a yes/no token. Anything other than the exact
    /// strings `"yes"` or `"no"` yields `None`.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        value.as_str().and_then(|s| s.parse().ok())
    }
}

impl fmt::Display for YesNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for YesNo {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yes" => Ok(Self::Yes),
            "no" => Ok(Self::No),
            other => Err(CoreError::UnknownVariant {
                kind: "yes/no token",
                value: other.to_string(),
                expected: "yes, no",
            }),
        }
    }
}
