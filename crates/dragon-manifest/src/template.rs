//! # Manifest Templates
//!
//! Starter manifests written by `dragon init`. Each template is a complete,
//! valid document for its profile that the author then edits: one sample
//! tool, script and trigger for extensions; client authentication, default
//! note sections and the default context items for connectors.

use serde_json::{json, Value};

use crate::catalog::default_context_items;
use crate::error::ManifestError;
use crate::note_sections::default_note_sections;
use crate::profile::ManifestProfile;

/// Placeholder tenant written into new extension manifests.
pub const TEMPLATE_TENANT_ID: &str = "00000000-0000-0000-0000-000000000001";

const SAMPLE_ENDPOINT: &str = "https://localhost:5181/v1/process";
const SAMPLE_ISSUER: &str = "https://login.microsoftonline.com/00000000-0000-0000-0000-000000000001/v2.0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestTemplate {
    pub profile: ManifestProfile,
    pub name: String,
    pub description: String,
    pub version: String,
    /// Connector only; defaults to `name`.
    pub partner_id: Option<String>,
    /// Connector only; defaults to `name`.
    pub clinical_application_name: Option<String>,
}

impl ManifestTemplate {
    pub fn new(
        profile: ManifestProfile,
        name: impl Into<String>,
        description: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            profile,
            name: name.into(),
            description: description.into(),
            version: version.into(),
            partner_id: None,
            clinical_application_name: None,
        }
    }

    pub fn with_partner(
        mut self,
        partner_id: impl Into<String>,
        clinical_application_name: impl Into<String>,
    ) -> Self {
        self.partner_id = Some(partner_id.into());
        self.clinical_application_name = Some(clinical_application_name.into());
        self
    }

    /// The manifest as a JSON tree.
    pub fn render(&self) -> Result<Value, ManifestError> {
        match self.profile {
            ManifestProfile::Extension => Ok(self.extension_document()),
            ManifestProfile::Connector => self.connector_document(),
        }
    }

    /// The manifest as YAML text.
    pub fn to_yaml(&self) -> Result<String, ManifestError> {
        serde_yaml::to_string(&self.render()?).map_err(|e| ManifestError::Render {
            document: "manifest",
            reason: e.to_string(),
        })
    }

    fn extension_document(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "version": self.version,
            "auth": { "tenantId": TEMPLATE_TENANT_ID },
            "tools": [{
                "name": "note-tool",
                "description": "Processes clinical notes and returns structured results",
                "endpoint": SAMPLE_ENDPOINT,
                "inputs": [{
                    "name": "note",
                    "description": "Clinical note content",
                    "data": "DSP/Note"
                }],
                "outputs": [{
                    "name": "processed-note",
                    "description": "Processed note results",
                    "data": "DSP"
                }]
            }],
            "automationScripts": [{
                "name": "note-analyzer-script",
                "description": "Analyzes new clinical notes",
                "entryPoint": "scripts/note-analyzer/index.js",
                "runtime": "nodejs",
                "timeoutSeconds": 60
            }],
            "eventTriggers": [{
                "name": "note-created-trigger",
                "description": "Runs the analyzer when a note is created",
                "eventType": "note.created",
                "scriptName": "note-analyzer-script"
            }]
        })
    }

    fn connector_document(&self) -> Result<Value, ManifestError> {
        let render_err = |e: serde_json::Error| ManifestError::Render {
            document: "manifest",
            reason: e.to_string(),
        };
        let note_sections = serde_json::to_value(default_note_sections()).map_err(render_err)?;
        let context_items = serde_json::to_value(default_context_items()).map_err(render_err)?;
        let partner_id = self.partner_id.as_deref().unwrap_or(&self.name);
        let application = self.clinical_application_name.as_deref().unwrap_or(&self.name);

        Ok(json!({
            "name": self.name,
            "description": self.description,
            "version": self.version,
            "partner-id": partner_id,
            "clinical-application-name": application,
            "server-authentication": [{
                "issuer": SAMPLE_ISSUER,
                "identity_claim": "azp",
                "identity_value": [TEMPLATE_TENANT_ID]
            }],
            "note-sections": note_sections,
            "instance": {
                "client-authentication": {
                    "allow-multiple-issuers": "no",
                    "issuer": {
                        "access-token-issuer": {
                            "type": "url",
                            "description": "Issuer claim for partner issued access tokens.",
                            "required": "yes"
                        }
                    }
                },
                "web-launch-token": {
                    "use-client-authentication": "yes",
                    "allow-multiple-issuers": "no"
                },
                "context-retrieval": { "instance": context_items }
            }
        }))
    }
}
