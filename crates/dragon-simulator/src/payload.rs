//! # Dragon Standard Payload (subset)
//!
//! The wire shapes exchanged with an extension's processing endpoint.
//! Only the fields the simulator sends or reads are modelled; everything
//! serializes in camelCase.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tenant identifier stamped on every simulated session.
pub const SIMULATOR_TENANT_ID: &str = "dragon-backend-simulator";

/// Document type text for simulated encounters.
pub const ENCOUNTER_DOCUMENT_TYPE: &str = "Encounter Simulation";

/// Message used when an extension reports failure without saying why.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Extension processing failed";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragonStandardPayload {
    pub session_data: SessionData,
    pub note: Note,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    pub correlation_id: String,
    pub session_start: DateTime<Utc>,
    pub tenant_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub payload_version: String,
    pub schema_version: String,
    pub language: String,
    pub priority: String,
    pub document: Document,
    pub resources: Vec<ClinicalDocumentSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    #[serde(rename = "type")]
    pub document_type: DocumentType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentType {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalDocumentSection {
    pub legacy_id: String,
    pub content: String,
}

impl DragonStandardPayload {
    /// Payload for one simulated encounter.
    ///
    /// The encounter id doubles as the session correlation id and the
    /// legacy id of the single resource.
    pub fn for_encounter(
        id: Uuid,
        created_at: DateTime<Utc>,
        name: &str,
        description: Option<&str>,
    ) -> Self {
        Self {
            session_data: SessionData {
                correlation_id: id.to_string(),
                session_start: created_at,
                tenant_id: SIMULATOR_TENANT_ID.to_string(),
            },
            note: Note {
                payload_version: "1.0".to_string(),
                schema_version: "1.0".to_string(),
                language: "en-US".to_string(),
                priority: "normal".to_string(),
                document: Document {
                    title: name.to_string(),
                    document_type: DocumentType {
                        text: ENCOUNTER_DOCUMENT_TYPE.to_string(),
                    },
                },
                resources: vec![ClinicalDocumentSection {
                    legacy_id: id.to_string(),
                    content: encounter_content(name, description),
                }],
            },
        }
    }
}

/// `Encounter: <name>`, followed by ` - <description>` when there is one.
pub fn encounter_content(name: &str, description: Option<&str>) -> String {
    match description {
        Some(d) if !d.is_empty() => format!("Encounter: {name} - {d}"),
        _ => format!("Encounter: {name}"),
    }
}

/// Reply body of an extension's processing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl ProcessResponse {
    /// Parse a reply body. Only JSON objects count; anything else yields
    /// `None`.
    pub fn parse(body: &str) -> Option<Self> {
        match serde_json::from_str::<serde_json::Value>(body) {
            Ok(value @ serde_json::Value::Object(_)) => serde_json::from_value(value).ok(),
            _ => None,
        }
    }

    /// Failure message when the extension reported `success: false`.
    pub fn failure_message(&self) -> Option<String> {
        if self.success {
            return None;
        }
        Some(
            self.message
                .clone()
                .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payload_wire_shape() {
        let id = Uuid::nil();
        let created_at = DateTime::parse_from_rfc3339("2026-01-02T03:04:05Z")
            .unwrap()
            .with_timezone(&Utc);
        let payload =
            DragonStandardPayload::for_encounter(id, created_at, "Visit", Some("Follow-up"));
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(
            value["sessionData"],
            json!({
                "correlationId": id.to_string(),
                "sessionStart": "2026-01-02T03:04:05Z",
                "tenantId": "dragon-backend-simulator",
            })
        );
        assert_eq!(value["note"]["payloadVersion"], "1.0");
        assert_eq!(value["note"]["schemaVersion"], "1.0");
        assert_eq!(value["note"]["language"], "en-US");
        assert_eq!(value["note"]["priority"], "normal");
        assert_eq!(
            value["note"]["document"],
            json!({"title": "Visit", "type": {"text": "Encounter Simulation"}})
        );
        assert_eq!(
            value["note"]["resources"],
            json!([{"legacyId": id.to_string(), "content": "Encounter: Visit - Follow-up"}])
        );
    }

    #[test]
    fn content_omits_empty_description() {
        assert_eq!(encounter_content("Visit", None), "Encounter: Visit");
        assert_eq!(encounter_content("Visit", Some("")), "Encounter: Visit");
        assert_eq!(encounter_content("Visit", Some("x")), "Encounter: Visit - x");
    }

    #[test]
    fn process_response_defaults_success_to_false() {
        let parsed = ProcessResponse::parse("{}").unwrap();
        assert!(!parsed.success);
        assert_eq!(parsed.failure_message().as_deref(), Some(DEFAULT_FAILURE_MESSAGE));

        let parsed = ProcessResponse::parse(r#"{"success": false, "message": "bad note"}"#).unwrap();
        assert_eq!(parsed.failure_message().as_deref(), Some("bad note"));

        let parsed = ProcessResponse::parse(r#"{"success": true}"#).unwrap();
        assert_eq!(parsed.failure_message(), None);
    }

    #[test]
    fn non_object_bodies_do_not_parse() {
        assert_eq!(ProcessResponse::parse("plain text"), None);
        assert_eq!(ProcessResponse::parse("[false, \"x\"]"), None);
        assert_eq!(ProcessResponse::parse("null"), None);
        assert_eq!(ProcessResponse::parse(r#"{"success": "yes"}"#), None);
    }
}
