//! # Simulator API Models
//!
//! Request and response bodies of the simulator's own HTTP surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::InvalidField;
use crate::extractors::Validate;

/// Lifecycle of a simulated encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum EncounterStatus {
    Created,
    Processing,
    Completed,
    Failed,
}

/// Body of `POST /api/encounters:simulate`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct EncounterSimulationRequest {
    /// Encounter name, used as the note title.
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Validate for EncounterSimulationRequest {
    fn validate(&self) -> Result<(), InvalidField> {
        if self.name.trim().is_empty() {
            return Err(InvalidField::new("name", "must not be empty"));
        }
        Ok(())
    }
}

/// Outcome of one simulated encounter.
///
/// `status_code` and `external_api_response` are set whenever the extension
/// answered; `error_message` is set whenever the status is `Failed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub status: EncounterStatus,
    pub status_code: Option<u16>,
    pub external_api_response: Option<String>,
    pub error_message: Option<String>,
}

impl ExtensionResponse {
    /// A freshly created encounter.
    pub fn created(request: &EncounterSimulationRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: request.name.clone(),
            description: request.description.clone(),
            created_at: Utc::now(),
            completed_at: None,
            status: EncounterStatus::Created,
            status_code: None,
            external_api_response: None,
            error_message: None,
        }
    }

    pub(crate) fn fail(&mut self, message: impl Into<String>) {
        self.status = EncounterStatus::Failed;
        self.error_message = Some(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(name: &str) -> EncounterSimulationRequest {
        EncounterSimulationRequest {
            name: name.to_string(),
            description: None,
        }
    }

    #[test]
    fn blank_name_is_rejected() {
        assert!(request("Visit").validate().is_ok());
        assert_eq!(
            request("").validate().unwrap_err(),
            InvalidField::new("name", "must not be empty")
        );
        assert!(request("   ").validate().is_err());
    }

    #[test]
    fn description_is_optional_on_the_wire() {
        let parsed: EncounterSimulationRequest =
            serde_json::from_value(json!({"name": "Visit"})).unwrap();
        assert_eq!(parsed.description, None);
    }

    #[test]
    fn response_serializes_camel_case_with_string_status() {
        let mut response = ExtensionResponse::created(&request("Visit"));
        response.fail("boom");
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["status"], "Failed");
        assert_eq!(value["errorMessage"], "boom");
        assert_eq!(value["completedAt"], serde_json::Value::Null);
        assert!(value.get("createdAt").is_some());
        assert!(value.get("statusCode").is_some());
        assert!(value.get("externalApiResponse").is_some());
    }
}
