//! # Encounter Simulation
//!
//! Builds the payload for a simulated encounter, calls the extension and
//! folds whatever happens into an [`ExtensionResponse`]. Extension
//! failures never become errors here; they are recorded on the response.

use chrono::Utc;

use crate::client::ExtensionClient;
use crate::models::{EncounterSimulationRequest, EncounterStatus, ExtensionResponse};
use crate::payload::{DragonStandardPayload, ProcessResponse};

pub async fn simulate_encounter(
    client: &ExtensionClient,
    request: &EncounterSimulationRequest,
) -> ExtensionResponse {
    let mut encounter = ExtensionResponse::created(request);
    tracing::info!(encounter_id = %encounter.id, name = %encounter.name, "simulating encounter");

    let payload = DragonStandardPayload::for_encounter(
        encounter.id,
        encounter.created_at,
        &request.name,
        request.description.as_deref(),
    );

    tracing::info!(
        encounter_id = %encounter.id,
        url = %client.process_url(),
        "calling extension API"
    );
    encounter.status = EncounterStatus::Processing;

    match client.process(&payload).await {
        Ok(reply) if reply.is_success() => {
            encounter.status = EncounterStatus::Completed;
            encounter.status_code = Some(reply.status.as_u16());
            tracing::info!(
                encounter_id = %encounter.id,
                status = reply.status.as_u16(),
                "extension call succeeded"
            );
            if let Some(message) =
                ProcessResponse::parse(&reply.body).and_then(|r| r.failure_message())
            {
                tracing::warn!(encounter_id = %encounter.id, %message, "extension reported failure");
                encounter.fail(message);
            }
            encounter.external_api_response = Some(reply.body);
        }
        Ok(reply) => {
            encounter.status_code = Some(reply.status.as_u16());
            tracing::warn!(
                encounter_id = %encounter.id,
                status = reply.status.as_u16(),
                reason = reply.reason(),
                "extension call failed"
            );
            encounter.fail(format!(
                "Extension API call failed with status {}: {}",
                reply.status_name(),
                reply.reason()
            ));
        }
        Err(e) => {
            tracing::warn!(encounter_id = %encounter.id, error = %e, "error calling extension API");
            encounter.fail(e.to_string());
        }
    }

    encounter.completed_at = Some(Utc::now());
    encounter
}
