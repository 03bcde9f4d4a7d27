//! # Encounter Simulation API
//!
//! `POST /api/encounters:simulate` answers 200 with the encounter record
//! whether or not the extension succeeded; the outcome is in `status`.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

use crate::error::{AppError, ErrorBody};
use crate::extractors::extract_validated_json;
use crate::models::{EncounterSimulationRequest, ExtensionResponse};
use crate::simulation::simulate_encounter;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/encounters:simulate", post(simulate))
}

/// POST /api/encounters:simulate
#[utoipa::path(
    post,
    path = "/api/encounters:simulate",
    request_body = EncounterSimulationRequest,
    responses(
        (status = 200, description = "Encounter simulated", body = ExtensionResponse),
        (status = 400, description = "Malformed request body", body = ErrorBody),
        (status = 422, description = "Invalid request", body = ErrorBody),
    ),
    tag = "encounters"
)]
pub(crate) async fn simulate(
    State(state): State<AppState>,
    body: Result<Json<EncounterSimulationRequest>, JsonRejection>,
) -> Result<Json<ExtensionResponse>, AppError> {
    let req = extract_validated_json(body)?;
    Ok(Json(simulate_encounter(&state.client, &req).await))
}
