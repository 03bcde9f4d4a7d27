use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::AppState;

pub const SERVICE_NAME: &str = "Dragon Backend Simulator";
pub const SERVICE_VERSION: &str = "1.0.0";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub service: String,
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub endpoints: HealthEndpoints,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthEndpoints {
    pub encounters: String,
    /// API browser entry point; redirects to the OpenAPI document.
    pub swagger: String,
    pub openapi: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// GET /health: service status.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    ),
    tag = "health"
)]
pub(crate) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        service: SERVICE_NAME.to_string(),
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        version: SERVICE_VERSION.to_string(),
        endpoints: HealthEndpoints {
            encounters: "/api/encounters".to_string(),
            swagger: "/".to_string(),
            openapi: crate::openapi::OPENAPI_PATH.to_string(),
        },
    })
}
