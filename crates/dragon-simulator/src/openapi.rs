//! # OpenAPI Document
//!
//! utoipa-generated description of the simulator API, served at
//! `/openapi/v1.json`. The root path redirects there.

use axum::response::Redirect;
use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

pub const OPENAPI_PATH: &str = "/openapi/v1.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Dragon Backend Simulator API",
        version = "1.0.0",
        description = "Simulates Dragon Copilot encounters and forwards them to an extension for processing.",
        license(name = "MIT")
    ),
    paths(
        crate::routes::health::health,
        crate::routes::encounters::simulate,
    ),
    components(schemas(
        crate::models::EncounterSimulationRequest,
        crate::models::ExtensionResponse,
        crate::models::EncounterStatus,
        crate::routes::health::HealthResponse,
        crate::routes::health::HealthEndpoints,
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
    )),
    tags(
        (name = "health", description = "Service status"),
        (name = "encounters", description = "Encounter simulation"),
    )
)]
pub struct ApiDoc;

/// Serves the document, and sends `/` to it.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(OPENAPI_PATH, get(openapi_json))
        .route("/", get(|| async { Redirect::temporary(OPENAPI_PATH) }))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_both_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/health"));
        assert!(doc.paths.paths.contains_key("/api/encounters:simulate"));
        assert_eq!(doc.info.title, "Dragon Backend Simulator API");
    }
}
