//! # dragon-simulator: Dragon Backend Simulator
//!
//! Stands in for the Dragon Copilot backend when developing an extension.
//! Each simulated encounter becomes a Dragon Standard Payload posted to the
//! extension's processing endpoint, and the outcome is reported back.
//!
//! ## API Surface
//!
//! | Method | Path | Module |
//! |--------|------|--------|
//! | GET    | `/health` | [`routes::health`] |
//! | POST   | `/api/encounters:simulate` | [`routes::encounters`] |
//! | GET    | `/openapi/v1.json` | [`openapi`] |

pub mod client;
pub mod config;
pub mod error;
pub mod extractors;
pub mod models;
pub mod openapi;
pub mod payload;
pub mod routes;
pub mod simulation;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

pub use client::{ExtensionApiError, ExtensionClient};
pub use config::{ConfigError, SimulatorConfig};
pub use state::AppState;

/// Assemble the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::encounters::router())
        .merge(openapi::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
