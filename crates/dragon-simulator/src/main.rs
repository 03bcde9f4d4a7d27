//! # dragon-simulator binary
//!
//! Reads configuration from the environment and serves the simulator API.

use dragon_simulator::{AppState, SimulatorConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let config = SimulatorConfig::from_env().map_err(|e| {
        tracing::error!("configuration error: {e}");
        e
    })?;
    tracing::info!(?config, "configuration loaded");

    let port = config.port;
    let state = AppState::new(&config)?;
    tracing::info!(url = %state.client.process_url(), "forwarding encounters to extension");

    let app = dragon_simulator::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Dragon Backend Simulator listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
