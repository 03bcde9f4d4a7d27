//! Shared state handed to every route handler.

use crate::client::{ExtensionApiError, ExtensionClient};
use crate::config::SimulatorConfig;

#[derive(Debug, Clone)]
pub struct AppState {
    pub client: ExtensionClient,
}

impl AppState {
    pub fn new(config: &SimulatorConfig) -> Result<Self, ExtensionApiError> {
        Ok(Self {
            client: ExtensionClient::new(config)?,
        })
    }
}
