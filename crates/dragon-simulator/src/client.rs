//! Typed client for an extension's processing endpoint.

use std::time::Duration;

use reqwest::StatusCode;
use url::Url;

use crate::config::{ConfigError, SimulatorConfig};
use crate::payload::DragonStandardPayload;

/// Errors from talking to the extension API.
#[derive(Debug, thiserror::Error)]
pub enum ExtensionApiError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The request could not be sent or the reply could not be read.
    #[error("request to {endpoint} failed: {source}")]
    Http {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Raw reply from the extension: status plus body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionReply {
    pub status: StatusCode,
    pub body: String,
}

impl ExtensionReply {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn reason(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or("Unknown error")
    }

    /// Status name as the Dragon backend reports it: `BadRequest`,
    /// `ServiceUnavailable`. Unnamed codes fall back to the number.
    pub fn status_name(&self) -> String {
        status_name(self.status)
    }
}

pub fn status_name(status: StatusCode) -> String {
    match status.as_u16() {
        413 => return "RequestEntityTooLarge".to_string(),
        414 => return "RequestUriTooLong".to_string(),
        416 => return "RequestedRangeNotSatisfiable".to_string(),
        _ => {}
    }
    match status.canonical_reason() {
        Some(reason) => reason
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect(),
        None => status.as_u16().to_string(),
    }
}

/// HTTP client bound to one processing endpoint.
#[derive(Debug, Clone)]
pub struct ExtensionClient {
    http: reqwest::Client,
    process_url: Url,
}

impl ExtensionClient {
    pub fn new(config: &SimulatorConfig) -> Result<Self, ExtensionApiError> {
        let process_url = config.process_url()?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ExtensionApiError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;
        Ok(Self { http, process_url })
    }

    pub fn process_url(&self) -> &Url {
        &self.process_url
    }

    /// POST a payload and return whatever the extension answered.
    ///
    /// Non-2xx statuses are not errors here; only transport failures are.
    pub async fn process(
        &self,
        payload: &DragonStandardPayload,
    ) -> Result<ExtensionReply, ExtensionApiError> {
        let endpoint = self.process_url.to_string();
        let resp = self
            .http
            .post(self.process_url.clone())
            .json(payload)
            .send()
            .await
            .map_err(|e| ExtensionApiError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ExtensionApiError::Http { endpoint, source: e })?;
        Ok(ExtensionReply { status, body })
    }
}
