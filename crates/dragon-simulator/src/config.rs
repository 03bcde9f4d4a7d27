//! Simulator configuration.
//!
//! Read from the environment at start-up. Every value has a default that
//! matches a locally running extension sample.

use url::Url;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_EXTENSION_API_BASE_URL: &str = "http://localhost:5181";
pub const DEFAULT_EXTENSION_API_PATH: &str = "/v1/process";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the simulator listens and which extension endpoint it calls.
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// Listening port.
    pub port: u16,
    /// Base URL of the extension under test.
    pub extension_api_base_url: Url,
    /// Path of the processing endpoint, resolved against the base URL.
    pub extension_api_path: String,
    /// Request timeout in seconds for extension calls.
    pub timeout_secs: u64,
}

impl SimulatorConfig {
    /// Configuration pointing at an arbitrary extension base URL, with
    /// default path and timeout.
    pub fn for_extension(base_url: Url) -> Self {
        Self {
            port: DEFAULT_PORT,
            extension_api_base_url: base_url,
            extension_api_path: DEFAULT_EXTENSION_API_PATH.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `PORT` (default: 5000)
    /// - `EXTENSION_API_BASE_URL` (default: `http://localhost:5181`)
    /// - `EXTENSION_API_PATH` (default: `/v1/process`)
    /// - `EXTENSION_API_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            port: env_number(&lookup, "PORT", DEFAULT_PORT)?,
            extension_api_base_url: env_url(
                &lookup,
                "EXTENSION_API_BASE_URL",
                DEFAULT_EXTENSION_API_BASE_URL,
            )?,
            extension_api_path: lookup("EXTENSION_API_PATH")
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_EXTENSION_API_PATH.to_string()),
            timeout_secs: env_number(&lookup, "EXTENSION_API_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
        };
        config.process_url()?;
        Ok(config)
    }

    /// Full URL of the extension processing endpoint.
    pub fn process_url(&self) -> Result<Url, ConfigError> {
        self.extension_api_base_url
            .join(&self.extension_api_path)
            .map_err(|e| ConfigError::InvalidUrl("EXTENSION_API_PATH".to_string(), e.to_string()))
    }
}

fn env_url<F>(lookup: &F, var: &str, default: &str) -> Result<Url, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(var).unwrap_or_else(|| default.to_string());
    let url = Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl(
            var.to_string(),
            "URL cannot be used as a base".to_string(),
        ));
    }
    Ok(url)
}

fn env_number<F, T>(lookup: &F, var: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidNumber(var.to_string(), e.to_string())),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("invalid number for {0}: {1}")]
    InvalidNumber(String, String),
}
