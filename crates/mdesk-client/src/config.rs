//! Back-office API client configuration.
//!
//! One base URL for the whole backend; override via environment
//! variables or explicit construction for staging/testing.

use url::Url;

/// Configuration for connecting to the back-office API.
///
/// Custom `Debug` implementation redacts the `api_token` field
/// to prevent credential leakage in log output.
#[derive(Clone)]
pub struct BackOfficeConfig {
    /// Base URL of the back-office API.
    pub base_url: Url,
    /// Bearer token for API authentication.
    pub api_token: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for BackOfficeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackOfficeConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl BackOfficeConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `MDESK_API_URL` (required)
    /// - `MDESK_API_TOKEN` (required)
    /// - `MDESK_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_url = std::env::var("MDESK_API_URL").map_err(|_| ConfigError::MissingUrl)?;
        let base_url = Url::parse(&raw_url)
            .map_err(|e| ConfigError::InvalidUrl("MDESK_API_URL".to_string(), e.to_string()))?;
        let api_token = std::env::var("MDESK_API_TOKEN").map_err(|_| ConfigError::MissingToken)?;

        Ok(Self {
            base_url,
            api_token,
            timeout_secs: std::env::var("MDESK_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        })
    }

    /// A configuration pointing at an explicit URL (tests, staging).
    pub fn for_url(base_url: Url, token: &str) -> Self {
        Self {
            base_url,
            api_token: token.to_string(),
            timeout_secs: 5,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("MDESK_API_URL environment variable is required")]
    MissingUrl,
    #[error("MDESK_API_TOKEN environment variable is required")]
    MissingToken,
    #[error("the API token is not a valid header value")]
    InvalidToken,
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}
