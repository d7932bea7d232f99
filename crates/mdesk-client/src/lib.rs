//! # mdesk-client — Typed HTTP Client for the Back-Office API
//!
//! Ergonomic, typed access to the agreement backend:
//!
//! - **Agreements** (`agreements.rs`): list with pagination/filtering,
//!   create/update drafts, create-and-sign. Implements the
//!   `mdesk-submit` service port.
//! - **Registry search** (`registry.rs`): organization, person, and
//!   vehicle lookup by natural key. Implements the three `mdesk-lookup`
//!   ports.
//! - **Media** (`media.rs`): multipart document upload attached to a
//!   stored agreement.
//!
//! ## Response Policy
//!
//! Every backend response travels in the `{success, data, message}`
//! envelope. `success: false` and non-2xx statuses become tagged
//! [`ApiError`]s; malformed bodies become decode errors that are logged
//! and surfaced as a generic failure. Nothing here retries — a failed
//! request is reported once and the user decides.

pub mod agreements;
pub mod config;
pub mod envelope;
pub mod error;
pub mod media;
pub mod registry;

pub use agreements::{AgreementClient, AgreementPage, AgreementSummary, ListAgreementsQuery};
pub use config::{BackOfficeConfig, ConfigError};
pub use envelope::{ApiEnvelope, ListEnvelope};
pub use error::ApiError;
pub use media::{MediaClient, UploadedMedia};
pub use registry::RegistryClient;

use std::time::Duration;

/// Top-level back-office API client. Holds sub-clients for each concern.
#[derive(Debug, Clone)]
pub struct BackOfficeClient {
    agreements: agreements::AgreementClient,
    registry: registry::RegistryClient,
    media: media::MediaClient,
}

impl BackOfficeClient {
    /// Create a client from configuration.
    pub fn new(config: BackOfficeConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::AUTHORIZATION,
                    reqwest::header::HeaderValue::from_str(&format!(
                        "Bearer {}",
                        config.api_token
                    ))
                    .map_err(|_| ApiError::Config(ConfigError::InvalidToken))?,
                );
                headers
            })
            .build()
            .map_err(|e| ApiError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            agreements: agreements::AgreementClient::new(http.clone(), config.base_url.clone()),
            registry: registry::RegistryClient::new(http.clone(), config.base_url.clone()),
            media: media::MediaClient::new(http, config.base_url),
        })
    }

    /// Access the agreements client.
    pub fn agreements(&self) -> &agreements::AgreementClient {
        &self.agreements
    }

    /// Access the registry-search client.
    pub fn registry(&self) -> &registry::RegistryClient {
        &self.registry
    }

    /// Access the media-upload client.
    pub fn media(&self) -> &media::MediaClient {
        &self.media
    }
}
