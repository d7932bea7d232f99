//! # Client Errors
//!
//! Tagged failures of back-office API calls. These never cross the port
//! boundaries as-is: the adapter impls in `agreements.rs` and
//! `registry.rs` convert them to `ServiceError` / `LookupError` so the
//! controller and form layers only ever see their own taxonomies.

use thiserror::Error;

use crate::config::ConfigError;

/// Failure of one back-office API request.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Client construction or configuration failure.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The request never completed (connect, timeout, TLS).
    #[error("http error on {endpoint}: {source}")]
    Http {
        /// Which operation failed (e.g., `POST /agreements/sales`).
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a non-2xx status.
    #[error("api error on {endpoint}: status {status}: {body}")]
    Api {
        endpoint: String,
        status: u16,
        /// Raw response body, for diagnostics.
        body: String,
    },

    /// The backend answered 2xx with `success: false`.
    #[error("request refused on {endpoint}: {message}")]
    Refused {
        endpoint: String,
        /// The backend's message, surfaced to the user.
        message: String,
    },

    /// The response body could not be parsed into the expected shape.
    #[error("malformed response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// A successful envelope arrived without its `data` member.
    #[error("response from {endpoint} carried no data")]
    MissingData { endpoint: String },
}

impl ApiError {
    /// Whether the failure is a not-found style miss (used by the lookup
    /// adapters to distinguish "no record" from transport trouble).
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }
}
