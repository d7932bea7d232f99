//! Typed client for the registry search endpoints.
//!
//! | Method | Path (relative to base)        | Operation |
//! |--------|--------------------------------|-----------|
//! | GET    | `/api/v1/search/organization`  | Organization by org number |
//! | GET    | `/api/v1/search/person`        | Person by national id |
//! | GET    | `/api/v1/search/vehicle`       | Vehicle by registration number |
//!
//! Implements the three `mdesk-lookup` ports. A 404 or a
//! `success: false` envelope maps to [`LookupError::NotFound`];
//! everything else maps to [`LookupError::Transport`]. No retries —
//! the user may search again immediately.

use async_trait::async_trait;

use mdesk_core::{NationalId, OrganizationNumber, RegistrationNumber};
use mdesk_lookup::{
    LookupError, OrganizationRecord, OrganizationRegistry, PersonRecord, PersonRegistry,
    VehicleRecord, VehicleRegistry,
};

use crate::envelope::ApiEnvelope;
use crate::error::ApiError;

/// API version path segment.
const API_PREFIX: &str = "api/v1";

/// Client for the registry search endpoints.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    http: reqwest::Client,
    base_url: url::Url,
}

impl RegistryClient {
    pub(crate) fn new(http: reqwest::Client, base_url: url::Url) -> Self {
        Self { http, base_url }
    }

    async fn search<T: serde::de::DeserializeOwned>(
        &self,
        resource: &str,
        param: (&str, &str),
    ) -> Result<T, ApiError> {
        let endpoint = format!("GET /search/{resource}");
        let url = format!("{}{}/search/{resource}", self.base_url, API_PREFIX);

        let resp = self
            .http
            .get(&url)
            .query(&[param])
            .send()
            .await
            .map_err(|e| ApiError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                endpoint,
                status,
                body,
            });
        }

        let envelope: ApiEnvelope<T> = resp.json().await.map_err(|e| {
            tracing::error!(endpoint = %endpoint, error = %e, "malformed search response");
            ApiError::Decode {
                endpoint: endpoint.clone(),
                source: e,
            }
        })?;
        envelope.into_result(&endpoint)
    }
}

/// Map an [`ApiError`] into the lookup taxonomy. `NotFound` covers both
/// an explicit 404 and the `success: false` miss envelope.
fn lookup_error(err: ApiError) -> LookupError {
    match err {
        ApiError::Refused { .. } => LookupError::NotFound,
        e if e.is_not_found() => LookupError::NotFound,
        other => {
            tracing::warn!(error = %other, "registry search failed");
            LookupError::Transport(other.to_string())
        }
    }
}

#[async_trait]
impl OrganizationRegistry for RegistryClient {
    async fn search_organization(
        &self,
        number: &OrganizationNumber,
    ) -> Result<OrganizationRecord, LookupError> {
        self.search("organization", ("organization_number", number.as_str()))
            .await
            .map_err(lookup_error)
    }
}

#[async_trait]
impl PersonRegistry for RegistryClient {
    async fn search_person(&self, id: &NationalId) -> Result<PersonRecord, LookupError> {
        self.search("person", ("national_id", id.as_str()))
            .await
            .map_err(lookup_error)
    }
}

#[async_trait]
impl VehicleRegistry for RegistryClient {
    async fn search_vehicle(
        &self,
        registration: &RegistrationNumber,
    ) -> Result<VehicleRecord, LookupError> {
        self.search("vehicle", ("registration_number", registration.as_str()))
            .await
            .map_err(lookup_error)
    }
}
