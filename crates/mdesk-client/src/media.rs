//! Typed client for document upload.
//!
//! One operation: attach a file to a stored agreement via multipart
//! upload. `POST {base_url}/api/v1/media/upload`.

use serde::Deserialize;

use mdesk_core::AgreementId;

use crate::envelope::ApiEnvelope;
use crate::error::ApiError;

/// API version path segment.
const API_PREFIX: &str = "api/v1";

/// One stored media item, as returned after upload.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadedMedia {
    #[serde(alias = "_id")]
    pub media_id: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
}

/// Client for the media endpoints.
#[derive(Debug, Clone)]
pub struct MediaClient {
    http: reqwest::Client,
    base_url: url::Url,
}

impl MediaClient {
    pub(crate) fn new(http: reqwest::Client, base_url: url::Url) -> Self {
        Self { http, base_url }
    }

    /// Upload a document and attach it to the given agreement.
    pub async fn upload(
        &self,
        agreement_id: &AgreementId,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Vec<UploadedMedia>, ApiError> {
        let endpoint = "POST /media/upload";
        let url = format!("{}{}/media/upload", self.base_url, API_PREFIX);

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new()
            .text("agreement_id", agreement_id.as_str().to_string())
            .part("file", part);

        let resp = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                endpoint: endpoint.into(),
                status,
                body,
            });
        }

        let envelope: ApiEnvelope<Vec<UploadedMedia>> =
            resp.json().await.map_err(|e| {
                tracing::error!(endpoint, error = %e, "malformed upload response");
                ApiError::Decode {
                    endpoint: endpoint.to_string(),
                    source: e,
                }
            })?;
        envelope.into_result(endpoint)
    }
}
