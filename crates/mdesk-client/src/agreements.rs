//! Typed client for the agreement endpoints.
//!
//! | Method | Path (relative to base)          | Operation |
//! |--------|----------------------------------|-----------|
//! | GET    | `/api/v1/agreements`             | List with pagination/filters |
//! | POST   | `/api/v1/agreements/{kind}`      | Create draft |
//! | PUT    | `/api/v1/agreements/{kind}/{id}` | Update draft |
//! | POST   | `/api/v1/agreements/{kind}/sign` | Create and initiate signing |
//!
//! The create/update/sign methods take the assembled [`AgreementPayload`]
//! verbatim — draft and sign share one body shape, only the endpoint
//! differs. This client also implements the `mdesk-submit`
//! [`AgreementService`] port, converting [`ApiError`] into the
//! controller's [`ServiceError`] taxonomy at that boundary.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use mdesk_assemble::AgreementPayload;
use mdesk_core::{AgreementId, AgreementKind};
use mdesk_submit::{AgreementService, DraftMode, SavedAgreement, ServiceError, SigningHandoff};

use crate::envelope::{ApiEnvelope, ListEnvelope};
use crate::error::ApiError;

/// API version path segment.
const API_PREFIX: &str = "api/v1";

// ─── List types ──────────────────────────────────────────────────────

/// One row of the agreement list view.
///
/// Fields use `#[serde(default)]` for resilience against backend schema
/// evolution; `deny_unknown_fields` is intentionally NOT used.
#[derive(Debug, Clone, Deserialize)]
pub struct AgreementSummary {
    /// The stored agreement id (`_id` or `agreement_id` on the wire).
    #[serde(alias = "_id")]
    pub agreement_id: String,
    /// Agreement family label as the backend spells it. Kept as a string
    /// so a family added server-side does not break list decoding.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Query parameters for the agreement list.
#[derive(Debug, Clone)]
pub struct ListAgreementsQuery {
    pub page: u32,
    pub limit: u32,
    /// Free-text search (debounced by the caller).
    pub search_term: Option<String>,
    /// Status filter (`statusAdv` on the wire).
    pub status: Option<String>,
    /// Agreement family filter (`typeAdv` on the wire).
    pub kind: Option<AgreementKind>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
}

impl Default for ListAgreementsQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 25,
            search_term: None,
            status: None,
            kind: None,
            from_date: None,
            to_date: None,
        }
    }
}

impl ListAgreementsQuery {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(term) = &self.search_term {
            pairs.push(("searchTerm", term.clone()));
        }
        if let Some(status) = &self.status {
            pairs.push(("statusAdv", status.clone()));
        }
        if let Some(kind) = &self.kind {
            pairs.push(("typeAdv", kind.path_segment().to_string()));
        }
        if let Some(from) = &self.from_date {
            pairs.push(("fromDate", from.to_string()));
        }
        if let Some(to) = &self.to_date {
            pairs.push(("toDate", to.to_string()));
        }
        pairs
    }
}

/// One page of the agreement list, with totals and optional stats.
#[derive(Debug, Clone)]
pub struct AgreementPage {
    pub items: Vec<AgreementSummary>,
    pub total_items: u64,
    pub total_pages: u32,
    pub stats: Option<serde_json::Value>,
}

// ─── Response data shapes ────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct SavedAgreementData {
    #[serde(alias = "_id")]
    agreement_id: String,
}

#[derive(Debug, Deserialize)]
struct SignedAgreementData {
    #[serde(alias = "_id")]
    agreement_id: String,
    #[serde(alias = "redirect_url")]
    signing_url: String,
}

// ─── Client ──────────────────────────────────────────────────────────

/// Client for the agreement endpoints.
#[derive(Debug, Clone)]
pub struct AgreementClient {
    http: reqwest::Client,
    base_url: url::Url,
}

impl AgreementClient {
    pub(crate) fn new(http: reqwest::Client, base_url: url::Url) -> Self {
        Self { http, base_url }
    }

    /// List agreements with pagination and filters.
    ///
    /// Calls `GET {base_url}/api/v1/agreements`.
    pub async fn list(&self, query: &ListAgreementsQuery) -> Result<AgreementPage, ApiError> {
        let endpoint = "GET /agreements";
        let url = format!("{}{}/agreements", self.base_url, API_PREFIX);

        let resp = self
            .http
            .get(&url)
            .query(&query.query_pairs())
            .send()
            .await
            .map_err(|e| ApiError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;
        let envelope: ListEnvelope<AgreementSummary> =
            Self::decode(endpoint, resp).await?;

        if !envelope.success {
            return Err(ApiError::Refused {
                endpoint: endpoint.into(),
                message: envelope
                    .message
                    .unwrap_or_else(|| "request failed".to_string()),
            });
        }
        Ok(AgreementPage {
            items: envelope.data,
            total_items: envelope.total_items.unwrap_or(0),
            total_pages: envelope.total_pages.unwrap_or(0),
            stats: envelope.stats,
        })
    }

    /// Create a draft agreement.
    ///
    /// Calls `POST {base_url}/api/v1/agreements/{kind}`.
    pub async fn create(&self, payload: &AgreementPayload) -> Result<AgreementId, ApiError> {
        let kind = payload.kind();
        let endpoint = format!("POST /agreements/{kind}");
        let url = format!(
            "{}{}/agreements/{}",
            self.base_url,
            API_PREFIX,
            kind.path_segment()
        );
        let resp = self
            .http
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| ApiError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;
        let envelope: ApiEnvelope<SavedAgreementData> = Self::decode(&endpoint, resp).await?;
        let data = envelope.into_result(&endpoint)?;
        Self::agreement_id(&endpoint, data.agreement_id)
    }

    /// Update a stored draft agreement.
    ///
    /// Calls `PUT {base_url}/api/v1/agreements/{kind}/{id}`.
    pub async fn update(
        &self,
        id: &AgreementId,
        payload: &AgreementPayload,
    ) -> Result<AgreementId, ApiError> {
        let kind = payload.kind();
        let endpoint = format!("PUT /agreements/{kind}/{id}");
        let url = format!(
            "{}{}/agreements/{}/{}",
            self.base_url,
            API_PREFIX,
            kind.path_segment(),
            id.as_str()
        );
        let resp = self
            .http
            .put(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| ApiError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;
        let envelope: ApiEnvelope<SavedAgreementData> = Self::decode(&endpoint, resp).await?;
        let data = envelope.into_result(&endpoint)?;
        Self::agreement_id(&endpoint, data.agreement_id)
    }

    /// Create an agreement and initiate the e-signature flow.
    ///
    /// Calls `POST {base_url}/api/v1/agreements/{kind}/sign` with the same
    /// body as [`Self::create`]; the response additionally carries the
    /// signing redirect target.
    pub async fn create_and_sign(
        &self,
        payload: &AgreementPayload,
    ) -> Result<(AgreementId, String), ApiError> {
        let kind = payload.kind();
        let endpoint = format!("POST /agreements/{kind}/sign");
        let url = format!(
            "{}{}/agreements/{}/sign",
            self.base_url,
            API_PREFIX,
            kind.path_segment()
        );
        let resp = self
            .http
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| ApiError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;
        let envelope: ApiEnvelope<SignedAgreementData> = Self::decode(&endpoint, resp).await?;
        let data = envelope.into_result(&endpoint)?;
        let id = Self::agreement_id(&endpoint, data.agreement_id)?;
        Ok((id, data.signing_url))
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        endpoint: &str,
        resp: reqwest::Response,
    ) -> Result<T, ApiError> {
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                endpoint: endpoint.to_string(),
                status,
                body,
            });
        }
        resp.json().await.map_err(|e| {
            tracing::error!(endpoint, error = %e, "malformed response body");
            ApiError::Decode {
                endpoint: endpoint.to_string(),
                source: e,
            }
        })
    }

    fn agreement_id(endpoint: &str, raw: String) -> Result<AgreementId, ApiError> {
        AgreementId::new(raw).map_err(|_| ApiError::MissingData {
            endpoint: endpoint.to_string(),
        })
    }
}

// ─── Service port adapter ────────────────────────────────────────────

fn service_error(err: ApiError) -> ServiceError {
    match err {
        ApiError::Refused { message, .. } => ServiceError::Rejected { message },
        other => {
            tracing::warn!(error = %other, "agreement request failed");
            ServiceError::Transport(other.to_string())
        }
    }
}

#[async_trait]
impl AgreementService for AgreementClient {
    async fn save_draft(
        &self,
        mode: &DraftMode,
        payload: &AgreementPayload,
    ) -> Result<SavedAgreement, ServiceError> {
        let result = match mode {
            DraftMode::Create => self.create(payload).await,
            DraftMode::Update(id) => self.update(id, payload).await,
        };
        result
            .map(|agreement_id| SavedAgreement { agreement_id })
            .map_err(service_error)
    }

    async fn save_and_sign(
        &self,
        payload: &AgreementPayload,
    ) -> Result<SigningHandoff, ServiceError> {
        self.create_and_sign(payload)
            .await
            .map(|(agreement_id, signing_url)| SigningHandoff {
                agreement_id,
                signing_url,
            })
            .map_err(service_error)
    }
}
