//! # Response Envelopes
//!
//! Every back-office response travels as `{success, data, message}`;
//! list endpoints add paging counters and optional stats. The helpers
//! here collapse an envelope into a `Result` so each endpoint method
//! handles exactly one shape.

use serde::Deserialize;

use crate::error::ApiError;

/// The standard single-object envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the envelope: `success: false` becomes [`ApiError::Refused`],
    /// a successful envelope without data becomes [`ApiError::MissingData`].
    pub fn into_result(self, endpoint: &str) -> Result<T, ApiError> {
        if !self.success {
            return Err(ApiError::Refused {
                endpoint: endpoint.to_string(),
                message: self
                    .message
                    .unwrap_or_else(|| "request failed".to_string()),
            });
        }
        self.data.ok_or_else(|| ApiError::MissingData {
            endpoint: endpoint.to_string(),
        })
    }
}

/// The list envelope: items plus paging counters and optional stats.
#[derive(Debug, Clone, Deserialize)]
pub struct ListEnvelope<T> {
    pub success: bool,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default, rename = "totalItems")]
    pub total_items: Option<u64>,
    #[serde(default, rename = "totalPages")]
    pub total_pages: Option<u32>,
    /// Aggregate counters some list views render (per-status totals etc.).
    #[serde(default)]
    pub stats: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_yields_data() {
        let env: ApiEnvelope<String> =
            serde_json::from_str(r#"{"success":true,"data":"x"}"#).unwrap();
        assert_eq!(env.into_result("GET /t").unwrap(), "x");
    }

    #[test]
    fn test_refused_envelope_carries_message() {
        let env: ApiEnvelope<String> =
            serde_json::from_str(r#"{"success":false,"message":"nope"}"#).unwrap();
        match env.into_result("GET /t") {
            Err(ApiError::Refused { message, .. }) => assert_eq!(message, "nope"),
            other => panic!("expected Refused, got {other:?}"),
        }
    }

    #[test]
    fn test_refused_envelope_without_message_gets_fallback() {
        let env: ApiEnvelope<String> = serde_json::from_str(r#"{"success":false}"#).unwrap();
        match env.into_result("GET /t") {
            Err(ApiError::Refused { message, .. }) => assert_eq!(message, "request failed"),
            other => panic!("expected Refused, got {other:?}"),
        }
    }

    #[test]
    fn test_successful_envelope_without_data_is_an_error() {
        let env: ApiEnvelope<String> = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(matches!(
            env.into_result("GET /t"),
            Err(ApiError::MissingData { .. })
        ));
    }

    #[test]
    fn test_list_envelope_defaults() {
        let env: ListEnvelope<String> = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(env.data.is_empty());
        assert_eq!(env.total_items, None);
    }
}
