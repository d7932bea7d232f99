//! # Agreement Service Port
//!
//! The abstract interface to the external agreement backend. The HTTP
//! adapter in `mdesk-client` and in-test stubs are interchangeable here.
//!
//! Both operations take the same assembled body; they differ only in the
//! endpoint that receives it and in what the response carries.

use async_trait::async_trait;
use thiserror::Error;

use mdesk_assemble::AgreementPayload;
use mdesk_core::AgreementId;

/// Whether save-draft creates a new agreement or updates an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftMode {
    /// First save of this form instance.
    Create,
    /// The form is editing an already-stored agreement.
    Update(AgreementId),
}

/// Successful draft save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedAgreement {
    /// The stored agreement's identifier (new or unchanged).
    pub agreement_id: AgreementId,
}

/// Successful create-and-sign. The caller redirects the user to
/// `signing_url` — the signing flow itself is an external collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningHandoff {
    pub agreement_id: AgreementId,
    /// Redirect target for the e-signature flow.
    pub signing_url: String,
}

/// Tagged failure of a submission. Never a panic, never an unchecked
/// exception — the adapter converts whatever the backend did into one of
/// these before it reaches the controller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The backend refused the payload (validation, permissions, state).
    #[error("agreement rejected: {message}")]
    Rejected {
        /// The backend's message, surfaced to the user as-is.
        message: String,
    },

    /// The request never completed, or the response could not be read.
    #[error("agreement service transport error: {0}")]
    Transport(String),
}

/// The external agreement backend, reduced to the two operations every
/// agreement form performs.
#[async_trait]
pub trait AgreementService: Send + Sync {
    /// Create or update a draft, per `mode`.
    async fn save_draft(
        &self,
        mode: &DraftMode,
        payload: &AgreementPayload,
    ) -> Result<SavedAgreement, ServiceError>;

    /// Store the agreement and initiate the e-signature flow.
    async fn save_and_sign(
        &self,
        payload: &AgreementPayload,
    ) -> Result<SigningHandoff, ServiceError>;
}
