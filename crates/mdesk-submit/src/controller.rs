//! # Submission Controller
//!
//! The per-attempt state machine of every agreement form:
//!
//! ```text
//! Idle ──submit()──▶ Validating ──(violations)──▶ Idle   (no network call)
//!                        │
//!                        ▼
//!                    Submitting ──(success)──▶ Idle      (navigate away)
//!                        │
//!                        └──(failure)──▶ Idle            (message, form intact)
//! ```
//!
//! Transitions are user-triggered only: no automatic retry, no
//! timeout-based cancellation. A second submit while one is in flight is
//! ignored via an atomic guard — exactly one network request per user
//! intent. Results that arrive after [`SubmissionController::close`] are
//! discarded without mutating anything.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Mutex;

use mdesk_assemble::assemble;
use mdesk_core::{AgreementId, AgreementKind};
use mdesk_form::{FormModel, Violation};
use mdesk_lookup::LookupSlots;

use crate::service::{AgreementService, DraftMode, ServiceError};

/// Message shown when a submission fails for a reason the user cannot
/// act on (assembly defect, unreadable response).
const GENERIC_FAILURE: &str = "The agreement could not be saved. Please try again.";

// ─── State ───────────────────────────────────────────────────────────

/// Where the controller currently is in the submission lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    /// Nothing in progress.
    Idle,
    /// Running the validity gate.
    Validating,
    /// A network request is in flight.
    Submitting,
}

impl SubmissionState {
    fn from_u8(v: u8) -> Self {
        match v {
            1 => Self::Validating,
            2 => Self::Submitting,
            _ => Self::Idle,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Validating => 1,
            Self::Submitting => 2,
        }
    }
}

impl std::fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Idle => "IDLE",
            Self::Validating => "VALIDATING",
            Self::Submitting => "SUBMITTING",
        };
        f.write_str(s)
    }
}

/// The result of one submit attempt, as the view layer consumes it.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The validity gate refused; no network call was made. Per-field
    /// violations are included for inline rendering.
    Invalid(Vec<Violation>),
    /// Draft stored; the caller navigates to the list view.
    Saved { agreement_id: AgreementId },
    /// Agreement stored and the signing flow initiated; the caller
    /// redirects to `signing_url`.
    SignInitiated {
        agreement_id: AgreementId,
        signing_url: String,
    },
    /// The backend rejected the payload or the request failed. All
    /// entered values are preserved for correction.
    Failure { message: String },
    /// Another submission was already in flight; this one was ignored.
    InFlight,
    /// The owning view closed; the result was discarded unapplied.
    Discarded,
}

#[derive(Debug, Clone, Copy)]
enum Variant {
    Draft,
    Sign,
}

// ─── Controller ──────────────────────────────────────────────────────

/// Drives submissions for one form instance against one agreement family.
///
/// The controller is shared (`&self`) because the view layer may trigger
/// a second submit while the first awaits the network; the atomic
/// `in_flight` guard turns that into a no-op instead of a duplicate
/// request.
#[derive(Debug)]
pub struct SubmissionController<S: AgreementService> {
    kind: AgreementKind,
    service: S,
    mode: Mutex<DraftMode>,
    state: AtomicU8,
    in_flight: AtomicBool,
    submitting: AtomicBool,
    submitting_and_signing: AtomicBool,
    closed: AtomicBool,
}

impl<S: AgreementService> SubmissionController<S> {
    /// A controller for a new (unsaved) agreement.
    pub fn new(kind: AgreementKind, service: S) -> Self {
        Self::with_mode(kind, service, DraftMode::Create)
    }

    /// A controller in an explicit edit mode (e.g., editing a stored
    /// agreement loaded from the list view).
    pub fn with_mode(kind: AgreementKind, service: S, mode: DraftMode) -> Self {
        Self {
            kind,
            service,
            mode: Mutex::new(mode),
            state: AtomicU8::new(SubmissionState::Idle.as_u8()),
            in_flight: AtomicBool::new(false),
            submitting: AtomicBool::new(false),
            submitting_and_signing: AtomicBool::new(false),
            closed: AtomicBool::new(false),
        }
    }

    /// Save the form as a draft.
    pub async fn submit(&self, model: &FormModel, slots: &LookupSlots) -> SubmitOutcome {
        self.run(model, slots, Variant::Draft).await
    }

    /// Save the form and initiate the e-signature flow.
    pub async fn submit_and_sign(&self, model: &FormModel, slots: &LookupSlots) -> SubmitOutcome {
        self.run(model, slots, Variant::Sign).await
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SubmissionState {
        SubmissionState::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// Busy flag for the save-draft trigger.
    pub fn submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    /// Busy flag for the save-and-sign trigger.
    pub fn submitting_and_signing(&self) -> bool {
        self.submitting_and_signing.load(Ordering::SeqCst)
    }

    /// The current edit-mode flag. Flips from `Create` to `Update` after
    /// the first successful draft save.
    pub fn mode(&self) -> DraftMode {
        self.lock_mode().clone()
    }

    /// Signal that the owning view is being destroyed. In-flight results
    /// arriving after this are discarded without touching any state.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    /// Whether the owning view has closed.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    async fn run(&self, model: &FormModel, slots: &LookupSlots, variant: Variant) -> SubmitOutcome {
        if self.is_closed() {
            return SubmitOutcome::Discarded;
        }
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!(form = model.registry().form_name(), "submit ignored: already in flight");
            return SubmitOutcome::InFlight;
        }

        self.set_state(SubmissionState::Validating);
        let violations = model.validate();
        if !violations.is_empty() {
            tracing::info!(
                form = model.registry().form_name(),
                violations = violations.len(),
                "submission refused by validity gate"
            );
            self.finish(variant);
            return SubmitOutcome::Invalid(violations);
        }

        let payload = match assemble(self.kind, &model.snapshot(), slots) {
            Ok(payload) => payload,
            Err(e) => {
                // Unreachable over a validated snapshot; reaching it means
                // the form configuration and the assembler disagree.
                tracing::error!(error = %e, "payload assembly failed after the validity gate");
                self.finish(variant);
                return SubmitOutcome::Failure {
                    message: GENERIC_FAILURE.to_string(),
                };
            }
        };

        self.set_state(SubmissionState::Submitting);
        let flag = match variant {
            Variant::Draft => &self.submitting,
            Variant::Sign => &self.submitting_and_signing,
        };
        flag.store(true, Ordering::SeqCst);

        let outcome = match variant {
            Variant::Draft => {
                let mode = self.mode();
                self.service
                    .save_draft(&mode, &payload)
                    .await
                    .map(|saved| SubmitOutcome::Saved {
                        agreement_id: saved.agreement_id,
                    })
            }
            Variant::Sign => {
                self.service
                    .save_and_sign(&payload)
                    .await
                    .map(|handoff| SubmitOutcome::SignInitiated {
                        agreement_id: handoff.agreement_id,
                        signing_url: handoff.signing_url,
                    })
            }
        };

        self.finish(variant);
        if self.is_closed() {
            tracing::info!("submission result discarded: view closed while in flight");
            return SubmitOutcome::Discarded;
        }

        match outcome {
            Ok(success) => {
                if let SubmitOutcome::Saved { agreement_id } = &success {
                    let mut mode = self.lock_mode();
                    if *mode == DraftMode::Create {
                        *mode = DraftMode::Update(agreement_id.clone());
                    }
                }
                tracing::info!(kind = %self.kind, "submission succeeded");
                success
            }
            Err(err) => {
                tracing::warn!(kind = %self.kind, error = %err, "submission failed; form preserved");
                let message = match err {
                    ServiceError::Rejected { message } => message,
                    ServiceError::Transport(_) => GENERIC_FAILURE.to_string(),
                };
                SubmitOutcome::Failure { message }
            }
        }
    }

    fn set_state(&self, next: SubmissionState) {
        self.state.store(next.as_u8(), Ordering::SeqCst);
    }

    fn finish(&self, variant: Variant) {
        match variant {
            Variant::Draft => self.submitting.store(false, Ordering::SeqCst),
            Variant::Sign => self.submitting_and_signing.store(false, Ordering::SeqCst),
        }
        self.set_state(SubmissionState::Idle);
        self.in_flight.store(false, Ordering::SeqCst);
    }

    fn lock_mode(&self) -> std::sync::MutexGuard<'_, DraftMode> {
        self.mode.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
