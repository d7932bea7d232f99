//! # mdesk-submit — Submission Control
//!
//! The interaction-control layer between the form model and the external
//! agreement service:
//!
//! - **Submission controller** (`controller.rs`): the per-attempt state
//!   machine `Idle → Validating → Submitting → Idle`, with the one
//!   concurrency-adjacent guarantee this system makes — a second submit
//!   while one is in flight is ignored, so exactly one network request is
//!   issued per user intent.
//!
//! - **Agreement service port** (`service.rs`): the two request variants
//!   every agreement form has — save-draft (create or update, per the
//!   edit-mode flag) and save-and-sign (same body, `/sign` endpoint,
//!   response carries the signing redirect).
//!
//! - **Busy flags** (`busy.rs`): per-operation in-flight markers
//!   (vehicle search, person search, list load) so the view layer can
//!   disable duplicate triggers while a request is out.
//!
//! - **Debouncer** (`debounce.rs`): collapses rapid list-search
//!   keystrokes into one request after a quiet period. The one explicit
//!   backpressure mechanism in the system.
//!
//! ## Error Policy
//!
//! Nothing here retries automatically, and nothing clears the form: a
//! rejected or failed submission surfaces its message and leaves every
//! entered value in place for correction. Results arriving after the
//! owning view closed are discarded without mutating anything.

pub mod busy;
pub mod controller;
pub mod debounce;
pub mod service;

pub use busy::{BusyFlag, BusyGuard};
pub use controller::{SubmissionController, SubmissionState, SubmitOutcome};
pub use debounce::Debouncer;
pub use service::{AgreementService, DraftMode, SavedAgreement, ServiceError, SigningHandoff};
