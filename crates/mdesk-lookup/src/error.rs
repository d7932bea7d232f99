//! # Lookup Errors
//!
//! The tagged failure modes of a registry search. These are surfaced as a
//! transient user-facing message — never as a panic, and never by mutating
//! form state.

use thiserror::Error;

/// Failure of a single registry search.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The registry has no record for the given key.
    #[error("no record found")]
    NotFound,

    /// The search could not be completed (network, timeout, malformed
    /// response). The search is not assumed safe to repeat silently —
    /// retrying is the user's call.
    #[error("lookup transport error: {0}")]
    Transport(String),
}
