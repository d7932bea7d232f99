//! # Error Types — Shared Error Roots
//!
//! Defines the errors produced by the foundational types. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! Higher layers define their own error enums (`FormError`, `LookupError`,
//! `ApiError`, ...) and convert into tagged results at their boundaries;
//! nothing in this workspace propagates an unchecked panic across a crate
//! seam.

use thiserror::Error;

/// Errors from identifier construction and discriminant parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The string does not have the NNNNNN-NNNN organization number shape.
    #[error("invalid organization number: {0:?}")]
    InvalidOrganizationNumber(String),

    /// The string does not have a personal identity number shape.
    #[error("invalid national id: {0:?}")]
    InvalidNationalId(String),

    /// The string is not a recognizable vehicle registration number.
    #[error("invalid registration number: {0:?}")]
    InvalidRegistrationNumber(String),

    /// The backend agreement identifier was empty.
    #[error("empty agreement id")]
    EmptyAgreementId,

    /// A discriminant string did not match any known value.
    #[error("unrecognized {what}: {value:?}")]
    UnrecognizedDiscriminant {
        /// Which discriminant was being parsed (e.g., "customer type").
        what: &'static str,
        /// The offending input.
        value: String,
    },
}
