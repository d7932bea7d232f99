//! # Assembly Errors
//!
//! Over a validated snapshot the assembler is total; these arms exist so
//! that a bypassed validity gate surfaces as a typed defect instead of a
//! panic.

use thiserror::Error;

use mdesk_core::CoreError;

/// Failure to assemble a payload from a snapshot.
#[derive(Error, Debug)]
pub enum AssembleError {
    /// A field that must be coerced to a number does not parse as one.
    #[error("field {field:?} is not numeric: {value:?}")]
    NonNumeric {
        /// The offending field key.
        field: String,
        /// The value that failed to parse.
        value: String,
    },

    /// A discriminant field holds a value no branch recognizes.
    #[error(transparent)]
    Discriminant(#[from] CoreError),
}
