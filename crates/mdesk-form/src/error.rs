//! # Form Configuration Errors
//!
//! Errors in this module are configuration errors: a form declared an
//! unknown field, declared the same key twice, or wired a rule table
//! incorrectly. They surface at form construction and are caught by
//! tests — a running form never produces them from user input.
//!
//! Validation failures are NOT errors; they are queryable [`Violation`]
//! state on the registry.
//!
//! [`Violation`]: crate::validate::Violation

use thiserror::Error;

/// Configuration errors raised at form construction time.
#[derive(Error, Debug)]
pub enum FormError {
    /// A field key was referenced that no field declares.
    #[error("unknown field: {key:?}")]
    UnknownField {
        /// The undeclared key.
        key: String,
    },

    /// The same field key was declared twice in one definition.
    #[error("duplicate field declaration: {key:?}")]
    DuplicateField {
        /// The doubly-declared key.
        key: String,
    },

    /// Two dependency rules share one trigger field.
    ///
    /// A trigger has exactly one rule so that branch bookkeeping (what the
    /// previous branch required and overrode) has a single owner.
    #[error("duplicate dependency rule for trigger {trigger:?}")]
    DuplicateTrigger {
        /// The doubly-ruled trigger key.
        trigger: String,
    },

    /// A pattern validator's regular expression failed to compile.
    #[error("invalid pattern for field {field:?}: {source}")]
    InvalidPattern {
        /// The field the pattern was declared on.
        field: String,
        /// The regex compilation failure.
        #[source]
        source: regex::Error,
    },
}
