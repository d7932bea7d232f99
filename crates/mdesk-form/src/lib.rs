//! # mdesk-form — Form Model with Dependent Field Groups
//!
//! Implements the conditional-validation engine shared by every agreement
//! screen in the back office. Each form instance is built from the same
//! three composable pieces:
//!
//! - **Field Registry** (`registry.rs`): the authoritative value/validity/
//!   enabled state for every declared field, built from a `FormDefinition`.
//!
//! - **Dependency Rule Set** (`rules.rs`): a declarative table mapping a
//!   trigger field's value to an `Effect` that promotes, demotes, and
//!   overrides dependent fields. One dispatcher function evaluates it —
//!   no observable streams, no UI framework.
//!
//! - **Form Model** (`model.rs`): the facade that owns both and keeps them
//!   consistent. `set_field` applies a value and fires the affected rule
//!   synchronously; `patch` applies several values and fires rules in
//!   field-declaration order. Callers never observe a mid-transition
//!   registry.
//!
//! The stock definitions for the six back-office screens (four agreement
//! types plus customer and corporation records) live in `catalog.rs`.
//!
//! ## Invariants
//!
//! - Applying a branch's effect is idempotent.
//! - Exactly one branch is active per trigger value; switching branches
//!   fully undoes the previous branch before applying the new one.
//! - A disabled field always reports valid, but its value still appears in
//!   snapshots unless a rule cleared it.
//! - A trigger value matching no branch (and no else-branch) leaves the
//!   registry unchanged. This mirrors the permissiveness of the source
//!   forms and is covered by tests rather than "fixed".
//!
//! ## Crate Policy
//!
//! - Validation failures are queryable per-field state, never errors.
//! - Configuration mistakes (unknown key, duplicate key, duplicate
//!   else-branch) fail at construction with `FormError`.
//! - No `unsafe`, no `panic!()`/`.unwrap()` outside tests.

pub mod catalog;
pub mod error;
pub mod model;
pub mod registry;
pub mod rules;
pub mod validate;

pub use error::FormError;
pub use model::FormModel;
pub use registry::{FieldDef, FieldRegistry, FieldSpec, FormDefinition, Snapshot};
pub use rules::{DependencyRule, Effect, Override, RuleSet};
pub use validate::{Rule, RuleKind, Violation};
