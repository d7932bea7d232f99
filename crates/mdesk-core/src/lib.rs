//! # mdesk-core — Foundational Types for the Motordesk Stack
//!
//! Defines the type-system primitives shared by every other crate in the
//! workspace. Every other crate depends on `mdesk-core`; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for natural keys.** `OrganizationNumber`,
//!    `NationalId`, `RegistrationNumber` — all newtypes with validated
//!    constructors. No bare strings for registry search keys.
//!
//! 2. **Single discriminant enums.** `CustomerType`, `PaymentMethod`,
//!    `TradeIn`, `CreditMarking` each have exactly one definition, and every
//!    `match` on them is exhaustive. A form screen, a dependency rule, and a
//!    payload body can never disagree about the set of legal values.
//!
//! 3. **UI strings stay at the edge.** Discriminants parse from the exact
//!    strings the form controls produce (`"Private Individual"`, `"Yes"`)
//!    and serialize to the exact strings the backend stores. Everything in
//!    between works with the typed value.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `mdesk-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize` where they travel on the wire.

pub mod domain;
pub mod error;
pub mod identity;

pub use domain::{AgreementKind, CreditMarking, CustomerType, PaymentMethod, TradeIn};
pub use error::CoreError;
pub use identity::{AgreementId, NationalId, OrganizationNumber, RegistrationNumber};
