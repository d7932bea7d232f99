//! # mdesk-lookup — External Registry Lookup Ports
//!
//! The three read-only search capabilities the form screens consume:
//!
//! - organization registry, keyed by organization number;
//! - person registry, keyed by national id;
//! - vehicle registry, keyed by registration number.
//!
//! Each is a single request/response operation behind an async trait.
//! There is no retry, no backoff, and no caching here: a failure surfaces
//! immediately, the form stays editable, and the user may search again
//! at once. Successful results are patched into the field registry
//! (`patch.rs`) and held in the form's [`LookupSlots`] until reset,
//! re-search, or navigation away — the core never persists them.
//!
//! In-memory mock registries with scriptable outcomes live in
//! [`mock`] for tests in this and downstream crates.

pub mod error;
pub mod mock;
pub mod patch;
pub mod ports;
pub mod records;

pub use error::LookupError;
pub use patch::{patch_organization, patch_person, patch_vehicle};
pub use ports::{OrganizationRegistry, PersonRegistry, VehicleRegistry};
pub use records::{CustomerLookup, LookupSlots, OrganizationRecord, PersonRecord, VehicleRecord};
