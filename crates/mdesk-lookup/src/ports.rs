//! # Lookup Ports
//!
//! The abstract interfaces for the three external registries. The HTTP
//! adapters in `mdesk-client` and the in-memory mocks in [`crate::mock`]
//! are interchangeable at these seams.
//!
//! The traits require `Send + Sync` so a form screen can hold its
//! registries behind shared references while searches are in flight.

use async_trait::async_trait;

use mdesk_core::{NationalId, OrganizationNumber, RegistrationNumber};

use crate::error::LookupError;
use crate::records::{OrganizationRecord, PersonRecord, VehicleRecord};

/// Read-only search against the organization registry.
#[async_trait]
pub trait OrganizationRegistry: Send + Sync {
    /// Look up an organization by its organization number.
    async fn search_organization(
        &self,
        number: &OrganizationNumber,
    ) -> Result<OrganizationRecord, LookupError>;
}

/// Read-only search against the person registry.
#[async_trait]
pub trait PersonRegistry: Send + Sync {
    /// Look up a person by national id.
    async fn search_person(&self, id: &NationalId) -> Result<PersonRecord, LookupError>;
}

/// Read-only search against the vehicle registry.
#[async_trait]
pub trait VehicleRegistry: Send + Sync {
    /// Look up a vehicle by registration number.
    async fn search_vehicle(
        &self,
        registration: &RegistrationNumber,
    ) -> Result<VehicleRecord, LookupError>;
}
