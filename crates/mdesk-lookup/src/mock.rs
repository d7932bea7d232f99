//! # Mock Registries
//!
//! Deterministic in-memory registries satisfying the lookup ports.
//! Records and failures are scripted per key at construction; every
//! search is counted so tests can assert call behavior (e.g., that an
//! immediate retry really issues a second search).

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use mdesk_core::{NationalId, OrganizationNumber, RegistrationNumber};

use crate::error::LookupError;
use crate::ports::{OrganizationRegistry, PersonRegistry, VehicleRegistry};
use crate::records::{OrganizationRecord, PersonRecord, VehicleRecord};

/// Scripted organization registry.
#[derive(Debug, Default)]
pub struct MockOrganizationRegistry {
    records: HashMap<String, OrganizationRecord>,
    failures: HashMap<String, LookupError>,
    calls: AtomicUsize,
}

impl MockOrganizationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful result, keyed by the record's own number.
    pub fn with_record(mut self, record: OrganizationRecord) -> Self {
        self.records
            .insert(record.organization_number.clone(), record);
        self
    }

    /// Script a failure for a specific key.
    pub fn with_failure(mut self, key: &str, error: LookupError) -> Self {
        self.failures.insert(key.to_string(), error);
        self
    }

    /// Number of searches issued so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OrganizationRegistry for MockOrganizationRegistry {
    async fn search_organization(
        &self,
        number: &OrganizationNumber,
    ) -> Result<OrganizationRecord, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.failures.get(number.as_str()) {
            return Err(err.clone());
        }
        self.records
            .get(number.as_str())
            .cloned()
            .ok_or(LookupError::NotFound)
    }
}

/// Scripted person registry.
#[derive(Debug, Default)]
pub struct MockPersonRegistry {
    records: HashMap<String, PersonRecord>,
    failures: HashMap<String, LookupError>,
    calls: AtomicUsize,
}

impl MockPersonRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful result, keyed by the record's own national id.
    pub fn with_record(mut self, record: PersonRecord) -> Self {
        self.records.insert(record.national_id.clone(), record);
        self
    }

    /// Script a failure for a specific key.
    pub fn with_failure(mut self, key: &str, error: LookupError) -> Self {
        self.failures.insert(key.to_string(), error);
        self
    }

    /// Number of searches issued so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PersonRegistry for MockPersonRegistry {
    async fn search_person(&self, id: &NationalId) -> Result<PersonRecord, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.failures.get(id.as_str()) {
            return Err(err.clone());
        }
        self.records
            .get(id.as_str())
            .cloned()
            .ok_or(LookupError::NotFound)
    }
}

/// Scripted vehicle registry.
#[derive(Debug, Default)]
pub struct MockVehicleRegistry {
    records: HashMap<String, VehicleRecord>,
    failures: HashMap<String, LookupError>,
    calls: AtomicUsize,
}

impl MockVehicleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful result, keyed by the record's own registration.
    pub fn with_record(mut self, record: VehicleRecord) -> Self {
        self.records
            .insert(record.registration_number.clone(), record);
        self
    }

    /// Script a failure for a specific key.
    pub fn with_failure(mut self, key: &str, error: LookupError) -> Self {
        self.failures.insert(key.to_string(), error);
        self
    }

    /// Number of searches issued so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VehicleRegistry for MockVehicleRegistry {
    async fn search_vehicle(
        &self,
        registration: &RegistrationNumber,
    ) -> Result<VehicleRecord, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.failures.get(registration.as_str()) {
            return Err(err.clone());
        }
        self.records
            .get(registration.as_str())
            .cloned()
            .ok_or(LookupError::NotFound)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
