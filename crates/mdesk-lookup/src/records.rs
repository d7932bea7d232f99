//! # Lookup Records
//!
//! The data a successful registry search returns. Shapes follow the
//! backend's wire names; everything beyond the natural key and primary
//! name uses `#[serde(default)]` for resilience against registry schema
//! evolution — `deny_unknown_fields` is intentionally NOT used.
//!
//! ## Lifecycle
//!
//! Created from a search response, held in the owning form's
//! [`LookupSlots`] until form reset, re-search, or navigation away, and
//! attached to the assembled payload under the documented nested keys.
//! Never persisted by this workspace.

use serde::{Deserialize, Serialize};

/// Organization registry record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationRecord {
    /// Organization number in NNNNNN-NNNN form.
    pub organization_number: String,
    /// Registered company name.
    pub corp_name: String,
    #[serde(default)]
    pub street_address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Person registry record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonRecord {
    /// National id in 10- or 12-digit form.
    pub national_id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub street_address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
}

/// Vehicle registry record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    /// Registration number in canonical (uppercased) form.
    pub registration_number: String,
    #[serde(default)]
    pub make: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub model_year: Option<u32>,
    /// Odometer reading in kilometres.
    #[serde(default)]
    pub mileage: Option<u64>,
    #[serde(default)]
    pub chassis_number: Option<String>,
}

/// The customer slot of a form: at most one of organization XOR person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CustomerLookup {
    Organization(OrganizationRecord),
    Person(PersonRecord),
}

/// The lookup results a form instance currently holds.
///
/// Concurrent operations mutate disjoint slots by convention: a vehicle
/// search only writes `vehicle`, a customer-type change only resets
/// `customer`. Any new form added to the system must preserve that
/// disjointness.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LookupSlots {
    /// The organization-or-person record backing the customer block.
    pub customer: Option<CustomerLookup>,
    /// The vehicle record backing the vehicle block.
    pub vehicle: Option<VehicleRecord>,
}

impl LookupSlots {
    /// Empty slots, as at form construction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an organization record, replacing any previous customer slot.
    pub fn set_organization(&mut self, record: OrganizationRecord) {
        self.customer = Some(CustomerLookup::Organization(record));
    }

    /// Store a person record, replacing any previous customer slot.
    pub fn set_person(&mut self, record: PersonRecord) {
        self.customer = Some(CustomerLookup::Person(record));
    }

    /// Store a vehicle record, replacing any previous vehicle slot.
    pub fn set_vehicle(&mut self, record: VehicleRecord) {
        self.vehicle = Some(record);
    }

    /// Drop everything, as on form reset.
    pub fn reset(&mut self) {
        self.customer = None;
        self.vehicle = None;
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_organization_record_tolerates_missing_optionals() {
        let rec: OrganizationRecord = serde_json::from_str(
            r#"{"organization_number":"556677-8899","corp_name":"Acme AB"}"#,
        )
        .unwrap();
        assert_eq!(rec.corp_name, "Acme AB");
        assert_eq!(rec.street_address, None);
    }

    #[test]
    fn test_organization_record_ignores_unknown_fields() {
        let rec: OrganizationRecord = serde_json::from_str(
            r#"{"organization_number":"556677-8899","corp_name":"Acme AB","sni_code":"45.11"}"#,
        )
        .unwrap();
        assert_eq!(rec.organization_number, "556677-8899");
    }

    #[test]
    fn test_customer_slot_is_exclusive() {
        let mut slots = LookupSlots::new();
        slots.set_organization(OrganizationRecord {
            organization_number: "556677-8899".into(),
            corp_name: "Acme AB".into(),
            street_address: None,
            city: None,
            postal_code: None,
            email: None,
            phone: None,
        });
        slots.set_person(PersonRecord {
            national_id: "850712-1234".into(),
            first_name: "Anna".into(),
            last_name: "Lind".into(),
            street_address: None,
            city: None,
            postal_code: None,
        });
        assert!(matches!(slots.customer, Some(CustomerLookup::Person(_))));
    }

    #[test]
    fn test_reset_clears_both_slots() {
        let mut slots = LookupSlots::new();
        slots.set_vehicle(VehicleRecord {
            registration_number: "ABC123".into(),
            make: Some("Volvo".into()),
            model: Some("V60".into()),
            model_year: Some(2021),
            mileage: Some(42000),
            chassis_number: None,
        });
        slots.reset();
        assert_eq!(slots, LookupSlots::new());
    }
}
