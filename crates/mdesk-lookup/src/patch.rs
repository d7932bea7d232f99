//! # Lookup Patch Mappings
//!
//! Map a successful lookup record onto the form's field registry. Each
//! mapping writes only its own block's fields — vehicle search never
//! touches customer fields and vice versa — which is what makes
//! concurrent lookups safe without ordering guarantees.
//!
//! Patches go through [`FormModel::patch`], so any dependency rules on
//! the patched fields settle before these functions return.

use mdesk_form::catalog::keys;
use mdesk_form::{FormError, FormModel};

use crate::records::{OrganizationRecord, PersonRecord, VehicleRecord};

/// Patch the company block from an organization record.
pub fn patch_organization(
    model: &mut FormModel,
    record: &OrganizationRecord,
) -> Result<(), FormError> {
    let mut entries: Vec<(&str, &str)> = vec![
        (keys::ORGANIZATION_NUMBER, record.organization_number.as_str()),
        (keys::COMPANY_NAME, record.corp_name.as_str()),
    ];
    if let Some(v) = record.street_address.as_deref() {
        entries.push((keys::STREET_ADDRESS, v));
    }
    if let Some(v) = record.city.as_deref() {
        entries.push((keys::CITY, v));
    }
    if let Some(v) = record.postal_code.as_deref() {
        entries.push((keys::POSTAL_CODE, v));
    }
    if let Some(v) = record.email.as_deref() {
        entries.push((keys::EMAIL, v));
    }
    if let Some(v) = record.phone.as_deref() {
        entries.push((keys::PHONE, v));
    }
    model.patch(&entries)
}

/// Patch the person block from a person record.
pub fn patch_person(model: &mut FormModel, record: &PersonRecord) -> Result<(), FormError> {
    let mut entries: Vec<(&str, &str)> = vec![
        (keys::NATIONAL_ID, record.national_id.as_str()),
        (keys::FIRST_NAME, record.first_name.as_str()),
        (keys::LAST_NAME, record.last_name.as_str()),
    ];
    if let Some(v) = record.street_address.as_deref() {
        entries.push((keys::STREET_ADDRESS, v));
    }
    if let Some(v) = record.city.as_deref() {
        entries.push((keys::CITY, v));
    }
    if let Some(v) = record.postal_code.as_deref() {
        entries.push((keys::POSTAL_CODE, v));
    }
    model.patch(&entries)
}

/// Patch the vehicle block from a vehicle record.
pub fn patch_vehicle(model: &mut FormModel, record: &VehicleRecord) -> Result<(), FormError> {
    let model_year = record.model_year.map(|y| y.to_string());
    let mileage = record.mileage.map(|m| m.to_string());

    let mut entries: Vec<(&str, &str)> = vec![(
        keys::REGISTRATION_NUMBER,
        record.registration_number.as_str(),
    )];
    if let Some(v) = record.make.as_deref() {
        entries.push((keys::MAKE, v));
    }
    if let Some(v) = record.model.as_deref() {
        entries.push((keys::MODEL, v));
    }
    if let Some(v) = model_year.as_deref() {
        entries.push((keys::MODEL_YEAR, v));
    }
    if let Some(v) = mileage.as_deref() {
        entries.push((keys::MILEAGE, v));
    }
    if let Some(v) = record.chassis_number.as_deref() {
        entries.push((keys::CHASSIS_NUMBER, v));
    }
    model.patch(&entries)
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use mdesk_form::catalog;

    fn acme() -> OrganizationRecord {
        OrganizationRecord {
            organization_number: "556677-8899".into(),
            corp_name: "Acme AB".into(),
            street_address: Some("Main St 1".into()),
            city: Some("Stockholm".into()),
            postal_code: Some("11122".into()),
            email: None,
            phone: None,
        }
    }

    #[test]
    fn test_organization_patch_fills_company_block() {
        let mut model = catalog::sales_agreement().unwrap();
        model.set_field(keys::CUSTOMER_TYPE, "Company").unwrap();

        patch_organization(&mut model, &acme()).unwrap();

        assert_eq!(model.value(keys::COMPANY_NAME).unwrap(), "Acme AB");
        assert_eq!(model.value(keys::STREET_ADDRESS).unwrap(), "Main St 1");
        assert_eq!(model.value(keys::CITY).unwrap(), "Stockholm");
        assert_eq!(model.value(keys::POSTAL_CODE).unwrap(), "11122");
    }

    #[test]
    fn test_form_validates_once_remaining_required_fields_fill() {
        let mut model = catalog::sales_agreement().unwrap();
        model.set_field(keys::CUSTOMER_TYPE, "Company").unwrap();
        patch_organization(&mut model, &acme()).unwrap();
        assert!(!model.is_valid());

        model.set_field(keys::REGISTRATION_NUMBER, "ABC123").unwrap();
        model.set_field(keys::SALES_DATE, "2026-08-07").unwrap();
        model.set_field(keys::SALES_PRICE, "189900").unwrap();
        model.set_field(keys::PAYMENT_METHOD, "Cash").unwrap();
        assert!(model.is_valid());
    }

    #[test]
    fn test_vehicle_patch_only_touches_vehicle_block() {
        let mut model = catalog::sales_agreement().unwrap();
        model.set_field(keys::CUSTOMER_TYPE, "Company").unwrap();
        model.set_field(keys::COMPANY_NAME, "Typed By Hand AB").unwrap();

        let record = VehicleRecord {
            registration_number: "ABC123".into(),
            make: Some("Volvo".into()),
            model: Some("V60".into()),
            model_year: Some(2021),
            mileage: Some(42000),
            chassis_number: Some("YV1ZW72V8M1234567".into()),
        };
        patch_vehicle(&mut model, &record).unwrap();

        assert_eq!(model.value(keys::MAKE).unwrap(), "Volvo");
        assert_eq!(model.value(keys::MODEL_YEAR).unwrap(), "2021");
        // Customer block untouched.
        assert_eq!(model.value(keys::COMPANY_NAME).unwrap(), "Typed By Hand AB");
    }

    #[test]
    fn test_person_patch_fills_person_block() {
        let mut model = catalog::customer_record().unwrap();
        model
            .set_field(keys::CUSTOMER_TYPE, "Private Individual")
            .unwrap();
        let record = PersonRecord {
            national_id: "850712-1234".into(),
            first_name: "Anna".into(),
            last_name: "Lind".into(),
            street_address: Some("Storgatan 2".into()),
            city: Some("Uppsala".into()),
            postal_code: Some("75310".into()),
        };
        patch_person(&mut model, &record).unwrap();
        assert_eq!(model.value(keys::FIRST_NAME).unwrap(), "Anna");
        assert_eq!(model.value(keys::LAST_NAME).unwrap(), "Lind");
    }
}
