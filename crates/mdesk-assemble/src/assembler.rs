//! # Payload Assembler
//!
//! Builds each agreement family's request body from a settled registry
//! snapshot plus the form's lookup slots. Branching on the discriminant
//! fields happens here: exactly one customer block, at most one payment
//! sub-block, and the trade-in block only when the toggle is on.

use mdesk_core::{AgreementKind, CreditMarking, CustomerType, PaymentMethod, TradeIn};
use mdesk_form::catalog::keys;
use mdesk_form::registry::Snapshot;
use mdesk_form::validate::parse_numeric;
use mdesk_lookup::{CustomerLookup, LookupSlots};

use crate::error::AssembleError;
use crate::payload::{
    AgencyAgreementPayload, AgencyDetails, AgreementPayload, FinancingDetails, LeasingDetails,
    OrganizationDetail, PersonDetail, PurchaseAgreementPayload, PurchaseDetails, ReceiptDetails,
    ReceiptPayload, SalesAgreementPayload, SalesDetails, SettlementDetails, SwishRegistration,
    TradeInDetails, VehicleDetails,
};

// ─── Snapshot helpers ────────────────────────────────────────────────

fn text(snapshot: &Snapshot, key: &str) -> String {
    snapshot.get(key).cloned().unwrap_or_default()
}

fn opt_text(snapshot: &Snapshot, key: &str) -> Option<String> {
    snapshot
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Coerce a numeric field from its UI string. This is the one place in
/// the workspace where form strings become numbers.
fn number(snapshot: &Snapshot, key: &str) -> Result<f64, AssembleError> {
    let raw = text(snapshot, key);
    parse_numeric(&raw).ok_or(AssembleError::NonNumeric {
        field: key.to_string(),
        value: raw,
    })
}

fn opt_number(snapshot: &Snapshot, key: &str) -> Result<Option<f64>, AssembleError> {
    match opt_text(snapshot, key) {
        None => Ok(None),
        Some(_) => number(snapshot, key).map(Some),
    }
}

fn whole_number(snapshot: &Snapshot, key: &str) -> Result<u64, AssembleError> {
    let n = number(snapshot, key)?;
    if n < 0.0 || n.fract() != 0.0 {
        let raw = text(snapshot, key);
        return Err(AssembleError::NonNumeric {
            field: key.to_string(),
            value: raw,
        });
    }
    Ok(n as u64)
}

// ─── Shared blocks ───────────────────────────────────────────────────

/// Resolve the mutually-exclusive customer blocks from the discriminant.
///
/// Exactly one of the returned options is `Some`. The lookup record is
/// attached only when its variant matches the active discriminant — a
/// leftover organization record is not attached to a person block.
fn customer_blocks(
    snapshot: &Snapshot,
    slots: &LookupSlots,
) -> Result<(Option<OrganizationDetail>, Option<PersonDetail>), AssembleError> {
    let customer_type: CustomerType = text(snapshot, keys::CUSTOMER_TYPE).parse()?;
    match customer_type {
        CustomerType::Company => {
            let registry_record = match &slots.customer {
                Some(CustomerLookup::Organization(rec)) => Some(rec.clone()),
                _ => None,
            };
            Ok((
                Some(OrganizationDetail {
                    organization_number: text(snapshot, keys::ORGANIZATION_NUMBER),
                    company_name: text(snapshot, keys::COMPANY_NAME),
                    street_address: text(snapshot, keys::STREET_ADDRESS),
                    city: text(snapshot, keys::CITY),
                    postal_code: text(snapshot, keys::POSTAL_CODE),
                    email: opt_text(snapshot, keys::EMAIL),
                    phone: opt_text(snapshot, keys::PHONE),
                    registry_record,
                }),
                None,
            ))
        }
        CustomerType::PrivateIndividual => {
            let registry_record = match &slots.customer {
                Some(CustomerLookup::Person(rec)) => Some(rec.clone()),
                _ => None,
            };
            Ok((
                None,
                Some(PersonDetail {
                    national_id: text(snapshot, keys::NATIONAL_ID),
                    first_name: text(snapshot, keys::FIRST_NAME),
                    last_name: text(snapshot, keys::LAST_NAME),
                    street_address: text(snapshot, keys::STREET_ADDRESS),
                    city: text(snapshot, keys::CITY),
                    postal_code: text(snapshot, keys::POSTAL_CODE),
                    email: opt_text(snapshot, keys::EMAIL),
                    phone: opt_text(snapshot, keys::PHONE),
                    registry_record,
                }),
            ))
        }
    }
}

fn vehicle_block(snapshot: &Snapshot, slots: &LookupSlots) -> Result<VehicleDetails, AssembleError> {
    let model_year = match opt_number(snapshot, keys::MODEL_YEAR)? {
        Some(n) => Some(n as u32),
        None => None,
    };
    let mileage = match opt_text(snapshot, keys::MILEAGE) {
        Some(_) => Some(whole_number(snapshot, keys::MILEAGE)?),
        None => None,
    };
    Ok(VehicleDetails {
        registration_number: text(snapshot, keys::REGISTRATION_NUMBER),
        make: opt_text(snapshot, keys::MAKE),
        model: opt_text(snapshot, keys::MODEL),
        model_year,
        mileage,
        chassis_number: opt_text(snapshot, keys::CHASSIS_NUMBER),
        registry_record: slots.vehicle.clone(),
    })
}

// ─── Family assemblers ───────────────────────────────────────────────

/// Assemble a sales agreement body.
pub fn assemble_sales(
    snapshot: &Snapshot,
    slots: &LookupSlots,
) -> Result<SalesAgreementPayload, AssembleError> {
    let (organization_detail, person_detail) = customer_blocks(snapshot, slots)?;
    let payment_method: PaymentMethod = text(snapshot, keys::PAYMENT_METHOD).parse()?;

    let financing = match payment_method {
        PaymentMethod::Financing => Some(FinancingDetails {
            creditor: text(snapshot, keys::CREDITOR),
            credit_amount: number(snapshot, keys::CREDIT_AMOUNT)?,
            cash_bet: number(snapshot, keys::CASH_BET)?,
            loan_period: whole_number(snapshot, keys::LOAN_PERIOD)? as u32,
        }),
        _ => None,
    };
    let leasing = match payment_method {
        PaymentMethod::Leasing => Some(LeasingDetails {
            leasing_provider: text(snapshot, keys::LEASING_PROVIDER),
            leasing_amount: number(snapshot, keys::LEASING_AMOUNT)?,
            leasing_period: whole_number(snapshot, keys::LEASING_PERIOD)? as u32,
        }),
        _ => None,
    };

    let trade_in_vehicle = match TradeIn::from_ui(&text(snapshot, keys::TRADE_IN_VEHICLE)) {
        Some(TradeIn::Yes) => {
            let credit_marking =
                match CreditMarking::from_ui(&text(snapshot, keys::TRADE_IN_CREDIT_MARKING)) {
                    Some(cm) => cm,
                    None => CreditMarking::No,
                };
            Some(TradeInDetails {
                registration_number: text(snapshot, keys::TRADE_IN_REGISTRATION_NUMBER),
                purchase_price: number(snapshot, keys::TRADE_IN_PURCHASE_PRICE)?,
                mileage: whole_number(snapshot, keys::TRADE_IN_MILEAGE)?,
                credit_marking,
                creditor: opt_text(snapshot, keys::TRADE_IN_CREDITOR),
            })
        }
        _ => None,
    };

    Ok(SalesAgreementPayload {
        customer_type: text(snapshot, keys::CUSTOMER_TYPE).parse()?,
        sales_details: SalesDetails {
            sales_date: text(snapshot, keys::SALES_DATE),
            sales_price: number(snapshot, keys::SALES_PRICE)?,
            payment_method,
            financing,
            leasing,
        },
        vehicle_details: vehicle_block(snapshot, slots)?,
        organization_detail,
        person_detail,
        trade_in_vehicle,
    })
}

/// Assemble a purchase agreement body.
pub fn assemble_purchase(
    snapshot: &Snapshot,
    slots: &LookupSlots,
) -> Result<PurchaseAgreementPayload, AssembleError> {
    let (organization_detail, person_detail) = customer_blocks(snapshot, slots)?;
    let credit_marking = match CreditMarking::from_ui(&text(snapshot, keys::CREDIT_MARKING)) {
        Some(cm) => cm,
        None => CreditMarking::No,
    };
    let settlement = match credit_marking {
        CreditMarking::Yes => Some(SettlementDetails {
            creditor: text(snapshot, keys::CREDITOR),
            settlement_amount: number(snapshot, keys::SETTLEMENT_AMOUNT)?,
            settlement_date: text(snapshot, keys::SETTLEMENT_DATE),
        }),
        CreditMarking::No => None,
    };

    Ok(PurchaseAgreementPayload {
        customer_type: text(snapshot, keys::CUSTOMER_TYPE).parse()?,
        purchase_details: PurchaseDetails {
            purchase_date: text(snapshot, keys::PURCHASE_DATE),
            purchase_price: number(snapshot, keys::PURCHASE_PRICE)?,
            credit_marking,
            settlement,
        },
        vehicle_details: vehicle_block(snapshot, slots)?,
        organization_detail,
        person_detail,
    })
}

/// Assemble an agency agreement body.
pub fn assemble_agency(
    snapshot: &Snapshot,
    slots: &LookupSlots,
) -> Result<AgencyAgreementPayload, AssembleError> {
    let (organization_detail, person_detail) = customer_blocks(snapshot, slots)?;
    Ok(AgencyAgreementPayload {
        customer_type: text(snapshot, keys::CUSTOMER_TYPE).parse()?,
        agency_details: AgencyDetails {
            agency_start_date: text(snapshot, keys::AGENCY_START_DATE),
            asking_price: number(snapshot, keys::ASKING_PRICE)?,
            commission_rate: number(snapshot, keys::COMMISSION_RATE)?,
            minimum_price: opt_number(snapshot, keys::MINIMUM_PRICE)?,
        },
        vehicle_details: vehicle_block(snapshot, slots)?,
        organization_detail,
        person_detail,
    })
}

/// Assemble a receipt body.
pub fn assemble_receipt(
    snapshot: &Snapshot,
    slots: &LookupSlots,
) -> Result<ReceiptPayload, AssembleError> {
    let (organization_detail, person_detail) = customer_blocks(snapshot, slots)?;
    let payment_method: PaymentMethod = text(snapshot, keys::PAYMENT_METHOD).parse()?;
    let swish = match payment_method {
        PaymentMethod::Swish => Some(SwishRegistration {
            swish_number: text(snapshot, keys::SWISH_NUMBER),
            payment_reference: opt_text(snapshot, keys::PAYMENT_REFERENCE),
        }),
        _ => None,
    };

    Ok(ReceiptPayload {
        customer_type: text(snapshot, keys::CUSTOMER_TYPE).parse()?,
        receipt_details: ReceiptDetails {
            receipt_date: text(snapshot, keys::RECEIPT_DATE),
            amount: number(snapshot, keys::AMOUNT)?,
            payment_method,
            swish,
        },
        organization_detail,
        person_detail,
    })
}

/// Assemble the body for any agreement family.
pub fn assemble(
    kind: AgreementKind,
    snapshot: &Snapshot,
    slots: &LookupSlots,
) -> Result<AgreementPayload, AssembleError> {
    Ok(match kind {
        AgreementKind::Sales => AgreementPayload::Sales(assemble_sales(snapshot, slots)?),
        AgreementKind::Purchase => AgreementPayload::Purchase(assemble_purchase(snapshot, slots)?),
        AgreementKind::Agency => AgreementPayload::Agency(assemble_agency(snapshot, slots)?),
        AgreementKind::Receipt => AgreementPayload::Receipt(assemble_receipt(snapshot, slots)?),
    })
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use mdesk_form::catalog;
    use mdesk_form::FormModel;
    use mdesk_lookup::OrganizationRecord;

    fn filled_sales_form(customer_type: &str) -> FormModel {
        let mut model = catalog::sales_agreement().unwrap();
        model.set_field(keys::CUSTOMER_TYPE, customer_type).unwrap();
        match customer_type {
            "Company" => {
                model.set_field(keys::ORGANIZATION_NUMBER, "556677-8899").unwrap();
                model.set_field(keys::COMPANY_NAME, "Acme AB").unwrap();
            }
            _ => {
                model.set_field(keys::NATIONAL_ID, "850712-1234").unwrap();
                model.set_field(keys::FIRST_NAME, "Anna").unwrap();
                model.set_field(keys::LAST_NAME, "Lind").unwrap();
            }
        }
        model.set_field(keys::STREET_ADDRESS, "Main St 1").unwrap();
        model.set_field(keys::CITY, "Stockholm").unwrap();
        model.set_field(keys::POSTAL_CODE, "11122").unwrap();
        model.set_field(keys::REGISTRATION_NUMBER, "ABC123").unwrap();
        model.set_field(keys::SALES_DATE, "2026-08-07").unwrap();
        model.set_field(keys::SALES_PRICE, "189900").unwrap();
        model.set_field(keys::PAYMENT_METHOD, "Cash").unwrap();
        assert!(model.is_valid());
        model
    }

    // ── Payload totality: customer blocks ────────────────────────────

    #[test]
    fn test_company_produces_organization_detail_only() {
        let model = filled_sales_form("Company");
        let payload = assemble_sales(&model.snapshot(), &LookupSlots::new()).unwrap();
        assert!(payload.organization_detail.is_some());
        assert!(payload.person_detail.is_none());
    }

    #[test]
    fn test_private_individual_produces_person_detail_only() {
        let model = filled_sales_form("Private Individual");
        let payload = assemble_sales(&model.snapshot(), &LookupSlots::new()).unwrap();
        assert!(payload.organization_detail.is_none());
        assert!(payload.person_detail.is_some());
    }

    #[test]
    fn test_unrecognized_customer_type_is_a_defect_not_a_panic() {
        let mut model = catalog::sales_agreement().unwrap();
        model.set_field(keys::CUSTOMER_TYPE, "Syndicate").unwrap();
        let result = assemble_sales(&model.snapshot(), &LookupSlots::new());
        assert!(matches!(result, Err(AssembleError::Discriminant(_))));
    }

    // ── Payment sub-blocks ───────────────────────────────────────────

    #[test]
    fn test_cash_payment_has_neither_financing_nor_leasing() {
        let model = filled_sales_form("Company");
        let payload = assemble_sales(&model.snapshot(), &LookupSlots::new()).unwrap();
        assert!(payload.sales_details.financing.is_none());
        assert!(payload.sales_details.leasing.is_none());
    }

    #[test]
    fn test_financing_block_coerces_numbers() {
        let mut model = filled_sales_form("Company");
        model.set_field(keys::PAYMENT_METHOD, "Financing").unwrap();
        model.set_field(keys::CREDITOR, "Nordbank").unwrap();
        model.set_field(keys::CREDIT_AMOUNT, "150 000,50").unwrap();
        model.set_field(keys::CASH_BET, "39900").unwrap();
        model.set_field(keys::LOAN_PERIOD, "60").unwrap();
        assert!(model.is_valid());

        let payload = assemble_sales(&model.snapshot(), &LookupSlots::new()).unwrap();
        let financing = payload.sales_details.financing.unwrap();
        assert_eq!(financing.credit_amount, 150000.50);
        assert_eq!(financing.loan_period, 60);
        assert!(payload.sales_details.leasing.is_none());
    }

    #[test]
    fn test_leasing_block_excludes_financing() {
        let mut model = filled_sales_form("Company");
        model.set_field(keys::PAYMENT_METHOD, "Leasing").unwrap();
        model.set_field(keys::LEASING_PROVIDER, "FleetLease AB").unwrap();
        model.set_field(keys::LEASING_AMOUNT, "4500").unwrap();
        model.set_field(keys::LEASING_PERIOD, "36").unwrap();

        let payload = assemble_sales(&model.snapshot(), &LookupSlots::new()).unwrap();
        assert!(payload.sales_details.financing.is_none());
        let leasing = payload.sales_details.leasing.unwrap();
        assert_eq!(leasing.leasing_period, 36);
    }

    // ── Trade-in block ───────────────────────────────────────────────

    #[test]
    fn test_trade_in_block_present_when_toggled_on() {
        let mut model = filled_sales_form("Company");
        model.set_field(keys::TRADE_IN_VEHICLE, "Yes").unwrap();
        model.set_field(keys::TRADE_IN_REGISTRATION_NUMBER, "XYZ789").unwrap();
        model.set_field(keys::TRADE_IN_PURCHASE_PRICE, "45000").unwrap();
        model.set_field(keys::TRADE_IN_MILEAGE, "18200").unwrap();

        let payload = assemble_sales(&model.snapshot(), &LookupSlots::new()).unwrap();
        let trade_in = payload.trade_in_vehicle.unwrap();
        assert_eq!(trade_in.registration_number, "XYZ789");
        assert_eq!(trade_in.mileage, 18200);
    }

    #[test]
    fn test_trade_in_block_omitted_after_toggle_off() {
        let mut model = filled_sales_form("Company");
        model.set_field(keys::TRADE_IN_VEHICLE, "Yes").unwrap();
        model.set_field(keys::TRADE_IN_REGISTRATION_NUMBER, "XYZ789").unwrap();
        model.set_field(keys::TRADE_IN_PURCHASE_PRICE, "45000").unwrap();
        model.set_field(keys::TRADE_IN_MILEAGE, "18200").unwrap();
        model.set_field(keys::TRADE_IN_VEHICLE, "No").unwrap();

        let payload = assemble_sales(&model.snapshot(), &LookupSlots::new()).unwrap();
        assert!(payload.trade_in_vehicle.is_none());
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("tradeInVehicle").is_none());
    }

    // ── Lookup attachment ────────────────────────────────────────────

    #[test]
    fn test_matching_lookup_record_is_attached() {
        let model = filled_sales_form("Company");
        let mut slots = LookupSlots::new();
        slots.set_organization(OrganizationRecord {
            organization_number: "556677-8899".into(),
            corp_name: "Acme AB".into(),
            street_address: Some("Main St 1".into()),
            city: Some("Stockholm".into()),
            postal_code: Some("11122".into()),
            email: None,
            phone: None,
        });
        let payload = assemble_sales(&model.snapshot(), &slots).unwrap();
        let org = payload.organization_detail.unwrap();
        assert_eq!(org.registry_record.unwrap().corp_name, "Acme AB");
    }

    #[test]
    fn test_mismatched_lookup_record_is_not_attached() {
        // An organization record left over in the slot must not ride along
        // on a person block.
        let model = filled_sales_form("Private Individual");
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
        let payload = assemble_sales(&model.snapshot(), &slots).unwrap();
        assert!(payload.person_detail.unwrap().registry_record.is_none());
    }

    // ── Wire shape ───────────────────────────────────────────────────

    #[test]
    fn test_wire_keys_match_backend_contract() {
        let model = filled_sales_form("Company");
        let payload = assemble_sales(&model.snapshot(), &LookupSlots::new()).unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["customerType"], "Company");
        assert_eq!(json["sales_details"]["sales_price"], 189900.0);
        assert!(json.get("organization_detail").is_some());
        assert!(json.get("person_detail").is_none());
    }

    // ── Other families ───────────────────────────────────────────────

    #[test]
    fn test_purchase_settlement_block_follows_credit_marking() {
        let mut model = catalog::purchase_agreement().unwrap();
        model.set_field(keys::CUSTOMER_TYPE, "Company").unwrap();
        model.set_field(keys::ORGANIZATION_NUMBER, "556677-8899").unwrap();
        model.set_field(keys::COMPANY_NAME, "Acme AB").unwrap();
        model.set_field(keys::STREET_ADDRESS, "Main St 1").unwrap();
        model.set_field(keys::CITY, "Stockholm").unwrap();
        model.set_field(keys::POSTAL_CODE, "11122").unwrap();
        model.set_field(keys::REGISTRATION_NUMBER, "ABC123").unwrap();
        model.set_field(keys::PURCHASE_DATE, "2026-08-07").unwrap();
        model.set_field(keys::PURCHASE_PRICE, "95000").unwrap();

        let payload = assemble_purchase(&model.snapshot(), &LookupSlots::new()).unwrap();
        assert!(payload.purchase_details.settlement.is_none());

        model.set_field(keys::CREDIT_MARKING, "Yes").unwrap();
        model.set_field(keys::CREDITOR, "Nordbank").unwrap();
        model.set_field(keys::SETTLEMENT_AMOUNT, "31000").unwrap();
        model.set_field(keys::SETTLEMENT_DATE, "2026-08-14").unwrap();
        let payload = assemble_purchase(&model.snapshot(), &LookupSlots::new()).unwrap();
        let settlement = payload.purchase_details.settlement.unwrap();
        assert_eq!(settlement.settlement_amount, 31000.0);
    }

    #[test]
    fn test_receipt_swish_registration_block() {
        let mut model = catalog::receipt().unwrap();
        model.set_field(keys::CUSTOMER_TYPE, "Private Individual").unwrap();
        model.set_field(keys::NATIONAL_ID, "850712-1234").unwrap();
        model.set_field(keys::FIRST_NAME, "Anna").unwrap();
        model.set_field(keys::LAST_NAME, "Lind").unwrap();
        model.set_field(keys::STREET_ADDRESS, "Storgatan 2").unwrap();
        model.set_field(keys::CITY, "Uppsala").unwrap();
        model.set_field(keys::POSTAL_CODE, "75310").unwrap();
        model.set_field(keys::RECEIPT_DATE, "2026-08-07").unwrap();
        model.set_field(keys::AMOUNT, "2500").unwrap();
        model.set_field(keys::PAYMENT_METHOD, "Swish").unwrap();
        model.set_field(keys::SWISH_NUMBER, "0701234567").unwrap();

        let payload = assemble_receipt(&model.snapshot(), &LookupSlots::new()).unwrap();
        let swish = payload.receipt_details.swish.unwrap();
        assert_eq!(swish.swish_number, "0701234567");

        // Switching to cash drops the registration block entirely.
        let mut model = model;
        model.set_field(keys::PAYMENT_METHOD, "Cash").unwrap();
        let payload = assemble_receipt(&model.snapshot(), &LookupSlots::new()).unwrap();
        assert!(payload.receipt_details.swish.is_none());
    }

    #[test]
    fn test_dispatch_by_kind() {
        let model = filled_sales_form("Company");
        let payload = assemble(
            AgreementKind::Sales,
            &model.snapshot(),
            &LookupSlots::new(),
        )
        .unwrap();
        assert_eq!(payload.kind(), AgreementKind::Sales);
    }

    // ── Fresh payload per call ───────────────────────────────────────

    #[test]
    fn test_each_call_builds_an_equal_but_fresh_payload() {
        let model = filled_sales_form("Company");
        let snapshot = model.snapshot();
        let a = assemble_sales(&snapshot, &LookupSlots::new()).unwrap();
        let b = assemble_sales(&snapshot, &LookupSlots::new()).unwrap();
        assert_eq!(a, b);
    }
}
