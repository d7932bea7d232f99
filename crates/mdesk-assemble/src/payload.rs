//! # Agreement Payload Shapes
//!
//! The typed request bodies for the four agreement families. Wire names
//! follow the backend contract: top-level `customerType` is camel-cased
//! (as is `tradeInVehicle`), the nested blocks are snake_cased. Optional
//! blocks are omitted entirely rather than serialized as null.
//!
//! The nested detail blocks each carry an optional `registry_record` —
//! the most recent lookup result for that slot, attached verbatim.

use serde::{Deserialize, Serialize};

use mdesk_core::{AgreementKind, CreditMarking, CustomerType, PaymentMethod};
use mdesk_lookup::{OrganizationRecord, PersonRecord, VehicleRecord};

// ─── Customer blocks ─────────────────────────────────────────────────

/// Company counterparty block. Present exactly when `customerType`
/// is `Company`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationDetail {
    pub organization_number: String,
    pub company_name: String,
    pub street_address: String,
    pub city: String,
    pub postal_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// The organization registry record this block was populated from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry_record: Option<OrganizationRecord>,
}

/// Private-individual counterparty block. Present exactly when
/// `customerType` is `Private Individual`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonDetail {
    pub national_id: String,
    pub first_name: String,
    pub last_name: String,
    pub street_address: String,
    pub city: String,
    pub postal_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// The person registry record this block was populated from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry_record: Option<PersonRecord>,
}

// ─── Vehicle block ───────────────────────────────────────────────────

/// The vehicle an agreement concerns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleDetails {
    pub registration_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_year: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mileage: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chassis_number: Option<String>,
    /// The vehicle registry record this block was populated from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry_record: Option<VehicleRecord>,
}

// ─── Payment sub-blocks ──────────────────────────────────────────────

/// Loan-financing terms. Mutually exclusive with [`LeasingDetails`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingDetails {
    pub creditor: String,
    pub credit_amount: f64,
    pub cash_bet: f64,
    /// Loan period in months.
    pub loan_period: u32,
}

/// Leasing terms. Mutually exclusive with [`FinancingDetails`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeasingDetails {
    pub leasing_provider: String,
    pub leasing_amount: f64,
    /// Leasing period in months.
    pub leasing_period: u32,
}

/// Trade-in vehicle block. Present only when the trade-in toggle is on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeInDetails {
    pub registration_number: String,
    pub purchase_price: f64,
    pub mileage: u64,
    pub credit_marking: CreditMarking,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creditor: Option<String>,
}

/// Swish payment registration block on receipts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwishRegistration {
    /// The payer's Swish-connected mobile number.
    pub swish_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_reference: Option<String>,
}

/// Creditor settlement block on purchases of credit-marked vehicles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementDetails {
    pub creditor: String,
    pub settlement_amount: f64,
    pub settlement_date: String,
}

// ─── Per-family detail blocks ────────────────────────────────────────

/// Sales terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesDetails {
    pub sales_date: String,
    pub sales_price: f64,
    pub payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financing: Option<FinancingDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leasing: Option<LeasingDetails>,
}

/// Purchase terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseDetails {
    pub purchase_date: String,
    pub purchase_price: f64,
    pub credit_marking: CreditMarking,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settlement: Option<SettlementDetails>,
}

/// Agency (commission sale) terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgencyDetails {
    pub agency_start_date: String,
    pub asking_price: f64,
    /// Commission in percent of the final sale price.
    pub commission_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_price: Option<f64>,
}

/// Receipt / invoice terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptDetails {
    pub receipt_date: String,
    pub amount: f64,
    pub payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swish: Option<SwishRegistration>,
}

// ─── Top-level bodies ────────────────────────────────────────────────

/// Request body for sales agreement create/update and create-and-sign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesAgreementPayload {
    #[serde(rename = "customerType")]
    pub customer_type: CustomerType,
    pub sales_details: SalesDetails,
    pub vehicle_details: VehicleDetails,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_detail: Option<OrganizationDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_detail: Option<PersonDetail>,
    #[serde(rename = "tradeInVehicle", skip_serializing_if = "Option::is_none")]
    pub trade_in_vehicle: Option<TradeInDetails>,
}

/// Request body for purchase agreement create/update and create-and-sign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseAgreementPayload {
    #[serde(rename = "customerType")]
    pub customer_type: CustomerType,
    pub purchase_details: PurchaseDetails,
    pub vehicle_details: VehicleDetails,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_detail: Option<OrganizationDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_detail: Option<PersonDetail>,
}

/// Request body for agency agreement create/update and create-and-sign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgencyAgreementPayload {
    #[serde(rename = "customerType")]
    pub customer_type: CustomerType,
    pub agency_details: AgencyDetails,
    pub vehicle_details: VehicleDetails,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_detail: Option<OrganizationDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_detail: Option<PersonDetail>,
}

/// Request body for receipt create/update and create-and-sign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptPayload {
    #[serde(rename = "customerType")]
    pub customer_type: CustomerType,
    pub receipt_details: ReceiptDetails,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_detail: Option<OrganizationDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_detail: Option<PersonDetail>,
}

/// Any assembled agreement body, tagged by family for dispatch to the
/// right endpoint. Serializes untagged — the body on the wire is exactly
/// the family payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AgreementPayload {
    Sales(SalesAgreementPayload),
    Purchase(PurchaseAgreementPayload),
    Agency(AgencyAgreementPayload),
    Receipt(ReceiptPayload),
}

impl AgreementPayload {
    /// Which agreement family this body belongs to.
    pub fn kind(&self) -> AgreementKind {
        match self {
            Self::Sales(_) => AgreementKind::Sales,
            Self::Purchase(_) => AgreementKind::Purchase,
            Self::Agency(_) => AgreementKind::Agency,
            Self::Receipt(_) => AgreementKind::Receipt,
        }
    }
}
