//! # Form Catalog
//!
//! Stock definitions for the six back-office screens: the four agreement
//! forms (sales, purchase, agency, receipt) and the customer/corporation
//! record forms. Each screen is the same three pieces wired differently:
//! a field registry, a dependency rule table, and (elsewhere) a payload
//! shape.
//!
//! Field keys are exported as constants in [`keys`] — the payload
//! assembler and the lookup patch mappings address fields through these,
//! never through string literals of their own.

use crate::error::FormError;
use crate::model::FormModel;
use crate::registry::{FieldDef, FormDefinition};
use crate::rules::{DependencyRule, Effect, RuleSet};

/// Field key constants, shared across the registry, the rule tables, the
/// lookup patch mappings, and the payload assembler.
pub mod keys {
    // Customer block (shared by every screen).
    pub const CUSTOMER_TYPE: &str = "customer_type";
    pub const ORGANIZATION_NUMBER: &str = "organization_number";
    pub const COMPANY_NAME: &str = "company_name";
    pub const NATIONAL_ID: &str = "national_id";
    pub const FIRST_NAME: &str = "first_name";
    pub const LAST_NAME: &str = "last_name";
    pub const STREET_ADDRESS: &str = "street_address";
    pub const CITY: &str = "city";
    pub const POSTAL_CODE: &str = "postal_code";
    pub const EMAIL: &str = "email";
    pub const PHONE: &str = "phone";

    // Vehicle block (sales, purchase, agency).
    pub const REGISTRATION_NUMBER: &str = "registration_number";
    pub const MAKE: &str = "make";
    pub const MODEL: &str = "model";
    pub const MODEL_YEAR: &str = "model_year";
    pub const MILEAGE: &str = "mileage";
    pub const CHASSIS_NUMBER: &str = "chassis_number";

    // Sales agreement.
    pub const SALES_DATE: &str = "sales_date";
    pub const SALES_PRICE: &str = "sales_price";
    pub const PAYMENT_METHOD: &str = "payment_method";
    pub const CREDITOR: &str = "creditor";
    pub const CREDIT_AMOUNT: &str = "credit_amount";
    pub const CASH_BET: &str = "cash_bet";
    pub const LOAN_PERIOD: &str = "loan_period";
    pub const LEASING_PROVIDER: &str = "leasing_provider";
    pub const LEASING_AMOUNT: &str = "leasing_amount";
    pub const LEASING_PERIOD: &str = "leasing_period";
    pub const TRADE_IN_VEHICLE: &str = "trade_in_vehicle";
    pub const TRADE_IN_REGISTRATION_NUMBER: &str = "trade_in_registration_number";
    pub const TRADE_IN_PURCHASE_PRICE: &str = "trade_in_purchase_price";
    pub const TRADE_IN_MILEAGE: &str = "trade_in_mileage";
    pub const TRADE_IN_CREDIT_MARKING: &str = "trade_in_credit_marking";
    pub const TRADE_IN_CREDITOR: &str = "trade_in_creditor";

    // Purchase agreement.
    pub const PURCHASE_DATE: &str = "purchase_date";
    pub const PURCHASE_PRICE: &str = "purchase_price";
    pub const CREDIT_MARKING: &str = "credit_marking";
    pub const SETTLEMENT_AMOUNT: &str = "settlement_amount";
    pub const SETTLEMENT_DATE: &str = "settlement_date";

    // Agency agreement.
    pub const AGENCY_START_DATE: &str = "agency_start_date";
    pub const ASKING_PRICE: &str = "asking_price";
    pub const COMMISSION_RATE: &str = "commission_rate";
    pub const MINIMUM_PRICE: &str = "minimum_price";

    // Receipt / invoice.
    pub const RECEIPT_DATE: &str = "receipt_date";
    pub const AMOUNT: &str = "amount";
    pub const SWISH_NUMBER: &str = "swish_number";
    pub const PAYMENT_REFERENCE: &str = "payment_reference";

    // Corporation record.
    pub const INVOICE_ADDRESS: &str = "invoice_address";
    pub const CONTACT_PERSON: &str = "contact_person";
}

use keys::*;

const ORG_NUMBER_PATTERN: &str = r"^\d{6}-\d{4}$";
const NATIONAL_ID_PATTERN: &str = r"^(\d{6}|\d{8})-?\d{4}$";
const REGISTRATION_PATTERN: &str = r"^[A-Za-z]{3} ?\d{2}[A-Za-z0-9]$";
const POSTAL_CODE_PATTERN: &str = r"^\d{3} ?\d{2}$";
const SWISH_PATTERN: &str = r"^07\d{8}$";

// ─── Shared blocks ───────────────────────────────────────────────────

fn customer_fields(def: FormDefinition) -> FormDefinition {
    def.field(FieldDef::new(CUSTOMER_TYPE).required())
        .field(FieldDef::new(ORGANIZATION_NUMBER).pattern(ORG_NUMBER_PATTERN))
        .field(FieldDef::new(COMPANY_NAME))
        .field(FieldDef::new(NATIONAL_ID).pattern(NATIONAL_ID_PATTERN))
        .field(FieldDef::new(FIRST_NAME))
        .field(FieldDef::new(LAST_NAME))
        .field(FieldDef::new(STREET_ADDRESS).required())
        .field(FieldDef::new(CITY).required())
        .field(FieldDef::new(POSTAL_CODE).required().pattern(POSTAL_CODE_PATTERN))
        .field(FieldDef::new(EMAIL).email())
        .field(FieldDef::new(PHONE))
}

fn vehicle_fields(def: FormDefinition) -> FormDefinition {
    def.field(
        FieldDef::new(REGISTRATION_NUMBER)
            .required()
            .pattern(REGISTRATION_PATTERN),
    )
    .field(FieldDef::new(MAKE))
    .field(FieldDef::new(MODEL))
    .field(FieldDef::new(MODEL_YEAR).numeric_range(1900.0, 2100.0))
    .field(FieldDef::new(MILEAGE).numeric_min(0.0))
    .field(FieldDef::new(CHASSIS_NUMBER))
}

/// The customer-type rule: exactly one of the organization/person groups
/// is required; switching clears the other group.
fn customer_type_rule() -> DependencyRule {
    DependencyRule::on(CUSTOMER_TYPE)
        .when(
            "Company",
            Effect::new()
                .require(ORGANIZATION_NUMBER)
                .require(COMPANY_NAME)
                .clear(NATIONAL_ID)
                .clear(FIRST_NAME)
                .clear(LAST_NAME),
        )
        .when(
            "Private Individual",
            Effect::new()
                .require(NATIONAL_ID)
                .require(FIRST_NAME)
                .require(LAST_NAME)
                .clear(ORGANIZATION_NUMBER)
                .clear(COMPANY_NAME),
        )
    // No else-branch: an unrecognized customer type leaves the previous
    // requirements in place, matching the source forms' behavior.
}

// ─── Sales agreement ─────────────────────────────────────────────────

/// The sales agreement form: customer + vehicle + price/payment blocks,
/// with the financing/leasing and trade-in dependent field groups.
pub fn sales_agreement() -> Result<FormModel, FormError> {
    let mut def = FormDefinition::new("sales_agreement");
    def = customer_fields(def);
    def = vehicle_fields(def);
    let registry = def
        .field(FieldDef::new(SALES_DATE).required())
        .field(FieldDef::new(SALES_PRICE).required().numeric_min(0.0))
        .field(FieldDef::new(PAYMENT_METHOD).required())
        .field(FieldDef::new(CREDITOR))
        .field(FieldDef::new(CREDIT_AMOUNT).numeric_min(0.0))
        .field(FieldDef::new(CASH_BET).numeric_min(0.0))
        .field(FieldDef::new(LOAN_PERIOD).numeric_min(1.0))
        .field(FieldDef::new(LEASING_PROVIDER))
        .field(FieldDef::new(LEASING_AMOUNT).numeric_min(0.0))
        .field(FieldDef::new(LEASING_PERIOD).numeric_min(1.0))
        .field(FieldDef::new(TRADE_IN_VEHICLE).required().default_value("No"))
        .field(FieldDef::new(TRADE_IN_REGISTRATION_NUMBER).pattern(REGISTRATION_PATTERN))
        .field(FieldDef::new(TRADE_IN_PURCHASE_PRICE).numeric_min(0.0))
        .field(FieldDef::new(TRADE_IN_MILEAGE).numeric_min(0.0))
        .field(FieldDef::new(TRADE_IN_CREDIT_MARKING).default_value("No"))
        .field(FieldDef::new(TRADE_IN_CREDITOR))
        .build()?;

    let rules = RuleSet::new(vec![
        customer_type_rule(),
        DependencyRule::on(PAYMENT_METHOD)
            .when(
                "Financing",
                Effect::new()
                    .require(CREDITOR)
                    .require(CREDIT_AMOUNT)
                    .require(CASH_BET)
                    .require(LOAN_PERIOD)
                    .clear(LEASING_PROVIDER)
                    .clear(LEASING_AMOUNT)
                    .clear(LEASING_PERIOD),
            )
            .when(
                "Leasing",
                Effect::new()
                    .require(LEASING_PROVIDER)
                    .require(LEASING_AMOUNT)
                    .require(LEASING_PERIOD)
                    .clear(CREDITOR)
                    .clear(CREDIT_AMOUNT)
                    .clear(CASH_BET)
                    .clear(LOAN_PERIOD),
            )
            .otherwise(
                Effect::new()
                    .clear(CREDITOR)
                    .clear(CREDIT_AMOUNT)
                    .clear(CASH_BET)
                    .clear(LOAN_PERIOD)
                    .clear(LEASING_PROVIDER)
                    .clear(LEASING_AMOUNT)
                    .clear(LEASING_PERIOD),
            ),
        DependencyRule::on(TRADE_IN_VEHICLE)
            .when(
                "Yes",
                Effect::new()
                    .require(TRADE_IN_REGISTRATION_NUMBER)
                    .require(TRADE_IN_PURCHASE_PRICE)
                    .require(TRADE_IN_MILEAGE),
            )
            .otherwise(
                Effect::new()
                    .clear(TRADE_IN_REGISTRATION_NUMBER)
                    .clear(TRADE_IN_PURCHASE_PRICE)
                    .clear(TRADE_IN_MILEAGE)
                    .clear(TRADE_IN_CREDIT_MARKING)
                    .clear(TRADE_IN_CREDITOR)
                    // Clearing the credit-marking toggle does not re-fire
                    // its own rule, so the creditor requirement it may have
                    // promoted is demoted here explicitly.
                    .relax(TRADE_IN_CREDITOR),
            ),
        DependencyRule::on(TRADE_IN_CREDIT_MARKING)
            .when("Yes", Effect::new().require(TRADE_IN_CREDITOR))
            .otherwise(Effect::new().clear(TRADE_IN_CREDITOR)),
    ])?;

    FormModel::new(registry, rules)
}

// ─── Purchase agreement ──────────────────────────────────────────────

/// The purchase agreement form: the dealership buys a customer's vehicle.
/// A credit-marked vehicle requires the creditor settlement block.
pub fn purchase_agreement() -> Result<FormModel, FormError> {
    let mut def = FormDefinition::new("purchase_agreement");
    def = customer_fields(def);
    def = vehicle_fields(def);
    let registry = def
        .field(FieldDef::new(PURCHASE_DATE).required())
        .field(FieldDef::new(PURCHASE_PRICE).required().numeric_min(0.0))
        .field(FieldDef::new(CREDIT_MARKING).required().default_value("No"))
        .field(FieldDef::new(CREDITOR))
        .field(FieldDef::new(SETTLEMENT_AMOUNT).numeric_min(0.0))
        .field(FieldDef::new(SETTLEMENT_DATE))
        .build()?;

    let rules = RuleSet::new(vec![
        customer_type_rule(),
        DependencyRule::on(CREDIT_MARKING)
            .when(
                "Yes",
                Effect::new()
                    .require(CREDITOR)
                    .require(SETTLEMENT_AMOUNT)
                    .require(SETTLEMENT_DATE),
            )
            .otherwise(
                Effect::new()
                    .clear(CREDITOR)
                    .clear(SETTLEMENT_AMOUNT)
                    .clear(SETTLEMENT_DATE),
            ),
    ])?;

    FormModel::new(registry, rules)
}

// ─── Agency agreement ────────────────────────────────────────────────

/// The agency agreement form: the dealership sells a customer's vehicle
/// on commission.
pub fn agency_agreement() -> Result<FormModel, FormError> {
    let mut def = FormDefinition::new("agency_agreement");
    def = customer_fields(def);
    def = vehicle_fields(def);
    let registry = def
        .field(FieldDef::new(AGENCY_START_DATE).required())
        .field(FieldDef::new(ASKING_PRICE).required().numeric_min(0.0))
        .field(
            FieldDef::new(COMMISSION_RATE)
                .required()
                .numeric_range(0.0, 100.0),
        )
        .field(FieldDef::new(MINIMUM_PRICE).numeric_min(0.0))
        .build()?;

    let rules = RuleSet::new(vec![customer_type_rule()])?;
    FormModel::new(registry, rules)
}

// ─── Receipt / invoice ───────────────────────────────────────────────

/// The receipt form. Swish payments require the payer's Swish number for
/// payment registration; other methods clear it.
pub fn receipt() -> Result<FormModel, FormError> {
    let mut def = FormDefinition::new("receipt");
    def = customer_fields(def);
    let registry = def
        .field(FieldDef::new(RECEIPT_DATE).required())
        .field(FieldDef::new(AMOUNT).required().numeric_min(0.0))
        .field(FieldDef::new(PAYMENT_METHOD).required())
        .field(FieldDef::new(SWISH_NUMBER).pattern(SWISH_PATTERN))
        .field(FieldDef::new(PAYMENT_REFERENCE))
        .build()?;

    let rules = RuleSet::new(vec![
        customer_type_rule(),
        DependencyRule::on(PAYMENT_METHOD)
            .when("Swish", Effect::new().require(SWISH_NUMBER))
            .otherwise(Effect::new().clear(SWISH_NUMBER)),
    ])?;

    FormModel::new(registry, rules)
}

// ─── Record forms ────────────────────────────────────────────────────

/// The customer record form (no agreement attached).
pub fn customer_record() -> Result<FormModel, FormError> {
    let mut def = FormDefinition::new("customer_record");
    def = customer_fields(def);
    let registry = def.build()?;
    let rules = RuleSet::new(vec![customer_type_rule()])?;
    FormModel::new(registry, rules)
}

/// The corporation record form. No dependent field groups — every
/// requirement is static.
pub fn corporation_record() -> Result<FormModel, FormError> {
    let registry = FormDefinition::new("corporation_record")
        .field(
            FieldDef::new(ORGANIZATION_NUMBER)
                .required()
                .pattern(ORG_NUMBER_PATTERN),
        )
        .field(FieldDef::new(COMPANY_NAME).required())
        .field(FieldDef::new(INVOICE_ADDRESS).required())
        .field(FieldDef::new(CITY).required())
        .field(FieldDef::new(POSTAL_CODE).required().pattern(POSTAL_CODE_PATTERN))
        .field(FieldDef::new(CONTACT_PERSON))
        .field(FieldDef::new(EMAIL).email())
        .field(FieldDef::new(PHONE))
        .build()?;
    FormModel::new(registry, RuleSet::empty())
}

// ─── Tests ───────────────────────────────────────────────────────────
