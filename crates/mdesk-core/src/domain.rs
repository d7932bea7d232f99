//! # Agreement Discriminants — Single Source of Truth
//!
//! Defines the discriminant enums that drive conditional validation and
//! payload assembly. These are the ONE definition used across the entire
//! stack. Every `match` on them must be exhaustive — adding a payment
//! method forces every form, rule table, and payload shape to handle it
//! at compile time.
//!
//! Each discriminant bridges two string worlds:
//!
//! - the **UI value** — the exact option string the form control produces
//!   (`"Private Individual"`, `"Yes"`), parsed via `from_ui`;
//! - the **wire value** — the serde representation the backend stores.
//!
//! For these forms the two happen to coincide, which is precisely why the
//! bridge lives in one place: when the backend diverges, only the serde
//! attributes here change.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CoreError;

/// The four agreement types handled by the back office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgreementKind {
    /// Dealership sells a vehicle to a customer.
    Sales,
    /// Dealership purchases a vehicle from a customer.
    Purchase,
    /// Dealership sells a customer's vehicle on commission.
    Agency,
    /// Receipt / invoice for a completed payment.
    Receipt,
}

impl AgreementKind {
    /// All agreement kinds in canonical order.
    pub fn all() -> &'static [AgreementKind] {
        &[Self::Sales, Self::Purchase, Self::Agency, Self::Receipt]
    }

    /// The backend URL path segment for this agreement family.
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::Sales => "sales",
            Self::Purchase => "purchase",
            Self::Agency => "agency",
            Self::Receipt => "receipt",
        }
    }
}

impl std::fmt::Display for AgreementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path_segment())
    }
}

/// Whether the counterparty is a company or a private individual.
///
/// This is the trigger discriminant for the organization/person dependent
/// field groups: exactly one of the two detail blocks is required and
/// assembled, never both and never neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomerType {
    /// Counterparty identified by organization number.
    Company,
    /// Counterparty identified by national id.
    #[serde(rename = "Private Individual")]
    PrivateIndividual,
}

impl CustomerType {
    /// The option string the customer-type form control produces.
    pub fn ui_value(&self) -> &'static str {
        match self {
            Self::Company => "Company",
            Self::PrivateIndividual => "Private Individual",
        }
    }

    /// Parse a form-control option string.
    pub fn from_ui(value: &str) -> Option<Self> {
        match value {
            "Company" => Some(Self::Company),
            "Private Individual" => Some(Self::PrivateIndividual),
            _ => None,
        }
    }
}

impl FromStr for CustomerType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_ui(s).ok_or_else(|| CoreError::UnrecognizedDiscriminant {
            what: "customer type",
            value: s.to_string(),
        })
    }
}

/// How the customer pays.
///
/// `Financing` and `Leasing` each pull in their own dependent field group;
/// `Swish` additionally requires the payment-registration block on
/// receipts. `Cash` requires none of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Paid in full at signing.
    Cash,
    /// Loan-financed; creditor and loan terms required.
    Financing,
    /// Leased; leasing provider and terms required.
    Leasing,
    /// Paid via Swish; payment reference required on receipts.
    Swish,
}

impl PaymentMethod {
    /// The option string the payment-method form control produces.
    pub fn ui_value(&self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Financing => "Financing",
            Self::Leasing => "Leasing",
            Self::Swish => "Swish",
        }
    }

    /// Parse a form-control option string.
    pub fn from_ui(value: &str) -> Option<Self> {
        match value {
            "Cash" => Some(Self::Cash),
            "Financing" => Some(Self::Financing),
            "Leasing" => Some(Self::Leasing),
            "Swish" => Some(Self::Swish),
            _ => None,
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_ui(s).ok_or_else(|| CoreError::UnrecognizedDiscriminant {
            what: "payment method",
            value: s.to_string(),
        })
    }
}

/// Whether a trade-in vehicle is part of the deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeIn {
    Yes,
    No,
}

impl TradeIn {
    /// The option string the trade-in toggle produces.
    pub fn ui_value(&self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }

    /// Parse a form-control option string.
    pub fn from_ui(value: &str) -> Option<Self> {
        match value {
            "Yes" => Some(Self::Yes),
            "No" => Some(Self::No),
            _ => None,
        }
    }
}

/// Whether the purchased vehicle carries an outstanding credit marking.
///
/// A marked vehicle requires the creditor and settlement field group on
/// purchase agreements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreditMarking {
    Yes,
    No,
}

impl CreditMarking {
    /// The option string the credit-marking toggle produces.
    pub fn ui_value(&self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }

    /// Parse a form-control option string.
    pub fn from_ui(value: &str) -> Option<Self> {
        match value {
            "Yes" => Some(Self::Yes),
            "No" => Some(Self::No),
            _ => None,
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agreement_kind_path_segments() {
        assert_eq!(AgreementKind::Sales.path_segment(), "sales");
        assert_eq!(AgreementKind::Purchase.path_segment(), "purchase");
        assert_eq!(AgreementKind::Agency.path_segment(), "agency");
        assert_eq!(AgreementKind::Receipt.path_segment(), "receipt");
    }

    #[test]
    fn test_customer_type_ui_round_trip() {
        for ct in [CustomerType::Company, CustomerType::PrivateIndividual] {
            assert_eq!(CustomerType::from_ui(ct.ui_value()), Some(ct));
        }
    }

    #[test]
    fn test_customer_type_rejects_unknown() {
        assert_eq!(CustomerType::from_ui("Org"), None);
        assert!("Org".parse::<CustomerType>().is_err());
    }

    #[test]
    fn test_customer_type_wire_value_matches_ui() {
        let json = serde_json::to_string(&CustomerType::PrivateIndividual).unwrap();
        assert_eq!(json, "\"Private Individual\"");
    }

    #[test]
    fn test_payment_method_ui_round_trip() {
        for pm in [
            PaymentMethod::Cash,
            PaymentMethod::Financing,
            PaymentMethod::Leasing,
            PaymentMethod::Swish,
        ] {
            assert_eq!(PaymentMethod::from_ui(pm.ui_value()), Some(pm));
        }
    }

    #[test]
    fn test_trade_in_parse() {
        assert_eq!(TradeIn::from_ui("Yes"), Some(TradeIn::Yes));
        assert_eq!(TradeIn::from_ui("No"), Some(TradeIn::No));
        assert_eq!(TradeIn::from_ui("yes"), None);
    }
}
