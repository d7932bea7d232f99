//! # mdesk-assemble — Payload Assembly
//!
//! The pure transform from a settled form snapshot (plus at most one
//! lookup result per customer/vehicle slot) to the request body of one of
//! the four agreement families. The draft and create-and-sign operations
//! share each body — they differ only in which endpoint receives it.
//!
//! ## Design
//!
//! - The assembler reads values, it never mutates the form. Each call
//!   builds a fresh payload; nothing is cached or retried.
//! - Numeric fields are coerced from their UI string form HERE and only
//!   here. The field registry stays representation-agnostic, and type
//!   coercion has exactly one place that needs testing.
//! - Callers gate on `FormModel::is_valid()` before assembling. Over a
//!   valid snapshot the assembler is total; its error arms are reachable
//!   only when that gate was bypassed, and the submission controller
//!   reports them as internal defects rather than user validation errors.

pub mod assembler;
pub mod error;
pub mod payload;

pub use assembler::{
    assemble, assemble_agency, assemble_purchase, assemble_receipt, assemble_sales,
};
pub use error::AssembleError;
pub use payload::{
    AgencyAgreementPayload, AgencyDetails, AgreementPayload, FinancingDetails, LeasingDetails,
    OrganizationDetail, PersonDetail, PurchaseAgreementPayload, PurchaseDetails, ReceiptDetails,
    ReceiptPayload, SalesAgreementPayload, SalesDetails, SettlementDetails, SwishRegistration,
    TradeInDetails, VehicleDetails,
};
