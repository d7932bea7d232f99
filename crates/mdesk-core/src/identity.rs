//! # Natural-Key Newtypes
//!
//! Newtype wrappers for the natural keys used to search the external
//! registries, plus the backend's opaque agreement identifier. These
//! prevent accidental key confusion — you cannot pass a `NationalId`
//! where an `OrganizationNumber` is expected.
//!
//! ## Invariant
//!
//! Malformed keys are **rejected at construction** — a registry search is
//! never issued with a key that could not possibly match, and the shape
//! check happens exactly once.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

fn org_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{6}-\d{4}$").expect("static pattern"))
}

fn national_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Accepts both 10-digit (YYMMDD-NNNN) and 12-digit (YYYYMMDD-NNNN) forms.
    static PATTERN: &str = r"^(\d{6}|\d{8})-?\d{4}$";
    RE.get_or_init(|| Regex::new(PATTERN).expect("static pattern"))
}

fn registration_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Standard plates: three letters, two digits, one digit or letter.
    RE.get_or_init(|| Regex::new(r"^[A-Z]{3}\d{2}[A-Z0-9]$").expect("static pattern"))
}

/// Organization number in NNNNNN-NNNN form (e.g., `556677-8899`).
///
/// The natural key for organization registry search and the
/// `organization_detail` payload block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrganizationNumber(String);

impl OrganizationNumber {
    /// Validate and construct an organization number.
    pub fn new(raw: &str) -> Result<Self, CoreError> {
        let trimmed = raw.trim();
        if org_number_re().is_match(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(CoreError::InvalidOrganizationNumber(raw.to_string()))
        }
    }

    /// The canonical string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Personal identity number, 10- or 12-digit form, with or without the
/// separator (e.g., `19850712-1234`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NationalId(String);

impl NationalId {
    /// Validate and construct a national id.
    pub fn new(raw: &str) -> Result<Self, CoreError> {
        let trimmed = raw.trim();
        if national_id_re().is_match(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(CoreError::InvalidNationalId(raw.to_string()))
        }
    }

    /// The canonical string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Vehicle registration number (e.g., `ABC123` or `ABC12D`).
///
/// Construction uppercases and strips interior whitespace, so `abc 123`
/// and `ABC123` produce the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegistrationNumber(String);

impl RegistrationNumber {
    /// Normalize, validate, and construct a registration number.
    pub fn new(raw: &str) -> Result<Self, CoreError> {
        let normalized: String = raw
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_uppercase();
        if registration_re().is_match(&normalized) {
            Ok(Self(normalized))
        } else {
            Err(CoreError::InvalidRegistrationNumber(raw.to_string()))
        }
    }

    /// The canonical (uppercased, unspaced) string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Opaque backend identifier for a stored agreement.
///
/// The backend returns this under either `_id` or `agreement_id`; the
/// client normalizes both spellings into this one type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgreementId(String);

impl AgreementId {
    /// Construct from a backend-issued identifier. Rejects empty strings.
    pub fn new(raw: impl Into<String>) -> Result<Self, CoreError> {
        let s = raw.into();
        if s.trim().is_empty() {
            return Err(CoreError::EmptyAgreementId);
        }
        Ok(Self(s))
    }

    /// The backend identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OrganizationNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for NationalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for RegistrationNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for AgreementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "agreement:{}", self.0)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Organization number ──────────────────────────────────────────

    #[test]
    fn test_org_number_valid() {
        let n = OrganizationNumber::new("556677-8899").unwrap();
        assert_eq!(n.as_str(), "556677-8899");
    }

    #[test]
    fn test_org_number_trims_whitespace() {
        let n = OrganizationNumber::new("  556677-8899 ").unwrap();
        assert_eq!(n.as_str(), "556677-8899");
    }

    #[test]
    fn test_org_number_rejects_missing_dash() {
        assert!(OrganizationNumber::new("5566778899").is_err());
    }

    #[test]
    fn test_org_number_rejects_letters() {
        assert!(OrganizationNumber::new("55667A-8899").is_err());
    }

    // ── National id ──────────────────────────────────────────────────

    #[test]
    fn test_national_id_ten_digit() {
        assert!(NationalId::new("850712-1234").is_ok());
    }

    #[test]
    fn test_national_id_twelve_digit() {
        assert!(NationalId::new("19850712-1234").is_ok());
    }

    #[test]
    fn test_national_id_without_separator() {
        assert!(NationalId::new("198507121234").is_ok());
    }

    #[test]
    fn test_national_id_rejects_short_input() {
        assert!(NationalId::new("12345").is_err());
    }

    // ── Registration number ──────────────────────────────────────────

    #[test]
    fn test_registration_standard_plate() {
        let r = RegistrationNumber::new("ABC123").unwrap();
        assert_eq!(r.as_str(), "ABC123");
    }

    #[test]
    fn test_registration_letter_suffix_plate() {
        assert!(RegistrationNumber::new("ABC12D").is_ok());
    }

    #[test]
    fn test_registration_normalizes_case_and_spaces() {
        let r = RegistrationNumber::new("abc 123").unwrap();
        assert_eq!(r.as_str(), "ABC123");
    }

    #[test]
    fn test_registration_rejects_wrong_shape() {
        assert!(RegistrationNumber::new("AB1234").is_err());
        assert!(RegistrationNumber::new("ABCD12").is_err());
    }

    // ── Agreement id ─────────────────────────────────────────────────

    #[test]
    fn test_agreement_id_round_trip() {
        let id = AgreementId::new("64f1aa0c9d2e").unwrap();
        assert_eq!(id.as_str(), "64f1aa0c9d2e");
        assert_eq!(id.to_string(), "agreement:64f1aa0c9d2e");
    }

    #[test]
    fn test_agreement_id_rejects_empty() {
        assert!(AgreementId::new("").is_err());
        assert!(AgreementId::new("   ").is_err());
    }

    // ── Serde ────────────────────────────────────────────────────────

    #[test]
    fn test_org_number_serializes_as_plain_string() {
        let n = OrganizationNumber::new("556677-8899").unwrap();
        assert_eq!(serde_json::to_string(&n).unwrap(), "\"556677-8899\"");
    }
}
