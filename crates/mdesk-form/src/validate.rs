//! # Base Validators
//!
//! The per-field validation rules a form declares: required, email shape,
//! numeric range, regex pattern, and cross-field equality. Each rule is a
//! pure predicate over the current value (and optionally a sibling value);
//! failures are reported as structured [`Violation`]s, never as errors.
//!
//! ## Empty-Value Policy
//!
//! Only `Required` fails on an empty value. Every other rule passes when
//! the value is empty — an optional email field with nothing typed into it
//! is valid, not a malformed address.

use std::sync::OnceLock;

use regex::Regex;

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("static pattern"))
}

/// Parse a numeric field from its UI string form.
///
/// Tolerates surrounding whitespace, interior spaces used as thousands
/// separators, and a comma decimal separator. Returns `None` for anything
/// that is not a number — the caller decides whether that is a violation
/// (here) or a defect (in the payload assembler).
pub fn parse_numeric(value: &str) -> Option<f64> {
    let cleaned: String = value
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

/// Discriminant of a [`Rule`], used in violation reporting and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Required,
    Email,
    NumericRange,
    Pattern,
    EqualsField,
}

/// A single declared validation rule.
#[derive(Debug, Clone)]
pub enum Rule {
    /// The field must have a non-blank value.
    Required,
    /// The value must look like an email address.
    Email,
    /// The value must parse as a number within the given bounds.
    NumericRange {
        /// Inclusive lower bound, if any.
        min: Option<f64>,
        /// Inclusive upper bound, if any.
        max: Option<f64>,
    },
    /// The value must match a regular expression.
    Pattern {
        /// The source expression, kept for violation messages.
        expr: String,
        /// The compiled expression.
        regex: Regex,
    },
    /// The value must equal another field's current value.
    EqualsField {
        /// Key of the sibling field to compare against.
        other: String,
    },
}

impl Rule {
    /// Compile a pattern rule. Fails if the expression is not a valid
    /// regular expression — a configuration error surfaced at form
    /// construction.
    pub fn pattern(expr: &str) -> Result<Self, regex::Error> {
        Ok(Self::Pattern {
            expr: expr.to_string(),
            regex: Regex::new(expr)?,
        })
    }

    /// The rule's discriminant.
    pub fn kind(&self) -> RuleKind {
        match self {
            Self::Required => RuleKind::Required,
            Self::Email => RuleKind::Email,
            Self::NumericRange { .. } => RuleKind::NumericRange,
            Self::Pattern { .. } => RuleKind::Pattern,
            Self::EqualsField { .. } => RuleKind::EqualsField,
        }
    }

    /// Evaluate this rule against a field's current value.
    ///
    /// `sibling` resolves another field's current value for
    /// [`Rule::EqualsField`]; the registry guarantees at construction that
    /// the referenced key exists.
    pub(crate) fn check<F>(&self, field: &str, value: &str, sibling: F) -> Option<Violation>
    where
        F: Fn(&str) -> Option<String>,
    {
        let blank = value.trim().is_empty();
        match self {
            Self::Required => blank.then(|| Violation {
                field: field.to_string(),
                kind: RuleKind::Required,
                message: "value is required".to_string(),
            }),
            Self::Email => (!blank && !email_re().is_match(value.trim())).then(|| Violation {
                field: field.to_string(),
                kind: RuleKind::Email,
                message: format!("not a valid email address: {value:?}"),
            }),
            Self::NumericRange { min, max } => {
                if blank {
                    return None;
                }
                let out_of_range = match parse_numeric(value) {
                    None => true,
                    Some(n) => {
                        min.map(|lo| n < lo).unwrap_or(false)
                            || max.map(|hi| n > hi).unwrap_or(false)
                    }
                };
                out_of_range.then(|| Violation {
                    field: field.to_string(),
                    kind: RuleKind::NumericRange,
                    message: format!("not a number in range: {value:?}"),
                })
            }
            Self::Pattern { expr, regex } => {
                (!blank && !regex.is_match(value.trim())).then(|| Violation {
                    field: field.to_string(),
                    kind: RuleKind::Pattern,
                    message: format!("value {value:?} does not match {expr:?}"),
                })
            }
            Self::EqualsField { other } => {
                if blank {
                    return None;
                }
                let matches = sibling(other).map(|s| s == value).unwrap_or(false);
                (!matches).then(|| Violation {
                    field: field.to_string(),
                    kind: RuleKind::EqualsField,
                    message: format!("value does not match field {other:?}"),
                })
            }
        }
    }
}

/// One failed rule on one field — queryable state consumed by the view
/// layer to render an inline message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// The field the violation is on.
    pub field: String,
    /// Which rule failed.
    pub kind: RuleKind,
    /// Human-readable description.
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn no_sibling(_: &str) -> Option<String> {
        None
    }

    // ── Required ─────────────────────────────────────────────────────

    #[test]
    fn test_required_fails_on_empty() {
        let v = Rule::Required.check("name", "", no_sibling);
        assert_eq!(v.unwrap().kind, RuleKind::Required);
    }

    #[test]
    fn test_required_fails_on_whitespace() {
        assert!(Rule::Required.check("name", "   ", no_sibling).is_some());
    }

    #[test]
    fn test_required_passes_on_value() {
        assert!(Rule::Required.check("name", "Acme AB", no_sibling).is_none());
    }

    // ── Email ────────────────────────────────────────────────────────

    #[test]
    fn test_email_passes_on_empty() {
        assert!(Rule::Email.check("email", "", no_sibling).is_none());
    }

    #[test]
    fn test_email_accepts_plain_address() {
        assert!(Rule::Email
            .check("email", "anna@example.se", no_sibling)
            .is_none());
    }

    #[test]
    fn test_email_rejects_missing_domain() {
        assert!(Rule::Email.check("email", "anna@", no_sibling).is_some());
        assert!(Rule::Email.check("email", "anna", no_sibling).is_some());
    }

    // ── Numeric range ────────────────────────────────────────────────

    #[test]
    fn test_numeric_range_passes_on_empty() {
        let rule = Rule::NumericRange {
            min: Some(0.0),
            max: None,
        };
        assert!(rule.check("price", "", no_sibling).is_none());
    }

    #[test]
    fn test_numeric_range_accepts_in_range() {
        let rule = Rule::NumericRange {
            min: Some(0.0),
            max: Some(100.0),
        };
        assert!(rule.check("price", "42", no_sibling).is_none());
    }

    #[test]
    fn test_numeric_range_rejects_below_min() {
        let rule = Rule::NumericRange {
            min: Some(0.0),
            max: None,
        };
        assert!(rule.check("price", "-1", no_sibling).is_some());
    }

    #[test]
    fn test_numeric_range_rejects_non_number() {
        let rule = Rule::NumericRange {
            min: None,
            max: None,
        };
        assert!(rule.check("price", "abc", no_sibling).is_some());
    }

    #[test]
    fn test_numeric_accepts_comma_decimal_and_spaces() {
        let rule = Rule::NumericRange {
            min: Some(0.0),
            max: None,
        };
        assert!(rule.check("price", "189 900,50", no_sibling).is_none());
        assert_eq!(parse_numeric("189 900,50"), Some(189900.50));
    }

    // ── Pattern ──────────────────────────────────────────────────────

    #[test]
    fn test_pattern_matches() {
        let rule = Rule::pattern(r"^\d{5}$").unwrap();
        assert!(rule.check("postal_code", "11122", no_sibling).is_none());
        assert!(rule.check("postal_code", "1112", no_sibling).is_some());
    }

    #[test]
    fn test_pattern_rejects_bad_expression() {
        assert!(Rule::pattern("[unclosed").is_err());
    }

    // ── Cross-field equality ─────────────────────────────────────────

    #[test]
    fn test_equals_field_matches_sibling() {
        let rule = Rule::EqualsField {
            other: "email".to_string(),
        };
        let sibling = |key: &str| (key == "email").then(|| "a@b.se".to_string());
        assert!(rule.check("email_confirm", "a@b.se", sibling).is_none());
        assert!(rule.check("email_confirm", "x@b.se", sibling).is_some());
    }
}
