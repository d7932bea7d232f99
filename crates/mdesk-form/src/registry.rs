//! # Field Registry
//!
//! Holds the authoritative value/validity/enabled state for every field in
//! a form instance. Fields are declared up front through a
//! [`FormDefinition`]; construction fails fast on duplicate keys, invalid
//! pattern expressions, and dangling cross-field references, so a registry
//! that constructs is a registry whose configuration is sound.
//!
//! ## Invariant
//!
//! A disabled field always reports valid regardless of its rules and
//! value, and is excluded from [`FieldRegistry::is_valid`] — but its value
//! still appears in [`FieldRegistry::snapshot`] unless a dependency rule
//! explicitly cleared it.

use std::collections::{BTreeMap, HashMap};

use crate::error::FormError;
use crate::validate::{Rule, Violation};

/// A copy of every field's current value, keyed by field key.
///
/// This is what the payload assembler consumes; it includes disabled
/// fields.
pub type Snapshot = BTreeMap<String, String>;

// ─── Declaration ─────────────────────────────────────────────────────

/// Declaration of one field: key, base rules, default value.
///
/// Rule declarations are checked when the owning [`FormDefinition`] is
/// built; a bad pattern expression becomes a [`FormError::InvalidPattern`]
/// naming this field.
#[derive(Debug)]
pub struct FieldDef {
    key: String,
    default_value: String,
    decls: Vec<Result<Rule, regex::Error>>,
}

impl FieldDef {
    /// Declare a field with the given key, defaulting to an empty value.
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            default_value: String::new(),
            decls: Vec::new(),
        }
    }

    /// Set the value the field holds at construction and after a clear.
    pub fn default_value(mut self, value: &str) -> Self {
        self.default_value = value.to_string();
        self
    }

    /// The field must be filled in.
    pub fn required(mut self) -> Self {
        self.decls.push(Ok(Rule::Required));
        self
    }

    /// The field must look like an email address.
    pub fn email(mut self) -> Self {
        self.decls.push(Ok(Rule::Email));
        self
    }

    /// The field must parse as a number of at least `min`.
    pub fn numeric_min(mut self, min: f64) -> Self {
        self.decls.push(Ok(Rule::NumericRange {
            min: Some(min),
            max: None,
        }));
        self
    }

    /// The field must parse as a number within `[min, max]`.
    pub fn numeric_range(mut self, min: f64, max: f64) -> Self {
        self.decls.push(Ok(Rule::NumericRange {
            min: Some(min),
            max: Some(max),
        }));
        self
    }

    /// The field must match the given regular expression.
    pub fn pattern(mut self, expr: &str) -> Self {
        self.decls.push(Rule::pattern(expr));
        self
    }

    /// The field must equal the named sibling field.
    pub fn equals(mut self, other: &str) -> Self {
        self.decls.push(Ok(Rule::EqualsField {
            other: other.to_string(),
        }));
        self
    }
}

/// Declares every field of one form. Built once per screen in
/// [`crate::catalog`]; `build` produces the runtime [`FieldRegistry`].
#[derive(Debug)]
pub struct FormDefinition {
    name: String,
    fields: Vec<FieldDef>,
}

impl FormDefinition {
    /// Start a definition. `name` identifies the form in log output.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            fields: Vec::new(),
        }
    }

    /// Add a field declaration. Declaration order is load-bearing: it is
    /// the order dependency rules fire for multi-field patches.
    pub fn field(mut self, def: FieldDef) -> Self {
        self.fields.push(def);
        self
    }

    /// Build the registry, surfacing configuration errors.
    pub fn build(self) -> Result<FieldRegistry, FormError> {
        let mut fields = Vec::with_capacity(self.fields.len());
        let mut index = HashMap::with_capacity(self.fields.len());

        for def in self.fields {
            if index.contains_key(&def.key) {
                return Err(FormError::DuplicateField { key: def.key });
            }

            let mut required = false;
            let mut rules = Vec::new();
            for decl in def.decls {
                match decl {
                    Ok(Rule::Required) => required = true,
                    Ok(rule) => rules.push(rule),
                    Err(source) => {
                        return Err(FormError::InvalidPattern {
                            field: def.key,
                            source,
                        })
                    }
                }
            }

            index.insert(def.key.clone(), fields.len());
            fields.push(FieldSpec {
                key: def.key,
                rules,
                default_value: def.default_value.clone(),
                value: def.default_value,
                touched: false,
                disabled: false,
                required,
                violations: Vec::new(),
            });
        }

        // Cross-field references must point at declared fields.
        for spec in &fields {
            for rule in &spec.rules {
                if let Rule::EqualsField { other } = rule {
                    if !index.contains_key(other) {
                        return Err(FormError::UnknownField { key: other.clone() });
                    }
                }
            }
        }

        Ok(FieldRegistry {
            name: self.name,
            fields,
            index,
        })
    }
}

// ─── Runtime State ───────────────────────────────────────────────────

/// One declared field with its per-instance mutable state.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    key: String,
    rules: Vec<Rule>,
    default_value: String,
    value: String,
    touched: bool,
    disabled: bool,
    required: bool,
    violations: Vec<Violation>,
}

impl FieldSpec {
    /// The field's unique key within its form.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The current UI-string value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The value at construction / after a clear.
    pub fn default_value(&self) -> &str {
        &self.default_value
    }

    /// Whether the user (or a rule) has written to this field.
    pub fn touched(&self) -> bool {
        self.touched
    }

    /// Whether the field is disabled. Disabled fields always report valid.
    pub fn disabled(&self) -> bool {
        self.disabled
    }

    /// Whether the field currently carries the required rule.
    pub fn required(&self) -> bool {
        self.required
    }

    /// Violations from the most recent revalidation of this field.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

/// The authoritative value/validity/enabled state for one form instance.
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    name: String,
    fields: Vec<FieldSpec>,
    index: HashMap<String, usize>,
}

impl FieldRegistry {
    /// The form name this registry was declared under.
    pub fn form_name(&self) -> &str {
        &self.name
    }

    /// Whether `key` is declared.
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Look up a field. Unknown keys are a configuration error.
    pub fn get(&self, key: &str) -> Result<&FieldSpec, FormError> {
        self.idx(key).map(|i| &self.fields[i])
    }

    /// Current value of a field.
    pub fn value(&self, key: &str) -> Result<&str, FormError> {
        self.get(key).map(FieldSpec::value)
    }

    /// Store a value, mark the field touched, and revalidate that field
    /// only. Global validity is recomputed lazily by [`Self::is_valid`].
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), FormError> {
        let i = self.idx(key)?;
        self.fields[i].value = value.to_string();
        self.fields[i].touched = true;
        self.revalidate(i);
        Ok(())
    }

    /// Reset a field to its default value and untouched state.
    ///
    /// Used by dependency rules for `Clear` overrides — a programmatic
    /// reset, not user input, so `touched` is dropped.
    pub fn reset_to_default(&mut self, key: &str) -> Result<(), FormError> {
        let i = self.idx(key)?;
        self.fields[i].value = self.fields[i].default_value.clone();
        self.fields[i].touched = false;
        self.revalidate(i);
        Ok(())
    }

    /// Promote or demote the required rule. Does not touch the value.
    pub fn set_required(&mut self, key: &str, required: bool) -> Result<(), FormError> {
        let i = self.idx(key)?;
        self.fields[i].required = required;
        self.revalidate(i);
        Ok(())
    }

    /// Toggle the disabled flag. A disabled field always reports valid.
    pub fn set_disabled(&mut self, key: &str, disabled: bool) -> Result<(), FormError> {
        let i = self.idx(key)?;
        self.fields[i].disabled = disabled;
        self.revalidate(i);
        Ok(())
    }

    /// Violations on one field from its most recent revalidation.
    pub fn field_errors(&self, key: &str) -> Result<&[Violation], FormError> {
        self.get(key).map(FieldSpec::violations)
    }

    /// True iff every non-disabled field passes all of its rules against
    /// its current value. Revalidates the whole registry, refreshing
    /// per-field violations — cross-field rules see current siblings.
    pub fn is_valid(&mut self) -> bool {
        for i in 0..self.fields.len() {
            self.revalidate(i);
        }
        self.fields.iter().all(|f| f.violations.is_empty())
    }

    /// Compute every non-disabled field's violations against current
    /// values, without updating the per-field caches.
    ///
    /// This is the read-only validity query the submission controller
    /// uses at its gate; [`Self::is_valid`] is the cache-refreshing
    /// variant the view layer queries.
    pub fn validate_all(&self) -> Vec<Violation> {
        (0..self.fields.len())
            .flat_map(|i| self.compute_violations(i))
            .collect()
    }

    /// A copy of all current values, including disabled fields.
    pub fn snapshot(&self) -> Snapshot {
        self.fields
            .iter()
            .map(|f| (f.key.clone(), f.value.clone()))
            .collect()
    }

    /// Field keys in declaration order.
    pub fn keys_in_order(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.key.as_str())
    }

    fn idx(&self, key: &str) -> Result<usize, FormError> {
        self.index
            .get(key)
            .copied()
            .ok_or_else(|| FormError::UnknownField {
                key: key.to_string(),
            })
    }

    fn revalidate(&mut self, i: usize) {
        let violations = self.compute_violations(i);
        self.fields[i].violations = violations;
    }

    fn compute_violations(&self, i: usize) -> Vec<Violation> {
        let spec = &self.fields[i];
        if spec.disabled {
            return Vec::new();
        }
        let sibling = |key: &str| {
            self.index
                .get(key)
                .map(|&j| self.fields[j].value.clone())
        };
        let mut violations = Vec::new();
        if spec.required {
            if let Some(v) = Rule::Required.check(&spec.key, &spec.value, &sibling) {
                violations.push(v);
            }
        }
        for rule in &spec.rules {
            if let Some(v) = rule.check(&spec.key, &spec.value, &sibling) {
                violations.push(v);
            }
        }
        violations
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::RuleKind;

    fn small_form() -> FieldRegistry {
        FormDefinition::new("test")
            .field(FieldDef::new("name").required())
            .field(FieldDef::new("email").email())
            .field(FieldDef::new("price").numeric_min(0.0))
            .field(FieldDef::new("note").default_value("-"))
            .build()
            .unwrap()
    }

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn test_build_rejects_duplicate_key() {
        let result = FormDefinition::new("dup")
            .field(FieldDef::new("name"))
            .field(FieldDef::new("name"))
            .build();
        assert!(matches!(result, Err(FormError::DuplicateField { .. })));
    }

    #[test]
    fn test_build_rejects_bad_pattern() {
        let result = FormDefinition::new("bad")
            .field(FieldDef::new("code").pattern("[unclosed"))
            .build();
        assert!(matches!(result, Err(FormError::InvalidPattern { .. })));
    }

    #[test]
    fn test_build_rejects_dangling_equals_target() {
        let result = FormDefinition::new("dangling")
            .field(FieldDef::new("email_confirm").equals("email"))
            .build();
        assert!(matches!(result, Err(FormError::UnknownField { .. })));
    }

    #[test]
    fn test_fields_start_at_default_untouched() {
        let reg = small_form();
        assert_eq!(reg.value("note").unwrap(), "-");
        assert!(!reg.get("note").unwrap().touched());
    }

    // ── Operations ───────────────────────────────────────────────────

    #[test]
    fn test_unknown_field_is_an_error() {
        let mut reg = small_form();
        assert!(matches!(
            reg.set_value("nope", "x"),
            Err(FormError::UnknownField { .. })
        ));
        assert!(matches!(reg.get("nope"), Err(FormError::UnknownField { .. })));
    }

    #[test]
    fn test_set_value_marks_touched_and_revalidates() {
        let mut reg = small_form();
        reg.set_value("email", "not-an-email").unwrap();
        let spec = reg.get("email").unwrap();
        assert!(spec.touched());
        assert_eq!(spec.violations()[0].kind, RuleKind::Email);
    }

    #[test]
    fn test_reset_to_default_drops_touched() {
        let mut reg = small_form();
        reg.set_value("note", "edited").unwrap();
        reg.reset_to_default("note").unwrap();
        let spec = reg.get("note").unwrap();
        assert_eq!(spec.value(), "-");
        assert!(!spec.touched());
    }

    #[test]
    fn test_set_required_swaps_rule_without_touching_value() {
        let mut reg = small_form();
        reg.set_value("email", "a@b.se").unwrap();
        reg.set_required("email", true).unwrap();
        assert_eq!(reg.value("email").unwrap(), "a@b.se");
        reg.set_value("email", "").unwrap();
        assert!(!reg.is_valid());
        reg.set_required("email", false).unwrap();
        reg.set_value("name", "x").unwrap();
        assert!(reg.is_valid());
    }

    // ── Validity ─────────────────────────────────────────────────────

    #[test]
    fn test_is_valid_requires_all_fields_to_pass() {
        let mut reg = small_form();
        assert!(!reg.is_valid()); // name is required and empty
        reg.set_value("name", "Anna").unwrap();
        assert!(reg.is_valid());
        reg.set_value("price", "-5").unwrap();
        assert!(!reg.is_valid());
    }

    #[test]
    fn test_disabled_field_always_valid() {
        let mut reg = small_form();
        assert!(!reg.is_valid()); // empty required name
        reg.set_disabled("name", true).unwrap();
        assert!(reg.is_valid());
        // Re-enabling brings the violation back.
        reg.set_disabled("name", false).unwrap();
        assert!(!reg.is_valid());
    }

    #[test]
    fn test_disabled_field_with_bad_value_is_ignored() {
        let mut reg = small_form();
        reg.set_value("name", "x").unwrap();
        reg.set_value("price", "not-a-number").unwrap();
        assert!(!reg.is_valid());
        reg.set_disabled("price", true).unwrap();
        assert!(reg.is_valid());
    }

    // ── Snapshot ─────────────────────────────────────────────────────

    #[test]
    fn test_snapshot_includes_disabled_fields() {
        let mut reg = small_form();
        reg.set_value("price", "100").unwrap();
        reg.set_disabled("price", true).unwrap();
        let snap = reg.snapshot();
        assert_eq!(snap.get("price").map(String::as_str), Some("100"));
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let mut reg = small_form();
        let before = reg.snapshot();
        reg.set_value("name", "changed").unwrap();
        assert_eq!(before.get("name").map(String::as_str), Some(""));
    }

    #[test]
    fn test_keys_in_declaration_order() {
        let reg = small_form();
        let keys: Vec<_> = reg.keys_in_order().collect();
        assert_eq!(keys, vec!["name", "email", "price", "note"]);
    }
}
