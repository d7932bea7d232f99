//! # Form Model
//!
//! The facade that owns one form's field registry and dependency rules
//! and keeps them consistent. All value writes go through here so that
//! rule evaluation is synchronous and complete before control returns —
//! a caller (in particular the payload assembler) never reads a
//! mid-transition registry.

use crate::error::FormError;
use crate::registry::{FieldRegistry, Snapshot};
use crate::rules::RuleSet;
use crate::validate::Violation;

/// One form instance: registry + rules, consistent at every return.
#[derive(Debug, Clone)]
pub struct FormModel {
    registry: FieldRegistry,
    rules: RuleSet,
}

impl FormModel {
    /// Assemble a form from its registry and rule table.
    ///
    /// Validates every key the rules reference against the registry, so a
    /// misconfigured table fails here — at construction — rather than
    /// mid-interaction.
    pub fn new(registry: FieldRegistry, rules: RuleSet) -> Result<Self, FormError> {
        rules.validate_against(&registry)?;
        Ok(Self { registry, rules })
    }

    /// Apply one user edit: store the value, then fire the field's
    /// dependency rule (if any) to completion.
    pub fn set_field(&mut self, key: &str, value: &str) -> Result<(), FormError> {
        self.registry.set_value(key, value)?;
        self.rules
            .on_trigger_changed(&mut self.registry, key, value)
    }

    /// Apply several values at once (a programmatic patch, e.g. from a
    /// registry lookup), then fire the affected rules in field-declaration
    /// order. Rules read the registry's settled value at fire time.
    pub fn patch(&mut self, entries: &[(&str, &str)]) -> Result<(), FormError> {
        for (key, value) in entries {
            self.registry.set_value(key, value)?;
        }
        let ordered: Vec<String> = self
            .registry
            .keys_in_order()
            .filter(|k| entries.iter().any(|(key, _)| key == k))
            .filter(|k| self.rules.is_trigger(k))
            .map(str::to_string)
            .collect();
        for key in ordered {
            let value = self.registry.value(&key)?.to_string();
            self.rules
                .on_trigger_changed(&mut self.registry, &key, &value)?;
        }
        Ok(())
    }

    /// Toggle a field's disabled flag.
    pub fn set_disabled(&mut self, key: &str, disabled: bool) -> Result<(), FormError> {
        self.registry.set_disabled(key, disabled)
    }

    /// Current value of a field.
    pub fn value(&self, key: &str) -> Result<&str, FormError> {
        self.registry.value(key)
    }

    /// Violations on one field from its most recent revalidation.
    pub fn field_errors(&self, key: &str) -> Result<&[Violation], FormError> {
        self.registry.field_errors(key)
    }

    /// Revalidate everything and report global validity.
    pub fn is_valid(&mut self) -> bool {
        self.registry.is_valid()
    }

    /// Compute all current violations without touching cached state.
    pub fn validate(&self) -> Vec<Violation> {
        self.registry.validate_all()
    }

    /// A copy of all current values for the payload assembler.
    pub fn snapshot(&self) -> Snapshot {
        self.registry.snapshot()
    }

    /// Read-only access to the underlying registry.
    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
