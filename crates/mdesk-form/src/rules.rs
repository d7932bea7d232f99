//! # Dependency Rule Set
//!
//! Keeps the field registry consistent whenever a trigger field's value
//! changes. A rule maps trigger values to branches; each branch carries an
//! [`Effect`] that promotes fields to required, demotes them, and
//! overrides values. One dispatcher function evaluates the table — the
//! reactive subscriptions of the source forms reduced to a plain function
//! over plain data.
//!
//! ## Invariants
//!
//! - Applying a branch is idempotent: firing the same trigger value twice
//!   leaves the registry exactly as firing it once does.
//! - Exactly one branch is active per rule at any time. Switching branches
//!   first demotes everything the previous branch required (unless the new
//!   branch also requires it) and resets everything it overrode (unless
//!   the new branch also overrides it), then applies the new branch.
//! - A trigger value matching no branch, on a rule with no else-branch,
//!   leaves the registry unchanged — the previous branch stays active.
//!   Intentional permissiveness, logged at `debug!` and covered by tests.

use std::collections::HashMap;

use crate::error::FormError;
use crate::registry::FieldRegistry;

// ─── Effects ─────────────────────────────────────────────────────────

/// A value override carried by a branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Override {
    /// Reset the field to its declared default.
    Clear,
    /// Write a specific value.
    Set(String),
}

/// What one branch does to the registry when it becomes active.
#[derive(Debug, Clone, Default)]
pub struct Effect {
    require: Vec<String>,
    relax: Vec<String>,
    overrides: Vec<(String, Override)>,
}

impl Effect {
    /// An effect that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Promote a field to required while this branch is active.
    pub fn require(mut self, key: &str) -> Self {
        self.require.push(key.to_string());
        self
    }

    /// Explicitly demote a field to optional.
    ///
    /// Demotion of the previous branch's requirements is automatic; `relax`
    /// is for fields some *other* mechanism (e.g., the field's own base
    /// declaration) made required.
    pub fn relax(mut self, key: &str) -> Self {
        self.relax.push(key.to_string());
        self
    }

    /// Write a value into a field when this branch activates.
    pub fn set(mut self, key: &str, value: &str) -> Self {
        self.overrides
            .push((key.to_string(), Override::Set(value.to_string())));
        self
    }

    /// Reset a field to its default when this branch activates.
    pub fn clear(mut self, key: &str) -> Self {
        self.overrides.push((key.to_string(), Override::Clear));
        self
    }

    fn requires_key(&self, key: &str) -> bool {
        self.require.iter().any(|k| k == key)
    }

    fn overrides_key(&self, key: &str) -> bool {
        self.overrides.iter().any(|(k, _)| k == key)
    }

    fn referenced_keys(&self) -> impl Iterator<Item = &str> {
        self.require
            .iter()
            .chain(self.relax.iter())
            .map(String::as_str)
            .chain(self.overrides.iter().map(|(k, _)| k.as_str()))
    }
}

// ─── Rules ───────────────────────────────────────────────────────────

/// One reactive binding: a trigger field and its value-keyed branches.
#[derive(Debug, Clone)]
pub struct DependencyRule {
    trigger: String,
    branches: Vec<(String, Effect)>,
    else_branch: Option<Effect>,
}

impl DependencyRule {
    /// Start a rule on the given trigger field.
    pub fn on(trigger: &str) -> Self {
        Self {
            trigger: trigger.to_string(),
            branches: Vec::new(),
            else_branch: None,
        }
    }

    /// Add a branch for an exact trigger value.
    pub fn when(mut self, value: &str, effect: Effect) -> Self {
        self.branches.push((value.to_string(), effect));
        self
    }

    /// Set the wildcard branch taken when no exact value matches.
    pub fn otherwise(mut self, effect: Effect) -> Self {
        self.else_branch = Some(effect);
        self
    }

    /// The trigger field key.
    pub fn trigger(&self) -> &str {
        &self.trigger
    }

    fn resolve(&self, value: &str) -> Option<&Effect> {
        self.branches
            .iter()
            .find(|(v, _)| v == value)
            .map(|(_, e)| e)
            .or(self.else_branch.as_ref())
    }
}

// ─── Dispatcher ──────────────────────────────────────────────────────

/// Bookkeeping for the branch a rule most recently applied: what it holds
/// required and what it overrode. This is what makes branch switching a
/// full undo-then-apply rather than an accumulation.
#[derive(Debug, Clone, Default)]
struct AppliedBranch {
    required: Vec<String>,
    overridden: Vec<String>,
}

/// The dependency rules of one form, with per-rule active-branch state.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<DependencyRule>,
    applied: Vec<AppliedBranch>,
    trigger_index: HashMap<String, usize>,
}

impl RuleSet {
    /// Build a rule set. Each trigger may carry at most one rule, so that
    /// its branch bookkeeping has a single owner.
    pub fn new(rules: Vec<DependencyRule>) -> Result<Self, FormError> {
        let mut trigger_index = HashMap::with_capacity(rules.len());
        for (i, rule) in rules.iter().enumerate() {
            if trigger_index.insert(rule.trigger.clone(), i).is_some() {
                return Err(FormError::DuplicateTrigger {
                    trigger: rule.trigger.clone(),
                });
            }
        }
        let applied = vec![AppliedBranch::default(); rules.len()];
        Ok(Self {
            rules,
            applied,
            trigger_index,
        })
    }

    /// An empty rule set, for forms with no dependent field groups.
    pub fn empty() -> Self {
        Self {
            rules: Vec::new(),
            applied: Vec::new(),
            trigger_index: HashMap::new(),
        }
    }

    /// Check every key this rule set references against the registry.
    ///
    /// Called at form construction so misconfigured tables fail in tests,
    /// not in front of a user.
    pub fn validate_against(&self, registry: &FieldRegistry) -> Result<(), FormError> {
        for rule in &self.rules {
            if !registry.contains(&rule.trigger) {
                return Err(FormError::UnknownField {
                    key: rule.trigger.clone(),
                });
            }
            let effects = rule
                .branches
                .iter()
                .map(|(_, e)| e)
                .chain(rule.else_branch.as_ref());
            for effect in effects {
                for key in effect.referenced_keys() {
                    if !registry.contains(key) {
                        return Err(FormError::UnknownField {
                            key: key.to_string(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Whether any rule fires on this field.
    pub fn is_trigger(&self, key: &str) -> bool {
        self.trigger_index.contains_key(key)
    }

    /// Evaluate the rule for `trigger` against its new value.
    ///
    /// No rule on the field is a no-op. A value with no matching branch and
    /// no else-branch leaves the registry unchanged. Otherwise the previous
    /// branch is fully undone and the new branch applied; the whole
    /// evaluation is synchronous — callers never observe a partial state.
    pub fn on_trigger_changed(
        &mut self,
        registry: &mut FieldRegistry,
        trigger: &str,
        new_value: &str,
    ) -> Result<(), FormError> {
        let Some(&ri) = self.trigger_index.get(trigger) else {
            return Ok(());
        };
        let Some(effect) = self.rules[ri].resolve(new_value) else {
            tracing::debug!(
                form = registry.form_name(),
                trigger,
                value = new_value,
                "no matching branch; requirements left unchanged"
            );
            return Ok(());
        };
        let effect = effect.clone();

        // Undo the previous branch, except where the new branch takes over.
        let prev = std::mem::take(&mut self.applied[ri]);
        for key in &prev.required {
            if !effect.requires_key(key) {
                registry.set_required(key, false)?;
            }
        }
        for key in &prev.overridden {
            if !effect.overrides_key(key) {
                registry.reset_to_default(key)?;
            }
        }

        // Apply the new branch.
        for key in &effect.require {
            registry.set_required(key, true)?;
        }
        for key in &effect.relax {
            registry.set_required(key, false)?;
        }
        for (key, o) in &effect.overrides {
            match o {
                Override::Clear => registry.reset_to_default(key)?,
                Override::Set(value) => registry.set_value(key, value)?,
            }
        }

        self.applied[ri] = AppliedBranch {
            required: effect.require.clone(),
            overridden: effect.overrides.iter().map(|(k, _)| k.clone()).collect(),
        };
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
