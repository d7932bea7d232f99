//! # Column Preference
//!
//! The user's chosen subset and order of table columns for one list view.
//! Persisted as `{"selectedColumns": [...], "availableColumns": [...]}`
//! under the view's storage key.

use serde::{Deserialize, Serialize};

use crate::store::PreferenceStore;

/// Upper bound on visible columns — the table layout caps out at six.
pub const MAX_SELECTED_COLUMNS: usize = 6;

/// Result of a column operation. Everything short of `Moved` is a
/// user-facing warning, not an error: the lists are left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The operation was applied.
    Moved,
    /// The selected list is already at its cap.
    AtCapacity,
    /// The named column is not in the source list.
    UnknownColumn,
    /// A reorder index was out of range.
    OutOfRange,
}

/// The selected/available column pair for one list view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnPreference {
    #[serde(rename = "selectedColumns")]
    selected: Vec<String>,
    #[serde(rename = "availableColumns")]
    available: Vec<String>,
}

impl ColumnPreference {
    /// A preference from explicit lists (typically a view's hardcoded
    /// default pair).
    pub fn new(selected: Vec<String>, available: Vec<String>) -> Self {
        Self {
            selected,
            available,
        }
    }

    /// The columns currently shown, in display order.
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    /// The remaining pool, in offer order.
    pub fn available(&self) -> &[String] {
        &self.available
    }

    /// Load the preference for `view_key`, falling back to `default` when
    /// the store has nothing or the stored blob does not parse. A corrupt
    /// blob is treated exactly like an absent one — logged, then ignored.
    pub fn load(store: &dyn PreferenceStore, view_key: &str, default: &Self) -> Self {
        match store.load_raw(view_key) {
            None => default.clone(),
            Some(blob) => match serde_json::from_str(&blob) {
                Ok(pref) => pref,
                Err(e) => {
                    tracing::warn!(
                        view_key,
                        error = %e,
                        "corrupt column preference blob; using defaults"
                    );
                    default.clone()
                }
            },
        }
    }

    /// Persist under `view_key`, overwriting any previous value.
    pub fn save(&self, store: &mut dyn PreferenceStore, view_key: &str) {
        match serde_json::to_string(self) {
            Ok(blob) => store.save_raw(view_key, &blob),
            Err(e) => {
                tracing::warn!(view_key, error = %e, "column preference not saved");
            }
        }
    }

    /// Move a column from the pool into the visible set (at the end).
    pub fn move_to_selected(&mut self, column: &str) -> MoveOutcome {
        let Some(pos) = self.available.iter().position(|c| c == column) else {
            return MoveOutcome::UnknownColumn;
        };
        if self.selected.len() >= MAX_SELECTED_COLUMNS {
            return MoveOutcome::AtCapacity;
        }
        let column = self.available.remove(pos);
        self.selected.push(column);
        MoveOutcome::Moved
    }

    /// Move a visible column back into the pool (at the end).
    pub fn move_to_available(&mut self, column: &str) -> MoveOutcome {
        let Some(pos) = self.selected.iter().position(|c| c == column) else {
            return MoveOutcome::UnknownColumn;
        };
        let column = self.selected.remove(pos);
        self.available.push(column);
        MoveOutcome::Moved
    }

    /// Move the visible column at `from` to position `to`.
    pub fn reorder(&mut self, from: usize, to: usize) -> MoveOutcome {
        if from >= self.selected.len() || to >= self.selected.len() {
            return MoveOutcome::OutOfRange;
        }
        let column = self.selected.remove(from);
        self.selected.insert(to, column);
        MoveOutcome::Moved
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
