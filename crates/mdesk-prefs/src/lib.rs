//! # mdesk-prefs — List-View Column Preferences
//!
//! Each list view lets the user pick which table columns to show (at most
//! six) and in what order; the choice is persisted client-side as one
//! JSON blob per view under a view-specific key.
//!
//! ## Invariants
//!
//! - `selected` never exceeds [`MAX_SELECTED_COLUMNS`].
//! - Columns only move between the selected and available lists — the
//!   union of the two is constant for the lifetime of the preference.
//! - Loading is tolerant: an absent or corrupt blob falls back to the
//!   view's default pair. Corruption is logged, never surfaced as an
//!   error to the user.
//! - Operations that cannot be honored (capacity, unknown column, bad
//!   index) report a [`MoveOutcome`] for the view to render as a warning;
//!   they never panic and never corrupt the lists.
//!
//! Storage is a synchronous key-value port ([`PreferenceStore`]); the
//! owning view is the only reader/writer of its key, and last-write-wins
//! across instances is acceptable.

pub mod columns;
pub mod store;

pub use columns::{ColumnPreference, MoveOutcome, MAX_SELECTED_COLUMNS};
pub use store::{InMemoryStore, PreferenceStore};
