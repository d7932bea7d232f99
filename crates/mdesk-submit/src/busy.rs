//! # Per-Operation Busy Flags
//!
//! Each async operation a screen can trigger (vehicle search, person
//! search, list load) carries its own [`BusyFlag`]. The view layer reads
//! the flag to disable the triggering control; the operation holds the
//! guard for its duration so a second trigger while one is in flight is
//! refused instead of duplicated.
//!
//! The submission controller has its own specialized guard; this type
//! covers everything else, lookups above all.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A shareable in-flight marker for one operation.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag {
    engaged: Arc<AtomicBool>,
}

impl BusyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the operation is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.engaged.load(Ordering::SeqCst)
    }

    /// Try to start the operation. Returns a guard that clears the flag
    /// on drop, or `None` if the operation is already in flight — the
    /// caller then does nothing (no queueing, no second request).
    pub fn try_begin(&self) -> Option<BusyGuard> {
        self.engaged
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| BusyGuard {
                engaged: self.engaged.clone(),
            })
    }
}

/// Clears its [`BusyFlag`] when dropped, on every exit path.
#[derive(Debug)]
pub struct BusyGuard {
    engaged: Arc<AtomicBool>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.engaged.store(false, Ordering::SeqCst);
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
