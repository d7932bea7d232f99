//! # Search Debouncer
//!
//! Collapses rapid keystrokes in a list view's search box into one
//! request after a quiet period. Each call supersedes the previous one;
//! only the call that is still newest when the quiet period elapses
//! yields its input.
//!
//! This is the one rate-limiting construct in the system — everything
//! else is a single user-triggered request.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Debounces a stream of inputs delivered as individual calls.
///
/// Cloning shares the generation counter, so clones supersede each other.
#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet_period: Duration,
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    /// A debouncer with the given quiet period.
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Register `input` and wait out the quiet period.
    ///
    /// Returns `Some(input)` iff no newer call arrived while waiting —
    /// the caller then issues the actual request. Superseded calls
    /// resolve to `None` and must do nothing.
    pub async fn debounce(&self, input: String) -> Option<String> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.quiet_period).await;
        (self.generation.load(Ordering::SeqCst) == generation).then_some(input)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_single_input_passes_after_quiet_period() {
        let debouncer = Debouncer::new(Duration::from_millis(300));
        let result = debouncer.debounce("volvo".into()).await;
        assert_eq!(result, Some("volvo".into()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_keystrokes_collapse_to_last() {
        let debouncer = Debouncer::new(Duration::from_millis(300));

        let d1 = debouncer.clone();
        let d2 = debouncer.clone();
        let d3 = debouncer.clone();
        let (a, b, c) = tokio::join!(
            d1.debounce("v".into()),
            async {
                tokio::time::sleep(Duration::from_millis(50)).await;
                d2.debounce("vo".into()).await
            },
            async {
                tokio::time::sleep(Duration::from_millis(100)).await;
                d3.debounce("volvo".into()).await
            }
        );

        assert_eq!(a, None);
        assert_eq!(b, None);
        assert_eq!(c, Some("volvo".into()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_inputs_each_pass() {
        let debouncer = Debouncer::new(Duration::from_millis(100));
        let first = debouncer.debounce("volvo".into()).await;
        let second = debouncer.debounce("saab".into()).await;
        assert_eq!(first, Some("volvo".into()));
        assert_eq!(second, Some("saab".into()));
    }
}
