//! Reload request debouncing.
//!
//! Coalesces bursts of reload requests (an agent turn can apply several
//! mutations back to back) into a single reload once the burst settles.

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Default debounce duration in milliseconds.
pub const DEFAULT_RELOAD_DEBOUNCE_MS: u64 = 500;

/// Thread-safe reload debouncer.
///
/// Each request (re)arms a deadline; [`take_ready`](Self::take_ready)
/// fires at most once per burst, after the deadline passes.
pub struct ReloadDebouncer {
    pending: Mutex<Option<Instant>>,
    debounce: Duration,
}

impl Default for ReloadDebouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_RELOAD_DEBOUNCE_MS))
    }
}

impl ReloadDebouncer {
    /// Create a debouncer with the given settle duration.
    #[must_use]
    pub fn new(debounce: Duration) -> Self {
        Self {
            pending: Mutex::new(None),
            debounce,
        }
    }

    /// Request a reload. Re-arms the deadline when one is already pending.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn request(&self) {
        let mut pending = self.pending.lock().unwrap();
        *pending = Some(Instant::now() + self.debounce);
    }

    /// Take the pending reload if its deadline has passed.
    ///
    /// Called from the poll loop; returns `true` at most once per burst.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn take_ready(&self) -> bool {
        let mut pending = self.pending.lock().unwrap();
        match *pending {
            Some(deadline) if deadline <= Instant::now() => {
                *pending = None;
                true
            }
            _ => false,
        }
    }

    /// Deadline of the pending reload, for timer scheduling.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        *self.pending.lock().unwrap()
    }
}
