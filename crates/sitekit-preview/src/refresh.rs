//! Monotonic refresh token for cache busting.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic counter embedded in the rendered preview's cache-busting key.
///
/// Incremented whenever a debounced reload fires; the admin frontend polls
/// the current value and reloads its preview frame when it moves.
#[derive(Debug, Default)]
pub struct RefreshToken {
    counter: AtomicU64,
}

impl RefreshToken {
    /// Create a token at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value.
    #[must_use]
    pub fn current(&self) -> u64 {
        self.counter.load(Ordering::SeqCst)
    }

    /// Increment and return the new value.
    pub fn bump(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Cache-busting key for a preview URL.
    #[must_use]
    pub fn cache_key(&self, slug: &str) -> String {
        format!("{slug}?v={}", self.current())
    }
}
