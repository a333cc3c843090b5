//! Collision-resistant section id generation.
//!
//! Ids keep the `"<type>-<digits>"` shape the rest of the system expects,
//! but the numeric part is a monotonic counter seeded from the wall clock
//! rather than the wall clock itself: two calls within the same millisecond
//! yield strictly increasing suffixes, so Add can never produce a sibling
//! id collision.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Generator for section ids of the form `"<type>-<digits>"`.
#[derive(Debug, Default)]
pub struct SectionIdGenerator {
    last: AtomicU64,
}

impl SectionIdGenerator {
    /// Create a generator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce the next id for a type tag.
    #[must_use]
    pub fn next(&self, section_type: &str) -> String {
        format!("{section_type}-{}", self.next_stamp())
    }

    fn next_stamp(&self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX));

        // max(previous + 1, now): tracks the clock while staying strictly
        // increasing under same-millisecond bursts.
        let result = self.last.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(last.saturating_add(1).max(now))
        });
        match result {
            Ok(prev) | Err(prev) => prev.saturating_add(1).max(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_id_shape() {
        let ids = SectionIdGenerator::new();
        let id = ids.next("hero");

        let suffix = id.strip_prefix("hero-").unwrap();
        assert!(!suffix.is_empty());
        assert!(suffix.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_burst_produces_unique_ids() {
        let ids = SectionIdGenerator::new();
        let mut seen = HashSet::new();

        // Far more calls than fit in one millisecond tick.
        for _ in 0..10_000 {
            assert!(seen.insert(ids.next("hero")));
        }
    }

    #[test]
    fn test_suffixes_strictly_increase() {
        let ids = SectionIdGenerator::new();
        let mut previous = 0u64;

        for _ in 0..100 {
            let id = ids.next("services");
            let suffix: u64 = id.strip_prefix("services-").unwrap().parse().unwrap();
            assert!(suffix > previous);
            previous = suffix;
        }
    }

    #[test]
    fn test_unique_across_threads() {
        let ids = std::sync::Arc::new(SectionIdGenerator::new());
        let mut handles = Vec::new();

        for _ in 0..4 {
            let ids = std::sync::Arc::clone(&ids);
            handles.push(std::thread::spawn(move || {
                (0..1000).map(|_| ids.next("hero")).collect::<Vec<_>>()
            }));
        }

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id));
            }
        }
    }
}
