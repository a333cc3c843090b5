//! Versioned in-memory site store.
//!
//! The site document held by an editing session is the only resource both
//! writer surfaces (form editor, agent channel) share. All writes funnel
//! through one serialized apply path here, and every committed write bumps
//! a version counter. Whole-document replaces carry the version they were
//! based on and are rejected when stale, replacing the source system's
//! silent last-write-wins.

use std::sync::{Arc, Mutex};

use sitekit_model::SiteConfig;

type Subscriber = Box<dyn Fn(&SiteConfig, u64) + Send + Sync>;

/// A consistent view of the store: the document and the version it carries.
#[derive(Debug, Clone)]
pub struct SiteSnapshot {
    pub config: Arc<SiteConfig>,
    pub version: u64,
}

/// Rejected whole-document replace based on an outdated version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("stale write: expected version {expected}, store is at {actual}")]
pub struct StaleWrite {
    pub expected: u64,
    pub actual: u64,
}

struct Inner {
    config: Arc<SiteConfig>,
    version: u64,
}

/// Shared, versioned holder of the current [`SiteConfig`].
pub struct SiteStore {
    inner: Mutex<Inner>,
    subscribers: Mutex<Vec<Subscriber>>,
}

impl SiteStore {
    /// Create a store at version 0.
    #[must_use]
    pub fn new(initial: SiteConfig) -> Self {
        Self {
            inner: Mutex::new(Inner {
                config: Arc::new(initial),
                version: 0,
            }),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Current document and version.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn snapshot(&self) -> SiteSnapshot {
        let inner = self.inner.lock().unwrap();
        SiteSnapshot {
            config: Arc::clone(&inner.config),
            version: inner.version,
        }
    }

    /// Register a change subscriber, invoked after every committed write
    /// with the new document and version. Callers are responsible for
    /// durability; subscriber failures cannot be propagated here.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn subscribe(&self, subscriber: impl Fn(&SiteConfig, u64) + Send + Sync + 'static) {
        self.subscribers.lock().unwrap().push(Box::new(subscriber));
    }

    /// Apply a transformation under the store lock.
    ///
    /// The closure sees the current document and returns the replacement;
    /// the transformation and version bump are atomic with respect to
    /// every other writer.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn apply(&self, f: impl FnOnce(&SiteConfig) -> SiteConfig) -> SiteSnapshot {
        self.try_apply(|config| Ok::<_, std::convert::Infallible>(f(config)))
            .unwrap_or_else(|never| match never {})
    }

    /// Apply a fallible transformation under the store lock.
    ///
    /// On `Err` the store is left untouched: no partial mutation, no
    /// version bump, no subscriber notification.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn try_apply<E>(
        &self,
        f: impl FnOnce(&SiteConfig) -> Result<SiteConfig, E>,
    ) -> Result<SiteSnapshot, E> {
        let snapshot = {
            let mut inner = self.inner.lock().unwrap();
            let next = f(&inner.config)?;
            inner.config = Arc::new(next);
            inner.version += 1;
            SiteSnapshot {
                config: Arc::clone(&inner.config),
                version: inner.version,
            }
        };
        self.notify(&snapshot);
        Ok(snapshot)
    }

    /// Replace the document wholesale, guarded by the version the caller
    /// based its edit on.
    ///
    /// # Errors
    ///
    /// Returns [`StaleWrite`] when the store has moved past
    /// `expected_version`; the write is discarded.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn replace(
        &self,
        expected_version: u64,
        config: SiteConfig,
    ) -> Result<SiteSnapshot, StaleWrite> {
        let snapshot = {
            let mut inner = self.inner.lock().unwrap();
            if inner.version != expected_version {
                return Err(StaleWrite {
                    expected: expected_version,
                    actual: inner.version,
                });
            }
            inner.config = Arc::new(config);
            inner.version += 1;
            SiteSnapshot {
                config: Arc::clone(&inner.config),
                version: inner.version,
            }
        };
        self.notify(&snapshot);
        Ok(snapshot)
    }

    fn notify(&self, snapshot: &SiteSnapshot) {
        let subscribers = self.subscribers.lock().unwrap();
        for subscriber in subscribers.iter() {
            subscriber(&snapshot.config, snapshot.version);
        }
    }
}
