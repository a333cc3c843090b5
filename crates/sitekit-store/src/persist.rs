//! File-backed persistence for the site document.
//!
//! The store's change subscription is the core's sole externally
//! observable write; this module gives it somewhere durable to land.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use sitekit_model::SiteConfig;

use crate::site_store::SiteStore;

/// Persistence failure.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("failed to read site config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse site config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Load a site document from a JSON file.
///
/// # Errors
///
/// Returns an error when the file cannot be read or parsed.
pub fn load_site_config(path: &Path) -> Result<SiteConfig, PersistError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Writes every committed site document to a JSON file.
///
/// Writes go through a temp file in the same directory followed by a
/// rename, so a crash mid-write never leaves a truncated document.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    /// Create a sink writing to `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Write one document version.
    ///
    /// # Errors
    ///
    /// Returns an error when serialization or the file write fails.
    pub fn write(&self, config: &SiteConfig) -> Result<(), PersistError> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Subscribe this sink to a store.
    ///
    /// Write failures are logged, not propagated; the change callback has
    /// no channel back to the writer.
    pub fn attach(self: Arc<Self>, store: &SiteStore) {
        store.subscribe(move |config, version| {
            if let Err(e) = self.write(config) {
                tracing::warn!(path = %self.path.display(), version, error = %e, "Failed to persist site config");
            } else {
                tracing::debug!(path = %self.path.display(), version, "Persisted site config");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sitekit_model::{PageConfig, SectionConfig};

    use super::*;

    fn site() -> SiteConfig {
        SiteConfig::new(vec![PageConfig::home("Home", vec![SectionConfig::new(
            "hero-1", "hero",
        )])])
    }

    #[test]
    fn test_write_and_load_round_trip() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("site.json");
        let sink = JsonFileSink::new(&path);

        sink.write(&site()).unwrap();
        let loaded = load_site_config(&path).unwrap();

        assert_eq!(loaded, site());
        // No temp file left behind.
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_attached_sink_persists_committed_writes() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("site.json");

        let store = SiteStore::new(site());
        Arc::new(JsonFileSink::new(&path)).attach(&store);

        store.apply(|config| config.with_page_sections("home", Vec::new()));

        let persisted = load_site_config(&path).unwrap();
        assert!(persisted.page("home").unwrap().sections.is_empty());
    }

    #[test]
    fn test_load_malformed_file_errors() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("site.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(load_site_config(&path), Err(PersistError::Parse(_))));
    }
}
