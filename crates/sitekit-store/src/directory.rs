//! Business directory boundary.
//!
//! Supplies the read-only business context rendered into sections: name,
//! phone, location, rating and the services on record. The core consumes
//! this; it never writes through it.

use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

use serde::Deserialize;

/// A business with a generated site.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Business {
    pub id: String,
    /// URL slug the site is served under.
    pub slug: String,
    /// Template vertical the site was generated from (e.g. `"plumbing"`).
    pub template: String,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub review_count: Option<u32>,
}

/// A service offered by a business.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ServiceEntry {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
}

/// Directory lookup failure.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("directory unavailable: {0}")]
    Unavailable(String),

    #[error("failed to read directory file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse directory file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Read-only lookup of businesses and their services.
pub trait BusinessDirectory: Send + Sync {
    /// Find a business by site slug within a template vertical.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing directory cannot be reached;
    /// an unknown slug is `Ok(None)`.
    fn business_by_slug(
        &self,
        slug: &str,
        template: &str,
    ) -> Result<Option<Business>, DirectoryError>;

    /// Services on record for a business.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing directory cannot be reached.
    fn services_for(&self, business_id: &str) -> Result<Vec<ServiceEntry>, DirectoryError>;
}

/// In-memory directory for tests.
///
/// # Example
///
/// ```
/// use sitekit_store::{Business, BusinessDirectory, MockDirectory, ServiceEntry};
///
/// let directory = MockDirectory::new()
///     .with_business(Business {
///         id: "b1".to_owned(),
///         slug: "smith-plumbing".to_owned(),
///         template: "plumbing".to_owned(),
///         name: "Smith Plumbing".to_owned(),
///         ..Business::default()
///     })
///     .with_service("b1", ServiceEntry {
///         name: "Drain Cleaning".to_owned(),
///         ..ServiceEntry::default()
///     });
///
/// let business = directory.business_by_slug("smith-plumbing", "plumbing").unwrap();
/// assert!(business.is_some());
/// ```
#[derive(Debug, Default)]
pub struct MockDirectory {
    businesses: RwLock<Vec<Business>>,
    services: RwLock<HashMap<String, Vec<ServiceEntry>>>,
}

impl MockDirectory {
    /// Create an empty mock directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a business.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_business(self, business: Business) -> Self {
        self.businesses.write().unwrap().push(business);
        self
    }

    /// Add a service for a business id.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_service(self, business_id: &str, service: ServiceEntry) -> Self {
        self.services
            .write()
            .unwrap()
            .entry(business_id.to_owned())
            .or_default()
            .push(service);
        self
    }
}

impl BusinessDirectory for MockDirectory {
    fn business_by_slug(
        &self,
        slug: &str,
        template: &str,
    ) -> Result<Option<Business>, DirectoryError> {
        Ok(self
            .businesses
            .read()
            .unwrap()
            .iter()
            .find(|b| b.slug == slug && b.template == template)
            .cloned())
    }

    fn services_for(&self, business_id: &str) -> Result<Vec<ServiceEntry>, DirectoryError> {
        Ok(self
            .services
            .read()
            .unwrap()
            .get(business_id)
            .cloned()
            .unwrap_or_default())
    }
}

/// Seed-file record: a business plus its services.
#[derive(Debug, Deserialize)]
struct BusinessRecord {
    #[serde(flatten)]
    business: Business,
    #[serde(default)]
    services: Vec<ServiceEntry>,
}

#[derive(Debug, Deserialize)]
struct DirectoryFile {
    #[serde(default)]
    businesses: Vec<BusinessRecord>,
}

/// Directory backed by a TOML seed file, used by `serve`.
#[derive(Debug)]
pub struct FileDirectory {
    businesses: Vec<Business>,
    services: HashMap<String, Vec<ServiceEntry>>,
}

impl FileDirectory {
    /// Load a directory seed file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, DirectoryError> {
        let raw = std::fs::read_to_string(path)?;
        let file: DirectoryFile = toml::from_str(&raw)?;

        let mut businesses = Vec::with_capacity(file.businesses.len());
        let mut services = HashMap::new();
        for record in file.businesses {
            services.insert(record.business.id.clone(), record.services);
            businesses.push(record.business);
        }
        tracing::info!(path = %path.display(), count = businesses.len(), "Loaded business directory");
        Ok(Self { businesses, services })
    }
}

impl BusinessDirectory for FileDirectory {
    fn business_by_slug(
        &self,
        slug: &str,
        template: &str,
    ) -> Result<Option<Business>, DirectoryError> {
        Ok(self
            .businesses
            .iter()
            .find(|b| b.slug == slug && b.template == template)
            .cloned())
    }

    fn services_for(&self, business_id: &str) -> Result<Vec<ServiceEntry>, DirectoryError> {
        Ok(self.services.get(business_id).cloned().unwrap_or_default())
    }
}
