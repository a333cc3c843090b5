//! Read-only business context interpolated into rendered sections.
//!
//! Supplied by the business directory collaborator; the rendering pipeline
//! never mutates it.

/// A service offered by the business, for renderers that fall back to
/// directory data when a section's content doesn't list its own items.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextService {
    pub name: String,
    pub description: Option<String>,
    pub price: Option<String>,
}

/// Business facts available to every section renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BusinessContext {
    /// Business display name.
    pub name: String,
    /// Contact phone number, if known.
    pub phone: Option<String>,
    /// City or service area.
    pub city: Option<String>,
    /// Average review rating.
    pub rating: Option<f32>,
    /// Number of reviews behind the rating.
    pub review_count: Option<u32>,
    /// Services on record for the business.
    pub services: Vec<ContextService>,
}

impl BusinessContext {
    /// Context with only a name set; convenient in tests.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}
