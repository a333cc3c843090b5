//! Section type registry.
//!
//! Maps a type tag to its renderer, display metadata and default content
//! template. Populated once at startup by explicit registration calls and
//! read-only thereafter; the registry is an explicitly constructed
//! dependency, never ambient global state.
//!
//! Agent-invented section types are deliberately *not* added here at
//! runtime; they live as plain data in the document and are rendered by
//! the generic fallback.

use std::collections::HashMap;

use serde::Serialize;
use sitekit_model::{ContentMap, SectionConfig, SectionIdGenerator};

use crate::renderer::SectionRenderer;
use crate::sections;

/// Display metadata for a registered section type, as served to the
/// add-section UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionTypeInfo {
    /// Type tag.
    #[serde(rename = "type")]
    pub section_type: String,
    /// Human-readable name.
    pub name: String,
    /// One-line description.
    pub description: String,
}

impl SectionTypeInfo {
    /// Create metadata for a type tag.
    #[must_use]
    pub fn new(
        section_type: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            section_type: section_type.into(),
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Default content recorded alongside a renderer at registration time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionTemplate {
    /// Default content record.
    pub content: ContentMap,
    /// Default style knobs, if any.
    pub styles: Option<ContentMap>,
}

struct RegistryEntry {
    info: SectionTypeInfo,
    template: SectionTemplate,
    renderer: Box<dyn SectionRenderer>,
}

/// Startup-populated table of known section types.
#[derive(Default)]
pub struct SectionRegistry {
    entries: HashMap<String, RegistryEntry>,
    // Registration order, for a stable listing.
    order: Vec<String>,
}

impl SectionRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in section types for the plumbing-services
    /// vertical: `hero`, `trust-bar`, `services`, `testimonials`, `faq`,
    /// `cta-banner`.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(
            SectionTypeInfo::new("hero", "Hero Banner", "Headline, subheadline and call to action"),
            sections::hero::template(),
            Box::new(sections::hero::HeroRenderer),
        );
        registry.register(
            SectionTypeInfo::new("trust-bar", "Trust Bar", "Rating, badges and credentials strip"),
            sections::trust_bar::template(),
            Box::new(sections::trust_bar::TrustBarRenderer),
        );
        registry.register(
            SectionTypeInfo::new("services", "Services Grid", "Service offerings with descriptions and prices"),
            sections::services::template(),
            Box::new(sections::services::ServicesRenderer),
        );
        registry.register(
            SectionTypeInfo::new("testimonials", "Testimonials", "Customer quotes with attribution"),
            sections::testimonials::template(),
            Box::new(sections::testimonials::TestimonialsRenderer),
        );
        registry.register(
            SectionTypeInfo::new("faq", "FAQ", "Frequently asked questions"),
            sections::faq::template(),
            Box::new(sections::faq::FaqRenderer),
        );
        registry.register(
            SectionTypeInfo::new("cta-banner", "Call-to-Action Banner", "Closing banner with phone call to action"),
            sections::cta::template(),
            Box::new(sections::cta::CtaBannerRenderer),
        );
        registry
    }

    /// Bind a type tag to a renderer, metadata and default template.
    ///
    /// The last registration for a given tag wins; duplicate registration
    /// is not an error.
    pub fn register(
        &mut self,
        info: SectionTypeInfo,
        template: SectionTemplate,
        renderer: Box<dyn SectionRenderer>,
    ) {
        let tag = info.section_type.clone();
        let replaced = self
            .entries
            .insert(tag.clone(), RegistryEntry { info, template, renderer })
            .is_some();
        if replaced {
            tracing::debug!(section_type = %tag, "Replaced section type registration");
        } else {
            self.order.push(tag);
        }
    }

    /// Look up the renderer for a type tag.
    #[must_use]
    pub fn lookup(&self, section_type: &str) -> Option<&dyn SectionRenderer> {
        self.entries.get(section_type).map(|e| e.renderer.as_ref())
    }

    /// Metadata for every registered type, in registration order.
    #[must_use]
    pub fn available(&self) -> Vec<SectionTypeInfo> {
        self.order
            .iter()
            .filter_map(|tag| self.entries.get(tag))
            .map(|e| e.info.clone())
            .collect()
    }

    /// Default template for a type tag.
    #[must_use]
    pub fn template(&self, section_type: &str) -> Option<&SectionTemplate> {
        self.entries.get(section_type).map(|e| &e.template)
    }

    /// Clone a type's default template into a new section with a freshly
    /// stamped id. Returns `None` for unregistered tags.
    #[must_use]
    pub fn default_section(
        &self,
        section_type: &str,
        ids: &SectionIdGenerator,
    ) -> Option<SectionConfig> {
        let template = self.template(section_type)?;
        Some(SectionConfig {
            id: ids.next(section_type),
            section_type: section_type.to_owned(),
            enabled: true,
            content: template.content.clone(),
            styles: template.styles.clone(),
        })
    }
}
