//! The full site configuration document.

use serde::{Deserialize, Serialize};

use crate::page::PageConfig;
use crate::section::SectionConfig;
use crate::theme::ThemeConfig;

/// The full persisted/edited unit describing a generated site.
///
/// Ownership is strictly tree-shaped: pages own sections, no section
/// references another section, no cross-page references exist. Every
/// mutation produces a new `SiteConfig` value that replaces the prior one
/// wholesale in the owning context.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    /// Site-wide theme.
    #[serde(default)]
    pub theme: ThemeConfig,
    /// Ordered pages.
    #[serde(default)]
    pub pages: Vec<PageConfig>,
}

impl SiteConfig {
    /// Create a site with the default theme.
    #[must_use]
    pub fn new(pages: Vec<PageConfig>) -> Self {
        Self {
            theme: ThemeConfig::default(),
            pages,
        }
    }

    /// Select a page by slug, falling back to the first page when no slug
    /// matches. Returns `None` only for a site with no pages.
    #[must_use]
    pub fn page_for_slug(&self, slug: &str) -> Option<&PageConfig> {
        self.pages
            .iter()
            .find(|p| p.slug == slug)
            .or_else(|| self.pages.first())
    }

    /// Find a page by id.
    #[must_use]
    pub fn page(&self, page_id: &str) -> Option<&PageConfig> {
        self.pages.iter().find(|p| p.id == page_id)
    }

    /// Find the page containing a section id.
    #[must_use]
    pub fn page_containing(&self, section_id: &str) -> Option<&PageConfig> {
        self.pages.iter().find(|p| p.section(section_id).is_some())
    }

    /// Return a new site with one page's sections replaced.
    ///
    /// Sibling pages are carried over unchanged. When `page_id` does not
    /// match any page the site is returned as-is; editor operations are
    /// total functions over the model.
    #[must_use]
    pub fn with_page_sections(&self, page_id: &str, sections: Vec<SectionConfig>) -> Self {
        let pages = self
            .pages
            .iter()
            .map(|page| {
                if page.id == page_id {
                    PageConfig {
                        sections: sections.clone(),
                        ..page.clone()
                    }
                } else {
                    page.clone()
                }
            })
            .collect();
        Self {
            theme: self.theme.clone(),
            pages,
        }
    }

    /// Return a new site with the theme replaced.
    #[must_use]
    pub fn with_theme(&self, theme: ThemeConfig) -> Self {
        Self {
            theme,
            pages: self.pages.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn site_with_pages() -> SiteConfig {
        SiteConfig::new(vec![
            PageConfig::home("Home", vec![SectionConfig::new("hero-1", "hero")]),
            PageConfig::new("about", "about", "About", vec![SectionConfig::new(
                "faq-2", "faq",
            )]),
        ])
    }

    #[test]
    fn test_page_for_slug_exact_match() {
        let site = site_with_pages();
        assert_eq!(site.page_for_slug("about").unwrap().id, "about");
    }

    #[test]
    fn test_page_for_slug_falls_back_to_first() {
        let site = site_with_pages();
        assert_eq!(site.page_for_slug("missing").unwrap().id, "home");
    }

    #[test]
    fn test_page_for_slug_empty_site() {
        let site = SiteConfig::new(Vec::new());
        assert!(site.page_for_slug("").is_none());
    }

    #[test]
    fn test_page_containing_section() {
        let site = site_with_pages();
        assert_eq!(site.page_containing("faq-2").unwrap().id, "about");
        assert!(site.page_containing("missing").is_none());
    }

    #[test]
    fn test_with_page_sections_leaves_siblings_untouched() {
        let site = site_with_pages();
        let updated = site.with_page_sections("about", Vec::new());

        assert!(updated.page("about").unwrap().sections.is_empty());
        assert_eq!(updated.page("home").unwrap().sections, site.page("home").unwrap().sections);
    }

    #[test]
    fn test_with_page_sections_unknown_page_is_identity() {
        let site = site_with_pages();
        assert_eq!(site.with_page_sections("missing", Vec::new()), site);
    }

    #[test]
    fn test_document_round_trip() {
        let site = site_with_pages();
        let json = serde_json::to_string(&site).unwrap();
        let parsed: SiteConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, site);
    }
}
