//! Page configuration.

use serde::{Deserialize, Serialize};

use crate::section::SectionConfig;

/// One page of a generated site.
///
/// Section order is significant and is the sole ordering signal; there is
/// no priority field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageConfig {
    /// Stable page id.
    pub id: String,
    /// URL slug, unique per site. The empty string denotes the home page.
    #[serde(default)]
    pub slug: String,
    /// Page title.
    pub title: String,
    /// Ordered sections.
    #[serde(default)]
    pub sections: Vec<SectionConfig>,
}

impl PageConfig {
    /// Create a page.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        slug: impl Into<String>,
        title: impl Into<String>,
        sections: Vec<SectionConfig>,
    ) -> Self {
        Self {
            id: id.into(),
            slug: slug.into(),
            title: title.into(),
            sections,
        }
    }

    /// Create the home page (empty slug).
    #[must_use]
    pub fn home(title: impl Into<String>, sections: Vec<SectionConfig>) -> Self {
        Self::new("home", "", title, sections)
    }

    /// Find a section by id.
    #[must_use]
    pub fn section(&self, section_id: &str) -> Option<&SectionConfig> {
        self.sections.iter().find(|s| s.id == section_id)
    }

    /// Index of a section by id.
    #[must_use]
    pub fn section_index(&self, section_id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == section_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_page_has_empty_slug() {
        let page = PageConfig::home("Home", Vec::new());
        assert_eq!(page.slug, "");
        assert_eq!(page.id, "home");
    }

    #[test]
    fn test_section_lookup() {
        let page = PageConfig::home(
            "Home",
            vec![
                SectionConfig::new("hero-1", "hero"),
                SectionConfig::new("faq-2", "faq"),
            ],
        );

        assert_eq!(page.section("faq-2").unwrap().section_type, "faq");
        assert_eq!(page.section_index("faq-2"), Some(1));
        assert!(page.section("missing").is_none());
        assert!(page.section_index("missing").is_none());
    }

    #[test]
    fn test_deserialize_defaults_sections() {
        let page: PageConfig =
            serde_json::from_str(r#"{"id": "about", "slug": "about", "title": "About"}"#).unwrap();
        assert!(page.sections.is_empty());
    }
}
