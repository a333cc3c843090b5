//! Dispatch renderer.
//!
//! Resolves a section's type tag against the registry and renders it.
//! Resolution is a visible two-variant enum rather than an implicit
//! default branch, so the fallback path shows up in the match.

use std::fmt::Write;
use std::sync::Arc;

use sitekit_model::{PageConfig, SectionConfig};

use crate::context::BusinessContext;
use crate::generic::render_generic;
use crate::html::escape_html;
use crate::registry::SectionRegistry;
use crate::renderer::SectionRenderer;

/// Outcome of resolving a type tag.
pub enum ResolvedRenderer<'a> {
    /// A registered renderer handles this type.
    Known(&'a dyn SectionRenderer),
    /// Unknown type; the generic fallback renders the raw content.
    Fallback,
}

/// Renders sections by registry dispatch.
pub struct DispatchRenderer {
    registry: Arc<SectionRegistry>,
}

impl DispatchRenderer {
    /// Create a dispatch renderer over a registry.
    #[must_use]
    pub fn new(registry: Arc<SectionRegistry>) -> Self {
        Self { registry }
    }

    /// Resolve a type tag.
    #[must_use]
    pub fn resolve(&self, section_type: &str) -> ResolvedRenderer<'_> {
        match self.registry.lookup(section_type) {
            Some(renderer) => ResolvedRenderer::Known(renderer),
            None => ResolvedRenderer::Fallback,
        }
    }

    /// Render one section.
    ///
    /// Total for any `SectionConfig` value, including empty or malformed
    /// content; unknown types fall back to the generic renderer. Disabled
    /// sections are skipped by the page-level caller, not here.
    #[must_use]
    pub fn render_section(&self, section: &SectionConfig, business: &BusinessContext) -> String {
        let mut out = String::new();
        let _ = write!(
            out,
            r#"<section class="section section--{ty}" data-section-id="{id}" data-section-type="{ty}">"#,
            ty = escape_html(&section.section_type),
            id = escape_html(&section.id),
        );
        match self.resolve(&section.section_type) {
            ResolvedRenderer::Known(renderer) => renderer.render(section, business, &mut out),
            ResolvedRenderer::Fallback => {
                render_generic(&section.section_type, &section.content, &mut out);
            }
        }
        out.push_str("</section>");
        out
    }

    /// Render a page's enabled sections in order.
    #[must_use]
    pub fn render_page(&self, page: &PageConfig, business: &BusinessContext) -> String {
        let mut out = String::new();
        for section in page.sections.iter().filter(|s| s.enabled) {
            out.push_str(&self.render_section(section, business));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use sitekit_model::{ContentMap, SectionIdGenerator};

    use super::*;

    fn renderer() -> DispatchRenderer {
        DispatchRenderer::new(Arc::new(SectionRegistry::builtin()))
    }

    fn content(value: serde_json::Value) -> ContentMap {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_known_type_uses_registered_renderer() {
        let dispatch = renderer();
        assert!(matches!(dispatch.resolve("hero"), ResolvedRenderer::Known(_)));
    }

    #[test]
    fn test_unknown_type_falls_back() {
        let dispatch = renderer();
        assert!(matches!(
            dispatch.resolve("emergency-callout"),
            ResolvedRenderer::Fallback
        ));

        let section = SectionConfig::new("emergency-callout-1", "emergency-callout")
            .with_content(content(json!({"heading": "24/7 Emergency"})));
        let html = dispatch.render_section(&section, &BusinessContext::default());

        assert!(html.contains("24/7 Emergency"));
        assert!(html.contains(r#"data-section-type="emergency-callout""#));
    }

    #[test]
    fn test_empty_content_never_fails() {
        let dispatch = renderer();
        let business = BusinessContext::default();

        // Every registered type plus an unknown one, all with empty content.
        let registry = SectionRegistry::builtin();
        let ids = SectionIdGenerator::new();
        for info in registry.available() {
            let section = SectionConfig::new(ids.next(&info.section_type), &info.section_type);
            let html = dispatch.render_section(&section, &business);
            assert!(!html.is_empty());
        }

        let unknown = SectionConfig::new("x-1", "x");
        assert!(!dispatch.render_section(&unknown, &business).is_empty());
    }

    #[test]
    fn test_render_page_skips_disabled() {
        let dispatch = renderer();
        let mut disabled = SectionConfig::new("faq-1", "faq");
        disabled.enabled = false;
        let page = PageConfig::home("Home", vec![
            SectionConfig::new("hero-1", "hero"),
            disabled,
        ]);

        let html = dispatch.render_page(&page, &BusinessContext::named("Smith Plumbing"));

        assert!(html.contains(r#"data-section-id="hero-1""#));
        assert!(!html.contains(r#"data-section-id="faq-1""#));
    }

    #[test]
    fn test_section_wrapper_escapes_attributes() {
        let dispatch = renderer();
        let section = SectionConfig::new("a\"b", "x\"y");
        let html = dispatch.render_section(&section, &BusinessContext::default());
        assert!(html.contains("a&quot;b"));
        assert!(html.contains("x&quot;y"));
    }
}
