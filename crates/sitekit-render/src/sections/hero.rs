//! Hero banner section.

use std::fmt::Write;

use serde_json::json;
use sitekit_model::{ContentMap, SectionConfig};

use crate::context::BusinessContext;
use crate::html::escape_html;
use crate::registry::SectionTemplate;
use crate::renderer::SectionRenderer;
use crate::sections::template_content;
use crate::value::{ImageRef, image_from, str_field};

/// Default content registered for the `hero` type.
pub(crate) fn template() -> SectionTemplate {
    SectionTemplate {
        content: template_content(json!({
            "headline": "Your Trusted Local Plumbers",
            "subheadline": "Fast, reliable service from licensed professionals.",
            "ctaText": "Call Now",
        })),
        styles: None,
    }
}

/// Renders the hero banner: headline, subheadline and a phone call to
/// action interpolated from the business context.
pub(crate) struct HeroRenderer;

struct HeroContent<'a> {
    headline: Option<&'a str>,
    subheadline: Option<&'a str>,
    cta_text: Option<&'a str>,
    image: Option<ImageRef>,
}

impl<'a> HeroContent<'a> {
    fn from_map(content: &'a ContentMap) -> Self {
        Self {
            headline: str_field(content, "headline"),
            subheadline: str_field(content, "subheadline"),
            cta_text: str_field(content, "ctaText"),
            image: content.get("image").and_then(image_from),
        }
    }
}

impl SectionRenderer for HeroRenderer {
    fn render(&self, section: &SectionConfig, business: &BusinessContext, out: &mut String) {
        let content = HeroContent::from_map(&section.content);

        let headline = content.headline.unwrap_or(&business.name);
        let _ = write!(out, "<h1>{}</h1>", escape_html(headline));

        if let Some(subheadline) = content.subheadline {
            let _ = write!(out, r#"<p class="subheadline">{}</p>"#, escape_html(subheadline));
        }
        if let Some(phone) = &business.phone {
            let label = content.cta_text.unwrap_or("Call Now");
            let _ = write!(
                out,
                r#"<a class="cta" href="tel:{}">{} {}</a>"#,
                escape_html(phone),
                escape_html(label),
                escape_html(phone),
            );
        }
        if let Some(image) = content.image {
            let _ = write!(
                out,
                r#"<img src="{}" alt="{}">"#,
                escape_html(&image.src),
                escape_html(image.alt.as_deref().unwrap_or("")),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(section: &SectionConfig, business: &BusinessContext) -> String {
        let mut out = String::new();
        HeroRenderer.render(section, business, &mut out);
        out
    }

    #[test]
    fn test_template_renders_with_phone_cta() {
        let section = SectionConfig::new("hero-1", "hero").with_content(template().content);
        let business = BusinessContext {
            phone: Some("(555) 010-2000".to_owned()),
            ..BusinessContext::named("Smith Plumbing")
        };

        let html = render(&section, &business);

        assert!(html.contains("<h1>Your Trusted Local Plumbers</h1>"));
        assert!(html.contains("tel:(555) 010-2000"));
        assert!(html.contains("Call Now"));
    }

    #[test]
    fn test_empty_content_falls_back_to_business_name() {
        let section = SectionConfig::new("hero-1", "hero");
        let html = render(&section, &BusinessContext::named("Smith Plumbing"));

        assert!(html.contains("<h1>Smith Plumbing</h1>"));
        // No phone on record, no call to action.
        assert!(!html.contains("tel:"));
    }
}
