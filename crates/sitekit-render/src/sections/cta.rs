//! Closing call-to-action banner.

use std::fmt::Write;

use serde_json::json;
use sitekit_model::SectionConfig;

use crate::context::BusinessContext;
use crate::html::escape_html;
use crate::registry::SectionTemplate;
use crate::renderer::SectionRenderer;
use crate::sections::template_content;
use crate::value::str_field;

pub(crate) fn template() -> SectionTemplate {
    SectionTemplate {
        content: template_content(json!({
            "heading": "Ready to fix it for good?",
            "body": "Call today for an upfront quote. No call-out fee.",
            "buttonText": "Get a Free Quote",
        })),
        styles: None,
    }
}

/// Renders the closing banner with a phone call to action.
pub(crate) struct CtaBannerRenderer;

impl SectionRenderer for CtaBannerRenderer {
    fn render(&self, section: &SectionConfig, business: &BusinessContext, out: &mut String) {
        let content = &section.content;

        if let Some(heading) = str_field(content, "heading") {
            let _ = write!(out, "<h2>{}</h2>", escape_html(heading));
        }
        if let Some(body) = str_field(content, "body") {
            let _ = write!(out, "<p>{}</p>", escape_html(body));
        }
        match (&business.phone, str_field(content, "buttonText")) {
            (Some(phone), label) => {
                let _ = write!(
                    out,
                    r#"<a class="cta" href="tel:{}">{}</a>"#,
                    escape_html(phone),
                    escape_html(label.unwrap_or("Call Now")),
                );
            }
            (None, Some(label)) => {
                // No phone on record; keep the label as a non-link button.
                let _ = write!(out, r#"<span class="cta">{}</span>"#, escape_html(label));
            }
            (None, None) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_with_phone() {
        let section = SectionConfig::new("cta-banner-1", "cta-banner").with_content(template().content);
        let business = BusinessContext {
            phone: Some("(555) 010-2000".to_owned()),
            ..BusinessContext::named("Smith Plumbing")
        };

        let mut out = String::new();
        CtaBannerRenderer.render(&section, &business, &mut out);

        assert!(out.contains("Ready to fix it for good?"));
        assert!(out.contains(r#"href="tel:(555) 010-2000""#));
        assert!(out.contains("Get a Free Quote"));
    }

    #[test]
    fn test_banner_without_phone_keeps_label() {
        let section = SectionConfig::new("cta-banner-1", "cta-banner").with_content(template().content);

        let mut out = String::new();
        CtaBannerRenderer.render(&section, &BusinessContext::default(), &mut out);

        assert!(out.contains(r#"<span class="cta">Get a Free Quote</span>"#));
        assert!(!out.contains("tel:"));
    }
}
