//! Trust bar section: rating and credential badges.

use std::fmt::Write;

use serde_json::json;
use sitekit_model::SectionConfig;

use crate::context::BusinessContext;
use crate::html::escape_html;
use crate::registry::SectionTemplate;
use crate::renderer::SectionRenderer;
use crate::sections::template_content;
use crate::value::first_array;

pub(crate) fn template() -> SectionTemplate {
    SectionTemplate {
        content: template_content(json!({
            "badges": ["Licensed & Insured", "Same-Day Service", "Upfront Pricing"],
        })),
        styles: None,
    }
}

/// Renders the trust strip: star rating from the business record plus
/// badge items from content.
pub(crate) struct TrustBarRenderer;

impl SectionRenderer for TrustBarRenderer {
    fn render(&self, section: &SectionConfig, business: &BusinessContext, out: &mut String) {
        if let Some(rating) = business.rating {
            let _ = write!(out, r#"<span class="rating">{rating:.1} &#9733;"#);
            if let Some(count) = business.review_count {
                let _ = write!(out, " ({count} reviews)");
            }
            out.push_str("</span>");
        }

        let badges = first_array(&section.content, &["badges", "items"]);
        let Some(badges) = badges else { return };

        let rendered: Vec<_> = badges
            .iter()
            .filter_map(serde_json::Value::as_str)
            .collect();
        if rendered.is_empty() {
            return;
        }

        out.push_str(r#"<ul class="badges">"#);
        for badge in rendered {
            let _ = write!(out, "<li>{}</li>", escape_html(badge));
        }
        out.push_str("</ul>");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_and_badges() {
        let section = SectionConfig::new("trust-bar-1", "trust-bar").with_content(template().content);
        let business = BusinessContext {
            rating: Some(4.8),
            review_count: Some(132),
            ..BusinessContext::named("Smith Plumbing")
        };

        let mut out = String::new();
        TrustBarRenderer.render(&section, &business, &mut out);

        assert!(out.contains("4.8"));
        assert!(out.contains("(132 reviews)"));
        assert!(out.contains("<li>Licensed &amp; Insured</li>"));
    }

    #[test]
    fn test_empty_content_and_no_rating_renders_nothing() {
        let section = SectionConfig::new("trust-bar-1", "trust-bar");
        let mut out = String::new();
        TrustBarRenderer.render(&section, &BusinessContext::default(), &mut out);
        assert!(out.is_empty());
    }
}
