//! Testimonials section.

use std::fmt::Write;

use serde_json::{Value, json};
use sitekit_model::SectionConfig;

use crate::context::BusinessContext;
use crate::html::escape_html;
use crate::registry::SectionTemplate;
use crate::renderer::SectionRenderer;
use crate::sections::template_content;
use crate::value::{first_array, first_str, str_field};

pub(crate) fn template() -> SectionTemplate {
    SectionTemplate {
        content: template_content(json!({
            "heading": "What Our Customers Say",
            "items": [
                {
                    "quote": "Arrived within the hour and fixed our burst pipe. Lifesavers!",
                    "author": "A happy customer",
                },
            ],
        })),
        styles: None,
    }
}

/// Renders customer quotes with attribution.
pub(crate) struct TestimonialsRenderer;

impl SectionRenderer for TestimonialsRenderer {
    fn render(&self, section: &SectionConfig, _business: &BusinessContext, out: &mut String) {
        if let Some(heading) = str_field(&section.content, "heading") {
            let _ = write!(out, "<h2>{}</h2>", escape_html(heading));
        }

        let Some(items) = first_array(&section.content, &["items", "testimonials"]) else {
            return;
        };

        let mut rendered = String::new();
        for item in items {
            let Value::Object(map) = item else { continue };
            let Some(quote) = first_str(map, &["quote", "text", "body"]) else {
                continue;
            };
            let _ = write!(rendered, "<blockquote><p>{}</p>", escape_html(quote));
            if let Some(author) = first_str(map, &["author", "name"]) {
                let _ = write!(rendered, "<cite>{}</cite>", escape_html(author));
            }
            rendered.push_str("</blockquote>");
        }

        if !rendered.is_empty() {
            let _ = write!(out, r#"<div class="testimonials">{rendered}</div>"#);
        }
    }
}
