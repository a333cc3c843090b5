//! FAQ section.

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
            "heading": "Frequently Asked Questions",
            "items": [
                {
                    "question": "Do you offer emergency service?",
                    "answer": "Yes, we're available 24/7 for plumbing emergencies.",
                },
                {
                    "question": "Are you licensed and insured?",
                    "answer": "Fully licensed, bonded and insured.",
                },
            ],
        })),
        styles: None,
    }
}

/// Renders question/answer pairs as a definition-style list.
pub(crate) struct FaqRenderer;

impl SectionRenderer for FaqRenderer {
    fn render(&self, section: &SectionConfig, _business: &BusinessContext, out: &mut String) {
        if let Some(heading) = str_field(&section.content, "heading") {
            let _ = write!(out, "<h2>{}</h2>", escape_html(heading));
        }

        let Some(items) = first_array(&section.content, &["items", "faqs"]) else {
            return;
        };

        let mut rendered = String::new();
        for item in items {
            let Value::Object(map) = item else { continue };
            let Some(question) = first_str(map, &["question", "title"]) else {
                continue;
            };
            let _ = write!(rendered, "<dt>{}</dt>", escape_html(question));
            if let Some(answer) = first_str(map, &["answer", "text", "body"]) {
                let _ = write!(rendered, "<dd>{}</dd>", escape_html(answer));
            }
        }

        if !rendered.is_empty() {
            let _ = write!(out, r#"<dl class="faq">{rendered}</dl>"#);
        }
    }
}
