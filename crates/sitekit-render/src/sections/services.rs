//! Services grid section.

use std::fmt::Write;

use serde_json::{Value, json};
use sitekit_model::SectionConfig;

use crate::context::BusinessContext;
use crate::html::escape_html;
use crate::registry::SectionTemplate;
use crate::renderer::SectionRenderer;
use crate::sections::template_content;
use crate::value::{first_array, first_str, first_text, str_field};

pub(crate) fn template() -> SectionTemplate {
    SectionTemplate {
        content: template_content(json!({
            "heading": "Our Services",
            "items": [
                {"name": "Drain Cleaning", "description": "Clogged drains cleared fast."},
                {"name": "Water Heater Repair", "description": "Repair and replacement, all brands."},
                {"name": "Leak Detection", "description": "Find and fix hidden leaks."},
            ],
        })),
        styles: None,
    }
}

/// Renders the service offerings grid. Content items win; when the section
/// lists none, the services on record for the business are used instead.
pub(crate) struct ServicesRenderer;

struct ServiceCard {
    name: String,
    description: Option<String>,
    price: Option<String>,
}

fn cards_from_content(items: &[Value]) -> Vec<ServiceCard> {
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(name) => Some(ServiceCard {
                name: name.clone(),
                description: None,
                price: None,
            }),
            Value::Object(map) => first_str(map, &["name", "title"]).map(|name| ServiceCard {
                name: name.to_owned(),
                description: str_field(map, "description").map(str::to_owned),
                price: first_text(map, &["price", "cost", "amount"]),
            }),
            _ => None,
        })
        .collect()
}

impl SectionRenderer for ServicesRenderer {
    fn render(&self, section: &SectionConfig, business: &BusinessContext, out: &mut String) {
        if let Some(heading) = str_field(&section.content, "heading") {
            let _ = write!(out, "<h2>{}</h2>", escape_html(heading));
        }

        let cards = first_array(&section.content, &["items", "services"])
            .map(|items| cards_from_content(items))
            .filter(|cards| !cards.is_empty())
            .unwrap_or_else(|| {
                business
                    .services
                    .iter()
                    .map(|s| ServiceCard {
                        name: s.name.clone(),
                        description: s.description.clone(),
                        price: s.price.clone(),
                    })
                    .collect()
            });

        if cards.is_empty() {
            return;
        }

        out.push_str(r#"<ul class="services">"#);
        for card in cards {
            out.push_str("<li>");
            let _ = write!(out, "<h3>{}</h3>", escape_html(&card.name));
            if let Some(price) = &card.price {
                let _ = write!(out, r#"<span class="price">{}</span>"#, escape_html(price));
            }
            if let Some(description) = &card.description {
                let _ = write!(out, "<p>{}</p>", escape_html(description));
            }
            out.push_str("</li>");
        }
        out.push_str("</ul>");
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::context::ContextService;
    use crate::sections::template_content;

    #[test]
    fn test_content_items_win_over_directory() {
        let section = SectionConfig::new("services-1", "services").with_content(template_content(
            json!({"items": [{"name": "Repiping", "price": "$999"}]}),
        ));
        let business = BusinessContext {
            services: vec![ContextService {
                name: "Directory Service".to_owned(),
                description: None,
                price: None,
            }],
            ..BusinessContext::named("Smith Plumbing")
        };

        let mut out = String::new();
        ServicesRenderer.render(&section, &business, &mut out);

        assert!(out.contains("<h3>Repiping</h3>"));
        assert!(out.contains("$999"));
        assert!(!out.contains("Directory Service"));
    }

    #[test]
    fn test_falls_back_to_directory_services() {
        let section = SectionConfig::new("services-1", "services");
        let business = BusinessContext {
            services: vec![ContextService {
                name: "Drain Cleaning".to_owned(),
                description: Some("Fast".to_owned()),
                price: None,
            }],
            ..BusinessContext::named("Smith Plumbing")
        };

        let mut out = String::new();
        ServicesRenderer.render(&section, &business, &mut out);

        assert!(out.contains("<h3>Drain Cleaning</h3>"));
        assert!(out.contains("<p>Fast</p>"));
    }

    #[test]
    fn test_nothing_to_render() {
        let section = SectionConfig::new("services-1", "services");
        let mut out = String::new();
        ServicesRenderer.render(&section, &BusinessContext::default(), &mut out);
        assert!(out.is_empty());
    }
}
