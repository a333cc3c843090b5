//! Generic fallback renderer.
//!
//! Renders section types the registry has never seen by inferring common
//! concepts from the content record. Field candidates are checked in
//! priority order, first match wins per concept:
//!
//! - heading: `heading` | `headline` | `title`
//! - subheading: `subheading` | `tagline` | `subtitle` | `description`
//! - body: `body` | `text` | `content` (trusted rich content, passed through)
//! - list: `items` | `list` | `features` | `faqs` | `options` | `tiers`
//! - image: `image` (single), `images` | `gallery` (collection)
//!
//! This is an explicit never-fail contract: wrong-typed or missing fields
//! degrade to omission, and when nothing at all is recognized the renderer
//! emits a neutral placeholder naming the type instead of an empty or
//! broken fragment.

use std::fmt::Write;

use serde_json::Value;
use sitekit_model::ContentMap;

use crate::html::escape_html;
use crate::value::{first_array, first_str, first_text, image_from};

const HEADING_KEYS: &[&str] = &["heading", "headline", "title"];
const SUBHEADING_KEYS: &[&str] = &["subheading", "tagline", "subtitle", "description"];
const BODY_KEYS: &[&str] = &["body", "text", "content"];
const LIST_KEYS: &[&str] = &["items", "list", "features", "faqs", "options", "tiers"];
const ITEM_TITLE_KEYS: &[&str] = &["title", "name", "question", "label"];
const ITEM_BODY_KEYS: &[&str] = &["description", "answer", "text", "body"];
const ITEM_PRICE_KEYS: &[&str] = &["price", "cost", "amount"];
const GALLERY_KEYS: &[&str] = &["images", "gallery"];

/// Render an arbitrary content record for an unrecognized section type.
///
/// Appends the fragment to `out`; never fails for any input.
pub fn render_generic(section_type: &str, content: &ContentMap, out: &mut String) {
    let mut recognized = false;

    if let Some(heading) = first_str(content, HEADING_KEYS) {
        let _ = write!(out, "<h2>{}</h2>", escape_html(heading));
        recognized = true;
    }
    if let Some(subheading) = first_str(content, SUBHEADING_KEYS) {
        let _ = write!(out, r#"<p class="subheading">{}</p>"#, escape_html(subheading));
        recognized = true;
    }
    if let Some(body) = first_str(content, BODY_KEYS) {
        // Trusted, admin-authored rich content; passed through unescaped.
        let _ = write!(out, r#"<div class="body">{body}</div>"#);
        recognized = true;
    }
    if let Some(items) = first_array(content, LIST_KEYS)
        && render_items(items, out)
    {
        recognized = true;
    }
    if let Some(image) = content.get("image").and_then(image_from) {
        push_figure(&image.src, image.alt.as_deref(), out);
        recognized = true;
    }
    if let Some(gallery) = first_array(content, GALLERY_KEYS) {
        let images: Vec<_> = gallery.iter().filter_map(image_from).collect();
        if !images.is_empty() {
            out.push_str(r#"<div class="gallery">"#);
            for image in &images {
                push_figure(&image.src, image.alt.as_deref(), out);
            }
            out.push_str("</div>");
            recognized = true;
        }
    }

    if !recognized {
        tracing::debug!(section_type = %section_type, "No recognizable fields, emitting placeholder");
        let _ = write!(
            out,
            r#"<p class="placeholder">Content block ({})</p>"#,
            escape_html(section_type)
        );
    }
}

/// Render list items; returns false when no element produced output.
fn render_items(items: &[Value], out: &mut String) -> bool {
    let mut rendered = String::new();
    for item in items {
        render_item(item, &mut rendered);
    }
    if rendered.is_empty() {
        return false;
    }
    out.push_str(r#"<ul class="items">"#);
    out.push_str(&rendered);
    out.push_str("</ul>");
    true
}

/// Render one list element: a bare string, or a record from which title,
/// description, price and a nested image are opportunistically extracted.
fn render_item(item: &Value, out: &mut String) {
    match item {
        Value::String(text) => {
            let _ = write!(out, "<li>{}</li>", escape_html(text));
        }
        Value::Number(n) => {
            let _ = write!(out, "<li>{n}</li>");
        }
        Value::Object(map) => {
            let title = first_str(map, ITEM_TITLE_KEYS);
            let body = first_str(map, ITEM_BODY_KEYS);
            let price = first_text(map, ITEM_PRICE_KEYS);
            let image = map.get("image").and_then(image_from);

            if title.is_none() && body.is_none() && price.is_none() && image.is_none() {
                return;
            }

            out.push_str("<li>");
            if let Some(title) = title {
                let _ = write!(out, "<strong>{}</strong>", escape_html(title));
            }
            if let Some(price) = price {
                let _ = write!(out, r#"<span class="price">{}</span>"#, escape_html(&price));
            }
            if let Some(body) = body {
                let _ = write!(out, "<p>{}</p>", escape_html(body));
            }
            if let Some(image) = image {
                push_figure(&image.src, image.alt.as_deref(), out);
            }
            out.push_str("</li>");
        }
        _ => {}
    }
}

fn push_figure(src: &str, alt: Option<&str>, out: &mut String) {
    let _ = write!(
        out,
        r#"<figure><img src="{}" alt="{}"></figure>"#,
        escape_html(src),
        escape_html(alt.unwrap_or(""))
    );
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn render(content: Value) -> String {
        let map = match content {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        };
        let mut out = String::new();
        render_generic("mystery", &map, &mut out);
        out
    }

    #[test]
    fn test_empty_content_emits_placeholder() {
        let out = render(json!({}));
        assert!(!out.is_empty());
        assert!(out.contains("mystery"));
        assert!(out.contains("placeholder"));
    }

    #[test]
    fn test_unrecognized_fields_emit_placeholder() {
        let out = render(json!({"frobnication": 3, "wibble": {"x": 1}}));
        assert!(out.contains("placeholder"));
    }

    #[test]
    fn test_heading_priority() {
        let out = render(json!({"title": "T", "headline": "H"}));
        assert!(out.contains("<h2>H</h2>"));
        assert!(!out.contains("<h2>T</h2>"));
    }

    #[test]
    fn test_wrong_typed_items_degrade_to_placeholder() {
        // `items` as a string is not a list; nothing else is recognizable.
        let out = render(json!({"items": "not a list"}));
        assert!(out.contains("placeholder"));
    }

    #[test]
    fn test_wrong_typed_items_with_heading_omit_list() {
        let out = render(json!({"heading": "Hi", "items": 42}));
        assert!(out.contains("<h2>Hi</h2>"));
        assert!(!out.contains("<ul"));
    }

    #[test]
    fn test_string_and_record_items() {
        let out = render(json!({
            "items": [
                "Bare string",
                {"question": "Why?", "answer": "Because.", "price": 49},
                {"unrelated": true},
            ]
        }));

        assert!(out.contains("<li>Bare string</li>"));
        assert!(out.contains("<strong>Why?</strong>"));
        assert!(out.contains("<p>Because.</p>"));
        assert!(out.contains(r#"<span class="price">49</span>"#));
        // The unrecognizable record contributes nothing.
        assert_eq!(out.matches("<li>").count(), 2);
    }

    #[test]
    fn test_body_passed_through_unescaped() {
        let out = render(json!({"body": "<p>Rich <em>content</em></p>"}));
        assert!(out.contains("<p>Rich <em>content</em></p>"));
    }

    #[test]
    fn test_heading_escaped() {
        let out = render(json!({"heading": "Fast & <Cheap>"}));
        assert!(out.contains("Fast &amp; &lt;Cheap&gt;"));
    }

    #[test]
    fn test_single_image_and_gallery() {
        let out = render(json!({
            "image": {"src": "/hero.png", "alt": "Van"},
            "gallery": [{"url": "/a.png"}, "/b.png", {"alt": "no src"}],
        }));

        assert!(out.contains(r#"<img src="/hero.png" alt="Van">"#));
        assert!(out.contains(r#"<img src="/a.png" alt="">"#));
        assert!(out.contains(r#"<img src="/b.png" alt="">"#));
        assert_eq!(out.matches("<img").count(), 3);
    }

    #[test]
    fn test_image_collection_without_usable_entries_is_placeholder() {
        let out = render(json!({"images": [{"alt": "x"}, 9]}));
        assert!(out.contains("placeholder"));
    }

    #[test]
    fn test_faq_shaped_list() {
        let out = render(json!({
            "heading": "FAQs",
            "faqs": [{"question": "Do you do emergencies?", "answer": "Yes, 24/7."}],
        }));

        assert!(out.contains("<h2>FAQs</h2>"));
        assert!(out.contains("Do you do emergencies?"));
        assert!(out.contains("Yes, 24/7."));
    }
}
