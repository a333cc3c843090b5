//! Lenient field extraction from loose content records.
//!
//! Section content is a JSON object shaped by per-type convention, so every
//! read here is opportunistic: a missing or wrong-typed field yields `None`
//! and the caller omits that concept. Nothing in this module errors.

use serde_json::Value;
use sitekit_model::ContentMap;

/// First string value among `keys`, in priority order.
pub(crate) fn first_str<'a>(content: &'a ContentMap, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| content.get(*key).and_then(Value::as_str))
}

/// String value for a single key.
pub(crate) fn str_field<'a>(content: &'a ContentMap, key: &str) -> Option<&'a str> {
    content.get(key).and_then(Value::as_str)
}

/// String or number rendered as text (prices come in both shapes).
pub(crate) fn text_like(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First string-or-number field among `keys`.
pub(crate) fn first_text(map: &ContentMap, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| map.get(*key).and_then(text_like))
}

/// First array value among `keys`.
pub(crate) fn first_array<'a>(content: &'a ContentMap, keys: &[&str]) -> Option<&'a Vec<Value>> {
    keys.iter().find_map(|key| content.get(*key).and_then(Value::as_array))
}

/// An image reference extracted from content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ImageRef {
    pub src: String,
    pub alt: Option<String>,
}

/// Extract an image from a value: an object with `src` or `url` plus an
/// optional `alt`, or a bare string URL.
pub(crate) fn image_from(value: &Value) -> Option<ImageRef> {
    match value {
        Value::String(src) if !src.is_empty() => Some(ImageRef {
            src: src.clone(),
            alt: None,
        }),
        Value::Object(map) => {
            let src = first_str(map, &["src", "url"])?;
            if src.is_empty() {
                return None;
            }
            Some(ImageRef {
                src: src.to_owned(),
                alt: str_field(map, "alt").map(str::to_owned),
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn map(value: Value) -> ContentMap {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_first_str_priority_order() {
        let content = map(json!({"title": "C", "headline": "B", "heading": "A"}));
        assert_eq!(first_str(&content, &["heading", "headline", "title"]), Some("A"));
    }

    #[test]
    fn test_first_str_skips_wrong_type() {
        let content = map(json!({"heading": 42, "title": "T"}));
        assert_eq!(first_str(&content, &["heading", "headline", "title"]), Some("T"));
    }

    #[test]
    fn test_text_like_number() {
        assert_eq!(text_like(&json!(129)), Some("129".to_owned()));
        assert_eq!(text_like(&json!(true)), None);
    }

    #[test]
    fn test_image_from_object_and_string() {
        assert_eq!(
            image_from(&json!({"url": "/a.png", "alt": "A"})),
            Some(ImageRef { src: "/a.png".to_owned(), alt: Some("A".to_owned()) })
        );
        assert_eq!(
            image_from(&json!("/b.png")),
            Some(ImageRef { src: "/b.png".to_owned(), alt: None })
        );
        assert_eq!(image_from(&json!({"alt": "no source"})), None);
        assert_eq!(image_from(&json!(7)), None);
    }
}
