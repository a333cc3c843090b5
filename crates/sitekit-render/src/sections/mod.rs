//! Built-in section renderers for the plumbing-services vertical.
//!
//! Each module pairs a renderer with the default content template recorded
//! in the registry. Content structs are read leniently field by field: a
//! missing or wrong-typed field falls back to business-context data or is
//! omitted, never an error.

pub(crate) mod cta;
pub(crate) mod faq;
pub(crate) mod hero;
pub(crate) mod services;
pub(crate) mod testimonials;
pub(crate) mod trust_bar;

use serde_json::Value;
use sitekit_model::ContentMap;

/// Convert a `json!` object literal into a content map.
///
/// # Panics
///
/// Panics if the value is not an object; templates are static literals.
pub(crate) fn template_content(value: Value) -> ContentMap {
    match value {
        Value::Object(map) => map,
        other => panic!("section template must be a JSON object, got {other}"),
    }
}
