//! Section configuration and partial-update merging.
//!
//! A section's `type` is an open string tag: the known set lives in the
//! renderer registry, but the data level never closes the enumeration so
//! that content generation (or the conversational agent) can invent new
//! types without a schema release.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Loosely-typed content/style record keyed by convention per section type.
pub type ContentMap = Map<String, Value>;

fn default_true() -> bool {
    true
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_true(value: &bool) -> bool {
    *value
}

/// One typed, orderable content block on a page.
///
/// Invariants (maintained by the editor operations, not by this type):
/// - `id` is unique among siblings
/// - `type` is a non-empty string
/// - `content` is always present, possibly empty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionConfig {
    /// Unique id within the owning page, shaped like `"hero-1712345678901"`.
    pub id: String,
    /// Open-ended type tag.
    #[serde(rename = "type")]
    pub section_type: String,
    /// Disabled sections are kept in the document but skipped at render time.
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub enabled: bool,
    /// Content record; shape is per-type convention, never statically enforced.
    #[serde(default)]
    pub content: ContentMap,
    /// Optional presentation knobs, also per-type convention.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<ContentMap>,
}

impl SectionConfig {
    /// Create an enabled section with empty content.
    #[must_use]
    pub fn new(id: impl Into<String>, section_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            section_type: section_type.into(),
            enabled: true,
            content: ContentMap::new(),
            styles: None,
        }
    }

    /// Replace the content record (builder style).
    #[must_use]
    pub fn with_content(mut self, content: ContentMap) -> Self {
        self.content = content;
        self
    }

    /// Apply a partial update, returning the merged section.
    ///
    /// `content` and `styles` are shallow-merged key by key, so keys the
    /// patch does not name survive. Scalar fields are replaced when present.
    #[must_use]
    pub fn patched(&self, patch: &SectionPatch) -> Self {
        let mut section = self.clone();
        if let Some(section_type) = &patch.section_type
            && !section_type.is_empty()
        {
            section.section_type = section_type.clone();
        }
        if let Some(enabled) = patch.enabled {
            section.enabled = enabled;
        }
        if let Some(content) = &patch.content {
            merge_into(&mut section.content, content);
        }
        if let Some(styles) = &patch.styles {
            let merged = section.styles.get_or_insert_with(ContentMap::new);
            merge_into(merged, styles);
        }
        section
    }
}

/// Shallow-merge `patch` into `target`, replacing values key by key.
fn merge_into(target: &mut ContentMap, patch: &ContentMap) {
    for (key, value) in patch {
        target.insert(key.clone(), value.clone());
    }
}

/// Partial update for a [`SectionConfig`].
///
/// All fields optional; `content`/`styles` entries are merged, not replaced
/// wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionPatch {
    #[serde(rename = "type")]
    pub section_type: Option<String>,
    pub enabled: Option<bool>,
    pub content: Option<ContentMap>,
    pub styles: Option<ContentMap>,
}

impl SectionPatch {
    /// Patch that only touches the `enabled` flag.
    #[must_use]
    pub fn enabled(enabled: bool) -> Self {
        Self {
            enabled: Some(enabled),
            ..Self::default()
        }
    }

    /// Patch that merges a single content key.
    #[must_use]
    pub fn content_entry(key: impl Into<String>, value: Value) -> Self {
        let mut content = ContentMap::new();
        content.insert(key.into(), value);
        Self {
            content: Some(content),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn content(value: Value) -> ContentMap {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_deserialize_defaults() {
        let section: SectionConfig =
            serde_json::from_value(json!({"id": "hero-1", "type": "hero"})).unwrap();

        assert!(section.enabled);
        assert!(section.content.is_empty());
        assert!(section.styles.is_none());
    }

    #[test]
    fn test_serialize_uses_type_key() {
        let section = SectionConfig::new("hero-1", "hero");
        let json = serde_json::to_value(&section).unwrap();

        assert_eq!(json["type"], "hero");
        assert_eq!(json["id"], "hero-1");
        // Default-true flag is omitted from the document.
        assert!(json.get("enabled").is_none());
    }

    #[test]
    fn test_patched_merges_content_keys() {
        let section = SectionConfig::new("hero-1", "hero").with_content(content(json!({
            "headline": "Old Headline",
            "tagline": "Fast local plumbing",
        })));

        let patch = SectionPatch::content_entry("headline", json!("New Headline"));
        let patched = section.patched(&patch);

        assert_eq!(patched.content["headline"], "New Headline");
        assert_eq!(patched.content["tagline"], "Fast local plumbing");
    }

    #[test]
    fn test_patched_creates_styles_when_absent() {
        let section = SectionConfig::new("hero-1", "hero");
        let patch = SectionPatch {
            styles: Some(content(json!({"align": "center"}))),
            ..SectionPatch::default()
        };

        let patched = section.patched(&patch);
        assert_eq!(patched.styles.unwrap()["align"], "center");
    }

    #[test]
    fn test_patched_ignores_empty_type() {
        let section = SectionConfig::new("hero-1", "hero");
        let patch = SectionPatch {
            section_type: Some(String::new()),
            ..SectionPatch::default()
        };

        assert_eq!(section.patched(&patch).section_type, "hero");
    }

    #[test]
    fn test_patched_toggles_enabled() {
        let section = SectionConfig::new("hero-1", "hero");
        let patched = section.patched(&SectionPatch::enabled(false));

        assert!(!patched.enabled);
        // Non-default flag round-trips through the document.
        let json = serde_json::to_value(&patched).unwrap();
        assert_eq!(json["enabled"], false);
    }
}
