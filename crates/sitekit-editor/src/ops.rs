//! Mutation operations over the site document.

use sitekit_model::{SectionConfig, SectionPatch, SiteConfig, ThemeUpdate};

/// Insert a section into a page.
///
/// Inserts at `position` when given and within bounds, else appends. The
/// caller supplies a pre-built section, usually a registry default clone
/// with a fresh id. A duplicate id among siblings is refused (no-op);
/// sibling id uniqueness is an invariant of the document.
#[must_use]
pub fn add_section(
    site: &SiteConfig,
    page_id: &str,
    section: SectionConfig,
    position: Option<usize>,
) -> SiteConfig {
    let Some(page) = site.page(page_id) else {
        return site.clone();
    };
    if section.section_type.is_empty() || page.section(&section.id).is_some() {
        return site.clone();
    }

    let mut sections = page.sections.clone();
    match position {
        Some(index) if index <= sections.len() => sections.insert(index, section),
        _ => sections.push(section),
    }
    site.with_page_sections(page_id, sections)
}

/// Merge a partial update into the section matching `id`.
///
/// `content` and `styles` are shallow-merged, so unspecified keys survive.
/// No-op when the page or section is not found.
#[must_use]
pub fn update_section(
    site: &SiteConfig,
    page_id: &str,
    section_id: &str,
    patch: &SectionPatch,
) -> SiteConfig {
    let Some(page) = site.page(page_id) else {
        return site.clone();
    };
    if page.section(section_id).is_none() {
        return site.clone();
    }

    let sections = page
        .sections
        .iter()
        .map(|section| {
            if section.id == section_id {
                section.patched(patch)
            } else {
                section.clone()
            }
        })
        .collect();
    site.with_page_sections(page_id, sections)
}

/// Remove the section matching `id`. No-op when not found.
#[must_use]
pub fn remove_section(site: &SiteConfig, page_id: &str, section_id: &str) -> SiteConfig {
    let Some(page) = site.page(page_id) else {
        return site.clone();
    };
    if page.section(section_id).is_none() {
        return site.clone();
    }

    let sections = page
        .sections
        .iter()
        .filter(|section| section.id != section_id)
        .cloned()
        .collect();
    site.with_page_sections(page_id, sections)
}

/// Replace a page's section list with a caller-computed order.
///
/// This is a destructive replace, not a diff: the caller is the sole
/// source of truth for the resulting order.
#[must_use]
pub fn reorder_sections(
    site: &SiteConfig,
    page_id: &str,
    new_order: Vec<SectionConfig>,
) -> SiteConfig {
    if site.page(page_id).is_none() {
        return site.clone();
    }
    site.with_page_sections(page_id, new_order)
}

/// Move the section at `from` to `to`, the list a drag produces: remove at
/// the source index, insert at the destination index. Out-of-bounds
/// indices are a no-op.
#[must_use]
pub fn move_section(site: &SiteConfig, page_id: &str, from: usize, to: usize) -> SiteConfig {
    let Some(page) = site.page(page_id) else {
        return site.clone();
    };
    if from >= page.sections.len() || to >= page.sections.len() {
        return site.clone();
    }

    let mut sections = page.sections.clone();
    let section = sections.remove(from);
    sections.insert(to, section);
    reorder_sections(site, page_id, sections)
}

/// Flip a section's `enabled` flag; a targeted update.
#[must_use]
pub fn toggle_enabled(site: &SiteConfig, page_id: &str, section_id: &str) -> SiteConfig {
    let Some(enabled) = site
        .page(page_id)
        .and_then(|page| page.section(section_id))
        .map(|section| section.enabled)
    else {
        return site.clone();
    };
    update_section(site, page_id, section_id, &SectionPatch::enabled(!enabled))
}

/// Apply a partial theme update, shallow-merged per sub-object.
#[must_use]
pub fn update_theme(site: &SiteConfig, update: &ThemeUpdate) -> SiteConfig {
    site.with_theme(site.theme.merged(update))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use sitekit_model::{ContentMap, PageConfig};

    use super::*;

    fn content(value: serde_json::Value) -> ContentMap {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn section(id: &str, section_type: &str) -> SectionConfig {
        SectionConfig::new(id, section_type)
    }

    fn site() -> SiteConfig {
        SiteConfig::new(vec![
            PageConfig::home("Home", vec![
                section("hero-1", "hero"),
                section("services-2", "services"),
                section("faq-3", "faq"),
            ]),
            PageConfig::new("contact", "contact", "Contact", vec![section("cta-9", "cta-banner")]),
        ])
    }

    fn ids(site: &SiteConfig, page_id: &str) -> Vec<String> {
        site.page(page_id)
            .unwrap()
            .sections
            .iter()
            .map(|s| s.id.clone())
            .collect()
    }

    #[test]
    fn test_add_appends_without_position() {
        let updated = add_section(&site(), "home", section("cta-4", "cta-banner"), None);
        assert_eq!(ids(&updated, "home"), ["hero-1", "services-2", "faq-3", "cta-4"]);
    }

    #[test]
    fn test_add_inserts_at_position() {
        let updated = add_section(&site(), "home", section("cta-4", "cta-banner"), Some(1));
        assert_eq!(ids(&updated, "home"), ["hero-1", "cta-4", "services-2", "faq-3"]);
    }

    #[test]
    fn test_add_out_of_bounds_appends() {
        let updated = add_section(&site(), "home", section("cta-4", "cta-banner"), Some(99));
        assert_eq!(ids(&updated, "home"), ["hero-1", "services-2", "faq-3", "cta-4"]);
    }

    #[test]
    fn test_add_duplicate_id_is_noop() {
        let original = site();
        let updated = add_section(&original, "home", section("hero-1", "hero"), None);
        assert_eq!(updated, original);
    }

    #[test]
    fn test_add_unknown_page_is_noop() {
        let original = site();
        assert_eq!(add_section(&original, "missing", section("x-1", "x"), None), original);
    }

    #[test]
    fn test_add_leaves_sibling_pages_untouched() {
        let original = site();
        let updated = add_section(&original, "home", section("cta-4", "cta-banner"), None);
        assert_eq!(
            updated.page("contact").unwrap().sections,
            original.page("contact").unwrap().sections
        );
    }

    #[test]
    fn test_update_merges_content() {
        let original = site();
        let seeded = update_section(
            &original,
            "home",
            "hero-1",
            &SectionPatch {
                content: Some(content(json!({"headline": "Old", "tagline": "Keep me"}))),
                ..SectionPatch::default()
            },
        );
        let updated = update_section(
            &seeded,
            "home",
            "hero-1",
            &SectionPatch::content_entry("headline", json!("New Headline")),
        );

        let hero = updated.page("home").unwrap().section("hero-1").unwrap();
        assert_eq!(hero.content["headline"], "New Headline");
        assert_eq!(hero.content["tagline"], "Keep me");
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let original = site();
        let updated = update_section(
            &original,
            "home",
            "missing",
            &SectionPatch::content_entry("headline", json!("x")),
        );
        assert_eq!(updated, original);
    }

    #[test]
    fn test_remove_section() {
        let updated = remove_section(&site(), "home", "services-2");
        assert_eq!(ids(&updated, "home"), ["hero-1", "faq-3"]);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let original = site();
        assert_eq!(remove_section(&original, "home", "missing"), original);
    }

    #[test]
    fn test_add_then_remove_round_trips() {
        let original = site();
        let added = add_section(&original, "home", section("cta-4", "cta-banner"), Some(1));
        let restored = remove_section(&added, "home", "cta-4");
        assert_eq!(restored, original);
    }

    #[test]
    fn test_move_drag_to_front() {
        // [A, B, C], drag index 2 to index 0 -> [C, A, B].
        let updated = move_section(&site(), "home", 2, 0);
        assert_eq!(ids(&updated, "home"), ["faq-3", "hero-1", "services-2"]);
    }

    #[test]
    fn test_move_to_own_index_is_identity() {
        let original = site();
        assert_eq!(move_section(&original, "home", 1, 1), original);
    }

    #[test]
    fn test_move_out_of_bounds_is_noop() {
        let original = site();
        assert_eq!(move_section(&original, "home", 0, 3), original);
        assert_eq!(move_section(&original, "home", 9, 0), original);
    }

    #[test]
    fn test_reorder_replaces_wholesale() {
        let original = site();
        let reversed: Vec<_> = original
            .page("home")
            .unwrap()
            .sections
            .iter()
            .rev()
            .cloned()
            .collect();
        let updated = reorder_sections(&original, "home", reversed);
        assert_eq!(ids(&updated, "home"), ["faq-3", "services-2", "hero-1"]);
    }

    #[test]
    fn test_toggle_enabled_flips_twice() {
        let original = site();
        let off = toggle_enabled(&original, "home", "hero-1");
        assert!(!off.page("home").unwrap().section("hero-1").unwrap().enabled);

        let on = toggle_enabled(&off, "home", "hero-1");
        assert_eq!(on, original);
    }

    #[test]
    fn test_update_theme_merges() {
        let original = site();
        let update: ThemeUpdate =
            serde_json::from_value(json!({"colors": {"primary": "#123456"}})).unwrap();
        let updated = update_theme(&original, &update);

        assert_eq!(updated.theme.colors.primary, "#123456");
        assert_eq!(updated.theme.fonts, original.theme.fonts);
        assert_eq!(updated.pages, original.pages);
    }
}
