//! Best-effort scroll-into-view targeting.
//!
//! Selecting a section in the editor asks the preview to scroll the
//! matching element into view. The preview renders across an isolation
//! boundary, so resolution is an explicit optional capability: when the
//! section is not on the rendered page, the target is `None` and the
//! request silently does nothing. That failure mode is part of the
//! contract, not an error.

use sitekit_model::PageConfig;

/// A resolved scroll destination in the rendered preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollTarget {
    section_id: String,
}

impl ScrollTarget {
    /// Resolve a target for a section on a rendered page.
    ///
    /// Returns `None` when the section is absent or disabled; disabled
    /// sections are skipped at render time, so there is no element to
    /// scroll to.
    #[must_use]
    pub fn resolve(page: &PageConfig, section_id: &str) -> Option<Self> {
        let section = page.section(section_id)?;
        if !section.enabled {
            return None;
        }
        Some(Self {
            section_id: section_id.to_owned(),
        })
    }

    /// Section id the target points at.
    #[must_use]
    pub fn section_id(&self) -> &str {
        &self.section_id
    }

    /// DOM selector for the stable per-section anchor the renderer emits.
    #[must_use]
    pub fn dom_selector(&self) -> String {
        format!(r#"[data-section-id="{}"]"#, self.section_id)
    }
}
