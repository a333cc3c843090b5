//! Editor selection state.

use sitekit_model::SectionConfig;

/// Tracks which section is selected for editing on the current page.
///
/// Selection follows the mutation operations: adding a section selects it,
/// deleting the selected section clears the selection.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EditorState {
    selected_section_id: Option<String>,
}

impl EditorState {
    /// Create an empty state with nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently selected section id.
    #[must_use]
    pub fn selected_section_id(&self) -> Option<&str> {
        self.selected_section_id.as_deref()
    }

    /// Select a section for editing.
    pub fn select(&mut self, section_id: impl Into<String>) {
        self.selected_section_id = Some(section_id.into());
    }

    /// Clear the selection.
    pub fn clear(&mut self) {
        self.selected_section_id = None;
    }

    /// Note that a section was added; selection moves to it.
    pub fn note_added(&mut self, section: &SectionConfig) {
        self.select(section.id.clone());
    }

    /// Note that a section was removed; clears the selection when it was
    /// the selected one.
    pub fn note_removed(&mut self, section_id: &str) {
        if self.selected_section_id.as_deref() == Some(section_id) {
            self.clear();
        }
    }
}
