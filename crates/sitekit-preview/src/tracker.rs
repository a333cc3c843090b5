//! Per-turn structural-trigger tracking.

/// Observes the `tool_result` events of one streamed agent turn and
/// decides whether the preview must reload when the turn completes.
///
/// A tool is *structural* when its successful result implies the rendered
/// output changed. Read-only tools never trigger a reload, and however
/// many structural results a turn carries, at most one reload is
/// scheduled.
pub struct TurnReloadTracker {
    structural_tools: &'static [&'static str],
    structural_seen: bool,
}

impl TurnReloadTracker {
    /// Create a tracker over a fixed structural tool set.
    #[must_use]
    pub fn new(structural_tools: &'static [&'static str]) -> Self {
        Self {
            structural_tools,
            structural_seen: false,
        }
    }

    /// Note a `tool_result` event.
    pub fn note_tool_result(&mut self, tool_name: &str) {
        if self.structural_tools.contains(&tool_name) {
            if !self.structural_seen {
                tracing::debug!(tool = %tool_name, "Structural tool result, reload armed");
            }
            self.structural_seen = true;
        }
    }

    /// Whether any structural result has been seen so far this turn.
    #[must_use]
    pub fn reload_pending(&self) -> bool {
        self.structural_seen
    }

    /// Finish the turn: returns whether to schedule exactly one reload,
    /// and resets for the next turn.
    pub fn finish_turn(&mut self) -> bool {
        std::mem::take(&mut self.structural_seen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRUCTURAL: &[&str] = &[
        "update_section",
        "add_section",
        "remove_section",
        "reorder_sections",
        "update_theme",
    ];

    #[test]
    fn test_update_theme_schedules_exactly_one_reload() {
        let mut tracker = TurnReloadTracker::new(STRUCTURAL);
        tracker.note_tool_result("update_theme");

        assert!(tracker.finish_turn());
        // Reset for the next turn.
        assert!(!tracker.finish_turn());
    }

    #[test]
    fn test_read_only_tool_schedules_none() {
        let mut tracker = TurnReloadTracker::new(STRUCTURAL);
        tracker.note_tool_result("get_site_config");

        assert!(!tracker.finish_turn());
    }

    #[test]
    fn test_many_structural_results_still_one_reload() {
        let mut tracker = TurnReloadTracker::new(STRUCTURAL);
        tracker.note_tool_result("add_section");
        tracker.note_tool_result("update_section");
        tracker.note_tool_result("reorder_sections");

        assert!(tracker.reload_pending());
        assert!(tracker.finish_turn());
        assert!(!tracker.reload_pending());
    }
}
