//! Selection mode and the set of selected threads

use thread_history_core::SelectionMode;
use tracing::debug;

/// Owns the selection-mode flag and the selected thread ids.
///
/// Ids keep the order they were selected in, which is the order a batch
/// delete sends them to the store. The id list is always empty while
/// browsing.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    mode: SelectionMode,
    selected: Vec<String>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn is_selecting(&self) -> bool {
        self.mode == SelectionMode::Selecting
    }

    /// Selected ids in selection order
    pub fn selected_ids(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|selected| selected == id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn enter_selection_mode(&mut self) {
        if self.is_selecting() {
            return;
        }
        debug!("Entering selection mode");
        self.mode = SelectionMode::Selecting;
    }

    pub fn exit_selection_mode(&mut self) {
        if self.is_selecting() {
            debug!("Exiting selection mode ({} selected)", self.selected.len());
        }
        self.mode = SelectionMode::Browsing;
        self.selected.clear();
    }

    /// Flip membership of `id`. Ignored while browsing.
    pub fn toggle_select(&mut self, id: &str) {
        if !self.is_selecting() {
            debug!("Ignoring toggle of {} outside selection mode", id);
            return;
        }

        if let Some(pos) = self.selected.iter().position(|selected| selected == id) {
            self.selected.remove(pos);
        } else {
            self.selected.push(id.to_string());
        }
    }

    /// Replace the selection with `known_ids`. Ignored while browsing.
    pub fn select_all<I, S>(&mut self, known_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if !self.is_selecting() {
            debug!("Ignoring select-all outside selection mode");
            return;
        }

        self.selected.clear();
        for id in known_ids {
            let id = id.into();
            if !self.selected.contains(&id) {
                self.selected.push(id);
            }
        }
    }

    pub fn deselect_all(&mut self) {
        self.selected.clear();
    }

    /// Drop selected ids that are no longer in `known_ids`
    pub fn retain_known<'a, I>(&mut self, known_ids: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        let known: std::collections::HashSet<&str> = known_ids.into_iter().collect();
        let before = self.selected.len();
        self.selected.retain(|id| known.contains(id.as_str()));

        let pruned = before - self.selected.len();
        if pruned > 0 {
            debug!("Pruned {} stale selected ids", pruned);
        }
        pruned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn selecting() -> SelectionController {
        let mut selection = SelectionController::new();
        selection.enter_selection_mode();
        selection
    }

    #[test]
    fn test_starts_browsing_and_empty() {
        let selection = SelectionController::new();
        assert_eq!(selection.mode(), SelectionMode::Browsing);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_toggle_adds_and_removes() {
        let mut selection = selecting();
        selection.toggle_select("a");
        selection.toggle_select("c");
        selection.toggle_select("b");
        selection.toggle_select("b");

        assert_eq!(selection.selected_ids(), ["a", "c"]);
        assert!(selection.is_selected("c"));
        assert!(!selection.is_selected("b"));
    }

    #[test]
    fn test_toggle_while_browsing_is_ignored() {
        let mut selection = SelectionController::new();
        selection.toggle_select("a");
        assert!(selection.is_empty());
        assert_eq!(selection.mode(), SelectionMode::Browsing);
    }

    #[test]
    fn test_exit_clears_everything() {
        let mut selection = selecting();
        selection.toggle_select("a");
        selection.exit_selection_mode();

        assert_eq!(selection.mode(), SelectionMode::Browsing);
        assert!(selection.is_empty());

        // Idempotent
        selection.exit_selection_mode();
        assert!(selection.is_empty());
    }

    #[test]
    fn test_enter_is_noop_when_selecting() {
        let mut selection = selecting();
        selection.toggle_select("a");
        selection.enter_selection_mode();
        assert_eq!(selection.selected_ids(), ["a"]);
    }

    #[test]
    fn test_select_all_then_deselect_all_keeps_mode() {
        let mut selection = selecting();
        selection.select_all(["a", "b", "a", "c"]);
        assert_eq!(selection.selected_ids(), ["a", "b", "c"]);

        selection.deselect_all();
        assert!(selection.is_empty());
        assert_eq!(selection.mode(), SelectionMode::Selecting);
    }

    #[test]
    fn test_selection_stays_within_toggled_ids() {
        let mut selection = selecting();
        let toggled = ["x", "y", "x", "z", "y", "y"];
        for id in toggled {
            selection.toggle_select(id);
            assert!(selection.selected_ids().iter().all(|s| toggled.contains(&s.as_str())));
        }
        assert_eq!(selection.selected_ids(), ["z", "y"]);
    }

    #[test]
    fn test_retain_known_prunes_stale_ids() {
        let mut selection = selecting();
        selection.select_all(["a", "b", "c"]);

        let pruned = selection.retain_known(["a", "c", "d"]);
        assert_eq!(pruned, 1);
        assert_eq!(selection.selected_ids(), ["a", "c"]);
    }
}
