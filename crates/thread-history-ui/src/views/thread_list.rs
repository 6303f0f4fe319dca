//! Headless view model of the thread list
//!
//! A `ThreadListView` is a snapshot of everything a list renderer needs:
//! rows with their affordances, the selection header and footer, and any
//! pending confirmation dialog. Renderers never touch controller state.

use crate::layout;
use crate::state::{DeletePhase, SelectionController, Surface};
use serde::Serialize;
use thread_history_core::{plural, ThreadSummary};
use unicode_segmentation::UnicodeSegmentation;

/// Per-row action affordance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowAffordance {
    Checkbox { checked: bool },
    DeleteOnHover,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadRow {
    pub id: String,
    pub preview: String,
    pub selected: bool,
    pub open: bool,
    pub affordance: RowAffordance,
}

/// "Select" / "Exit Select" header button
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderToggle {
    pub label: &'static str,
    pub active: bool,
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkAction {
    SelectAll,
    DeselectAll,
}

impl BulkAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::SelectAll => "Select All",
            Self::DeselectAll => "Deselect",
        }
    }
}

/// Footer shown while in selection mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionFooter {
    pub summary: String,
    pub bulk_action: BulkAction,
    pub delete_label: String,
    pub delete_enabled: bool,
    pub controls_enabled: bool,
    pub busy: bool,
}

/// Pending delete confirmation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmDialog {
    pub title: &'static str,
    pub description: String,
    pub batch: bool,
    pub busy: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadListView {
    pub title: &'static str,
    pub width: u32,
    pub loading: bool,
    /// Skeleton rows drawn while loading
    pub placeholder_rows: usize,
    pub rows: Vec<ThreadRow>,
    pub header_toggle: Option<HeaderToggle>,
    pub footer: Option<SelectionFooter>,
    pub dialog: Option<ConfirmDialog>,
}

/// Inputs for [`ThreadListView::build`]
pub struct ViewInputs<'a> {
    pub threads: &'a [ThreadSummary],
    pub selection: &'a SelectionController,
    pub phase: &'a DeletePhase,
    pub open_thread: Option<&'a str>,
    pub loading: bool,
    pub width: u32,
    pub preview_max_chars: usize,
}

impl ThreadListView {
    pub fn build(inputs: ViewInputs<'_>) -> Self {
        let ViewInputs {
            threads,
            selection,
            phase,
            open_thread,
            loading,
            width,
            preview_max_chars,
        } = inputs;

        let selecting = selection.is_selecting();
        let busy = phase.is_deleting();

        if loading {
            return Self {
                title: layout::PANEL_TITLE,
                width,
                loading,
                placeholder_rows: layout::PLACEHOLDER_ROWS,
                rows: Vec::new(),
                header_toggle: None,
                footer: None,
                dialog: dialog_for(phase),
            };
        }

        let rows = threads
            .iter()
            .map(|thread| {
                let selected = selection.is_selected(&thread.id);
                ThreadRow {
                    id: thread.id.clone(),
                    preview: truncate_preview(&thread.preview_text, preview_max_chars),
                    selected,
                    open: open_thread == Some(thread.id.as_str()),
                    affordance: if selecting {
                        RowAffordance::Checkbox { checked: selected }
                    } else {
                        RowAffordance::DeleteOnHover
                    },
                }
            })
            .collect();

        let header_toggle = (!threads.is_empty()).then_some(HeaderToggle {
            label: if selecting { "Exit Select" } else { "Select" },
            active: selecting,
            enabled: !busy,
        });

        let footer = selecting.then(|| {
            let count = selection.len();
            SelectionFooter {
                summary: format!("{} of {} selected", count, threads.len()),
                bulk_action: if count < threads.len() {
                    BulkAction::SelectAll
                } else {
                    BulkAction::DeselectAll
                },
                delete_label: format!("Delete ({})", count),
                delete_enabled: count > 0 && !busy,
                controls_enabled: !busy,
                busy,
            }
        });

        Self {
            title: layout::PANEL_TITLE,
            width,
            loading,
            placeholder_rows: 0,
            rows,
            header_toggle,
            footer,
            dialog: dialog_for(phase),
        }
    }
}

fn dialog_for(phase: &DeletePhase) -> Option<ConfirmDialog> {
    match phase {
        DeletePhase::Idle => None,
        DeletePhase::ConfirmingSingle(_) => Some(single_dialog(false)),
        DeletePhase::ConfirmingBatch(ids) => Some(batch_dialog(ids.len(), false)),
        DeletePhase::Deleting(target) if target.is_batch() => {
            Some(batch_dialog(target.len(), true))
        }
        DeletePhase::Deleting(_) => Some(single_dialog(true)),
    }
}

fn single_dialog(busy: bool) -> ConfirmDialog {
    ConfirmDialog {
        title: "Delete Thread",
        description: "Are you sure you want to delete this thread? This action cannot be undone."
            .to_string(),
        batch: false,
        busy,
    }
}

fn batch_dialog(count: usize, busy: bool) -> ConfirmDialog {
    ConfirmDialog {
        title: "Delete Threads",
        description: format!(
            "Are you sure you want to delete {} thread{}? This action cannot be undone.",
            count,
            plural(count)
        ),
        batch: true,
        busy,
    }
}

/// Cut `text` to `max` graphemes, marking the cut with an ellipsis
pub fn truncate_preview(text: &str, max: usize) -> String {
    let mut graphemes = text.graphemes(true);
    let head: String = graphemes.by_ref().take(max).collect();
    if graphemes.next().is_some() {
        format!("{}…", head.trim_end())
    } else {
        head
    }
}

/// Draws a [`ThreadListView`] into one surface
pub trait ThreadListRenderer {
    fn render_list(&mut self, surface: Surface, view: &ThreadListView);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use thread_history_core::DeleteTarget;

    fn threads() -> Vec<ThreadSummary> {
        vec![
            ThreadSummary::new("a", "Draft the launch email"),
            ThreadSummary::new("b", "b"),
            ThreadSummary::new("c", "Compare vendors"),
        ]
    }

    fn build(
        threads: &[ThreadSummary],
        selection: &SelectionController,
        phase: &DeletePhase,
    ) -> ThreadListView {
        ThreadListView::build(ViewInputs {
            threads,
            selection,
            phase,
            open_thread: Some("c"),
            loading: false,
            width: 300,
            preview_max_chars: 100,
        })
    }

    #[test]
    fn test_browsing_rows_offer_delete() {
        let threads = threads();
        let view = build(&threads, &SelectionController::new(), &DeletePhase::Idle);

        assert_eq!(view.rows.len(), 3);
        assert!(view
            .rows
            .iter()
            .all(|row| row.affordance == RowAffordance::DeleteOnHover));
        assert!(view.rows[2].open);
        assert_eq!(view.header_toggle.unwrap().label, "Select");
        assert!(view.footer.is_none());
        assert!(view.dialog.is_none());
    }

    #[test]
    fn test_selection_footer() {
        let threads = threads();
        let mut selection = SelectionController::new();
        selection.enter_selection_mode();
        selection.toggle_select("a");
        selection.toggle_select("c");

        let view = build(&threads, &selection, &DeletePhase::Idle);
        assert_eq!(
            view.rows[0].affordance,
            RowAffordance::Checkbox { checked: true }
        );
        assert_eq!(
            view.rows[1].affordance,
            RowAffordance::Checkbox { checked: false }
        );
        assert_eq!(view.header_toggle.unwrap().label, "Exit Select");

        let footer = view.footer.unwrap();
        assert_eq!(footer.summary, "2 of 3 selected");
        assert_eq!(footer.bulk_action, BulkAction::SelectAll);
        assert_eq!(footer.delete_label, "Delete (2)");
        assert!(footer.delete_enabled);

        selection.toggle_select("b");
        let footer = build(&threads, &selection, &DeletePhase::Idle).footer.unwrap();
        assert_eq!(footer.bulk_action, BulkAction::DeselectAll);
        assert_eq!(footer.bulk_action.label(), "Deselect");
    }

    #[test]
    fn test_empty_selection_disables_delete() {
        let threads = threads();
        let mut selection = SelectionController::new();
        selection.enter_selection_mode();

        let footer = build(&threads, &selection, &DeletePhase::Idle).footer.unwrap();
        assert!(!footer.delete_enabled);
        assert_eq!(footer.delete_label, "Delete (0)");
    }

    #[test]
    fn test_deleting_marks_everything_busy() {
        let threads = threads();
        let mut selection = SelectionController::new();
        selection.enter_selection_mode();
        selection.toggle_select("a");
        let phase = DeletePhase::Deleting(DeleteTarget::Batch {
            ids: vec!["a".to_string()],
        });

        let view = build(&threads, &selection, &phase);
        let footer = view.footer.unwrap();
        assert!(footer.busy);
        assert!(!footer.delete_enabled);
        assert!(!footer.controls_enabled);
        assert!(!view.header_toggle.unwrap().enabled);

        let dialog = view.dialog.unwrap();
        assert!(dialog.busy);
        assert_eq!(
            dialog.description,
            "Are you sure you want to delete 1 thread? This action cannot be undone."
        );
    }

    #[test]
    fn test_confirm_dialogs() {
        let threads = threads();
        let selection = SelectionController::new();

        let single = build(
            &threads,
            &selection,
            &DeletePhase::ConfirmingSingle("a".to_string()),
        );
        assert_eq!(single.dialog.unwrap().title, "Delete Thread");

        let batch = build(
            &threads,
            &selection,
            &DeletePhase::ConfirmingBatch(vec!["a".to_string(), "b".to_string()]),
        )
        .dialog
        .unwrap();
        assert_eq!(batch.title, "Delete Threads");
        assert!(batch.description.contains("delete 2 threads?"));
    }

    #[test]
    fn test_empty_list_hides_header_toggle() {
        let view = build(&[], &SelectionController::new(), &DeletePhase::Idle);
        assert!(view.rows.is_empty());
        assert!(view.header_toggle.is_none());
    }

    #[test]
    fn test_loading_shows_placeholders() {
        let threads = threads();
        let view = ThreadListView::build(ViewInputs {
            threads: &threads,
            selection: &SelectionController::new(),
            phase: &DeletePhase::Idle,
            open_thread: None,
            loading: true,
            width: 300,
            preview_max_chars: 100,
        });
        assert!(view.loading);
        assert!(view.rows.is_empty());
        assert_eq!(view.placeholder_rows, 30);
    }

    #[test]
    fn test_serializes_for_json_renderers() {
        let threads = threads();
        let mut selection = SelectionController::new();
        selection.enter_selection_mode();
        selection.toggle_select("b");

        let view = build(&threads, &selection, &DeletePhase::Idle);
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["title"], "Thread History");
        assert_eq!(json["rows"][1]["affordance"]["kind"], "checkbox");
        assert_eq!(json["rows"][1]["affordance"]["checked"], true);
        assert_eq!(json["footer"]["bulkAction"], "select_all");
        assert_eq!(json["headerToggle"]["label"], "Exit Select");
        assert!(json["dialog"].is_null());
    }

    #[test]
    fn test_truncate_preview() {
        assert_eq!(truncate_preview("short", 10), "short");
        assert_eq!(truncate_preview("exactly ten", 11), "exactly ten");
        assert_eq!(truncate_preview("hello world", 6), "hello…");
        // Grapheme clusters are never split
        assert_eq!(truncate_preview("ééé", 2), "éé…");
        assert_eq!(truncate_preview("👩‍👩‍👧 family", 1), "👩‍👩‍👧…");
    }
}
