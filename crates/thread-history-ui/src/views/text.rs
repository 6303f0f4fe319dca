//! Plain-text rendering of the thread list

use super::{RowAffordance, ThreadListRenderer, ThreadListView};
use crate::state::Surface;
use std::fmt::Write;

/// Accumulates a terminal rendering of every surface it is asked to draw
#[derive(Debug, Default)]
pub struct TextRenderer {
    out: String,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn into_string(self) -> String {
        self.out
    }
}

impl ThreadListRenderer for TextRenderer {
    fn render_list(&mut self, surface: Surface, view: &ThreadListView) {
        let surface = match surface {
            Surface::Sidebar => "sidebar",
            Surface::Overlay => "overlay",
        };
        // Writing into a String cannot fail
        let _ = write_view(&mut self.out, surface, view);
    }
}

fn write_view(out: &mut String, surface: &str, view: &ThreadListView) -> std::fmt::Result {
    write!(out, "{} ({}, {}px)", view.title, surface, view.width)?;
    if let Some(toggle) = &view.header_toggle {
        write!(out, "  [{}]", toggle.label)?;
    }
    writeln!(out)?;

    if view.loading {
        writeln!(out, "  loading ({} placeholder rows)", view.placeholder_rows)?;
    } else if view.rows.is_empty() {
        writeln!(out, "  no threads")?;
    }

    for row in &view.rows {
        let marker = match row.affordance {
            RowAffordance::Checkbox { checked: true } => "[x]",
            RowAffordance::Checkbox { checked: false } => "[ ]",
            RowAffordance::DeleteOnHover if row.open => " > ",
            RowAffordance::DeleteOnHover => "   ",
        };
        writeln!(out, "{} {}  {}", marker, row.id, row.preview)?;
    }

    if let Some(footer) = &view.footer {
        writeln!(
            out,
            "  {}  [{}]  [{}]{}",
            footer.summary,
            footer.bulk_action.label(),
            footer.delete_label,
            if footer.busy { "  deleting..." } else { "" }
        )?;
    }

    if let Some(dialog) = &view.dialog {
        writeln!(out, "  {}: {}", dialog.title, dialog.description)?;
    }

    Ok(())
}
