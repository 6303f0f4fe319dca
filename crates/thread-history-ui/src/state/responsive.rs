//! Sidebar vs overlay presentation

use serde::Serialize;
use thread_history_core::ViewportSignal;

/// Where the thread list is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    Sidebar,
    Overlay,
}

/// How the panel presents itself for the current viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Presentation {
    /// Always visible; `header_open` drives the header toggle only
    Sidebar { header_open: bool },
    /// Dismissible; visible exactly when the panel is open
    Overlay { visible: bool },
}

/// Decides between the persistent sidebar and the dismissible overlay.
#[derive(Debug, Clone)]
pub struct ResponsiveView {
    viewport: ViewportSignal,
    panel_open: bool,
}

impl ResponsiveView {
    pub fn new(viewport: ViewportSignal) -> Self {
        Self {
            viewport,
            panel_open: false,
        }
    }

    pub fn is_wide(&self) -> bool {
        *self.viewport.borrow()
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    pub fn presentation(&self) -> Presentation {
        if self.is_wide() {
            Presentation::Sidebar {
                header_open: self.panel_open,
            }
        } else {
            Presentation::Overlay {
                visible: self.panel_open,
            }
        }
    }

    /// Surfaces the list should be drawn into right now
    pub fn visible_surfaces(&self) -> Vec<Surface> {
        match self.presentation() {
            Presentation::Sidebar { .. } => vec![Surface::Sidebar],
            Presentation::Overlay { visible: true } => vec![Surface::Overlay],
            Presentation::Overlay { visible: false } => Vec::new(),
        }
    }

    /// Header button
    pub fn toggle_panel(&mut self) {
        self.panel_open = !self.panel_open;
    }

    /// Overlay open/close request (backdrop click, escape, swipe).
    /// The overlay does not exist in the wide layout, so it is ignored there.
    pub fn set_overlay_open(&mut self, open: bool) {
        if self.is_wide() {
            return;
        }
        self.panel_open = open;
    }

    /// A thread row was chosen outside selection mode
    pub fn on_thread_chosen(&mut self) {
        if !self.is_wide() {
            self.panel_open = false;
        }
    }
}
