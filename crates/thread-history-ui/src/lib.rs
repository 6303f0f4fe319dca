//! Thread History UI Library
//!
//! Interaction state and headless views for the thread history panel.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │ PanelController                                                 │
//! ├──────────────────────┬──────────────────────┬───────────────────┤
//! │ SelectionController  │ DeleteWorkflow       │ ResizeController  │
//! │  Browsing/Selecting  │  Idle → Confirming*  │  width, drag      │
//! │  selected ids        │   → Deleting → Idle  │  DragGuard        │
//! ├──────────────────────┴──────────────────────┴───────────────────┤
//! │ ResponsiveView: Sidebar (wide) | Overlay (narrow)               │
//! ├─────────────────────────────────────────────────────────────────┤
//! │ ThreadListView ──► ThreadListRenderer (once per visible surface)│
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod layout;
pub mod state;
pub mod views;

// Re-exports
pub use state::{
    DeletePhase, DeleteWorkflow, PanelContext, PanelController, Presentation, ResizeController,
    ResponsiveView, SelectionController, Surface,
};
pub use views::{TextRenderer, ThreadListRenderer, ThreadListView};
