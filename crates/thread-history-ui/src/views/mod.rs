//! Renderable views of the panel
//!
//! The list view model is headless; `text` draws it for terminals.

pub mod text;
mod thread_list;

pub use text::TextRenderer;
pub use thread_list::*;
