//! Interaction state for the thread history panel
//!
//! Each controller owns one concern; `PanelController` composes them.

mod delete;
mod panel;
mod resize;
mod responsive;
mod selection;

pub use delete::*;
pub use panel::*;
pub use resize::*;
pub use responsive::*;
pub use selection::*;
