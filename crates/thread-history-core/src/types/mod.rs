//! Core type definitions for the thread history panel
//!
//! Thread records and summaries, plus the small value types the panel state
//! machines exchange with their collaborators.

mod panel_types;
mod thread_types;

pub use panel_types::*;
pub use thread_types::*;
