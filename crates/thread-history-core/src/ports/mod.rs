//! Collaborator ports for the thread history panel
//!
//! The panel owns no I/O. Everything it reads or writes outside its own
//! state goes through the traits in this module.

mod channels;
mod traits;

pub use channels::*;
pub use traits::*;
