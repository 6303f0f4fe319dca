//! Layout constants for the thread history panel

/// Heading shown above the list
pub const PANEL_TITLE: &str = "Thread History";
/// Skeleton rows drawn while the list loads
pub const PLACEHOLDER_ROWS: usize = 30;
