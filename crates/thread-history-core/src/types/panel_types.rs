//! Value types shared by the panel state machines and their collaborators

use serde::{Deserialize, Serialize};

/// Selection-mode flag of the thread list
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// Rows open threads on click and offer delete-on-hover
    #[default]
    Browsing,
    /// Rows show checkboxes and clicks toggle membership
    Selecting,
}

/// What a delete request targets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeleteTarget {
    Single { id: String },
    /// Ids in the order they will be sent to the store
    Batch { ids: Vec<String> },
}

impl DeleteTarget {
    pub fn ids(&self) -> Vec<&str> {
        match self {
            Self::Single { id } => vec![id.as_str()],
            Self::Batch { ids } => ids.iter().map(String::as_str).collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Single { .. } => 1,
            Self::Batch { ids } => ids.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: &str) -> bool {
        match self {
            Self::Single { id: target } => target == id,
            Self::Batch { ids } => ids.iter().any(|target| target == id),
        }
    }

    pub fn is_batch(&self) -> bool {
        matches!(self, Self::Batch { .. })
    }
}

/// Outcome of running a delete request to completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteReport {
    pub requested: usize,
    pub deleted: Vec<String>,
    pub failed: Vec<String>,
    pub batch: bool,
}

impl DeleteReport {
    pub fn succeeded(&self) -> usize {
        self.deleted.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Transient message describing the outcome
    pub fn message(&self) -> String {
        if !self.batch {
            return if self.is_complete() {
                "Deleted thread".to_string()
            } else {
                "Failed to delete thread".to_string()
            };
        }

        if self.is_complete() {
            format!(
                "Deleted {} thread{}",
                self.requested,
                plural(self.requested)
            )
        } else {
            format!(
                "Deleted {} of {} threads. Some deletions may not have completed.",
                self.succeeded(),
                self.requested
            )
        }
    }
}

/// Severity of a transient notice
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A transient, toast-like notification for the user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

impl From<&DeleteReport> for Notice {
    fn from(report: &DeleteReport) -> Self {
        if report.is_complete() {
            Notice::success(report.message())
        } else {
            Notice::error(report.message())
        }
    }
}

/// Global pointer events delivered by the host while the panel is mounted
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Move { x: f32 },
    Up,
}

/// `"s"` when `count != 1`
pub fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
