//! Collaborator contracts consumed by the panel
//!
//! - `ThreadStore` - lists and deletes threads (async, may fail)
//! - `KeyValueStore` - opaque string settings, used for the panel width
//! - `OpenThreadRef` - slot holding the thread shown in the main view
//! - `Notifier` - transient user-facing notices
//! - `UiAffordance` - host-wide cursor/selection styling during a drag

use crate::error::Result;
use crate::types::{Notice, ThreadSummary};
use async_trait::async_trait;
use std::sync::Arc;

/// Backing store for threads
#[async_trait]
pub trait ThreadStore: Send + Sync {
    /// List threads in display order
    async fn list_threads(&self) -> Result<Vec<ThreadSummary>>;

    /// Delete a single thread
    async fn delete_thread(&self, id: &str) -> Result<()>;
}

/// Opaque string key-value settings
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Externally owned slot naming the currently open thread
pub trait OpenThreadRef: Send + Sync {
    fn current(&self) -> Option<String>;

    fn set(&self, id: Option<String>);

    fn is_open(&self, id: &str) -> bool {
        self.current().as_deref() == Some(id)
    }
}

/// Receives transient notices (toasts)
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Host-wide visual affordance switched on for the duration of a drag
pub trait UiAffordance: Send + Sync {
    /// Adopt the resize cursor and suppress text selection
    fn enter_resize(&self);

    /// Restore the default cursor and text selection
    fn exit_resize(&self);
}

/// Callback told about every adopted panel width
pub type WidthObserver = Arc<dyn Fn(u32) + Send + Sync>;

/// Affordance for hosts without a global cursor
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAffordance;

impl UiAffordance for NoopAffordance {
    fn enter_resize(&self) {}

    fn exit_resize(&self) {}
}
