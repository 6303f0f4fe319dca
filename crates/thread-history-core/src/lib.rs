//! Thread History Core Library
//!
//! This crate provides the building blocks for the thread history panel:
//! - Thread records, list summaries and preview derivation
//! - Collaborator ports (thread store, settings, open-thread slot, notices)
//! - Panel configuration
//! - SQLite-based persistence implementing the store and settings ports
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   thread-history-core                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ports/        - Collaborator traits and channel impls      │
//! │  storage/      - SQLite database, queries, store impls      │
//! │  types/        - Threads, summaries, delete reports         │
//! │  config.rs     - Panel configuration                        │
//! │  error.rs      - Error types                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod ports;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use config::{default_data_dir, PanelConfig, PANEL_CONFIG_KEY, PANEL_WIDTH_KEY};
pub use error::{Error, Result, SettingsError, StoreError, WorkflowError};
pub use types::*;

pub use ports::{
    fixed_viewport, ChannelNotifier, KeyValueStore, MemorySettings, NoopAffordance, Notifier,
    OpenThreadRef, OpenThreadSlot, PointerEvents, PointerSubscription, ThreadStore, UiAffordance,
    Viewport, ViewportSignal, WidthObserver,
};

pub use storage::{SqliteSettings, SqliteThreadStore, Storage};
