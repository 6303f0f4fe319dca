//! Channel-backed implementations of the panel's collaborators

use super::{KeyValueStore, Notifier, OpenThreadRef};
use crate::error::Result;
use crate::types::{Notice, PointerEvent};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, watch};
use tracing::{debug, warn};

const POINTER_CHANNEL_CAPACITY: usize = 256;

// ============================================================================
// Pointer bus
// ============================================================================

/// Host-wide pointer event bus (the document-level listeners)
#[derive(Debug, Clone)]
pub struct PointerEvents {
    tx: broadcast::Sender<PointerEvent>,
}

impl PointerEvents {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(POINTER_CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Deliver an event to every live subscription
    pub fn dispatch(&self, event: PointerEvent) {
        // No subscribers just means nothing is mounted
        let _ = self.tx.send(event);
    }

    /// Acquire a subscription; it is released when dropped
    pub fn subscribe(&self) -> PointerSubscription {
        debug!("Pointer subscription acquired");
        PointerSubscription {
            rx: self.tx.subscribe(),
        }
    }

    /// Number of live subscriptions
    pub fn listener_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for PointerEvents {
    fn default() -> Self {
        Self::new()
    }
}

/// Scoped registration on a [`PointerEvents`] bus
#[derive(Debug)]
pub struct PointerSubscription {
    rx: broadcast::Receiver<PointerEvent>,
}

impl PointerSubscription {
    /// Take every event delivered since the last drain
    pub fn drain(&mut self) -> Vec<PointerEvent> {
        let mut events = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(event) => events.push(event),
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    // Older moves are superseded by newer ones
                    warn!("Pointer subscription lagged by {} events", skipped);
                }
                Err(_) => break,
            }
        }
        events
    }
}

impl Drop for PointerSubscription {
    fn drop(&mut self) {
        debug!("Pointer subscription released");
    }
}

// ============================================================================
// Viewport
// ============================================================================

/// Reactive "is wide layout active" flag
pub type ViewportSignal = watch::Receiver<bool>;

/// Publishes whether the window is wide enough for the persistent sidebar
#[derive(Debug)]
pub struct Viewport {
    tx: watch::Sender<bool>,
    wide_min_width: u32,
}

impl Viewport {
    pub fn new(wide_min_width: u32, window_width: u32) -> Self {
        let (tx, _) = watch::channel(window_width >= wide_min_width);
        Self { tx, wide_min_width }
    }

    /// Recompute the flag for a new window width
    pub fn set_window_width(&self, window_width: u32) {
        let wide = window_width >= self.wide_min_width;
        self.tx.send_if_modified(|current| {
            if *current == wide {
                return false;
            }
            debug!("Viewport wide layout: {}", wide);
            *current = wide;
            true
        });
    }

    pub fn is_wide(&self) -> bool {
        *self.tx.borrow()
    }

    pub fn signal(&self) -> ViewportSignal {
        self.tx.subscribe()
    }
}

/// A signal that never changes
pub fn fixed_viewport(wide: bool) -> ViewportSignal {
    let (_tx, rx) = watch::channel(wide);
    rx
}

// ============================================================================
// Notifier
// ============================================================================

/// Forwards notices over an unbounded channel
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notice>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notice: Notice) {
        if self.tx.send(notice).is_err() {
            debug!("Notice dropped: receiver closed");
        }
    }
}

// ============================================================================
// Open thread slot
// ============================================================================

/// Shared slot holding the id of the thread shown in the main view
#[derive(Debug, Clone, Default)]
pub struct OpenThreadSlot {
    inner: Arc<RwLock<Option<String>>>,
}

impl OpenThreadSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_open(id: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(id.into()))),
        }
    }
}

impl OpenThreadRef for OpenThreadSlot {
    fn current(&self) -> Option<String> {
        self.inner.read().clone()
    }

    fn set(&self, id: Option<String>) {
        *self.inner.write() = id;
    }
}

// ============================================================================
// In-memory settings
// ============================================================================

/// Key-value settings that live only as long as the process
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let settings = Self::new();
        settings.values.lock().insert(key.into(), value.into());
        settings
    }
}

impl KeyValueStore for MemorySettings {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_released_on_drop() {
        let bus = PointerEvents::new();
        assert_eq!(bus.listener_count(), 0);

        let sub = bus.subscribe();
        assert_eq!(bus.listener_count(), 1);

        drop(sub);
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn test_drain_returns_events_in_order() {
        let bus = PointerEvents::new();
        let mut sub = bus.subscribe();

        bus.dispatch(PointerEvent::Move { x: 250.0 });
        bus.dispatch(PointerEvent::Up);

        assert_eq!(
            sub.drain(),
            vec![PointerEvent::Move { x: 250.0 }, PointerEvent::Up]
        );
        assert!(sub.drain().is_empty());
    }

    #[test]
    fn test_viewport_breakpoint() {
        let viewport = Viewport::new(1024, 800);
        let signal = viewport.signal();
        assert!(!*signal.borrow());

        viewport.set_window_width(1024);
        assert!(viewport.is_wide());
        assert!(*signal.borrow());

        viewport.set_window_width(1023);
        assert!(!*signal.borrow());
    }

    #[test]
    fn test_fixed_viewport_keeps_value() {
        assert!(*fixed_viewport(true).borrow());
        assert!(!*fixed_viewport(false).borrow());
    }

    #[test]
    fn test_open_thread_slot_shared() {
        let slot = OpenThreadSlot::with_open("t-1");
        let other = slot.clone();
        assert!(other.is_open("t-1"));

        slot.set(None);
        assert_eq!(other.current(), None);
    }

    #[tokio::test]
    async fn test_channel_notifier_forwards() {
        let (notifier, mut rx) = ChannelNotifier::new();
        notifier.notify(Notice::success("Deleted 2 threads"));
        assert_eq!(rx.recv().await, Some(Notice::success("Deleted 2 threads")));
    }

    #[test]
    fn test_memory_settings_roundtrip() {
        let settings = MemorySettings::with_value("k", "1");
        assert_eq!(settings.get("k").unwrap().as_deref(), Some("1"));
        settings.set("k", "2").unwrap();
        assert_eq!(settings.get("k").unwrap().as_deref(), Some("2"));
        assert_eq!(settings.get("missing").unwrap(), None);
    }
}
