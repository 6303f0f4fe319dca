//! Drag-to-resize state for the panel

use std::sync::Arc;
use thread_history_core::{KeyValueStore, PanelConfig, PointerEvent, UiAffordance, WidthObserver};
use tracing::{debug, info, warn};

/// Holds the host's resize affordance for the lifetime of a drag.
///
/// Dropping the guard restores the affordance, so every way a drag can end
/// (pointer up, controller teardown, unwinding) reverts it exactly once.
struct DragGuard {
    affordance: Arc<dyn UiAffordance>,
}

impl DragGuard {
    fn acquire(affordance: Arc<dyn UiAffordance>) -> Self {
        affordance.enter_resize();
        Self { affordance }
    }
}

impl Drop for DragGuard {
    fn drop(&mut self) {
        self.affordance.exit_resize();
    }
}

/// Owns the panel width and the drag state.
pub struct ResizeController {
    config: PanelConfig,
    width: u32,
    drag: Option<DragGuard>,
    settings: Arc<dyn KeyValueStore>,
    affordance: Arc<dyn UiAffordance>,
    observer: Option<WidthObserver>,
}

impl ResizeController {
    /// Mount the controller, adopting the persisted width if there is one.
    ///
    /// A persisted value is taken as is, without clamping. The observer is
    /// told the adopted width once, whatever its source.
    pub fn mount(
        config: &PanelConfig,
        settings: Arc<dyn KeyValueStore>,
        affordance: Arc<dyn UiAffordance>,
        observer: Option<WidthObserver>,
    ) -> Self {
        let width = match settings.get(&config.width_key) {
            Ok(Some(saved)) => match parse_leading_int(&saved).map(u32::try_from) {
                Some(Ok(width)) => {
                    info!("Adopted persisted panel width {}", width);
                    width
                }
                _ => {
                    debug!("Persisted panel width {:?} is not a usable integer", saved);
                    config.default_width
                }
            },
            Ok(None) => config.default_width,
            Err(e) => {
                warn!("Failed to read persisted panel width: {}", e);
                config.default_width
            }
        };

        let controller = Self {
            config: config.clone(),
            width,
            drag: None,
            settings,
            affordance,
            observer,
        };
        controller.report_width();
        controller
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn begin_drag(&mut self) {
        if self.drag.is_some() {
            return;
        }
        debug!("Panel resize started at {}", self.width);
        self.drag = Some(DragGuard::acquire(Arc::clone(&self.affordance)));
    }

    /// Track the pointer during a drag. Returns the new width, or `None`
    /// when no drag is active.
    pub fn on_pointer_move(&mut self, x: f32) -> Option<u32> {
        if self.drag.is_none() {
            return None;
        }

        let clamped = self.config.clamp_width(x);
        let changed = clamped != self.width;
        self.width = clamped;

        // Written on every move so an interrupted drag keeps its last width
        if let Err(e) = self.settings.set(&self.config.width_key, &clamped.to_string()) {
            warn!("Failed to persist panel width {}: {}", clamped, e);
        }

        if changed {
            self.report_width();
        }
        Some(clamped)
    }

    pub fn end_drag(&mut self) {
        if self.drag.take().is_some() {
            info!("Panel resized to {}", self.width);
        }
    }

    /// Route a global pointer event
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Move { x } => {
                self.on_pointer_move(x);
            }
            PointerEvent::Up => self.end_drag(),
        }
    }

    fn report_width(&self) {
        if let Some(observer) = &self.observer {
            observer(self.width);
        }
    }
}

/// Integer prefix of `text`: leading whitespace, an optional sign, then
/// digits. Anything after the digits is ignored, so `"450px"` reads as 450.
fn parse_leading_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    let value: i64 = rest[..digits].parse().ok()?;
    Some(if negative { -value } else { value })
}

impl std::fmt::Debug for ResizeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResizeController")
            .field("width", &self.width)
            .field("dragging", &self.is_dragging())
            .field("min_width", &self.config.min_width)
            .field("max_width", &self.config.max_width)
            .finish()
    }
}
