//! The thread history panel
//!
//! `PanelController` owns one instance of each interaction controller and
//! routes user intents between them. It holds the loaded thread list and
//! produces the [`ThreadListView`] drawn by the list renderer.

use super::{DeletePhase, DeleteWorkflow, Presentation, ResizeController, ResponsiveView};
use super::{SelectionController, Surface};
use crate::views::{ThreadListRenderer, ThreadListView, ViewInputs};
use std::sync::Arc;
use thread_history_core::{
    DeleteReport, KeyValueStore, Notice, Notifier, OpenThreadRef, PanelConfig, PointerEvents,
    PointerSubscription, SelectionMode, ThreadStore, ThreadSummary, UiAffordance, ViewportSignal,
    WidthObserver, WorkflowError,
};
use tracing::{debug, error, info};

/// Collaborators a panel is mounted against
pub struct PanelContext {
    pub store: Arc<dyn ThreadStore>,
    pub settings: Arc<dyn KeyValueStore>,
    pub open_thread: Arc<dyn OpenThreadRef>,
    pub notifier: Arc<dyn Notifier>,
    pub affordance: Arc<dyn UiAffordance>,
    pub viewport: ViewportSignal,
    pub pointer: PointerEvents,
    pub width_observer: Option<WidthObserver>,
}

pub struct PanelController {
    config: PanelConfig,
    store: Arc<dyn ThreadStore>,
    open_thread: Arc<dyn OpenThreadRef>,
    notifier: Arc<dyn Notifier>,
    threads: Vec<ThreadSummary>,
    loading: bool,
    selection: SelectionController,
    deletes: DeleteWorkflow,
    resize: ResizeController,
    view: ResponsiveView,
    /// Released when the panel is dropped
    pointer: PointerSubscription,
}

impl PanelController {
    /// Mount a panel. The list starts out loading until [`Self::refresh`]
    /// completes.
    pub fn mount(config: PanelConfig, ctx: PanelContext) -> Self {
        let PanelContext {
            store,
            settings,
            open_thread,
            notifier,
            affordance,
            viewport,
            pointer,
            width_observer,
        } = ctx;

        let resize = ResizeController::mount(&config, settings, affordance, width_observer);
        let deletes = DeleteWorkflow::new(
            Arc::clone(&store),
            Arc::clone(&open_thread),
            Arc::clone(&notifier),
        );

        info!("Thread history panel mounted at width {}", resize.width());

        Self {
            config,
            store,
            open_thread,
            notifier,
            threads: Vec::new(),
            loading: true,
            selection: SelectionController::new(),
            deletes,
            resize,
            view: ResponsiveView::new(viewport),
            pointer: pointer.subscribe(),
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn threads(&self) -> &[ThreadSummary] {
        &self.threads
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn selection_mode(&self) -> SelectionMode {
        self.selection.mode()
    }

    pub fn delete_phase(&self) -> &DeletePhase {
        self.deletes.phase()
    }

    pub fn width(&self) -> u32 {
        self.resize.width()
    }

    pub fn is_dragging(&self) -> bool {
        self.resize.is_dragging()
    }

    pub fn presentation(&self) -> Presentation {
        self.view.presentation()
    }

    pub fn is_panel_open(&self) -> bool {
        self.view.is_panel_open()
    }

    // ------------------------------------------------------------------------
    // Thread list
    // ------------------------------------------------------------------------

    /// Reload the thread list from the store
    pub async fn refresh(&mut self) {
        self.loading = true;

        match self.store.list_threads().await {
            Ok(threads) => {
                debug!("Loaded {} threads", threads.len());
                self.threads = threads;
            }
            Err(e) => {
                error!("Failed to load threads: {}", e);
                self.threads.clear();
                self.notifier.notify(Notice::error("Failed to load threads"));
            }
        }

        self.loading = false;
        let known = self.threads.iter().map(|t| t.id.as_str());
        self.selection.retain_known(known);
    }

    /// A row was clicked
    pub fn click_thread(&mut self, id: &str) {
        if self.selection.is_selecting() {
            self.selection.toggle_select(id);
            return;
        }

        self.view.on_thread_chosen();
        if !self.open_thread.is_open(id) {
            debug!("Opening thread {}", id);
            self.open_thread.set(Some(id.to_string()));
        }
    }

    // ------------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------------

    /// Header "Select" / "Exit Select" button
    pub fn toggle_selection_mode(&mut self) {
        if self.threads.is_empty() || self.deletes.phase().is_deleting() {
            return;
        }

        self.discard_pending_delete();
        if self.selection.is_selecting() {
            self.selection.exit_selection_mode();
        } else {
            self.selection.enter_selection_mode();
        }
    }

    pub fn select_all(&mut self) {
        let ids = self.threads.iter().map(|t| t.id.clone());
        self.selection.select_all(ids);
    }

    pub fn deselect_all(&mut self) {
        self.selection.deselect_all();
    }

    /// Footer cancel
    pub fn cancel_selection(&mut self) {
        if self.deletes.phase().is_deleting() {
            return;
        }
        self.discard_pending_delete();
        self.selection.exit_selection_mode();
    }

    /// A confirmation belongs to the mode it was requested in
    fn discard_pending_delete(&mut self) {
        if self.deletes.phase().is_confirming() && self.deletes.cancel().is_ok() {
            debug!("Discarded pending delete on selection mode change");
        }
    }

    // ------------------------------------------------------------------------
    // Deletes
    // ------------------------------------------------------------------------

    pub fn request_delete(&mut self, id: &str) -> Result<(), WorkflowError> {
        self.deletes.request_single_delete(id, &self.selection)
    }

    pub fn request_batch_delete(&mut self) -> Result<(), WorkflowError> {
        self.deletes.request_batch_delete(&self.selection)
    }

    pub fn cancel_delete(&mut self) -> Result<(), WorkflowError> {
        self.deletes.cancel()
    }

    /// Run the pending delete and drop the deleted rows from the list
    pub async fn confirm_delete(&mut self) -> Result<DeleteReport, WorkflowError> {
        let report = self.deletes.confirm(&mut self.selection).await?;
        self.threads
            .retain(|thread| !report.deleted.contains(&thread.id));
        Ok(report)
    }

    // ------------------------------------------------------------------------
    // Resize
    // ------------------------------------------------------------------------

    /// Pointer down on the resize handle
    pub fn begin_resize(&mut self) {
        // Events queued before the drag started still belong to the old state
        self.pump_pointer_events();
        self.resize.begin_drag();
    }

    /// Feed queued global pointer events to the resize controller
    pub fn pump_pointer_events(&mut self) {
        for event in self.pointer.drain() {
            self.resize.handle_pointer(event);
        }
    }

    // ------------------------------------------------------------------------
    // Presentation
    // ------------------------------------------------------------------------

    pub fn toggle_panel(&mut self) {
        self.view.toggle_panel();
    }

    pub fn set_overlay_open(&mut self, open: bool) {
        self.view.set_overlay_open(open);
    }

    pub fn list_view(&self) -> ThreadListView {
        let open = self.open_thread.current();
        ThreadListView::build(ViewInputs {
            threads: &self.threads,
            selection: &self.selection,
            phase: self.deletes.phase(),
            open_thread: open.as_deref(),
            loading: self.loading,
            width: self.resize.width(),
            preview_max_chars: self.config.preview_max_chars,
        })
    }

    /// Draw the list into every visible surface. Returns the surfaces drawn.
    pub fn render(&self, renderer: &mut dyn ThreadListRenderer) -> Vec<Surface> {
        let surfaces = self.view.visible_surfaces();
        if surfaces.is_empty() {
            return surfaces;
        }

        let view = self.list_view();
        for surface in &surfaces {
            renderer.render_list(*surface, &view);
        }
        surfaces
    }
}

impl std::fmt::Debug for PanelController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelController")
            .field("threads", &self.threads.len())
            .field("loading", &self.loading)
            .field("selection", &self.selection)
            .field("deletes", &self.deletes)
            .field("resize", &self.resize)
            .field("view", &self.view)
            .finish()
    }
}
