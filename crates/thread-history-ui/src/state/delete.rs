//! Confirmation and execution of single and batch deletes

use super::SelectionController;
use std::sync::Arc;
use thread_history_core::{
    DeleteReport, DeleteTarget, Notice, Notifier, OpenThreadRef, ThreadStore, WorkflowError,
};
use tracing::{error, info, warn};

/// Where the delete workflow currently is
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DeletePhase {
    #[default]
    Idle,
    ConfirmingSingle(String),
    /// Ids captured from the selection, in selection order
    ConfirmingBatch(Vec<String>),
    Deleting(DeleteTarget),
}

impl DeletePhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_confirming(&self) -> bool {
        matches!(self, Self::ConfirmingSingle(_) | Self::ConfirmingBatch(_))
    }

    pub fn is_deleting(&self) -> bool {
        matches!(self, Self::Deleting(_))
    }
}

/// Orchestrates confirmation and sequential execution of deletes.
pub struct DeleteWorkflow {
    phase: DeletePhase,
    store: Arc<dyn ThreadStore>,
    open_thread: Arc<dyn OpenThreadRef>,
    notifier: Arc<dyn Notifier>,
}

impl DeleteWorkflow {
    pub fn new(
        store: Arc<dyn ThreadStore>,
        open_thread: Arc<dyn OpenThreadRef>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            phase: DeletePhase::Idle,
            store,
            open_thread,
            notifier,
        }
    }

    pub fn phase(&self) -> &DeletePhase {
        &self.phase
    }

    /// Ask to delete one thread from browsing mode
    pub fn request_single_delete(
        &mut self,
        id: &str,
        selection: &SelectionController,
    ) -> Result<(), WorkflowError> {
        if self.phase.is_deleting() {
            return Err(WorkflowError::DeleteInProgress);
        }
        if selection.is_selecting() {
            return Err(WorkflowError::NotBrowsing);
        }

        self.phase = DeletePhase::ConfirmingSingle(id.to_string());
        Ok(())
    }

    /// Ask to delete everything currently selected
    pub fn request_batch_delete(
        &mut self,
        selection: &SelectionController,
    ) -> Result<(), WorkflowError> {
        if self.phase.is_deleting() {
            return Err(WorkflowError::DeleteInProgress);
        }
        if !selection.is_selecting() {
            return Err(WorkflowError::NotSelecting);
        }
        if selection.is_empty() {
            return Err(WorkflowError::EmptySelection);
        }

        self.phase = DeletePhase::ConfirmingBatch(selection.selected_ids().to_vec());
        Ok(())
    }

    /// Discard a pending confirmation
    pub fn cancel(&mut self) -> Result<(), WorkflowError> {
        match self.phase {
            DeletePhase::ConfirmingSingle(_) | DeletePhase::ConfirmingBatch(_) => {
                self.phase = DeletePhase::Idle;
                Ok(())
            }
            DeletePhase::Deleting(_) => Err(WorkflowError::DeleteInProgress),
            DeletePhase::Idle => Err(WorkflowError::NoPendingRequest),
        }
    }

    /// Move a pending confirmation into `Deleting` and hand back its target
    pub fn begin(&mut self) -> Result<DeleteTarget, WorkflowError> {
        let target = match std::mem::take(&mut self.phase) {
            DeletePhase::ConfirmingSingle(id) => DeleteTarget::Single { id },
            DeletePhase::ConfirmingBatch(ids) => DeleteTarget::Batch { ids },
            phase @ DeletePhase::Deleting(_) => {
                self.phase = phase;
                return Err(WorkflowError::DeleteInProgress);
            }
            DeletePhase::Idle => return Err(WorkflowError::NoPendingRequest),
        };

        info!(
            "Deleting {} thread{}",
            target.len(),
            thread_history_core::plural(target.len())
        );
        self.phase = DeletePhase::Deleting(target.clone());
        Ok(target)
    }

    /// Confirm the pending request and run it to completion.
    ///
    /// Ids are deleted one at a time in captured order; a failure does not
    /// stop the remaining calls. A batch always ends with the selection
    /// cleared and selection mode exited.
    pub async fn confirm(
        &mut self,
        selection: &mut SelectionController,
    ) -> Result<DeleteReport, WorkflowError> {
        let target = self.begin()?;
        let report = self.execute(&target).await;
        self.finish(&report, selection);
        Ok(report)
    }

    async fn execute(&self, target: &DeleteTarget) -> DeleteReport {
        let mut report = DeleteReport {
            requested: target.len(),
            deleted: Vec::with_capacity(target.len()),
            failed: Vec::new(),
            batch: target.is_batch(),
        };

        for id in target.ids() {
            match self.store.delete_thread(id).await {
                Ok(()) => report.deleted.push(id.to_string()),
                Err(e) => {
                    error!("Failed to delete thread {}: {}", id, e);
                    report.failed.push(id.to_string());
                }
            }
        }

        report
    }

    fn finish(&mut self, report: &DeleteReport, selection: &mut SelectionController) {
        if let Some(open) = self.open_thread.current() {
            if report.deleted.iter().any(|id| *id == open) {
                info!("Closing deleted thread {}", open);
                self.open_thread.set(None);
            }
        }

        if report.batch {
            if !report.is_complete() {
                warn!(
                    "Batch delete finished with {} of {} deleted",
                    report.succeeded(),
                    report.requested
                );
            }
            selection.exit_selection_mode();
            self.notifier.notify(Notice::from(report));
        } else if !report.is_complete() {
            self.notifier.notify(Notice::from(report));
        }

        self.phase = DeletePhase::Idle;
    }
}

impl std::fmt::Debug for DeleteWorkflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeleteWorkflow")
            .field("phase", &self.phase)
            .finish()
    }
}
