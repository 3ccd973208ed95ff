//! Drag-and-drop state machine with optimistic updates.

use crate::{
    kanban::domain::{
        Column, ColumnGroups, DragSession, DragState, DropOutcome, Snapshot, StatusChange,
    },
    task::{
        domain::{Task, TaskId, TaskStatus},
        ports::{TaskStore, TaskStoreError},
    },
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, warn};

/// Service-level errors for board operations.
#[derive(Debug, Error)]
pub enum KanbanError {
    /// Another drag or commit has not settled yet.
    #[error("a drag of task {0} is still in progress")]
    DragInProgress(TaskId),

    /// The task store rejected the new status; the board was rolled back.
    #[error("failed to move task {task_id} to {target}; changes were rolled back")]
    Commit {
        /// Task whose status change failed.
        task_id: TaskId,
        /// Status that could not be persisted.
        target: TaskStatus,
        /// Underlying store failure.
        #[source]
        source: TaskStoreError,
    },
}

/// Result type for board operations.
pub type KanbanResult<T> = Result<T, KanbanError>;

/// A board over a local copy of the task list.
///
/// Only one drag is tracked at a time. Status changes are applied locally
/// before the task store confirms them; when the store fails, the whole
/// list is restored from the snapshot taken when the drag started.
pub struct KanbanBoard<S>
where
    S: TaskStore,
{
    store: Arc<S>,
    tasks: Vec<Task>,
    state: DragState,
    snapshot: Option<Snapshot>,
}

impl<S> KanbanBoard<S>
where
    S: TaskStore,
{
    /// Creates a board over `tasks`.
    #[must_use]
    pub const fn new(store: Arc<S>, tasks: Vec<Task>) -> Self {
        Self {
            store,
            tasks,
            state: DragState::Idle,
            snapshot: None,
        }
    }

    /// Returns the local task list, including speculative changes.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the local copy of one task.
    #[must_use]
    pub fn task(&self, task_id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == task_id)
    }

    /// Returns the current drag state.
    #[must_use]
    pub const fn state(&self) -> &DragState {
        &self.state
    }

    /// Returns the active drag session, if any.
    #[must_use]
    pub fn session(&self) -> Option<DragSession> {
        self.state.session()
    }

    /// Groups `tasks` (typically [`Self::tasks`] in display order) by column.
    #[must_use]
    pub fn columns<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> ColumnGroups<'a> {
        ColumnGroups::build(tasks)
    }

    /// Replaces the local list with a fresh snapshot from the store.
    ///
    /// # Errors
    ///
    /// Returns [`KanbanError::DragInProgress`] while a drag is active, since
    /// a refresh would invalidate its rollback snapshot.
    pub fn replace_tasks(&mut self, tasks: Vec<Task>) -> KanbanResult<()> {
        self.ensure_idle()?;
        self.tasks = tasks;
        Ok(())
    }

    pub(crate) fn task_mut(&mut self, task_id: &TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id() == task_id)
    }

    /// Picks up `task_id`, capturing its status and the whole list.
    ///
    /// Returns `Ok(false)` without starting a drag when the task is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`KanbanError::DragInProgress`] when a drag is already active.
    pub fn drag_start(&mut self, task_id: &TaskId) -> KanbanResult<bool> {
        self.ensure_idle()?;
        let Some(origin_status) = self.task(task_id).map(Task::status) else {
            return Ok(false);
        };
        self.snapshot = Some(Snapshot::capture(&self.tasks));
        self.transition(DragState::Dragging {
            task_id: task_id.clone(),
            origin_status,
        });
        Ok(true)
    }

    /// Moves the dragged card over `column`.
    ///
    /// When the column's status differs from the task's current status the
    /// task is updated locally so the card shows in the hovered column.
    /// Repeating the same hover changes nothing. Returns `true` when the
    /// local list changed; without an active drag this is a no-op.
    pub fn drag_over(&mut self, column: Column) -> bool {
        let (task_id, origin_status) = match &self.state {
            DragState::Dragging {
                task_id,
                origin_status,
            }
            | DragState::HoveringColumn {
                task_id,
                origin_status,
                ..
            } => (task_id.clone(), *origin_status),
            _ => return false,
        };
        let change = StatusChange::new(task_id.clone(), column.status());
        let changed = change.apply_in_place(&mut self.tasks);
        let next = DragState::HoveringColumn {
            task_id,
            origin_status,
            candidate: column,
        };
        if self.state != next {
            self.transition(next);
        }
        changed
    }

    /// Abandons the active drag and restores the pre-drag list.
    ///
    /// A board left in [`DragState::Committing`] is rolled back as well.
    /// Returns `false` when no drag was active.
    pub fn cancel_drag(&mut self) -> bool {
        let Some(task_id) = self.state.task_id().cloned() else {
            return false;
        };
        self.revert(&task_id);
        true
    }

    /// Drops the dragged card.
    ///
    /// Dropping outside any column, or back onto the column the task
    /// started in, restores the pre-drag list. Dropping onto another column
    /// persists that column's status; if the store fails, the whole list is
    /// restored from the pre-drag snapshot. The same restore happens when
    /// the returned future is dropped before the store answers.
    ///
    /// # Errors
    ///
    /// Returns [`KanbanError::Commit`] when the store rejects the change.
    pub async fn drop_on(&mut self, column: Option<Column>) -> KanbanResult<DropOutcome> {
        let Some(session) = self.state.session() else {
            return Ok(DropOutcome::Ignored);
        };
        let task_id = session.active_task_id.clone();
        let target = match column {
            Some(target) if target != session.origin_column() => target,
            _ => {
                self.revert(&task_id);
                return Ok(DropOutcome::Reverted { task_id });
            }
        };

        let change = StatusChange::new(task_id.clone(), target.status());
        change.apply_in_place(&mut self.tasks);
        self.transition(DragState::Committing {
            task_id: task_id.clone(),
            origin_status: session.origin_status,
            target,
        });

        match self.commit_or_restore(&change).await {
            Ok(()) => {
                self.snapshot = None;
                self.transition(DragState::Idle);
                Ok(DropOutcome::Committed {
                    task_id,
                    status: change.target(),
                })
            }
            Err(source) => {
                error!(
                    task_id = %task_id,
                    origin = %session.origin_status,
                    target = %change.target(),
                    error = %source,
                    "failed to commit task move; rolling back"
                );
                self.transition(DragState::RolledBack {
                    task_id: task_id.clone(),
                });
                self.revert(&task_id);
                Err(KanbanError::Commit {
                    task_id,
                    target: change.target(),
                    source,
                })
            }
        }
    }

    /// Sets a task's status outside of a drag, with the same optimistic
    /// update and rollback as a drop, including when the future is dropped.
    ///
    /// Returns `Ok(false)` when the task is unknown or already has `status`.
    ///
    /// # Errors
    ///
    /// Returns [`KanbanError::DragInProgress`] during a drag and
    /// [`KanbanError::Commit`] when the store rejects the change.
    pub async fn set_status(&mut self, task_id: &TaskId, status: TaskStatus) -> KanbanResult<bool> {
        self.ensure_idle()?;
        if self.task(task_id).is_none_or(|task| task.status() == status) {
            return Ok(false);
        }
        let change = StatusChange::new(task_id.clone(), status);
        self.snapshot = Some(change.apply(&mut self.tasks));
        if let Err(source) = self.commit_or_restore(&change).await {
            error!(task_id = %task_id, target = %status, error = %source, "failed to commit status change; rolling back");
            self.revert(task_id);
            return Err(KanbanError::Commit {
                task_id: task_id.clone(),
                target: status,
                source,
            });
        }
        self.snapshot = None;
        Ok(true)
    }

    /// Persists `change`, restoring the snapshot if the future is dropped
    /// before the store answers.
    async fn commit_or_restore(&mut self, change: &StatusChange) -> Result<(), TaskStoreError> {
        let store = Arc::clone(&self.store);
        let guard = RestoreOnDrop {
            board: self,
            task_id: change.task_id().clone(),
            armed: true,
        };
        let result = change.commit(&*store).await;
        guard.disarm();
        result
    }

    fn ensure_idle(&self) -> KanbanResult<()> {
        match self.state.task_id() {
            Some(active) => Err(KanbanError::DragInProgress(active.clone())),
            None => Ok(()),
        }
    }

    fn revert(&mut self, task_id: &TaskId) {
        if let Some(snapshot) = self.snapshot.take() {
            StatusChange::rollback(&mut self.tasks, snapshot);
        }
        debug!(task_id = %task_id, "board restored from snapshot");
        self.transition(DragState::Idle);
    }

    fn transition(&mut self, next: DragState) {
        debug!(from = ?self.state, to = ?next, "kanban drag transition");
        self.state = next;
    }
}

/// Rolls the board back to its snapshot unless disarmed.
struct RestoreOnDrop<'a, S>
where
    S: TaskStore,
{
    board: &'a mut KanbanBoard<S>,
    task_id: TaskId,
    armed: bool,
}

impl<S> RestoreOnDrop<'_, S>
where
    S: TaskStore,
{
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<S> Drop for RestoreOnDrop<'_, S>
where
    S: TaskStore,
{
    fn drop(&mut self) {
        if self.armed {
            warn!(task_id = %self.task_id, "commit abandoned before the store answered; rolling back");
            self.board.revert(&self.task_id);
        }
    }
}
