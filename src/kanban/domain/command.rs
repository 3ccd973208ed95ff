//! Optimistic status change as an explicit command.
//!
//! The command mutates the local task list first, then asks the task store
//! to persist the change. A failed commit is undone by restoring the whole
//! list from a [`Snapshot`], never by reversing individual writes.

use crate::task::{
    domain::{Task, TaskId, TaskStatus},
    ports::{TaskStore, TaskStoreResult},
};

/// Copy of an entire task list taken before an optimistic change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot(Vec<Task>);

impl Snapshot {
    /// Captures `tasks`.
    #[must_use]
    pub fn capture(tasks: &[Task]) -> Self {
        Self(tasks.to_vec())
    }

    /// Returns the captured tasks.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.0
    }

    /// Replaces `tasks` with the captured list.
    pub fn restore(self, tasks: &mut Vec<Task>) {
        *tasks = self.0;
    }
}

/// Moves one task to a new status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    task_id: TaskId,
    target: TaskStatus,
}

impl StatusChange {
    /// Creates a command moving `task_id` to `target`.
    #[must_use]
    pub const fn new(task_id: TaskId, target: TaskStatus) -> Self {
        Self { task_id, target }
    }

    /// Returns the task the command applies to.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the status the command sets.
    #[must_use]
    pub const fn target(&self) -> TaskStatus {
        self.target
    }

    /// Captures a snapshot, then applies the change locally.
    pub fn apply(&self, tasks: &mut [Task]) -> Snapshot {
        let snapshot = Snapshot::capture(tasks);
        self.apply_in_place(tasks);
        snapshot
    }

    /// Applies the change locally without capturing a snapshot.
    ///
    /// Returns `true` when the task exists and its status changed; applying
    /// the same change twice is a no-op the second time.
    pub fn apply_in_place(&self, tasks: &mut [Task]) -> bool {
        match tasks.iter_mut().find(|task| task.id() == &self.task_id) {
            Some(task) if task.status() != self.target => {
                task.set_status(self.target);
                true
            }
            _ => false,
        }
    }

    /// Persists the change through `store`.
    ///
    /// # Errors
    ///
    /// Propagates the store's error unchanged; the caller decides whether to
    /// roll back.
    pub async fn commit<S>(&self, store: &S) -> TaskStoreResult<()>
    where
        S: TaskStore + ?Sized,
    {
        store.update_task_status(&self.task_id, self.target).await
    }

    /// Restores `tasks` to `snapshot`.
    pub fn rollback(tasks: &mut Vec<Task>, snapshot: Snapshot) {
        snapshot.restore(tasks);
    }
}
