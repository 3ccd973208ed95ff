//! In-memory task store for tests and local use.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Subtask, Task, TaskId, TaskStatus},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};

/// Thread-safe in-memory task store.
///
/// Keeps tasks in insertion order. Writes can be switched to fail with
/// [`TaskStoreError::Rejected`] to exercise rollback paths.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: Vec<Task>,
    reject_writes: bool,
}

impl InMemoryTaskStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with `tasks`.
    #[must_use]
    pub fn with_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let store = Self::new();
        if let Ok(mut state) = store.state.write() {
            state.tasks = tasks.into_iter().collect();
        }
        store
    }

    /// Makes every subsequent write fail (or succeed again).
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] if the lock is poisoned.
    pub fn set_reject_writes(&self, reject: bool) -> TaskStoreResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.reject_writes = reject;
        Ok(())
    }

    /// Inserts a task or replaces the task with the same id.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] if the lock is poisoned.
    pub fn upsert(&self, task: Task) -> TaskStoreResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        match state.tasks.iter_mut().find(|existing| existing.id() == task.id()) {
            Some(existing) => *existing = task,
            None => state.tasks.push(task),
        }
        Ok(())
    }

    /// Removes a task; returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] if the lock is poisoned.
    pub fn remove(&self, task_id: &TaskId) -> TaskStoreResult<bool> {
        let mut state = self.state.write().map_err(poisoned)?;
        let before = state.tasks.len();
        state.tasks.retain(|task| task.id() != task_id);
        Ok(state.tasks.len() != before)
    }

    /// Applies `edit` to the stored task with `task_id`.
    fn modify(&self, task_id: &TaskId, edit: impl FnOnce(&mut Task)) -> TaskStoreResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.reject_writes {
            return Err(TaskStoreError::Rejected(task_id.clone()));
        }
        let task = state
            .tasks
            .iter_mut()
            .find(|task| task.id() == task_id)
            .ok_or_else(|| TaskStoreError::NotFound(task_id.clone()))?;
        edit(task);
        Ok(())
    }
}

fn poisoned<T>(err: std::sync::PoisonError<T>) -> TaskStoreError {
    TaskStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn fetch_tasks(&self) -> TaskStoreResult<Vec<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.tasks.clone())
    }

    async fn update_task_status(
        &self,
        task_id: &TaskId,
        status: TaskStatus,
    ) -> TaskStoreResult<()> {
        self.modify(task_id, |task| task.set_status(status))
    }

    async fn persist_subtask_tree(
        &self,
        task_id: &TaskId,
        subtasks: &[Subtask],
    ) -> TaskStoreResult<()> {
        self.modify(task_id, |task| task.set_subtasks(subtasks.to_vec()))
    }
}
