//! Task store port: the external CRUD collaborator holding canonical tasks.

use crate::task::domain::{Subtask, Task, TaskId, TaskStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Task persistence contract.
///
/// The store owns the canonical task list. The engine never writes to it
/// except through these calls, and never retries a failed call itself.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Returns the canonical task snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when the store cannot be read.
    async fn fetch_tasks(&self) -> TaskStoreResult<Vec<Task>>;

    /// Persists a new status for a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist or
    /// [`TaskStoreError::Persistence`] when the write fails.
    async fn update_task_status(&self, task_id: &TaskId, status: TaskStatus)
    -> TaskStoreResult<()>;

    /// Replaces a task's subtask tree.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist or
    /// [`TaskStoreError::Persistence`] when the write fails.
    async fn persist_subtask_tree(
        &self,
        task_id: &TaskId,
        subtasks: &[Subtask],
    ) -> TaskStoreResult<()>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The store refused the write.
    #[error("task store rejected the update for {0}")]
    Rejected(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
