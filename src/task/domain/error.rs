//! Error types for task domain validation and parsing.

use super::SubtaskId;
use thiserror::Error;

/// Errors returned while building or editing task trees.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// A task or subtask title is empty after trimming.
    #[error("title must not be empty")]
    EmptyTitle,

    /// Inserting the node would push the tree past its maximum depth.
    #[error(
        "cannot nest under subtask {parent}: depth {depth} exceeds the maximum of {max}",
        max = super::tree::MAX_DEPTH
    )]
    NestingTooDeep {
        /// Parent the node was to be attached to.
        parent: SubtaskId,
        /// Deepest depth the insertion would have produced.
        depth: usize,
    },

    /// A node already owns children deeper than a root-level subtask allows.
    #[error("subtask {0} is nested deeper than the maximum tree depth")]
    TreeTooDeep(SubtaskId),
}

/// Error returned while parsing task statuses from the task store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from the task store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);
