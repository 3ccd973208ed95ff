//! Drag-and-drop session state.

use super::Column;
use crate::task::domain::{TaskId, TaskStatus};

/// State of the board's drag state machine.
///
/// `Committing` lasts while the task store call is in flight; `RolledBack`
/// is passed through on the way back to `Idle` after a failed commit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// A card has been picked up but not moved over a column yet.
    Dragging {
        /// Dragged task.
        task_id: TaskId,
        /// Status the task had when the drag started.
        origin_status: TaskStatus,
    },
    /// A card is over a column.
    HoveringColumn {
        /// Dragged task.
        task_id: TaskId,
        /// Status the task had when the drag started.
        origin_status: TaskStatus,
        /// Column under the pointer.
        candidate: Column,
    },
    /// The drop is being persisted.
    Committing {
        /// Dragged task.
        task_id: TaskId,
        /// Status the task had when the drag started.
        origin_status: TaskStatus,
        /// Column the card was dropped on.
        target: Column,
    },
    /// The commit failed and the list was restored.
    RolledBack {
        /// Dragged task.
        task_id: TaskId,
    },
}

impl DragState {
    /// Returns `true` in the [`DragState::Idle`] state.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns the task being dragged, if any.
    #[must_use]
    pub const fn task_id(&self) -> Option<&TaskId> {
        match self {
            Self::Idle => None,
            Self::Dragging { task_id, .. }
            | Self::HoveringColumn { task_id, .. }
            | Self::Committing { task_id, .. }
            | Self::RolledBack { task_id } => Some(task_id),
        }
    }

    /// Returns the session view of an active drag.
    #[must_use]
    pub fn session(&self) -> Option<DragSession> {
        match self {
            Self::Dragging {
                task_id,
                origin_status,
            } => Some(DragSession {
                active_task_id: task_id.clone(),
                origin_status: *origin_status,
                candidate_column: None,
            }),
            Self::HoveringColumn {
                task_id,
                origin_status,
                candidate,
            } => Some(DragSession {
                active_task_id: task_id.clone(),
                origin_status: *origin_status,
                candidate_column: Some(*candidate),
            }),
            _ => None,
        }
    }
}

/// Ephemeral description of an in-progress drag. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    /// Dragged task.
    pub active_task_id: TaskId,
    /// Status the task had when the drag started.
    pub origin_status: TaskStatus,
    /// Column under the pointer, if any.
    pub candidate_column: Option<Column>,
}

impl DragSession {
    /// Column the task started in.
    #[must_use]
    pub const fn origin_column(&self) -> Column {
        Column::for_status(self.origin_status)
    }
}

/// How a drop was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// No drag was active.
    Ignored,
    /// The drop had no target or targeted the origin column; the list was
    /// restored to its pre-drag state.
    Reverted {
        /// Dragged task.
        task_id: TaskId,
    },
    /// The new status was persisted.
    Committed {
        /// Dragged task.
        task_id: TaskId,
        /// Persisted status.
        status: TaskStatus,
    },
}
