//! Kanban columns and their mapping to task statuses.

use crate::task::domain::{Task, TaskStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A board lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    /// Work not yet started.
    Todo,
    /// Work under way.
    InProgress,
    /// Finished work.
    Done,
}

impl Column {
    /// Every column, left to right.
    pub const ALL: [Self; 3] = [Self::Todo, Self::InProgress, Self::Done];

    /// Column a task with `status` belongs to.
    ///
    /// [`TaskStatus::NeedHelp`] has no lane of its own and shows in
    /// [`Column::Todo`].
    #[must_use]
    pub const fn for_status(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Pending | TaskStatus::NeedHelp => Self::Todo,
            TaskStatus::InProgress => Self::InProgress,
            TaskStatus::Completed => Self::Done,
        }
    }

    /// Column `task` currently belongs to.
    #[must_use]
    pub const fn for_task(task: &Task) -> Self {
        Self::for_status(task.status())
    }

    /// Column for a free-form status label, such as a drop target id.
    ///
    /// Matching is case-insensitive; unknown labels map to
    /// [`Column::Todo`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let normalized = label.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "done" => Self::Done,
            "inprogress" | "in_progress" => Self::InProgress,
            "todo" => Self::Todo,
            _ => TaskStatus::try_from(normalized.as_str()).map_or(Self::Todo, Self::for_status),
        }
    }

    /// Status a task takes when dropped into this column.
    #[must_use]
    pub const fn status(self) -> TaskStatus {
        match self {
            Self::Todo => TaskStatus::Pending,
            Self::InProgress => TaskStatus::InProgress,
            Self::Done => TaskStatus::Completed,
        }
    }

    /// Returns the canonical identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tasks grouped by column, each lane keeping the incoming task order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnGroups<'a> {
    todo: Vec<&'a Task>,
    in_progress: Vec<&'a Task>,
    done: Vec<&'a Task>,
}

impl<'a> ColumnGroups<'a> {
    /// Distributes `tasks` into their columns.
    #[must_use]
    pub fn build(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let mut groups = Self::default();
        for task in tasks {
            groups.lane_mut(Column::for_task(task)).push(task);
        }
        groups
    }

    /// Returns the tasks in `column`.
    #[must_use]
    pub fn get(&self, column: Column) -> &[&'a Task] {
        match column {
            Column::Todo => &self.todo,
            Column::InProgress => &self.in_progress,
            Column::Done => &self.done,
        }
    }

    /// Iterates over all columns, left to right, including empty ones.
    pub fn iter(&self) -> impl Iterator<Item = (Column, &[&'a Task])> + '_ {
        Column::ALL.into_iter().map(|column| (column, self.get(column)))
    }

    /// Total number of grouped tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.done.len()
    }

    /// Returns `true` when no tasks were grouped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lane_mut(&mut self, column: Column) -> &mut Vec<&'a Task> {
        match column {
            Column::Todo => &mut self.todo,
            Column::InProgress => &mut self.in_progress,
            Column::Done => &mut self.done,
        }
    }
}
