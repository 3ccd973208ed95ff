//! Top-level task aggregate.

use super::{Priority, Subtask, TaskDomainError, TaskId, TaskStatus, tree};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Optional scheduling fields carried through untouched by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// First day the task should be worked on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Day the task is due.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

/// A top-level work item with a status and a subtask tree.
///
/// Deserialization applies the same title and depth checks as the
/// constructors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaskRecord")]
pub struct Task {
    id: TaskId,
    title: String,
    #[serde(default)]
    status: TaskStatus,
    #[serde(default)]
    priority: Priority,
    #[serde(default)]
    subtasks: Vec<Subtask>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    schedule: Option<Schedule>,
}

/// Wire shape of a task before validation.
#[derive(Deserialize)]
struct TaskRecord {
    id: TaskId,
    title: String,
    #[serde(default)]
    status: TaskStatus,
    #[serde(default)]
    priority: Priority,
    #[serde(default)]
    subtasks: Vec<Subtask>,
    #[serde(default)]
    schedule: Option<Schedule>,
}

impl TryFrom<TaskRecord> for Task {
    type Error = TaskDomainError;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        let mut task = Self::with_id(record.id, record.title)?
            .with_status(record.status)
            .with_priority(record.priority)
            .with_subtasks(record.subtasks)?;
        task.schedule = record.schedule;
        Ok(task)
    }
}

impl Task {
    /// Creates a pending task with a freshly generated id.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank.
    pub fn new(title: impl Into<String>) -> Result<Self, TaskDomainError> {
        Self::with_id(TaskId::new(), title)
    }

    /// Creates a pending task with an explicit id.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank.
    pub fn with_id(id: impl Into<TaskId>, title: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw_title = title.into();
        let trimmed = raw_title.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        Ok(Self {
            id: id.into(),
            title: trimmed.to_owned(),
            status: TaskStatus::Pending,
            priority: Priority::Medium,
            subtasks: Vec::new(),
            schedule: None,
        })
    }

    /// Sets the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the scheduling fields.
    #[must_use]
    pub const fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = Some(schedule);
        self
    }

    /// Replaces the subtask tree.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TreeTooDeep`] when any root subtask owns
    /// grandchildren.
    pub fn with_subtasks(
        mut self,
        subtasks: impl IntoIterator<Item = Subtask>,
    ) -> Result<Self, TaskDomainError> {
        let nodes: Vec<Subtask> = subtasks.into_iter().collect();
        tree::validate_depth(&nodes)?;
        self.subtasks = nodes;
        Ok(self)
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the task priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the scheduling fields, if any.
    #[must_use]
    pub const fn schedule(&self) -> Option<&Schedule> {
        self.schedule.as_ref()
    }

    /// Returns the root subtasks.
    #[must_use]
    pub fn subtasks(&self) -> &[Subtask] {
        &self.subtasks
    }

    /// Percentage of completed subtasks across the whole tree.
    #[must_use]
    pub fn completion_percentage(&self) -> u8 {
        tree::completion_percentage(&self.subtasks)
    }

    pub(crate) const fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
    }

    pub(crate) fn set_subtasks(&mut self, subtasks: Vec<Subtask>) {
        self.subtasks = subtasks;
    }
}
