//! Recursive subtask node.

use super::{SubtaskId, TaskStatus};
use serde::{Deserialize, Serialize};

/// A node in a task's subtask tree.
///
/// The completion flag is the single source of truth; [`Subtask::status`]
/// is derived from it, so `completed == (status == Completed)` holds by
/// construction. Children are always present, possibly empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SubtaskRecord", into = "SubtaskRecord")]
pub struct Subtask {
    id: SubtaskId,
    title: String,
    completed: bool,
    children: Vec<Subtask>,
}

impl Subtask {
    /// Creates an incomplete leaf subtask with a freshly generated id.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(SubtaskId::new(), title)
    }

    /// Creates an incomplete leaf subtask with an explicit id.
    #[must_use]
    pub fn with_id(id: impl Into<SubtaskId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            completed: false,
            children: Vec::new(),
        }
    }

    /// Sets the completion flag.
    #[must_use]
    pub const fn completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Replaces the children.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children = children.into_iter().collect();
        self
    }

    /// Returns the subtask identifier.
    #[must_use]
    pub const fn id(&self) -> &SubtaskId {
        &self.id
    }

    /// Returns the subtask title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns whether the subtask is completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns the status mirroring the completion flag.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        TaskStatus::from_completed(self.completed)
    }

    /// Returns the direct children.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Returns `true` when the node owns at least one child.
    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Number of levels below this node: `0` for a leaf.
    #[must_use]
    pub fn height(&self) -> usize {
        self.children
            .iter()
            .map(|child| child.height() + 1)
            .max()
            .unwrap_or(0)
    }

    pub(crate) fn set_title(&mut self, title: String) {
        self.title = title;
    }

    pub(crate) const fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<Self> {
        &mut self.children
    }

    /// Forces `completed` onto this node and every descendant.
    pub(crate) fn cascade_completed(&mut self, completed: bool) {
        self.completed = completed;
        for child in &mut self.children {
            child.cascade_completed(completed);
        }
    }
}

/// Partial update applied by [`super::tree::update_by_id`].
///
/// Unset fields are left untouched. Changing `completed` through a patch
/// does not cascade; use [`super::tree::toggle_with_cascade`] for that.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubtaskPatch {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement completion flag.
    pub completed: Option<bool>,
}

impl SubtaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the replacement title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the replacement completion flag.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    pub(crate) fn apply_to(&self, node: &mut Subtask) {
        if let Some(title) = &self.title {
            node.set_title(title.clone());
        }
        if let Some(completed) = self.completed {
            node.set_completed(completed);
        }
    }
}

/// Wire shape exchanged with the task store.
///
/// Older records carry only a `status` string, newer ones a `completed`
/// flag; the flag wins when both are present.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SubtaskRecord {
    id: SubtaskId,
    title: String,
    #[serde(default)]
    completed: Option<bool>,
    #[serde(default)]
    status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    subtasks: Vec<Subtask>,
}

impl From<SubtaskRecord> for Subtask {
    fn from(record: SubtaskRecord) -> Self {
        let completed = record
            .completed
            .unwrap_or_else(|| record.status.is_some_and(TaskStatus::is_completed));
        Self {
            id: record.id,
            title: record.title,
            completed,
            children: record.subtasks,
        }
    }
}

impl From<Subtask> for SubtaskRecord {
    fn from(subtask: Subtask) -> Self {
        let status = subtask.status();
        Self {
            id: subtask.id,
            title: subtask.title,
            completed: Some(subtask.completed),
            status: Some(status),
            subtasks: subtask.children,
        }
    }
}
