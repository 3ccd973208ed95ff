//! User-chosen linear ordering of task ids.

use crate::task::domain::{Task, TaskId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Direction for a single-step reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    /// Towards the front of the list.
    Up,
    /// Towards the back of the list.
    Down,
}

/// Explicit task sequence, independent of creation order.
///
/// Serialized as a plain JSON array of id strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskOrder(Vec<TaskId>);

impl TaskOrder {
    /// Creates an order from ids, keeping the first occurrence of duplicates.
    #[must_use]
    pub fn new(ids: impl IntoIterator<Item = TaskId>) -> Self {
        let mut seen = HashSet::new();
        Self(ids.into_iter().filter(|id| seen.insert(id.clone())).collect())
    }

    /// Returns the persisted order if there is one, else the identity order
    /// of `current_ids`.
    #[must_use]
    pub fn initialize(persisted: Option<Self>, current_ids: &[TaskId]) -> Self {
        persisted.unwrap_or_else(|| Self::new(current_ids.iter().cloned()))
    }

    /// Aligns the order with the current id set.
    ///
    /// Ids no longer present are dropped; ids missing from the order are
    /// appended in their incoming relative order. The result contains every
    /// current id exactly once.
    #[must_use]
    pub fn reconcile(&self, current_ids: &[TaskId]) -> Self {
        let current: HashSet<&TaskId> = current_ids.iter().collect();
        let ordered: HashSet<&TaskId> = self.0.iter().collect();
        let retained = self.0.iter().filter(|id| current.contains(*id));
        let appended = current_ids.iter().filter(|id| !ordered.contains(*id));
        Self::new(retained.chain(appended).cloned())
    }

    /// Swaps `id` with its neighbour in `direction`.
    ///
    /// Moving past either end, or moving an id that is not in the order,
    /// returns an unchanged copy.
    #[must_use]
    pub fn move_task(&self, id: &TaskId, direction: MoveDirection) -> Self {
        let mut ids = self.0.clone();
        let Some(index) = ids.iter().position(|candidate| candidate == id) else {
            return self.clone();
        };
        let neighbour = match direction {
            MoveDirection::Up => index.checked_sub(1),
            MoveDirection::Down => index.checked_add(1).filter(|next| *next < ids.len()),
        };
        if let Some(other) = neighbour {
            ids.swap(index, other);
        }
        Self(ids)
    }

    /// Returns the ordered ids.
    #[must_use]
    pub fn ids(&self) -> &[TaskId] {
        &self.0
    }

    /// Returns the number of ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when the order holds no ids.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the zero-based position of `id`.
    #[must_use]
    pub fn position(&self, id: &TaskId) -> Option<usize> {
        self.0.iter().position(|candidate| candidate == id)
    }

    /// Sorts `tasks` by this order.
    ///
    /// Tasks the order does not mention keep their incoming relative order
    /// after all ordered tasks.
    #[must_use]
    pub fn arrange<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        let ranks: HashMap<&TaskId, usize> = self
            .0
            .iter()
            .enumerate()
            .map(|(rank, id)| (id, rank))
            .collect();
        let mut arranged: Vec<&Task> = tasks.iter().collect();
        arranged.sort_by_key(|task| ranks.get(task.id()).copied().unwrap_or(usize::MAX));
        arranged
    }
}

impl FromIterator<TaskId> for TaskOrder {
    fn from_iter<I: IntoIterator<Item = TaskId>>(iter: I) -> Self {
        Self::new(iter)
    }
}
