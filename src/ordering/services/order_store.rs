//! Scoped, persisted task order.

use crate::{
    ordering::{
        domain::{MoveDirection, OrderScope, TaskOrder},
        ports::KeyValueStore,
    },
    task::domain::{Task, TaskId},
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Keeps the explicit task order for one scope in sync with storage.
///
/// The order is created lazily on the first reorder; until then tasks keep
/// their natural order. Storage failures and unreadable values are logged
/// and treated as "no order".
#[derive(Debug)]
pub struct TaskOrderStore<K>
where
    K: KeyValueStore,
{
    kv: Arc<K>,
    scope: OrderScope,
    order: Option<TaskOrder>,
}

impl<K> TaskOrderStore<K>
where
    K: KeyValueStore,
{
    /// Opens the store for `scope`, loading any persisted order.
    #[must_use]
    pub fn open(kv: Arc<K>, scope: OrderScope) -> Self {
        let order = load_order(&*kv, &scope);
        Self { kv, scope, order }
    }

    /// Returns the active scope.
    #[must_use]
    pub const fn scope(&self) -> &OrderScope {
        &self.scope
    }

    /// Returns the current order, if one has been created or loaded.
    #[must_use]
    pub const fn order(&self) -> Option<&TaskOrder> {
        self.order.as_ref()
    }

    /// Switches to `scope`, discarding the in-memory order and loading the
    /// one stored for the new scope. Returns `true` when the scope changed.
    pub fn switch_scope(&mut self, scope: OrderScope) -> bool {
        if scope == self.scope {
            return false;
        }
        debug!(from = %self.scope, to = %scope, "task order scope changed");
        self.order = load_order(&*self.kv, &scope);
        self.scope = scope;
        true
    }

    /// Aligns an existing order with `current_ids`, persisting it when the
    /// set changed. Does nothing while no order exists.
    pub fn reconcile(&mut self, current_ids: &[TaskId]) {
        let Some(order) = &self.order else {
            return;
        };
        let reconciled = order.reconcile(current_ids);
        if &reconciled != order {
            persist_order(&*self.kv, &self.scope, &reconciled);
            self.order = Some(reconciled);
        }
    }

    /// Moves `id` one step in `direction` and persists the result.
    ///
    /// Creates the order from `current_ids` on first use. Returns the new
    /// order; boundary moves and unknown ids leave it unchanged.
    pub fn move_task(
        &mut self,
        current_ids: &[TaskId],
        id: &TaskId,
        direction: MoveDirection,
    ) -> &TaskOrder {
        let base = TaskOrder::initialize(self.order.take(), current_ids).reconcile(current_ids);
        let moved = base.move_task(id, direction);
        persist_order(&*self.kv, &self.scope, &moved);
        self.order.insert(moved)
    }

    /// Sorts `tasks` by the current order, or keeps them as given when no
    /// order exists.
    #[must_use]
    pub fn arrange<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        match &self.order {
            Some(order) => order.arrange(tasks),
            None => tasks.iter().collect(),
        }
    }
}

/// Reads the order stored for `scope`.
///
/// Missing, unreadable or corrupt values yield `None`.
pub fn load_order(kv: &impl KeyValueStore, scope: &OrderScope) -> Option<TaskOrder> {
    let key = scope.storage_key();
    let raw = match kv.get(&key) {
        Ok(value) => value?,
        Err(err) => {
            warn!(%key, error = %err, "failed to read task order; using natural order");
            return None;
        }
    };
    match serde_json::from_str::<Vec<TaskId>>(&raw) {
        Ok(ids) => Some(TaskOrder::new(ids)),
        Err(err) => {
            warn!(%key, error = %err, "stored task order is corrupt; ignoring it");
            None
        }
    }
}

/// Overwrites the order stored for `scope`. Failures are logged only.
pub fn persist_order(kv: &impl KeyValueStore, scope: &OrderScope, order: &TaskOrder) {
    let key = scope.storage_key();
    let encoded = match serde_json::to_string(order) {
        Ok(encoded) => encoded,
        Err(err) => {
            warn!(%key, error = %err, "failed to encode task order");
            return;
        }
    };
    match kv.set(&key, &encoded) {
        Ok(()) => debug!(%key, len = order.len(), "persisted task order"),
        Err(err) => warn!(%key, error = %err, "failed to persist task order"),
    }
}
