//! UI-facing task list controller.

use crate::{
    dashboard::config::TaskListConfig,
    kanban::{
        domain::{Column, ColumnGroups, DropOutcome},
        services::{KanbanBoard, KanbanError},
    },
    ordering::{
        domain::{MoveDirection, OrderScope, TaskOrder, ViewMode},
        ports::KeyValueStore,
        services::{TaskOrderStore, ViewModeStore},
    },
    task::{
        domain::{
            FlatSubtask, Subtask, SubtaskId, SubtaskPatch, Task, TaskDomainError, TaskId,
            TaskStatus, tree,
        },
        ports::{TaskStore, TaskStoreError},
    },
};
use mockable::Clock;
use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};
use thiserror::Error;
use tracing::{debug, error, warn};

/// Service-level errors for task list operations.
#[derive(Debug, Error)]
pub enum TaskListError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The task store could not supply a fresh task list.
    #[error("failed to load tasks")]
    Fetch(#[source] TaskStoreError),

    /// The task store rejected a subtask tree; the task was rolled back.
    #[error("failed to save subtasks of task {task_id}; changes were rolled back")]
    PersistSubtasks {
        /// Task whose tree failed to persist.
        task_id: TaskId,
        /// Underlying store failure.
        #[source]
        source: TaskStoreError,
    },

    /// Board operation failed.
    #[error(transparent)]
    Kanban(#[from] KanbanError),
}

/// Result type for task list operations.
pub type TaskListResult<T> = Result<T, TaskListError>;

/// Facade over one work context's task list.
///
/// Holds the local task list (through the [`KanbanBoard`]), the explicit
/// order for today's scope, and UI bookkeeping: expanded tasks and
/// subtasks plus the task whose timer is running. Every subtask lookup is
/// scoped to a single task, so subtask ids only need to be unique within
/// their task.
pub struct TaskListController<S, K, C>
where
    S: TaskStore,
    K: KeyValueStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
    config: TaskListConfig,
    board: KanbanBoard<S>,
    order: TaskOrderStore<K>,
    view_modes: ViewModeStore<K>,
    view_mode: ViewMode,
    expanded_tasks: HashSet<TaskId>,
    expanded_subtasks: HashMap<TaskId, HashSet<SubtaskId>>,
    active_timer: Option<TaskId>,
}

impl<S, K, C> TaskListController<S, K, C>
where
    S: TaskStore,
    K: KeyValueStore,
    C: Clock + Send + Sync,
{
    /// Creates a controller with an empty task list.
    ///
    /// The persisted order for today's scope and the stored view mode are
    /// loaded immediately; call [`Self::refresh`] to load tasks.
    #[must_use]
    pub fn new(store: Arc<S>, kv: Arc<K>, clock: Arc<C>, config: TaskListConfig) -> Self {
        let scope = OrderScope::today(config.work_context().clone(), &*clock);
        let view_modes = ViewModeStore::new(Arc::clone(&kv));
        let view_mode = view_modes.load(config.work_context());
        Self {
            board: KanbanBoard::new(Arc::clone(&store), Vec::new()),
            order: TaskOrderStore::open(kv, scope),
            store,
            clock,
            config,
            view_modes,
            view_mode,
            expanded_tasks: HashSet::new(),
            expanded_subtasks: HashMap::new(),
            active_timer: None,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &TaskListConfig {
        &self.config
    }

    /// Returns the underlying board.
    #[must_use]
    pub const fn board(&self) -> &KanbanBoard<S> {
        &self.board
    }

    /// Returns the scope the task order is currently stored under.
    #[must_use]
    pub const fn scope(&self) -> &OrderScope {
        self.order.scope()
    }

    /// Returns the explicit order, if one exists for the current scope.
    #[must_use]
    pub const fn order(&self) -> Option<&TaskOrder> {
        self.order.order()
    }

    /// Returns the local task list in store order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        self.board.tasks()
    }

    /// Returns the local copy of one task.
    #[must_use]
    pub fn task(&self, task_id: &TaskId) -> Option<&Task> {
        self.board.task(task_id)
    }

    // ------------------------------------------------------------------
    // Loading and ordering
    // ------------------------------------------------------------------

    /// Replaces the local list with the store's current tasks.
    ///
    /// Rolls the order scope over when the date changed, reconciles the
    /// order with the new id set, forgets expansion state of tasks and
    /// subtasks that no longer exist, and stops the timer when its task is
    /// gone or completed. Returns the number of tasks loaded.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListError::Fetch`] when the store fails and
    /// [`TaskListError::Kanban`] while a drag is active. The local state is
    /// unchanged in both cases.
    pub async fn refresh(&mut self) -> TaskListResult<usize> {
        if let Some(active) = self.board.state().task_id() {
            return Err(KanbanError::DragInProgress(active.clone()).into());
        }
        let tasks = self.store.fetch_tasks().await.map_err(TaskListError::Fetch)?;
        self.board.replace_tasks(tasks)?;
        self.roll_scope();

        let ids = self.task_ids();
        self.order.reconcile(&ids);
        self.prune_expanded();
        if self
            .active_timer
            .as_ref()
            .is_some_and(|id| !self.is_timer_eligible(id))
        {
            self.stop_timer();
        }
        debug!(count = ids.len(), scope = %self.order.scope(), "task list refreshed");
        Ok(ids.len())
    }

    /// Switches the order scope to today's date when the day has changed.
    ///
    /// Returns `true` when the scope rolled over.
    pub fn roll_scope(&mut self) -> bool {
        let today = OrderScope::today(self.config.work_context().clone(), &*self.clock);
        self.order.switch_scope(today)
    }

    /// Returns the tasks sorted by the explicit order, or in store order
    /// when none exists yet.
    #[must_use]
    pub fn ordered_tasks(&self) -> Vec<&Task> {
        self.order.arrange(self.board.tasks())
    }

    /// Moves a task one position up or down and persists the new order.
    ///
    /// The first move of a day creates the order from the current list.
    /// Boundary moves and unknown ids leave the order unchanged.
    pub fn move_task(&mut self, task_id: &TaskId, direction: MoveDirection) -> &TaskOrder {
        self.roll_scope();
        let ids = self.task_ids();
        self.order.move_task(&ids, task_id, direction)
    }

    // ------------------------------------------------------------------
    // Expansion and timer bookkeeping
    // ------------------------------------------------------------------

    /// Flips the expansion of a task and returns the new state.
    ///
    /// Unknown tasks are never expanded.
    pub fn toggle_task_expanded(&mut self, task_id: &TaskId) -> bool {
        if self.task(task_id).is_none() {
            return false;
        }
        toggle_membership(&mut self.expanded_tasks, task_id)
    }

    /// Returns whether a task is expanded.
    #[must_use]
    pub fn is_task_expanded(&self, task_id: &TaskId) -> bool {
        self.expanded_tasks.contains(task_id)
    }

    /// Flips the expansion of a subtask and returns the new state.
    ///
    /// Unknown subtasks are never expanded.
    pub fn toggle_subtask_expanded(&mut self, task_id: &TaskId, subtask_id: &SubtaskId) -> bool {
        if self.subtask(task_id, subtask_id).is_none() {
            return false;
        }
        let expanded = self.expanded_subtasks.entry(task_id.clone()).or_default();
        toggle_membership(expanded, subtask_id)
    }

    /// Returns whether a subtask of `task_id` is expanded.
    #[must_use]
    pub fn is_subtask_expanded(&self, task_id: &TaskId, subtask_id: &SubtaskId) -> bool {
        self.expanded_subtasks
            .get(task_id)
            .is_some_and(|expanded| expanded.contains(subtask_id))
    }

    /// Starts the timer on a task, replacing any running timer.
    ///
    /// Returns `false` for unknown or completed tasks.
    pub fn start_timer(&mut self, task_id: &TaskId) -> bool {
        if !self.is_timer_eligible(task_id) {
            return false;
        }
        debug!(task_id = %task_id, "timer started");
        self.active_timer = Some(task_id.clone());
        true
    }

    /// Stops the running timer and returns the task it was running on.
    pub fn stop_timer(&mut self) -> Option<TaskId> {
        let stopped = self.active_timer.take();
        if let Some(task_id) = &stopped {
            debug!(task_id = %task_id, "timer stopped");
        }
        stopped
    }

    /// Returns the task whose timer is running.
    #[must_use]
    pub const fn active_timer(&self) -> Option<&TaskId> {
        self.active_timer.as_ref()
    }

    // ------------------------------------------------------------------
    // Subtask editing
    // ------------------------------------------------------------------

    /// Sets the completion of a subtask and all of its descendants.
    ///
    /// Returns `Ok(false)` when the task or subtask is unknown or nothing
    /// changed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListError::PersistSubtasks`] when the store rejects the
    /// new tree, after restoring the previous one.
    pub async fn toggle_subtask(
        &mut self,
        task_id: &TaskId,
        subtask_id: &SubtaskId,
        completed: bool,
    ) -> TaskListResult<bool> {
        let Some(task) = self.task(task_id) else {
            return Ok(false);
        };
        if tree::find_by_id(task.subtasks(), subtask_id).is_none() {
            return Ok(false);
        }
        let updated = tree::toggle_with_cascade(task.subtasks(), subtask_id, completed);
        self.commit_subtasks(task_id, updated).await
    }

    /// Appends a root subtask to a task.
    ///
    /// Returns the new subtask's id, or `None` when the task is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListError::Domain`] for a blank title and
    /// [`TaskListError::PersistSubtasks`] when the store rejects the new
    /// tree.
    pub async fn add_subtask(
        &mut self,
        task_id: &TaskId,
        title: &str,
    ) -> TaskListResult<Option<SubtaskId>> {
        let node = new_subtask(title)?;
        let Some(task) = self.task(task_id) else {
            return Ok(None);
        };
        let node_id = node.id().clone();
        let updated = tree::add_root(task.subtasks(), node)?;
        self.commit_subtasks(task_id, updated).await?;
        Ok(Some(node_id))
    }

    /// Appends a child to an existing root subtask.
    ///
    /// When configured, the parent is expanded so the new child is visible.
    /// Returns `None` when the task or parent is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListError::Domain`] for a blank title or when the
    /// parent is itself nested, and [`TaskListError::PersistSubtasks`] when
    /// the store rejects the new tree.
    pub async fn add_nested_subtask(
        &mut self,
        task_id: &TaskId,
        parent_id: &SubtaskId,
        title: &str,
    ) -> TaskListResult<Option<SubtaskId>> {
        let node = new_subtask(title)?;
        let Some(task) = self.task(task_id) else {
            return Ok(None);
        };
        if tree::find_by_id(task.subtasks(), parent_id).is_none() {
            return Ok(None);
        }
        let node_id = node.id().clone();
        let updated = tree::add_nested(task.subtasks(), parent_id, node)?;
        self.commit_subtasks(task_id, updated).await?;
        if self.config.expand_new_subtask_parents() {
            self.expanded_tasks.insert(task_id.clone());
            self.expanded_subtasks
                .entry(task_id.clone())
                .or_default()
                .insert(parent_id.clone());
        }
        Ok(Some(node_id))
    }

    /// Merges `patch` into a subtask.
    ///
    /// Returns `Ok(false)` when the task or subtask is unknown or the patch
    /// changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListError::Domain`] when the patch carries a blank
    /// title and [`TaskListError::PersistSubtasks`] when the store rejects
    /// the new tree.
    pub async fn update_subtask(
        &mut self,
        task_id: &TaskId,
        subtask_id: &SubtaskId,
        patch: SubtaskPatch,
    ) -> TaskListResult<bool> {
        let normalized = match patch.title.as_deref().map(str::trim) {
            Some("") => return Err(TaskDomainError::EmptyTitle.into()),
            Some(trimmed) => SubtaskPatch {
                title: Some(trimmed.to_owned()),
                completed: patch.completed,
            },
            None => patch,
        };
        let Some(task) = self.task(task_id) else {
            return Ok(false);
        };
        let updated = tree::update_by_id(task.subtasks(), subtask_id, &normalized);
        self.commit_subtasks(task_id, updated).await
    }

    /// Removes a subtask together with its children.
    ///
    /// Returns `Ok(false)` when the task or subtask is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListError::PersistSubtasks`] when the store rejects the
    /// new tree, after restoring the previous one.
    pub async fn delete_subtask(
        &mut self,
        task_id: &TaskId,
        subtask_id: &SubtaskId,
    ) -> TaskListResult<bool> {
        let Some(task) = self.task(task_id) else {
            return Ok(false);
        };
        let removed: Vec<SubtaskId> = tree::find_by_id(task.subtasks(), subtask_id)
            .map(|node| {
                tree::flatten(node.children())
                    .map(|entry| entry.node.id().clone())
                    .chain([node.id().clone()])
                    .collect()
            })
            .unwrap_or_default();
        let updated = tree::delete_by_id(task.subtasks(), subtask_id);
        let changed = self.commit_subtasks(task_id, updated).await?;
        if changed && let Some(expanded) = self.expanded_subtasks.get_mut(task_id) {
            for id in &removed {
                expanded.remove(id);
            }
        }
        Ok(changed)
    }

    // ------------------------------------------------------------------
    // Status changes and drag delegation
    // ------------------------------------------------------------------

    /// Sets a task's status with optimistic update and rollback.
    ///
    /// Completing a task stops its timer.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListError::Kanban`] during a drag or when the store
    /// rejects the change.
    pub async fn set_status(&mut self, task_id: &TaskId, status: TaskStatus) -> TaskListResult<bool> {
        let changed = self.board.set_status(task_id, status).await?;
        if changed && status.is_completed() {
            self.stop_timer_for(task_id);
        }
        Ok(changed)
    }

    /// Starts dragging a task's card.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListError::Kanban`] when another drag is active.
    pub fn drag_start(&mut self, task_id: &TaskId) -> TaskListResult<bool> {
        Ok(self.board.drag_start(task_id)?)
    }

    /// Moves the dragged card over a column.
    pub fn drag_over(&mut self, column: Column) -> bool {
        self.board.drag_over(column)
    }

    /// Abandons the active drag.
    pub fn cancel_drag(&mut self) -> bool {
        self.board.cancel_drag()
    }

    /// Drops the dragged card; see [`KanbanBoard::drop_on`].
    ///
    /// A committed move into the done column stops the task's timer.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListError::Kanban`] when the store rejects the move.
    pub async fn drop_on(&mut self, column: Option<Column>) -> TaskListResult<DropOutcome> {
        let outcome = self.board.drop_on(column).await?;
        if let DropOutcome::Committed { task_id, status } = &outcome
            && status.is_completed()
        {
            self.stop_timer_for(task_id);
        }
        Ok(outcome)
    }

    // ------------------------------------------------------------------
    // Derived views
    // ------------------------------------------------------------------

    /// Groups the ordered tasks by Kanban column.
    #[must_use]
    pub fn columns(&self) -> ColumnGroups<'_> {
        ColumnGroups::build(self.ordered_tasks())
    }

    /// Returns a task's subtask completion percentage.
    #[must_use]
    pub fn completion_percentage(&self, task_id: &TaskId) -> Option<u8> {
        self.task(task_id).map(Task::completion_percentage)
    }

    /// Returns a task's whole subtask tree in pre-order with depths.
    #[must_use]
    pub fn flattened_subtasks(&self, task_id: &TaskId) -> Vec<FlatSubtask<'_>> {
        self.task(task_id)
            .map(|task| tree::flatten(task.subtasks()).collect())
            .unwrap_or_default()
    }

    /// Returns the subtask rows to render: root subtasks plus the children
    /// of expanded subtasks.
    #[must_use]
    pub fn visible_subtasks(&self, task_id: &TaskId) -> Vec<FlatSubtask<'_>> {
        let mut visible = self.flattened_subtasks(task_id);
        visible.retain(|entry| {
            entry
                .parent_id
                .is_none_or(|parent| self.is_subtask_expanded(task_id, parent))
        });
        visible
    }

    /// Returns the list/board preference.
    #[must_use]
    pub const fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Changes and persists the list/board preference.
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
        self.view_modes.save(self.config.work_context(), mode);
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn task_ids(&self) -> Vec<TaskId> {
        self.board.tasks().iter().map(|task| task.id().clone()).collect()
    }

    fn subtask(&self, task_id: &TaskId, subtask_id: &SubtaskId) -> Option<&Subtask> {
        self.task(task_id)
            .and_then(|task| tree::find_by_id(task.subtasks(), subtask_id))
    }

    fn is_timer_eligible(&self, task_id: &TaskId) -> bool {
        self.task(task_id)
            .is_some_and(|task| !task.status().is_completed())
    }

    fn stop_timer_for(&mut self, task_id: &TaskId) {
        if self.active_timer.as_ref() == Some(task_id) {
            self.stop_timer();
        }
    }

    fn prune_expanded(&mut self) {
        let tasks = self.board.tasks();
        self.expanded_tasks
            .retain(|id| tasks.iter().any(|task| task.id() == id));
        self.expanded_subtasks.retain(|task_id, expanded| {
            let Some(task) = tasks.iter().find(|task| task.id() == task_id) else {
                return false;
            };
            expanded.retain(|id| tree::find_by_id(task.subtasks(), id).is_some());
            !expanded.is_empty()
        });
    }

    /// Installs `updated` as the task's tree and persists it, restoring the
    /// previous tree when the store fails or the future is dropped first.
    /// Returns `false` without touching the store when the tree is
    /// unchanged.
    async fn commit_subtasks(
        &mut self,
        task_id: &TaskId,
        updated: Vec<Subtask>,
    ) -> TaskListResult<bool> {
        if let Some(active) = self.board.state().task_id() {
            return Err(KanbanError::DragInProgress(active.clone()).into());
        }
        let Some(task) = self.board.task_mut(task_id) else {
            return Ok(false);
        };
        if task.subtasks() == updated.as_slice() {
            return Ok(false);
        }
        let previous = task.subtasks().to_vec();
        task.set_subtasks(updated.clone());

        let store = Arc::clone(&self.store);
        let mut guard = RestoreSubtasks {
            board: &mut self.board,
            task_id,
            previous: Some(previous),
        };
        if let Err(source) = store.persist_subtask_tree(task_id, &updated).await {
            error!(task_id = %task_id, error = %source, "failed to persist subtasks; rolling back");
            guard.restore();
            return Err(TaskListError::PersistSubtasks {
                task_id: task_id.clone(),
                source,
            });
        }
        guard.previous = None;
        Ok(true)
    }
}

/// Puts a task's previous subtask tree back unless cleared.
struct RestoreSubtasks<'a, S>
where
    S: TaskStore,
{
    board: &'a mut KanbanBoard<S>,
    task_id: &'a TaskId,
    previous: Option<Vec<Subtask>>,
}

impl<S> RestoreSubtasks<'_, S>
where
    S: TaskStore,
{
    fn restore(&mut self) {
        if let Some(previous) = self.previous.take()
            && let Some(task) = self.board.task_mut(self.task_id)
        {
            task.set_subtasks(previous);
        }
    }
}

impl<S> Drop for RestoreSubtasks<'_, S>
where
    S: TaskStore,
{
    fn drop(&mut self) {
        if self.previous.is_some() {
            warn!(task_id = %self.task_id, "subtask save abandoned before the store answered; rolling back");
            self.restore();
        }
    }
}

fn new_subtask(title: &str) -> Result<Subtask, TaskDomainError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyTitle);
    }
    Ok(Subtask::new(trimmed))
}

fn toggle_membership<T>(set: &mut HashSet<T>, value: &T) -> bool
where
    T: Clone + Eq + std::hash::Hash,
{
    if set.remove(value) {
        false
    } else {
        set.insert(value.clone());
        true
    }
}
