//! Shared fixtures for in-memory integration tests.

use std::sync::Arc;

use camino::Utf8PathBuf;
use cap_std::{ambient_authority, fs_utf8::Dir};
use mockable::DefaultClock;
use rstest::fixture;
use taskdeck::{
    dashboard::{config::TaskListConfig, services::TaskListController},
    ordering::ports::KeyValueStore,
    task::{
        adapters::memory::InMemoryTaskStore,
        domain::{Subtask, Task, TaskStatus},
    },
};

/// Controller wired to the in-memory task store and the wall clock.
pub type TestController<K> = TaskListController<InMemoryTaskStore, K, DefaultClock>;

/// Three tasks covering every Kanban column, one with a nested subtask.
///
/// # Panics
///
/// Panics if the fixture data violates task invariants.
#[must_use]
pub fn sample_tasks() -> Vec<Task> {
    let draft = Subtask::with_id("s1", "Draft")
        .with_children([Subtask::with_id("s1a", "Pick a template")]);
    vec![
        Task::with_id("write", "Write newsletter")
            .expect("valid task")
            .with_subtasks([draft, Subtask::with_id("s2", "Send")])
            .expect("shallow tree"),
        Task::with_id("plan", "Plan week")
            .expect("valid task")
            .with_status(TaskStatus::InProgress),
        Task::with_id("tidy", "Tidy desk")
            .expect("valid task")
            .with_status(TaskStatus::Completed),
    ]
}

/// Provides a task store seeded with [`sample_tasks`].
#[fixture]
pub fn store() -> Arc<InMemoryTaskStore> {
    Arc::new(InMemoryTaskStore::with_tasks(sample_tasks()))
}

/// Builds a controller over `store` and `kv` with the default config.
pub fn controller<K: KeyValueStore>(
    store: &Arc<InMemoryTaskStore>,
    kv: &Arc<K>,
) -> TestController<K> {
    TaskListController::new(
        Arc::clone(store),
        Arc::clone(kv),
        Arc::new(DefaultClock),
        TaskListConfig::default(),
    )
}

/// Creates a uniquely named scratch directory under the system temp dir.
///
/// # Errors
///
/// Returns an error if the temp dir path is not UTF-8 or the directory
/// cannot be created.
pub fn create_temp_dir(prefix: &str) -> Result<Utf8PathBuf, std::io::Error> {
    let base = Utf8PathBuf::try_from(std::env::temp_dir()).map_err(|e| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("temp directory path is not valid UTF-8: {e}"),
        )
    })?;
    let dir_name = format!("{prefix}_{}", uuid::Uuid::new_v4());
    let base_dir = Dir::open_ambient_dir(&base, ambient_authority())?;
    base_dir.create_dir(&dir_name)?;
    Ok(base.join(dir_name))
}
