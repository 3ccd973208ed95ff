//! Given steps for Kanban drag BDD scenarios.

use std::sync::Arc;

use super::world::KanbanWorld;
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskdeck::{
    kanban::services::KanbanBoard,
    task::{
        adapters::memory::InMemoryTaskStore,
        domain::{Task, TaskStatus},
    },
};

#[given(r#"a board with pending task "{pending}" and in-progress task "{in_progress}""#)]
fn board_with_tasks(
    world: &mut KanbanWorld,
    pending: String,
    in_progress: String,
) -> Result<(), eyre::Report> {
    let tasks = vec![
        Task::with_id(pending.as_str(), "Pending card").wrap_err("build pending task")?,
        Task::with_id(in_progress.as_str(), "Active card")
            .wrap_err("build in-progress task")?
            .with_status(TaskStatus::InProgress),
    ];
    world.store = Arc::new(InMemoryTaskStore::with_tasks(tasks.clone()));
    world.board = KanbanBoard::new(Arc::clone(&world.store), tasks);
    Ok(())
}

#[given("the task store rejects writes")]
fn store_rejects_writes(world: &mut KanbanWorld) -> Result<(), eyre::Report> {
    world
        .store
        .set_reject_writes(true)
        .wrap_err("enable write rejection")
}
