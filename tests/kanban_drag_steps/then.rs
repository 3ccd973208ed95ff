//! Then steps for Kanban drag BDD scenarios.

use super::world::{KanbanWorld, run_async};
use eyre::{WrapErr, eyre};
use rstest_bdd_macros::then;
use taskdeck::{
    kanban::{domain::DropOutcome, services::KanbanError},
    task::{
        domain::{TaskId, TaskStatus},
        ports::TaskStore,
    },
};

fn last_drop(world: &KanbanWorld) -> Result<&Result<DropOutcome, KanbanError>, eyre::Report> {
    world
        .last_drop
        .as_ref()
        .ok_or_else(|| eyre!("no drop recorded in scenario world"))
}

fn parse_status(raw: &str) -> Result<TaskStatus, eyre::Report> {
    TaskStatus::try_from(raw).map_err(|err| eyre!("invalid expected status in scenario: {err}"))
}

#[then("the drop is committed")]
fn drop_committed(world: &KanbanWorld) -> Result<(), eyre::Report> {
    match last_drop(world)? {
        Ok(DropOutcome::Committed { .. }) => Ok(()),
        other => Err(eyre!("expected a committed drop, got {other:?}")),
    }
}

#[then("the drop is reverted")]
fn drop_reverted(world: &KanbanWorld) -> Result<(), eyre::Report> {
    match last_drop(world)? {
        Ok(DropOutcome::Reverted { .. }) => Ok(()),
        other => Err(eyre!("expected a reverted drop, got {other:?}")),
    }
}

#[then("the drop fails with a commit error")]
fn drop_failed(world: &KanbanWorld) -> Result<(), eyre::Report> {
    match last_drop(world)? {
        Err(KanbanError::Commit { .. }) => Ok(()),
        other => Err(eyre!("expected a commit error, got {other:?}")),
    }
}

#[then(r#"task "{task_id}" has status "{status}""#)]
fn task_has_status(
    world: &KanbanWorld,
    task_id: String,
    status: String,
) -> Result<(), eyre::Report> {
    let expected = parse_status(&status)?;
    let task = world
        .board
        .task(&TaskId::from(task_id.as_str()))
        .ok_or_else(|| eyre!("task {task_id} is not on the board"))?;
    if task.status() != expected {
        return Err(eyre!("expected status {expected}, found {}", task.status()));
    }
    if !world.board.state().is_idle() {
        return Err(eyre!("board should be idle, found {:?}", world.board.state()));
    }
    Ok(())
}

#[then("the board matches the pre-drag snapshot")]
fn board_matches_snapshot(world: &KanbanWorld) -> Result<(), eyre::Report> {
    if world.board.tasks() != world.pre_drag.as_slice() {
        return Err(eyre!(
            "board diverged from snapshot: {:?} != {:?}",
            world.board.tasks(),
            world.pre_drag
        ));
    }
    Ok(())
}

#[then(r#"the store records task "{task_id}" as "{status}""#)]
fn store_records_status(
    world: &KanbanWorld,
    task_id: String,
    status: String,
) -> Result<(), eyre::Report> {
    let expected = parse_status(&status)?;
    let tasks = run_async(world.store.fetch_tasks()).wrap_err("fetch stored tasks")?;
    let stored = tasks
        .iter()
        .find(|task| task.id().as_str() == task_id)
        .ok_or_else(|| eyre!("task {task_id} is not in the store"))?;
    if stored.status() != expected {
        return Err(eyre!("store has {}, expected {expected}", stored.status()));
    }
    Ok(())
}
