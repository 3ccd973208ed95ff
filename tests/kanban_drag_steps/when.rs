//! When steps for Kanban drag BDD scenarios.

use super::world::{KanbanWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskdeck::{kanban::domain::Column, task::domain::TaskId};

#[when(r#"task "{task_id}" is dragged over the "{column}" column"#)]
fn drag_task_over(
    world: &mut KanbanWorld,
    task_id: String,
    column: String,
) -> Result<(), eyre::Report> {
    world.pre_drag = world.board.tasks().to_vec();
    let started = world
        .board
        .drag_start(&TaskId::from(task_id.as_str()))
        .wrap_err("start drag")?;
    if !started {
        return Err(eyre::eyre!("task {task_id} is not on the board"));
    }
    world.board.drag_over(Column::from_label(&column));
    Ok(())
}

#[when(r#"the card is dragged over the "{column}" column"#)]
fn drag_card_over(world: &mut KanbanWorld, column: String) {
    world.board.drag_over(Column::from_label(&column));
}

#[when(r#"the card is dropped on the "{column}" column"#)]
fn drop_card_on(world: &mut KanbanWorld, column: String) {
    let outcome = run_async(world.board.drop_on(Some(Column::from_label(&column))));
    world.last_drop = Some(outcome);
}

#[when("the card is dropped outside any column")]
fn drop_card_outside(world: &mut KanbanWorld) {
    let outcome = run_async(world.board.drop_on(None));
    world.last_drop = Some(outcome);
}
