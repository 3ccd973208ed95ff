//! Behaviour tests for Kanban drag, commit and rollback.

#[path = "kanban_drag_steps/mod.rs"]
mod kanban_drag_steps_defs;

use kanban_drag_steps_defs::world::{KanbanWorld, world};
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/kanban_drag.feature",
    name = "Dropping a pending task on Done completes it"
)]
#[tokio::test(flavor = "multi_thread")]
async fn drop_on_done_completes_task(world: KanbanWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/kanban_drag.feature",
    name = "A rejected commit restores the pre-drag board"
)]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_commit_restores_board(world: KanbanWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/kanban_drag.feature",
    name = "Dropping outside any column reverts the hover"
)]
#[tokio::test(flavor = "multi_thread")]
async fn drop_outside_reverts(world: KanbanWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/kanban_drag.feature",
    name = "Dropping back on the original column changes nothing"
)]
#[tokio::test(flavor = "multi_thread")]
async fn drop_on_origin_changes_nothing(world: KanbanWorld) {
    let _ = world;
}
