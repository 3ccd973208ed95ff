//! End-to-end controller flows against the in-memory adapters.

use std::sync::Arc;

use super::helpers::{controller, store};
use rstest::rstest;
use taskdeck::{
    kanban::domain::{Column, DropOutcome},
    ordering::{adapters::memory::InMemoryKeyValueStore, domain::MoveDirection},
    task::{
        adapters::memory::InMemoryTaskStore,
        domain::{SubtaskId, TaskId, TaskStatus},
        ports::TaskStore,
    },
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn board_reflects_loaded_tasks(store: Arc<InMemoryTaskStore>) -> Result<(), eyre::Report> {
    let kv = Arc::new(InMemoryKeyValueStore::new());
    let mut list = controller(&store, &kv);

    let loaded = list.refresh().await?;

    eyre::ensure!(loaded == 3, "expected three tasks, loaded {loaded}");
    let columns = list.columns();
    for (column, expected) in [
        (Column::Todo, "write"),
        (Column::InProgress, "plan"),
        (Column::Done, "tidy"),
    ] {
        let ids: Vec<&str> = columns
            .get(column)
            .iter()
            .map(|task| task.id().as_str())
            .collect();
        eyre::ensure!(ids == [expected], "{column} holds {ids:?}");
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn subtask_work_round_trips_through_store(
    store: Arc<InMemoryTaskStore>,
) -> Result<(), eyre::Report> {
    let kv = Arc::new(InMemoryKeyValueStore::new());
    let mut list = controller(&store, &kv);
    list.refresh().await?;
    let task_id = TaskId::from("write");

    list.toggle_subtask(&task_id, &SubtaskId::from("s1"), true)
        .await?;
    let added = list
        .add_nested_subtask(&task_id, &SubtaskId::from("s2"), "Check links")
        .await?
        .ok_or_else(|| eyre::eyre!("parent subtask should exist"))?;
    list.delete_subtask(&task_id, &SubtaskId::from("s1a")).await?;

    let mut reopened = controller(&store, &kv);
    reopened.refresh().await?;
    let rows: Vec<(String, usize, bool)> = reopened
        .flattened_subtasks(&task_id)
        .into_iter()
        .map(|entry| {
            (
                entry.node.id().to_string(),
                entry.depth,
                entry.node.is_completed(),
            )
        })
        .collect();
    eyre::ensure!(
        rows == vec![
            ("s1".to_owned(), 0, true),
            ("s2".to_owned(), 0, false),
            (added.to_string(), 1, false),
        ],
        "unexpected tree {rows:?}"
    );
    eyre::ensure!(
        reopened.completion_percentage(&task_id) == Some(33),
        "expected 33% complete"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn order_survives_controller_restart(
    store: Arc<InMemoryTaskStore>,
) -> Result<(), eyre::Report> {
    let kv = Arc::new(InMemoryKeyValueStore::new());
    let mut first = controller(&store, &kv);
    first.refresh().await?;
    first.move_task(&TaskId::from("tidy"), MoveDirection::Up);
    first.move_task(&TaskId::from("tidy"), MoveDirection::Up);

    let mut second = controller(&store, &kv);
    second.refresh().await?;

    let ids: Vec<&str> = second
        .ordered_tasks()
        .into_iter()
        .map(|task| task.id().as_str())
        .collect();
    eyre::ensure!(ids == ["tidy", "write", "plan"], "unexpected order {ids:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_drop_leaves_store_and_board_untouched(
    store: Arc<InMemoryTaskStore>,
) -> Result<(), eyre::Report> {
    let kv = Arc::new(InMemoryKeyValueStore::new());
    let mut list = controller(&store, &kv);
    list.refresh().await?;
    let before = list.tasks().to_vec();
    store.set_reject_writes(true)?;

    list.drag_start(&TaskId::from("write"))?;
    list.drag_over(Column::Done);
    let result = list.drop_on(Some(Column::Done)).await;

    eyre::ensure!(result.is_err(), "drop should fail");
    eyre::ensure!(list.tasks() == before.as_slice(), "board was not restored");
    let stored = store.fetch_tasks().await?;
    eyre::ensure!(stored == before, "store changed despite rejection");

    store.set_reject_writes(false)?;
    list.drag_start(&TaskId::from("write"))?;
    let outcome = list.drop_on(Some(Column::InProgress)).await?;
    eyre::ensure!(
        matches!(outcome, DropOutcome::Committed { status: TaskStatus::InProgress, .. }),
        "unexpected outcome {outcome:?}"
    );
    Ok(())
}
