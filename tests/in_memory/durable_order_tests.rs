//! Controller state persisted through the directory-backed store.

use std::sync::Arc;

use super::helpers::{controller, create_temp_dir, store};
use rstest::rstest;
use taskdeck::{
    ordering::{
        adapters::directory::DirectoryKeyValueStore,
        domain::{MoveDirection, ViewMode},
        ports::KeyValueStore,
    },
    task::{adapters::memory::InMemoryTaskStore, domain::TaskId},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn order_and_view_mode_persist_on_disk(
    store: Arc<InMemoryTaskStore>,
) -> Result<(), eyre::Report> {
    let dir = create_temp_dir("taskdeck_dashboard")?;
    let kv = Arc::new(DirectoryKeyValueStore::open(&dir)?);
    let mut list = controller(&store, &kv);
    list.refresh().await?;

    list.move_task(&TaskId::from("plan"), MoveDirection::Up);
    list.set_view_mode(ViewMode::Kanban);
    let key = list.scope().storage_key();
    drop(list);

    let reopened_kv = Arc::new(DirectoryKeyValueStore::open(&dir)?);
    let raw = reopened_kv
        .get(&key)?
        .ok_or_else(|| eyre::eyre!("order file missing"))?;
    eyre::ensure!(raw == r#"["plan","write","tidy"]"#, "unexpected order {raw}");

    let mut reopened = controller(&store, &reopened_kv);
    reopened.refresh().await?;
    eyre::ensure!(reopened.view_mode() == ViewMode::Kanban, "view mode lost");
    let first = reopened
        .ordered_tasks()
        .first()
        .map(|task| task.id().as_str().to_owned());
    eyre::ensure!(first.as_deref() == Some("plan"), "unexpected first task {first:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn corrupt_order_file_falls_back_to_natural_order(
    store: Arc<InMemoryTaskStore>,
) -> Result<(), eyre::Report> {
    let dir = create_temp_dir("taskdeck_dashboard")?;
    let kv = Arc::new(DirectoryKeyValueStore::open(&dir)?);
    let probe = controller(&store, &kv);
    kv.set(&probe.scope().storage_key(), "{not json")?;

    let mut list = controller(&store, &kv);
    list.refresh().await?;

    eyre::ensure!(list.order().is_none(), "corrupt order should be ignored");
    let ids: Vec<&str> = list
        .ordered_tasks()
        .into_iter()
        .map(|task| task.id().as_str())
        .collect();
    eyre::ensure!(ids == ["write", "plan", "tidy"], "unexpected order {ids:?}");
    Ok(())
}
