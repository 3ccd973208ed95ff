//! Shared world state for Kanban drag BDD scenarios.

use std::sync::Arc;

use rstest::fixture;
use taskdeck::{
    kanban::{
        domain::DropOutcome,
        services::{KanbanBoard, KanbanResult},
    },
    task::{adapters::memory::InMemoryTaskStore, domain::Task},
};

/// Scenario world for drag behaviour tests.
pub struct KanbanWorld {
    pub store: Arc<InMemoryTaskStore>,
    pub board: KanbanBoard<InMemoryTaskStore>,
    pub pre_drag: Vec<Task>,
    pub last_drop: Option<KanbanResult<DropOutcome>>,
}

impl KanbanWorld {
    /// Creates a world with an empty board.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryTaskStore::new());
        Self {
            board: KanbanBoard::new(Arc::clone(&store), Vec::new()),
            store,
            pre_drag: Vec::new(),
            last_drop: None,
        }
    }
}

impl Default for KanbanWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> KanbanWorld {
    KanbanWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
