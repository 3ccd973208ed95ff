//! Application services for the Kanban board.

mod board;

pub use board::{KanbanBoard, KanbanError, KanbanResult};
