//! Domain model for the Kanban board.

mod column;
mod command;
mod session;

pub use column::{Column, ColumnGroups};
pub use command::{Snapshot, StatusChange};
pub use session::{DragSession, DragState, DropOutcome};
