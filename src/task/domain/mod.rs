//! Domain model for tasks and their subtask trees.
//!
//! Task and subtask values arrive as snapshots from the task store. The
//! [`tree`] module holds the pure editing operations; callers persist the
//! returned trees themselves.

mod error;
mod ids;
mod status;
mod subtask;
mod task;
pub mod tree;

pub use error::{ParsePriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::{SubtaskId, TaskId};
pub use status::{Priority, TaskStatus};
pub use subtask::{Subtask, SubtaskPatch};
pub use task::{Schedule, Task};
pub use tree::{FlatSubtask, Flatten};
