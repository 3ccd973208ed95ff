//! Domain model for explicit task ordering and its storage scope.

mod error;
mod order;
mod scope;
mod view_mode;

pub use error::{OrderingDomainError, ParseViewModeError};
pub use order::{MoveDirection, TaskOrder};
pub use scope::{OrderScope, WorkContext};
pub use view_mode::ViewMode;
