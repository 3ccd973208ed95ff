//! Dashboard orchestration services.

mod controller;

pub use controller::{TaskListController, TaskListError, TaskListResult};
