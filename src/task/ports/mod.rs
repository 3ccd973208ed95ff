//! Port contracts for task persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by the board and
//! task list services.

pub mod store;

#[cfg(test)]
pub use store::MockTaskStore;
pub use store::{TaskStore, TaskStoreError, TaskStoreResult};
