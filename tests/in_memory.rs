//! In-memory integration tests.
//!
//! Tests are organized into modules by functionality:
//! - `dashboard_flow_tests`: Loading, ordering, subtask editing, drag rollback
//! - `durable_order_tests`: Order and view mode persisted to a directory

mod in_memory {
    pub mod helpers;

    mod dashboard_flow_tests;
    mod durable_order_tests;
}
