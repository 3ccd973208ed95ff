//! Taskdeck: hierarchical task engine for a productivity dashboard.
//!
//! This crate models tasks with two-level subtask trees, keeps a per-day
//! explicit ordering of tasks, and drives Kanban drag-and-drop with
//! optimistic updates that roll back when the task store refuses them.
//!
//! # Architecture
//!
//! Taskdeck follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, filesystem)
//!
//! # Modules
//!
//! - [`task`]: Tasks, subtask trees and the task store port
//! - [`ordering`]: Persisted task order and view preferences
//! - [`kanban`]: Column mapping and the drag-and-drop state machine
//! - [`dashboard`]: Controller composing the above for a UI layer

pub mod dashboard;
pub mod kanban;
pub mod ordering;
pub mod task;
