//! Step definitions for Kanban drag scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
