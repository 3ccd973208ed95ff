//! Unit tests for the Kanban module.
