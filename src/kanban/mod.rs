//! Kanban board with optimistic drag-and-drop.
//!
//! A task's column is a pure function of its status. Dragging a card
//! changes the status locally while hovering; dropping it persists the new
//! status through the task store, and a failed commit restores the whole
//! list captured when the drag started.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
