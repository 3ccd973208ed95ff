//! Task list controller composing the subtask tree, task ordering and
//! Kanban board behind a single UI-facing facade.

pub mod config;
pub mod services;

#[cfg(test)]
mod tests;
