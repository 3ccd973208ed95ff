//! Tasks and their two-level subtask trees.
//!
//! The module follows hexagonal architecture:
//!
//! - Domain types and the pure tree operations in [`domain`]
//! - The task store contract in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
