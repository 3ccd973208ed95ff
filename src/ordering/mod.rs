//! Explicit, persisted task ordering.
//!
//! A task order is a user-chosen sequence of task ids stored per work
//! context and calendar day. It is reconciled against the canonical task
//! set whenever that set changes, so it always lists every current task
//! exactly once.
//!
//! - Domain types in [`domain`]
//! - The key-value port in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Scoped stores in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
