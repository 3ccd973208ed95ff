//! Adapter implementations for ordering ports.

pub mod directory;
pub mod memory;
