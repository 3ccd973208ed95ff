//! Port contracts for durable ordering state.

pub mod kv;

pub use kv::{KeyValueError, KeyValueResult, KeyValueStore};
