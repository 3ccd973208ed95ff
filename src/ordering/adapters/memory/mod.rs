//! In-memory adapters for ordering ports.

mod kv;

pub use kv::InMemoryKeyValueStore;
