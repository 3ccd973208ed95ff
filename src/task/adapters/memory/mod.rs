//! In-memory adapters used by tests and embedding hosts without a backend.

mod store;

pub use store::InMemoryTaskStore;
