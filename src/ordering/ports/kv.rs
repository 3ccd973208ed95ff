//! Durable key-value port.
//!
//! Mirrors a browser-style local storage: string keys, string values,
//! whole-value overwrites with last-write-wins semantics.

use std::sync::Arc;
use thiserror::Error;

/// Result type for key-value operations.
pub type KeyValueResult<T> = Result<T, KeyValueError>;

/// Durable string key-value storage.
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// Returns `Ok(None)` when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueError`] when the backing storage cannot be read.
    fn get(&self, key: &str) -> KeyValueResult<Option<String>>;

    /// Replaces the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueError`] when the backing storage cannot be written.
    fn set(&self, key: &str, value: &str) -> KeyValueResult<()>;
}

/// Errors returned by key-value implementations.
#[derive(Debug, Clone, Error)]
pub enum KeyValueError {
    /// The key cannot be represented by the backing storage.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl KeyValueError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
