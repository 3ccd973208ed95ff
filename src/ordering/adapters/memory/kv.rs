//! In-memory key-value store for tests.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::ordering::ports::{KeyValueError, KeyValueResult, KeyValueStore};

/// Thread-safe in-memory key-value store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore {
    state: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryKeyValueStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored keys, or `0` if the lock is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read().map(|entries| entries.len()).unwrap_or(0)
    }

    /// Returns `true` when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(err: std::sync::PoisonError<T>) -> KeyValueError {
    KeyValueError::persistence(std::io::Error::other(err.to_string()))
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> KeyValueResult<Option<String>> {
        let entries = self.state.read().map_err(poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> KeyValueResult<()> {
        let mut entries = self.state.write().map_err(poisoned)?;
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
