//! Persisted list/board preference.

use crate::ordering::{
    domain::{ViewMode, WorkContext},
    ports::KeyValueStore,
};
use std::sync::Arc;
use tracing::warn;

/// Reads and writes the view mode preference for a work context.
#[derive(Debug, Clone)]
pub struct ViewModeStore<K>
where
    K: KeyValueStore,
{
    kv: Arc<K>,
}

impl<K> ViewModeStore<K>
where
    K: KeyValueStore,
{
    /// Creates a store over `kv`.
    #[must_use]
    pub const fn new(kv: Arc<K>) -> Self {
        Self { kv }
    }

    /// Returns the stored preference, or [`ViewMode::List`] when it is
    /// missing or unreadable.
    #[must_use]
    pub fn load(&self, context: &WorkContext) -> ViewMode {
        let key = ViewMode::storage_key(context);
        match self.kv.get(&key) {
            Ok(Some(raw)) => ViewMode::try_from(raw.as_str()).unwrap_or_else(|err| {
                warn!(%key, error = %err, "stored view mode is invalid; using default");
                ViewMode::default()
            }),
            Ok(None) => ViewMode::default(),
            Err(err) => {
                warn!(%key, error = %err, "failed to read view mode; using default");
                ViewMode::default()
            }
        }
    }

    /// Stores the preference. Failures are logged only.
    pub fn save(&self, context: &WorkContext, mode: ViewMode) {
        let key = ViewMode::storage_key(context);
        if let Err(err) = self.kv.set(&key, mode.as_str()) {
            warn!(%key, error = %err, "failed to persist view mode");
        }
    }
}
