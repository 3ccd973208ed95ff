//! Directory-backed key-value store.
//!
//! Each key is stored as one file inside a capability-scoped directory, so
//! the adapter can never touch paths outside the directory it was opened on.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use crate::ordering::ports::{KeyValueError, KeyValueResult, KeyValueStore};

/// Key-value store keeping one `<key>.json` file per entry.
#[derive(Debug)]
pub struct DirectoryKeyValueStore {
    dir: Dir,
}

impl DirectoryKeyValueStore {
    /// Opens an existing directory as a store.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueError::Persistence`] when the directory cannot be
    /// opened.
    pub fn open(path: &Utf8Path) -> KeyValueResult<Self> {
        let dir = Dir::open_ambient_dir(path, ambient_authority())
            .map_err(KeyValueError::persistence)?;
        Ok(Self::from_dir(dir))
    }

    /// Wraps an already opened directory handle.
    #[must_use]
    pub const fn from_dir(dir: Dir) -> Self {
        Self { dir }
    }

    fn file_name(key: &str) -> KeyValueResult<String> {
        let is_valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.'));
        if !is_valid {
            return Err(KeyValueError::InvalidKey(key.to_owned()));
        }
        Ok(format!("{key}.json"))
    }
}

impl KeyValueStore for DirectoryKeyValueStore {
    fn get(&self, key: &str) -> KeyValueResult<Option<String>> {
        let name = Self::file_name(key)?;
        match self.dir.read_to_string(&name) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(KeyValueError::persistence(err)),
        }
    }

    fn set(&self, key: &str, value: &str) -> KeyValueResult<()> {
        let name = Self::file_name(key)?;
        self.dir
            .write(&name, value)
            .map_err(KeyValueError::persistence)
    }
}
