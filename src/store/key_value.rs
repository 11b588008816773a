//! Key-value persistence for JSON blobs.
//!
//! The entry store only needs two operations: read the blob stored under a
//! key, and overwrite it. Each backend stores values as opaque strings.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{EngineError, EngineResult};

/// A string-valued store addressed by key.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if nothing was stored.
    fn get(&self, key: &str) -> EngineResult<Option<String>>;

    /// Replaces the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> EngineResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> EngineResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> EngineResult<()> {
        (**self).set(key, value)
    }
}

/// Volatile store kept in a `HashMap`. Used by tests and ephemeral servers.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> EngineResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> EngineResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store writing one `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    pub fn open<P: AsRef<Path>>(dir: P) -> EngineResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| EngineError::StoreError {
            key: dir.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> EngineResult<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(value) => {
                debug!(key, path = %path.display(), bytes = value.len(), "Read blob");
                Ok(Some(value))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(EngineError::StoreError {
                key: key.to_string(),
                message: e.to_string(),
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> EngineResult<()> {
        let path = self.path_for(key);
        fs::write(&path, value).map_err(|e| EngineError::StoreError {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        debug!(key, path = %path.display(), bytes = value.len(), "Wrote blob");
        Ok(())
    }
}
