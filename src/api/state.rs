//! Application state for the TimePulse API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::PayPolicy;
use crate::error::EngineResult;
use crate::store::{EntryStore, KeyValueStore, MemoryStore};

/// The store type held by the API, independent of the backend.
pub type SharedEntryStore = EntryStore<Box<dyn KeyValueStore>>;

/// Shared application state.
///
/// Holds the entry store behind an async read-write lock. Handlers take a
/// read guard for queries and calculations and a write guard only for
/// mutations.
#[derive(Clone)]
pub struct AppState {
    store: Arc<RwLock<SharedEntryStore>>,
}

impl AppState {
    /// Opens the entry store on `backend`. `initial_policy` applies when the
    /// backend holds no settings yet.
    pub fn open<S>(backend: S, initial_policy: PayPolicy) -> EngineResult<Self>
    where
        S: KeyValueStore + 'static,
    {
        let backend: Box<dyn KeyValueStore> = Box::new(backend);
        let store = EntryStore::open_with_policy(backend, initial_policy)?;
        Ok(Self {
            store: Arc::new(RwLock::new(store)),
        })
    }

    /// State over an empty in-memory store with default settings.
    pub fn in_memory() -> EngineResult<Self> {
        Self::open(MemoryStore::new(), PayPolicy::default())
    }

    /// Shared access to the store.
    pub async fn read(&self) -> RwLockReadGuard<'_, SharedEntryStore> {
        self.store.read().await
    }

    /// Exclusive access to the store.
    pub async fn write(&self) -> RwLockWriteGuard<'_, SharedEntryStore> {
        self.store.write().await
    }
}
