//! Application context: both stores built once over one storage backend

use crate::config::Config;
use crate::error::Result;
use crate::library::LibraryStore;
use crate::session::SessionStore;
use crate::storage::{SqliteStorage, StorageBackend};

/// The session and library stores of one process
///
/// Constructed at startup and passed by reference to every command; there is
/// no global state.
#[derive(Debug)]
pub struct AppContext<B: StorageBackend + Clone = SqliteStorage> {
    pub session: SessionStore<B>,
    pub library: LibraryStore<B>,
    backend: B,
}

impl AppContext<SqliteStorage> {
    /// Open the SQLite database named by the configuration
    pub fn open(config: &Config) -> Result<Self> {
        let storage = match &config.storage.db_path {
            Some(path) => SqliteStorage::new_with_path(path)?,
            None => SqliteStorage::new()?,
        };
        tracing::debug!(db = %storage.db_path().display(), "Opening library database");
        Self::with_backend(storage)
    }
}

impl<B: StorageBackend + Clone> AppContext<B> {
    /// Load both stores from `backend`
    pub fn with_backend(backend: B) -> Result<Self> {
        Ok(Self {
            session: SessionStore::open(backend.clone())?,
            library: LibraryStore::open(backend.clone())?,
            backend,
        })
    }

    /// The shared storage backend
    pub fn backend(&self) -> &B {
        &self.backend
    }
}
