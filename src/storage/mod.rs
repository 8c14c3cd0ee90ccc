//! Durable key-value storage for the library and session stores
//!
//! Every store keeps its state in memory and writes whole values through a
//! [`StorageBackend`] after each mutation. Values are JSON documents keyed by
//! the names in [`keys`].

use crate::error::{FilmshelfError, Result};
use anyhow::Context;
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub mod types;
pub use types::StoredEntry;

/// Keys under which the stores persist their state
pub mod keys {
    /// Full film collection
    pub const FILMS: &str = "films";
    /// Recent search list, most recent first
    pub const RECENT_SEARCHES: &str = "recentSearches";
    /// Remembered session
    pub const USER: &str = "user";
    /// Credential registry
    pub const USERS: &str = "users";
}

/// A process-wide key-value store holding serialized values
pub trait StorageBackend {
    /// Read the raw value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// List every stored key with its metadata, ordered by key
    fn keys(&self) -> Result<Vec<StoredEntry>>;
}

/// Read and deserialize the JSON value stored under `key`
///
/// Returns `Ok(None)` when the key is absent.
pub fn load_json<T, B>(backend: &B, key: &str) -> Result<Option<T>>
where
    T: DeserializeOwned,
    B: StorageBackend + ?Sized,
{
    match backend.get(key)? {
        Some(raw) => {
            let value = serde_json::from_str(&raw)
                .with_context(|| format!("Failed to deserialize stored value for '{}'", key))?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

/// Serialize `value` as JSON and store it under `key`
pub fn save_json<T, B>(backend: &B, key: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    B: StorageBackend + ?Sized,
{
    let raw = serde_json::to_string(value)
        .with_context(|| format!("Failed to serialize value for '{}'", key))?;
    backend.set(key, &raw)?;
    tracing::debug!(key, bytes = raw.len(), "Persisted value");
    Ok(())
}

/// Default database location in the user's data directory
///
/// Resolves to `<data dir>/library.db`, e.g. `~/.local/share/filmshelf/library.db`
/// on Linux.
pub fn default_db_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "filmshelf", "filmshelf")
        .ok_or_else(|| FilmshelfError::Storage("Could not determine data directory".into()))?;
    Ok(proj_dirs.data_dir().join("library.db"))
}

/// SQLite-backed storage
///
/// Each call opens its own connection, so the value is cheap to clone and
/// share between the stores of one process.
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    db_path: PathBuf,
}

impl SqliteStorage {
    /// Create a storage instance in the user's data directory
    pub fn new() -> Result<Self> {
        Self::new_with_path(default_db_path()?)
    }

    /// Create a storage instance that uses the specified database path.
    ///
    /// Missing parent directories are created.
    ///
    /// # Examples
    ///
    /// ```
    /// use filmshelf::storage::SqliteStorage;
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let storage = SqliteStorage::new_with_path(dir.path().join("library.db")).unwrap();
    /// assert!(storage.db_path().ends_with("library.db"));
    /// ```
    pub fn new_with_path<P: Into<PathBuf>>(db_path: P) -> Result<Self> {
        let db_path = db_path.into();

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .context("Failed to create parent directory for database")
                    .map_err(|e| FilmshelfError::Storage(e.to_string()))?;
            }
        }

        let storage = Self { db_path };
        storage.init()?;
        Ok(storage)
    }

    /// Path of the underlying database file
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn open(&self) -> Result<Connection> {
        let conn = Connection::open(&self.db_path)
            .context("Failed to open database")
            .map_err(|e| FilmshelfError::Storage(e.to_string()))?;
        Ok(conn)
    }

    /// Initialize the database schema
    fn init(&self) -> Result<()> {
        let conn = self.open()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )
        .context("Failed to create tables")
        .map_err(|e| FilmshelfError::Storage(e.to_string()))?;

        Ok(())
    }
}

impl StorageBackend for SqliteStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.open()?;

        let value = conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .context("Failed to query value")
            .map_err(|e| FilmshelfError::Storage(e.to_string()))?;

        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.open()?;
        let now = Utc::now().to_rfc3339();

        conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now],
        )
        .context("Failed to write value")
        .map_err(|e| FilmshelfError::Storage(e.to_string()))?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let conn = self.open()?;

        conn.execute("DELETE FROM kv_store WHERE key = ?", params![key])
            .context("Failed to delete value")
            .map_err(|e| FilmshelfError::Storage(e.to_string()))?;

        Ok(())
    }

    fn keys(&self) -> Result<Vec<StoredEntry>> {
        let conn = self.open()?;

        let mut stmt = conn
            .prepare(
                "SELECT key, updated_at, length(CAST(value AS BLOB)) \
                 FROM kv_store ORDER BY key",
            )
            .context("Failed to prepare statement")
            .map_err(|e| FilmshelfError::Storage(e.to_string()))?;

        let rows = stmt
            .query_map([], |row| {
                let key: String = row.get(0)?;
                let updated_at_str: String = row.get(1)?;
                let size: i64 = row.get(2)?;

                let updated_at = DateTime::parse_from_rfc3339(&updated_at_str)
                    .map(|dt| dt.with_timezone(&Utc))
                    .unwrap_or_else(|_| Utc::now());

                Ok(StoredEntry {
                    key,
                    updated_at,
                    size_bytes: usize::try_from(size).unwrap_or(0),
                })
            })
            .context("Failed to query keys")
            .map_err(|e| FilmshelfError::Storage(e.to_string()))?;

        let mut entries = Vec::new();
        for entry in rows {
            entries.push(entry.map_err(|e| FilmshelfError::Storage(e.to_string()))?);
        }

        Ok(entries)
    }
}

/// In-memory storage for tests and throwaway runs
///
/// Clones share the same map, so a second store built from a clone sees
/// everything the first one persisted. That is how a restart is simulated.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<BTreeMap<String, (String, DateTime<Utc>)>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .entries
            .borrow()
            .get(key)
            .map(|(value, _)| value.clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), (value.to_string(), Utc::now()));
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<StoredEntry>> {
        Ok(self
            .entries
            .borrow()
            .iter()
            .map(|(key, (value, updated_at))| StoredEntry {
                key: key.clone(),
                updated_at: *updated_at,
                size_bytes: value.len(),
            })
            .collect())
    }
}
