use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata for a persisted key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEntry {
    /// Storage key (`films`, `recentSearches`, `user`, `users`)
    pub key: String,
    /// When the key was last written
    pub updated_at: DateTime<Utc>,
    /// Size of the serialized value in bytes
    pub size_bytes: usize,
}
