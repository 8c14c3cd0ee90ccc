//! Error types for Filmshelf
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Filmshelf operations
///
/// Credential outcomes (`UserAlreadyExists`, `InvalidCredentials`) are
/// ordinary results of the session store. Persistence faults surface as
/// `Storage` and are never retried.
#[derive(Error, Debug)]
pub enum FilmshelfError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Signup attempted with a username that is already registered
    #[error("User already exists: {0}")]
    UserAlreadyExists(String),

    /// Login attempted with an unknown username or a wrong password
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// An operation needs an authenticated session
    #[error("Not logged in. Use `filmshelf login` or `filmshelf signup` first")]
    NotLoggedIn,

    /// Required film fields are missing
    #[error("Missing required fields: {0}")]
    Validation(String),

    /// A film id given on the command line does not exist
    #[error("Film not found: {0}")]
    FilmNotFound(String),

    /// CSV bulk import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Poster image errors (unsupported format, bad URL)
    #[error("Image error: {0}")]
    Image(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Persisted storage errors (database operations)
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type alias for Filmshelf operations
///
/// Uses `anyhow::Error` so callers get context chains; branch on a specific
/// outcome with `err.downcast_ref::<FilmshelfError>()`.
pub type Result<T> = anyhow::Result<T>;
