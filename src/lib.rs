//! Filmshelf - personal film library
//!
//! This library provides the core functionality for Filmshelf: a local
//! account registry, a persistent film collection with search, sort, filter
//! and statistics, and the command-line front end built on top of them.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `session`: Accounts, login/logout and the current session
//! - `library`: Film records, query logic and the library store
//! - `storage`: Key-value persistence (SQLite, in-memory)
//! - `app`: The application context holding both stores
//! - `import`: CSV bulk import
//! - `poster`: Poster images as data URIs or remote URLs
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//! - `commands`: Command handlers
//!
//! # Example
//!
//! ```
//! use filmshelf::library::FilmFields;
//! use filmshelf::storage::MemoryStorage;
//! use filmshelf::AppContext;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut app = AppContext::with_backend(MemoryStorage::new())?;
//! app.session.signup("ana", "secret")?;
//! app.library.add_film(FilmFields::new("Metropolis", "Fritz Lang", "F-001"))?;
//!
//! assert_eq!(app.library.search_films("lang").len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod import;
pub mod library;
pub mod poster;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use app::AppContext;
pub use config::Config;
pub use error::{FilmshelfError, Result};
pub use library::{Film, FilmFields, LibraryStore};
pub use session::{Session, SessionStore};

#[cfg(test)]
pub mod test_utils;
