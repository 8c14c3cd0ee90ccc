//! Film library: records, query logic and the persistent library store
//!
//! - `film`: the `Film` record, caller-supplied `FilmFields`, tag parsing
//! - `query`: pure search / sort / filter / statistics functions
//! - `store`: `LibraryStore`, which owns the collection and recent searches

pub mod film;
pub mod query;
pub mod store;

pub use film::{new_film_id, parse_tags, Film, FilmFields};
pub use query::{CategoryFilter, FilmFilter, GenreCount, LibraryStats, SortKey};
pub use store::{record_search, LibraryStore, MAX_RECENT_SEARCHES};
