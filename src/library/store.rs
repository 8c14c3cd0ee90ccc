//! The library store: owner of the film collection and recent searches

use super::film::{Film, FilmFields};
use super::query::{self, CategoryFilter, FilmFilter, GenreCount, LibraryStats};
use crate::error::Result;
use crate::storage::{keys, load_json, save_json, StorageBackend};
use chrono::{DateTime, Utc};

/// Maximum number of entries kept in the recent search list
pub const MAX_RECENT_SEARCHES: usize = 5;

/// Film collection plus recent-search list, written through to a storage backend
///
/// State is loaded once in [`LibraryStore::open`]. Each mutation changes the
/// in-memory state first and then persists the affected key; a persistence
/// failure is returned to the caller and not retried. Films are handed out
/// as clones.
///
/// # Examples
///
/// ```
/// use filmshelf::library::{FilmFields, LibraryStore};
/// use filmshelf::storage::MemoryStorage;
///
/// # fn main() -> filmshelf::error::Result<()> {
/// let mut library = LibraryStore::open(MemoryStorage::new())?;
/// let film = library.add_film(FilmFields::new("Alien", "Ridley Scott", "F-001"))?;
/// assert_eq!(library.get_film_by_id(&film.id), Some(film));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct LibraryStore<B: StorageBackend> {
    backend: B,
    films: Vec<Film>,
    recent_searches: Vec<String>,
}

impl<B: StorageBackend> LibraryStore<B> {
    /// Load the persisted collection and recent searches
    ///
    /// Missing keys start out empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read or a stored value is corrupt
    pub fn open(backend: B) -> Result<Self> {
        let films: Vec<Film> = load_json(&backend, keys::FILMS)?.unwrap_or_default();
        let recent_searches: Vec<String> =
            load_json(&backend, keys::RECENT_SEARCHES)?.unwrap_or_default();

        tracing::debug!(
            films = films.len(),
            recent_searches = recent_searches.len(),
            "Loaded library"
        );

        Ok(Self {
            backend,
            films,
            recent_searches,
        })
    }

    /// Snapshot of the whole collection, most recently added first
    pub fn films(&self) -> Vec<Film> {
        self.films.clone()
    }

    pub fn len(&self) -> usize {
        self.films.len()
    }

    pub fn is_empty(&self) -> bool {
        self.films.is_empty()
    }

    /// Create a film with a fresh id and the current time, at the front of the collection
    ///
    /// Fields are stored as given; run [`FilmFields::validate`] first.
    pub fn add_film(&mut self, fields: FilmFields) -> Result<Film> {
        let film = Film::from_fields(fields, Utc::now());
        self.films.insert(0, film.clone());
        tracing::debug!(id = %film.id, title = %film.title, "Added film");

        self.persist_films()?;
        Ok(film)
    }

    /// Remove the film with `id`; unknown ids are a no-op
    pub fn delete_film(&mut self, id: &str) -> Result<()> {
        let before = self.films.len();
        self.films.retain(|film| film.id != id);
        tracing::debug!(id, removed = before - self.films.len(), "Deleted film");

        self.persist_films()
    }

    /// Replace the film whose id matches `film.id`, keeping its position
    ///
    /// Unknown ids are a no-op.
    pub fn update_film(&mut self, film: Film) -> Result<()> {
        match self.films.iter_mut().find(|existing| existing.id == film.id) {
            Some(existing) => {
                tracing::debug!(id = %film.id, "Updated film");
                *existing = film;
            }
            None => tracing::debug!(id = %film.id, "Update skipped, no such film"),
        }

        self.persist_films()
    }

    pub fn get_film_by_id(&self, id: &str) -> Option<Film> {
        self.films.iter().find(|film| film.id == id).cloned()
    }

    /// Case-insensitive search over the whole collection; blank queries return everything
    pub fn search_films(&self, query: &str) -> Vec<Film> {
        query::search_films(&self.films, query)
    }

    /// Sort `films` by `key` without touching the collection
    pub fn sort_films(&self, films: &[Film], key: &str) -> Vec<Film> {
        query::sort_films(films, key)
    }

    /// Multi-criterion filter (genre AND year AND any-of-tags)
    pub fn filter_films(&self, films: &[Film], filter: &FilmFilter) -> Vec<Film> {
        query::filter_films(films, filter)
    }

    /// Single-category filter (director, actor, genre or year)
    pub fn filter_by_category(&self, films: &[Film], filter: &CategoryFilter) -> Vec<Film> {
        query::filter_by_category(films, filter)
    }

    /// Record a submitted search query
    ///
    /// Blank queries are ignored. A repeated query moves to the front.
    pub fn add_search(&mut self, query: &str) -> Result<()> {
        match record_search(&self.recent_searches, query) {
            Some(updated) => {
                self.recent_searches = updated;
                self.persist_recent_searches()
            }
            None => Ok(()),
        }
    }

    /// Recent search queries, most recent first
    pub fn recent_searches(&self) -> Vec<String> {
        self.recent_searches.clone()
    }

    pub fn get_storage_used_percentage(&self) -> u8 {
        query::storage_used_percentage(self.films.len())
    }

    pub fn get_most_added_genre(&self) -> GenreCount {
        query::most_added_genre(&self.films)
    }

    /// The `limit` newest films by date added
    pub fn recent_films(&self, limit: usize) -> Vec<Film> {
        query::recent_films(&self.films, limit)
    }

    pub fn days_since_last_added(&self, now: DateTime<Utc>) -> u64 {
        query::days_since_last_added(&self.films, now)
    }

    /// Distinct genres in the collection
    pub fn genres(&self) -> Vec<String> {
        query::genres(&self.films)
    }

    /// Distinct years in the collection
    pub fn years(&self) -> Vec<String> {
        query::years(&self.films)
    }

    pub fn library_stats(&self, now: DateTime<Utc>) -> LibraryStats {
        query::library_stats(&self.films, now)
    }

    fn persist_films(&self) -> Result<()> {
        save_json(&self.backend, keys::FILMS, &self.films)
    }

    fn persist_recent_searches(&self) -> Result<()> {
        save_json(&self.backend, keys::RECENT_SEARCHES, &self.recent_searches)
    }
}

/// New recent-search list after submitting `query`, or `None` if it is blank
///
/// The trimmed query goes to the front, any equal entry is dropped and the
/// list is cut to [`MAX_RECENT_SEARCHES`].
pub fn record_search(searches: &[String], query: &str) -> Option<Vec<String>> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    let mut updated = Vec::with_capacity(MAX_RECENT_SEARCHES);
    updated.push(query.to_string());
    updated.extend(searches.iter().filter(|s| *s != query).cloned());
    updated.truncate(MAX_RECENT_SEARCHES);
    Some(updated)
}
