//! Search, sort, filter and statistics over film slices
//!
//! Everything here is a pure function of its inputs. The library store calls
//! into these with its own collection; callers can also chain them over any
//! result set (search, then filter, then sort).

use super::film::Film;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Estimated size of one film record, in MB
pub const UNIT_COST_MB: f64 = 2.0;

/// Nominal library capacity, in MB
pub const TOTAL_CAPACITY_MB: f64 = 10_000.0;

/// Genre reported when no film has a genre
pub const NO_GENRE: &str = "none";

const MILLIS_PER_DAY: i64 = 1000 * 60 * 60 * 24;

/// Keys accepted by [`sort_films`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Title,
    Director,
    Year,
    IdNumber,
    /// Newest first, unlike every other key
    DateAdded,
}

impl SortKey {
    /// All keys, in the order they are offered to users
    pub const ALL: [SortKey; 5] = [
        SortKey::Title,
        SortKey::Director,
        SortKey::Year,
        SortKey::IdNumber,
        SortKey::DateAdded,
    ];

    /// Parse the string form (`title`, `director`, `year`, `idNumber`, `dateAdded`)
    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Title => "title",
            SortKey::Director => "director",
            SortKey::Year => "year",
            SortKey::IdNumber => "idNumber",
            SortKey::DateAdded => "dateAdded",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Multi-criterion filter: every criterion that is set must match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilmFilter {
    /// Exact genre match
    #[serde(default)]
    pub genre: Option<String>,
    /// Exact year match
    #[serde(default)]
    pub year: Option<String>,
    /// Film must carry at least one of these tags
    #[serde(default)]
    pub tags: Vec<String>,
}

impl FilmFilter {
    /// True when no criterion would exclude anything
    pub fn is_empty(&self) -> bool {
        active(&self.genre).is_none() && active(&self.year).is_none() && self.tags.is_empty()
    }

    fn matches(&self, film: &Film) -> bool {
        if let Some(genre) = active(&self.genre) {
            if film.genre.as_deref() != Some(genre) {
                return false;
            }
        }

        if let Some(year) = active(&self.year) {
            if film.year.as_deref() != Some(year) {
                return false;
            }
        }

        if !self.tags.is_empty() {
            let Some(film_tags) = &film.tags else {
                return false;
            };
            if !self.tags.iter().any(|tag| film_tags.contains(tag)) {
                return false;
            }
        }

        true
    }
}

/// Single-category filter: exactly one category is active at a time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", content = "value", rename_all = "camelCase")]
pub enum CategoryFilter {
    Director(String),
    Actor(String),
    Genre(String),
    Year(String),
}

impl CategoryFilter {
    fn value(&self) -> &str {
        match self {
            CategoryFilter::Director(v)
            | CategoryFilter::Actor(v)
            | CategoryFilter::Genre(v)
            | CategoryFilter::Year(v) => v.trim(),
        }
    }

    fn matches(&self, film: &Film) -> bool {
        let wanted = self.value();
        if wanted.is_empty() {
            return true;
        }

        let wanted = wanted.to_lowercase();
        let same = |candidate: &str| candidate.trim().to_lowercase() == wanted;

        match self {
            CategoryFilter::Director(_) => same(film.director.as_str()),
            CategoryFilter::Actor(_) => film.actor_names().into_iter().any(same),
            CategoryFilter::Genre(_) => film.genre.as_deref().is_some_and(same),
            CategoryFilter::Year(_) => film.year.as_deref().is_some_and(same),
        }
    }
}

/// Most frequent genre and how many films carry it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreCount {
    pub genre: String,
    pub count: usize,
}

/// Aggregate numbers shown on the home screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryStats {
    pub total_films: usize,
    pub storage_used_percentage: u8,
    pub most_added_genre: GenreCount,
    pub days_since_last_added: u64,
}

fn active(criterion: &Option<String>) -> Option<&str> {
    criterion.as_deref().filter(|value| !value.is_empty())
}

/// Lowercase with diacritics stripped: "Éclair" folds to "eclair"
fn collation_key(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Accent- and case-insensitive comparison
///
/// Ties are broken by accents (unaccented first), then by case (lowercase
/// first), so the order is total.
fn locale_cmp(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

/// Case-insensitive substring search over title, director, actors and catalog number
///
/// A blank query returns the whole input. Result order follows the input.
pub fn search_films(films: &[Film], query: &str) -> Vec<Film> {
    if query.trim().is_empty() {
        return films.to_vec();
    }

    let needle = query.to_lowercase();
    films
        .iter()
        .filter(|film| {
            film.title.to_lowercase().contains(&needle)
                || film.director.to_lowercase().contains(&needle)
                || film
                    .actors
                    .as_deref()
                    .is_some_and(|actors| actors.to_lowercase().contains(&needle))
                || film.id_number.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Sort by a string key; unknown keys return the input order unchanged
pub fn sort_films(films: &[Film], key: &str) -> Vec<Film> {
    match SortKey::parse(key) {
        Some(key) => sort_films_by(films, key),
        None => films.to_vec(),
    }
}

/// Sort by a typed key. The sort is stable.
pub fn sort_films_by(films: &[Film], key: SortKey) -> Vec<Film> {
    let mut sorted = films.to_vec();
    match key {
        SortKey::Title => sorted.sort_by(|a, b| locale_cmp(&a.title, &b.title)),
        SortKey::Director => sorted.sort_by(|a, b| locale_cmp(&a.director, &b.director)),
        SortKey::Year => sorted.sort_by(|a, b| {
            locale_cmp(
                a.year.as_deref().unwrap_or(""),
                b.year.as_deref().unwrap_or(""),
            )
        }),
        SortKey::IdNumber => sorted.sort_by(|a, b| locale_cmp(&a.id_number, &b.id_number)),
        SortKey::DateAdded => sorted.sort_by(|a, b| b.date_added.cmp(&a.date_added)),
    }
    sorted
}

/// Keep films matching every set criterion of `filter`
pub fn filter_films(films: &[Film], filter: &FilmFilter) -> Vec<Film> {
    films
        .iter()
        .filter(|film| filter.matches(film))
        .cloned()
        .collect()
}

/// Keep films matching the single active category
pub fn filter_by_category(films: &[Film], filter: &CategoryFilter) -> Vec<Film> {
    films
        .iter()
        .filter(|film| filter.matches(film))
        .cloned()
        .collect()
}

/// Synthetic "storage used" gauge: `min(round(count * 2 / 10000 * 100), 100)`
pub fn storage_used_percentage(film_count: usize) -> u8 {
    let used = film_count as f64 * UNIT_COST_MB;
    let percentage = (used / TOTAL_CAPACITY_MB * 100.0).round();
    percentage.min(100.0) as u8
}

/// Genre with the highest count; ties go to the genre seen first
pub fn most_added_genre(films: &[Film]) -> GenreCount {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for genre in films
        .iter()
        .filter_map(|film| film.genre.as_deref())
        .filter(|genre| !genre.is_empty())
    {
        match counts.iter_mut().find(|(seen, _)| *seen == genre) {
            Some((_, count)) => *count += 1,
            None => counts.push((genre, 1)),
        }
    }

    let mut best = GenreCount {
        genre: NO_GENRE.to_string(),
        count: 0,
    };
    for (genre, count) in counts {
        if count > best.count {
            best = GenreCount {
                genre: genre.to_string(),
                count,
            };
        }
    }
    best
}

/// The `limit` most recently added films, newest first
pub fn recent_films(films: &[Film], limit: usize) -> Vec<Film> {
    let mut recent = sort_films_by(films, SortKey::DateAdded);
    recent.truncate(limit);
    recent
}

/// Whole days (rounded up) since the newest film was added; 0 when empty
pub fn days_since_last_added(films: &[Film], now: DateTime<Utc>) -> u64 {
    let Some(latest) = films.iter().map(|film| film.date_added).max() else {
        return 0;
    };

    let elapsed_ms = (now - latest).num_milliseconds().unsigned_abs();
    elapsed_ms.div_ceil(MILLIS_PER_DAY as u64)
}

/// Distinct non-empty genres in collection order
pub fn genres(films: &[Film]) -> Vec<String> {
    distinct(films.iter().filter_map(|film| film.genre.as_deref()))
}

/// Distinct non-empty years in collection order
pub fn years(films: &[Film]) -> Vec<String> {
    distinct(films.iter().filter_map(|film| film.year.as_deref()))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for value in values.filter(|v| !v.is_empty()) {
        if !seen.iter().any(|s| s == value) {
            seen.push(value.to_string());
        }
    }
    seen
}

/// All home-screen statistics in one pass over the collection
pub fn library_stats(films: &[Film], now: DateTime<Utc>) -> LibraryStats {
    LibraryStats {
        total_films: films.len(),
        storage_used_percentage: storage_used_percentage(films.len()),
        most_added_genre: most_added_genre(films),
        days_since_last_added: days_since_last_added(films, now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::film::FilmFields;
    use chrono::{Duration, TimeZone};

    fn film(title: &str, director: &str, id_number: &str) -> Film {
        Film::from_fields(
            FilmFields::new(title, director, id_number),
            Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
        )
    }

    fn with_genre(genre: &str) -> Film {
        let mut f = film("t", "d", "1");
        f.genre = Some(genre.to_string());
        f
    }

    fn titles(films: &[Film]) -> Vec<&str> {
        films.iter().map(|f| f.title.as_str()).collect()
    }

    #[test]
    fn test_sort_key_parse_roundtrip() {
        for key in SortKey::ALL {
            assert_eq!(SortKey::parse(key.as_str()), Some(key));
        }
        assert_eq!(SortKey::parse("rating"), None);
        assert_eq!(SortKey::parse("Title"), None);
    }

    #[test]
    fn test_search_blank_query_returns_everything() {
        let films = vec![film("Alien", "Ridley Scott", "1"), film("Heat", "Michael Mann", "2")];
        assert_eq!(search_films(&films, ""), films);
        assert_eq!(search_films(&films, "   "), films);
    }

    #[test]
    fn test_search_matches_each_field_case_insensitively() {
        let mut heat = film("Heat", "Michael Mann", "CAT-42");
        heat.actors = Some("Al Pacino; Robert De Niro".to_string());
        let alien = film("Alien", "Ridley Scott", "CAT-7");
        let films = vec![heat, alien];

        assert_eq!(titles(&search_films(&films, "hEaT")), vec!["Heat"]);
        assert_eq!(titles(&search_films(&films, "ridley")), vec!["Alien"]);
        assert_eq!(titles(&search_films(&films, "pacino")), vec!["Heat"]);
        assert_eq!(titles(&search_films(&films, "cat-")), vec!["Heat", "Alien"]);
        assert!(search_films(&films, "zzz").is_empty());
    }

    #[test]
    fn test_search_ignores_genre_and_tags() {
        let mut f = film("Alien", "Ridley Scott", "1");
        f.genre = Some("horror".to_string());
        f.tags = Some(vec!["space".to_string()]);
        assert!(search_films(&[f.clone()], "horror").is_empty());
        assert!(search_films(&[f], "space").is_empty());
    }

    #[test]
    fn test_sort_title_is_case_insensitive_ascending() {
        let films = vec![film("beta", "d", "1"), film("Alpha", "d", "2"), film("gamma", "d", "3")];
        assert_eq!(
            titles(&sort_films(&films, "title")),
            vec!["Alpha", "beta", "gamma"]
        );
    }

    #[test]
    fn test_sort_title_folds_accents() {
        let films = vec![
            film("Zodiac", "d", "1"),
            film("Éclair", "d", "2"),
            film("Amélie", "d", "3"),
            film("Amelie 2", "d", "4"),
            film("Apocalypse", "d", "5"),
        ];
        assert_eq!(
            titles(&sort_films(&films, "title")),
            vec!["Amélie", "Amelie 2", "Apocalypse", "Éclair", "Zodiac"]
        );
    }

    #[test]
    fn test_sort_title_accent_and_case_ties() {
        let films = vec![film("Émile", "d", "1"), film("emile", "d", "2"), film("Emile", "d", "3")];
        assert_eq!(
            titles(&sort_films(&films, "title")),
            vec!["emile", "Emile", "Émile"]
        );
    }

    #[test]
    fn test_sort_does_not_mutate_input() {
        let films = vec![film("b", "d", "1"), film("a", "d", "2")];
        let _ = sort_films(&films, "title");
        assert_eq!(titles(&films), vec!["b", "a"]);
    }

    #[test]
    fn test_sort_director_and_id_number() {
        let films = vec![film("x", "Zemeckis", "B2"), film("y", "anderson", "a1")];
        assert_eq!(titles(&sort_films(&films, "director")), vec!["y", "x"]);
        assert_eq!(titles(&sort_films(&films, "idNumber")), vec!["y", "x"]);
    }

    #[test]
    fn test_sort_year_puts_missing_first() {
        let mut a = film("a", "d", "1");
        a.year = Some("1999".to_string());
        let b = film("b", "d", "2");
        let mut c = film("c", "d", "3");
        c.year = Some("1984".to_string());
        assert_eq!(titles(&sort_films(&[a, b, c], "year")), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_sort_date_added_is_newest_first() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut old = film("old", "d", "1");
        old.date_added = base;
        let mut new = film("new", "d", "2");
        new.date_added = base + Duration::days(3);
        let mut mid = film("mid", "d", "3");
        mid.date_added = base + Duration::days(1);

        assert_eq!(
            titles(&sort_films(&[old, new, mid], "dateAdded")),
            vec!["new", "mid", "old"]
        );
    }

    #[test]
    fn test_sort_unknown_key_is_identity() {
        let films = vec![film("b", "d", "1"), film("a", "d", "2")];
        assert_eq!(sort_films(&films, "unknownKey"), films);
    }

    #[test]
    fn test_sort_ties_keep_lowercase_first() {
        let films = vec![film("Alien", "d", "1"), film("alien", "d", "2")];
        assert_eq!(titles(&sort_films(&films, "title")), vec!["alien", "Alien"]);
    }

    #[test]
    fn test_filter_empty_filter_keeps_all() {
        let films = vec![with_genre("drama"), film("x", "d", "1")];
        let filter = FilmFilter {
            genre: Some(String::new()),
            ..FilmFilter::default()
        };
        assert!(filter.is_empty());
        assert_eq!(filter_films(&films, &filter).len(), 2);
    }

    #[test]
    fn test_filter_genre_and_year_are_anded() {
        let mut a = with_genre("drama");
        a.year = Some("2001".to_string());
        let mut b = with_genre("drama");
        b.year = Some("2002".to_string());
        let mut c = with_genre("comedy");
        c.year = Some("2001".to_string());

        let filter = FilmFilter {
            genre: Some("drama".to_string()),
            year: Some("2001".to_string()),
            tags: vec![],
        };
        let result = filter_films(&[a.clone(), b, c], &filter);
        assert_eq!(result, vec![a]);
    }

    #[test]
    fn test_filter_genre_is_exact_match() {
        let filter = FilmFilter {
            genre: Some("Drama".to_string()),
            ..FilmFilter::default()
        };
        assert!(filter_films(&[with_genre("drama")], &filter).is_empty());
    }

    #[test]
    fn test_filter_tags_intersect() {
        let mut tagged = film("tagged", "d", "1");
        tagged.tags = Some(vec!["noir".to_string(), "classic".to_string()]);
        let mut other = film("other", "d", "2");
        other.tags = Some(vec!["modern".to_string()]);
        let untagged = film("untagged", "d", "3");

        let filter = FilmFilter {
            tags: vec!["classic".to_string(), "cult".to_string()],
            ..FilmFilter::default()
        };
        assert_eq!(
            titles(&filter_films(&[tagged, other, untagged], &filter)),
            vec!["tagged"]
        );
    }

    #[test]
    fn test_category_filter_director() {
        let films = vec![film("a", "Ridley Scott", "1"), film("b", "Tony Scott", "2")];
        let result = filter_by_category(&films, &CategoryFilter::Director("ridley scott".into()));
        assert_eq!(titles(&result), vec!["a"]);
    }

    #[test]
    fn test_category_filter_actor_matches_one_entry() {
        let mut heat = film("Heat", "Michael Mann", "1");
        heat.actors = Some("Al Pacino, Robert De Niro".to_string());
        let mut other = film("Other", "x", "2");
        other.actors = Some("Al Pacino Jr".to_string());

        let result =
            filter_by_category(&[heat, other], &CategoryFilter::Actor("robert de niro".into()));
        assert_eq!(titles(&result), vec!["Heat"]);
    }

    #[test]
    fn test_category_filter_genre_and_year() {
        let mut a = with_genre("Horror");
        a.year = Some("1979".to_string());
        let b = with_genre("comedy");

        assert_eq!(
            filter_by_category(&[a.clone(), b.clone()], &CategoryFilter::Genre("horror".into())),
            vec![a.clone()]
        );
        assert_eq!(
            filter_by_category(&[a.clone(), b], &CategoryFilter::Year("1979".into())),
            vec![a]
        );
    }

    #[test]
    fn test_category_filter_blank_value_passes_everything() {
        let films = vec![film("a", "d", "1"), film("b", "e", "2")];
        assert_eq!(
            filter_by_category(&films, &CategoryFilter::Director("  ".into())).len(),
            2
        );
    }

    #[test]
    fn test_storage_percentage_rounds_and_clamps() {
        assert_eq!(storage_used_percentage(0), 0);
        assert_eq!(storage_used_percentage(24), 0);
        assert_eq!(storage_used_percentage(25), 1);
        assert_eq!(storage_used_percentage(50), 1);
        assert_eq!(storage_used_percentage(5000), 100);
        assert_eq!(storage_used_percentage(5001), 100);
        assert_eq!(storage_used_percentage(100_000), 100);
    }

    #[test]
    fn test_most_added_genre_counts() {
        let films = vec![with_genre("drama"), with_genre("drama"), with_genre("comedy")];
        assert_eq!(
            most_added_genre(&films),
            GenreCount {
                genre: "drama".to_string(),
                count: 2
            }
        );
    }

    #[test]
    fn test_most_added_genre_empty_is_none() {
        assert_eq!(
            most_added_genre(&[]),
            GenreCount {
                genre: "none".to_string(),
                count: 0
            }
        );
        assert_eq!(most_added_genre(&[film("a", "d", "1")]).genre, "none");
    }

    #[test]
    fn test_most_added_genre_tie_goes_to_first_seen() {
        let films = vec![
            with_genre("comedy"),
            with_genre("drama"),
            with_genre("drama"),
            with_genre("comedy"),
        ];
        assert_eq!(most_added_genre(&films).genre, "comedy");
    }

    #[test]
    fn test_recent_films_limits_and_orders() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let films: Vec<Film> = (0..7)
            .map(|i| {
                let mut f = film(&format!("f{}", i), "d", "1");
                f.date_added = base + Duration::days(i);
                f
            })
            .collect();

        let recent = recent_films(&films, 5);
        assert_eq!(titles(&recent), vec!["f6", "f5", "f4", "f3", "f2"]);
    }

    #[test]
    fn test_days_since_last_added_rounds_up() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut f = film("a", "d", "1");
        f.date_added = base;

        assert_eq!(days_since_last_added(&[], base), 0);
        assert_eq!(days_since_last_added(&[f.clone()], base), 0);
        assert_eq!(days_since_last_added(&[f.clone()], base + Duration::hours(1)), 1);
        assert_eq!(days_since_last_added(&[f], base + Duration::hours(49)), 3);
    }

    #[test]
    fn test_genres_and_years_are_distinct_in_order() {
        let mut a = with_genre("drama");
        a.year = Some("2000".to_string());
        let mut b = with_genre("comedy");
        b.year = Some("2000".to_string());
        let c = with_genre("drama");

        let films = vec![a, b, c];
        assert_eq!(genres(&films), vec!["drama", "comedy"]);
        assert_eq!(years(&films), vec!["2000"]);
    }

    #[test]
    fn test_library_stats_combines_metrics() {
        let now = Utc.with_ymd_and_hms(2024, 1, 3, 12, 0, 0).unwrap();
        let films = vec![with_genre("drama")];
        let stats = library_stats(&films, now);
        assert_eq!(stats.total_films, 1);
        assert_eq!(stats.storage_used_percentage, 0);
        assert_eq!(stats.most_added_genre.genre, "drama");
        assert_eq!(stats.days_since_last_added, 2);
    }
}
