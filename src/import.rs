//! Bulk import of films from comma-separated text
//!
//! The format is deliberately simple: one header row, `,` as delimiter and no
//! quoting. Columns are located by header name, so their order is free.

use crate::error::{FilmshelfError, Result};
use crate::library::{FilmFields, LibraryStore};
use crate::storage::StorageBackend;

/// Header row plus one example row, printed by `import --template`
pub const TEMPLATE: &str = "Title,Director,Actors,Genre,ID Number,Year,Tags\n\
Film Title,Director Name,Actor1;Actor2,Genre,ID1,2023,tag1;tag2";

/// Rows that became films and the 1-based line numbers that were skipped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCsv {
    pub films: Vec<FilmFields>,
    pub skipped: Vec<usize>,
}

/// Result of importing into a library
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub added: usize,
    pub skipped: Vec<usize>,
}

/// Column positions found in the header row
#[derive(Debug)]
struct Columns {
    title: usize,
    director: usize,
    id_number: usize,
    actors: Option<usize>,
    genre: Option<usize>,
    year: Option<usize>,
    tags: Option<usize>,
}

impl Columns {
    fn from_header(header: &str) -> Result<Self> {
        let names: Vec<String> = header.split(',').map(|h| h.to_lowercase()).collect();
        let find = |needle: &str| names.iter().position(|name| name.contains(needle));

        match (find("title"), find("director"), find("id")) {
            (Some(title), Some(director), Some(id_number)) => Ok(Self {
                title,
                director,
                id_number,
                actors: find("actor"),
                genre: find("genre"),
                year: find("year"),
                tags: find("tag"),
            }),
            _ => Err(FilmshelfError::Import(
                "CSV must include title, director, and ID number columns".to_string(),
            )
            .into()),
        }
    }

    fn read(&self, values: &[&str]) -> Option<FilmFields> {
        if values.len() < 3 {
            return None;
        }

        let required = |index: usize| {
            values
                .get(index)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        let optional = |index: Option<usize>| index.and_then(required);

        Some(FilmFields {
            title: required(self.title)?,
            director: required(self.director)?,
            id_number: required(self.id_number)?,
            actors: optional(self.actors),
            genre: optional(self.genre),
            year: optional(self.year),
            tags: optional(self.tags).map(|tags| split_tags(&tags)).filter(|t| !t.is_empty()),
            image_url: None,
        })
    }
}

/// Tags inside a CSV cell are separated by `;`
fn split_tags(cell: &str) -> Vec<String> {
    cell.split(';')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse CSV text into film fields
///
/// Rows with fewer than three values or a blank title, director or catalog
/// number are skipped. Blank lines are ignored without being reported.
///
/// # Errors
///
/// Returns `FilmshelfError::Import` if the text is empty or the header lacks
/// a title, director or ID column.
pub fn parse_csv(text: &str) -> Result<ParsedCsv> {
    let mut lines = text.trim().lines();
    let header = lines
        .next()
        .filter(|h| !h.trim().is_empty())
        .ok_or_else(|| FilmshelfError::Import("No CSV data to import".to_string()))?;
    let columns = Columns::from_header(header)?;

    let mut parsed = ParsedCsv::default();
    for (index, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let line_number = index + 2;
        let values: Vec<&str> = line.split(',').collect();
        match columns.read(&values) {
            Some(fields) => parsed.films.push(fields),
            None => {
                tracing::warn!(line = line_number, "Skipping incomplete CSV row");
                parsed.skipped.push(line_number);
            }
        }
    }

    Ok(parsed)
}

/// Parse `text` and add every valid row to `library`
pub fn import_films<B: StorageBackend>(
    library: &mut LibraryStore<B>,
    text: &str,
) -> Result<ImportReport> {
    let parsed = parse_csv(text)?;

    let mut report = ImportReport {
        added: 0,
        skipped: parsed.skipped,
    };
    for fields in parsed.films {
        library.add_film(fields)?;
        report.added += 1;
    }

    tracing::info!(
        added = report.added,
        skipped = report.skipped.len(),
        "Imported films"
    );
    Ok(report)
}
