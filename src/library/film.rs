//! Film records and the fields a caller supplies to create one

use crate::error::{FilmshelfError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One catalog entry in the library
///
/// `id` and `date_added` are assigned by the library store and never change.
/// Serialized with camelCase keys (`idNumber`, `imageUrl`, `dateAdded`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Film {
    pub id: String,
    pub title: String,
    pub director: String,
    /// Catalog number, not required to be unique
    pub id_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actors: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Poster as a data URI or a remote URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub date_added: DateTime<Utc>,
}

impl Film {
    /// Build a record from caller-supplied fields with a fresh id
    pub fn from_fields(fields: FilmFields, date_added: DateTime<Utc>) -> Self {
        Self {
            id: new_film_id(),
            title: fields.title,
            director: fields.director,
            id_number: fields.id_number,
            actors: fields.actors,
            year: fields.year,
            genre: fields.genre,
            tags: fields.tags,
            image_url: fields.image_url,
            date_added,
        }
    }

    /// The editable part of this record
    pub fn fields(&self) -> FilmFields {
        FilmFields {
            title: self.title.clone(),
            director: self.director.clone(),
            id_number: self.id_number.clone(),
            actors: self.actors.clone(),
            year: self.year.clone(),
            genre: self.genre.clone(),
            tags: self.tags.clone(),
            image_url: self.image_url.clone(),
        }
    }

    /// Copy of this record with its editable fields replaced
    ///
    /// `id` and `date_added` are carried over unchanged.
    pub fn with_fields(&self, fields: FilmFields) -> Self {
        Self {
            id: self.id.clone(),
            title: fields.title,
            director: fields.director,
            id_number: fields.id_number,
            actors: fields.actors,
            year: fields.year,
            genre: fields.genre,
            tags: fields.tags,
            image_url: fields.image_url,
            date_added: self.date_added,
        }
    }

    /// Individual actor names split on `;` or `,`
    pub fn actor_names(&self) -> Vec<&str> {
        self.actors
            .as_deref()
            .map(|actors| {
                actors
                    .split([';', ','])
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Everything about a film except its id and date added
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmFields {
    pub title: String,
    pub director: String,
    pub id_number: String,
    #[serde(default)]
    pub actors: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl FilmFields {
    /// Fields with only the required values set
    pub fn new(
        title: impl Into<String>,
        director: impl Into<String>,
        id_number: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            director: director.into(),
            id_number: id_number.into(),
            ..Self::default()
        }
    }

    /// Check that title, director and catalog number are non-blank
    ///
    /// The library store accepts whatever it is given, so callers run this
    /// before `add_film` / `update_film`.
    ///
    /// # Errors
    ///
    /// Returns `FilmshelfError::Validation` naming every missing field.
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&str> = [
            ("title", &self.title),
            ("director", &self.director),
            ("id number", &self.id_number),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(FilmshelfError::Validation(missing.join(", ")).into())
        }
    }
}

/// Generate a new opaque film id
pub fn new_film_id() -> String {
    Uuid::new_v4().to_string()
}

/// Split comma-separated tag input into trimmed, non-empty tags
///
/// # Examples
///
/// ```
/// use filmshelf::library::parse_tags;
///
/// assert_eq!(parse_tags(" noir, classic ,,"), vec!["noir", "classic"]);
/// ```
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
