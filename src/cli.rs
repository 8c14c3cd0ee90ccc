//! Command-line interface definition for Filmshelf
//!
//! This module defines the CLI structure using clap's derive API. The same
//! grammar is reused by the interactive shell, one line at a time.

use crate::library::{parse_tags, CategoryFilter, FilmFields, FilmFilter};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Filmshelf - a personal film library in your terminal
///
/// Catalog films, search and filter them, and see collection statistics.
#[derive(Parser, Debug, Clone)]
#[command(name = "filmshelf")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Library database path (overrides config and FILMSHELF_DB)
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Filmshelf
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Create an account and log in
    Signup {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },

    /// Log in to an existing account
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,

        /// Stay logged in across runs
        #[arg(short, long)]
        remember: bool,
    },

    /// Log out and forget the remembered session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Add a film to the library
    Add(FilmArgs),

    /// Change fields of an existing film
    Edit {
        /// Film id
        id: String,

        #[command(flatten)]
        changes: FilmChanges,
    },

    /// Remove a film from the library
    Delete {
        /// Film id
        id: String,
    },

    /// Show every field of one film
    Show {
        /// Film id
        id: String,
    },

    /// List films, optionally searched, filtered and sorted
    List(ListArgs),

    /// Search films and remember the query
    Search {
        /// Text matched against title, director, actors and catalog number
        query: String,
    },

    /// Recent searches and recently added films
    Recent,

    /// Collection statistics
    Stats,

    /// Import films from a CSV file
    Import {
        /// CSV file with a header row
        #[arg(required_unless_present = "template")]
        file: Option<PathBuf>,

        /// Print a CSV template instead of importing
        #[arg(long, conflicts_with = "file")]
        template: bool,
    },

    /// Show what is stored in the library database
    Storage,

    /// Start an interactive shell
    Shell,
}

impl Commands {
    /// Subcommand name as typed, safe to log (no credentials)
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Signup { .. } => "signup",
            Commands::Login { .. } => "login",
            Commands::Logout => "logout",
            Commands::Whoami => "whoami",
            Commands::Add(_) => "add",
            Commands::Edit { .. } => "edit",
            Commands::Delete { .. } => "delete",
            Commands::Show { .. } => "show",
            Commands::List(_) => "list",
            Commands::Search { .. } => "search",
            Commands::Recent => "recent",
            Commands::Stats => "stats",
            Commands::Import { .. } => "import",
            Commands::Storage => "storage",
            Commands::Shell => "shell",
        }
    }
}

/// Fields for a new film
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct FilmArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub director: String,

    /// Catalog number
    #[arg(long)]
    pub id_number: String,

    /// Actor names separated by `;` or `,`
    #[arg(long)]
    pub actors: Option<String>,

    #[arg(long)]
    pub year: Option<String>,

    #[arg(long)]
    pub genre: Option<String>,

    /// Comma-separated tags
    #[arg(long)]
    pub tags: Option<String>,

    /// Poster image file or http(s) URL
    #[arg(long)]
    pub image: Option<String>,
}

impl FilmArgs {
    /// Film fields without the poster, which needs resolving first
    pub fn to_fields(&self) -> FilmFields {
        FilmFields {
            title: self.title.clone(),
            director: self.director.clone(),
            id_number: self.id_number.clone(),
            actors: non_blank(self.actors.as_deref()),
            year: non_blank(self.year.as_deref()),
            genre: non_blank(self.genre.as_deref()),
            tags: self.tags.as_deref().map(parse_tags),
            image_url: None,
        }
    }
}

/// Field changes for `edit`; an empty value clears an optional field
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct FilmChanges {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub director: Option<String>,

    #[arg(long)]
    pub id_number: Option<String>,

    #[arg(long)]
    pub actors: Option<String>,

    #[arg(long)]
    pub year: Option<String>,

    #[arg(long)]
    pub genre: Option<String>,

    #[arg(long)]
    pub tags: Option<String>,

    /// Poster image file or http(s) URL
    #[arg(long)]
    pub image: Option<String>,
}

impl FilmChanges {
    /// Apply the text changes to `fields`; the poster is handled by the caller
    pub fn apply(&self, mut fields: FilmFields) -> FilmFields {
        if let Some(title) = &self.title {
            fields.title = title.clone();
        }
        if let Some(director) = &self.director {
            fields.director = director.clone();
        }
        if let Some(id_number) = &self.id_number {
            fields.id_number = id_number.clone();
        }
        if let Some(actors) = &self.actors {
            fields.actors = non_blank(Some(actors));
        }
        if let Some(year) = &self.year {
            fields.year = non_blank(Some(year));
        }
        if let Some(genre) = &self.genre {
            fields.genre = non_blank(Some(genre));
        }
        if let Some(tags) = &self.tags {
            let tags = parse_tags(tags);
            fields.tags = if tags.is_empty() { None } else { Some(tags) };
        }
        fields
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Options for `list`
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ListArgs {
    /// Only films matching this text
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort key: title, director, year, idNumber or dateAdded
    #[arg(long)]
    pub sort: Option<String>,

    /// Exact genre
    #[arg(long)]
    pub genre: Option<String>,

    /// Exact year
    #[arg(long)]
    pub year: Option<String>,

    /// Films carrying any of these tags (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Browse by director (case-insensitive)
    #[arg(long, group = "category")]
    pub director: Option<String>,

    /// Browse by actor (case-insensitive)
    #[arg(long, group = "category")]
    pub actor: Option<String>,

    /// Browse by genre (case-insensitive)
    #[arg(long, group = "category")]
    pub by_genre: Option<String>,

    /// Browse by year
    #[arg(long, group = "category")]
    pub by_year: Option<String>,
}

impl ListArgs {
    pub fn film_filter(&self) -> FilmFilter {
        FilmFilter {
            genre: self.genre.clone(),
            year: self.year.clone(),
            tags: self.tags.clone(),
        }
    }

    /// The single browse category, if one was given
    pub fn category_filter(&self) -> Option<CategoryFilter> {
        if let Some(director) = &self.director {
            Some(CategoryFilter::Director(director.clone()))
        } else if let Some(actor) = &self.actor {
            Some(CategoryFilter::Actor(actor.clone()))
        } else if let Some(genre) = &self.by_genre {
            Some(CategoryFilter::Genre(genre.clone()))
        } else {
            self.by_year.clone().map(CategoryFilter::Year)
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            db: None,
            verbose: false,
            command: Commands::Whoami,
        }
    }
}
