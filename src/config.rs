//! Configuration management for Filmshelf
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{FilmshelfError, Result};
use crate::library::SortKey;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for Filmshelf
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Where the library database lives
    #[serde(default)]
    pub storage: StorageConfig,
    /// Library display defaults
    #[serde(default)]
    pub library: LibraryConfig,
}

/// Storage configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Database file path. `None` uses the platform data directory.
    #[serde(default)]
    pub db_path: Option<PathBuf>,
}

/// Library display defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Sort key used by `list` when none is given
    #[serde(default = "default_sort")]
    pub default_sort: String,

    /// Number of recently added films shown by `recent`
    #[serde(default = "default_recent_films")]
    pub recent_films: usize,
}

fn default_sort() -> String {
    SortKey::Title.as_str().to_string()
}

fn default_recent_films() -> usize {
    5
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            default_sort: default_sort(),
            recent_films: default_recent_films(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Returns
    ///
    /// Returns the loaded and merged configuration
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| FilmshelfError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| FilmshelfError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(db_path) = std::env::var("FILMSHELF_DB") {
            tracing::debug!(db_path = %db_path, "Env override: FILMSHELF_DB");
            self.storage.db_path = Some(PathBuf::from(db_path));
        }

        if let Ok(sort) = std::env::var("FILMSHELF_DEFAULT_SORT") {
            tracing::debug!(sort = %sort, "Env override: FILMSHELF_DEFAULT_SORT");
            self.library.default_sort = sort;
        }

        if let Ok(recent) = std::env::var("FILMSHELF_RECENT_FILMS") {
            match recent.parse::<usize>() {
                Ok(v) => {
                    self.library.recent_films = v;
                    tracing::debug!(recent_films = v, "Env override: FILMSHELF_RECENT_FILMS");
                }
                Err(_) => {
                    tracing::warn!("Invalid value for FILMSHELF_RECENT_FILMS: {}", recent);
                }
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(db) = &cli.db {
            self.storage.db_path = Some(db.clone());
            tracing::debug!(db = %db.display(), "CLI override: --db");
        }

        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `FilmshelfError::Config` for an unknown default sort key or an
    /// out-of-range recent film count
    pub fn validate(&self) -> Result<()> {
        if SortKey::parse(&self.library.default_sort).is_none() {
            let valid: Vec<&str> = SortKey::ALL.iter().map(|k| k.as_str()).collect();
            return Err(FilmshelfError::Config(format!(
                "Invalid default_sort: {}. Must be one of: {}",
                self.library.default_sort,
                valid.join(", ")
            ))
            .into());
        }

        if self.library.recent_films == 0 {
            return Err(FilmshelfError::Config(
                "library.recent_films must be greater than 0".to_string(),
            )
            .into());
        }

        if self.library.recent_films > 100 {
            return Err(FilmshelfError::Config(
                "library.recent_films must be less than or equal to 100".to_string(),
            )
            .into());
        }

        Ok(())
    }
}
