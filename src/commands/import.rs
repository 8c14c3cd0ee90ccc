//! CSV import command

use crate::app::AppContext;
use crate::error::{FilmshelfError, Result};
use crate::import::{import_films, TEMPLATE};
use crate::storage::StorageBackend;
use anyhow::Context;
use colored::Colorize;
use std::path::Path;

pub fn print_template() {
    println!("{}", TEMPLATE);
}

/// Import films from the CSV file at `path`
pub fn import_file<B: StorageBackend + Clone>(
    app: &mut AppContext<B>,
    path: Option<&Path>,
) -> Result<()> {
    app.session.require_user()?;

    let path = path.ok_or_else(|| {
        FilmshelfError::Import("No CSV file given; use --template for an example".to_string())
    })?;
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read CSV file {}", path.display()))?;

    let report = import_films(&mut app.library, &text)?;
    println!(
        "{}",
        format!("Added {} films to your library", report.added).green()
    );
    if !report.skipped.is_empty() {
        let lines: Vec<String> = report.skipped.iter().map(|l| l.to_string()).collect();
        println!(
            "{}",
            format!(
                "Skipped {} incomplete rows (lines {})",
                report.skipped.len(),
                lines.join(", ")
            )
            .yellow()
        );
    }
    Ok(())
}
