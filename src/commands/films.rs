//! Film commands: add, edit, delete, show, list, search

use crate::app::AppContext;
use crate::cli::{FilmArgs, FilmChanges, ListArgs};
use crate::config::Config;
use crate::error::{FilmshelfError, Result};
use crate::library::{Film, LibraryStore};
use crate::poster;
use crate::storage::StorageBackend;
use colored::Colorize;
use prettytable::{format, Table};

const TITLE_WIDTH: usize = 40;

/// Add a film from command-line fields
pub fn add<B: StorageBackend + Clone>(app: &mut AppContext<B>, args: &FilmArgs) -> Result<()> {
    app.session.require_user()?;

    let mut fields = args.to_fields();
    fields.validate()?;
    if let Some(image) = &args.image {
        fields.image_url = Some(poster::resolve_image(image)?);
    }

    let film = app.library.add_film(fields)?;
    println!(
        "{} {} {}",
        "Added".green(),
        film.title.bold(),
        format!("({})", film.id).dimmed()
    );
    Ok(())
}

/// Apply field changes to an existing film
pub fn edit<B: StorageBackend + Clone>(
    app: &mut AppContext<B>,
    id: &str,
    changes: &FilmChanges,
) -> Result<()> {
    app.session.require_user()?;
    let film = find_film(&app.library, id)?;

    if changes.is_empty() {
        println!("{}", "Nothing to change.".yellow());
        return Ok(());
    }

    let mut fields = changes.apply(film.fields());
    fields.validate()?;
    if let Some(image) = &changes.image {
        fields.image_url = if image.trim().is_empty() {
            None
        } else {
            Some(poster::resolve_image(image)?)
        };
    }

    let updated = film.with_fields(fields);
    app.library.update_film(updated.clone())?;
    println!("{} {}", "Updated".green(), updated.title.bold());
    Ok(())
}

pub fn delete<B: StorageBackend + Clone>(app: &mut AppContext<B>, id: &str) -> Result<()> {
    app.session.require_user()?;
    let film = find_film(&app.library, id)?;

    app.library.delete_film(&film.id)?;
    println!("{} {}", "Deleted".green(), film.title.bold());
    Ok(())
}

pub fn show<B: StorageBackend + Clone>(app: &AppContext<B>, id: &str) -> Result<()> {
    app.session.require_user()?;
    let film = find_film(&app.library, id)?;

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_CLEAN);
    table.add_row(prettytable::row!["ID".bold(), film.id]);
    table.add_row(prettytable::row!["Title".bold(), film.title]);
    table.add_row(prettytable::row!["Director".bold(), film.director]);
    table.add_row(prettytable::row!["Catalog #".bold(), film.id_number]);
    table.add_row(prettytable::row!["Actors".bold(), or_dash(film.actors.as_deref())]);
    table.add_row(prettytable::row!["Year".bold(), or_dash(film.year.as_deref())]);
    table.add_row(prettytable::row!["Genre".bold(), or_dash(film.genre.as_deref())]);
    table.add_row(prettytable::row!["Tags".bold(), tags_of(&film)]);
    table.add_row(prettytable::row![
        "Poster".bold(),
        poster_summary(film.image_url.as_deref())
    ]);
    table.add_row(prettytable::row![
        "Added".bold(),
        film.date_added.format("%Y-%m-%d %H:%M").to_string()
    ]);

    println!();
    table.printstd();
    println!();
    Ok(())
}

/// List films: search, then filter, then browse category, then sort
pub fn list<B: StorageBackend + Clone>(
    app: &AppContext<B>,
    config: &Config,
    args: &ListArgs,
) -> Result<()> {
    app.session.require_user()?;
    let library = &app.library;

    let mut films = library.search_films(args.search.as_deref().unwrap_or(""));
    films = library.filter_films(&films, &args.film_filter());
    if let Some(category) = args.category_filter() {
        films = library.filter_by_category(&films, &category);
    }
    let sort = args.sort.as_deref().unwrap_or(&config.library.default_sort);
    films = library.sort_films(&films, sort);

    print_films(&films, library.len());
    Ok(())
}

/// Search the library and record the query in the recent list
pub fn search<B: StorageBackend + Clone>(
    app: &mut AppContext<B>,
    config: &Config,
    query: &str,
) -> Result<()> {
    app.session.require_user()?;

    app.library.add_search(query)?;
    let found = app.library.search_films(query);
    let found = app
        .library
        .sort_films(&found, &config.library.default_sort);

    print_films(&found, app.library.len());
    Ok(())
}

/// Look up a film by full id or unique id prefix
pub fn find_film<B: StorageBackend>(library: &LibraryStore<B>, id: &str) -> Result<Film> {
    if let Some(film) = library.get_film_by_id(id) {
        return Ok(film);
    }

    let mut matches = library
        .films()
        .into_iter()
        .filter(|film| !id.is_empty() && film.id.starts_with(id));
    match (matches.next(), matches.next()) {
        (Some(film), None) => Ok(film),
        (Some(_), Some(_)) => {
            tracing::debug!(prefix = id, "Ambiguous film id prefix");
            Err(FilmshelfError::FilmNotFound(format!("{} (ambiguous id prefix)", id)).into())
        }
        _ => Err(FilmshelfError::FilmNotFound(id.to_string()).into()),
    }
}

/// Print films as a table, with a count line
pub fn print_films(films: &[Film], total: usize) {
    if films.is_empty() {
        println!("{}", "No films found.".yellow());
        return;
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(prettytable::row![
        "ID".bold(),
        "Title".bold(),
        "Director".bold(),
        "Year".bold(),
        "Genre".bold(),
        "Catalog #".bold(),
        "Tags".bold()
    ]);

    for film in films {
        table.add_row(prettytable::row![
            short_id(&film.id).cyan(),
            truncate(&film.title, TITLE_WIDTH),
            film.director,
            or_dash(film.year.as_deref()),
            or_dash(film.genre.as_deref()),
            film.id_number,
            tags_of(film)
        ]);
    }

    println!();
    table.printstd();
    println!("Showing {} of {} films", films.len(), total);
    println!();
}

fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let kept: String = text.chars().take(width - 3).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}

fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

fn tags_of(film: &Film) -> String {
    match &film.tags {
        Some(tags) if !tags.is_empty() => tags.join(", "),
        _ => "-".to_string(),
    }
}

fn poster_summary(image_url: Option<&str>) -> String {
    match image_url {
        None => "-".to_string(),
        Some(url) if url.starts_with("data:") => {
            let mime = url
                .trim_start_matches("data:")
                .split(';')
                .next()
                .unwrap_or("image");
            format!("embedded {} ({} bytes)", mime, url.len())
        }
        Some(url) => url.to_string(),
    }
}
