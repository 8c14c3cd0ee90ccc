//! Collection statistics and recent activity

use crate::app::AppContext;
use crate::commands::films::print_films;
use crate::config::Config;
use crate::error::Result;
use crate::storage::StorageBackend;
use chrono::Utc;
use colored::Colorize;

/// Print the home-screen numbers: total, storage, top genre, days since last add
pub fn stats<B: StorageBackend + Clone>(app: &AppContext<B>) -> Result<()> {
    let user = app.session.require_user()?;
    let stats = app.library.library_stats(Utc::now());

    println!();
    println!("{}", format!("{}'s library", user.username).bold());
    println!("  Total films:       {}", stats.total_films.to_string().cyan());
    println!(
        "  Storage used:      {}",
        format!("{}%", stats.storage_used_percentage).cyan()
    );

    let genre = &stats.most_added_genre;
    if genre.count == 0 {
        println!("  Most added genre:  {}", "-".dimmed());
    } else {
        println!(
            "  Most added genre:  {} ({} films)",
            genre.genre.cyan(),
            genre.count
        );
    }

    if stats.total_films == 0 {
        println!("  Last added:        {}", "never".dimmed());
    } else {
        println!(
            "  Last added:        {} days ago",
            stats.days_since_last_added.to_string().cyan()
        );
    }

    let genres = app.library.genres();
    if !genres.is_empty() {
        println!("  Genres:            {}", genres.join(", "));
    }
    let years = app.library.years();
    if !years.is_empty() {
        println!("  Years:             {}", years.join(", "));
    }
    println!();
    Ok(())
}

/// Print recent searches and the most recently added films
pub fn recent<B: StorageBackend + Clone>(app: &AppContext<B>, config: &Config) -> Result<()> {
    app.session.require_user()?;

    let searches = app.library.recent_searches();
    println!();
    println!("{}", "Recent searches:".bold());
    if searches.is_empty() {
        println!("  {}", "none".dimmed());
    }
    for query in &searches {
        println!("  {}", query);
    }

    println!();
    println!("{}", "Recently added:".bold());
    let films = app.library.recent_films(config.library.recent_films);
    print_films(&films, app.library.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::FilmFields;
    use crate::storage::MemoryStorage;
    use crate::test_utils::logged_in_app;

    #[test]
    fn test_stats_require_login() {
        let app = AppContext::with_backend(MemoryStorage::new()).unwrap();
        assert!(stats(&app).is_err());
        assert!(recent(&app, &Config::default()).is_err());
    }

    #[test]
    fn test_stats_and_recent_on_populated_library() {
        let mut app = logged_in_app();
        assert!(stats(&app).is_ok());

        app.library
            .add_film(FilmFields {
                genre: Some("drama".to_string()),
                ..FilmFields::new("Heat", "Michael Mann", "F-1")
            })
            .unwrap();
        app.library.add_search("heat").unwrap();

        assert!(stats(&app).is_ok());
        assert!(recent(&app, &Config::default()).is_ok());
    }
}
