use crate::app::AppContext;
use crate::error::Result;
use crate::storage::StorageBackend;
use colored::Colorize;
use prettytable::{format, Table};

/// Show every persisted key with its size and last write time
pub fn show_storage<B: StorageBackend + Clone>(app: &AppContext<B>) -> Result<()> {
    let entries = app.backend().keys()?;

    if entries.is_empty() {
        println!("{}", "Nothing stored yet.".yellow());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(prettytable::row![
        "Key".bold(),
        "Size".bold(),
        "Last Updated".bold()
    ]);

    for entry in &entries {
        let updated = entry.updated_at.format("%Y-%m-%d %H:%M").to_string();
        table.add_row(prettytable::row![
            entry.key.cyan(),
            format!("{} B", entry.size_bytes),
            updated
        ]);
    }

    println!("\nStored data:");
    table.printstd();
    println!(
        "Library capacity used: {}",
        format!("{}%", app.library.get_storage_used_percentage()).cyan()
    );
    println!();

    Ok(())
}
