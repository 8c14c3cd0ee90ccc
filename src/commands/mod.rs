/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint and by
the interactive shell:

- `auth`   : signup, login, logout, whoami
- `films`  : add, edit, delete, show, list, search
- `stats`  : collection statistics and recent activity
- `import` : CSV bulk import and template
- `storage`: persisted keys
- `shell`  : interactive readline loop

Every handler works on an [`AppContext`] borrowed from the caller.
*/

use crate::app::AppContext;
use crate::cli::Commands;
use crate::config::Config;
use crate::error::Result;
use crate::storage::StorageBackend;

pub mod auth;
pub mod films;
pub mod import;
pub mod shell;
pub mod stats;
pub mod storage;

/// Run one parsed command against `app`
pub fn dispatch<B: StorageBackend + Clone>(
    app: &mut AppContext<B>,
    config: &Config,
    command: Commands,
) -> Result<()> {
    tracing::info!(command = command.name(), "Running command");

    match command {
        Commands::Signup { username, password } => {
            auth::signup(&mut app.session, &username, &password)
        }
        Commands::Login {
            username,
            password,
            remember,
        } => auth::login(&mut app.session, &username, &password, remember),
        Commands::Logout => auth::logout(&mut app.session),
        Commands::Whoami => auth::whoami(&app.session),
        Commands::Add(args) => films::add(app, &args),
        Commands::Edit { id, changes } => films::edit(app, &id, &changes),
        Commands::Delete { id } => films::delete(app, &id),
        Commands::Show { id } => films::show(app, &id),
        Commands::List(args) => films::list(app, config, &args),
        Commands::Search { query } => films::search(app, config, &query),
        Commands::Recent => stats::recent(app, config),
        Commands::Stats => stats::stats(app),
        Commands::Import { file, template } => {
            if template {
                import::print_template();
                Ok(())
            } else {
                import::import_file(app, file.as_deref())
            }
        }
        Commands::Storage => storage::show_storage(app),
        Commands::Shell => shell::run_shell(app, config),
    }
}
