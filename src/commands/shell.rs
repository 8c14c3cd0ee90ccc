//! Interactive shell
//!
//! Runs a readline loop over one long-lived [`AppContext`]. Each line is
//! split into arguments and parsed with the same clap grammar as the
//! command line, so `list --sort year` works exactly like
//! `filmshelf list --sort year`. A login without `--remember` lasts until the
//! shell exits.

use crate::app::AppContext;
use crate::cli::Commands;
use crate::config::Config;
use crate::error::Result;
use crate::session::Session;
use crate::storage::StorageBackend;
use clap::Parser;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use thiserror::Error;

/// Errors from splitting a shell line into arguments
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShellError {
    #[error("Unterminated {0} quote")]
    UnterminatedQuote(char),
}

/// What a line typed at the shell prompt asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellInput {
    Empty,
    Exit,
    Args(Vec<String>),
}

/// One shell line, parsed without a binary name
#[derive(Parser, Debug)]
#[command(name = "filmshelf", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: Commands,
}

/// Classify a line typed at the prompt
///
/// `exit` and `quit` (with or without a leading `/`, any case) end the shell.
pub fn parse_shell_input(line: &str) -> std::result::Result<ShellInput, ShellError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(ShellInput::Empty);
    }

    match trimmed.to_lowercase().trim_start_matches('/') {
        "exit" | "quit" => Ok(ShellInput::Exit),
        _ => split_args(trimmed).map(ShellInput::Args),
    }
}

/// Split a line on whitespace, honoring single and double quotes
///
/// A backslash escapes the next character outside single quotes.
pub fn split_args(line: &str) -> std::result::Result<Vec<String>, ShellError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_arg = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match quote {
            Some(q) if c == q => quote = None,
            Some('"') if c == '\\' => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            Some(_) => current.push(c),
            None => match c {
                '"' | '\'' => {
                    quote = Some(c);
                    in_arg = true;
                }
                '\\' => {
                    if let Some(next) = chars.next() {
                        current.push(next);
                        in_arg = true;
                    }
                }
                c if c.is_whitespace() => {
                    if in_arg {
                        args.push(std::mem::take(&mut current));
                        in_arg = false;
                    }
                }
                c => {
                    current.push(c);
                    in_arg = true;
                }
            },
        }
    }

    if let Some(q) = quote {
        return Err(ShellError::UnterminatedQuote(q));
    }
    if in_arg {
        args.push(current);
    }
    Ok(args)
}

fn prompt_for(user: Option<Session>) -> String {
    match user {
        Some(user) => format!("filmshelf ({})> ", user.username),
        None => "filmshelf> ".to_string(),
    }
}

fn print_welcome_banner() {
    println!("{}", "Filmshelf interactive shell".bold());
    println!(
        "Type a command as you would after `filmshelf`, {} for the list, {} to leave.",
        "help".cyan(),
        "exit".cyan()
    );
    println!();
}

/// Start the interactive shell
pub fn run_shell<B: StorageBackend + Clone>(
    app: &mut AppContext<B>,
    config: &Config,
) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    print_welcome_banner();

    loop {
        let prompt = prompt_for(app.session.current_user());
        match rl.readline(&prompt) {
            Ok(line) => {
                let args = match parse_shell_input(&line) {
                    Ok(ShellInput::Empty) => continue,
                    Ok(ShellInput::Exit) => break,
                    Ok(ShellInput::Args(args)) => args,
                    Err(e) => {
                        eprintln!("{}", e.to_string().red());
                        continue;
                    }
                };

                rl.add_history_entry(line.trim())?;

                let command = match ShellLine::try_parse_from(&args) {
                    Ok(parsed) => parsed.command,
                    Err(err) => {
                        // help output and usage errors alike
                        if let Err(e) = err.print() {
                            tracing::warn!("Failed to print usage: {}", e);
                        }
                        continue;
                    }
                };

                if matches!(command, Commands::Shell) {
                    println!("{}", "Already in the shell.".yellow());
                    continue;
                }

                if let Err(e) = super::dispatch(app, config, command) {
                    eprintln!("{} {}", "Error:".red(), e);
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                tracing::error!("Readline error: {:?}", err);
                break;
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}
