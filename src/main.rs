//! Filmshelf - personal film library CLI
//!
#![doc = "Filmshelf - personal film library CLI"]
#![doc = "Main entry point for the Filmshelf application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use filmshelf::cli::Cli;
use filmshelf::commands;
use filmshelf::config::Config;
use filmshelf::AppContext;

fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    let mut app = AppContext::open(&config)?;
    commands::dispatch(&mut app, &config, cli.command)
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "filmshelf=debug"
    } else {
        "filmshelf=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
