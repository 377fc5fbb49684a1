//! folio CLI - full-text search over a portfolio site's search index
//!
//! This is the main entry point for the folio command-line interface.
//! Command implementations live in the `commands` module.

use anyhow::Result;
use clap::Parser;
use folio_core::Config;

mod cli;
mod commands;
mod output;
mod utils;

use cli::{Cli, Commands};
use utils::logging::initialize_logging;
use utils::settings::load_config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_logging(&cli)?;

    execute_command(cli).await
}

async fn execute_command(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Search(args) => {
            commands::search(&args, config).await?;
        },

        Commands::Live(args) => {
            commands::live_search(&args, config).await?;
        },

        Commands::Recent { clear, format } => {
            commands::recent_searches(clear, format, &config)?;
        },

        Commands::Config { init } => {
            let path = match cli.config {
                Some(path) => path,
                None => Config::config_path()?,
            };
            commands::show_config(&config, &path, init)?;
        },
    }

    Ok(())
}
