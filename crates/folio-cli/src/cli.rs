//! # CLI Structure and Argument Parsing
//!
//! The `folio` command line is built with `clap` derive macros.
//!
//! ```bash
//! # One-shot search against a local index file
//! folio search rust ownership --index site/static/search-index.json
//!
//! # Debounced search driven by stdin, one input state per line
//! folio live --index https://example.com/static/search-index.json
//!
//! # Recent searches
//! folio recent
//! folio recent --clear
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::output::OutputFormat;

/// Main CLI structure for the `folio` command
#[derive(Parser, Clone, Debug)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "folio - full-text search for a portfolio site's search index", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages (only show errors)
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file (overrides autodiscovery). Also via `FOLIO_CONFIG`.
    #[arg(long, global = true, value_name = "FILE", env = "FOLIO_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available subcommands
#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Run a query once and print grouped results
    Search(SearchArgs),

    /// Read input states from stdin and print results as debounced searches complete
    Live(LiveArgs),

    /// Show or clear recent searches
    Recent {
        /// Remove all recent searches
        #[arg(long)]
        clear: bool,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show the effective configuration
    Config {
        /// Write the default configuration if no config file exists yet
        #[arg(long)]
        init: bool,
    },
}

/// Where to load the index from, shared by `search` and `live`.
#[derive(Args, Clone, Debug)]
pub struct SourceArgs {
    /// Index file path or URL (defaults to `source.base_url` + `source.index_path`)
    #[arg(short = 'i', long, value_name = "PATH|URL")]
    pub index: Option<String>,

    /// Path of the page results are shown on; relative result links are corrected for it
    #[arg(long, value_name = "PATH")]
    pub page: Option<String>,
}

#[derive(Args, Clone, Debug)]
pub struct SearchArgs {
    /// Search query
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Maximum number of results
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Args, Clone, Debug)]
pub struct LiveArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Debounce delay in milliseconds (overrides `session.debounce_ms`)
    #[arg(long, value_name = "MS")]
    pub debounce: Option<u64>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl Cli {
    /// Output format of the selected command, when it has one.
    pub const fn format(&self) -> Option<OutputFormat> {
        match &self.command {
            Commands::Search(args) => Some(args.format),
            Commands::Live(args) => Some(args.format),
            Commands::Recent { format, .. } => Some(*format),
            Commands::Config { .. } => None,
        }
    }
}
