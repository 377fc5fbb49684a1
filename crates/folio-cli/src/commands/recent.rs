//! Recent-search history command

use std::io::{self, Write};

use anyhow::{Context, Result};
use colored::Colorize;
use folio_core::{Config, FileStore, RecentSearches};

use crate::output::OutputFormat;

pub fn execute(clear: bool, format: OutputFormat, config: &Config) -> Result<()> {
    let mut recent = RecentSearches::load(
        FileStore::open_default(),
        config.session.recent_key.clone(),
        config.session.recent_limit,
    );

    if clear {
        recent.clear().context("failed to clear recent searches")?;
        if format == OutputFormat::Text {
            println!("Cleared recent searches");
            return Ok(());
        }
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Json | OutputFormat::Html => {
            writeln!(out, "{}", serde_json::to_string_pretty(recent.entries())?)?;
        },
        OutputFormat::Text => {
            if recent.entries().is_empty() {
                writeln!(out, "No recent searches")?;
            }
            for (idx, query) in recent.entries().iter().enumerate() {
                writeln!(out, "{} {query}", format!("{:>2}.", idx + 1).bright_black())?;
            }
        },
    }
    Ok(())
}
