//! # Output Formatting
//!
//! Search views can be printed as:
//!
//! - **Text**: colored, human-readable groups with highlighted snippets
//! - **JSON**: the rendered view for scripts
//! - **HTML**: the result markup the site embeds

mod text;

use std::io::{self, Write};

use anyhow::Result;
use clap::ValueEnum;
use folio_core::SearchView;
use folio_core::render::to_html;
use serde_json::json;

use text::TextFormatter;

/// Message shown when a query matched nothing.
pub const NO_RESULTS: &str = "No results found. Try different keywords.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Html,
}

impl OutputFormat {
    pub const fn is_machine_readable(self) -> bool {
        matches!(self, Self::Json | Self::Html)
    }
}

/// Print one view. `query` is echoed in JSON output when known; `mark_tag` is the
/// highlight element used in rendered fragments.
pub fn print_view(
    view: &SearchView,
    query: Option<&str>,
    format: OutputFormat,
    mark_tag: &str,
) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Text => write!(out, "{}", TextFormatter::format_view(view, mark_tag))?,
        OutputFormat::Json => {
            let value = json!({ "query": query, "results": view });
            writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        },
        OutputFormat::Html => match view {
            SearchView::Cleared => {},
            SearchView::NoResults => writeln!(
                out,
                "<div class=\"no-results\">\n  <p>{NO_RESULTS}</p>\n</div>"
            )?,
            SearchView::Results(groups) => write!(out, "{}", to_html(groups))?,
        },
    }
    out.flush()?;
    Ok(())
}
