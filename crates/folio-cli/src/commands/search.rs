//! One-shot search command

use anyhow::Result;
use folio_core::{Config, FileStore, IndexLoader, SearchSession, SearchView};
use tracing::debug;

use crate::cli::SearchArgs;
use crate::output::print_view;
use crate::utils::settings::{apply_source_args, resolve_source};

/// Load the index, run the query once, and print the grouped results.
///
/// A failed index load is logged and reported as an empty result set.
pub async fn execute(args: &SearchArgs, mut config: Config) -> Result<()> {
    apply_source_args(&mut config, &args.source);
    if let Some(limit) = args.limit {
        config.index.limit = limit;
    }
    let source = resolve_source(&args.source, &config)?;
    let query = args.query.join(" ");

    let loader = IndexLoader::new()?;
    let mut session = SearchSession::new(&config, FileStore::open_default());
    let view = if session.load(&loader, &source).await {
        session.submit(&query).await;
        session.view()
    } else {
        debug!("index unavailable; reporting no results for '{query}'");
        SearchView::NoResults
    };

    print_view(&view, Some(&query), args.format, &config.snippet.mark_tag)
}
