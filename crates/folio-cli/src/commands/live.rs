//! Debounced search driven by stdin

use anyhow::Result;
use colored::Colorize;
use folio_core::{Config, FileStore, IndexLoader, SearchSession, SearchView};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::cli::LiveArgs;
use crate::output::{OutputFormat, print_view};
use crate::utils::settings::{apply_source_args, resolve_source};

/// Treat each stdin line as the current contents of a search box.
///
/// Lines arriving within the debounce window supersede each other; a blank line
/// clears the results at once. Every published view is printed. If the index fails
/// to load, input is accepted but never produces results.
pub async fn execute(args: &LiveArgs, mut config: Config) -> Result<()> {
    apply_source_args(&mut config, &args.source);
    if let Some(ms) = args.debounce {
        config.session.debounce_ms = ms;
    }
    let source = resolve_source(&args.source, &config)?;

    let mut session = SearchSession::new(&config, FileStore::open_default());
    let loader = IndexLoader::new()?;
    if !session.load(&loader, &source).await {
        warn!("search is unavailable for this session");
    }

    let format = args.format;
    let mark_tag = config.snippet.mark_tag.clone();
    let mut views = session.subscribe();
    let printer = tokio::spawn(async move {
        while views.changed().await.is_ok() {
            let view = views.borrow_and_update().clone();
            if matches!(view, SearchView::Cleared) && format == OutputFormat::Text {
                println!("{}", "(cleared)".bright_black());
                continue;
            }
            if let Err(err) = print_view(&view, None, format, &mark_tag) {
                warn!("failed to print results: {err}");
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        session.input(&line);
    }

    session.settle().await;
    info!("{} searches run", session.searches_run());
    drop(session);
    printer.await?;
    Ok(())
}
