use std::path::Path;

use anyhow::{Context, Result};
use folio_core::{Config, IndexSource};

use crate::cli::SourceArgs;

/// Load the configuration from `explicit`, or from the default location.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Config::load().context("failed to load configuration"),
    }
}

/// Apply per-invocation source overrides to `config`.
pub fn apply_source_args(config: &mut Config, args: &SourceArgs) {
    if let Some(page) = &args.page {
        config.source.page_path = Some(page.clone());
    }
}

/// The index to load: `--index` when given, otherwise the configured site.
pub fn resolve_source(args: &SourceArgs, config: &Config) -> Result<IndexSource> {
    match args.index.as_deref() {
        Some(location) => Ok(IndexSource::parse(location)),
        None => IndexSource::from_config(&config.source)
            .context("no index to search: pass --index or set source.base_url in the config"),
    }
}
