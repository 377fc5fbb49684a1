//! Configuration display command

use std::path::Path;

use anyhow::{Context, Result};
use folio_core::Config;

/// Print the effective configuration as TOML. With `init`, first write the
/// defaults to `path` unless a file already exists there.
pub fn execute(config: &Config, path: &Path, init: bool) -> Result<()> {
    if init {
        if path.exists() {
            eprintln!("Config already exists at {}", path.display());
        } else {
            Config::default()
                .save_to(path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Wrote default config to {}", path.display());
        }
    }
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
