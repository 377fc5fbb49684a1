//! Configuration management for folio.
//!
//! One TOML file drives the whole pipeline: which fields the index covers, how
//! snippets are cut, debounce and recent-search settings, and where the index lives.
//! Every section and key is optional; anything omitted takes the site's defaults.
//!
//! ## File Location
//!
//! Resolved in order:
//!
//! 1. `FOLIO_CONFIG` (path to a file)
//! 2. `FOLIO_CONFIG_DIR` (directory containing `global.toml`)
//! 3. The platform config directory (e.g. `~/.config/folio/global.toml` on Linux)
//!
//! ## Example Configuration File
//!
//! ```toml
//! [index]
//! fields = ["title", "content", "description"]
//! fuzzy = 0.2
//! prefix = true
//! combine_with = "and"
//!
//! [index.boost]
//! title = 2.0
//! description = 1.5
//!
//! [snippet]
//! context_chars = 100
//! max_snippets = 3
//!
//! [source]
//! base_url = "https://example.com"
//! index_path = "/static/search-index.json"
//! ```

use crate::types::DOCUMENT_FIELDS;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "global.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Index fields and matching.
    pub index: IndexConfig,
    /// Snippet extraction and highlighting.
    pub snippet: SnippetConfig,
    /// Debounce and recent searches.
    pub session: SessionConfig,
    /// Where the index file lives.
    pub source: SourceConfig,
}

/// How query terms are combined by the index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombineWith {
    /// Every term must match.
    #[default]
    And,
    /// Any term may match.
    Or,
}

/// Full-text index settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Fields that are tokenized and searchable.
    pub fields: Vec<String>,
    /// Fields returned with each result.
    pub store_fields: Vec<String>,
    /// Per-field score multipliers; fields not listed get `1.0`.
    pub boost: BTreeMap<String, f32>,
    /// Fuzzy tolerance as a fraction of term length (`0.2` allows one edit per five chars).
    pub fuzzy: f32,
    /// Whether a query term also matches indexed terms it is a prefix of.
    pub prefix: bool,
    /// Whether all terms or any term must match.
    pub combine_with: CombineWith,
    /// Maximum number of ranked results per query.
    pub limit: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            fields: ["title", "content", "description"].map(String::from).to_vec(),
            store_fields: ["title", "url", "content", "description", "type", "category", "date"]
                .map(String::from)
                .to_vec(),
            boost: BTreeMap::from([
                ("title".to_string(), 2.0),
                ("description".to_string(), 1.5),
                ("content".to_string(), 1.0),
            ]),
            fuzzy: 0.2,
            prefix: true,
            combine_with: CombineWith::And,
            limit: 50,
        }
    }
}

impl IndexConfig {
    /// Boost for `field`, defaulting to `1.0`.
    pub fn boost_for(&self, field: &str) -> f32 {
        self.boost.get(field).copied().unwrap_or(1.0)
    }

    /// Reject field names the index file cannot carry.
    pub fn validate(&self) -> Result<()> {
        let named = self
            .fields
            .iter()
            .chain(&self.store_fields)
            .chain(self.boost.keys());
        for name in named {
            if !DOCUMENT_FIELDS.contains(&name.as_str()) {
                return Err(Error::Config(format!(
                    "unknown document field '{name}' (expected one of: {})",
                    DOCUMENT_FIELDS.join(", ")
                )));
            }
        }
        if self.fields.is_empty() {
            return Err(Error::Config("index.fields must name at least one field".into()));
        }
        if !(0.0..=1.0).contains(&self.fuzzy) {
            return Err(Error::Config(format!(
                "index.fuzzy must be between 0 and 1, got {}",
                self.fuzzy
            )));
        }
        Ok(())
    }
}

/// Snippet extraction and highlighting settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnippetConfig {
    /// Query terms shorter than this (in characters) are ignored.
    pub min_term_len: usize,
    /// Characters of context kept on each side of a match.
    pub context_chars: usize,
    /// Matches per term that may open a window.
    pub max_per_term: usize,
    /// Snippets per document.
    pub max_snippets: usize,
    /// Display length of the description fallback.
    pub description_len: usize,
    /// Marker added where a window or description is cut.
    pub ellipsis: String,
    /// Widen windows that end mid-word out to the word boundary.
    pub snap_to_words: bool,
    /// Element wrapping highlighted terms in HTML output.
    pub mark_tag: String,
}

impl Default for SnippetConfig {
    fn default() -> Self {
        Self {
            min_term_len: 3,
            context_chars: 100,
            max_per_term: 2,
            max_snippets: 3,
            description_len: 160,
            ellipsis: "...".to_string(),
            snap_to_words: true,
            mark_tag: "mark".to_string(),
        }
    }
}

/// Query orchestration settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Quiet period after the last input before a search runs.
    pub debounce_ms: u64,
    /// Recent searches kept.
    pub recent_limit: usize,
    /// Store key holding the recent-search list.
    pub recent_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            recent_limit: 5,
            recent_key: "recentSearches".to_string(),
        }
    }
}

/// Where the search index comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Site origin, e.g. `https://example.com`. Required for remote loading.
    pub base_url: Option<String>,
    /// Site-absolute path of the index file.
    pub index_path: String,
    /// Path of the page the search box lives on; drives relative URL correction.
    pub page_path: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            index_path: "/static/search-index.json".to_string(),
            page_path: None,
        }
    }
}

impl Config {
    /// Load configuration from the default location, or defaults when no file exists.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config {}: {e}", path.display()))
        })?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {e}")))?;
        config.index.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Write the configuration as pretty TOML, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config directory: {e}")))?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))?;
        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write config: {e}")))?;
        Ok(())
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Resolve the config file path honoring `FOLIO_CONFIG` and `FOLIO_CONFIG_DIR`.
    pub fn config_path() -> Result<PathBuf> {
        if let Some(file) = non_empty_env("FOLIO_CONFIG") {
            return Ok(PathBuf::from(file));
        }
        if let Some(dir) = non_empty_env("FOLIO_CONFIG_DIR") {
            return Ok(PathBuf::from(dir).join(CONFIG_FILENAME));
        }
        let project_dirs = directories::ProjectDirs::from("dev", "folio", "folio")
            .ok_or_else(|| Error::Config("Failed to determine project directories".into()))?;
        Ok(project_dirs.config_dir().join(CONFIG_FILENAME))
    }
}

pub(crate) fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
