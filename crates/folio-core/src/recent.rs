//! Recent-search history.
//!
//! The list is kept most-recent-first, without duplicates, capped at a fixed length,
//! and stored as a JSON array of strings under a single key of a [`KeyValueStore`].

use tracing::warn;

use crate::Result;
use crate::storage::KeyValueStore;

/// Recent queries backed by a key/value store.
///
/// Loads once on construction and writes through on every mutation.
#[derive(Debug)]
pub struct RecentSearches<S> {
    store: S,
    key: String,
    limit: usize,
    entries: Vec<String>,
}

impl<S: KeyValueStore> RecentSearches<S> {
    /// Read the list stored under `key`, keeping at most `limit` entries. Unreadable
    /// data starts an empty list.
    pub fn load(store: S, key: impl Into<String>, limit: usize) -> Self {
        let key = key.into();
        let mut entries = match store.get(&key) {
            Some(raw) => serde_json::from_str::<Vec<String>>(&raw).unwrap_or_else(|err| {
                warn!("ignoring unreadable recent searches under '{key}': {err}");
                Vec::new()
            }),
            None => Vec::new(),
        };
        entries.truncate(limit);
        Self {
            store,
            key,
            limit,
            entries,
        }
    }

    /// Record `query`. Blank queries are ignored; the query is trimmed, moved to the
    /// front, and the list truncated to its limit.
    pub fn add(&mut self, query: &str) -> Result<()> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(());
        }
        self.entries.retain(|existing| existing != query);
        self.entries.insert(0, query.to_string());
        self.entries.truncate(self.limit);
        self.persist()
    }

    /// Queries, most recent first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Empty the list and remove it from the store.
    pub fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        self.store.remove(&self.key)
    }

    fn persist(&mut self) -> Result<()> {
        let encoded = serde_json::to_string(&self.entries)?;
        self.store.set(&self.key, encoded)
    }
}
