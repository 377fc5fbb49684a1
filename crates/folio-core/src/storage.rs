//! Small persistent key/value storage.
//!
//! [`FileStore`] is the on-disk analogue of browser local storage: a single JSON file
//! mapping string keys to string values. It is read once when opened and rewritten on
//! every mutation. [`MemoryStore`] offers the same interface without touching disk.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::non_empty_env;
use crate::{Error, Result};

const STORE_FILENAME: &str = "folio.json";
const CURRENT_SCHEMA_VERSION: u32 = 1;

/// String key/value storage.
pub trait KeyValueStore: Send {
    /// Value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;
    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: String) -> Result<()>;
    /// Delete `key`. Removing an absent key succeeds.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default = "default_schema_version")]
    schema_version: u32,
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

const fn default_schema_version() -> u32 {
    CURRENT_SCHEMA_VERSION
}

impl Default for StoreFile {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            entries: BTreeMap::new(),
        }
    }
}

/// JSON-file backed store.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    data: StoreFile,
}

impl FileStore {
    /// Open the store at `path`. A missing, unreadable, or corrupt file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let data = load_store_file(&path);
        Self { path, data }
    }

    /// Open the store at [`default_store_path`].
    pub fn open_default() -> Self {
        Self::open(default_store_path())
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let bytes = serde_json::to_vec_pretty(&self.data)?;
        fs::write(&self.path, bytes).map_err(|e| {
            Error::Storage(format!("failed to write {}: {e}", self.path.display()))
        })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.data.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.data.entries.insert(key.to_string(), value);
        self.persist()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.data.entries.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }
}

fn load_store_file(path: &Path) -> StoreFile {
    match fs::read(path) {
        Ok(bytes) => match serde_json::from_slice::<StoreFile>(&bytes) {
            Ok(store) if store.schema_version == CURRENT_SCHEMA_VERSION => store,
            Ok(store) => {
                warn!(
                    "{} schema version {} unsupported; resetting store",
                    path.display(),
                    store.schema_version
                );
                StoreFile::default()
            },
            Err(err) => {
                warn!("failed to parse {}: {err}", path.display());
                StoreFile::default()
            },
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => StoreFile::default(),
        Err(err) => {
            warn!("failed to read {}: {err}", path.display());
            StoreFile::default()
        },
    }
}

/// Store location: `FOLIO_DATA_DIR/folio.json`, else the platform data directory.
pub fn default_store_path() -> PathBuf {
    if let Some(dir) = non_empty_env("FOLIO_DATA_DIR") {
        return PathBuf::from(dir).join(STORE_FILENAME);
    }
    ProjectDirs::from("dev", "folio", "folio").map_or_else(
        || PathBuf::from(".folio").join(STORE_FILENAME),
        |dirs| dirs.data_dir().join(STORE_FILENAME),
    )
}
