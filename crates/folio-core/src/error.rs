//! Error types and handling for folio-core operations.
//!
//! Every fallible operation in the crate returns [`Result<T>`]. Errors are grouped into
//! categories so callers can log them consistently and decide whether a retry makes sense.
//!
//! ## Error Categories
//!
//! - **I/O Errors**: reading index files, writing the recent-search store
//! - **Network Errors**: fetching the search index over HTTP
//! - **Parse Errors**: malformed index JSON
//! - **Index Errors**: building or querying the full-text index
//! - **Storage Errors**: the key/value store backing recent searches
//! - **Configuration Errors**: invalid settings or config files
//!
//! Missing document fields, blank queries and queries without usable terms are not
//! errors: they degrade to empty output.
//!
//! ```rust
//! use folio_core::Error;
//!
//! let err = Error::NotFound("search-index.json".into());
//! assert_eq!(err.category(), "not_found");
//! assert!(!err.is_recoverable());
//! ```

use thiserror::Error;

/// The main error type for folio-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    ///
    /// Covers reading local index files and persisting the recent-search store.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Network operation failed.
    ///
    /// Raised for connection failures and non-success responses other than 404 while
    /// fetching the search index.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The search index payload could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Search index operation failed.
    ///
    /// Wraps failures reported by the underlying full-text engine while building the
    /// schema, adding documents, or running a query.
    #[error("Index error: {0}")]
    Index(String),

    /// Key/value storage operation failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration is invalid or inaccessible.
    ///
    /// ## Common Causes
    ///
    /// - Invalid TOML syntax in `global.toml`
    /// - Unknown document field named in `fields`, `store_fields` or `boost`
    /// - No index source configured
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource was not found (HTTP 404 or missing file).
    #[error("Not found: {0}")]
    NotFound(String),

    /// URL is malformed or invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic error for uncategorized failures.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<tantivy::TantivyError> for Error {
    fn from(err: tantivy::TantivyError) -> Self {
        Self::Index(err.to_string())
    }
}

impl Error {
    /// Check if the error might be recoverable through retry logic.
    ///
    /// The search session never retries on its own (a failed index load leaves search
    /// inert for the rest of the run); this is a hint for callers that want to.
    ///
    /// ```rust
    /// use folio_core::Error;
    /// use std::io;
    ///
    /// assert!(Error::Io(io::Error::new(io::ErrorKind::TimedOut, "timeout")).is_recoverable());
    /// assert!(!Error::Parse("expected array".into()).is_recoverable());
    /// ```
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network(e) => e.is_timeout() || e.is_connect(),
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::Interrupted
            ),
            _ => false,
        }
    }

    /// Get the error category as a string identifier.
    ///
    /// Useful as a structured logging field:
    ///
    /// ```rust
    /// use folio_core::Error;
    ///
    /// let err = Error::Config("unknown field 'body'".into());
    /// tracing::error!(category = err.category(), "{err}");
    /// ```
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Network(_) => "network",
            Self::Parse(_) => "parse",
            Self::Index(_) => "index",
            Self::Storage(_) => "storage",
            Self::Config(_) => "config",
            Self::NotFound(_) => "not_found",
            Self::InvalidUrl(_) => "invalid_url",
            Self::Serialization(_) => "serialization",
            Self::Other(_) => "other",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
