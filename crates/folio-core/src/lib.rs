//! # folio-core
//!
//! Core functionality for folio - full-text search over a portfolio site's
//! precomputed document index.
//!
//! This crate loads the site's `search-index.json`, builds an in-memory full-text
//! index over it, and turns ranked hits into grouped, highlighted results ready for
//! display.
//!
//! ## Architecture
//!
//! - **Loading**: [`IndexLoader`] fetches the document array over HTTP or reads it
//!   from disk
//! - **Indexing**: [`SearchIndex`] implements the [`Indexer`] capability on Tantivy
//! - **Snippets**: [`SnippetExtractor`] cuts windows around matches; [`Highlighter`]
//!   marks terms in a single pass over the original text
//! - **Grouping and rendering**: [`group_results`] buckets hits by type; [`Renderer`]
//!   produces display structures and HTML
//! - **Orchestration**: [`SearchSession`] debounces input, gates on index readiness
//!   and records [`RecentSearches`]
//!
//! ## Quick Start
//!
//! ```rust
//! use folio_core::{Config, Document, Indexer, SearchIndex, SnippetExtractor};
//!
//! let config = Config::default();
//! let docs = vec![Document {
//!     title: "Learning Rust".into(),
//!     url: "blogs/rust.html".into(),
//!     content: Some("Ownership and borrowing make Rust memory safe.".into()),
//!     ..Document::default()
//! }];
//!
//! let index = SearchIndex::build(&config.index, &docs)?;
//! let hits = index.search("borrowing")?;
//! assert_eq!(hits.len(), 1);
//!
//! let extractor = SnippetExtractor::new(config.snippet);
//! let snippets = extractor.extract(hits[0].document.content(), "borrowing");
//! assert_eq!(snippets[0].marked().next(), Some("borrowing"));
//! # Ok::<(), folio_core::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return [`Result<T, Error>`]. Malformed documents and empty
//! queries are not errors: they degrade to empty results.

/// Configuration loading and defaults
pub mod config;
/// Error types and result aliases
pub mod error;
/// Grouping of ranked results by document type
pub mod group;
/// Single-pass term highlighting
pub mod highlight;
/// Search index implementation using Tantivy
pub mod index;
/// Fetching the document collection
pub mod loader;
/// Recent-search history
pub mod recent;
/// Display structures and HTML output
pub mod render;
/// Debounced query orchestration
pub mod session;
/// Snippet extraction around matches
pub mod snippet;
/// Persistent key/value storage
pub mod storage;
/// Core data types
pub mod types;

pub use config::{CombineWith, Config, IndexConfig, SessionConfig, SnippetConfig, SourceConfig};
pub use error::{Error, Result};
pub use group::{DEFAULT_GROUP, ResultGroup, display_name, group_results};
pub use highlight::{Highlighter, query_terms};
pub use index::{Indexer, SearchIndex};
pub use loader::{IndexLoader, IndexSource, parse_documents};
pub use recent::RecentSearches;
pub use render::{RenderedGroup, RenderedResult, Renderer, SearchView};
pub use session::SearchSession;
pub use snippet::SnippetExtractor;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use types::{Document, SearchResult, Snippet};
