//! Query orchestration: debounce, readiness gating, recent searches, and view
//! publication.
//!
//! A [`SearchSession`] has a single logical owner that feeds it input. Each
//! non-blank [`input`](SearchSession::input) replaces the pending deferred search,
//! so only the last query of a burst runs. Blank input clears the view at once.
//! Views are published on a [`tokio::sync::watch`] channel.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::config::{Config, IndexConfig};
use crate::group::group_results;
use crate::index::{Indexer, SearchIndex};
use crate::loader::{IndexLoader, IndexSource};
use crate::recent::RecentSearches;
use crate::render::{Renderer, SearchView};
use crate::storage::{FileStore, KeyValueStore};
use crate::{Error, Result};

struct Shared<S> {
    index: OnceLock<Box<dyn Indexer>>,
    load_failed: AtomicBool,
    index_config: IndexConfig,
    recent: Mutex<RecentSearches<S>>,
    renderer: Renderer,
    debounce: Duration,
    view: watch::Sender<SearchView>,
    searches_run: AtomicUsize,
}

impl<S: KeyValueStore> Shared<S> {
    async fn execute(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            self.view.send_replace(SearchView::Cleared);
            return;
        }
        let Some(index) = self.index.get() else {
            debug!("search index not ready; ignoring query '{query}'");
            return;
        };

        if let Err(err) = self.recent.lock().await.add(query) {
            warn!("failed to save recent search: {err}");
        }
        self.searches_run.fetch_add(1, Ordering::Relaxed);

        let view = match index.search(query) {
            Ok(results) if results.is_empty() => SearchView::NoResults,
            Ok(results) => {
                let groups = group_results(results);
                SearchView::Results(self.renderer.render(&groups, query))
            },
            Err(err) => {
                warn!("search for '{query}' failed: {err}");
                SearchView::NoResults
            },
        };
        self.view.send_replace(view);
    }
}

/// Debounced search over a lazily loaded index.
pub struct SearchSession<S: KeyValueStore + 'static = FileStore> {
    shared: Arc<Shared<S>>,
    pending: Option<JoinHandle<()>>,
}

impl<S: KeyValueStore + 'static> SearchSession<S> {
    /// Create a session; recent searches are loaded from `store` immediately.
    pub fn new(config: &Config, store: S) -> Self {
        let recent = RecentSearches::load(
            store,
            config.session.recent_key.clone(),
            config.session.recent_limit,
        );
        let (view, _) = watch::channel(SearchView::Cleared);
        Self {
            shared: Arc::new(Shared {
                index: OnceLock::new(),
                load_failed: AtomicBool::new(false),
                index_config: config.index.clone(),
                recent: Mutex::new(recent),
                renderer: Renderer::from_config(config),
                debounce: Duration::from_millis(config.session.debounce_ms),
                view,
                searches_run: AtomicUsize::new(0),
            }),
            pending: None,
        }
    }

    /// Whether the index is loaded and searches will run.
    pub fn is_ready(&self) -> bool {
        self.shared.index.get().is_some()
    }

    /// Whether an index load was attempted and failed.
    pub fn load_failed(&self) -> bool {
        self.shared.load_failed.load(Ordering::Relaxed)
    }

    /// Install an already-built index. Returns `false` if one is already present.
    pub fn install(&self, indexer: impl Indexer + 'static) -> bool {
        self.shared.index.set(Box::new(indexer)).is_ok()
    }

    /// Load documents from `source` and build the index.
    ///
    /// Loading happens at most once: after a success or a failure, further calls
    /// return the existing outcome without fetching again. A failure is logged and
    /// leaves the session inert.
    pub async fn load(&self, loader: &IndexLoader, source: &IndexSource) -> bool {
        if self.is_ready() {
            return true;
        }
        if self.load_failed() {
            debug!("search index previously failed to load; not retrying");
            return false;
        }

        match self.try_load(loader, source).await {
            Ok(count) => {
                info!("Search index ready ({count} documents)");
                true
            },
            Err(err) => {
                error!("Error loading search index: {err}");
                self.shared.load_failed.store(true, Ordering::Relaxed);
                false
            },
        }
    }

    async fn try_load(&self, loader: &IndexLoader, source: &IndexSource) -> Result<usize> {
        let documents = loader.load(source).await?;
        let index = SearchIndex::build(&self.shared.index_config, &documents)?;
        let count = index.len();
        if !self.install(index) {
            return Err(Error::Other("search index already installed".into()));
        }
        Ok(count)
    }

    /// Feed one input state. Blank input clears immediately; anything else runs
    /// after the debounce delay unless superseded first.
    pub fn input(&mut self, query: &str) {
        self.cancel_pending();
        if query.trim().is_empty() {
            self.shared.view.send_replace(SearchView::Cleared);
            return;
        }

        let shared = Arc::clone(&self.shared);
        let query = query.to_string();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(shared.debounce).await;
            shared.execute(&query).await;
        }));
    }

    /// Run `query` now, dropping any pending debounced search.
    pub async fn submit(&mut self, query: &str) {
        self.cancel_pending();
        self.shared.execute(query).await;
    }

    /// Wait for the pending debounced search, if any, to finish.
    pub async fn settle(&mut self) {
        if let Some(handle) = self.pending.take() {
            if let Err(err) = handle.await {
                if !err.is_cancelled() {
                    warn!("debounced search task failed: {err}");
                }
            }
        }
    }

    /// Whether a debounced search is still waiting to run.
    pub fn has_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Receiver notified each time a new view is published.
    pub fn subscribe(&self) -> watch::Receiver<SearchView> {
        self.shared.view.subscribe()
    }

    /// The most recently published view.
    pub fn view(&self) -> SearchView {
        self.shared.view.borrow().clone()
    }

    /// Number of searches that reached the index.
    pub fn searches_run(&self) -> usize {
        self.shared.searches_run.load(Ordering::Relaxed)
    }

    /// Recent queries, most recent first.
    pub async fn recent_searches(&self) -> Vec<String> {
        self.shared.recent.lock().await.entries().to_vec()
    }

    /// Forget all recent queries, in memory and in the store.
    pub async fn clear_recent(&self) -> Result<()> {
        self.shared.recent.lock().await.clear()
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl<S: KeyValueStore + 'static> Drop for SearchSession<S> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
