//! Search orchestrator: turns a raw keystroke stream into a ranked,
//! deduplicated result set plus suggestions, with automatic fallback.
//!
//! Strategy selection is explicit: the primary external-index path is tried
//! when enabled, and the local fallback (static catalog + relational store +
//! relevance ranker) takes over when the index is disabled, errors, or
//! returns nothing. Failures never cross this boundary: the UI only ever
//! sees results, suggestions and a loading flag.

use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::Duration;

use crate::catalog::StaticCatalog;
use crate::config::SearchConfig;
use crate::error::{IndexError, StoreError};
use crate::index::IndexClient;
use crate::ranking::{compare_ranked, normalize_query, relevance_score};
use crate::store::ContentStore;
use crate::suggest::{self, MIN_SUGGESTION_QUERY_LEN};
use crate::types::{SearchFilters, SearchResult, SearchSource};

/// Recent query → outcome pairs kept per session.
const QUERY_CACHE_SIZE: usize = 32;

/// The UI-facing view of the query session.
///
/// This snapshot is the entire contract the rest of the application may
/// depend on; nothing outside the orchestrator mutates session state.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    /// Current raw query string.
    pub query: String,
    /// Most recent result list, already ranked and truncated.
    pub results: Vec<SearchResult>,
    /// Most recent suggestion list.
    pub suggestions: Vec<String>,
    /// True while a debounced search is pending or executing.
    pub loading: bool,
    /// Which strategy served `results`.
    pub source: SearchSource,
    /// Index-reported total hit count; 0 in fallback mode.
    pub total_hits: u64,
    /// Index-reported processing time; 0 in fallback mode.
    pub processing_time_ms: u64,
}

/// A completed search, cached and committed as one unit so the merge is
/// idempotent regardless of which source resolved first.
#[derive(Debug, Clone)]
struct SearchOutcome {
    results: Vec<SearchResult>,
    suggestions: Vec<String>,
    source: SearchSource,
    total_hits: u64,
    processing_time_ms: u64,
}

impl SearchOutcome {
    fn empty() -> Self {
        Self {
            results: Vec::new(),
            suggestions: Vec::new(),
            source: SearchSource::LocalFallback,
            total_hits: 0,
            processing_time_ms: 0,
        }
    }
}

/// Coordinates debounced input, strategy selection, ranking and analytics.
///
/// Cloning is cheap and shares the same session.
#[derive(Clone)]
pub struct SearchOrchestrator {
    inner: Arc<Inner>,
}

struct Inner {
    config: SearchConfig,
    index: Option<Arc<dyn IndexClient>>,
    store: Option<Arc<dyn ContentStore>>,
    catalog: StaticCatalog,
    session: RwLock<SearchState>,
    filters: RwLock<SearchFilters>,
    /// Superseded-response guard: each scheduled search captures the
    /// generation current at schedule time, and only the matching response
    /// may mutate visible state.
    generation: AtomicU64,
    debounce: StdMutex<Option<JoinHandle<()>>>,
    cache: Mutex<LruCache<String, SearchOutcome>>,
}

impl SearchOrchestrator {
    pub fn new(
        config: SearchConfig,
        index: Option<Arc<dyn IndexClient>>,
        store: Option<Arc<dyn ContentStore>>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                index,
                store,
                catalog: StaticCatalog::new(),
                session: RwLock::new(SearchState::default()),
                filters: RwLock::new(SearchFilters::default()),
                generation: AtomicU64::new(0),
                debounce: StdMutex::new(None),
                cache: Mutex::new(LruCache::new(NonZeroUsize::new(QUERY_CACHE_SIZE).unwrap())),
            }),
        }
    }

    /// Read-only snapshot of the current session for the UI layer.
    pub async fn snapshot(&self) -> SearchState {
        self.inner.session.read().await.clone()
    }

    /// Accept a keystroke's worth of input and schedule a debounced search.
    ///
    /// Empty or whitespace-only input short-circuits before any network
    /// call: results, suggestions and metrics clear immediately.
    pub async fn set_query(&self, text: &str) {
        let generation = self.inner.bump_generation();
        self.inner.abort_pending_tick();

        if text.trim().is_empty() {
            let mut session = self.inner.session.write().await;
            *session = SearchState {
                query: text.to_string(),
                ..SearchState::default()
            };
            return;
        }

        {
            let mut session = self.inner.session.write().await;
            session.query = text.to_string();
            session.loading = true;
        }

        let inner = Arc::clone(&self.inner);
        let query = text.to_string();
        let quiet = Duration::from_millis(self.inner.config.debounce_ms);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            if inner.generation.load(Ordering::SeqCst) != generation {
                return;
            }
            inner.run_search(&query, generation).await;
        });

        *self.inner.pending_tick() = Some(handle);
    }

    /// Run a search immediately, bypassing the debounce timer.
    ///
    /// Ranking is deterministic: repeated calls with the same query and no
    /// intervening `set_query` yield identical ordered result lists.
    pub async fn search_now(&self, query: &str) {
        let generation = self.inner.bump_generation();
        self.inner.abort_pending_tick();
        {
            let mut session = self.inner.session.write().await;
            session.query = query.to_string();
            session.loading = !query.trim().is_empty();
        }
        self.inner.run_search(query, generation).await;
    }

    /// Reset query, results, suggestions and metrics; cancel any pending
    /// debounce tick and invalidate in-flight responses.
    pub async fn clear_search(&self) {
        self.inner.bump_generation();
        self.inner.abort_pending_tick();
        *self.inner.session.write().await = SearchState::default();
        self.inner.cache.lock().await.clear();
    }

    /// Record a click-through on a result.
    ///
    /// Forwarded to the index analytics channel only when the external
    /// index served the current result set; a no-op with respect to the
    /// external channel in fallback mode.
    pub async fn track_click(&self, result_id: &str, position: usize) {
        let (query, source) = {
            let session = self.inner.session.read().await;
            (session.query.clone(), session.source)
        };

        if source != SearchSource::ExternalIndex {
            tracing::trace!("click on '{result_id}' at {position} served locally, not forwarded");
            return;
        }
        if let Some(client) = &self.inner.index {
            client.track_click(result_id, position, &query).await;
        }
    }

    /// Replace the facet filters applied to external-index queries.
    pub async fn set_filters(&self, filters: SearchFilters) {
        *self.inner.filters.write().await = filters;
        // Cached outcomes were produced under the old filters.
        self.inner.cache.lock().await.clear();
    }
}

impl Inner {
    fn bump_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn pending_tick(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.debounce
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn abort_pending_tick(&self) {
        if let Some(handle) = self.pending_tick().take() {
            handle.abort();
        }
    }

    async fn run_search(&self, raw_query: &str, generation: u64) {
        if raw_query.trim().is_empty() {
            self.commit(SearchOutcome::empty(), generation).await;
            return;
        }

        let normalized = normalize_query(raw_query);
        if let Some(cached) = self.cache.lock().await.get(&normalized).cloned() {
            tracing::debug!("query cache hit for '{normalized}'");
            self.commit(cached, generation).await;
            return;
        }

        let outcome = self.execute(raw_query, &normalized).await;
        self.cache.lock().await.put(normalized, outcome.clone());
        self.commit(outcome, generation).await;
    }

    /// Strategy selection: primary index when enabled, local fallback on
    /// disabled/error/empty.
    async fn execute(&self, raw_query: &str, normalized: &str) -> SearchOutcome {
        if self.config.use_external_index
            && let Some(client) = &self.index
        {
            match self
                .query_external(client.as_ref(), raw_query, normalized)
                .await
            {
                Ok(Some(outcome)) => return outcome,
                Ok(None) => {
                    tracing::debug!("index returned no hits for '{normalized}', falling back");
                }
                Err(e) => {
                    tracing::warn!("index query failed, falling back: {e}");
                }
            }
        }
        self.local_fallback(normalized).await
    }

    /// Primary strategy. `Ok(None)` means the index answered with zero hits.
    async fn query_external(
        &self,
        client: &dyn IndexClient,
        raw_query: &str,
        normalized: &str,
    ) -> Result<Option<SearchOutcome>, IndexError> {
        let filters = self.filters.read().await.clone();
        let mut page = if filters.is_empty() {
            client
                .search(raw_query, 0, self.config.hits_per_page)
                .await?
        } else {
            client.search_with_facets(raw_query, &filters).await?
        };

        if page.hits.is_empty() {
            return Ok(None);
        }
        page.hits.truncate(self.config.hits_per_page);

        client.track_search(raw_query, page.hits.len()).await;

        // Vocabulary suggestions are always derived; the service's own
        // list replaces them when it answers non-empty.
        let mut suggestions = suggest::suggestions_for(normalized, self.config.max_suggestions);
        if normalized.len() >= MIN_SUGGESTION_QUERY_LEN {
            match client.suggestions(raw_query).await {
                Ok(service) if !service.is_empty() => {
                    suggestions = service;
                    suggestions.truncate(self.config.max_suggestions);
                }
                Ok(_) => {}
                Err(e) => tracing::warn!("suggestion query failed: {e}"),
            }
        }

        Ok(Some(SearchOutcome {
            results: page.hits,
            suggestions,
            source: SearchSource::ExternalIndex,
            total_hits: page.total_hits,
            processing_time_ms: page.processing_time_ms,
        }))
    }

    /// Fallback strategy: catalog + relational sources, scored locally.
    async fn local_fallback(&self, normalized: &str) -> SearchOutcome {
        let mut candidates = self.catalog.matches(normalized);

        if let Some(store) = &self.store {
            let limit = self.config.per_source_limit;
            let articles = store_query(store, normalized, limit, <dyn ContentStore>::search_articles);
            let jobs = store_query(store, normalized, limit, <dyn ContentStore>::search_jobs);
            let courses = store_query(store, normalized, limit, <dyn ContentStore>::search_courses);

            // Arrival order does not matter: all three feed one candidate
            // list that is deduplicated and re-ranked below.
            let (articles, jobs, courses) = tokio::join!(articles, jobs, courses);
            for rows in [articles, jobs, courses] {
                match rows {
                    Ok(Ok(rows)) => candidates.extend(rows),
                    Ok(Err(e)) => tracing::warn!("content store query failed: {e}"),
                    Err(e) => tracing::warn!("content store task failed: {e}"),
                }
            }
        }

        for candidate in &mut candidates {
            candidate.relevance = Some(relevance_score(
                &candidate.title,
                &candidate.description,
                normalized,
            ));
        }

        dedup_by_url(&mut candidates);
        candidates.sort_by(compare_ranked);
        candidates.truncate(self.config.max_results);

        SearchOutcome {
            results: candidates,
            suggestions: suggest::suggestions_for(normalized, self.config.max_suggestions),
            source: SearchSource::LocalFallback,
            total_hits: 0,
            processing_time_ms: 0,
        }
    }

    /// Publish an outcome to the session unless a newer search has been
    /// issued since it was scheduled.
    async fn commit(&self, outcome: SearchOutcome, generation: u64) {
        let mut session = self.session.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!("discarding superseded results (generation {generation})");
            return;
        }
        session.results = outcome.results;
        session.suggestions = outcome.suggestions;
        session.source = outcome.source;
        session.total_hits = outcome.total_hits;
        session.processing_time_ms = outcome.processing_time_ms;
        session.loading = false;
    }
}

/// Run one relational query on the blocking pool.
fn store_query(
    store: &Arc<dyn ContentStore>,
    query: &str,
    limit: usize,
    op: fn(&(dyn ContentStore + 'static), &str, usize) -> Result<Vec<SearchResult>, StoreError>,
) -> JoinHandle<Result<Vec<SearchResult>, StoreError>> {
    let store = Arc::clone(store);
    let query = query.to_string();
    tokio::task::spawn_blocking(move || op(store.as_ref(), &query, limit))
}

/// Ids are only unique per source; the URL is the stable cross-source key.
/// Keeps the higher-scored occurrence. First-seen order is preserved so the
/// overall ranking stays deterministic across runs.
fn dedup_by_url(candidates: &mut Vec<SearchResult>) {
    let mut index_of: std::collections::HashMap<String, usize> = std::collections::HashMap::new();
    let mut kept: Vec<SearchResult> = Vec::with_capacity(candidates.len());
    for candidate in candidates.drain(..) {
        match index_of.get(&candidate.url) {
            Some(&i) => {
                if candidate.relevance > kept[i].relevance {
                    kept[i] = candidate;
                }
            }
            None => {
                index_of.insert(candidate.url.clone(), kept.len());
                kept.push(candidate);
            }
        }
    }
    *candidates = kept;
}
