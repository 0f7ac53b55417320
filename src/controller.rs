//! Results Controller
//!
//! Drives one question through `Idle → Loading → {Success, Error}`:
//! cache first, then the backend, then write-through on a usable answer.
//! Every failure ends in a user-facing [`FailureKind`]; nothing escapes.
//!
//! The network half is split out (`begin` / `complete`) so the TUI can run
//! the request on a background task while it keeps drawing the loading view.

use crate::cache::{KeyValueStore, ResultCache, DEFAULT_KEEP};
use crate::search::{SearchBackend, SearchError};
use crate::types::{SearchQuery, SearchResponse};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const VALIDATION_MESSAGE: &str =
    "Please enter a valid query. For example: \"Can Cows Make Friends?\"";

pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred while searching. Please try again.";

/// User-visible failure categories
#[derive(Debug, Clone, PartialEq)]
pub enum FailureKind {
    /// Backend judged the question unanswerable (`is_valid == false`)
    ValidationRejected,
    /// Backend quota hit; carries the backend's own message
    RateLimited(String),
    TransportOrServerError,
}

impl FailureKind {
    pub fn user_message(&self) -> &str {
        match self {
            FailureKind::ValidationRejected => VALIDATION_MESSAGE,
            FailureKind::RateLimited(message) => message,
            FailureKind::TransportOrServerError => GENERIC_FAILURE_MESSAGE,
        }
    }
}

impl From<SearchError> for FailureKind {
    fn from(error: SearchError) -> Self {
        match error {
            SearchError::RateLimited(message) => FailureKind::RateLimited(message),
            SearchError::RequestFailed(_) => FailureKind::TransportOrServerError,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading {
        query: SearchQuery,
    },
    Success {
        query: SearchQuery,
        response: SearchResponse,
        from_cache: bool,
    },
    Error {
        query: SearchQuery,
        kind: FailureKind,
    },
}

impl ViewState {
    pub fn query(&self) -> Option<&SearchQuery> {
        match self {
            ViewState::Idle => None,
            ViewState::Loading { query }
            | ViewState::Success { query, .. }
            | ViewState::Error { query, .. } => Some(query),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading { .. })
    }
}

/// What `begin` decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// Served from cache; state is already `Success`
    Cached,
    /// State is `Loading`; the caller must fetch and `complete`
    Fetch,
}

pub struct ResultsController<S> {
    backend: Arc<dyn SearchBackend>,
    cache: ResultCache<S>,
    keep: usize,
    state: ViewState,
}

impl<S: KeyValueStore> ResultsController<S> {
    pub fn new(backend: Arc<dyn SearchBackend>, cache: ResultCache<S>) -> Self {
        Self::with_capacity(backend, cache, DEFAULT_KEEP)
    }

    /// Create a controller keeping at most `keep` cached answers
    ///
    /// The cache is pruned once up front.
    pub fn with_capacity(backend: Arc<dyn SearchBackend>, cache: ResultCache<S>, keep: usize) -> Self {
        let mut controller = Self {
            backend,
            cache,
            keep,
            state: ViewState::Idle,
        };
        controller.prune();
        controller
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn backend(&self) -> Arc<dyn SearchBackend> {
        Arc::clone(&self.backend)
    }

    pub fn cache(&self) -> &ResultCache<S> {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut ResultCache<S> {
        &mut self.cache
    }

    /// Start a new query: serve it from cache or move to `Loading`
    pub fn begin(&mut self, query: SearchQuery) -> Lookup {
        if let Some(response) = self.cache.get(&query) {
            debug!(query = %query, "Serving cached answer");
            self.state = ViewState::Success {
                query,
                response,
                from_cache: true,
            };
            return Lookup::Cached;
        }

        info!(query = %query, "Cache miss, fetching");
        self.state = ViewState::Loading { query };
        Lookup::Fetch
    }

    /// Apply the backend outcome for `query`
    ///
    /// Returns `false` and changes nothing if the controller is no longer
    /// loading that query (the user moved on while the request was in flight).
    pub fn complete(
        &mut self,
        query: &SearchQuery,
        outcome: Result<SearchResponse, SearchError>,
    ) -> bool {
        match &self.state {
            ViewState::Loading { query: loading } if loading == query => {}
            _ => {
                debug!(query = %query, "Discarding stale search outcome");
                return false;
            }
        }

        let query = query.clone();
        self.state = match outcome {
            Ok(response) if !response.is_valid => {
                info!(query = %query, "Backend rejected query");
                ViewState::Error {
                    query,
                    kind: FailureKind::ValidationRejected,
                }
            }
            Ok(response) => {
                if let Err(e) = self.cache.put(&query, &response) {
                    warn!(query = %query, "Failed to cache answer: {}", e);
                }
                self.prune();
                ViewState::Success {
                    query,
                    response,
                    from_cache: false,
                }
            }
            Err(error) => {
                warn!(query = %query, "Search failed: {}", error);
                ViewState::Error {
                    query,
                    kind: FailureKind::from(error),
                }
            }
        };
        true
    }

    /// Run a query to completion
    pub async fn load(&mut self, query: SearchQuery) -> &ViewState {
        if self.begin(query.clone()) == Lookup::Fetch {
            let outcome = self.backend.search(&query).await;
            self.complete(&query, outcome);
        }
        &self.state
    }

    /// Back to `Idle`; any in-flight outcome will be discarded
    pub fn reset(&mut self) {
        self.state = ViewState::Idle;
    }

    fn prune(&mut self) {
        if let Err(e) = self.cache.evict_oldest(self.keep) {
            warn!("Failed to prune result cache: {}", e);
        }
    }
}
