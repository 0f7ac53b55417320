//! Result Cache
//!
//! Remembers the last few successful answers so revisiting a question does
//! not hit the backend again.
//!
//! Keys are `search_results_` followed by the query text exactly as entered
//! (after trimming). There is no normalization: "cows" and "Cows" are two
//! entries. Pruning drops the oldest keys in enumeration order; reading an
//! entry does not refresh it.

pub mod storage;

pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};

use crate::types::{SearchQuery, SearchResponse};
use tracing::{debug, warn};

pub const CACHE_KEY_PREFIX: &str = "search_results_";

/// Entries kept after pruning
pub const DEFAULT_KEEP: usize = 10;

/// Storage key for a query
pub fn cache_key(query: &SearchQuery) -> String {
    format!("{}{}", CACHE_KEY_PREFIX, query.as_str())
}

/// Bounded cache of search responses over any [`KeyValueStore`]
pub struct ResultCache<S> {
    store: S,
}

impl<S: KeyValueStore> ResultCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Look up a cached response
    ///
    /// Unparseable entries are deleted and reported as a miss.
    pub fn get(&mut self, query: &SearchQuery) -> Option<SearchResponse> {
        let key = cache_key(query);

        let raw = match self.store.get_item(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key = %key, "Cache read failed: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<SearchResponse>(&raw) {
            Ok(response) => {
                debug!(key = %key, "Cache hit");
                Some(response)
            }
            Err(e) => {
                warn!(key = %key, "Dropping corrupt cache entry: {}", e);
                if let Err(e) = self.store.remove_item(&key) {
                    warn!(key = %key, "Failed to remove corrupt cache entry: {}", e);
                }
                None
            }
        }
    }

    /// Store a response, replacing any previous one for the same query
    pub fn put(&mut self, query: &SearchQuery, response: &SearchResponse) -> Result<(), StorageError> {
        let value = serde_json::to_string(response)?;
        self.store.set_item(&cache_key(query), &value)
    }

    /// Prune down to `keep` entries, oldest first. Returns how many were removed.
    pub fn evict_oldest(&mut self, keep: usize) -> Result<usize, StorageError> {
        let keys = self.cached_keys()?;
        if keys.len() <= keep {
            return Ok(0);
        }

        let excess = keys.len() - keep;
        for key in keys.iter().take(excess) {
            self.store.remove_item(key)?;
        }
        debug!(removed = excess, kept = keep, "Pruned result cache");
        Ok(excess)
    }

    /// Cached query texts, oldest first
    pub fn queries(&self) -> Result<Vec<String>, StorageError> {
        Ok(self
            .cached_keys()?
            .into_iter()
            .map(|key| key[CACHE_KEY_PREFIX.len()..].to_string())
            .collect())
    }

    /// Remove every cache entry, leaving unrelated keys alone
    pub fn clear(&mut self) -> Result<usize, StorageError> {
        self.evict_oldest(0)
    }

    fn cached_keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self
            .store
            .keys()?
            .into_iter()
            .filter(|key| key.starts_with(CACHE_KEY_PREFIX))
            .collect())
    }
}
