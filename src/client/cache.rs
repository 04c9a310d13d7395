//! Time-bounded cache of recent suggestion responses.
//!
//! Keyed by the exact normalized query. Expired entries are evicted lazily
//! on lookup, never swept proactively. Only responses that ran to completion
//! are inserted; the controller enforces that.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::core::species::TieredHits;

struct CacheEntry {
    hits: TieredHits,
    stored_at: Instant,
}

pub struct SuggestionCache {
    ttl: Duration,
    entries: HashMap<String, CacheEntry>,
}

impl SuggestionCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Unexpired entry for `query`, if any. An expired entry is removed.
    pub fn get(&mut self, query: &str) -> Option<TieredHits> {
        let now = Instant::now();
        match self.entries.get(query) {
            Some(entry) if now.duration_since(entry.stored_at) < self.ttl => {
                Some(entry.hits.clone())
            }
            Some(_) => {
                self.entries.remove(query);
                None
            }
            None => None,
        }
    }

    pub fn insert(&mut self, query: String, hits: TieredHits) {
        self.entries.insert(
            query,
            CacheEntry {
                hits,
                stored_at: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
