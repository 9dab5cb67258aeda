use bson::Document as BsonDocument;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use crate::cache::key::CacheKey;
use crate::cache::metrics::{CacheMetrics, CacheMetricsSnapshot};

/// The read-cache seam. The manager only sees this trait, so tests can
/// substitute a spy or a no-op without touching global state.
pub trait ReadCache: Send + Sync {
    fn get(&self, key: &CacheKey) -> Option<Vec<BsonDocument>>;
    fn put(&self, key: CacheKey, docs: Vec<BsonDocument>);
    /// Drops every entry unconditionally. Called after any write.
    fn flush(&self);
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot::default()
    }
}

/// The default cache: an unbounded map with full-flush-on-write eviction.
/// No TTL and no partial invalidation; staleness after a write is impossible
/// because every write flushes everything.
#[derive(Clone, Default)]
pub struct QueryCache {
    store: Arc<RwLock<HashMap<CacheKey, Vec<BsonDocument>>>>,
    metrics: Arc<CacheMetrics>,
}

impl QueryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReadCache for QueryCache {
    fn get(&self, key: &CacheKey) -> Option<Vec<BsonDocument>> {
        let guard = self.store.read();
        match guard.get(key) {
            Some(docs) => {
                self.metrics.hits.fetch_add(1, Ordering::Relaxed);
                // Returned unchanged; no freshness check.
                Some(docs.clone())
            }
            None => {
                self.metrics.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    fn put(&self, key: CacheKey, docs: Vec<BsonDocument>) {
        self.store.write().insert(key, docs);
        self.metrics.inserts.fetch_add(1, Ordering::Relaxed);
    }

    fn flush(&self) {
        self.store.write().clear();
        self.metrics.flushes.fetch_add(1, Ordering::Relaxed);
    }

    fn len(&self) -> usize {
        self.store.read().len()
    }

    fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics.snapshot()
    }
}

/// Cache that never stores anything. Backs the legacy "simple" manager mode
/// and test substitution.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

impl ReadCache for NoopCache {
    fn get(&self, _key: &CacheKey) -> Option<Vec<BsonDocument>> {
        None
    }

    fn put(&self, _key: CacheKey, _docs: Vec<BsonDocument>) {}

    fn flush(&self) {}

    fn len(&self) -> usize {
        0
    }
}
