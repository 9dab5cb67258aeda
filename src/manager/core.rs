use crate::cache::{CacheMetricsSnapshot, NoopCache, QueryCache, ReadCache};
use crate::store::StoreBackend;

/// Behavior knobs for [`AnimalManager`].
#[derive(Debug, Clone, Copy)]
pub struct ManagerOptions {
    /// Swallow store faults into neutral empty/zero/false results (the
    /// legacy behavior). When off, store faults are raised.
    pub lenient: bool,
    /// When off the manager runs in the legacy "simple" mode: no read cache.
    pub use_cache: bool,
}

impl Default for ManagerOptions {
    fn default() -> Self {
        Self { lenient: true, use_cache: true }
    }
}

/// Owns the connection to the animal collection and mediates every read and
/// write: validation up front, a memoized projected read in the middle, and
/// a lenient fault boundary at the bottom.
pub struct AnimalManager {
    pub(crate) backend: Box<dyn StoreBackend>,
    pub(crate) cache: Box<dyn ReadCache>,
    pub(crate) lenient: bool,
}

impl AnimalManager {
    /// Manager with the default read cache and lenient fault handling.
    #[must_use]
    pub fn new(backend: Box<dyn StoreBackend>) -> Self {
        Self::with_options(backend, ManagerOptions::default())
    }

    #[must_use]
    pub fn with_options(backend: Box<dyn StoreBackend>, options: ManagerOptions) -> Self {
        let cache: Box<dyn ReadCache> = if options.use_cache {
            Box::new(QueryCache::new())
        } else {
            Box::new(NoopCache)
        };
        Self { backend, cache, lenient: options.lenient }
    }

    /// Manager with an injected cache, for substitution in tests.
    #[must_use]
    pub fn with_cache(
        backend: Box<dyn StoreBackend>,
        cache: Box<dyn ReadCache>,
        lenient: bool,
    ) -> Self {
        Self { backend, cache, lenient }
    }

    /// Drops every cache entry unconditionally.
    pub fn clear_cache(&self) {
        self.cache.flush();
    }

    #[must_use]
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn cache_metrics(&self) -> CacheMetricsSnapshot {
        self.cache.metrics_snapshot()
    }

    /// Direct access to the store boundary, for ingestion paths that bypass
    /// per-record validation.
    #[must_use]
    pub fn backend(&self) -> &dyn StoreBackend {
        self.backend.as_ref()
    }
}
