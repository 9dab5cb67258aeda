mod core;
mod key;
mod metrics;

pub use core::{NoopCache, QueryCache, ReadCache};
pub use key::CacheKey;
pub use metrics::{CacheMetrics, CacheMetricsSnapshot};
