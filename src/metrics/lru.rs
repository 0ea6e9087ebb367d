//! LRU Cache Metrics
//!
//! Metrics specific to the LRU (Least Recently Used) cache algorithm.

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// LRU-specific metrics (extends CoreCacheMetrics).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LruCacheMetrics {
    /// Core metrics common to all cache algorithms
    pub core: CoreCacheMetrics,

    /// Accesses that actually relinked an entry to the front of the recency
    /// list. Hits on the entry that is already most recently used do not count.
    pub promotions: u64,

    /// Number of times the cache was cleared.
    pub clears: u64,
}

impl LruCacheMetrics {
    /// Creates a zeroed set of LRU metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an entry being moved to the most recently used position.
    #[inline]
    pub fn record_promotion(&mut self) {
        self.promotions += 1;
    }

    /// Records a full clear of the cache.
    #[inline]
    pub fn record_clear(&mut self) {
        self.clears += 1;
    }

    /// Converts LRU metrics to a BTreeMap for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();
        metrics.insert("promotions".to_string(), self.promotions as f64);
        metrics.insert("clears".to_string(), self.clears as f64);
        metrics
    }
}

impl CacheMetrics for LruCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "LRU"
    }
}
