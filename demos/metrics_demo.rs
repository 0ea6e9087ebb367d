//! Cache Metrics Demonstration
//!
//! Runs a skewed workload against caches of different sizes and prints the
//! metrics each one reports.
//!
//! Run with: cargo run --example metrics_demo

use recency_cache::metrics::CacheMetrics;
use recency_cache::LruCache;
use std::collections::BTreeMap;

/// Cache-aside loop: get, and on a miss put the "fetched" value.
fn run_workload(capacity: usize) -> LruCache<u32, String> {
    let mut cache = LruCache::new(capacity);
    let mut state = 0x2545_f491u32;

    for _ in 0..10_000 {
        // xorshift
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;

        // Most traffic lands on a small hot set.
        let key = if state % 10 < 8 { state % 50 } else { state % 1_000 };
        if cache.get(&key).is_none() {
            cache.put(key, format!("value-{}", key));
        }
    }
    cache
}

fn display_metrics(name: &str, metrics: &BTreeMap<String, f64>) {
    println!("{}", name);
    for (key, value) in metrics {
        if key.ends_with("_rate") {
            println!("   {:<14} {:>8.2}%", key, value * 100.0);
        } else {
            println!("   {:<14} {:>9}", key, *value as u64);
        }
    }
    println!();
}

fn main() {
    println!("LRU Cache Metrics");
    println!("=================\n");

    for capacity in [10, 50, 200] {
        let cache = run_workload(capacity);
        let label = format!("{} capacity={} (len={})", cache.algorithm_name(), capacity, cache.len());
        display_metrics(&label, &cache.metrics());
    }

    println!("Metrics are reported in a BTreeMap, so the keys above always print in the same order.");
}
