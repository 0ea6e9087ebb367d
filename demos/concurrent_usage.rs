//! Concurrent Cache Usage Examples
//!
//! Shares one `ConcurrentLruCache` between several threads.
//!
//! Run with: cargo run --example concurrent_usage --features concurrent

use recency_cache::config::LruCacheConfig;
use recency_cache::metrics::CacheMetrics;
use recency_cache::ConcurrentLruCache;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

const NUM_THREADS: usize = 8;
const OPS_PER_THREAD: usize = 10_000;

fn main() {
    println!("Concurrent LRU Cache");
    println!("====================\n");

    let cache: Arc<ConcurrentLruCache<String, usize>> =
        Arc::new(ConcurrentLruCache::init(LruCacheConfig { capacity: 1_000 }, None));

    let start = Instant::now();
    let handles: Vec<_> = (0..NUM_THREADS)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..OPS_PER_THREAD {
                    // Threads overlap on a shared key range.
                    let key = format!("key_{}", (t * 97 + i) % 2_000);
                    if cache.get(&key).is_none() {
                        cache.put(key, i);
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        if handle.join().is_err() {
            eprintln!("worker thread panicked");
        }
    }
    let elapsed = start.elapsed();

    let total_ops = NUM_THREADS * OPS_PER_THREAD;
    println!("{} threads x {} ops in {:?}", NUM_THREADS, OPS_PER_THREAD, elapsed);
    println!(
        "throughput: {:.0} ops/sec",
        total_ops as f64 / elapsed.as_secs_f64()
    );
    println!("entries: {} / {}", cache.len(), cache.cap());
    println!("oldest: {:?}", cache.oldest());
    println!("newest: {:?}", cache.newest());

    let metrics = cache.metrics();
    println!(
        "hit rate: {:.1}%, evictions: {}",
        metrics["hit_rate"] * 100.0,
        metrics["evictions"] as u64
    );

    let value = cache.get_with("key_0", |v| *v);
    println!("key_0 -> {:?}", value);
}
