//! Concurrent Cache Benchmarks
//!
//! Compares `ConcurrentLruCache` against a plain `Mutex<LruCache>` under
//! read-heavy, write-heavy and peek-only access patterns.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use parking_lot::Mutex;
use recency_cache::{ConcurrentLruCache, LruCache};
use std::sync::Arc;
use std::thread;

const CACHE_SIZE: usize = 10_000;
const OPS_PER_THREAD: usize = 1_000;

fn filled_concurrent() -> Arc<ConcurrentLruCache<usize, usize>> {
    let cache = Arc::new(ConcurrentLruCache::new(CACHE_SIZE));
    for i in 0..CACHE_SIZE {
        cache.put(i, i);
    }
    cache
}

fn filled_mutex() -> Arc<Mutex<LruCache<usize, usize>>> {
    let mut cache = LruCache::new(CACHE_SIZE);
    for i in 0..CACHE_SIZE {
        cache.put(i, i);
    }
    Arc::new(Mutex::new(cache))
}

fn run_threads<F>(threads: usize, op: F)
where
    F: Fn(usize, usize) + Send + Sync + 'static + Clone,
{
    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let op = op.clone();
            thread::spawn(move || {
                for i in 0..OPS_PER_THREAD {
                    op(t, i);
                }
            })
        })
        .collect();
    for handle in handles {
        let _ = handle.join();
    }
}

/// Benchmark promoting reads
fn concurrent_reads(c: &mut Criterion) {
    let mut group = c.benchmark_group("Concurrent Reads");

    for &threads in &[1usize, 4, 8] {
        group.throughput(Throughput::Elements((threads * OPS_PER_THREAD) as u64));

        let cache = filled_concurrent();
        group.bench_with_input(BenchmarkId::new("RwLock get", threads), &threads, |b, &n| {
            b.iter(|| {
                let cache = Arc::clone(&cache);
                run_threads(n, move |t, i| {
                    black_box(cache.get(&((t * 131 + i) % CACHE_SIZE)));
                });
            });
        });

        let cache = filled_concurrent();
        group.bench_with_input(BenchmarkId::new("RwLock peek", threads), &threads, |b, &n| {
            b.iter(|| {
                let cache = Arc::clone(&cache);
                run_threads(n, move |t, i| {
                    black_box(cache.peek(&((t * 131 + i) % CACHE_SIZE)));
                });
            });
        });

        let cache = filled_mutex();
        group.bench_with_input(BenchmarkId::new("Mutex get", threads), &threads, |b, &n| {
            b.iter(|| {
                let cache = Arc::clone(&cache);
                run_threads(n, move |t, i| {
                    black_box(cache.lock().get(&((t * 131 + i) % CACHE_SIZE)).copied());
                });
            });
        });
    }

    group.finish();
}

/// Benchmark inserts of fresh keys, which evict on every call once full
fn concurrent_writes(c: &mut Criterion) {
    let mut group = c.benchmark_group("Concurrent Writes");

    for &threads in &[1usize, 4, 8] {
        group.throughput(Throughput::Elements((threads * OPS_PER_THREAD) as u64));

        let cache = filled_concurrent();
        group.bench_with_input(BenchmarkId::new("RwLock put", threads), &threads, |b, &n| {
            b.iter(|| {
                let cache = Arc::clone(&cache);
                run_threads(n, move |t, i| {
                    black_box(cache.put(CACHE_SIZE + t * OPS_PER_THREAD + i, i));
                });
            });
        });
    }

    group.finish();
}

criterion_group!(benches, concurrent_reads, concurrent_writes);
criterion_main!(benches);
