//! Concurrent Cache Implementations
//!
//! This module provides a thread-safe wrapper around [`LruCache`](crate::LruCache)
//! for callers that want to share one cache across threads without writing
//! their own locking.
//!
//! # Architecture
//!
//! [`ConcurrentLruCache`] puts a single `parking_lot::RwLock` around one
//! `LruCache`. There is exactly one recency list, so eviction follows global
//! recency order: the entry evicted is always the least recently used one
//! across every thread's accesses.
//!
//! ## Which Calls Take Which Lock
//!
//! `get` relinks the entry it finds, so it is a write even though it looks
//! like a read. Only operations that leave the recency order alone can share
//! the lock:
//!
//! | Write lock | Read lock |
//! |------------|-----------|
//! | `get`, `get_with`, `get_mut_with` | `peek`, `peek_with`, `contains` |
//! | `put`, `remove`, `delete`, `clear` | `len`, `is_empty`, `cap` |
//! | `pop_oldest`, `resize`, `record_miss` | `keys`, `oldest`, `newest`, `metrics` |
//!
//! Hot read-mostly workloads that can live without promotion should prefer
//! `peek` and `peek_with`.
//!
//! # Example
//!
//! ```rust
//! use recency_cache::concurrent::ConcurrentLruCache;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let cache = Arc::new(ConcurrentLruCache::new(1000));
//!
//! let handles: Vec<_> = (0..4).map(|t| {
//!     let cache = Arc::clone(&cache);
//!     thread::spawn(move || {
//!         for i in 0..100 {
//!             let key = format!("key_{}_{}", t, i);
//!             cache.put(key.clone(), i);
//!             let _ = cache.get(&key);
//!         }
//!     })
//! }).collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(cache.len(), 400);
//! ```
//!
//! # Zero-Copy Access
//!
//! `get` returns a clone of the value so that no guard escapes. Use
//! `get_with()` to work on the value while the lock is held:
//!
//! ```rust
//! # use recency_cache::concurrent::ConcurrentLruCache;
//! let cache = ConcurrentLruCache::new(8);
//! cache.put("greeting", String::from("hello world"));
//! assert_eq!(cache.get_with(&"greeting", |value| value.len()), Some(11));
//! ```

mod lru;

pub use self::lru::ConcurrentLruCache;
