#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## How the Pieces Fit
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        LruCache<K, V, S>                     │
//! │                                                              │
//! │   HashMap<K, EntryId>            RecencyList<K, V>           │
//! │   ┌───────────────┐      ┌──────────────────────────────┐    │
//! │   │ key ─▶ EntryId├─────▶│ HEAD ⇄ MRU ⇄ ... ⇄ LRU ⇄ TAIL │    │
//! │   └───────────────┘      └──────────────────────────────┘    │
//! │                                                              │
//! │   LruCacheMetrics: hits, misses, evictions, ...              │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Reference
//!
//! | Operation | Method | Changes recency |
//! |-----------|--------|-----------------|
//! | Get | [`LruCache::get`], [`LruCache::get_mut`] | yes |
//! | Put | [`LruCache::put`] | yes |
//! | Delete | [`LruCache::delete`], [`LruCache::remove`] | n/a |
//! | Clear | [`LruCache::clear`] | n/a |
//! | Size / Capacity | [`LruCache::len`], [`LruCache::cap`] | no |
//! | Keys | [`LruCache::keys`], [`LruCache::iter`] | no |
//! | Oldest / Newest | [`LruCache::oldest`], [`LruCache::newest`] | no |
//! | Peek | [`LruCache::peek`], [`LruCache::contains`] | no |
//!
//! ## Performance Characteristics
//!
//! | Get | Put | Delete | Clear | Keys / Iter |
//! |-----|-----|--------|-------|-------------|
//! | O(1)| O(1)| O(1)   | O(n)  | O(n)        |
//!
//! ## Code Examples
//!
//! ```rust
//! use recency_cache::LruCache;
//! use recency_cache::config::LruCacheConfig;
//!
//! let config = LruCacheConfig { capacity: 2 };
//! let mut cache: LruCache<&str, i32> = LruCache::init(config, None);
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");      // "a" becomes most recently used
//! cache.put("c", 3);    // "b" evicted (least recently used)
//! assert!(cache.get(&"b").is_none());
//! assert_eq!(cache.oldest(), Some(&"a"));
//! assert_eq!(cache.newest(), Some(&"c"));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Effect |
//! |---------|---------|--------|
//! | `hashbrown` | yes | Use `hashbrown` for the index; keeps the crate `no_std` |
//! | `std` | no | Implement `std::error::Error` for the error types |
//! | `concurrent` | no | `ConcurrentLruCache` on `parking_lot` (implies `std`) |
//! | `nightly` | no | Forward `hashbrown/nightly` |

#![no_std]

extern crate alloc;

#[cfg(any(feature = "std", not(feature = "hashbrown")))]
extern crate std;

/// Slot type stored in the recency list arena.
pub(crate) mod entry;

/// Doubly linked recency list with head and tail sentinels.
///
/// Entries live in a slot arena and link to each other by index, so the
/// list needs no unsafe code. Stale handles are caught by per-slot
/// generation counters.
pub(crate) mod list;

/// Cache configuration structures.
pub mod config;

/// Error types for rejected configuration and failed invariant checks.
pub mod error;

/// Least Recently Used (LRU) cache implementation.
///
/// Provides a fixed-size cache that evicts the least recently used item when
/// an insertion would exceed the capacity.
pub mod lru;

/// Cache metrics system.
///
/// Counts hits, misses, insertions, updates, evictions and removals, and
/// reports them through the [`metrics::CacheMetrics`] trait.
pub mod metrics;

/// Concurrent cache implementations.
///
/// Available when the `concurrent` feature is enabled.
#[cfg(feature = "concurrent")]
pub mod concurrent;

pub use error::{ConfigError, InvariantError};
pub use lru::LruCache;

#[cfg(feature = "concurrent")]
pub use concurrent::ConcurrentLruCache;
