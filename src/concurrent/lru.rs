//! Concurrent LRU Cache Implementation
//!
//! A thread-safe LRU cache: one [`LruCache`] behind one `parking_lot::RwLock`.
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │               ConcurrentLruCache              │
//! │                                               │
//! │   get / put / remove ──▶ write()  ─┐          │
//! │   peek / len / keys  ──▶ read()   ─┤          │
//! │                                    ▼          │
//! │                  ┌──────────────────────────┐ │
//! │                  │ RwLock<LruCache<K,V,S>>  │ │
//! │                  └──────────────────────────┘ │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! # Trade-offs
//!
//! - **Pros**: strict global LRU order; capacity is exact
//! - **Cons**: every promoting access serializes on the one lock
//!
//! # Thread Safety
//!
//! `ConcurrentLruCache` is `Send + Sync` whenever its keys, values and hasher
//! are, and can be shared via `Arc`. No guard ever leaves a method, so user
//! closures passed to `get_with` and friends must not call back into the
//! same cache.

extern crate alloc;

use crate::config::LruCacheConfig;
use crate::error::ConfigError;
use crate::lru::LruCache;
use crate::metrics::CacheMetrics;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use parking_lot::RwLock;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

/// A thread-safe LRU cache with a single global recency order.
///
/// # Type Parameters
///
/// - `K`: Key type. Must implement `Hash + Eq` (and `Clone` to insert).
/// - `V`: Value type. Must implement `Clone` for [`get`](Self::get).
/// - `S`: Hash builder type. Defaults to `DefaultHashBuilder`.
///
/// # Example
///
/// ```rust
/// use recency_cache::concurrent::ConcurrentLruCache;
/// use std::sync::Arc;
///
/// let cache = Arc::new(ConcurrentLruCache::new(2));
///
/// cache.put("a".to_string(), 1);
/// cache.put("b".to_string(), 2);
/// assert_eq!(cache.get("a"), Some(1));
/// assert_eq!(cache.put("c".to_string(), 3), Some(("b".to_string(), 2)));
/// ```
pub struct ConcurrentLruCache<K, V, S = DefaultHashBuilder> {
    inner: RwLock<LruCache<K, V, S>>,
}

impl<K: Hash + Eq, V> ConcurrentLruCache<K, V> {
    /// Creates a cache holding at most `capacity` entries; 0 is clamped to 1.
    pub fn new(capacity: usize) -> Self {
        Self::from_cache(LruCache::new(capacity))
    }

    /// Creates a cache holding at most `capacity` entries, failing if
    /// `capacity` is 0.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        LruCache::try_new(capacity).map(Self::from_cache)
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> ConcurrentLruCache<K, V, S> {
    /// Creates a concurrent cache from a configuration with an optional hasher.
    ///
    /// ```rust
    /// use recency_cache::concurrent::ConcurrentLruCache;
    /// use recency_cache::config::LruCacheConfig;
    ///
    /// let cache: ConcurrentLruCache<String, i32> =
    ///     ConcurrentLruCache::init(LruCacheConfig { capacity: 10_000 }, None);
    /// assert_eq!(cache.cap(), 10_000);
    /// ```
    pub fn init(config: LruCacheConfig, hasher: Option<S>) -> Self
    where
        S: Default,
    {
        Self::from_cache(LruCache::init(config, hasher))
    }

    /// Creates a concurrent cache with a custom hash builder.
    pub fn with_hasher(capacity: usize, hash_builder: S) -> Self {
        Self::from_cache(LruCache::with_hasher(capacity, hash_builder))
    }

    /// Wraps an existing cache, keeping its contents and metrics.
    pub fn from_cache(cache: LruCache<K, V, S>) -> Self {
        ConcurrentLruCache {
            inner: RwLock::new(cache),
        }
    }

    /// Unwraps the cache.
    pub fn into_inner(self) -> LruCache<K, V, S> {
        self.inner.into_inner()
    }

    /// Returns the maximum number of entries.
    pub fn cap(&self) -> usize {
        self.inner.read().cap()
    }

    /// Returns the number of entries.
    ///
    /// The value may be stale by the time it is used if other threads are
    /// writing.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns `true` if the cache contains no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Retrieves a clone of the value and promotes the entry.
    ///
    /// Use [`get_with()`](Self::get_with) to avoid the clone.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        self.inner.write().get(key).cloned()
    }

    /// Promotes the entry and applies `f` to its value under the lock.
    pub fn get_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&V) -> R,
    {
        self.inner.write().get(key).map(f)
    }

    /// Promotes the entry and applies `f` to a mutable reference to its value.
    ///
    /// ```rust
    /// # use recency_cache::concurrent::ConcurrentLruCache;
    /// let cache = ConcurrentLruCache::new(4);
    /// cache.put("counter", 0);
    /// cache.get_mut_with(&"counter", |v| *v += 1);
    /// assert_eq!(cache.get(&"counter"), Some(1));
    /// ```
    pub fn get_mut_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&mut V) -> R,
    {
        self.inner.write().get_mut(key).map(f)
    }

    /// Retrieves a clone of the value without promoting the entry.
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        self.inner.read().peek(key).cloned()
    }

    /// Applies `f` to the value under the shared lock, without promotion.
    pub fn peek_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&V) -> R,
    {
        self.inner.read().peek(key).map(f)
    }

    /// Returns `true` if `key` is cached. Does not promote.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.read().contains(key)
    }

    /// Removes a key, returning its value if it existed.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.write().remove(key)
    }

    /// Removes a key, returning `true` if it existed.
    pub fn delete<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.write().delete(key)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_oldest(&self) -> Option<(K, V)> {
        self.inner.write().pop_oldest()
    }

    /// Removes all entries.
    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// Changes the capacity, returning how many entries were evicted.
    pub fn resize(&self, capacity: usize) -> usize {
        self.inner.write().resize(capacity)
    }

    /// Records a miss that happened outside the cache, e.g. a lookup that was
    /// answered by the origin before `get` was ever called.
    pub fn record_miss(&self) {
        self.inner.write().record_miss();
    }

    /// Returns a snapshot of the cached keys in unspecified order.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.inner.read().keys().cloned().collect()
    }

    /// Returns the least recently used key without promoting it.
    pub fn oldest(&self) -> Option<K>
    where
        K: Clone,
    {
        self.inner.read().oldest().cloned()
    }

    /// Returns the most recently used key.
    pub fn newest(&self) -> Option<K>
    where
        K: Clone,
    {
        self.inner.read().newest().cloned()
    }

    /// Runs `f` with shared access to the whole cache, e.g. to iterate it.
    pub fn with_read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&LruCache<K, V, S>) -> R,
    {
        f(&self.inner.read())
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> ConcurrentLruCache<K, V, S> {
    /// Inserts or updates a key, returning the evicted entry if any.
    pub fn put(&self, key: K, value: V) -> Option<(K, V)> {
        self.inner.write().put(key, value)
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> CacheMetrics for ConcurrentLruCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.inner.read().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        "ConcurrentLRU"
    }
}

impl<K, V, S> fmt::Debug for ConcurrentLruCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_read() {
            Some(cache) => f
                .debug_struct("ConcurrentLruCache")
                .field("inner", &*cache)
                .finish(),
            None => f
                .debug_struct("ConcurrentLruCache")
                .field("inner", &"<locked>")
                .finish(),
        }
    }
}
