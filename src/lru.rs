//! Least Recently Used (LRU) Cache Implementation
//!
//! This module provides a fixed-capacity LRU cache with O(1) average-time
//! `get`, `put` and `delete`.
//!
//! # Algorithm
//!
//! The cache fuses two structures:
//!
//! - a hash index mapping each key to the handle of its entry, and
//! - a recency list holding the entries themselves, most recently used first.
//!
//! Every operation does one hash lookup and then one O(1) splice on the list.
//! When a `put` of a new key takes the cache over capacity, the entry right
//! before the tail sentinel (the least recently used one) is evicted. Exactly
//! one entry is evicted per `put`, and only recency decides which.
//!
//! ```text
//!   index                       recency list (arena)
//!   ┌─────┬──────────┐
//!   │ "a" │ EntryId 3├──┐   head ─► [3: "a"] ◄──► [2: "c"] ◄──► [4: "b"] ◄── tail
//!   │ "b" │ EntryId 4├──┼──────────────────────────────────────────▲
//!   │ "c" │ EntryId 2├──┼───────────────────────────▲
//!   └─────┴──────────┘  └──────────▲
//!                              MRU                                 LRU
//! ```
//!
//! # Invariants
//!
//! After every public operation:
//!
//! 1. the index and the list hold exactly the same set of keys;
//! 2. walking the list from the head yields keys from most to least recently used;
//! 3. `len() <= cap()`;
//! 4. `cap() >= 1`.
//!
//! [`LruCache::check_invariants`] verifies all four by walking the list.
//!
//! # Performance Characteristics
//!
//! - Get / Put / Delete / Peek: O(1) average
//! - Clear: O(n)
//! - Iteration and `check_invariants`: O(n)
//!
//! # Thread Safety
//!
//! This implementation never locks. It is `Send`/`Sync` whenever its keys,
//! values and hasher are, so it can be shared behind a `Mutex` or `RwLock`;
//! the `concurrent` feature provides such a wrapper.

extern crate alloc;

use crate::config::LruCacheConfig;
use crate::entry::EntryId;
use crate::error::{ConfigError, InvariantError};
use crate::list::RecencyList;
use crate::metrics::{CacheMetrics, LruCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;
use log::{debug, trace};

pub use crate::list::Iter;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Upper bound on index buckets reserved up front; larger caches grow on demand.
const MAX_PREALLOCATED_KEYS: usize = 4096;

/// A fixed-capacity Least Recently Used (LRU) cache.
///
/// Reads through [`get`](Self::get) and [`get_mut`](Self::get_mut) promote the
/// entry to most recently used, which is why they take `&mut self`. Use
/// [`peek`](Self::peek), [`oldest`](Self::oldest) or [`newest`](Self::newest)
/// to look without disturbing the order.
///
/// # Examples
///
/// ```
/// use recency_cache::LruCache;
///
/// let mut cache = LruCache::new(2);
///
/// cache.put("apple", 1);
/// cache.put("banana", 2);
///
/// // Accessing an item makes it the most recently used
/// assert_eq!(cache.get(&"apple"), Some(&1));
///
/// // Adding beyond capacity evicts the least recently used item
/// assert_eq!(cache.put("cherry", 3), Some(("banana", 2)));
/// assert_eq!(cache.get(&"banana"), None);
/// assert_eq!(cache.get(&"apple"), Some(&1));
/// assert_eq!(cache.get(&"cherry"), Some(&3));
/// assert_eq!(cache.len(), 2);
/// ```
pub struct LruCache<K, V, S = DefaultHashBuilder> {
    cap: NonZeroUsize,
    list: RecencyList<K, V>,
    map: HashMap<K, EntryId, S>,
    metrics: LruCacheMetrics,
}

impl<K: Hash + Eq, V> LruCache<K, V> {
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// A `capacity` of 0 is clamped to 1. Use [`try_new`](Self::try_new) to
    /// reject it instead.
    pub fn new(capacity: usize) -> Self {
        Self::with_hasher(capacity, DefaultHashBuilder::default())
    }

    /// Creates a cache holding at most `capacity` entries, failing if
    /// `capacity` is 0.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Self::try_init(LruCacheConfig::new(capacity), None)
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> LruCache<K, V, S> {
    /// Creates a cache with the given capacity and hash builder.
    ///
    /// A `capacity` of 0 is clamped to 1.
    pub fn with_hasher(capacity: usize, hash_builder: S) -> Self {
        let cap = LruCacheConfig::new(capacity).clamped_capacity();
        Self::build(cap, hash_builder)
    }

    /// Creates a cache from a configuration and an optional hash builder.
    ///
    /// A configured capacity of 0 is clamped to 1.
    ///
    /// ```
    /// use recency_cache::config::LruCacheConfig;
    /// use recency_cache::LruCache;
    ///
    /// let cache: LruCache<u64, String> = LruCache::init(LruCacheConfig { capacity: 128 }, None);
    /// assert_eq!(cache.cap(), 128);
    /// ```
    pub fn init(config: LruCacheConfig, hasher: Option<S>) -> Self
    where
        S: Default,
    {
        Self::build(config.clamped_capacity(), hasher.unwrap_or_default())
    }

    /// Like [`init`](Self::init), but rejects a capacity of 0 with a
    /// [`ConfigError`] instead of clamping it.
    pub fn try_init(config: LruCacheConfig, hasher: Option<S>) -> Result<Self, ConfigError>
    where
        S: Default,
    {
        let cap = config.validate()?;
        Ok(Self::build(cap, hasher.unwrap_or_default()))
    }

    fn build(cap: NonZeroUsize, hash_builder: S) -> Self {
        let reserved = cap.get().min(MAX_PREALLOCATED_KEYS);
        LruCache {
            cap,
            list: RecencyList::with_capacity(reserved),
            map: HashMap::with_capacity_and_hasher(reserved, hash_builder),
            metrics: LruCacheMetrics::new(),
        }
    }

    /// Returns the maximum number of entries the cache holds.
    #[inline]
    pub fn cap(&self) -> usize {
        self.cap.get()
    }

    /// Returns the number of entries currently cached.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns the metrics collected so far.
    #[inline]
    pub fn lru_metrics(&self) -> &LruCacheMetrics {
        &self.metrics
    }

    /// Records a miss that did not go through [`get`](Self::get), such as a
    /// lookup answered by [`peek`](Self::peek) before fetching from the origin.
    #[inline]
    pub fn record_miss(&mut self) {
        self.metrics.core.record_miss();
    }

    /// Looks up `key` and, if present, makes it the most recently used entry.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let id = self.touch(key)?;
        self.list.get(id).map(|(_, v)| v)
    }

    /// Like [`get`](Self::get), but returns a mutable reference to the value.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let id = self.touch(key)?;
        self.list.get_mut(id).map(|(_, v)| v)
    }

    /// Returns the value for `key` without changing its recency.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let id = self.map.get(key)?;
        self.list.get(*id).map(|(_, v)| v)
    }

    /// Returns `true` if `key` is cached, without changing its recency.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    /// Removes `key`, returning its value if it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let id = self.map.remove(key)?;
        let (_, value) = self.list.remove(id)?;
        self.metrics.core.record_removal();
        Some(value)
    }

    /// Removes `key`, returning `true` if it was present.
    #[inline]
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.remove(key).is_some()
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_oldest(&mut self) -> Option<(K, V)> {
        let (key, value) = self.unlink_oldest()?;
        self.metrics.core.record_removal();
        Some((key, value))
    }

    /// Drops every entry. Capacity and metrics are kept.
    pub fn clear(&mut self) {
        let dropped = self.map.len();
        self.map.clear();
        self.list.clear();
        self.metrics.record_clear();
        debug!("cleared LRU cache, dropped {} entries", dropped);
    }

    /// Iterates over the cached keys in unspecified order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.map.keys()
    }

    /// Returns the least recently used key without changing the order.
    #[inline]
    pub fn oldest(&self) -> Option<&K> {
        self.list.back().map(|(k, _)| k)
    }

    /// Returns the most recently used key without changing the order.
    #[inline]
    pub fn newest(&self) -> Option<&K> {
        self.list.front().map(|(k, _)| k)
    }

    /// Returns the least recently used entry without changing the order.
    #[inline]
    pub fn peek_oldest(&self) -> Option<(&K, &V)> {
        self.list.back()
    }

    /// Returns the most recently used entry without changing the order.
    #[inline]
    pub fn peek_newest(&self) -> Option<(&K, &V)> {
        self.list.front()
    }

    /// Iterates over entries from most to least recently used.
    ///
    /// The iterator is double ended; `.rev()` walks from least to most
    /// recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.list.iter()
    }

    /// Changes the capacity, evicting least recently used entries until the
    /// cache fits. A `capacity` of 0 is clamped to 1.
    ///
    /// Returns the number of entries evicted.
    pub fn resize(&mut self, capacity: usize) -> usize {
        self.cap = LruCacheConfig::new(capacity).clamped_capacity();
        let mut evicted = 0;
        while self.map.len() > self.cap.get() {
            if self.evict_oldest().is_none() {
                break;
            }
            evicted += 1;
        }
        debug!(
            "resized LRU cache to {} entries, evicted {}",
            self.cap, evicted
        );
        evicted
    }

    /// Verifies that the index and the recency list agree.
    ///
    /// Walks the whole list, so this is O(n); it is meant for tests and
    /// debugging, not for the hot path.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.list.check_links()?;
        if self.map.len() != self.list.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but list holds {} entries",
                self.map.len(),
                self.list.len()
            )));
        }
        for (position, (key, _)) in self.list.iter().enumerate() {
            let linked = self
                .map
                .get(key)
                .and_then(|id| self.list.get(*id))
                .map(|(k, _)| k);
            if linked != Some(key) {
                return Err(InvariantError::new(format!(
                    "list entry at position {} is not reachable through the index",
                    position
                )));
            }
        }
        if self.map.len() > self.cap.get() {
            return Err(InvariantError::new(format!(
                "{} entries exceed capacity {}",
                self.map.len(),
                self.cap
            )));
        }
        Ok(())
    }

    /// Looks up `key`, promotes it and records the hit or miss.
    fn touch<Q>(&mut self, key: &Q) -> Option<EntryId>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let Some(id) = self.map.get(key).copied() else {
            self.metrics.core.record_miss();
            return None;
        };
        if self.list.move_to_front(id) {
            self.metrics.record_promotion();
        }
        self.metrics.core.record_hit();
        Some(id)
    }

    /// Unlinks the least recently used entry and drops its key from the index.
    fn unlink_oldest(&mut self) -> Option<(K, V)> {
        let (key, value) = self.list.pop_back()?;
        self.map.remove(&key);
        Some((key, value))
    }

    fn evict_oldest(&mut self) -> Option<(K, V)> {
        let evicted = self.unlink_oldest()?;
        self.metrics.core.record_eviction();
        trace!("evicted least recently used entry, {} remain", self.map.len());
        Some(evicted)
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> LruCache<K, V, S> {
    /// Inserts or updates `key`, making it the most recently used entry.
    ///
    /// If the key is new and the cache was full, the least recently used
    /// entry is evicted and returned. Updating an existing key never evicts.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(id) = self.map.get(&key).copied() {
            if self.list.move_to_front(id) {
                self.metrics.record_promotion();
            }
            self.list.replace_value(id, value);
            self.metrics.core.record_update();
            return None;
        }

        let id = self.list.push_front(key.clone(), value);
        self.map.insert(key, id);
        self.metrics.core.record_insertion();

        if self.map.len() > self.cap.get() {
            return self.evict_oldest();
        }
        None
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> CacheMetrics for LruCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}

impl<'a, K: Hash + Eq, V, S: BuildHasher> IntoIterator for &'a LruCache<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S> fmt::Debug for LruCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.cap)
            .field("len", &self.map.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::{String, ToString};
    use alloc::vec;
    use alloc::vec::Vec;

    fn recency<K: Hash + Eq + Clone, V>(cache: &LruCache<K, V>) -> Vec<K> {
        cache.iter().map(|(k, _)| k.clone()).collect()
    }

    #[test]
    fn test_lru_get_put() {
        let mut cache = LruCache::new(2);
        assert_eq!(cache.put("apple", 1), None);
        assert_eq!(cache.put("banana", 2), None);
        assert_eq!(cache.get(&"apple"), Some(&1));
        assert_eq!(cache.get(&"banana"), Some(&2));
        assert_eq!(cache.get(&"cherry"), None);
        assert_eq!(cache.put("apple", 3), None);
        assert_eq!(cache.get(&"apple"), Some(&3));
        assert_eq!(cache.put("cherry", 4), Some(("banana", 2)));
        assert_eq!(cache.get(&"banana"), None);
        assert_eq!(cache.get(&"apple"), Some(&3));
        assert_eq!(cache.get(&"cherry"), Some(&4));
        assert!(cache.check_invariants().is_ok());
    }

    #[test]
    fn test_lru_recency_promotion() {
        let mut cache = LruCache::new(2);
        cache.put("a", 1);
        cache.put("b", 2);
        cache.get(&"a");
        cache.put("c", 3);
        assert_eq!(cache.get(&"b"), None);
        assert_eq!(cache.get(&"a"), Some(&1));
        assert_eq!(cache.get(&"c"), Some(&3));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_lru_capacity_one() {
        let mut cache = LruCache::new(1);
        cache.put("a", 1);
        assert_eq!(cache.put("b", 2), Some(("a", 1)));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&"a"), None);
        assert_eq!(cache.get(&"b"), Some(&2));
    }

    #[test]
    fn test_lru_zero_capacity_is_clamped() {
        let mut cache = LruCache::new(0);
        assert_eq!(cache.cap(), 1);
        cache.put(1, 1);
        cache.put(2, 2);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.peek(&2), Some(&2));
    }

    #[test]
    fn test_lru_try_new_rejects_zero() {
        assert!(LruCache::<u8, u8>::try_new(0).is_err());
        let cache = LruCache::<u8, u8>::try_new(3).unwrap();
        assert_eq!(cache.cap(), 3);
    }

    #[test]
    fn test_lru_overwrite_keeps_size() {
        let mut cache = LruCache::new(3);
        cache.put("k", 1);
        cache.put("k", 2);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&"k"), Some(&2));
    }

    #[test]
    fn test_lru_overwrite_promotes() {
        let mut cache = LruCache::new(2);
        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("a", 10);
        assert_eq!(cache.put("c", 3), Some(("b", 2)));
        assert_eq!(recency(&cache), vec!["c", "a"]);
    }

    #[test]
    fn test_lru_get_mut() {
        let mut cache = LruCache::new(2);
        cache.put("apple", 1);
        cache.put("banana", 2);
        if let Some(v) = cache.get_mut(&"apple") {
            *v = 3;
        }
        assert_eq!(cache.get(&"apple"), Some(&3));
        cache.put("cherry", 4);
        assert_eq!(cache.get(&"banana"), None);
        assert_eq!(cache.get(&"apple"), Some(&3));
        assert_eq!(cache.get(&"cherry"), Some(&4));
    }

    #[test]
    fn test_lru_remove_and_delete() {
        let mut cache = LruCache::new(2);
        cache.put("apple", 1);
        cache.put("banana", 2);
        assert_eq!(cache.remove(&"apple"), Some(1));
        assert_eq!(cache.get(&"apple"), None);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.remove(&"cherry"), None);

        assert!(!cache.delete(&"cherry"));
        assert_eq!(cache.len(), 1);
        assert!(cache.delete(&"banana"));
        assert!(cache.is_empty());

        assert_eq!(cache.put("cherry", 3), None);
        assert_eq!(cache.get(&"cherry"), Some(&3));
        assert!(cache.check_invariants().is_ok());
    }

    #[test]
    fn test_lru_clear() {
        let mut cache = LruCache::new(2);
        cache.put("apple", 1);
        cache.put("banana", 2);
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        assert_eq!(cache.oldest(), None);
        assert_eq!(cache.newest(), None);
        assert_eq!(cache.cap(), 2);
        cache.put("cherry", 3);
        assert_eq!(cache.get(&"cherry"), Some(&3));
        assert!(cache.check_invariants().is_ok());
    }

    #[test]
    fn test_lru_oldest_newest_are_pure() {
        let mut cache = LruCache::new(3);
        assert_eq!(cache.oldest(), None);
        assert_eq!(cache.newest(), None);

        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("c", 3);
        for _ in 0..5 {
            assert_eq!(cache.oldest(), Some(&"a"));
            assert_eq!(cache.newest(), Some(&"c"));
            assert_eq!(cache.peek_oldest(), Some((&"a", &1)));
            assert_eq!(cache.peek_newest(), Some((&"c", &3)));
        }
        assert_eq!(cache.put("d", 4), Some(("a", 1)));
    }

    #[test]
    fn test_lru_peek_and_contains_do_not_promote() {
        let mut cache = LruCache::new(2);
        cache.put("a", 1);
        cache.put("b", 2);
        assert_eq!(cache.peek(&"a"), Some(&1));
        assert!(cache.contains(&"a"));
        assert!(!cache.contains(&"z"));
        assert_eq!(cache.put("c", 3), Some(("a", 1)));
    }

    #[test]
    fn test_lru_keys_match_entries() {
        let mut cache = LruCache::new(3);
        cache.put(1, "one");
        cache.put(2, "two");
        cache.put(3, "three");
        cache.put(4, "four");
        let mut keys: Vec<i32> = cache.keys().copied().collect();
        keys.sort_unstable();
        assert_eq!(keys, vec![2, 3, 4]);
    }

    #[test]
    fn test_lru_iter_order() {
        let mut cache = LruCache::new(4);
        for i in 0..4 {
            cache.put(i, i * 10);
        }
        cache.get(&1);
        assert_eq!(recency(&cache), vec![1, 3, 2, 0]);
        let reversed: Vec<i32> = cache.iter().rev().map(|(k, _)| *k).collect();
        assert_eq!(reversed, vec![0, 2, 3, 1]);
        let mut total = 0;
        for (_, v) in &cache {
            total += *v;
        }
        assert_eq!(total, 60);
    }

    #[test]
    fn test_lru_pop_oldest() {
        let mut cache = LruCache::new(3);
        assert_eq!(cache.pop_oldest(), None);
        cache.put("a", 1);
        cache.put("b", 2);
        cache.get(&"a");
        assert_eq!(cache.pop_oldest(), Some(("b", 2)));
        assert_eq!(cache.pop_oldest(), Some(("a", 1)));
        assert!(cache.is_empty());
        assert!(cache.check_invariants().is_ok());
    }

    #[test]
    fn test_lru_resize() {
        let mut cache = LruCache::new(4);
        for i in 0..4 {
            cache.put(i, i);
        }
        assert_eq!(cache.resize(2), 2);
        assert_eq!(cache.cap(), 2);
        assert_eq!(recency(&cache), vec![3, 2]);

        assert_eq!(cache.resize(10), 0);
        cache.put(4, 4);
        assert_eq!(cache.len(), 3);

        assert_eq!(cache.resize(0), 2);
        assert_eq!(cache.cap(), 1);
        assert_eq!(recency(&cache), vec![4]);
        assert!(cache.check_invariants().is_ok());
    }

    #[test]
    fn test_lru_string_keys_borrowed_lookup() {
        let mut cache = LruCache::new(2);
        cache.put(String::from("apple"), 1);
        cache.put(String::from("banana"), 2);
        assert_eq!(cache.get("apple"), Some(&1));
        assert_eq!(cache.peek("banana"), Some(&2));
        assert!(cache.contains("apple"));
        assert!(cache.delete("apple"));
        assert_eq!(cache.get("apple"), None);
    }

    #[derive(Debug, Clone, Eq, PartialEq)]
    struct ComplexValue {
        val: i32,
        description: String,
    }

    #[test]
    fn test_lru_complex_values() {
        let mut cache = LruCache::new(2);
        let fruit = |val: i32, description: &str| ComplexValue {
            val,
            description: description.to_string(),
        };
        cache.put("apple".to_string(), fruit(1, "First fruit"));
        cache.put("banana".to_string(), fruit(2, "Second fruit"));
        assert_eq!(cache.get("apple").map(|v| v.val), Some(1));
        assert_eq!(cache.get("banana").map(|v| v.val), Some(2));

        let evicted = cache.put("cherry".to_string(), fruit(3, "Third fruit"));
        assert_eq!(
            evicted,
            Some(("apple".to_string(), fruit(1, "First fruit")))
        );
        assert_eq!(cache.remove("apple"), None);
    }

    #[test]
    fn test_lru_unclonable_values() {
        struct Opaque(u32);
        let mut cache = LruCache::new(1);
        cache.put(1u8, Opaque(7));
        assert_eq!(cache.get(&1).map(|o| o.0), Some(7));
        let evicted = cache.put(2u8, Opaque(8));
        assert_eq!(evicted.map(|(k, o)| (k, o.0)), Some((1, 7)));
    }

    #[test]
    fn test_lru_metrics() {
        let mut cache = LruCache::new(2);
        let metrics = cache.metrics();
        assert_eq!(metrics["requests"], 0.0);
        assert_eq!(metrics["cache_hits"], 0.0);
        assert_eq!(metrics["cache_misses"], 0.0);

        cache.put("apple", 1);
        cache.put("banana", 2);
        cache.get(&"apple");
        cache.get(&"apple");
        cache.get(&"missing");
        cache.put("apple", 5);
        cache.put("cherry", 3);
        cache.delete(&"apple");
        cache.clear();

        let metrics = cache.metrics();
        assert_eq!(metrics["cache_hits"], 2.0);
        assert_eq!(metrics["cache_misses"], 1.0);
        assert_eq!(metrics["requests"], 3.0);
        assert_eq!(metrics["insertions"], 3.0);
        assert_eq!(metrics["updates"], 1.0);
        assert_eq!(metrics["evictions"], 1.0);
        assert_eq!(metrics["removals"], 1.0);
        // Only the first get of "apple" relinked it.
        assert_eq!(metrics["promotions"], 1.0);
        assert_eq!(metrics["clears"], 1.0);
        assert_eq!(cache.algorithm_name(), "LRU");
        assert_eq!(cache.lru_metrics().core.evictions, 1);
    }

    #[test]
    fn test_lru_with_custom_hasher() {
        let mut cache: LruCache<u32, u32, DefaultHashBuilder> =
            LruCache::with_hasher(2, DefaultHashBuilder::default());
        cache.put(1, 1);
        cache.put(2, 2);
        cache.put(3, 3);
        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(&1));
    }

    #[test]
    fn test_lru_init_from_config() {
        let cache: LruCache<u32, u32> = LruCache::init(LruCacheConfig { capacity: 0 }, None);
        assert_eq!(cache.cap(), 1);
        let err = LruCache::<u32, u32>::try_init(LruCacheConfig { capacity: 0 }, None);
        assert!(err.is_err());
    }

    #[test]
    fn test_lru_debug_output() {
        let mut cache = LruCache::new(3);
        cache.put("a", 1);
        let out = format!("{:?}", cache);
        assert!(out.contains("LruCache"));
        assert!(out.contains("len: 1"));
    }

    #[test]
    fn test_lru_churn_preserves_invariants() {
        let mut cache = LruCache::new(16);
        for i in 0u32..2_000 {
            let key = (i * 7919) % 64;
            match i % 5 {
                0 | 1 => {
                    cache.put(key, i);
                }
                2 => {
                    cache.get(&key);
                }
                3 => {
                    cache.delete(&key);
                }
                _ => {
                    cache.peek(&key);
                }
            }
            assert!(cache.len() <= cache.cap());
        }
        assert!(cache.check_invariants().is_ok());
    }

    #[test]
    fn test_lru_concurrent_access_with_external_lock() {
        extern crate std;
        use std::sync::{Arc, Mutex};
        use std::thread;

        let cache = Arc::new(Mutex::new(LruCache::new(100)));
        let num_threads = 4;
        let ops_per_thread = 100;

        let mut handles: Vec<std::thread::JoinHandle<()>> = Vec::new();

        for t in 0..num_threads {
            let cache = Arc::clone(&cache);
            handles.push(thread::spawn(move || {
                for i in 0..ops_per_thread {
                    let key = std::format!("thread_{}_key_{}", t, i);
                    let mut guard = cache.lock().unwrap();
                    guard.put(key.clone(), t * 1000 + i);
                    let _ = guard.get(&key);
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        let guard = cache.lock().unwrap();
        assert_eq!(guard.len(), 100);
        assert!(guard.check_invariants().is_ok());
    }
}
