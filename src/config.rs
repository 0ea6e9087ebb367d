//! Cache Configuration Module
//!
//! This module provides the configuration structure for [`LruCache`](crate::LruCache).
//! Like every config in this crate it is a plain struct with public fields:
//!
//! - **Simple**: Just create the struct with all fields set
//! - **Type safety**: All parameters must be provided at construction
//! - **No boilerplate**: No builder needed
//!
//! # Capacity Policy
//!
//! A capacity below 1 is not a valid cache size. The infallible constructors
//! ([`LruCache::new`](crate::LruCache::new), [`LruCache::init`](crate::LruCache::init))
//! clamp it to 1 and log a warning; the fallible ones
//! ([`LruCache::try_new`](crate::LruCache::try_new),
//! [`LruCache::try_init`](crate::LruCache::try_init)) reject it with a
//! [`ConfigError`].
//!
//! # Examples
//!
//! ```
//! use recency_cache::config::LruCacheConfig;
//! use recency_cache::LruCache;
//!
//! let config = LruCacheConfig { capacity: 10_000 };
//! let cache: LruCache<String, Vec<u8>> = LruCache::init(config, None);
//! assert_eq!(cache.cap(), 10_000);
//!
//! // Zero is clamped, never rejected, on this path.
//! let cache: LruCache<String, i32> = LruCache::init(LruCacheConfig { capacity: 0 }, None);
//! assert_eq!(cache.cap(), 1);
//! ```

use crate::error::ConfigError;
use core::fmt;
use core::num::NonZeroUsize;
use log::warn;

/// Configuration for an LRU (Least Recently Used) cache.
///
/// # Fields
///
/// - `capacity`: Maximum number of entries the cache holds before it starts
///   evicting the least recently used one.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LruCacheConfig {
    /// Maximum number of key-value pairs the cache can hold.
    pub capacity: usize,
}

impl LruCacheConfig {
    /// Creates a configuration for a cache of `capacity` entries.
    #[inline]
    pub const fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Checks the configuration, returning the capacity as a `NonZeroUsize`.
    pub fn validate(&self) -> Result<NonZeroUsize, ConfigError> {
        NonZeroUsize::new(self.capacity)
            .ok_or_else(|| ConfigError::new("capacity must be at least 1, got 0"))
    }

    /// Returns the capacity, clamping anything below 1 up to 1.
    pub fn clamped_capacity(&self) -> NonZeroUsize {
        match NonZeroUsize::new(self.capacity) {
            Some(capacity) => capacity,
            None => {
                warn!("LRU cache capacity {} clamped to 1", self.capacity);
                NonZeroUsize::MIN
            }
        }
    }
}

impl Default for LruCacheConfig {
    /// A single-entry cache, the smallest valid configuration.
    fn default() -> Self {
        Self::new(1)
    }
}

impl fmt::Debug for LruCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}
