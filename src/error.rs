//! Error types for the recency cache.
//!
//! Looking up an absent key is not an error; it is reported through `Option`
//! or `bool`. The types here cover the two genuinely exceptional paths:
//!
//! - [`ConfigError`]: returned by the validating constructors
//!   ([`LruCache::try_new`](crate::LruCache::try_new),
//!   [`LruCache::try_init`](crate::LruCache::try_init)) when a configuration
//!   is rejected instead of clamped.
//! - [`InvariantError`]: returned by
//!   [`LruCache::check_invariants`](crate::LruCache::check_invariants) when the
//!   index and the recency list disagree.
//!
//! ```
//! use recency_cache::LruCache;
//!
//! let err = LruCache::<u32, u32>::try_new(0).unwrap_err();
//! assert!(err.to_string().contains("capacity"));
//! ```

extern crate alloc;

use alloc::string::String;
use core::fmt;

/// Error returned when cache configuration parameters are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Error returned when the cache's internal invariants are violated.
///
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvariantError {}
