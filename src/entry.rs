//! Recency List Entry Type
//!
//! This module provides the node type threaded through the recency list and
//! the handle type the hash index stores to reach it.
//!
//! # Layout
//!
//! Entries live in a flat arena owned by the list. Instead of `prev`/`next`
//! pointers each entry stores the arena slot indices of its neighbours:
//!
//! ```text
//!   slot:   0 (head)     1 (tail)     2            3
//!         ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐
//!   data  │   None   │ │   None   │ │ ("a", 1) │ │ ("b", 2) │
//!   prev  │    0     │ │    2     │ │    3     │ │    0     │
//!   next  │    3     │ │    1     │ │    1     │ │    2     │
//!   gen   │    0     │ │    0     │ │    0     │ │    0     │
//!         └──────────┘ └──────────┘ └──────────┘ └──────────┘
//!
//!   head ─► [3: "b"] ◄──► [2: "a"] ◄── tail
//! ```
//!
//! Each slot also carries a generation counter that is bumped whenever the
//! slot is freed. An [`EntryId`] records the generation it was issued with,
//! so a handle kept past the removal of its entry no longer resolves even if
//! the slot has since been reused. The counter is 64 bits wide, so it does
//! not wrap within any realistic number of frees of one slot.

use core::fmt;

/// Stable handle to an entry in the recency list.
///
/// Holds the arena slot index plus the generation of the slot at the time
/// the entry was inserted.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct EntryId {
    pub(crate) index: usize,
    pub(crate) generation: u64,
}

impl fmt::Debug for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntryId({}v{})", self.index, self.generation)
    }
}

/// A node of the recency list.
///
/// `data` is `None` for the two sentinels and for vacant slots waiting on
/// the free list; every live entry holds `Some((key, value))`.
pub(crate) struct Entry<K, V> {
    pub(crate) data: Option<(K, V)>,
    pub(crate) prev: usize,
    pub(crate) next: usize,
    pub(crate) generation: u64,
}

impl<K, V> Entry<K, V> {
    pub(crate) fn new(key: K, value: V) -> Self {
        Entry {
            data: Some((key, value)),
            prev: 0,
            next: 0,
            generation: 0,
        }
    }

    /// Creates a valueless sentinel linked to the given neighbours.
    pub(crate) fn sentinel(prev: usize, next: usize) -> Self {
        Entry {
            data: None,
            prev,
            next,
            generation: 0,
        }
    }

    #[inline]
    pub(crate) fn is_occupied(&self) -> bool {
        self.data.is_some()
    }

    #[inline]
    pub(crate) fn pair(&self) -> Option<(&K, &V)> {
        self.data.as_ref().map(|(k, v)| (k, v))
    }

    #[inline]
    pub(crate) fn pair_mut(&mut self) -> Option<(&K, &mut V)> {
        self.data.as_mut().map(|(k, v)| (&*k, v))
    }

    /// Empties the slot and invalidates every handle issued for it.
    pub(crate) fn vacate(&mut self) -> Option<(K, V)> {
        let data = self.data.take();
        if data.is_some() {
            self.generation = self.generation.wrapping_add(1);
        }
        data
    }
}

impl<K, V> fmt::Debug for Entry<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("occupied", &self.is_occupied())
            .field("prev", &self.prev)
            .field("next", &self.next)
            .field("generation", &self.generation)
            .finish()
    }
}
