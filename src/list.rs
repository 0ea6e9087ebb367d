//! Recency-ordered doubly linked list backed by a slot arena.
//!
//! All entries are owned by a single `Vec` of slots and linked to each other
//! by slot index. Slots `0` and `1` are the permanent head and tail sentinels,
//! so splicing never has to special-case an empty list or a single element.
//! Freed slots go on a free list and are reused by later insertions.
//!
//! The front of the list (right after the head sentinel) is the most recently
//! used entry and the back (right before the tail sentinel) the least recently
//! used one. No operation other than iteration walks the list.

extern crate alloc;

use crate::entry::{Entry, EntryId};
use crate::error::InvariantError;
use alloc::format;
use alloc::vec::Vec;
use core::fmt;
use core::iter::FusedIterator;
use core::mem;

const HEAD: usize = 0;
const TAIL: usize = 1;

/// Upper bound on slots reserved up front; larger lists grow on demand.
const MAX_PREALLOCATED_SLOTS: usize = 4096;

/// A doubly linked list of key-value entries ordered by recency.
pub(crate) struct RecencyList<K, V> {
    slots: Vec<Entry<K, V>>,
    free: Vec<usize>,
    len: usize,
}

impl<K, V> RecencyList<K, V> {
    /// Creates an empty list with room for roughly `capacity` entries.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let reserved = capacity.min(MAX_PREALLOCATED_SLOTS) + 2;
        let mut slots = Vec::with_capacity(reserved);
        slots.push(Entry::sentinel(HEAD, TAIL));
        slots.push(Entry::sentinel(HEAD, TAIL));
        RecencyList {
            slots,
            free: Vec::new(),
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts a new entry as the most recently used one.
    pub(crate) fn push_front(&mut self, key: K, value: V) -> EntryId {
        let index = match self.free.pop() {
            Some(index) => {
                self.slots[index].data = Some((key, value));
                index
            }
            None => {
                self.slots.push(Entry::new(key, value));
                self.slots.len() - 1
            }
        };
        self.link_front(index);
        self.len += 1;
        EntryId {
            index,
            generation: self.slots[index].generation,
        }
    }

    /// Unlinks and frees the entry behind `id`.
    ///
    /// Returns `None` if the handle is stale.
    pub(crate) fn remove(&mut self, id: EntryId) -> Option<(K, V)> {
        let index = self.resolve(id)?;
        self.unlink(index);
        self.release(index)
    }

    /// Makes the entry behind `id` the most recently used one.
    ///
    /// Returns `true` if the entry changed position, `false` if it already
    /// was at the front or the handle is stale.
    pub(crate) fn move_to_front(&mut self, id: EntryId) -> bool {
        let Some(index) = self.resolve(id) else {
            return false;
        };
        if self.slots[HEAD].next == index {
            return false;
        }
        self.unlink(index);
        self.link_front(index);
        true
    }

    /// Removes and returns the least recently used entry.
    pub(crate) fn pop_back(&mut self) -> Option<(K, V)> {
        let index = self.slots[TAIL].prev;
        if index == HEAD {
            return None;
        }
        self.unlink(index);
        self.release(index)
    }

    /// Returns the most recently used entry without touching the order.
    #[inline]
    pub(crate) fn front(&self) -> Option<(&K, &V)> {
        self.slots[self.slots[HEAD].next].pair()
    }

    /// Returns the least recently used entry without touching the order.
    #[inline]
    pub(crate) fn back(&self) -> Option<(&K, &V)> {
        self.slots[self.slots[TAIL].prev].pair()
    }

    pub(crate) fn get(&self, id: EntryId) -> Option<(&K, &V)> {
        let index = self.resolve(id)?;
        self.slots[index].pair()
    }

    pub(crate) fn get_mut(&mut self, id: EntryId) -> Option<(&K, &mut V)> {
        let index = self.resolve(id)?;
        self.slots[index].pair_mut()
    }

    /// Swaps in a new value for the entry behind `id`, returning the old one.
    pub(crate) fn replace_value(&mut self, id: EntryId, value: V) -> Option<V> {
        let (_, slot) = self.get_mut(id)?;
        Some(mem::replace(slot, value))
    }

    /// Drops every entry and relinks the sentinels to each other.
    ///
    /// Slots are kept and pushed onto the free list with their generations
    /// bumped, so handles issued before the clear never resolve again.
    pub(crate) fn clear(&mut self) {
        self.free.clear();
        for index in (TAIL + 1..self.slots.len()).rev() {
            self.slots[index].vacate();
            self.free.push(index);
        }
        self.slots[HEAD].next = TAIL;
        self.slots[TAIL].prev = HEAD;
        self.len = 0;
    }

    /// Iterates entries from most to least recently used.
    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: &self.slots,
            front: self.slots[HEAD].next,
            back: self.slots[TAIL].prev,
            remaining: self.len,
        }
    }

    /// Walks the list in both directions and checks that the links agree
    /// with each other and with the tracked length.
    pub(crate) fn check_links(&self) -> Result<(), InvariantError> {
        let mut forward = 0;
        let mut index = self.slots[HEAD].next;
        while index != TAIL {
            let entry = &self.slots[index];
            if !entry.is_occupied() {
                return Err(InvariantError::new(format!(
                    "slot {} is linked but holds no entry",
                    index
                )));
            }
            if self.slots[entry.next].prev != index {
                return Err(InvariantError::new(format!(
                    "slot {} is not the predecessor of its successor {}",
                    index, entry.next
                )));
            }
            forward += 1;
            if forward > self.len {
                return Err(InvariantError::new(format!(
                    "forward walk exceeds tracked length {}",
                    self.len
                )));
            }
            index = entry.next;
        }

        let mut backward = 0;
        let mut index = self.slots[TAIL].prev;
        while index != HEAD {
            backward += 1;
            if backward > self.len {
                return Err(InvariantError::new(format!(
                    "backward walk exceeds tracked length {}",
                    self.len
                )));
            }
            index = self.slots[index].prev;
        }

        if forward != self.len || backward != self.len {
            return Err(InvariantError::new(format!(
                "tracked length {} but walked {} forward and {} backward",
                self.len, forward, backward
            )));
        }
        Ok(())
    }

    /// Maps a handle to its slot index if it still refers to a live entry.
    #[inline]
    fn resolve(&self, id: EntryId) -> Option<usize> {
        if id.index <= TAIL {
            return None;
        }
        let entry = self.slots.get(id.index)?;
        (entry.is_occupied() && entry.generation == id.generation).then_some(id.index)
    }

    /// Splices an unlinked slot in right after the head sentinel.
    fn link_front(&mut self, index: usize) {
        let first = self.slots[HEAD].next;
        self.slots[index].prev = HEAD;
        self.slots[index].next = first;
        self.slots[first].prev = index;
        self.slots[HEAD].next = index;
    }

    /// Splices a linked slot out by joining its neighbours.
    fn unlink(&mut self, index: usize) {
        let prev = self.slots[index].prev;
        let next = self.slots[index].next;
        self.slots[prev].next = next;
        self.slots[next].prev = prev;
    }

    /// Frees an unlinked slot for reuse.
    fn release(&mut self, index: usize) -> Option<(K, V)> {
        let data = self.slots[index].vacate();
        self.free.push(index);
        self.len -= 1;
        data
    }
}

impl<K, V> fmt::Debug for RecencyList<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecencyList")
            .field("len", &self.len)
            .field("slots", &self.slots.len())
            .field("free", &self.free.len())
            .finish()
    }
}

/// Iterator over cache entries, most recently used first.
///
/// Created by [`LruCache::iter`](crate::LruCache::iter).
pub struct Iter<'a, K, V> {
    slots: &'a [Entry<K, V>],
    front: usize,
    back: usize,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entry = &self.slots[self.front];
        self.front = entry.next;
        self.remaining -= 1;
        entry.pair()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entry = &self.slots[self.back];
        self.back = entry.prev;
        self.remaining -= 1;
        entry.pair()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

impl<K, V> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish()
    }
}
