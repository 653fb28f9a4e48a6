//! Circular doubly-linked rings addressed by arena indices.
//!
//! This crate provides the link surgery for circular doubly-linked lists whose
//! nodes live in an arena and refer to each other by key instead of by
//! pointer. The arena owns the `next`/`prev` fields; this crate only rewires
//! them through the [`RingStore`] trait.
//!
//! # Circular vs Linear Lists
//!
//! In a circular list:
//! - A single node points to itself (both `next` and `prev`)
//! - There is no head or tail - any node can be the "entry point"
//! - Iteration wraps around (must track starting point)
//!
//! Unlike a pointer-based intrusive list, a node here is never "unlinked": a
//! detached node is simply a ring of one. This matches forests where every
//! node always sits in exactly one sibling ring.
//!
//! # Example
//!
//! ```rust
//! use index_ring::{RingOps, RingStore};
//!
//! struct Links {
//!     next: Vec<usize>,
//!     prev: Vec<usize>,
//! }
//!
//! impl RingStore for Links {
//!     type Key = usize;
//!     fn next(&self, key: usize) -> usize { self.next[key] }
//!     fn prev(&self, key: usize) -> usize { self.prev[key] }
//!     fn set_next(&mut self, key: usize, next: usize) { self.next[key] = next; }
//!     fn set_prev(&mut self, key: usize, prev: usize) { self.prev[key] = prev; }
//! }
//!
//! let mut links = Links { next: vec![0, 1, 2], prev: vec![0, 1, 2] };
//! let ops = RingOps::new();
//!
//! ops.insert_before(&mut links, 0, 1);
//! ops.insert_before(&mut links, 0, 2);
//!
//! assert_eq!(ops.iter(&links, 0).collect::<Vec<_>>(), vec![0, 1, 2]);
//! assert_eq!(ops.iter(&links, 2).count(), 3);
//! ```

#![cfg_attr(not(test), no_std)]

use core::fmt;

// =============================================================================
// RingStore
// =============================================================================

/// Storage holding the `next`/`prev` links of ring members.
///
/// Implementors are usually arenas: the key is an index or a slot key, and
/// the links are plain fields of the arena's node records. Accessors may
/// panic on keys that are not live in the store.
pub trait RingStore {
    /// Key addressing a ring member.
    type Key: Copy + Eq;

    /// Returns the successor of `key`.
    fn next(&self, key: Self::Key) -> Self::Key;

    /// Returns the predecessor of `key`.
    fn prev(&self, key: Self::Key) -> Self::Key;

    /// Overwrites the successor of `key`.
    fn set_next(&mut self, key: Self::Key, next: Self::Key);

    /// Overwrites the predecessor of `key`.
    fn set_prev(&mut self, key: Self::Key, prev: Self::Key);
}

// =============================================================================
// RingOps
// =============================================================================

/// Operations for manipulating index-addressed circular lists.
///
/// All operations are O(1) except iteration.
/// The operations are safe: a broken ring can make iteration loop or panic
/// inside the store, but never touches memory outside of it.
#[derive(Clone, Copy, Default)]
pub struct RingOps;

impl RingOps {
    /// Creates a new `RingOps`.
    #[inline]
    pub const fn new() -> Self {
        RingOps
    }

    /// Links `a` to `b`: `a.next = b` and `b.prev = a`.
    ///
    /// This is the single primitive every other operation is built from. It
    /// does not repair the old neighbours of `a` or `b`.
    #[inline]
    pub fn join<S: RingStore + ?Sized>(&self, store: &mut S, a: S::Key, b: S::Key) {
        store.set_next(a, b);
        store.set_prev(b, a);
    }

    /// Makes `key` a ring of one element.
    #[inline]
    pub fn make_singleton<S: RingStore + ?Sized>(&self, store: &mut S, key: S::Key) {
        self.join(store, key, key);
    }

    /// Checks whether `key` is alone in its ring.
    #[inline]
    pub fn is_singleton<S: RingStore + ?Sized>(&self, store: &S, key: S::Key) -> bool {
        store.next(key) == key && store.prev(key) == key
    }

    /// Inserts the singleton `new` right before `at`.
    ///
    /// Inserting before the entry point of a ring appends at its "end".
    #[inline]
    pub fn insert_before<S: RingStore + ?Sized>(&self, store: &mut S, at: S::Key, new: S::Key) {
        debug_assert!(self.is_singleton(store, new), "new is already in a ring");

        let prev = store.prev(at);
        self.join(store, prev, new);
        self.join(store, new, at);
    }

    /// Splices `key` out of its ring and leaves it as a singleton.
    ///
    /// Returns `true` if `key` was the only element of its ring.
    #[inline]
    pub fn unlink<S: RingStore + ?Sized>(&self, store: &mut S, key: S::Key) -> bool {
        let next = store.next(key);
        let prev = store.prev(key);

        if next == key {
            return true;
        }

        self.join(store, prev, next);
        self.make_singleton(store, key);
        false
    }

    /// Iterates the ring once, starting at `start` and following `next`.
    ///
    /// The store is borrowed for the whole iteration, so the ring cannot be
    /// modified while it is walked.
    pub fn iter<'a, S: RingStore + ?Sized>(&self, store: &'a S, start: S::Key) -> RingIter<'a, S> {
        RingIter {
            store,
            start,
            current: Some(start),
        }
    }
}

impl fmt::Debug for RingOps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RingOps")
    }
}

// =============================================================================
// RingIter
// =============================================================================

/// Iterator over one full turn of a ring. See [`RingOps::iter`].
pub struct RingIter<'a, S: RingStore + ?Sized> {
    store: &'a S,
    start: S::Key,
    current: Option<S::Key>,
}

impl<S: RingStore + ?Sized> Iterator for RingIter<'_, S> {
    type Item = S::Key;

    fn next(&mut self) -> Option<S::Key> {
        let key = self.current?;
        let next = self.store.next(key);
        self.current = if next == self.start { None } else { Some(next) };
        Some(key)
    }
}

// =============================================================================
// Tests
// =============================================================================
