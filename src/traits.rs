//! Common traits and the error type for priority forests
//!
//! This module provides a two-tier trait hierarchy:
//!
//! - [`Heap`]: Base trait for simple heaps without `decrease_key` support
//! - [`DecreaseKeyHeap`]: Extended trait adding `decrease_key` and handle-based operations
//!
//! The base [`Heap`] trait is compatible with Rust's standard heap API patterns,
//! while [`DecreaseKeyHeap`] adds the handle-based operations needed by
//! algorithms like Dijkstra's shortest path.

use std::fmt;

/// Error type for forest operations
///
/// Every variant is detected before the forest is mutated, so an `Err` always
/// leaves the forest exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForestError {
    /// Extract-minimum was called on an empty forest
    EmptyStructure,
    /// The handle does not name a live node of this forest
    InvalidTarget,
    /// The new priority is greater than the current priority
    PriorityOrderViolation,
    /// A structural invariant does not hold (reported by the audit)
    StructuralInvariantViolation(&'static str),
}

impl fmt::Display for ForestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForestError::EmptyStructure => write!(f, "cannot extract minimum of an empty forest"),
            ForestError::InvalidTarget => {
                write!(f, "handle does not refer to a live node of this forest")
            }
            ForestError::PriorityOrderViolation => {
                write!(f, "new priority is larger than the current one")
            }
            ForestError::StructuralInvariantViolation(reason) => {
                write!(f, "structural invariant violated: {}", reason)
            }
        }
    }
}

impl std::error::Error for ForestError {}

/// A handle to an element in the heap, used for decrease_key operations
///
/// This is an opaque type that identifies a specific element in the heap.
pub trait Handle: Clone + PartialEq + Eq {}

/// Base trait for heap/priority queue data structures
///
/// This trait provides a simple API similar to Rust's `BinaryHeap`:
/// - `push` inserts an element (returns `()`)
/// - `pop` removes and returns the minimum
/// - `peek` returns the minimum without removing it
///
/// Unlike `BinaryHeap` which stores values directly (using `Ord`), these heaps
/// store (priority, item) pairs to separate the ordering key from the data.
///
/// # Example
///
/// ```rust
/// use priority_forest::{Heap, PriorityForest};
///
/// let mut heap: PriorityForest<&str, i32> = Heap::new();
/// heap.push(3, "three");
/// heap.push(1, "one");
/// heap.push(2, "two");
///
/// assert_eq!(Heap::peek(&heap), Some((&1, &"one")));
/// assert_eq!(heap.pop(), Some((1, "one")));
/// ```
pub trait Heap<T, P: Ord> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts an element with the given priority
    fn push(&mut self, priority: P, item: T);

    /// Returns the minimum priority and associated item without removing it
    ///
    /// Note that `BinaryHeap` is a max-heap, while these heaps are min-heaps.
    fn peek(&self) -> Option<(&P, &T)>;

    /// Removes and returns the minimum priority and associated item
    ///
    /// Note that `BinaryHeap` is a max-heap, while these heaps are min-heaps.
    fn pop(&mut self) -> Option<(P, T)>;
}

/// Extended heap trait with `decrease_key` support
///
/// # Example
///
/// ```rust
/// use priority_forest::{DecreaseKeyHeap, Heap, PriorityForest};
///
/// let mut heap: PriorityForest<&str, i32> = Heap::new();
/// let handle = heap.push_with_handle(10, "item");
/// heap.decrease_key(&handle, 5).unwrap();
/// assert_eq!(Heap::peek(&heap), Some((&5, &"item")));
/// ```
pub trait DecreaseKeyHeap<T, P: Ord>: Heap<T, P> {
    /// The handle type for this heap, used to reference elements for decrease_key
    type Handle: Handle;

    /// Inserts an element with the given priority, returning a handle
    fn push_with_handle(&mut self, priority: P, item: T) -> Self::Handle;

    /// Decreases the priority of an element identified by the handle
    ///
    /// # Errors
    /// Returns [`ForestError::InvalidTarget`] if the handle is stale, and
    /// [`ForestError::PriorityOrderViolation`] if the new priority is larger
    /// than the current one. Equal priorities are accepted.
    fn decrease_key(&mut self, handle: &Self::Handle, new_priority: P) -> Result<(), ForestError>;
}
