//! The shared priority-queue contract
//!
//! Both heap implementations in this crate — [`BinaryHeap`] and
//! [`FibonacciHeap`] — implement the [`PriorityQueue`] trait, so any
//! algorithm written against it (such as [`dijkstra`]) can be run over
//! either backing structure unchanged. The two differ only in their cost
//! profiles:
//!
//! | Operation        | Binary     | Fibonacci          |
//! |------------------|------------|--------------------|
//! | `insert`         | O(log n)   | O(1)               |
//! | `find_minimum`   | O(1)       | O(1)               |
//! | `delete_minimum` | O(log n)   | O(log n) amortized |
//! | `decrease_key`   | O(n)       | O(1) amortized     |
//! | `remove`         | O(n)       | O(log n) amortized |
//! | `merge`          | O(n)       | O(1) amortized     |
//!
//! [`BinaryHeap`]: crate::binary::BinaryHeap
//! [`FibonacciHeap`]: crate::fibonacci::FibonacciHeap
//! [`dijkstra`]: crate::pathfinding::dijkstra

use std::fmt;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// The new key passed to `decrease_key` is greater than the current key
    KeyNotDecreased,
    /// The handle no longer refers to a live node (it was already extracted)
    InvalidHandle,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::KeyNotDecreased => {
                write!(f, "new key is greater than the current key")
            }
            HeapError::InvalidHandle => {
                write!(f, "handle is no longer valid (node was removed)")
            }
        }
    }
}

impl std::error::Error for HeapError {}

/// A min-priority queue over ordered scalar keys.
///
/// `insert` returns an opaque handle identifying the stored node, which can
/// later be passed to [`decrease_key`](Self::decrease_key) or
/// [`remove`](Self::remove). Handles are non-owning: once the node they
/// refer to has been extracted, they are stale and those operations return
/// [`HeapError::InvalidHandle`]. Using a handle with a heap other than the
/// one that issued it is a precondition violation with unspecified (but
/// memory-safe) results.
///
/// Keys are restricted to `Ord + Copy` — this crate compares heaps over
/// plain scalars and returns keys by value.
///
/// # Example
///
/// ```rust
/// use heap_compare::fibonacci::FibonacciHeap;
/// use heap_compare::PriorityQueue;
///
/// let mut heap = FibonacciHeap::new();
/// let handle = heap.insert(5);
/// heap.insert(3);
/// heap.decrease_key(&handle, 1).unwrap();
/// assert_eq!(heap.find_minimum(), Some(1));
/// ```
pub trait PriorityQueue<K: Ord + Copy> {
    /// Handle to a node stored in the queue
    type Handle: Clone;

    /// Creates a new empty queue
    fn new() -> Self;

    /// Builds a queue from a sequence of keys.
    ///
    /// Establishes the internal invariants in a single pass instead of n
    /// individual inserts.
    fn from_keys<I: IntoIterator<Item = K>>(keys: I) -> Self;

    /// Inserts a key, returning a handle to the stored node
    fn insert(&mut self, key: K) -> Self::Handle;

    /// Returns the minimum key without removing it, or `None` if empty
    fn find_minimum(&self) -> Option<K>;

    /// Removes and returns the minimum key, or `None` if empty
    fn delete_minimum(&mut self) -> Option<K>;

    /// Lowers the key of the node behind `handle` to `new_key`.
    ///
    /// # Errors
    ///
    /// Returns [`HeapError::KeyNotDecreased`] if `new_key` is strictly
    /// greater than the current key (the heap is left untouched), and
    /// [`HeapError::InvalidHandle`] if the node was already extracted.
    fn decrease_key(&mut self, handle: &Self::Handle, new_key: K) -> Result<(), HeapError>;

    /// Removes the node behind `handle` from the queue, returning its key.
    ///
    /// # Errors
    ///
    /// Returns [`HeapError::InvalidHandle`] if the node was already
    /// extracted.
    fn remove(&mut self, handle: &Self::Handle) -> Result<K, HeapError>;

    /// Moves every node of `other` into this queue, consuming it.
    ///
    /// Handles issued by `other` should be considered stale afterwards.
    fn merge(&mut self, other: Self);

    /// Copies every node of `other` into this queue, leaving it usable.
    ///
    /// Always O(n) in the size of `other`: the whole structure is
    /// duplicated so the source keeps ownership of its nodes.
    fn merge_copied(&mut self, other: &Self);

    /// Returns the number of live nodes
    fn len(&self) -> usize;

    /// Returns true if the queue holds no nodes
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
