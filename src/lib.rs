//! Interchangeable Priority Queues for Rust
//!
//! This crate implements two min-heap priority queues behind a single
//! [`PriorityQueue`] trait so their behavior and performance can be compared
//! on the same workloads:
//!
//! - **Binary Heap**: array-backed; O(log n) insert and delete-min, O(1)
//!   find-min, O(n) decrease_key and merge
//! - **Fibonacci Heap**: O(1) amortized insert, decrease_key, and merge;
//!   O(log n) amortized delete-min
//!
//! A generic Dijkstra shortest-path driver in [`pathfinding`] runs over
//! either queue unchanged and serves as the comparison workload.
//!
//! # Example
//!
//! ```rust
//! use heap_compare::fibonacci::FibonacciHeap;
//! use heap_compare::PriorityQueue;
//!
//! let mut heap = FibonacciHeap::new();
//! let handle = heap.insert(5);
//! heap.insert(3);
//! heap.decrease_key(&handle, 1).unwrap();
//! assert_eq!(heap.delete_minimum(), Some(1));
//! assert_eq!(heap.delete_minimum(), Some(3));
//! ```

pub mod binary;
pub mod fibonacci;
pub mod graph;
pub mod pathfinding;
pub mod traits;

// Re-export the main trait for convenience
pub use traits::{HeapError, PriorityQueue};
