//! Array-backed binary heap
//!
//! The baseline priority queue: a classic binary min-heap stored in a flat
//! array, with strict heap order restored after every mutation. Nodes live
//! in a [`SlotMap`] arena so that callers get stable, generational handles
//! even though array positions shift on every sift.
//!
//! The array representation has no sub-linear merge, and handles do not
//! track their own array index, so `decrease_key` and `remove` degrade to
//! O(n): the violating position has to be found by a linear scan. Both are
//! deliberate — they are the asymptotic disadvantages this heap trades
//! against the [`FibonacciHeap`](crate::fibonacci::FibonacciHeap).
//!
//! # Time Complexity
//!
//! | Operation        | Complexity |
//! |------------------|------------|
//! | `insert`         | O(log n)   |
//! | `find_minimum`   | O(1)       |
//! | `delete_minimum` | O(log n)   |
//! | `decrease_key`   | O(n)       |
//! | `remove`         | O(n)       |
//! | `merge`          | O(n)       |

use std::fmt;

use slotmap::{new_key_type, SlotMap};

use crate::traits::{HeapError, PriorityQueue};

new_key_type! {
    /// Handle to a node in a [`BinaryHeap`].
    ///
    /// Generational: once the node is extracted the handle goes stale and
    /// operations on it return [`HeapError::InvalidHandle`]. A consuming
    /// [`merge`](PriorityQueue::merge) re-homes nodes into the destination
    /// arena, so handles issued by the source heap go stale as well.
    pub struct BinaryHandle;
}

/// Binary min-heap over ordered scalar keys
///
/// # Example
///
/// ```rust
/// use heap_compare::binary::BinaryHeap;
/// use heap_compare::PriorityQueue;
///
/// let mut heap = BinaryHeap::from_keys([3, 5, 8]);
/// assert_eq!(heap.find_minimum(), Some(3));
/// assert_eq!(heap.delete_minimum(), Some(3));
/// assert_eq!(heap.to_string(), "05 08");
/// ```
#[derive(Debug, Clone)]
pub struct BinaryHeap<K: Ord + Copy> {
    nodes: SlotMap<BinaryHandle, K>,
    heap: Vec<BinaryHandle>,
}

impl<K: Ord + Copy> PriorityQueue<K> for BinaryHeap<K> {
    type Handle = BinaryHandle;

    fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            heap: Vec::new(),
        }
    }

    fn from_keys<I: IntoIterator<Item = K>>(keys: I) -> Self {
        let mut this = Self::new();
        for key in keys {
            let id = this.nodes.insert(key);
            this.heap.push(id);
        }
        this.heapify();
        this
    }

    fn insert(&mut self, key: K) -> BinaryHandle {
        let id = self.nodes.insert(key);
        self.heap.push(id);
        self.sift_up(self.heap.len() - 1);
        id
    }

    fn find_minimum(&self) -> Option<K> {
        self.heap.first().map(|&id| self.key(id))
    }

    fn delete_minimum(&mut self) -> Option<K> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.heap.swap(0, last);
        let id = self.heap.pop().expect("heap is non-empty");
        let key = self.nodes.remove(id).expect("array ids are live");
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some(key)
    }

    fn decrease_key(&mut self, handle: &BinaryHandle, new_key: K) -> Result<(), HeapError> {
        let current = self.nodes.get(*handle).ok_or(HeapError::InvalidHandle)?;
        if new_key > *current {
            return Err(HeapError::KeyNotDecreased);
        }
        self.nodes[*handle] = new_key;

        // The handle does not know its array index, so the first position
        // violating heap order has to be found by scanning.
        let violation = (1..self.heap.len())
            .find(|&i| self.key(self.heap[i]) < self.key(self.heap[(i - 1) / 2]));
        if let Some(i) = violation {
            self.sift_up(i);
        }
        Ok(())
    }

    fn remove(&mut self, handle: &BinaryHandle) -> Result<K, HeapError> {
        if !self.nodes.contains_key(*handle) {
            return Err(HeapError::InvalidHandle);
        }
        // Hoist the node to the root with unconditional swaps, the
        // sentinel-free equivalent of decreasing its key below everything.
        let mut i = self
            .heap
            .iter()
            .position(|&id| id == *handle)
            .expect("live node is in the array");
        while i > 0 {
            let parent = (i - 1) / 2;
            self.heap.swap(i, parent);
            i = parent;
        }
        Ok(self.delete_minimum().expect("heap is non-empty"))
    }

    fn merge(&mut self, mut other: Self) {
        for id in other.heap.drain(..) {
            let key = other.nodes.remove(id).expect("array ids are live");
            let new_id = self.nodes.insert(key);
            self.heap.push(new_id);
        }
        self.heapify();
    }

    fn merge_copied(&mut self, other: &Self) {
        for &id in &other.heap {
            let new_id = self.nodes.insert(other.key(id));
            self.heap.push(new_id);
        }
        self.heapify();
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

impl<K: Ord + Copy> BinaryHeap<K> {
    fn key(&self, id: BinaryHandle) -> K {
        self.nodes[id]
    }

    /// Bottom-up Floyd heapify over the whole array
    fn heapify(&mut self) {
        for i in (0..self.heap.len() / 2).rev() {
            self.sift_down(i);
        }
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.key(self.heap[index]) < self.key(self.heap[parent]) {
                self.heap.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * index + 1;
            let right = 2 * index + 2;
            let mut smallest = index;

            if left < len && self.key(self.heap[left]) < self.key(self.heap[smallest]) {
                smallest = left;
            }
            if right < len && self.key(self.heap[right]) < self.key(self.heap[smallest]) {
                smallest = right;
            }

            if smallest != index {
                self.heap.swap(index, smallest);
                index = smallest;
            } else {
                break;
            }
        }
    }
}

impl<K: Ord + Copy> Default for BinaryHeap<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Copy> FromIterator<K> for BinaryHeap<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self::from_keys(iter)
    }
}

/// Keys in array order, zero-padded to two digits, space separated
impl<K: Ord + Copy + fmt::Display> fmt::Display for BinaryHeap<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &id) in self.heap.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{:02}", self.key(id))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a_heap() -> BinaryHeap<i32> {
        // Array layout: 03 05 08 13 21 34 55
        BinaryHeap::from_keys([3, 5, 8, 13, 21, 34, 55])
    }

    /// Heap plus handles, reorganized by one delete_minimum
    fn a_reorganized_heap() -> (BinaryHeap<i32>, Vec<BinaryHandle>) {
        let mut heap = BinaryHeap::new();
        let handles = [3, 5, 8, 13, 21, 34, 55, 42, 72, 88]
            .into_iter()
            .map(|k| heap.insert(k))
            .collect();
        heap.delete_minimum();
        // Array layout: 05 13 08 42 21 34 55 88 72
        (heap, handles)
    }

    #[test]
    fn empty_heap() {
        let mut heap: BinaryHeap<i32> = BinaryHeap::new();
        assert_eq!(heap.len(), 0);
        assert!(heap.is_empty());
        assert_eq!(heap.find_minimum(), None);
        assert_eq!(heap.delete_minimum(), None);
        assert_eq!(heap.to_string(), "");
    }

    #[test]
    fn single_element() {
        let heap = BinaryHeap::from_keys([1]);
        assert_eq!(heap.len(), 1);
        assert!(!heap.is_empty());
        assert_eq!(heap.find_minimum(), Some(1));
        assert_eq!(heap.to_string(), "01");
    }

    #[test]
    fn insert_sifts_up() {
        let mut heap = a_heap();
        heap.insert(1);

        assert_eq!(heap.len(), 8);
        assert_eq!(heap.find_minimum(), Some(1));
        assert_eq!(heap.to_string(), "01 03 08 05 21 34 55 13");
    }

    #[test]
    fn merge_copied_reheapifies() {
        let mut heap = a_heap();
        let other = BinaryHeap::from_keys([1]);
        heap.merge_copied(&other);

        assert_eq!(heap.len(), 8);
        assert_eq!(heap.find_minimum(), Some(1));
        assert_eq!(heap.to_string(), "01 03 08 05 21 34 55 13");
        // Source heap is still usable
        assert_eq!(other.find_minimum(), Some(1));
    }

    #[test]
    fn merge_consuming_reheapifies() {
        let mut heap = a_heap();
        let other = BinaryHeap::from_keys([1]);
        heap.merge(other);

        assert_eq!(heap.len(), 8);
        assert_eq!(heap.find_minimum(), Some(1));
        assert_eq!(heap.to_string(), "01 03 08 05 21 34 55 13");
    }

    #[test]
    fn delete_minimum_sifts_down() {
        let mut heap = a_heap();
        assert_eq!(heap.delete_minimum(), Some(3));

        assert_eq!(heap.len(), 6);
        assert_eq!(heap.find_minimum(), Some(5));
        assert_eq!(heap.to_string(), "05 13 08 55 21 34");
    }

    #[test]
    fn decrease_key_of_minimum() {
        let (mut heap, handles) = a_reorganized_heap();
        heap.decrease_key(&handles[1], 2).unwrap();

        assert_eq!(heap.len(), 9);
        assert_eq!(heap.find_minimum(), Some(2));
        assert_eq!(heap.to_string(), "02 13 08 42 21 34 55 88 72");
    }

    #[test]
    fn decrease_key_of_inner_node() {
        let (mut heap, handles) = a_reorganized_heap();
        heap.decrease_key(&handles[9], 7).unwrap();

        assert_eq!(heap.len(), 9);
        assert_eq!(heap.find_minimum(), Some(5));
        assert_eq!(heap.to_string(), "05 07 08 13 21 34 55 42 72");
    }

    #[test]
    fn decrease_key_changing_minimum() {
        let (mut heap, handles) = a_reorganized_heap();
        heap.decrease_key(&handles[9], 0).unwrap();

        assert_eq!(heap.len(), 9);
        assert_eq!(heap.find_minimum(), Some(0));
        assert_eq!(heap.to_string(), "00 05 08 13 21 34 55 42 72");
    }

    #[test]
    fn decrease_key_rejects_increase() {
        let (mut heap, handles) = a_reorganized_heap();
        let before = heap.to_string();

        assert_eq!(
            heap.decrease_key(&handles[9], 90),
            Err(HeapError::KeyNotDecreased)
        );
        assert_eq!(heap.to_string(), before);
    }

    #[test]
    fn decrease_key_to_same_value_is_allowed() {
        let (mut heap, handles) = a_reorganized_heap();
        assert_eq!(heap.decrease_key(&handles[9], 88), Ok(()));
        assert_eq!(heap.find_minimum(), Some(5));
    }

    #[test]
    fn remove_minimum_node() {
        let (mut heap, handles) = a_reorganized_heap();
        assert_eq!(heap.remove(&handles[1]), Ok(5));

        assert_eq!(heap.len(), 8);
        assert_eq!(heap.find_minimum(), Some(8));
        assert_eq!(heap.to_string(), "08 13 34 42 21 72 55 88");
    }

    #[test]
    fn remove_inner_node() {
        let (mut heap, handles) = a_reorganized_heap();
        assert_eq!(heap.remove(&handles[9]), Ok(88));

        assert_eq!(heap.len(), 8);
        assert_eq!(heap.find_minimum(), Some(5));
        assert_eq!(heap.to_string(), "05 13 08 42 21 34 55 72");
    }

    #[test]
    fn stale_handle_is_rejected() {
        let mut heap = BinaryHeap::new();
        let handle = heap.insert(1);
        heap.insert(2);
        assert_eq!(heap.delete_minimum(), Some(1));

        assert_eq!(
            heap.decrease_key(&handle, 0),
            Err(HeapError::InvalidHandle)
        );
        assert_eq!(heap.remove(&handle), Err(HeapError::InvalidHandle));
        assert_eq!(heap.len(), 1);
    }

    #[test]
    fn extracts_in_sorted_order() {
        let mut heap = BinaryHeap::from_keys([9, 4, 7, 1, 8, 2, 6, 3, 5]);
        let mut drained = Vec::new();
        while let Some(key) = heap.delete_minimum() {
            drained.push(key);
        }
        assert_eq!(drained, (1..=9).collect::<Vec<_>>());
        assert!(heap.is_empty());
    }
}
