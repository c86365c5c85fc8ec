//! Fibonacci heap
//!
//! A forest of heap-ordered multi-way trees with lazy structural
//! maintenance:
//!
//! - `insert` and `merge` splice roots without any restructuring, O(1)
//! - `decrease_key` cuts the node to the root list and cascades over marked
//!   ancestors, O(1) amortized
//! - `delete_minimum` pays the deferred work: it consolidates the root list
//!   by linking equal-rank trees until ranks are unique, which bounds the
//!   surviving root count by O(log n)
//!
//! Children are owned by their parent; the parent link is a [`Weak`]
//! back-reference so the node graph stays acyclic for reference counting.
//! Ownership of a cut node transfers from its parent to the root forest.
//!
//! Arbitrary removal uses a tombstone: the node is flagged `removed` and
//! thereby ordered below every live key by the internal comparator, which
//! sidesteps the need for a "negative infinity" sentinel in the key type.
//!
//! # Time Complexity
//!
//! | Operation        | Complexity         |
//! |------------------|--------------------|
//! | `insert`         | O(1)               |
//! | `find_minimum`   | O(1)               |
//! | `delete_minimum` | O(log n) amortized |
//! | `decrease_key`   | O(1) amortized     |
//! | `remove`         | O(log n) amortized |
//! | `merge`          | O(1) amortized     |

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use smallvec::SmallVec;

use crate::traits::{HeapError, PriorityQueue};

type Link<K> = Rc<RefCell<Node<K>>>;

/// Most nodes have few children; rank only reaches O(log n) near the roots.
type ChildList<K> = SmallVec<[Link<K>; 4]>;

struct Node<K> {
    key: K,
    parent: Weak<RefCell<Node<K>>>,
    children: ChildList<K>,
    /// Set when this node lost a child since it last became a child itself.
    /// Roots are never marked.
    marked: bool,
    /// Tombstone used by `remove`: orders the node below every live key.
    removed: bool,
}

impl<K> Node<K> {
    fn rank(&self) -> usize {
        self.children.len()
    }

    fn is_root(&self) -> bool {
        self.parent.upgrade().is_none()
    }
}

/// Handle to a node in a [`FibonacciHeap`].
///
/// A non-owning reference: it goes stale once the node is extracted, after
/// which `decrease_key` and `remove` return [`HeapError::InvalidHandle`].
pub struct FibonacciHandle<K>(Weak<RefCell<Node<K>>>);

impl<K> Clone for FibonacciHandle<K> {
    fn clone(&self) -> Self {
        FibonacciHandle(Weak::clone(&self.0))
    }
}

impl<K> PartialEq for FibonacciHandle<K> {
    fn eq(&self, other: &Self) -> bool {
        Weak::ptr_eq(&self.0, &other.0)
    }
}

impl<K> Eq for FibonacciHandle<K> {}

impl<K> fmt::Debug for FibonacciHandle<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FibonacciHandle")
    }
}

/// Fibonacci heap over ordered scalar keys
///
/// # Example
///
/// ```rust
/// use heap_compare::fibonacci::FibonacciHeap;
/// use heap_compare::PriorityQueue;
///
/// let mut heap = FibonacciHeap::from_keys([3, 5, 8]);
/// assert_eq!(heap.find_minimum(), Some(3));
/// assert_eq!(heap.to_string(), "(03) (05) (08)");
/// assert_eq!(heap.delete_minimum(), Some(3));
/// assert_eq!(heap.to_string(), "(05 (08))");
/// ```
pub struct FibonacciHeap<K: Ord + Copy> {
    /// Root trees in insertion/splice order
    roots: Vec<Link<K>>,
    /// Cached root with the minimal key
    minimum: Option<Link<K>>,
    len: usize,
}

impl<K: Ord + Copy> PriorityQueue<K> for FibonacciHeap<K> {
    type Handle = FibonacciHandle<K>;

    fn new() -> Self {
        Self {
            roots: Vec::new(),
            minimum: None,
            len: 0,
        }
    }

    fn from_keys<I: IntoIterator<Item = K>>(keys: I) -> Self {
        let roots: Vec<Link<K>> = keys.into_iter().map(Self::singleton).collect();
        let len = roots.len();
        let mut this = Self {
            roots,
            minimum: None,
            len,
        };
        this.minimum = this.search_minimum();
        this
    }

    fn insert(&mut self, key: K) -> FibonacciHandle<K> {
        let node = Self::singleton(key);
        let handle = FibonacciHandle(Rc::downgrade(&node));

        if self.is_new_minimum(&node) {
            self.minimum = Some(Rc::clone(&node));
        }

        self.roots.push(node);
        self.len += 1;
        handle
    }

    fn find_minimum(&self) -> Option<K> {
        self.minimum.as_ref().map(|min| min.borrow().key)
    }

    fn delete_minimum(&mut self) -> Option<K> {
        let min = self.minimum.take()?;

        let position = self
            .roots
            .iter()
            .position(|root| Rc::ptr_eq(root, &min))
            .expect("cached minimum is a root");
        self.roots.remove(position);
        self.len -= 1;

        // The minimum's children become roots, spliced at the tail.
        let children = std::mem::take(&mut min.borrow_mut().children);
        for child in children {
            {
                let mut child = child.borrow_mut();
                child.parent = Weak::new();
                child.marked = false;
            }
            self.roots.push(child);
        }

        self.consolidate();
        self.minimum = self.search_minimum();

        let node = Rc::try_unwrap(min)
            .ok()
            .expect("extracted node has no other owners");
        Some(node.into_inner().key)
    }

    fn decrease_key(&mut self, handle: &FibonacciHandle<K>, new_key: K) -> Result<(), HeapError> {
        let node = handle.0.upgrade().ok_or(HeapError::InvalidHandle)?;

        if node.borrow().key < new_key {
            return Err(HeapError::KeyNotDecreased);
        }
        node.borrow_mut().key = new_key;

        if self.is_new_minimum(&node) {
            self.minimum = Some(Rc::clone(&node));
        }

        let parent = node.borrow().parent.upgrade();
        if let Some(parent) = parent {
            // Heap order against the parent is violated: cut the node and
            // cascade over marked ancestors.
            if Self::node_lt(&node, &parent) {
                self.cascading_cut(node);
            }
        }
        Ok(())
    }

    fn remove(&mut self, handle: &FibonacciHandle<K>) -> Result<K, HeapError> {
        let node = handle.0.upgrade().ok_or(HeapError::InvalidHandle)?;
        let key = node.borrow().key;
        node.borrow_mut().removed = true;
        drop(node);

        // The tombstone orders below everything, so the decrease-key path
        // (with the key unchanged) promotes the node to cached minimum and
        // performs any cuts heap order requires.
        self.decrease_key(handle, key)?;
        self.delete_minimum()
            .expect("tombstoned node is the minimum");
        Ok(key)
    }

    fn merge(&mut self, mut other: Self) {
        if other.len == 0 {
            return;
        }
        let take_other_minimum = match (&self.minimum, &other.minimum) {
            (Some(min), Some(other_min)) => Self::node_lt(other_min, min),
            (None, _) => true,
            _ => false,
        };
        if take_other_minimum {
            self.minimum = other.minimum.take();
        }
        self.roots.append(&mut other.roots);
        self.len += other.len;
        other.minimum = None;
        other.len = 0;
    }

    fn merge_copied(&mut self, other: &Self) {
        for root in &other.roots {
            let copy = Self::clone_tree(root);
            if self.is_new_minimum(&copy) {
                self.minimum = Some(Rc::clone(&copy));
            }
            self.roots.push(copy);
        }
        self.len += other.len;
    }

    fn len(&self) -> usize {
        self.len
    }
}

impl<K: Ord + Copy> FibonacciHeap<K> {
    fn singleton(key: K) -> Link<K> {
        Rc::new(RefCell::new(Node {
            key,
            parent: Weak::new(),
            children: ChildList::new(),
            marked: false,
            removed: false,
        }))
    }

    /// True if `node` should replace the cached minimum.
    fn is_new_minimum(&self, node: &Link<K>) -> bool {
        match &self.minimum {
            Some(min) => Self::node_lt(node, min),
            None => true,
        }
    }

    /// Strict order used everywhere nodes are compared: a tombstoned node
    /// sorts below every live one.
    fn node_lt(a: &Link<K>, b: &Link<K>) -> bool {
        let a = a.borrow();
        if a.removed {
            return true;
        }
        let b = b.borrow();
        if b.removed {
            return false;
        }
        a.key < b.key
    }

    /// Linear scan over the root list; the first of equal minima wins.
    fn search_minimum(&self) -> Option<Link<K>> {
        let mut roots = self.roots.iter();
        let mut best = Rc::clone(roots.next()?);
        for root in roots {
            if Self::node_lt(root, &best) {
                best = Rc::clone(root);
            }
        }
        Some(best)
    }

    /// Links two equal-rank roots; the smaller becomes parent and gains the
    /// other as its last child. On a tie the incumbent (`b`, recorded
    /// earlier in the scan) stays parent, keeping the structure
    /// deterministic.
    fn link(a: Link<K>, b: Link<K>) -> Link<K> {
        if Self::node_lt(&a, &b) {
            b.borrow_mut().parent = Rc::downgrade(&a);
            a.borrow_mut().children.push(b);
            a
        } else {
            a.borrow_mut().parent = Rc::downgrade(&b);
            b.borrow_mut().children.push(a);
            b
        }
    }

    /// Shrinks the root list to at most one tree per rank.
    ///
    /// Scans roots left to right, keeping a rank-indexed table of scan
    /// positions. Whenever the current tree's rank collides, the two are
    /// linked and the winner takes over the earlier tree's position; the
    /// later slot is vacated. Root order is therefore a function of the
    /// pre-consolidation list only, which keeps renderings reproducible.
    fn consolidate(&mut self) {
        if self.len == 0 {
            self.roots.clear();
            return;
        }

        let max_rank = (self.len as f64).log2().floor() as usize;
        let mut by_rank: Vec<Option<usize>> = vec![None; max_rank + 2];
        let mut slots: Vec<Option<Link<K>>> =
            std::mem::take(&mut self.roots).into_iter().map(Some).collect();

        for i in 0..slots.len() {
            let Some(mut current) = slots[i].take() else {
                continue;
            };
            let mut current_slot = i;
            loop {
                let rank = current.borrow().rank();
                if rank >= by_rank.len() {
                    by_rank.resize(rank + 1, None);
                }
                match by_rank[rank].take() {
                    Some(other_slot) => {
                        let other = slots[other_slot]
                            .take()
                            .expect("rank table slots hold live roots");
                        current = Self::link(current, other);
                        current_slot = other_slot;
                    }
                    None => {
                        by_rank[rank] = Some(current_slot);
                        slots[current_slot] = Some(current);
                        break;
                    }
                }
            }
        }

        self.roots = slots.into_iter().flatten().collect();
    }

    /// Detaches `node` from its parent and appends it to the root list,
    /// clearing its mark.
    fn cut(&mut self, node: &Link<K>) {
        let parent = node.borrow().parent.upgrade();
        let Some(parent) = parent else { return };

        parent
            .borrow_mut()
            .children
            .retain(|child| !Rc::ptr_eq(child, node));

        self.roots.push(Rc::clone(node));
        let mut node = node.borrow_mut();
        node.marked = false;
        node.parent = Weak::new();
    }

    /// Cuts `node`, then walks up cutting every already-marked ancestor.
    /// The first unmarked ancestor is marked instead (unless it is a root)
    /// and the walk stops.
    fn cascading_cut(&mut self, mut node: Link<K>) {
        loop {
            let parent = node.borrow().parent.upgrade();
            match parent {
                Some(parent) if parent.borrow().marked => {
                    self.cut(&node);
                    node = parent;
                }
                _ => break,
            }
        }

        let parent = node.borrow().parent.upgrade();
        if let Some(parent) = parent {
            if !parent.borrow().is_root() {
                parent.borrow_mut().marked = true;
            }
        }
        self.cut(&node);
    }

    fn clone_tree(node: &Link<K>) -> Link<K> {
        let source = node.borrow();
        let copy = Rc::new(RefCell::new(Node {
            key: source.key,
            parent: Weak::new(),
            children: ChildList::new(),
            marked: source.marked,
            removed: source.removed,
        }));
        for child in &source.children {
            let child_copy = Self::clone_tree(child);
            child_copy.borrow_mut().parent = Rc::downgrade(&copy);
            copy.borrow_mut().children.push(child_copy);
        }
        copy
    }

    fn fmt_trees(f: &mut fmt::Formatter<'_>, nodes: &[Link<K>]) -> fmt::Result
    where
        K: fmt::Display,
    {
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            let node = node.borrow();
            write!(f, "({:02}", node.key)?;
            if node.marked {
                write!(f, "*")?;
            }
            if !node.children.is_empty() {
                write!(f, " ")?;
                Self::fmt_trees(f, &node.children)?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl<K: Ord + Copy> Default for FibonacciHeap<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Copy> Clone for FibonacciHeap<K> {
    /// Deep copy. Handles keep referring to the original heap's nodes.
    fn clone(&self) -> Self {
        let mut copy = Self::new();
        copy.merge_copied(self);
        copy
    }
}

impl<K: Ord + Copy> FromIterator<K> for FibonacciHeap<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self::from_keys(iter)
    }
}

impl<K: Ord + Copy> Drop for FibonacciHeap<K> {
    /// Iterative teardown: a long chain of single-child nodes would
    /// otherwise recurse once per level when the `Rc`s unwind.
    fn drop(&mut self) {
        self.minimum = None;
        let mut pending = std::mem::take(&mut self.roots);
        while let Some(node) = pending.pop() {
            let mut children = std::mem::take(&mut node.borrow_mut().children);
            pending.extend(children.drain(..));
        }
    }
}

/// One parenthesized S-expression per root tree: the zero-padded key, `*`
/// if marked, then the children, all space separated
impl<K: Ord + Copy + fmt::Display> fmt::Display for FibonacciHeap<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Self::fmt_trees(f, &self.roots)
    }
}
