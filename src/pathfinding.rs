//! Dijkstra's shortest-path algorithm, generic over the queue
//!
//! The traversal is written against [`PriorityQueue`] only, so the same
//! search runs unchanged over [`BinaryHeap`] or [`FibonacciHeap`] — that is
//! the point of this crate: the queue is the variable under measurement.
//!
//! Improved tentative distances are inserted as fresh queue entries rather
//! than updated via `decrease_key`. Superseded entries surface later with a
//! distance above the settled one and relax nothing, so correctness is
//! unaffected and both queue implementations are exercised through the same
//! minimal interface.
//!
//! [`BinaryHeap`]: crate::binary::BinaryHeap
//! [`FibonacciHeap`]: crate::fibonacci::FibonacciHeap
//!
//! # Example
//!
//! ```rust
//! use heap_compare::binary::BinaryHeap;
//! use heap_compare::graph::Graph;
//! use heap_compare::pathfinding::dijkstra;
//!
//! let mut graph = Graph::with_nodes(3);
//! graph.add_edge(0, 1, 4);
//! graph.add_edge(1, 2, 3);
//! graph.add_edge(0, 2, 9);
//!
//! let path = dijkstra::<BinaryHeap<_>>(&graph, 0, 2);
//! assert_eq!(path, vec![0, 1, 2]);
//! ```

use crate::graph::{Edge, Graph, Key, Weight};
use crate::traits::PriorityQueue;

/// Computes the shortest path from `source` to `destination`.
///
/// Returns the path as a node sequence starting at `source`. When
/// `destination` cannot be reached (and whenever `source == destination`)
/// the result is the single-node path `[source]`.
///
/// All edge weights must be non-negative; `Weight` being unsigned enforces
/// this at the type level.
///
/// # Panics
///
/// Panics if `source` or `destination` is not a node of `graph`.
pub fn dijkstra<Q: PriorityQueue<Edge>>(graph: &Graph, source: Key, destination: Key) -> Vec<Key> {
    assert!(source < graph.node_count(), "source node out of range");
    assert!(destination < graph.node_count(), "destination node out of range");

    let mut parent: Vec<Option<Key>> = vec![None; graph.node_count()];
    let mut dist = vec![Weight::MAX; graph.node_count()];

    let mut queue = Q::new();

    dist[source] = 0;
    queue.insert(Edge {
        to: source,
        weight: 0,
    });

    while let Some(entry) = queue.find_minimum() {
        let node = entry.to;
        if node == destination {
            break;
        }
        queue.delete_minimum();

        for edge in graph.edges(node) {
            let candidate = dist[node].saturating_add(edge.weight);
            if dist[edge.to] > candidate {
                dist[edge.to] = candidate;
                parent[edge.to] = Some(node);
                queue.insert(Edge {
                    to: edge.to,
                    weight: candidate,
                });
            }
        }
    }

    let mut path = Vec::new();
    let mut current = destination;
    while let Some(prev) = parent[current] {
        path.push(current);
        current = prev;
    }
    path.push(source);
    path.reverse();

    path
}
