//! Directed weighted graphs over dense integer keys
//!
//! Nodes are plain indices (`Key = usize`) and the graph is a flat
//! adjacency list, so traversal state in [`pathfinding`](crate::pathfinding)
//! can live in dense `Vec`s instead of hash maps. [`random_graph`] builds
//! seeded random instances for cross-checking and benchmarking the heap
//! implementations against each other.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Node identifier, an index into the adjacency list
pub type Key = usize;

/// Edge weight. Unsigned: Dijkstra assumes no negative weights.
pub type Weight = u64;

/// A directed edge to `to` with the given weight.
///
/// Also the entry type stored in the priority queue during Dijkstra, where
/// `to` is the frontier node and `weight` its tentative distance. The order
/// is by weight first, then by target, so two edges never compare equal
/// unless they are identical and tie-breaking is deterministic across queue
/// implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    /// Target node
    pub to: Key,
    /// Edge weight
    pub weight: Weight,
}

impl Ord for Edge {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.weight
            .cmp(&other.weight)
            .then_with(|| self.to.cmp(&other.to))
    }
}

impl PartialOrd for Edge {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Adjacency-list digraph with a fixed node count.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: Vec<Vec<Edge>>,
}

impl Graph {
    /// Creates a graph with `nodes` nodes and no edges
    pub fn with_nodes(nodes: usize) -> Self {
        Graph {
            adjacency: vec![Vec::new(); nodes],
        }
    }

    /// Adds a directed edge from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either endpoint is out of range.
    pub fn add_edge(&mut self, from: Key, to: Key, weight: Weight) {
        assert!(from < self.adjacency.len(), "source node out of range");
        assert!(to < self.adjacency.len(), "target node out of range");
        self.adjacency[from].push(Edge { to, weight });
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Total number of edges
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Outgoing edges of `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` is out of range.
    pub fn edges(&self, node: Key) -> &[Edge] {
        &self.adjacency[node]
    }
}

/// Generates a random digraph with exactly `num_edges` edges.
///
/// Endpoints are drawn uniformly from the node range and weights uniformly
/// from `0..=max_weight`. The same seed always yields the same graph.
/// Self-loops and parallel edges may occur; Dijkstra handles both.
///
/// # Panics
///
/// Panics if `num_edges` exceeds `num_nodes * (num_nodes - 1) / 2`, and in
/// particular when edges are requested on an empty graph.
pub fn random_graph(num_nodes: usize, num_edges: usize, max_weight: Weight, seed: u64) -> Graph {
    assert!(
        (num_nodes == 0 && num_edges == 0) || num_edges <= num_nodes * (num_nodes - 1) / 2,
        "too many edges for {num_nodes} nodes"
    );

    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = Graph::with_nodes(num_nodes);

    for _ in 0..num_edges {
        let src = rng.gen_range(0..num_nodes);
        let dst = rng.gen_range(0..num_nodes);
        let weight = rng.gen_range(0..=max_weight);
        graph.add_edge(src, dst, weight);
    }

    graph
}
