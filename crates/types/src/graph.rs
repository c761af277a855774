//! Graph trait and adjacency-map implementation.

use crate::NodeLabel;
use indexmap::{IndexMap, IndexSet};

/// Read-only graph contract used by diffusion models.
///
/// Iteration order of both `nodes` and `neighbors` must be stable for a given
/// graph value: models consume one random draw per visited edge in that order,
/// so a stable traversal is what makes seeded runs reproducible.
pub trait Graph {
    /// Node identifier type.
    type Node: NodeLabel;

    /// Number of nodes in the graph.
    fn node_count(&self) -> usize;

    /// Iterate over all nodes.
    fn nodes(&self) -> impl Iterator<Item = &Self::Node>;

    /// Iterate over the neighbors of `node`.
    ///
    /// Unknown nodes have no neighbors.
    fn neighbors(&self, node: &Self::Node) -> impl Iterator<Item = &Self::Node>;

    /// Check if the graph has no nodes.
    fn is_empty(&self) -> bool {
        self.node_count() == 0
    }
}

/// Undirected graph backed by an insertion-ordered adjacency map.
///
/// Nodes iterate in the order they were first added, and each neighbor list in
/// the order its edges were added.
#[derive(Debug, Clone)]
pub struct UndirectedGraph<N: NodeLabel> {
    adjacency: IndexMap<N, IndexSet<N>>,
    edge_count: usize,
}

impl<N: NodeLabel> Default for UndirectedGraph<N> {
    fn default() -> Self {
        Self {
            adjacency: IndexMap::new(),
            edge_count: 0,
        }
    }
}

impl<N: NodeLabel> UndirectedGraph<N> {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a list of edges.
    pub fn from_edges(edges: impl IntoIterator<Item = (N, N)>) -> Self {
        let mut graph = Self::new();
        for (a, b) in edges {
            graph.add_edge(a, b);
        }
        graph
    }

    /// Add a node. Returns false if it was already present.
    pub fn add_node(&mut self, node: N) -> bool {
        if self.adjacency.contains_key(&node) {
            return false;
        }
        self.adjacency.insert(node, IndexSet::new());
        true
    }

    /// Add several nodes, preserving their order.
    pub fn add_nodes_from(&mut self, nodes: impl IntoIterator<Item = N>) {
        for node in nodes {
            self.add_node(node);
        }
    }

    /// Add an undirected edge, inserting missing endpoints.
    ///
    /// Returns false if the edge already existed.
    pub fn add_edge(&mut self, a: N, b: N) -> bool {
        self.add_node(a.clone());
        self.add_node(b.clone());

        let inserted = self
            .adjacency
            .get_mut(&a)
            .map(|neighbors| neighbors.insert(b.clone()))
            .unwrap_or(false);
        if !inserted {
            return false;
        }

        if a != b {
            if let Some(neighbors) = self.adjacency.get_mut(&b) {
                neighbors.insert(a);
            }
        }
        self.edge_count += 1;
        true
    }

    /// Check if the graph contains a node.
    pub fn contains_node(&self, node: &N) -> bool {
        self.adjacency.contains_key(node)
    }

    /// Check if the graph contains an edge (in either direction).
    pub fn contains_edge(&self, a: &N, b: &N) -> bool {
        self.adjacency
            .get(a)
            .is_some_and(|neighbors| neighbors.contains(b))
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Degree of a node (0 for unknown nodes).
    pub fn degree(&self, node: &N) -> usize {
        self.adjacency.get(node).map(IndexSet::len).unwrap_or(0)
    }

    /// Iterate over all edges, each reported once.
    pub fn edges(&self) -> impl Iterator<Item = (&N, &N)> {
        self.adjacency.iter().enumerate().flat_map(move |(i, (a, neighbors))| {
            neighbors.iter().filter_map(move |b| {
                let j = self.adjacency.get_index_of(b)?;
                (j >= i).then_some((a, b))
            })
        })
    }
}

impl<N: NodeLabel> Graph for UndirectedGraph<N> {
    type Node = N;

    fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    fn nodes(&self) -> impl Iterator<Item = &N> {
        self.adjacency.keys()
    }

    fn neighbors(&self, node: &N) -> impl Iterator<Item = &N> {
        self.adjacency.get(node).into_iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_edge_inserts_endpoints() {
        let mut graph = UndirectedGraph::new();
        assert!(graph.add_edge(0usize, 1));
        assert!(graph.contains_node(&0));
        assert!(graph.contains_node(&1));
        assert!(graph.contains_edge(&1, &0));
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_duplicate_edges_ignored() {
        let mut graph = UndirectedGraph::new();
        assert!(graph.add_edge(0usize, 1));
        assert!(!graph.add_edge(1, 0));
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.degree(&0), 1);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut graph = UndirectedGraph::new();
        graph.add_nodes_from([2usize, 4, 0, 3, 1]);
        graph.add_edge(0, 3);
        graph.add_edge(0, 1);

        let nodes: Vec<usize> = graph.nodes().copied().collect();
        assert_eq!(nodes, vec![2, 4, 0, 3, 1]);

        let neighbors: Vec<usize> = graph.neighbors(&0).copied().collect();
        assert_eq!(neighbors, vec![3, 1]);
    }

    #[test]
    fn test_unknown_node_has_no_neighbors() {
        let graph = UndirectedGraph::from_edges([(0usize, 1)]);
        assert_eq!(graph.neighbors(&7).count(), 0);
        assert_eq!(graph.degree(&7), 0);
    }

    #[test]
    fn test_edges_reported_once() {
        let graph = UndirectedGraph::from_edges([(0usize, 1), (1, 2), (2, 0), (2, 2)]);
        assert_eq!(graph.edges().count(), 4);
        assert_eq!(graph.edge_count(), 4);
    }
}
