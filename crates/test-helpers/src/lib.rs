//! Shared graph fixtures for tests and benchmarks.
//!
//! The Barabási–Albert fixtures are built once per process and shared through
//! an `Arc`, the same way every model shares its graph.

use lightning_diffusion_types::generators::{barabasi_albert, path_graph};
use lightning_diffusion_types::{NodeLabel, UndirectedGraph};
use std::sync::{Arc, OnceLock};

/// Seed used for every fixture graph.
pub const FIXTURE_SEED: u64 = 2042;

/// Index-style graph type produced by the fixtures.
pub type TestGraph = UndirectedGraph<usize>;

fn cached(
    cell: &'static OnceLock<Arc<TestGraph>>,
    nodes: usize,
    attachment: usize,
) -> Arc<TestGraph> {
    cell.get_or_init(|| {
        Arc::new(
            barabasi_albert(nodes, attachment, FIXTURE_SEED)
                .expect("fixture parameters are valid"),
        )
    })
    .clone()
}

/// 100 nodes, 3 edges per new node.
pub fn small_graph() -> Arc<TestGraph> {
    static CELL: OnceLock<Arc<TestGraph>> = OnceLock::new();
    cached(&CELL, 100, 3)
}

/// 1 000 nodes, 5 edges per new node.
pub fn medium_graph() -> Arc<TestGraph> {
    static CELL: OnceLock<Arc<TestGraph>> = OnceLock::new();
    cached(&CELL, 1_000, 5)
}

/// 10 000 nodes, 7 edges per new node.
pub fn large_graph() -> Arc<TestGraph> {
    static CELL: OnceLock<Arc<TestGraph>> = OnceLock::new();
    cached(&CELL, 10_000, 7)
}

/// Path `0 - 1 - ... - (n-1)`.
pub fn line_graph(n: usize) -> Arc<TestGraph> {
    Arc::new(path_graph(n))
}

/// Graph with the given isolated nodes, inserted in order.
pub fn graph_with_nodes<N: NodeLabel>(nodes: impl IntoIterator<Item = N>) -> Arc<UndirectedGraph<N>> {
    let mut graph = UndirectedGraph::new();
    graph.add_nodes_from(nodes);
    Arc::new(graph)
}
