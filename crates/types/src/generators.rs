//! Seeded sample graphs.
//!
//! All generators produce index-style graphs (nodes `0..n` inserted in
//! ascending order), so their output is accepted by every diffusion model.
//! Random generators take an explicit seed and are deterministic for it.

use crate::UndirectedGraph;
use indexmap::IndexSet;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Errors raised by graph generators.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("invalid graph parameter: {0}")]
    InvalidParameter(String),
}

/// Path `0 - 1 - ... - (n-1)`.
pub fn path_graph(n: usize) -> UndirectedGraph<usize> {
    let mut graph = UndirectedGraph::new();
    graph.add_nodes_from(0..n);
    for i in 1..n {
        graph.add_edge(i - 1, i);
    }
    graph
}

/// Every pair of the `n` nodes connected.
pub fn complete_graph(n: usize) -> UndirectedGraph<usize> {
    let mut graph = UndirectedGraph::new();
    graph.add_nodes_from(0..n);
    for i in 0..n {
        for j in (i + 1)..n {
            graph.add_edge(i, j);
        }
    }
    graph
}

/// G(n, p) random graph: each pair is connected independently with probability `p`.
pub fn erdos_renyi(n: usize, p: f64, seed: u64) -> Result<UndirectedGraph<usize>, GraphError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(GraphError::InvalidParameter(format!(
            "edge probability must be within [0, 1], got {p}"
        )));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut graph = UndirectedGraph::new();
    graph.add_nodes_from(0..n);
    for i in 0..n {
        for j in (i + 1)..n {
            if rng.gen::<f64>() < p {
                graph.add_edge(i, j);
            }
        }
    }
    Ok(graph)
}

/// Barabási–Albert preferential attachment graph.
///
/// Starts from a star on `m + 1` nodes; every further node attaches to `m`
/// distinct existing nodes picked with probability proportional to degree.
/// Requires `1 <= m < n`.
pub fn barabasi_albert(
    n: usize,
    m: usize,
    seed: u64,
) -> Result<UndirectedGraph<usize>, GraphError> {
    if m < 1 || m >= n {
        return Err(GraphError::InvalidParameter(format!(
            "Barabási–Albert graph needs 1 <= m < n, got m = {m}, n = {n}"
        )));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut graph = UndirectedGraph::new();
    graph.add_nodes_from(0..=m);

    // Each node appears once per incident edge, so uniform picks are degree-weighted.
    let mut repeated: Vec<usize> = Vec::with_capacity(2 * n * m);
    for leaf in 1..=m {
        graph.add_edge(0, leaf);
        repeated.push(0);
        repeated.push(leaf);
    }

    for source in (m + 1)..n {
        let mut targets = IndexSet::with_capacity(m);
        while targets.len() < m {
            targets.insert(repeated[rng.gen_range(0..repeated.len())]);
        }

        graph.add_node(source);
        for &target in &targets {
            graph.add_edge(source, target);
            repeated.push(target);
            repeated.push(source);
        }
    }

    Ok(graph)
}
