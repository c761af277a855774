//! Lifecycle state shared by every diffusion model.

use crate::DiffusionError;
use lightning_diffusion_types::{Graph, NodeLabel, StateLabel};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

/// Check that a graph's node identifiers are exactly `0..N`, in any order.
pub fn validate_graph<G: Graph>(graph: &G) -> Result<(), DiffusionError> {
    let node_count = graph.node_count();
    let mut indices = Vec::with_capacity(node_count);

    for node in graph.nodes() {
        match node.index() {
            Some(index) => indices.push(index),
            None => {
                return Err(DiffusionError::unsupported_graph(format!(
                    "node {node:?} is not a non-negative integer"
                )))
            }
        }
    }

    indices.sort_unstable();
    if indices.len() != node_count || !indices.iter().copied().eq(0..node_count) {
        return Err(DiffusionError::unsupported_graph(format!(
            "node identifiers are not exactly 0..{node_count}"
        )));
    }

    Ok(())
}

/// State every diffusion model carries: the graph, the per-node state vector,
/// the iteration counter, the termination flag and the model's RNG.
///
/// Concrete models embed one of these and mutate it only through
/// [`commit`](Self::commit), [`terminate`](Self::terminate) and
/// [`restart`](Self::restart).
#[derive(Debug, Clone)]
pub struct ModelBase<G: Graph, S: StateLabel> {
    /// Shared, read-only graph.
    graph: Arc<G>,

    /// Exclusively owned generator; every draw and shuffle advances it.
    rng: ChaCha8Rng,

    /// One label per node, indexed by node id.
    state: Vec<S>,

    /// Number of committed steps since the last restart.
    iteration: u64,

    /// Whether the diffusion can make no further progress.
    terminated: bool,
}

impl<G: Graph, S: StateLabel> ModelBase<G, S> {
    /// Validate the graph and set up the RNG.
    ///
    /// The base starts terminated with an empty state vector; the concrete
    /// model is expected to call its own `reset` right after.
    /// An omitted seed draws one from OS entropy.
    pub fn new(graph: Arc<G>, seed: Option<u64>) -> Result<Self, DiffusionError> {
        validate_graph(graph.as_ref())?;

        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Ok(Self {
            graph,
            rng,
            state: Vec::new(),
            iteration: 0,
            terminated: true,
        })
    }

    /// The graph this model diffuses over.
    pub fn graph(&self) -> &Arc<G> {
        &self.graph
    }

    /// Number of nodes (and length of the state vector once initialized).
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Current state vector.
    pub fn state(&self) -> &[S] {
        &self.state
    }

    /// Number of committed steps.
    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    /// Whether the diffusion has terminated.
    pub fn terminated(&self) -> bool {
        self.terminated
    }

    /// Mutable access to the model's RNG.
    pub fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// Borrow the graph, the current state and the RNG together for a step.
    pub fn step_view(&mut self) -> StepView<'_, G, S> {
        StepView {
            graph: self.graph.as_ref(),
            state: &self.state,
            rng: &mut self.rng,
        }
    }

    /// Install the state computed by a step and advance the iteration counter.
    pub fn commit(&mut self, next: Vec<S>) {
        debug_assert_eq!(next.len(), self.state.len());
        self.state = next;
        self.iteration += 1;
    }

    /// Mark the diffusion as terminated. The state vector is left untouched.
    pub fn terminate(&mut self) {
        self.terminated = true;
    }

    /// Install a fresh initial condition: iteration 0, not terminated.
    pub fn restart(&mut self, initial: Vec<S>) {
        debug_assert_eq!(initial.len(), self.node_count());
        self.state = initial;
        self.iteration = 0;
        self.terminated = false;
    }
}

/// Borrowed view of a model for the duration of one step.
///
/// `state` is the pre-step snapshot; steps write into their own buffer and
/// hand it to [`ModelBase::commit`].
pub struct StepView<'a, G, S> {
    pub graph: &'a G,
    pub state: &'a [S],
    pub rng: &'a mut ChaCha8Rng,
}
