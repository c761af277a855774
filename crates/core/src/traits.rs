//! The diffusion model contract and its shared run loop.

use crate::progress::progress_bar;
use crate::ModelBase;
use lightning_diffusion_types::{Graph, StateLabel, StateSummary};
use std::sync::Arc;
use tracing::{debug, warn};

/// A discrete-time diffusion process over a graph.
///
/// Implementors embed a [`ModelBase`] and define two things: what the initial
/// condition is (`reset`) and what one time unit does (`step`). Everything
/// else, including the run loop and the post-termination guard, is shared.
///
/// # Guarantees
///
/// - **Synchronous**: `step` always runs to completion once entered
/// - **Deterministic**: same graph, parameters and seed give the same run
/// - **Snapshot steps**: all transitions within a step read the pre-step state
///
/// # Example
///
/// ```ignore
/// let mut model = IndependentCascadeModel::new(graph, 0.1, 0.1, Some(2050))?;
/// model.run(None, false);
/// println!("{} after {} steps", model.state_summary(), model.iteration());
/// ```
pub trait DiffusionModel {
    /// Graph type the model diffuses over.
    type Graph: Graph;

    /// Per-node label.
    type State: StateLabel;

    /// Shared lifecycle state.
    fn base(&self) -> &ModelBase<Self::Graph, Self::State>;

    /// Mutable shared lifecycle state.
    fn base_mut(&mut self) -> &mut ModelBase<Self::Graph, Self::State>;

    /// Advance the diffusion by exactly one time unit.
    ///
    /// On a terminated model this must warn (see [`is_terminated`](Self::is_terminated))
    /// and return without mutating anything.
    fn step(&mut self);

    /// Reinitialize state, iteration counter and termination flag.
    ///
    /// Consumes the model's RNG, so consecutive resets of one model produce
    /// different (but seed-deterministic) initial conditions.
    fn reset(&mut self);

    /// How many nodes currently hold each label of the state space.
    fn state_summary(&self) -> StateSummary<Self::State> {
        StateSummary::count(self.state())
    }

    /// Current per-node state, indexed by node id.
    fn state(&self) -> &[Self::State] {
        self.base().state()
    }

    /// Number of committed steps since the last reset.
    fn iteration(&self) -> u64 {
        self.base().iteration()
    }

    /// Whether the diffusion can make no further progress.
    fn terminated(&self) -> bool {
        self.base().terminated()
    }

    /// The graph this model diffuses over.
    fn graph(&self) -> &Arc<Self::Graph> {
        self.base().graph()
    }

    /// Number of nodes in the graph.
    fn node_count(&self) -> usize {
        self.base().node_count()
    }

    /// Termination guard used by `step` and `run`.
    ///
    /// Returns the termination flag, logging a warning when it is already set.
    /// Stepping a terminated model is a recoverable misuse: call `reset`.
    fn is_terminated(&self) -> bool {
        let terminated = self.terminated();
        if terminated {
            warn!(
                iteration = self.iteration(),
                "The diffusion has already been terminated. You should call reset(); \
                 further steps have no effect"
            );
        }
        terminated
    }

    /// Run several steps.
    ///
    /// - `Some(n)`: step up to `n` times, stopping as soon as the model
    ///   terminates; draws a progress bar when `verbose` is set. `Some(0)`
    ///   performs no steps; it is not a request for an unbounded run.
    /// - `None`: step until termination. The caller is responsible for the
    ///   model converging.
    fn run(&mut self, n_iter: Option<u64>, verbose: bool) {
        if self.is_terminated() {
            return;
        }

        match n_iter {
            Some(n_iter) => {
                let progress = progress_bar(n_iter, verbose);
                for _ in 0..n_iter {
                    self.step();
                    progress.inc(1);

                    if self.terminated() {
                        break;
                    }
                }
                progress.finish_and_clear();
            }
            None => {
                while !self.terminated() {
                    self.step();
                }
            }
        }

        debug!(
            iteration = self.iteration(),
            terminated = self.terminated(),
            summary = %self.state_summary(),
            "Run finished"
        );
    }
}
