//! Independent Cascade model.
//!
//! Each step, every infected node makes one independent infection attempt per
//! neighbor with a fixed probability, then recovers. A node therefore spreads
//! during exactly one step, and the cascade always dies out.
//!
//! # Step semantics
//!
//! ```text
//!   old state ──read──▶ for each infected node (graph order):
//!                         for each neighbor (graph order):
//!                           draw u ~ U[0, 1)
//!                           u <= p && old[neighbor] == S  ──▶ new[neighbor] = I
//!                         new[node] = R
//!   new state ◀─write──┘
//! ```
//!
//! Reads only ever see the pre-step snapshot, so an infection chain advances
//! at most one hop per step regardless of node order.

use crate::SirState;
use lightning_diffusion_core::{DiffusionError, DiffusionModel, ModelBase, StepView};
use lightning_diffusion_types::{Graph, NodeLabel};
use rand::seq::SliceRandom;
use rand::Rng;
use std::iter;
use std::sync::Arc;
use tracing::{debug, trace};

/// How many nodes start infected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InitialInfection {
    /// Proportion of all nodes, strictly between 0 and 1; truncated to a count.
    Fraction(f64),
    /// Absolute number of nodes, at most the node count.
    Count(usize),
}

impl InitialInfection {
    /// Resolve to a node count for a graph of `node_count` nodes.
    pub fn resolve(self, node_count: usize) -> Result<usize, DiffusionError> {
        match self {
            InitialInfection::Fraction(fraction) => {
                if !(fraction > 0.0 && fraction < 1.0) {
                    return Err(DiffusionError::invalid_parameter(
                        "initially_infected",
                        format!("fraction must be strictly between 0 and 1, got {fraction}"),
                    ));
                }
                Ok((fraction * node_count as f64) as usize)
            }
            InitialInfection::Count(count) => {
                if count > node_count {
                    return Err(DiffusionError::invalid_parameter(
                        "initially_infected",
                        format!("{count} exceeds the node count {node_count}"),
                    ));
                }
                Ok(count)
            }
        }
    }
}

impl From<usize> for InitialInfection {
    fn from(count: usize) -> Self {
        InitialInfection::Count(count)
    }
}

/// Values strictly inside (0, 1) are fractions; whole non-negative values are
/// counts. Anything else stays a fraction and is rejected on resolution.
impl From<f64> for InitialInfection {
    fn from(value: f64) -> Self {
        if value > 0.0 && value < 1.0 {
            InitialInfection::Fraction(value)
        } else if value >= 0.0 && value.fract() == 0.0 && value <= usize::MAX as f64 {
            InitialInfection::Count(value as usize)
        } else {
            InitialInfection::Fraction(value)
        }
    }
}

/// SIR Independent Cascade over an index-style graph.
#[derive(Debug, Clone)]
pub struct IndependentCascadeModel<G: Graph> {
    base: ModelBase<G, SirState>,

    /// Per-edge, per-step infection probability.
    infection_probability: f64,

    /// Number of nodes infected by `reset`.
    initially_infected: usize,
}

impl<G: Graph> IndependentCascadeModel<G> {
    /// Create a model and draw its first initial condition.
    ///
    /// # Errors
    ///
    /// - [`DiffusionError::UnsupportedGraph`] if node identifiers are not `0..N`
    /// - [`DiffusionError::InvalidParameter`] if `infection_probability` is
    ///   outside `[0, 1]` or `initially_infected` does not fit the graph
    pub fn new(
        graph: Arc<G>,
        infection_probability: f64,
        initially_infected: impl Into<InitialInfection>,
        seed: Option<u64>,
    ) -> Result<Self, DiffusionError> {
        let base = ModelBase::new(graph, seed)?;

        if !(0.0..=1.0).contains(&infection_probability) {
            return Err(DiffusionError::invalid_parameter(
                "infection_probability",
                format!("must be within [0, 1], got {infection_probability}"),
            ));
        }
        let initially_infected = initially_infected.into().resolve(base.node_count())?;

        let mut model = Self {
            base,
            infection_probability,
            initially_infected,
        };
        model.reset();
        Ok(model)
    }

    /// Per-edge infection probability.
    pub fn infection_probability(&self) -> f64 {
        self.infection_probability
    }

    /// Number of nodes infected by each `reset`.
    pub fn initially_infected(&self) -> usize {
        self.initially_infected
    }

    /// Restart from a chosen set of infected nodes instead of a random draw.
    ///
    /// Does not consume the RNG. Later calls to `reset` go back to drawing
    /// `initially_infected` random nodes.
    pub fn reset_with_seeds(&mut self, seeds: &[usize]) -> Result<(), DiffusionError> {
        let node_count = self.node_count();
        let mut initial = vec![SirState::Susceptible; node_count];
        for &seed in seeds {
            let slot = initial.get_mut(seed).ok_or_else(|| {
                DiffusionError::invalid_parameter(
                    "seeds",
                    format!("node {seed} is out of range for {node_count} nodes"),
                )
            })?;
            *slot = SirState::Infected;
        }

        self.base_mut().restart(initial);
        debug!(seeds = seeds.len(), "Cascade reset with explicit seeds");
        Ok(())
    }
}

/// One pass over the infected nodes of `view.state`.
///
/// Returns the next state, or `None` if no node was infected.
fn spread<G: Graph>(view: StepView<'_, G, SirState>, probability: f64) -> Option<Vec<SirState>> {
    let StepView { graph, state, rng } = view;
    let mut next = state.to_vec();
    let mut any_infected = false;

    for node in graph.nodes() {
        let Some(index) = node.index() else {
            continue;
        };
        if state[index] != SirState::Infected {
            continue;
        }
        any_infected = true;

        for neighbor in graph.neighbors(node) {
            // Drawn for every neighbor so the RNG stream depends only on topology.
            let draw: f64 = rng.gen();
            let Some(neighbor) = neighbor.index() else {
                continue;
            };
            if draw <= probability && state[neighbor] == SirState::Susceptible {
                next[neighbor] = SirState::Infected;
            }
        }

        next[index] = SirState::Recovered;
    }

    any_infected.then_some(next)
}

impl<G: Graph> DiffusionModel for IndependentCascadeModel<G> {
    type Graph = G;
    type State = SirState;

    fn base(&self) -> &ModelBase<G, SirState> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ModelBase<G, SirState> {
        &mut self.base
    }

    /// Advance the cascade by one step.
    ///
    /// When no node is infected the model terminates instead: the state and
    /// the iteration counter stay at the last committed step.
    fn step(&mut self) {
        if self.is_terminated() {
            return;
        }

        let probability = self.infection_probability;
        match spread(self.base_mut().step_view(), probability) {
            Some(next) => {
                self.base_mut().commit(next);
                trace!(
                    iteration = self.iteration(),
                    summary = %self.state_summary(),
                    "Cascade step"
                );
            }
            None => {
                self.base_mut().terminate();
                debug!(iteration = self.iteration(), "Cascade died out");
            }
        }
    }

    /// Draw a new initial condition: `initially_infected` random nodes
    /// infected, the rest susceptible.
    fn reset(&mut self) {
        let node_count = self.node_count();
        let susceptible = node_count - self.initially_infected;
        let mut initial: Vec<SirState> = iter::repeat(SirState::Susceptible)
            .take(susceptible)
            .chain(iter::repeat(SirState::Infected).take(self.initially_infected))
            .collect();
        initial.shuffle(self.base_mut().rng_mut());

        self.base_mut().restart(initial);
        debug!(
            nodes = node_count,
            infected = self.initially_infected,
            "Cascade reset"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lightning_diffusion_types::generators::path_graph;
    use lightning_diffusion_types::UndirectedGraph;
    use tracing_test::traced_test;

    use SirState::{Infected as I, Recovered as R, Susceptible as S};

    fn path(n: usize) -> Arc<UndirectedGraph<usize>> {
        Arc::new(path_graph(n))
    }

    #[test]
    fn test_initial_infection_from_f64() {
        assert_eq!(InitialInfection::from(0.25), InitialInfection::Fraction(0.25));
        assert_eq!(InitialInfection::from(75.0), InitialInfection::Count(75));
        assert_eq!(InitialInfection::from(0.0), InitialInfection::Count(0));
        assert!(InitialInfection::from(-0.5).resolve(10).is_err());
        assert!(InitialInfection::from(2.5).resolve(10).is_err());
    }

    #[test]
    fn test_fraction_truncates() {
        assert_eq!(InitialInfection::Fraction(0.25).resolve(100).unwrap(), 25);
        assert_eq!(InitialInfection::Fraction(0.19).resolve(10).unwrap(), 1);
    }

    #[test]
    fn test_count_cannot_exceed_nodes() {
        let err = IndependentCascadeModel::new(path(5), 0.5, 6usize, Some(1)).unwrap_err();
        assert!(matches!(
            err,
            DiffusionError::InvalidParameter {
                name: "initially_infected",
                ..
            }
        ));
    }

    #[test]
    fn test_probability_out_of_range_rejected() {
        assert!(IndependentCascadeModel::new(path(5), 1.5, 1usize, Some(1)).is_err());
        assert!(IndependentCascadeModel::new(path(5), -0.1, 1usize, Some(1)).is_err());
        assert!(IndependentCascadeModel::new(path(5), f64::NAN, 1usize, Some(1)).is_err());
    }

    #[test]
    fn test_path_cascade_with_certain_infection() {
        let mut model = IndependentCascadeModel::new(path(5), 1.0, 1usize, Some(3)).unwrap();
        model.reset_with_seeds(&[0]).unwrap();
        assert_eq!(model.state(), &[I, S, S, S, S]);

        let expected = [
            [R, I, S, S, S],
            [R, R, I, S, S],
            [R, R, R, I, S],
            [R, R, R, R, I],
            [R, R, R, R, R],
        ];
        for (step, state) in expected.iter().enumerate() {
            model.step();
            assert_eq!(model.state(), state);
            assert_eq!(model.iteration(), step as u64 + 1);
            assert!(!model.terminated());
        }

        model.step();
        assert!(model.terminated());
        assert_eq!(model.iteration(), 5);
        assert_eq!(model.state(), &[R, R, R, R, R]);
    }

    #[test]
    fn test_zero_probability_never_spreads() {
        let mut model = IndependentCascadeModel::new(path(6), 0.0, 1usize, Some(3)).unwrap();
        model.reset_with_seeds(&[2]).unwrap();
        model.run(None, false);

        let summary = model.state_summary();
        assert_eq!(summary.get(R), 1);
        assert_eq!(summary.get(S), 5);
        assert_eq!(model.iteration(), 1);
    }

    #[test]
    fn test_no_initial_infection_terminates_on_first_step() {
        let mut model = IndependentCascadeModel::new(path(4), 0.5, 0usize, Some(3)).unwrap();
        assert!(!model.terminated());

        model.step();
        assert!(model.terminated());
        assert_eq!(model.iteration(), 0);
    }

    #[test]
    fn test_reset_with_seeds_rejects_out_of_range() {
        let mut model = IndependentCascadeModel::new(path(4), 0.5, 1usize, Some(3)).unwrap();
        assert!(model.reset_with_seeds(&[4]).is_err());
    }

    #[traced_test]
    #[test]
    fn test_step_after_termination_warns() {
        let mut model = IndependentCascadeModel::new(path(3), 1.0, 1usize, Some(9)).unwrap();
        model.run(None, false);
        let state = model.state().to_vec();
        let iteration = model.iteration();

        assert!(!logs_contain("already been terminated"));

        let assert_termination_warnings = |expected: usize| {
            logs_assert(move |lines: &[&str]| {
                let warnings = lines
                    .iter()
                    .filter(|line| line.contains("already been terminated"))
                    .count();
                if warnings == expected {
                    Ok(())
                } else {
                    Err(format!("expected {expected} termination warnings, found {warnings}"))
                }
            })
        };

        model.step();
        assert_eq!(model.iteration(), iteration);
        assert_eq!(model.state(), state.as_slice());
        assert_termination_warnings(1);

        model.run(None, false);
        model.run(Some(3), false);
        assert_eq!(model.iteration(), iteration);
        assert_termination_warnings(3);
    }
}
