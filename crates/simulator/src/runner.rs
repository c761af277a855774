//! Batch runner for independent cascade simulations.

use crate::config::SimulatorConfig;
use crate::metrics::{MetricsCollector, SimulationReport};
use crate::SimulatorError;
use lightning_diffusion_core::progress::progress_bar;
use lightning_diffusion_models::{DiffusionModel, IndependentCascadeModel, SirState};
use lightning_diffusion_types::{Graph, StateSummary, UndirectedGraph};
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, info};

/// Result of a single run.
#[derive(Clone, Debug)]
pub struct RunOutcome {
    /// Seed the run's model was created with.
    pub seed: u64,

    /// Committed steps.
    pub iterations: u64,

    /// Whether the cascade died out within the step limit.
    pub terminated: bool,

    /// Largest number of simultaneously infected nodes, initial state included.
    pub peak_infected: usize,

    /// Final state counts.
    pub summary: StateSummary<SirState>,
}

impl RunOutcome {
    /// Nodes that were infected at some point.
    pub fn outbreak_size(&self) -> usize {
        self.summary.get(SirState::Infected) + self.summary.get(SirState::Recovered)
    }
}

/// Runs many independent simulations over one shared graph.
///
/// Every run gets its own model and RNG; runs share only the immutable graph,
/// so they execute in parallel and the batch result does not depend on
/// scheduling.
pub struct Simulator {
    config: SimulatorConfig,
    graph: Arc<UndirectedGraph<usize>>,
}

impl Simulator {
    /// Build the graph described by `config`.
    pub fn new(config: SimulatorConfig) -> Result<Self, SimulatorError> {
        config.validate()?;
        let graph = Arc::new(config.graph.build(config.seed)?);

        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            infection_probability = config.infection_probability,
            initially_infected = config.initially_infected,
            runs = config.runs,
            seed = config.seed,
            "Simulator initialized"
        );

        Ok(Self { config, graph })
    }

    /// The configuration in use.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// The shared graph.
    pub fn graph(&self) -> &Arc<UndirectedGraph<usize>> {
        &self.graph
    }

    /// Build a fresh model for run seed `seed`.
    pub fn model(
        &self,
        seed: u64,
    ) -> Result<IndependentCascadeModel<UndirectedGraph<usize>>, SimulatorError> {
        let model = IndependentCascadeModel::new(
            self.graph.clone(),
            self.config.infection_probability,
            self.config.initial_infection(),
            Some(seed),
        )?;
        Ok(model)
    }

    /// Execute one run to termination or to the step limit.
    pub fn run_once(&self, seed: u64) -> Result<RunOutcome, SimulatorError> {
        let mut model = self.model(seed)?;
        let mut peak_infected = model.state_summary().get(SirState::Infected);

        let limit = self.config.max_steps.unwrap_or(u64::MAX);
        let mut steps = 0u64;
        while !model.terminated() && steps < limit {
            model.step();
            steps += 1;
            peak_infected = peak_infected.max(model.state_summary().get(SirState::Infected));
        }

        let outcome = RunOutcome {
            seed,
            iterations: model.iteration(),
            terminated: model.terminated(),
            peak_infected,
            summary: model.state_summary(),
        };
        debug!(
            seed,
            iterations = outcome.iterations,
            outbreak = outcome.outbreak_size(),
            "Run finished"
        );
        Ok(outcome)
    }

    /// Execute all configured runs in parallel, returning them in run order.
    pub fn run_all(&self, verbose: bool) -> Result<Vec<RunOutcome>, SimulatorError> {
        let progress = progress_bar(self.config.runs as u64, verbose);

        let outcomes = (0..self.config.runs)
            .into_par_iter()
            .map(|index| {
                let outcome = self.run_once(self.config.run_seed(index));
                progress.inc(1);
                outcome
            })
            .collect::<Result<Vec<_>, _>>();

        progress.finish_and_clear();
        outcomes
    }

    /// Execute all runs and aggregate them into a report.
    pub fn run_batch(&self, verbose: bool) -> Result<SimulationReport, SimulatorError> {
        let outcomes = self.run_all(verbose)?;

        let mut metrics = MetricsCollector::new(self.graph.node_count());
        for outcome in &outcomes {
            metrics.record(outcome);
        }

        let report = metrics.report();
        info!(
            runs = report.runs(),
            terminated = report.terminated_runs(),
            mean_outbreak = report.mean_outbreak_size(),
            "Batch finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GraphConfig;
    use tracing_test::traced_test;

    fn small_config() -> SimulatorConfig {
        SimulatorConfig::new(GraphConfig::BarabasiAlbert {
            nodes: 200,
            attachment: 3,
        })
        .with_infection_probability(0.2)
        .with_initially_infected(0.05)
        .with_seed(11)
        .with_runs(16)
    }

    #[test]
    fn test_runs_are_reproducible() {
        let simulator = Simulator::new(small_config()).unwrap();
        let first = simulator.run_all(false).unwrap();
        let second = simulator.run_all(false).unwrap();

        assert_eq!(first.len(), 16);
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.seed, b.seed);
            assert_eq!(a.iterations, b.iterations);
            assert_eq!(a.summary, b.summary);
        }
    }

    #[test]
    fn test_runs_use_consecutive_seeds() {
        let simulator = Simulator::new(small_config()).unwrap();
        let outcomes = simulator.run_all(false).unwrap();
        let seeds: Vec<u64> = outcomes.iter().map(|o| o.seed).collect();
        assert_eq!(seeds, (11..27).collect::<Vec<u64>>());
    }

    #[test]
    fn test_unbounded_runs_terminate() {
        let simulator = Simulator::new(small_config()).unwrap();
        for outcome in simulator.run_all(false).unwrap() {
            assert!(outcome.terminated);
            assert_eq!(outcome.summary.get(SirState::Infected), 0);
            assert!(outcome.outbreak_size() >= 10);
            assert!(outcome.peak_infected >= 10);
        }
    }

    #[test]
    fn test_step_limit_respected() {
        let config = small_config().with_max_steps(Some(1));
        let simulator = Simulator::new(config).unwrap();
        for outcome in simulator.run_all(false).unwrap() {
            assert!(outcome.iterations <= 1);
        }
    }

    #[test]
    fn test_certain_spread_on_path_infects_everything() {
        let config = SimulatorConfig::new(GraphConfig::Path { nodes: 30 })
            .with_infection_probability(1.0)
            .with_initially_infected(1.0)
            .with_runs(4);
        let report = Simulator::new(config).unwrap().run_batch(false).unwrap();

        assert_eq!(report.runs(), 4);
        assert_eq!(report.terminated_runs(), 4);
        assert_eq!(report.max_outbreak_size(), 30);
        assert_eq!(report.mean_final(SirState::Recovered), 30.0);
        assert_eq!(report.mean_final(SirState::Susceptible), 0.0);
    }

    #[traced_test]
    #[test]
    fn test_batch_logs_summary() {
        let simulator = Simulator::new(small_config().with_runs(2)).unwrap();
        simulator.run_batch(false).unwrap();
        assert!(logs_contain("Simulator initialized"));
        assert!(logs_contain("Batch finished"));
    }

    #[test]
    fn test_invalid_model_parameters_surface() {
        let config = small_config().with_infection_probability(2.0);
        let simulator = Simulator::new(config).unwrap();
        assert!(matches!(
            simulator.run_all(false),
            Err(SimulatorError::Model(_))
        ));
    }
}
