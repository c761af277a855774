//! Aggregation of run outcomes into a report.

use crate::runner::RunOutcome;
use hdrhistogram::Histogram;
use lightning_diffusion_models::SirState;
use lightning_diffusion_types::StateLabel;

/// Collects outcomes of independent runs.
pub struct MetricsCollector {
    /// Nodes ever infected per run.
    outbreak_sizes: Histogram<u64>,

    /// Committed steps per run.
    durations: Histogram<u64>,

    /// Peak simultaneous infections per run.
    peaks: Histogram<u64>,

    /// Sum of final counts per label, in state-space order.
    final_totals: Vec<u64>,

    runs: u64,
    terminated_runs: u64,
    node_count: usize,
}

impl MetricsCollector {
    /// Create an empty collector for a graph of `node_count` nodes.
    pub fn new(node_count: usize) -> Self {
        Self {
            outbreak_sizes: new_histogram(),
            durations: new_histogram(),
            peaks: new_histogram(),
            final_totals: vec![0; SirState::STATE_SPACE.len()],
            runs: 0,
            terminated_runs: 0,
            node_count,
        }
    }

    /// Record one run.
    pub fn record(&mut self, outcome: &RunOutcome) {
        self.outbreak_sizes
            .saturating_record(outcome.outbreak_size() as u64);
        self.durations.saturating_record(outcome.iterations);
        self.peaks.saturating_record(outcome.peak_infected as u64);

        for (total, (_, count)) in self.final_totals.iter_mut().zip(outcome.summary.iter()) {
            *total += count as u64;
        }

        self.runs += 1;
        if outcome.terminated {
            self.terminated_runs += 1;
        }
    }

    /// Finish collection.
    pub fn report(self) -> SimulationReport {
        SimulationReport {
            outbreak_sizes: self.outbreak_sizes,
            durations: self.durations,
            peaks: self.peaks,
            final_totals: self.final_totals,
            runs: self.runs,
            terminated_runs: self.terminated_runs,
            node_count: self.node_count,
        }
    }
}

fn new_histogram() -> Histogram<u64> {
    Histogram::new(3).expect("histogram creation should succeed")
}

/// Aggregated results of a batch.
pub struct SimulationReport {
    outbreak_sizes: Histogram<u64>,
    durations: Histogram<u64>,
    peaks: Histogram<u64>,
    final_totals: Vec<u64>,
    runs: u64,
    terminated_runs: u64,
    node_count: usize,
}

impl SimulationReport {
    /// Number of runs.
    pub fn runs(&self) -> u64 {
        self.runs
    }

    /// Runs whose cascade died out within the step limit.
    pub fn terminated_runs(&self) -> u64 {
        self.terminated_runs
    }

    /// Mean final count of a label across runs.
    pub fn mean_final(&self, state: SirState) -> f64 {
        let Some(position) = SirState::STATE_SPACE.iter().position(|s| *s == state) else {
            return 0.0;
        };
        if self.runs == 0 {
            return 0.0;
        }
        self.final_totals[position] as f64 / self.runs as f64
    }

    /// Mean number of nodes ever infected.
    pub fn mean_outbreak_size(&self) -> f64 {
        self.outbreak_sizes.mean()
    }

    /// Outbreak size at a quantile.
    pub fn outbreak_size_at(&self, quantile: f64) -> u64 {
        self.outbreak_sizes.value_at_quantile(quantile)
    }

    /// Largest outbreak.
    pub fn max_outbreak_size(&self) -> u64 {
        self.outbreak_sizes.max()
    }

    /// Mean number of committed steps.
    pub fn mean_duration(&self) -> f64 {
        self.durations.mean()
    }

    /// Duration at a quantile.
    pub fn duration_at(&self, quantile: f64) -> u64 {
        self.durations.value_at_quantile(quantile)
    }

    /// Largest simultaneous infection count seen in any run.
    pub fn max_peak_infected(&self) -> u64 {
        self.peaks.max()
    }

    /// Print a summary of the report.
    pub fn print_summary(&self) {
        println!("\n--- Diffusion Report ---");
        println!("Nodes:      {}", self.node_count);
        println!("Runs:       {}", self.runs);
        println!("Terminated: {}", self.terminated_runs);

        if self.runs == 0 {
            println!("\nNo runs recorded.");
            return;
        }

        println!();
        println!("Final state (mean over runs):");
        for state in SirState::STATE_SPACE {
            println!("  {:<12} {:.2}", state.name(), self.mean_final(*state));
        }

        println!();
        println!("Outbreak size:");
        println!("  P50:  {}", self.outbreak_size_at(0.50));
        println!("  P90:  {}", self.outbreak_size_at(0.90));
        println!("  P99:  {}", self.outbreak_size_at(0.99));
        println!("  Max:  {}", self.max_outbreak_size());
        println!("  Avg:  {:.2}", self.mean_outbreak_size());

        println!();
        println!("Duration (steps):");
        println!("  P50:  {}", self.duration_at(0.50));
        println!("  P90:  {}", self.duration_at(0.90));
        println!("  Max:  {}", self.durations.max());
        println!("  Avg:  {:.2}", self.mean_duration());

        println!();
        println!("Peak infected: {}", self.max_peak_infected());
    }
}
