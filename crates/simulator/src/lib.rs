//! Lightning Diffusion Simulator
//!
//! Batch runner for the Independent Cascade model. Builds one sample graph,
//! executes many seeded runs over it in parallel, and aggregates the outcomes.
//!
//! # Architecture
//!
//! - **Configuration**: graph kind and model parameters, from TOML or builders
//! - **Runner**: one model per run, seeded `seed + run_index`
//! - **Metrics**: outbreak size, duration and peak infection histograms
//!
//! # Example
//!
//! ```ignore
//! use lightning_diffusion_simulator::{GraphConfig, Simulator, SimulatorConfig};
//!
//! let config = SimulatorConfig::new(GraphConfig::BarabasiAlbert { nodes: 1000, attachment: 5 })
//!     .with_infection_probability(0.05)
//!     .with_runs(100);
//!
//! let report = Simulator::new(config)?.run_batch(false)?;
//! println!("Mean outbreak: {:.1}", report.mean_outbreak_size());
//! ```

pub mod config;
pub mod metrics;
pub mod runner;

pub use config::{ConfigError, GraphConfig, SimulatorConfig};
pub use metrics::{MetricsCollector, SimulationReport};
pub use runner::{RunOutcome, Simulator};

use lightning_diffusion_core::DiffusionError;
use lightning_diffusion_types::GraphError;

/// Errors from building or running a simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimulatorError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to build graph: {0}")]
    Graph(#[from] GraphError),

    #[error("Failed to build model: {0}")]
    Model(#[from] DiffusionError),
}
