//! Configuration types for the simulator.

use lightning_diffusion_models::InitialInfection;
use lightning_diffusion_types::generators::{
    barabasi_albert, complete_graph, erdos_renyi, path_graph,
};
use lightning_diffusion_types::{GraphError, UndirectedGraph};
use serde::Deserialize;
use std::path::Path;

/// Configuration for a batch of simulation runs.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulatorConfig {
    /// Graph to diffuse over.
    pub graph: GraphConfig,

    /// Per-edge infection probability.
    pub infection_probability: f64,

    /// Initially infected nodes: a fraction in (0, 1) or a whole count.
    pub initially_infected: f64,

    /// Base seed. Builds the graph; run `i` uses `seed + i`.
    pub seed: u64,

    /// Number of independent runs.
    pub runs: usize,

    /// Step limit per run. `None` runs until the cascade dies out.
    pub max_steps: Option<u64>,
}

impl SimulatorConfig {
    /// Create a configuration for the given graph with default parameters.
    pub fn new(graph: GraphConfig) -> Self {
        Self {
            graph,
            infection_probability: 0.1,
            initially_infected: 0.1,
            seed: 2050,
            runs: 1,
            max_steps: None,
        }
    }

    /// Parse a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and parse a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Set the infection probability.
    pub fn with_infection_probability(mut self, probability: f64) -> Self {
        self.infection_probability = probability;
        self
    }

    /// Set the initially infected fraction or count.
    pub fn with_initially_infected(mut self, initially_infected: f64) -> Self {
        self.initially_infected = initially_infected;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the number of runs.
    pub fn with_runs(mut self, runs: usize) -> Self {
        self.runs = runs;
        self
    }

    /// Set the per-run step limit.
    pub fn with_max_steps(mut self, max_steps: Option<u64>) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Initial infection as understood by the model.
    pub fn initial_infection(&self) -> InitialInfection {
        InitialInfection::from(self.initially_infected)
    }

    /// Seed of run `index`.
    pub fn run_seed(&self, index: usize) -> u64 {
        self.seed.wrapping_add(index as u64)
    }

    /// Check the values the model itself does not check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.runs == 0 {
            return Err(ConfigError::Invalid("runs must be at least 1".to_string()));
        }
        Ok(())
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self::new(GraphConfig::default())
    }
}

/// Sample graph to build for a simulation.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum GraphConfig {
    /// Preferential attachment: `attachment` edges per new node.
    BarabasiAlbert { nodes: usize, attachment: usize },

    /// Each pair connected with `edge_probability`.
    ErdosRenyi { nodes: usize, edge_probability: f64 },

    /// Simple path.
    Path { nodes: usize },

    /// Every pair connected.
    Complete { nodes: usize },
}

impl Default for GraphConfig {
    fn default() -> Self {
        GraphConfig::BarabasiAlbert {
            nodes: 1_000,
            attachment: 5,
        }
    }
}

impl GraphConfig {
    /// Number of nodes the graph will have.
    pub fn nodes(&self) -> usize {
        match *self {
            GraphConfig::BarabasiAlbert { nodes, .. }
            | GraphConfig::ErdosRenyi { nodes, .. }
            | GraphConfig::Path { nodes }
            | GraphConfig::Complete { nodes } => nodes,
        }
    }

    /// Build the graph.
    pub fn build(&self, seed: u64) -> Result<UndirectedGraph<usize>, GraphError> {
        match *self {
            GraphConfig::BarabasiAlbert { nodes, attachment } => {
                barabasi_albert(nodes, attachment, seed)
            }
            GraphConfig::ErdosRenyi {
                nodes,
                edge_probability,
            } => erdos_renyi(nodes, edge_probability, seed),
            GraphConfig::Path { nodes } => Ok(path_graph(nodes)),
            GraphConfig::Complete { nodes } => Ok(complete_graph(nodes)),
        }
    }
}

/// Errors loading a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
