//! Lightning Diffusion Simulator CLI
//!
//! Run batches of seeded Independent Cascade simulations on a sample graph.
//!
//! # Example
//!
//! ```bash
//! # 100 runs on a 1000-node Barabási–Albert graph with a fixed seed
//! lightning-sim --graph ba --nodes 1000 --attachment 5 --runs 100 --seed 42
//!
//! # Load a TOML config and override the infection probability
//! lightning-sim --config sim.toml --infection-probability 0.2 --verbose
//! ```

use clap::{Parser, ValueEnum};
use lightning_diffusion_simulator::{GraphConfig, Simulator, SimulatorConfig, SimulatorError};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_ATTACHMENT: usize = 5;
const DEFAULT_EDGE_PROBABILITY: f64 = 0.01;

/// Graph families the CLI can build.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum GraphKind {
    /// Barabási–Albert preferential attachment
    Ba,
    /// Erdős–Rényi G(n, p)
    Er,
    Path,
    Complete,
}

/// Lightning Diffusion Simulator
///
/// Runs independent, seeded cascades in parallel over one shared graph.
/// Results are reproducible when the same seed is used.
#[derive(Parser, Debug)]
#[command(name = "lightning-sim")]
#[command(version, about, long_about = None)]
struct Args {
    /// TOML configuration file. Flags below override its values.
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Graph family
    #[arg(short = 'g', long, value_enum)]
    graph: Option<GraphKind>,

    /// Number of nodes
    #[arg(short = 'n', long)]
    nodes: Option<usize>,

    /// Edges per new node (Barabási–Albert)
    #[arg(long)]
    attachment: Option<usize>,

    /// Edge probability (Erdős–Rényi)
    #[arg(long)]
    edge_probability: Option<f64>,

    /// Per-edge infection probability (0.0-1.0)
    #[arg(short = 'p', long)]
    infection_probability: Option<f64>,

    /// Initially infected nodes: a fraction in (0, 1) or a whole count
    #[arg(short = 'i', long)]
    initially_infected: Option<f64>,

    /// Random seed for reproducible results. When omitted and no config file
    /// is given, a random seed is used.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of independent runs
    #[arg(short = 'r', long)]
    runs: Option<usize>,

    /// Step limit per run. Omit to run every cascade until it dies out.
    #[arg(long)]
    max_steps: Option<u64>,

    /// Show a progress bar
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Args {
    /// Merge flags over the file configuration (or the defaults).
    fn into_config(self) -> Result<SimulatorConfig, SimulatorError> {
        let mut config = match &self.config {
            Some(path) => SimulatorConfig::load(path)?,
            None => SimulatorConfig::default().with_seed(rand::random()),
        };

        config.graph = self.graph_config(&config.graph);
        if let Some(probability) = self.infection_probability {
            config = config.with_infection_probability(probability);
        }
        if let Some(initially_infected) = self.initially_infected {
            config = config.with_initially_infected(initially_infected);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(runs) = self.runs {
            config = config.with_runs(runs);
        }
        if self.max_steps.is_some() {
            config = config.with_max_steps(self.max_steps);
        }

        config.validate()?;
        Ok(config)
    }

    fn graph_config(&self, base: &GraphConfig) -> GraphConfig {
        let nodes = self.nodes.unwrap_or_else(|| base.nodes());
        let attachment = match base {
            GraphConfig::BarabasiAlbert { attachment, .. } => *attachment,
            _ => DEFAULT_ATTACHMENT,
        };
        let edge_probability = match base {
            GraphConfig::ErdosRenyi {
                edge_probability, ..
            } => *edge_probability,
            _ => DEFAULT_EDGE_PROBABILITY,
        };

        let kind = self.graph.unwrap_or(match base {
            GraphConfig::BarabasiAlbert { .. } => GraphKind::Ba,
            GraphConfig::ErdosRenyi { .. } => GraphKind::Er,
            GraphConfig::Path { .. } => GraphKind::Path,
            GraphConfig::Complete { .. } => GraphKind::Complete,
        });

        match kind {
            GraphKind::Ba => GraphConfig::BarabasiAlbert {
                nodes,
                attachment: self.attachment.unwrap_or(attachment),
            },
            GraphKind::Er => GraphConfig::ErdosRenyi {
                nodes,
                edge_probability: self.edge_probability.unwrap_or(edge_probability),
            },
            GraphKind::Path => GraphConfig::Path { nodes },
            GraphKind::Complete => GraphConfig::Complete { nodes },
        }
    }
}

fn main() -> Result<(), SimulatorError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,lightning_diffusion_simulator=info")),
        )
        .init();

    let args = Args::parse();
    let verbose = args.verbose;
    let config = args.into_config()?;

    info!(
        graph = ?config.graph,
        infection_probability = config.infection_probability,
        initially_infected = config.initially_infected,
        seed = config.seed,
        runs = config.runs,
        max_steps = ?config.max_steps,
        "Starting simulation"
    );

    let simulator = Simulator::new(config)?;
    let report = simulator.run_batch(verbose)?;
    report.print_summary();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(flags: &[&str]) -> Args {
        let argv = std::iter::once("lightning-sim").chain(flags.iter().copied());
        Args::try_parse_from(argv).unwrap()
    }

    fn config_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"
            seed = 9
            runs = 6
            max_steps = 40
            infection_probability = 0.3

            [graph]
            kind = "barabasi_albert"
            nodes = 100
            attachment = 3
            "#,
        )
        .unwrap();
        file
    }

    #[test]
    fn test_flags_without_config_file() {
        let config = parse(&[
            "--graph", "path", "--nodes", "12", "--seed", "3", "--runs", "4", "-p", "0.5",
        ])
        .into_config()
        .unwrap();

        assert_eq!(config.graph, GraphConfig::Path { nodes: 12 });
        assert_eq!(config.seed, 3);
        assert_eq!(config.runs, 4);
        assert_eq!(config.infection_probability, 0.5);
        assert_eq!(config.max_steps, None);
    }

    #[test]
    fn test_file_values_kept_without_flags() {
        let file = config_file();
        let path = file.path().to_str().unwrap();
        let config = parse(&["--config", path]).into_config().unwrap();

        assert_eq!(
            config.graph,
            GraphConfig::BarabasiAlbert {
                nodes: 100,
                attachment: 3
            }
        );
        assert_eq!(config.seed, 9);
        assert_eq!(config.runs, 6);
        assert_eq!(config.max_steps, Some(40));
        assert_eq!(config.infection_probability, 0.3);
    }

    #[test]
    fn test_flags_override_file_values() {
        let file = config_file();
        let path = file.path().to_str().unwrap();
        let config = parse(&[
            "--config",
            path,
            "--nodes",
            "50",
            "--seed",
            "1",
            "--max-steps",
            "7",
            "-i",
            "5",
        ])
        .into_config()
        .unwrap();

        assert_eq!(
            config.graph,
            GraphConfig::BarabasiAlbert {
                nodes: 50,
                attachment: 3
            }
        );
        assert_eq!(config.seed, 1);
        assert_eq!(config.runs, 6);
        assert_eq!(config.max_steps, Some(7));
        assert_eq!(config.initially_infected, 5.0);
    }

    #[test]
    fn test_graph_kind_switch_keeps_node_count() {
        let file = config_file();
        let path = file.path().to_str().unwrap();

        let config = parse(&["--config", path, "--graph", "er"]).into_config().unwrap();
        assert_eq!(
            config.graph,
            GraphConfig::ErdosRenyi {
                nodes: 100,
                edge_probability: DEFAULT_EDGE_PROBABILITY
            }
        );

        let config = parse(&["--config", path, "--attachment", "2"])
            .into_config()
            .unwrap();
        assert_eq!(
            config.graph,
            GraphConfig::BarabasiAlbert {
                nodes: 100,
                attachment: 2
            }
        );
    }

    #[test]
    fn test_invalid_override_rejected() {
        let result = parse(&["--runs", "0"]).into_config();
        assert!(matches!(result, Err(SimulatorError::Config(_))));
    }
}
