//! Core types for diffusion simulations.
//!
//! This crate holds everything a diffusion model needs from the outside world
//! without knowing anything about how a model steps:
//!
//! - [`Graph`] and [`NodeLabel`]: the read-only graph contract
//! - [`UndirectedGraph`]: an insertion-ordered adjacency implementation
//! - [`generators`]: seeded sample graphs (path, complete, Erdős–Rényi, Barabási–Albert)
//! - [`StateLabel`] and [`StateSummary`]: per-node labels and their aggregate counts

pub mod generators;
mod graph;
mod identifiers;
mod state;

pub use generators::GraphError;
pub use graph::{Graph, UndirectedGraph};
pub use identifiers::NodeLabel;
pub use state::{StateLabel, StateSummary};
