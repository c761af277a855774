//! Core abstractions for discrete-time diffusion models.
//!
//! A diffusion model is a synchronous state machine over a graph:
//!
//! - **Validated input**: construction rejects graphs whose node identifiers
//!   are not exactly `0..N`
//! - **Dense state**: one label per node, replaced wholesale on each step
//! - **Deterministic**: every model owns a seeded RNG; same seed, same run
//!
//! Concrete models embed a [`ModelBase`] and implement [`DiffusionModel::step`]
//! and [`DiffusionModel::reset`]. The run loop, termination guard and summary
//! query are shared.

mod base;
mod error;
pub mod progress;
mod traits;

pub use base::{validate_graph, ModelBase, StepView};
pub use error::DiffusionError;
pub use traits::DiffusionModel;
