//! Concrete diffusion models.
//!
//! Every model here implements [`DiffusionModel`] from
//! `lightning-diffusion-core`, so the shared run loop drives them unchanged.
//!
//! - [`IndependentCascadeModel`]: SIR cascade where each infected node gets a
//!   single chance to infect each susceptible neighbor, then recovers

mod independent_cascade;
mod sir;

pub use independent_cascade::{IndependentCascadeModel, InitialInfection};
pub use sir::SirState;

pub use lightning_diffusion_core::{DiffusionError, DiffusionModel};
