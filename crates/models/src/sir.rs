//! Susceptible / infected / recovered labels.

use lightning_diffusion_types::StateLabel;
use std::fmt;

/// SIR node state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SirState {
    /// Can still be infected.
    Susceptible,
    /// Spreads to neighbors during the next step, then recovers.
    Infected,
    /// Absorbing: never changes again.
    Recovered,
}

impl StateLabel for SirState {
    const STATE_SPACE: &'static [Self] = &[
        SirState::Susceptible,
        SirState::Infected,
        SirState::Recovered,
    ];

    fn name(&self) -> &'static str {
        match self {
            SirState::Susceptible => "susceptible",
            SirState::Infected => "infected",
            SirState::Recovered => "recovered",
        }
    }
}

impl fmt::Display for SirState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
