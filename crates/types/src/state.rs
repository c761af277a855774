//! Per-node state labels and aggregate summaries.

use indexmap::IndexMap;
use std::fmt;
use std::hash::Hash;

/// A label a node can hold in a diffusion model.
///
/// Every model has a fixed, ordered state space. The order is the reporting
/// order used by [`StateSummary`].
pub trait StateLabel: Copy + Eq + Hash + fmt::Debug + fmt::Display + 'static {
    /// All labels of the state space, in reporting order.
    const STATE_SPACE: &'static [Self];

    /// Lower-case name of the label.
    fn name(&self) -> &'static str;
}

/// Number of nodes holding each label of a state space.
///
/// Always contains every label of `S::STATE_SPACE`, including those with a
/// count of zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSummary<S: StateLabel> {
    counts: IndexMap<S, usize>,
}

impl<S: StateLabel> StateSummary<S> {
    /// Count the labels of a state vector.
    pub fn count(states: &[S]) -> Self {
        let mut counts: IndexMap<S, usize> = S::STATE_SPACE.iter().map(|&s| (s, 0)).collect();
        for state in states {
            *counts.entry(*state).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Count for a single label.
    pub fn get(&self, state: S) -> usize {
        self.counts.get(&state).copied().unwrap_or(0)
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Iterate over `(label, count)` pairs in state-space order.
    pub fn iter(&self) -> impl Iterator<Item = (S, usize)> + '_ {
        self.counts.iter().map(|(&s, &c)| (s, c))
    }
}

impl<S: StateLabel> fmt::Display for StateSummary<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (state, count) in self.iter() {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{}={}", state.name(), count)?;
            first = false;
        }
        Ok(())
    }
}
