//! Error types for model construction.

use thiserror::Error;

/// Errors raised while constructing or re-seeding a diffusion model.
///
/// Calling `step` or `run` on a terminated model is not an error; it is
/// reported as a warning through `tracing`.
#[derive(Debug, Error)]
pub enum DiffusionError {
    /// The graph's node identifiers are not the contiguous range `0..N`.
    #[error(
        "Diffusion models support only graphs with index-style node identifiers \
         (contiguous integers starting from 0): {reason}"
    )]
    UnsupportedGraph { reason: String },

    /// A model parameter is out of its valid range.
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl DiffusionError {
    pub(crate) fn unsupported_graph(reason: impl Into<String>) -> Self {
        Self::UnsupportedGraph {
            reason: reason.into(),
        }
    }

    /// Build an [`DiffusionError::InvalidParameter`].
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
