use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GeometryError>;

/// Failures surfaced by manifold construction, stepping and sampling.
#[derive(Error, Debug)]
pub enum GeometryError {
    /// Sampler parameters rejected at construction time.
    #[error("Invalid sampler configuration: {0}")]
    InvalidSampler(String),

    /// The variant does not support the requested intrinsic dimension.
    #[error("{manifold} manifold does not support dim = {dim}")]
    UnsupportedDimension { manifold: &'static str, dim: usize },

    /// The stepping algorithm found no chart that accepts both the current
    /// state and the candidate step.
    #[error("No compatible chart found")]
    NoCompatibleChart,

    /// A capability this variant does not implement was invoked.
    #[error("{manifold} manifold does not implement {operation}")]
    Unsupported {
        manifold: &'static str,
        operation: &'static str,
    },

    /// `step` was called before `reset` initialized the walker state.
    #[error("step called before reset")]
    NotReset,

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

impl GeometryError {
    pub(crate) fn unsupported(manifold: &'static str, operation: &'static str) -> Self {
        Self::Unsupported {
            manifold,
            operation,
        }
    }

    pub(crate) fn invalid_sampler(message: impl Into<String>) -> Self {
        Self::InvalidSampler(message.into())
    }
}
