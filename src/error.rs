//! Errors for trajectory queries, step bookkeeping, persistence, and driver validation.

use crate::Float;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Query time lies beyond the covered span plus the extrapolation margin.
    #[error("query time {t} outside covered span [{start}, {end}]")]
    OutOfRange { t: Float, start: Float, end: Float },

    /// Appended step does not start where the trajectory ends.
    #[error("step starting at {got} does not continue trajectory ending at {expected}")]
    InconsistentStep { expected: Float, got: Float },

    /// Appended step runs against the trajectory's integration direction.
    #[error("step direction {got} opposes trajectory direction {expected}")]
    DirectionMismatch { expected: Float, got: Float },

    /// Appended step carries a different state dimension than the trajectory.
    #[error("state dimension mismatch (expected {expected}, got {got})")]
    DimensionMismatch { expected: usize, got: usize },

    /// Coefficient buffer cannot be split into whole per-state blocks.
    #[error("coefficient buffer length {len} is not a multiple of {per_state} coefficients per state")]
    CoefficientLength { len: usize, per_state: usize },

    /// Query against a trajectory that holds no steps.
    #[error("trajectory holds no steps")]
    EmptyTrajectory,

    /// Malformed or truncated trajectory byte buffer.
    #[error("malformed trajectory buffer: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("step size h has invalid sign or magnitude (got {0})")]
    InvalidStepSize(Float),

    #[error("nmax must be positive (got {0})")]
    NMaxMustBePositive(usize),

    #[error("nstiff must be positive (got {0})")]
    NStiffMustBePositive(usize),

    #[error("uround must be in (1e-35, 1.0) (got {0})")]
    URoundOutOfRange(Float),

    #[error("safety_factor must be in (1e-4, 1.0) (got {0})")]
    SafetyFactorOutOfRange(Float),

    #[error("beta must be <= 0.2 (got {0})")]
    BetaTooLarge(Float),

    #[error("scale factors must satisfy 0 < scale_min < scale_max (got {0}, {1})")]
    InvalidScaleFactors(Float, Float),
}
