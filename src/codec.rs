//! Byte-buffer persistence for continuous trajectories.
//!
//! The encoding is an in-process contract only: an opaque buffer whose size
//! scales linearly with `steps x (coefficients per state x dimension)`.
//! Floating-point values survive the round trip bit-exactly, so re-evaluating
//! a decoded trajectory reproduces the original outputs.

use crate::{ContinuousOutput, Error};

/// Serialize a trajectory to an opaque byte buffer.
pub fn to_bytes(model: &ContinuousOutput) -> Result<Vec<u8>, Error> {
    Ok(serde_json::to_vec(model)?)
}

/// Reconstruct a trajectory from a buffer produced by [`to_bytes`].
///
/// Malformed or truncated buffers fail with [`Error::Codec`]; a buffer that
/// decodes but violates the trajectory invariants (step shape, direction,
/// contiguity) fails with the corresponding consistency error. Nothing is
/// ever partially reconstructed.
pub fn from_bytes(bytes: &[u8]) -> Result<ContinuousOutput, Error> {
    let decoded: ContinuousOutput = serde_json::from_slice(bytes)?;
    // Decoded steps bypass the validating constructors; re-check everything.
    let steps = decoded.into_steps();
    for step in &steps {
        step.validate()?;
    }
    ContinuousOutput::from_steps(steps)
}
