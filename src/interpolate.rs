//! Interpolation trait and per-method dense-output dispatch.

use serde::{Deserialize, Serialize};

use crate::{
    Float,
    methods::{dopri5::contdp5, rk23::contrk23},
};

/// Trait for interpolating the solution within a step.
///
/// Evaluation is pure: it reads the dense-output coefficients and writes the
/// interpolated state into `yi` without touching any cursor or cache. Cost is
/// O(order x dimension), independent of how many steps exist.
pub trait Interpolate {
    /// Interpolate the solution at the given abscissa `xi`.
    fn interpolate(&self, xi: Float, yi: &mut [Float]);
}

/// Dense-output evaluation function shared by all methods: `(xi, yi, cont, xold, h)`.
pub type ContFn = fn(Float, &mut [Float], &[Float], Float, Float);

/// Integration method that produced a set of dense-output coefficients.
///
/// Each method has its own coefficient layout and evaluation polynomial, so
/// stored and serialized steps carry this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Method {
    Rk23,
    Dopri5,
}

impl Method {
    /// Number of dense-output coefficients stored per state component.
    pub fn coeffs_per_state(self) -> usize {
        match self {
            Method::Rk23 => 4,
            Method::Dopri5 => 5,
        }
    }

    pub(crate) fn cont_fn(self) -> ContFn {
        match self {
            Method::Rk23 => contrk23,
            Method::Dopri5 => contdp5,
        }
    }
}
