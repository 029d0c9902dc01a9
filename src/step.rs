//! Per-step dense-output interpolators: the borrowed live view handed to
//! observers, and the owned copy that is safe to keep.

use serde::{Deserialize, Serialize};

use crate::{Error, Float, interpolate::{Interpolate, Method}};

/// Dense-output view of one accepted step, borrowing the driver's working
/// buffers.
///
/// A `LiveStep` is only valid for the duration of the observer callback it is
/// passed to; the driver reuses the underlying coefficient buffer on the next
/// step. The lifetime parameter enforces this. Use [`LiveStep::copy`] to
/// obtain an independently owned [`StepInterpolator`] that outlives the call.
#[derive(Debug)]
pub struct LiveStep<'a> {
    method: Method,
    cont: &'a [Float],
    xold: Float,
    h: Float,
}

impl<'a> LiveStep<'a> {
    pub(crate) fn new(method: Method, cont: &'a [Float], xold: Float, h: Float) -> Self {
        Self { method, cont, xold, h }
    }

    /// Time at the start of the step.
    pub fn previous_time(&self) -> Float {
        self.xold
    }

    /// Time at the end of the step.
    pub fn current_time(&self) -> Float {
        self.xold + self.h
    }

    /// Signed step size; its sign is the integration direction.
    pub fn step_size(&self) -> Float {
        self.h
    }

    /// State dimension.
    pub fn dim(&self) -> usize {
        self.cont.len() / self.method.coeffs_per_state()
    }

    /// Take an independently owned copy of this step.
    ///
    /// The copy shares nothing with the driver: it owns its coefficient
    /// buffer and carries its own evaluation cursor, so it stays valid after
    /// the driver has moved on.
    pub fn copy(&self) -> StepInterpolator {
        StepInterpolator {
            method: self.method,
            xold: self.xold,
            h: self.h,
            cont: self.cont.to_vec(),
            t_interp: self.xold + self.h,
            cache: None,
        }
    }
}

impl Interpolate for LiveStep<'_> {
    fn interpolate(&self, xi: Float, yi: &mut [Float]) {
        (self.method.cont_fn())(xi, yi, self.cont, self.xold, self.h);
    }
}

/// Owned dense-output interpolator for one accepted step.
///
/// Holds the coefficients needed to reconstruct the solution anywhere in
/// `[previous_time, current_time]` (plus a small extrapolation margin -- far
/// outside the step the polynomial error is unbounded, which is a caller
/// responsibility, not range-checked here). Also carries a mutable evaluation
/// cursor with a lazily recomputed cached state: repeated reads at the same
/// cursor time cost nothing.
///
/// Two interpolators obtained by cloning or by [`LiveStep::copy`] never share
/// the coefficient buffer, the cursor, or the cache; moving one's cursor
/// cannot disturb the other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepInterpolator {
    method: Method,
    xold: Float,
    h: Float,
    cont: Vec<Float>,
    t_interp: Float,
    #[serde(skip)]
    cache: Option<Vec<Float>>,
}

impl StepInterpolator {
    /// Build an interpolator from raw dense-output coefficients.
    ///
    /// `cont` must hold `method.coeffs_per_state()` coefficients per state
    /// component, laid out block-wise as the drivers produce them.
    pub fn new(method: Method, xold: Float, h: Float, cont: Vec<Float>) -> Result<Self, Error> {
        let step = Self {
            method,
            xold,
            h,
            t_interp: xold + h,
            cont,
            cache: None,
        };
        step.validate()?;
        Ok(step)
    }

    /// Check the structural invariants. Used by the constructor and by the
    /// codec, whose decoded steps bypass [`StepInterpolator::new`].
    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.h == 0.0 || !self.h.is_finite() {
            return Err(Error::InvalidStepSize(self.h));
        }
        let per_state = self.method.coeffs_per_state();
        if self.cont.is_empty() || self.cont.len() % per_state != 0 {
            return Err(Error::CoefficientLength {
                len: self.cont.len(),
                per_state,
            });
        }
        Ok(())
    }

    /// Time at the start of the step.
    pub fn previous_time(&self) -> Float {
        self.xold
    }

    /// Time at the end of the step.
    pub fn current_time(&self) -> Float {
        self.xold + self.h
    }

    /// Signed step size; its sign is the integration direction.
    pub fn step_size(&self) -> Float {
        self.h
    }

    /// State dimension.
    pub fn dim(&self) -> usize {
        self.cont.len() / self.method.coeffs_per_state()
    }

    /// Method that produced the coefficients.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Whether `t` lies inside this step's half-open span `[previous_time,
    /// current_time)`, in either integration direction. Shared boundaries
    /// therefore belong to the later step.
    pub(crate) fn covers(&self, t: Float) -> bool {
        let d = self.h.signum();
        d * self.xold <= d * t && d * t < d * (self.xold + self.h)
    }

    /// Current evaluation cursor. Defaults to [`current_time`](Self::current_time).
    pub fn interpolated_time(&self) -> Float {
        self.t_interp
    }

    /// Move the evaluation cursor. The cached state is dropped only if the
    /// cursor actually changes.
    pub fn set_interpolated_time(&mut self, t: Float) {
        if t != self.t_interp {
            self.t_interp = t;
            self.cache = None;
        }
    }

    /// State at the cursor time, recomputed lazily when the cursor moved
    /// since the last access.
    pub fn interpolated_state(&mut self) -> &[Float] {
        if self.cache.is_none() {
            let mut yi = vec![0.0; self.dim()];
            self.interpolate(self.t_interp, &mut yi);
            self.cache = Some(yi);
        }
        self.cache.get_or_insert_with(Vec::new)
    }
}

impl Interpolate for StepInterpolator {
    fn interpolate(&self, xi: Float, yi: &mut [Float]) {
        (self.method.cont_fn())(xi, yi, &self.cont, self.xold, self.h);
    }
}
