//! Continuous trajectory stitched from per-step dense output.

use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Float,
    interpolate::Interpolate,
    solout::{ControlFlag, SolOut},
    step::{LiveStep, StepInterpolator},
};

/// Accepted relative gap between consecutive step boundaries, scaled by the
/// larger of the two step sizes.
const CONTIGUITY_TOL: Float = 1e-9;

/// Tolerated excursion of a query time beyond the global bounds, as a
/// fraction of the boundary step's size. High-order dense output extrapolates
/// acceptably over such a short distance; further out the query is an error.
const EXTRAP_FRACTION: Float = 0.05;

/// Piecewise continuous solution over all accepted steps of one or more runs.
///
/// Owns an independent copy of every step it was handed, in time order, and
/// answers arbitrary-time queries by locating the covering step and
/// delegating to its interpolator. Registered as the [`SolOut`] observer of a
/// driver it accumulates the whole run; afterwards it is a pure read-only
/// query structure.
///
/// Queries never mutate stored step cursors, so a trajectory that is no
/// longer being appended to may be queried from several threads at once. The
/// last-used step index is kept as a relaxed atomic hint that only
/// accelerates monotonic scans.
#[derive(Debug, Serialize, Deserialize)]
pub struct ContinuousOutput {
    steps: Vec<StepInterpolator>,
    #[serde(skip)]
    hint: AtomicUsize,
}

impl Default for ContinuousOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ContinuousOutput {
    fn clone(&self) -> Self {
        Self {
            steps: self.steps.clone(),
            hint: AtomicUsize::new(self.hint.load(Ordering::Relaxed)),
        }
    }
}

impl ContinuousOutput {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            hint: AtomicUsize::new(0),
        }
    }

    /// Build a trajectory from steps in time order, validating every
    /// contiguity and direction invariant along the way.
    pub fn from_steps(steps: Vec<StepInterpolator>) -> Result<Self, Error> {
        let mut model = Self::new();
        for step in steps {
            model.append(step)?;
        }
        Ok(model)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Stored steps in time order.
    pub fn steps(&self) -> &[StepInterpolator] {
        &self.steps
    }

    pub(crate) fn into_steps(self) -> Vec<StepInterpolator> {
        self.steps
    }

    /// Span covered by the trajectory, `(first_time, final_time)` in
    /// integration order; for a backward run `first_time > final_time`.
    pub fn t_span(&self) -> Option<(Float, Float)> {
        Some((self.first_time()?, self.final_time()?))
    }

    /// Start of the first step.
    pub fn first_time(&self) -> Option<Float> {
        Some(self.steps.first()?.previous_time())
    }

    /// End of the last step.
    pub fn final_time(&self) -> Option<Float> {
        Some(self.steps.last()?.current_time())
    }

    /// Integration direction: `true` for forward runs.
    pub fn is_forward(&self) -> Option<bool> {
        Some(self.steps.first()?.step_size() > 0.0)
    }

    /// Append an owned step, keeping the trajectory consistent.
    ///
    /// The step must match the stored state dimension, run in the same
    /// direction, and start where the trajectory currently ends. On any
    /// violation the trajectory is left exactly as it was.
    pub fn append(&mut self, step: StepInterpolator) -> Result<(), Error> {
        if let Some(last) = self.steps.last() {
            if step.dim() != last.dim() {
                return Err(Error::DimensionMismatch {
                    expected: last.dim(),
                    got: step.dim(),
                });
            }
            if step.step_size().signum() != last.step_size().signum() {
                return Err(Error::DirectionMismatch {
                    expected: last.step_size().signum(),
                    got: step.step_size().signum(),
                });
            }
            let gap = (step.previous_time() - last.current_time()).abs();
            let scale = step.step_size().abs().max(last.step_size().abs());
            if gap > CONTIGUITY_TOL * scale {
                return Err(Error::InconsistentStep {
                    expected: last.current_time(),
                    got: step.previous_time(),
                });
            }
        }
        self.steps.push(step);
        Ok(())
    }

    /// Concatenate another trajectory onto this one.
    ///
    /// Valid only if directions agree and `other` starts where `self` ends;
    /// all-or-nothing, like [`append`](Self::append).
    pub fn extend(&mut self, other: &ContinuousOutput) -> Result<(), Error> {
        let Some(first) = other.steps.first() else {
            return Ok(());
        };
        // Validating the seam is enough: both sides are internally consistent.
        self.append(first.clone())?;
        self.steps.extend_from_slice(&other.steps[1..]);
        Ok(())
    }

    /// Interpolate the solution at time `t`.
    ///
    /// `t` may lie anywhere inside the covered span, or slightly beyond
    /// either end (up to a few percent of the boundary step), in which case
    /// the nearest boundary step extrapolates. Further outside, an
    /// [`Error::OutOfRange`] is returned.
    pub fn evaluate(&self, t: Float) -> Result<Vec<Float>, Error> {
        let step = self.locate(t)?;
        let mut yi = vec![0.0; step.dim()];
        step.interpolate(t, &mut yi);
        Ok(yi)
    }

    /// Batch-evaluate at many times.
    pub fn evaluate_many(&self, ts: &[Float]) -> Vec<Result<Vec<Float>, Error>> {
        ts.iter().map(|&t| self.evaluate(t)).collect()
    }

    /// Locate the step covering `t`: hint fast path first, then a
    /// direction-aware binary search over the ordered step end times.
    /// Boundary ties resolve to the later step in integration order.
    fn locate(&self, t: Float) -> Result<&StepInterpolator, Error> {
        let (first, last) = match (self.steps.first(), self.steps.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return Err(Error::EmptyTrajectory),
        };

        let start = first.previous_time();
        let end = last.current_time();
        let dir = last.step_size().signum();

        let s = dir * t;
        let lo = dir * start - EXTRAP_FRACTION * first.step_size().abs();
        let hi = dir * end + EXTRAP_FRACTION * last.step_size().abs();
        if s < lo || s > hi {
            return Err(Error::OutOfRange { t, start, end });
        }

        let cached = self.hint.load(Ordering::Relaxed);
        if let Some(step) = self.steps.get(cached) {
            if step.covers(t) {
                return Ok(step);
            }
        }

        let idx = self
            .steps
            .partition_point(|step| dir * step.current_time() <= s)
            .min(self.steps.len() - 1);
        self.hint.store(idx, Ordering::Relaxed);
        Ok(&self.steps[idx])
    }
}

impl SolOut for ContinuousOutput {
    fn solout(&mut self, step: &LiveStep<'_>, _is_last: bool) -> ControlFlag {
        // Copy unconditionally: the live reference dies with this call.
        match self.append(step.copy()) {
            Ok(()) => ControlFlag::Continue,
            Err(_) => ControlFlag::Interrupt,
        }
    }

    fn reset(&mut self) {
        self.steps.clear();
        self.hint.store(0, Ordering::Relaxed);
    }
}
