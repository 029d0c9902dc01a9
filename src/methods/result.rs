//! Output of a driver run.

use crate::{Float, status::Status};

/// Function evaluation counters.
#[derive(Clone, Copy, Debug, Default)]
pub struct Evals {
    /// Right-hand-side evaluations.
    pub ode: usize,
}

impl Evals {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Step counters.
#[derive(Clone, Copy, Debug, Default)]
pub struct Steps {
    pub total: usize,
    pub accepted: usize,
    pub rejected: usize,
}

impl Steps {
    pub fn new() -> Self {
        Self::default()
    }
}

/// The output of a driver run. The final state itself is left in the caller's
/// `y` buffer.
#[derive(Clone, Copy, Debug)]
pub struct IntegrationResult {
    /// The final value of the independent variable.
    pub x: Float,
    /// The step size the driver would use next.
    pub h: Float,
    /// The status of the integration process.
    pub status: Status,
    /// Function evaluation counters.
    pub evals: Evals,
    /// Step counters.
    pub steps: Steps,
}

impl IntegrationResult {
    pub fn new(x: Float, h: Float, status: Status, evals: Evals, steps: Steps) -> Self {
        Self {
            x,
            h,
            status,
            evals,
            steps,
        }
    }
}
