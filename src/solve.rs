//! Method-dispatching entry point.

use crate::{
    Error, Float, Method, ODE, Settings, SolOut,
    methods::{IntegrationResult, dopri5, rk23},
    tolerance::Tolerance,
};

/// Integrate `y' = f(x, y)` from `x0` to `xend` with the selected method,
/// advancing `y` in place and reporting each accepted step to `solout`.
///
/// To accumulate the whole run as a continuously evaluable trajectory, pass a
/// [`ContinuousOutput`](crate::ContinuousOutput) as the observer.
pub fn integrate<F, S>(
    f: &F,
    x0: Float,
    xend: Float,
    y: &mut [Float],
    rtol: impl Into<Tolerance>,
    atol: impl Into<Tolerance>,
    method: Method,
    solout: Option<&mut S>,
    settings: Settings,
) -> Result<IntegrationResult, Vec<Error>>
where
    F: ODE,
    S: SolOut,
{
    match method {
        Method::Rk23 => rk23(f, x0, xend, y, rtol.into(), atol.into(), solout, settings),
        Method::Dopri5 => dopri5(f, x0, xend, y, rtol.into(), atol.into(), solout, settings),
    }
}
