//! Step observer hook executed after each accepted step.

use crate::step::LiveStep;

/// Return flags for [`SolOut`].
///
/// - `Continue`: proceed with integration as normal.
/// - `Interrupt`: stop integration and return control to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlag {
    Continue,
    Interrupt,
}

/// Observer invoked once per accepted step.
///
/// The driver guarantees that calls are synchronous and strictly ordered (no
/// step's call is made before the previous one returns), that `is_last` is
/// true exactly once, on the step ending at the requested final time, and that
/// the [`LiveStep`] passed in is only valid for the duration of the call: it
/// borrows the driver's working buffers, which are overwritten as soon as the
/// next step begins. An observer that needs the data afterwards must take an
/// independent copy via [`LiveStep::copy`] -- the borrow checker will not let
/// the live reference escape.
///
/// [`ContinuousOutput`](crate::ContinuousOutput) implements this trait by
/// accumulating copies in time order, but any consumer (logging, online
/// analysis, ...) can implement the same interface.
pub trait SolOut {
    /// Queried once before the run starts. When `false`, the driver skips
    /// building full dense coefficients and only guarantees evaluation at the
    /// two step endpoints (interior queries degrade to linear interpolation).
    fn requires_dense_output(&self) -> bool {
        true
    }

    /// Called after each accepted step.
    fn solout(&mut self, step: &LiveStep<'_>, is_last: bool) -> ControlFlag;

    /// Clear any accumulated state before a fresh run reusing this observer.
    /// The drivers call this once before their main loop.
    fn reset(&mut self) {}
}
