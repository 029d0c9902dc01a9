//! Status codes for the integration drivers.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Interrupted,
    NeedLargerNMax,
    StepSizeTooSmall,
    ProbablyStiff,
}
