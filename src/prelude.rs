//! Convenient re-exports for typical use.

pub use crate::{
    ContinuousOutput, ControlFlag, Error, Float, Interpolate, LiveStep, Method, ODE, Settings,
    SolOut, Status, StepInterpolator, Tolerance, codec,
    methods::{IntegrationResult, dopri5, rk23},
    solve::integrate,
};
