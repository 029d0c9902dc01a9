//! Embedded explicit Runge-Kutta drivers with dense output.

pub mod dopri5;
pub mod result;
pub mod rk23;

pub use dopri5::dopri5;
pub use result::{Evals, IntegrationResult, Steps};
pub use rk23::rk23;
