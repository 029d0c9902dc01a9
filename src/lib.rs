//! Dense (continuous) output for adaptive-step explicit Runge-Kutta ODE integrators.
//!
//! An adaptive integrator only visits the step points its error control happens
//! to accept. This crate provides everything needed to evaluate the solution at
//! *any* time inside an integrated span: per-step dense-output interpolators
//! ([`StepInterpolator`]), the observer protocol by which the integrator hands
//! step data to consumers ([`SolOut`]), a stitched continuous trajectory with
//! fast time-to-step lookup ([`ContinuousOutput`]), and a byte-buffer codec for
//! persisting trajectories ([`codec`]).
//!
//! Two embedded Runge-Kutta drivers are included to produce the dense output:
//! Bogacki-Shampine 3(2) ([`methods::rk23()`]) and Dormand-Prince 5(4)
//! ([`methods::dopri5()`]).

mod cont;
mod error;
mod hinit;
mod interpolate;
mod ode;
mod settings;
mod solout;
mod status;
mod step;
mod tolerance;

pub mod codec;
pub mod methods;
pub mod prelude;
pub mod solve;

pub use cont::ContinuousOutput;
pub use error::Error;
pub use interpolate::{Interpolate, Method};
pub use ode::ODE;
pub use settings::Settings;
pub use solout::{ControlFlag, SolOut};
pub use status::Status;
pub use step::{LiveStep, StepInterpolator};
pub use tolerance::Tolerance;

// Prevent selecting two incompatible float precision features at once.
#[cfg(all(feature = "f32", feature = "f64"))]
compile_error!(
    "features 'f32' and 'f64' cannot both be enabled; pick exactly one Float precision feature"
);

/// Change this to f64 or f32 via the crate features.
#[cfg(feature = "f32")]
pub type Float = f32;
#[cfg(feature = "f64")]
pub type Float = f64;
