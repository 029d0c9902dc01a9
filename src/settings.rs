//! Settings for the integration drivers.

use bon::Builder;

use crate::Float;

/// Settings for the integration drivers.
#[derive(Builder, Clone, Debug, Default)]
pub struct Settings {
    /// The rounding unit, typically machine epsilon.
    pub uround: Option<Float>,
    /// Safety factor in step-size prediction.
    pub safety_factor: Option<Float>,
    /// Parameter for step size selection where scale_min <= hnew/hold <= scale_max.
    pub scale_min: Option<Float>,
    /// Parameter for step size selection where scale_min <= hnew/hold <= scale_max.
    pub scale_max: Option<Float>,
    /// Beta factor for stabilized step size control. Positive values
    /// (<= 0.04) make the step size control more stable.
    pub beta: Option<Float>,
    /// Maximal step size.
    pub hmax: Option<Float>,
    /// Initial step size. None will result in an initial guess
    /// computed from the problem.
    pub h0: Option<Float>,
    /// Maximum number of allowed steps.
    pub nmax: Option<usize>,
    /// Number of steps between stiffness tests.
    pub nstiff: Option<usize>,
}
