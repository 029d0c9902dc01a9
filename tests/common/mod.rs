#![allow(dead_code)]

use denseout::prelude::*;

/// Simple harmonic oscillator: y = [cos t, -sin t] for y(0) = [1, 0].
pub struct SHO;

impl ODE for SHO {
    fn ode(&self, _x: Float, y: &[Float], dydx: &mut [Float]) {
        dydx[0] = y[1];
        dydx[1] = -y[0];
    }
}

pub fn default_settings() -> Settings {
    Settings::default()
}
