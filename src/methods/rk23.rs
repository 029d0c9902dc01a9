//! Bogacki-Shampine 3(2) pair (RK23) adaptive-step driver.

use crate::{
    Float,
    error::Error,
    hinit::hinit,
    interpolate::Method,
    methods::result::{Evals, IntegrationResult, Steps},
    ode::ODE,
    settings::Settings,
    solout::{ControlFlag, SolOut},
    status::Status,
    step::LiveStep,
    tolerance::Tolerance,
};

/// Bogacki-Shampine 3(2) pair (RK23) adaptive-step driver.
///
/// Uses the embedded 2nd-order solution for error estimation and step-size
/// control, and hands each accepted step to `solout` as a [`LiveStep`] with
/// cubic dense-output coefficients (or an endpoint-only linear fallback when
/// the observer does not require dense output).
pub fn rk23<F, S>(
    f: &F,
    mut x: Float,
    xend: Float,
    y: &mut [Float],
    rtol: Tolerance,
    atol: Tolerance,
    mut solout: Option<&mut S>,
    settings: Settings,
) -> Result<IntegrationResult, Vec<Error>>
where
    F: ODE,
    S: SolOut,
{
    // --- Input Validation ---
    let mut errors: Vec<Error> = Vec::new();

    // Maximum Number of Steps
    let nmax = match settings.nmax {
        Some(n) => {
            if n == 0 {
                errors.push(Error::NMaxMustBePositive(n));
            }
            n
        }
        None => 100_000,
    };

    // Safety Factor
    let safety_factor = match settings.safety_factor {
        Some(fac) => {
            if fac >= 1.0 || fac <= 1e-4 {
                errors.push(Error::SafetyFactorOutOfRange(fac));
            }
            fac
        }
        None => 0.9,
    };

    // Step size scaling factors
    let scale_min = settings.scale_min.unwrap_or(0.2);
    let scale_max = settings.scale_max.unwrap_or(5.0);
    if scale_min <= 0.0 || scale_max <= scale_min {
        errors.push(Error::InvalidScaleFactors(scale_min, scale_max));
    }

    // Error exponent for the embedded 3(2) pair
    let error_exponent = -1.0 / 3.0;

    // Maximum step size
    let hmax = settings.hmax.map(|h| h.abs()).unwrap_or((xend - x).abs());

    if !errors.is_empty() {
        return Err(errors);
    }

    // Dense-output capability is queried once, before the run starts.
    let dense = solout.as_ref().map_or(false, |s| s.requires_dense_output());
    if let Some(s) = solout.as_deref_mut() {
        s.reset();
    }

    // --- Declarations ---
    let n = y.len();
    let mut k1 = vec![0.0; n];
    let mut k2 = vec![0.0; n];
    let mut k3 = vec![0.0; n];
    let mut k4 = vec![0.0; n];
    let mut yt = vec![0.0; n];
    let mut ye = vec![0.0; n];
    let mut cont = vec![0.0; 4 * n];
    let mut evals = Evals::new();
    let mut steps = Steps::new();
    let mut status = Status::Success;
    let mut xold = x;
    let mut last = false;
    let direction = (xend - x).signum();

    // --- Initializations ---
    f.ode(x, y, &mut k1);
    evals.ode += 1;
    let mut h = match settings.h0 {
        Some(h0) => h0.abs() * direction,
        None => {
            evals.ode += 1;
            hinit(
                f, x, y, direction, &k1, &mut k2, &mut yt, 3, hmax, &atol, &rtol,
            )
        }
    };

    // --- Main integration loop ---
    loop {
        // Check for maximum number of steps
        if steps.total >= nmax {
            status = Status::NeedLargerNMax;
            break;
        }
        steps.total += 1;

        // Adjust last step to land on xend
        if (x + 1.01 * h - xend) * direction > 0.0 {
            h = xend - x;
            last = true;
        }

        // Stage 2
        for i in 0..n {
            yt[i] = y[i] + h * A21 * k1[i];
        }
        f.ode(x + C2 * h, &yt, &mut k2);

        // Stage 3
        for i in 0..n {
            yt[i] = y[i] + h * A32 * k2[i];
        }
        f.ode(x + C3 * h, &yt, &mut k3);

        // 3rd-order solution
        for i in 0..n {
            yt[i] = y[i] + h * (B1 * k1[i] + B2 * k2[i] + B3 * k3[i]);
        }

        // Stage 4: derivative at the new point, reused as k1 on acceptance (FSAL)
        f.ode(x + h, &yt, &mut k4);
        evals.ode += 3;

        // Error estimate from the embedded 2nd-order solution
        for i in 0..n {
            ye[i] = h * (E1 * k1[i] + E2 * k2[i] + E3 * k3[i] + E4 * k4[i]);
        }
        let mut err = 0.0;
        for i in 0..n {
            let tol = atol[i] + rtol[i] * yt[i].abs().max(y[i].abs());
            err += (ye[i] / tol).powi(2);
        }
        err = (err / n as Float).sqrt();

        if err <= 1.0 {
            // Step accepted
            steps.accepted += 1;

            ye.copy_from_slice(y);
            y.copy_from_slice(&yt);
            xold = x;
            x += h;

            if let Some(s) = solout.as_deref_mut() {
                if dense {
                    cont[0..n].copy_from_slice(&ye);
                    for i in 0..n {
                        cont[n + i] = k1[i];
                        cont[2 * n + i] = D21 * k1[i] + D22 * k2[i] + D23 * k3[i] + D24 * k4[i];
                        cont[3 * n + i] = D31 * k1[i] + D32 * k2[i] + D33 * k3[i] + D34 * k4[i];
                    }
                } else {
                    // Endpoint-only guarantee: linear coefficients
                    cont[0..n].copy_from_slice(&ye);
                    for i in 0..n {
                        cont[n + i] = (y[i] - ye[i]) / h;
                        cont[2 * n + i] = 0.0;
                        cont[3 * n + i] = 0.0;
                    }
                }
                let live = LiveStep::new(Method::Rk23, &cont, xold, h);
                if let ControlFlag::Interrupt = s.solout(&live, last) {
                    status = Status::Interrupted;
                    break;
                }
            }

            // Reuse k4 as k1 for the next step (FSAL)
            k1.copy_from_slice(&k4);

            // Normal exit
            if last {
                break;
            }

            // Adjust step size
            h *= (safety_factor * err.powf(error_exponent))
                .min(scale_max)
                .max(scale_min);
            if h.abs() > hmax {
                h = direction * hmax;
            }
        } else {
            // Step rejected
            steps.rejected += 1;
            last = false;
            h *= (safety_factor * err.powf(error_exponent))
                .min(1.0)
                .max(scale_min);
        }
    }

    Ok(IntegrationResult::new(x, h, status, evals, steps))
}

/// Dense output evaluation for RK23: cubic in the normalized offset.
pub fn contrk23(xi: Float, yi: &mut [Float], cont: &[Float], xold: Float, h: Float) {
    let n = yi.len();
    let theta = (xi - xold) / h;
    let theta2 = theta * theta;
    let theta3 = theta2 * theta;
    for i in 0..n {
        yi[i] = cont[i]
            + h * (cont[n + i] * theta + cont[2 * n + i] * theta2 + cont[3 * n + i] * theta3);
    }
}

// RK23 Butcher tableau coefficients
const C2: Float = 0.5;
const C3: Float = 0.75;

const A21: Float = 0.5;
const A32: Float = 0.75;

const B1: Float = 2.0 / 9.0;
const B2: Float = 1.0 / 3.0;
const B3: Float = 4.0 / 9.0;

const E1: Float = 5.0 / 72.0;
const E2: Float = -1.0 / 12.0;
const E3: Float = -1.0 / 9.0;
const E4: Float = 1.0 / 8.0;

// Dense-output coefficients
const D21: Float = -4.0 / 3.0;
const D22: Float = 1.0;
const D23: Float = 4.0 / 3.0;
const D24: Float = -1.0;
const D31: Float = 5.0 / 9.0;
const D32: Float = -2.0 / 3.0;
const D33: Float = -8.0 / 9.0;
const D34: Float = 1.0;
