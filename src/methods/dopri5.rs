//! Dormand-Prince 5(4) (DOPRI5) adaptive-step driver.
//!
//! Explicit embedded Runge-Kutta method of order 5(4) with step-size control,
//! stiffness detection, and 4th-order dense output, after Hairer, Norsett and
//! Wanner, "Solving Ordinary Differential Equations I. Nonstiff Problems",
//! 2nd ed., Springer (1993).

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

/// Dormand-Prince 5(4) adaptive-step driver.
///
/// Integrates `y' = f(x, y)` from `x` to `xend`, advancing `y` in place.
/// Each accepted step is handed to `solout` as a [`LiveStep`] carrying
/// quartic dense-output coefficients built from the stage derivatives already
/// computed for error control (no extra RHS evaluations). When the observer
/// does not require dense output, only endpoint evaluation is guaranteed.
pub fn dopri5<F, S>(
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

    // Rounding Unit
    let uround = match settings.uround {
        Some(u) => {
            if u <= 1e-35 || u >= 1.0 {
                errors.push(Error::URoundOutOfRange(u));
            }
            u
        }
        None => 2.3e-16,
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

    // Parameters for step size selection
    let facc1 = match settings.scale_min {
        Some(fac) => 1.0 / fac,
        None => 5.0,
    };
    let facc2 = match settings.scale_max {
        Some(fac) => 1.0 / fac,
        None => 1.0 / 10.0,
    };

    // Beta for step control stabilization
    let beta = match settings.beta {
        Some(b) => {
            if b > 0.2 {
                errors.push(Error::BetaTooLarge(b));
            }
            b.max(0.0)
        }
        None => 0.04,
    };

    // Maximum step size
    let hmax = match settings.hmax {
        Some(h) => h.abs(),
        None => (xend - x).abs(),
    };

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

    // Number of steps between stiffness tests
    let nstiff = match settings.nstiff {
        Some(n) => {
            if n == 0 {
                errors.push(Error::NStiffMustBePositive(n));
            }
            n
        }
        None => 1000,
    };

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
    let mut k5 = vec![0.0; n];
    let mut k6 = vec![0.0; n];
    let mut y1 = vec![0.0; n];
    let mut cont = vec![0.0; 5 * n];
    let mut facold: Float = 1e-4;
    let mut last = false;
    let mut reject = false;
    let mut nonstiff = 0;
    let mut hlamb = 0.0;
    let mut iasti = 0;
    let mut evals = Evals::new();
    let mut steps = Steps::new();
    let mut status = Status::Success;
    let mut xold = x;
    let expo1 = 0.2 - beta * 0.75;
    let posneg = (xend - x).signum();

    // --- Initializations ---
    f.ode(x, y, &mut k1);
    evals.ode += 1;
    let mut h = match settings.h0 {
        Some(h0) => h0.abs() * posneg,
        None => {
            evals.ode += 1;
            hinit(
                f, x, y, posneg, &k1, &mut k2, &mut y1, 5, hmax, &atol, &rtol,
            )
        }
    };

    // --- Main integration loop ---
    loop {
        // Check for maximum number of steps
        if steps.total > nmax {
            status = Status::NeedLargerNMax;
            break;
        }

        // Check for underflow due to machine rounding
        if 0.1 * h.abs() <= x.abs() * uround {
            status = Status::StepSizeTooSmall;
            break;
        }

        // Adjust last step to land on xend
        if (x + 1.01 * h - xend) * posneg > 0.0 {
            h = xend - x;
            last = true;
        }

        steps.total += 1;

        // Stage 2
        for i in 0..n {
            y1[i] = y[i] + h * A21 * k1[i];
        }
        f.ode(x + C2 * h, &y1, &mut k2);

        // Stage 3
        for i in 0..n {
            y1[i] = y[i] + h * (A31 * k1[i] + A32 * k2[i]);
        }
        f.ode(x + C3 * h, &y1, &mut k3);

        // Stage 4
        for i in 0..n {
            y1[i] = y[i] + h * (A41 * k1[i] + A42 * k2[i] + A43 * k3[i]);
        }
        f.ode(x + C4 * h, &y1, &mut k4);

        // Stage 5
        for i in 0..n {
            y1[i] = y[i] + h * (A51 * k1[i] + A52 * k2[i] + A53 * k3[i] + A54 * k4[i]);
        }
        f.ode(x + C5 * h, &y1, &mut k5);

        // Stage 6
        for i in 0..n {
            y1[i] =
                y[i] + h * (A61 * k1[i] + A62 * k2[i] + A63 * k3[i] + A64 * k4[i] + A65 * k5[i]);
        }
        let xph = x + h;
        f.ode(xph, &y1, &mut k6);

        // Final stage: 5th-order solution
        for i in 0..n {
            y1[i] =
                y[i] + h * (A71 * k1[i] + A73 * k3[i] + A74 * k4[i] + A75 * k5[i] + A76 * k6[i]);
        }
        f.ode(xph, &y1, &mut k2);
        evals.ode += 6;

        // Last dense-output block must be built before k4 is overwritten below
        if dense {
            for i in 0..n {
                cont[4 * n + i] = h
                    * (D1 * k1[i] + D3 * k3[i] + D4 * k4[i] + D5 * k5[i] + D6 * k6[i] + D7 * k2[i]);
            }
        }

        // k4 scaled for the error estimate
        for i in 0..n {
            k4[i] =
                (E1 * k1[i] + E3 * k3[i] + E4 * k4[i] + E5 * k5[i] + E6 * k6[i] + E7 * k2[i]) * h;
        }

        // Error estimation
        let mut err = 0.0;
        for i in 0..n {
            let sk = atol[i] + rtol[i] * y[i].abs().max(y1[i].abs());
            err += (k4[i] / sk) * (k4[i] / sk);
        }
        err = (err / n as Float).sqrt();

        // Computation of hnew with Lund stabilization;
        // we require facc2 <= hnew/h <= facc1
        let fac11 = err.powf(expo1);
        let fac = facc2.max(facc1.min((fac11 / facold.powf(beta)) / safety_factor));
        let mut hnew = h / fac;

        if err <= 1.0 {
            // Step accepted
            facold = err.max(1.0e-4);
            steps.accepted += 1;

            // Stiffness detection
            if (steps.accepted % nstiff == 0) || (iasti > 0) {
                let mut stnum = 0.0;
                let mut stden = 0.0;
                for i in 0..n {
                    let d1 = k2[i] - k6[i];
                    let ysti = y[i]
                        + h * (A61 * k1[i] + A62 * k2[i] + A63 * k3[i] + A64 * k4[i] + A65 * k5[i]);
                    let d2 = y1[i] - ysti;
                    stnum += d1 * d1;
                    stden += d2 * d2;
                }
                if stden > 0.0 {
                    hlamb = h.abs() * (stnum / stden).sqrt();
                }
                if hlamb > 3.25 {
                    nonstiff = 0;
                    iasti += 1;
                    if iasti == 15 {
                        status = Status::ProbablyStiff;
                        break;
                    }
                } else {
                    nonstiff += 1;
                    if nonstiff == 6 {
                        iasti = 0;
                    }
                }
            }

            // Prepare dense output from the old state, before y is advanced
            if solout.is_some() {
                if dense {
                    for i in 0..n {
                        let ydiff = y1[i] - y[i];
                        let bspl = h * k1[i] - ydiff;
                        cont[i] = y[i];
                        cont[n + i] = ydiff;
                        cont[2 * n + i] = bspl;
                        cont[3 * n + i] = -h * k2[i] + ydiff - bspl;
                    }
                } else {
                    // Endpoint-only guarantee: linear coefficients
                    for i in 0..n {
                        cont[i] = y[i];
                        cont[n + i] = y1[i] - y[i];
                        cont[2 * n + i] = 0.0;
                        cont[3 * n + i] = 0.0;
                        cont[4 * n + i] = 0.0;
                    }
                }
            }

            // Update state variables
            k1.copy_from_slice(&k2);
            y.copy_from_slice(&y1);
            xold = x;
            x = xph;

            if let Some(s) = solout.as_deref_mut() {
                let live = LiveStep::new(Method::Dopri5, &cont, xold, h);
                if let ControlFlag::Interrupt = s.solout(&live, last) {
                    status = Status::Interrupted;
                    break;
                }
            }

            // Normal exit
            if last {
                h = hnew;
                break;
            }

            // Check for step size limits
            if hnew.abs() > hmax {
                hnew = posneg * hmax;
            }

            // Prevent oscillations due to a previous rejected step
            if reject {
                hnew = posneg * hnew.abs().min(h.abs());
                reject = false;
            }
        } else {
            // Step rejected
            hnew = h / facc1.min(fac11 / safety_factor);
            reject = true;
            if steps.accepted > 1 {
                steps.rejected += 1;
            }
            last = false;
        }
        h = hnew;
    }

    Ok(IntegrationResult::new(x, h, status, evals, steps))
}

/// Dense output evaluation for DOPRI5: quartic in the normalized offset.
pub fn contdp5(xi: Float, yi: &mut [Float], cont: &[Float], xold: Float, h: Float) {
    let n = cont.len() / 5;
    let theta = (xi - xold) / h;
    let theta1 = 1.0 - theta;
    for i in 0..n {
        yi[i] = cont[i]
            + theta
                * (cont[n + i]
                    + theta1
                        * (cont[2 * n + i] + theta * (cont[3 * n + i] + theta1 * cont[4 * n + i])));
    }
}

// DOPRI5 Butcher tableau coefficients
const C2: Float = 0.2;
const C3: Float = 0.3;
const C4: Float = 0.8;
const C5: Float = 8.0 / 9.0;

const A21: Float = 0.2;
const A31: Float = 3.0 / 40.0;
const A32: Float = 9.0 / 40.0;
const A41: Float = 44.0 / 45.0;
const A42: Float = -56.0 / 15.0;
const A43: Float = 32.0 / 9.0;
const A51: Float = 19372.0 / 6561.0;
const A52: Float = -25360.0 / 2187.0;
const A53: Float = 64448.0 / 6561.0;
const A54: Float = -212.0 / 729.0;
const A61: Float = 9017.0 / 3168.0;
const A62: Float = -355.0 / 33.0;
const A63: Float = 46732.0 / 5247.0;
const A64: Float = 49.0 / 176.0;
const A65: Float = -5103.0 / 18656.0;
const A71: Float = 35.0 / 384.0;
const A73: Float = 500.0 / 1113.0;
const A74: Float = 125.0 / 192.0;
const A75: Float = -2187.0 / 6784.0;
const A76: Float = 11.0 / 84.0;

const E1: Float = 71.0 / 57600.0;
const E3: Float = -71.0 / 16695.0;
const E4: Float = 71.0 / 1920.0;
const E5: Float = -17253.0 / 339200.0;
const E6: Float = 22.0 / 525.0;
const E7: Float = -1.0 / 40.0;

// Dense-output coefficients
const D1: Float = -12715105075.0 / 11282082432.0;
const D3: Float = 87487479700.0 / 32700410799.0;
const D4: Float = -10690763975.0 / 1880347072.0;
const D5: Float = 701980252875.0 / 199316789632.0;
const D6: Float = -1453857185.0 / 822651844.0;
const D7: Float = 69997945.0 / 29380423.0;
