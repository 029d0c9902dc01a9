//! Trajectory-wide queries: endpoint exactness, step lookup, observer
//! protocol ordering, and the endpoint-only (non-dense) mode.

use approx::assert_abs_diff_eq;
use denseout::prelude::*;

mod common;
use common::{SHO, default_settings};

/// Wraps a [`ContinuousOutput`] and records step boundaries and the `is_last`
/// flag as the driver reports them.
struct Recorder {
    model: ContinuousOutput,
    bounds: Vec<(Float, Float)>,
    last_count: usize,
}

impl Recorder {
    fn new() -> Self {
        Self {
            model: ContinuousOutput::new(),
            bounds: Vec::new(),
            last_count: 0,
        }
    }
}

impl SolOut for Recorder {
    fn solout(&mut self, step: &LiveStep<'_>, is_last: bool) -> ControlFlag {
        self.bounds.push((step.previous_time(), step.current_time()));
        if is_last {
            self.last_count += 1;
        }
        self.model.solout(step, is_last)
    }

    fn reset(&mut self) {
        self.model.reset();
        self.bounds.clear();
        self.last_count = 0;
    }
}

fn run_sho(method: Method, x0: Float, xend: Float) -> (Recorder, Vec<Float>) {
    let mut rec = Recorder::new();
    let mut y = vec![1.0, 0.0];
    let res = integrate(
        &SHO,
        x0,
        xend,
        &mut y,
        1e-9,
        1e-9,
        method,
        Some(&mut rec),
        default_settings(),
    )
    .unwrap();
    assert_eq!(res.status, Status::Success);
    (rec, y)
}

#[test]
fn endpoint_exactness_and_contiguity() {
    for method in [Method::Rk23, Method::Dopri5] {
        let (rec, y_final) = run_sho(method, 0.0, 2.0 * std::f64::consts::PI);

        assert_eq!(rec.last_count, 1);
        assert_eq!(rec.bounds.len(), rec.model.len());

        // Consecutive steps share their boundary exactly.
        for pair in rec.bounds.windows(2) {
            assert_eq!(pair[0].1, pair[1].0);
        }

        // Boundary states match the analytic solution within solver tolerance.
        for &(_, tb) in &rec.bounds {
            let y = rec.model.evaluate(tb).unwrap();
            assert_abs_diff_eq!(y[0], tb.cos(), epsilon = 1e-6);
            assert_abs_diff_eq!(y[1], -tb.sin(), epsilon = 1e-6);
        }

        // The trajectory's final state is the integrator-reported one.
        let (_, t_end) = rec.model.t_span().unwrap();
        let y_end = rec.model.evaluate(t_end).unwrap();
        assert_abs_diff_eq!(y_end[0], y_final[0], epsilon = 1e-12);
        assert_abs_diff_eq!(y_end[1], y_final[1], epsilon = 1e-12);

        // Adjacent interpolants agree where they meet.
        let steps = rec.model.steps();
        for i in 0..steps.len() - 1 {
            let tb = steps[i].current_time();
            let mut a = vec![0.0; 2];
            let mut b = vec![0.0; 2];
            steps[i].interpolate(tb, &mut a);
            steps[i + 1].interpolate(tb, &mut b);
            assert_abs_diff_eq!(a[0], b[0], epsilon = 1e-9);
            assert_abs_diff_eq!(a[1], b[1], epsilon = 1e-9);
        }
    }
}

#[test]
fn lookup_always_selects_the_covering_step() {
    let (rec, _) = run_sho(Method::Dopri5, 0.0, 10.0);
    let model = &rec.model;
    let (t0, t1) = model.t_span().unwrap();
    let dir = (t1 - t0).signum();

    for i in 0..1000 {
        let t = t0 + (t1 - t0) * (i as Float) / 999.0;

        // Reference lookup: half-open spans, boundary ties to the later step,
        // the final time belongs to the last step.
        let idx = model
            .steps()
            .iter()
            .position(|s| {
                dir * s.previous_time() <= dir * t && dir * t < dir * s.current_time()
            })
            .unwrap_or(model.len() - 1);

        let mut expected = vec![0.0; 2];
        model.steps()[idx].interpolate(t, &mut expected);
        assert_eq!(model.evaluate(t).unwrap(), expected, "t = {t}");
    }
}

#[test]
fn forward_unit_span_scenario() {
    // Forward run over [0, 1]; the mid-span query must sit on the analytic
    // solution and agree exactly with a retained copy's cursor evaluation.
    let (rec, _) = run_sho(Method::Dopri5, 0.0, 1.0);
    let model = &rec.model;

    let y_mid = model.evaluate(0.5).unwrap();
    assert_abs_diff_eq!(y_mid[0], (0.5 as Float).cos(), epsilon = 1e-6);
    assert_abs_diff_eq!(y_mid[1], -(0.5 as Float).sin(), epsilon = 1e-6);

    // A consumer-held copy evaluates identically to the trajectory.
    let covering = model
        .steps()
        .iter()
        .find(|s| s.previous_time() <= 0.5 && 0.5 < s.current_time())
        .unwrap();
    let mut copy = covering.clone();
    copy.set_interpolated_time(0.5);
    assert_eq!(copy.interpolated_state(), y_mid.as_slice());
}

#[test]
fn observer_interrupt_stops_the_run() {
    struct StopAfter {
        remaining: usize,
        model: ContinuousOutput,
    }
    impl SolOut for StopAfter {
        fn solout(&mut self, step: &LiveStep<'_>, is_last: bool) -> ControlFlag {
            if self.remaining == 0 {
                return ControlFlag::Interrupt;
            }
            self.remaining -= 1;
            self.model.solout(step, is_last)
        }
        fn reset(&mut self) {
            self.model.reset();
        }
    }

    let mut obs = StopAfter {
        remaining: 3,
        model: ContinuousOutput::new(),
    };
    let mut y = vec![1.0, 0.0];
    let res = integrate(
        &SHO,
        0.0,
        100.0,
        &mut y,
        1e-9,
        1e-9,
        Method::Dopri5,
        Some(&mut obs),
        default_settings(),
    )
    .unwrap();
    assert_eq!(res.status, Status::Interrupted);
    assert_eq!(obs.model.len(), 3);
}

#[test]
fn observer_reuse_starts_from_a_clean_slate() {
    let mut model = ContinuousOutput::new();
    let mut y = vec![1.0, 0.0];
    integrate(
        &SHO,
        0.0,
        1.0,
        &mut y,
        1e-9,
        1e-9,
        Method::Rk23,
        Some(&mut model),
        default_settings(),
    )
    .unwrap();
    let first_len = model.len();
    assert!(first_len > 0);

    // Reusing the same observer for a disjoint span must not trip the
    // contiguity check: the driver resets it first.
    let mut y = vec![1.0, 0.0];
    let res = integrate(
        &SHO,
        5.0,
        6.0,
        &mut y,
        1e-9,
        1e-9,
        Method::Rk23,
        Some(&mut model),
        Settings::builder().nmax(50_000).build(),
    )
    .unwrap();
    assert_eq!(res.status, Status::Success);
    assert_eq!(model.first_time(), Some(5.0));
    assert_eq!(model.is_forward(), Some(true));
}

#[test]
fn two_runs_concatenate_into_one_trajectory() {
    let (rec_a, y_a) = run_sho(Method::Dopri5, 0.0, 1.0);
    let mut model = rec_a.model.clone();
    let (_, seam) = model.t_span().unwrap();

    // Continue from exactly where the first run ended.
    let mut y = y_a.clone();
    let mut second = ContinuousOutput::new();
    integrate(
        &SHO,
        seam,
        2.0,
        &mut y,
        1e-9,
        1e-9,
        Method::Dopri5,
        Some(&mut second),
        default_settings(),
    )
    .unwrap();

    model.extend(&second).unwrap();
    let (t0, t1) = model.t_span().unwrap();
    assert_eq!(t0, 0.0);
    assert_abs_diff_eq!(t1, 2.0, epsilon = 1e-12);

    let y_mid = model.evaluate(1.5).unwrap();
    assert_abs_diff_eq!(y_mid[0], (1.5 as Float).cos(), epsilon = 1e-6);
}

#[test]
fn endpoint_only_mode_still_pins_the_endpoints() {
    struct EndpointObserver {
        model: ContinuousOutput,
    }
    impl SolOut for EndpointObserver {
        fn requires_dense_output(&self) -> bool {
            false
        }
        fn solout(&mut self, step: &LiveStep<'_>, is_last: bool) -> ControlFlag {
            self.model.solout(step, is_last)
        }
        fn reset(&mut self) {
            self.model.reset();
        }
    }

    let mut obs = EndpointObserver {
        model: ContinuousOutput::new(),
    };
    let mut y = vec![1.0, 0.0];
    integrate(
        &SHO,
        0.0,
        1.0,
        &mut y,
        1e-9,
        1e-9,
        Method::Dopri5,
        Some(&mut obs),
        default_settings(),
    )
    .unwrap();

    // Step endpoints are the accepted states even without dense coefficients.
    for step in obs.model.steps() {
        let t = step.current_time();
        let y_end = obs.model.evaluate(t).unwrap();
        assert_abs_diff_eq!(y_end[0], t.cos(), epsilon = 1e-6);
        assert_abs_diff_eq!(y_end[1], -t.sin(), epsilon = 1e-6);
    }
    let (_, t_end) = obs.model.t_span().unwrap();
    let y_end = obs.model.evaluate(t_end).unwrap();
    assert_abs_diff_eq!(y_end[0], y[0], epsilon = 1e-12);
    assert_abs_diff_eq!(y_end[1], y[1], epsilon = 1e-12);
}
