//! Copy independence: a copied interpolator shares nothing with the live step
//! or with other copies.

use denseout::prelude::*;
use proptest::prelude::*;

mod common;
use common::{SHO, default_settings};

/// Observer that copies every live step and cross-checks the copy against the
/// live view, including cursor independence between two sibling copies.
struct CloneChecker {
    nsteps: usize,
}

impl SolOut for CloneChecker {
    fn solout(&mut self, step: &LiveStep<'_>, _is_last: bool) -> ControlFlag {
        let mut cloned = step.copy();
        let ta = cloned.previous_time();
        let tb = cloned.current_time();
        assert_eq!(step.previous_time(), ta);
        assert_eq!(step.current_time(), tb);
        assert_eq!(step.dim(), cloned.dim());

        // Walk the step: the copy's cached state must match the live view.
        for i in 0..10 {
            let t = (i as Float * tb + (9 - i) as Float * ta) / 9.0;
            cloned.set_interpolated_time(t);
            assert_eq!(cloned.interpolated_time(), t);

            let mut live_y = vec![0.0; step.dim()];
            step.interpolate(t, &mut live_y);
            for (a, b) in live_y.iter().zip(cloned.interpolated_state()) {
                assert!((a - b).abs() <= 1e-12);
            }
        }

        // Two sibling copies with separately moving cursors.
        let mut a = step.copy();
        let mut b = step.copy();
        a.set_interpolated_time(ta);
        let ya = a.interpolated_state().to_vec();
        b.set_interpolated_time(tb);
        let _ = b.interpolated_state();
        assert_eq!(a.interpolated_time(), ta);
        assert_eq!(a.interpolated_state(), ya.as_slice());
        assert_eq!(b.interpolated_time(), tb);

        self.nsteps += 1;
        ControlFlag::Continue
    }
}

#[test]
fn copies_match_live_interpolation_for_both_methods() {
    for method in [Method::Rk23, Method::Dopri5] {
        let mut y = [1.0, 0.0];
        let mut checker = CloneChecker { nsteps: 0 };
        let res = integrate(
            &SHO,
            0.0,
            10.0,
            &mut y,
            1e-8,
            1e-8,
            method,
            Some(&mut checker),
            default_settings(),
        )
        .unwrap();
        assert_eq!(res.status, Status::Success);
        assert!(checker.nsteps > 1);
        assert_eq!(res.steps.accepted, checker.nsteps);
    }
}

proptest! {
    #[test]
    fn cursor_moves_never_leak_between_copies(
        cont in prop::collection::vec(-10.0 as Float..10.0, 8),
        t1 in 0.0 as Float..1.0,
        t2 in 0.0 as Float..1.0,
    ) {
        let original = StepInterpolator::new(Method::Rk23, 0.0, 1.0, cont).unwrap();

        let mut a = original.clone();
        let mut b = original.clone();

        a.set_interpolated_time(t1);
        let ya = a.interpolated_state().to_vec();

        b.set_interpolated_time(t2);
        let _ = b.interpolated_state();

        prop_assert_eq!(a.interpolated_time(), t1);
        prop_assert_eq!(a.interpolated_state(), ya.as_slice());
        prop_assert_eq!(b.interpolated_time(), t2);
    }
}
