//! Spin planning and eased angular motion.
//!
//! A spin is planned once (start angle plus a random forward delta) and then
//! sampled from absolute elapsed time. Sampling never accumulates per-frame
//! deltas, so dropped frames or timer jitter cannot drift the wheel.

use std::f64::consts::TAU;

use rand::Rng;

use crate::resolver::normalize_angle;

/// A planned spin from `start` forward to `target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinPlan {
    /// Baseline angle when the spin started.
    pub start: f64,
    /// Unnormalized angle the wheel settles at.
    pub target: f64,
}

impl SpinPlan {
    /// Total forward rotation of this spin.
    pub fn delta(&self) -> f64 {
        self.target - self.start
    }

    /// Angle after `elapsed_ms` of a spin lasting `duration_ms`.
    pub fn angle_at(&self, elapsed_ms: u64, duration_ms: u64) -> f64 {
        advance(elapsed_ms, duration_ms, self.start, self.delta())
    }

    /// The target angle normalized into `[0, 2π)`, the next baseline.
    pub fn settled(&self) -> f64 {
        normalize_angle(self.target)
    }
}

/// Plan a spin from `current`: a whole-and-fractional number of turns drawn
/// from `[min_turns, max_turns)` plus a sub-turn offset from `[0, 2π)`.
pub fn plan_spin<R: Rng + ?Sized>(
    current: f64,
    min_turns: f64,
    max_turns: f64,
    rng: &mut R,
) -> SpinPlan {
    let turns = if max_turns > min_turns {
        rng.random_range(min_turns..max_turns)
    } else {
        min_turns
    };
    let offset = rng.random_range(0.0..TAU);
    SpinPlan {
        start: current,
        target: current + turns * TAU + offset,
    }
}

/// Cubic ease-out: fast start, smooth stop.
pub fn ease_out_cubic(p: f64) -> f64 {
    let inv = 1.0 - p;
    1.0 - inv * inv * inv
}

/// Linear progress of a timed animation, clamped to `[0, 1]`. A zero
/// duration is already complete.
pub fn progress(elapsed_ms: u64, duration_ms: u64) -> f64 {
    if duration_ms == 0 {
        return 1.0;
    }
    (elapsed_ms as f64 / duration_ms as f64).clamp(0.0, 1.0)
}

/// Angle of a spin `elapsed_ms` in, starting at `start` and rotating
/// `total_delta` over `duration_ms`.
pub fn advance(elapsed_ms: u64, duration_ms: u64, start: f64, total_delta: f64) -> f64 {
    start + total_delta * ease_out_cubic(progress(elapsed_ms, duration_ms))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn easing_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-12);
    }

    #[test]
    fn progress_clamps() {
        assert_eq!(progress(0, 4000), 0.0);
        assert_eq!(progress(2000, 4000), 0.5);
        assert_eq!(progress(9000, 4000), 1.0);
        assert_eq!(progress(10, 0), 1.0);
    }

    #[test]
    fn advance_reaches_target_exactly() {
        let angle = advance(4000, 4000, 1.0, 40.0);
        assert!((angle - 41.0).abs() < 1e-12);
        let past = advance(5000, 4000, 1.0, 40.0);
        assert!((past - 41.0).abs() < 1e-12);
    }

    #[test]
    fn advance_is_front_loaded() {
        // Half the time covers most of the distance.
        let half = advance(2000, 4000, 0.0, 100.0);
        assert!(half > 80.0);
    }

    #[test]
    fn sampling_is_path_independent() {
        let plan = SpinPlan {
            start: 0.5,
            target: 70.0,
        };
        // Jittery frame times land on the same angle as a direct sample.
        let samples: Vec<f64> = [16, 40, 41, 700, 1999, 2000]
            .iter()
            .map(|t| plan.angle_at(*t, 4000))
            .collect();
        assert_eq!(samples[samples.len() - 1], plan.angle_at(2000, 4000));
        assert!(samples.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn settled_is_normalized() {
        let plan = SpinPlan {
            start: 3.0,
            target: 3.0 + 7.0 * TAU + 0.25,
        };
        assert!((plan.settled() - (3.25 % TAU)).abs() < 1e-9);
    }

    #[test]
    fn degenerate_turn_range_uses_lower_bound() {
        let mut rng = StdRng::seed_from_u64(1);
        let plan = plan_spin(0.0, 5.0, 5.0, &mut rng);
        assert!(plan.delta() >= 5.0 * TAU);
        assert!(plan.delta() < 6.0 * TAU);
    }

    proptest! {
        #[test]
        fn plan_advances_at_least_five_turns(seed in any::<u64>(), current in 0.0f64..TAU) {
            let mut rng = StdRng::seed_from_u64(seed);
            let plan = plan_spin(current, 5.0, 10.0, &mut rng);
            prop_assert!(plan.delta() >= 5.0 * TAU - 1e-9);
            prop_assert!(plan.delta() < 10.0 * TAU + TAU);
            prop_assert_eq!(plan.start, current);
        }

        #[test]
        fn settled_in_range(seed in any::<u64>(), current in -100.0f64..100.0) {
            let mut rng = StdRng::seed_from_u64(seed);
            let settled = plan_spin(current, 5.0, 10.0, &mut rng).settled();
            prop_assert!((0.0..TAU).contains(&settled));
        }

        #[test]
        fn angle_monotonic_in_time(a in 0u64..4000, b in 0u64..4000) {
            let plan = SpinPlan { start: 0.0, target: 50.0 };
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(plan.angle_at(lo, 4000) <= plan.angle_at(hi, 4000));
        }
    }
}
