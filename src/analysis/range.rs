//! Optimal-range extraction from damage falloff curves.
//!
//! The scan samples `t = i / 100` for `i in 0..100` and reports where the
//! curve sits at or above [`RANGE_THRESHOLD`]:
//!
//! - `low` is the first sample at or above the threshold
//! - `high` is the last sample of the run that follows it
//! - the scan stops at the first dip below the threshold once `high` has moved
//!
//! Sentinels are `low = -1` and `high = 1`. The scan assumes a single
//! contiguous region: a second hump after a dip is never seen, and a dip
//! before `high` has moved is skipped over.

use crate::domain::Curve;

pub const RANGE_THRESHOLD: f64 = 0.80;

/// Number of samples over `[0, 1)`; the step is `1 / RANGE_SAMPLES`.
pub const RANGE_SAMPLES: u32 = 100;

const LOW_SENTINEL: f64 = -1.0;
const HIGH_SENTINEL: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimalRange {
    pub low: f64,
    pub high: f64,
}

impl OptimalRange {
    /// True when no sample reached the threshold.
    pub fn is_unreached(&self) -> bool {
        self.low == LOW_SENTINEL
    }
}

pub fn compute_optimal_range(curve: &Curve) -> OptimalRange {
    scan(|t| curve.evaluate(t))
}

fn scan(f: impl Fn(f64) -> f64) -> OptimalRange {
    let mut low = LOW_SENTINEL;
    let mut high = HIGH_SENTINEL;

    for i in 0..RANGE_SAMPLES {
        let t = f64::from(i) / f64::from(RANGE_SAMPLES);
        let v = f(t);
        if v < RANGE_THRESHOLD {
            if high != HIGH_SENTINEL {
                break;
            }
            continue;
        }

        if low == LOW_SENTINEL {
            low = t;
        } else {
            high = t;
        }
    }

    OptimalRange { low, high }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Keyframe;

    #[test]
    fn constant_above_threshold() {
        let r = compute_optimal_range(&Curve::constant(0.9));
        assert_eq!(r, OptimalRange { low: 0.0, high: 0.99 });
    }

    #[test]
    fn constant_below_threshold_keeps_sentinels() {
        let r = compute_optimal_range(&Curve::constant(0.5));
        assert_eq!(r, OptimalRange { low: -1.0, high: 1.0 });
        assert!(r.is_unreached());
    }

    #[test]
    fn linear_rise_crosses_at_point_eight() {
        let r = compute_optimal_range(&Curve::linear(0.0, 1.0));
        assert_eq!(r.low, 0.8);
        assert_eq!(r.high, 0.99);
    }

    #[test]
    fn falling_curve_closes_region() {
        // 1 at t=0 falling to 0 at t=1: above 0.8 for t <= 0.2.
        let r = compute_optimal_range(&Curve::linear(1.0, 0.0));
        assert_eq!(r.low, 0.0);
        assert_eq!(r.high, 0.2);
    }

    #[test]
    fn second_hump_is_ignored() {
        let r = scan(|t| if t < 0.2 || (0.5..0.7).contains(&t) { 0.9 } else { 0.1 });
        assert_eq!(r.low, 0.0);
        assert_eq!(r.high, 0.19);
    }

    #[test]
    fn single_sample_region_leaves_high_sentinel() {
        // Only t=0.3 is above threshold: low moves, high never does, scan runs on.
        let r = scan(|t| if (t - 0.3).abs() < 1e-9 { 1.0 } else { 0.0 });
        assert_eq!(r, OptimalRange { low: 0.3, high: 1.0 });
    }

    #[test]
    fn flat_plateau_from_keys() {
        let curve = Curve::new(vec![
            Keyframe::new(0.0, 0.0).with_tangents(0.0, 0.0),
            Keyframe::new(0.25, 1.0),
            Keyframe::new(0.6, 1.0),
            Keyframe::new(0.9, 0.0),
        ]);
        let r = compute_optimal_range(&curve);
        assert!(r.low > 0.0 && r.low < 0.25, "low={}", r.low);
        assert!(r.high > 0.6 && r.high < 0.9, "high={}", r.high);
    }
}
