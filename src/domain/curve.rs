//! Curve evaluation.
//!
//! Keys are assumed to be in ascending time order (the engine keeps them that
//! way); nothing here re-sorts them.

use crate::domain::{Curve, DEFAULT_WEIGHT, Keyframe, WrapMode};
use crate::math::{hermite, weighted_bezier};

impl Curve {
    /// Evaluate the curve at `time`.
    ///
    /// - no keys: `0.0`
    /// - one key: that key's value everywhere
    /// - outside the key range: mapped back in by the pre/post wrap mode
    pub fn evaluate(&self, time: f64) -> f64 {
        let keys = self.keys.as_slice();
        let (first, last) = match keys {
            [] => return 0.0,
            [only] => return only.value,
            [first, .., last] => (first, last),
        };

        let t = if time < first.time {
            wrap_time(self.pre_wrap_mode, time, first.time, last.time)
        } else if time > last.time {
            wrap_time(self.post_wrap_mode, time, first.time, last.time)
        } else {
            time
        };

        if t <= first.time {
            return first.value;
        }
        if t >= last.time {
            return last.value;
        }

        for pair in keys.windows(2) {
            let (k0, k1) = (&pair[0], &pair[1]);
            if t >= k0.time && t <= k1.time {
                return evaluate_segment(k0, k1, t);
            }
        }

        last.value
    }
}

fn wrap_time(mode: WrapMode, time: f64, start: f64, end: f64) -> f64 {
    let span = end - start;
    if !(span > 0.0) {
        return start;
    }
    match mode {
        WrapMode::Default | WrapMode::Clamp => time.clamp(start, end),
        WrapMode::Loop => start + (time - start).rem_euclid(span),
        WrapMode::PingPong => {
            let u = (time - start).rem_euclid(2.0 * span);
            if u > span { start + 2.0 * span - u } else { start + u }
        }
    }
}

fn evaluate_segment(k0: &Keyframe, k1: &Keyframe, t: f64) -> f64 {
    let dt = k1.time - k0.time;
    if !(dt > 0.0) {
        return k0.value;
    }
    // Infinite tangents mark a stepped segment.
    if !k0.out_tangent.is_finite() || !k1.in_tangent.is_finite() {
        return k0.value;
    }

    let s = (t - k0.time) / dt;
    let m0 = k0.out_tangent * dt;
    let m1 = k1.in_tangent * dt;

    let out_weighted = k0.weighted_mode.has_out();
    let in_weighted = k1.weighted_mode.has_in();
    if out_weighted || in_weighted {
        let w0 = if out_weighted { k0.out_weight } else { DEFAULT_WEIGHT };
        let w1 = if in_weighted { k1.in_weight } else { DEFAULT_WEIGHT };
        weighted_bezier(k0.value, m0, k1.value, m1, w0, w1, s)
    } else {
        hermite(k0.value, m0, k1.value, m1, s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::WeightedMode;

    #[test]
    fn empty_and_single_key() {
        assert_eq!(Curve::default().evaluate(0.3), 0.0);
        let single = Curve::new(vec![Keyframe::new(0.5, 2.5)]);
        assert_eq!(single.evaluate(-10.0), 2.5);
        assert_eq!(single.evaluate(10.0), 2.5);
    }

    #[test]
    fn linear_curve_is_exact_on_grid() {
        let curve = Curve::linear(0.0, 1.0);
        for i in 0..100 {
            let t = i as f64 / 100.0;
            assert_eq!(curve.evaluate(t), t);
        }
    }

    #[test]
    fn clamp_outside_range() {
        let curve = Curve::linear(1.0, 0.0);
        assert_eq!(curve.evaluate(-1.0), 1.0);
        assert_eq!(curve.evaluate(3.0), 0.0);
    }

    #[test]
    fn loop_and_ping_pong() {
        let looped = Curve::linear(0.0, 1.0).with_wrap_modes(WrapMode::Loop, WrapMode::Loop);
        assert!((looped.evaluate(1.25) - 0.25).abs() < 1e-12);
        assert!((looped.evaluate(-0.25) - 0.75).abs() < 1e-12);

        let pp = Curve::linear(0.0, 1.0).with_wrap_modes(WrapMode::PingPong, WrapMode::PingPong);
        assert!((pp.evaluate(1.25) - 0.75).abs() < 1e-12);
        assert!((pp.evaluate(2.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn stepped_segment_holds_left_value() {
        let curve = Curve::new(vec![
            Keyframe::new(0.0, 1.0).with_tangents(0.0, f64::INFINITY),
            Keyframe::new(1.0, 5.0),
        ]);
        assert_eq!(curve.evaluate(0.9), 1.0);
    }

    #[test]
    fn weighted_keys_stay_within_hull() {
        let curve = Curve::new(vec![
            Keyframe::new(0.0, 0.0).with_weights(0.0, 0.8, WeightedMode::Out),
            Keyframe::new(1.0, 1.0).with_weights(0.8, 0.0, WeightedMode::In),
        ]);
        let mid = curve.evaluate(0.5);
        assert!(mid > 0.0 && mid < 1.0, "mid={mid}");
        assert!((mid - 0.5).abs() < 1e-9, "symmetric flat-tangent curve should pass the midpoint, got {mid}");
    }
}
