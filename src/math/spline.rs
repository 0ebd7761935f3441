//! Segment interpolation for piecewise-cubic curves.
//!
//! Between two keys the engine uses:
//!
//! - a cubic Hermite spline when neither side is weighted
//! - a cubic Bézier whose inner control points sit at `w * dt` along each
//!   tangent when either side is weighted
//!
//! Tangents here are already scaled to segment-local units (`tangent * dt`).
//! With both weights at 1/3 the Bézier reduces to the Hermite form.

/// Bisection steps used to invert the Bézier time polynomial.
const BISECT_ITERS: usize = 64;

/// Cubic Hermite interpolation in power-basis (Horner) form.
///
/// Evaluating the polynomial this way keeps degenerate shapes exact: a flat
/// segment returns `p0` bit-for-bit and a straight segment returns `p0 + s * m`.
pub fn hermite(p0: f64, m0: f64, p1: f64, m1: f64, s: f64) -> f64 {
    let c1 = m0;
    let c2 = 3.0 * (p1 - p0) - 2.0 * m0 - m1;
    let c3 = 2.0 * (p0 - p1) + m0 + m1;
    ((c3 * s + c2) * s + c1) * s + p0
}

fn cubic_bezier(p0: f64, p1: f64, p2: f64, p3: f64, u: f64) -> f64 {
    let mu = 1.0 - u;
    p0 * mu * mu * mu + 3.0 * p1 * mu * mu * u + 3.0 * p2 * mu * u * u + p3 * u * u * u
}

/// Weighted segment: Bézier with x control points `[0, w0, 1 - w1, 1]`.
///
/// `s` is the normalized segment time; the Bézier parameter matching it is
/// found by bisection (x is monotonic for weights in `[0, 1]`).
pub fn weighted_bezier(p0: f64, m0: f64, p1: f64, m1: f64, w0: f64, w1: f64, s: f64) -> f64 {
    let w0 = w0.clamp(0.0, 1.0);
    let w1 = w1.clamp(0.0, 1.0);
    let x1 = w0;
    let x2 = 1.0 - w1;
    let y1 = p0 + w0 * m0;
    let y2 = p1 - w1 * m1;

    let mut lo = 0.0;
    let mut hi = 1.0;
    let mut u = s;
    for _ in 0..BISECT_ITERS {
        u = 0.5 * (lo + hi);
        let x = cubic_bezier(0.0, x1, x2, 1.0, u);
        if x < s {
            lo = u;
        } else {
            hi = u;
        }
    }

    cubic_bezier(p0, y1, y2, p1, u)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hermite_hits_endpoints() {
        assert_eq!(hermite(2.0, 0.5, 7.0, -3.0, 0.0), 2.0);
        assert!((hermite(2.0, 0.5, 7.0, -3.0, 1.0) - 7.0).abs() < 1e-12);
    }

    #[test]
    fn hermite_flat_and_straight_are_exact() {
        for i in 0..100 {
            let s = i as f64 / 100.0;
            assert_eq!(hermite(0.9, 0.0, 0.9, 0.0, s), 0.9);
            assert_eq!(hermite(0.0, 1.0, 1.0, 1.0, s), s);
        }
    }

    #[test]
    fn third_weights_match_hermite() {
        let w = 1.0 / 3.0;
        for &s in &[0.1, 0.25, 0.5, 0.8, 0.95] {
            let h = hermite(0.0, 2.0, 1.0, -1.0, s);
            let b = weighted_bezier(0.0, 2.0, 1.0, -1.0, w, w, s);
            assert!((h - b).abs() < 1e-9, "s={s}: hermite {h} vs bezier {b}");
        }
    }
}
