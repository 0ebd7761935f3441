//! Seeded demo catalog generation.
//!
//! Produces a catalog with a realistic mix of slot kinds so every command has
//! something to work on without engine data:
//! - guidance blocks with curve / constant / linear / empty inputs
//! - falloff curves that hold full damage out to a random range, then decay
//! - the stats `gcurve show` reads

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::StandardNormal;

use crate::catalog::{CatalogEntry, FalloffData, GuidanceData, MemoryCatalog, Pid};
use crate::codec::SerializedCurve;
use crate::domain::{Curve, GuidanceInput, InputType, Keyframe, WeightedMode, WrapMode};

/// Probability that an entry carries a guidance block.
const GUIDANCE_PROB: f64 = 0.7;
/// Probability that an entry carries a falloff block.
const FALLOFF_PROB: f64 = 0.8;
/// Spread of generated key tangents.
const TANGENT_SIGMA: f64 = 1.5;

/// Generate `count` entries keyed `wpn_001`, `wpn_002`, ...
pub fn generate_catalog(seed: u64, count: usize) -> MemoryCatalog {
    let mut rng = StdRng::seed_from_u64(seed);

    (1..=count)
        .map(|i| {
            let key = format!("wpn_{i:03}");
            (key, random_entry(&mut rng))
        })
        .collect()
}

fn random_entry(rng: &mut StdRng) -> CatalogEntry {
    let guidance = rng.gen_bool(GUIDANCE_PROB).then(|| random_guidance(rng));
    let falloff = rng.gen_bool(FALLOFF_PROB).then(|| FalloffData {
        curve: SerializedCurve::from(&random_falloff(rng)),
    });

    let range_max = rng.gen_range(200.0..2000.0_f64).round();
    let stats = [
        ("act_count", f64::from(rng.gen_range(1..=4_u32))),
        ("wpn_range_min", (range_max * rng.gen_range(0.0..0.2)).round()),
        ("wpn_range_max", range_max),
        ("wpn_proj_lifetime", rng.gen_range(2.0..12.0_f64).round()),
        ("wpn_speed", rng.gen_range(40.0..400.0_f64).round()),
        ("wpn_scatter_radius", rng.gen_range(0.0..30.0_f64).round()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();

    CatalogEntry {
        guidance,
        falloff,
        stats,
    }
}

fn random_guidance(rng: &mut StdRng) -> GuidanceData {
    let mut g = GuidanceData {
        input_target_height_scale: rng.gen_range(0.0..50.0_f64).round(),
        rigidbody_drag: round2(rng.gen_range(0.0..2.0)),
        rigidbody_angular_drag: round2(rng.gen_range(0.0..5.0)),
        driver_acceleration_force: rng.gen_range(10.0..200.0_f64).round(),
        driver_steering_force: rng.gen_range(5.0..100.0_f64).round(),
        driver_pitch_force: rng.gen_range(5.0..100.0_f64).round(),
        steering_pid: rng.gen_bool(0.5).then(|| random_pid(rng)),
        pitch_pid: rng.gen_bool(0.5).then(|| random_pid(rng)),
        ..GuidanceData::default()
    };

    for t in InputType::ALL {
        *g.input_mut(t) = match rng.gen_range(0..4) {
            0 => None,
            1 => Some(GuidanceInput::Constant(round2(rng.gen_range(0.0..1.0)))),
            2 => Some(GuidanceInput::Linear {
                from: round2(rng.gen_range(0.0..1.0)),
                to: round2(rng.gen_range(0.0..1.0)),
            }),
            _ => Some(GuidanceInput::from(&random_curve(rng))),
        };
    }
    g
}

fn random_pid(rng: &mut StdRng) -> Pid {
    Pid {
        p: round2(rng.gen_range(0.1..5.0)),
        i: round2(rng.gen_range(0.0..1.0)),
        d: round2(rng.gen_range(0.0..1.0)),
    }
}

/// A curve with 2..=5 keys over `[0, 1]`, random tangents and weights.
///
/// Values are not rounded so file round trips exercise full precision.
pub fn random_curve(rng: &mut StdRng) -> Curve {
    let n = rng.gen_range(2..=5_usize);

    let mut times: Vec<f64> = (0..n - 2).map(|_| rng.gen_range(0.0..1.0)).collect();
    times.push(0.0);
    times.push(1.0);
    times.sort_by(f64::total_cmp);

    let keys = times
        .into_iter()
        .map(|time| {
            let mode = match rng.gen_range(0..4) {
                0 => WeightedMode::None,
                1 => WeightedMode::In,
                2 => WeightedMode::Out,
                _ => WeightedMode::Both,
            };
            Keyframe {
                tangent_mode: rng.gen_range(0..8),
                ..Keyframe::new(time, rng.gen_range(0.0..1.0))
                    .with_tangents(random_tangent(rng), random_tangent(rng))
                    .with_weights(rng.gen_range(0.05..0.95), rng.gen_range(0.05..0.95), mode)
            }
        })
        .collect();

    let wraps = [WrapMode::Default, WrapMode::Clamp, WrapMode::Loop, WrapMode::PingPong];
    Curve::new(keys).with_wrap_modes(
        wraps[rng.gen_range(0..wraps.len())],
        wraps[rng.gen_range(0..wraps.len())],
    )
}

fn random_tangent(rng: &mut StdRng) -> f64 {
    let z: f64 = rng.sample(StandardNormal);
    TANGENT_SIGMA * z
}

/// Full damage out to a random fraction of range, then an eased decay.
pub fn random_falloff(rng: &mut StdRng) -> Curve {
    let hold = round2(rng.gen_range(0.1..0.7));
    let floor = round2(rng.gen_range(0.0..0.5));
    Curve::new(vec![
        Keyframe::new(0.0, 1.0),
        Keyframe::new(hold, 1.0),
        Keyframe::new(1.0, floor),
    ])
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::compute_optimal_range;
    use crate::catalog::Catalog;

    #[test]
    fn generation_is_deterministic() {
        assert_eq!(generate_catalog(42, 20), generate_catalog(42, 20));
        assert_ne!(generate_catalog(42, 20), generate_catalog(43, 20));
    }

    #[test]
    fn keys_are_numbered() {
        let c = generate_catalog(1, 3);
        let keys: Vec<&str> = c.entries().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["wpn_001", "wpn_002", "wpn_003"]);
    }

    #[test]
    fn random_curves_span_unit_interval() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let c = random_curve(&mut rng);
            assert!(c.keys.len() >= 2 && c.keys.len() <= 5);
            assert_eq!(c.keys.first().map(|k| k.time), Some(0.0));
            assert_eq!(c.keys.last().map(|k| k.time), Some(1.0));
            assert!(c.keys.windows(2).all(|w| w[0].time <= w[1].time));
        }
    }

    #[test]
    fn falloff_starts_in_range() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..20 {
            let r = compute_optimal_range(&random_falloff(&mut rng));
            assert_eq!(r.low, 0.0);
            assert!(r.high > 0.0);
        }
    }
}
