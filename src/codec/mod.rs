//! Curve codec: runtime [`Curve`] ⇄ YAML text.
//!
//! Decoding is two steps: parse the fixed layout into a [`SerializedCurve`],
//! then lift each key's three composite fields into a [`Keyframe`]. Time
//! ordering and tangent-mode values are not validated; they belong to the
//! engine.
//!
//! [`Keyframe`]: crate::domain::Keyframe

use thiserror::Error;

use crate::domain::Curve;

pub mod json;
pub mod serialized;

pub use serialized::{SerializedCurve, SerializedKeyframe};

/// Why a curve payload could not be turned into a [`Curve`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// Empty or `null` payload. Callers pick the fallback, the codec does not.
    #[error("curve payload is missing")]
    Missing,
    #[error("malformed curve structure: {0}")]
    MalformedStructure(String),
}

#[derive(Debug, Error)]
#[error("failed to encode curve: {0}")]
pub struct EncodeError(#[from] serde_yaml::Error);

/// Decode YAML text into a runtime curve.
pub fn decode(text: &str) -> Result<Curve, DecodeError> {
    decode_serialized(text)?.to_curve()
}

/// Decode YAML text into the serialized layout, checking that it lifts cleanly.
pub fn decode_serialized(text: &str) -> Result<SerializedCurve, DecodeError> {
    if text.trim().is_empty() {
        return Err(DecodeError::Missing);
    }
    let parsed: Option<SerializedCurve> =
        serde_yaml::from_str(text).map_err(|e| DecodeError::MalformedStructure(e.to_string()))?;
    let serialized = parsed.ok_or(DecodeError::Missing)?;
    serialized.to_curve()?;
    Ok(serialized)
}

/// Encode a runtime curve as YAML text.
pub fn encode(curve: &Curve) -> Result<String, EncodeError> {
    encode_serialized(&SerializedCurve::from(curve))
}

pub fn encode_serialized(serialized: &SerializedCurve) -> Result<String, EncodeError> {
    Ok(serde_yaml::to_string(serialized)?)
}

#[cfg(test)]
mod tests {
    use rand::prelude::*;
    use rand::rngs::StdRng;

    use super::*;
    use crate::domain::{Keyframe, WeightedMode, WrapMode};

    fn sample_curve() -> Curve {
        Curve::new(vec![
            Keyframe::new(0.0, 1.0).with_tangents(0.0, -0.25),
            Keyframe {
                tangent_mode: 1_234_567,
                ..Keyframe::new(0.4, 0.731_234_567_891_234_5)
                    .with_tangents(-1.5, 2.75)
                    .with_weights(0.1, 0.9, WeightedMode::Both)
            },
            Keyframe::new(1.0, 0.0).with_weights(0.5, 0.2, WeightedMode::In),
        ])
        .with_wrap_modes(WrapMode::PingPong, WrapMode::Loop)
    }

    #[test]
    fn round_trip_preserves_everything() {
        let curve = sample_curve();
        let text = encode(&curve).unwrap();
        assert_eq!(decode(&text).unwrap(), curve);
    }

    #[test]
    fn round_trip_empty_key_list() {
        let curve = Curve::new(Vec::new());
        let text = encode(&curve).unwrap();
        let back = decode(&text).unwrap();
        assert!(back.keys.is_empty());
        assert_eq!(back, curve);
    }

    #[test]
    fn round_trip_random_curves() {
        let modes = [WrapMode::Default, WrapMode::Clamp, WrapMode::Loop, WrapMode::PingPong];
        let weighted = [WeightedMode::None, WeightedMode::In, WeightedMode::Out, WeightedMode::Both];
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let n = rng.gen_range(0..8);
            let keys = (0..n)
                .map(|_| Keyframe {
                    time: rng.gen_range(-10.0..10.0),
                    value: rng.gen_range(-1e6..1e6),
                    in_tangent: rng.r#gen::<f64>() * 100.0 - 50.0,
                    out_tangent: rng.r#gen::<f64>() * 1e-7,
                    in_weight: rng.r#gen(),
                    out_weight: rng.r#gen(),
                    tangent_mode: rng.r#gen(),
                    weighted_mode: weighted[rng.gen_range(0..4)],
                })
                .collect();
            let curve = Curve::new(keys)
                .with_wrap_modes(modes[rng.gen_range(0..4)], modes[rng.gen_range(0..4)]);
            let text = encode(&curve).unwrap();
            assert_eq!(decode(&text).unwrap(), curve, "text:\n{text}");
        }
    }

    #[test]
    fn key_order_is_not_resorted() {
        let curve = Curve::new(vec![Keyframe::new(1.0, 0.0), Keyframe::new(0.0, 1.0)]);
        let back = decode(&encode(&curve).unwrap()).unwrap();
        assert_eq!(back.keys[0].time, 1.0);
        assert_eq!(back.keys[1].time, 0.0);
    }

    #[test]
    fn field_order_is_stable() {
        let text = encode(&sample_curve()).unwrap();
        let pre = text.find("modePreWrap").unwrap();
        let post = text.find("modePostWrap").unwrap();
        let keys = text.find("keys").unwrap();
        assert!(pre < post && post < keys, "{text}");
        let tv = text.find("tv_tg").unwrap();
        let w = text.find("w:").unwrap();
        let m = text.find("m:").unwrap();
        assert!(tv < w && w < m, "{text}");
        assert_eq!(encode(&decode(&text).unwrap()).unwrap(), text);
    }

    #[test]
    fn missing_payload_is_signalled() {
        assert_eq!(decode(""), Err(DecodeError::Missing));
        assert_eq!(decode("  \n"), Err(DecodeError::Missing));
        assert_eq!(decode("null\n"), Err(DecodeError::Missing));
        assert_eq!(decode("~"), Err(DecodeError::Missing));
    }

    #[test]
    fn missing_keys_is_malformed() {
        let text = "modePreWrap: Clamp\nmodePostWrap: Clamp\n";
        assert!(matches!(decode(text), Err(DecodeError::MalformedStructure(_))));
    }

    #[test]
    fn short_composite_is_malformed() {
        let text = "modePreWrap: Clamp\nmodePostWrap: Clamp\nkeys:\n- tv_tg: [0, 1, 0]\n  w: [0.3, 0.3]\n  m: [0, 0]\n";
        assert!(matches!(decode(text), Err(DecodeError::MalformedStructure(_))));
    }

    #[test]
    fn missing_composite_is_malformed() {
        let text = "modePreWrap: Clamp\nmodePostWrap: Clamp\nkeys:\n- tv_tg: [0, 1, 0, 0]\n  w: [0.3, 0.3]\n";
        assert!(matches!(decode(text), Err(DecodeError::MalformedStructure(_))));
    }

    #[test]
    fn unknown_weighted_mode_is_malformed() {
        let text = "modePreWrap: Clamp\nmodePostWrap: Clamp\nkeys:\n- tv_tg: [0, 1, 0, 0]\n  w: [0.3, 0.3]\n  m: [0, 9]\n";
        let err = decode(text).unwrap_err();
        assert!(matches!(&err, DecodeError::MalformedStructure(msg) if msg.contains("key 0")), "{err}");
    }

    #[test]
    fn engine_mapping_form_and_aliases_are_accepted() {
        let text = "\
modePostWrap: ClampForever
modePreWrap: Once
keys:
- tv_tg: {x: 0, y: 1, z: 0, w: -1}
  w: {x: 0.33333334, y: 0.33333334}
  m: {x: 34, y: 0}
- tv_tg: {x: 1, y: 0, z: -1, w: 0}
  w: {x: 0.33333334, y: 0.33333334}
  m: {x: 34, y: 0}
";
        let curve = decode(text).unwrap();
        assert_eq!(curve.pre_wrap_mode, WrapMode::Clamp);
        assert_eq!(curve.post_wrap_mode, WrapMode::Clamp);
        assert_eq!(curve.keys.len(), 2);
        assert_eq!(curve.keys[0].out_tangent, -1.0);
        assert_eq!(curve.keys[1].tangent_mode, 34);
    }
}
