//! The serialized curve layout.
//!
//! Each key is stored as three composite fields:
//!
//! - `tv_tg`: time, value, inTangent, outTangent
//! - `w`: inWeight, outWeight
//! - `m`: tangentMode, weightedMode (as int)
//!
//! Field order is fixed by declaration order so that encoding is stable.
//! Composite fields are written as sequences; the engine's mapping form
//! (`{x: .., y: .., z: .., w: ..}`) is accepted on read.

use serde::{Deserialize, Deserializer, Serialize};

use crate::codec::DecodeError;
use crate::domain::{Curve, Keyframe, WeightedMode, WrapMode};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedCurve {
    #[serde(rename = "modePreWrap")]
    pub mode_pre_wrap: WrapMode,
    #[serde(rename = "modePostWrap")]
    pub mode_post_wrap: WrapMode,
    pub keys: Vec<SerializedKeyframe>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SerializedKeyframe {
    #[serde(deserialize_with = "de_vec4")]
    pub tv_tg: [f64; 4],
    #[serde(deserialize_with = "de_vec2")]
    pub w: [f64; 2],
    #[serde(deserialize_with = "de_vec2_int")]
    pub m: [i32; 2],
}

impl From<&Keyframe> for SerializedKeyframe {
    fn from(key: &Keyframe) -> Self {
        Self {
            tv_tg: [key.time, key.value, key.in_tangent, key.out_tangent],
            w: [key.in_weight, key.out_weight],
            m: [key.tangent_mode, key.weighted_mode.as_i32()],
        }
    }
}

impl TryFrom<&SerializedKeyframe> for Keyframe {
    type Error = DecodeError;

    fn try_from(key: &SerializedKeyframe) -> Result<Self, Self::Error> {
        let [time, value, in_tangent, out_tangent] = key.tv_tg;
        let [in_weight, out_weight] = key.w;
        let [tangent_mode, weighted] = key.m;
        let weighted_mode = WeightedMode::from_i32(weighted).ok_or_else(|| {
            DecodeError::MalformedStructure(format!("unknown weighted mode {weighted}"))
        })?;
        Ok(Keyframe {
            time,
            value,
            in_tangent,
            out_tangent,
            in_weight,
            out_weight,
            tangent_mode,
            weighted_mode,
        })
    }
}

impl From<&Curve> for SerializedCurve {
    fn from(curve: &Curve) -> Self {
        Self {
            mode_pre_wrap: curve.pre_wrap_mode,
            mode_post_wrap: curve.post_wrap_mode,
            keys: curve.keys.iter().map(SerializedKeyframe::from).collect(),
        }
    }
}

impl TryFrom<&SerializedCurve> for Curve {
    type Error = DecodeError;

    fn try_from(serialized: &SerializedCurve) -> Result<Self, Self::Error> {
        let keys = serialized
            .keys
            .iter()
            .enumerate()
            .map(|(idx, key)| {
                Keyframe::try_from(key).map_err(|e| match e {
                    DecodeError::MalformedStructure(msg) => {
                        DecodeError::MalformedStructure(format!("key {idx}: {msg}"))
                    }
                    other => other,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Curve {
            keys,
            pre_wrap_mode: serialized.mode_pre_wrap,
            post_wrap_mode: serialized.mode_post_wrap,
        })
    }
}

impl SerializedCurve {
    /// Lift into a runtime curve for evaluation.
    pub fn to_curve(&self) -> Result<Curve, DecodeError> {
        Curve::try_from(self)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Vec4Repr {
    Seq([f64; 4]),
    Map { x: f64, y: f64, z: f64, w: f64 },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Vec2Repr {
    Seq([f64; 2]),
    Map { x: f64, y: f64 },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Vec2IntRepr {
    Seq([i32; 2]),
    Map { x: i32, y: i32 },
}

fn de_vec4<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[f64; 4], D::Error> {
    Ok(match Vec4Repr::deserialize(deserializer)? {
        Vec4Repr::Seq(v) => v,
        Vec4Repr::Map { x, y, z, w } => [x, y, z, w],
    })
}

fn de_vec2<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[f64; 2], D::Error> {
    Ok(match Vec2Repr::deserialize(deserializer)? {
        Vec2Repr::Seq(v) => v,
        Vec2Repr::Map { x, y } => [x, y],
    })
}

fn de_vec2_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[i32; 2], D::Error> {
    Ok(match Vec2IntRepr::deserialize(deserializer)? {
        Vec2IntRepr::Seq(v) => v,
        Vec2IntRepr::Map { x, y } => [x, y],
    })
}
