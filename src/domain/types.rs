//! Shared domain types.
//!
//! These types are kept lightweight so they can be:
//!
//! - evaluated in memory (range analysis, `gcurve show`)
//! - lowered to the serialized curve layout for disk
//! - embedded in catalog entries as guidance inputs

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::codec::SerializedCurve;

/// Weight used by the engine for keys that do not carry explicit weights.
pub const DEFAULT_WEIGHT: f64 = 1.0 / 3.0;

/// Curve behavior outside the time range covered by its keys.
///
/// The engine also writes `Once` and `ClampForever`; both clamp, so they are
/// read as [`WrapMode::Clamp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WrapMode {
    #[default]
    Default,
    #[serde(alias = "Once", alias = "ClampForever")]
    Clamp,
    Loop,
    PingPong,
}

/// Which of a key's in/out weights are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeightedMode {
    #[default]
    None,
    In,
    Out,
    Both,
}

impl WeightedMode {
    pub fn as_i32(self) -> i32 {
        match self {
            WeightedMode::None => 0,
            WeightedMode::In => 1,
            WeightedMode::Out => 2,
            WeightedMode::Both => 3,
        }
    }

    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(WeightedMode::None),
            1 => Some(WeightedMode::In),
            2 => Some(WeightedMode::Out),
            3 => Some(WeightedMode::Both),
            _ => None,
        }
    }

    pub fn has_in(self) -> bool {
        matches!(self, WeightedMode::In | WeightedMode::Both)
    }

    pub fn has_out(self) -> bool {
        matches!(self, WeightedMode::Out | WeightedMode::Both)
    }
}

/// One control point of a piecewise-cubic curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    pub time: f64,
    pub value: f64,
    pub in_tangent: f64,
    pub out_tangent: f64,
    pub in_weight: f64,
    pub out_weight: f64,
    /// Engine-defined bitmask, carried through untouched.
    pub tangent_mode: i32,
    pub weighted_mode: WeightedMode,
}

impl Keyframe {
    /// Flat key with default weights.
    pub fn new(time: f64, value: f64) -> Self {
        Self {
            time,
            value,
            in_tangent: 0.0,
            out_tangent: 0.0,
            in_weight: DEFAULT_WEIGHT,
            out_weight: DEFAULT_WEIGHT,
            tangent_mode: 0,
            weighted_mode: WeightedMode::None,
        }
    }

    pub fn with_tangents(mut self, in_tangent: f64, out_tangent: f64) -> Self {
        self.in_tangent = in_tangent;
        self.out_tangent = out_tangent;
        self
    }

    pub fn with_weights(mut self, in_weight: f64, out_weight: f64, mode: WeightedMode) -> Self {
        self.in_weight = in_weight;
        self.out_weight = out_weight;
        self.weighted_mode = mode;
        self
    }
}

/// Ordered keys plus wrap modes. Key order is significant and never re-sorted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Curve {
    pub keys: Vec<Keyframe>,
    pub pre_wrap_mode: WrapMode,
    pub post_wrap_mode: WrapMode,
}

impl Curve {
    pub fn new(keys: Vec<Keyframe>) -> Self {
        Self {
            keys,
            pre_wrap_mode: WrapMode::Clamp,
            post_wrap_mode: WrapMode::Clamp,
        }
    }

    /// Flat curve at `value` over `t ∈ [0, 1]`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![Keyframe::new(0.0, value), Keyframe::new(1.0, value)])
    }

    /// Straight line from `from` at `t = 0` to `to` at `t = 1`.
    pub fn linear(from: f64, to: f64) -> Self {
        let slope = to - from;
        Self::new(vec![
            Keyframe::new(0.0, from).with_tangents(slope, slope),
            Keyframe::new(1.0, to).with_tangents(slope, slope),
        ])
    }

    /// Fallback used when a curve payload is missing: 1 at `t = 0` down to 0 at `t = 1`.
    pub fn default_falloff() -> Self {
        Self::linear(1.0, 0.0)
    }

    pub fn with_wrap_modes(mut self, pre: WrapMode, post: WrapMode) -> Self {
        self.pre_wrap_mode = pre;
        self.post_wrap_mode = post;
        self
    }
}

/// The six guidance input slots on a guidance block.
///
/// The directory name is the on-disk category for the slot's curve files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum)]
pub enum InputType {
    #[value(name = "target-height", alias = "InputTargetHeight")]
    TargetHeight,
    #[value(name = "target-blend", alias = "InputTargetBlend")]
    TargetBlend,
    #[value(name = "target-update", alias = "InputTargetUpdate")]
    TargetUpdate,
    #[value(name = "target-offset", alias = "InputTargetOffset")]
    TargetOffset,
    #[value(name = "steering", alias = "InputSteering")]
    Steering,
    #[value(name = "throttle", alias = "InputThrottle")]
    Throttle,
}

impl InputType {
    pub const ALL: [InputType; 6] = [
        InputType::TargetHeight,
        InputType::TargetBlend,
        InputType::TargetUpdate,
        InputType::TargetOffset,
        InputType::Steering,
        InputType::Throttle,
    ];

    /// Category directory name, e.g. `InputSteering`.
    pub fn dir_name(self) -> &'static str {
        match self {
            InputType::TargetHeight => "InputTargetHeight",
            InputType::TargetBlend => "InputTargetBlend",
            InputType::TargetUpdate => "InputTargetUpdate",
            InputType::TargetOffset => "InputTargetOffset",
            InputType::Steering => "InputSteering",
            InputType::Throttle => "InputThrottle",
        }
    }

    /// Human-readable label for terminal output.
    pub fn label(self) -> &'static str {
        match self {
            InputType::TargetHeight => "target height",
            InputType::TargetBlend => "target blend",
            InputType::TargetUpdate => "target update",
            InputType::TargetOffset => "target offset",
            InputType::Steering => "steering",
            InputType::Throttle => "throttle",
        }
    }

    pub fn from_dir_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.dir_name() == name)
    }
}

/// Value held by one guidance input slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuidanceInput {
    Constant(f64),
    Linear { from: f64, to: f64 },
    Curve(#[serde(with = "crate::codec::json")] SerializedCurve),
}

impl GuidanceInput {
    /// Only curve inputs have a file representation.
    pub fn as_curve(&self) -> Option<&SerializedCurve> {
        match self {
            GuidanceInput::Curve(curve) => Some(curve),
            GuidanceInput::Constant(_) | GuidanceInput::Linear { .. } => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            GuidanceInput::Constant(_) => "constant",
            GuidanceInput::Linear { .. } => "linear",
            GuidanceInput::Curve(_) => "curve",
        }
    }
}

impl From<&Curve> for GuidanceInput {
    fn from(curve: &Curve) -> Self {
        GuidanceInput::Curve(SerializedCurve::from(curve))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weighted_mode_int_mapping() {
        for mode in [WeightedMode::None, WeightedMode::In, WeightedMode::Out, WeightedMode::Both] {
            assert_eq!(WeightedMode::from_i32(mode.as_i32()), Some(mode));
        }
        assert_eq!(WeightedMode::from_i32(4), None);
        assert!(WeightedMode::Both.has_in() && WeightedMode::Both.has_out());
        assert!(!WeightedMode::In.has_out());
    }

    #[test]
    fn input_type_dir_names_round_trip() {
        for t in InputType::ALL {
            assert_eq!(InputType::from_dir_name(t.dir_name()), Some(t));
        }
        assert_eq!(InputType::from_dir_name("InputBogus"), None);
    }

    #[test]
    fn guidance_input_json_shape() {
        let json = serde_json::to_string(&GuidanceInput::Linear { from: 0.5, to: 1.0 }).unwrap();
        assert_eq!(json, r#"{"linear":{"from":0.5,"to":1.0}}"#);
        let back: GuidanceInput = serde_json::from_str(r#"{"constant":0.25}"#).unwrap();
        assert_eq!(back, GuidanceInput::Constant(0.25));
        assert!(back.as_curve().is_none());
    }
}
