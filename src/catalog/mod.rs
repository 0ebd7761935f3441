//! Catalog of simulation entries that carry guidance and damage-falloff data.
//!
//! The sync pipeline only sees the [`Catalog`] trait; [`MemoryCatalog`] is the
//! concrete store backed by a JSON file.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::codec::SerializedCurve;
use crate::domain::{GuidanceInput, InputType};

pub mod file;

pub use file::{MemoryCatalog, load_catalog, save_catalog};

/// Keyed access to catalog entries.
pub trait Catalog {
    fn entry(&self, key: &str) -> Option<&CatalogEntry>;
    fn entry_mut(&mut self, key: &str) -> Option<&mut CatalogEntry>;
    /// All entries with their keys.
    fn entries(&self) -> impl Iterator<Item = (&str, &CatalogEntry)>;
}

/// One catalog entry. Every block is optional.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guidance: Option<GuidanceData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub falloff: Option<FalloffData>,
    /// Named numeric stats (`wpn_speed`, `act_count`, ...).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub stats: BTreeMap<String, f64>,
}

impl CatalogEntry {
    pub fn stat(&self, name: &str) -> Option<f64> {
        self.stats.get(name).copied()
    }
}

/// PID controller gains.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pid {
    pub p: f64,
    pub i: f64,
    pub d: f64,
}

/// Guidance block: six input slots plus the physical tuning the inputs drive.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GuidanceData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_target_height: Option<GuidanceInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_target_blend: Option<GuidanceInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_target_update: Option<GuidanceInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_target_offset: Option<GuidanceInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_steering: Option<GuidanceInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_throttle: Option<GuidanceInput>,

    pub input_target_height_scale: f64,
    pub rigidbody_drag: f64,
    pub rigidbody_angular_drag: f64,
    pub driver_acceleration_force: f64,
    pub driver_steering_force: f64,
    pub driver_pitch_force: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steering_pid: Option<Pid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch_pid: Option<Pid>,
}

impl GuidanceData {
    pub fn input(&self, input_type: InputType) -> Option<&GuidanceInput> {
        match input_type {
            InputType::TargetHeight => self.input_target_height.as_ref(),
            InputType::TargetBlend => self.input_target_blend.as_ref(),
            InputType::TargetUpdate => self.input_target_update.as_ref(),
            InputType::TargetOffset => self.input_target_offset.as_ref(),
            InputType::Steering => self.input_steering.as_ref(),
            InputType::Throttle => self.input_throttle.as_ref(),
        }
    }

    pub fn input_mut(&mut self, input_type: InputType) -> &mut Option<GuidanceInput> {
        match input_type {
            InputType::TargetHeight => &mut self.input_target_height,
            InputType::TargetBlend => &mut self.input_target_blend,
            InputType::TargetUpdate => &mut self.input_target_update,
            InputType::TargetOffset => &mut self.input_target_offset,
            InputType::Steering => &mut self.input_steering,
            InputType::Throttle => &mut self.input_throttle,
        }
    }

    /// Input types whose slot currently holds a curve.
    pub fn curve_inputs(&self) -> Vec<InputType> {
        InputType::ALL
            .into_iter()
            .filter(|t| matches!(self.input(*t), Some(GuidanceInput::Curve(_))))
            .collect()
    }
}

/// Damage falloff block: a single curve over normalized range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FalloffData {
    #[serde(with = "crate::codec::json")]
    pub curve: SerializedCurve,
}
