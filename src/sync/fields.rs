//! Named accessors over catalog entries.
//!
//! A [`Field`] ties one value slot on an entry to the directory its curve
//! files live in. The guidance set is fixed at six fields; damage falloff is
//! a single field whose files sit directly under the root.

use std::fmt;

use tracing::debug;

use crate::catalog::{CatalogEntry, FalloffData};
use crate::domain::{GuidanceInput, InputType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Slot {
    Guidance(InputType),
    Falloff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Field {
    slot: Slot,
}

pub const GUIDANCE_FIELDS: [Field; 6] = [
    Field::guidance(InputType::TargetHeight),
    Field::guidance(InputType::TargetBlend),
    Field::guidance(InputType::TargetUpdate),
    Field::guidance(InputType::TargetOffset),
    Field::guidance(InputType::Steering),
    Field::guidance(InputType::Throttle),
];

pub const FALLOFF_FIELD: Field = Field { slot: Slot::Falloff };

impl Field {
    pub const fn guidance(input_type: InputType) -> Self {
        Self {
            slot: Slot::Guidance(input_type),
        }
    }

    pub fn name(&self) -> &'static str {
        match self.slot {
            Slot::Guidance(t) => t.label(),
            Slot::Falloff => "damage falloff",
        }
    }

    /// Subdirectory under the root, `None` for files stored at the root.
    pub fn category(&self) -> Option<&'static str> {
        match self.slot {
            Slot::Guidance(t) => Some(t.dir_name()),
            Slot::Falloff => None,
        }
    }

    pub fn input_type(&self) -> Option<InputType> {
        match self.slot {
            Slot::Guidance(t) => Some(t),
            Slot::Falloff => None,
        }
    }

    /// Name of the block this field lives in.
    pub fn block_name(&self) -> &'static str {
        match self.slot {
            Slot::Guidance(_) => "guidance",
            Slot::Falloff => "falloff",
        }
    }

    /// True when the entry owns the block this field lives in.
    pub fn accepts(&self, entry: &CatalogEntry) -> bool {
        match self.slot {
            Slot::Guidance(_) => entry.guidance.is_some(),
            Slot::Falloff => entry.falloff.is_some(),
        }
    }

    pub fn get(&self, entry: &CatalogEntry) -> Option<GuidanceInput> {
        match self.slot {
            Slot::Guidance(t) => entry.guidance.as_ref()?.input(t).cloned(),
            Slot::Falloff => entry
                .falloff
                .as_ref()
                .map(|f| GuidanceInput::Curve(f.curve.clone())),
        }
    }

    /// Store `input` on the entry. Returns false when nothing was stored:
    /// the block is absent, or a non-curve value was offered to the falloff
    /// slot.
    pub fn set(&self, entry: &mut CatalogEntry, input: GuidanceInput) -> bool {
        match self.slot {
            Slot::Guidance(t) => match entry.guidance.as_mut() {
                Some(g) => {
                    *g.input_mut(t) = Some(input);
                    true
                }
                None => false,
            },
            Slot::Falloff => {
                let Some(falloff) = entry.falloff.as_mut() else {
                    return false;
                };
                match input {
                    GuidanceInput::Curve(curve) => {
                        *falloff = FalloffData { curve };
                        true
                    }
                    other => {
                        debug!("falloff only holds curves, ignoring {} input", other.kind_name());
                        false
                    }
                }
            }
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.category() {
            Some(category) => f.write_str(category),
            None => f.write_str("Falloff"),
        }
    }
}
