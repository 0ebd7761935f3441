//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - runtime curves (`Keyframe`, `Curve`, wrap/weighted modes)
//! - curve evaluation (`Curve::evaluate`)
//! - guidance inputs and the six guidance input types

pub mod curve;
pub mod types;

pub use types::*;
