//! Demo data for running the tool without engine exports.

pub mod sample;

pub use sample::{generate_catalog, random_curve, random_falloff};
