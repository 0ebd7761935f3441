//! Derived metrics computed from evaluated curves.

pub mod range;

pub use range::*;
