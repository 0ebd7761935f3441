//! Mathematical utilities: cubic segment interpolation.

pub mod spline;

pub use spline::*;
