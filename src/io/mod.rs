//! Input/output helpers.
//!
//! - curve file tree access (`store`)
//! - optimal range table export (`range_table`)

pub mod range_table;
pub mod store;

pub use range_table::*;
pub use store::*;
