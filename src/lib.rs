//! `guidance-curves` library crate.
//!
//! The binary (`gcurve`) is a thin wrapper around this library so that:
//!
//! - the codec and sync pipeline are testable without spawning processes
//! - other tools (editor plugins, load-time patchers) can drive the same code
//!
//! Layout, leaf first: `codec` (curve ⇄ YAML), `io` (curve file tree, range
//! table), `analysis` (optimal range), `sync` (catalog ⇄ files), `app`
//! (caller-facing commands).

pub mod analysis;
pub mod app;
pub mod catalog;
pub mod cli;
pub mod codec;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod math;
pub mod report;
pub mod sync;
