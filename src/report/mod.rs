//! Reporting utilities: batch results and formatted terminal output.

use std::path::PathBuf;

use crate::io::RangeRow;
use crate::sync::SyncFailure;

pub mod format;

pub use format::*;

/// Outcome of writing the optimal range table.
#[derive(Debug)]
pub struct RangeTableReport {
    pub output: PathBuf,
    pub rows: Vec<RangeRow>,
    pub skipped: Vec<SyncFailure>,
}
