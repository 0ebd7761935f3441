//! Write the optimal range table.
//!
//! One line per entry, tab-separated, no header:
//!
//! ```text
//! key<TAB>low<TAB>high
//! ```
//!
//! Numbers use the shortest representation that round-trips (`0.8`, `-1`, `0.99`).

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::analysis::OptimalRange;
use crate::error::CurveError;

#[derive(Debug, Clone, PartialEq)]
pub struct RangeRow {
    pub key: String,
    pub range: OptimalRange,
}

pub fn format_range_row(row: &RangeRow) -> String {
    format!("{}\t{}\t{}", row.key, row.range.low, row.range.high)
}

/// Write all rows to `path`, replacing any existing file.
pub fn write_range_table(path: &Path, rows: &[RangeRow]) -> Result<(), CurveError> {
    if path.exists() {
        fs::remove_file(path).map_err(|e| CurveError::io(path, e))?;
    }
    let file = File::create(path).map_err(|e| CurveError::io(path, e))?;
    let mut w = BufWriter::new(file);
    for row in rows {
        writeln!(w, "{}", format_range_row(row)).map_err(|e| CurveError::io(path, e))?;
    }
    w.flush().map_err(|e| CurveError::io(path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn rows_are_tab_separated_without_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("optimal_range_table.tsv");
        fs::write(&path, "stale contents that must go away\n").unwrap();

        let rows = vec![
            RangeRow {
                key: "wpn_a".to_string(),
                range: OptimalRange { low: 0.8, high: 0.99 },
            },
            RangeRow {
                key: "wpn_b".to_string(),
                range: OptimalRange { low: -1.0, high: 1.0 },
            },
        ];
        write_range_table(&path, &rows).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "wpn_a\t0.8\t0.99\nwpn_b\t-1\t1\n");
    }
}
