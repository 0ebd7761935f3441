//! In-memory catalog with JSON persistence.
//!
//! The file is a single JSON object keyed by entry id:
//!
//! ```json
//! { "wpn_missile_01": { "guidance": { ... }, "falloff": { ... }, "stats": { ... } } }
//! ```

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Catalog, CatalogEntry};
use crate::error::CurveError;

/// BTreeMap-backed catalog; iteration is in key order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryCatalog {
    entries: BTreeMap<String, CatalogEntry>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, entry: CatalogEntry) -> Option<CatalogEntry> {
        self.entries.insert(key.into(), entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Catalog for MemoryCatalog {
    fn entry(&self, key: &str) -> Option<&CatalogEntry> {
        self.entries.get(key)
    }

    fn entry_mut(&mut self, key: &str) -> Option<&mut CatalogEntry> {
        self.entries.get_mut(key)
    }

    fn entries(&self) -> impl Iterator<Item = (&str, &CatalogEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, CatalogEntry)> for MemoryCatalog {
    fn from_iter<I: IntoIterator<Item = (String, CatalogEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Read a catalog JSON file.
pub fn load_catalog(path: &Path) -> Result<MemoryCatalog, CurveError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CurveError::not_found(format!("Catalog file not found: {}", path.display())),
        _ => CurveError::io(path, e),
    })?;
    let catalog: MemoryCatalog = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| CurveError::io(path, std::io::Error::from(e)))?;
    debug!("loaded {} catalog entries from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// Write a catalog JSON file (pretty-printed).
pub fn save_catalog(path: &Path, catalog: &MemoryCatalog) -> Result<(), CurveError> {
    let file = File::create(path).map_err(|e| CurveError::io(path, e))?;
    let mut w = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut w, catalog).map_err(|e| CurveError::io(path, std::io::Error::from(e)))?;
    w.write_all(b"\n").map_err(|e| CurveError::io(path, e))?;
    w.flush().map_err(|e| CurveError::io(path, e))?;
    Ok(())
}
