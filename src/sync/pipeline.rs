//! Batch extraction (catalog → files) and injection (files → catalog).
//!
//! Only a missing root aborts a call. Every other failure is logged, recorded
//! in the report, and the batch moves on to the next file or entry.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::fields::Field;
use crate::catalog::{Catalog, CatalogEntry};
use crate::codec::SerializedCurve;
use crate::domain::GuidanceInput;
use crate::error::CurveError;
use crate::io::{CurveFile, CurveStore, load_serialized, save_serialized};

/// A curve file written by [`extract`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Written {
    pub key: String,
    pub field: Field,
    pub path: PathBuf,
}

/// A curve file whose contents were stored on the catalog by [`inject`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub key: String,
    pub field: Field,
    pub path: PathBuf,
}

/// One entry or file that was skipped.
#[derive(Debug)]
pub struct SyncFailure {
    pub key: String,
    pub field: Field,
    pub path: PathBuf,
    pub error: CurveError,
}

/// A field whose category directory could not be listed.
#[derive(Debug)]
pub struct CategoryFailure {
    pub field: Field,
    pub error: CurveError,
}

#[derive(Debug, Default)]
pub struct ExtractReport {
    pub written: Vec<Written>,
    pub failures: Vec<SyncFailure>,
}

#[derive(Debug, Default)]
pub struct InjectReport {
    pub applied: Vec<Applied>,
    pub skipped: Vec<SyncFailure>,
    pub missing_categories: Vec<CategoryFailure>,
}

impl InjectReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.missing_categories.is_empty()
    }
}

/// Write every curve-valued field of every entry to `root/[category/]key.yaml`.
///
/// Constant and linear inputs have no file form and are left out.
pub fn extract<C: Catalog>(
    catalog: &C,
    fields: &[Field],
    root: &Path,
) -> Result<ExtractReport, CurveError> {
    let store = CurveStore::new(root);
    store.ensure_category_directories(fields.iter().filter_map(Field::category))?;

    let mut report = ExtractReport::default();
    for (key, entry) in catalog.entries() {
        for field in fields {
            let Some(input) = field.get(entry) else {
                continue;
            };
            let curve = match input {
                GuidanceInput::Curve(curve) => curve,
                other => {
                    debug!("{key}: {} is {}, nothing to write", field.name(), other.kind_name());
                    continue;
                }
            };

            let path = store.path_for(field.category(), key);
            match save_serialized(&path, &curve) {
                Ok(()) => report.written.push(Written {
                    key: key.to_string(),
                    field: *field,
                    path,
                }),
                Err(error) => {
                    warn!("{key}: failed to write {} curve: {error}", field.name());
                    report.failures.push(SyncFailure {
                        key: key.to_string(),
                        field: *field,
                        path,
                        error,
                    });
                }
            }
        }
    }

    info!(
        "extracted {} curve(s) to {} ({} failure(s))",
        report.written.len(),
        root.display(),
        report.failures.len()
    );
    Ok(report)
}

/// Read curve files back onto matching catalog entries.
///
/// Files are visited in key order within each field. A file whose key has no
/// entry, whose entry lacks the field's block, or whose contents do not
/// decode is skipped.
pub fn inject<C: Catalog>(
    catalog: &mut C,
    fields: &[Field],
    root: &Path,
) -> Result<InjectReport, CurveError> {
    let store = CurveStore::new(root);
    store.require_root()?;

    let mut report = InjectReport::default();
    for field in fields {
        let mut files: Vec<CurveFile> = match store.list(field.category()) {
            Ok(files) => files.collect(),
            Err(error) => {
                warn!("skipping {}: {error}", field.name());
                report.missing_categories.push(CategoryFailure { field: *field, error });
                continue;
            }
        };
        files.sort_by(|a, b| a.key.cmp(&b.key));

        for file in files {
            match inject_file(catalog, field, &file) {
                Ok(()) => {
                    debug!("{}: applied {} curve", file.key, field.name());
                    report.applied.push(Applied {
                        key: file.key,
                        field: *field,
                        path: file.path,
                    });
                }
                Err(error) => {
                    warn!("skipping {}: {error}", file.path.display());
                    report.skipped.push(SyncFailure {
                        key: file.key,
                        field: *field,
                        path: file.path,
                        error,
                    });
                }
            }
        }
    }

    info!(
        "injected {} curve(s) from {} ({} skipped)",
        report.applied.len(),
        root.display(),
        report.skipped.len()
    );
    Ok(report)
}

fn inject_file<C: Catalog>(catalog: &mut C, field: &Field, file: &CurveFile) -> Result<(), CurveError> {
    let entry = catalog
        .entry_mut(&file.key)
        .ok_or_else(|| CurveError::not_found(format!("Unable to find catalog entry: {}", file.key)))?;
    if !field.accepts(entry) {
        return Err(missing_block(field, &file.key));
    }

    let curve = load_serialized(&file.path)?;
    store_curve(field, entry, &file.key, curve)
}

/// Hand a decoded curve to the field. A refused write is an error so the
/// file is never reported as applied when nothing was stored.
fn store_curve(
    field: &Field,
    entry: &mut CatalogEntry,
    key: &str,
    curve: SerializedCurve,
) -> Result<(), CurveError> {
    if field.set(entry, GuidanceInput::Curve(curve)) {
        Ok(())
    } else {
        Err(missing_block(field, key))
    }
}

fn missing_block(field: &Field, key: &str) -> CurveError {
    CurveError::not_found(format!("Entry {key} has no {} data", field.block_name()))
}
