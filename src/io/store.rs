//! Curve file tree access.
//!
//! Layout: `root/[category/]key.yaml`, one curve per file. The store knows
//! nothing about curve semantics beyond handing text to the codec.
//!
//! `save` is delete-then-write: a crash between the two steps leaves neither
//! the old nor the new file. Callers that need crash safety must write to a
//! temporary file and rename at a higher layer.

use std::ffi::OsStr;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::codec::{self, SerializedCurve};
use crate::domain::Curve;
use crate::error::CurveError;

/// Extension of curve files (without the dot).
pub const CURVE_EXTENSION: &str = "yaml";

/// A curve file discovered by [`CurveStore::list`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurveFile {
    pub category: Option<String>,
    pub key: String,
    pub path: PathBuf,
}

/// Accessor for a curve file tree rooted at one directory.
#[derive(Debug, Clone)]
pub struct CurveStore {
    root: PathBuf,
}

impl CurveStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Fail with [`CurveError::Configuration`] unless the root directory exists.
    pub fn require_root(&self) -> Result<(), CurveError> {
        if self.root.is_dir() {
            Ok(())
        } else {
            Err(CurveError::Configuration(self.root.clone()))
        }
    }

    pub fn category_dir(&self, category: Option<&str>) -> PathBuf {
        match category {
            Some(c) => self.root.join(c),
            None => self.root.clone(),
        }
    }

    pub fn path_for(&self, category: Option<&str>, key: &str) -> PathBuf {
        self.category_dir(category)
            .join(format!("{key}.{CURVE_EXTENSION}"))
    }

    /// Create one subdirectory per category (existing ones are left alone).
    ///
    /// The root is checked first so a missing root fails before anything is created.
    pub fn ensure_category_directories<'a>(
        &self,
        categories: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), CurveError> {
        self.require_root()?;
        for category in categories {
            let dir = self.root.join(category);
            fs::create_dir_all(&dir).map_err(|e| CurveError::io(&dir, e))?;
        }
        Ok(())
    }

    /// Lazily enumerate `*.yaml` files directly under `root/category` (or `root`).
    ///
    /// Non-recursive, in filesystem order. Callers that need a stable order
    /// must sort by key.
    pub fn list(&self, category: Option<&str>) -> Result<CurveFiles, CurveError> {
        let dir = self.category_dir(category);
        let entries = fs::read_dir(&dir).map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                CurveError::not_found(format!("Path doesn't exist: {}", dir.display()))
            }
            _ => CurveError::io(&dir, e),
        })?;
        Ok(CurveFiles {
            category: category.map(str::to_string),
            entries,
        })
    }
}

/// Iterator returned by [`CurveStore::list`].
#[derive(Debug)]
pub struct CurveFiles {
    category: Option<String>,
    entries: fs::ReadDir,
}

impl Iterator for CurveFiles {
    type Item = CurveFile;

    fn next(&mut self) -> Option<Self::Item> {
        for entry in self.entries.by_ref() {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("skipping unreadable directory entry: {e}");
                    continue;
                }
            };
            let path = entry.path();
            if path.extension() != Some(OsStr::new(CURVE_EXTENSION)) {
                continue;
            }
            match entry.file_type() {
                Ok(ft) if ft.is_file() => {}
                _ => continue,
            }
            let Some(key) = path.file_stem().and_then(OsStr::to_str) else {
                warn!("skipping curve file with a non UTF-8 name: {}", path.display());
                continue;
            };
            return Some(CurveFile {
                category: self.category.clone(),
                key: key.to_string(),
                path,
            });
        }
        None
    }
}

fn read_text(path: &Path) -> Result<String, CurveError> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => {
            CurveError::not_found(format!("Curve file not found: {}", path.display()))
        }
        _ => CurveError::io(path, e),
    })
}

/// Read and decode one curve file.
pub fn load(path: &Path) -> Result<Curve, CurveError> {
    let text = read_text(path)?;
    codec::decode(&text).map_err(|source| CurveError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_serialized(path: &Path) -> Result<SerializedCurve, CurveError> {
    let text = read_text(path)?;
    codec::decode_serialized(&text).map_err(|source| CurveError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Encode and write one curve, replacing any existing file.
pub fn save(path: &Path, curve: &Curve) -> Result<(), CurveError> {
    save_serialized(path, &SerializedCurve::from(curve))
}

pub fn save_serialized(path: &Path, curve: &SerializedCurve) -> Result<(), CurveError> {
    let text = codec::encode_serialized(curve)
        .map_err(|e| CurveError::io(path, std::io::Error::new(ErrorKind::InvalidData, e)))?;

    if path.exists() {
        fs::remove_file(path).map_err(|e| CurveError::io(path, e))?;
    }
    fs::write(path, text).map_err(|e| CurveError::io(path, e))?;
    debug!("wrote curve {}", path.display());
    Ok(())
}
