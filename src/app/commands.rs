//! Caller-facing operations.
//!
//! Each function takes its context explicitly (catalog, directories) and
//! returns a report or a message; printing is left to the caller.

use std::path::{Path, PathBuf};

use clap::Subcommand;
use tracing::{info, warn};

use crate::analysis::compute_optimal_range;
use crate::catalog::{Catalog, CatalogEntry, GuidanceData, Pid};
use crate::domain::{GuidanceInput, InputType};
use crate::error::CurveError;
use crate::io::{CURVE_EXTENSION, CurveStore, RangeRow, load, load_serialized, write_range_table};
use crate::report::{RangeTableReport, format_guidance_data};
use crate::sync::{ExtractReport, FALLOFF_FIELD, GUIDANCE_FIELDS, InjectReport, SyncFailure, extract, inject};

/// Write every guidance curve to `root/<InputType>/<key>.yaml`.
pub fn extract_guidance<C: Catalog>(catalog: &C, root: &Path) -> Result<ExtractReport, CurveError> {
    extract(catalog, &GUIDANCE_FIELDS, root)
}

/// Write every damage falloff curve to `root/<key>.yaml`.
pub fn extract_falloff<C: Catalog>(catalog: &C, root: &Path) -> Result<ExtractReport, CurveError> {
    extract(catalog, &[FALLOFF_FIELD], root)
}

pub fn inject_guidance<C: Catalog>(catalog: &mut C, root: &Path) -> Result<InjectReport, CurveError> {
    inject(catalog, &GUIDANCE_FIELDS, root)
}

pub fn inject_falloff<C: Catalog>(catalog: &mut C, root: &Path) -> Result<InjectReport, CurveError> {
    inject(catalog, &[FALLOFF_FIELD], root)
}

/// Load-time patch: inject guidance curves if the directory exists.
///
/// A missing directory is not an error here; it means no overrides are
/// installed. Returns `None` in that case.
pub fn apply_guidance_overrides<C: Catalog>(
    catalog: &mut C,
    root: &Path,
) -> Result<Option<InjectReport>, CurveError> {
    if !root.is_dir() {
        info!("no guidance overrides at {}", root.display());
        return Ok(None);
    }
    inject_guidance(catalog, root).map(Some)
}

fn entry_mut<'a, C: Catalog>(catalog: &'a mut C, key: &str) -> Result<&'a mut CatalogEntry, CurveError> {
    catalog
        .entry_mut(key)
        .ok_or_else(|| CurveError::not_found(format!("Unable to find catalog entry: {key}")))
}

fn guidance_of<'a>(entry: &'a mut CatalogEntry, key: &str) -> Result<&'a mut GuidanceData, CurveError> {
    entry
        .guidance
        .as_mut()
        .ok_or_else(|| CurveError::not_found(format!("No guidance data on subsystem {key}")))
}

fn guidance_mut<'a, C: Catalog>(catalog: &'a mut C, key: &str) -> Result<&'a mut GuidanceData, CurveError> {
    guidance_of(entry_mut(catalog, key)?, key)
}

fn existing_category_dir(root: &Path, input_type: InputType) -> Result<PathBuf, CurveError> {
    let dir = CurveStore::new(root).category_dir(Some(input_type.dir_name()));
    if dir.is_dir() {
        Ok(dir)
    } else {
        Err(CurveError::not_found(format!("Path doesn't exist: {}", dir.display())))
    }
}

/// Store `input` in one guidance slot of entry `key`.
pub fn replace_guidance_input<C: Catalog>(
    catalog: &mut C,
    key: &str,
    input_type: InputType,
    input: GuidanceInput,
) -> Result<String, CurveError> {
    let kind = input.kind_name();
    let is_curve = matches!(input, GuidanceInput::Curve(_));
    let gd = guidance_mut(catalog, key)?;
    *gd.input_mut(input_type) = Some(input);
    info!("{key}: {} set to {kind}", input_type.label());

    Ok(if is_curve {
        format!("{} curve updated on {key}", input_type.dir_name())
    } else {
        format!("{} updated on {key}", input_type.dir_name())
    })
}

/// Read the replacement curve for `key` from `root/<InputType>/<key>.yaml`.
///
/// The category directory is checked before the file so the two failures
/// report different paths.
pub fn load_replacement_curve(root: &Path, key: &str, input_type: InputType) -> Result<GuidanceInput, CurveError> {
    let dir = existing_category_dir(root, input_type)?;
    let curve = load_serialized(&dir.join(format!("{key}.{CURVE_EXTENSION}")))?;
    Ok(GuidanceInput::Curve(curve))
}

/// Replace one guidance slot with the curve stored on disk for `key`.
///
/// Checks run in order: category directory, catalog entry, curve file.
pub fn replace_guidance_curve_from_file<C: Catalog>(
    catalog: &mut C,
    root: &Path,
    key: &str,
    input_type: InputType,
) -> Result<String, CurveError> {
    existing_category_dir(root, input_type)?;
    guidance_mut(catalog, key)?;
    let input = load_replacement_curve(root, key, input_type)?;
    replace_guidance_input(catalog, key, input_type, input)
}

/// Compute the optimal range of every falloff curve under `input_dir` and
/// write the table to `output`.
///
/// Rows are in key order. Unreadable files are skipped and reported.
pub fn compute_range_table(input_dir: &Path, output: &Path) -> Result<RangeTableReport, CurveError> {
    let store = CurveStore::new(input_dir);
    store.require_root()?;

    let mut files: Vec<_> = store.list(None)?.collect();
    files.sort_by(|a, b| a.key.cmp(&b.key));

    let mut rows = Vec::with_capacity(files.len());
    let mut skipped = Vec::new();
    for file in files {
        match load(&file.path) {
            Ok(curve) => rows.push(RangeRow {
                range: compute_optimal_range(&curve),
                key: file.key,
            }),
            Err(error) => {
                warn!("skipping {}: {error}", file.path.display());
                skipped.push(SyncFailure {
                    key: file.key,
                    field: FALLOFF_FIELD,
                    path: file.path,
                    error,
                });
            }
        }
    }

    write_range_table(output, &rows)?;
    info!("wrote {} range row(s) to {}", rows.len(), output.display());
    Ok(RangeTableReport {
        output: PathBuf::from(output),
        rows,
        skipped,
    })
}

/// Guidance data summary for entry `key`.
pub fn show<C: Catalog>(catalog: &C, key: &str) -> Result<String, CurveError> {
    let entry = catalog
        .entry(key)
        .ok_or_else(|| CurveError::not_found(format!("Unable to find catalog entry: {key}")))?;
    let gd = entry
        .guidance
        .as_ref()
        .ok_or_else(|| CurveError::not_found(format!("No guidance data on subsystem {key}")))?;
    Ok(format_guidance_data(key, entry, gd))
}

/// One tuning change applied by [`tune`].
#[derive(Debug, Clone, Copy, PartialEq, Subcommand)]
pub enum Tuning {
    /// Projectile speed (`wpn_speed` stat, created if absent).
    Speed {
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
    /// Throttle (acceleration) force.
    ThrottleForce {
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
    /// Linear drag.
    Drag {
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
    /// Angular drag.
    AngularDrag {
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
    SteeringForce {
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
    PitchForce {
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
    /// Steering PID gains (created if absent).
    SteeringPid {
        #[arg(allow_negative_numbers = true)]
        p: f64,
        #[arg(allow_negative_numbers = true)]
        i: f64,
        #[arg(allow_negative_numbers = true)]
        d: f64,
    },
    /// Pitch PID gains (created if absent).
    PitchPid {
        #[arg(allow_negative_numbers = true)]
        p: f64,
        #[arg(allow_negative_numbers = true)]
        i: f64,
        #[arg(allow_negative_numbers = true)]
        d: f64,
    },
    /// Target height scale.
    TargetHeight {
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
}

/// Apply one tuning change to entry `key` and describe it.
pub fn tune<C: Catalog>(catalog: &mut C, key: &str, tuning: Tuning) -> Result<String, CurveError> {
    let entry = entry_mut(catalog, key)?;
    let message = match tuning {
        Tuning::Speed { value } => {
            entry.stats.insert("wpn_speed".to_string(), value);
            format!("{key} wpn_speed: {value}")
        }
        Tuning::ThrottleForce { value } => {
            guidance_of(entry, key)?.driver_acceleration_force = value;
            format!("{key} acceleration force: {value}")
        }
        Tuning::Drag { value } => {
            guidance_of(entry, key)?.rigidbody_drag = value;
            format!("{key} drag: {value}")
        }
        Tuning::AngularDrag { value } => {
            guidance_of(entry, key)?.rigidbody_angular_drag = value;
            format!("{key} angular drag: {value}")
        }
        Tuning::SteeringForce { value } => {
            guidance_of(entry, key)?.driver_steering_force = value;
            format!("{key} steering force: {value}")
        }
        Tuning::PitchForce { value } => {
            guidance_of(entry, key)?.driver_pitch_force = value;
            format!("{key} pitch force: {value}")
        }
        Tuning::SteeringPid { p, i, d } => {
            guidance_of(entry, key)?.steering_pid = Some(Pid { p, i, d });
            format!("{key} steering PID: {p}/{i}/{d}")
        }
        Tuning::PitchPid { p, i, d } => {
            guidance_of(entry, key)?.pitch_pid = Some(Pid { p, i, d });
            format!("{key} pitch PID: {p}/{i}/{d}")
        }
        Tuning::TargetHeight { value } => {
            guidance_of(entry, key)?.input_target_height_scale = value;
            format!("{key} target height: {value}")
        }
    };
    info!("{message}");
    Ok(message)
}
