//! Runtime settings.
//!
//! Resolution order, lowest to highest precedence:
//! 1. built-in defaults under the base directory
//! 2. `settings.yaml` in the base directory (optional)
//! 3. `GCURVE_*` environment variables (a `.env` file is honoured)
//! 4. command-line flags (applied by the caller)

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use crate::error::{AppError, EXIT_CONFIG};

pub const SETTINGS_FILE: &str = "settings.yaml";

pub const ENV_GUIDANCE_DIR: &str = "GCURVE_GUIDANCE_DIR";
pub const ENV_FALLOFF_DIR: &str = "GCURVE_FALLOFF_DIR";
pub const ENV_CATALOG: &str = "GCURVE_CATALOG";
pub const ENV_RANGE_TABLE: &str = "GCURVE_RANGE_TABLE";

/// Diagnostic logging level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogVerbosity {
    /// Warnings and errors only.
    #[default]
    #[serde(alias = "none")]
    Off,
    /// Batch progress.
    System,
    /// Per-entry detail.
    All,
}

impl LogVerbosity {
    /// Default `EnvFilter` directive when `RUST_LOG` is unset.
    pub fn filter_directive(self) -> &'static str {
        match self {
            LogVerbosity::Off => "warn",
            LogVerbosity::System => "info",
            LogVerbosity::All => "debug",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub logging: LogVerbosity,
    #[serde(alias = "guidanceCurveDirectory")]
    pub guidance_curve_directory: PathBuf,
    #[serde(alias = "damageFalloffCurveDirectory")]
    pub damage_falloff_curve_directory: PathBuf,
    pub catalog: PathBuf,
    pub range_table: PathBuf,
    /// File the settings were read from; `None` when the built-in defaults
    /// are in use.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::with_base(Path::new(""))
    }
}

impl Settings {
    /// Defaults rooted at `base`.
    pub fn with_base(base: &Path) -> Self {
        Self {
            logging: LogVerbosity::Off,
            guidance_curve_directory: base.join("Curves").join("Guidance"),
            damage_falloff_curve_directory: base.join("Curves").join("Damage"),
            catalog: base.join("catalog.json"),
            range_table: base.join("optimal_range_table.tsv"),
            source: None,
        }
    }

    /// Read `base/settings.yaml`, falling back to defaults when it is absent.
    ///
    /// Relative paths in the file are taken relative to `base`.
    pub fn load(base: &Path) -> Result<Self, AppError> {
        let path = base.join(SETTINGS_FILE);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::with_base(base)),
            Err(e) => {
                return Err(AppError::new(
                    EXIT_CONFIG,
                    format!("Failed to read settings '{}': {e}", path.display()),
                ));
            }
        };

        let mut settings: Settings = serde_yaml::from_str::<Option<Settings>>(&text)
            .map_err(|e| AppError::new(EXIT_CONFIG, format!("Invalid settings '{}': {e}", path.display())))?
            .unwrap_or_else(|| Self::with_base(base));
        settings.rebase(base);
        settings.source = Some(path);
        Ok(settings)
    }

    /// Load from `base`, then apply environment overrides.
    pub fn resolve(base: &Path) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let mut settings = Self::load(base)?;
        settings.apply_env(|name| std::env::var(name).ok());
        Ok(settings)
    }

    /// Apply `GCURVE_*` overrides from `lookup` (empty values are ignored).
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty()).map(PathBuf::from);
        if let Some(p) = var(ENV_GUIDANCE_DIR) {
            self.guidance_curve_directory = p;
        }
        if let Some(p) = var(ENV_FALLOFF_DIR) {
            self.damage_falloff_curve_directory = p;
        }
        if let Some(p) = var(ENV_CATALOG) {
            self.catalog = p;
        }
        if let Some(p) = var(ENV_RANGE_TABLE) {
            self.range_table = p;
        }
    }

    fn rebase(&mut self, base: &Path) {
        for p in [
            &mut self.guidance_curve_directory,
            &mut self.damage_falloff_curve_directory,
            &mut self.catalog,
            &mut self.range_table,
        ] {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let s = Settings::load(dir.path()).unwrap();
        assert_eq!(s, Settings::with_base(dir.path()));
        assert_eq!(s.guidance_curve_directory, dir.path().join("Curves/Guidance"));
        assert_eq!(s.logging, LogVerbosity::Off);
        assert_eq!(s.source, None);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(SETTINGS_FILE),
            "logging: system\nguidanceCurveDirectory: custom/guidance\n",
        )
        .unwrap();

        let s = Settings::load(dir.path()).unwrap();
        assert_eq!(s.logging, LogVerbosity::System);
        assert_eq!(s.guidance_curve_directory, dir.path().join("custom/guidance"));
        assert!(s.damage_falloff_curve_directory.ends_with("Curves/Damage"));
        assert!(s.catalog.ends_with("catalog.json"));
        assert_eq!(s.source, Some(dir.path().join(SETTINGS_FILE)));
    }

    #[test]
    fn empty_file_still_records_source() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(SETTINGS_FILE), "").unwrap();
        let s = Settings::load(dir.path()).unwrap();
        assert_eq!(s.catalog, dir.path().join("catalog.json"));
        assert_eq!(s.source, Some(dir.path().join(SETTINGS_FILE)));
    }

    #[test]
    fn invalid_file_is_config_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(SETTINGS_FILE), "logging: [loud\n").unwrap();
        let err = Settings::load(dir.path()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn env_overrides_paths() {
        let vars: HashMap<&str, &str> = [(ENV_CATALOG, "/tmp/other.json"), (ENV_FALLOFF_DIR, "  ")]
            .into_iter()
            .collect();
        let mut s = Settings::with_base(Path::new("/base"));
        s.apply_env(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(s.catalog, PathBuf::from("/tmp/other.json"));
        assert_eq!(s.damage_falloff_curve_directory, Path::new("/base/Curves/Damage"));
        assert_eq!(s.guidance_curve_directory, Path::new("/base/Curves/Guidance"));
    }

    #[test]
    fn verbosity_maps_to_filter() {
        assert_eq!(LogVerbosity::Off.filter_directive(), "warn");
        assert_eq!(LogVerbosity::All.filter_directive(), "debug");
    }
}
