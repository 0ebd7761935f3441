//! Command-line parsing for `gcurve`.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! catalog and curve code. Directory flags are optional: when absent the
//! resolved settings supply them.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::app::commands::Tuning;
use crate::config::LogVerbosity;
use crate::domain::InputType;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "gcurve", version, about = "Guidance and damage falloff curve exchange")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every subcommand.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Base directory holding settings.yaml and the default curve folders.
    #[arg(long, global = true, default_value = ".")]
    pub base: PathBuf,

    /// Catalog JSON file (overrides settings and GCURVE_CATALOG).
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Diagnostic logging level (RUST_LOG still wins).
    #[arg(long, global = true, value_enum)]
    pub log: Option<LogVerbosity>,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract all guidance input curves to <dir>/<InputType>/<key>.yaml.
    Extract(DirArgs),
    /// Extract all damage falloff curves to <dir>/<key>.yaml.
    ExtractFalloff(DirArgs),
    /// Read guidance curves back into the catalog.
    Inject(DirArgs),
    /// Read damage falloff curves back into the catalog.
    InjectFalloff(DirArgs),
    /// Use a curve, constant or line for one guidance input of an entry.
    Replace(ReplaceArgs),
    /// Print guidance data for an entry.
    Show(ShowArgs),
    /// Change one guidance tuning value of an entry.
    Tune(TuneArgs),
    /// Write the optimal range table for the damage falloff curves.
    RangeTable(RangeTableArgs),
    /// Write a seeded demo catalog.
    Sample(SampleArgs),
}

#[derive(Debug, Args, Clone)]
pub struct DirArgs {
    /// Curve directory (defaults to the configured one).
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ReplaceArgs {
    /// Catalog entry key.
    pub key: String,

    /// Guidance input to replace.
    #[arg(value_enum)]
    pub input: InputType,

    #[command(flatten)]
    pub value: ReplaceValue,

    /// Curve directory for --curve (defaults to the configured guidance directory).
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

/// Exactly one replacement value.
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct ReplaceValue {
    /// Load <dir>/<InputType>/<key>.yaml.
    #[arg(long)]
    pub curve: bool,

    /// Constant value.
    #[arg(long, allow_negative_numbers = true)]
    pub constant: Option<f64>,

    /// Straight line between two values.
    #[arg(long, num_args = 2, value_names = ["FROM", "TO"], allow_negative_numbers = true)]
    pub linear: Option<Vec<f64>>,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Catalog entry key.
    pub key: String,

    /// Apply curves from the guidance directory first, as the engine does at load.
    #[arg(long)]
    pub with_overrides: bool,
}

#[derive(Debug, Args)]
pub struct TuneArgs {
    /// Catalog entry key.
    pub key: String,

    #[command(subcommand)]
    pub tuning: Tuning,
}

#[derive(Debug, Args)]
pub struct RangeTableArgs {
    /// Damage falloff curve directory (defaults to the configured one).
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Output file (defaults to the configured range table path).
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct SampleArgs {
    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Number of entries to generate.
    #[arg(short = 'n', long, default_value_t = 24)]
    pub count: usize,

    /// Overwrite an existing catalog file.
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn replace_takes_one_value() {
        let cli = Cli::parse_from(["gcurve", "replace", "wpn_001", "steering", "--linear", "-1", "0.5"]);
        let Command::Replace(args) = cli.command else {
            panic!("expected replace");
        };
        assert_eq!(args.input, InputType::Steering);
        assert_eq!(args.value.linear, Some(vec![-1.0, 0.5]));
        assert!(!args.value.curve);

        let err = Cli::try_parse_from(["gcurve", "replace", "wpn_001", "steering", "--curve", "--constant", "1"]);
        assert!(err.is_err());
        assert!(Cli::try_parse_from(["gcurve", "replace", "wpn_001", "steering"]).is_err());
    }

    #[test]
    fn input_type_accepts_directory_names() {
        let cli = Cli::parse_from(["gcurve", "replace", "wpn_001", "InputTargetHeight", "--curve"]);
        let Command::Replace(args) = cli.command else {
            panic!("expected replace");
        };
        assert_eq!(args.input, InputType::TargetHeight);
    }

    #[test]
    fn tune_subcommands() {
        let cli = Cli::parse_from(["gcurve", "--base", "/mods/gc", "tune", "wpn_001", "steering-pid", "1", "0", "0.5"]);
        assert_eq!(cli.global.base, PathBuf::from("/mods/gc"));
        let Command::Tune(args) = cli.command else {
            panic!("expected tune");
        };
        assert_eq!(args.key, "wpn_001");
        assert_eq!(args.tuning, Tuning::SteeringPid { p: 1.0, i: 0.0, d: 0.5 });
    }
}
