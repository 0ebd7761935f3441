//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - resolves settings (file, environment, flags) and starts logging
//! - loads the catalog, runs one command, saves the catalog if it changed
//! - prints the command's report

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::{debug, info};

use crate::catalog::{MemoryCatalog, load_catalog, save_catalog};
use crate::cli::{Cli, Command, DirArgs, RangeTableArgs, ReplaceArgs, SampleArgs, ShowArgs, TuneArgs};
use crate::config::Settings;
use crate::domain::GuidanceInput;
use crate::error::{AppError, EXIT_CONFIG};
use crate::report;

pub mod commands;

/// Entry point for the `gcurve` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    let mut settings = Settings::resolve(&cli.global.base)?;
    if let Some(catalog) = &cli.global.catalog {
        settings.catalog = catalog.clone();
    }
    if let Some(level) = cli.global.log {
        settings.logging = level;
    }
    crate::logging::init(settings.logging);
    match &settings.source {
        Some(path) => info!("settings loaded from {}", path.display()),
        None => info!("no settings file found, using defaults"),
    }
    debug!("settings: {settings:?}");

    match cli.command {
        Command::Extract(args) => handle_extract(&settings, &args, Target::Guidance),
        Command::ExtractFalloff(args) => handle_extract(&settings, &args, Target::Falloff),
        Command::Inject(args) => handle_inject(&settings, &args, Target::Guidance),
        Command::InjectFalloff(args) => handle_inject(&settings, &args, Target::Falloff),
        Command::Replace(args) => handle_replace(&settings, args),
        Command::Show(args) => handle_show(&settings, &args),
        Command::Tune(args) => handle_tune(&settings, args),
        Command::RangeTable(args) => handle_range_table(&settings, &args),
        Command::Sample(args) => handle_sample(&settings, &args),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Guidance,
    Falloff,
}

impl Target {
    fn default_dir(self, settings: &Settings) -> &Path {
        match self {
            Target::Guidance => &settings.guidance_curve_directory,
            Target::Falloff => &settings.damage_falloff_curve_directory,
        }
    }
}

fn dir_or(flag: &Option<PathBuf>, default: &Path) -> PathBuf {
    flag.clone().unwrap_or_else(|| default.to_path_buf())
}

fn handle_extract(settings: &Settings, args: &DirArgs, target: Target) -> Result<(), AppError> {
    let catalog = load_catalog(&settings.catalog)?;
    let root = dir_or(&args.dir, target.default_dir(settings));

    let text = match target {
        Target::Guidance => report::format_extract_guidance(&commands::extract_guidance(&catalog, &root)?),
        Target::Falloff => report::format_extract_falloff(&commands::extract_falloff(&catalog, &root)?),
    };
    print!("{text}");
    Ok(())
}

fn handle_inject(settings: &Settings, args: &DirArgs, target: Target) -> Result<(), AppError> {
    let mut catalog = load_catalog(&settings.catalog)?;
    let root = dir_or(&args.dir, target.default_dir(settings));

    let report = match target {
        Target::Guidance => commands::inject_guidance(&mut catalog, &root)?,
        Target::Falloff => commands::inject_falloff(&mut catalog, &root)?,
    };
    if !report.applied.is_empty() {
        save_catalog(&settings.catalog, &catalog)?;
    }
    print!("{}", report::format_inject(&report, &root));
    Ok(())
}

fn handle_replace(settings: &Settings, args: ReplaceArgs) -> Result<(), AppError> {
    let mut catalog = load_catalog(&settings.catalog)?;

    let message = if args.value.curve {
        let root = dir_or(&args.dir, &settings.guidance_curve_directory);
        commands::replace_guidance_curve_from_file(&mut catalog, &root, &args.key, args.input)?
    } else {
        let input = match (args.value.constant, args.value.linear.as_deref()) {
            (Some(value), _) => GuidanceInput::Constant(value),
            (None, Some(&[from, to])) => GuidanceInput::Linear { from, to },
            _ => return Err(AppError::new(EXIT_CONFIG, "Specify --curve, --constant or --linear FROM TO.")),
        };
        commands::replace_guidance_input(&mut catalog, &args.key, args.input, input)?
    };

    save_catalog(&settings.catalog, &catalog)?;
    println!("{message}");
    Ok(())
}

fn handle_show(settings: &Settings, args: &ShowArgs) -> Result<(), AppError> {
    let mut catalog = load_catalog(&settings.catalog)?;
    if args.with_overrides {
        commands::apply_guidance_overrides(&mut catalog, &settings.guidance_curve_directory)?;
    }
    print!("{}", commands::show(&catalog, &args.key)?);
    Ok(())
}

fn handle_tune(settings: &Settings, args: TuneArgs) -> Result<(), AppError> {
    let mut catalog = load_catalog(&settings.catalog)?;
    let message = commands::tune(&mut catalog, &args.key, args.tuning)?;
    save_catalog(&settings.catalog, &catalog)?;
    println!("{message}");
    Ok(())
}

fn handle_range_table(settings: &Settings, args: &RangeTableArgs) -> Result<(), AppError> {
    let input = dir_or(&args.dir, &settings.damage_falloff_curve_directory);
    let output = dir_or(&args.output, &settings.range_table);
    let report = commands::compute_range_table(&input, &output)?;
    print!("{}", report::format_range_table(&report));
    Ok(())
}

fn handle_sample(settings: &Settings, args: &SampleArgs) -> Result<(), AppError> {
    let path = &settings.catalog;
    if path.exists() && !args.force {
        return Err(AppError::new(
            EXIT_CONFIG,
            format!("Catalog already exists: {} (use --force to overwrite)", path.display()),
        ));
    }
    if args.count == 0 {
        return Err(AppError::new(EXIT_CONFIG, "Sample count must be > 0."));
    }

    let catalog: MemoryCatalog = crate::data::generate_catalog(args.seed, args.count);
    save_catalog(path, &catalog)?;
    println!("Wrote {} sample entries to {}", catalog.len(), path.display());
    Ok(())
}
