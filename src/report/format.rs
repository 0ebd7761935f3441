//! Formatted terminal output for the `gcurve` commands.
//!
//! Formatting lives here so command code stays free of presentation and
//! output changes stay local.

use std::fmt::Write as _;
use std::path::Path;

use crate::catalog::{CatalogEntry, GuidanceData, Pid};
use crate::domain::{GuidanceInput, InputType};
use crate::report::RangeTableReport;
use crate::sync::{ExtractReport, Field, InjectReport, SyncFailure};

/// Sample points printed under each curve input by `gcurve show`.
pub const SHOW_SAMPLE_TIMES: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

/// Engine default when an entry carries no `wpn_scatter_radius` stat.
const DEFAULT_SCATTER_RADIUS: f64 = 15.0;

/// Guidance extraction: one line per entry listing the categories written.
pub fn format_extract_guidance(report: &ExtractReport) -> String {
    let mut grouped: Vec<(&str, Vec<Field>)> = Vec::new();
    for w in &report.written {
        match grouped.last_mut() {
            Some((key, fields)) if *key == w.key => fields.push(w.field),
            _ => grouped.push((w.key.as_str(), vec![w.field])),
        }
    }

    let mut out = String::new();
    if grouped.is_empty() {
        out.push_str("No guidance curves were extracted\n");
    } else {
        let _ = writeln!(out, "Subsystems with guidance curves ({}):", grouped.len());
        for (key, fields) in &grouped {
            let names: Vec<String> = fields.iter().map(Field::to_string).collect();
            let _ = writeln!(out, "  {key} ({})", names.join(", "));
        }
    }
    out.push_str(&format_failures(&report.failures));
    out
}

/// Falloff extraction: one line per entry with the written path.
pub fn format_extract_falloff(report: &ExtractReport) -> String {
    let mut out = String::new();
    if report.written.is_empty() {
        out.push_str("No damage falloff curves were extracted\n");
    } else {
        let _ = writeln!(out, "Subsystems with damage falloff curves ({}):", report.written.len());
        for w in &report.written {
            let _ = writeln!(out, "  {}: {}", w.key, w.path.display());
        }
    }
    out.push_str(&format_failures(&report.failures));
    out
}

pub fn format_inject(report: &InjectReport, root: &Path) -> String {
    let mut out = String::new();
    for missing in &report.missing_categories {
        let _ = writeln!(out, "  skipped {}: {}", missing.field, missing.error);
    }
    out.push_str(&format_failures(&report.skipped));
    let _ = writeln!(
        out,
        "Applied {} curve(s) from {}",
        report.applied.len(),
        root.display()
    );
    out
}

pub fn format_range_table(report: &RangeTableReport) -> String {
    let mut out = format_failures(&report.skipped);
    let unreached = report.rows.iter().filter(|r| r.range.is_unreached()).count();
    let _ = writeln!(
        out,
        "Wrote {} optimal range(s) to {} ({} never reach the threshold)",
        report.rows.len(),
        report.output.display(),
        unreached
    );
    out
}

fn format_failures(failures: &[SyncFailure]) -> String {
    let mut out = String::new();
    for f in failures {
        let _ = writeln!(out, "  failed {} ({}): {}", f.key, f.field, f.error);
    }
    out
}

/// Everything `gcurve show` prints for one entry.
pub fn format_guidance_data(key: &str, entry: &CatalogEntry, gd: &GuidanceData) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Subsystem: {key}");

    let stat = |name: &str, default: f64| entry.stat(name).unwrap_or(default);
    let _ = writeln!(out, "act_count: {}", stat("act_count", 0.0));
    let _ = writeln!(
        out,
        "wpn_range: {} - {}",
        stat("wpn_range_min", 0.0),
        stat("wpn_range_max", 0.0)
    );
    let _ = writeln!(out, "wpn_proj_lifetime: {}", stat("wpn_proj_lifetime", 0.0));
    let _ = writeln!(out, "wpn_speed: {}", stat("wpn_speed", 0.0));
    let _ = writeln!(
        out,
        "wpn_scatter_radius: {}",
        stat("wpn_scatter_radius", DEFAULT_SCATTER_RADIUS)
    );

    let _ = writeln!(out, "drag: {}", gd.rigidbody_drag);
    let _ = writeln!(out, "angular drag: {}", gd.rigidbody_angular_drag);
    let _ = writeln!(out, "throttle force: {}", gd.driver_acceleration_force);
    let _ = writeln!(out, "steering force: {}", gd.driver_steering_force);
    let _ = writeln!(out, "pitch force: {}", gd.driver_pitch_force);
    let _ = writeln!(out, "steering PID: {}", fmt_pid(gd.steering_pid));
    let _ = writeln!(out, "pitch PID: {}", fmt_pid(gd.pitch_pid));
    let _ = writeln!(out, "target height: {}", gd.input_target_height_scale);

    out.push_str("Guidance inputs\n");
    for t in InputType::ALL {
        if let Some(input) = gd.input(t) {
            out.push_str(&format_guidance_input(t.label(), input));
        }
    }
    out
}

/// One input slot: the value, or `curve` followed by sampled points.
pub fn format_guidance_input(label: &str, input: &GuidanceInput) -> String {
    match input {
        GuidanceInput::Constant(v) => format!("  {label}: {v}\n"),
        GuidanceInput::Linear { from, to } => format!("  {label}: {from} {to}\n"),
        GuidanceInput::Curve(serialized) => {
            let mut out = format!("  {label}: curve\n");
            match serialized.to_curve() {
                Ok(curve) => {
                    let samples: Vec<String> = SHOW_SAMPLE_TIMES
                        .iter()
                        .map(|&t| format!("{t:.2}={:.4}", curve.evaluate(t)))
                        .collect();
                    let _ = writeln!(out, "    {}", samples.join("  "));
                }
                Err(e) => {
                    let _ = writeln!(out, "    (unreadable: {e})");
                }
            }
            out
        }
    }
}

pub fn fmt_pid(pid: Option<Pid>) -> String {
    let Pid { p, i, d } = pid.unwrap_or_default();
    format!("{p}/{i}/{d}")
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::analysis::OptimalRange;
    use crate::domain::Curve;
    use crate::error::CurveError;
    use crate::io::RangeRow;
    use crate::sync::{FALLOFF_FIELD, Written};

    fn written(key: &str, t: InputType) -> Written {
        Written {
            key: key.to_string(),
            field: Field::guidance(t),
            path: PathBuf::from(format!("/c/{}/{key}.yaml", t.dir_name())),
        }
    }

    #[test]
    fn extract_guidance_groups_by_entry() {
        let report = ExtractReport {
            written: vec![
                written("wpn_a", InputType::TargetHeight),
                written("wpn_a", InputType::Steering),
                written("wpn_b", InputType::Throttle),
            ],
            failures: vec![],
        };
        assert_eq!(
            format_extract_guidance(&report),
            "Subsystems with guidance curves (2):\n  wpn_a (InputTargetHeight, InputSteering)\n  wpn_b (InputThrottle)\n"
        );
    }

    #[test]
    fn empty_extract_says_so() {
        let report = ExtractReport::default();
        assert_eq!(format_extract_guidance(&report), "No guidance curves were extracted\n");
        assert_eq!(format_extract_falloff(&report), "No damage falloff curves were extracted\n");
    }

    #[test]
    fn failures_get_one_line_each() {
        let report = ExtractReport {
            written: vec![],
            failures: vec![SyncFailure {
                key: "wpn_c".to_string(),
                field: FALLOFF_FIELD,
                path: PathBuf::from("/c/wpn_c.yaml"),
                error: CurveError::not_found("disk on fire"),
            }],
        };
        let text = format_extract_falloff(&report);
        assert!(text.ends_with("  failed wpn_c (Falloff): disk on fire\n"), "{text}");
    }

    #[test]
    fn range_report_counts_unreached() {
        let report = RangeTableReport {
            output: PathBuf::from("out.tsv"),
            rows: vec![
                RangeRow {
                    key: "a".to_string(),
                    range: OptimalRange { low: 0.0, high: 0.5 },
                },
                RangeRow {
                    key: "b".to_string(),
                    range: OptimalRange { low: -1.0, high: 1.0 },
                },
            ],
            skipped: vec![],
        };
        assert_eq!(
            format_range_table(&report),
            "Wrote 2 optimal range(s) to out.tsv (1 never reach the threshold)\n"
        );
    }

    #[test]
    fn show_prints_defaults_and_inputs() {
        let entry = CatalogEntry {
            stats: [("wpn_range_max".to_string(), 800.0), ("act_count".to_string(), 2.0)]
                .into_iter()
                .collect(),
            ..CatalogEntry::default()
        };
        let gd = GuidanceData {
            input_steering: Some(GuidanceInput::Constant(0.5)),
            input_throttle: Some(GuidanceInput::Linear { from: 0.25, to: 1.0 }),
            input_target_height: Some(GuidanceInput::from(&Curve::linear(0.0, 1.0))),
            driver_steering_force: 12.0,
            pitch_pid: Some(Pid { p: 1.5, i: 0.0, d: 0.25 }),
            ..GuidanceData::default()
        };

        let text = format_guidance_data("wpn_a", &entry, &gd);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Subsystem: wpn_a");
        assert_eq!(lines[1], "act_count: 2");
        assert_eq!(lines[2], "wpn_range: 0 - 800");
        assert_eq!(lines[3], "wpn_proj_lifetime: 0");
        assert_eq!(lines[4], "wpn_speed: 0");
        assert_eq!(lines[5], "wpn_scatter_radius: 15");
        assert!(lines.contains(&"steering force: 12"));
        assert!(lines.contains(&"steering PID: 0/0/0"));
        assert!(lines.contains(&"pitch PID: 1.5/0/0.25"));
        assert!(lines.contains(&"  target height: curve"));
        assert!(lines.contains(&"    0.00=0.0000  0.25=0.2500  0.50=0.5000  0.75=0.7500  1.00=1.0000"));
        assert!(lines.contains(&"  steering: 0.5"));
        assert!(lines.contains(&"  throttle: 0.25 1"));
        assert!(!text.contains("target blend"));
    }
}
