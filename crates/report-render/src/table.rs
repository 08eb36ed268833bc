//! The cleaned-table CSV artifact.
//!
//! Column order and float formatting are fixed so that rerunning the pipeline
//! over an unchanged source produces byte-identical output.

use std::path::{Path, PathBuf};

use report_core::error::{ReportError, Result};
use report_core::models::Activity;
use tracing::debug;

/// Column header of the cleaned table.
const COLUMNS: &[&str] = &[
    "activity_id",
    "name",
    "activity_type",
    "start_time",
    "duration_minutes",
    "distance_km",
    "distance_mi",
    "elevation_gain_m",
    "avg_hr",
    "max_hr",
    "calories",
    "calories_per_min",
];

/// Deterministic artifact path: `<source stem>_clean.csv` under `output_dir`.
pub fn cleaned_table_path(source: &Path, output_dir: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("activities");
    output_dir.join(format!("{}_clean.csv", stem))
}

/// Write the cleaned activity table to `path`, creating parent directories
/// as needed. Any failure is a [`ReportError::OutputWrite`] and fatal for
/// the run.
pub fn write_cleaned_table(activities: &[Activity], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ReportError::output_write(path, e))?;
    }

    let mut writer = csv::Writer::from_path(path).map_err(|e| write_error(path, e))?;
    writer
        .write_record(COLUMNS)
        .map_err(|e| write_error(path, e))?;

    for activity in activities {
        writer
            .write_record(activity_row(activity))
            .map_err(|e| write_error(path, e))?;
    }

    writer.flush().map_err(|e| ReportError::output_write(path, e))?;
    debug!("Wrote {} rows to {}", activities.len(), path.display());
    Ok(())
}

fn write_error(path: &Path, source: csv::Error) -> ReportError {
    ReportError::OutputWrite {
        path: path.to_path_buf(),
        detail: source.to_string(),
    }
}

/// One CSV row in the fixed column order. Absent optionals become empty cells.
fn activity_row(activity: &Activity) -> Vec<String> {
    vec![
        activity.id.clone(),
        activity.name.clone().unwrap_or_default(),
        activity.activity_type.clone(),
        activity.start_time.format("%Y-%m-%d %H:%M:%S").to_string(),
        format!("{:.1}", activity.duration_minutes()),
        format!("{:.3}", activity.distance_km),
        format!("{:.3}", activity.distance_mi()),
        opt_cell(activity.elevation_gain_m, 0),
        opt_cell(activity.avg_hr, 0),
        opt_cell(activity.max_hr, 0),
        opt_cell(activity.calories, 0),
        opt_cell(activity.calories_per_min(), 2),
    ]
}

fn opt_cell(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.prec$}", v, prec = decimals),
        None => String::new(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
