use std::path::PathBuf;

use chrono::{Datelike, Local};
use clap::Parser;

use crate::error::{ReportError, Result};
use crate::models::ExportFormat;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Season report generator for Garmin activity exports.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "season-report",
    about = "Clean a Garmin activity export and render season summary charts",
    version
)]
pub struct Settings {
    /// Path to the raw export file (JSON or CSV)
    #[arg(long, env = "GARMIN_EXPORT", default_value = "data/summarized_activities.json")]
    pub source: PathBuf,

    /// Export format; "auto" detects from the file extension
    #[arg(long, default_value = "auto", value_parser = ["auto", "json", "csv"])]
    pub format: String,

    /// Target season year (defaults to the current year)
    #[arg(long, env = "SEASON_YEAR")]
    pub year: Option<i32>,

    /// Directory for the cleaned table and the figures subdirectory
    #[arg(long, default_value = "data")]
    pub output_dir: PathBuf,

    /// Maximum heart rate anchoring the HR zone boundaries
    #[arg(long, default_value = "190")]
    pub max_hr: f64,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,
}

impl Settings {
    /// The season year to filter to, falling back to the current local year.
    pub fn target_year(&self) -> i32 {
        self.year.unwrap_or_else(|| Local::now().year())
    }

    /// Resolve the declared format, detecting from the source extension when
    /// set to `auto`.
    pub fn resolved_format(&self) -> Result<ExportFormat> {
        match self.format.as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            _ => ExportFormat::detect(&self.source).ok_or_else(|| {
                ReportError::Config(format!(
                    "cannot detect export format from {}; pass --format json|csv",
                    self.source.display()
                ))
            }),
        }
    }

    /// Directory where chart images are written.
    pub fn figures_dir(&self) -> PathBuf {
        self.output_dir.join("figures")
    }
}
