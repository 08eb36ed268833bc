use std::fmt;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDateTime;

use crate::units;

// ── ExportFormat ──────────────────────────────────────────────────────────────

/// The two supported raw export shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Nested full-account JSON export (`summarizedActivitiesExport`).
    Json,
    /// Flat activities CSV export.
    Csv,
}

impl ExportFormat {
    /// Detect the format from the file extension.
    ///
    /// Returns `None` for extensions that are neither `.json` nor `.csv`.
    pub fn detect(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(ExportFormat::Json),
            "csv" => Some(ExportFormat::Csv),
            _ => None,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Csv => write!(f, "csv"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(format!("unknown export format: {}", other)),
        }
    }
}

// ── Activity ──────────────────────────────────────────────────────────────────

/// A single cleaned activity record, the canonical shape both export formats
/// converge on.
///
/// Distances are stored in kilometers and durations in seconds regardless of
/// the source units. Optional metrics stay `None` when the export did not
/// carry them.
#[derive(Debug, Clone)]
pub struct Activity {
    /// Opaque unique identifier from the export.
    pub id: String,
    /// Activity title, when present.
    pub name: Option<String>,
    /// Upper-cased sport label, e.g. `RUNNING`.
    pub activity_type: String,
    /// Local wall-clock start time as recorded by the device.
    pub start_time: NaiveDateTime,
    /// Total duration in seconds.
    pub duration_secs: f64,
    /// Distance in kilometers.
    pub distance_km: f64,
    /// Elevation gain in meters.
    pub elevation_gain_m: Option<f64>,
    /// Average heart rate in beats per minute.
    pub avg_hr: Option<f64>,
    /// Maximum heart rate in beats per minute.
    pub max_hr: Option<f64>,
    /// Energy expenditure in kilocalories.
    pub calories: Option<f64>,
}

impl Activity {
    /// Distance in miles, derived from the stored kilometers.
    pub fn distance_mi(&self) -> f64 {
        units::km_to_mi(self.distance_km)
    }

    /// Duration in minutes.
    pub fn duration_minutes(&self) -> f64 {
        self.duration_secs / 60.0
    }

    /// Calories burned per minute, `None` when calories are absent or the
    /// duration is zero.
    pub fn calories_per_min(&self) -> Option<f64> {
        let calories = self.calories?;
        let minutes = self.duration_minutes();
        if minutes > 0.0 {
            Some(calories / minutes)
        } else {
            None
        }
    }
}
