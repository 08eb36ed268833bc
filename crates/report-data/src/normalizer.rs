//! Normalization of raw export records into the canonical activity table.
//!
//! Applies per-format field mapping, type coercion, unit conversion, and the
//! multisport-container and season filters. Coercion failures drop the record
//! and are counted, never fatal; input order is preserved for retained rows.

use std::collections::HashSet;

use chrono::Datelike;
use report_core::coercion::{NumericCoercer, TimestampCoercer};
use report_core::models::{Activity, ExportFormat};
use report_core::units;
use serde_json::Value;
use tracing::{debug, warn};

// ── NormalizedTable ───────────────────────────────────────────────────────────

/// The cleaned activity table plus counters for everything that was dropped
/// on the way.
#[derive(Debug, Default)]
pub struct NormalizedTable {
    /// Retained activities, in input order.
    pub activities: Vec<Activity>,
    /// Records dropped because a field failed type/unit coercion.
    pub skipped_coercion: u32,
    /// Multisport container rows excluded in favor of their child legs.
    pub dropped_multisport: u32,
    /// Records outside the target season year.
    pub dropped_out_of_year: u32,
    /// Records whose identifier was already seen.
    pub dropped_duplicate: u32,
}

/// Normalize `records` into the canonical table, keeping only activities in
/// `target_year`.
pub fn normalize_records(
    records: &[Value],
    format: ExportFormat,
    target_year: i32,
) -> NormalizedTable {
    let mut table = NormalizedTable::default();
    let mut seen_ids: HashSet<String> = HashSet::new();

    for (index, record) in records.iter().enumerate() {
        if is_multisport_container(record, format) {
            table.dropped_multisport += 1;
            continue;
        }

        let activity = match format {
            ExportFormat::Json => map_json_record(record),
            ExportFormat::Csv => map_csv_record(record, index),
        };

        let activity = match activity {
            Some(a) => a,
            None => {
                warn!("Skipping record {}: field coercion failed", index + 1);
                table.skipped_coercion += 1;
                continue;
            }
        };

        if activity.start_time.year() != target_year {
            table.dropped_out_of_year += 1;
            continue;
        }

        if !seen_ids.insert(activity.id.clone()) {
            debug!("Skipping record {}: duplicate id {}", index + 1, activity.id);
            table.dropped_duplicate += 1;
            continue;
        }

        table.activities.push(activity);
    }

    debug!(
        "Normalized {} of {} records ({} coercion-skipped, {} multisport, {} out of year, {} duplicate)",
        table.activities.len(),
        records.len(),
        table.skipped_coercion,
        table.dropped_multisport,
        table.dropped_out_of_year,
        table.dropped_duplicate,
    );
    table
}

// ── Multisport detection ──────────────────────────────────────────────────────

/// Containers aggregate child sport legs and carry no per-sport data of their
/// own. The JSON export marks them with `sportType == "MULTISPORT"` or a
/// truthy `parent` flag; the CSV export only has the activity-type label.
fn is_multisport_container(record: &Value, format: ExportFormat) -> bool {
    match format {
        ExportFormat::Json => {
            let sport_is_multi = record
                .get("sportType")
                .and_then(Value::as_str)
                .map(|s| s.eq_ignore_ascii_case("MULTISPORT"))
                .unwrap_or(false);
            let parent = record
                .get("parent")
                .map(|v| v.as_bool().unwrap_or(false) || v.as_f64().unwrap_or(0.0) != 0.0)
                .unwrap_or(false);
            sport_is_multi || parent
        }
        ExportFormat::Csv => record
            .get("Activity Type")
            .and_then(Value::as_str)
            .map(|s| s.trim().eq_ignore_ascii_case("multisport"))
            .unwrap_or(false),
    }
}

// ── JSON field mapping ────────────────────────────────────────────────────────

/// Map a nested-JSON export record to an [`Activity`].
///
/// Distances arrive in centimeters and durations in milliseconds. Returns
/// `None` when any required field is missing or fails coercion, or when an
/// optional metric is present but unparseable.
fn map_json_record(record: &Value) -> Option<Activity> {
    let id = match record.get("activityId") {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        _ => return None,
    };

    let name = record
        .get("name")
        .and_then(Value::as_str)
        .map(|s| s.to_string());

    let activity_type = record
        .get("sportType")
        .or_else(|| record.get("activityType"))
        .and_then(Value::as_str)
        .map(|s| s.to_uppercase())
        .unwrap_or_else(|| "UNKNOWN".to_string());

    let start_time = record
        .get("startTimeLocal")
        .or_else(|| record.get("beginTimestamp"))
        .or_else(|| record.get("startTimeGmt"))
        .and_then(TimestampCoercer::parse)?;

    let duration_ms = NumericCoercer::parse_non_negative(record.get("duration")?)?;

    // Strength-style activities legitimately have no distance.
    let distance_cm = optional_metric(record.get("distance")).ok()?.unwrap_or(0.0);

    Some(Activity {
        id,
        name,
        activity_type,
        start_time,
        duration_secs: units::ms_to_secs(duration_ms),
        distance_km: units::cm_to_km(distance_cm),
        elevation_gain_m: optional_metric(record.get("elevationGain")).ok()?,
        avg_hr: optional_metric(record.get("avgHr")).ok()?,
        max_hr: optional_metric(record.get("maxHr")).ok()?,
        calories: optional_metric(record.get("calories")).ok()?,
    })
}

// ── CSV field mapping ─────────────────────────────────────────────────────────

/// Map a flat CSV export row to an [`Activity`].
///
/// Distances are already in a human unit (after thousands-separator cleanup)
/// and the duration is a `hh:mm:ss` string. The CSV export has no identifier
/// column, so the row ordinal becomes the id.
fn map_csv_record(record: &Value, index: usize) -> Option<Activity> {
    let activity_type = record
        .get("Activity Type")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.trim().to_uppercase())?;

    let name = record
        .get("Title")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.trim().to_string());

    let start_time = record.get("Date").and_then(TimestampCoercer::parse)?;

    let duration_secs = record
        .get("Time")
        .and_then(Value::as_str)
        .and_then(NumericCoercer::parse_duration_secs)?;

    let distance_km = optional_metric(record.get("Distance")).ok()?.unwrap_or(0.0);

    Some(Activity {
        id: format!("row-{}", index + 1),
        name,
        activity_type,
        start_time,
        duration_secs,
        distance_km,
        elevation_gain_m: optional_metric(record.get("Elev Gain")).ok()?,
        avg_hr: optional_metric(record.get("Avg HR")).ok()?,
        max_hr: optional_metric(record.get("Max HR")).ok()?,
        calories: optional_metric(record.get("Calories")).ok()?,
    })
}

// ── Optional metric coercion ──────────────────────────────────────────────────

/// Coerce an optional numeric field.
///
/// * Absent, `null`, empty, or the `"--"` placeholder → `Ok(None)`.
/// * A valid non-negative number → `Ok(Some(v))`.
/// * Present but unparseable or negative → `Err(())`, which drops the record.
fn optional_metric(value: Option<&Value>) -> std::result::Result<Option<f64>, ()> {
    let value = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(v) => v,
    };

    if let Some(s) = value.as_str() {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed == "--" {
            return Ok(None);
        }
    }

    match NumericCoercer::parse_non_negative(value) {
        Some(v) => Ok(Some(v)),
        None => Err(()),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
