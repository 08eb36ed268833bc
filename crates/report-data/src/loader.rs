//! Raw export loading.
//!
//! Both formats are read into an ordered sequence of untyped
//! [`serde_json::Value`] objects so the normalizer never branches on the
//! source format at the value level.

use std::path::Path;

use report_core::error::{ReportError, Result};
use report_core::models::ExportFormat;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Header columns every Garmin activities CSV export carries.
const REQUIRED_CSV_COLUMNS: &[&str] = &["Activity Type", "Date", "Distance"];

/// Key wrapping the record array in the full-account JSON export.
const JSON_EXPORT_KEY: &str = "summarizedActivitiesExport";

/// Read the raw export at `path` into an ordered list of records.
///
/// Fails with [`ReportError::SourceNotFound`] when the path does not exist
/// and [`ReportError::MalformedSource`] when the content cannot be parsed as
/// the declared format.
pub fn load_raw_records(path: &Path, format: ExportFormat) -> Result<Vec<Value>> {
    if !path.exists() {
        return Err(ReportError::SourceNotFound(path.to_path_buf()));
    }

    let records = match format {
        ExportFormat::Json => load_json_records(path)?,
        ExportFormat::Csv => load_csv_records(path)?,
    };

    debug!(
        "Loaded {} raw records from {} ({})",
        records.len(),
        path.display(),
        format
    );
    Ok(records)
}

// ── JSON export ───────────────────────────────────────────────────────────────

/// Load the nested JSON export, handling the shapes the real export uses:
/// a bare array of records, an array wrapping the export object, or the
/// export object at the top level.
fn load_json_records(path: &Path) -> Result<Vec<Value>> {
    let content = std::fs::read_to_string(path)?;
    let raw: Value = serde_json::from_str(&content)
        .map_err(|e| ReportError::malformed(path, e.to_string()))?;

    let records = match &raw {
        Value::Array(items) => match items.first() {
            Some(first) if first.get(JSON_EXPORT_KEY).is_some() => {
                first.get(JSON_EXPORT_KEY).and_then(Value::as_array).cloned()
            }
            _ => Some(items.clone()),
        },
        Value::Object(_) => raw.get(JSON_EXPORT_KEY).and_then(Value::as_array).cloned(),
        _ => None,
    };

    records.ok_or_else(|| {
        ReportError::malformed(path, "unrecognized summarized activities shape")
    })
}

// ── CSV export ────────────────────────────────────────────────────────────────

/// Load the flat CSV export, re-keying each row into a JSON object by header
/// name. Rows that cannot be read are skipped with a warning; a header row
/// missing the expected columns is a malformed source.
fn load_csv_records(path: &Path) -> Result<Vec<Value>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| ReportError::malformed(path, e.to_string()))?;

    let headers = reader
        .headers()
        .map_err(|e| ReportError::malformed(path, e.to_string()))?
        .clone();

    for required in REQUIRED_CSV_COLUMNS {
        if !headers.iter().any(|h| h.trim() == *required) {
            return Err(ReportError::malformed(
                path,
                format!("missing expected CSV column \"{}\"", required),
            ));
        }
    }

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = match row {
            Ok(r) => r,
            Err(e) => {
                warn!("Skipping unreadable CSV row {}: {}", index + 2, e);
                continue;
            }
        };

        let mut object = Map::new();
        for (header, field) in headers.iter().zip(row.iter()) {
            object.insert(
                header.trim().to_string(),
                Value::String(field.to_string()),
            );
        }
        records.push(Value::Object(object));
    }

    Ok(records)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{}", content).unwrap();
        path
    }

    // ── load_raw_records ──────────────────────────────────────────────────────

    #[test]
    fn test_missing_path_is_source_not_found() {
        let err = load_raw_records(Path::new("/no/such/export.json"), ExportFormat::Json)
            .unwrap_err();
        assert!(matches!(err, ReportError::SourceNotFound(_)));
    }

    // ── JSON shapes ───────────────────────────────────────────────────────────

    #[test]
    fn test_json_bare_array() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "export.json", r#"[{"activityId": 1}, {"activityId": 2}]"#);

        let records = load_raw_records(&path, ExportFormat::Json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["activityId"], 1);
    }

    #[test]
    fn test_json_array_wrapping_export_object() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "export.json",
            r#"[{"summarizedActivitiesExport": [{"activityId": 7}]}]"#,
        );

        let records = load_raw_records(&path, ExportFormat::Json).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["activityId"], 7);
    }

    #[test]
    fn test_json_top_level_export_object() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "export.json",
            r#"{"summarizedActivitiesExport": [{"activityId": 9}]}"#,
        );

        let records = load_raw_records(&path, ExportFormat::Json).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_json_invalid_syntax_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "export.json", "{not json");

        let err = load_raw_records(&path, ExportFormat::Json).unwrap_err();
        assert!(matches!(err, ReportError::MalformedSource { .. }));
    }

    #[test]
    fn test_json_unrecognized_shape_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "export.json", r#"{"something": "else"}"#);

        let err = load_raw_records(&path, ExportFormat::Json).unwrap_err();
        assert!(matches!(err, ReportError::MalformedSource { .. }));
    }

    #[test]
    fn test_json_empty_array_is_ok() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "export.json", "[]");

        let records = load_raw_records(&path, ExportFormat::Json).unwrap();
        assert!(records.is_empty());
    }

    // ── CSV shapes ────────────────────────────────────────────────────────────

    #[test]
    fn test_csv_rows_become_keyed_objects() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "activities.csv",
            "Activity Type,Date,Distance,Calories\n\
             Running,2025-06-01 07:30:00,5.00,360\n\
             Cycling,2025-06-02 08:00:00,20.10,540\n",
        );

        let records = load_raw_records(&path, ExportFormat::Csv).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["Activity Type"], "Running");
        assert_eq!(records[1]["Distance"], "20.10");
    }

    #[test]
    fn test_csv_missing_required_column_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "activities.csv",
            "Sport,Date,Calories\nRunning,2025-06-01,360\n",
        );

        let err = load_raw_records(&path, ExportFormat::Csv).unwrap_err();
        match err {
            ReportError::MalformedSource { detail, .. } => {
                assert!(detail.contains("Activity Type"));
            }
            other => panic!("expected MalformedSource, got {:?}", other),
        }
    }

    #[test]
    fn test_csv_short_row_keeps_present_fields() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "activities.csv",
            "Activity Type,Date,Distance,Calories\nRunning,2025-06-01 07:30:00,5.00\n",
        );

        let records = load_raw_records(&path, ExportFormat::Csv).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["Distance"], "5.00");
        assert!(records[0].get("Calories").is_none());
    }

    #[test]
    fn test_csv_header_only_yields_empty() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "activities.csv", "Activity Type,Date,Distance\n");

        let records = load_raw_records(&path, ExportFormat::Csv).unwrap();
        assert!(records.is_empty());
    }
}
