use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;
use tracing::debug;

// ── TimestampCoercer ──────────────────────────────────────────────────────────

/// Parses timestamps from the shapes found in the two export formats.
pub struct TimestampCoercer;

impl TimestampCoercer {
    /// Attempt to parse a [`serde_json::Value`] into a naive local datetime.
    ///
    /// Handles:
    /// * `null`       → `None`
    /// * JSON number  → milliseconds since the Unix epoch (JSON export).
    /// * JSON string  → `%Y-%m-%d %H:%M:%S`-style patterns or a bare date
    ///   (CSV export).
    pub fn parse(value: &Value) -> Option<NaiveDateTime> {
        match value {
            Value::Null => None,
            Value::Number(n) => {
                let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
                DateTime::from_timestamp_millis(millis).map(|dt| dt.naive_utc())
            }
            Value::String(s) => Self::parse_str(s),
            _ => None,
        }
    }

    fn parse_str(s: &str) -> Option<NaiveDateTime> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        const FORMATS: &[&str] = &[
            "%Y-%m-%d %H:%M:%S",
            "%Y-%m-%dT%H:%M:%S%.f",
            "%Y-%m-%dT%H:%M:%S",
            "%m/%d/%Y %H:%M",
        ];
        for fmt in FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
                return Some(dt);
            }
        }

        // Date-only rows get midnight.
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return date.and_hms_opt(0, 0, 0);
        }

        debug!("TimestampCoercer: could not parse timestamp \"{}\"", s);
        None
    }
}

// ── NumericCoercer ────────────────────────────────────────────────────────────

/// Coerces loosely-typed numeric fields into `f64`.
///
/// The CSV export carries string-typed numbers that may contain
/// thousands-separator artifacts (`"1,234.56"`) or the `"--"` placeholder
/// Garmin uses for absent values.
pub struct NumericCoercer;

impl NumericCoercer {
    /// Parse a [`serde_json::Value`] into `f64`, returning `None` on failure
    /// or for absent/placeholder values.
    pub fn parse(value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => Self::parse_str(s),
            _ => None,
        }
    }

    /// Like [`NumericCoercer::parse`] but rejects negative values, which are
    /// invalid for distance/duration/heart-rate metrics.
    pub fn parse_non_negative(value: &Value) -> Option<f64> {
        Self::parse(value).filter(|v| *v >= 0.0)
    }

    fn parse_str(s: &str) -> Option<f64> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed == "--" {
            return None;
        }

        // Strip thousands separators before coercing. Only digit-grouping
        // commas are removed; a stray comma in arbitrary text still fails
        // the final parse.
        let cleaned: String = trimmed.chars().filter(|c| *c != ',').collect();
        cleaned.parse::<f64>().ok()
    }

    /// Parse a `hh:mm:ss` (or `mm:ss`) duration string into seconds.
    pub fn parse_duration_secs(s: &str) -> Option<f64> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        let nums: Vec<f64> = parts
            .iter()
            .map(|p| p.parse::<f64>())
            .collect::<std::result::Result<_, _>>()
            .ok()?;

        match nums.as_slice() {
            [h, m, sec] => Some(h * 3600.0 + m * 60.0 + sec),
            [m, sec] => Some(m * 60.0 + sec),
            _ => None,
        }
    }
}
