use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the season report pipeline.
#[derive(Error, Debug)]
pub enum ReportError {
    /// The configured export file does not exist.
    #[error("Source file not found: {0}")]
    SourceNotFound(PathBuf),

    /// The export file exists but could not be parsed as the declared format.
    #[error("Malformed source {path}: {detail}")]
    MalformedSource { path: PathBuf, detail: String },

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A CSV stream could not be read or decoded.
    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    /// An output artifact (cleaned table or chart) could not be written.
    #[error("Failed to write {path}: {detail}")]
    OutputWrite { path: PathBuf, detail: String },

    /// A chart could not be rendered.
    #[error("Chart rendering failed: {0}")]
    Chart(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ReportError {
    /// Wrap an I/O error that occurred while writing `path`.
    pub fn output_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReportError::OutputWrite {
            path: path.into(),
            detail: source.to_string(),
        }
    }

    /// Build a [`ReportError::MalformedSource`] for `path`.
    pub fn malformed(path: impl Into<PathBuf>, detail: impl Into<String>) -> Self {
        ReportError::MalformedSource {
            path: path.into(),
            detail: detail.into(),
        }
    }
}

/// Convenience alias used throughout the report crates.
pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_source_not_found() {
        let err = ReportError::SourceNotFound(PathBuf::from("/data/export.json"));
        assert_eq!(err.to_string(), "Source file not found: /data/export.json");
    }

    #[test]
    fn test_error_display_malformed_source() {
        let err = ReportError::malformed("/data/export.json", "unrecognized top-level shape");
        let msg = err.to_string();
        assert!(msg.contains("Malformed source"));
        assert!(msg.contains("/data/export.json"));
        assert!(msg.contains("unrecognized top-level shape"));
    }

    #[test]
    fn test_error_display_output_write() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = ReportError::output_write("/out/clean.csv", io_err);
        let msg = err.to_string();
        assert!(msg.contains("Failed to write"));
        assert!(msg.contains("/out/clean.csv"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_error_display_chart() {
        let err = ReportError::Chart("backend refused bitmap".to_string());
        assert_eq!(err.to_string(), "Chart rendering failed: backend refused bitmap");
    }

    #[test]
    fn test_error_display_config() {
        let err = ReportError::Config("year out of range".to_string());
        assert_eq!(err.to_string(), "Configuration error: year out of range");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ReportError = io_err.into();
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid}").unwrap_err();
        let err: ReportError = json_err.into();
        assert!(err.to_string().contains("Failed to parse JSON"));
    }
}
