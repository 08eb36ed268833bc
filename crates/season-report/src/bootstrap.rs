use report_core::settings::Settings;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure the output directory hierarchy exists.
///
/// Creates the configured output directory and its `figures/` subdirectory,
/// including any missing parents.
pub fn ensure_directories(settings: &Settings) -> anyhow::Result<()> {
    std::fs::create_dir_all(&settings.output_dir)?;
    std::fs::create_dir_all(settings.figures_dir())?;
    Ok(())
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is mapped to a [`tracing_subscriber::EnvFilter`] directive.
/// Falls back to `"info"` if the level string is not recognised. All log
/// output goes to stderr; stdout is reserved for the summary block.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let normalised = match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARNING" => "warn",
        "ERROR" => "error",
        _ => "info",
    };

    let filter = EnvFilter::try_new(normalised).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .init();

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
