mod bootstrap;
mod pipeline;

use anyhow::Result;
use clap::Parser;
use report_core::settings::Settings;
use report_render::summary;

fn main() -> Result<()> {
    let settings = Settings::parse();

    bootstrap::setup_logging(&settings.log_level)?;
    bootstrap::ensure_directories(&settings)?;

    tracing::info!("season-report v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Source: {}, format: {}, year: {}",
        settings.source.display(),
        settings.format,
        settings.target_year()
    );

    let report = pipeline::run(&settings)?;

    tracing::info!(
        "Run complete: {} activities retained, {} charts rendered",
        report.retained,
        report.figures.len()
    );
    tracing::debug!(
        "Dropped on the way: {} multisport containers, {} outside {}",
        report.dropped_multisport,
        report.dropped_out_of_year,
        report.target_year
    );

    summary::print_summary(report.target_year, &report.stats, report.skipped_coercion);
    println!();
    println!("Cleaned table: {}", report.cleaned_table.display());
    println!("Charts saved to {}", settings.figures_dir().display());

    Ok(())
}
