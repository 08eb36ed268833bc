//! The linear batch pipeline: load → normalize → aggregate → report.

use std::path::PathBuf;

use report_core::error::Result;
use report_core::settings::Settings;
use report_core::zones::HrZones;
use report_data::aggregator::{self, SummaryStats};
use report_data::loader;
use report_data::normalizer;
use report_render::{charts, table};
use tracing::info;

/// What a completed run produced, for the final console report.
#[derive(Debug)]
pub struct RunReport {
    pub target_year: i32,
    pub retained: usize,
    pub skipped_coercion: u32,
    pub dropped_multisport: u32,
    pub dropped_out_of_year: u32,
    pub cleaned_table: PathBuf,
    pub figures: Vec<PathBuf>,
    pub stats: SummaryStats,
}

/// Run the whole pipeline once. Structural failures (missing/malformed
/// source, unwritable output) abort with an error; per-record coercion
/// failures only show up in the counters.
pub fn run(settings: &Settings) -> Result<RunReport> {
    let format = settings.resolved_format()?;
    let target_year = settings.target_year();

    let records = loader::load_raw_records(&settings.source, format)?;
    let normalized = normalizer::normalize_records(&records, format, target_year);

    info!(
        "Retained {} of {} records for {} ({} skipped, {} multisport, {} out of year)",
        normalized.activities.len(),
        records.len(),
        target_year,
        normalized.skipped_coercion,
        normalized.dropped_multisport,
        normalized.dropped_out_of_year,
    );

    let weekly = aggregator::aggregate_weekly(&normalized.activities);
    let daily = aggregator::aggregate_daily(&normalized.activities);
    let type_counts = aggregator::count_by_type(&normalized.activities);
    let duration_medians = aggregator::median_duration_by_type(&normalized.activities);
    let zones = HrZones::from_max_hr(settings.max_hr);
    let hr_distribution = aggregator::hr_zone_distribution(&normalized.activities, &zones);
    let stats = aggregator::compute_summary(&normalized.activities);

    let cleaned_table = table::cleaned_table_path(&settings.source, &settings.output_dir);
    table::write_cleaned_table(&normalized.activities, &cleaned_table)?;

    let figures_dir = settings.figures_dir();
    let weekly_distance = figures_dir.join("weekly_distance.png");
    let weekly_time = figures_dir.join("weekly_time.png");
    let distance_over_time = figures_dir.join("distance_over_time.png");
    let activity_counts = figures_dir.join("activity_counts.png");
    let median_duration = figures_dir.join("median_duration_by_sport.png");
    let hr_zones = figures_dir.join("hr_zones.png");

    charts::render_weekly_distance(&weekly, &weekly_distance)?;
    charts::render_weekly_time(&weekly, &weekly_time)?;
    charts::render_daily_distance(&daily, &distance_over_time)?;
    charts::render_activity_counts(&type_counts, &activity_counts)?;
    charts::render_duration_by_type(&duration_medians, &median_duration)?;
    charts::render_hr_zones(&hr_distribution, &hr_zones)?;

    Ok(RunReport {
        target_year,
        retained: normalized.activities.len(),
        skipped_coercion: normalized.skipped_coercion,
        dropped_multisport: normalized.dropped_multisport,
        dropped_out_of_year: normalized.dropped_out_of_year,
        cleaned_table,
        figures: vec![
            weekly_distance,
            weekly_time,
            distance_over_time,
            activity_counts,
            median_duration,
            hr_zones,
        ],
        stats,
    })
}

// ── Tests ──────────────────────────────────────────────────────────────────────
