//! Chart rendering with `plotters`.
//!
//! One PNG per aggregated view. The weekly series are zero-filled between the
//! first and last active ISO week so the time axis is continuous; empty views
//! still produce an axis-only image instead of failing.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{Datelike, NaiveDate, Weekday};
use plotters::prelude::*;
use report_core::error::{ReportError, Result};
use report_core::zones::{HrZones, ZONE_COUNT};
use report_data::aggregator::{DailyTotal, HrZoneDistribution, TypeCount, TypeMedian, WeeklyTotal};

const CHART_SIZE: (u32, u32) = (900, 450);

const DISTANCE_COLOR: RGBColor = RGBColor(0x4C, 0x6F, 0xFF);
const TIME_COLOR: RGBColor = RGBColor(0xFF, 0x7A, 0x59);
const DAILY_COLOR: RGBColor = RGBColor(0xE8, 0x6A, 0x3E);
const COUNT_COLOR: RGBColor = RGBColor(0x00, 0xA6, 0x76);
const MEDIAN_COLOR: RGBColor = RGBColor(0xF2, 0xC9, 0x4C);
const ZONE_COLOR: RGBColor = RGBColor(0x7B, 0x61, 0xFF);

// ── Public renderers ──────────────────────────────────────────────────────────

/// Weekly distance line chart (kilometers per ISO week).
pub fn render_weekly_distance(weeks: &[WeeklyTotal], path: &Path) -> Result<()> {
    let points: Vec<(String, f64)> = zero_fill_weeks(weeks)
        .into_iter()
        .map(|w| (week_label(&w), w.distance_km))
        .collect();
    draw_line(path, "Weekly Distance", "km", &points, DISTANCE_COLOR)
}

/// Weekly time line chart (minutes per ISO week).
pub fn render_weekly_time(weeks: &[WeeklyTotal], path: &Path) -> Result<()> {
    let points: Vec<(String, f64)> = zero_fill_weeks(weeks)
        .into_iter()
        .map(|w| (week_label(&w), w.duration_secs / 60.0))
        .collect();
    draw_line(path, "Weekly Time", "minutes", &points, TIME_COLOR)
}

/// Daily distance line chart (miles per active day).
pub fn render_daily_distance(days: &[DailyTotal], path: &Path) -> Result<()> {
    let points: Vec<(String, f64)> = days
        .iter()
        .map(|d| (day_label(d), d.distance_mi))
        .collect();
    draw_line(path, "Distance per Day", "miles", &points, DAILY_COLOR)
}

/// Median duration per sport bar chart, top ten sports.
pub fn render_duration_by_type(medians: &[TypeMedian], path: &Path) -> Result<()> {
    let bars: Vec<(String, f64)> = medians
        .iter()
        .take(10)
        .map(|m| (m.activity_type.clone(), m.median_minutes))
        .collect();
    draw_bars(
        path,
        "Median Duration by Sport",
        "minutes",
        &bars,
        MEDIAN_COLOR,
    )
}

/// Activity count bar chart, top ten sports.
pub fn render_activity_counts(counts: &[TypeCount], path: &Path) -> Result<()> {
    let bars: Vec<(String, f64)> = counts
        .iter()
        .take(10)
        .map(|c| (c.activity_type.clone(), c.count as f64))
        .collect();
    draw_bars(path, "Activity Count by Sport", "activities", &bars, COUNT_COLOR)
}

/// Heart-rate zone distribution bar chart.
pub fn render_hr_zones(distribution: &HrZoneDistribution, path: &Path) -> Result<()> {
    let bars: Vec<(String, f64)> = distribution
        .zone_counts
        .iter()
        .enumerate()
        .map(|(i, count)| (HrZones::label(i), *count as f64))
        .collect();
    debug_assert_eq!(bars.len(), ZONE_COUNT);
    draw_bars(
        path,
        "Average Heart Rate by Zone",
        "activities",
        &bars,
        ZONE_COLOR,
    )
}

// ── Weekly zero-fill ──────────────────────────────────────────────────────────

/// Insert zero-valued weeks between the first and last active ISO week so a
/// chart axis has no gaps. Returns an empty vec for an empty input.
pub fn zero_fill_weeks(weeks: &[WeeklyTotal]) -> Vec<WeeklyTotal> {
    let (Some(first), Some(last)) = (weeks.first(), weeks.last()) else {
        return Vec::new();
    };

    let start = NaiveDate::from_isoywd_opt(first.iso_year, first.iso_week, Weekday::Mon);
    let end = NaiveDate::from_isoywd_opt(last.iso_year, last.iso_week, Weekday::Mon);
    let (Some(start), Some(end)) = (start, end) else {
        return weeks.to_vec();
    };

    let by_week: BTreeMap<(i32, u32), &WeeklyTotal> = weeks
        .iter()
        .map(|w| ((w.iso_year, w.iso_week), w))
        .collect();

    let mut filled = Vec::new();
    let mut monday = start;
    while monday <= end {
        let iso = monday.iso_week();
        let key = (iso.year(), iso.week());
        match by_week.get(&key) {
            Some(week) => filled.push((*week).clone()),
            None => filled.push(WeeklyTotal {
                iso_year: key.0,
                iso_week: key.1,
                distance_km: 0.0,
                duration_secs: 0.0,
                activity_count: 0,
            }),
        }
        monday += chrono::Duration::weeks(1);
    }
    filled
}

fn week_label(week: &WeeklyTotal) -> String {
    format!("W{:02}", week.iso_week)
}

fn day_label(day: &DailyTotal) -> String {
    day.date.format("%m-%d").to_string()
}

// ── Drawing helpers ───────────────────────────────────────────────────────────

fn chart_error<E: std::fmt::Display>(e: E) -> ReportError {
    ReportError::Chart(e.to_string())
}

fn draw_line(
    path: &Path,
    caption: &str,
    y_desc: &str,
    points: &[(String, f64)],
    color: RGBColor,
) -> Result<()> {
    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_error)?;

    let n = points.len().max(1);
    let max_y = points
        .iter()
        .map(|(_, v)| *v)
        .fold(0.0_f64, f64::max)
        .max(1.0);

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 28))
        .margin(12)
        .x_label_area_size(36)
        .y_label_area_size(52)
        .build_cartesian_2d(0..n, 0f64..max_y * 1.1)
        .map_err(chart_error)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n.min(16))
        .x_label_formatter(&|idx: &usize| {
            points.get(*idx).map(|(l, _)| l.clone()).unwrap_or_default()
        })
        .y_desc(y_desc)
        .draw()
        .map_err(chart_error)?;

    chart
        .draw_series(LineSeries::new(
            points.iter().enumerate().map(|(i, (_, v))| (i, *v)),
            &color,
        ))
        .map_err(chart_error)?;

    root.present().map_err(chart_error)?;
    Ok(())
}

fn draw_bars(
    path: &Path,
    caption: &str,
    y_desc: &str,
    bars: &[(String, f64)],
    color: RGBColor,
) -> Result<()> {
    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_error)?;

    let n = bars.len().max(1);
    let max_y = bars
        .iter()
        .map(|(_, v)| *v)
        .fold(0.0_f64, f64::max)
        .max(1.0);

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 28))
        .margin(12)
        .x_label_area_size(36)
        .y_label_area_size(52)
        .build_cartesian_2d(0..n, 0f64..max_y * 1.1)
        .map_err(chart_error)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&|idx: &usize| {
            bars.get(*idx).map(|(l, _)| l.clone()).unwrap_or_default()
        })
        .y_desc(y_desc)
        .draw()
        .map_err(chart_error)?;

    chart
        .draw_series(bars.iter().enumerate().map(|(i, (_, v))| {
            Rectangle::new([(i, 0.0), (i + 1, *v)], color.filled())
        }))
        .map_err(chart_error)?;

    root.present().map_err(chart_error)?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
