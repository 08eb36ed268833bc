//! Derived views over the cleaned activity table.
//!
//! All functions are pure and produce well-defined empty views for an empty
//! table. Ordering is deterministic for identical input.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use report_core::models::Activity;
use report_core::zones::{HrZones, ZONE_COUNT};

// ── Weekly totals ─────────────────────────────────────────────────────────────

/// Summed distance and time for one ISO week.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyTotal {
    /// ISO week-numbering year (differs from the calendar year at the edges).
    pub iso_year: i32,
    /// ISO week number, 1–53.
    pub iso_week: u32,
    pub distance_km: f64,
    pub duration_secs: f64,
    pub activity_count: u32,
}

/// Aggregate by ISO week, ascending. Weeks with no activities are absent.
pub fn aggregate_weekly(activities: &[Activity]) -> Vec<WeeklyTotal> {
    let mut map: BTreeMap<(i32, u32), WeeklyTotal> = BTreeMap::new();

    for activity in activities {
        let iso = activity.start_time.date().iso_week();
        let entry = map
            .entry((iso.year(), iso.week()))
            .or_insert_with(|| WeeklyTotal {
                iso_year: iso.year(),
                iso_week: iso.week(),
                distance_km: 0.0,
                duration_secs: 0.0,
                activity_count: 0,
            });
        entry.distance_km += activity.distance_km;
        entry.duration_secs += activity.duration_secs;
        entry.activity_count += 1;
    }

    map.into_values().collect()
}

// ── Daily totals ──────────────────────────────────────────────────────────────

/// Summed distance for one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub distance_mi: f64,
}

/// Aggregate distance in miles per calendar day, ascending. Days with no
/// activities are absent.
pub fn aggregate_daily(activities: &[Activity]) -> Vec<DailyTotal> {
    let mut map: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for activity in activities {
        *map.entry(activity.start_time.date()).or_insert(0.0) += activity.distance_mi();
    }

    map.into_iter()
        .map(|(date, distance_mi)| DailyTotal { date, distance_mi })
        .collect()
}

// ── Sport groups ──────────────────────────────────────────────────────────────

/// Merge near-duplicate sport labels for the per-sport views. The cleaned
/// table keeps the raw label.
pub fn sport_group(activity_type: &str) -> &str {
    match activity_type {
        "TRAINING" => "FITNESS_EQUIPMENT",
        other => other,
    }
}

// ── Activity-type counts ──────────────────────────────────────────────────────

/// Number of activities for one sport label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeCount {
    pub activity_type: String,
    pub count: u64,
}

/// Count activities per sport group, ordered by descending count with the
/// label as tiebreaker.
pub fn count_by_type(activities: &[Activity]) -> Vec<TypeCount> {
    let mut map: BTreeMap<&str, u64> = BTreeMap::new();
    for activity in activities {
        *map.entry(sport_group(&activity.activity_type)).or_insert(0) += 1;
    }

    let mut counts: Vec<TypeCount> = map
        .into_iter()
        .map(|(activity_type, count)| TypeCount {
            activity_type: activity_type.to_string(),
            count,
        })
        .collect();
    counts.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.activity_type.cmp(&b.activity_type))
    });
    counts
}

// ── Median duration per sport ─────────────────────────────────────────────────

/// Median activity duration for one sport label.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeMedian {
    pub activity_type: String,
    pub median_minutes: f64,
}

/// Median duration in minutes per sport group, ordered by descending median
/// with the label as tiebreaker.
pub fn median_duration_by_type(activities: &[Activity]) -> Vec<TypeMedian> {
    let mut map: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for activity in activities {
        map.entry(sport_group(&activity.activity_type))
            .or_default()
            .push(activity.duration_minutes());
    }

    let mut medians: Vec<TypeMedian> = map
        .into_iter()
        .map(|(label, minutes)| TypeMedian {
            activity_type: label.to_string(),
            median_minutes: median(minutes),
        })
        .collect();
    medians.sort_by(|a, b| {
        b.median_minutes
            .partial_cmp(&a.median_minutes)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.activity_type.cmp(&b.activity_type))
    });
    medians
}

// ── Heart-rate zone distribution ──────────────────────────────────────────────

/// Per-zone activity counts based on average heart rate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HrZoneDistribution {
    /// Activity count per zone, index 0 = zone 1.
    pub zone_counts: [u64; ZONE_COUNT],
    /// Activities excluded for missing heart-rate data.
    pub missing_hr: u64,
}

/// Bin each activity's average heart rate into `zones`. Activities without
/// an average HR are excluded from the bins and counted separately.
pub fn hr_zone_distribution(activities: &[Activity], zones: &HrZones) -> HrZoneDistribution {
    let mut dist = HrZoneDistribution::default();
    for activity in activities {
        match activity.avg_hr {
            Some(hr) => dist.zone_counts[zones.zone_index(hr)] += 1,
            None => dist.missing_hr += 1,
        }
    }
    dist
}

// ── Season summary ────────────────────────────────────────────────────────────

/// Headline statistics printed at the end of a run.
#[derive(Debug, Clone, Default)]
pub struct SummaryStats {
    pub activity_count: usize,
    /// First and last activity dates of the season.
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    pub total_distance_km: f64,
    pub total_distance_mi: f64,
    pub median_distance_mi: f64,
    pub total_hours: f64,
    pub median_duration_min: f64,
    pub total_calories: f64,
    /// Mean of the per-activity average heart rates, where present.
    pub mean_avg_hr: Option<f64>,
    /// Highest recorded max heart rate, where present.
    pub peak_max_hr: Option<f64>,
    /// Most frequent sports, descending, at most five.
    pub top_types: Vec<TypeCount>,
}

/// Compute season-level summary statistics.
pub fn compute_summary(activities: &[Activity]) -> SummaryStats {
    let mut stats = SummaryStats {
        activity_count: activities.len(),
        ..SummaryStats::default()
    };

    if activities.is_empty() {
        return stats;
    }

    let mut dates: Vec<NaiveDate> = activities.iter().map(|a| a.start_time.date()).collect();
    dates.sort();
    stats.date_range = Some((dates[0], dates[dates.len() - 1]));

    stats.total_distance_km = activities.iter().map(|a| a.distance_km).sum();
    stats.total_distance_mi = activities.iter().map(|a| a.distance_mi()).sum();
    stats.median_distance_mi = median(activities.iter().map(|a| a.distance_mi()).collect());

    let total_secs: f64 = activities.iter().map(|a| a.duration_secs).sum();
    stats.total_hours = total_secs / 3600.0;
    stats.median_duration_min = median(activities.iter().map(|a| a.duration_minutes()).collect());

    stats.total_calories = activities.iter().filter_map(|a| a.calories).sum();

    let hrs: Vec<f64> = activities.iter().filter_map(|a| a.avg_hr).collect();
    if !hrs.is_empty() {
        stats.mean_avg_hr = Some(hrs.iter().sum::<f64>() / hrs.len() as f64);
    }
    stats.peak_max_hr = activities
        .iter()
        .filter_map(|a| a.max_hr)
        .fold(None, |acc, hr| Some(acc.map_or(hr, |m: f64| m.max(hr))));

    stats.top_types = count_by_type(activities).into_iter().take(5).collect();

    stats
}

/// Median of an unsorted sample; 0.0 for an empty one.
fn median(mut values: Vec<f64>) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
