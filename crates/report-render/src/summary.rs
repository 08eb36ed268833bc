//! Console summary block printed at the end of a run.

use report_core::formatting::{format_hours_minutes, format_number};
use report_data::aggregator::SummaryStats;

/// Render the "Key stats" block as a string.
///
/// Kept separate from printing so the exact output is testable.
pub fn render_summary(year: i32, stats: &SummaryStats, skipped_records: u32) -> String {
    let mut out = String::new();
    out.push_str(&format!("Key stats for {}:\n", year));
    out.push_str(&format!("- activities: {}\n", stats.activity_count));

    if let Some((first, last)) = stats.date_range {
        out.push_str(&format!("- date range: {} to {}\n", first, last));
    }

    out.push_str(&format!(
        "- total distance: {} km ({} mi)\n",
        format_number(stats.total_distance_km, 1),
        format_number(stats.total_distance_mi, 1),
    ));
    out.push_str(&format!(
        "- median distance: {} mi\n",
        format_number(stats.median_distance_mi, 2),
    ));
    out.push_str(&format!(
        "- total time: {}\n",
        format_hours_minutes(stats.total_hours),
    ));
    out.push_str(&format!(
        "- median duration: {} min\n",
        format_number(stats.median_duration_min, 1),
    ));
    out.push_str(&format!(
        "- total calories: {}\n",
        format_number(stats.total_calories, 0),
    ));

    if let Some(mean) = stats.mean_avg_hr {
        match stats.peak_max_hr {
            Some(peak) => out.push_str(&format!(
                "- heart rate: {} bpm avg, {} bpm peak\n",
                format_number(mean, 1),
                format_number(peak, 0),
            )),
            None => out.push_str(&format!("- heart rate: {} bpm avg\n", format_number(mean, 1))),
        }
    }

    if !stats.top_types.is_empty() {
        let top: Vec<String> = stats
            .top_types
            .iter()
            .map(|t| format!("{} ({})", t.activity_type, t.count))
            .collect();
        out.push_str(&format!("- top sports: {}\n", top.join(", ")));
    }

    if skipped_records > 0 {
        out.push_str(&format!(
            "- skipped records (failed coercion): {}\n",
            skipped_records
        ));
    }

    out
}

/// Print the summary block to stdout.
pub fn print_summary(year: i32, stats: &SummaryStats, skipped_records: u32) {
    print!("{}", render_summary(year, stats, skipped_records));
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use report_data::aggregator::TypeCount;

    fn sample_stats() -> SummaryStats {
        SummaryStats {
            activity_count: 120,
            date_range: Some((
                NaiveDate::from_ymd_opt(2025, 1, 4).unwrap(),
                NaiveDate::from_ymd_opt(2025, 12, 28).unwrap(),
            )),
            total_distance_km: 1534.2,
            total_distance_mi: 953.3,
            median_distance_mi: 3.11,
            total_hours: 210.5,
            median_duration_min: 46.5,
            total_calories: 98_765.0,
            mean_avg_hr: Some(141.2),
            peak_max_hr: Some(189.0),
            top_types: vec![
                TypeCount {
                    activity_type: "RUNNING".to_string(),
                    count: 80,
                },
                TypeCount {
                    activity_type: "CYCLING".to_string(),
                    count: 25,
                },
            ],
        }
    }

    #[test]
    fn test_summary_contains_headline_numbers() {
        let text = render_summary(2025, &sample_stats(), 0);
        assert!(text.starts_with("Key stats for 2025:"));
        assert!(text.contains("- activities: 120"));
        assert!(text.contains("- total distance: 1,534.2 km (953.3 mi)"));
        assert!(text.contains("- total time: 210h 30m"));
        assert!(text.contains("- total calories: 98,765"));
        assert!(text.contains("- heart rate: 141.2 bpm avg, 189 bpm peak"));
        assert!(text.contains("- top sports: RUNNING (80), CYCLING (25)"));
    }

    #[test]
    fn test_summary_omits_skip_line_when_zero() {
        let text = render_summary(2025, &sample_stats(), 0);
        assert!(!text.contains("skipped records"));
    }

    #[test]
    fn test_summary_reports_skipped_records() {
        let text = render_summary(2025, &sample_stats(), 3);
        assert!(text.contains("- skipped records (failed coercion): 3"));
    }

    #[test]
    fn test_summary_empty_season() {
        let text = render_summary(2025, &SummaryStats::default(), 0);
        assert!(text.contains("- activities: 0"));
        assert!(!text.contains("date range"));
        assert!(!text.contains("heart rate"));
        assert!(!text.contains("top sports"));
    }
}
