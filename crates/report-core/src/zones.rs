//! Heart-rate training zones.
//!
//! Five buckets anchored at the common percent-of-max boundaries
//! (50/60/70/80/90%). Everything below zone 1 counts as zone 1; everything
//! at or above the zone 5 boundary counts as zone 5.

/// Fractions of max HR where each zone begins.
const ZONE_FRACTIONS: [f64; 5] = [0.5, 0.6, 0.7, 0.8, 0.9];

/// Number of heart-rate zones.
pub const ZONE_COUNT: usize = ZONE_FRACTIONS.len();

/// Heart-rate zone boundaries derived from a maximum heart rate.
#[derive(Debug, Clone, PartialEq)]
pub struct HrZones {
    /// BPM where each zone starts, ascending.
    lower_bounds: [f64; ZONE_COUNT],
}

impl HrZones {
    /// Build the five standard zones from a maximum heart rate in BPM.
    pub fn from_max_hr(max_hr: f64) -> Self {
        let mut lower_bounds = [0.0; ZONE_COUNT];
        for (bound, fraction) in lower_bounds.iter_mut().zip(ZONE_FRACTIONS) {
            *bound = max_hr * fraction;
        }
        Self { lower_bounds }
    }

    /// Zone index (0-based) for an average heart rate.
    pub fn zone_index(&self, hr: f64) -> usize {
        self.lower_bounds
            .iter()
            .rposition(|bound| hr >= *bound)
            .unwrap_or(0)
    }

    /// Human-readable label for a zone index, e.g. `"Zone 3"`.
    pub fn label(index: usize) -> String {
        format!("Zone {}", index + 1)
    }

    /// The BPM range covered by a zone, as `(lower, Option<upper>)`.
    /// The top zone has no upper bound.
    pub fn bounds(&self, index: usize) -> (f64, Option<f64>) {
        let lower = self.lower_bounds[index];
        let upper = self.lower_bounds.get(index + 1).copied();
        (lower, upper)
    }
}

impl Default for HrZones {
    /// Zones for the 190 BPM default maximum.
    fn default() -> Self {
        Self::from_max_hr(190.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_boundaries_for_190() {
        let zones = HrZones::from_max_hr(190.0);
        assert_eq!(zones.bounds(0), (95.0, Some(114.0)));
        assert_eq!(zones.bounds(4), (171.0, None));
    }

    #[test]
    fn test_zone_index_mid_range() {
        let zones = HrZones::from_max_hr(190.0);
        assert_eq!(zones.zone_index(100.0), 0);
        assert_eq!(zones.zone_index(120.0), 1);
        assert_eq!(zones.zone_index(140.0), 2);
        assert_eq!(zones.zone_index(160.0), 3);
        assert_eq!(zones.zone_index(180.0), 4);
    }

    #[test]
    fn test_zone_index_below_first_boundary() {
        let zones = HrZones::from_max_hr(190.0);
        assert_eq!(zones.zone_index(60.0), 0);
    }

    #[test]
    fn test_zone_index_exact_boundary() {
        let zones = HrZones::from_max_hr(190.0);
        // 190 * 0.9 = 171: the zone 5 boundary belongs to zone 5.
        assert_eq!(zones.zone_index(171.0), 4);
    }

    #[test]
    fn test_label() {
        assert_eq!(HrZones::label(0), "Zone 1");
        assert_eq!(HrZones::label(4), "Zone 5");
    }
}
