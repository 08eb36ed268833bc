//! Unit conversions for the Garmin export.
//!
//! The JSON export stores distances in centimeters and durations in
//! milliseconds; everything downstream works in kilometers and seconds.

/// Centimeters per kilometer.
pub const CM_PER_KM: f64 = 100_000.0;

/// Miles per kilometer.
pub const MI_PER_KM: f64 = 0.621371;

/// Convert a raw centimeter distance to kilometers.
pub fn cm_to_km(cm: f64) -> f64 {
    cm / CM_PER_KM
}

/// Convert kilometers to miles.
pub fn km_to_mi(km: f64) -> f64 {
    km * MI_PER_KM
}

/// Convert milliseconds to seconds.
pub fn ms_to_secs(ms: f64) -> f64 {
    ms / 1000.0
}
