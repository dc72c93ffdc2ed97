//! Distance units and display labels.

/// One international mile in metres.
pub const MILE_M: f64 = 1_609.344;

#[inline]
pub fn miles_to_meters(miles: f64) -> f64 {
    miles * MILE_M
}

#[inline]
pub fn meters_to_miles(meters: f64) -> f64 {
    meters / MILE_M
}

/// Human-readable distance: `"1.2 km"` at or above 1000 m, else `"850 m"`.
///
/// Non-finite input renders as `"unknown distance"`.
pub fn format_distance(meters: f64) -> String {
    if !meters.is_finite() {
        return "unknown distance".to_owned();
    }
    if meters >= 1_000.0 {
        format!("{:.1} km", meters / 1_000.0)
    } else {
        format!("{} m", meters.round() as i64)
    }
}
