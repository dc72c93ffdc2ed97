//! Geographic coordinate type and spherical-earth math.
//!
//! Everything here assumes a sphere of radius [`EARTH_RADIUS_M`].  Access
//! evaluation and distance display both go through [`haversine_distance_m`]
//! so they can never disagree about what lies inside a region.

use std::f64::consts::PI;
use std::fmt;

use crate::{CoreError, CoreResult};

/// Mean Earth radius, metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Below this `|cos(lat)|` a longitude shift is treated as zero (pole).
const POLE_COS_EPSILON: f64 = 1e-6;

// ── GeoPoint ──────────────────────────────────────────────────────────────────

/// A WGS-84 position sample.
///
/// Latitude and longitude are the only required fields.  The optional fields
/// mirror what a device geolocation fix carries and are passed through
/// untouched by the math in this module.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub latitude:  f64,
    pub longitude: f64,

    /// Horizontal accuracy radius, metres (≥ 0).
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub accuracy: Option<f64>,

    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub altitude: Option<f64>,

    /// Degrees clockwise from true north.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub heading: Option<f64>,

    /// Metres per second.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub speed: Option<f64>,
}

impl GeoPoint {
    #[inline]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            ..Self::default()
        }
    }

    /// Build a point from raw coordinates, rejecting non-finite values and
    /// normalising the rest into range.
    pub fn checked(latitude: f64, longitude: f64) -> CoreResult<Self> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(CoreError::NonFiniteCoordinate { latitude, longitude });
        }
        Ok(Self::new(latitude, longitude).normalized())
    }

    /// Attach an accuracy radius.  Negative or non-finite values are dropped.
    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = (accuracy.is_finite() && accuracy >= 0.0).then_some(accuracy);
        self
    }

    /// `true` when both latitude and longitude are finite numbers.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Clamp latitude to [-90, 90] and wrap longitude into (-180, 180].
    pub fn normalized(mut self) -> Self {
        self.latitude = clamp_latitude(self.latitude);
        self.longitude = normalize_longitude(self.longitude);
        self
    }

    /// Great-circle distance in metres; `NaN` if either point is non-finite.
    #[inline]
    pub fn distance_m(&self, other: &GeoPoint) -> f64 {
        haversine_distance_m(self, other)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

// ── Free functions ────────────────────────────────────────────────────────────

#[inline]
pub fn to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

/// Haversine great-circle distance in metres.
///
/// Returns `NaN` when either point has a non-finite coordinate.  Callers must
/// read a non-finite result as "distance unknown", never as zero.
pub fn haversine_distance_m(a: &GeoPoint, b: &GeoPoint) -> f64 {
    if !a.is_finite() || !b.is_finite() {
        return f64::NAN;
    }

    let d_lat = to_radians(b.latitude - a.latitude);
    let d_lon = to_radians(b.longitude - a.longitude);

    let lat1 = to_radians(a.latitude);
    let lat2 = to_radians(b.latitude);

    let h = (d_lat * 0.5).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

    // Rounding can push `h` a hair outside [0, 1] for antipodal points.
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * c
}

/// [`haversine_distance_m`] over optional endpoints; `NaN` if either is absent.
pub fn distance_between(a: Option<&GeoPoint>, b: Option<&GeoPoint>) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) => haversine_distance_m(a, b),
        _ => f64::NAN,
    }
}

/// Degrees of latitude spanned by `meters` along a meridian.
#[inline]
pub fn meters_to_latitude_degrees(meters: f64) -> f64 {
    meters / EARTH_RADIUS_M * (180.0 / PI)
}

/// Degrees of longitude spanned by `meters` along the parallel at
/// `at_latitude`.
///
/// Returns `0.0` near the poles where `cos(latitude)` collapses.
pub fn meters_to_longitude_degrees(meters: f64, at_latitude: f64) -> f64 {
    let cos_lat = to_radians(at_latitude).cos();
    if cos_lat.abs() < POLE_COS_EPSILON {
        return 0.0;
    }
    meters_to_latitude_degrees(meters) / cos_lat
}

#[inline]
pub fn clamp_latitude(value: f64) -> f64 {
    value.clamp(-90.0, 90.0)
}

/// Wrap a longitude into (-180, 180].
///
/// Values already in range are returned bit-for-bit, which keeps the
/// function idempotent under floating-point rounding.  Non-finite input is
/// returned unchanged.
pub fn normalize_longitude(value: f64) -> f64 {
    if !value.is_finite() || (value > -180.0 && value <= 180.0) {
        return value;
    }
    // rem_euclid lands in [0, 360]; 360 itself can appear through rounding.
    let wrapped = value.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}
