//! Point-in-region access evaluation.
//!
//! Evaluation never fails.  Bad input either denies access with a
//! [`Denial`] suitable for direct display, or fails open when the region
//! itself cannot be geofenced.

use std::fmt;

use px_core::{GeoPoint, format_distance};

use crate::Region;

/// Why access to a region was denied.
#[derive(Clone, Debug, PartialEq)]
pub enum Denial {
    NoRegion,
    LocationRequired,
    OutOfRange {
        region_name:     String,
        distance_meters: f64,
        radius_meters:   f64,
    },
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Denial::NoRegion => f.write_str("no region selected"),
            Denial::LocationRequired => f.write_str("location required"),
            Denial::OutOfRange { region_name, distance_meters, radius_meters } => write!(
                f,
                "{region_name} is out of range; you are {} away, must be within {}",
                format_distance(*distance_meters),
                format_distance(*radius_meters),
            ),
        }
    }
}

/// Outcome of evaluating one (region, point) pair.  Never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionAccess {
    pub allowed:         bool,
    pub reason:          Option<Denial>,
    pub distance_meters: Option<f64>,
    pub radius_meters:   Option<f64>,
}

impl RegionAccess {
    /// Allowed with no measured distance (global or non-geofenced region).
    pub fn open() -> Self {
        Self {
            allowed:         true,
            reason:          None,
            distance_meters: None,
            radius_meters:   None,
        }
    }

    fn inside(distance_meters: f64, radius_meters: f64) -> Self {
        Self {
            allowed:         true,
            reason:          None,
            distance_meters: Some(distance_meters),
            radius_meters:   Some(radius_meters),
        }
    }

    fn denied(reason: Denial) -> Self {
        let (distance_meters, radius_meters) = match &reason {
            Denial::OutOfRange { distance_meters, radius_meters, .. } => {
                (Some(*distance_meters), Some(*radius_meters))
            }
            _ => (None, None),
        };
        Self {
            allowed: false,
            reason: Some(reason),
            distance_meters,
            radius_meters,
        }
    }

    /// The denial reason rendered for display.
    pub fn reason_text(&self) -> Option<String> {
        self.reason.as_ref().map(ToString::to_string)
    }

    pub fn distance_label(&self) -> Option<String> {
        self.distance_meters.map(format_distance)
    }

    pub fn radius_label(&self) -> Option<String> {
        self.radius_meters.map(format_distance)
    }
}

/// Decide whether `point` may access `region`.
///
/// Rules, in order:
///
/// 1. no region → denied ("no region selected");
/// 2. global region (flag or radius sentinel) → allowed regardless of point;
/// 3. no finite centre, or no usable radius → allowed (not geofenced);
/// 4. no point, or a non-finite one → denied ("location required");
/// 5. unknown distance → allowed; beyond the radius → denied; else allowed.
pub fn evaluate_access(region: Option<&Region>, point: Option<&GeoPoint>) -> RegionAccess {
    let Some(region) = region else {
        return RegionAccess::denied(Denial::NoRegion);
    };

    if region.is_effectively_global() {
        return RegionAccess::open();
    }

    let (Some(center), Some(radius)) = (region.valid_center(), region.valid_radius()) else {
        return RegionAccess::open();
    };

    let Some(point) = point.filter(|p| p.is_finite()) else {
        return RegionAccess::denied(Denial::LocationRequired);
    };

    let distance = point.distance_m(center);
    if !distance.is_finite() {
        return RegionAccess::open();
    }

    if distance > radius {
        RegionAccess::denied(Denial::OutOfRange {
            region_name:     region.name.clone(),
            distance_meters: distance,
            radius_meters:   radius,
        })
    } else {
        RegionAccess::inside(distance, radius)
    }
}
