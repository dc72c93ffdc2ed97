//! The `LocationSimulator` — a simulated position the user can teleport and
//! nudge around without a real GPS.

use px_core::GeoPoint;
use px_core::geo::{
    clamp_latitude, meters_to_latitude_degrees, meters_to_longitude_degrees, normalize_longitude,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Direction, Preset, PresetTable, SimError, SimResult};

/// Shifts below this many degrees on both axes are treated as no movement.
pub const MIN_SHIFT_DEGREES: f64 = 1e-9;

/// The simulator's current position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulatedLocation {
    pub point: GeoPoint,

    /// Key of the preset just teleported to; `None` after any nudge.
    pub preset_key: Option<String>,
}

/// Holds one simulated position.
///
/// All operations are synchronous, do no I/O, and replace the location in a
/// single assignment, so a reader never sees a half-applied move.  Pushing
/// the new position anywhere is the caller's job.
#[derive(Clone, Debug, Default)]
pub struct LocationSimulator {
    location: Option<SimulatedLocation>,
}

impl LocationSimulator {
    /// A simulator with no position yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// A simulator starting at `point` (not a preset).
    pub fn starting_at(point: GeoPoint) -> Self {
        Self {
            location: Some(SimulatedLocation { point: point.normalized(), preset_key: None }),
        }
    }

    pub fn location(&self) -> Option<&SimulatedLocation> {
        self.location.as_ref()
    }

    pub fn point(&self) -> Option<&GeoPoint> {
        self.location.as_ref().map(|l| &l.point)
    }

    /// Jump to `preset`.
    pub fn teleport(&mut self, preset: &Preset) -> SimulatedLocation {
        let location = SimulatedLocation {
            point:      preset.point(),
            preset_key: Some(preset.key.clone()),
        };
        debug!(preset = %preset.key, point = %location.point, "teleport");
        self.location = Some(location.clone());
        location
    }

    /// Jump to the preset named `key` in `table`.
    pub fn teleport_to(&mut self, table: &PresetTable, key: &str) -> SimResult<SimulatedLocation> {
        let preset = table.require(key)?;
        Ok(self.teleport(preset))
    }

    /// Replace the position with an externally sourced fix (e.g. a device
    /// sample).  Clears the preset key.
    pub fn set_point(&mut self, point: GeoPoint) -> SimResult<SimulatedLocation> {
        if !point.is_finite() {
            return Err(SimError::Core(px_core::CoreError::NonFiniteCoordinate {
                latitude:  point.latitude,
                longitude: point.longitude,
            }));
        }
        let location = SimulatedLocation { point: point.normalized(), preset_key: None };
        self.location = Some(location.clone());
        Ok(location)
    }

    /// Move `step_meters` in `direction` along a great circle.
    ///
    /// Latitude is clamped and longitude wrapped after the shift, and the
    /// preset key is cleared.  Returns `None` and leaves the location
    /// untouched when there is no finite location to move from or when the
    /// resulting point is within [`MIN_SHIFT_DEGREES`] of the start on both
    /// axes (zero step, an east/west step at a pole, or a step past one).
    pub fn nudge(&mut self, direction: Direction, step_meters: f64) -> Option<SimulatedLocation> {
        let current = self.location.as_ref()?.point;
        if !current.is_finite() {
            return None;
        }

        let (lat_sign, lon_sign) = direction.signs();
        let d_lat = lat_sign * meters_to_latitude_degrees(step_meters);
        let d_lon = lon_sign * meters_to_longitude_degrees(step_meters, current.latitude);

        if !d_lat.is_finite() || !d_lon.is_finite() {
            return None;
        }

        let mut point = current;
        point.latitude = clamp_latitude(current.latitude + d_lat);
        point.longitude = normalize_longitude(current.longitude + d_lon);

        // Compared after clamping: a step past a pole lands where it started.
        if (point.latitude - current.latitude).abs() < MIN_SHIFT_DEGREES
            && (point.longitude - current.longitude).abs() < MIN_SHIFT_DEGREES
        {
            debug!(%direction, step_meters, "nudge below shift threshold; ignored");
            return None;
        }

        let location = SimulatedLocation { point, preset_key: None };
        debug!(%direction, step_meters, point = %location.point, "nudge");
        self.location = Some(location.clone());
        Some(location)
    }

    /// Forget the current position.
    pub fn clear(&mut self) {
        self.location = None;
    }
}
