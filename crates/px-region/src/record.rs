//! Store record shapes and their normalisation into [`Region`].
//!
//! The document store returns two unrelated shapes: chat rooms (optionally
//! anchored, optionally global) and pins (always anchored, radius optional).
//! Both are normalised here, once, so nothing downstream branches on which
//! fields happen to be present.
//!
//! Locations arrive either as a GeoJSON point (`[longitude, latitude]`) or
//! as flat `latitude`/`longitude` fields; the GeoJSON point wins when both
//! are present.
//!
//! ```json
//! { "_id": "r1", "name": "Harbor", "coordinates": { "type": "Point", "coordinates": [-118.19, 33.77] }, "radiusMeters": 1000 }
//! { "id": "r2", "name": "Everywhere", "isGlobal": true, "presetKey": "global-a" }
//! { "_id": "p9", "title": "Taco truck", "latitude": 33.78, "longitude": -118.2, "proximityRadiusMeters": 800 }
//! ```

use px_core::{GeoPoint, RegionId};
use serde::Deserialize;

use crate::{Region, RegionError, RegionKind, RegionResult};

/// Geofence radius given to pins that do not carry one (one mile).
pub const DEFAULT_PIN_RADIUS_M: f64 = 1_609.0;

// ── Records ───────────────────────────────────────────────────────────────────

/// GeoJSON `Point`. Positions are `[longitude, latitude]`.
#[derive(Clone, Debug, Deserialize)]
pub struct GeoJsonPoint {
    #[serde(rename = "type", default)]
    pub kind:        Option<String>,
    pub coordinates: Vec<f64>,
}

impl GeoJsonPoint {
    /// `(latitude, longitude)`, if the position has at least two values.
    pub fn lat_lon(&self) -> Option<(f64, f64)> {
        match self.coordinates.as_slice() {
            [lon, lat, ..] => Some((*lat, *lon)),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomRecord {
    #[serde(alias = "_id")]
    pub id:        String,
    pub name:      String,
    #[serde(default)]
    pub coordinates: Option<GeoJsonPoint>,
    #[serde(default)]
    pub latitude:  Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default, alias = "radius")]
    pub radius_meters: Option<f64>,
    #[serde(default)]
    pub is_global: bool,
    #[serde(default)]
    pub preset_key: Option<String>,
    #[serde(default)]
    pub participant_count: Option<usize>,
    #[serde(default)]
    pub participant_ids: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinRecord {
    #[serde(alias = "_id")]
    pub id:        String,
    pub title:     String,
    #[serde(default)]
    pub coordinates: Option<GeoJsonPoint>,
    #[serde(default)]
    pub latitude:  Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default, alias = "radius", alias = "proximityRadiusMeters")]
    pub radius_meters: Option<f64>,
    #[serde(default)]
    pub participant_count: Option<usize>,
}

/// Either record shape, as found in a mixed listing.
///
/// Pins are tried first: they are the only shape with a required `title`.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum StoreRecord {
    Pin(PinRecord),
    Room(RoomRecord),
}

// ── Normalisation ─────────────────────────────────────────────────────────────

impl Region {
    pub fn from_room(record: RoomRecord) -> RegionResult<Region> {
        let id = checked_id(record.id)?;

        let center = record_center(record.coordinates.as_ref(), record.latitude, record.longitude)?;

        // Global rooms ignore their radius entirely.
        let radius_meters = if record.is_global {
            None
        } else {
            record.radius_meters.map(|r| checked_radius(&id, r)).transpose()?
        };

        let participant_count = record
            .participant_count
            .unwrap_or(0)
            .max(record.participant_ids.len());
        let preset_key = record
            .preset_key
            .map(|k| k.trim().to_owned())
            .filter(|k| !k.is_empty());

        Ok(Region {
            id,
            name: record.name,
            kind: RegionKind::Room,
            center,
            radius_meters,
            is_global: record.is_global,
            preset_key,
            participant_count,
        })
    }

    pub fn from_pin(record: PinRecord) -> RegionResult<Region> {
        let id = checked_id(record.id)?;
        let center = record_center(record.coordinates.as_ref(), record.latitude, record.longitude)?
            .ok_or_else(|| RegionError::MissingLocation { id: id.clone() })?;
        let radius = match record.radius_meters {
            Some(r) => checked_radius(&id, r)?,
            None => DEFAULT_PIN_RADIUS_M,
        };

        Ok(Region {
            id,
            name: record.title,
            kind: RegionKind::Pin,
            center: Some(center),
            radius_meters: Some(radius),
            is_global: false,
            preset_key: None,
            participant_count: record.participant_count.unwrap_or(0),
        })
    }
}

impl StoreRecord {
    pub fn into_region(self) -> RegionResult<Region> {
        match self {
            StoreRecord::Pin(p) => Region::from_pin(p),
            StoreRecord::Room(r) => Region::from_room(r),
        }
    }
}

impl TryFrom<RoomRecord> for Region {
    type Error = RegionError;
    fn try_from(record: RoomRecord) -> RegionResult<Region> {
        Region::from_room(record)
    }
}

impl TryFrom<PinRecord> for Region {
    type Error = RegionError;
    fn try_from(record: PinRecord) -> RegionResult<Region> {
        Region::from_pin(record)
    }
}

/// Normalise a mixed listing, skipping records that fail normalisation.
///
/// Returns the regions in input order plus the errors for the skipped ones.
pub fn normalize_records(
    records: impl IntoIterator<Item = StoreRecord>,
) -> (Vec<Region>, Vec<RegionError>) {
    let mut regions = Vec::new();
    let mut errors = Vec::new();
    for record in records {
        match record.into_region() {
            Ok(r) => regions.push(r),
            Err(e) => errors.push(e),
        }
    }
    (regions, errors)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn checked_id(id: String) -> RegionResult<RegionId> {
    if id.trim().is_empty() {
        return Err(RegionError::MissingId);
    }
    Ok(RegionId(id))
}

fn record_center(
    point: Option<&GeoJsonPoint>,
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> RegionResult<Option<GeoPoint>> {
    let pair = match point.and_then(GeoJsonPoint::lat_lon) {
        Some(pair) => Some(pair),
        None => latitude.zip(longitude),
    };
    let Some((lat, lon)) = pair else {
        return Ok(None);
    };
    Ok(Some(GeoPoint::checked(lat, lon)?))
}

fn checked_radius(id: &RegionId, radius: f64) -> RegionResult<f64> {
    if radius.is_finite() && radius > 0.0 {
        Ok(radius)
    } else {
        Err(RegionError::InvalidRadius { id: id.clone(), radius })
    }
}
