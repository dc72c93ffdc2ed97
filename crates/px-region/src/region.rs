//! The `Region` type — one circular geofence, or a global room.

use px_core::{GeoPoint, RegionId};
use serde::{Deserialize, Serialize};

/// A radius at or above this value exceeds any geodesic distance on Earth.
/// Older room records use it instead of the `is_global` flag.
pub const GLOBAL_RADIUS_SENTINEL_M: f64 = 40_000_000.0;

/// Which store record a [`Region`] was normalised from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionKind {
    #[default]
    Room,
    Pin,
}

/// A geofenced area.
///
/// Regions are created by the external store and are read-only here.  Two
/// regions are the same region iff their ids are equal; nothing else is
/// guaranteed to survive between polls.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id:   RegionId,
    pub name: String,
    pub kind: RegionKind,

    /// `None` for rooms that were never anchored to a point.
    pub center: Option<GeoPoint>,

    /// Geofence radius in metres.  Absent for global rooms.
    pub radius_meters: Option<f64>,

    /// Accessible from anywhere; `radius_meters` is ignored.
    pub is_global: bool,

    /// Key of the built-in preset room this region was provisioned from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset_key: Option<String>,

    /// Members the store reports; breaks ties between duplicate rooms.
    #[serde(default)]
    pub participant_count: usize,
}

impl Region {
    /// A local room centred on `center` with the given radius.
    pub fn local(
        id:            impl Into<RegionId>,
        name:          impl Into<String>,
        center:        GeoPoint,
        radius_meters: f64,
    ) -> Self {
        Self {
            id:            id.into(),
            name:          name.into(),
            kind:          RegionKind::Room,
            center:        Some(center),
            radius_meters: Some(radius_meters),
            is_global:     false,
            preset_key:    None,
            participant_count: 0,
        }
    }

    /// A global room with no geofence.
    pub fn global(id: impl Into<RegionId>, name: impl Into<String>) -> Self {
        Self {
            id:            id.into(),
            name:          name.into(),
            kind:          RegionKind::Room,
            center:        None,
            radius_meters: None,
            is_global:     true,
            preset_key:    None,
            participant_count: 0,
        }
    }

    pub fn with_preset_key(mut self, key: impl Into<String>) -> Self {
        self.preset_key = Some(key.into());
        self
    }

    pub fn with_participants(mut self, count: usize) -> Self {
        self.participant_count = count;
        self
    }

    /// Set the centre (builder style).  Mostly useful for global rooms that
    /// still carry a nominal anchor point.
    pub fn with_center(mut self, center: GeoPoint) -> Self {
        self.center = Some(center);
        self
    }

    /// `true` for explicitly global rooms and for the legacy radius sentinel.
    pub fn is_effectively_global(&self) -> bool {
        self.is_global
            || self
                .radius_meters
                .is_some_and(|r| r >= GLOBAL_RADIUS_SENTINEL_M)
    }

    /// The centre if it has finite coordinates.
    pub fn valid_center(&self) -> Option<&GeoPoint> {
        self.center.as_ref().filter(|c| c.is_finite())
    }

    /// The radius if it is a usable geofence radius (finite and positive).
    pub fn valid_radius(&self) -> Option<f64> {
        self.radius_meters.filter(|r| r.is_finite() && *r > 0.0)
    }
}

/// Request body for creating a region in the external store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRegion {
    pub name:          String,
    #[serde(default)]
    pub kind:          RegionKind,
    pub center:        Option<GeoPoint>,
    pub radius_meters: Option<f64>,
    #[serde(default)]
    pub is_global:     bool,

    /// Set for preset rooms; matched before any name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset_key: Option<String>,

    /// Older names an existing copy of this room may still carry.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl NewRegion {
    pub fn local_room(name: impl Into<String>, center: GeoPoint, radius_meters: f64) -> Self {
        Self {
            name:          name.into(),
            kind:          RegionKind::Room,
            center:        Some(center),
            radius_meters: Some(radius_meters),
            is_global:     false,
            preset_key:    None,
            aliases:       Vec::new(),
        }
    }

    pub fn global_room(name: impl Into<String>) -> Self {
        Self {
            name:          name.into(),
            kind:          RegionKind::Room,
            center:        None,
            radius_meters: None,
            is_global:     true,
            preset_key:    None,
            aliases:       Vec::new(),
        }
    }

    pub fn with_preset_key(mut self, key: impl Into<String>) -> Self {
        self.preset_key = Some(key.into());
        self
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// Whether `region` is already a copy of this request: same preset key,
    /// or a name equal (ignoring case and surrounding space) to this name or
    /// one of its aliases.
    pub fn matches_existing(&self, region: &Region) -> bool {
        if let (Some(want), Some(have)) = (&self.preset_key, &region.preset_key) {
            if want == have {
                return true;
            }
        }
        let existing = normalize_region_name(&region.name);
        std::iter::once(&self.name)
            .chain(&self.aliases)
            .any(|name| normalize_region_name(name) == existing)
    }

    /// Materialise the request under the id the store assigned.
    pub fn into_region(self, id: impl Into<RegionId>) -> Region {
        Region {
            id:            id.into(),
            name:          self.name,
            kind:          self.kind,
            center:        self.center,
            radius_meters: self.radius_meters,
            is_global:     self.is_global,
            preset_key:    self.preset_key,
            participant_count: 0,
        }
    }
}

/// Room names compare case-insensitively, ignoring surrounding space.
pub fn normalize_region_name(name: &str) -> String {
    name.trim().to_lowercase()
}
