//! Narrow interfaces onto the host application's backend.
//!
//! The engine never talks to a transport directly.  Whatever the host uses
//! to reach its document store implements these traits; tests and the demo
//! use [`MemoryBackend`][crate::MemoryBackend].

use std::fmt;

use async_trait::async_trait;
use px_core::{GeoPoint, RegionId, UserId};
use px_region::{NewRegion, Region};

use crate::{RemoteResult, TransitionNotice};

/// Names each remote operation, for error messages and failure injection.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    FetchRegions,
    CreateRegion,
    PushLocation,
    RecordPresence,
    CreateNotification,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operation::FetchRegions       => "fetch regions",
            Operation::CreateRegion       => "create region",
            Operation::PushLocation       => "location update",
            Operation::RecordPresence     => "presence update",
            Operation::CreateNotification => "transition notification",
        };
        f.write_str(s)
    }
}

/// Restricts a region listing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegionFilter {
    /// Only regions created by this user.
    pub owner: Option<UserId>,

    /// Only regions anchored within `radius_meters` of `point`.  Global
    /// regions always pass.
    pub near: Option<Anchor>,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Anchor {
    pub point:         GeoPoint,
    pub radius_meters: f64,
}

impl RegionFilter {
    /// No restriction.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn owned_by(owner: UserId) -> Self {
        Self { owner: Some(owner), near: None }
    }

    pub fn near(point: GeoPoint, radius_meters: f64) -> Self {
        Self { owner: None, near: Some(Anchor { point, radius_meters }) }
    }

    /// Whether `region` (created by `owner`) passes this filter.
    pub fn matches(&self, region: &Region, owner: Option<&UserId>) -> bool {
        if let Some(want) = &self.owner {
            if owner != Some(want) {
                return false;
            }
        }
        if let Some(anchor) = &self.near {
            if !region.is_effectively_global() {
                let within = region
                    .valid_center()
                    .map(|c| c.distance_m(&anchor.point))
                    .is_some_and(|d| d <= anchor.radius_meters);
                if !within {
                    return false;
                }
            }
        }
        true
    }
}

/// Room / pin listing and lazy provisioning.
#[async_trait]
pub trait RegionStore: Send + Sync {
    async fn fetch_regions(&self, filter: &RegionFilter) -> RemoteResult<Vec<Region>>;

    async fn create_region(&self, spec: NewRegion) -> RemoteResult<Region>;
}

/// Propagates the (simulated) location to the store.
#[async_trait]
pub trait LocationSink: Send + Sync {
    async fn push_location_update(&self, user: &UserId, point: &GeoPoint) -> RemoteResult<()>;
}

/// Marks the user as present in a region.
#[async_trait]
pub trait PresenceSink: Send + Sync {
    async fn record_presence(&self, region: &RegionId, user: &UserId) -> RemoteResult<()>;
}

/// Persists transition notifications for the user.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn create_transition_notification(
        &self,
        user:   &UserId,
        notice: &TransitionNotice,
    ) -> RemoteResult<()>;
}

/// Opaque "who is signed in" lookup.
pub trait IdentityProvider: Send + Sync {
    fn current_user_id(&self) -> Option<UserId>;
}

/// A fixed identity, handy for tools and tests.
#[derive(Clone, Debug, Default)]
pub struct StaticIdentity(pub Option<UserId>);

impl IdentityProvider for StaticIdentity {
    fn current_user_id(&self) -> Option<UserId> {
        self.0.clone()
    }
}
