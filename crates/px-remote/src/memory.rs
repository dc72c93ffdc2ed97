//! In-process backend implementing every remote interface.
//!
//! Keeps call logs so tests can assert on exactly what was sent, and lets
//! each [`Operation`] be switched to fail.  Notifications can also be held
//! at a gate to simulate a slow store while announcements are in flight.

use std::collections::HashSet;

use async_trait::async_trait;
use parking_lot::Mutex;
use px_core::{GeoPoint, RegionId, UserId};
use px_region::{NewRegion, Region};
use tokio::sync::watch;

use crate::{
    IdentityProvider, LocationSink, NotificationSink, Operation, PresenceSink, RegionFilter,
    RegionStore, RemoteError, RemoteResult, TransitionNotice,
};

#[derive(Default)]
struct Inner {
    /// `(owner, region)` in insertion order.
    regions:   Vec<(Option<UserId>, Region)>,
    next_id:   u64,
    locations: Vec<(UserId, GeoPoint)>,
    presence:  Vec<(RegionId, UserId)>,
    notices:   Vec<(UserId, TransitionNotice)>,
    failing:   HashSet<Operation>,
}

pub struct MemoryBackend {
    inner: Mutex<Inner>,
    user:  Mutex<Option<UserId>>,
    /// `true` while notifications may complete.
    gate:  watch::Sender<bool>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        let (gate, _) = watch::channel(true);
        Self {
            inner: Mutex::new(Inner::default()),
            user:  Mutex::new(None),
            gate,
        }
    }

    /// A backend with `user` signed in.
    pub fn signed_in(user: impl Into<UserId>) -> Self {
        let backend = Self::new();
        backend.sign_in(user);
        backend
    }

    // ── Setup ─────────────────────────────────────────────────────────────

    pub fn sign_in(&self, user: impl Into<UserId>) {
        *self.user.lock() = Some(user.into());
    }

    pub fn sign_out(&self) {
        *self.user.lock() = None;
    }

    /// Seed a region with no owner.
    pub fn insert_region(&self, region: Region) {
        self.inner.lock().regions.push((None, region));
    }

    pub fn insert_owned_region(&self, owner: impl Into<UserId>, region: Region) {
        self.inner.lock().regions.push((Some(owner.into()), region));
    }

    pub fn remove_region(&self, id: &RegionId) {
        self.inner.lock().regions.retain(|(_, r)| &r.id != id);
    }

    /// Make every call to `op` fail until [`recover`][Self::recover].
    pub fn fail(&self, op: Operation) {
        self.inner.lock().failing.insert(op);
    }

    pub fn recover(&self, op: Operation) {
        self.inner.lock().failing.remove(&op);
    }

    /// Park notification calls until [`release_notifications`][Self::release_notifications].
    pub fn hold_notifications(&self) {
        self.gate.send_replace(false);
    }

    pub fn release_notifications(&self) {
        self.gate.send_replace(true);
    }

    // ── Inspection ────────────────────────────────────────────────────────

    pub fn regions(&self) -> Vec<Region> {
        self.inner.lock().regions.iter().map(|(_, r)| r.clone()).collect()
    }

    pub fn locations(&self) -> Vec<(UserId, GeoPoint)> {
        self.inner.lock().locations.clone()
    }

    pub fn presence(&self) -> Vec<(RegionId, UserId)> {
        self.inner.lock().presence.clone()
    }

    pub fn notices(&self) -> Vec<(UserId, TransitionNotice)> {
        self.inner.lock().notices.clone()
    }

    pub fn notice_titles(&self) -> Vec<String> {
        self.inner.lock().notices.iter().map(|(_, n)| n.title.clone()).collect()
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    fn check(&self, op: Operation) -> RemoteResult<()> {
        if self.inner.lock().failing.contains(&op) {
            return Err(RemoteError::Unavailable {
                operation: op,
                message:   "injected failure".to_owned(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RegionStore for MemoryBackend {
    async fn fetch_regions(&self, filter: &RegionFilter) -> RemoteResult<Vec<Region>> {
        self.check(Operation::FetchRegions)?;
        let inner = self.inner.lock();
        Ok(inner
            .regions
            .iter()
            .filter(|(owner, r)| filter.matches(r, owner.as_ref()))
            .map(|(_, r)| r.clone())
            .collect())
    }

    async fn create_region(&self, spec: NewRegion) -> RemoteResult<Region> {
        self.check(Operation::CreateRegion)?;
        if spec.name.trim().is_empty() {
            return Err(RemoteError::Rejected {
                operation: Operation::CreateRegion,
                message:   "region name is empty".to_owned(),
            });
        }
        let owner = self.user.lock().clone();
        let mut inner = self.inner.lock();
        inner.next_id += 1;
        let region = spec.into_region(format!("region-{}", inner.next_id));
        inner.regions.push((owner, region.clone()));
        Ok(region)
    }
}

#[async_trait]
impl LocationSink for MemoryBackend {
    async fn push_location_update(&self, user: &UserId, point: &GeoPoint) -> RemoteResult<()> {
        self.check(Operation::PushLocation)?;
        self.inner.lock().locations.push((user.clone(), *point));
        Ok(())
    }
}

#[async_trait]
impl PresenceSink for MemoryBackend {
    async fn record_presence(&self, region: &RegionId, user: &UserId) -> RemoteResult<()> {
        self.check(Operation::RecordPresence)?;
        self.inner.lock().presence.push((region.clone(), user.clone()));
        Ok(())
    }
}

#[async_trait]
impl NotificationSink for MemoryBackend {
    async fn create_transition_notification(
        &self,
        user:   &UserId,
        notice: &TransitionNotice,
    ) -> RemoteResult<()> {
        let mut gate = self.gate.subscribe();
        gate.wait_for(|open| *open)
            .await
            .map_err(|e| RemoteError::Unavailable {
                operation: Operation::CreateNotification,
                message:   e.to_string(),
            })?;

        self.check(Operation::CreateNotification)?;
        self.inner.lock().notices.push((user.clone(), notice.clone()));
        Ok(())
    }
}

impl IdentityProvider for MemoryBackend {
    fn current_user_id(&self) -> Option<UserId> {
        self.user.lock().clone()
    }
}
