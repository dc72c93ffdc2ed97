//! The `Session` handle a host UI drives.

use std::fmt;
use std::sync::Arc;

use px_core::GeoPoint;
use px_region::{Region, RegionAccess, accessible_regions, dedupe_regions, resolve_active_region};
use px_remote::{IdentityProvider, LocationSink, Operation, RegionFilter, RegionStore, RemoteError};
use px_sim::{Direction, LocationSimulator, PresetTable, SimulatedLocation, StepDistance};
use px_tracker::{ANNOUNCE_FAILED_MESSAGE, AnnouncementOutcome, Observation, TransitionTracker};
use tracing::{debug, info, warn};

use crate::{SessionConfig, SessionResult};

// ── Reports ───────────────────────────────────────────────────────────────────

/// A remote call that failed during a move.  The local state was kept.
#[derive(Debug)]
pub struct SyncWarning {
    pub operation: Operation,
    pub error:     RemoteError,
}

impl SyncWarning {
    /// The generic message to show the user.
    pub fn user_message(&self) -> &'static str {
        ANNOUNCE_FAILED_MESSAGE
    }
}

impl fmt::Display for SyncWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.operation, self.error)
    }
}

/// Result of re-resolving the active region.
#[derive(Clone, Debug, PartialEq)]
pub struct Refresh {
    pub observation:   Observation,
    pub active_region: Option<Region>,
}

/// Result of a teleport or nudge.
#[derive(Debug)]
pub struct MoveReport {
    pub location: SimulatedLocation,
    pub refresh:  Refresh,
    /// Remote failures along the way, in the order they happened.
    pub warnings: Vec<SyncWarning>,
}

impl MoveReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Result of [`Session::ensure_preset_regions`].
#[derive(Debug, Default)]
pub struct PresetProvision {
    /// Rooms created by this call, in configuration order.
    pub created:  Vec<Region>,
    /// One per preset room the store refused to create.
    pub warnings: Vec<SyncWarning>,
}

impl PresetProvision {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

/// Simulated location, the last fetched region list, and the transition
/// tracker behind one handle.
///
/// Built with [`SessionBuilder`][crate::SessionBuilder].  Every move follows
/// the same sequence:
///
/// 1. apply the change to the simulator (never rolled back);
/// 2. mark the tracker as moved;
/// 3. push the new point to the location sink;
/// 4. re-fetch regions and feed the tracker.
///
/// Remote failures in steps 3 and 4 become [`SyncWarning`]s on the
/// returned [`MoveReport`].
pub struct Session {
    pub(crate) store:     Arc<dyn RegionStore>,
    pub(crate) locations: Arc<dyn LocationSink>,
    pub(crate) identity:  Arc<dyn IdentityProvider>,
    pub(crate) filter:    RegionFilter,
    pub(crate) config:    SessionConfig,
    pub(crate) step:      StepDistance,
    pub(crate) simulator: LocationSimulator,
    pub(crate) tracker:   TransitionTracker,
    pub(crate) regions:   Vec<Region>,
}

impl Session {
    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn location(&self) -> Option<&SimulatedLocation> {
        self.simulator.location()
    }

    pub fn point(&self) -> Option<&GeoPoint> {
        self.simulator.point()
    }

    /// Regions as of the last successful fetch.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn presets(&self) -> &PresetTable {
        &self.config.presets
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn step(&self) -> StepDistance {
        self.step
    }

    pub fn set_step(&mut self, step: StepDistance) {
        self.step = step;
    }

    pub fn tracker(&self) -> &TransitionTracker {
        &self.tracker
    }

    /// The active region for the current point and region list.
    pub fn active_region(&self) -> Option<&Region> {
        resolve_active_region(&self.regions, self.simulator.point())
    }

    /// Access decision for every known region at the current point.
    pub fn access(&self) -> Vec<(&Region, RegionAccess)> {
        accessible_regions(&self.regions, self.simulator.point())
    }

    // ── Movement ──────────────────────────────────────────────────────────

    /// Jump to the preset `key`.
    pub async fn teleport(&mut self, key: &str) -> SessionResult<MoveReport> {
        let location = self.simulator.teleport_to(&self.config.presets, key)?;
        info!(preset = key, point = %location.point, "teleported");
        Ok(self.after_move(location).await)
    }

    /// Move one configured step.  `None` when the move is a no-op (no
    /// location yet, or the shift vanishes).
    pub async fn nudge(&mut self, direction: Direction) -> Option<MoveReport> {
        self.nudge_by(direction, self.step).await
    }

    /// Move `step` in `direction`.
    pub async fn nudge_by(&mut self, direction: Direction, step: StepDistance) -> Option<MoveReport> {
        let Some(location) = self.simulator.nudge(direction, step.meters()) else {
            debug!(%direction, %step, "nudge ignored");
            return None;
        };
        info!(%direction, %step, point = %location.point, "nudged");
        Some(self.after_move(location).await)
    }

    /// Re-fetch regions and feed the tracker.
    ///
    /// # Errors
    ///
    /// The fetch error, if the store could not be reached.  The previous
    /// region list is kept in that case.
    pub async fn refresh(&mut self) -> SessionResult<Refresh> {
        self.regions = dedupe_regions(self.store.fetch_regions(&self.filter).await?);
        debug!(count = self.regions.len(), "regions fetched");
        Ok(self.observe())
    }

    /// Settle every in-flight announcement.
    pub async fn settle(&mut self) -> Vec<AnnouncementOutcome> {
        self.tracker.settle().await
    }

    // ── Setup ─────────────────────────────────────────────────────────────

    /// Create every configured preset room the store does not list yet.
    ///
    /// A room counts as listed when an existing region carries its preset
    /// key, or its name matches the room's name or one of its aliases.  A
    /// failed create is logged and reported; the remaining rooms are still
    /// tried.
    ///
    /// # Errors
    ///
    /// Only the initial listing: without it nothing can be matched.
    pub async fn ensure_preset_regions(&mut self) -> SessionResult<PresetProvision> {
        let mut existing = dedupe_regions(self.store.fetch_regions(&RegionFilter::all()).await?);
        let mut report = PresetProvision::default();

        for room in &self.config.preset_rooms {
            if existing.iter().any(|r| room.matches_existing(r)) {
                continue;
            }
            match self.store.create_region(room.clone()).await {
                Ok(region) => {
                    info!(id = %region.id, name = %region.name, "preset room created");
                    existing.push(region.clone());
                    report.created.push(region);
                }
                Err(error) => {
                    warn!(%error, name = %room.name, "preset room not created");
                    report.warnings.push(SyncWarning { operation: Operation::CreateRegion, error });
                }
            }
        }
        Ok(report)
    }

    /// Point the session at a different region store.  The tracker starts
    /// over, so the next resolution is a silent baseline.
    pub fn replace_regions_source(&mut self, store: Arc<dyn RegionStore>, filter: RegionFilter) {
        self.store = store;
        self.filter = filter;
        self.regions.clear();
        self.tracker.reset();
    }

    /// Forget the simulated location and start the tracker over.
    pub fn reset_location(&mut self) {
        self.simulator.clear();
        self.tracker.reset();
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn observe(&mut self) -> Refresh {
        let point = self.simulator.point().copied();
        let observation = self.tracker.observe(&self.regions, point.as_ref());
        let active_region = resolve_active_region(&self.regions, point.as_ref()).cloned();
        Refresh { observation, active_region }
    }

    async fn after_move(&mut self, location: SimulatedLocation) -> MoveReport {
        self.tracker.note_movement();
        let mut warnings = Vec::new();

        match self.identity.current_user_id() {
            Some(user) => {
                if let Err(error) = self.locations.push_location_update(&user, &location.point).await {
                    warn!(%error, "location push failed; keeping local position");
                    warnings.push(SyncWarning { operation: Operation::PushLocation, error });
                }
            }
            None => debug!("no signed-in user; location not pushed"),
        }

        match self.store.fetch_regions(&self.filter).await {
            Ok(regions) => self.regions = dedupe_regions(regions),
            Err(error) => {
                warn!(%error, "region fetch failed; using last known regions");
                warnings.push(SyncWarning { operation: Operation::FetchRegions, error });
            }
        }

        MoveReport { location, refresh: self.observe(), warnings }
    }
}
