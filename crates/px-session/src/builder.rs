//! Fluent builder for constructing a [`Session`].

use std::sync::Arc;

use px_core::GeoPoint;
use px_remote::{IdentityProvider, LocationSink, NotificationSink, PresenceSink, RegionFilter, RegionStore};
use px_sim::LocationSimulator;
use px_tracker::{TrackerSinks, TransitionTracker};

use crate::{Session, SessionConfig, SessionResult};

/// Fluent builder for [`Session`].
///
/// # Required inputs
///
/// - `RegionStore` — where regions are fetched from and created in
/// - `LocationSink` — where moves are pushed
/// - [`TrackerSinks`] — presence, notifications, identity
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                                   |
/// |----------------------|-------------------------------------------|
/// | `.config(c)`         | `SessionConfig::default()`                |
/// | `.filter(f)`         | `RegionFilter::all()`                     |
/// | `.starting_at(p)`    | the config's `start_preset`, else nowhere |
///
/// # Example
///
/// ```rust,ignore
/// let backend = Arc::new(MemoryBackend::signed_in("alice"));
/// let mut session = SessionBuilder::from_backend(backend)
///     .config(SessionConfig::from_json_path(path)?)
///     .build()?;
/// session.teleport("long-beach").await?;
/// ```
pub struct SessionBuilder {
    store:     Arc<dyn RegionStore>,
    locations: Arc<dyn LocationSink>,
    sinks:     TrackerSinks,
    config:    Option<SessionConfig>,
    filter:    Option<RegionFilter>,
    start:     Option<GeoPoint>,
}

impl SessionBuilder {
    /// Create a builder with all required inputs.
    pub fn new(
        store:     Arc<dyn RegionStore>,
        locations: Arc<dyn LocationSink>,
        sinks:     TrackerSinks,
    ) -> Self {
        Self {
            store,
            locations,
            sinks,
            config: None,
            filter: None,
            start:  None,
        }
    }

    /// Use one backend for every remote role.
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: RegionStore + LocationSink + PresenceSink + NotificationSink + IdentityProvider + 'static,
    {
        Self::new(backend.clone(), backend.clone(), TrackerSinks::from_backend(backend))
    }

    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Restrict which regions are fetched.
    pub fn filter(mut self, filter: RegionFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Start at an arbitrary point instead of the configured preset.
    pub fn starting_at(mut self, point: GeoPoint) -> Self {
        self.start = Some(point);
        self
    }

    /// Validate the config and return a ready [`Session`].
    ///
    /// Must be called inside a tokio runtime; the tracker spawns its
    /// announcements there.
    pub fn build(self) -> SessionResult<Session> {
        let config = self.config.unwrap_or_default();
        config.validate()?;
        let step = config.step()?;

        let mut simulator = LocationSimulator::new();
        match (self.start, &config.start_preset) {
            (Some(point), _) => {
                simulator.set_point(point)?;
            }
            (None, Some(key)) => {
                simulator.teleport_to(&config.presets, key)?;
            }
            (None, None) => {}
        }

        let tracker = TransitionTracker::new(self.sinks.clone())?;

        Ok(Session {
            store: self.store,
            locations: self.locations,
            identity: self.sinks.identity,
            filter: self.filter.unwrap_or_else(RegionFilter::all),
            config,
            step,
            simulator,
            tracker,
            regions: Vec::new(),
        })
    }
}
