//! The `TransitionTracker` state machine.

use std::collections::HashSet;
use std::sync::Arc;

use px_core::{GeoPoint, RegionId};
use px_region::{Region, resolve_active_region};
use px_remote::{IdentityProvider, NotificationSink, PresenceSink};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::announce::{Announcement, build_notice};
use crate::{AnnouncementOutcome, TrackerResult, TransitionKey, TransitionState};

// ── Sinks ─────────────────────────────────────────────────────────────────────

/// The external collaborators an announcement talks to.
#[derive(Clone)]
pub struct TrackerSinks {
    pub presence:      Arc<dyn PresenceSink>,
    pub notifications: Arc<dyn NotificationSink>,
    pub identity:      Arc<dyn IdentityProvider>,
}

impl TrackerSinks {
    /// Use one backend for all three roles.
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: PresenceSink + NotificationSink + IdentityProvider + 'static,
    {
        Self {
            presence:      backend.clone(),
            notifications: backend.clone(),
            identity:      backend,
        }
    }
}

// ── Observation ───────────────────────────────────────────────────────────────

/// What a single [`TransitionTracker::observe`] call did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Observation {
    /// The active region did not change.
    Unchanged,

    /// The region changed before any caller-initiated movement; recorded
    /// silently as the starting state.
    Baseline { key: TransitionKey },

    /// The same edge is already in flight or was the last one announced.
    Suppressed { key: TransitionKey },

    /// Nobody is signed in, so there is no one to announce to.
    NoUser { key: TransitionKey },

    /// An announcement was spawned.
    Announcing { key: TransitionKey },
}

impl Observation {
    /// `true` for every variant except [`Observation::Unchanged`].
    pub fn is_transition(&self) -> bool {
        !matches!(self, Observation::Unchanged)
    }

    pub fn key(&self) -> Option<&TransitionKey> {
        match self {
            Observation::Unchanged => None,
            Observation::Baseline { key }
            | Observation::Suppressed { key }
            | Observation::NoUser { key }
            | Observation::Announcing { key } => Some(key),
        }
    }
}

// ── TransitionTracker ─────────────────────────────────────────────────────────

/// Watches the active region over time and announces each change once.
///
/// # Lifecycle
///
/// 1. Every location or region-list change is fed to
///    [`observe`][Self::observe], which resolves the active region and, on a
///    change, shifts `previous ← current ← next`.
/// 2. Until [`note_movement`][Self::note_movement] has been called, changes
///    are recorded without being announced.  The first resolution after
///    start-up reflects where the user already was, not a move.
/// 3. A real change spawns an [`Announcement`] on the runtime: presence and
///    notification calls run concurrently and report back over a channel.
///    `observe` never waits for them.
/// 4. Finished announcements are folded back in at the start of the next
///    `observe`, or explicitly with [`settle`][Self::settle].
///
/// An edge is announced at most once at a time, and not again while it is
/// still the last edge announced.
pub struct TransitionTracker {
    state:        TransitionState,
    current_name: Option<String>,
    has_moved:    bool,

    /// Keys of announcements spawned in the current generation and not yet
    /// reported back.
    in_flight:  HashSet<TransitionKey>,
    /// Bumped by [`reset`][Self::reset]; outcomes from older generations are
    /// discarded.
    generation: u64,
    /// Spawn counter; a late success never overwrites a newer one.
    next_seq:           u64,
    last_announced_seq: Option<u64>,

    sinks:       TrackerSinks,
    runtime:     Handle,
    outcome_tx:  mpsc::UnboundedSender<AnnouncementOutcome>,
    outcome_rx:  mpsc::UnboundedReceiver<AnnouncementOutcome>,
    completed:   Vec<AnnouncementOutcome>,
}

impl TransitionTracker {
    /// Create a tracker that spawns announcements on the current tokio
    /// runtime.
    ///
    /// # Errors
    ///
    /// [`TrackerError::NoRuntime`][crate::TrackerError::NoRuntime] when
    /// called outside a runtime.
    pub fn new(sinks: TrackerSinks) -> TrackerResult<Self> {
        Ok(Self::with_runtime(sinks, Handle::try_current()?))
    }

    /// Create a tracker that spawns announcements on `runtime`.
    pub fn with_runtime(sinks: TrackerSinks, runtime: Handle) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            state: TransitionState::default(),
            current_name: None,
            has_moved: false,
            in_flight: HashSet::new(),
            generation: 0,
            next_seq: 0,
            last_announced_seq: None,
            sinks,
            runtime,
            outcome_tx,
            outcome_rx,
            completed: Vec::new(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn state(&self) -> &TransitionState {
        &self.state
    }

    pub fn current_region_id(&self) -> Option<&RegionId> {
        self.state.current_region_id.as_ref()
    }

    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Record a caller-initiated move (teleport, nudge).  Transitions are
    /// announced from now on.
    pub fn note_movement(&mut self) {
        self.has_moved = true;
    }

    /// Forget everything: state, movement guard, and in-flight bookkeeping.
    ///
    /// Call when the region list or location source is replaced wholesale.
    /// Announcements already spawned still run, but their outcomes are
    /// ignored.
    pub fn reset(&mut self) {
        debug!(generation = self.generation, "transition tracker reset");
        self.state = TransitionState::default();
        self.current_name = None;
        self.has_moved = false;
        self.in_flight.clear();
        self.completed.clear();
        self.last_announced_seq = None;
        self.generation += 1;
    }

    /// Feed one `(regions, point)` observation.
    pub fn observe(&mut self, regions: &[Region], point: Option<&GeoPoint>) -> Observation {
        self.collect_outcomes();

        let next = resolve_active_region(regions, point);
        let next_id = next.map(|r| r.id.clone());

        if next_id == self.state.current_region_id {
            return Observation::Unchanged;
        }

        let from_id = self.state.current_region_id.take();
        let from_name = self.current_name.take();
        let key = TransitionKey::new(from_id.as_ref(), next_id.as_ref());

        self.state.previous_region_id = from_id.clone();
        self.state.current_region_id = next_id.clone();
        self.current_name = next.map(|r| r.name.clone());

        if !self.has_moved {
            debug!(%key, "initial region resolved; not announced");
            return Observation::Baseline { key };
        }

        if self.in_flight.contains(&key) || self.state.is_duplicate(&key) {
            debug!(%key, "duplicate transition suppressed");
            return Observation::Suppressed { key };
        }

        let Some(user) = self.sinks.identity.current_user_id() else {
            warn!(%key, "no signed-in user; transition not announced");
            return Observation::NoUser { key };
        };

        let notice = build_notice(from_id.as_ref(), from_name.as_deref(), next, point);
        info!(%key, title = %notice.title, "region transition");

        let announcement = Announcement {
            key:           key.clone(),
            generation:    self.generation,
            seq:           self.next_seq,
            user,
            to_region:     next_id,
            notice,
            presence:      self.sinks.presence.clone(),
            notifications: self.sinks.notifications.clone(),
            outcomes:      self.outcome_tx.clone(),
        };
        self.next_seq += 1;
        self.state.pending_key = Some(key.clone());
        self.in_flight.insert(key.clone());
        self.runtime.spawn(announcement.run());

        Observation::Announcing { key }
    }

    /// Fold in every announcement that has already finished.
    pub fn collect_outcomes(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.fold(outcome);
        }
    }

    /// Wait until every in-flight announcement has reported back, then
    /// return all outcomes gathered since the last call.
    pub async fn settle(&mut self) -> Vec<AnnouncementOutcome> {
        self.collect_outcomes();
        while !self.in_flight.is_empty() {
            // The tracker holds a sender, so `recv` only ends with a value.
            match self.outcome_rx.recv().await {
                Some(outcome) => self.fold(outcome),
                None => break,
            }
        }
        self.take_outcomes()
    }

    /// Outcomes folded in so far and not yet taken.
    pub fn take_outcomes(&mut self) -> Vec<AnnouncementOutcome> {
        std::mem::take(&mut self.completed)
    }

    fn fold(&mut self, outcome: AnnouncementOutcome) {
        if outcome.generation != self.generation {
            debug!(key = %outcome.key, "discarding outcome from before reset");
            return;
        }
        self.in_flight.remove(&outcome.key);
        if self.state.pending_key.as_ref() == Some(&outcome.key) {
            self.state.pending_key = None;
        }
        let newer = self.last_announced_seq.is_none_or(|seq| outcome.seq > seq);
        if outcome.succeeded() && newer {
            self.state.last_announced_key = Some(outcome.key.clone());
            self.last_announced_seq = Some(outcome.seq);
        }
        self.completed.push(outcome);
    }
}
