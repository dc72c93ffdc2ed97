//! Transition state and keys.

use std::fmt;

use px_core::RegionId;

/// Identifies one edge of the region graph: `"<from|none>-><to|none>"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitionKey(String);

impl TransitionKey {
    pub fn new(from: Option<&RegionId>, to: Option<&RegionId>) -> Self {
        let side = |id: Option<&RegionId>| id.map_or("none", RegionId::as_str).to_owned();
        Self(format!("{}->{}", side(from), side(to)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Where the tracker believes the user is, and what it has announced.
///
/// Owned by [`TransitionTracker`][crate::TransitionTracker]; only its own
/// methods write to it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransitionState {
    pub previous_region_id: Option<RegionId>,
    pub current_region_id:  Option<RegionId>,

    /// Last transition whose notification was stored successfully.
    pub last_announced_key: Option<TransitionKey>,

    /// Most recent transition whose announcement is still in flight.
    pub pending_key: Option<TransitionKey>,
}

impl TransitionState {
    /// `true` when `key` was just announced or is being announced.
    pub fn is_duplicate(&self, key: &TransitionKey) -> bool {
        self.pending_key.as_ref() == Some(key) || self.last_announced_key.as_ref() == Some(key)
    }
}
