//! Building and sending transition announcements.

use std::sync::Arc;

use px_core::{GeoPoint, RegionId, UserId, format_distance};
use px_region::Region;
use px_remote::{
    NotificationSink, PresenceSink, RemoteError, RemoteResult, TransitionMetadata, TransitionNotice,
};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::TransitionKey;

/// Generic message shown when an announcement could not be stored.
pub const ANNOUNCE_FAILED_MESSAGE: &str = "failed to record movement";

/// `"Entered X"`, `"Left X"`, or `"Moved from X to Y"`.
pub fn transition_title(from_name: Option<&str>, to_name: Option<&str>) -> String {
    match (from_name, to_name) {
        (None, Some(to)) => format!("Entered {to}"),
        (Some(from), None) => format!("Left {from}"),
        (Some(from), Some(to)) => format!("Moved from {from} to {to}"),
        (None, None) => "Location changed".to_owned(),
    }
}

/// Assemble the notice for a transition into `to` (or out of everything).
///
/// The distance to the new region's centre is only reported for local
/// geofences; the metadata carries it rounded to two decimals.
pub fn build_notice(
    from_id:   Option<&RegionId>,
    from_name: Option<&str>,
    to:        Option<&Region>,
    point:     Option<&GeoPoint>,
) -> TransitionNotice {
    let distance = match (to, point) {
        (Some(region), Some(point)) if !region.is_effectively_global() => region
            .valid_center()
            .map(|c| point.distance_m(c))
            .filter(|d| d.is_finite()),
        _ => None,
    };

    let body = match (to, distance) {
        (Some(region), Some(d)) => Some(format!(
            "Now approximately {} from the {} center.",
            format_distance(d),
            region.name
        )),
        _ => None,
    };

    TransitionNotice {
        title: transition_title(from_name, to.map(|r| r.name.as_str())),
        body,
        metadata: TransitionMetadata {
            from_region_id: from_id.cloned(),
            to_region_id:   to.map(|r| r.id.clone()),
            latitude:       point.map(|p| p.latitude),
            longitude:      point.map(|p| p.longitude),
            accuracy:       point.and_then(|p| p.accuracy),
            distance_meters: distance.map(|d| (d * 100.0).round() / 100.0),
        },
    }
}

/// Result of one announcement, reported back to the tracker.
#[derive(Debug)]
pub struct AnnouncementOutcome {
    pub key:          TransitionKey,
    pub notice:       TransitionNotice,
    /// `None` when there was no region to be present in.
    pub presence:     Option<RemoteResult<()>>,
    pub notification: RemoteResult<()>,
    pub(crate) generation: u64,
    /// Spawn order within the generation.
    pub(crate) seq:        u64,
}

impl AnnouncementOutcome {
    /// The announcement counts as delivered once the notification is stored;
    /// presence is best-effort.
    pub fn succeeded(&self) -> bool {
        self.notification.is_ok()
    }

    /// The user-facing failure message, if the notification was not stored.
    pub fn failure_message(&self) -> Option<&'static str> {
        (!self.succeeded()).then_some(ANNOUNCE_FAILED_MESSAGE)
    }

    pub fn notification_error(&self) -> Option<&RemoteError> {
        self.notification.as_ref().err()
    }
}

/// One spawned announcement.
pub(crate) struct Announcement {
    pub(crate) key:           TransitionKey,
    pub(crate) generation:    u64,
    pub(crate) seq:           u64,
    pub(crate) user:          UserId,
    pub(crate) to_region:     Option<RegionId>,
    pub(crate) notice:        TransitionNotice,
    pub(crate) presence:      Arc<dyn PresenceSink>,
    pub(crate) notifications: Arc<dyn NotificationSink>,
    pub(crate) outcomes:      mpsc::UnboundedSender<AnnouncementOutcome>,
}

impl Announcement {
    /// Issue the presence update and the notification concurrently.  Either
    /// may fail without affecting the other.
    pub(crate) async fn run(self) {
        let presence = async {
            match &self.to_region {
                Some(region) => Some(self.presence.record_presence(region, &self.user).await),
                None => None,
            }
        };
        let notification = self
            .notifications
            .create_transition_notification(&self.user, &self.notice);

        let (presence, notification) = tokio::join!(presence, notification);

        if let Some(Err(e)) = &presence {
            warn!(key = %self.key, error = %e, "presence update failed");
        }
        match &notification {
            Ok(()) => info!(key = %self.key, title = %self.notice.title, "transition announced"),
            Err(e) => warn!(key = %self.key, error = %e, "{ANNOUNCE_FAILED_MESSAGE}"),
        }

        let outcome = AnnouncementOutcome {
            key: self.key,
            notice: self.notice,
            presence,
            notification,
            generation: self.generation,
            seq: self.seq,
        };
        // The tracker may already be gone; nothing left to update then.
        let _ = self.outcomes.send(outcome);
    }
}
