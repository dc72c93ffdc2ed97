//! Transition notification payloads.

use px_core::RegionId;
use serde::{Deserialize, Serialize};

/// What is stored alongside a transition notification.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionMetadata {
    pub from_region_id: Option<RegionId>,
    pub to_region_id:   Option<RegionId>,

    /// Where the user was when the transition was observed, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude:       Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude:      Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy:       Option<f64>,

    /// Distance from the new point to the new region's centre, rounded to
    /// the centimetre.  Only set when the new region is a local geofence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_meters: Option<f64>,
}

/// A notification announcing that the user entered, left, or switched
/// regions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionNotice {
    pub title:    String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body:     Option<String>,
    pub metadata: TransitionMetadata,
}
