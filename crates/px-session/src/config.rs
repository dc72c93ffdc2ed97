//! Session configuration, loaded from JSON.

use std::path::Path;

use px_core::GeoPoint;
use px_region::NewRegion;
use px_sim::{PresetTable, StepDistance};
use serde::{Deserialize, Serialize};

use crate::{SessionError, SessionResult};

/// Everything a session can be configured with.  Every field has a default,
/// so `{}` is a valid config.
///
/// ```json
/// {
///   "stepMiles": 0.5,
///   "startPreset": "home",
///   "presets": [
///     { "key": "home", "label": "Home", "latitude": 33.77, "longitude": -118.19 }
///   ],
///   "presetRooms": [
///     { "name": "Lobby", "isGlobal": true, "presetKey": "lobby" },
///     { "name": "Harbor", "aliases": ["Harbour"],
///       "center": { "latitude": 33.77, "longitude": -118.19 }, "radiusMeters": 1000 }
///   ]
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionConfig {
    /// Nudge step in miles.  `None` uses the default step (about two miles).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_miles: Option<f64>,

    /// Teleport destinations.  Defaults to the built-in table.
    pub presets: PresetTable,

    /// Rooms that [`Session::ensure_preset_regions`][crate::Session::ensure_preset_regions]
    /// creates when the store does not list them yet.  Defaults to
    /// [`default_preset_rooms`].
    pub preset_rooms: Vec<NewRegion>,

    /// Preset to place the simulator at when the session is built.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_preset: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            step_miles:   None,
            presets:      PresetTable::default(),
            preset_rooms: default_preset_rooms(),
            start_preset: None,
        }
    }
}

/// The built-in chat rooms: two global lounges and five Long Beach rooms.
pub fn default_preset_rooms() -> Vec<NewRegion> {
    let local = |key: &str, name: &str, lat: f64, lon: f64, radius: f64, aliases: &[&str]| {
        NewRegion::local_room(name, GeoPoint::new(lat, lon), radius)
            .with_preset_key(key)
            .with_aliases(aliases.iter().copied())
    };
    vec![
        NewRegion::global_room("Global Debug Lounge A")
            .with_preset_key("global-a")
            .with_aliases(["Global Debug Lounge"]),
        NewRegion::global_room("Global Debug Lounge B")
            .with_preset_key("global-b")
            .with_aliases(["Global Debug Lounge B"]),
        local(
            "long-beach",
            "Long Beach Debug Chat",
            33.77005,
            -118.193739,
            3_000.0,
            &["Long Beach,California Chat Room", "Long Beach Chat Room"],
        ),
        local(
            "shoreline-village",
            "Long Beach Shoreline Village Chat",
            33.7633,
            -118.1899,
            1_200.0,
            &["Shoreline Village Chat", "Downtown Waterfront Chat"],
        ),
        local(
            "belmont-shore",
            "Belmont Shore Meetups",
            33.7603,
            -118.1309,
            1_400.0,
            &["Belmont Shore Chat", "Belmont Shore Debug"],
        ),
        local(
            "signal-hill",
            "Signal Hill Lookout Chat",
            33.8044,
            -118.1678,
            1_300.0,
            &["Signal Hill Chat Room"],
        ),
        local(
            "csulb",
            "CSULB Campus Chat",
            33.7838,
            -118.1141,
            1_600.0,
            &["Campus Chat Room", "Long Beach State Chat"],
        ),
    ]
}

impl SessionConfig {
    pub fn from_json_str(json: &str) -> SessionResult<Self> {
        let config: SessionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_path(path: &Path) -> SessionResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// The configured nudge step.
    pub fn step(&self) -> SessionResult<StepDistance> {
        match self.step_miles {
            Some(miles) => Ok(StepDistance::from_miles(miles)?),
            None => Ok(StepDistance::default()),
        }
    }

    /// Check the parts serde cannot: the step and the start preset.
    pub fn validate(&self) -> SessionResult<()> {
        self.step()?;
        if let Some(key) = &self.start_preset {
            self.presets.require(key)?;
        }
        for room in &self.preset_rooms {
            if room.name.trim().is_empty() {
                return Err(SessionError::Config("preset room with an empty name".to_owned()));
            }
        }
        Ok(())
    }
}
