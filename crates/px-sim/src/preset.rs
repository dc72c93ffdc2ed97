//! Teleport destinations.
//!
//! Presets are plain configuration: an ordered table keyed by a short
//! string.  The table validates its rows once, at construction, so
//! [`LocationSimulator::teleport`] can trust every preset it is handed.
//!
//! # CSV format
//!
//! ```csv
//! key,label,latitude,longitude,accuracy
//! long_beach,Long Beach,33.7701,-118.1937,10
//! tokyo,Tokyo,35.6762,139.6503,
//! ```
//!
//! `accuracy` may be left empty.
//!
//! [`LocationSimulator::teleport`]: crate::LocationSimulator::teleport

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use px_core::GeoPoint;
use serde::{Deserialize, Serialize};

use crate::{SimError, SimResult};

// ── Preset ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub key:       String,
    pub label:     String,
    pub latitude:  f64,
    pub longitude: f64,
    #[serde(default)]
    pub accuracy:  Option<f64>,
}

impl Preset {
    pub fn new(key: &str, label: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            key:      key.to_owned(),
            label:    label.to_owned(),
            latitude,
            longitude,
            accuracy: None,
        }
    }

    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = Some(accuracy);
        self
    }

    /// The preset as a position sample.
    pub fn point(&self) -> GeoPoint {
        let point = GeoPoint::new(self.latitude, self.longitude);
        match self.accuracy {
            Some(a) => point.with_accuracy(a),
            None => point,
        }
    }
}

// ── PresetTable ───────────────────────────────────────────────────────────────

/// Ordered, key-unique preset table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Preset>", into = "Vec<Preset>")]
pub struct PresetTable {
    presets: Vec<Preset>,
}

impl PresetTable {
    /// Validate and build a table.
    ///
    /// # Errors
    ///
    /// [`SimError::DuplicatePreset`] on a repeated key, and
    /// [`SimError::Core`] for non-finite coordinates.
    pub fn new(presets: Vec<Preset>) -> SimResult<Self> {
        let mut seen = HashSet::with_capacity(presets.len());
        for p in &presets {
            if !seen.insert(p.key.as_str()) {
                return Err(SimError::DuplicatePreset(p.key.clone()));
            }
            GeoPoint::checked(p.latitude, p.longitude)?;
        }
        Ok(Self { presets })
    }

    pub fn get(&self, key: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.key == key)
    }

    /// Like [`get`][Self::get] but an unknown key is an error.
    pub fn require(&self, key: &str) -> SimResult<&Preset> {
        self.get(key)
            .ok_or_else(|| SimError::UnknownPreset(key.to_owned()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.presets.iter().map(|p| p.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

/// Key of the built-in preset that returns to the default debug location.
pub const DEFAULT_LOCATION_KEY: &str = "default-location";

impl Default for PresetTable {
    /// The built-in destinations shown in the debug location panel, all
    /// around Long Beach so short hops cross between the preset rooms.
    fn default() -> Self {
        Self {
            presets: vec![
                Preset::new("long-beach", "Long Beach, California", 33.77005, -118.193739)
                    .with_accuracy(12.0),
                Preset::new("shoreline-village", "Shoreline Village waterfront", 33.7633, -118.1899)
                    .with_accuracy(12.0),
                Preset::new("belmont-shore", "Belmont Shore", 33.7603, -118.1309).with_accuracy(12.0),
                Preset::new("csulb-campus", "CSULB campus", 33.7838, -118.1141).with_accuracy(12.0),
                Preset::new("signal-hill", "Signal Hill overlook", 33.8044, -118.1678)
                    .with_accuracy(12.0),
                Preset::new(DEFAULT_LOCATION_KEY, "Default location sharing", 33.7838, -118.1136)
                    .with_accuracy(15.0),
            ],
        }
    }
}

impl TryFrom<Vec<Preset>> for PresetTable {
    type Error = SimError;
    fn try_from(presets: Vec<Preset>) -> SimResult<Self> {
        PresetTable::new(presets)
    }
}

impl From<PresetTable> for Vec<Preset> {
    fn from(table: PresetTable) -> Self {
        table.presets
    }
}

// ── CSV loading ───────────────────────────────────────────────────────────────

/// Load a preset table from a CSV file.
pub fn load_presets_csv(path: &Path) -> SimResult<PresetTable> {
    let file = std::fs::File::open(path)?;
    load_presets_reader(file)
}

/// Like [`load_presets_csv`] but accepts any `Read` source.
pub fn load_presets_reader<R: Read>(reader: R) -> SimResult<PresetTable> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let presets = csv_reader
        .deserialize::<Preset>()
        .collect::<Result<Vec<_>, csv::Error>>()?;
    PresetTable::new(presets)
}
