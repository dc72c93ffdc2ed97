//! Compass directions accepted by [`LocationSimulator::nudge`].
//!
//! [`LocationSimulator::nudge`]: crate::LocationSimulator::nudge

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::SimError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// `(latitude sign, longitude sign)` of a step in this direction.
    #[inline]
    pub fn signs(self) -> (f64, f64) {
        match self {
            Direction::North => (1.0, 0.0),
            Direction::South => (-1.0, 0.0),
            Direction::East  => (0.0, 1.0),
            Direction::West  => (0.0, -1.0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East  => "east",
            Direction::West  => "west",
        };
        f.write_str(s)
    }
}

impl FromStr for Direction {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "north" | "n" => Ok(Direction::North),
            "south" | "s" => Ok(Direction::South),
            "east"  | "e" => Ok(Direction::East),
            "west"  | "w" => Ok(Direction::West),
            other => Err(SimError::UnknownDirection(other.to_owned())),
        }
    }
}
