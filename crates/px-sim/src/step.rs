//! Nudge step sizes.
//!
//! The primary flow always moves by [`DEFAULT_STEP_M`].  The advanced flow
//! lets the user pick 0.25–5 miles in quarter-mile increments; those picks
//! are validated through [`StepDistance::from_miles`].

use std::fmt;

use px_core::units::{meters_to_miles, miles_to_meters};

use crate::{SimError, SimResult};

/// Default nudge step, metres (about two miles).
pub const DEFAULT_STEP_M: f64 = 3_218.0;

pub const MIN_STEP_MILES: f64 = 0.25;
pub const MAX_STEP_MILES: f64 = 5.0;
pub const STEP_INCREMENT_MILES: f64 = 0.25;

/// A validated step distance in metres.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepDistance(f64);

impl StepDistance {
    /// Validate a user-chosen step in miles.
    pub fn from_miles(miles: f64) -> SimResult<Self> {
        if !miles.is_finite() || !(MIN_STEP_MILES..=MAX_STEP_MILES).contains(&miles) {
            return Err(SimError::InvalidStep(miles));
        }
        let increments = miles / STEP_INCREMENT_MILES;
        if (increments - increments.round()).abs() > 1e-9 {
            return Err(SimError::InvalidStep(miles));
        }
        Ok(Self(miles_to_meters(miles)))
    }

    #[inline]
    pub fn meters(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn miles(self) -> f64 {
        meters_to_miles(self.0)
    }

    /// Every step the advanced flow offers, smallest first.
    pub fn choices() -> impl Iterator<Item = StepDistance> {
        let count = ((MAX_STEP_MILES - MIN_STEP_MILES) / STEP_INCREMENT_MILES).round() as usize + 1;
        (0..count).map(|i| {
            StepDistance(miles_to_meters(MIN_STEP_MILES + i as f64 * STEP_INCREMENT_MILES))
        })
    }
}

impl Default for StepDistance {
    fn default() -> Self {
        Self(DEFAULT_STEP_M)
    }
}

impl fmt::Display for StepDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} mi", self.miles())
    }
}
