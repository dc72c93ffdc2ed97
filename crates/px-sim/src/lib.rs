//! `px-sim` — simulated location for exercising the geofencing logic
//! without a real GPS.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`simulator`] | `LocationSimulator`, `SimulatedLocation`                    |
//! | [`preset`]    | `Preset`, `PresetTable`, CSV preset loader                  |
//! | [`direction`] | `Direction` (north / south / east / west)                   |
//! | [`step`]      | `StepDistance`, `DEFAULT_STEP_M`                            |
//! | [`error`]     | `SimError`, `SimResult<T>`                                  |
//!
//! # Movement model
//!
//! Two ways to move:
//!
//! 1. **Teleport** to a named preset.  The preset key is remembered until
//!    the next move.
//! 2. **Nudge** a fixed distance north, south, east, or west.  The step is a
//!    parameter: the quick controls use [`DEFAULT_STEP_M`], the advanced
//!    panel passes a [`StepDistance`] picked by the user.

pub mod direction;
pub mod error;
pub mod preset;
pub mod simulator;
pub mod step;

#[cfg(test)]
mod tests;

pub use direction::Direction;
pub use error::{SimError, SimResult};
pub use preset::{DEFAULT_LOCATION_KEY, Preset, PresetTable, load_presets_csv, load_presets_reader};
pub use simulator::{LocationSimulator, MIN_SHIFT_DEGREES, SimulatedLocation};
pub use step::{DEFAULT_STEP_M, StepDistance};
