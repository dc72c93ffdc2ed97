//! `px-core` — foundational types for the proximity geofencing engine.
//!
//! This crate is a dependency of every other `px-*` crate.  It has no `px-*`
//! dependencies and a single external one (`thiserror`, plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`geo`]     | `GeoPoint`, haversine distance, metre/degree conversion    |
//! | [`ids`]     | `RegionId`, `UserId`                                       |
//! | [`units`]   | miles/metres conversion, distance labels                   |
//! | [`error`]   | `CoreError`, `CoreResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod units;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{EARTH_RADIUS_M, GeoPoint};
pub use ids::{RegionId, UserId};
pub use units::{MILE_M, format_distance};
