//! `px-region` — geofenced regions and the pure proximity logic over them.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`region`]   | `Region`, `RegionKind`, `NewRegion`                          |
//! | [`record`]   | `RoomRecord` / `PinRecord` → `Region` normalisation          |
//! | [`dedupe`]   | `dedupe_regions`: one copy per preset key or room name       |
//! | [`access`]   | `evaluate_access`, `RegionAccess`, `Denial`                  |
//! | [`resolver`] | `resolve_active_region`, `accessible_regions`                |
//! | [`error`]    | `RegionError`, `RegionResult<T>`                             |
//!
//! Everything here is synchronous and side-effect free.

pub mod access;
pub mod dedupe;
pub mod error;
pub mod record;
pub mod region;
pub mod resolver;


pub use access::{Denial, RegionAccess, evaluate_access};
pub use dedupe::dedupe_regions;
pub use error::{RegionError, RegionResult};
pub use record::{DEFAULT_PIN_RADIUS_M, GeoJsonPoint, PinRecord, RoomRecord, StoreRecord, normalize_records};
pub use region::{GLOBAL_RADIUS_SENTINEL_M, NewRegion, Region, RegionKind, normalize_region_name};
pub use resolver::{GLOBAL_SCORE_OFFSET_M, accessible_regions, resolve_active_region};
