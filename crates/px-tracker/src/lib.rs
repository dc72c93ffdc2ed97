//! `px-tracker` — turns a stream of location and region-list updates into
//! one announcement per region change.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`tracker`]  | `TransitionTracker`, `TrackerSinks`, `Observation`            |
//! | [`state`]    | `TransitionState`, `TransitionKey`                            |
//! | [`announce`] | `build_notice`, `transition_title`, `AnnouncementOutcome`     |
//! | [`error`]    | `TrackerError`, `TrackerResult<T>`                            |
//!
//! # Announcement rules
//!
//! A change of active region is announced only when the user has actually
//! moved since start-up (or the last reset), somebody is signed in, and the
//! same edge is neither in flight nor the last one announced.  Presence and
//! notification calls are independent: a failed presence update does not
//! fail the announcement.

pub mod announce;
pub mod error;
pub mod state;
pub mod tracker;


pub use announce::{ANNOUNCE_FAILED_MESSAGE, AnnouncementOutcome, build_notice, transition_title};
pub use error::{TrackerError, TrackerResult};
pub use state::{TransitionKey, TransitionState};
pub use tracker::{Observation, TrackerSinks, TransitionTracker};
