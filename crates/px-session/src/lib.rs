//! `px-session` — the handle a host UI drives.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`session`] | `Session`, `MoveReport`, `PresetProvision`, `SyncWarning` |
//! | [`builder`] | `SessionBuilder`                                          |
//! | [`config`]  | `SessionConfig` (JSON), `default_preset_rooms`            |
//! | [`error`]   | `SessionError`, `SessionResult<T>`                        |
//!
//! A session owns the simulator and the transition tracker and talks to the
//! outside world only through the `px-remote` traits.

pub mod builder;
pub mod config;
pub mod error;
pub mod session;


pub use builder::SessionBuilder;
pub use config::{SessionConfig, default_preset_rooms};
pub use error::{SessionError, SessionResult};
pub use session::{MoveReport, PresetProvision, Refresh, Session, SyncWarning};
