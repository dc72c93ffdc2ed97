//! `px-remote` — the engine's view of the outside world.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                          |
//! |-------------|-------------------------------------------------------------------|
//! | [`service`] | `RegionStore`, `LocationSink`, `PresenceSink`, `NotificationSink`, |
//! |             | `IdentityProvider`, `RegionFilter`, `Operation`                    |
//! | [`notice`]  | `TransitionNotice`, `TransitionMetadata`                          |
//! | [`memory`]  | `MemoryBackend` — in-process implementation of every trait        |
//! | [`error`]   | `RemoteError`, `RemoteResult<T>`                                  |
//!
//! The async traits are object safe (via `async-trait`) so consumers hold
//! them as `Arc<dyn Trait>`.

pub mod error;
pub mod memory;
pub mod notice;
pub mod service;


pub use error::{RemoteError, RemoteResult};
pub use memory::MemoryBackend;
pub use notice::{TransitionMetadata, TransitionNotice};
pub use service::{
    Anchor, IdentityProvider, LocationSink, NotificationSink, Operation, PresenceSink,
    RegionFilter, RegionStore, StaticIdentity,
};
