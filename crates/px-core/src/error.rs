//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("coordinate ({latitude}, {longitude}) is not finite")]
    NonFiniteCoordinate { latitude: f64, longitude: f64 },
}

/// Shorthand result type for `px-core`.
pub type CoreResult<T> = Result<T, CoreError>;
