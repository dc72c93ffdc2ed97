use px_core::{CoreError, RegionId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegionError {
    #[error("region record has an empty id")]
    MissingId,

    #[error("region {id} has no location")]
    MissingLocation { id: RegionId },

    #[error("region {id} has invalid radius {radius}")]
    InvalidRadius { id: RegionId, radius: f64 },

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type RegionResult<T> = Result<T, RegionError>;
