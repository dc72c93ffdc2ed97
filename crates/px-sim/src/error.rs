use px_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("unknown preset {0:?}")]
    UnknownPreset(String),

    #[error("duplicate preset key {0:?}")]
    DuplicatePreset(String),

    #[error("unknown direction {0:?}: expected north, south, east, or west")]
    UnknownDirection(String),

    #[error("step of {0} miles is not a quarter-mile increment between 0.25 and 5")]
    InvalidStep(f64),

    #[error("preset CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SimResult<T> = Result<T, SimError>;
