use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("transition tracker needs a tokio runtime: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}

pub type TrackerResult<T> = Result<T, TrackerError>;
