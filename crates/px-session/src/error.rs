use px_remote::RemoteError;
use px_sim::SimError;
use px_tracker::TrackerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session configuration error: {0}")]
    Config(String),

    #[error("failed to parse session config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Sim(#[from] SimError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Tracker(#[from] TrackerError),
}

pub type SessionResult<T> = Result<T, SessionError>;
