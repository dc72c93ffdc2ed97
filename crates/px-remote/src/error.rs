use thiserror::Error;

use crate::Operation;

/// Failures reported by external collaborators.
///
/// None of these are fatal to the engine: callers log them and carry on
/// with their local state intact.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("{operation} unavailable: {message}")]
    Unavailable { operation: Operation, message: String },

    #[error("{operation} rejected: {message}")]
    Rejected { operation: Operation, message: String },
}

pub type RemoteResult<T> = Result<T, RemoteError>;
