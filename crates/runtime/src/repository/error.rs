//! Error types raised by repository implementations.

use game_core::{ErrorSeverity, GameError};
use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("JSON error: {0}")]
    Json(String),

    /// The stored bytes exist but cannot be trusted; callers discard them.
    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

impl RepositoryError {
    pub fn is_corrupted(&self) -> bool {
        matches!(self, Self::CorruptedData(_))
    }
}

impl GameError for RepositoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Io(_) => ErrorSeverity::Recoverable,
            Self::CorruptedData(_) => ErrorSeverity::Validation,
            Self::LockPoisoned | Self::Serialization(_) | Self::Json(_) => ErrorSeverity::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
