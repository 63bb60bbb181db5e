//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from repositories and snapshot restoration so clients can
//! bubble them up with consistent context.

use game_core::{ErrorSeverity, GameError};
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("failed to restore session from snapshot")]
    Restore(#[source] game_core::SnapshotError),

    #[error("the run has ended; reset to start a new one")]
    RunEnded,
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Repository(err) => err.severity(),
            Self::Restore(err) => err.severity(),
            Self::RunEnded => ErrorSeverity::Recoverable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreadable_saves_are_never_internal() {
        let decode = RuntimeError::Restore(game_core::SnapshotError::Decode("eof".into()));
        assert_eq!(decode.severity(), ErrorSeverity::Validation);

        let corrupt = RuntimeError::from(RepositoryError::CorruptedData("checksum".into()));
        assert_eq!(corrupt.severity(), ErrorSeverity::Validation);

        let encode = RuntimeError::Restore(game_core::SnapshotError::Encode("size".into()));
        assert!(encode.severity().is_internal());
    }
}
