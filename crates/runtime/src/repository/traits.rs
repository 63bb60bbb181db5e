//! Repository contracts for saving and loading run data.

use game_core::Snapshot;

use super::error::Result;
use super::types::{ScoreEntry, Scoreboard};

/// Persistence for the single in-progress run.
///
/// A save overwrites the previous one; there is no history.
pub trait SnapshotRepository: Send + Sync {
    fn save(&self, snapshot: &Snapshot) -> Result<()>;

    /// Returns `Ok(None)` when nothing has been saved.
    ///
    /// Unreadable or tampered data is reported as
    /// [`RepositoryError::CorruptedData`](super::RepositoryError::CorruptedData).
    fn load(&self) -> Result<Option<Snapshot>>;

    fn exists(&self) -> bool;

    /// Removes the save. Deleting a missing save is not an error.
    fn delete(&self) -> Result<()>;
}

/// Persistence for the high-score table.
pub trait ScoreboardRepository: Send + Sync {
    /// Returns an empty board when nothing has been saved.
    fn load(&self) -> Result<Scoreboard>;

    fn save(&self, scoreboard: &Scoreboard) -> Result<()>;

    /// Removes the stored board.
    fn delete(&self) -> Result<()>;

    /// Inserts `entry` and persists the board. Returns the entry's rank
    /// (0-based) when it made the table.
    fn record(&self, entry: ScoreEntry) -> Result<Option<usize>> {
        let mut board = self.load()?;
        let rank = board.insert(entry);
        if rank.is_some() {
            self.save(&board)?;
        }
        Ok(rank)
    }
}
