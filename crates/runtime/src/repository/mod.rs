//! Persistence for run data.
//!
//! Two things survive between sessions:
//! - the in-progress run, as a [`game_core::Snapshot`]
//! - the high-score table, as a [`Scoreboard`]
//!
//! Both come with a file backend (the real save directory) and an in-memory
//! backend for tests and `DUNGEON_PERSISTENCE=false` runs.

mod error;
mod file;
mod memory;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use file::{FileScoreboardRepository, FileSnapshotRepository, SnapshotEnvelope};
pub use memory::{InMemoryScoreboardRepo, InMemorySnapshotRepo};
pub use traits::{ScoreboardRepository, SnapshotRepository};
pub use types::{ScoreEntry, Scoreboard};
