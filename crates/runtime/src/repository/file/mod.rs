//! File-based repository implementations.

mod scoreboard;
mod snapshot;

pub use scoreboard::FileScoreboardRepository;
pub use snapshot::{FileSnapshotRepository, SnapshotEnvelope};
