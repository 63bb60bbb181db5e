//! In-memory repository implementations for testing and development.

mod scoreboard;
mod snapshot;

pub use scoreboard::InMemoryScoreboardRepo;
pub use snapshot::InMemorySnapshotRepo;
