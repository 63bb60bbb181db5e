//! Runtime orchestration for the deterministic dungeon simulation.
//!
//! This crate owns the mutable session, runs the AI director and the turn
//! engine over it, and persists runs and high scores. Consumers embed
//! [`Runtime`] to submit player intents and read back a [`GameView`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the driver and builder
//! - [`simulation`] holds the session, turn phases, and tick engine
//! - [`providers`] contains the AI director for monsters and companions
//! - [`repository`] persists snapshots and the scoreboard
//! - [`view`] exposes the read-only render boundary
pub mod config;
pub mod error;
pub mod providers;
pub mod repository;
pub mod runtime;
pub mod simulation;
pub mod view;

pub use config::{MessageConfig, PersistenceConfig, RuntimeConfig, read_env};
pub use error::{Result, RuntimeError};
pub use repository::{
    FileScoreboardRepository, FileSnapshotRepository, InMemoryScoreboardRepo,
    InMemorySnapshotRepo, RepositoryError, ScoreEntry, Scoreboard, ScoreboardRepository,
    SnapshotEnvelope, SnapshotRepository,
};
pub use runtime::{Runtime, RuntimeBuilder, SubmitOutcome};
pub use simulation::{
    GameSession, MessageLog, PlayerIntent, SessionConfig, TickReport, TurnEngine, TurnPhase,
};
pub use view::{GameView, Hud, Overlay, RenderEntity, RenderKind};
