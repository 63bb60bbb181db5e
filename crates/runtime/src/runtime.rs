//! High-level runtime driver.
//!
//! The runtime owns the [`GameSession`] and the two repositories. It turns
//! each [`PlayerIntent`] into either a view change, a reset, a quit, or one
//! simulation tick, and handles the persistence around ticks: autosaves at
//! the configured interval, score recording and save deletion on death.
//! Persistence failures are logged and never change simulation state.

use game_core::GameError;

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::repository::{
    FileScoreboardRepository, FileSnapshotRepository, InMemoryScoreboardRepo,
    InMemorySnapshotRepo, ScoreEntry, ScoreboardRepository, Scoreboard, SnapshotRepository,
};
use crate::simulation::{GameSession, PlayerIntent, SessionConfig, TickReport, TurnEngine};
use crate::view::{GameView, Overlay};

/// What [`Runtime::submit`] did with an intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Ticked(TickReport),
    OverlayChanged(Overlay),
    Reset,
    Quit,
}

/// Main runtime that drives one run at a time.
pub struct Runtime {
    config: RuntimeConfig,
    session: GameSession,
    snapshots: Box<dyn SnapshotRepository>,
    scores: Box<dyn ScoreboardRepository>,
    overlay: Overlay,
    quit: bool,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn overlay(&self) -> Overlay {
        self.overlay
    }

    pub fn is_game_over(&self) -> bool {
        self.session.is_game_over()
    }

    /// False once the player has quit.
    pub fn is_running(&self) -> bool {
        !self.quit
    }

    pub fn view(&self) -> GameView {
        GameView::capture(&self.session, self.overlay)
    }

    /// Applies one intent.
    ///
    /// Simulation intents after death fail with [`RuntimeError::RunEnded`];
    /// only a reset starts over.
    pub fn submit(&mut self, intent: PlayerIntent) -> Result<SubmitOutcome> {
        if self.quit {
            return Err(RuntimeError::RunEnded);
        }

        match intent {
            PlayerIntent::OpenInventory => Ok(self.toggle_overlay(Overlay::Inventory)),
            PlayerIntent::OpenHelp => Ok(self.toggle_overlay(Overlay::Help)),
            PlayerIntent::RequestReset => {
                self.reset();
                Ok(SubmitOutcome::Reset)
            }
            PlayerIntent::RequestQuit => {
                if !self.session.is_game_over()
                    && let Err(err) = self.save()
                {
                    log_failure(&err, "save on quit");
                }
                self.quit = true;
                tracing::info!(turn = self.session.turn, "player quit");
                Ok(SubmitOutcome::Quit)
            }
            PlayerIntent::Move { .. } | PlayerIntent::UseItem(_) => {
                if self.session.is_game_over() {
                    return Err(RuntimeError::RunEnded);
                }
                if matches!(intent, PlayerIntent::Move { .. }) {
                    self.overlay = Overlay::None;
                }
                let report = TurnEngine::new(&mut self.session).tick(intent);
                self.after_tick(report);
                Ok(SubmitOutcome::Ticked(report))
            }
        }
    }

    /// Writes the current session to the snapshot repository.
    pub fn save(&self) -> Result<()> {
        self.snapshots.save(&self.session.snapshot())?;
        tracing::info!(
            turn = self.session.turn,
            depth = self.session.depth,
            "saved game"
        );
        Ok(())
    }

    /// The high-score table. A corrupt table is deleted and reads as empty.
    pub fn high_scores(&self) -> Scoreboard {
        match self.scores.load() {
            Ok(board) => board,
            Err(err) => {
                self.discard_scoreboard(&err);
                Scoreboard::new()
            }
        }
    }

    /// Discards the save and starts a new run.
    pub fn reset(&mut self) {
        if let Err(err) = self.snapshots.delete() {
            log_failure(&err, "deleting save on reset");
        }
        let seed = self.session.rng.next_u64();
        self.session = GameSession::new(seed, &session_config(&self.config));
        self.overlay = Overlay::None;
        tracing::info!(seed, "started new run");
    }

    fn toggle_overlay(&mut self, overlay: Overlay) -> SubmitOutcome {
        self.overlay = if self.overlay == overlay {
            Overlay::None
        } else {
            overlay
        };
        SubmitOutcome::OverlayChanged(self.overlay)
    }

    fn after_tick(&mut self, report: TickReport) {
        if report.game_over {
            self.finish_run();
            return;
        }
        if report.autosave_due
            && let Err(err) = self.save()
        {
            log_failure(&err, "autosave");
        }
    }

    fn finish_run(&mut self) {
        let entry = ScoreEntry::from_counters(&self.session.player.counters, self.session.turn);
        tracing::info!(
            depth = entry.depth_reached,
            kills = entry.kills,
            items = entry.items_collected,
            turns = entry.turns,
            "run ended"
        );

        let recorded = match self.scores.record(entry.clone()) {
            Err(err) if err.is_corrupted() => {
                self.discard_scoreboard(&err);
                self.scores.record(entry)
            }
            other => other,
        };
        match recorded {
            Ok(Some(rank)) => self
                .session
                .messages
                .push(format!("New high score! Rank #{}.", rank + 1)),
            Ok(None) => {}
            Err(err) => log_failure(&err, "recording score"),
        }

        if let Err(err) = self.snapshots.delete() {
            log_failure(&err, "deleting save after death");
        }
    }

    fn discard_scoreboard(&self, err: &crate::repository::RepositoryError) {
        tracing::warn!(%err, "discarding unreadable scoreboard");
        if let Err(err) = self.scores.delete() {
            log_failure(&err, "deleting scoreboard");
        }
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    snapshots: Option<Box<dyn SnapshotRepository>>,
    scores: Option<Box<dyn ScoreboardRepository>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            snapshots: None,
            scores: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a custom snapshot store instead of the configured one.
    pub fn snapshot_repository(mut self, repo: impl SnapshotRepository + 'static) -> Self {
        self.snapshots = Some(Box::new(repo));
        self
    }

    /// Use a custom scoreboard store instead of the configured one.
    pub fn scoreboard_repository(mut self, repo: impl ScoreboardRepository + 'static) -> Self {
        self.scores = Some(Box::new(repo));
        self
    }

    /// Build the runtime, resuming a saved run when one is readable.
    ///
    /// Without explicit repositories, files under the save directory are used
    /// when persistence is enabled and in-memory stores otherwise.
    pub fn build(self) -> Result<Runtime> {
        let persistence = &self.config.persistence;
        let snapshots: Box<dyn SnapshotRepository> = match self.snapshots {
            Some(repo) => repo,
            None if persistence.enabled => {
                Box::new(FileSnapshotRepository::new(persistence.snapshot_path())?)
            }
            None => Box::new(InMemorySnapshotRepo::new()),
        };
        let scores: Box<dyn ScoreboardRepository> = match self.scores {
            Some(repo) => repo,
            None if persistence.enabled => {
                Box::new(FileScoreboardRepository::new(persistence.scoreboard_path())?)
            }
            None => Box::new(InMemoryScoreboardRepo::new()),
        };

        let session = load_or_start(&self.config, snapshots.as_ref());

        Ok(Runtime {
            config: self.config,
            session,
            snapshots,
            scores,
            overlay: Overlay::None,
            quit: false,
        })
    }
}

/// Logs a failed persistence step. Bugs log as errors, bad or missing files
/// as warnings; neither changes simulation state.
fn log_failure(err: &impl GameError, action: &str) {
    if err.severity().is_internal() {
        tracing::error!(%err, severity = ?err.severity(), "{action} failed");
    } else {
        tracing::warn!(%err, severity = ?err.severity(), "{action} failed");
    }
}

fn session_config(config: &RuntimeConfig) -> SessionConfig {
    SessionConfig {
        game: config.game.clone(),
        message_capacity: config.messages.capacity,
        starting_companions: config.starting_companions,
    }
}

/// Resumes the saved run, or starts fresh when there is none or it is unusable.
fn load_or_start(config: &RuntimeConfig, snapshots: &dyn SnapshotRepository) -> GameSession {
    let session_config = session_config(config);

    let restored = match snapshots.load() {
        Ok(Some(snapshot)) => GameSession::from_snapshot(snapshot, &session_config)
            .map_err(RuntimeError::Restore)
            .map(Some),
        Ok(None) => Ok(None),
        Err(err) => Err(RuntimeError::from(err)),
    };

    match restored {
        Ok(Some(session)) => {
            tracing::info!(
                turn = session.turn,
                depth = session.depth,
                "resumed saved game"
            );
            session
        }
        Ok(None) => fresh_session(config, &session_config),
        Err(err) => {
            log_failure(&err, "resuming saved game");
            if let Err(err) = snapshots.delete() {
                log_failure(&err, "deleting unusable save");
            }
            fresh_session(config, &session_config)
        }
    }
}

fn fresh_session(config: &RuntimeConfig, session_config: &SessionConfig) -> GameSession {
    let seed = config.resolve_seed();
    tracing::info!(seed, "started new run");
    GameSession::new(seed, session_config)
}
