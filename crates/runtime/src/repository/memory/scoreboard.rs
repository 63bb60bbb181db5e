//! In-memory ScoreboardRepository implementation.

use std::sync::RwLock;

use crate::repository::{RepositoryError, Result, ScoreboardRepository, Scoreboard};

#[derive(Default)]
pub struct InMemoryScoreboardRepo {
    board: RwLock<Scoreboard>,
}

impl InMemoryScoreboardRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreboardRepository for InMemoryScoreboardRepo {
    fn load(&self) -> Result<Scoreboard> {
        let board = self.board.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(board.clone())
    }

    fn save(&self, scoreboard: &Scoreboard) -> Result<()> {
        let mut board = self.board.write().map_err(|_| RepositoryError::LockPoisoned)?;
        *board = scoreboard.clone();
        Ok(())
    }

    fn delete(&self) -> Result<()> {
        let mut board = self.board.write().map_err(|_| RepositoryError::LockPoisoned)?;
        *board = Scoreboard::new();
        Ok(())
    }
}
