//! File-based ScoreboardRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::repository::{RepositoryError, Result, ScoreboardRepository, Scoreboard};

/// Stores the high-score table as pretty-printed JSON.
pub struct FileScoreboardRepository {
    path: PathBuf,
}

impl FileScoreboardRepository {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(RepositoryError::Io)?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreboardRepository for FileScoreboardRepository {
    fn load(&self) -> Result<Scoreboard> {
        if !self.path.exists() {
            return Ok(Scoreboard::new());
        }
        let bytes = fs::read(&self.path).map_err(RepositoryError::Io)?;
        let mut board: Scoreboard = serde_json::from_slice(&bytes)
            .map_err(|e| RepositoryError::CorruptedData(format!("scoreboard: {e}")))?;
        board.normalize();
        tracing::debug!(path = %self.path.display(), entries = board.entries().len(), "loaded scoreboard");
        Ok(board)
    }

    fn save(&self, scoreboard: &Scoreboard) -> Result<()> {
        let temp_path = self.path.with_extension("json.tmp");
        let json = serde_json::to_vec_pretty(scoreboard)
            .map_err(|e| RepositoryError::Json(e.to_string()))?;
        fs::write(&temp_path, json).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, &self.path).map_err(RepositoryError::Io)?;
        tracing::debug!(path = %self.path.display(), "saved scoreboard");
        Ok(())
    }

    fn delete(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(RepositoryError::Io)?;
        }
        Ok(())
    }
}
