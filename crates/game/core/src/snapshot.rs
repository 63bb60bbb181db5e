//! Persisted session schema.
//!
//! A snapshot carries only mutable state. Terrain is regenerated from
//! `level.seed` on load and overlaid with the persisted lists.

use crate::config::GameConfig;
use crate::entity::{Actor, Player, Summon};
use crate::error::{ErrorSeverity, GameError};
use crate::level::LevelRecord;
use crate::rng::{GameRng, RngStateError};

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to encode snapshot: {0}")]
    Encode(String),

    #[error("failed to decode snapshot: {0}")]
    Decode(String),

    #[error("snapshot player is dead")]
    PlayerDead,

    #[error("snapshot depth {depth} is outside 1..={max}")]
    InvalidDepth { depth: u32, max: u32 },

    #[error("snapshot hp {hp} exceeds max {max_hp}")]
    HpOutOfRange { hp: i32, max_hp: i32 },

    #[error(transparent)]
    Rng(#[from] RngStateError),
}

impl GameError for SnapshotError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Encode(_) => ErrorSeverity::Internal,
            Self::Decode(_)
            | Self::PlayerDead
            | Self::InvalidDepth { .. }
            | Self::HpOutOfRange { .. }
            | Self::Rng(_) => ErrorSeverity::Validation,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub player: Player,
    pub dungeon_depth: u32,
    pub turn_count: u64,
    pub rng_state: [u8; GameRng::STATE_BYTES],
    pub level: LevelRecord,
    pub summons: Vec<Summon>,
    /// Next id handed to a new summon.
    pub next_summon_id: u32,
}

impl Snapshot {
    /// Rejects snapshots that cannot be resumed.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if !self.player.is_alive() {
            return Err(SnapshotError::PlayerDead);
        }
        if !(1..=GameConfig::MAX_DEPTH).contains(&self.dungeon_depth) {
            return Err(SnapshotError::InvalidDepth {
                depth: self.dungeon_depth,
                max: GameConfig::MAX_DEPTH,
            });
        }
        if self.player.hp() > self.player.max_hp() {
            return Err(SnapshotError::HpOutOfRange {
                hp: self.player.hp(),
                max_hp: self.player.max_hp(),
            });
        }
        Ok(())
    }

    pub fn rng(&self) -> Result<GameRng, SnapshotError> {
        Ok(GameRng::from_bytes(&self.rng_state)?)
    }

    #[cfg(feature = "serde")]
    pub fn encode(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::Encode(e.to_string()))
    }

    #[cfg(feature = "serde")]
    pub fn decode(bytes: &[u8]) -> Result<Self, SnapshotError> {
        bincode::deserialize(bytes).map_err(|e| SnapshotError::Decode(e.to_string()))
    }
}
