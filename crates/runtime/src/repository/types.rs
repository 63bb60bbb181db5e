//! Records persisted alongside the run snapshot.

use game_core::{GameConfig, RunCounters};
use serde::{Deserialize, Serialize};

/// One finished run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub depth_reached: u32,
    pub kills: u32,
    pub items_collected: u32,
    pub turns: u64,
}

impl ScoreEntry {
    pub fn from_counters(counters: &RunCounters, turns: u64) -> Self {
        Self {
            depth_reached: counters.depth_reached,
            kills: counters.kills,
            items_collected: counters.items_collected,
            turns,
        }
    }

    /// Deeper first, then more kills, then more items, then fewer turns.
    fn rank_key(&self) -> (u32, u32, u32, std::cmp::Reverse<u64>) {
        (
            self.depth_reached,
            self.kills,
            self.items_collected,
            std::cmp::Reverse(self.turns),
        )
    }
}

/// Best runs, best first, at most [`GameConfig::MAX_HIGH_SCORES`] entries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    entries: Vec<ScoreEntry>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts `entry` in rank order and truncates the table.
    ///
    /// Returns the 0-based rank, or `None` when the entry did not qualify.
    /// Ties keep earlier runs ahead.
    pub fn insert(&mut self, entry: ScoreEntry) -> Option<usize> {
        let key = entry.rank_key();
        let rank = self
            .entries
            .iter()
            .position(|existing| key > existing.rank_key())
            .unwrap_or(self.entries.len());
        if rank >= GameConfig::MAX_HIGH_SCORES {
            return None;
        }
        self.entries.insert(rank, entry);
        self.entries.truncate(GameConfig::MAX_HIGH_SCORES);
        Some(rank)
    }

    /// Restores ordering and size after loading untrusted data.
    pub fn normalize(&mut self) {
        self.entries
            .sort_by_key(|entry| std::cmp::Reverse(entry.rank_key()));
        self.entries.truncate(GameConfig::MAX_HIGH_SCORES);
    }
}
