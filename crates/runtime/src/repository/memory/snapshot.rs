//! In-memory SnapshotRepository implementation for tests and local runs.

use std::sync::RwLock;

use game_core::Snapshot;

use crate::repository::{RepositoryError, Result, SnapshotRepository};

/// Holds at most one snapshot in memory.
#[derive(Default)]
pub struct InMemorySnapshotRepo {
    slot: RwLock<Option<Snapshot>>,
}

impl InMemorySnapshotRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a snapshot already saved.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            slot: RwLock::new(Some(snapshot)),
        }
    }
}

impl SnapshotRepository for InMemorySnapshotRepo {
    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let mut slot = self.slot.write().map_err(|_| RepositoryError::LockPoisoned)?;
        *slot = Some(snapshot.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<Snapshot>> {
        let slot = self.slot.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(slot.clone())
    }

    fn exists(&self) -> bool {
        self.slot
            .read()
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }

    fn delete(&self) -> Result<()> {
        let mut slot = self.slot.write().map_err(|_| RepositoryError::LockPoisoned)?;
        *slot = None;
        Ok(())
    }
}
