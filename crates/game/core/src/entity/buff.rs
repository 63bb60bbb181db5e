//! Timed stat modifiers attached to the player.
//!
//! Each buff kind holds at most one entry; granting a kind that is already
//! active replaces its magnitude and resets its remaining ticks.

use arrayvec::ArrayVec;

use crate::config::GameConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BuffKind {
    Attack,
    Defense,
    Hp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveBuff {
    pub kind: BuffKind,
    pub magnitude: i32,
    pub remaining: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Buffs {
    active: ArrayVec<ActiveBuff, { GameConfig::MAX_BUFFS }>,
}

impl Buffs {
    pub fn empty() -> Self {
        Self {
            active: ArrayVec::new(),
        }
    }

    pub fn grant(&mut self, kind: BuffKind, magnitude: i32, duration: u32) {
        if duration == 0 {
            self.active.retain(|buff| buff.kind != kind);
            return;
        }
        let buff = ActiveBuff {
            kind,
            magnitude,
            remaining: duration,
        };
        if let Some(existing) = self.active.iter_mut().find(|b| b.kind == kind) {
            *existing = buff;
        } else {
            // One slot per kind, so this never overflows.
            let _ = self.active.try_push(buff);
        }
    }

    pub fn get(&self, kind: BuffKind) -> Option<&ActiveBuff> {
        self.active.iter().find(|buff| buff.kind == kind)
    }

    /// Magnitude of an active buff, 0 when inactive.
    pub fn magnitude(&self, kind: BuffKind) -> i32 {
        self.get(kind).map_or(0, |buff| buff.magnitude)
    }

    pub fn is_active(&self, kind: BuffKind) -> bool {
        self.get(kind).is_some()
    }

    /// Advances every buff by one tick and returns the kinds that expired.
    pub fn decay(&mut self) -> ArrayVec<BuffKind, { GameConfig::MAX_BUFFS }> {
        let mut expired = ArrayVec::new();
        for buff in self.active.iter_mut() {
            buff.remaining = buff.remaining.saturating_sub(1);
            if buff.remaining == 0 {
                expired.push(buff.kind);
            }
        }
        self.active.retain(|buff| buff.remaining > 0);
        expired
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveBuff> {
        self.active.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defense_buff_lasts_exactly_its_duration() {
        let mut buffs = Buffs::empty();
        buffs.grant(BuffKind::Defense, 7, 15);

        for _ in 0..14 {
            assert!(buffs.decay().is_empty());
        }
        assert_eq!(buffs.magnitude(BuffKind::Defense), 7);
        assert_eq!(buffs.get(BuffKind::Defense).map(|b| b.remaining), Some(1));

        let expired = buffs.decay();
        assert_eq!(expired.as_slice(), &[BuffKind::Defense]);
        assert!(!buffs.is_active(BuffKind::Defense));
        assert_eq!(buffs.magnitude(BuffKind::Defense), 0);
    }

    #[test]
    fn regrant_replaces_existing_entry() {
        let mut buffs = Buffs::empty();
        buffs.grant(BuffKind::Attack, 3, 2);
        buffs.decay();
        buffs.grant(BuffKind::Attack, 5, 15);

        assert_eq!(buffs.iter().count(), 1);
        let attack = buffs.get(BuffKind::Attack).unwrap();
        assert_eq!((attack.magnitude, attack.remaining), (5, 15));
    }

    #[test]
    fn kinds_decay_independently() {
        let mut buffs = Buffs::empty();
        buffs.grant(BuffKind::Hp, 15, 1);
        buffs.grant(BuffKind::Defense, 5, 3);

        assert_eq!(buffs.decay().as_slice(), &[BuffKind::Hp]);
        assert!(buffs.is_active(BuffKind::Defense));
        assert!(buffs.decay().is_empty());
        assert_eq!(buffs.decay().as_slice(), &[BuffKind::Defense]);
        assert!(buffs.is_empty());
    }
}
