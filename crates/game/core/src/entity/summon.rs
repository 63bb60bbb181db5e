//! Friendly companions.

use crate::state::{EntityId, Position};

use super::{Actor, Appearance, ColorTag, CombatRole};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Summon {
    pub id: EntityId,
    pub level: u32,
    pub name: String,
    pub position: Position,
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    pub defense: i32,
}

impl Summon {
    pub const GLYPH: char = 'S';

    pub fn new(id: EntityId, level: u32, position: Position) -> Self {
        let level = level.max(1);
        let scale = level as i32;
        let max_hp = 15 + 8 * scale;
        Self {
            id,
            level,
            name: format!("Companion Lv.{level}"),
            position,
            hp: max_hp,
            max_hp,
            attack: 2 + 2 * scale,
            defense: scale,
        }
    }

    /// Restores up to `amount` hp and returns the amount actually healed.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = (self.hp + amount.max(0)).min(self.max_hp);
        self.hp - before
    }

    fn color(&self) -> ColorTag {
        match self.level {
            1 => ColorTag::Cyan,
            2 => ColorTag::Green,
            3 => ColorTag::Yellow,
            4 => ColorTag::Magenta,
            _ => ColorTag::White,
        }
    }
}

impl Actor for Summon {
    fn name(&self) -> &str {
        &self.name
    }

    fn appearance(&self) -> Appearance {
        Appearance::new(Self::GLYPH, self.color())
    }

    fn role(&self) -> CombatRole {
        CombatRole::Summon { level: self.level }
    }

    impl_plain_vitals!();
}
