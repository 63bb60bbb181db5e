//! Item catalog and effect selectors.

use crate::config::GameConfig;
use crate::state::Position;

use super::buff::BuffKind;
use super::{Appearance, ColorTag};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ItemKind {
    HealthPotion,
    DefensePotion,
    VitalityPotion,
    SummonScroll,
    Weapon,
    Armor,
}

impl ItemKind {
    /// Weighted table for regular floor drops. Summon scrolls roll separately.
    pub const FLOOR_TABLE: [(ItemKind, u32); 5] = [
        (ItemKind::HealthPotion, 40),
        (ItemKind::DefensePotion, 20),
        (ItemKind::VitalityPotion, 15),
        (ItemKind::Weapon, 12),
        (ItemKind::Armor, 13),
    ];

    pub const fn base_name(self) -> &'static str {
        match self {
            ItemKind::HealthPotion => "Health Potion",
            ItemKind::DefensePotion => "Defense Potion",
            ItemKind::VitalityPotion => "Vitality Potion",
            ItemKind::SummonScroll => "Summon Scroll",
            ItemKind::Weapon => "Iron Sword",
            ItemKind::Armor => "Wooden Shield",
        }
    }

    /// Consumables and scrolls stack; equipment never does.
    pub const fn is_stackable(self) -> bool {
        !matches!(self, ItemKind::Weapon | ItemKind::Armor)
    }

    pub const fn appearance(self) -> Appearance {
        match self {
            ItemKind::HealthPotion => Appearance::new('!', ColorTag::Red),
            ItemKind::DefensePotion => Appearance::new('!', ColorTag::Blue),
            ItemKind::VitalityPotion => Appearance::new('!', ColorTag::Green),
            ItemKind::SummonScroll => Appearance::new('?', ColorTag::Magenta),
            ItemKind::Weapon => Appearance::new('/', ColorTag::Cyan),
            ItemKind::Armor => Appearance::new('[', ColorTag::Yellow),
        }
    }
}

/// What using an item does. Matched by the turn engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemEffect {
    HealHp(i32),
    GrantTimedBuff {
        kind: BuffKind,
        magnitude: i32,
        duration: u32,
    },
    SummonCompanion {
        level: u32,
    },
    EquipWeapon,
    EquipArmor,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub kind: ItemKind,
    pub level: u32,
    pub quantity: u32,
}

impl Item {
    pub fn new(kind: ItemKind, level: u32) -> Self {
        Self {
            kind,
            level: level.max(1),
            quantity: 1,
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity.max(1);
        self
    }

    pub fn name(&self) -> String {
        format!("{} Lv.{}", self.kind.base_name(), self.level)
    }

    pub fn is_stackable(&self) -> bool {
        self.kind.is_stackable()
    }

    /// Two items share an inventory slot iff they are stackable with the same
    /// kind. The stack keeps the level of the unit already held.
    pub fn stacks_with(&self, other: &Item) -> bool {
        self.is_stackable() && self.kind == other.kind
    }

    /// Potency: heal amount, buff magnitude, companion level, or equipment bonus.
    pub fn power(&self) -> i32 {
        let steps = self.level as i32 - 1;
        match self.kind {
            ItemKind::HealthPotion => 10 + steps * 5,
            ItemKind::DefensePotion => 5 + steps * 2,
            ItemKind::VitalityPotion => 15 + steps * 10,
            ItemKind::SummonScroll => self.level as i32,
            ItemKind::Weapon => 2 + steps,
            ItemKind::Armor => 1 + steps / 2,
        }
    }

    pub fn effect(&self) -> ItemEffect {
        match self.kind {
            ItemKind::HealthPotion => ItemEffect::HealHp(self.power()),
            ItemKind::DefensePotion => ItemEffect::GrantTimedBuff {
                kind: BuffKind::Defense,
                magnitude: self.power(),
                duration: GameConfig::BUFF_DURATION,
            },
            ItemKind::VitalityPotion => ItemEffect::GrantTimedBuff {
                kind: BuffKind::Hp,
                magnitude: self.power(),
                duration: GameConfig::BUFF_DURATION,
            },
            ItemKind::SummonScroll => ItemEffect::SummonCompanion { level: self.level },
            ItemKind::Weapon => ItemEffect::EquipWeapon,
            ItemKind::Armor => ItemEffect::EquipArmor,
        }
    }

    pub fn appearance(&self) -> Appearance {
        self.kind.appearance()
    }
}

/// An item lying on the level floor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloorItem {
    pub position: Position,
    pub item: Item,
}
