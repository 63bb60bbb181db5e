//! Entity model shared by the player, monsters, and companions.
//!
//! Every combatant implements [`Actor`]; game logic addresses combatants
//! through the tagged [`ActorRef`] and never inspects concrete types at
//! runtime.

/// Implements the stat accessors for types with plain `hp`/`max_hp`/`attack`/
/// `defense`/`position` fields.
macro_rules! impl_plain_vitals {
    () => {
        fn position(&self) -> $crate::state::Position {
            self.position
        }

        fn set_position(&mut self, position: $crate::state::Position) {
            self.position = position;
        }

        fn hp(&self) -> i32 {
            self.hp
        }

        fn max_hp(&self) -> i32 {
            self.max_hp
        }

        fn attack(&self) -> i32 {
            self.attack
        }

        fn defense(&self) -> i32 {
            self.defense
        }

        fn take_damage(&mut self, amount: i32) -> bool {
            self.hp = (self.hp - amount.max(0)).max(0);
            self.hp == 0
        }
    };
}

pub mod buff;
pub mod inventory;
pub mod item;
pub mod monster;
pub mod player;
pub mod summon;

pub use buff::{ActiveBuff, BuffKind, Buffs};
pub use inventory::{Inventory, PickupError};
pub use item::{FloorItem, Item, ItemEffect, ItemKind};
pub use monster::{Monster, MonsterKind};
pub use player::{EquipSlot, ItemUseError, ItemUseOutcome, Player, RunCounters};
pub use summon::Summon;

use crate::state::{EntityId, Position};

/// Render-only colour tag; the renderer maps it to a palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ColorTag {
    White,
    Gray,
    Yellow,
    Green,
    Cyan,
    Blue,
    Magenta,
    Red,
}

/// Glyph and colour used to draw an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Appearance {
    pub glyph: char,
    pub color: ColorTag,
}

impl Appearance {
    pub const fn new(glyph: char, color: ColorTag) -> Self {
        Self { glyph, color }
    }
}

/// Side of a combatant in the combat resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CombatRole {
    Player,
    Monster { level: u32 },
    Summon { level: u32 },
}

/// Tagged reference to a combatant owned by the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActorRef {
    Player,
    Monster(EntityId),
    Summon(EntityId),
}

impl ActorRef {
    /// Player and summons fight on the same side.
    pub const fn is_friendly(self) -> bool {
        matches!(self, ActorRef::Player | ActorRef::Summon(_))
    }
}

/// Capabilities shared by everything that can stand on a tile and fight.
pub trait Actor {
    fn name(&self) -> &str;
    fn appearance(&self) -> Appearance;
    fn role(&self) -> CombatRole;

    fn position(&self) -> Position;
    fn set_position(&mut self, position: Position);

    fn hp(&self) -> i32;
    fn max_hp(&self) -> i32;
    fn attack(&self) -> i32;
    fn defense(&self) -> i32;

    /// Reduces hp by `amount` (clamped at 0) and returns true when now dead.
    fn take_damage(&mut self, amount: i32) -> bool;

    fn is_alive(&self) -> bool {
        self.hp() > 0
    }
}
