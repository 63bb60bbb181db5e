//! The player character: stats, equipment, buffs, inventory, and run counters.

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::state::Position;

use super::buff::{BuffKind, Buffs};
use super::inventory::{Inventory, PickupError};
use super::item::{Item, ItemEffect};
use super::{Actor, Appearance, ColorTag, CombatRole};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ItemUseError {
    #[error("no item in inventory slot {index}")]
    InvalidSlot { index: usize },

    #[error("already at full health")]
    AlreadyAtFullHealth,

    #[error("no space to summon a companion")]
    NoSpaceToSummon,

    #[error("inventory is full")]
    InventoryFull,
}

impl GameError for ItemUseError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidSlot { .. } => ErrorSeverity::Validation,
            Self::AlreadyAtFullHealth | Self::NoSpaceToSummon | Self::InventoryFull => {
                ErrorSeverity::Recoverable
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum EquipSlot {
    Weapon,
    Armor,
}

/// Result of a successful item use. The consumed unit is returned as `item`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ItemUseOutcome {
    Healed {
        item: Item,
        amount: i32,
    },
    Buffed {
        item: Item,
        kind: BuffKind,
        magnitude: i32,
    },
    Equipped {
        item: Item,
        slot: EquipSlot,
        replaced: Option<Item>,
    },
    /// The scroll was consumed; the caller places the companion.
    Summoned {
        item: Item,
        level: u32,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunCounters {
    pub depth_reached: u32,
    pub kills: u32,
    pub items_collected: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub name: String,
    pub position: Position,
    hp: i32,
    base_max_hp: i32,
    base_attack: i32,
    base_defense: i32,
    inventory: Inventory,
    weapon: Option<Item>,
    armor: Option<Item>,
    buffs: Buffs,
    pub counters: RunCounters,
}

impl Player {
    pub const NAME: &'static str = "Adventurer";
    pub const BASE_HP: i32 = 30;
    pub const BASE_ATTACK: i32 = 4;
    pub const BASE_DEFENSE: i32 = 1;

    pub fn new(position: Position) -> Self {
        Self {
            name: Self::NAME.to_string(),
            position,
            hp: Self::BASE_HP,
            base_max_hp: Self::BASE_HP,
            base_attack: Self::BASE_ATTACK,
            base_defense: Self::BASE_DEFENSE,
            inventory: Inventory::empty(),
            weapon: None,
            armor: None,
            buffs: Buffs::empty(),
            counters: RunCounters {
                depth_reached: 1,
                ..RunCounters::default()
            },
        }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn weapon(&self) -> Option<&Item> {
        self.weapon.as_ref()
    }

    pub fn armor(&self) -> Option<&Item> {
        self.armor.as_ref()
    }

    pub fn buffs(&self) -> &Buffs {
        &self.buffs
    }

    pub fn base_max_hp(&self) -> i32 {
        self.base_max_hp
    }

    /// Restores up to `amount` hp and returns the amount actually healed.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = (self.hp + amount.max(0)).min(self.max_hp());
        self.hp - before
    }

    /// Sets hp directly, clamped to `[0, max_hp]`.
    pub fn set_hp(&mut self, hp: i32) {
        self.hp = hp.clamp(0, self.max_hp());
    }

    pub fn pick_up(&mut self, item: Item) -> Result<(), PickupError> {
        self.inventory.add(item)?;
        self.counters.items_collected += 1;
        Ok(())
    }

    pub fn record_kill(&mut self) {
        self.counters.kills += 1;
    }

    pub fn record_depth(&mut self, depth: u32) {
        self.counters.depth_reached = self.counters.depth_reached.max(depth);
    }

    /// Grants a timed buff. An hp buff also heals by its magnitude.
    pub fn grant_buff(&mut self, kind: BuffKind, magnitude: i32, duration: u32) {
        self.buffs.grant(kind, magnitude, duration);
        if kind == BuffKind::Hp {
            self.heal(magnitude);
        }
        self.hp = self.hp.min(self.max_hp());
    }

    /// Ticks every buff once and returns those that expired.
    pub fn decay_buffs(&mut self) -> ArrayVec<BuffKind, { GameConfig::MAX_BUFFS }> {
        let expired = self.buffs.decay();
        self.hp = self.hp.min(self.max_hp());
        expired
    }

    /// Applies the item in `index` and consumes one unit of it.
    ///
    /// Summon scrolls are consumed unconditionally; callers must confirm a
    /// free tile exists before calling.
    pub fn use_item(&mut self, index: usize) -> Result<ItemUseOutcome, ItemUseError> {
        let effect = self
            .inventory
            .get(index)
            .map(Item::effect)
            .ok_or(ItemUseError::InvalidSlot { index })?;

        match effect {
            ItemEffect::HealHp(amount) => {
                if self.hp >= self.max_hp() {
                    return Err(ItemUseError::AlreadyAtFullHealth);
                }
                let item = self.consume(index)?;
                let amount = self.heal(amount);
                Ok(ItemUseOutcome::Healed { item, amount })
            }
            ItemEffect::GrantTimedBuff {
                kind,
                magnitude,
                duration,
            } => {
                let item = self.consume(index)?;
                self.grant_buff(kind, magnitude, duration);
                Ok(ItemUseOutcome::Buffed {
                    item,
                    kind,
                    magnitude,
                })
            }
            ItemEffect::SummonCompanion { level } => Ok(ItemUseOutcome::Summoned {
                item: self.consume(index)?,
                level,
            }),
            ItemEffect::EquipWeapon => self.equip(index, EquipSlot::Weapon),
            ItemEffect::EquipArmor => self.equip(index, EquipSlot::Armor),
        }
    }

    fn consume(&mut self, index: usize) -> Result<Item, ItemUseError> {
        self.inventory
            .take_one(index)
            .ok_or(ItemUseError::InvalidSlot { index })
    }

    /// Equips the item in `index`; the displaced item takes over its slot.
    fn equip(&mut self, index: usize, slot: EquipSlot) -> Result<ItemUseOutcome, ItemUseError> {
        let equipped = match slot {
            EquipSlot::Weapon => &mut self.weapon,
            EquipSlot::Armor => &mut self.armor,
        };
        let item = match equipped.clone() {
            Some(old) => self.inventory.exchange(index, old).map_err(|err| match err {
                PickupError::InventoryFull { .. } => ItemUseError::InventoryFull,
                PickupError::NoSuchSlot { index } => ItemUseError::InvalidSlot { index },
            })?,
            None => self
                .inventory
                .take_one(index)
                .ok_or(ItemUseError::InvalidSlot { index })?,
        };
        let replaced = equipped.replace(item.clone());
        Ok(ItemUseOutcome::Equipped {
            item,
            slot,
            replaced,
        })
    }
}

impl Actor for Player {
    fn name(&self) -> &str {
        &self.name
    }

    fn appearance(&self) -> Appearance {
        Appearance::new('@', ColorTag::Yellow)
    }

    fn role(&self) -> CombatRole {
        CombatRole::Player
    }

    fn position(&self) -> Position {
        self.position
    }

    fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    fn hp(&self) -> i32 {
        self.hp
    }

    fn max_hp(&self) -> i32 {
        self.base_max_hp + self.buffs.magnitude(BuffKind::Hp)
    }

    fn attack(&self) -> i32 {
        self.base_attack
            + self.weapon.as_ref().map_or(0, Item::power)
            + self.buffs.magnitude(BuffKind::Attack)
    }

    fn defense(&self) -> i32 {
        self.base_defense
            + self.armor.as_ref().map_or(0, Item::power)
            + self.buffs.magnitude(BuffKind::Defense)
    }

    fn take_damage(&mut self, amount: i32) -> bool {
        self.hp = (self.hp - amount.max(0)).max(0);
        self.hp == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::ItemKind;

    fn player_with(items: &[Item]) -> Player {
        let mut player = Player::new(Position::new(5, 5));
        for item in items {
            player.pick_up(item.clone()).unwrap();
        }
        player
    }

    #[test]
    fn starting_stats() {
        let player = Player::new(Position::ORIGIN);
        assert_eq!(player.name, "Adventurer");
        assert_eq!((player.hp(), player.max_hp()), (30, 30));
        assert_eq!((player.attack(), player.defense()), (4, 1));
        assert_eq!(player.counters.depth_reached, 1);
    }

    #[test]
    fn health_potion_rejected_at_full_hp() {
        let mut player = player_with(&[Item::new(ItemKind::HealthPotion, 1)]);
        assert_eq!(player.use_item(0), Err(ItemUseError::AlreadyAtFullHealth));
        assert_eq!(player.inventory().len(), 1);
    }

    #[test]
    fn health_potion_heals_and_is_consumed() {
        let mut player = player_with(&[Item::new(ItemKind::HealthPotion, 1).with_quantity(2)]);
        player.take_damage(15);

        let outcome = player.use_item(0).unwrap();
        assert!(matches!(outcome, ItemUseOutcome::Healed { amount: 10, .. }));
        assert_eq!(player.hp(), 25);
        assert_eq!(player.inventory().get(0).map(|i| i.quantity), Some(1));
    }

    #[test]
    fn equipping_swaps_previous_item_back() {
        let mut player = player_with(&[
            Item::new(ItemKind::Weapon, 1),
            Item::new(ItemKind::Weapon, 3),
        ]);
        player.use_item(0).unwrap();
        assert_eq!(player.attack(), 6);
        assert_eq!(player.inventory().len(), 1);

        let outcome = player.use_item(0).unwrap();
        match outcome {
            ItemUseOutcome::Equipped { replaced, slot, .. } => {
                assert_eq!(slot, EquipSlot::Weapon);
                assert_eq!(replaced.map(|i| i.level), Some(1));
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(player.attack(), 8);
        assert_eq!(player.inventory().get(0).map(|i| i.level), Some(1));
    }

    #[test]
    fn displaced_item_keeps_the_equipped_items_slot() {
        let mut player = player_with(&[
            Item::new(ItemKind::Armor, 1),
            Item::new(ItemKind::HealthPotion, 1),
            Item::new(ItemKind::Armor, 3),
        ]);
        player.use_item(0).unwrap();
        player.use_item(1).unwrap();

        assert_eq!(player.armor().map(|i| i.level), Some(3));
        let kinds: Vec<_> = player.inventory().iter().map(|i| (i.kind, i.level)).collect();
        assert_eq!(
            kinds,
            [(ItemKind::HealthPotion, 1), (ItemKind::Armor, 1)]
        );
    }

    #[test]
    fn equip_from_stack_into_full_inventory_changes_nothing() {
        let mut items = vec![
            Item::new(ItemKind::Weapon, 1),
            Item::new(ItemKind::Weapon, 4).with_quantity(2),
        ];
        items.extend((0..8).map(|_| Item::new(ItemKind::Armor, 1)));
        let mut player = player_with(&items);
        player.use_item(0).unwrap();
        player.pick_up(Item::new(ItemKind::Armor, 2)).unwrap();
        assert!(player.inventory().is_full());
        let before = player.clone();

        assert_eq!(player.use_item(0), Err(ItemUseError::InventoryFull));
        assert_eq!(player.weapon().map(|i| i.level), Some(1));
        assert_eq!(player.inventory(), before.inventory());
        assert_eq!(player.attack(), before.attack());
    }

    #[test]
    fn armor_adds_defense() {
        let mut player = player_with(&[Item::new(ItemKind::Armor, 1)]);
        player.use_item(0).unwrap();
        assert_eq!(player.defense(), 2);
        assert!(player.inventory().is_empty());
    }

    #[test]
    fn vitality_buff_raises_max_and_clamps_on_expiry() {
        let mut player = player_with(&[Item::new(ItemKind::VitalityPotion, 1)]);
        player.use_item(0).unwrap();
        assert_eq!(player.max_hp(), 45);
        assert_eq!(player.hp(), 45);

        for _ in 0..GameConfig::BUFF_DURATION {
            player.decay_buffs();
        }
        assert_eq!(player.max_hp(), 30);
        assert_eq!(player.hp(), 30);
    }

    #[test]
    fn defense_potion_grants_timed_buff() {
        let mut player = player_with(&[Item::new(ItemKind::DefensePotion, 2)]);
        player.use_item(0).unwrap();
        assert_eq!(player.defense(), 1 + 7);
        assert_eq!(
            player.buffs().get(BuffKind::Defense).map(|b| b.remaining),
            Some(15)
        );
    }

    #[test]
    fn invalid_slot_is_rejected() {
        let mut player = Player::new(Position::ORIGIN);
        assert_eq!(
            player.use_item(3),
            Err(ItemUseError::InvalidSlot { index: 3 })
        );
    }

    #[test]
    fn pickups_are_counted() {
        let mut player = Player::new(Position::ORIGIN);
        player.pick_up(Item::new(ItemKind::HealthPotion, 1)).unwrap();
        player.pick_up(Item::new(ItemKind::HealthPotion, 1)).unwrap();
        assert_eq!(player.counters.items_collected, 2);
    }
}
