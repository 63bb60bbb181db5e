//! Bounded, ordered player inventory.

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};

use super::item::Item;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PickupError {
    #[error("inventory is full ({capacity} slots)")]
    InventoryFull { capacity: usize },

    #[error("no item in inventory slot {index}")]
    NoSuchSlot { index: usize },
}

impl GameError for PickupError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InventoryFull { .. } => ErrorSeverity::Recoverable,
            Self::NoSuchSlot { .. } => ErrorSeverity::Validation,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    slots: ArrayVec<Item, { GameConfig::INVENTORY_CAPACITY }>,
}

impl Inventory {
    pub fn empty() -> Self {
        Self {
            slots: ArrayVec::new(),
        }
    }

    /// Adds an item, merging it into a matching stack when possible.
    ///
    /// Merging never needs a free slot, so a full inventory still accepts an
    /// item that stacks onto an existing entry.
    pub fn add(&mut self, item: Item) -> Result<(), PickupError> {
        if let Some(stack) = self.slots.iter_mut().find(|slot| slot.stacks_with(&item)) {
            stack.quantity += item.quantity;
            return Ok(());
        }
        self.slots.try_push(item).map_err(|_| full())
    }

    /// Takes one unit out of `index` and stores `item` in its place.
    ///
    /// When the slot holds more than one unit the rest stay put and `item`
    /// needs a free slot of its own; on failure nothing changes.
    pub fn exchange(&mut self, index: usize, item: Item) -> Result<Item, PickupError> {
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(PickupError::NoSuchSlot { index })?;
        if slot.quantity == 1 {
            return Ok(core::mem::replace(slot, item));
        }
        self.slots.try_push(item).map_err(|_| full())?;
        self.take_one(index).ok_or(PickupError::NoSuchSlot { index })
    }

    /// Removes one unit from the slot, dropping the slot when it empties.
    pub fn take_one(&mut self, index: usize) -> Option<Item> {
        let slot = self.slots.get_mut(index)?;
        if slot.quantity > 1 {
            slot.quantity -= 1;
            return Some(Item {
                quantity: 1,
                ..slot.clone()
            });
        }
        Some(self.slots.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.slots.get(index)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.is_full()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.slots.iter()
    }
}

fn full() -> PickupError {
    PickupError::InventoryFull {
        capacity: GameConfig::INVENTORY_CAPACITY,
    }
}
