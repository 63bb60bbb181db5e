//! Discrete player intents accepted once per tick.

use game_core::Direction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerIntent {
    /// Step (or attack, swap, trigger) by a unit offset.
    Move { dx: i32, dy: i32 },
    UseItem(usize),
    OpenInventory,
    OpenHelp,
    RequestReset,
    RequestQuit,
}

impl PlayerIntent {
    pub fn step(direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        PlayerIntent::Move { dx, dy }
    }

    /// Intents resolved by the turn engine; the rest are handled by the driver.
    pub fn is_simulation_action(self) -> bool {
        matches!(self, PlayerIntent::Move { .. } | PlayerIntent::UseItem(_))
    }
}
