//! Deterministic dungeon simulation rules and data types.
//!
//! `game-core` defines the canonical rules (level generation, entities,
//! combat, movement) and exposes pure APIs that the runtime drives. Nothing
//! here performs I/O; every random decision draws from an explicit
//! [`GameRng`] passed in by the caller.
pub mod combat;
pub mod config;
pub mod entity;
pub mod error;
pub mod level;
pub mod map;
pub mod movement;
pub mod rng;
pub mod snapshot;
pub mod state;

pub use combat::{CombatOutcome, calculate_damage, resolve_combat};
pub use config::GameConfig;
pub use entity::{
    Actor, ActorRef, Appearance, BuffKind, ColorTag, CombatRole, EquipSlot, FloorItem, Item,
    ItemEffect, ItemKind, ItemUseError, ItemUseOutcome, Monster, MonsterKind, PickupError, Player,
    RunCounters, Summon,
};
pub use error::{ErrorSeverity, GameError};
pub use level::{Level, LevelRecord, PortalPair};
pub use map::{Biome, MapDimensions, TileGrid, TileKind};
pub use movement::{Occupancy, can_enter, try_move};
pub use rng::{GameRng, RngStateError};
pub use snapshot::{Snapshot, SnapshotError};
pub use state::{Direction, EntityId, Position};
