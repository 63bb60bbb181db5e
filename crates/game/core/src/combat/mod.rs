//! Combat resolution system.
//!
//! Pure functions: callers own the entity lists and apply the consequences of
//! a death (removal, kill counters, game over) themselves.
//!
//! - `calculate_damage`: attack minus (possibly penetrated) defense, floor 1
//! - `penetration_tenths`: monster armour penetration against the player
//! - `resolve_combat`: damage + application in one step

pub mod damage;
pub mod result;

pub use damage::{calculate_damage, effective_defense, penetration_tenths};
pub use result::{CombatOutcome, resolve_combat};
