//! Shared value types used across the simulation.
pub mod types;

pub use types::{Direction, EntityId, Position};
