pub mod common;

pub use common::{Direction, EntityId, Position};
