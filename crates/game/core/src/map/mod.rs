//! Procedural level generation.
//!
//! [`generate`] turns `(seed, depth)` into a fully populated [`Level`]
//! (see [`crate::level`]). Layout happens in three steps: partition the map
//! with a BSP tree, carve rooms and corridors, then validate that the stairs
//! are reachable from the start. Population (monsters, items, portals) runs on
//! a stream derived from the same seed, so the whole level is a pure function
//! of its inputs.

mod biome;
mod bsp;
pub mod connectivity;
mod generator;
mod populate;
mod rect;
mod tile;

pub use biome::Biome;
pub use bsp::{BspNode, BspTree};
pub use generator::{Layout, build_layout, fallback_layout, generate, generate_layout};
pub use rect::Rect;
pub use tile::{MapDimensions, TileGrid, TileKind};
