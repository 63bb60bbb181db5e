//! A generated dungeon level and its mutable contents.

use crate::entity::{Actor, FloorItem, Monster};
use crate::map::{self, Biome, TileGrid, TileKind};
use crate::state::{EntityId, Position};

/// Two linked portal tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PortalPair {
    pub a: Position,
    pub b: Position,
}

impl PortalPair {
    /// `(x1, y1, x2, y2)`.
    pub fn as_tuple(&self) -> (i32, i32, i32, i32) {
        (self.a.x, self.a.y, self.b.x, self.b.y)
    }

    pub fn from_tuple((x1, y1, x2, y2): (i32, i32, i32, i32)) -> Self {
        Self {
            a: Position::new(x1, y1),
            b: Position::new(x2, y2),
        }
    }

    /// The opposite end when `position` is one of the two ends.
    pub fn exit_for(&self, position: Position) -> Option<Position> {
        if position == self.a {
            Some(self.b)
        } else if position == self.b {
            Some(self.a)
        } else {
            None
        }
    }
}

/// The persisted part of a level. Terrain is rebuilt from `seed`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelRecord {
    pub seed: u64,
    pub monsters: Vec<Monster>,
    pub items: Vec<FloorItem>,
    pub portals: Vec<PortalPair>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    pub seed: u64,
    pub depth: u32,
    pub biome: Biome,
    pub grid: TileGrid,
    pub start: Position,
    pub stairs: Position,
    pub monsters: Vec<Monster>,
    pub items: Vec<FloorItem>,
    pub portals: Vec<PortalPair>,
}

impl Level {
    /// Regenerates terrain from the record's seed and overlays its contents.
    pub fn restore(depth: u32, record: LevelRecord) -> Self {
        let mut level = map::generate(record.seed, depth);
        for portal in &level.portals {
            level.grid.set(portal.a, TileKind::Floor);
            level.grid.set(portal.b, TileKind::Floor);
        }
        for portal in &record.portals {
            level.grid.set(portal.a, TileKind::Portal);
            level.grid.set(portal.b, TileKind::Portal);
        }
        level.monsters = record.monsters;
        level.items = record.items;
        level.portals = record.portals;
        level
    }

    pub fn record(&self) -> LevelRecord {
        LevelRecord {
            seed: self.seed,
            monsters: self.monsters.clone(),
            items: self.items.clone(),
            portals: self.portals.clone(),
        }
    }

    /// Tile kind for display; the stairs cell renders as `StairsDown`.
    pub fn tile_at(&self, position: Position) -> TileKind {
        if position == self.stairs {
            return TileKind::StairsDown;
        }
        self.grid.get(position).unwrap_or(TileKind::Wall)
    }

    pub fn is_stairs(&self, position: Position) -> bool {
        position == self.stairs
    }

    pub fn portal_exit(&self, position: Position) -> Option<Position> {
        self.portals
            .iter()
            .find_map(|portal| portal.exit_for(position))
    }

    /// Living monster standing on `position`.
    pub fn monster_at(&self, position: Position) -> Option<&Monster> {
        self.monsters
            .iter()
            .find(|monster| monster.is_alive() && monster.position == position)
    }

    pub fn monster(&self, id: EntityId) -> Option<&Monster> {
        self.monsters.iter().find(|monster| monster.id == id)
    }

    pub fn monster_mut(&mut self, id: EntityId) -> Option<&mut Monster> {
        self.monsters.iter_mut().find(|monster| monster.id == id)
    }

    pub fn remove_monster(&mut self, id: EntityId) -> Option<Monster> {
        let index = self.monsters.iter().position(|monster| monster.id == id)?;
        Some(self.monsters.remove(index))
    }

    pub fn item_index_at(&self, position: Position) -> Option<usize> {
        self.items.iter().position(|item| item.position == position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restore_rebuilds_terrain_and_keeps_mutations() {
        let original = map::generate(2024, 3);
        let mut mutated = original.clone();
        mutated.monsters.truncate(1);
        if let Some(monster) = mutated.monsters.first_mut() {
            monster.hp = 1;
        }
        mutated.items.clear();

        let restored = Level::restore(3, mutated.record());
        assert_eq!(restored, mutated);
        assert_eq!(restored.grid, original.grid);
    }

    #[test]
    fn restore_moves_portal_tiles() {
        let original = map::generate(11, 2);
        let mut record = original.record();
        let moved = PortalPair {
            a: original.start,
            b: original.stairs,
        };
        record.portals = vec![moved];

        let restored = Level::restore(2, record);
        for portal in &original.portals {
            assert_eq!(restored.grid.get(portal.a), Some(TileKind::Floor));
        }
        assert_eq!(restored.grid.get(moved.a), Some(TileKind::Portal));
        assert_eq!(restored.portal_exit(moved.b), Some(moved.a));
    }

    #[test]
    fn stairs_render_but_stay_floor() {
        let level = map::generate(5, 1);
        assert_eq!(level.tile_at(level.stairs), TileKind::StairsDown);
        assert_eq!(level.grid.get(level.stairs), Some(TileKind::Floor));
    }

    #[test]
    fn portal_tuple_layout() {
        let pair = PortalPair::from_tuple((1, 2, 3, 4));
        assert_eq!(pair.as_tuple(), (1, 2, 3, 4));
        assert_eq!(pair.exit_for(Position::new(1, 2)), Some(Position::new(3, 4)));
        assert_eq!(pair.exit_for(Position::new(9, 9)), None);
    }
}
