//! Grid movement with collision against terrain and other living entities.

use std::collections::HashSet;

use crate::entity::Actor;
use crate::map::TileGrid;
use crate::state::Position;

/// Tiles currently held by living entities.
///
/// Owned by the caller for the duration of a tick and kept in sync with every
/// successful move, so at most one entity ever stands on a tile.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Occupancy {
    tiles: HashSet<Position>,
}

impl Occupancy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_positions(positions: impl IntoIterator<Item = Position>) -> Self {
        Self {
            tiles: positions.into_iter().collect(),
        }
    }

    pub fn is_occupied(&self, position: Position) -> bool {
        self.tiles.contains(&position)
    }

    /// Returns false when the tile was already taken.
    pub fn occupy(&mut self, position: Position) -> bool {
        self.tiles.insert(position)
    }

    pub fn vacate(&mut self, position: Position) {
        self.tiles.remove(&position);
    }

    pub fn relocate(&mut self, from: Position, to: Position) {
        self.tiles.remove(&from);
        self.tiles.insert(to);
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// Whether a living entity may stand on `position` right now.
pub fn can_enter(grid: &TileGrid, occupancy: &Occupancy, position: Position) -> bool {
    grid.is_walkable(position) && !occupancy.is_occupied(position)
}

/// Moves `actor` by `(dx, dy)` if the destination is in bounds, walkable, and
/// unoccupied. Returns whether the move happened.
pub fn try_move<A>(
    actor: &mut A,
    dx: i32,
    dy: i32,
    grid: &TileGrid,
    occupancy: &mut Occupancy,
) -> bool
where
    A: Actor + ?Sized,
{
    if dx == 0 && dy == 0 {
        return false;
    }
    let from = actor.position();
    let to = from.offset(dx, dy);
    if !can_enter(grid, occupancy, to) {
        return false;
    }
    occupancy.relocate(from, to);
    actor.set_position(to);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Summon;
    use crate::map::{MapDimensions, Rect};
    use crate::state::EntityId;

    fn open_grid() -> TileGrid {
        let mut grid = TileGrid::filled(MapDimensions::new(8, 8));
        grid.carve_room(&Rect::new(1, 1, 6, 6));
        grid
    }

    #[test]
    fn moves_onto_free_floor() {
        let grid = open_grid();
        let mut summon = Summon::new(EntityId(1), 1, Position::new(2, 2));
        let mut occupancy = Occupancy::from_positions([summon.position]);

        assert!(try_move(&mut summon, 1, 1, &grid, &mut occupancy));
        assert_eq!(summon.position, Position::new(3, 3));
        assert!(occupancy.is_occupied(Position::new(3, 3)));
        assert!(!occupancy.is_occupied(Position::new(2, 2)));
    }

    #[test]
    fn walls_bounds_and_occupants_block() {
        let grid = open_grid();
        let mut summon = Summon::new(EntityId(1), 1, Position::new(1, 1));
        let mut occupancy = Occupancy::from_positions([summon.position, Position::new(2, 1)]);

        assert!(!try_move(&mut summon, -1, 0, &grid, &mut occupancy));
        assert!(!try_move(&mut summon, 1, 0, &grid, &mut occupancy));
        assert!(!try_move(&mut summon, 0, 0, &grid, &mut occupancy));
        summon.position = Position::new(0, 0);
        assert!(!try_move(&mut summon, -1, -1, &grid, &mut occupancy));
        assert_eq!(occupancy.len(), 2);
    }
}
