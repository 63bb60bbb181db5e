use crate::state::Position;

use super::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    pub const fn center(&self) -> Position {
        Position::new(self.width as i32 / 2, self.height as i32 / 2)
    }
}

/// Canonical cell kinds of the dungeon grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileKind {
    #[default]
    Wall,
    Floor,
    /// Render-only; the grid itself keeps the stairs cell as `Floor`.
    StairsDown,
    Portal,
}

impl TileKind {
    pub fn is_walkable(self) -> bool {
        !matches!(self, TileKind::Wall)
    }

    pub fn glyph(self) -> char {
        match self {
            TileKind::Wall => '#',
            TileKind::Floor => '.',
            TileKind::StairsDown => '>',
            TileKind::Portal => 'O',
        }
    }
}

/// Row-major terrain grid owned by a level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    dimensions: MapDimensions,
    tiles: Vec<TileKind>,
}

impl TileGrid {
    /// Solid grid; generation carves floor into it.
    pub fn filled(dimensions: MapDimensions) -> Self {
        let len = dimensions.width as usize * dimensions.height as usize;
        Self {
            dimensions,
            tiles: vec![TileKind::Wall; len],
        }
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    pub fn width(&self) -> u32 {
        self.dimensions.width
    }

    pub fn height(&self) -> u32 {
        self.dimensions.height
    }

    pub fn contains(&self, position: Position) -> bool {
        self.dimensions.contains(position)
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.y as usize * self.dimensions.width as usize + position.x as usize)
    }

    /// Out-of-bounds lookups return `None`; callers treat that as a wall.
    pub fn get(&self, position: Position) -> Option<TileKind> {
        self.index(position).map(|idx| self.tiles[idx])
    }

    pub fn set(&mut self, position: Position, kind: TileKind) {
        if let Some(idx) = self.index(position) {
            self.tiles[idx] = kind;
        }
    }

    pub fn is_walkable(&self, position: Position) -> bool {
        self.get(position).is_some_and(TileKind::is_walkable)
    }

    /// True when at least one orthogonal neighbour is walkable.
    pub fn has_open_neighbor(&self, position: Position) -> bool {
        [(0, -1), (1, 0), (0, 1), (-1, 0)]
            .into_iter()
            .any(|(dx, dy)| self.is_walkable(position.offset(dx, dy)))
    }

    pub fn carve_room(&mut self, room: &Rect) {
        for y in room.y1..=room.y2 {
            for x in room.x1..=room.x2 {
                self.set(Position::new(x, y), TileKind::Floor);
            }
        }
    }

    pub fn carve_horizontal(&mut self, x1: i32, x2: i32, y: i32) {
        for x in x1.min(x2)..=x1.max(x2) {
            self.set(Position::new(x, y), TileKind::Floor);
        }
    }

    pub fn carve_vertical(&mut self, y1: i32, y2: i32, x: i32) {
        for y in y1.min(y2)..=y1.max(y2) {
            self.set(Position::new(x, y), TileKind::Floor);
        }
    }

    /// Carves an L-shaped corridor between two points.
    pub fn carve_corridor(&mut self, from: Position, to: Position, horizontal_first: bool) {
        if horizontal_first {
            self.carve_horizontal(from.x, to.x, from.y);
            self.carve_vertical(from.y, to.y, to.x);
        } else {
            self.carve_vertical(from.y, to.y, from.x);
            self.carve_horizontal(from.x, to.x, to.y);
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[TileKind]> {
        self.tiles.chunks(self.dimensions.width.max(1) as usize)
    }

    pub fn count(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|tile| **tile == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_is_not_walkable() {
        let grid = TileGrid::filled(MapDimensions::new(4, 3));
        assert_eq!(grid.get(Position::new(-1, 0)), None);
        assert_eq!(grid.get(Position::new(4, 0)), None);
        assert!(!grid.is_walkable(Position::new(10, 10)));
    }

    #[test]
    fn corridor_connects_both_endpoints() {
        let mut grid = TileGrid::filled(MapDimensions::new(10, 10));
        grid.carve_corridor(Position::new(1, 1), Position::new(7, 5), false);
        assert!(grid.is_walkable(Position::new(1, 1)));
        assert!(grid.is_walkable(Position::new(1, 5)));
        assert!(grid.is_walkable(Position::new(7, 5)));
        assert!(!grid.is_walkable(Position::new(7, 1)));
        assert_eq!(grid.count(TileKind::Floor), 5 + 6);
    }

    #[test]
    fn rows_are_row_major() {
        let mut grid = TileGrid::filled(MapDimensions::new(3, 2));
        grid.set(Position::new(2, 1), TileKind::Portal);
        let rows: Vec<_> = grid.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][2], TileKind::Portal);
    }
}
