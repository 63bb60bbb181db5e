use crate::rng::GameRng;
use crate::state::Position;

/// Inclusive rectangle used for BSP bounds and rooms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub const fn width(&self) -> i32 {
        self.x2 - self.x1 + 1
    }

    pub const fn height(&self) -> i32 {
        self.y2 - self.y1 + 1
    }

    pub const fn center(&self) -> Position {
        Position::new((self.x1 + self.x2) / 2, (self.y1 + self.y2) / 2)
    }

    pub const fn contains(&self, position: Position) -> bool {
        position.x >= self.x1 && position.x <= self.x2 && position.y >= self.y1 && position.y <= self.y2
    }

    pub fn random_point(&self, rng: &mut GameRng) -> Position {
        Position::new(rng.range(self.x1, self.x2), rng.range(self.y1, self.y2))
    }
}
