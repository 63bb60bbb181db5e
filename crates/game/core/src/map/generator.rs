use crate::config::GameConfig;
use crate::level::Level;
use crate::rng::{GameRng, purpose};
use crate::state::Position;

use super::bsp::BspTree;
use super::connectivity::is_reachable;
use super::populate::populate;
use super::{MapDimensions, Rect, TileGrid};

/// Terrain plus the rooms and endpoints produced by one layout pass.
#[derive(Clone, Debug)]
pub struct Layout {
    pub grid: TileGrid,
    pub rooms: Vec<Rect>,
    pub start: Position,
    pub stairs: Position,
}

impl Layout {
    pub fn is_connected(&self) -> bool {
        self.start != self.stairs && is_reachable(&self.grid, self.start, self.stairs)
    }
}

/// Builds the level for `depth` from `seed`. Identical inputs give identical
/// levels.
pub fn generate(seed: u64, depth: u32) -> Level {
    let dimensions = MapDimensions::new(GameConfig::MAP_WIDTH, GameConfig::MAP_HEIGHT);
    let layout = generate_layout(seed, dimensions);
    let mut rng = GameRng::seed(seed).derive_stream(purpose::POPULATE);
    populate(layout, seed, depth, &mut rng)
}

/// Returns a layout whose stairs are reachable from the start.
///
/// Tries the seed, then one derived seed, then the fixed fallback.
pub fn generate_layout(seed: u64, dimensions: MapDimensions) -> Layout {
    let primary = build_layout(seed, dimensions);
    if primary.is_connected() {
        return primary;
    }

    let retry_seed = GameRng::seed(seed).derive_seed(purpose::REGENERATE);
    let retry = build_layout(retry_seed, dimensions);
    if retry.is_connected() {
        return retry;
    }

    fallback_layout(dimensions)
}

/// One BSP layout attempt without validation.
pub fn build_layout(seed: u64, dimensions: MapDimensions) -> Layout {
    let mut rng = GameRng::seed(seed);
    let bounds = Rect::new(
        1,
        1,
        dimensions.width as i32 - 2,
        dimensions.height as i32 - 2,
    );

    let mut tree = BspTree::build(bounds, &mut rng);
    tree.place_rooms(&mut rng);
    let rooms = tree.rooms();
    if rooms.len() < 2 {
        return fallback_layout(dimensions);
    }

    let mut grid = TileGrid::filled(dimensions);
    for room in &rooms {
        grid.carve_room(room);
    }
    for (first, second) in tree.internal_nodes() {
        let left = tree.rooms_under(first);
        let right = tree.rooms_under(second);
        let (Some(a), Some(b)) = (rng.choose(&left), rng.choose(&right)) else {
            continue;
        };
        let horizontal_first = rng.coin();
        grid.carve_corridor(a.center(), b.center(), horizontal_first);
    }

    let start = place_endpoint(&grid, &rooms[0], &mut rng, None);
    let stairs = place_endpoint(&grid, &rooms[rooms.len() - 1], &mut rng, Some(start));
    Layout {
        grid,
        rooms,
        start,
        stairs,
    }
}

/// Two rooms joined by a cross of corridors. Always connected.
pub fn fallback_layout(dimensions: MapDimensions) -> Layout {
    let width = dimensions.width as i32;
    let height = dimensions.height as i32;
    let cx = width / 2;
    let cy = height / 2;

    let left = Rect::new(2, (cy - 2).max(1), (cx - 2).max(2), (cy + 2).min(height - 2));
    let right = Rect::new(
        (cx + 2).min(width - 3),
        (cy - 2).max(1),
        width - 3,
        (cy + 2).min(height - 2),
    );

    let mut grid = TileGrid::filled(dimensions);
    grid.carve_room(&left);
    grid.carve_room(&right);
    grid.carve_horizontal(1, width - 2, cy);
    grid.carve_vertical(1, height - 2, cx);

    Layout {
        grid,
        start: left.center(),
        stairs: right.center(),
        rooms: vec![left, right],
    }
}

/// Samples a floor tile with at least one open neighbour, falling back to the
/// room centre.
fn place_endpoint(
    grid: &TileGrid,
    room: &Rect,
    rng: &mut GameRng,
    avoid: Option<Position>,
) -> Position {
    for _ in 0..GameConfig::ENDPOINT_ATTEMPTS {
        let candidate = room.random_point(rng);
        if grid.is_walkable(candidate)
            && grid.has_open_neighbor(candidate)
            && Some(candidate) != avoid
        {
            return candidate;
        }
    }
    room.center()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::TileKind;
    use crate::map::connectivity::reachable_count;

    fn dims() -> MapDimensions {
        MapDimensions::new(GameConfig::MAP_WIDTH, GameConfig::MAP_HEIGHT)
    }

    #[test]
    fn generation_is_deterministic() {
        for seed in [0, 1, 77, 123_456_789] {
            for depth in [1, 5, 14] {
                let a = generate(seed, depth);
                let b = generate(seed, depth);
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn stairs_always_reachable() {
        for seed in 0..300u64 {
            for depth in 1..=6 {
                let level = generate(seed.wrapping_mul(7919), depth);
                assert!(
                    is_reachable(&level.grid, level.start, level.stairs),
                    "seed {seed} depth {depth}"
                );
            }
        }
    }

    #[test]
    fn fallback_is_connected() {
        let layout = fallback_layout(dims());
        assert!(layout.is_connected());
        assert_eq!(layout.rooms.len(), 2);

        let small = fallback_layout(MapDimensions::new(14, 9));
        assert!(small.is_connected());
    }

    #[test]
    fn border_stays_solid() {
        let level = generate(42, 3);
        let width = level.grid.width() as i32;
        let height = level.grid.height() as i32;
        for x in 0..width {
            assert_eq!(level.grid.get(Position::new(x, 0)), Some(TileKind::Wall));
            assert_eq!(level.grid.get(Position::new(x, height - 1)), Some(TileKind::Wall));
        }
        for y in 0..height {
            assert_eq!(level.grid.get(Position::new(0, y)), Some(TileKind::Wall));
            assert_eq!(level.grid.get(Position::new(width - 1, y)), Some(TileKind::Wall));
        }
    }

    #[test]
    fn corridors_join_every_room() {
        for seed in 0..40 {
            let layout = build_layout(seed, dims());
            let reachable = reachable_count(&layout.grid, layout.start);
            let floor = layout.grid.count(TileKind::Floor);
            assert_eq!(reachable, floor, "seed {seed}");
        }
    }

    #[test]
    fn endpoints_are_distinct_floor_tiles() {
        for seed in 0..40 {
            let layout = generate_layout(seed, dims());
            assert_ne!(layout.start, layout.stairs);
            assert_eq!(layout.grid.get(layout.start), Some(TileKind::Floor));
            assert_eq!(layout.grid.get(layout.stairs), Some(TileKind::Floor));
        }
    }
}
