//! Step selection toward a goal with ordered fallbacks.

use game_core::{Actor, Direction, GameRng, Occupancy, Position, TileGrid, try_move};

use super::profile::Archetype;

/// Chance (percent) that a wandering agent drifts toward the map centre.
const CENTER_DRIFT_PERCENT: u32 = 30;

/// Alternate unit steps tried after the direct step `(sx, sy)` is blocked.
///
/// Sidesteps come before diagonal detours unless the agent flanks.
pub fn fallback_steps(sx: i32, sy: i32, flanking: bool) -> [(i32, i32); 4] {
    let (perpendicular, diagonal) = match (sx, sy) {
        (0, 0) => return [(0, 0); 4],
        (sx, 0) => ([(0, 1), (0, -1)], [(sx, 1), (sx, -1)]),
        (0, sy) => ([(1, 0), (-1, 0)], [(1, sy), (-1, sy)]),
        (sx, sy) => ([(sx, 0), (0, sy)], [(sx, -sy), (-sx, sy)]),
    };

    if flanking {
        [diagonal[0], diagonal[1], perpendicular[0], perpendicular[1]]
    } else {
        [perpendicular[0], perpendicular[1], diagonal[0], diagonal[1]]
    }
}

/// Moves one step from `actor` toward `target`. Returns whether it moved.
///
/// Tries the direct unit step first, then each of [`fallback_steps`].
pub fn smart_move_toward<A>(
    actor: &mut A,
    archetype: Archetype,
    target: Position,
    grid: &TileGrid,
    occupancy: &mut Occupancy,
) -> bool
where
    A: Actor + ?Sized,
{
    let from = actor.position();
    let sx = (target.x - from.x).signum();
    let sy = (target.y - from.y).signum();
    if sx == 0 && sy == 0 {
        return false;
    }

    if try_move(actor, sx, sy, grid, occupancy) {
        return true;
    }
    fallback_steps(sx, sy, archetype.flanks())
        .into_iter()
        .any(|(dx, dy)| try_move(actor, dx, dy, grid, occupancy))
}

/// Idle movement for monsters with nothing in sight.
///
/// Usually a random king step; sometimes a drift toward the map centre so
/// agents don't pile into corners.
pub fn wander<A>(
    actor: &mut A,
    archetype: Archetype,
    grid: &TileGrid,
    occupancy: &mut Occupancy,
    rng: &mut GameRng,
) -> bool
where
    A: Actor + ?Sized,
{
    if rng.percent(CENTER_DRIFT_PERCENT) {
        let center = grid.dimensions().center();
        return smart_move_toward(actor, archetype, center, grid, occupancy);
    }

    let Some(direction) = rng.choose(&Direction::ALL).copied() else {
        return false;
    };
    let (dx, dy) = direction.delta();
    if try_move(actor, dx, dy, grid, occupancy) {
        return true;
    }
    fallback_steps(dx, dy, archetype.flanks())
        .into_iter()
        .any(|(fx, fy)| try_move(actor, fx, fy, grid, occupancy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::map::{MapDimensions, Rect};
    use game_core::{EntityId, MonsterKind, Summon};

    fn open_grid() -> TileGrid {
        let mut grid = TileGrid::filled(MapDimensions::new(12, 12));
        grid.carve_room(&Rect::new(1, 1, 10, 10));
        grid
    }

    #[test]
    fn fallback_order_depends_on_flanking() {
        assert_eq!(
            fallback_steps(1, 1, false),
            [(1, 0), (0, 1), (1, -1), (-1, 1)]
        );
        assert_eq!(
            fallback_steps(1, 1, true),
            [(1, -1), (-1, 1), (1, 0), (0, 1)]
        );
        assert_eq!(
            fallback_steps(-1, 0, false),
            [(0, 1), (0, -1), (-1, 1), (-1, -1)]
        );
        assert_eq!(
            fallback_steps(0, 1, true),
            [(1, 1), (-1, 1), (1, 0), (-1, 0)]
        );
    }

    #[test]
    fn blocked_direct_step_uses_sidestep() {
        let grid = open_grid();
        let mut agent = Summon::new(EntityId(1), 1, Position::new(3, 3));
        let blocker = Position::new(4, 3);
        let mut occupancy = Occupancy::from_positions([agent.position, blocker]);

        assert!(smart_move_toward(
            &mut agent,
            Archetype::Monster(MonsterKind::Orc),
            Position::new(8, 3),
            &grid,
            &mut occupancy,
        ));
        assert_eq!(agent.position, Position::new(3, 4));
    }

    #[test]
    fn flanker_prefers_diagonal_detour() {
        let grid = open_grid();
        let mut agent = Summon::new(EntityId(1), 1, Position::new(3, 3));
        let mut occupancy = Occupancy::from_positions([agent.position, Position::new(4, 3)]);

        assert!(smart_move_toward(
            &mut agent,
            Archetype::Monster(MonsterKind::Goblin),
            Position::new(8, 3),
            &grid,
            &mut occupancy,
        ));
        assert_eq!(agent.position, Position::new(4, 4));
    }

    #[test]
    fn boxed_in_agent_stays_put() {
        let grid = open_grid();
        let start = Position::new(5, 5);
        let mut agent = Summon::new(EntityId(1), 1, start);
        let mut occupancy = Occupancy::from_positions(
            Direction::ALL
                .iter()
                .map(|d| start.step(*d))
                .chain([start]),
        );
        let mut rng = GameRng::seed(4);
        for _ in 0..20 {
            assert!(!wander(&mut agent, Archetype::Companion, &grid, &mut occupancy, &mut rng));
        }
        assert_eq!(agent.position, start);
    }

    #[test]
    fn wander_keeps_occupancy_in_sync() {
        let grid = open_grid();
        let mut agent = Summon::new(EntityId(1), 1, Position::new(2, 2));
        let mut occupancy = Occupancy::from_positions([agent.position]);
        let mut rng = GameRng::seed(8);
        for _ in 0..50 {
            wander(&mut agent, Archetype::Companion, &grid, &mut occupancy, &mut rng);
            assert!(grid.is_walkable(agent.position));
            assert!(occupancy.is_occupied(agent.position));
            assert_eq!(occupancy.len(), 1);
        }
    }
}
