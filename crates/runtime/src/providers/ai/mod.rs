//! Heuristic AI for monsters and companions.
//!
//! Each agent turn runs through three steps:
//!
//! 1. **Target selection** ([`scoring`]): score every candidate within sight
//!    by proximity, weakness, archetype bias, and a small random jitter; the
//!    highest score wins.
//! 2. **Decision** ([`decide`]): attack an adjacent target, approach a distant
//!    one, or fall back to idle behaviour (companions follow the player,
//!    monsters wander).
//! 3. **Movement** ([`movement`]): step toward the goal, retrying an ordered
//!    list of alternate steps when the direct one is blocked.
//!
//! # Core Components
//!
//! - [`Archetype`]: per-kind personality (bias and flanking preference)
//! - [`Candidate`]: a potential target as seen by the agent
//! - [`AiContext`]: read-only map data shared by every decision in a phase

pub mod movement;
pub mod profile;
pub mod scoring;

use game_core::{ActorRef, Occupancy, Position, TileGrid};

pub use movement::{fallback_steps, smart_move_toward, wander};
pub use profile::Archetype;
pub use scoring::{Candidate, score_candidate, select_target};

use game_core::GameRng;

/// Read-only data every agent decision needs.
pub struct AiContext<'a> {
    pub grid: &'a TileGrid,
    pub occupancy: &'a Occupancy,
    pub sight_radius: u32,
}

/// What an agent does with its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Attack(ActorRef),
    MoveToward(Position),
    Wander,
    Hold,
}

/// Companions with nothing to fight trail the player once farther than this.
pub const FOLLOW_DISTANCE: u32 = 2;

/// Chooses an action for an agent at `position`.
///
/// `leader` is the position companions fall back to when no target is in
/// sight; monsters pass `None` and wander instead.
pub fn decide(
    archetype: Archetype,
    position: Position,
    candidates: &[Candidate],
    leader: Option<Position>,
    ctx: &AiContext<'_>,
    rng: &mut GameRng,
) -> Decision {
    if let Some(target) = select_target(archetype, position, candidates, ctx.sight_radius, rng) {
        if position.is_adjacent(target.position) {
            return Decision::Attack(target.target);
        }
        return Decision::MoveToward(target.position);
    }

    match leader {
        Some(leader) if position.chebyshev(leader) > FOLLOW_DISTANCE => {
            Decision::MoveToward(leader)
        }
        Some(_) => Decision::Hold,
        None => Decision::Wander,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::map::{MapDimensions, Rect};
    use game_core::{EntityId, MonsterKind};

    fn open_grid() -> TileGrid {
        let mut grid = TileGrid::filled(MapDimensions::new(20, 20));
        grid.carve_room(&Rect::new(1, 1, 18, 18));
        grid
    }

    fn player_at(position: Position) -> Candidate {
        Candidate {
            target: ActorRef::Player,
            position,
            hp: 30,
            max_hp: 30,
            attack: 4,
        }
    }

    #[test]
    fn adjacent_target_is_attacked() {
        let grid = open_grid();
        let occupancy = Occupancy::new();
        let ctx = AiContext {
            grid: &grid,
            occupancy: &occupancy,
            sight_radius: 8,
        };
        let mut rng = GameRng::seed(1);
        let decision = decide(
            Archetype::Monster(MonsterKind::Goblin),
            Position::new(5, 5),
            &[player_at(Position::new(6, 6))],
            None,
            &ctx,
            &mut rng,
        );
        assert_eq!(decision, Decision::Attack(ActorRef::Player));
    }

    #[test]
    fn distant_target_is_approached() {
        let grid = open_grid();
        let occupancy = Occupancy::new();
        let ctx = AiContext {
            grid: &grid,
            occupancy: &occupancy,
            sight_radius: 8,
        };
        let mut rng = GameRng::seed(1);
        let decision = decide(
            Archetype::Monster(MonsterKind::Orc),
            Position::new(5, 5),
            &[player_at(Position::new(9, 5))],
            None,
            &ctx,
            &mut rng,
        );
        assert_eq!(decision, Decision::MoveToward(Position::new(9, 5)));
    }

    #[test]
    fn idle_behaviour_depends_on_leader() {
        let grid = open_grid();
        let occupancy = Occupancy::new();
        let ctx = AiContext {
            grid: &grid,
            occupancy: &occupancy,
            sight_radius: 8,
        };
        let mut rng = GameRng::seed(1);
        let far = Position::new(15, 15);
        let monster = Candidate {
            target: ActorRef::Monster(EntityId(1)),
            ..player_at(far)
        };

        assert_eq!(
            decide(Archetype::Companion, Position::new(2, 2), &[monster], Some(Position::new(6, 2)), &ctx, &mut rng),
            Decision::MoveToward(Position::new(6, 2))
        );
        assert_eq!(
            decide(Archetype::Companion, Position::new(2, 2), &[], Some(Position::new(3, 3)), &ctx, &mut rng),
            Decision::Hold
        );
        assert_eq!(
            decide(Archetype::Monster(MonsterKind::Slime), Position::new(2, 2), &[], None, &ctx, &mut rng),
            Decision::Wander
        );
    }
}
