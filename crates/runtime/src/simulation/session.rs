//! The single owner of all mutable simulation state.

use game_core::rng::purpose;
use game_core::{
    Actor, EntityId, GameConfig, GameRng, Level, Occupancy, Player, Snapshot, SnapshotError,
    Summon, map,
};

use super::messages::MessageLog;
use super::phase::TurnPhase;
use super::transition::find_free_near;

/// Parameters for starting or restoring a session.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub game: GameConfig,
    pub message_capacity: usize,
    pub starting_companions: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            message_capacity: 64,
            starting_companions: 1,
        }
    }
}

/// Player, level, depth, turn, companions, and the RNG stream.
///
/// Components receive this by reference per call; nothing else holds it.
#[derive(Clone, Debug)]
pub struct GameSession {
    pub player: Player,
    pub level: Level,
    pub depth: u32,
    pub turn: u64,
    pub summons: Vec<Summon>,
    pub rng: GameRng,
    pub phase: TurnPhase,
    pub messages: MessageLog,
    pub config: GameConfig,
    next_summon_id: u32,
}

impl GameSession {
    /// Starting companions are placed within this ring of the player.
    const COMPANION_RADIUS: u32 = 3;

    pub fn new(seed: u64, config: &SessionConfig) -> Self {
        let rng = GameRng::seed(seed);
        let level = map::generate(level_seed(&rng, 1), 1);
        let player = Player::new(level.start);

        let mut session = Self {
            player,
            level,
            depth: 1,
            turn: 0,
            summons: Vec::new(),
            rng,
            phase: TurnPhase::AwaitingPlayerInput,
            messages: MessageLog::new(config.message_capacity),
            config: config.game.clone(),
            next_summon_id: 1,
        };

        for _ in 0..config.starting_companions {
            let occupancy = session.occupancy();
            let Some(spot) = find_free_near(
                &session.level.grid,
                &occupancy,
                session.player.position,
                Self::COMPANION_RADIUS,
            ) else {
                break;
            };
            session.spawn_summon(1, spot);
        }

        session.messages.push(format!(
            "You enter the {} (depth 1).",
            session.level.biome.name()
        ));
        session
    }

    /// Rebuilds a session from a snapshot. Dead players are rejected.
    pub fn from_snapshot(snapshot: Snapshot, config: &SessionConfig) -> Result<Self, SnapshotError> {
        snapshot.validate()?;
        let rng = snapshot.rng()?;
        let level = Level::restore(snapshot.dungeon_depth, snapshot.level);

        let mut messages = MessageLog::new(config.message_capacity);
        messages.push(format!(
            "Welcome back to the {} (depth {}).",
            level.biome.name(),
            snapshot.dungeon_depth
        ));

        Ok(Self {
            player: snapshot.player,
            level,
            depth: snapshot.dungeon_depth,
            turn: snapshot.turn_count,
            summons: snapshot.summons,
            rng,
            phase: TurnPhase::AwaitingPlayerInput,
            messages,
            config: config.game.clone(),
            next_summon_id: snapshot.next_summon_id,
        })
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            player: self.player.clone(),
            dungeon_depth: self.depth,
            turn_count: self.turn,
            rng_state: self.rng.to_bytes(),
            level: self.level.record(),
            summons: self.summons.clone(),
            next_summon_id: self.next_summon_id,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Tiles held by the player and every living monster and summon.
    pub fn occupancy(&self) -> Occupancy {
        let player = std::iter::once(self.player.position);
        let summons = self
            .summons
            .iter()
            .filter(|summon| summon.is_alive())
            .map(|summon| summon.position);
        let monsters = self
            .level
            .monsters
            .iter()
            .filter(|monster| monster.is_alive())
            .map(|monster| monster.position);
        Occupancy::from_positions(player.chain(summons).chain(monsters))
    }

    pub fn spawn_summon(&mut self, level: u32, position: game_core::Position) -> EntityId {
        let id = EntityId(self.next_summon_id);
        self.next_summon_id += 1;
        self.summons.push(Summon::new(id, level, position));
        id
    }

    pub fn summon(&self, id: EntityId) -> Option<&Summon> {
        self.summons.iter().find(|summon| summon.id == id)
    }

    pub fn summon_mut(&mut self, id: EntityId) -> Option<&mut Summon> {
        self.summons.iter_mut().find(|summon| summon.id == id)
    }

    pub fn remove_summon(&mut self, id: EntityId) -> Option<Summon> {
        let index = self.summons.iter().position(|summon| summon.id == id)?;
        Some(self.summons.remove(index))
    }
}

/// Seed of the level at `depth`, derived without advancing the stream.
pub(crate) fn level_seed(rng: &GameRng, depth: u32) -> u64 {
    rng.derive_seed(purpose::LEVEL ^ depth as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(companions: u32) -> SessionConfig {
        SessionConfig {
            starting_companions: companions,
            ..SessionConfig::default()
        }
    }

    #[test]
    fn new_session_places_player_on_start() {
        let session = GameSession::new(7, &config(0));
        assert_eq!(session.player.position, session.level.start);
        assert_eq!(session.depth, 1);
        assert_eq!(session.turn, 0);
        assert!(session.summons.is_empty());
        assert_eq!(session.phase, TurnPhase::AwaitingPlayerInput);
    }

    #[test]
    fn starting_companions_stand_next_to_player() {
        let session = GameSession::new(7, &config(2));
        assert_eq!(session.summons.len(), 2);
        for summon in &session.summons {
            assert!(summon.position.chebyshev(session.player.position) <= 3);
            assert!(session.level.grid.is_walkable(summon.position));
            assert_eq!(summon.level, 1);
        }
        assert_ne!(session.summons[0].position, session.summons[1].position);
        assert_ne!(session.summons[0].id, session.summons[1].id);
    }

    #[test]
    fn same_seed_same_session() {
        let a = GameSession::new(123, &config(1));
        let b = GameSession::new(123, &config(1));
        assert_eq!(a.level, b.level);
        assert_eq!(a.summons, b.summons);
        assert_eq!(a.rng, b.rng);
    }

    #[test]
    fn snapshot_round_trip_restores_state() {
        let mut session = GameSession::new(55, &config(1));
        session.turn = 15;
        session.player.take_damage(9);
        session.rng.next_u32();

        let restored = GameSession::from_snapshot(session.snapshot(), &config(1)).unwrap();
        assert_eq!(restored.turn, 15);
        assert_eq!(restored.player, session.player);
        assert_eq!(restored.level, session.level);
        assert_eq!(restored.summons, session.summons);

        let mut expected = session.rng;
        let mut actual = restored.rng;
        assert_eq!(actual.next_u32(), expected.next_u32());
    }

    #[test]
    fn dead_player_snapshot_is_rejected() {
        let mut session = GameSession::new(3, &config(0));
        session.player.take_damage(1_000);
        let err = GameSession::from_snapshot(session.snapshot(), &config(0)).unwrap_err();
        assert!(matches!(err, SnapshotError::PlayerDead));
    }
}
