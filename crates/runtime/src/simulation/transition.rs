//! Level transitions and companion placement.

use game_core::{Actor, Direction, GameConfig, Occupancy, Position, TileGrid, can_enter, map};

use super::session::{GameSession, level_seed};

/// Rings searched when repositioning companions after a descent or portal.
const FOLLOW_RADIUS: u32 = 3;

/// First free walkable tile around `center`, searching ring 1 then outward up
/// to `max_radius`. Within a ring, tiles are scanned row by row.
pub fn find_free_near(
    grid: &TileGrid,
    occupancy: &Occupancy,
    center: Position,
    max_radius: u32,
) -> Option<Position> {
    for radius in 1..=max_radius as i32 {
        if radius == 1 {
            let found = Direction::ALL
                .into_iter()
                .map(|dir| center.step(dir))
                .find(|pos| can_enter(grid, occupancy, *pos));
            if found.is_some() {
                return found;
            }
            continue;
        }
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx.abs() != radius && dy.abs() != radius {
                    continue;
                }
                let candidate = center.offset(dx, dy);
                if can_enter(grid, occupancy, candidate) {
                    return Some(candidate);
                }
            }
        }
    }
    None
}

/// Heal applied to every survivor on descent: a quarter of max hp, at least 1.
pub fn descent_heal(max_hp: i32) -> i32 {
    (max_hp / 4).max(1)
}

impl GameSession {
    /// Regenerates the level for `depth + 1` and carries the party down.
    ///
    /// At [`GameConfig::MAX_DEPTH`] the stairs lead to a new level at the
    /// same depth.
    pub fn descend(&mut self) {
        let previous_biome = self.level.biome;
        self.depth = (self.depth + 1).min(GameConfig::MAX_DEPTH);
        self.player.record_depth(self.depth);

        self.level = map::generate(level_seed(&self.rng, self.depth), self.depth);
        self.player.position = self.level.start;

        let healed = self.player.heal(descent_heal(self.player.max_hp()));
        self.summons.retain(|summon| summon.is_alive());
        for summon in &mut self.summons {
            summon.heal(descent_heal(summon.max_hp));
        }

        tracing::info!(
            depth = self.depth,
            seed = self.level.seed,
            healed,
            "descended to new level"
        );
        self.messages.push(format!(
            "You descend to depth {} and recover {} hp.",
            self.depth, healed
        ));
        if self.level.biome != previous_biome {
            self.messages
                .push(format!("You enter the {}.", self.level.biome.name()));
        }

        self.gather_summons(true);
    }

    /// Moves every living summon next to the player.
    ///
    /// With `drop_stranded`, a summon that finds no free tile is removed;
    /// otherwise it stays where it was.
    pub fn gather_summons(&mut self, drop_stranded: bool) {
        let mut occupancy = Occupancy::from_positions(
            std::iter::once(self.player.position).chain(
                self.level
                    .monsters
                    .iter()
                    .filter(|monster| monster.is_alive())
                    .map(|monster| monster.position),
            ),
        );
        if !drop_stranded {
            for summon in &self.summons {
                occupancy.occupy(summon.position);
            }
        }

        let center = self.player.position;
        let mut stranded = Vec::new();
        for summon in &mut self.summons {
            if !drop_stranded && summon.position.chebyshev(center) <= 1 {
                continue;
            }
            match find_free_near(&self.level.grid, &occupancy, center, FOLLOW_RADIUS) {
                Some(spot) => {
                    if !drop_stranded {
                        occupancy.vacate(summon.position);
                    }
                    occupancy.occupy(spot);
                    summon.position = spot;
                }
                None if drop_stranded => stranded.push(summon.id),
                None => {}
            }
        }

        for id in stranded {
            if let Some(summon) = self.remove_summon(id) {
                tracing::debug!(summon = %summon.id, "summon left behind");
                self.messages
                    .push(format!("{} could not follow you.", summon.name));
            }
        }
    }
}
