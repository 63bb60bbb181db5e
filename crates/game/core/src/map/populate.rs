//! Monster, item, and portal placement for a freshly generated layout.
//!
//! Every placement loop is bounded; a placement that cannot find a free tile
//! is skipped.

use std::collections::HashSet;

use crate::config::GameConfig;
use crate::entity::{FloorItem, Item, ItemKind, Monster};
use crate::level::{Level, PortalPair};
use crate::rng::GameRng;
use crate::state::{EntityId, Position};

use super::generator::Layout;
use super::{Biome, Rect, TileKind};

pub(super) fn populate(layout: Layout, seed: u64, depth: u32, rng: &mut GameRng) -> Level {
    let depth = depth.clamp(1, GameConfig::MAX_DEPTH);
    let biome = Biome::for_depth(depth);
    let Layout {
        mut grid,
        rooms,
        start,
        stairs,
    } = layout;

    let mut taken: HashSet<Position> = HashSet::from([start, stairs]);
    let free_tile = |rng: &mut GameRng, taken: &mut HashSet<Position>| {
        for _ in 0..GameConfig::SPAWN_ATTEMPTS {
            let Some(room) = rng.choose(&rooms) else {
                return None;
            };
            let candidate = room.random_point(rng);
            if grid.get(candidate) == Some(TileKind::Floor) && taken.insert(candidate) {
                return Some(candidate);
            }
        }
        None
    };

    let scale = depth as i32;
    let monster_count = rng.range(
        scale.saturating_add(2),
        scale.saturating_mul(2).saturating_add(5),
    );
    let mut monsters = Vec::new();
    for _ in 0..monster_count {
        let Some(&kind) = rng.choose_weighted(biome.monster_table()) else {
            continue;
        };
        let level = jittered_level(depth, rng);
        if let Some(position) = free_tile(rng, &mut taken) {
            let id = EntityId(monsters.len() as u32 + 1);
            monsters.push(Monster::spawn(id, kind, level, biome, position));
        }
    }

    let item_count = rng.range(2, 4) + (depth / 3) as i32;
    let mut items = Vec::new();
    for _ in 0..item_count {
        let Some(&kind) = rng.choose_weighted(&ItemKind::FLOOR_TABLE) else {
            continue;
        };
        let level = jittered_level(depth, rng);
        if let Some(position) = free_tile(rng, &mut taken) {
            items.push(FloorItem {
                position,
                item: Item::new(kind, level),
            });
        }
    }

    if rng.per_mille(summon_scroll_chance(depth))
        && let Some(position) = free_tile(rng, &mut taken)
    {
        items.push(FloorItem {
            position,
            item: Item::new(ItemKind::SummonScroll, 1 + depth / 3),
        });
    }

    let portals = place_portals(&rooms, rng, &mut taken);
    for portal in &portals {
        grid.set(portal.a, TileKind::Portal);
        grid.set(portal.b, TileKind::Portal);
    }

    Level {
        seed,
        depth,
        biome,
        grid,
        start,
        stairs,
        monsters,
        items,
        portals,
    }
}

/// `depth` plus a jitter of -1, 0, or +1, never below 1.
fn jittered_level(depth: u32, rng: &mut GameRng) -> u32 {
    (depth as i32 + rng.range(-1, 1)).max(1) as u32
}

/// Per-mille chance of a summon scroll: flat 80% through depth 10, then
/// 6 points less per depth, never below 10%.
pub(crate) fn summon_scroll_chance(depth: u32) -> u32 {
    if depth <= 10 {
        800
    } else {
        800u32.saturating_sub(60 * (depth - 10)).max(100)
    }
}

fn place_portals(
    rooms: &[Rect],
    rng: &mut GameRng,
    taken: &mut HashSet<Position>,
) -> Vec<PortalPair> {
    let mut portals = Vec::new();
    if rooms.len() < 2 {
        return portals;
    }
    let pairs = rng.range(1, 2);
    for _ in 0..pairs {
        for _ in 0..GameConfig::PORTAL_ATTEMPTS {
            let first = rng.below(rooms.len() as u32) as usize;
            let second = rng.below(rooms.len() as u32) as usize;
            if first == second {
                continue;
            }
            let a = rooms[first].random_point(rng);
            let b = rooms[second].random_point(rng);
            if taken.contains(&a) || taken.contains(&b) {
                continue;
            }
            taken.insert(a);
            taken.insert(b);
            portals.push(PortalPair { a, b });
            break;
        }
    }
    portals
}
