//! A simple scripted player that exercises the intent interface.
//!
//! Each turn it drinks a potion when badly hurt, equips strictly better gear,
//! fights anything adjacent, and otherwise walks the shortest path to the
//! stairs.

use std::collections::{HashMap, VecDeque};

use game_core::{Actor, Direction, Item, ItemKind, Position};
use runtime::{GameSession, PlayerIntent};

/// Below this percentage of max hp the autoplayer drinks a health potion.
const HEAL_THRESHOLD_PERCENT: i32 = 40;

pub fn choose_intent(session: &GameSession) -> PlayerIntent {
    let player = &session.player;

    if player.hp() * 100 < player.max_hp() * HEAL_THRESHOLD_PERCENT
        && let Some(slot) = find_slot(session, |item| item.kind == ItemKind::HealthPotion)
    {
        return PlayerIntent::UseItem(slot);
    }

    let weapon_power = player.weapon().map_or(0, Item::power);
    if let Some(slot) = find_slot(session, |item| {
        item.kind == ItemKind::Weapon && item.power() > weapon_power
    }) {
        return PlayerIntent::UseItem(slot);
    }
    let armor_power = player.armor().map_or(0, Item::power);
    if let Some(slot) = find_slot(session, |item| {
        item.kind == ItemKind::Armor && item.power() > armor_power
    }) {
        return PlayerIntent::UseItem(slot);
    }

    let adjacent_monster = Direction::ALL
        .into_iter()
        .find(|direction| session.level.monster_at(player.position.step(*direction)).is_some());
    if let Some(direction) = adjacent_monster {
        return PlayerIntent::step(direction);
    }

    match first_step(session, player.position, session.level.stairs) {
        Some(direction) => PlayerIntent::step(direction),
        None => PlayerIntent::step(Direction::ALL[(session.turn % 8) as usize]),
    }
}

fn find_slot(session: &GameSession, predicate: impl Fn(&Item) -> bool) -> Option<usize> {
    session.player.inventory().iter().position(predicate)
}

/// First king step on a shortest walkable path from `from` to `to`.
fn first_step(session: &GameSession, from: Position, to: Position) -> Option<Direction> {
    let grid = &session.level.grid;
    let mut came_from: HashMap<Position, Position> = HashMap::new();
    let mut queue = VecDeque::from([from]);
    came_from.insert(from, from);

    while let Some(current) = queue.pop_front() {
        if current == to {
            break;
        }
        for direction in Direction::ALL {
            let next = current.step(direction);
            if grid.is_walkable(next) && !came_from.contains_key(&next) {
                came_from.insert(next, current);
                queue.push_back(next);
            }
        }
    }

    let mut step = to;
    loop {
        let previous = *came_from.get(&step)?;
        if previous == from {
            return Direction::from_delta(step.x - from.x, step.y - from.y);
        }
        step = previous;
    }
}
