//! Damage calculation.

use crate::entity::{Actor, CombatRole};

/// Fraction of the player's defense (in tenths) that still applies against a
/// monster of `level`: `max(3, 10 - (level - 1))`.
pub fn penetration_tenths(level: u32) -> i32 {
    let reduction = level.saturating_sub(1).min(10) as i32;
    (10 - reduction).max(3)
}

/// Defense that `defender` brings against `attacker`.
///
/// Only a monster attacking the player pierces armour; every other pairing
/// uses the defender's full defense.
pub fn effective_defense<A, D>(attacker: &A, defender: &D) -> i32
where
    A: Actor + ?Sized,
    D: Actor + ?Sized,
{
    let defense = defender.defense().max(0);
    match (attacker.role(), defender.role()) {
        (CombatRole::Monster { level }, CombatRole::Player) => {
            defense * penetration_tenths(level) / 10
        }
        _ => defense,
    }
}

/// # Formula
///
/// ```text
/// damage = max(1, attacker.attack - effective_defense)
/// ```
pub fn calculate_damage<A, D>(attacker: &A, defender: &D) -> i32
where
    A: Actor + ?Sized,
    D: Actor + ?Sized,
{
    (attacker.attack() - effective_defense(attacker, defender)).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Monster, MonsterKind, Player, Summon};
    use crate::map::Biome;
    use crate::state::{EntityId, Position};

    fn monster(level: u32, attack: i32) -> Monster {
        let mut monster = Monster::spawn(
            EntityId(1),
            MonsterKind::Orc,
            level,
            Biome::StoneCaverns,
            Position::ORIGIN,
        );
        monster.attack = attack;
        monster
    }

    #[test]
    fn penetration_factor_bottoms_out_at_thirty_percent() {
        assert_eq!(penetration_tenths(1), 10);
        assert_eq!(penetration_tenths(5), 6);
        assert_eq!(penetration_tenths(8), 3);
        assert_eq!(penetration_tenths(50), 3);
        assert_eq!(penetration_tenths(0), 10);
    }

    #[test]
    fn level_five_monster_pierces_forty_percent() {
        let orc = monster(5, 15);
        let mut player = Player::new(Position::ORIGIN);
        player.grant_buff(crate::entity::BuffKind::Defense, 9, 15);
        assert_eq!(player.defense(), 10);

        assert_eq!(effective_defense(&orc, &player), 6);
        assert_eq!(calculate_damage(&orc, &player), 9);
    }

    #[test]
    fn damage_never_drops_below_one() {
        let weak = monster(1, 1);
        let mut player = Player::new(Position::ORIGIN);
        player.grant_buff(crate::entity::BuffKind::Defense, 100, 15);
        assert_eq!(calculate_damage(&weak, &player), 1);

        let summon = Summon::new(EntityId(2), 9, Position::ORIGIN);
        let slime = monster(1, 0);
        assert_eq!(calculate_damage(&slime, &summon), 1);
    }

    #[test]
    fn penetration_only_applies_monster_to_player() {
        let orc = monster(9, 10);
        let summon = Summon::new(EntityId(2), 3, Position::ORIGIN);
        assert_eq!(effective_defense(&orc, &summon), summon.defense);

        let player = Player::new(Position::ORIGIN);
        assert_eq!(effective_defense(&player, &orc), orc.defense);
    }
}
