//! Combat outcome and one-step resolution.

use crate::entity::Actor;

use super::damage::calculate_damage;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CombatOutcome {
    pub damage: i32,
    pub defender_died: bool,
}

/// Computes damage from `attacker` to `defender` and applies it.
pub fn resolve_combat<A, D>(attacker: &A, defender: &mut D) -> CombatOutcome
where
    A: Actor + ?Sized,
    D: Actor + ?Sized,
{
    let damage = calculate_damage(attacker, defender);
    let defender_died = defender.take_damage(damage);
    CombatOutcome {
        damage,
        defender_died,
    }
}
