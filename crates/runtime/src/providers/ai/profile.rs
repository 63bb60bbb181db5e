//! Per-kind AI personality.

use game_core::{ActorRef, MonsterKind};

use super::scoring::Candidate;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Archetype {
    Monster(MonsterKind),
    Companion,
}

impl Archetype {
    /// Ambush range for spiders.
    const ISOLATION_RANGE: u32 = 3;
    const ISOLATION_BONUS: i32 = 3;
    const SKELETON_PLAYER_BONUS: i32 = 4;
    const ORC_ATTACK_CAP: i32 = 5;

    /// Type-specific score adjustment for `candidate` at `distance`.
    ///
    /// `weakness` is the candidate's missing-hp term (0 healthy, 10 dying).
    ///
    /// - Spider: half weakness, plus a bonus when the candidate is close
    /// - Orc: favours hard hitters, half their attack capped at 5
    /// - Skeleton: flat bonus against the player
    /// - Goblin, slime, companions: half weakness (opportunistic)
    pub fn bias(self, candidate: &Candidate, distance: u32, weakness: i32) -> i32 {
        match self {
            Archetype::Monster(MonsterKind::Spider) => {
                let isolation = if distance <= Self::ISOLATION_RANGE {
                    Self::ISOLATION_BONUS
                } else {
                    0
                };
                weakness / 2 + isolation
            }
            Archetype::Monster(MonsterKind::Orc) => {
                (candidate.attack / 2).clamp(0, Self::ORC_ATTACK_CAP)
            }
            Archetype::Monster(MonsterKind::Skeleton) => {
                if candidate.target == ActorRef::Player {
                    Self::SKELETON_PLAYER_BONUS
                } else {
                    0
                }
            }
            Archetype::Monster(MonsterKind::Goblin | MonsterKind::Slime) | Archetype::Companion => {
                weakness / 2
            }
        }
    }

    /// Flankers try diagonal detours before sidesteps.
    pub fn flanks(self) -> bool {
        matches!(
            self,
            Archetype::Monster(MonsterKind::Spider | MonsterKind::Goblin)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{EntityId, Position};

    fn candidate(target: ActorRef, attack: i32) -> Candidate {
        Candidate {
            target,
            position: Position::ORIGIN,
            hp: 10,
            max_hp: 10,
            attack,
        }
    }

    #[test]
    fn skeleton_prefers_the_player() {
        let skeleton = Archetype::Monster(MonsterKind::Skeleton);
        let player = candidate(ActorRef::Player, 4);
        let summon = candidate(ActorRef::Summon(EntityId(1)), 4);
        assert!(skeleton.bias(&player, 4, 0) > skeleton.bias(&summon, 4, 0));
    }

    #[test]
    fn orc_prefers_strong_candidates_up_to_cap() {
        let orc = Archetype::Monster(MonsterKind::Orc);
        let weak = candidate(ActorRef::Player, 2);
        let strong = candidate(ActorRef::Summon(EntityId(1)), 8);
        let huge = candidate(ActorRef::Summon(EntityId(2)), 40);
        assert!(orc.bias(&strong, 3, 0) > orc.bias(&weak, 3, 0));
        assert_eq!(orc.bias(&huge, 3, 0), 5);
    }

    #[test]
    fn spider_rewards_isolation() {
        let spider = Archetype::Monster(MonsterKind::Spider);
        let target = candidate(ActorRef::Player, 4);
        assert_eq!(spider.bias(&target, 3, 4) - spider.bias(&target, 4, 4), 3);
    }

    #[test]
    fn flanking_archetypes() {
        assert!(Archetype::Monster(MonsterKind::Goblin).flanks());
        assert!(Archetype::Monster(MonsterKind::Spider).flanks());
        assert!(!Archetype::Monster(MonsterKind::Orc).flanks());
        assert!(!Archetype::Companion.flanks());
    }
}
