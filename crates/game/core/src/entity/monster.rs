//! Hostile agents and their catalog.

use crate::map::Biome;
use crate::state::{EntityId, Position};

use super::{Actor, Appearance, CombatRole};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MonsterKind {
    Goblin,
    Orc,
    Slime,
    Spider,
    Skeleton,
}

/// Level-1 stats of a catalog entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonsterTemplate {
    pub glyph: char,
    pub hp: i32,
    pub attack: i32,
    pub defense: i32,
}

impl MonsterKind {
    pub const fn template(self) -> MonsterTemplate {
        let (glyph, hp, attack, defense) = match self {
            MonsterKind::Goblin => ('g', 5, 2, 0),
            MonsterKind::Orc => ('o', 10, 4, 1),
            MonsterKind::Slime => ('s', 3, 1, 0),
            MonsterKind::Spider => ('x', 6, 3, 0),
            MonsterKind::Skeleton => ('z', 8, 3, 2),
        };
        MonsterTemplate {
            glyph,
            hp,
            attack,
            defense,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Monster {
    pub id: EntityId,
    pub kind: MonsterKind,
    pub level: u32,
    pub name: String,
    pub appearance: Appearance,
    pub position: Position,
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    pub defense: i32,
}

impl Monster {
    /// Builds a monster scaled to `level` with the biome's cosmetics.
    ///
    /// hp grows by 1 per level, attack by 1 every 2 levels, defense by 1
    /// every 3 levels.
    pub fn spawn(
        id: EntityId,
        kind: MonsterKind,
        level: u32,
        biome: Biome,
        position: Position,
    ) -> Self {
        let level = level.max(1);
        let template = kind.template();
        let scale = level as i32;
        let max_hp = template.hp + scale;
        Self {
            id,
            kind,
            level,
            name: format!("{} {} Lv.{}", biome.prefix(), kind, level),
            appearance: Appearance::new(template.glyph, biome.color()),
            position,
            hp: max_hp,
            max_hp,
            attack: template.attack + scale / 2,
            defense: template.defense + scale / 3,
        }
    }
}

impl Actor for Monster {
    fn name(&self) -> &str {
        &self.name
    }

    fn appearance(&self) -> Appearance {
        self.appearance
    }

    fn role(&self) -> CombatRole {
        CombatRole::Monster { level: self.level }
    }

    impl_plain_vitals!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_scale_with_level() {
        let orc = Monster::spawn(
            EntityId(1),
            MonsterKind::Orc,
            3,
            Biome::StoneCaverns,
            Position::new(4, 4),
        );
        assert_eq!((orc.max_hp, orc.attack, orc.defense), (13, 5, 2));
        assert_eq!(orc.hp, orc.max_hp);
        assert_eq!(orc.appearance.glyph, 'o');
    }

    #[test]
    fn name_carries_biome_kind_and_level() {
        let goblin = Monster::spawn(
            EntityId(2),
            MonsterKind::Goblin,
            4,
            Biome::IceCaves,
            Position::ORIGIN,
        );
        assert!(goblin.name.contains("Goblin"));
        assert!(goblin.name.contains("Lv.4"));
        assert!(goblin.name.starts_with(Biome::IceCaves.prefix()));
    }

    #[test]
    fn damage_clamps_at_zero() {
        let mut slime = Monster::spawn(
            EntityId(3),
            MonsterKind::Slime,
            1,
            Biome::StoneCaverns,
            Position::ORIGIN,
        );
        assert!(!slime.take_damage(2));
        assert!(slime.take_damage(100));
        assert_eq!(slime.hp, 0);
        assert!(!slime.is_alive());
    }
}
