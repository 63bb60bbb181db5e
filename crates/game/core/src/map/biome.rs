//! Depth bands and their monster distributions.

use crate::config::GameConfig;
use crate::entity::{ColorTag, MonsterKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Biome {
    StoneCaverns,
    IceCaves,
    JungleRuins,
    FireDepths,
    ShadowRealm,
    CrystalSanctum,
}

impl Biome {
    const BANDS: [Biome; 6] = [
        Biome::StoneCaverns,
        Biome::IceCaves,
        Biome::JungleRuins,
        Biome::FireDepths,
        Biome::ShadowRealm,
        Biome::CrystalSanctum,
    ];

    /// Every [`GameConfig::BIOME_BAND`] depths share a biome; the last one
    /// extends forever.
    pub fn for_depth(depth: u32) -> Self {
        let band = (depth.max(1) - 1) / GameConfig::BIOME_BAND;
        Self::BANDS[(band as usize).min(Self::BANDS.len() - 1)]
    }

    pub const fn name(self) -> &'static str {
        match self {
            Biome::StoneCaverns => "Stone Caverns",
            Biome::IceCaves => "Ice Caves",
            Biome::JungleRuins => "Jungle Ruins",
            Biome::FireDepths => "Fire Depths",
            Biome::ShadowRealm => "Shadow Realm",
            Biome::CrystalSanctum => "Crystal Sanctum",
        }
    }

    /// Cosmetic prefix for monster names.
    pub const fn prefix(self) -> &'static str {
        match self {
            Biome::StoneCaverns => "Cave",
            Biome::IceCaves => "Frost",
            Biome::JungleRuins => "Jungle",
            Biome::FireDepths => "Ember",
            Biome::ShadowRealm => "Shadow",
            Biome::CrystalSanctum => "Crystal",
        }
    }

    pub const fn color(self) -> ColorTag {
        match self {
            Biome::StoneCaverns => ColorTag::Gray,
            Biome::IceCaves => ColorTag::Cyan,
            Biome::JungleRuins => ColorTag::Green,
            Biome::FireDepths => ColorTag::Red,
            Biome::ShadowRealm => ColorTag::Magenta,
            Biome::CrystalSanctum => ColorTag::Blue,
        }
    }

    pub const fn monster_table(self) -> &'static [(MonsterKind, u32)] {
        use MonsterKind::*;
        match self {
            Biome::StoneCaverns => &[(Goblin, 40), (Slime, 30), (Orc, 20), (Spider, 10)],
            Biome::IceCaves => &[(Goblin, 25), (Orc, 30), (Skeleton, 25), (Slime, 20)],
            Biome::JungleRuins => &[(Spider, 40), (Goblin, 25), (Orc, 20), (Slime, 15)],
            Biome::FireDepths => &[(Orc, 40), (Skeleton, 30), (Spider, 20), (Goblin, 10)],
            Biome::ShadowRealm => &[(Skeleton, 45), (Spider, 30), (Orc, 25)],
            Biome::CrystalSanctum => &[(Skeleton, 30), (Orc, 30), (Spider, 25), (Slime, 15)],
        }
    }
}
