/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Manhattan radius within which agents notice potential targets.
    pub sight_radius: u32,
    /// Ticks between autosave requests raised by the turn engine.
    pub autosave_interval: u64,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAP_WIDTH: u32 = 60;
    pub const MAP_HEIGHT: u32 = 40;
    pub const INVENTORY_CAPACITY: usize = 10;
    /// One slot per buff kind (attack, defense, hp).
    pub const MAX_BUFFS: usize = 3;
    pub const MAX_HIGH_SCORES: usize = 5;
    /// Number of ticks a potion buff stays active.
    pub const BUFF_DURATION: u32 = 15;

    // ===== generation parameters =====
    pub const BSP_MAX_DEPTH: u32 = 4;
    pub const BSP_MIN_LEAF_WIDTH: i32 = 8;
    pub const BSP_MIN_LEAF_HEIGHT: i32 = 6;
    pub const MIN_ROOM_SIZE: i32 = 3;
    pub const ENDPOINT_ATTEMPTS: u32 = 100;
    pub const SPAWN_ATTEMPTS: u32 = 20;
    pub const PORTAL_ATTEMPTS: u32 = 30;
    /// Depth levels sharing one biome.
    pub const BIOME_BAND: u32 = 3;
    /// Deepest level; stairs below it lead to a fresh level at the same depth.
    pub const MAX_DEPTH: u32 = 999;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_SIGHT_RADIUS: u32 = 8;
    pub const DEFAULT_AUTOSAVE_INTERVAL: u64 = 20;

    pub fn new() -> Self {
        Self {
            sight_radius: Self::DEFAULT_SIGHT_RADIUS,
            autosave_interval: Self::DEFAULT_AUTOSAVE_INTERVAL,
        }
    }

    pub fn with_autosave_interval(mut self, interval: u64) -> Self {
        self.autosave_interval = interval.max(1);
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
