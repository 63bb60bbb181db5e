//! Runtime configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use game_core::GameConfig;

/// Configuration resolved once at startup and passed into the runtime.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub game: GameConfig,
    pub persistence: PersistenceConfig,
    pub messages: MessageConfig,
    /// Seed of the first session; time-derived when absent.
    pub seed: Option<u64>,
    /// Companions placed next to the player at the start of a run.
    pub starting_companions: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            persistence: PersistenceConfig::default(),
            messages: MessageConfig::default(),
            seed: None,
            starting_companions: 1,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DUNGEON_SAVE_DIR` - Directory for save data (default: platform-specific)
    /// - `DUNGEON_PERSISTENCE` - Enable save/load and the scoreboard (default: true)
    /// - `DUNGEON_AUTOSAVE_INTERVAL` - Ticks between autosaves (default: 20)
    /// - `DUNGEON_SEED` - Fixed seed for the first run (default: time-derived)
    /// - `DUNGEON_MESSAGE_CAPACITY` - Message log capacity (default: 64)
    /// - `DUNGEON_STARTING_COMPANIONS` - Companions at run start (default: 1)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = env::var_os("DUNGEON_SAVE_DIR") {
            config.persistence.save_dir = PathBuf::from(dir);
        }

        if let Some(enable) = read_env::<bool>("DUNGEON_PERSISTENCE") {
            config.persistence.enabled = enable;
        }

        if let Some(interval) = read_env::<u64>("DUNGEON_AUTOSAVE_INTERVAL") {
            config.game = config.game.with_autosave_interval(interval);
        }

        config.seed = read_env::<u64>("DUNGEON_SEED");

        if let Some(capacity) = read_env::<usize>("DUNGEON_MESSAGE_CAPACITY") {
            config.messages.capacity = capacity.max(MessageConfig::VISIBLE);
        }

        if let Some(companions) = read_env::<u32>("DUNGEON_STARTING_COMPANIONS") {
            config.starting_companions = companions;
        }

        config
    }

    /// Configured seed, or one derived from the clock.
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_nanos() as u64)
                .unwrap_or_default()
        })
    }
}

#[derive(Clone, Debug)]
pub struct PersistenceConfig {
    pub enabled: bool,
    pub save_dir: PathBuf,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            save_dir: default_save_dir(),
        }
    }
}

impl PersistenceConfig {
    pub const SNAPSHOT_FILE: &'static str = "savegame.bin";
    pub const SCOREBOARD_FILE: &'static str = "highscores.json";

    pub fn snapshot_path(&self) -> PathBuf {
        self.save_dir.join(Self::SNAPSHOT_FILE)
    }

    pub fn scoreboard_path(&self) -> PathBuf {
        self.save_dir.join(Self::SCOREBOARD_FILE)
    }
}

#[derive(Clone, Debug)]
pub struct MessageConfig {
    pub capacity: usize,
}

impl MessageConfig {
    /// Entries shown by the view.
    pub const VISIBLE: usize = 3;
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self { capacity: 64 }
    }
}

/// Platform data directory, falling back to `./saves`.
pub fn default_save_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "dungeon")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("saves"))
}

/// Parses an environment variable; unset or unparsable values read as `None`.
pub fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RuntimeConfig::default();
        assert!(config.persistence.enabled);
        assert_eq!(config.game.autosave_interval, 20);
        assert_eq!(config.messages.capacity, 64);
        assert_eq!(config.starting_companions, 1);
        assert!(config.persistence.snapshot_path().ends_with("savegame.bin"));
    }

    #[test]
    fn fixed_seed_is_used_verbatim() {
        let config = RuntimeConfig {
            seed: Some(99),
            ..RuntimeConfig::default()
        };
        assert_eq!(config.resolve_seed(), 99);
    }

    #[test]
    fn read_env_ignores_missing_and_malformed_values() {
        assert_eq!(read_env::<u64>("DUNGEON_READ_ENV_TEST_UNSET"), None);

        // SAFETY: the key is unique to this test.
        unsafe { env::set_var("DUNGEON_READ_ENV_TEST_VALUE", "300") };
        assert_eq!(read_env::<u64>("DUNGEON_READ_ENV_TEST_VALUE"), Some(300));
        assert_eq!(read_env::<bool>("DUNGEON_READ_ENV_TEST_VALUE"), None);
    }
}
