#![allow(dead_code)]

use std::path::Path;

use game_core::Direction;
use runtime::{
    PersistenceConfig, PlayerIntent, Runtime, RuntimeConfig, SubmitOutcome, TickReport,
};

/// Persistent configuration rooted at `dir` with a fixed seed.
pub fn config(dir: &Path) -> RuntimeConfig {
    RuntimeConfig {
        seed: Some(42),
        persistence: PersistenceConfig {
            enabled: true,
            save_dir: dir.to_path_buf(),
        },
        ..RuntimeConfig::default()
    }
}

/// Submits moves until one advances the turn (or ends the run).
pub fn advance(runtime: &mut Runtime) -> TickReport {
    for direction in Direction::ALL {
        let outcome = runtime
            .submit(PlayerIntent::step(direction))
            .expect("simulation intent should be accepted");
        if let SubmitOutcome::Ticked(report) = outcome
            && (report.advanced || report.game_over)
        {
            return report;
        }
    }
    panic!("player cannot move in any direction");
}

/// Advances until the turn counter reaches `turn`. Returns false on death.
pub fn advance_to(runtime: &mut Runtime, turn: u64) -> bool {
    while runtime.session().turn < turn {
        if advance(runtime).game_over {
            return false;
        }
    }
    true
}
