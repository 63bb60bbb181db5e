//! Dungeon client binary.
//!
//! A headless driver: loads configuration, installs logging, resumes or
//! starts a run, and lets the scripted autoplayer submit intents until the
//! run ends or the turn limit is reached. The final frame and the high-score
//! table are printed to stdout.
//!
//! # Examples
//!
//! ```bash
//! DUNGEON_SEED=7 DUNGEON_AUTOPLAY_TURNS=300 cargo run -p dungeon-client
//! DUNGEON_PERSISTENCE=false RUST_LOG=runtime=debug cargo run -p dungeon-client
//! ```

mod autoplay;
mod logging;

use anyhow::Result;
use runtime::{PlayerIntent, Runtime, RuntimeConfig, RuntimeError, SubmitOutcome, read_env};

const DEFAULT_AUTOPLAY_TURNS: u64 = 500;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = RuntimeConfig::from_env();
    let _guard = logging::setup_logging()?;

    tracing::info!("Starting Dungeon client");
    tracing::info!("Persistence: {}", config.persistence.enabled);
    tracing::info!("Save directory: {}", config.persistence.save_dir.display());

    let turn_limit = read_env::<u64>("DUNGEON_AUTOPLAY_TURNS").unwrap_or(DEFAULT_AUTOPLAY_TURNS);

    let mut runtime = Runtime::builder().config(config).build()?;
    play(&mut runtime, turn_limit)?;

    print!("{}", runtime.view().render_ascii());
    println!();
    println!("High scores:");
    for (rank, entry) in runtime.high_scores().entries().iter().enumerate() {
        println!(
            "  {}. depth {:>2}  kills {:>3}  items {:>3}  turns {}",
            rank + 1,
            entry.depth_reached,
            entry.kills,
            entry.items_collected,
            entry.turns
        );
    }

    if !runtime.is_game_over() {
        runtime.submit(PlayerIntent::RequestQuit)?;
    }
    tracing::info!("Client shutdown complete");
    Ok(())
}

fn play(runtime: &mut Runtime, turn_limit: u64) -> Result<()> {
    let start = runtime.session().turn;
    // Rejected intents do not advance the turn; cap total attempts too.
    let mut attempts = 0;

    while runtime.session().turn - start < turn_limit && attempts < turn_limit * 4 {
        attempts += 1;
        let intent = autoplay::choose_intent(runtime.session());
        match runtime.submit(intent) {
            Ok(SubmitOutcome::Ticked(report)) if report.game_over => {
                tracing::info!(turn = runtime.session().turn, "autoplay run ended");
                break;
            }
            Ok(_) => {}
            Err(RuntimeError::RunEnded) => break,
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}
