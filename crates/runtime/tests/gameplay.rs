//! End-to-end runs through the public runtime API.

mod common;

use game_core::map::Biome;
use game_core::{Actor, Direction, EntityId, Monster, MonsterKind, can_enter};
use runtime::{
    FileScoreboardRepository, FileSnapshotRepository, GameSession, Overlay, PlayerIntent,
    Runtime, RuntimeError, ScoreboardRepository, SessionConfig, SnapshotRepository,
    SubmitOutcome,
};
use tempfile::TempDir;

use common::{advance, advance_to, config};

/// A saved run where stepping `direction` puts the player next to a
/// level-20 orc while holding 1 hp.
fn doomed_save(dir: &std::path::Path) -> Direction {
    let mut session = GameSession::new(
        5,
        &SessionConfig {
            starting_companions: 0,
            ..SessionConfig::default()
        },
    );
    session.player.set_hp(1);

    let start = session.player.position;
    let occupancy = session.occupancy();
    let grid = &session.level.grid;
    let (direction, orc_at) = Direction::ALL
        .into_iter()
        .find_map(|direction| {
            let target = start.step(direction);
            let level = &session.level;
            if !can_enter(grid, &occupancy, target)
                || level.item_index_at(target).is_some()
                || level.is_stairs(target)
                || level.portal_exit(target).is_some()
            {
                return None;
            }
            Direction::ALL
                .into_iter()
                .map(|d| target.step(d))
                .find(|spot| *spot != start && can_enter(grid, &occupancy, *spot))
                .map(|spot| (direction, spot))
        })
        .expect("start room has space for the setup");

    let biome = session.level.biome;
    session.level.monsters.push(Monster::spawn(
        EntityId(999),
        MonsterKind::Orc,
        20,
        biome,
        orc_at,
    ));

    FileSnapshotRepository::new(dir.join("savegame.bin"))
        .expect("repo")
        .save(&session.snapshot())
        .expect("seed save");
    direction
}

#[test]
fn death_records_score_and_removes_save() {
    let dir = TempDir::new().expect("temp dir");
    let direction = doomed_save(dir.path());
    let config = config(dir.path());

    let mut runtime = Runtime::builder()
        .config(config.clone())
        .build()
        .expect("runtime should resume the doomed run");
    assert_eq!(runtime.session().player.hp(), 1);

    let outcome = runtime
        .submit(PlayerIntent::step(direction))
        .expect("tick");
    let SubmitOutcome::Ticked(report) = outcome else {
        panic!("expected a tick, got {outcome:?}");
    };
    assert!(report.game_over);
    assert!(runtime.is_game_over());
    assert_eq!(runtime.view().overlay, Overlay::GameOver);

    assert!(!config.persistence.snapshot_path().exists());
    let board = FileScoreboardRepository::new(config.persistence.scoreboard_path())
        .expect("repo")
        .load()
        .expect("scoreboard");
    assert_eq!(board.entries().len(), 1);
    assert_eq!(board.entries()[0].depth_reached, 1);

    let again = runtime.submit(PlayerIntent::step(Direction::North));
    assert!(matches!(again, Err(RuntimeError::RunEnded)));

    assert_eq!(
        runtime.submit(PlayerIntent::RequestReset).expect("reset"),
        SubmitOutcome::Reset
    );
    assert!(!runtime.is_game_over());
    assert_eq!(runtime.session().turn, 0);
    assert!(runtime.session().player.is_alive());
}

#[test]
fn overlays_toggle_without_advancing() {
    let dir = TempDir::new().expect("temp dir");
    let mut runtime = Runtime::builder()
        .config(config(dir.path()))
        .build()
        .expect("runtime should build");

    assert_eq!(
        runtime.submit(PlayerIntent::OpenInventory).expect("toggle"),
        SubmitOutcome::OverlayChanged(Overlay::Inventory)
    );
    assert_eq!(
        runtime.submit(PlayerIntent::OpenHelp).expect("toggle"),
        SubmitOutcome::OverlayChanged(Overlay::Help)
    );
    assert_eq!(
        runtime.submit(PlayerIntent::OpenHelp).expect("toggle"),
        SubmitOutcome::OverlayChanged(Overlay::None)
    );
    assert_eq!(runtime.session().turn, 0);
}

#[test]
fn fixed_seed_runs_are_reproducible() {
    let first_dir = TempDir::new().expect("temp dir");
    let second_dir = TempDir::new().expect("temp dir");
    let mut first = Runtime::builder()
        .config(config(first_dir.path()))
        .build()
        .expect("runtime");
    let mut second = Runtime::builder()
        .config(config(second_dir.path()))
        .build()
        .expect("runtime");

    for _ in 0..30 {
        let a = advance(&mut first);
        let b = advance(&mut second);
        assert_eq!(a, b);
        if a.game_over {
            break;
        }
    }
    assert_eq!(first.session().player, second.session().player);
    assert_eq!(first.session().level, second.session().level);
    assert_eq!(first.view(), second.view());
}

#[test]
fn long_run_keeps_view_consistent() {
    let dir = TempDir::new().expect("temp dir");
    let mut runtime = Runtime::builder()
        .config(config(dir.path()))
        .build()
        .expect("runtime");

    advance_to(&mut runtime, 60);
    let view = runtime.view();
    assert!(view.messages.len() <= 3);
    assert_eq!(view.hud.turn, runtime.session().turn);
    assert_eq!(view.entity_at(runtime.session().player.position).map(|e| e.appearance.glyph), Some('@'));
}
