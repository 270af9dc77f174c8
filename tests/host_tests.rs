//! Host integration tests: mounting, score reporting, persistence and
//! rendering across games.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use arcade_engine::games::snake::HIGH_SCORE_KEY;
use arcade_engine::host::GameHost;
use arcade_engine::input::{Command, Direction, Key};
use arcade_engine::render::{Dictionary, RecordingSurface};
use arcade_engine::storage::{FileStore, ScoreStore};
use arcade_engine::{ArcadeConfig, GameKind, RunState};

fn host_with_sink(config: ArcadeConfig) -> (GameHost, Rc<RefCell<Vec<u32>>>) {
    let reported = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&reported);
    let host = GameHost::new(config).with_score_sink(move |score| sink.borrow_mut().push(score));
    (host, reported)
}

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("arcade-host-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_json_config_reaches_mounted_game() {
    let config = ArcadeConfig::from_json(r#"{ "seed": 7, "snake": { "width": 12, "height": 14 } }"#).unwrap();
    assert_eq!(config.seed, 7);
    let mut host = GameHost::new(config);
    host.mount(GameKind::Snake);
    let (w, h) = host.active().map(|g| g.surface_size()).unwrap();
    assert_eq!((w, h), (240.0, 280.0));
}

#[test]
fn test_same_seed_same_session() {
    let run = || {
        let mut host = GameHost::new(ArcadeConfig::default().with_seed(99));
        host.mount(GameKind::Tetris);
        host.start();
        for _ in 0..6 {
            host.key(Key::Space);
        }
        let mut surface = RecordingSurface::new(400.0, 480.0);
        host.render(Some(&mut surface), &Dictionary::english());
        surface.commands().to_vec()
    };
    assert_eq!(run(), run());
}

// =============================================================================
// Score Reporting
// =============================================================================

#[test]
fn test_sink_reports_changes_and_reset() {
    let (mut host, reported) = host_with_sink(ArcadeConfig::default());
    host.mount(GameKind::CrossyRoad);
    host.start();

    assert!(host.command(Command::Move(Direction::Up)));
    assert_eq!(reported.borrow().as_slice(), &[10]);

    // Blocked by the hop cooldown: no change, no report.
    assert!(!host.command(Command::Move(Direction::Up)));
    assert_eq!(reported.borrow().len(), 1);

    host.reset();
    assert_eq!(reported.borrow().as_slice(), &[10, 0]);
    assert_eq!(host.run_state(), Some(RunState::Ready));
}

#[test]
fn test_paused_game_ignores_input() {
    let (mut host, reported) = host_with_sink(ArcadeConfig::default());
    host.mount(GameKind::CrossyRoad);
    host.start();
    host.toggle_pause();
    assert_eq!(host.run_state(), Some(RunState::Paused));
    assert!(!host.command(Command::Move(Direction::Up)));
    host.update(1000.0);
    assert_eq!(host.run_state(), Some(RunState::Paused));
    assert!(reported.borrow().is_empty());
}

#[test]
fn test_input_without_game_is_ignored() {
    let (mut host, reported) = host_with_sink(ArcadeConfig::default());
    assert!(!host.key(Key::ArrowUp));
    assert!(!host.command(Command::HardDrop));
    host.update(100.0);
    host.reset();
    assert!(reported.borrow().is_empty());
    assert_eq!(host.run_state(), None);
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn test_file_store_high_score_restored() {
    let dir = temp_dir("restore");
    let mut store = FileStore::new(&dir);
    store.save(HIGH_SCORE_KEY, 340).unwrap();

    let mut host = GameHost::new(ArcadeConfig::default()).with_store(Box::new(FileStore::new(&dir)));
    host.mount(GameKind::Snake);
    assert_eq!(host.high_score(), Some(340));
    assert_eq!(host.store().load(HIGH_SCORE_KEY).unwrap(), Some(340));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_unreadable_high_score_counts_as_zero() {
    let dir = temp_dir("corrupt");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(HIGH_SCORE_KEY), "not a number").unwrap();

    let mut host = GameHost::new(ArcadeConfig::default()).with_store(Box::new(FileStore::new(&dir)));
    host.mount(GameKind::Snake);
    assert_eq!(host.high_score(), Some(0));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_only_snake_persists() {
    let mut host = GameHost::new(ArcadeConfig::default());
    for kind in GameKind::ALL {
        host.mount(kind);
        let expected = kind == GameKind::Snake;
        assert_eq!(host.high_score().is_some(), expected, "{}", kind);
    }
}

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn test_arcade_games_draw_a_score_line() {
    let text = Dictionary::english();
    let mut host = GameHost::new(ArcadeConfig::default());
    for kind in [GameKind::Snake, GameKind::Match3, GameKind::CrossyRoad, GameKind::Archery] {
        host.mount(kind);
        let (w, h) = host.active().map(|g| g.surface_size()).unwrap();
        let mut surface = RecordingSurface::new(w, h);
        host.render(Some(&mut surface), &text);
        assert!(surface.texts().any(|t| t.starts_with("Score: 0")), "{}", kind);
    }
}

#[test]
fn test_ready_snake_prompts_to_start() {
    let mut host = GameHost::new(ArcadeConfig::default());
    host.mount(GameKind::Snake);
    let mut surface = RecordingSurface::new(600.0, 400.0);
    host.render(Some(&mut surface), &Dictionary::english());
    assert!(surface.contains_text("Start Game"));

    host.start();
    surface.clear_commands();
    host.render(Some(&mut surface), &Dictionary::english());
    assert!(!surface.contains_text("Start Game"));
}
