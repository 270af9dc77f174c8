//! Snake integration tests.

use arcade_engine::core::{Cell, GameRng, RunState};
use arcade_engine::games::snake::{SnakeConfig, SnakeGame, TickOutcome, HIGH_SCORE_KEY};
use arcade_engine::games::Game;
use arcade_engine::host::GameHost;
use arcade_engine::input::{Direction, Key};
use arcade_engine::storage::{MemoryStore, ScoreStore};
use arcade_engine::{ArcadeConfig, GameKind};
use proptest::prelude::*;

fn running(seed: u64) -> SnakeGame {
    let mut game = SnakeGame::new(SnakeConfig::default(), GameRng::new(seed));
    game.start();
    game
}

// =============================================================================
// Movement and Growth
// =============================================================================

#[test]
fn test_eating_forced_food() {
    let mut game = running(1);
    assert_eq!(
        game.body().collect::<Vec<_>>(),
        vec![Cell::new(10, 10), Cell::new(9, 10), Cell::new(8, 10)]
    );
    assert!(game.set_food(Cell::new(11, 10)));

    assert_eq!(game.tick(), TickOutcome::Ate);
    assert_eq!(game.head(), Cell::new(11, 10));
    assert_eq!(game.score(), 10);
    assert_eq!(game.len(), 4);
}

#[test]
fn test_length_constant_without_food() {
    let mut game = running(2);
    game.set_food(Cell::new(0, 0));
    for _ in 0..5 {
        assert_eq!(game.tick(), TickOutcome::Moved);
        assert_eq!(game.len(), 3);
    }
    assert_eq!(game.score(), 0);
}

#[test]
fn test_steering_applies_on_next_tick() {
    let mut game = running(3);
    game.set_food(Cell::new(0, 0));
    assert!(game.steer(Direction::Down));
    assert_eq!(game.heading(), Direction::Right);
    game.tick();
    assert_eq!(game.heading(), Direction::Down);
    assert_eq!(game.head(), Cell::new(10, 11));
}

#[test]
fn test_running_into_wall() {
    let mut game = running(4);
    game.set_food(Cell::new(0, 0));
    let mut outcome = TickOutcome::Moved;
    for _ in 0..30 {
        outcome = game.tick();
        if outcome == TickOutcome::Crashed {
            break;
        }
    }
    assert_eq!(outcome, TickOutcome::Crashed);
    assert_eq!(game.run_state(), RunState::Over);
    assert_eq!(game.tick(), TickOutcome::Idle);
}

// =============================================================================
// High Score Persistence Through the Host
// =============================================================================

#[test]
fn test_high_score_written_and_restored() {
    let mut host = GameHost::new(ArcadeConfig::default());
    host.mount(GameKind::Snake);
    assert_eq!(host.high_score(), Some(0));
    host.start();

    // Let the snake run until it crashes.
    for _ in 0..200 {
        host.update(130.0);
        if host.run_state() != Some(RunState::Running) {
            break;
        }
    }
    let score = host.active().map(|g| g.score()).unwrap_or(0);
    assert_eq!(host.high_score(), Some(score));
    assert!(!host.key(Key::Other('x')));
}

#[test]
fn test_stored_high_score_loaded_on_mount() {
    let mut store = MemoryStore::new();
    store.save(HIGH_SCORE_KEY, 250).unwrap();
    let mut host = GameHost::new(ArcadeConfig::default()).with_store(Box::new(store));
    host.mount(GameKind::Snake);
    assert_eq!(host.high_score(), Some(250));
    assert_eq!(host.active().and_then(|g| g.high_score()), Some(250));
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_food_never_on_body(seed in any::<u64>(), turns in proptest::collection::vec(0usize..4, 1..60)) {
        let mut game = running(seed);
        for turn in turns {
            game.steer(Direction::ALL[turn]);
            game.tick();
            if let Some(food) = game.food() {
                prop_assert!(game.body().all(|segment| segment != food));
            }
            if game.run_state() != RunState::Running {
                break;
            }
        }
    }

    #[test]
    fn prop_length_changes_only_by_eating(seed in any::<u64>(), ticks in 1usize..40) {
        let mut game = running(seed);
        for _ in 0..ticks {
            let before = game.len();
            let score = game.score();
            match game.tick() {
                TickOutcome::Ate => {
                    prop_assert_eq!(game.len(), before + 1);
                    prop_assert_eq!(game.score(), score + 10);
                }
                TickOutcome::Moved => prop_assert_eq!(game.len(), before),
                TickOutcome::Crashed | TickOutcome::Idle => break,
            }
        }
    }
}
