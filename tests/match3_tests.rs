//! Match-3 integration tests.

use arcade_engine::core::{Cell, GameRng, FRAME_MS};
use arcade_engine::games::match3::{Match3Config, Match3Game, SelectOutcome};
use arcade_engine::games::Game;
use arcade_engine::host::GameHost;
use arcade_engine::input::{DisplayRect, PointerEvent};
use arcade_engine::{ArcadeConfig, GameKind, Vec2};
use proptest::prelude::*;

fn drain_animation(game: &mut Match3Game) {
    for _ in 0..500 {
        if !game.is_animating() {
            return;
        }
        game.update(FRAME_MS);
    }
    panic!("candies never settled");
}

// =============================================================================
// Swaps
// =============================================================================

#[test]
fn test_vertical_run_from_swap() {
    let mut game = Match3Game::from_rows(
        Match3Config::default(),
        GameRng::new(11),
        &[
            &[2, 0, 1],
            &[0, 1, 2],
            &[1, 0, 2],
        ],
    );
    game.start();
    assert!(game.matches().is_empty());

    // Swapping (0,1) and (1,1) lines up the 0s in column 1.
    assert_eq!(game.select(Cell::new(0, 1)), SelectOutcome::Selected);
    assert_eq!(game.select(Cell::new(1, 1)), SelectOutcome::Matched(3));
    assert_eq!(game.score(), 30);
    assert_eq!(game.grid().count_occupied(), 9);
}

#[test]
fn test_input_ignored_until_started() {
    let mut game = Match3Game::new(Match3Config::default(), GameRng::new(5));
    assert_eq!(game.select(Cell::new(0, 0)), SelectOutcome::Ignored);
    game.start();
    assert_eq!(game.select(Cell::new(0, 0)), SelectOutcome::Selected);
    assert_eq!(game.select(Cell::new(8, 0)), SelectOutcome::Ignored);
}

#[test]
fn test_cascade_finishes_with_stable_board() {
    let mut game = Match3Game::from_rows(
        Match3Config::default().with_kinds(4),
        GameRng::new(21),
        &[
            &[0, 1, 2, 3],
            &[1, 1, 1, 0],
            &[2, 3, 0, 1],
            &[3, 0, 1, 2],
        ],
    );
    game.start();
    game.update(FRAME_MS);
    assert_eq!(game.score() % 10, 0);
    assert!(game.score() >= 30);

    for _ in 0..50 {
        drain_animation(&mut game);
        if game.matches().is_empty() {
            break;
        }
        game.update(FRAME_MS);
    }
    assert!(game.matches().is_empty());
    assert_eq!(game.grid().count_occupied(), 16);
}

// =============================================================================
// Pointer Input Through the Host
// =============================================================================

#[test]
fn test_scaled_click_selects_cell() {
    let mut host = GameHost::new(ArcadeConfig::default());
    host.mount(GameKind::Match3);
    // The 480px board is displayed at half size, offset by (10, 20).
    host.set_display(DisplayRect {
        left: 10.0,
        top: 20.0,
        width: 240.0,
        height: 240.0,
    });
    host.start();
    assert!(host.pointer(PointerEvent::Down(Vec2::new(10.0 + 45.0, 20.0 + 15.0))));
    // Clicking outside the board does nothing.
    assert!(!host.pointer(PointerEvent::Down(Vec2::new(5.0, 5.0))));
}

// =============================================================================
// Properties
// =============================================================================

fn board_strategy() -> impl Strategy<Value = Vec<Vec<u8>>> {
    proptest::collection::vec(proptest::collection::vec(0u8..4, 5), 5)
}

proptest! {
    #[test]
    fn prop_settle_removes_every_run(seed in any::<u64>(), rows in board_strategy()) {
        let refs: Vec<&[u8]> = rows.iter().map(Vec::as_slice).collect();
        let mut game = Match3Game::from_rows(Match3Config::default().with_kinds(4), GameRng::new(seed), &refs);
        game.settle();
        prop_assert!(game.matches().is_empty());
        prop_assert_eq!(game.grid().count_occupied(), 25);
        prop_assert!(!game.is_animating());
        prop_assert_eq!(game.score() % 10, 0);
    }

    #[test]
    fn prop_fresh_board_has_no_runs(seed in any::<u64>(), kinds in 3u8..7) {
        let game = Match3Game::new(Match3Config::default().with_kinds(kinds), GameRng::new(seed));
        prop_assert!(game.matches().is_empty());
        prop_assert!(game.grid().occupied().all(|(_, candy)| candy.kind < kinds));
    }
}
