//! Crossy Road and Bow-and-Arrow integration tests.

use arcade_engine::core::{Cell, GameRng, RunState, Vec2, FRAME_MS};
use arcade_engine::games::archery::{ArcheryConfig, ArcheryGame, Target};
use arcade_engine::games::crossy::{Car, CrossyConfig, CrossyGame, Lane};
use arcade_engine::games::Game;
use arcade_engine::host::GameHost;
use arcade_engine::input::{Direction, PointerEvent};
use arcade_engine::render::Color;
use arcade_engine::{ArcadeConfig, GameKind};
use proptest::prelude::*;
use smallvec::smallvec;

// =============================================================================
// Crossy Road
// =============================================================================

fn crossy_with_road(row: usize, car: Car) -> CrossyGame {
    let mut lanes = vec![Lane::Grass; 12];
    lanes[row] = Lane::Road { cars: smallvec![car] };
    let mut game = CrossyGame::with_lanes(CrossyConfig::default(), GameRng::new(3), lanes);
    game.start();
    game
}

#[test]
fn test_approaching_car_ends_run() {
    let car = Car {
        x: 3.0,
        speed: 0.5,
        color: Color::WHITE,
    };
    let mut game = crossy_with_road(9, car);
    assert!(game.hop(Direction::Up));
    assert!(!game.is_hit());

    game.update(FRAME_MS * 10.0);
    assert_eq!(game.run_state(), RunState::Over);
    assert_eq!(game.high_score(), Some(10));

    // Starting again begins a fresh run from the start cell.
    game.start();
    assert_eq!(game.run_state(), RunState::Running);
    assert_eq!(game.player(), Cell::new(7, 10));
    assert_eq!(game.score(), 0);
    assert_eq!(game.high_score(), Some(10));
}

#[test]
fn test_car_in_other_lane_is_harmless() {
    let car = Car {
        x: 7.0,
        speed: 0.0,
        color: Color::WHITE,
    };
    let mut game = crossy_with_road(5, car);
    game.update(FRAME_MS * 30.0);
    assert_eq!(game.run_state(), RunState::Running);
}

#[test]
fn test_paused_crossy_ignores_hops() {
    let mut game = crossy_with_road(
        5,
        Car {
            x: 0.0,
            speed: 0.0,
            color: Color::WHITE,
        },
    );
    game.toggle_pause();
    assert_eq!(game.run_state(), RunState::Paused);
    assert!(!game.hop(Direction::Up));
    game.toggle_pause();
    assert!(game.hop(Direction::Up));
}

#[test]
fn test_crossy_swipe_through_host() {
    let mut host = GameHost::new(ArcadeConfig::default());
    host.mount(GameKind::CrossyRoad);
    host.start();
    host.pointer(PointerEvent::Down(Vec2::new(200.0, 300.0)));
    assert!(host.pointer(PointerEvent::Up(Vec2::new(260.0, 310.0))));
    // A short drag is not a swipe.
    host.update(200.0);
    host.pointer(PointerEvent::Down(Vec2::new(200.0, 300.0)));
    assert!(!host.pointer(PointerEvent::Up(Vec2::new(205.0, 300.0))));
}

// =============================================================================
// Bow and Arrow
// =============================================================================

fn archery() -> ArcheryGame {
    let mut game = ArcheryGame::new(ArcheryConfig::default(), GameRng::new(9));
    game.start();
    game
}

#[test]
fn test_drag_and_release_hits_target() {
    let mut game = archery();
    game.add_target(Target {
        pos: Vec2::new(140.0, 300.0),
        radius: 20.0,
        speed_y: 0.0,
        color: Color::WHITE,
    });

    assert!(game.pointer(PointerEvent::Down(Vec2::new(100.0, 300.0))));
    assert!(game.pointer(PointerEvent::Move(Vec2::new(0.0, 300.0))));
    assert!(game.pointer(PointerEvent::Up(Vec2::new(0.0, 300.0))));
    assert_eq!(game.arrows().len(), 1);

    // First frame: (115, 300). Second frame: (130, 300.5), inside the target.
    game.frame();
    assert_eq!(game.score(), 0);
    game.frame();
    assert_eq!(game.score(), 10);
    assert!(game.arrows().is_empty());
    assert!(game.targets().iter().all(|t| t.pos.x > 600.0));
}

#[test]
fn test_drag_outside_grab_radius_is_ignored() {
    let mut game = archery();
    assert!(!game.pointer(PointerEvent::Down(Vec2::new(400.0, 100.0))));
    assert!(!game.pointer(PointerEvent::Move(Vec2::new(300.0, 100.0))));
    assert!(!game.pointer(PointerEvent::Up(Vec2::new(300.0, 100.0))));
    assert!(game.arrows().is_empty());
}

#[test]
fn test_archery_never_ends() {
    let mut game = archery();
    for _ in 0..100 {
        game.update(100.0);
    }
    assert_eq!(game.run_state(), RunState::Running);
    assert!(game.targets().len() >= 6);
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_player_stays_on_field(seed in any::<u64>(), hops in proptest::collection::vec(0usize..4, 1..80)) {
        let mut game = CrossyGame::with_lanes(CrossyConfig::default(), GameRng::new(seed), Vec::new());
        game.start();
        for hop in hops {
            game.hop(Direction::ALL[hop]);
            game.update(150.0);
            let player = game.player();
            prop_assert!((0..15).contains(&player.x));
            prop_assert!((0..12).contains(&player.y));
            prop_assert_eq!(game.score() % 10, 0);
        }
        prop_assert_eq!(game.run_state(), RunState::Running);
    }

    #[test]
    fn prop_arrows_stay_in_field(seed in any::<u64>(), dx in -150.0f64..0.0, dy in -100.0f64..100.0, frames in 1usize..200) {
        let mut game = ArcheryGame::new(ArcheryConfig::default(), GameRng::new(seed));
        game.start();
        game.aim_start(Vec2::new(100.0, 300.0));
        game.aim_move(Vec2::new(100.0 + dx, 300.0 + dy));
        game.release();
        for _ in 0..frames {
            game.frame();
            for arrow in game.arrows() {
                prop_assert!(arrow.pos.x <= 800.0 && arrow.pos.y <= 500.0);
            }
            prop_assert_eq!(game.score() % 10, 0);
        }
    }
}
