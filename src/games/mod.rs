//! Game implementations.
//!
//! Each game is a self-contained simulation that owns its state, its RNG
//! and its timers. The host drives every game through the same `Game`
//! trait:
//!
//! - Real-time: `snake`, `tetris`, `match3`, `crossy`, `archery`
//! - Turn-based: `checkers`, `chess` (rule engines implement `RulesEngine`)
//!
//! No game depends on another's state.

pub mod archery;
pub mod checkers;
pub mod chess;
pub mod crossy;
pub mod match3;
pub mod snake;
pub mod tetris;

use serde::{Deserialize, Serialize};

use crate::core::RunState;
use crate::input::{Command, PointerEvent};
use crate::render::{Surface, Translate};

/// Identifies one of the bundled games.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameKind {
    Snake,
    Tetris,
    Match3,
    CrossyRoad,
    Archery,
    Checkers,
    Chess,
}

impl GameKind {
    pub const ALL: [GameKind; 7] = [
        GameKind::Snake,
        GameKind::Tetris,
        GameKind::Match3,
        GameKind::CrossyRoad,
        GameKind::Archery,
        GameKind::Checkers,
        GameKind::Chess,
    ];

    /// Touch swipes steer these games.
    #[must_use]
    pub fn uses_swipe(self) -> bool {
        matches!(self, GameKind::Snake | GameKind::CrossyRoad)
    }
}

impl std::fmt::Display for GameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GameKind::Snake => "snake",
            GameKind::Tetris => "tetris",
            GameKind::Match3 => "match3",
            GameKind::CrossyRoad => "crossy-road",
            GameKind::Archery => "archery",
            GameKind::Checkers => "checkers",
            GameKind::Chess => "chess",
        };
        write!(f, "{}", name)
    }
}

/// Common surface of every game.
///
/// ## Lifecycle
///
/// Games are created `Ready`. `start` enters `Running` (restarting from
/// `Over`), `toggle_pause` flips between `Running` and `Paused`, `reset`
/// rebuilds all state and returns to `Ready`. `update` and gameplay input
/// have no effect unless the game is `Running`.
pub trait Game {
    fn kind(&self) -> GameKind;

    /// Logical surface size in pixels.
    fn surface_size(&self) -> (f64, f64);

    fn run_state(&self) -> RunState;

    fn start(&mut self);

    fn toggle_pause(&mut self);

    fn reset(&mut self);

    /// Apply a command. Returns true if it changed anything.
    fn handle(&mut self, command: Command) -> bool;

    /// Pointer event in surface coordinates. Returns true if it changed
    /// anything.
    fn pointer(&mut self, event: PointerEvent) -> bool {
        let _ = event;
        false
    }

    /// Advance the simulation by `dt_ms` of wall time.
    fn update(&mut self, dt_ms: f64);

    fn score(&self) -> u32;

    /// Redraw the whole surface.
    fn render(&self, surface: &mut dyn Surface, text: &dyn Translate);

    /// Storage key for a persisted high score. `None` if nothing persists.
    fn high_score_key(&self) -> Option<&'static str> {
        None
    }

    /// Seed the in-session high score from storage.
    fn restore_high_score(&mut self, _best: u32) {}

    /// Best score known to the game this session.
    fn high_score(&self) -> Option<u32> {
        None
    }
}
