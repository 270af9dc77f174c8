//! # arcade-engine
//!
//! Deterministic simulation cores for a family of small browser games:
//! Snake, Tetris, Match-3, Crossy Road, Bow-and-Arrow, Checkers and Chess.
//!
//! ## Design Principles
//!
//! 1. **Owned state**: each game owns its state, timers and RNG. No game
//!    reads another's state and nothing is global.
//!
//! 2. **Injected randomness**: every random choice (food, pieces, candies,
//!    lanes, targets, opponent moves) draws from a seeded `GameRng`, so a
//!    seed replays a session exactly.
//!
//! 3. **No-effect rejection**: illegal input is refused by returning
//!    `false`/`None`. The simulation has no error paths; only storage is
//!    fallible.
//!
//! 4. **Host-driven time**: games advance only when `update(dt_ms)` is
//!    called. Pausing is not calling it.
//!
//! ## Modules
//!
//! - `core`: RNG, grid geometry, scoring, clocks, configuration
//! - `input`: commands, key bindings, pointer scaling, swipes
//! - `render`: the `Surface` drawing contract, overlays, translations
//! - `storage`: high-score persistence
//! - `rules`: `RulesEngine` trait and opponent policies for board games
//! - `games`: the seven games behind the `Game` trait
//! - `host`: `GameHost`, which mounts one game at a time

pub mod core;
pub mod games;
pub mod host;
pub mod input;
pub mod render;
pub mod rules;
pub mod storage;

// Re-export commonly used types
pub use crate::core::{
    ArcadeConfig, Cell, Delay, FixedStep, GameRng, Grid, RunState, Score, Vec2, FRAME_MS,
};

pub use crate::games::{Game, GameKind};

pub use crate::host::{create_game, GameHost, ScoreSink};

pub use crate::input::{Command, Direction, Key, PointerEvent};

pub use crate::render::{Color, Dictionary, RecordingSurface, Surface, Translate};

pub use crate::rules::{CapturePreferring, GameResult, OpponentPolicy, RulesEngine, UniformOpponent};

pub use crate::storage::{FileStore, HighScore, MemoryStore, ScoreStore, StoreError};
