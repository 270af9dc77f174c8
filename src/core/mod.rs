//! Core building blocks shared by every game: RNG, geometry, grids, scoring,
//! scheduling and configuration.
//!
//! Nothing here knows about a particular game. Games compose these
//! primitives and own the results exclusively.

pub mod clock;
pub mod config;
pub mod geometry;
pub mod grid;
pub mod rng;
pub mod score;

pub use clock::{Delay, FixedStep, RunState, FRAME_MS, MAX_STEPS_PER_UPDATE};
pub use config::ArcadeConfig;
pub use geometry::{Cell, Vec2};
pub use grid::Grid;
pub use rng::GameRng;
pub use score::Score;
