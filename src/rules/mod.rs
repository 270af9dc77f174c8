//! Rules engine trait and opponent policies for board games.
//!
//! Checkers and Chess implement `RulesEngine`:
//! - Legal moves for each position
//! - How moves modify the position
//! - Terminal conditions
//!
//! The session wrappers call into `RulesEngine` and an `OpponentPolicy` but
//! never interpret game-specific concepts directly.

pub mod engine;
pub mod policy;

pub use engine::{GameResult, RulesEngine};
pub use policy::{CapturePreferring, OpponentPolicy, UniformOpponent};
