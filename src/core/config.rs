//! Arcade-wide configuration.
//!
//! `ArcadeConfig` bundles the seed for the host RNG with one config per
//! game. Every field has a default, so a partial JSON document only
//! overrides what it names:
//!
//! ```
//! use arcade_engine::core::ArcadeConfig;
//! use arcade_engine::games::snake::Difficulty;
//!
//! let config = ArcadeConfig::from_json(r#"{ "seed": 7, "snake": { "difficulty": "Hard" } }"#).unwrap();
//! assert_eq!(config.seed, 7);
//! assert_eq!(config.snake.difficulty, Difficulty::Hard);
//! assert_eq!(config.snake.width, 30);
//! ```

use serde::{Deserialize, Serialize};

use crate::games::archery::ArcheryConfig;
use crate::games::checkers::CheckersConfig;
use crate::games::chess::ChessConfig;
use crate::games::crossy::CrossyConfig;
use crate::games::match3::Match3Config;
use crate::games::snake::SnakeConfig;
use crate::games::tetris::TetrisConfig;

/// Configuration for every game plus the host seed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcadeConfig {
    /// Seed of the host RNG. Each mounted game gets a fork of it.
    pub seed: u64,
    pub snake: SnakeConfig,
    pub tetris: TetrisConfig,
    pub match3: Match3Config,
    pub crossy: CrossyConfig,
    pub archery: ArcheryConfig,
    pub checkers: CheckersConfig,
    pub chess: ChessConfig,
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            snake: SnakeConfig::default(),
            tetris: TetrisConfig::default(),
            match3: Match3Config::default(),
            crossy: CrossyConfig::default(),
            archery: ArcheryConfig::default(),
            checkers: CheckersConfig::default(),
            chess: ChessConfig::default(),
        }
    }
}

impl ArcadeConfig {
    /// Parse from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_snake(mut self, snake: SnakeConfig) -> Self {
        self.snake = snake;
        self
    }

    #[must_use]
    pub fn with_chess(mut self, chess: ChessConfig) -> Self {
        self.chess = chess;
        self
    }

    #[must_use]
    pub fn with_checkers(mut self, checkers: CheckersConfig) -> Self {
        self.checkers = checkers;
        self
    }
}
