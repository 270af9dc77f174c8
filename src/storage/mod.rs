//! High-score persistence.
//!
//! Only Snake persists anything across sessions: its best score, as a single
//! integer under `"snakeHighScore"`. `HighScore` tracks the in-session best
//! and decides when a write is due; the store itself is pluggable.

pub mod store;

pub use store::{FileStore, MemoryStore, ScoreStore, StoreError};

/// Best score for one storage key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HighScore {
    key: &'static str,
    best: u32,
}

impl HighScore {
    #[must_use]
    pub fn new(key: &'static str) -> Self {
        Self { key, best: 0 }
    }

    /// Load the stored value. A missing or unreadable value counts as zero.
    pub fn load(key: &'static str, store: &dyn ScoreStore) -> Self {
        let best = match store.load(key) {
            Ok(value) => value.unwrap_or(0),
            Err(e) => {
                log::warn!("Could not read high score '{}': {}", key, e);
                0
            }
        };
        Self { key, best }
    }

    #[must_use]
    pub fn key(&self) -> &'static str {
        self.key
    }

    #[must_use]
    pub fn best(&self) -> u32 {
        self.best
    }

    /// Record a score. Writes through to the store when it beats the best.
    ///
    /// Returns true if the score is a new best.
    pub fn submit(&mut self, score: u32, store: &mut dyn ScoreStore) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        if let Err(e) = store.save(self.key, score) {
            log::warn!("Could not save high score '{}': {}", self.key, e);
        }
        true
    }
}
