//! On-screen string lookup.
//!
//! The surrounding page owns the language; games only ask for strings by key
//! through `Translate`. Missing keys fall back to the key itself.

use rustc_hash::FxHashMap;

/// Translation function supplied by the host.
pub trait Translate {
    fn text(&self, key: &str) -> String;
}

/// Key/value dictionary with key fallback.
#[derive(Clone, Debug, Default)]
pub struct Dictionary {
    entries: FxHashMap<String, String>,
}

impl Dictionary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// English strings for every key the games draw.
    #[must_use]
    pub fn english() -> Self {
        Self::new()
            .with("score", "Score")
            .with("highScore", "High Score")
            .with("startGame", "Start Game")
            .with("pauseGame", "Pause")
            .with("resetGame", "Reset")
            .with("gameOver", "Game Over")
            .with("paused", "Paused")
            .with("level", "Level")
            .with("lines", "Lines")
            .with("next", "Next")
            .with("yourTurn", "Your Turn")
            .with("thinking", "Computer...")
            .with("winner", "Winner")
            .with("checkmate", "Checkmate")
            .with("stalemate", "Stalemate")
            .with("red", "Red")
            .with("white", "White")
            .with("black", "Black")
    }

    /// Add or replace an entry.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }
}

impl Translate for Dictionary {
    fn text(&self, key: &str) -> String {
        self.entries.get(key).cloned().unwrap_or_else(|| key.to_string())
    }
}

impl<F> Translate for F
where
    F: Fn(&str) -> String,
{
    fn text(&self, key: &str) -> String {
        self(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_to_key() {
        let dict = Dictionary::english();
        assert_eq!(dict.text("score"), "Score");
        assert_eq!(dict.text("missingKey"), "missingKey");
    }

    #[test]
    fn test_closure_translator() {
        let upper = |key: &str| key.to_uppercase();
        assert_eq!(upper.text("score"), "SCORE");
    }

    #[test]
    fn test_override() {
        let dict = Dictionary::english().with("score", "Pontos");
        assert_eq!(dict.text("score"), "Pontos");
    }
}
