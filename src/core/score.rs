//! Monotonic session score.

use serde::{Deserialize, Serialize};

/// Non-negative score that only grows within a session.
///
/// The only way to lower it is an explicit `reset()` on restart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Score(u32);

impl Score {
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Add points, saturating at `u32::MAX`.
    pub fn add(&mut self, points: u32) -> u32 {
        self.0 = self.0.saturating_add(points);
        self.0
    }

    pub fn reset(&mut self) {
        self.0 = 0;
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_reset() {
        let mut score = Score::new();
        assert_eq!(score.add(10), 10);
        assert_eq!(score.add(40), 50);
        score.reset();
        assert_eq!(score.value(), 0);
    }

    #[test]
    fn test_saturates() {
        let mut score = Score::new();
        score.add(u32::MAX);
        score.add(5);
        assert_eq!(score.value(), u32::MAX);
    }
}
