//! Rules engine trait for turn-based board games.
//!
//! Board games implement `RulesEngine` to define:
//! - What moves are legal for a side
//! - How a move modifies the position
//! - When the game is over
//!
//! ## Implementation Notes
//!
//! - `legal_moves`: Return empty if the side cannot move
//! - `apply_move`: Callers only pass moves produced by `legal_moves`
//! - `is_terminal`: Return None if the game continues

use std::fmt::Debug;

/// Result of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameResult<S> {
    /// Single winner.
    Winner(S),
    /// Nobody wins (stalemate).
    Draw,
}

impl<S: PartialEq> GameResult<S> {
    /// Check if a side won.
    #[must_use]
    pub fn is_winner(&self, side: S) -> bool {
        match self {
            GameResult::Winner(s) => *s == side,
            GameResult::Draw => false,
        }
    }

    /// The winning side, if any.
    #[must_use]
    pub fn winner(&self) -> Option<&S> {
        match self {
            GameResult::Winner(s) => Some(s),
            GameResult::Draw => None,
        }
    }
}

/// Rules engine trait.
///
/// The position is the implementor; cloning it gives a scratch copy for
/// look-ahead.
pub trait RulesEngine: Clone {
    /// Player identity.
    type Side: Copy + Eq + Debug;
    /// A complete move record.
    type Move: Clone + PartialEq + Debug;

    /// Side whose turn it is.
    fn side_to_move(&self) -> Self::Side;

    /// Enumerate every legal move for `side`.
    fn legal_moves(&self, side: Self::Side) -> Vec<Self::Move>;

    /// True if the move removes an opposing piece.
    fn is_capture(&self, mv: &Self::Move) -> bool;

    /// Apply a move and pass the turn.
    fn apply_move(&mut self, mv: &Self::Move);

    /// Check if the game is over.
    fn is_terminal(&self) -> Option<GameResult<Self::Side>>;

    // === Convenience Methods ===

    /// Legal moves for the side to move.
    fn current_moves(&self) -> Vec<Self::Move> {
        self.legal_moves(self.side_to_move())
    }

    /// True if `mv` is in the enumeration for the side to move.
    fn is_legal(&self, mv: &Self::Move) -> bool {
        self.current_moves().iter().any(|m| m == mv)
    }

    /// Capturing subset of `legal_moves`.
    fn capture_moves(&self, side: Self::Side) -> Vec<Self::Move> {
        self.legal_moves(side)
            .into_iter()
            .filter(|m| self.is_capture(m))
            .collect()
    }
}
