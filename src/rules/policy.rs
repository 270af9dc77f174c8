//! Automated opponent policies.
//!
//! Policies are trait-based so a session can swap the opponent:
//! - `UniformOpponent`: any legal move, uniformly at random
//! - `CapturePreferring`: uniformly among captures if any exist, otherwise
//!   among all legal moves

use crate::core::GameRng;

use super::engine::RulesEngine;

/// Policy for choosing the automated side's move.
pub trait OpponentPolicy<E: RulesEngine> {
    /// Choose a move for `side`. Returns `None` if it has no legal move.
    fn choose_move(&self, engine: &E, side: E::Side, rng: &mut GameRng) -> Option<E::Move>;
}

/// Uniform random choice among all legal moves.
#[derive(Clone, Copy, Debug, Default)]
pub struct UniformOpponent;

impl<E: RulesEngine> OpponentPolicy<E> for UniformOpponent {
    fn choose_move(&self, engine: &E, side: E::Side, rng: &mut GameRng) -> Option<E::Move> {
        let moves = engine.legal_moves(side);
        rng.choose(&moves).cloned()
    }
}

/// Random choice restricted to captures whenever any capture exists.
#[derive(Clone, Copy, Debug, Default)]
pub struct CapturePreferring;

impl<E: RulesEngine> OpponentPolicy<E> for CapturePreferring {
    fn choose_move(&self, engine: &E, side: E::Side, rng: &mut GameRng) -> Option<E::Move> {
        let moves = engine.legal_moves(side);
        if moves.is_empty() {
            return None;
        }

        let captures: Vec<_> = moves.iter().filter(|m| engine.is_capture(m)).cloned().collect();
        let pool = if captures.is_empty() { &moves } else { &captures };
        rng.choose(pool).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::GameResult;

    /// Moves are numbers; even numbers are captures.
    #[derive(Clone)]
    struct Menu(Vec<u8>);

    impl RulesEngine for Menu {
        type Side = ();
        type Move = u8;

        fn side_to_move(&self) {}

        fn legal_moves(&self, _side: ()) -> Vec<u8> {
            self.0.clone()
        }

        fn is_capture(&self, mv: &u8) -> bool {
            mv % 2 == 0
        }

        fn apply_move(&mut self, _mv: &u8) {}

        fn is_terminal(&self) -> Option<GameResult<()>> {
            None
        }
    }

    #[test]
    fn test_capture_preferring_only_picks_captures() {
        let engine = Menu(vec![1, 3, 4, 5, 7]);
        let mut rng = GameRng::new(42);
        for _ in 0..50 {
            assert_eq!(CapturePreferring.choose_move(&engine, (), &mut rng), Some(4));
        }
    }

    #[test]
    fn test_capture_preferring_falls_back() {
        let engine = Menu(vec![1, 3]);
        let mut rng = GameRng::new(1);
        let mv = CapturePreferring.choose_move(&engine, (), &mut rng);
        assert!(matches!(mv, Some(1) | Some(3)));
    }

    #[test]
    fn test_no_moves() {
        let engine = Menu(vec![]);
        let mut rng = GameRng::new(1);
        assert_eq!(CapturePreferring.choose_move(&engine, (), &mut rng), None);
        assert_eq!(UniformOpponent.choose_move(&engine, (), &mut rng), None);
    }

    #[test]
    fn test_uniform_is_deterministic_per_seed() {
        let engine = Menu((0..20).collect());
        let picks = |seed| {
            let mut rng = GameRng::new(seed);
            (0..10)
                .map(|_| UniformOpponent.choose_move(&engine, (), &mut rng))
                .collect::<Vec<_>>()
        };
        assert_eq!(picks(9), picks(9));
    }
}
