//! Checkers against a capture-preferring computer opponent.
//!
//! `rules` holds the position and move generation behind `RulesEngine`;
//! `session` wraps it with selection input, the opponent delay and drawing.
//!
//! ```
//! use arcade_engine::core::Cell;
//! use arcade_engine::games::checkers::{Checker, CheckersBoard, Side};
//!
//! let mut board = CheckersBoard::empty(Side::Red);
//! board.place(Cell::at(7, 0), Checker::king(Side::Red));
//! board.place(Cell::at(4, 3), Checker::man(Side::White));
//!
//! // The king flies over (4,3) and may land anywhere beyond it.
//! let moves = board.moves_from(Cell::at(7, 0));
//! assert_eq!(moves.len(), 4);
//! assert!(moves.iter().all(|m| m.captured == Some(Cell::at(4, 3))));
//! ```

pub mod rules;
pub mod session;

pub use rules::{is_dark, Checker, CheckersBoard, CheckersMove, PieceMoves, Side, BOARD_SIZE};
pub use session::{CheckersConfig, CheckersGame, SQUARE_SIZE};
