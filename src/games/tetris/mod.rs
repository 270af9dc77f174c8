//! Tetris.
//!
//! A falling tetromino moves under player control and gravity. When it can
//! fall no further it merges into the board, full rows are removed, and the
//! next piece is taken from a single-slot lookahead buffer.
//!
//! ## Scoring
//!
//! Clearing `n` rows at once awards `[0, 40, 100, 300, 1200][n]` times the
//! level in force before the clear. The level is `lines / 10 + 1` and the
//! gravity interval is `1000ms / level`.
//!
//! ## Example
//!
//! ```
//! use arcade_engine::games::tetris::{SequencePieces, TetrisConfig, TetrisGame, TetrominoKind};
//! use arcade_engine::games::Game;
//!
//! let source = SequencePieces::new(vec![TetrominoKind::O]);
//! let mut game = TetrisGame::with_source(TetrisConfig::default(), Box::new(source));
//! game.start();
//! game.hard_drop();
//! assert_eq!(game.board().count_occupied(), 4);
//! ```

pub mod game;
pub mod piece;

pub use game::{DropOutcome, TetrisConfig, TetrisGame, BLOCK_SIZE, LINE_POINTS};
pub use piece::{Piece, PieceSource, RandomPieces, SequencePieces, Shape, TetrominoKind};
