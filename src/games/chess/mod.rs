//! Chess with self-check prevention, castling and queen promotion.
//!
//! ## Modules
//!
//! - `board`: pieces, position and the geometric move/attack predicates
//! - `rules`: legal move generation and terminal detection (`RulesEngine`)
//! - `session`: click selection, the automated side and drawing
//!
//! ## Terminal states
//!
//! When the side to move has no legal move the game ends in
//! `ChessOutcome::Checkmate` if its king is attacked and
//! `ChessOutcome::Stalemate` otherwise.

pub mod board;
pub mod rules;
pub mod session;

pub use board::{ChessBoard, Piece, PieceKind, Side, BOARD_SIZE};
pub use rules::{ChessMove, ChessOutcome};
pub use session::{ChessConfig, ChessGame, SQUARE_SIZE};
