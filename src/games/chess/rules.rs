//! Legal move generation, move application and terminal detection.
//!
//! A candidate is legal only if, played on a scratch copy of the position,
//! it leaves the mover's king unattacked. Castling needs an unmoved king and
//! rook with empty squares between them; the king may not castle out of or
//! through an attacked square. Pawns reaching the last row become queens.
//! En passant is not played.

use serde::{Deserialize, Serialize};

use super::board::{ChessBoard, Piece, PieceKind, Side, BOARD_SIZE};
use crate::core::Cell;
use crate::rules::{GameResult, RulesEngine};

/// Column the king starts on.
const KING_COL: i32 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChessMove {
    pub from: Cell,
    pub to: Cell,
    /// Kind of the piece taken, if any.
    pub captured: Option<PieceKind>,
    /// Rook relocation performed by a castling king move.
    pub castle_rook: Option<(Cell, Cell)>,
    /// Pawn promotes to a queen on arrival.
    pub promotes: bool,
}

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChessOutcome {
    /// The side to move has no legal move and is in check.
    Checkmate { winner: Side },
    /// The side to move has no legal move and is not in check.
    Stalemate,
}

impl ChessBoard {
    fn candidate(&self, from: Cell, to: Cell, piece: Piece) -> ChessMove {
        ChessMove {
            from,
            to,
            captured: self.piece_at(to).map(|p| p.kind),
            castle_rook: None,
            promotes: piece.kind == PieceKind::Pawn && to.row() == piece.side.promotion_row(),
        }
    }

    /// Castling moves for the king on `from`.
    fn castling(&self, from: Cell, king: Piece) -> impl Iterator<Item = ChessMove> + '_ {
        let row = king.side.back_row();
        let eligible = king.kind == PieceKind::King
            && !king.has_moved
            && from == Cell::at(row, KING_COL)
            && !self.in_check(king.side);

        // (rook column, king destination column, rook destination column)
        [(BOARD_SIZE - 1, 6, 5), (0, 2, 3)]
            .into_iter()
            .filter(move |_| eligible)
            .filter_map(move |(rook_col, king_to, rook_to)| {
                let rook_cell = Cell::at(row, rook_col);
                let rook = self.piece_at(rook_cell)?;
                let unmoved_rook = rook.kind == PieceKind::Rook && rook.side == king.side && !rook.has_moved;
                let passing = Cell::at(row, rook_to);
                let ok = unmoved_rook
                    && self.path_clear(from, rook_cell)
                    && !self.is_attacked(passing, king.side.opponent());
                ok.then(|| ChessMove {
                    from,
                    to: Cell::at(row, king_to),
                    captured: None,
                    castle_rook: Some((rook_cell, passing)),
                    promotes: false,
                })
            })
    }

    /// Moves for the piece on `from` before the self-check filter.
    fn pseudo_moves(&self, from: Cell) -> Vec<ChessMove> {
        let Some(piece) = self.piece_at(from) else {
            return Vec::new();
        };
        let mut moves: Vec<ChessMove> = (0..BOARD_SIZE)
            .flat_map(|row| (0..BOARD_SIZE).map(move |col| Cell::at(row, col)))
            .filter(|&to| self.can_reach(from, to))
            .map(|to| self.candidate(from, to, piece))
            .collect();
        moves.extend(self.castling(from, piece));
        moves
    }

    /// Play a move without any legality check.
    fn play_unchecked(&mut self, mv: &ChessMove) {
        let Some(mut piece) = self.squares.take(mv.from) else {
            return;
        };
        piece.has_moved = true;
        if mv.promotes {
            piece.kind = PieceKind::Queen;
        }
        self.squares.set(mv.to, Some(piece));

        if let Some((rook_from, rook_to)) = mv.castle_rook {
            if let Some(mut rook) = self.squares.take(rook_from) {
                rook.has_moved = true;
                self.squares.set(rook_to, Some(rook));
            }
        }
    }

    /// Legal moves for the piece on `from`.
    #[must_use]
    pub fn moves_from(&self, from: Cell) -> Vec<ChessMove> {
        let Some(piece) = self.piece_at(from) else {
            return Vec::new();
        };
        self.pseudo_moves(from)
            .into_iter()
            .filter(|mv| {
                let mut scratch = self.clone();
                scratch.play_unchecked(mv);
                !scratch.in_check(piece.side)
            })
            .collect()
    }

    /// The legal move from `from` to `to`, if there is one.
    #[must_use]
    pub fn find_move(&self, from: Cell, to: Cell) -> Option<ChessMove> {
        self.moves_from(from).into_iter().find(|mv| mv.to == to)
    }

    /// Terminal state for the side to move.
    #[must_use]
    pub fn outcome(&self) -> Option<ChessOutcome> {
        if !self.current_moves().is_empty() {
            return None;
        }
        if self.in_check(self.turn) {
            Some(ChessOutcome::Checkmate {
                winner: self.turn.opponent(),
            })
        } else {
            Some(ChessOutcome::Stalemate)
        }
    }
}

impl RulesEngine for ChessBoard {
    type Side = Side;
    type Move = ChessMove;

    fn side_to_move(&self) -> Side {
        self.turn
    }

    fn legal_moves(&self, side: Side) -> Vec<ChessMove> {
        self.pieces()
            .filter(|(_, p)| p.side == side)
            .flat_map(|(cell, _)| self.moves_from(cell))
            .collect()
    }

    fn is_capture(&self, mv: &ChessMove) -> bool {
        mv.captured.is_some()
    }

    fn apply_move(&mut self, mv: &ChessMove) {
        self.play_unchecked(mv);
        self.turn = self.turn.opponent();
    }

    fn is_terminal(&self) -> Option<GameResult<Side>> {
        self.outcome().map(|outcome| match outcome {
            ChessOutcome::Checkmate { winner } => GameResult::Winner(winner),
            ChessOutcome::Stalemate => GameResult::Draw,
        })
    }
}
