//! Chess pieces, position and square geometry.
//!
//! The geometric predicates here answer "could this piece travel from A to
//! B on this board" without regard to the mover's own king. `rules` layers
//! castling and self-check prevention on top.

use serde::{Deserialize, Serialize};

use crate::core::{Cell, Grid};

/// Squares per side.
pub const BOARD_SIZE: i32 = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Starts on rows 6 and 7 and moves toward row 0.
    White,
    Black,
}

impl Side {
    #[must_use]
    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Row delta of a pawn step.
    #[must_use]
    pub fn pawn_direction(self) -> i32 {
        match self {
            Side::White => -1,
            Side::Black => 1,
        }
    }

    /// Row the pawns start on.
    #[must_use]
    pub fn pawn_row(self) -> i32 {
        match self {
            Side::White => BOARD_SIZE - 2,
            Side::Black => 1,
        }
    }

    /// Row the pieces start on.
    #[must_use]
    pub fn back_row(self) -> i32 {
        match self {
            Side::White => BOARD_SIZE - 1,
            Side::Black => 0,
        }
    }

    /// Row on which pawns promote.
    #[must_use]
    pub fn promotion_row(self) -> i32 {
        self.opponent().back_row()
    }

    /// Translation key of the side's name.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Side::White => "white",
            Side::Black => "black",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Back-row order from column 0.
    pub const BACK_ROW: [PieceKind; 8] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
    /// Set once the piece leaves its starting square.
    pub has_moved: bool,
}

impl Piece {
    #[must_use]
    pub const fn new(kind: PieceKind, side: Side) -> Self {
        Self {
            kind,
            side,
            has_moved: false,
        }
    }

    /// Unicode glyph drawn for the piece.
    #[must_use]
    pub fn glyph(&self) -> &'static str {
        match (self.side, self.kind) {
            (Side::White, PieceKind::King) => "\u{2654}",
            (Side::White, PieceKind::Queen) => "\u{2655}",
            (Side::White, PieceKind::Rook) => "\u{2656}",
            (Side::White, PieceKind::Bishop) => "\u{2657}",
            (Side::White, PieceKind::Knight) => "\u{2658}",
            (Side::White, PieceKind::Pawn) => "\u{2659}",
            (Side::Black, PieceKind::King) => "\u{265a}",
            (Side::Black, PieceKind::Queen) => "\u{265b}",
            (Side::Black, PieceKind::Rook) => "\u{265c}",
            (Side::Black, PieceKind::Bishop) => "\u{265d}",
            (Side::Black, PieceKind::Knight) => "\u{265e}",
            (Side::Black, PieceKind::Pawn) => "\u{265f}",
        }
    }
}

/// A chess position and the side to move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChessBoard {
    pub(super) squares: Grid<Piece>,
    pub(super) turn: Side,
}

impl Default for ChessBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl ChessBoard {
    /// Standard initial position, White to move.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Self::empty(Side::White);
        for side in [Side::White, Side::Black] {
            for (col, kind) in PieceKind::BACK_ROW.iter().enumerate() {
                let col = col as i32;
                board.place(Cell::at(side.back_row(), col), Piece::new(*kind, side));
                board.place(Cell::at(side.pawn_row(), col), Piece::new(PieceKind::Pawn, side));
            }
        }
        board
    }

    /// An empty board with `turn` to move.
    #[must_use]
    pub fn empty(turn: Side) -> Self {
        let size = BOARD_SIZE as usize;
        Self {
            squares: Grid::new(size, size),
            turn,
        }
    }

    /// Put a piece on a square. Returns false if off the board.
    pub fn place(&mut self, cell: Cell, piece: Piece) -> bool {
        self.squares.set(cell, Some(piece))
    }

    #[must_use]
    pub fn piece_at(&self, cell: Cell) -> Option<Piece> {
        self.squares.get(cell).copied()
    }

    #[must_use]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        self.squares.in_bounds(cell)
    }

    pub fn pieces(&self) -> impl Iterator<Item = (Cell, Piece)> + '_ {
        self.squares.occupied().map(|(cell, piece)| (cell, *piece))
    }

    /// Square of `side`'s king.
    #[must_use]
    pub fn king(&self, side: Side) -> Option<Cell> {
        self.pieces()
            .find(|(_, p)| p.side == side && p.kind == PieceKind::King)
            .map(|(cell, _)| cell)
    }

    /// True if every square strictly between `from` and `to` is empty.
    /// Only meaningful on a shared rank, file or diagonal.
    #[must_use]
    pub fn path_clear(&self, from: Cell, to: Cell) -> bool {
        let dx = (to.col() - from.col()).signum();
        let dy = (to.row() - from.row()).signum();
        let mut cursor = from.offset(dx, dy);
        while cursor != to {
            if self.squares.is_occupied(cursor) {
                return false;
            }
            cursor = cursor.offset(dx, dy);
        }
        true
    }

    /// Geometric move test for the piece on `from`, ignoring castling and
    /// the safety of its own king.
    #[must_use]
    pub fn can_reach(&self, from: Cell, to: Cell) -> bool {
        let Some(piece) = self.piece_at(from) else {
            return false;
        };
        if from == to || !self.in_bounds(to) {
            return false;
        }
        let target = self.piece_at(to);
        if target.is_some_and(|t| t.side == piece.side) {
            return false;
        }

        let dx = to.col() - from.col();
        let dy = to.row() - from.row();
        match piece.kind {
            PieceKind::Pawn => {
                let dir = piece.side.pawn_direction();
                if dx == 0 && dy == dir {
                    target.is_none()
                } else if dx == 0 && dy == 2 * dir {
                    from.row() == piece.side.pawn_row() && target.is_none() && self.path_clear(from, to)
                } else {
                    dx.abs() == 1 && dy == dir && target.is_some()
                }
            }
            _ => self.attacks(from, to),
        }
    }

    /// True if the piece on `from` attacks `to`. Pawns attack diagonally
    /// forward only, whether or not the square is occupied.
    #[must_use]
    pub fn attacks(&self, from: Cell, to: Cell) -> bool {
        let Some(piece) = self.piece_at(from) else {
            return false;
        };
        if from == to {
            return false;
        }

        let dx = to.col() - from.col();
        let dy = to.row() - from.row();
        let (adx, ady) = (dx.abs(), dy.abs());
        match piece.kind {
            PieceKind::Pawn => adx == 1 && dy == piece.side.pawn_direction(),
            PieceKind::Knight => (adx == 1 && ady == 2) || (adx == 2 && ady == 1),
            PieceKind::Bishop => adx == ady && self.path_clear(from, to),
            PieceKind::Rook => (dx == 0 || dy == 0) && self.path_clear(from, to),
            PieceKind::Queen => (adx == ady || dx == 0 || dy == 0) && self.path_clear(from, to),
            PieceKind::King => adx <= 1 && ady <= 1,
        }
    }

    /// True if any piece of `by` attacks `cell`.
    #[must_use]
    pub fn is_attacked(&self, cell: Cell, by: Side) -> bool {
        self.pieces()
            .filter(|(_, p)| p.side == by)
            .any(|(from, _)| self.attacks(from, cell))
    }

    /// True if `side`'s king is attacked.
    #[must_use]
    pub fn in_check(&self, side: Side) -> bool {
        self.king(side)
            .is_some_and(|king| self.is_attacked(king, side.opponent()))
    }
}
