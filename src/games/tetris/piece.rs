//! Tetrominoes, shape matrices and piece sources.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Cell, GameRng};
use crate::render::Color;

/// The seven tetrominoes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TetrominoKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl TetrominoKind {
    pub const ALL: [TetrominoKind; 7] = [
        TetrominoKind::I,
        TetrominoKind::O,
        TetrominoKind::T,
        TetrominoKind::S,
        TetrominoKind::Z,
        TetrominoKind::J,
        TetrominoKind::L,
    ];

    /// Spawn orientation.
    #[must_use]
    pub fn shape(self) -> Shape {
        let rows: &[&[u8]] = match self {
            TetrominoKind::I => &[&[1, 1, 1, 1]],
            TetrominoKind::O => &[&[1, 1], &[1, 1]],
            TetrominoKind::T => &[&[0, 1, 0], &[1, 1, 1]],
            TetrominoKind::S => &[&[0, 1, 1], &[1, 1, 0]],
            TetrominoKind::Z => &[&[1, 1, 0], &[0, 1, 1]],
            TetrominoKind::J => &[&[1, 0, 0], &[1, 1, 1]],
            TetrominoKind::L => &[&[0, 0, 1], &[1, 1, 1]],
        };
        Shape::from_rows(rows)
    }

    #[must_use]
    pub fn color(self) -> Color {
        match self {
            TetrominoKind::I => Color::hex(0x00f0f0),
            TetrominoKind::O => Color::hex(0xf0f000),
            TetrominoKind::T => Color::hex(0xa000f0),
            TetrominoKind::S => Color::hex(0x00f000),
            TetrominoKind::Z => Color::hex(0xf00000),
            TetrominoKind::J => Color::hex(0x0000f0),
            TetrominoKind::L => Color::hex(0xf0a000),
        }
    }
}

/// Boolean shape matrix, row-major.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    rows: usize,
    cols: usize,
    cells: SmallVec<[bool; 16]>,
}

impl Shape {
    /// Build from rows of 0/1 values. All rows must have the same length.
    ///
    /// # Panics
    ///
    /// Panics on an empty matrix or ragged rows.
    #[must_use]
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        assert!(!rows.is_empty() && !rows[0].is_empty(), "Shape must not be empty");
        let cols = rows[0].len();
        assert!(rows.iter().all(|r| r.len() == cols), "Shape rows must have equal length");
        Self {
            rows: rows.len(),
            cols,
            cells: rows.iter().flat_map(|r| r.iter().map(|&v| v != 0)).collect(),
        }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.cells[row * self.cols + col]
    }

    /// Offsets `(dx, dy)` of the filled cells.
    pub fn filled(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, on)| **on)
            .map(move |(i, _)| ((i % cols) as i32, (i / cols) as i32))
    }

    /// Clockwise quarter turn: transpose, then reverse each row.
    #[must_use]
    pub fn rotated(&self) -> Shape {
        let rows = self.cols;
        let cols = self.rows;
        let mut cells = SmallVec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                cells.push(self.cells[(self.rows - 1 - j) * self.cols + i]);
            }
        }
        Shape { rows, cols, cells }
    }
}

/// The falling piece: a shape anchored at a board cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub kind: TetrominoKind,
    pub shape: Shape,
    /// Board cell of the shape's top-left corner.
    pub pos: Cell,
}

impl Piece {
    /// Piece in spawn position: horizontally centred, top row.
    #[must_use]
    pub fn spawn(kind: TetrominoKind, board_width: usize) -> Self {
        let shape = kind.shape();
        let x = (board_width / 2) as i32 - (shape.cols() / 2) as i32;
        Self {
            kind,
            shape,
            pos: Cell::new(x, 0),
        }
    }

    /// Board cells covered by the piece.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.shape.filled().map(move |(dx, dy)| self.pos.offset(dx, dy))
    }
}

/// Supplies the sequence of tetrominoes.
pub trait PieceSource: std::fmt::Debug {
    fn next_kind(&mut self) -> TetrominoKind;
}

/// Uniform random pieces.
#[derive(Clone, Debug)]
pub struct RandomPieces {
    rng: GameRng,
}

impl RandomPieces {
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }
}

impl PieceSource for RandomPieces {
    fn next_kind(&mut self) -> TetrominoKind {
        TetrominoKind::ALL[self.rng.gen_range_usize(0..TetrominoKind::ALL.len())]
    }
}

/// Fixed sequence, repeated forever.
#[derive(Clone, Debug)]
pub struct SequencePieces {
    kinds: Vec<TetrominoKind>,
    index: usize,
}

impl SequencePieces {
    /// # Panics
    ///
    /// Panics if `kinds` is empty.
    #[must_use]
    pub fn new(kinds: Vec<TetrominoKind>) -> Self {
        assert!(!kinds.is_empty(), "Piece sequence must not be empty");
        Self { kinds, index: 0 }
    }
}

impl PieceSource for SequencePieces {
    fn next_kind(&mut self) -> TetrominoKind {
        let kind = self.kinds[self.index];
        self.index = (self.index + 1) % self.kinds.len();
        kind
    }
}
