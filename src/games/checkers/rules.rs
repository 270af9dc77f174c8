//! Checkers position and move generation.
//!
//! Men step and capture one square diagonally forward. Kings fly: they slide
//! any distance along a diagonal and capture by passing exactly one opposing
//! piece to land on any vacant square beyond it. A piece that can capture is
//! offered only its captures. Each capture is a single move; chains are not
//! continued.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Cell, Grid};
use crate::rules::{GameResult, RulesEngine};

/// Squares per side.
pub const BOARD_SIZE: i32 = 8;

/// Rows of men each side starts with.
const HOME_ROWS: i32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Moves toward row 0.
    Red,
    /// Moves toward row 7.
    White,
}

impl Side {
    #[must_use]
    pub fn opponent(self) -> Side {
        match self {
            Side::Red => Side::White,
            Side::White => Side::Red,
        }
    }

    /// Row delta of a forward step.
    #[must_use]
    pub fn forward(self) -> i32 {
        match self {
            Side::Red => -1,
            Side::White => 1,
        }
    }

    /// Row on which a man is crowned.
    #[must_use]
    pub fn crown_row(self) -> i32 {
        match self {
            Side::Red => 0,
            Side::White => BOARD_SIZE - 1,
        }
    }

    /// Translation key of the side's name.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Side::Red => "red",
            Side::White => "white",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Checker {
    pub side: Side,
    pub king: bool,
}

impl Checker {
    #[must_use]
    pub const fn man(side: Side) -> Self {
        Self { side, king: false }
    }

    #[must_use]
    pub const fn king(side: Side) -> Self {
        Self { side, king: true }
    }
}

/// One move, with the square of the piece it captures if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CheckersMove {
    pub from: Cell,
    pub to: Cell,
    pub captured: Option<Cell>,
}

impl CheckersMove {
    #[must_use]
    pub fn is_jump(&self) -> bool {
        self.captured.is_some()
    }
}

pub type PieceMoves = SmallVec<[CheckersMove; 4]>;

/// A checkers position and the side to move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckersBoard {
    squares: Grid<Checker>,
    turn: Side,
}

impl Default for CheckersBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckersBoard {
    /// Standard opening: White on rows 0..3, Red on rows 5..8, dark squares
    /// only. Red moves first.
    #[must_use]
    pub fn new() -> Self {
        let size = BOARD_SIZE as usize;
        let squares = Grid::from_fn(size, size, |cell| {
            if !is_dark(cell) {
                None
            } else if cell.row() < HOME_ROWS {
                Some(Checker::man(Side::White))
            } else if cell.row() >= BOARD_SIZE - HOME_ROWS {
                Some(Checker::man(Side::Red))
            } else {
                None
            }
        });
        Self {
            squares,
            turn: Side::Red,
        }
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
    pub fn place(&mut self, cell: Cell, checker: Checker) -> bool {
        self.squares.set(cell, Some(checker))
    }

    #[must_use]
    pub fn checker_at(&self, cell: Cell) -> Option<Checker> {
        self.squares.get(cell).copied()
    }

    pub fn pieces(&self) -> impl Iterator<Item = (Cell, Checker)> + '_ {
        self.squares.occupied().map(|(cell, checker)| (cell, *checker))
    }

    /// Number of pieces `side` has on the board.
    #[must_use]
    pub fn count(&self, side: Side) -> usize {
        self.pieces().filter(|(_, c)| c.side == side).count()
    }

    /// Moves for the piece on `from`; only its captures if it has any.
    #[must_use]
    pub fn moves_from(&self, from: Cell) -> PieceMoves {
        let Some(piece) = self.checker_at(from) else {
            return PieceMoves::new();
        };

        let forward = [piece.side.forward()];
        let rows: &[i32] = if piece.king { &[-1, 1] } else { &forward };
        let reach = if piece.king { BOARD_SIZE } else { 1 };

        let mut steps = PieceMoves::new();
        let mut jumps = PieceMoves::new();
        for &dy in rows {
            for dx in [-1, 1] {
                self.scan(from, piece.side, (dx, dy), reach, &mut steps, &mut jumps);
            }
        }

        if jumps.is_empty() {
            steps
        } else {
            jumps
        }
    }

    /// Walk one diagonal: vacant squares within `reach` are steps; the first
    /// opposing piece met may be jumped onto vacant squares within `reach`
    /// beyond it.
    fn scan(
        &self,
        from: Cell,
        side: Side,
        (dx, dy): (i32, i32),
        reach: i32,
        steps: &mut PieceMoves,
        jumps: &mut PieceMoves,
    ) {
        let mut cursor = from.offset(dx, dy);
        let mut travelled = 0;
        while travelled < reach && self.squares.is_vacant(cursor) {
            steps.push(CheckersMove {
                from,
                to: cursor,
                captured: None,
            });
            cursor = cursor.offset(dx, dy);
            travelled += 1;
        }
        if travelled == reach {
            return;
        }

        match self.checker_at(cursor) {
            Some(blocker) if blocker.side != side => {
                let mut landing = cursor.offset(dx, dy);
                let mut landed = 0;
                while landed < reach && self.squares.is_vacant(landing) {
                    jumps.push(CheckersMove {
                        from,
                        to: landing,
                        captured: Some(cursor),
                    });
                    landing = landing.offset(dx, dy);
                    landed += 1;
                }
            }
            _ => {}
        }
    }

    /// True if any piece of `side` can capture.
    #[must_use]
    pub fn has_capture(&self, side: Side) -> bool {
        self.pieces()
            .filter(|(_, c)| c.side == side)
            .any(|(cell, _)| self.moves_from(cell).iter().any(CheckersMove::is_jump))
    }
}

/// Pieces only ever stand on dark squares.
#[must_use]
pub fn is_dark(cell: Cell) -> bool {
    (cell.row() + cell.col()) % 2 == 1
}

impl RulesEngine for CheckersBoard {
    type Side = Side;
    type Move = CheckersMove;

    fn side_to_move(&self) -> Side {
        self.turn
    }

    fn legal_moves(&self, side: Side) -> Vec<CheckersMove> {
        self.pieces()
            .filter(|(_, c)| c.side == side)
            .flat_map(|(cell, _)| self.moves_from(cell))
            .collect()
    }

    fn is_capture(&self, mv: &CheckersMove) -> bool {
        mv.is_jump()
    }

    fn apply_move(&mut self, mv: &CheckersMove) {
        if let Some(mut piece) = self.squares.take(mv.from) {
            if let Some(captured) = mv.captured {
                self.squares.set(captured, None);
            }
            if mv.to.row() == piece.side.crown_row() {
                piece.king = true;
            }
            self.squares.set(mv.to, Some(piece));
        }
        self.turn = self.turn.opponent();
    }

    fn is_terminal(&self) -> Option<GameResult<Side>> {
        for side in [Side::Red, Side::White] {
            if self.count(side) == 0 {
                return Some(GameResult::Winner(side.opponent()));
            }
        }
        if self.current_moves().is_empty() {
            return Some(GameResult::Winner(self.turn.opponent()));
        }
        None
    }
}
