//! Discrete game commands.
//!
//! Keyboard, mouse, touch, and on-screen buttons are all translated into the
//! same `Command` set before reaching a game.

use serde::{Deserialize, Serialize};

use crate::core::{Cell, Vec2};

/// Cardinal direction on a grid. Up is toward row 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Unit grid offset `(dx, dy)`.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    #[must_use]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// A game command.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Steer or step in a direction (Snake, Crossy Road, Tetris left/right).
    Move(Direction),
    /// Rotate the falling piece clockwise (Tetris).
    Rotate,
    /// Drop one row immediately (Tetris).
    SoftDrop,
    /// Drop to the floor and lock (Tetris).
    HardDrop,
    /// Click/tap on a board cell (Match-3, Checkers, Chess).
    Select(Cell),
    /// Pointer pressed at a surface position (Archery aim start).
    AimStart(Vec2),
    /// Pointer dragged to a surface position.
    AimMove(Vec2),
    /// Pointer released (Archery fire).
    AimRelease,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposites() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            let (dx, dy) = dir.delta();
            let (ox, oy) = dir.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }
}
