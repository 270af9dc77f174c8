//! Raw device events to game commands.
//!
//! ## Keyboard
//!
//! `bindings(kind, key)` gives the per-game key map. Keys not bound for the
//! active game produce no command.
//!
//! ## Pointer
//!
//! The surface has fixed logical dimensions but may be displayed at another
//! size. `SurfaceScale` converts client coordinates into surface coordinates
//! and then into grid cells.
//!
//! ## Touch
//!
//! `SwipeTracker` turns a touch start/end pair into a direction once the
//! gesture passes a minimum distance on its dominant axis.

use serde::{Deserialize, Serialize};

use super::command::{Command, Direction};
use crate::core::{Cell, Vec2};
use crate::games::GameKind;

/// Minimum swipe length in client pixels.
pub const MIN_SWIPE_DISTANCE: f64 = 30.0;

/// Keyboard keys the games listen to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    Other(char),
}

impl Key {
    /// Parse a DOM-style key name.
    #[must_use]
    pub fn from_name(name: &str) -> Key {
        match name {
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            " " | "Space" => Key::Space,
            other => Key::Other(other.chars().next().unwrap_or('\0')),
        }
    }

    /// Arrow keys map to directions.
    #[must_use]
    pub fn direction(self) -> Option<Direction> {
        match self {
            Key::ArrowUp => Some(Direction::Up),
            Key::ArrowDown => Some(Direction::Down),
            Key::ArrowLeft => Some(Direction::Left),
            Key::ArrowRight => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Key map for a game.
#[must_use]
pub fn bindings(kind: GameKind, key: Key) -> Option<Command> {
    match kind {
        GameKind::Snake | GameKind::CrossyRoad => key.direction().map(Command::Move),
        GameKind::Tetris => match key {
            Key::ArrowLeft => Some(Command::Move(Direction::Left)),
            Key::ArrowRight => Some(Command::Move(Direction::Right)),
            Key::ArrowDown => Some(Command::SoftDrop),
            Key::ArrowUp => Some(Command::Rotate),
            Key::Space => Some(Command::HardDrop),
            Key::Other(_) => None,
        },
        GameKind::Match3 | GameKind::Archery | GameKind::Checkers | GameKind::Chess => None,
    }
}

/// Displayed rectangle of the surface in client coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisplayRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Mapping between client coordinates and logical surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurfaceScale {
    pub surface_width: f64,
    pub surface_height: f64,
    pub display: DisplayRect,
}

impl SurfaceScale {
    /// Scale for a surface displayed at its natural size at the origin.
    #[must_use]
    pub fn identity(surface_width: f64, surface_height: f64) -> Self {
        Self {
            surface_width,
            surface_height,
            display: DisplayRect {
                left: 0.0,
                top: 0.0,
                width: surface_width,
                height: surface_height,
            },
        }
    }

    /// Surface displayed at another size or offset.
    #[must_use]
    pub fn with_display(mut self, display: DisplayRect) -> Self {
        self.display = display;
        self
    }

    /// Convert a client position to surface coordinates.
    #[must_use]
    pub fn to_surface(&self, client: Vec2) -> Vec2 {
        let sx = if self.display.width > 0.0 {
            self.surface_width / self.display.width
        } else {
            1.0
        };
        let sy = if self.display.height > 0.0 {
            self.surface_height / self.display.height
        } else {
            1.0
        };
        Vec2::new((client.x - self.display.left) * sx, (client.y - self.display.top) * sy)
    }

    /// Convert a client position to a grid cell of `cell_size` surface pixels.
    ///
    /// Returns `None` when the position falls outside the surface.
    #[must_use]
    pub fn to_cell(&self, client: Vec2, cell_size: f64) -> Option<Cell> {
        let p = self.to_surface(client);
        if p.x < 0.0 || p.y < 0.0 || p.x >= self.surface_width || p.y >= self.surface_height {
            return None;
        }
        Some(Cell::new((p.x / cell_size).floor() as i32, (p.y / cell_size).floor() as i32))
    }
}

/// Pointer phases shared by mouse and touch.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down(Vec2),
    Move(Vec2),
    Up(Vec2),
}

/// Tracks a touch gesture and reports the swipe direction on release.
#[derive(Clone, Copy, Debug, Default)]
pub struct SwipeTracker {
    start: Option<Vec2>,
}

impl SwipeTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, at: Vec2) {
        self.start = Some(at);
    }

    /// Finish the gesture. Short gestures produce nothing.
    pub fn end(&mut self, at: Vec2) -> Option<Direction> {
        let start = self.start.take()?;
        let dx = at.x - start.x;
        let dy = at.y - start.y;
        if dx.abs() < MIN_SWIPE_DISTANCE && dy.abs() < MIN_SWIPE_DISTANCE {
            return None;
        }
        if dx.abs() > dy.abs() {
            Some(if dx > 0.0 { Direction::Right } else { Direction::Left })
        } else {
            Some(if dy > 0.0 { Direction::Down } else { Direction::Up })
        }
    }
}
