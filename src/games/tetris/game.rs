//! Tetris session: board, falling piece, gravity and scoring.

use serde::{Deserialize, Serialize};

use super::piece::{Piece, PieceSource, RandomPieces, TetrominoKind};
use crate::core::{Cell, GameRng, Grid, RunState, Score};
use crate::games::{Game, GameKind};
use crate::input::{Command, Direction};
use crate::render::{overlay, Align, Color, Surface, Translate};

/// Block edge in surface pixels.
pub const BLOCK_SIZE: f64 = 24.0;

/// Width of the side panel holding the next piece and counters.
pub const PANEL_WIDTH: f64 = 120.0;

/// Points per simultaneous line count, before the level multiplier.
pub const LINE_POINTS: [u32; 5] = [0, 40, 100, 300, 1200];

/// Tetris configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TetrisConfig {
    pub width: usize,
    pub height: usize,
    /// Gravity interval at level 1. Level `n` drops every `base / n` ms.
    pub base_interval_ms: f64,
    pub lines_per_level: u32,
}

impl Default for TetrisConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 20,
            base_interval_ms: 1000.0,
            lines_per_level: 10,
        }
    }
}

impl TetrisConfig {
    #[must_use]
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_base_interval(mut self, ms: f64) -> Self {
        self.base_interval_ms = ms;
        self
    }
}

/// Result of a one-row drop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    /// The piece moved down a row.
    Fell,
    /// The piece locked in place and cleared this many lines.
    Locked { lines: u32 },
    /// Nothing to drop.
    Idle,
}

/// A Tetris session.
#[derive(Debug)]
pub struct TetrisGame {
    config: TetrisConfig,
    source: Box<dyn PieceSource>,
    board: Grid<TetrominoKind>,
    current: Option<Piece>,
    next: TetrominoKind,
    score: Score,
    lines: u32,
    level: u32,
    drop_counter_ms: f64,
    state: RunState,
}

impl TetrisGame {
    /// Session with uniformly random pieces.
    #[must_use]
    pub fn new(config: TetrisConfig, rng: GameRng) -> Self {
        Self::with_source(config, Box::new(RandomPieces::new(rng)))
    }

    /// Session drawing pieces from `source`.
    #[must_use]
    pub fn with_source(config: TetrisConfig, mut source: Box<dyn PieceSource>) -> Self {
        let config = TetrisConfig {
            width: config.width.max(4),
            height: config.height.max(4),
            lines_per_level: config.lines_per_level.max(1),
            base_interval_ms: if config.base_interval_ms > 0.0 {
                config.base_interval_ms
            } else {
                TetrisConfig::default().base_interval_ms
            },
        };
        let next = source.next_kind();
        let mut game = Self {
            board: Grid::new(config.width, config.height),
            config,
            source,
            current: None,
            next,
            score: Score::new(),
            lines: 0,
            level: 1,
            drop_counter_ms: 0.0,
            state: RunState::Ready,
        };
        game.spawn();
        game
    }

    fn reset_board(&mut self) {
        self.board.clear();
        self.score.reset();
        self.lines = 0;
        self.level = 1;
        self.drop_counter_ms = 0.0;
        self.next = self.source.next_kind();
        self.spawn();
    }

    // === Accessors ===

    #[must_use]
    pub fn board(&self) -> &Grid<TetrominoKind> {
        &self.board
    }

    #[must_use]
    pub fn current(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    /// The piece in the lookahead slot.
    #[must_use]
    pub fn next_kind(&self) -> TetrominoKind {
        self.next
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Gravity interval at the current level.
    #[must_use]
    pub fn drop_interval_ms(&self) -> f64 {
        self.config.base_interval_ms / f64::from(self.level)
    }

    // === Piece Movement ===

    fn collides(&self, piece: &Piece) -> bool {
        piece
            .cells()
            .any(|cell| !self.board.in_bounds(cell) || self.board.is_occupied(cell))
    }

    /// Take the lookahead piece and refill the slot. Ends the game when
    /// the new piece overlaps settled blocks.
    fn spawn(&mut self) {
        let kind = self.next;
        self.next = self.source.next_kind();
        let piece = Piece::spawn(kind, self.config.width);
        let blocked = self.collides(&piece);
        self.current = Some(piece);
        if blocked {
            self.state = RunState::Over;
            log::info!("Tetris over with score {} at level {}", self.score, self.level);
        }
    }

    /// Try a candidate position for the current piece; keep it only if it
    /// fits.
    fn try_replace(&mut self, candidate: Piece) -> bool {
        if self.collides(&candidate) {
            return false;
        }
        self.current = Some(candidate);
        true
    }

    /// Shift the piece one column. Rejected on collision.
    pub fn shift(&mut self, dx: i32) -> bool {
        if !self.state.is_running() {
            return false;
        }
        let Some(mut candidate) = self.current.clone() else {
            return false;
        };
        candidate.pos = candidate.pos.offset(dx, 0);
        self.try_replace(candidate)
    }

    /// Rotate clockwise. A rotation that would collide or leave the board
    /// keeps the original shape.
    pub fn rotate(&mut self) -> bool {
        if !self.state.is_running() {
            return false;
        }
        let Some(mut candidate) = self.current.clone() else {
            return false;
        };
        candidate.shape = candidate.shape.rotated();
        self.try_replace(candidate)
    }

    /// Drop one row, locking the piece if it cannot fall.
    pub fn soft_drop(&mut self) -> DropOutcome {
        if !self.state.is_running() {
            return DropOutcome::Idle;
        }
        let Some(mut candidate) = self.current.clone() else {
            return DropOutcome::Idle;
        };
        self.drop_counter_ms = 0.0;

        candidate.pos = candidate.pos.offset(0, 1);
        if self.try_replace(candidate) {
            DropOutcome::Fell
        } else {
            DropOutcome::Locked { lines: self.lock() }
        }
    }

    /// Drop to the lowest free position and lock. Returns lines cleared.
    pub fn hard_drop(&mut self) -> Option<u32> {
        if !self.state.is_running() {
            return None;
        }
        let mut piece = self.current.clone()?;
        loop {
            let mut candidate = piece.clone();
            candidate.pos = candidate.pos.offset(0, 1);
            if self.collides(&candidate) {
                break;
            }
            piece = candidate;
        }
        self.current = Some(piece);
        self.drop_counter_ms = 0.0;
        Some(self.lock())
    }

    /// Merge the current piece, clear lines and spawn the next piece.
    fn lock(&mut self) -> u32 {
        if let Some(piece) = self.current.take() {
            for cell in piece.cells() {
                self.board.set(cell, Some(piece.kind));
            }
        }
        let cleared = self.clear_lines();
        self.spawn();
        cleared
    }

    /// Remove every full row, scoring with the level in force before the
    /// clear.
    fn clear_lines(&mut self) -> u32 {
        let mut cleared = 0u32;
        let mut y = self.config.height;
        while y > 0 {
            if self.board.is_row_full(y - 1) {
                self.board.remove_row_shift_down(y - 1);
                cleared += 1;
            } else {
                y -= 1;
            }
        }

        if cleared > 0 {
            let base = LINE_POINTS.get(cleared as usize).copied().unwrap_or(LINE_POINTS[4]);
            self.score.add(base * self.level);
            self.lines += cleared;
            let level = self.lines / self.config.lines_per_level + 1;
            log::debug!("Cleared {} lines, total {}", cleared, self.lines);
            if level != self.level {
                log::info!("Tetris level {}", level);
            }
            self.level = level;
        }
        cleared
    }

    // === Rendering ===

    fn draw_block(surface: &mut dyn Surface, x: f64, y: f64, color: Color) {
        surface.fill_rect(x + 1.0, y + 1.0, BLOCK_SIZE - 2.0, BLOCK_SIZE - 2.0, color);
        surface.stroke_rect(x + 2.0, y + 2.0, BLOCK_SIZE - 4.0, BLOCK_SIZE - 4.0, color, 2.0);
    }

    fn draw_panel(&self, surface: &mut dyn Surface, text: &dyn Translate) {
        let left = self.config.width as f64 * BLOCK_SIZE;
        let (_, h) = self.surface_size();
        surface.fill_rect(left, 0.0, PANEL_WIDTH, h, Color::hex(0x111111));

        let x = left + 10.0;
        surface.text((x, 24.0).into(), &text.text("next"), Color::WHITE, 16.0, Align::Left);
        let preview = self.next.shape();
        for (dx, dy) in preview.filled() {
            let bx = x + f64::from(dx) * BLOCK_SIZE;
            let by = 40.0 + f64::from(dy) * BLOCK_SIZE;
            Self::draw_block(surface, bx, by, self.next.color());
        }

        let counters = [
            ("score", self.score.value()),
            ("level", self.level),
            ("lines", self.lines),
        ];
        for (i, (key, value)) in counters.iter().enumerate() {
            let y = 160.0 + i as f64 * 40.0;
            surface.text((x, y).into(), &format!("{}: {}", text.text(key), value), Color::WHITE, 14.0, Align::Left);
        }
    }
}

impl Game for TetrisGame {
    fn kind(&self) -> GameKind {
        GameKind::Tetris
    }

    fn surface_size(&self) -> (f64, f64) {
        (
            self.config.width as f64 * BLOCK_SIZE + PANEL_WIDTH,
            self.config.height as f64 * BLOCK_SIZE,
        )
    }

    fn run_state(&self) -> RunState {
        self.state
    }

    fn start(&mut self) {
        if self.state.is_over() {
            self.reset_board();
            self.state = RunState::Ready;
        }
        self.state = self.state.started();
        log::info!("Tetris started");
    }

    fn toggle_pause(&mut self) {
        self.state = self.state.toggled();
    }

    fn reset(&mut self) {
        self.reset_board();
        self.state = RunState::Ready;
    }

    fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::Move(Direction::Left) => self.shift(-1),
            Command::Move(Direction::Right) => self.shift(1),
            Command::Move(Direction::Down) | Command::SoftDrop => self.soft_drop() != DropOutcome::Idle,
            Command::Move(Direction::Up) | Command::Rotate => self.rotate(),
            Command::HardDrop => self.hard_drop().is_some(),
            _ => false,
        }
    }

    fn update(&mut self, dt_ms: f64) {
        if !self.state.is_running() || dt_ms.is_nan() || dt_ms <= 0.0 {
            return;
        }
        self.drop_counter_ms += dt_ms;
        if self.drop_counter_ms > self.drop_interval_ms() {
            self.soft_drop();
        }
    }

    fn score(&self) -> u32 {
        self.score.value()
    }

    fn render(&self, surface: &mut dyn Surface, text: &dyn Translate) {
        let board_w = self.config.width as f64 * BLOCK_SIZE;
        let board_h = self.config.height as f64 * BLOCK_SIZE;
        surface.clear(Color::BLACK);

        let grid = Color::hex(0x222222);
        for x in 0..=self.config.width {
            let px = x as f64 * BLOCK_SIZE;
            surface.line((px, 0.0).into(), (px, board_h).into(), grid, 0.5, &[]);
        }
        for y in 0..=self.config.height {
            let py = y as f64 * BLOCK_SIZE;
            surface.line((0.0, py).into(), (board_w, py).into(), grid, 0.5, &[]);
        }

        for (cell, kind) in self.board.occupied() {
            Self::draw_block(
                surface,
                f64::from(cell.x) * BLOCK_SIZE,
                f64::from(cell.y) * BLOCK_SIZE,
                kind.color(),
            );
        }
        if let Some(piece) = &self.current {
            for Cell { x, y } in piece.cells() {
                Self::draw_block(surface, f64::from(x) * BLOCK_SIZE, f64::from(y) * BLOCK_SIZE, piece.kind.color());
            }
        }

        self.draw_panel(surface, text);

        match self.state {
            RunState::Over => overlay::game_over(surface, text, &text.text("gameOver"), self.score.value(), None),
            RunState::Paused => overlay::banner(surface, &text.text("paused")),
            RunState::Ready | RunState::Running => {}
        }
    }
}
