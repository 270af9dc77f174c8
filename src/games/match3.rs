//! Match-3.
//!
//! Swap two adjacent candies to line up three or more of a kind. Every
//! resolution round:
//!
//! 1. Scan rows and columns for runs of three equal kinds
//! 2. Clear every matched cell at once, scoring each unique cell once
//! 3. Compact each column downward and refill the top with random candies
//!
//! Moved and new candies carry a negative vertical offset that animates
//! toward zero; logically they are already in place. Once everything has
//! settled the board is resolved again, which produces cascades.
//!
//! A swap that makes no match is reverted after a short delay. Input is
//! ignored while a revert is pending or candies are still falling.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::{Game, GameKind};
use crate::core::{Cell, Delay, FixedStep, GameRng, Grid, RunState, Score, Vec2};
use crate::input::{Command, PointerEvent, SurfaceScale};
use crate::render::{overlay, Color, Surface, Translate};

const CANDY_COLORS: [u32; 6] = [0xe74c3c, 0x3498db, 0x8b4513, 0xf1c40f, 0x9b59b6, 0xe67e22];

/// Match-3 configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Match3Config {
    /// Board edge in cells.
    pub size: usize,
    /// Number of candy kinds.
    pub kinds: u8,
    pub points_per_cell: u32,
    /// Cell edge in surface pixels.
    pub cell_size: f64,
    /// Falling speed in pixels per frame.
    pub fall_speed: f64,
    pub revert_delay_ms: f64,
}

impl Default for Match3Config {
    fn default() -> Self {
        Self {
            size: 8,
            kinds: 6,
            points_per_cell: 10,
            cell_size: 60.0,
            fall_speed: 15.0,
            revert_delay_ms: 200.0,
        }
    }
}

impl Match3Config {
    #[must_use]
    pub fn with_kinds(mut self, kinds: u8) -> Self {
        self.kinds = kinds;
        self
    }

    #[must_use]
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }
}

/// One candy on the board.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Candy {
    pub kind: u8,
    /// Drawing offset in pixels, negative while falling into place.
    pub y_offset: f64,
}

impl Candy {
    #[must_use]
    pub fn settled(kind: u8) -> Self {
        Self { kind, y_offset: 0.0 }
    }
}

/// Outcome of a cell selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    Ignored,
    Selected,
    /// Swap produced a match; this many cells were cleared.
    Matched(usize),
    /// Swap produced no match and will be reverted.
    Rejected,
}

/// A Match-3 session.
#[derive(Clone, Debug)]
pub struct Match3Game {
    config: Match3Config,
    rng: GameRng,
    grid: Grid<Candy>,
    selected: Option<Cell>,
    pending_revert: Option<(Cell, Cell)>,
    revert: Delay,
    frames: FixedStep,
    score: Score,
    state: RunState,
}

impl Match3Game {
    #[must_use]
    pub fn new(config: Match3Config, rng: GameRng) -> Self {
        let config = Match3Config {
            size: config.size.max(3),
            kinds: config.kinds.max(3),
            ..config
        };
        let mut game = Self {
            grid: Grid::new(config.size, config.size),
            config,
            rng,
            selected: None,
            pending_revert: None,
            revert: Delay::idle(),
            frames: FixedStep::per_frame(),
            score: Score::new(),
            state: RunState::Ready,
        };
        game.fill_without_runs();
        game
    }

    /// Session with a fixed board, given as rows of kinds.
    ///
    /// # Panics
    ///
    /// Panics if the rows do not form a square of at least 3x3.
    #[must_use]
    pub fn from_rows(config: Match3Config, rng: GameRng, rows: &[&[u8]]) -> Self {
        let size = rows.len();
        assert!(size >= 3 && rows.iter().all(|r| r.len() == size), "Board must be square and at least 3x3");
        let kinds = rows.iter().flat_map(|r| r.iter()).copied().max().unwrap_or(0) + 1;
        let config = Match3Config {
            size,
            kinds: config.kinds.max(kinds),
            ..config
        };
        let grid = Grid::from_fn(size, size, |cell| {
            Some(Candy::settled(rows[cell.y as usize][cell.x as usize]))
        });
        Self {
            grid,
            config,
            rng,
            selected: None,
            pending_revert: None,
            revert: Delay::idle(),
            frames: FixedStep::per_frame(),
            score: Score::new(),
            state: RunState::Ready,
        }
    }

    /// Random fill that avoids runs of three.
    fn fill_without_runs(&mut self) {
        let size = self.config.size as i32;
        self.grid.clear();
        for y in 0..size {
            for x in 0..size {
                let cell = Cell::new(x, y);
                let left = self.run_kind(cell.offset(-1, 0), cell.offset(-2, 0));
                let up = self.run_kind(cell.offset(0, -1), cell.offset(0, -2));
                let allowed: Vec<u8> = (0..self.config.kinds)
                    .filter(|k| Some(*k) != left && Some(*k) != up)
                    .collect();
                let kind = self.rng.choose(&allowed).copied().unwrap_or(0);
                self.grid.set(cell, Some(Candy::settled(kind)));
            }
        }
    }

    /// Kind shared by two cells, if both hold the same kind.
    fn run_kind(&self, a: Cell, b: Cell) -> Option<u8> {
        match (self.grid.get(a), self.grid.get(b)) {
            (Some(x), Some(y)) if x.kind == y.kind => Some(x.kind),
            _ => None,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn grid(&self) -> &Grid<Candy> {
        &self.grid
    }

    #[must_use]
    pub fn kind_at(&self, cell: Cell) -> Option<u8> {
        self.grid.get(cell).map(|c| c.kind)
    }

    #[must_use]
    pub fn selected(&self) -> Option<Cell> {
        self.selected
    }

    #[must_use]
    pub fn is_revert_pending(&self) -> bool {
        self.pending_revert.is_some()
    }

    /// True while any candy is still falling into place.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.grid.occupied().any(|(_, candy)| candy.y_offset < 0.0)
    }

    // === Resolution ===

    /// Every cell that is part of a horizontal or vertical run of three.
    #[must_use]
    pub fn matches(&self) -> FxHashSet<Cell> {
        let size = self.config.size as i32;
        let mut found = FxHashSet::default();
        let mut scan = |cells: [Cell; 3]| {
            let kinds = cells.map(|c| self.kind_at(c));
            if let [Some(a), Some(b), Some(c)] = kinds {
                if a == b && b == c {
                    found.extend(cells);
                }
            }
        };
        for y in 0..size {
            for x in 0..size - 2 {
                scan([Cell::new(x, y), Cell::new(x + 1, y), Cell::new(x + 2, y)]);
            }
        }
        for y in 0..size - 2 {
            for x in 0..size {
                scan([Cell::new(x, y), Cell::new(x, y + 1), Cell::new(x, y + 2)]);
            }
        }
        found
    }

    /// One resolution round. Returns the number of cells cleared; zero
    /// means the board is stable.
    pub fn resolve(&mut self) -> usize {
        let matched = self.matches();
        if matched.is_empty() {
            return 0;
        }

        self.score.add(matched.len() as u32 * self.config.points_per_cell);
        for cell in &matched {
            self.grid.set(*cell, None);
        }
        self.collapse();
        log::debug!("Match-3 cleared {} cells, score {}", matched.len(), self.score);
        matched.len()
    }

    /// Drop candies into vacancies and refill each column from the top.
    fn collapse(&mut self) {
        let size = self.config.size as i32;
        for x in 0..size {
            let mut empty = 0;
            for y in (0..size).rev() {
                let cell = Cell::new(x, y);
                match self.grid.take(cell) {
                    None => empty += 1,
                    Some(mut candy) => {
                        if empty > 0 {
                            candy.y_offset = -f64::from(empty) * self.config.cell_size;
                        }
                        self.grid.set(cell.offset(0, empty), Some(candy));
                    }
                }
            }
            for y in 0..empty {
                let kind = self.rng.gen_range_usize(0..self.config.kinds as usize) as u8;
                let y_offset = -(self.rng.gen_f64() * 200.0 + 100.0);
                self.grid.set(Cell::new(x, y), Some(Candy { kind, y_offset }));
            }
        }
    }

    /// Resolve repeatedly until stable, skipping the fall animation.
    /// Returns the number of rounds that cleared something.
    pub fn settle(&mut self) -> usize {
        let mut rounds = 0;
        loop {
            self.finish_falling();
            if self.resolve() == 0 {
                break;
            }
            rounds += 1;
        }
        if rounds > 0 {
            log::debug!("Match-3 settled after {} rounds", rounds);
        }
        rounds
    }

    fn finish_falling(&mut self) {
        let cells: Vec<Cell> = self.grid.occupied().map(|(cell, _)| cell).collect();
        for cell in cells {
            if let Some(candy) = self.grid.get_mut(cell) {
                candy.y_offset = 0.0;
            }
        }
    }

    fn fall_step(&mut self) {
        let speed = self.config.fall_speed;
        let cells: Vec<Cell> = self.grid.occupied().map(|(cell, _)| cell).collect();
        for cell in cells {
            if let Some(candy) = self.grid.get_mut(cell) {
                if candy.y_offset < 0.0 {
                    candy.y_offset = (candy.y_offset + speed).min(0.0);
                }
            }
        }
    }

    // === Input ===

    /// Click on a cell.
    pub fn select(&mut self, cell: Cell) -> SelectOutcome {
        if !self.state.is_running()
            || self.pending_revert.is_some()
            || self.is_animating()
            || !self.grid.in_bounds(cell)
        {
            return SelectOutcome::Ignored;
        }

        let Some(first) = self.selected else {
            self.selected = Some(cell);
            return SelectOutcome::Selected;
        };
        if !first.is_adjacent(cell) {
            self.selected = Some(cell);
            return SelectOutcome::Selected;
        }

        self.grid.swap(first, cell);
        let cleared = self.resolve();
        if cleared == 0 {
            log::debug!("Match-3 swap {} <-> {} rejected", first, cell);
            self.pending_revert = Some((first, cell));
            self.revert.arm(self.config.revert_delay_ms);
            SelectOutcome::Rejected
        } else {
            self.selected = None;
            SelectOutcome::Matched(cleared)
        }
    }

    fn cell_at(&self, pos: Vec2) -> Option<Cell> {
        let (w, h) = self.surface_size();
        SurfaceScale::identity(w, h)
            .to_cell(pos, self.config.cell_size)
            .filter(|cell| self.grid.in_bounds(*cell))
    }

    fn clear_round_state(&mut self) {
        self.selected = None;
        self.pending_revert = None;
        self.revert.cancel();
        self.frames.reset();
    }
}

impl Game for Match3Game {
    fn kind(&self) -> GameKind {
        GameKind::Match3
    }

    fn surface_size(&self) -> (f64, f64) {
        let edge = self.config.size as f64 * self.config.cell_size;
        (edge, edge)
    }

    fn run_state(&self) -> RunState {
        self.state
    }

    fn start(&mut self) {
        self.state = self.state.started();
        log::info!("Match-3 started");
    }

    fn toggle_pause(&mut self) {
        self.state = self.state.toggled();
    }

    fn reset(&mut self) {
        self.clear_round_state();
        self.score.reset();
        self.fill_without_runs();
        self.state = RunState::Ready;
    }

    fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::Select(cell) => self.select(cell) != SelectOutcome::Ignored,
            _ => false,
        }
    }

    fn pointer(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down(pos) => match self.cell_at(pos) {
                Some(cell) => self.select(cell) != SelectOutcome::Ignored,
                None => false,
            },
            _ => false,
        }
    }

    fn update(&mut self, dt_ms: f64) {
        if !self.state.is_running() {
            return;
        }

        if self.revert.tick(dt_ms) {
            if let Some((a, b)) = self.pending_revert.take() {
                self.grid.swap(a, b);
            }
            self.selected = None;
        }

        for _ in 0..self.frames.advance(dt_ms) {
            if self.is_animating() {
                self.fall_step();
            } else if self.pending_revert.is_none() {
                self.resolve();
            }
        }
    }

    fn score(&self) -> u32 {
        self.score.value()
    }

    fn render(&self, surface: &mut dyn Surface, text: &dyn Translate) {
        let cs = self.config.cell_size;
        surface.clear(Color::hex(0x2c3e50));

        for y in 0..self.config.size {
            for x in 0..self.config.size {
                let shade = if (x + y) % 2 == 0 {
                    Color::rgba(255, 255, 255, 13)
                } else {
                    Color::rgba(0, 0, 0, 13)
                };
                surface.fill_rect(x as f64 * cs, y as f64 * cs, cs, cs, shade);
            }
        }

        let radius = cs * 0.35;
        for (cell, candy) in self.grid.occupied() {
            let center = Vec2::new(
                f64::from(cell.x) * cs + cs / 2.0,
                f64::from(cell.y) * cs + cs / 2.0 + candy.y_offset,
            );
            let color = Color::hex(CANDY_COLORS[candy.kind as usize % CANDY_COLORS.len()]);
            surface.fill_circle(center, radius, color);
            if self.selected == Some(cell) {
                surface.stroke_circle(center, radius + 5.0, Color::WHITE, 4.0);
            }
        }

        overlay::score_line(surface, text, self.score.value());
        match self.state {
            RunState::Ready => overlay::banner(surface, &text.text("startGame")),
            RunState::Paused => overlay::banner(surface, &text.text("pauseGame").to_uppercase()),
            RunState::Running | RunState::Over => {}
        }
    }
}
