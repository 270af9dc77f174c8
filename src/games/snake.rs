//! Snake.
//!
//! The snake moves one cell per tick at a difficulty-dependent cadence.
//! Steering is latched into a pending heading and applied at the next tick;
//! a direct reversal of the current heading is refused.
//!
//! ## Tick
//!
//! 1. Latch the pending heading
//! 2. Wall collision ends the game
//! 3. Collision with any current segment (tail included) ends the game
//! 4. Push the new head; on food add points and place new food, otherwise
//!    pop the tail
//!
//! Food is drawn uniformly from the vacant cells, so it never lands on the
//! body. A board with no vacant cell left ends the game.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::{Game, GameKind};
use crate::core::{Cell, FixedStep, GameRng, RunState, Score};
use crate::input::{Command, Direction};
use crate::render::{overlay, Align, Color, Surface, Translate};

/// Cell edge in surface pixels.
pub const CELL_SIZE: f64 = 20.0;

/// Most ticks one `update` may catch up after a stalled frame.
pub const MAX_CATCH_UP_TICKS: u32 = 2;

/// Storage key for the persisted best score.
pub const HIGH_SCORE_KEY: &str = "snakeHighScore";

/// Movement cadence presets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Milliseconds between ticks.
    #[must_use]
    pub fn interval_ms(self) -> f64 {
        match self {
            Difficulty::Easy => 200.0,
            Difficulty::Medium => 130.0,
            Difficulty::Hard => 80.0,
        }
    }
}

/// Snake configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeConfig {
    /// Board width in cells.
    pub width: usize,
    /// Board height in cells.
    pub height: usize,
    pub difficulty: Difficulty,
    /// Points per food eaten.
    pub food_points: u32,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            width: 30,
            height: 20,
            difficulty: Difficulty::Medium,
            food_points: 10,
        }
    }
}

impl SnakeConfig {
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    #[must_use]
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// What a single tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Moved,
    Ate,
    Crashed,
    /// The game is not in a state that ticks.
    Idle,
}

/// A Snake session.
#[derive(Clone, Debug)]
pub struct SnakeGame {
    config: SnakeConfig,
    rng: GameRng,
    body: VecDeque<Cell>,
    heading: Direction,
    pending: Direction,
    food: Option<Cell>,
    score: Score,
    high_score: u32,
    state: RunState,
    cadence: FixedStep,
}

impl SnakeGame {
    /// Create a session. The board is at least 11x11 cells so the starting
    /// body fits.
    #[must_use]
    pub fn new(config: SnakeConfig, rng: GameRng) -> Self {
        let config = SnakeConfig {
            width: config.width.max(11),
            height: config.height.max(11),
            ..config
        };
        let cadence = FixedStep::new(config.difficulty.interval_ms()).with_max_steps(MAX_CATCH_UP_TICKS);
        let mut game = Self {
            config,
            rng,
            body: VecDeque::new(),
            heading: Direction::Right,
            pending: Direction::Right,
            food: None,
            score: Score::new(),
            high_score: 0,
            state: RunState::Ready,
            cadence,
        };
        game.reset_board();
        game
    }

    fn reset_board(&mut self) {
        self.body = VecDeque::from(vec![Cell::new(10, 10), Cell::new(9, 10), Cell::new(8, 10)]);
        self.heading = Direction::Right;
        self.pending = Direction::Right;
        self.score.reset();
        self.cadence = FixedStep::new(self.config.difficulty.interval_ms()).with_max_steps(MAX_CATCH_UP_TICKS);
        self.food = self.random_food();
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &SnakeConfig {
        &self.config
    }

    /// Segments from head to tail.
    pub fn body(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    #[must_use]
    pub fn head(&self) -> Cell {
        self.body.front().copied().unwrap_or_default()
    }

    #[must_use]
    pub fn heading(&self) -> Direction {
        self.heading
    }

    #[must_use]
    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    /// Put the food at a specific cell. Rejected if the cell is off the
    /// board or under the body.
    pub fn set_food(&mut self, cell: Cell) -> bool {
        if !self.in_bounds(cell) || self.body.contains(&cell) {
            return false;
        }
        self.food = Some(cell);
        true
    }

    /// Change the movement cadence. Takes effect from the next update.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.config.difficulty = difficulty;
        self.cadence.set_period(difficulty.interval_ms());
    }

    // === Simulation ===

    fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < self.config.width && (cell.y as usize) < self.config.height
    }

    /// Uniform choice among cells not covered by the body.
    fn random_food(&mut self) -> Option<Cell> {
        let occupied: FxHashSet<Cell> = self.body.iter().copied().collect();
        let vacant: Vec<Cell> = (0..self.config.height as i32)
            .flat_map(|y| (0..self.config.width as i32).map(move |x| Cell::new(x, y)))
            .filter(|cell| !occupied.contains(cell))
            .collect();
        self.rng.choose(&vacant).copied()
    }

    /// Latch a new heading for the next tick.
    ///
    /// Ignored unless running, and when `dir` reverses the current heading.
    pub fn steer(&mut self, dir: Direction) -> bool {
        if !self.state.is_running() || dir == self.heading.opposite() {
            return false;
        }
        self.pending = dir;
        true
    }

    /// Advance one cell.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.is_running() {
            return TickOutcome::Idle;
        }

        self.heading = self.pending;
        let (dx, dy) = self.heading.delta();
        let head = self.head().offset(dx, dy);

        if !self.in_bounds(head) || self.body.contains(&head) {
            self.game_over();
            return TickOutcome::Crashed;
        }

        self.body.push_front(head);
        if self.food == Some(head) {
            self.score.add(self.config.food_points);
            self.high_score = self.high_score.max(self.score.value());
            self.food = self.random_food();
            log::debug!("Snake ate at {}, length {}", head, self.body.len());
            if self.food.is_none() {
                self.game_over();
            }
            TickOutcome::Ate
        } else {
            self.body.pop_back();
            TickOutcome::Moved
        }
    }

    fn game_over(&mut self) {
        self.state = RunState::Over;
        log::info!("Snake over with score {}", self.score);
    }

    fn draw_eyes(&self, surface: &mut dyn Surface, x: f64, y: f64) {
        let eyes = match self.heading {
            Direction::Right => [(12.0, 5.0), (12.0, 12.0)],
            Direction::Left => [(4.0, 5.0), (4.0, 12.0)],
            Direction::Up => [(5.0, 4.0), (12.0, 4.0)],
            Direction::Down => [(5.0, 12.0), (12.0, 12.0)],
        };
        for (ex, ey) in eyes {
            surface.fill_rect(x + ex, y + ey, 4.0, 4.0, Color::WHITE);
        }
    }
}

impl Game for SnakeGame {
    fn kind(&self) -> GameKind {
        GameKind::Snake
    }

    fn surface_size(&self) -> (f64, f64) {
        (
            self.config.width as f64 * CELL_SIZE,
            self.config.height as f64 * CELL_SIZE,
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
        log::info!("Snake started at {:?}", self.config.difficulty);
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
            Command::Move(dir) => self.steer(dir),
            _ => false,
        }
    }

    fn update(&mut self, dt_ms: f64) {
        if !self.state.is_running() {
            return;
        }
        for _ in 0..self.cadence.advance(dt_ms) {
            if self.tick() == TickOutcome::Crashed || !self.state.is_running() {
                break;
            }
        }
    }

    fn score(&self) -> u32 {
        self.score.value()
    }

    fn render(&self, surface: &mut dyn Surface, text: &dyn Translate) {
        let (w, h) = self.surface_size();
        surface.clear(Color::hex(0x1a1a1a));

        let grid = Color::hex(0x333333);
        for x in 0..=self.config.width {
            let px = x as f64 * CELL_SIZE;
            surface.line((px, 0.0).into(), (px, h).into(), grid, 0.5, &[]);
        }
        for y in 0..=self.config.height {
            let py = y as f64 * CELL_SIZE;
            surface.line((0.0, py).into(), (w, py).into(), grid, 0.5, &[]);
        }

        if let Some(food) = self.food {
            let center = (
                food.x as f64 * CELL_SIZE + CELL_SIZE / 2.0,
                food.y as f64 * CELL_SIZE + CELL_SIZE / 2.0,
            );
            surface.fill_circle(center.into(), CELL_SIZE / 2.0 - 2.0, Color::hex(0xff5722));
        }

        for (i, segment) in self.body.iter().enumerate() {
            let x = segment.x as f64 * CELL_SIZE;
            let y = segment.y as f64 * CELL_SIZE;
            let color = if i == 0 { Color::hex(0x4caf50) } else { Color::hex(0x8bc34a) };
            surface.fill_rect(x + 1.0, y + 1.0, CELL_SIZE - 2.0, CELL_SIZE - 2.0, color);
            if i == 0 {
                self.draw_eyes(surface, x, y);
            }
        }

        overlay::score_line(surface, text, self.score.value());
        match self.state {
            RunState::Over => overlay::game_over(
                surface,
                text,
                &text.text("gameOver"),
                self.score.value(),
                Some(self.high_score),
            ),
            RunState::Paused => overlay::banner(surface, &text.text("paused")),
            RunState::Ready => {
                surface.text((w / 2.0, h - 20.0).into(), &text.text("startGame"), Color::GREY, 16.0, Align::Center)
            }
            RunState::Running => {}
        }
    }

    fn high_score_key(&self) -> Option<&'static str> {
        Some(HIGH_SCORE_KEY)
    }

    fn restore_high_score(&mut self, best: u32) {
        self.high_score = self.high_score.max(best);
    }

    fn high_score(&self) -> Option<u32> {
        Some(self.high_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Dictionary, RecordingSurface};

    fn running(seed: u64) -> SnakeGame {
        let mut game = SnakeGame::new(SnakeConfig::default(), GameRng::new(seed));
        game.start();
        game
    }

    #[test]
    fn test_initial_layout() {
        let game = SnakeGame::new(SnakeConfig::default(), GameRng::new(42));
        let body: Vec<_> = game.body().collect();
        assert_eq!(body, vec![Cell::new(10, 10), Cell::new(9, 10), Cell::new(8, 10)]);
        assert_eq!(game.heading(), Direction::Right);
        assert_eq!(game.run_state(), RunState::Ready);
        assert!(game.food().is_some());
    }

    #[test]
    fn test_eat_grows_and_scores() {
        let mut game = running(42);
        assert!(game.set_food(Cell::new(11, 10)));
        assert_eq!(game.tick(), TickOutcome::Ate);
        assert_eq!(game.head(), Cell::new(11, 10));
        assert_eq!(game.score(), 10);
        assert_eq!(game.len(), 4);
    }

    #[test]
    fn test_plain_move_keeps_length() {
        let mut game = running(42);
        game.set_food(Cell::new(0, 0));
        assert_eq!(game.tick(), TickOutcome::Moved);
        assert_eq!(game.len(), 3);
        assert_eq!(game.head(), Cell::new(11, 10));
    }

    #[test]
    fn test_reverse_is_refused() {
        let mut game = running(1);
        assert!(!game.steer(Direction::Left));
        assert!(game.steer(Direction::Up));
        game.set_food(Cell::new(0, 0));
        game.tick();
        assert_eq!(game.head(), Cell::new(10, 9));
        // Reversal is judged against the latched heading.
        assert!(!game.steer(Direction::Down));
    }

    #[test]
    fn test_steering_ignored_unless_running() {
        let mut game = SnakeGame::new(SnakeConfig::default(), GameRng::new(1));
        assert!(!game.steer(Direction::Up));
        game.start();
        game.toggle_pause();
        assert!(!game.steer(Direction::Up));
        game.toggle_pause();
        assert!(game.steer(Direction::Up));
    }

    #[test]
    fn test_wall_collision_ends_game() {
        let mut game = running(3);
        game.set_food(Cell::new(0, 0));
        let mut outcome = TickOutcome::Moved;
        for _ in 0..30 {
            outcome = game.tick();
            if outcome != TickOutcome::Moved {
                break;
            }
        }
        assert_eq!(outcome, TickOutcome::Crashed);
        assert!(game.run_state().is_over());
        assert_eq!(game.head(), Cell::new(29, 10));
        assert_eq!(game.tick(), TickOutcome::Idle);
    }

    #[test]
    fn test_self_collision_includes_tail() {
        let mut game = running(5);
        game.set_food(Cell::new(11, 10));
        game.tick();
        // Curl back onto the cell the tail still occupies.
        game.set_food(Cell::new(0, 0));
        game.steer(Direction::Up);
        game.tick();
        game.steer(Direction::Left);
        game.tick();
        game.steer(Direction::Down);
        assert_eq!(game.tick(), TickOutcome::Crashed);
    }

    #[test]
    fn test_update_uses_cadence() {
        let mut game = running(9);
        game.set_food(Cell::new(0, 0));
        game.update(129.0);
        assert_eq!(game.head(), Cell::new(10, 10));
        game.update(1.0);
        assert_eq!(game.head(), Cell::new(11, 10));

        game.set_difficulty(Difficulty::Hard);
        game.update(160.0);
        assert_eq!(game.head(), Cell::new(13, 10));
    }

    #[test]
    fn test_stalled_frame_catches_up_a_few_ticks() {
        let mut game = running(9);
        game.set_food(Cell::new(0, 0));
        game.update(10_000.0);
        assert_eq!(game.run_state(), RunState::Running);
        assert_eq!(game.head(), Cell::new(10 + MAX_CATCH_UP_TICKS as i32, 10));
    }

    #[test]
    fn test_start_after_over_restarts() {
        let mut game = running(2);
        game.set_food(Cell::new(0, 0));
        while game.tick() != TickOutcome::Crashed {}
        game.start();
        assert_eq!(game.run_state(), RunState::Running);
        assert_eq!(game.head(), Cell::new(10, 10));
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_game_over_overlay_shows_high_score() {
        let mut game = running(2);
        game.restore_high_score(250);
        game.set_food(Cell::new(0, 0));
        while game.tick() != TickOutcome::Crashed {}

        let mut surface = RecordingSurface::new(600.0, 400.0);
        game.render(&mut surface, &Dictionary::english());
        assert!(surface.contains_text("Game Over"));
        assert!(surface.contains_text("High Score: 250"));
    }

    #[test]
    fn test_board_full_ends_game() {
        let config = SnakeConfig::default().with_size(11, 11);
        let mut game = SnakeGame::new(config, GameRng::new(4));
        game.start();
        // Fill every cell except the one in front of the head.
        game.body = (0..11)
            .flat_map(|y| (0..11).map(move |x| Cell::new(x, y)))
            .filter(|c| *c != Cell::new(10, 10))
            .collect();
        game.body.retain(|c| *c != Cell::new(9, 10));
        game.body.push_front(Cell::new(9, 10));
        game.heading = Direction::Right;
        game.pending = Direction::Right;
        game.food = Some(Cell::new(10, 10));

        assert_eq!(game.tick(), TickOutcome::Ate);
        assert!(game.run_state().is_over());
        assert_eq!(game.food(), None);
    }
}
