//! Crossy Road.
//!
//! The player hops across horizontal lanes. Grass lanes are safe; road
//! lanes carry one or two cars moving in a shared direction that wrap
//! around the horizontal bounds. Touching a car ends the run.
//!
//! Hops obey a short cooldown. Reaching a new best row scores, and
//! reaching the top row levels up: the lanes are regenerated with faster
//! cars, a bonus is awarded and the player returns to the start row.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{Game, GameKind};
use crate::core::{Cell, Delay, FixedStep, GameRng, RunState, Score, Vec2};
use crate::input::{Command, Direction};
use crate::render::{overlay, Align, Color, Surface, Translate};

/// Lane height and column width in surface pixels.
pub const CELL_SIZE: f64 = 40.0;

const CAR_COLORS: [u32; 5] = [0xff4444, 0x4444ff, 0x44ff44, 0xffff44, 0xff44ff];

/// Crossy Road configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossyConfig {
    pub columns: usize,
    pub lanes: usize,
    /// Minimum time between hops.
    pub move_delay_ms: f64,
    /// Points for each new best row.
    pub step_points: u32,
    /// Points for reaching the top row.
    pub level_bonus: u32,
    /// Speed multiplier increase per level.
    pub speed_step: f64,
    /// Car length in cells.
    pub car_length: f64,
}

impl Default for CrossyConfig {
    fn default() -> Self {
        Self {
            columns: 15,
            lanes: 12,
            move_delay_ms: 150.0,
            step_points: 10,
            level_bonus: 100,
            speed_step: 0.25,
            car_length: 1.5,
        }
    }
}

impl CrossyConfig {
    #[must_use]
    pub fn with_move_delay(mut self, ms: f64) -> Self {
        self.move_delay_ms = ms;
        self
    }

    /// Cell the player starts from.
    #[must_use]
    pub fn start_cell(&self) -> Cell {
        Cell::new((self.columns / 2) as i32, self.lanes as i32 - 2)
    }
}

/// A car on a road lane. Positions and speeds are in cells.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Car {
    /// Left edge.
    pub x: f64,
    /// Signed cells per frame.
    pub speed: f64,
    pub color: Color,
}

impl Car {
    /// Advance one frame, wrapping past either edge.
    fn step(&mut self, columns: f64) {
        self.x += self.speed;
        if self.speed > 0.0 && self.x > columns + 2.0 {
            self.x = -2.0;
        } else if self.speed < 0.0 && self.x < -2.0 {
            self.x = columns + 2.0;
        }
    }
}

/// A horizontal lane.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Lane {
    Grass,
    Road { cars: SmallVec<[Car; 2]> },
}

impl Lane {
    #[must_use]
    pub fn is_road(&self) -> bool {
        matches!(self, Lane::Road { .. })
    }

    #[must_use]
    pub fn cars(&self) -> &[Car] {
        match self {
            Lane::Grass => &[],
            Lane::Road { cars } => cars,
        }
    }
}

/// A Crossy Road session.
#[derive(Clone, Debug)]
pub struct CrossyGame {
    config: CrossyConfig,
    rng: GameRng,
    lanes: Vec<Lane>,
    player: Cell,
    best_row: i32,
    level: u32,
    speed_multiplier: f64,
    cooldown: Delay,
    frames: FixedStep,
    score: Score,
    high_score: u32,
    state: RunState,
}

impl CrossyGame {
    #[must_use]
    pub fn new(config: CrossyConfig, rng: GameRng) -> Self {
        let config = CrossyConfig {
            columns: config.columns.max(3),
            lanes: config.lanes.max(6),
            ..config
        };
        let start = config.start_cell();
        let mut game = Self {
            config,
            rng,
            lanes: Vec::new(),
            player: start,
            best_row: start.y,
            level: 1,
            speed_multiplier: 1.0,
            cooldown: Delay::idle(),
            frames: FixedStep::per_frame(),
            score: Score::new(),
            high_score: 0,
            state: RunState::Ready,
        };
        game.lanes = game.generate_lanes();
        game
    }

    /// Session on a fixed lane layout. Missing lanes are grass.
    #[must_use]
    pub fn with_lanes(config: CrossyConfig, rng: GameRng, mut lanes: Vec<Lane>) -> Self {
        let mut game = Self::new(config, rng);
        lanes.resize(game.config.lanes, Lane::Grass);
        game.lanes = lanes;
        game
    }

    fn generate_lanes(&mut self) -> Vec<Lane> {
        let count = self.config.lanes;
        let columns = self.config.columns as f64;
        (0..count)
            .map(|i| {
                let road = i > 2 && i < count - 2 && self.rng.gen_f64() > 0.4;
                if !road {
                    return Lane::Grass;
                }
                let car_count = self.rng.gen_range_usize(1..3);
                let direction = if self.rng.gen_f64() > 0.5 { 1.0 } else { -1.0 };
                let cars = (0..car_count)
                    .map(|_| Car {
                        x: self.rng.gen_f64() * columns,
                        speed: (self.rng.gen_f64() * 0.02 + 0.01) * direction * self.speed_multiplier,
                        color: Color::hex(CAR_COLORS[self.rng.gen_range_usize(0..CAR_COLORS.len())]),
                    })
                    .collect();
                Lane::Road { cars }
            })
            .collect()
    }

    fn new_run(&mut self) {
        self.level = 1;
        self.speed_multiplier = 1.0;
        self.score.reset();
        self.player = self.config.start_cell();
        self.best_row = self.player.y;
        self.cooldown.cancel();
        self.frames.reset();
        self.lanes = self.generate_lanes();
    }

    // === Accessors ===

    #[must_use]
    pub fn player(&self) -> Cell {
        self.player
    }

    #[must_use]
    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    // === Simulation ===

    /// Hop one cell. Ignored while the cooldown runs or at the edges.
    pub fn hop(&mut self, dir: Direction) -> bool {
        if !self.state.is_running() || self.cooldown.is_armed() {
            return false;
        }
        let (dx, dy) = dir.delta();
        let target = self.player.offset(dx, dy);
        let inside = target.x >= 0
            && target.y >= 0
            && (target.x as usize) < self.config.columns
            && (target.y as usize) < self.config.lanes;
        if !inside {
            return false;
        }

        self.player = target;
        self.cooldown.arm(self.config.move_delay_ms);
        if target.y < self.best_row {
            self.best_row = target.y;
            self.score.add(self.config.step_points);
        }
        if target.y == 0 {
            self.level_up();
        }
        true
    }

    fn level_up(&mut self) {
        self.level += 1;
        self.speed_multiplier += self.config.speed_step;
        self.score.add(self.config.level_bonus);
        self.lanes = self.generate_lanes();
        self.player = self.config.start_cell();
        self.best_row = self.player.y;
        log::info!("Crossy Road level {} (speed x{:.2})", self.level, self.speed_multiplier);
    }

    /// True if a car overlaps the player's cell on the x axis.
    #[must_use]
    pub fn is_hit(&self) -> bool {
        let Some(lane) = self.lanes.get(self.player.y as usize) else {
            return false;
        };
        let left = f64::from(self.player.x);
        let right = left + 1.0;
        lane.cars()
            .iter()
            .any(|car| right > car.x && left < car.x + self.config.car_length)
    }

    /// Advance cars one frame and test for a hit.
    pub fn frame(&mut self) {
        if !self.state.is_running() {
            return;
        }
        let columns = self.config.columns as f64;
        for lane in &mut self.lanes {
            if let Lane::Road { cars } = lane {
                for car in cars.iter_mut() {
                    car.step(columns);
                }
            }
        }
        if self.is_hit() {
            self.state = RunState::Over;
            self.high_score = self.high_score.max(self.score.value());
            log::info!("Crossy Road over with score {} at level {}", self.score, self.level);
        }
    }

    fn draw_player(&self, surface: &mut dyn Surface) {
        let x = f64::from(self.player.x) * CELL_SIZE + CELL_SIZE / 2.0;
        let y = f64::from(self.player.y) * CELL_SIZE;
        surface.fill_circle(Vec2::new(x, y + CELL_SIZE / 2.0), CELL_SIZE / 3.0, Color::WHITE);
        surface.fill_circle(Vec2::new(x, y + CELL_SIZE / 3.0), CELL_SIZE / 4.0, Color::WHITE);
        surface.fill_rect(x, y + CELL_SIZE / 3.0 - 3.0, 8.0, 6.0, Color::hex(0xff9900));
        surface.fill_circle(Vec2::new(x - 5.0, y + CELL_SIZE / 3.0 - 3.0), 2.0, Color::BLACK);
        surface.fill_circle(Vec2::new(x + 5.0, y + CELL_SIZE / 3.0 - 3.0), 2.0, Color::BLACK);
        surface.fill_rect(x - 3.0, y + CELL_SIZE / 3.0 - 10.0, 2.0, 5.0, Color::hex(0xff0000));
        surface.fill_rect(x, y + CELL_SIZE / 3.0 - 12.0, 2.0, 7.0, Color::hex(0xff0000));
        surface.fill_rect(x + 3.0, y + CELL_SIZE / 3.0 - 10.0, 2.0, 5.0, Color::hex(0xff0000));
    }
}

impl Game for CrossyGame {
    fn kind(&self) -> GameKind {
        GameKind::CrossyRoad
    }

    fn surface_size(&self) -> (f64, f64) {
        (
            self.config.columns as f64 * CELL_SIZE,
            self.config.lanes as f64 * CELL_SIZE,
        )
    }

    fn run_state(&self) -> RunState {
        self.state
    }

    fn start(&mut self) {
        match self.state {
            RunState::Over => {
                self.new_run();
                self.state = RunState::Running;
            }
            other => self.state = other.started(),
        }
        log::info!("Crossy Road started");
    }

    fn toggle_pause(&mut self) {
        self.state = self.state.toggled();
    }

    fn reset(&mut self) {
        self.new_run();
        self.state = RunState::Ready;
    }

    fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::Move(dir) => self.hop(dir),
            _ => false,
        }
    }

    fn update(&mut self, dt_ms: f64) {
        if !self.state.is_running() {
            return;
        }
        self.cooldown.tick(dt_ms);
        for _ in 0..self.frames.advance(dt_ms) {
            self.frame();
            if !self.state.is_running() {
                break;
            }
        }
    }

    fn score(&self) -> u32 {
        self.score.value()
    }

    fn render(&self, surface: &mut dyn Surface, text: &dyn Translate) {
        let (w, h) = self.surface_size();
        surface.clear(Color::BLACK);

        for (i, lane) in self.lanes.iter().enumerate() {
            let y = i as f64 * CELL_SIZE;
            match lane {
                Lane::Grass => surface.fill_rect(0.0, y, w, CELL_SIZE, Color::hex(0x4a7c59)),
                Lane::Road { cars } => {
                    surface.fill_rect(0.0, y, w, CELL_SIZE, Color::hex(0x333333));
                    let mid = y + CELL_SIZE / 2.0;
                    surface.line(Vec2::new(0.0, mid), Vec2::new(w, mid), Color::hex(0xffff00), 2.0, &[10.0, 10.0]);
                    for car in cars {
                        let cx = car.x * CELL_SIZE;
                        let cw = CELL_SIZE * self.config.car_length;
                        let ch = CELL_SIZE - 10.0;
                        surface.fill_rect(cx, y + 5.0, cw, ch, car.color);
                        surface.fill_rect(cx + 5.0, y + 10.0, cw - 10.0, ch - 10.0, Color::hex(0x222222));
                        let window_x = if car.speed > 0.0 { cx + cw - 15.0 } else { cx + 7.0 };
                        surface.fill_rect(window_x, y + 12.0, 8.0, ch - 14.0, Color::hex(0x88ccff));
                    }
                }
            }
        }

        self.draw_player(surface);

        overlay::score_line(surface, text, self.score.value());
        surface.text(
            Vec2::new(w - 12.0, 22.0),
            &format!("{}: {}", text.text("level"), self.level),
            Color::WHITE,
            16.0,
            Align::Right,
        );

        match self.state {
            RunState::Ready => {
                overlay::banner(surface, &text.text("startGame"));
                if self.high_score > 0 {
                    surface.text(
                        Vec2::new(w / 2.0, h / 2.0 + 40.0),
                        &format!("{}: {}", text.text("highScore"), self.high_score),
                        Color::WHITE,
                        14.0,
                        Align::Center,
                    );
                }
            }
            RunState::Over => overlay::game_over(
                surface,
                text,
                &text.text("gameOver"),
                self.score.value(),
                Some(self.high_score),
            ),
            RunState::Paused => overlay::banner(surface, &text.text("paused")),
            RunState::Running => {}
        }
    }

    fn high_score(&self) -> Option<u32> {
        Some(self.high_score)
    }
}
