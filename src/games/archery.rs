//! Bow-and-arrow target shooting.
//!
//! Drag from near the bow to aim; releasing fires an arrow with velocity
//! proportional to the drag, pointing away from the drag direction. Arrows
//! follow ballistic paths under constant gravity. Round targets drift
//! vertically and bounce off the top and bottom edges. A hit removes both
//! arrow and target and scores.
//!
//! There is no terminal state; the session runs until reset.

use serde::{Deserialize, Serialize};

use super::{Game, GameKind};
use crate::core::{Delay, FixedStep, GameRng, RunState, Score, Vec2};
use crate::input::{Command, PointerEvent};
use crate::render::{overlay, Color, Surface, Translate};

const TARGET_COLORS: [u32; 4] = [0xff5722, 0xe91e63, 0x9c27b0, 0x2196f3];

/// Archery configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcheryConfig {
    pub width: f64,
    pub height: f64,
    /// Arrow launch point.
    pub bow: Vec2,
    /// Added to arrow vertical speed every frame.
    pub gravity: f64,
    pub spawn_interval_ms: f64,
    /// Spawning pauses while this many targets are on the field.
    pub max_targets: usize,
    /// Aiming must start within this distance of the bow.
    pub grab_radius: f64,
    /// Drag length to launch speed factor.
    pub power_scale: f64,
    /// Launch speeds at or below this are discarded.
    pub min_power: f64,
    pub hit_points: u32,
}

impl Default for ArcheryConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 500.0,
            bow: Vec2::new(100.0, 300.0),
            gravity: 0.5,
            spawn_interval_ms: 1500.0,
            max_targets: 8,
            grab_radius: 150.0,
            power_scale: 0.15,
            min_power: 2.0,
            hit_points: 10,
        }
    }
}

impl ArcheryConfig {
    #[must_use]
    pub fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    #[must_use]
    pub fn with_spawn_interval(mut self, ms: f64) -> Self {
        self.spawn_interval_ms = ms;
        self
    }

    #[must_use]
    pub fn with_max_targets(mut self, max: usize) -> Self {
        self.max_targets = max;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    pub pos: Vec2,
    /// Pixels per frame.
    pub vel: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub pos: Vec2,
    pub radius: f64,
    /// Vertical pixels per frame.
    pub speed_y: f64,
    pub color: Color,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Aim {
    start: Vec2,
    current: Vec2,
}

/// An archery session.
#[derive(Clone, Debug)]
pub struct ArcheryGame {
    config: ArcheryConfig,
    rng: GameRng,
    arrows: Vec<Arrow>,
    targets: Vec<Target>,
    aim: Option<Aim>,
    spawn: Delay,
    frames: FixedStep,
    score: Score,
    state: RunState,
}

impl ArcheryGame {
    #[must_use]
    pub fn new(config: ArcheryConfig, rng: GameRng) -> Self {
        Self {
            config,
            rng,
            arrows: Vec::new(),
            targets: Vec::new(),
            aim: None,
            spawn: Delay::idle(),
            frames: FixedStep::per_frame(),
            score: Score::new(),
            state: RunState::Ready,
        }
    }

    #[must_use]
    pub fn arrows(&self) -> &[Arrow] {
        &self.arrows
    }

    #[must_use]
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    #[must_use]
    pub fn is_aiming(&self) -> bool {
        self.aim.is_some()
    }

    /// Place a target directly.
    pub fn add_target(&mut self, target: Target) {
        self.targets.push(target);
    }

    fn spawn_target(&mut self) {
        let (w, h) = (self.config.width, self.config.height);
        let radius = 20.0 + self.rng.gen_f64() * 20.0;
        let x = w - 50.0 - self.rng.gen_f64() * 100.0;
        let y = h - 100.0 - self.rng.gen_f64() * (h - 200.0);
        let speed_y = (self.rng.gen_f64() - 0.5) * 2.0;
        let color = Color::hex(TARGET_COLORS[self.rng.gen_range_usize(0..TARGET_COLORS.len())]);
        self.targets.push(Target {
            pos: Vec2::new(x, y),
            radius,
            speed_y,
            color,
        });
    }

    // === Aiming ===

    /// Begin a drag. Only accepted near the bow.
    pub fn aim_start(&mut self, at: Vec2) -> bool {
        if !self.state.is_running() || at.distance(self.config.bow) >= self.config.grab_radius {
            return false;
        }
        self.aim = Some(Aim { start: at, current: at });
        true
    }

    pub fn aim_move(&mut self, at: Vec2) -> bool {
        match &mut self.aim {
            Some(aim) => {
                aim.current = at;
                true
            }
            None => false,
        }
    }

    /// Launch velocity for the current drag.
    #[must_use]
    pub fn launch_velocity(&self) -> Option<Vec2> {
        self.aim.map(|aim| (aim.start - aim.current) * self.config.power_scale)
    }

    /// Finish the drag. Fires if the pull was strong enough.
    pub fn release(&mut self) -> bool {
        let Some(vel) = self.launch_velocity() else {
            return false;
        };
        self.aim = None;
        if !self.state.is_running() || vel.length() <= self.config.min_power {
            return false;
        }
        self.arrows.push(Arrow {
            pos: self.config.bow,
            vel,
        });
        true
    }

    // === Simulation ===

    /// Advance one frame.
    pub fn frame(&mut self) {
        if !self.state.is_running() {
            return;
        }
        let (w, h) = (self.config.width, self.config.height);

        if self.spawn.tick(crate::core::FRAME_MS) {
            if self.targets.len() < self.config.max_targets {
                self.spawn_target();
            }
            self.spawn.arm(self.config.spawn_interval_ms);
        }

        let gravity = self.config.gravity;
        self.arrows.retain_mut(|arrow| {
            arrow.pos = arrow.pos + arrow.vel;
            arrow.vel.y += gravity;
            arrow.pos.x <= w && arrow.pos.y <= h
        });

        for target in &mut self.targets {
            target.pos.y += target.speed_y;
            if target.pos.y < target.radius || target.pos.y > h - target.radius {
                target.speed_y = -target.speed_y;
            }
        }

        let mut hits = 0;
        let targets = &mut self.targets;
        self.arrows.retain(|arrow| {
            match targets.iter().position(|t| arrow.pos.distance(t.pos) < t.radius) {
                Some(i) => {
                    targets.remove(i);
                    hits += 1;
                    false
                }
                None => true,
            }
        });
        if hits > 0 {
            self.score.add(hits * self.config.hit_points);
        }
    }

    fn clear_field(&mut self) {
        self.arrows.clear();
        self.targets.clear();
        self.aim = None;
        self.spawn.cancel();
        self.frames.reset();
        self.score.reset();
    }
}

impl Game for ArcheryGame {
    fn kind(&self) -> GameKind {
        GameKind::Archery
    }

    fn surface_size(&self) -> (f64, f64) {
        (self.config.width, self.config.height)
    }

    fn run_state(&self) -> RunState {
        self.state
    }

    fn start(&mut self) {
        if self.state == RunState::Ready {
            self.clear_field();
            // First target appears on the first frame.
            self.spawn.arm(0.0);
        }
        self.state = self.state.started();
        log::info!("Archery started");
    }

    fn toggle_pause(&mut self) {
        self.state = self.state.toggled();
        self.aim = None;
    }

    fn reset(&mut self) {
        self.clear_field();
        self.state = RunState::Ready;
    }

    fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::AimStart(at) => self.aim_start(at),
            Command::AimMove(at) => self.aim_move(at),
            Command::AimRelease => self.release(),
            _ => false,
        }
    }

    fn pointer(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down(at) => self.aim_start(at),
            PointerEvent::Move(at) => self.aim_move(at),
            PointerEvent::Up(_) => self.release(),
        }
    }

    fn update(&mut self, dt_ms: f64) {
        if !self.state.is_running() {
            return;
        }
        for _ in 0..self.frames.advance(dt_ms) {
            self.frame();
        }
    }

    fn score(&self) -> u32 {
        self.score.value()
    }

    fn render(&self, surface: &mut dyn Surface, text: &dyn Translate) {
        let (w, h) = (self.config.width, self.config.height);
        let bow = self.config.bow;
        surface.clear(Color::hex(0x87ceeb));
        surface.fill_rect(0.0, h - 20.0, w, 20.0, Color::hex(0x4caf50));

        surface.stroke_circle(bow, 40.0, Color::hex(0x795548), 5.0);
        surface.line(
            Vec2::new(bow.x, bow.y - 40.0),
            Vec2::new(bow.x, bow.y + 40.0),
            Color::hex(0xdddddd),
            1.0,
            &[],
        );

        if let Some(aim) = self.aim {
            let pull = aim.start - aim.current;
            surface.line(bow, bow + pull, Color::rgba(255, 0, 0, 128), 2.0, &[5.0, 5.0]);
        }

        let ink = Color::hex(0x333333);
        for arrow in &self.arrows {
            surface.fill_circle(arrow.pos, 5.0, ink);
            let speed = arrow.vel.length();
            if speed > 0.0 {
                let tail = arrow.pos - arrow.vel * (20.0 / speed);
                surface.line(arrow.pos, tail, ink, 2.0, &[]);
            }
        }

        for target in &self.targets {
            surface.fill_circle(target.pos, target.radius, target.color);
            surface.stroke_circle(target.pos, target.radius, Color::WHITE, 2.0);
            surface.fill_circle(target.pos, target.radius * 0.6, Color::WHITE);
            surface.fill_circle(target.pos, target.radius * 0.3, target.color);
        }

        overlay::score_line(surface, text, self.score.value());
        match self.state {
            RunState::Ready => overlay::banner(surface, &text.text("startGame")),
            RunState::Paused => overlay::banner(surface, &text.text("paused")),
            RunState::Running | RunState::Over => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running() -> ArcheryGame {
        let mut game = ArcheryGame::new(ArcheryConfig::default(), GameRng::new(11));
        game.start();
        game
    }

    #[test]
    fn test_first_frame_spawns_target() {
        let mut game = running();
        game.frame();
        assert_eq!(game.targets().len(), 1);
        let t = game.targets()[0];
        assert!((20.0..40.0).contains(&t.radius));
        assert!((650.0..=750.0).contains(&t.pos.x));
        let spawn_y = t.pos.y - t.speed_y;
        assert!((100.0..=400.0).contains(&spawn_y));
        assert!((-1.0..1.0).contains(&t.speed_y));
    }

    #[test]
    fn test_spawn_interval() {
        let mut game = running();
        game.update(1000.0);
        assert_eq!(game.targets().len(), 1);
        game.update(600.0);
        assert_eq!(game.targets().len(), 2);
    }

    #[test]
    fn test_live_targets_are_capped() {
        let mut game = ArcheryGame::new(ArcheryConfig::default().with_max_targets(3), GameRng::new(11));
        game.start();
        for _ in 0..60 {
            game.update(1000.0);
        }
        assert_eq!(game.targets().len(), 3);

        // A hit frees a slot for the next spawn.
        game.targets.pop();
        game.update(2000.0);
        assert_eq!(game.targets().len(), 3);
    }

    #[test]
    fn test_aim_must_start_near_bow() {
        let mut game = running();
        assert!(!game.aim_start(Vec2::new(400.0, 300.0)));
        assert!(game.aim_start(Vec2::new(120.0, 310.0)));
        assert!(game.is_aiming());
    }

    #[test]
    fn test_release_velocity_is_inverted_drag() {
        let mut game = running();
        game.aim_start(Vec2::new(100.0, 300.0));
        game.aim_move(Vec2::new(50.0, 340.0));
        assert!(game.release());
        let arrow = game.arrows()[0];
        assert_eq!(arrow.pos, Vec2::new(100.0, 300.0));
        assert!((arrow.vel.x - 7.5).abs() < 1e-9);
        assert!((arrow.vel.y + 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_weak_pull_does_not_fire() {
        let mut game = running();
        game.aim_start(Vec2::new(100.0, 300.0));
        game.aim_move(Vec2::new(90.0, 300.0));
        assert!(!game.release());
        assert!(game.arrows().is_empty());
        assert!(!game.is_aiming());
    }

    #[test]
    fn test_gravity_applied_after_move() {
        let mut game = running();
        game.spawn.arm(1e9);
        game.arrows.push(Arrow {
            pos: Vec2::new(100.0, 100.0),
            vel: Vec2::new(10.0, 0.0),
        });
        game.frame();
        assert_eq!(game.arrows()[0].pos, Vec2::new(110.0, 100.0));
        assert_eq!(game.arrows()[0].vel.y, 0.5);
        game.frame();
        assert_eq!(game.arrows()[0].pos, Vec2::new(120.0, 100.5));
    }

    #[test]
    fn test_arrow_leaving_field_is_dropped() {
        let mut game = running();
        game.spawn.arm(1e9);
        game.arrows.push(Arrow {
            pos: Vec2::new(795.0, 100.0),
            vel: Vec2::new(10.0, 0.0),
        });
        game.frame();
        assert!(game.arrows().is_empty());
    }

    #[test]
    fn test_hit_removes_both_and_scores() {
        let mut game = running();
        game.spawn.arm(1e9);
        game.add_target(Target {
            pos: Vec2::new(210.0, 100.0),
            radius: 20.0,
            speed_y: 0.0,
            color: Color::WHITE,
        });
        game.arrows.push(Arrow {
            pos: Vec2::new(200.0, 100.0),
            vel: Vec2::new(5.0, 0.0),
        });
        game.frame();
        assert!(game.arrows().is_empty());
        assert!(game.targets().is_empty());
        assert_eq!(game.score(), 10);
    }

    #[test]
    fn test_targets_bounce() {
        let mut game = running();
        game.spawn.arm(1e9);
        game.add_target(Target {
            pos: Vec2::new(700.0, 20.5),
            radius: 20.0,
            speed_y: -1.0,
            color: Color::WHITE,
        });
        game.frame();
        assert_eq!(game.targets()[0].speed_y, 1.0);
    }

    #[test]
    fn test_reset_clears_field() {
        let mut game = running();
        game.update(100.0);
        game.reset();
        assert!(game.targets().is_empty());
        assert_eq!(game.run_state(), RunState::Ready);
    }
}
