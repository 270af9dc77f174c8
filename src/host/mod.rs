//! Hosting layer: one active game at a time.
//!
//! `GameHost` stands in for the page that embeds the games. It mounts a
//! game by kind, translates device input into commands, drives the
//! simulation clock, and reports score changes to a caller-supplied sink.
//!
//! ## Lifecycle
//!
//! - `mount(kind)`: drop the current game (cancelling its timers) and build a
//!   fresh one from `ArcadeConfig` with its own fork of the host RNG
//! - `start` / `toggle_pause` / `reset`: the on-screen buttons
//! - `unmount`: drop the active game
//!
//! ## Scores
//!
//! After every call that can change a game, the host compares the game's
//! score with the last reported value and calls the sink on a change.
//! Games that name a high-score key have their best loaded from the
//! `ScoreStore` on mount and written back whenever it is beaten; store
//! faults are logged and play continues.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use arcade_engine::core::ArcadeConfig;
//! use arcade_engine::games::GameKind;
//! use arcade_engine::host::GameHost;
//!
//! let reported = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&reported);
//! let mut host = GameHost::new(ArcadeConfig::default())
//!     .with_score_sink(move |score| sink.borrow_mut().push(score));
//!
//! host.mount(GameKind::Snake);
//! host.start();
//! host.update(1000.0);
//! assert!(host.active().is_some());
//! ```

use crate::core::{ArcadeConfig, GameRng, RunState, Vec2};
use crate::games::archery::ArcheryGame;
use crate::games::checkers::CheckersGame;
use crate::games::chess::ChessGame;
use crate::games::crossy::CrossyGame;
use crate::games::match3::Match3Game;
use crate::games::snake::SnakeGame;
use crate::games::tetris::TetrisGame;
use crate::games::{Game, GameKind};
use crate::input::{bindings, Command, DisplayRect, Key, PointerEvent, SurfaceScale, SwipeTracker};
use crate::render::{Surface, Translate};
use crate::storage::{HighScore, MemoryStore, ScoreStore};

/// Callback receiving every new score value.
pub type ScoreSink = Box<dyn FnMut(u32)>;

/// Build a game of `kind` from its section of `config`.
#[must_use]
pub fn create_game(kind: GameKind, config: &ArcadeConfig, rng: GameRng) -> Box<dyn Game> {
    match kind {
        GameKind::Snake => Box::new(SnakeGame::new(config.snake.clone(), rng)),
        GameKind::Tetris => Box::new(TetrisGame::new(config.tetris.clone(), rng)),
        GameKind::Match3 => Box::new(Match3Game::new(config.match3.clone(), rng)),
        GameKind::CrossyRoad => Box::new(CrossyGame::new(config.crossy.clone(), rng)),
        GameKind::Archery => Box::new(ArcheryGame::new(config.archery.clone(), rng)),
        GameKind::Checkers => Box::new(CheckersGame::new(config.checkers.clone(), rng)),
        GameKind::Chess => Box::new(ChessGame::new(config.chess.clone(), rng)),
    }
}

/// Mounts one game at a time and routes input, time and scores.
pub struct GameHost {
    config: ArcadeConfig,
    rng: GameRng,
    store: Box<dyn ScoreStore>,
    sink: Option<ScoreSink>,
    active: Option<Box<dyn Game>>,
    high_score: Option<HighScore>,
    last_reported: u32,
    display: Option<DisplayRect>,
    scale: SurfaceScale,
    swipe: SwipeTracker,
}

impl GameHost {
    /// Host with an in-memory store and no score sink.
    #[must_use]
    pub fn new(config: ArcadeConfig) -> Self {
        let rng = GameRng::new(config.seed);
        Self {
            config,
            rng,
            store: Box::new(MemoryStore::new()),
            sink: None,
            active: None,
            high_score: None,
            last_reported: 0,
            display: None,
            scale: SurfaceScale::identity(1.0, 1.0),
            swipe: SwipeTracker::new(),
        }
    }

    #[must_use]
    pub fn with_store(mut self, store: Box<dyn ScoreStore>) -> Self {
        self.store = store;
        self
    }

    #[must_use]
    pub fn with_score_sink(mut self, sink: impl FnMut(u32) + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    #[must_use]
    pub fn config(&self) -> &ArcadeConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &dyn ScoreStore {
        self.store.as_ref()
    }

    /// Where the surface is displayed, in client coordinates.
    pub fn set_display(&mut self, display: DisplayRect) {
        self.display = Some(display);
        self.scale = self.scale.with_display(display);
    }

    // === Mounting ===

    /// Replace the active game with a fresh game of `kind`.
    pub fn mount(&mut self, kind: GameKind) {
        self.unmount();

        let mut game = create_game(kind, &self.config, self.rng.fork());
        self.high_score = game.high_score_key().map(|key| HighScore::load(key, self.store.as_ref()));
        if let Some(high) = &self.high_score {
            game.restore_high_score(high.best());
        }

        let (w, h) = game.surface_size();
        self.scale = SurfaceScale::identity(w, h);
        if let Some(display) = self.display {
            self.scale = self.scale.with_display(display);
        }
        self.swipe = SwipeTracker::new();
        self.last_reported = game.score();
        self.active = Some(game);
        log::info!("Mounted {}", kind);
    }

    /// Drop the active game, if any.
    pub fn unmount(&mut self) {
        if let Some(game) = self.active.take() {
            log::info!("Unmounted {}", game.kind());
        }
        self.high_score = None;
    }

    #[must_use]
    pub fn active(&self) -> Option<&dyn Game> {
        self.active.as_deref()
    }

    #[must_use]
    pub fn active_kind(&self) -> Option<GameKind> {
        self.active.as_ref().map(|g| g.kind())
    }

    #[must_use]
    pub fn run_state(&self) -> Option<RunState> {
        self.active.as_ref().map(|g| g.run_state())
    }

    /// Persisted best for the active game, if it keeps one.
    #[must_use]
    pub fn high_score(&self) -> Option<u32> {
        self.high_score.as_ref().map(HighScore::best)
    }

    // === Buttons ===

    pub fn start(&mut self) {
        if let Some(game) = self.active.as_mut() {
            game.start();
        }
        self.sync();
    }

    pub fn toggle_pause(&mut self) {
        if let Some(game) = self.active.as_mut() {
            game.toggle_pause();
        }
    }

    /// Reset the active game. Always reports a score of 0.
    pub fn reset(&mut self) {
        let Some(game) = self.active.as_mut() else {
            return;
        };
        game.reset();
        log::info!("Reset {}", game.kind());
        self.last_reported = game.score();
        if let Some(sink) = self.sink.as_mut() {
            sink(self.last_reported);
        }
    }

    // === Input ===

    /// Keyboard input through the active game's key map.
    pub fn key(&mut self, key: Key) -> bool {
        match self.active_kind().and_then(|kind| bindings(kind, key)) {
            Some(command) => self.command(command),
            None => false,
        }
    }

    /// Dispatch a command directly (on-screen buttons, tests).
    pub fn command(&mut self, command: Command) -> bool {
        let changed = self.active.as_mut().is_some_and(|game| game.handle(command));
        self.sync();
        changed
    }

    /// Pointer or touch event in client coordinates.
    ///
    /// Swipe-steered games turn a down/up pair into a move; the others get
    /// the event in surface coordinates.
    pub fn pointer(&mut self, event: PointerEvent) -> bool {
        let Some(kind) = self.active_kind() else {
            return false;
        };

        if kind.uses_swipe() {
            return match event {
                PointerEvent::Down(at) => {
                    self.swipe.begin(at);
                    false
                }
                PointerEvent::Move(_) => false,
                PointerEvent::Up(at) => match self.swipe.end(at) {
                    Some(dir) => self.command(Command::Move(dir)),
                    None => false,
                },
            };
        }

        let scaled = match event {
            PointerEvent::Down(at) => PointerEvent::Down(self.to_surface(at)),
            PointerEvent::Move(at) => PointerEvent::Move(self.to_surface(at)),
            PointerEvent::Up(at) => PointerEvent::Up(self.to_surface(at)),
        };
        let changed = self.active.as_mut().is_some_and(|game| game.pointer(scaled));
        self.sync();
        changed
    }

    fn to_surface(&self, client: Vec2) -> Vec2 {
        self.scale.to_surface(client)
    }

    // === Clock and drawing ===

    /// Advance the active game by `dt_ms`.
    pub fn update(&mut self, dt_ms: f64) {
        if let Some(game) = self.active.as_mut() {
            game.update(dt_ms);
        }
        self.sync();
    }

    /// Redraw the active game. A missing surface is a no-op.
    pub fn render(&self, surface: Option<&mut dyn Surface>, text: &dyn Translate) {
        if let (Some(surface), Some(game)) = (surface, self.active.as_ref()) {
            game.render(surface, text);
        }
    }

    /// Report a changed score and persist a beaten high score.
    fn sync(&mut self) {
        let Some(game) = self.active.as_mut() else {
            return;
        };
        let score = game.score();
        if score == self.last_reported {
            return;
        }
        self.last_reported = score;
        if let Some(sink) = self.sink.as_mut() {
            sink(score);
        }
        if let Some(high) = self.high_score.as_mut() {
            if high.submit(score, self.store.as_mut()) {
                game.restore_high_score(score);
            }
        }
    }
}

impl std::fmt::Debug for GameHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameHost")
            .field("active", &self.active_kind())
            .field("last_reported", &self.last_reported)
            .field("high_score", &self.high_score())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Direction;
    use crate::render::{Dictionary, RecordingSurface};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording_host() -> (GameHost, Rc<RefCell<Vec<u32>>>) {
        let reported = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&reported);
        let host = GameHost::new(ArcadeConfig::default()).with_score_sink(move |s| sink.borrow_mut().push(s));
        (host, reported)
    }

    #[test]
    fn test_mount_replaces_active_game() {
        let (mut host, _) = recording_host();
        assert_eq!(host.active_kind(), None);
        host.mount(GameKind::Snake);
        assert_eq!(host.active_kind(), Some(GameKind::Snake));
        host.mount(GameKind::Chess);
        assert_eq!(host.active_kind(), Some(GameKind::Chess));
        assert_eq!(host.high_score(), None);
        host.unmount();
        assert_eq!(host.active_kind(), None);
    }

    #[test]
    fn test_every_kind_mounts_ready() {
        let (mut host, _) = recording_host();
        for kind in GameKind::ALL {
            host.mount(kind);
            assert_eq!(host.run_state(), Some(RunState::Ready), "{}", kind);
        }
    }

    #[test]
    fn test_unbound_key_is_ignored() {
        let (mut host, _) = recording_host();
        host.mount(GameKind::Chess);
        host.start();
        assert!(!host.key(Key::ArrowUp));
    }

    #[test]
    fn test_swipe_steers_snake() {
        let (mut host, _) = recording_host();
        host.mount(GameKind::Snake);
        host.start();
        assert!(!host.pointer(PointerEvent::Down(Vec2::new(100.0, 100.0))));
        assert!(host.pointer(PointerEvent::Up(Vec2::new(100.0, 160.0))));
        assert!(!host.command(Command::Move(Direction::Left)), "reverse of current heading");
    }

    #[test]
    fn test_reset_reports_zero() {
        let (mut host, reported) = recording_host();
        host.mount(GameKind::Tetris);
        host.reset();
        assert_eq!(reported.borrow().as_slice(), &[0]);
    }

    #[test]
    fn test_render_without_surface_is_noop() {
        let (mut host, _) = recording_host();
        host.mount(GameKind::Match3);
        host.render(None, &Dictionary::english());

        let mut surface = RecordingSurface::new(480.0, 480.0);
        host.render(Some(&mut surface), &Dictionary::english());
        assert!(!surface.commands().is_empty());
    }
}
