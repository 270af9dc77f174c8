//! Interactive chess session with an optional automated side.

use serde::{Deserialize, Serialize};

use super::board::{ChessBoard, Side, BOARD_SIZE};
use super::rules::{ChessMove, ChessOutcome};
use crate::core::{Cell, Delay, GameRng, RunState, Score};
use crate::games::{Game, GameKind};
use crate::input::{Command, PointerEvent, SurfaceScale};
use crate::render::{overlay, Align, Color, Surface, Translate};
use crate::rules::{CapturePreferring, OpponentPolicy, RulesEngine};

/// Pixel size of one square.
pub const SQUARE_SIZE: f64 = 60.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChessConfig {
    /// Side played by the computer. `None` for two humans at one board.
    pub opponent: Option<Side>,
    pub opponent_delay_ms: f64,
}

impl Default for ChessConfig {
    fn default() -> Self {
        Self {
            opponent: Some(Side::Black),
            opponent_delay_ms: 500.0,
        }
    }
}

impl ChessConfig {
    #[must_use]
    pub fn with_opponent(mut self, opponent: Option<Side>) -> Self {
        self.opponent = opponent;
        self
    }

    #[must_use]
    pub fn with_opponent_delay(mut self, ms: f64) -> Self {
        self.opponent_delay_ms = ms;
        self
    }
}

/// A chess game.
#[derive(Clone, Debug)]
pub struct ChessGame {
    config: ChessConfig,
    rng: GameRng,
    board: ChessBoard,
    selected: Option<Cell>,
    opponent: Delay,
    captures: Score,
    outcome: Option<ChessOutcome>,
    state: RunState,
}

impl ChessGame {
    #[must_use]
    pub fn new(config: ChessConfig, rng: GameRng) -> Self {
        Self::with_board(config, rng, ChessBoard::new())
    }

    /// Start from an arbitrary position.
    #[must_use]
    pub fn with_board(config: ChessConfig, rng: GameRng, board: ChessBoard) -> Self {
        Self {
            config,
            rng,
            board,
            selected: None,
            opponent: Delay::idle(),
            captures: Score::new(),
            outcome: None,
            state: RunState::Ready,
        }
    }

    #[must_use]
    pub fn board(&self) -> &ChessBoard {
        &self.board
    }

    #[must_use]
    pub fn selected(&self) -> Option<Cell> {
        self.selected
    }

    #[must_use]
    pub fn outcome(&self) -> Option<ChessOutcome> {
        self.outcome
    }

    #[must_use]
    pub fn is_opponent_thinking(&self) -> bool {
        self.opponent.is_armed()
    }

    fn is_automated(&self, side: Side) -> bool {
        self.config.opponent == Some(side)
    }

    /// Handle a click on `cell`.
    ///
    /// Clicking an own piece selects it; clicking the selection again
    /// clears it. With a selection, a legal destination plays the move,
    /// another own piece moves the selection and anything else clears it.
    pub fn select(&mut self, cell: Cell) -> bool {
        let turn = self.board.side_to_move();
        if !self.state.is_running() || self.is_automated(turn) || !self.board.in_bounds(cell) {
            return false;
        }
        let own = self.board.piece_at(cell).is_some_and(|p| p.side == turn);

        let Some(from) = self.selected else {
            if own {
                self.selected = Some(cell);
            }
            return own;
        };

        if from == cell {
            self.selected = None;
        } else if let Some(mv) = self.board.find_move(from, cell) {
            self.selected = None;
            self.play(&mv);
        } else if own {
            self.selected = Some(cell);
        } else {
            log::debug!("Chess: {} -> {} rejected", from, cell);
            self.selected = None;
        }
        true
    }

    fn play(&mut self, mv: &ChessMove) {
        let mover = self.board.side_to_move();
        if mv.captured.is_some() && !self.is_automated(mover) {
            self.captures.add(1);
        }
        self.board.apply_move(mv);

        if !self.conclude() && self.is_automated(self.board.side_to_move()) {
            self.opponent.arm(self.config.opponent_delay_ms);
        }
    }

    /// Check for mate or stalemate on the side to move. Returns true when
    /// the game is over.
    fn conclude(&mut self) -> bool {
        self.outcome = self.board.outcome();
        let Some(outcome) = self.outcome else {
            return false;
        };
        self.state = RunState::Over;
        self.selected = None;
        self.opponent.cancel();
        log::info!("Chess over: {:?}", outcome);
        true
    }

    fn opponent_move(&mut self) {
        let side = self.board.side_to_move();
        if let Some(mv) = CapturePreferring.choose_move(&self.board, side, &mut self.rng) {
            log::debug!("Chess: {:?} plays {} -> {}", side, mv.from, mv.to);
            self.play(&mv);
        }
    }

    fn restart(&mut self) {
        self.board = ChessBoard::new();
        self.selected = None;
        self.opponent.cancel();
        self.captures.reset();
        self.outcome = None;
    }
}

impl Game for ChessGame {
    fn kind(&self) -> GameKind {
        GameKind::Chess
    }

    fn surface_size(&self) -> (f64, f64) {
        let side = BOARD_SIZE as f64 * SQUARE_SIZE;
        (side, side)
    }

    fn run_state(&self) -> RunState {
        self.state
    }

    fn start(&mut self) {
        if self.state.is_over() {
            self.restart();
            self.state = RunState::Ready;
        }
        self.state = self.state.started();
        log::info!("Chess started");
        if !self.state.is_running() || self.conclude() {
            return;
        }
        if self.is_automated(self.board.side_to_move()) && !self.opponent.is_armed() {
            self.opponent.arm(self.config.opponent_delay_ms);
        }
    }

    fn toggle_pause(&mut self) {
        self.state = self.state.toggled();
    }

    fn reset(&mut self) {
        self.restart();
        self.state = RunState::Ready;
    }

    fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::Select(cell) => self.select(cell),
            _ => false,
        }
    }

    fn pointer(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down(at) => {
                let (w, h) = self.surface_size();
                match SurfaceScale::identity(w, h).to_cell(at, SQUARE_SIZE) {
                    Some(cell) => self.select(cell),
                    None => false,
                }
            }
            _ => false,
        }
    }

    fn update(&mut self, dt_ms: f64) {
        if self.state.is_running() && self.opponent.tick(dt_ms) {
            self.opponent_move();
        }
    }

    /// Pieces taken by the human side.
    fn score(&self) -> u32 {
        self.captures.value()
    }

    fn render(&self, surface: &mut dyn Surface, text: &dyn Translate) {
        let (w, _) = self.surface_size();
        let half = SQUARE_SIZE / 2.0;

        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let cell = Cell::at(row, col);
                let fill = if self.selected == Some(cell) {
                    Color::hex(0x829769)
                } else if (row + col) % 2 == 0 {
                    Color::hex(0xf0d9b5)
                } else {
                    Color::hex(0xb58863)
                };
                let (x, y) = (col as f64 * SQUARE_SIZE, row as f64 * SQUARE_SIZE);
                surface.fill_rect(x, y, SQUARE_SIZE, SQUARE_SIZE, fill);
                if let Some(piece) = self.board.piece_at(cell) {
                    surface.text(
                        (x + half, y + half + 4.0).into(),
                        piece.glyph(),
                        Color::BLACK,
                        SQUARE_SIZE * 0.8,
                        Align::Center,
                    );
                }
            }
        }

        match self.state {
            RunState::Running => {
                let turn = self.board.side_to_move();
                let status = match self.config.opponent {
                    Some(automated) if automated == turn => text.text("thinking"),
                    Some(_) => text.text("yourTurn"),
                    None => text.text(turn.key()),
                };
                surface.text((w - 10.0, 20.0).into(), &status, Color::BLACK, 14.0, Align::Right);
            }
            RunState::Over => {
                let title = match self.outcome {
                    Some(ChessOutcome::Checkmate { winner }) => {
                        format!("{}: {}", text.text("checkmate"), text.text(winner.key()))
                    }
                    Some(ChessOutcome::Stalemate) => text.text("stalemate"),
                    None => text.text("gameOver"),
                };
                overlay::game_over(surface, text, &title, self.score(), None);
            }
            RunState::Paused => overlay::banner(surface, &text.text("paused")),
            RunState::Ready => overlay::banner(surface, &text.text("startGame")),
        }
    }
}
