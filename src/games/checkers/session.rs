//! Interactive checkers session: Red is the human, White the automated side.

use serde::{Deserialize, Serialize};

use super::rules::{is_dark, CheckersBoard, CheckersMove, Side, BOARD_SIZE};
use crate::core::{Cell, Delay, GameRng, RunState, Score};
use crate::games::{Game, GameKind};
use crate::input::{Command, PointerEvent, SurfaceScale};
use crate::render::{overlay, Align, Color, Surface, Translate};
use crate::rules::{CapturePreferring, GameResult, OpponentPolicy, RulesEngine};

/// Pixel size of one square.
pub const SQUARE_SIZE: f64 = 60.0;

const HUMAN: Side = Side::Red;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckersConfig {
    /// Delay before the automated side moves.
    pub opponent_delay_ms: f64,
    /// Hold the human side to the global capture restriction as well.
    pub strict_capture: bool,
}

impl Default for CheckersConfig {
    fn default() -> Self {
        Self {
            opponent_delay_ms: 800.0,
            strict_capture: false,
        }
    }
}

impl CheckersConfig {
    #[must_use]
    pub fn with_opponent_delay(mut self, ms: f64) -> Self {
        self.opponent_delay_ms = ms;
        self
    }

    #[must_use]
    pub fn with_strict_capture(mut self, strict: bool) -> Self {
        self.strict_capture = strict;
        self
    }
}

/// A checkers game against the computer.
#[derive(Clone, Debug)]
pub struct CheckersGame {
    config: CheckersConfig,
    rng: GameRng,
    board: CheckersBoard,
    selected: Option<Cell>,
    opponent: Delay,
    captures: Score,
    result: Option<GameResult<Side>>,
    state: RunState,
}

impl CheckersGame {
    #[must_use]
    pub fn new(config: CheckersConfig, rng: GameRng) -> Self {
        Self::with_board(config, rng, CheckersBoard::new())
    }

    /// Start from an arbitrary position.
    #[must_use]
    pub fn with_board(config: CheckersConfig, rng: GameRng, board: CheckersBoard) -> Self {
        Self {
            config,
            rng,
            board,
            selected: None,
            opponent: Delay::idle(),
            captures: Score::new(),
            result: None,
            state: RunState::Ready,
        }
    }

    #[must_use]
    pub fn board(&self) -> &CheckersBoard {
        &self.board
    }

    #[must_use]
    pub fn selected(&self) -> Option<Cell> {
        self.selected
    }

    #[must_use]
    pub fn result(&self) -> Option<GameResult<Side>> {
        self.result
    }

    /// True while the automated side is waiting to move.
    #[must_use]
    pub fn is_opponent_thinking(&self) -> bool {
        self.opponent.is_armed()
    }

    /// Moves the human may make with the piece on `from`.
    #[must_use]
    pub fn human_moves(&self, from: Cell) -> Vec<CheckersMove> {
        let moves = self.board.moves_from(from);
        let must_capture = self.config.strict_capture && self.board.has_capture(HUMAN);
        moves
            .into_iter()
            .filter(|m| !must_capture || m.is_jump())
            .collect()
    }

    /// Handle a click on `cell`.
    ///
    /// An own piece becomes the selection. With a selection, a reachable
    /// square executes the move; anything else clears the selection.
    pub fn select(&mut self, cell: Cell) -> bool {
        if !self.state.is_running() || self.board.side_to_move() != HUMAN {
            return false;
        }
        if self.board.checker_at(cell).map(|c| c.side) == Some(HUMAN) {
            self.selected = Some(cell);
            return true;
        }

        let Some(from) = self.selected.take() else {
            return false;
        };
        match self.human_moves(from).into_iter().find(|m| m.to == cell) {
            Some(mv) => {
                self.play(&mv);
                true
            }
            None => {
                log::debug!("Checkers: {} -> {} rejected", from, cell);
                true
            }
        }
    }

    fn play(&mut self, mv: &CheckersMove) {
        if mv.is_jump() && self.board.side_to_move() == HUMAN {
            self.captures.add(1);
        }
        self.board.apply_move(mv);
        if !self.conclude() && self.board.side_to_move() != HUMAN {
            self.opponent.arm(self.config.opponent_delay_ms);
        }
    }

    /// End the game if the position is decided. Returns true when over.
    fn conclude(&mut self) -> bool {
        self.result = self.board.is_terminal();
        let Some(result) = self.result else {
            return false;
        };
        self.state = RunState::Over;
        self.selected = None;
        self.opponent.cancel();
        log::info!("Checkers over: {:?}", result);
        true
    }

    fn opponent_move(&mut self) {
        let side = self.board.side_to_move();
        match CapturePreferring.choose_move(&self.board, side, &mut self.rng) {
            Some(mv) => {
                log::debug!("Checkers: {:?} plays {} -> {}", side, mv.from, mv.to);
                self.play(&mv);
            }
            None => {
                self.result = Some(GameResult::Winner(side.opponent()));
                self.state = RunState::Over;
            }
        }
    }

    fn restart(&mut self) {
        self.board = CheckersBoard::new();
        self.selected = None;
        self.opponent.cancel();
        self.captures.reset();
        self.result = None;
    }

    fn draw_piece(&self, surface: &mut dyn Surface, cell: Cell) {
        let Some(piece) = self.board.checker_at(cell) else {
            return;
        };
        let center = (
            cell.col() as f64 * SQUARE_SIZE + SQUARE_SIZE / 2.0,
            cell.row() as f64 * SQUARE_SIZE + SQUARE_SIZE / 2.0,
        )
            .into();
        let radius = SQUARE_SIZE * 0.35;
        let (fill, rim, crown) = match piece.side {
            Side::Red => (Color::hex(0xd32f2f), Color::hex(0xb71c1c), Color::WHITE),
            Side::White => (Color::hex(0xf5f5f5), Color::hex(0xcccccc), Color::hex(0xd32f2f)),
        };
        surface.fill_circle(center, radius, fill);
        surface.stroke_circle(center, radius * 0.85, Color::rgba(0, 0, 0, 26), 2.0);
        surface.stroke_circle(center, radius, rim, 2.0);
        if piece.king {
            surface.text(center, "\u{2655}", crown, 24.0, Align::Center);
        }
    }
}

impl Game for CheckersGame {
    fn kind(&self) -> GameKind {
        GameKind::Checkers
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
        log::info!("Checkers started");
        if !self.state.is_running() || self.conclude() {
            return;
        }
        if self.board.side_to_move() != HUMAN && !self.opponent.is_armed() {
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

    /// Opposing pieces captured by the human.
    fn score(&self) -> u32 {
        self.captures.value()
    }

    fn render(&self, surface: &mut dyn Surface, text: &dyn Translate) {
        let (w, _) = self.surface_size();
        surface.clear(Color::hex(0xf0d9b5));

        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let cell = Cell::at(row, col);
                let fill = if self.selected == Some(cell) {
                    Color::hex(0x6b8c42)
                } else if is_dark(cell) {
                    Color::hex(0xb58863)
                } else {
                    Color::hex(0xf0d9b5)
                };
                surface.fill_rect(
                    col as f64 * SQUARE_SIZE,
                    row as f64 * SQUARE_SIZE,
                    SQUARE_SIZE,
                    SQUARE_SIZE,
                    fill,
                );
                self.draw_piece(surface, cell);
            }
        }

        match self.state {
            RunState::Running => {
                let status = if self.board.side_to_move() == HUMAN { "yourTurn" } else { "thinking" };
                surface.text((w - 10.0, 20.0).into(), &text.text(status), Color::BLACK, 14.0, Align::Right);
            }
            RunState::Over => {
                let title = match self.result.as_ref().and_then(GameResult::winner) {
                    Some(side) => format!("{}: {}", text.text("winner"), text.text(side.key())),
                    None => text.text("gameOver"),
                };
                overlay::game_over(surface, text, &title, self.score(), None);
            }
            RunState::Paused => overlay::banner(surface, &text.text("paused")),
            RunState::Ready => overlay::banner(surface, &text.text("startGame")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::checkers::Checker;
    use crate::render::{Dictionary, RecordingSurface};

    fn running() -> CheckersGame {
        let mut game = CheckersGame::new(CheckersConfig::default(), GameRng::new(5));
        game.start();
        game
    }

    #[test]
    fn test_input_ignored_before_start() {
        let mut game = CheckersGame::new(CheckersConfig::default(), GameRng::new(5));
        assert!(!game.select(Cell::at(5, 0)));
        assert_eq!(game.selected(), None);
    }

    #[test]
    fn test_select_own_piece_and_move() {
        let mut game = running();
        assert!(game.select(Cell::at(5, 0)));
        assert_eq!(game.selected(), Some(Cell::at(5, 0)));

        assert!(game.select(Cell::at(4, 1)));
        assert_eq!(game.selected(), None);
        assert_eq!(game.board().checker_at(Cell::at(4, 1)), Some(Checker::man(Side::Red)));
        assert_eq!(game.board().side_to_move(), Side::White);
        assert!(game.is_opponent_thinking());
    }

    #[test]
    fn test_invalid_target_clears_selection() {
        let mut game = running();
        game.select(Cell::at(5, 0));
        game.select(Cell::at(3, 0));
        assert_eq!(game.selected(), None);
        assert_eq!(game.board().side_to_move(), Side::Red);
    }

    #[test]
    fn test_clicking_opponent_piece_without_selection() {
        let mut game = running();
        assert!(!game.select(Cell::at(2, 1)));
    }

    #[test]
    fn test_opponent_moves_after_delay() {
        let mut game = running();
        game.select(Cell::at(5, 0));
        game.select(Cell::at(4, 1));

        game.update(799.0);
        assert_eq!(game.board().side_to_move(), Side::White);
        game.update(1.0);
        assert_eq!(game.board().side_to_move(), Side::Red);
        assert!(!game.is_opponent_thinking());
    }

    #[test]
    fn test_human_blocked_during_opponent_turn() {
        let mut game = running();
        game.select(Cell::at(5, 0));
        game.select(Cell::at(4, 1));
        assert!(!game.select(Cell::at(5, 2)));
    }

    #[test]
    fn test_opponent_prefers_capture() {
        let mut board = CheckersBoard::empty(Side::White);
        board.place(Cell::at(2, 1), Checker::man(Side::White));
        board.place(Cell::at(2, 5), Checker::man(Side::White));
        board.place(Cell::at(3, 6), Checker::man(Side::Red));
        board.place(Cell::at(7, 0), Checker::man(Side::Red));
        for seed in 0..10 {
            let mut game = CheckersGame::with_board(CheckersConfig::default(), GameRng::new(seed), board.clone());
            game.start();
            game.update(800.0);
            assert_eq!(game.board().checker_at(Cell::at(3, 6)), None, "seed {}", seed);
            assert_eq!(game.score(), 0);
        }
    }

    #[test]
    fn test_strict_capture_applies_to_human() {
        let mut board = CheckersBoard::empty(Side::Red);
        board.place(Cell::at(5, 0), Checker::man(Side::Red));
        board.place(Cell::at(5, 4), Checker::man(Side::Red));
        board.place(Cell::at(4, 5), Checker::man(Side::White));
        board.place(Cell::at(0, 7), Checker::man(Side::White));

        let lenient = CheckersGame::with_board(CheckersConfig::default(), GameRng::new(1), board.clone());
        assert_eq!(lenient.human_moves(Cell::at(5, 0)).len(), 1);

        let strict = CheckersGame::with_board(
            CheckersConfig::default().with_strict_capture(true),
            GameRng::new(1),
            board,
        );
        assert!(strict.human_moves(Cell::at(5, 0)).is_empty());
        assert_eq!(strict.human_moves(Cell::at(5, 4)).len(), 1);
    }

    #[test]
    fn test_winning_capture_ends_game() {
        let mut board = CheckersBoard::empty(Side::Red);
        board.place(Cell::at(5, 2), Checker::man(Side::Red));
        board.place(Cell::at(4, 3), Checker::man(Side::White));
        let mut game = CheckersGame::with_board(CheckersConfig::default(), GameRng::new(1), board);
        game.start();
        game.select(Cell::at(5, 2));
        game.select(Cell::at(3, 4));

        assert_eq!(game.run_state(), RunState::Over);
        assert_eq!(game.result(), Some(GameResult::Winner(Side::Red)));
        assert_eq!(game.score(), 1);
        assert!(!game.is_opponent_thinking());

        let mut surface = RecordingSurface::new(480.0, 480.0);
        game.render(&mut surface, &Dictionary::english());
        assert!(surface.contains_text("Winner: Red"));
    }

    #[test]
    fn test_pointer_maps_to_square() {
        let mut game = running();
        assert!(game.pointer(PointerEvent::Down((30.0, 330.0).into())));
        assert_eq!(game.selected(), Some(Cell::at(5, 0)));
        assert!(!game.pointer(PointerEvent::Down((500.0, 10.0).into())));
    }

    #[test]
    fn test_start_after_over_restarts() {
        let mut board = CheckersBoard::empty(Side::Red);
        board.place(Cell::at(5, 2), Checker::man(Side::Red));
        board.place(Cell::at(4, 3), Checker::man(Side::White));
        let mut game = CheckersGame::with_board(CheckersConfig::default(), GameRng::new(1), board);
        game.start();
        game.select(Cell::at(5, 2));
        game.select(Cell::at(3, 4));
        game.start();

        assert_eq!(game.run_state(), RunState::Running);
        assert_eq!(game.board().count(Side::White), 12);
        assert_eq!(game.result(), None);
    }
}
