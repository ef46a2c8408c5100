//! Game module - the board state machine
//!
//! `Game` owns the grid, the active and held pieces, the supplier, the score
//! tracker and the clock. It runs spawn → move/rotate/drop → lock → clear →
//! spawn, tops out when a piece locks inside the hidden rows, and queues a
//! [`GameEvent`] for every observable change. Consumers pick the events up with
//! [`Game::drain_events`] once an operation has returned.

use std::vec::Drain;

use crate::board::Board;
use crate::clock::{Clock, ClockEvent};
use crate::config::GameConfig;
use crate::events::GameEvent;
use crate::pieces::Tetromino;
use crate::rng::PieceSupplier;
use crate::scoring::{accelerated_delay_ms, ScoreKeeper};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{
    ClockState, GameAction, PieceKind, Region, BOARD_HEIGHT, BOARD_WIDTH, HIDDEN_ROWS,
    PREVIEW_LEN,
};

/// Whole-grid repaint area
const FULL_BOARD: Region = Region::new(0, 0, BOARD_WIDTH, BOARD_HEIGHT);

#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    board: Board,
    active: Option<Tetromino>,
    held: Option<Tetromino>,
    supplier: PieceSupplier,
    score_keeper: ScoreKeeper,
    clock: Clock,
    /// Set by a hold, cleared by the next lock
    hold_locked: bool,
    game_over: bool,
    events: Vec<GameEvent>,
}

impl Game {
    /// Create a game with a spawned piece and a stopped clock
    pub fn new(config: GameConfig) -> Self {
        Self::with_board(config, Board::new())
    }

    /// Create a game around a prepared grid, then spawn the first piece.
    ///
    /// The grid is owned by the game from here on; a first piece that does
    /// not fit tops the game out immediately.
    pub fn with_board(config: GameConfig, board: Board) -> Self {
        let mut game = Self {
            config,
            board,
            active: None,
            held: None,
            supplier: PieceSupplier::new(config.seed),
            score_keeper: ScoreKeeper::new(),
            clock: Clock::new(config.initial_delay_ms).with_max_ticks(config.max_ticks),
            hold_locked: false,
            game_over: false,
            events: Vec::new(),
        };
        game.spawn();
        game
    }

    /// Create a game with default rules and the given seed
    pub fn with_seed(seed: u32) -> Self {
        Self::new(GameConfig::with_seed(seed))
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<&Tetromino> {
        self.active.as_ref()
    }

    pub fn held(&self) -> Option<PieceKind> {
        self.held.map(|piece| piece.kind)
    }

    pub fn preview(&self) -> [PieceKind; PREVIEW_LEN] {
        self.supplier.preview()
    }

    pub fn score(&self) -> u32 {
        self.score_keeper.score()
    }

    pub fn combo(&self) -> u32 {
        self.score_keeper.combo()
    }

    pub fn score_keeper(&self) -> &ScoreKeeper {
        &self.score_keeper
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn can_hold(&self) -> bool {
        !self.hold_locked
    }

    /// Take the queued events, oldest first
    pub fn drain_events(&mut self) -> Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// Resting row of the active piece
    pub fn ghost_y(&self) -> Option<i8> {
        let mut ghost = self.active?;
        let (_, y) = ghost.drop(|coords| self.board.fits(coords));
        Some(y)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.to_rows(),
            active: self.active.as_ref().map(ActiveSnapshot::from),
            ghost_y: self.ghost_y(),
            hold: self.held(),
            next_queue: self.preview(),
            can_hold: self.can_hold(),
            game_over: self.game_over,
            score: self.score(),
            combo: self.combo(),
            clock: self.clock.snapshot(),
        }
    }

    pub fn start(&mut self) {
        self.clock.start();
        self.forward_clock_events();
    }

    pub fn stop(&mut self) {
        self.clock.stop();
        self.forward_clock_events();
    }

    pub fn pause(&mut self) {
        self.clock.pause();
        self.forward_clock_events();
    }

    /// Give the active piece a full interval before the next auto-drop
    pub fn reset_drop_time(&mut self) {
        self.clock.reschedule();
    }

    /// Feed elapsed time; every downtick auto-drops the active piece
    pub fn advance(&mut self, elapsed_ms: u32) {
        let mut budget = elapsed_ms;
        while self.clock.step(&mut budget) {
            for event in self.clock.take_events() {
                self.events.push(GameEvent::Clock(event));
                if let ClockEvent::Downtick(_) = event {
                    self.drop(false, false);
                }
            }
        }
    }

    /// Take the next kind from the supplier and place it at its spawn position
    pub fn spawn(&mut self) {
        let piece = Tetromino::new(self.supplier.pop());
        self.enter(piece);
    }

    pub fn left(&mut self) -> Option<(i8, i8)> {
        self.shift(-1, 0)
    }

    pub fn right(&mut self) -> Option<(i8, i8)> {
        self.shift(1, 0)
    }

    pub fn down(&mut self) -> Option<(i8, i8)> {
        self.shift(0, 1)
    }

    /// Rotate the active piece clockwise with kicks
    pub fn rotate(&mut self) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        let before = piece.region();
        let rotated = piece.rotate(|coords| self.board.fits(coords));
        let after = *piece;

        self.events.push(GameEvent::Rotate(ActiveSnapshot::from(&after)));
        self.events.push(GameEvent::Update(before.union(&after.region())));
        rotated
    }

    /// Move down one row (to rest first when `hard`); lock if the piece could
    /// not move and `no_lock` is false.
    pub fn drop(&mut self, hard: bool, no_lock: bool) {
        let Some(piece) = self.active.as_mut() else {
            return;
        };
        let start = *piece;
        if hard {
            piece.drop(|coords| self.board.fits(coords));
        }
        let y = piece.y;
        piece.move_by(0, 1, |coords| self.board.fits(coords));
        let end = *piece;

        if end.position() != start.position() {
            self.events.push(GameEvent::Move(ActiveSnapshot::from(&end)));
        }
        if end.y == y && !no_lock {
            self.lock();
        }
        self.events
            .push(GameEvent::Update(start.region().union(&end.region())));
    }

    /// Swap the active piece with the hold slot (once per locked piece)
    pub fn hold(&mut self) -> bool {
        if self.hold_locked {
            return false;
        }
        let Some(mut current) = self.active.take() else {
            return false;
        };
        let vacated = current.region();
        current.reset();
        self.hold_locked = true;

        let previous = self.held.replace(current);
        self.events.push(GameEvent::Hold { held: current.kind });
        self.events.push(GameEvent::Update(vacated));
        match previous {
            Some(piece) => self.enter(piece),
            None => self.spawn(),
        }
        true
    }

    /// Write the active piece into the grid, clear rows, score, then spawn or top out
    pub fn lock(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };
        let coords = piece.coordinates();
        self.board.write_cells(&coords, piece.kind);
        self.hold_locked = false;
        self.events.push(GameEvent::Lock(coords.to_vec()));

        self.score_keeper.on_lock();
        let cleared = self.board.clear_lines();
        self.events.push(GameEvent::Clear(cleared.to_vec()));

        let update = self.score_keeper.on_clear(&cleared);
        self.events.push(GameEvent::Score {
            score: update.score,
            combo: update.combo,
        });
        if update.points > 0 {
            let (numerator, denominator) = self.config.speedup;
            let delay = accelerated_delay_ms(
                self.clock.delay_ms(),
                numerator,
                denominator,
                self.config.min_delay_ms,
            );
            self.clock.set_delay(delay);
        }

        let repaint = if cleared.is_empty() {
            piece.region()
        } else {
            FULL_BOARD
        };
        self.events.push(GameEvent::Update(repaint));

        if coords.iter().any(|&(_, y)| y < HIDDEN_ROWS as i8) {
            self.top_out();
        } else {
            self.spawn();
        }
    }

    /// Fresh supplier, empty grid and score, initial delay; the clock is left
    /// stopped until [`Game::start`].
    pub fn restart(&mut self) {
        let seed = self.supplier.next_seed();
        self.supplier = PieceSupplier::new(seed);
        self.score_keeper.reset();
        self.board.clear();
        self.active = None;
        self.held = None;
        self.hold_locked = false;
        self.game_over = false;

        self.clock.restart();
        self.clock.set_delay(self.config.initial_delay_ms);
        self.forward_clock_events();

        self.events.push(GameEvent::Update(FULL_BOARD));
        self.spawn();
    }

    /// Map a player action onto game operations.
    ///
    /// Gameplay actions are ignored unless the clock is running. Returns whether
    /// the action changed anything.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Pause => match self.clock.state() {
                ClockState::Running => {
                    self.pause();
                    true
                }
                ClockState::Paused => {
                    self.start();
                    true
                }
                ClockState::Stopped => false,
            },
            GameAction::Restart => {
                self.restart();
                self.start();
                true
            }
            _ if !self.clock.is_running() => false,
            GameAction::MoveLeft => {
                self.reset_drop_time();
                self.moved(Self::left)
            }
            GameAction::MoveRight => {
                self.reset_drop_time();
                self.moved(Self::right)
            }
            GameAction::SoftDrop => {
                self.reset_drop_time();
                self.moved(Self::down)
            }
            GameAction::Rotate => {
                self.reset_drop_time();
                self.rotate()
            }
            GameAction::HardDrop => {
                if self.active.is_none() {
                    return false;
                }
                self.drop(true, false);
                true
            }
            GameAction::Hold => self.hold(),
        }
    }

    fn moved(&mut self, op: fn(&mut Self) -> Option<(i8, i8)>) -> bool {
        let before = self.active.map(|piece| piece.position());
        let after = op(self);
        after.is_some() && after != before
    }

    fn shift(&mut self, dx: i8, dy: i8) -> Option<(i8, i8)> {
        let piece = self.active.as_mut()?;
        let before = *piece;
        let position = piece.move_by(dx, dy, |coords| self.board.fits(coords));
        let after = *piece;

        if position != before.position() {
            self.events.push(GameEvent::Move(ActiveSnapshot::from(&after)));
        }
        self.events
            .push(GameEvent::Update(before.region().union(&after.region())));
        Some(position)
    }

    /// Make `piece` the active piece, or top out if its cells are taken
    fn enter(&mut self, piece: Tetromino) {
        if !self.board.fits(&piece.coordinates()) {
            self.top_out();
            return;
        }
        self.active = Some(piece);
        self.events.push(GameEvent::Spawn(ActiveSnapshot::from(&piece)));
        self.events.push(GameEvent::Update(piece.region()));
    }

    fn top_out(&mut self) {
        self.active = None;
        self.game_over = true;
        self.stop();
    }

    fn forward_clock_events(&mut self) {
        for event in self.clock.take_events() {
            self.events.push(GameEvent::Clock(event));
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
