//! Human vs robot game state machine.
//!
//! The machine is synchronous. Whenever the robot is to move it hands out a
//! [`MoveRequest`] carrying a [`Ticket`]; the caller obtains the coordinate from a move
//! provider and feeds it back through [`Game::resolve_robot_move`]. Tickets from an
//! earlier game or turn are discarded, so a late reply never leaks into a newer game.

use crate::board::{Board, Line};
use crate::error::{EngineError, EngineErrorKind, ProviderFailure};
use crate::phases::{HUMAN, PROVIDER_FAILURE_MESSAGE, Phase, ROBOT};
use crate::random::{RandomSource, ThreadRandom, pick_first_player};
use crate::rules::can_still_win;
use crate::tally::ScoreTally;
use crate::types::{Coordinate, Player, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Identifies one outstanding move request: the game generation and the turn within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticket {
    generation: u64,
    turn: u64,
}

impl Ticket {
    /// Game generation, bumped by every new game.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Turn number within the game, bumped by every applied move.
    pub fn turn(&self) -> u64 {
        self.turn
    }
}

/// Everything a move provider needs to choose a move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Ticket to present when resolving the move.
    pub ticket: Ticket,
    /// Row-major board string (`-`, `X`, `O`).
    pub board: String,
    /// Mark of the player to move.
    pub moving: Player,
    /// Mark of the player waiting.
    pub waiting: Player,
}

/// What happened to a robot move handed back to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The move was placed on the board.
    Applied,
    /// The provider failed or chose an unplayable cell; the game is in the error phase.
    Failed,
    /// The ticket no longer matches the game; nothing changed.
    Discarded,
}

/// Tic-tac-toe game between a human (`X`) and a robot (`O`).
#[derive(Debug, Clone)]
pub struct Game<R = ThreadRandom> {
    board: Board,
    phase: Phase,
    tally: ScoreTally,
    generation: u64,
    turn: u64,
    random: R,
}

impl Game<ThreadRandom> {
    /// Creates a game in the init phase using the thread-local random generator.
    pub fn new() -> Self {
        Self::with_random(ThreadRandom)
    }
}

impl Default for Game<ThreadRandom> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource> Game<R> {
    /// Creates a game in the init phase with the given random source.
    pub fn with_random(random: R) -> Self {
        Self::with_position(Board::new(), Phase::Init, random)
    }

    /// Creates a game resumed at an arbitrary board and phase.
    pub fn with_position(board: Board, phase: Phase, random: R) -> Self {
        Self {
            board,
            phase,
            tally: ScoreTally::default(),
            generation: 0,
            turn: 0,
            random,
        }
    }

    /// Starts a new game: empty board, random first player, counters untouched.
    ///
    /// Returns the robot's move request when the robot goes first.
    #[instrument(skip(self), fields(generation = self.generation + 1))]
    pub fn new_game(&mut self) -> Option<MoveRequest> {
        self.generation += 1;
        self.turn = 0;
        self.board = Board::new();
        self.phase = if pick_first_player(&mut self.random) == HUMAN {
            Phase::WaitingForHuman
        } else {
            Phase::WaitingForRobot
        };
        info!(phase = %self.phase, "New game started");
        self.robot_request()
    }

    /// Places the human's mark and advances the game.
    ///
    /// Returns the robot's move request when the game continues.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` outside the human's turn, `IndexOutOfRange` off the board,
    /// `CellOccupied` on a marked cell. These are checked before the board is touched, so
    /// they leave the game unchanged.
    #[instrument(skip(self))]
    pub fn apply_human_move(
        &mut self,
        x: usize,
        y: usize,
    ) -> Result<Option<MoveRequest>, EngineError> {
        self.expect_phase(Phase::is_waiting_for_human, "apply a human move")?;
        self.place(x, y, HUMAN)?;
        self.evaluate_game_over()?;
        if self.phase.is_waiting_for_human() {
            self.turn += 1;
            self.phase = Phase::WaitingForRobot;
        }
        Ok(self.robot_request())
    }

    /// Places the robot's mark and advances the game.
    ///
    /// # Errors
    ///
    /// Same as [`Game::apply_human_move`], for the robot's turn.
    #[instrument(skip(self))]
    pub fn apply_robot_move(&mut self, x: usize, y: usize) -> Result<(), EngineError> {
        self.expect_phase(Phase::is_waiting_for_robot, "apply a robot move")?;
        self.place(x, y, ROBOT)?;
        self.evaluate_game_over()?;
        if self.phase.is_waiting_for_robot() {
            self.turn += 1;
            self.phase = Phase::WaitingForHuman;
        }
        Ok(())
    }

    /// Hands a move provider's answer back to the game.
    ///
    /// Stale tickets are discarded. A failure, or a coordinate that cannot be played,
    /// moves the game into the error phase.
    #[instrument(skip(self, outcome))]
    pub fn resolve_robot_move(
        &mut self,
        ticket: Ticket,
        outcome: Result<Coordinate, ProviderFailure>,
    ) -> Resolution {
        if !self.phase.is_waiting_for_robot() || ticket != self.ticket() {
            warn!(current = ?self.ticket(), phase = %self.phase, "Discarding stale robot move");
            return Resolution::Discarded;
        }
        let failure = match outcome {
            Ok(cell) => match self.apply_robot_move(cell.x, cell.y) {
                Ok(()) => return Resolution::Applied,
                Err(e) => ProviderFailure::new(format!(
                    "robot chose unplayable cell {cell}: {}",
                    e.kind()
                )),
            },
            Err(failure) => failure,
        };
        warn!(%failure, "Robot move failed");
        self.phase = Phase::Error {
            message: PROVIDER_FAILURE_MESSAGE.to_string(),
        };
        Resolution::Failed
    }

    /// Decides whether the last move ended the game.
    ///
    /// A completed line wins (human checked first). Otherwise the player waiting for the
    /// next move is checked: if they can no longer complete any line the game is a tie.
    /// Terminal phases are left alone.
    #[instrument(skip(self), fields(board = %self.board, phase = %self.phase))]
    pub fn evaluate_game_over(&mut self) -> Result<(), EngineError> {
        if self.phase.is_game_over() || self.phase.is_error() {
            return Ok(());
        }
        if let Some(line) = self.board.winning_line_for(HUMAN) {
            self.finish(Some(HUMAN), line);
            self.tally.record_human_win();
            return Ok(());
        }
        if let Some(line) = self.board.winning_line_for(ROBOT) {
            self.finish(Some(ROBOT), line);
            self.tally.record_robot_win();
            return Ok(());
        }
        let waiting = match self.phase {
            Phase::WaitingForHuman => Some(ROBOT),
            Phase::WaitingForRobot => Some(HUMAN),
            _ => None,
        };
        if let Some(player) = waiting
            && !can_still_win(player, player.opponent(), &self.board)?
        {
            self.finish(None, Vec::new());
            self.tally.record_tie();
        }
        Ok(())
    }

    fn finish(&mut self, winner: Option<Player>, line: Line) {
        info!(?winner, ?line, "Game over");
        self.phase = Phase::GameOver { winner, line };
    }

    fn place(&mut self, x: usize, y: usize, player: Player) -> Result<(), EngineError> {
        if !self.board.is_empty_at(x, y)? {
            let cell = Coordinate::new(x, y);
            return Err(EngineError::new(EngineErrorKind::CellOccupied(cell)));
        }
        self.board.set_symbol_at(x, y, Square::Occupied(player))?;
        debug!(x, y, %player, board = %self.board, "Mark placed");
        Ok(())
    }

    #[track_caller]
    fn expect_phase(
        &self,
        check: fn(&Phase) -> bool,
        action: &'static str,
    ) -> Result<(), EngineError> {
        if check(&self.phase) {
            Ok(())
        } else {
            Err(EngineError::new(EngineErrorKind::InvalidTransition {
                action,
                phase: self.phase.name(),
            }))
        }
    }

    fn robot_request(&self) -> Option<MoveRequest> {
        self.phase
            .is_waiting_for_robot()
            .then(|| self.request_for(ROBOT))
    }

    fn request_for(&self, moving: Player) -> MoveRequest {
        MoveRequest {
            ticket: self.ticket(),
            board: self.board.serialize(),
            moving,
            waiting: moving.opponent(),
        }
    }

    /// Move request for whichever player is to move, `None` outside the waiting phases.
    pub fn current_request(&self) -> Option<MoveRequest> {
        match self.phase {
            Phase::WaitingForHuman => Some(self.request_for(HUMAN)),
            Phase::WaitingForRobot => Some(self.request_for(ROBOT)),
            _ => None,
        }
    }
}

impl<R> Game<R> {
    /// Ticket for the current generation and turn.
    pub fn ticket(&self) -> Ticket {
        Ticket {
            generation: self.generation,
            turn: self.turn,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the current phase.
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Returns the score counters.
    pub fn tally(&self) -> &ScoreTally {
        &self.tally
    }

    /// Number of rows on the board.
    pub fn rows(&self) -> usize {
        self.board.side()
    }

    /// Number of columns on the board.
    pub fn columns(&self) -> usize {
        self.board.side()
    }

    /// Returns true before the first game.
    pub fn is_init(&self) -> bool {
        self.phase.is_init()
    }

    /// Returns true while the human is to move.
    pub fn is_waiting_for_human(&self) -> bool {
        self.phase.is_waiting_for_human()
    }

    /// Returns true while a robot move is outstanding.
    pub fn is_waiting_for_robot(&self) -> bool {
        self.phase.is_waiting_for_robot()
    }

    /// Returns true once the game has finished.
    pub fn is_game_over(&self) -> bool {
        self.phase.is_game_over()
    }

    /// Returns true after a move provider failure.
    pub fn is_error(&self) -> bool {
        self.phase.is_error()
    }

    /// Returns true if the human won.
    pub fn is_human_winner(&self) -> bool {
        self.phase.winner() == Some(HUMAN)
    }

    /// Returns true if the robot won.
    pub fn is_robot_winner(&self) -> bool {
        self.phase.winner() == Some(ROBOT)
    }

    /// Returns true if the game ended without a winner.
    pub fn is_tie(&self) -> bool {
        self.phase.is_game_over() && self.phase.winner().is_none()
    }

    /// Winner of a finished game.
    pub fn winner(&self) -> Option<Player> {
        self.phase.winner()
    }

    /// Winning line of a finished game, empty otherwise.
    pub fn winning_line(&self) -> &[Coordinate] {
        self.phase.winning_line()
    }

    /// Returns true if `(x, y)` belongs to the winning line.
    pub fn is_in_winning_line(&self, x: usize, y: usize) -> bool {
        self.winning_line().contains(&Coordinate::new(x, y))
    }

    /// Gets the square at `(x, y)`.
    pub fn symbol_at(&self, x: usize, y: usize) -> Result<Square, EngineError> {
        self.board.symbol_at(x, y)
    }

    /// Returns true if `(x, y)` is empty.
    pub fn is_empty_at(&self, x: usize, y: usize) -> Result<bool, EngineError> {
        self.board.is_empty_at(x, y)
    }

    /// Returns true if `(x, y)` holds the human's mark.
    pub fn is_human_at(&self, x: usize, y: usize) -> Result<bool, EngineError> {
        Ok(self.board.symbol_at(x, y)?.is(HUMAN))
    }

    /// Returns true if `(x, y)` holds the robot's mark.
    pub fn is_robot_at(&self, x: usize, y: usize) -> Result<bool, EngineError> {
        Ok(self.board.symbol_at(x, y)?.is(ROBOT))
    }

    /// Status text for the presentation layer.
    pub fn status_message(&self) -> &str {
        self.phase.status_message()
    }
}
