//! Tic-tac-toe between a human and a robot whose moves come from an outside provider.
//!
//! # Architecture
//!
//! - **Board**: square grid of marks with a fixed catalog of winning lines
//! - **Rules**: line strategies and the continuation check ("can this player still win?")
//! - **Game**: the phase state machine, score tallies and robot move tickets
//!
//! The crate is synchronous and performs no I/O. Robot moves are requested through
//! [`MoveRequest`] values and handed back with [`Game::resolve_robot_move`].
//!
//! # Example
//!
//! ```
//! use strictly_tictactoe::{Board, Coordinate, Game, Phase, ThreadRandom};
//!
//! let board = Board::parse("XXX------").unwrap();
//! let mut game = Game::with_position(board, Phase::WaitingForHuman, ThreadRandom);
//! game.evaluate_game_over().unwrap();
//! assert!(game.is_human_winner());
//! assert!(game.is_in_winning_line(2, 0));
//! assert_eq!(game.winning_line()[0], Coordinate::new(0, 0));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod error;
mod game;
mod phases;
mod random;
pub mod rules;
mod tally;
mod types;

pub use board::{Board, Line, STANDARD_SIDE};
pub use error::{EngineError, EngineErrorKind, ProviderFailure};
pub use game::{Game, MoveRequest, Resolution, Ticket};
pub use phases::{HUMAN, PROVIDER_FAILURE_MESSAGE, Phase, ROBOT};
pub use random::{DRAW_MAX, DRAW_MIN, RandomSource, ThreadRandom, pick_first_player};
pub use rules::{LineEvaluation, LineStrategy, Orientation, best_line, can_still_win};
pub use tally::ScoreTally;
pub use types::{Coordinate, Player, Square};
