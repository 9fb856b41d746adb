//! Move providers and the async session driver for human vs robot tic-tac-toe.
//!
//! The game itself lives in [`strictly_tictactoe`]. This crate supplies the robot:
//! a [`MoveProvider`] posting the board to a remote endpoint (or choosing locally),
//! and a [`Session`] that requests robot moves in the background and feeds the
//! answers back to the game.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
pub mod provider;
mod session;
mod simulate;

pub use config::{ConfigError, ENDPOINT_ENV, RobotConfig};
pub use provider::{
    FirstEmptyCell, HttpMoveProvider, MoveProvider, ProviderError, RandomEmptyCell, RobotMoveBody,
};
pub use session::Session;
pub use simulate::simulate;
