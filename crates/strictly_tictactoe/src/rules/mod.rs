//! Game rules for tic-tac-toe.
//!
//! Pure functions of board state: line strategies score single lines, and the
//! continuation check aggregates them to decide whether a player can still win.

pub mod continuation;
pub mod strategy;

pub use continuation::{best_line, can_still_win};
pub use strategy::{LineEvaluation, LineStrategy, Orientation};
