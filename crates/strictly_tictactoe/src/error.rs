//! Error types for the game engine.

use crate::types::Coordinate;
use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong inside the engine.
///
/// Every kind here is a programming or integration error: the caller asked for something
/// the board or the state machine cannot do.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum EngineErrorKind {
    /// Initial board string length is not a (non-zero) perfect square.
    #[display("Board of {} cells is not a perfect square", _0)]
    InvalidBoardSize(usize),

    /// Initial board string contains a character other than `-`, `X` or `O`.
    #[display("Unknown cell symbol {:?}", _0)]
    InvalidSymbol(char),

    /// Coordinate lies outside the grid.
    #[display("Cell ({x}, {y}) is outside a {side}x{side} board")]
    IndexOutOfRange {
        /// Requested column.
        x: usize,
        /// Requested row.
        y: usize,
        /// Side length of the board.
        side: usize,
    },

    /// Diagonal strategy configured with an origin that starts no diagonal.
    #[display("No diagonal starts at {}", _0)]
    InvalidOrigin(Coordinate),

    /// Move targets a cell that already holds a mark.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(Coordinate),

    /// Move submitted while it is not the submitter's turn.
    #[display("Cannot {action} while the game is in phase {phase}")]
    InvalidTransition {
        /// Operation that was attempted.
        action: &'static str,
        /// Phase the game was in.
        phase: &'static str,
    },
}

/// Engine error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Engine error: {} at {}:{}", kind, file, line)]
pub struct EngineError {
    /// Error kind.
    pub kind: EngineErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl EngineError {
    /// Creates a new engine error with caller location tracking.
    #[track_caller]
    #[instrument(skip(kind))]
    pub fn new(kind: EngineErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &EngineErrorKind {
        &self.kind
    }
}

/// Failure reported by a move provider.
///
/// This is the only failure expected in normal operation. It moves the game into the
/// terminal error phase.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Move provider failure: {}", message)]
pub struct ProviderFailure {
    /// Human-readable description of the failure.
    pub message: String,
}

impl ProviderFailure {
    /// Creates a provider failure.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
