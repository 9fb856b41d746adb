//! Move providers: anything that can choose the next move for a board.

mod http;
mod local;

pub use http::{HttpMoveProvider, RobotMoveBody};
pub use local::{FirstEmptyCell, RandomEmptyCell};

use derive_more::{Display, Error};
use strictly_tictactoe::{Coordinate, MoveRequest, ProviderFailure};

/// Trait for collaborators that choose moves.
///
/// The only contract with the game is "given a board, return a coordinate for the
/// moving mark".
#[async_trait::async_trait]
pub trait MoveProvider: Send + Sync {
    /// Chooses a move for `request.moving` on `request.board`.
    async fn request_move(&self, request: &MoveRequest) -> Result<Coordinate, ProviderError>;

    /// Returns the provider's display name.
    fn name(&self) -> &str;
}

/// Why a provider could not produce a move.
#[derive(Debug, Display, Error)]
pub enum ProviderError {
    /// Request never completed (connection refused, timeout, ...).
    #[display("Transport error: {}", _0)]
    Transport(#[error(not(source))] String),

    /// Endpoint answered with a non-success status.
    #[display("Robot endpoint returned status {}", _0)]
    Status(#[error(not(source))] u16),

    /// Response body is not a `{x, y}` coordinate.
    #[display("Malformed robot response: {}", _0)]
    Decode(#[error(not(source))] String),

    /// Request carried a board string that does not parse.
    #[display("Invalid board in request: {}", _0)]
    InvalidBoard(#[error(not(source))] String),

    /// Board has no empty cell left.
    #[display("No empty cell available")]
    NoMove,
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            ProviderError::Status(status.as_u16())
        } else if err.is_decode() {
            ProviderError::Decode(err.to_string())
        } else {
            ProviderError::Transport(err.to_string())
        }
    }
}

impl From<ProviderError> for ProviderFailure {
    fn from(err: ProviderError) -> Self {
        ProviderFailure::new(err.to_string())
    }
}
