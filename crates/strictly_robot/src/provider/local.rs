//! Local providers that need no network.

use super::{MoveProvider, ProviderError};
use rand::seq::IteratorRandom;
use strictly_tictactoe::{Board, Coordinate, MoveRequest};
use tracing::{debug, instrument};

fn parse_board(request: &MoveRequest) -> Result<Board, ProviderError> {
    Board::parse(&request.board)
        .map_err(|e| ProviderError::InvalidBoard(e.kind().to_string()))
}

/// Picks the first empty square in row-major order.
#[derive(Debug, Clone)]
pub struct FirstEmptyCell {
    name: String,
}

impl FirstEmptyCell {
    /// Creates a new first-empty-cell provider.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait::async_trait]
impl MoveProvider for FirstEmptyCell {
    #[instrument(skip(self, request), fields(provider = %self.name, board = %request.board))]
    async fn request_move(&self, request: &MoveRequest) -> Result<Coordinate, ProviderError> {
        let cell = parse_board(request)?
            .empty_cells()
            .next()
            .ok_or(ProviderError::NoMove)?;
        debug!(%cell, "Chose first empty cell");
        Ok(cell)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Picks uniformly among the empty squares.
#[derive(Debug, Clone)]
pub struct RandomEmptyCell {
    name: String,
}

impl RandomEmptyCell {
    /// Creates a new random-empty-cell provider.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait::async_trait]
impl MoveProvider for RandomEmptyCell {
    #[instrument(skip(self, request), fields(provider = %self.name, board = %request.board))]
    async fn request_move(&self, request: &MoveRequest) -> Result<Coordinate, ProviderError> {
        let board = parse_board(request)?;
        let cell = board
            .empty_cells()
            .choose(&mut rand::thread_rng())
            .ok_or(ProviderError::NoMove)?;
        debug!(%cell, "Chose random empty cell");
        Ok(cell)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
