//! Square game board and its catalog of winning lines.

use crate::error::{EngineError, EngineErrorKind};
use crate::types::{Coordinate, Player, Square};
use std::str::FromStr;
use tracing::instrument;

/// Side length of the standard board.
pub const STANDARD_SIDE: usize = 3;

/// A line of cells that wins the game when uniformly marked.
pub type Line = Vec<Coordinate>;

/// Square tic-tac-toe board.
///
/// Cells are stored row-major, `(x, y)` lives at index `y * side + x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    side: usize,
    squares: Vec<Square>,
    lines: Vec<Line>,
}

impl Board {
    /// Creates an empty 3x3 board.
    pub fn new() -> Self {
        let cells = STANDARD_SIDE * STANDARD_SIDE;
        Self::with_squares(STANDARD_SIDE, vec![Square::Empty; cells])
    }

    /// Parses a board from its row-major symbol string (`-`, `X`, `O`).
    ///
    /// The side length is the square root of the string length.
    #[instrument]
    pub fn parse(symbols: &str) -> Result<Self, EngineError> {
        let squares = symbols
            .chars()
            .map(Square::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let len = squares.len();
        let side = len.isqrt();
        if side == 0 || side * side != len {
            return Err(EngineError::new(EngineErrorKind::InvalidBoardSize(len)));
        }
        Ok(Self::with_squares(side, squares))
    }

    fn with_squares(side: usize, squares: Vec<Square>) -> Self {
        Self {
            side,
            squares,
            lines: winning_lines(side),
        }
    }

    /// Returns the side length.
    pub fn side(&self) -> usize {
        self.side
    }

    /// Returns all squares in row-major order.
    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    /// Returns the fixed catalog of winning lines: rows top to bottom, columns left to
    /// right, then the down-right and up-right diagonals.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    fn index(&self, x: usize, y: usize) -> Result<usize, EngineError> {
        if x >= self.side || y >= self.side {
            return Err(EngineError::new(EngineErrorKind::IndexOutOfRange {
                x,
                y,
                side: self.side,
            }));
        }
        Ok(y * self.side + x)
    }

    /// Gets the square at `(x, y)`.
    pub fn symbol_at(&self, x: usize, y: usize) -> Result<Square, EngineError> {
        let index = self.index(x, y)?;
        Ok(self.squares[index])
    }

    /// Overwrites the square at `(x, y)` without checking what was there.
    #[instrument(skip(self))]
    pub fn set_symbol_at(&mut self, x: usize, y: usize, square: Square) -> Result<(), EngineError> {
        let index = self.index(x, y)?;
        self.squares[index] = square;
        Ok(())
    }

    /// Checks if the square at `(x, y)` is empty.
    pub fn is_empty_at(&self, x: usize, y: usize) -> Result<bool, EngineError> {
        Ok(self.symbol_at(x, y)? == Square::Empty)
    }

    /// Checks if every square holds a mark.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|s| *s != Square::Empty)
    }

    /// Iterates the empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        let side = self.side;
        self.squares
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == Square::Empty)
            .map(move |(i, _)| Coordinate::new(i % side, i / side))
    }

    /// Returns the first line (in catalog order) fully marked by `player`.
    #[instrument(skip(self))]
    pub fn winning_line_for(&self, player: Player) -> Option<Line> {
        self.lines
            .iter()
            .find(|line| {
                line.iter()
                    .all(|c| self.squares[c.y * self.side + c.x].is(player))
            })
            .cloned()
    }

    /// Flattens the board to its row-major symbol string.
    pub fn serialize(&self) -> String {
        self.squares.iter().map(|s| s.symbol()).collect()
    }

    /// Formats the board as a human-readable grid.
    pub fn display(&self) -> String {
        self.squares
            .chunks(self.side)
            .map(|row| {
                row.iter()
                    .map(|s| s.symbol().to_string())
                    .collect::<Vec<_>>()
                    .join("|")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Board {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.serialize())
    }
}

fn winning_lines(side: usize) -> Vec<Line> {
    let row = |y: usize| (0..side).map(|x| Coordinate::new(x, y)).collect::<Line>();
    let column = |x: usize| (0..side).map(|y| Coordinate::new(x, y)).collect::<Line>();
    let rows = (0..side).map(row);
    let columns = (0..side).map(column);
    let down_right: Line = (0..side).map(|i| Coordinate::new(i, i)).collect();
    let up_right: Line = (0..side).map(|i| Coordinate::new(i, side - 1 - i)).collect();
    rows.chain(columns).chain([down_right, up_right]).collect()
}
