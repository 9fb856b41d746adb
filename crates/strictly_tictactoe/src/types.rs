//! Core domain types for tic-tac-toe.

use crate::error::{EngineError, EngineErrorKind};
use serde::{Deserialize, Serialize};

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
pub enum Player {
    /// Player X (the human seat).
    X,
    /// Player O (the robot seat).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Symbol used for this player on the wire and in board strings.
    pub fn symbol(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl Square {
    /// Character for this square in a serialized board (`-`, `X` or `O`).
    pub fn symbol(self) -> char {
        match self {
            Square::Empty => '-',
            Square::Occupied(player) => player.symbol(),
        }
    }

    /// Returns true if the square holds the given player's mark.
    pub fn is(self, player: Player) -> bool {
        self == Square::Occupied(player)
    }
}

impl TryFrom<char> for Square {
    type Error = EngineError;

    #[track_caller]
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '-' => Ok(Square::Empty),
            'X' => Ok(Square::Occupied(Player::X)),
            'O' => Ok(Square::Occupied(Player::O)),
            other => Err(EngineError::new(EngineErrorKind::InvalidSymbol(other))),
        }
    }
}

/// Cell address on the board, `x` is the column and `y` the row.
///
/// Serializes as `{"x": .., "y": ..}`, which is also the reply shape of the remote robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    /// Column, counted from the left.
    pub x: usize,
    /// Row, counted from the top.
    pub y: usize,
}

impl Coordinate {
    /// Creates a coordinate.
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
