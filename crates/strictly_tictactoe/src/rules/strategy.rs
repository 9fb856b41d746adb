//! Line strategies: how close a player is to completing one line.
//!
//! Each strategy walks the cells of one row, column or diagonal and reports how many
//! more marks the evaluating player needs there and which empty cell to claim next.

use crate::board::Board;
use crate::error::{EngineError, EngineErrorKind};
use crate::types::{Coordinate, Player, Square};
use std::cmp::Ordering;
use tracing::instrument;

/// Which line a strategy walks, identified by its origin cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Row `origin.y`, walked left to right.
    Horizontal {
        /// Any cell of the row; only `y` is used.
        origin: Coordinate,
    },
    /// Column `origin.x`, walked top to bottom.
    Vertical {
        /// Any cell of the column; only `x` is used.
        origin: Coordinate,
    },
    /// Down-right from `(0, 0)` or up-right from `(0, side - 1)`.
    Diagonal {
        /// First cell of the diagonal.
        origin: Coordinate,
    },
}

/// Scores a single line for a (player, opponent) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineStrategy {
    orientation: Orientation,
    player: Player,
    opponent: Player,
}

/// Result of evaluating one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineEvaluation {
    /// Best empty cell to claim next, `None` when the line is dead.
    pub target: Option<Coordinate>,
    /// Marks still needed to complete the line, 0 when the line is dead.
    pub steps: usize,
}

impl LineEvaluation {
    /// A line that can no longer be completed.
    pub const DEAD: Self = Self {
        target: None,
        steps: 0,
    };

    /// Returns true if the line can still be completed.
    pub fn is_live(&self) -> bool {
        self.target.is_some()
    }

    /// Priority order: `Less` means `self` is the better line.
    ///
    /// Dead lines rank below every live line. Among live lines one step from completion
    /// ranks best, otherwise fewer steps rank better.
    pub fn priority_cmp(&self, other: &Self) -> Ordering {
        match (self.is_live(), other.is_live()) {
            (false, false) => Ordering::Equal,
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (true, true) => match (self.steps == 1, other.steps == 1) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                (false, false) => self.steps.cmp(&other.steps),
            },
        }
    }
}

impl LineStrategy {
    /// Strategy for the row containing `origin`.
    pub fn horizontal(origin: impl Into<Coordinate>, player: Player, opponent: Player) -> Self {
        Self::new(
            Orientation::Horizontal {
                origin: origin.into(),
            },
            player,
            opponent,
        )
    }

    /// Strategy for the column containing `origin`.
    pub fn vertical(origin: impl Into<Coordinate>, player: Player, opponent: Player) -> Self {
        Self::new(
            Orientation::Vertical {
                origin: origin.into(),
            },
            player,
            opponent,
        )
    }

    /// Strategy for the diagonal starting at `origin`.
    ///
    /// Only `(0, 0)` and `(0, side - 1)` start a diagonal; any other origin fails with
    /// `InvalidOrigin` on evaluation.
    pub fn diagonal(origin: impl Into<Coordinate>, player: Player, opponent: Player) -> Self {
        Self::new(
            Orientation::Diagonal {
                origin: origin.into(),
            },
            player,
            opponent,
        )
    }

    fn new(orientation: Orientation, player: Player, opponent: Player) -> Self {
        Self {
            orientation,
            player,
            opponent,
        }
    }

    /// One strategy per line of a board with the given side: rows, columns, then both
    /// diagonals.
    pub fn all(side: usize, player: Player, opponent: Player) -> Vec<Self> {
        let rows = (0..side).map(|y| Self::horizontal((0, y), player, opponent));
        let columns = (0..side).map(|x| Self::vertical((x, 0), player, opponent));
        let diagonals = [
            Self::diagonal((0, 0), player, opponent),
            Self::diagonal((0, side.saturating_sub(1)), player, opponent),
        ];
        rows.chain(columns).chain(diagonals).collect()
    }

    /// Returns the orientation.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Returns the evaluating player.
    pub fn player(&self) -> Player {
        self.player
    }

    /// Returns the opponent.
    pub fn opponent(&self) -> Player {
        self.opponent
    }

    /// Cells of the line in traversal order.
    pub fn cells(&self, side: usize) -> Result<Vec<Coordinate>, EngineError> {
        let cells = match self.orientation {
            Orientation::Horizontal { origin } => {
                (0..side).map(|x| Coordinate::new(x, origin.y)).collect()
            }
            Orientation::Vertical { origin } => {
                (0..side).map(|y| Coordinate::new(origin.x, y)).collect()
            }
            Orientation::Diagonal { origin } if origin == Coordinate::new(0, 0) => {
                (0..side).map(|i| Coordinate::new(i, i)).collect()
            }
            Orientation::Diagonal { origin }
                if side > 0 && origin == Coordinate::new(0, side - 1) =>
            {
                (0..side).map(|i| Coordinate::new(i, side - 1 - i)).collect()
            }
            Orientation::Diagonal { origin } => {
                return Err(EngineError::new(EngineErrorKind::InvalidOrigin(origin)));
            }
        };
        Ok(cells)
    }

    /// Evaluates the line against the board in a single pass.
    ///
    /// The first empty cell becomes the target; an opponent mark kills the line and stops
    /// the scan.
    #[instrument(skip(board), fields(board = %board))]
    pub fn evaluate(&self, board: &Board) -> Result<LineEvaluation, EngineError> {
        let side = board.side();
        let mut target = None;
        let mut steps = side;
        for cell in self.cells(side)? {
            match board.symbol_at(cell.x, cell.y)? {
                Square::Occupied(p) if p == self.opponent => return Ok(LineEvaluation::DEAD),
                Square::Occupied(_) => steps -= 1,
                Square::Empty => {
                    target.get_or_insert(cell);
                }
            }
        }
        if target.is_none() {
            steps = 0;
        }
        Ok(LineEvaluation { target, steps })
    }
}
