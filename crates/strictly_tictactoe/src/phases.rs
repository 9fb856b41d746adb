//! Game phases for the human vs robot state machine.
//!
//! Exactly one phase is active at a time and it is replaced wholesale on every
//! transition.

use crate::types::{Coordinate, Player};
use serde::{Deserialize, Serialize};

/// Mark used by the human player.
pub const HUMAN: Player = Player::X;

/// Mark used by the robot player.
pub const ROBOT: Player = Player::O;

/// Status shown when the move provider fails.
pub const PROVIDER_FAILURE_MESSAGE: &str =
    "The connection to the remote server failed. Please play again later.";

/// Current macro-state of the game.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, strum::IntoStaticStr)]
pub enum Phase {
    /// No game started yet.
    #[default]
    Init,
    /// Waiting for the human to move.
    WaitingForHuman,
    /// Waiting for the robot's move to arrive from the move provider.
    WaitingForRobot,
    /// Game finished. A tie has no winner and an empty line.
    GameOver {
        /// Winning player, `None` for a tie.
        winner: Option<Player>,
        /// Cells of the winning line, empty for a tie.
        line: Vec<Coordinate>,
    },
    /// The move provider failed; only a new game recovers.
    Error {
        /// Human-readable message.
        message: String,
    },
}

impl Phase {
    /// Phase name for logs and errors.
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Returns true before the first game.
    pub fn is_init(&self) -> bool {
        matches!(self, Phase::Init)
    }

    /// Returns true while the human is to move.
    pub fn is_waiting_for_human(&self) -> bool {
        matches!(self, Phase::WaitingForHuman)
    }

    /// Returns true while a robot move is outstanding.
    pub fn is_waiting_for_robot(&self) -> bool {
        matches!(self, Phase::WaitingForRobot)
    }

    /// Returns true once the game has finished.
    pub fn is_game_over(&self) -> bool {
        matches!(self, Phase::GameOver { .. })
    }

    /// Returns true after a move provider failure.
    pub fn is_error(&self) -> bool {
        matches!(self, Phase::Error { .. })
    }

    /// Winner of a finished game.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Phase::GameOver { winner, .. } => *winner,
            _ => None,
        }
    }

    /// Winning line of a finished game, empty otherwise.
    pub fn winning_line(&self) -> &[Coordinate] {
        match self {
            Phase::GameOver { line, .. } => line,
            _ => &[],
        }
    }

    /// Status text for the presentation layer.
    pub fn status_message(&self) -> &str {
        match self {
            Phase::Init => "Click the button to start a new game.",
            Phase::WaitingForHuman => "It's your turn.",
            Phase::WaitingForRobot => "Remote player's turn.",
            Phase::GameOver {
                winner: Some(HUMAN),
                ..
            } => "The game is over and you won.",
            Phase::GameOver {
                winner: Some(ROBOT),
                ..
            } => "The game is over and the robot won.",
            Phase::GameOver { winner: None, .. } => "The game is over with no winner (tie).",
            Phase::Error { message } => message,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(Phase::Init.name(), "Init");
        assert_eq!(
            Phase::Error {
                message: "boom".to_string()
            }
            .name(),
            "Error"
        );
    }

    #[test]
    fn test_status_messages() {
        let tie = Phase::GameOver {
            winner: None,
            line: Vec::new(),
        };
        assert_eq!(tie.status_message(), "The game is over with no winner (tie).");
        assert!(tie.winning_line().is_empty());

        let error = Phase::Error {
            message: PROVIDER_FAILURE_MESSAGE.to_string(),
        };
        assert_eq!(error.status_message(), PROVIDER_FAILURE_MESSAGE);
    }

    #[test]
    fn test_winner_only_when_over() {
        assert_eq!(Phase::WaitingForRobot.winner(), None);
        let won = Phase::GameOver {
            winner: Some(ROBOT),
            line: vec![Coordinate::new(0, 0)],
        };
        assert_eq!(won.winner(), Some(ROBOT));
        assert_eq!(won.winning_line(), &[Coordinate::new(0, 0)]);
    }
}
