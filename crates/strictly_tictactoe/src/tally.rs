//! Score counters kept across games within a session.

use serde::{Deserialize, Serialize};

/// Wins and ties since the session started. Never reset by a new game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreTally {
    human_wins: u32,
    robot_wins: u32,
    ties: u32,
}

impl ScoreTally {
    /// Games won by the human.
    pub fn human_wins(&self) -> u32 {
        self.human_wins
    }

    /// Games won by the robot.
    pub fn robot_wins(&self) -> u32 {
        self.robot_wins
    }

    /// Games that ended without a winner.
    pub fn ties(&self) -> u32 {
        self.ties
    }

    /// Total concluded games.
    pub fn games(&self) -> u32 {
        self.human_wins + self.robot_wins + self.ties
    }

    pub(crate) fn record_human_win(&mut self) {
        self.human_wins += 1;
    }

    pub(crate) fn record_robot_win(&mut self) {
        self.robot_wins += 1;
    }

    pub(crate) fn record_tie(&mut self) {
        self.ties += 1;
    }
}

impl std::fmt::Display for ScoreTally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "human {} / robot {} / ties {}",
            self.human_wins, self.robot_wins, self.ties
        )
    }
}
