//! Command-line interface for strictly_robot.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Robot - human vs robot tic-tac-toe driver
#[derive(Parser, Debug)]
#[command(name = "strictly_robot")]
#[command(about = "Plays tic-tac-toe against a remote robot", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Where robot moves come from
#[derive(Args, Debug, Clone)]
pub struct RobotArgs {
    /// Path to robot config file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the robot endpoint URL
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Use a local random robot instead of the remote endpoint
    #[arg(long)]
    pub local: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play full games with a random human against the robot and print the tally
    Simulate {
        /// Number of games to play
        #[arg(short, long, default_value = "1")]
        games: u32,

        /// Robot selection
        #[command(flatten)]
        robot: RobotArgs,
    },

    /// Ask the robot for its move on a single board
    Ask {
        /// Row-major board string, e.g. "X---O----"
        #[arg(short, long)]
        board: String,

        /// Robot selection
        #[command(flatten)]
        robot: RobotArgs,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simulate() {
        let cli = Cli::parse_from(["strictly_robot", "simulate", "--games", "3", "--local"]);
        match cli.command {
            Command::Simulate { games, robot } => {
                assert_eq!(games, 3);
                assert!(robot.local);
                assert!(robot.endpoint.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_ask_with_endpoint() {
        let cli = Cli::parse_from([
            "strictly_robot",
            "ask",
            "--board",
            "X---O----",
            "--endpoint",
            "http://localhost:9000/robot",
        ]);
        match cli.command {
            Command::Ask { board, robot } => {
                assert_eq!(board, "X---O----");
                assert_eq!(
                    robot.endpoint.as_deref(),
                    Some("http://localhost:9000/robot")
                );
                assert!(!robot.local);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
