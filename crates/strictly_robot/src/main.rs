//! Strictly Robot - CLI
//!
//! Simulates games against the robot or asks it for a single move.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, RobotArgs};
use std::sync::Arc;
use std::time::Duration;
use strictly_robot::{HttpMoveProvider, MoveProvider, RandomEmptyCell, RobotConfig};
use strictly_tictactoe::{Board, Game, Phase, ThreadRandom};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Simulate { games, robot } => run_simulate(games, robot).await,
        Command::Ask { board, robot } => run_ask(board, robot).await,
    }
}

/// Resolves config file, environment and flags into a robot provider plus request delay.
#[instrument(skip_all, fields(local = args.local))]
fn build_robot(args: &RobotArgs) -> Result<(Arc<dyn MoveProvider>, Duration)> {
    let mut config = match &args.config {
        Some(path) => RobotConfig::from_file(path)?,
        None => RobotConfig::default(),
    }
    .apply_env();
    if let Some(endpoint) = &args.endpoint {
        config = config.with_endpoint(endpoint.clone());
    }

    if args.local {
        info!("Using local random robot");
        return Ok((Arc::new(RandomEmptyCell::new("local robot")), Duration::ZERO));
    }

    let provider = HttpMoveProvider::from_config(&config)
        .with_context(|| format!("Failed to build HTTP client for {}", config.endpoint()))?;
    Ok((Arc::new(provider), config.request_delay()))
}

/// Run a batch of simulated games
#[instrument(skip(args))]
async fn run_simulate(games: u32, args: RobotArgs) -> Result<()> {
    let (robot, delay) = build_robot(&args)?;
    let human: Arc<dyn MoveProvider> = Arc::new(RandomEmptyCell::new("random human"));

    let tally = strictly_robot::simulate(games, robot, human, delay).await?;
    println!("{tally}");
    Ok(())
}

/// Ask the robot for one move
#[instrument(skip(args))]
async fn run_ask(board: String, args: RobotArgs) -> Result<()> {
    let (robot, _) = build_robot(&args)?;
    let board = Board::parse(&board)?;
    println!("{}", board.display());

    let game = Game::with_position(board, Phase::WaitingForRobot, ThreadRandom);
    let request = game
        .current_request()
        .context("Robot is not to move on this board")?;
    let cell = robot.request_move(&request).await?;
    println!("{} plays {cell}", request.moving);
    Ok(())
}
