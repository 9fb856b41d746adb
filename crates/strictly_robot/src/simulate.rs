//! Headless matches between a scripted human and the robot.

use crate::provider::MoveProvider;
use crate::session::Session;
use anyhow::{Context, bail};
use std::sync::Arc;
use std::time::Duration;
use strictly_tictactoe::ScoreTally;
use tracing::{info, instrument, warn};

/// Plays `games` full games and returns the final tally.
///
/// The human's moves come from `human`, the robot's from `robot`. A game that ends in
/// the error phase is logged and skipped; it does not count towards the tally.
#[instrument(skip(robot, human), fields(robot = %robot.name(), human = %human.name()))]
pub async fn simulate(
    games: u32,
    robot: Arc<dyn MoveProvider>,
    human: Arc<dyn MoveProvider>,
    delay: Duration,
) -> anyhow::Result<ScoreTally> {
    let mut session = Session::new(robot, delay);
    let mut errors = 0u32;

    for number in 1..=games {
        session.start_new_game();
        loop {
            let game = session.game();
            if game.is_game_over() {
                info!(number, status = game.status_message(), "Game finished");
                break;
            }
            if game.is_error() {
                errors += 1;
                warn!(number, "Game ended in error");
                break;
            }

            if game.is_waiting_for_robot() {
                if session.await_robot_move().await.is_none() {
                    bail!("Robot turn without a pending request in game {number}");
                }
                continue;
            }

            let Some(request) = game.current_request() else {
                bail!("Game {number} stalled in phase {}", game.phase());
            };
            let cell = human
                .request_move(&request)
                .await
                .with_context(|| format!("Human provider failed in game {number}"))?;
            session
                .submit_human_move(cell.x, cell.y)
                .with_context(|| format!("Human move {cell} rejected in game {number}"))?;
        }
    }

    let tally = *session.game().tally();
    info!(%tally, errors, "Simulation complete");
    Ok(tally)
}
