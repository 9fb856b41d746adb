//! Async session: drives a [`Game`] and fetches robot moves in the background.

use crate::provider::MoveProvider;
use std::sync::Arc;
use std::time::Duration;
use strictly_tictactoe::{
    Coordinate, EngineError, Game, MoveRequest, ProviderFailure, RandomSource, Resolution,
    ThreadRandom, Ticket,
};
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info, instrument, warn};

/// Robot reply travelling back from the request task.
#[derive(Debug)]
struct RobotReply {
    ticket: Ticket,
    outcome: Result<Coordinate, ProviderFailure>,
}

/// Robot request task still owed a reply.
#[derive(Debug)]
struct InFlight {
    ticket: Ticket,
    handle: JoinHandle<()>,
}

/// What woke [`Session::await_robot_move`].
enum Wake {
    Reply(Option<RobotReply>),
    Finished(Result<(), JoinError>),
}

/// One player's session against the robot.
///
/// Every robot move request runs as a spawned task that reports back over a channel.
/// Starting a new game aborts the task in flight, and any reply that still arrives is
/// discarded by its ticket. A request task that dies without replying counts as a provider
/// failure. Must be used inside a tokio runtime.
pub struct Session<R = ThreadRandom> {
    game: Game<R>,
    provider: Arc<dyn MoveProvider>,
    delay: Duration,
    replies_tx: mpsc::UnboundedSender<RobotReply>,
    replies_rx: mpsc::UnboundedReceiver<RobotReply>,
    in_flight: Option<InFlight>,
}

impl Session<ThreadRandom> {
    /// Creates a session with the thread-local random generator.
    pub fn new(provider: Arc<dyn MoveProvider>, delay: Duration) -> Self {
        Self::with_game(Game::new(), provider, delay)
    }
}

impl<R: RandomSource> Session<R> {
    /// Creates a session around an existing game.
    pub fn with_game(game: Game<R>, provider: Arc<dyn MoveProvider>, delay: Duration) -> Self {
        let (replies_tx, replies_rx) = mpsc::unbounded_channel();
        Self {
            game,
            provider,
            delay,
            replies_tx,
            replies_rx,
            in_flight: None,
        }
    }

    /// Returns the game for queries.
    pub fn game(&self) -> &Game<R> {
        &self.game
    }

    /// Returns the robot provider's name.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Returns true while a robot request task is running or its reply is unread.
    pub fn has_pending_request(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Starts a new game, cancelling any outstanding robot request.
    #[instrument(skip(self), fields(provider = %self.provider.name()))]
    pub fn start_new_game(&mut self) {
        self.cancel_in_flight();
        if let Some(request) = self.game.new_game() {
            self.dispatch(request);
        }
    }

    /// Plays the human's move; the robot is asked for its reply if the game continues.
    ///
    /// # Errors
    ///
    /// Propagates the game's error when the move is not allowed. Nothing is dispatched.
    #[instrument(skip(self))]
    pub fn submit_human_move(&mut self, x: usize, y: usize) -> Result<(), EngineError> {
        if let Some(request) = self.game.apply_human_move(x, y)? {
            self.dispatch(request);
        }
        Ok(())
    }

    /// Waits for the outstanding robot move and applies it.
    ///
    /// Returns `None` when no robot request is outstanding. Stale replies are skipped.
    /// If the request task panics, the game moves to the error phase.
    #[instrument(skip(self))]
    pub async fn await_robot_move(&mut self) -> Option<Resolution> {
        loop {
            let in_flight = self.in_flight.as_mut()?;
            let wake = tokio::select! {
                biased;
                reply = self.replies_rx.recv() => Wake::Reply(reply),
                joined = &mut in_flight.handle => Wake::Finished(joined),
            };

            match wake {
                Wake::Reply(reply) => {
                    if let Some(resolution) = self.resolve(reply?) {
                        return Some(resolution);
                    }
                }
                Wake::Finished(Ok(())) => {
                    // The task sends before it returns, so its reply is already queued.
                    self.in_flight = None;
                    while let Ok(reply) = self.replies_rx.try_recv() {
                        if let Some(resolution) = self.resolve(reply) {
                            return Some(resolution);
                        }
                    }
                    return None;
                }
                Wake::Finished(Err(err)) => {
                    let ticket = self.in_flight.take()?.ticket;
                    warn!(error = %err, "Robot request task died without replying");
                    let failure = ProviderFailure::new(format!("robot request task failed: {err}"));
                    let resolution = self.game.resolve_robot_move(ticket, Err(failure));
                    info!(?resolution, phase = %self.game.phase(), "Robot move resolved");
                    return Some(resolution);
                }
            }
        }
    }

    /// Applies one reply; `None` when it was stale.
    fn resolve(&mut self, reply: RobotReply) -> Option<Resolution> {
        let resolution = self.game.resolve_robot_move(reply.ticket, reply.outcome);
        if resolution == Resolution::Discarded {
            return None;
        }
        self.in_flight = None;
        info!(?resolution, phase = %self.game.phase(), "Robot move resolved");
        Some(resolution)
    }

    fn cancel_in_flight(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            debug!("Cancelling outstanding robot request");
            in_flight.handle.abort();
        }
    }

    fn dispatch(&mut self, request: MoveRequest) {
        self.cancel_in_flight();
        let provider = Arc::clone(&self.provider);
        let replies_tx = self.replies_tx.clone();
        let delay = self.delay;
        let ticket = request.ticket;
        debug!(?ticket, board = %request.board, "Dispatching robot request");
        let handle = tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            let outcome = provider
                .request_move(&request)
                .await
                .map_err(ProviderFailure::from);
            // Receiver lives as long as the session; a send error means it is gone.
            let _ = replies_tx.send(RobotReply {
                ticket: request.ticket,
                outcome,
            });
        });
        self.in_flight = Some(InFlight { ticket, handle });
    }
}

impl<R> Drop for Session<R> {
    fn drop(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.handle.abort();
        }
    }
}
