//! Session driver: background robot requests, cancellation and failure handling.

use std::sync::{Arc, Mutex};
use std::time::Duration;
use strictly_robot::{FirstEmptyCell, MoveProvider, ProviderError, RandomEmptyCell, Session};
use strictly_tictactoe::{
    Coordinate, EngineErrorKind, Game, HUMAN, MoveRequest, PROVIDER_FAILURE_MESSAGE, ROBOT,
    RandomSource, Resolution, Square,
};

/// Random source returning a scripted sequence of draws.
struct Draws(Vec<u32>);

impl RandomSource for Draws {
    fn int_inclusive(&mut self, min: u32, max: u32) -> u32 {
        let draw = if self.0.is_empty() { min } else { self.0.remove(0) };
        draw.clamp(min, max)
    }
}

const HUMAN_FIRST: u32 = 10;
const ROBOT_FIRST: u32 = 1;

/// Always answers the same cell.
struct Fixed(Coordinate);

#[async_trait::async_trait]
impl MoveProvider for Fixed {
    async fn request_move(&self, _request: &MoveRequest) -> Result<Coordinate, ProviderError> {
        Ok(self.0)
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// Never answers successfully.
struct Unreachable;

#[async_trait::async_trait]
impl MoveProvider for Unreachable {
    async fn request_move(&self, _request: &MoveRequest) -> Result<Coordinate, ProviderError> {
        Err(ProviderError::Transport("connection refused".to_string()))
    }

    fn name(&self) -> &str {
        "unreachable"
    }
}

/// Panics instead of answering.
struct Crashing;

#[async_trait::async_trait]
impl MoveProvider for Crashing {
    async fn request_move(&self, _request: &MoveRequest) -> Result<Coordinate, ProviderError> {
        panic!("robot crashed mid-request");
    }

    fn name(&self) -> &str {
        "crashing"
    }
}

/// Answers each request with the next scripted cell after its latency.
struct Scripted(Mutex<Vec<(Coordinate, Duration)>>);

#[async_trait::async_trait]
impl MoveProvider for Scripted {
    async fn request_move(&self, _request: &MoveRequest) -> Result<Coordinate, ProviderError> {
        let (cell, latency) = self.0.lock().unwrap().remove(0);
        tokio::time::sleep(latency).await;
        Ok(cell)
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

fn session(draws: Vec<u32>, provider: Arc<dyn MoveProvider>) -> Session<Draws> {
    Session::with_game(Game::with_random(Draws(draws)), provider, Duration::ZERO)
}

#[tokio::test]
async fn test_full_game_against_first_empty_cell() {
    let mut session = session(vec![HUMAN_FIRST], Arc::new(FirstEmptyCell::new("robot")));
    session.start_new_game();
    assert!(session.game().is_waiting_for_human());
    assert!(!session.has_pending_request());

    for (x, y, robot_cell) in [(0, 0, (1, 0)), (0, 1, (2, 0))] {
        session.submit_human_move(x, y).unwrap();
        assert!(session.game().is_waiting_for_robot());
        assert_eq!(session.await_robot_move().await, Some(Resolution::Applied));
        assert!(session.game().is_robot_at(robot_cell.0, robot_cell.1).unwrap());
        assert!(session.game().is_waiting_for_human());
    }

    session.submit_human_move(0, 2).unwrap();
    assert!(session.game().is_human_winner());
    assert!(!session.has_pending_request());
    assert_eq!(session.await_robot_move().await, None);
    assert_eq!(session.game().tally().human_wins(), 1);
}

#[tokio::test]
async fn test_robot_opens_when_drawn_first() {
    let mut session = session(vec![ROBOT_FIRST], Arc::new(FirstEmptyCell::new("robot")));
    session.start_new_game();
    assert!(session.game().is_waiting_for_robot());
    assert!(session.has_pending_request());

    assert_eq!(session.await_robot_move().await, Some(Resolution::Applied));
    assert_eq!(session.game().symbol_at(0, 0).unwrap(), Square::Occupied(ROBOT));
    assert!(session.game().is_waiting_for_human());
}

#[tokio::test]
async fn test_new_game_drops_outstanding_request() {
    let robot: Arc<dyn MoveProvider> = Arc::new(FirstEmptyCell::new("robot"));
    let mut session = Session::with_game(
        Game::with_random(Draws(vec![HUMAN_FIRST, ROBOT_FIRST])),
        robot,
        Duration::from_millis(50),
    );
    session.start_new_game();
    session.submit_human_move(1, 1).unwrap();
    let stale = session.game().ticket();

    session.start_new_game();
    assert_ne!(session.game().ticket(), stale);
    assert!(session.game().is_waiting_for_robot());

    assert_eq!(session.await_robot_move().await, Some(Resolution::Applied));
    let board = session.game().board();
    assert_eq!(board.serialize(), "O--------");
    assert_eq!(session.game().symbol_at(1, 1).unwrap(), Square::Empty);
}

#[tokio::test]
async fn test_queued_reply_from_previous_game_is_skipped() {
    let robot = Arc::new(Scripted(Mutex::new(vec![
        (Coordinate::new(0, 0), Duration::ZERO),
        (Coordinate::new(2, 2), Duration::from_millis(20)),
    ])));
    let mut session = session(vec![ROBOT_FIRST, ROBOT_FIRST], robot);
    session.start_new_game();
    let stale = session.game().ticket();

    // Let the first game's reply reach the channel unread.
    tokio::time::sleep(Duration::from_millis(50)).await;
    session.start_new_game();
    assert_ne!(session.game().ticket(), stale);

    assert_eq!(session.await_robot_move().await, Some(Resolution::Applied));
    assert_eq!(session.game().board().serialize(), "--------O");
    assert!(session.game().is_waiting_for_human());
    assert!(!session.has_pending_request());
}

#[tokio::test]
async fn test_crashed_robot_task_enters_error_phase() {
    let mut session = session(vec![ROBOT_FIRST, HUMAN_FIRST], Arc::new(Crashing));
    session.start_new_game();

    let resolution = tokio::time::timeout(Duration::from_secs(2), session.await_robot_move())
        .await
        .expect("robot turn should resolve");
    assert_eq!(resolution, Some(Resolution::Failed));
    assert!(session.game().is_error());
    assert_eq!(session.game().status_message(), PROVIDER_FAILURE_MESSAGE);
    assert!(!session.has_pending_request());
    assert_eq!(session.await_robot_move().await, None);

    session.start_new_game();
    assert!(session.game().is_waiting_for_human());
}

#[tokio::test]
async fn test_provider_failure_enters_error_phase() {
    let mut session = session(vec![HUMAN_FIRST, HUMAN_FIRST], Arc::new(Unreachable));
    session.start_new_game();
    session.submit_human_move(0, 0).unwrap();

    assert_eq!(session.await_robot_move().await, Some(Resolution::Failed));
    assert!(session.game().is_error());
    assert_eq!(session.game().status_message(), PROVIDER_FAILURE_MESSAGE);
    assert_eq!(session.game().symbol_at(0, 0).unwrap(), Square::Occupied(HUMAN));

    let err = session.submit_human_move(1, 1).unwrap_err();
    assert!(matches!(err.kind(), EngineErrorKind::InvalidTransition { .. }));

    session.start_new_game();
    assert!(session.game().is_waiting_for_human());
    assert_eq!(session.game().board().empty_cells().count(), 9);
}

#[tokio::test]
async fn test_unplayable_robot_cell_is_a_failure() {
    let mut session = session(vec![HUMAN_FIRST], Arc::new(Fixed(Coordinate::new(0, 0))));
    session.start_new_game();
    session.submit_human_move(0, 0).unwrap();

    assert_eq!(session.await_robot_move().await, Some(Resolution::Failed));
    assert!(session.game().is_error());
}

#[tokio::test]
async fn test_human_cannot_move_during_robot_turn() {
    let robot: Arc<dyn MoveProvider> = Arc::new(FirstEmptyCell::new("robot"));
    let mut session = Session::with_game(
        Game::with_random(Draws(vec![ROBOT_FIRST])),
        robot,
        Duration::from_millis(20),
    );
    session.start_new_game();

    let err = session.submit_human_move(2, 2).unwrap_err();
    assert!(matches!(err.kind(), EngineErrorKind::InvalidTransition { .. }));
    assert!(session.has_pending_request());
    assert_eq!(session.await_robot_move().await, Some(Resolution::Applied));
}

#[tokio::test]
async fn test_simulate_counts_every_game() {
    let robot: Arc<dyn MoveProvider> = Arc::new(FirstEmptyCell::new("robot"));
    let human: Arc<dyn MoveProvider> = Arc::new(RandomEmptyCell::new("human"));

    let tally = strictly_robot::simulate(5, robot, human, Duration::ZERO)
        .await
        .unwrap();
    assert_eq!(tally.games(), 5);
}
