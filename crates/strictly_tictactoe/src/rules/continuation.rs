//! Continuation check: can a player still complete any line?

use super::strategy::{LineEvaluation, LineStrategy};
use crate::board::Board;
use crate::error::EngineError;
use crate::types::Player;
use tracing::{debug, instrument};

/// Evaluates every line for `player` against `opponent` and returns the best one.
///
/// Returns `None` only for a board without lines, which `Board` never produces.
#[instrument(skip(board), fields(board = %board))]
pub fn best_line(
    player: Player,
    opponent: Player,
    board: &Board,
) -> Result<Option<LineEvaluation>, EngineError> {
    let evaluations = LineStrategy::all(board.side(), player, opponent)
        .iter()
        .map(|strategy| strategy.evaluate(board))
        .collect::<Result<Vec<_>, _>>()?;
    let best = evaluations
        .into_iter()
        .min_by(LineEvaluation::priority_cmp);
    debug!(?best, "Best line selected");
    Ok(best)
}

/// Returns true if `player` could still complete some line against `opponent`.
#[instrument(skip(board), fields(board = %board))]
pub fn can_still_win(player: Player, opponent: Player, board: &Board) -> Result<bool, EngineError> {
    Ok(best_line(player, opponent, board)?.is_some_and(|best| best.is_live()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coordinate;

    #[test]
    fn test_empty_board_can_continue() {
        let board = Board::new();
        assert!(can_still_win(Player::X, Player::O, &board).unwrap());
        assert!(can_still_win(Player::O, Player::X, &board).unwrap());
    }

    #[test]
    fn test_blocked_board_cannot_continue() {
        let board = Board::parse("XOXOXOOXO").unwrap();
        assert!(!can_still_win(Player::X, Player::O, &board).unwrap());
        assert!(!can_still_win(Player::O, Player::X, &board).unwrap());
    }

    #[test]
    fn test_best_line_prefers_one_step() {
        // X X -
        // - O -
        // - - O
        let board = Board::parse("XX--O---O").unwrap();
        let best = best_line(Player::X, Player::O, &board).unwrap().unwrap();
        assert_eq!(best.steps, 1);
        assert_eq!(best.target, Some(Coordinate::new(2, 0)));
    }

    #[test]
    fn test_only_open_line_counts() {
        // Only the down-right diagonal is still open for X.
        let board = Board::parse("XOXOXO-X-").unwrap();
        assert!(can_still_win(Player::X, Player::O, &board).unwrap());
        assert!(!can_still_win(Player::O, Player::X, &board).unwrap());
    }
}
