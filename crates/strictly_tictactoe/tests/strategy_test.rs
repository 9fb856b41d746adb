//! Tests for line strategies.

use strictly_tictactoe::{Board, Coordinate, EngineErrorKind, LineEvaluation, LineStrategy, Player};

fn evaluate(strategy: LineStrategy, symbols: &str) -> LineEvaluation {
    let board = Board::parse(symbols).unwrap();
    strategy.evaluate(&board).unwrap()
}

fn live(x: usize, y: usize, steps: usize) -> LineEvaluation {
    LineEvaluation {
        target: Some(Coordinate::new(x, y)),
        steps,
    }
}

mod horizontal {
    use super::*;

    fn row(y: usize) -> LineStrategy {
        LineStrategy::horizontal((0, y), Player::O, Player::X)
    }

    #[test]
    fn test_empty_board() {
        assert_eq!(evaluate(row(0), "---------"), live(0, 0, 3));
    }

    #[test]
    fn test_full_of_opponent() {
        assert_eq!(evaluate(row(0), "XXXXXXXXX"), LineEvaluation::DEAD);
    }

    #[test]
    fn test_full_of_self() {
        assert_eq!(evaluate(row(0), "OOOOOOOOO"), LineEvaluation::DEAD);
    }

    #[test]
    fn test_one_step_left() {
        assert_eq!(evaluate(row(0), "OO-XXXXXX"), live(2, 0, 1));
    }

    #[test]
    fn test_opponent_rows_dead() {
        assert_eq!(evaluate(row(1), "OO-XXXXXX"), LineEvaluation::DEAD);
        assert_eq!(evaluate(row(2), "OO-XXXXXX"), LineEvaluation::DEAD);
    }

    #[test]
    fn test_first_empty_is_target() {
        assert_eq!(evaluate(row(1), "XO-O--XXO"), live(1, 1, 2));
        assert_eq!(evaluate(row(2), "XO----OO-"), live(2, 2, 1));
    }
}

mod vertical {
    use super::*;

    fn column(x: usize) -> LineStrategy {
        LineStrategy::vertical((x, 0), Player::O, Player::X)
    }

    #[test]
    fn test_empty_board() {
        assert_eq!(evaluate(column(0), "---------"), live(0, 0, 3));
    }

    #[test]
    fn test_full_boards() {
        assert_eq!(evaluate(column(0), "XXXXXXXXX"), LineEvaluation::DEAD);
        assert_eq!(evaluate(column(0), "OOOOOOOOO"), LineEvaluation::DEAD);
    }

    #[test]
    fn test_one_step_left() {
        assert_eq!(evaluate(column(0), "OXXOXX-XX"), live(0, 2, 1));
        assert_eq!(evaluate(column(1), "OOXO-X-OX"), live(1, 1, 1));
    }

    #[test]
    fn test_opponent_columns_dead() {
        assert_eq!(evaluate(column(1), "OXXOXX-XX"), LineEvaluation::DEAD);
        assert_eq!(evaluate(column(2), "OXXOXX-XX"), LineEvaluation::DEAD);
    }

    #[test]
    fn test_first_empty_kept() {
        assert_eq!(evaluate(column(2), "OO-O-O-O-"), live(2, 0, 2));
    }
}

mod diagonal {
    use super::*;

    fn down_right() -> LineStrategy {
        LineStrategy::diagonal((0, 0), Player::O, Player::X)
    }

    fn up_right() -> LineStrategy {
        LineStrategy::diagonal((0, 2), Player::O, Player::X)
    }

    #[test]
    fn test_empty_board() {
        assert_eq!(evaluate(down_right(), "---------"), live(0, 0, 3));
        assert_eq!(evaluate(up_right(), "---------"), live(0, 2, 3));
    }

    #[test]
    fn test_full_boards() {
        assert_eq!(evaluate(down_right(), "XXXXXXXXX"), LineEvaluation::DEAD);
        assert_eq!(evaluate(down_right(), "OOOOOOOOO"), LineEvaluation::DEAD);
    }

    #[test]
    fn test_down_right() {
        assert_eq!(evaluate(down_right(), "OO-X-XXX-"), live(1, 1, 2));
    }

    #[test]
    fn test_up_right() {
        assert_eq!(evaluate(up_right(), "OO-X-XXX-"), LineEvaluation::DEAD);
        assert_eq!(evaluate(up_right(), "OO-X-X-X-"), live(0, 2, 3));
    }

    #[test]
    fn test_invalid_origin() {
        let board = Board::new();
        let err = LineStrategy::diagonal((1, 0), Player::O, Player::X)
            .evaluate(&board)
            .unwrap_err();
        assert_eq!(err.kind(), &EngineErrorKind::InvalidOrigin(Coordinate::new(1, 0)));
    }
}

#[test]
fn test_opponent_anywhere_kills_line() {
    // Opponent in first, middle and last position of the top row.
    for symbols in ["XOO------", "OXO------", "OOX------", "X--------", "--X------"] {
        let strategy = LineStrategy::horizontal((0, 0), Player::O, Player::X);
        assert_eq!(evaluate(strategy, symbols), LineEvaluation::DEAD, "{symbols}");
    }
}

#[test]
fn test_out_of_range_origin() {
    let board = Board::new();
    let err = LineStrategy::horizontal((0, 3), Player::X, Player::O)
        .evaluate(&board)
        .unwrap_err();
    assert!(matches!(err.kind(), EngineErrorKind::IndexOutOfRange { .. }));
}

#[test]
fn test_evaluation_is_pure() {
    let board = Board::parse("XO-O--XXO").unwrap();
    for strategy in LineStrategy::all(3, Player::O, Player::X) {
        assert_eq!(
            strategy.evaluate(&board).unwrap(),
            strategy.evaluate(&board).unwrap()
        );
    }
    assert_eq!(board.serialize(), "XO-O--XXO");
}

#[test]
fn test_larger_board_lines() {
    let board = Board::parse("X----X------O--X").unwrap();
    let strategy = LineStrategy::diagonal((0, 0), Player::X, Player::O);
    let evaluation = strategy.evaluate(&board).unwrap();
    assert_eq!(evaluation, live(2, 2, 1));
}
