use super::board::Board;
use super::types::Mark;
use super::win_detector::{WINNING_COMBINATIONS, check_win};
use crate::error::{EngineError, Result};

/// Checks that `board` can arise from legal alternating play with
/// `first_mark` moving first. Move selection does not require this; the
/// session uses it to accept a supplied starting position.
pub fn validate_position(board: &Board, first_mark: Mark) -> Result<()> {
    let second_mark = first_mark.opponent().ok_or(EngineError::InvalidMark)?;
    let x_count = board.count(Mark::X);
    let o_count = board.count(Mark::O);
    let first_count = board.count(first_mark);
    let second_count = board.count(second_mark);

    if first_count != second_count && first_count != second_count + 1 {
        return Err(EngineError::InvalidMarkCounts { x_count, o_count });
    }

    let owns_line = |mark: Mark| {
        WINNING_COMBINATIONS
            .iter()
            .any(|line| line.iter().all(|&index| board.get(index) == Some(mark)))
    };
    if owns_line(Mark::X) && owns_line(Mark::O) {
        return Err(EngineError::BothPlayersWon);
    }

    // The winner must have made the last move.
    match check_win(board) {
        Some(mark) if mark == first_mark && first_count != second_count + 1 => {
            Err(EngineError::InvalidMarkCounts { x_count, o_count })
        }
        Some(mark) if mark == second_mark && first_count != second_count => {
            Err(EngineError::InvalidMarkCounts { x_count, o_count })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_empty_board_is_valid() {
        assert_eq!(validate_position(&Board::new(), Mark::X), Ok(()));
        assert_eq!(validate_position(&Board::new(), Mark::O), Ok(()));
    }

    #[test]
    fn test_alternating_counts_are_valid() {
        assert_eq!(validate_position(&board("X........"), Mark::X), Ok(()));
        assert_eq!(validate_position(&board("XO......."), Mark::X), Ok(()));
        assert_eq!(validate_position(&board("O........"), Mark::O), Ok(()));
    }

    #[test]
    fn test_second_player_ahead_is_invalid() {
        assert_eq!(
            validate_position(&board("O........"), Mark::X),
            Err(EngineError::InvalidMarkCounts {
                x_count: 0,
                o_count: 1
            })
        );
    }

    #[test]
    fn test_first_player_two_ahead_is_invalid() {
        assert!(validate_position(&board("XX......."), Mark::X).is_err());
    }

    #[test]
    fn test_both_players_winning_is_invalid() {
        assert_eq!(
            validate_position(&board("XXXOOO..."), Mark::X),
            Err(EngineError::BothPlayersWon)
        );
    }

    #[test]
    fn test_win_must_come_from_last_mover() {
        // X completed the row but O moved after.
        assert!(validate_position(&board("XXXOO.O.."), Mark::X).is_err());
        assert_eq!(validate_position(&board("XXXOO...."), Mark::X), Ok(()));
    }

    #[test]
    fn test_empty_first_mark_is_rejected() {
        assert_eq!(
            validate_position(&Board::new(), Mark::Empty),
            Err(EngineError::InvalidMark)
        );
    }
}
