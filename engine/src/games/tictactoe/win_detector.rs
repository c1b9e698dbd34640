use super::board::Board;
use super::types::{Mark, WinningLine};

/// Rows, then columns, then diagonals. Scan order decides which line is
/// reported when a board has more than one.
pub const WINNING_COMBINATIONS: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

pub fn check_winner(board: &Board) -> Option<WinningLine> {
    let cells = board.cells();
    WINNING_COMBINATIONS.iter().find_map(|&combination| {
        let [a, b, c] = combination;
        let mark = cells[a];
        if mark != Mark::Empty && mark == cells[b] && mark == cells[c] {
            Some(WinningLine::new(mark, combination))
        } else {
            None
        }
    })
}

pub fn check_win(board: &Board) -> Option<Mark> {
    check_winner(board).map(|line| line.mark)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(indices: &[usize], mark: Mark) -> Board {
        indices
            .iter()
            .fold(Board::new(), |board, &index| board.with_mark(index, mark))
    }

    #[test]
    fn test_every_combination_is_detected_for_both_marks() {
        for combination in WINNING_COMBINATIONS {
            for mark in [Mark::X, Mark::O] {
                let board = board_with(&combination, mark);
                assert_eq!(
                    check_winner(&board),
                    Some(WinningLine::new(mark, combination))
                );
            }
        }
    }

    #[test]
    fn test_only_the_eight_combinations_win() {
        // Every three-cell subset that is not a combination must not report a win.
        for a in 0..9 {
            for b in (a + 1)..9 {
                for c in (b + 1)..9 {
                    let board = board_with(&[a, b, c], Mark::X);
                    let expected = WINNING_COMBINATIONS.contains(&[a, b, c]);
                    assert_eq!(check_win(&board).is_some(), expected, "{:?}", [a, b, c]);
                }
            }
        }
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let board: Board = "XXO......".parse().unwrap();
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_empty_board_has_no_winner() {
        assert_eq!(check_winner(&Board::new()), None);
    }

    #[test]
    fn test_first_combination_in_scan_order_wins() {
        // Top row and left column both belong to X.
        let board: Board = "XXXXO.XO.".parse().unwrap();
        assert_eq!(check_winner(&board).map(|l| l.combination), Some([0, 1, 2]));
    }

    #[test]
    fn test_oracle_is_idempotent() {
        let board: Board = "XOXOXO...".parse().unwrap();
        let snapshot = board;
        assert_eq!(check_winner(&board), check_winner(&board));
        assert_eq!(board.empty_cells(), board.empty_cells());
        assert_eq!(board.is_full(), board.is_full());
        assert_eq!(board, snapshot);
    }
}
