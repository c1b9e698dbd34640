use std::fmt;
use std::str::FromStr;

use super::types::Mark;
use crate::error::{EngineError, Result};

pub const CELL_COUNT: usize = 9;

/// A 3x3 board, row-major: index 0 is the top-left cell, 8 the bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [Mark; CELL_COUNT],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [Mark::Empty; CELL_COUNT],
        }
    }

    pub fn from_cells(cells: &[Mark]) -> Result<Self> {
        let cells: [Mark; CELL_COUNT] =
            cells
                .try_into()
                .map_err(|_| EngineError::InvalidBoardLength {
                    expected: CELL_COUNT,
                    got: cells.len(),
                })?;
        Ok(Self { cells })
    }

    pub fn cells(&self) -> &[Mark; CELL_COUNT] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied()
    }

    pub fn is_empty_at(&self, index: usize) -> bool {
        self.get(index) == Some(Mark::Empty)
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|&&cell| cell == mark).count()
    }

    /// Returns a copy of the board with `mark` placed at `index`.
    pub fn place(&self, index: usize, mark: Mark) -> Result<Board> {
        if mark == Mark::Empty {
            return Err(EngineError::InvalidMark);
        }
        match self.get(index) {
            None => Err(EngineError::PositionOutOfBounds { position: index }),
            Some(Mark::Empty) => Ok(self.with_mark(index, mark)),
            Some(_) => Err(EngineError::CellOccupied { position: index }),
        }
    }

    /// Unchecked copy-and-place used on hot paths where `index` came from `empty_cells`.
    pub(crate) fn with_mark(&self, index: usize, mark: Mark) -> Board {
        let mut next = *self;
        next.cells[index] = mark;
        next
    }

    pub fn empty_cells(&self) -> Vec<usize> {
        empty_cells(self)
    }

    pub fn is_full(&self) -> bool {
        is_draw(self)
    }
}

/// Indices of empty cells in ascending order.
pub fn empty_cells(board: &Board) -> Vec<usize> {
    board
        .cells
        .iter()
        .enumerate()
        .filter(|&(_, &cell)| cell == Mark::Empty)
        .map(|(index, _)| index)
        .collect()
}

/// True when no cell is empty. Says nothing about a winner; check that first.
pub fn is_draw(board: &Board) -> bool {
    board.cells.iter().all(|&cell| cell != Mark::Empty)
}

impl FromStr for Board {
    type Err = EngineError;

    /// Parses nine cell characters (`X`, `O`, and `.`, `-`, `_` or space for
    /// empty). `/` may separate rows and is ignored.
    fn from_str(s: &str) -> Result<Self> {
        let chars: Vec<char> = s.chars().filter(|&c| c != '/').collect();
        if chars.len() != CELL_COUNT {
            return Err(EngineError::InvalidBoardLength {
                expected: CELL_COUNT,
                got: chars.len(),
            });
        }

        let mut cells = [Mark::Empty; CELL_COUNT];
        for (position, &character) in chars.iter().enumerate() {
            cells[position] = Mark::from_char(character).ok_or(
                EngineError::InvalidCellCharacter {
                    character,
                    position,
                },
            )?;
        }
        Ok(Self { cells })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.cells.chunks(3).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for cell in chunk {
                write!(f, "{}", cell)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_all_empty() {
        let board = Board::new();
        assert_eq!(empty_cells(&board), (0..9).collect::<Vec<_>>());
        assert!(!is_draw(&board));
    }

    #[test]
    fn test_empty_cells_ascending() {
        let board: Board = "X.O.X.O..".parse().unwrap();
        assert_eq!(empty_cells(&board), vec![1, 3, 5, 7, 8]);
    }

    #[test]
    fn test_full_board_reports_draw_even_with_winner() {
        let board: Board = "XXXOOXXOO".parse().unwrap();
        assert!(is_draw(&board));
        assert!(empty_cells(&board).is_empty());
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert_eq!(
            "XO".parse::<Board>(),
            Err(EngineError::InvalidBoardLength {
                expected: 9,
                got: 2
            })
        );
    }

    #[test]
    fn test_parse_rejects_unknown_character() {
        assert_eq!(
            "XO.Z.....".parse::<Board>(),
            Err(EngineError::InvalidCellCharacter {
                character: 'Z',
                position: 3
            })
        );
    }

    #[test]
    fn test_parse_accepts_row_separators() {
        let board: Board = "XO./.X./..O".parse().unwrap();
        assert_eq!(board.get(0), Some(Mark::X));
        assert_eq!(board.get(4), Some(Mark::X));
        assert_eq!(board.get(8), Some(Mark::O));
    }

    #[test]
    fn test_from_cells_rejects_wrong_length() {
        let result = Board::from_cells(&[Mark::Empty; 8]);
        assert!(matches!(
            result,
            Err(EngineError::InvalidBoardLength { got: 8, .. })
        ));
    }

    #[test]
    fn test_place_returns_new_board() {
        let board = Board::new();
        let next = board.place(4, Mark::X).unwrap();
        assert_eq!(board.get(4), Some(Mark::Empty));
        assert_eq!(next.get(4), Some(Mark::X));
    }

    #[test]
    fn test_place_rejects_bad_moves() {
        let board = Board::new().place(0, Mark::O).unwrap();
        assert_eq!(
            board.place(0, Mark::X),
            Err(EngineError::CellOccupied { position: 0 })
        );
        assert_eq!(
            board.place(9, Mark::X),
            Err(EngineError::PositionOutOfBounds { position: 9 })
        );
        assert_eq!(board.place(1, Mark::Empty), Err(EngineError::InvalidMark));
    }

    #[test]
    fn test_display_renders_three_rows() {
        let board: Board = "XO.......".parse().unwrap();
        assert_eq!(board.to_string(), "XO.\n...\n...");
    }
}
