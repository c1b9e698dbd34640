use super::board::{Board, is_draw};
use super::types::{GameStatus, Mark, WinningLine};
use super::validate::validate_position;
use super::win_detector::check_winner;
use crate::error::{EngineError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    pub first_mark: Mark,
    pub current_mark: Mark,
    pub status: GameStatus,
    pub last_move: Option<usize>,
    pub winning_line: Option<WinningLine>,
}

impl GameState {
    pub fn new(first_mark: Mark) -> Result<Self> {
        Self::from_position(Board::new(), first_mark)
    }

    /// Resumes a game from `board`. The side to move follows from the mark counts.
    pub fn from_position(board: Board, first_mark: Mark) -> Result<Self> {
        validate_position(&board, first_mark)?;
        let second_mark = first_mark.opponent().ok_or(EngineError::InvalidMark)?;
        let current_mark = if board.count(first_mark) > board.count(second_mark) {
            second_mark
        } else {
            first_mark
        };

        let mut state = Self {
            board,
            first_mark,
            current_mark,
            status: GameStatus::InProgress,
            last_move: None,
            winning_line: None,
        };
        state.check_game_over();
        Ok(state)
    }

    pub fn place_mark(&mut self, mark: Mark, index: usize) -> Result<()> {
        if self.status.is_over() {
            return Err(EngineError::GameOver);
        }

        if mark != self.current_mark {
            return Err(EngineError::NotYourTurn {
                expected: self.current_mark,
                got: mark,
            });
        }

        self.board = self.board.place(index, mark)?;
        self.last_move = Some(index);

        self.check_game_over();

        if self.status == GameStatus::InProgress {
            self.switch_turn();
        }

        Ok(())
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    fn switch_turn(&mut self) {
        if let Some(next) = self.current_mark.opponent() {
            self.current_mark = next;
        }
    }

    fn check_game_over(&mut self) {
        if let Some(line) = check_winner(&self.board) {
            self.status = match line.mark {
                Mark::X => GameStatus::XWon,
                Mark::O => GameStatus::OWon,
                Mark::Empty => unreachable!("winning lines never hold empty cells"),
            };
            self.winning_line = Some(line);
            return;
        }

        if is_draw(&self.board) {
            self.status = GameStatus::Draw;
        }
    }
}
