use super::board::{Board, empty_cells, is_draw};
use super::types::Mark;
use super::win_detector::check_win;
use crate::error::{EngineError, Result};
use crate::log_debug;

const WIN_SCORE: i32 = 10;

/// Outcome of a full game-tree search from the AI mark's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// `None` when the root is already terminal.
    pub best_move: Option<usize>,
    /// `10 - depth` for an AI win, `-10 + depth` for a loss, 0 for a draw.
    pub score: i32,
    /// Nodes visited, root included.
    pub nodes: u64,
}

/// Minimax with alpha-beta pruning. The AI mark is to move at the root and
/// maximizes; on equal scores the lowest cell index wins.
pub fn search(board: &Board, ai_mark: Mark) -> Result<SearchResult> {
    let result = Searcher::new(ai_mark, true)?.run(board);
    if let Ok(result) = &result {
        log_debug!(
            "alpha-beta search for {}: move {:?}, score {}, {} nodes",
            ai_mark,
            result.best_move,
            result.score,
            result.nodes
        );
    }
    result
}

/// Same scoring and move ordering as [`search`], without cut-offs.
pub fn search_exhaustive(board: &Board, ai_mark: Mark) -> Result<SearchResult> {
    Searcher::new(ai_mark, false)?.run(board)
}

struct Searcher {
    ai_mark: Mark,
    opponent_mark: Mark,
    prune: bool,
    nodes: u64,
}

impl Searcher {
    fn new(ai_mark: Mark, prune: bool) -> Result<Self> {
        let opponent_mark = ai_mark.opponent().ok_or(EngineError::InvalidMark)?;
        Ok(Self {
            ai_mark,
            opponent_mark,
            prune,
            nodes: 0,
        })
    }

    fn run(mut self, board: &Board) -> Result<SearchResult> {
        let (best_move, score) = self.minimax(*board, self.ai_mark, 0, i32::MIN, i32::MAX);
        Ok(SearchResult {
            best_move,
            score,
            nodes: self.nodes,
        })
    }

    fn terminal_score(&self, board: &Board, depth: i32) -> Option<i32> {
        match check_win(board) {
            Some(mark) if mark == self.opponent_mark => Some(-WIN_SCORE + depth),
            Some(mark) if mark == self.ai_mark => Some(WIN_SCORE - depth),
            _ if is_draw(board) => Some(0),
            _ => None,
        }
    }

    // Each call owns its board copy; children get their own copy via `with_mark`.
    fn minimax(
        &mut self,
        board: Board,
        to_move: Mark,
        depth: i32,
        mut alpha: i32,
        mut beta: i32,
    ) -> (Option<usize>, i32) {
        self.nodes += 1;

        if let Some(score) = self.terminal_score(&board, depth) {
            return (None, score);
        }

        let maximizing = to_move == self.ai_mark;
        let next_to_move = if maximizing {
            self.opponent_mark
        } else {
            self.ai_mark
        };

        let mut best_move = None;
        let mut best_score = if maximizing { i32::MIN } else { i32::MAX };

        for index in empty_cells(&board) {
            let child = board.with_mark(index, to_move);
            let (_, score) = self.minimax(child, next_to_move, depth + 1, alpha, beta);

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_move = Some(index);
                }
                alpha = alpha.max(score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = Some(index);
                }
                beta = beta.min(score);
            }

            if self.prune && alpha >= beta {
                break;
            }
        }

        (best_move, best_score)
    }
}
