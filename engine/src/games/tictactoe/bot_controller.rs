use super::board::{Board, empty_cells};
use super::game_state::GameState;
use super::minimax::search;
use super::types::{Difficulty, Mark};
use super::win_detector::check_win;
use crate::error::{EngineError, Result};
use crate::games::MoveRng;
use crate::log_debug;

/// Share of medium-difficulty moves that use the full search instead of the heuristic ladder.
pub const DEFAULT_MEDIUM_SEARCH_PROBABILITY: f64 = 0.7;

const CENTER: usize = 4;
const CORNERS: [usize; 4] = [0, 2, 6, 8];
const EDGES: [usize; 4] = [1, 3, 5, 7];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BotInput {
    pub board: Board,
    pub ai_mark: Mark,
    pub medium_search_probability: f64,
}

impl BotInput {
    pub fn new(board: Board, ai_mark: Mark) -> Self {
        Self {
            board,
            ai_mark,
            medium_search_probability: DEFAULT_MEDIUM_SEARCH_PROBABILITY,
        }
    }

    pub fn with_medium_search_probability(mut self, probability: f64) -> Self {
        self.medium_search_probability = probability;
        self
    }

    pub fn from_game_state(state: &GameState) -> Self {
        Self::new(state.board, state.current_mark)
    }
}

/// Picks a move for `O` on `board`.
pub fn select_move<R: MoveRng + ?Sized>(
    board: &Board,
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<usize> {
    calculate_move(difficulty, &BotInput::new(*board, Mark::O), rng)
}

/// Picks a move for `input.ai_mark`. The result always indexes an empty cell.
///
/// Fails with [`EngineError::NoAvailableMoves`] on a full board and with
/// [`EngineError::GameOver`] when the board already has a winner.
pub fn calculate_move<R: MoveRng + ?Sized>(
    difficulty: Difficulty,
    input: &BotInput,
    rng: &mut R,
) -> Result<usize> {
    let opponent_mark = input.ai_mark.opponent().ok_or(EngineError::InvalidMark)?;
    let available_moves = playable_cells(&input.board)?;

    match difficulty {
        Difficulty::Easy => Ok(calculate_random_move(&available_moves, rng)),
        Difficulty::Medium => {
            let draw = rng.next_unit();
            if draw < input.medium_search_probability {
                log_debug!(
                    "medium: draw {:.3} < {:.3}, using search",
                    draw,
                    input.medium_search_probability
                );
                calculate_minimax_move(&input.board, input.ai_mark)
            } else {
                log_debug!("medium: draw {:.3}, using heuristics", draw);
                Ok(heuristic_move(
                    &input.board,
                    input.ai_mark,
                    opponent_mark,
                    &available_moves,
                    rng,
                ))
            }
        }
        Difficulty::Hard => calculate_minimax_move(&input.board, input.ai_mark),
    }
}

/// The medium-difficulty ladder on its own: win, block, centre, corner, edge, anything.
pub fn calculate_heuristic_move<R: MoveRng + ?Sized>(
    board: &Board,
    ai_mark: Mark,
    rng: &mut R,
) -> Result<usize> {
    let opponent_mark = ai_mark.opponent().ok_or(EngineError::InvalidMark)?;
    let available_moves = playable_cells(board)?;
    Ok(heuristic_move(
        board,
        ai_mark,
        opponent_mark,
        &available_moves,
        rng,
    ))
}

/// First empty cell (ascending) that completes a line for `mark`.
pub fn find_winning_move(board: &Board, mark: Mark) -> Option<usize> {
    if mark == Mark::Empty {
        return None;
    }
    empty_cells(board)
        .into_iter()
        .find(|&index| check_win(&board.with_mark(index, mark)) == Some(mark))
}

fn playable_cells(board: &Board) -> Result<Vec<usize>> {
    if check_win(board).is_some() {
        return Err(EngineError::GameOver);
    }
    let available_moves = empty_cells(board);
    if available_moves.is_empty() {
        return Err(EngineError::NoAvailableMoves);
    }
    Ok(available_moves)
}

fn calculate_random_move<R: MoveRng + ?Sized>(available_moves: &[usize], rng: &mut R) -> usize {
    available_moves[rng.pick_index(available_moves.len())]
}

fn calculate_minimax_move(board: &Board, ai_mark: Mark) -> Result<usize> {
    search(board, ai_mark)?
        .best_move
        .ok_or(EngineError::NoAvailableMoves)
}

fn heuristic_move<R: MoveRng + ?Sized>(
    board: &Board,
    ai_mark: Mark,
    opponent_mark: Mark,
    available_moves: &[usize],
    rng: &mut R,
) -> usize {
    if let Some(index) = find_winning_move(board, ai_mark) {
        return index;
    }

    if let Some(index) = find_winning_move(board, opponent_mark) {
        return index;
    }

    if board.is_empty_at(CENTER) {
        return CENTER;
    }

    for group in [CORNERS, EDGES] {
        let open: Vec<usize> = group
            .into_iter()
            .filter(|&index| board.is_empty_at(index))
            .collect();
        if !open.is_empty() {
            return calculate_random_move(&open, rng);
        }
    }

    calculate_random_move(available_moves, rng)
}
