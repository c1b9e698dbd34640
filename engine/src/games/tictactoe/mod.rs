mod board;
mod bot_controller;
mod game_state;
mod minimax;
mod session;
mod types;
mod validate;
mod win_detector;

pub use board::{Board, CELL_COUNT, empty_cells, is_draw};
pub use bot_controller::{
    BotInput, DEFAULT_MEDIUM_SEARCH_PROBABILITY, calculate_heuristic_move, calculate_move,
    find_winning_move, select_move,
};
pub use game_state::GameState;
pub use minimax::{SearchResult, search, search_exhaustive};
pub use session::{
    AI_MARK, GameOutcome, GameSession, HUMAN_MARK, MoveInsight, ScoreBoard, SessionSettings,
    TurnReport,
};
pub use types::{Difficulty, GameStatus, Mark, WinningLine};
pub use validate::validate_position;
pub use win_detector::{WINNING_COMBINATIONS, check_win, check_winner};
