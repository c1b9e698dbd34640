use super::board::Board;
use super::bot_controller::{BotInput, DEFAULT_MEDIUM_SEARCH_PROBABILITY, calculate_move, find_winning_move};
use super::game_state::GameState;
use super::types::{Difficulty, GameStatus, Mark, WinningLine};
use super::win_detector::check_win;
use crate::error::{EngineError, Result};
use crate::games::{MoveRng, SessionRng};
use crate::log;

pub const HUMAN_MARK: Mark = Mark::X;
pub const AI_MARK: Mark = Mark::O;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSettings {
    pub difficulty: Difficulty,
    pub human_first: bool,
    pub medium_search_probability: f64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            human_first: true,
            medium_search_probability: DEFAULT_MEDIUM_SEARCH_PROBABILITY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreBoard {
    pub human: u32,
    pub ai: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    HumanWin(WinningLine),
    AiWin(WinningLine),
    Draw,
}

/// What an AI move did to the position, for moves that leave the game running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveInsight {
    /// The human would have completed a line on that cell.
    Block,
    /// The AI now has a line one move from completion.
    Setup,
    Quiet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnReport {
    pub index: usize,
    pub mark: Mark,
    pub outcome: Option<GameOutcome>,
    pub insight: Option<MoveInsight>,
}

/// One human-versus-AI sitting: the current game plus the running score.
pub struct GameSession<R: MoveRng = SessionRng> {
    state: GameState,
    settings: SessionSettings,
    scores: ScoreBoard,
    rng: R,
}

impl<R: MoveRng> GameSession<R> {
    pub fn new(settings: SessionSettings, rng: R) -> Result<Self> {
        Self::from_position(Board::new(), settings, rng)
    }

    pub fn from_position(board: Board, settings: SessionSettings, rng: R) -> Result<Self> {
        let state = GameState::from_position(board, first_mark(&settings))?;
        log!(
            "New session: difficulty {}, {} moves first",
            settings.difficulty,
            state.first_mark
        );
        Ok(Self {
            state,
            settings,
            scores: ScoreBoard::default(),
            rng,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn board(&self) -> &Board {
        &self.state.board
    }

    pub fn scores(&self) -> ScoreBoard {
        self.scores
    }

    pub fn difficulty(&self) -> Difficulty {
        self.settings.difficulty
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn is_human_turn(&self) -> bool {
        !self.is_over() && self.state.current_mark == HUMAN_MARK
    }

    pub fn is_ai_turn(&self) -> bool {
        !self.is_over() && self.state.current_mark == AI_MARK
    }

    pub fn play_human(&mut self, index: usize) -> Result<TurnReport> {
        let outcome = self.apply(HUMAN_MARK, index)?;
        Ok(TurnReport {
            index,
            mark: HUMAN_MARK,
            outcome,
            insight: None,
        })
    }

    pub fn play_ai(&mut self) -> Result<TurnReport> {
        if self.is_over() {
            return Err(EngineError::GameOver);
        }
        if self.state.current_mark != AI_MARK {
            return Err(EngineError::NotYourTurn {
                expected: self.state.current_mark,
                got: AI_MARK,
            });
        }

        let input = BotInput::from_game_state(&self.state)
            .with_medium_search_probability(self.settings.medium_search_probability);
        let index = calculate_move(self.settings.difficulty, &input, &mut self.rng)?;
        log!("AI ({}) chose position {}", self.settings.difficulty, index);

        let insight = classify_ai_move(&self.state.board, index);
        let outcome = self.apply(AI_MARK, index)?;
        Ok(TurnReport {
            index,
            mark: AI_MARK,
            outcome,
            insight: if outcome.is_none() { Some(insight) } else { None },
        })
    }

    /// Changes the difficulty and starts a fresh game. Scores are kept.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.settings.difficulty = difficulty;
        log!("Difficulty set to {}", difficulty);
        self.reset();
    }

    pub fn reset(&mut self) {
        self.state = fresh_game(&self.settings);
        log!("Game reset, {} to move", self.state.current_mark);
    }

    fn apply(&mut self, mark: Mark, index: usize) -> Result<Option<GameOutcome>> {
        self.state.place_mark(mark, index)?;
        log!("Move made at position {} by {}", index, mark);

        let outcome = match (self.state.status, self.state.winning_line) {
            (GameStatus::XWon | GameStatus::OWon, Some(line)) => {
                log!("Game ended with winner: {}", line.mark);
                if line.mark == HUMAN_MARK {
                    self.scores.human += 1;
                    Some(GameOutcome::HumanWin(line))
                } else {
                    self.scores.ai += 1;
                    Some(GameOutcome::AiWin(line))
                }
            }
            (GameStatus::Draw, _) => {
                log!("Game ended in a draw");
                Some(GameOutcome::Draw)
            }
            _ => None,
        };
        Ok(outcome)
    }
}

fn first_mark(settings: &SessionSettings) -> Mark {
    if settings.human_first {
        HUMAN_MARK
    } else {
        AI_MARK
    }
}

fn fresh_game(settings: &SessionSettings) -> GameState {
    let first_mark = first_mark(settings);
    GameState {
        board: Board::new(),
        first_mark,
        current_mark: first_mark,
        status: GameStatus::InProgress,
        last_move: None,
        winning_line: None,
    }
}

fn classify_ai_move(board: &Board, index: usize) -> MoveInsight {
    if check_win(&board.with_mark(index, HUMAN_MARK)) == Some(HUMAN_MARK) {
        return MoveInsight::Block;
    }
    if find_winning_move(&board.with_mark(index, AI_MARK), AI_MARK).is_some() {
        return MoveInsight::Setup;
    }
    MoveInsight::Quiet
}
