use thiserror::Error;

use crate::games::tictactoe::Mark;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EngineError {
    #[error("no available moves: the board is full")]
    NoAvailableMoves,

    #[error("invalid board length: expected {expected} cells, got {got}")]
    InvalidBoardLength { expected: usize, got: usize },

    #[error("invalid character '{character}' at position {position}")]
    InvalidCellCharacter { character: char, position: usize },

    #[error("an empty cell cannot act as a player mark")]
    InvalidMark,

    #[error("position {position} is out of bounds (must be 0-8)")]
    PositionOutOfBounds { position: usize },

    #[error("position {position} is already occupied")]
    CellOccupied { position: usize },

    #[error("game is already over")]
    GameOver,

    #[error("not your turn: expected {expected}, got {got}")]
    NotYourTurn { expected: Mark, got: Mark },

    #[error("invalid mark counts: X={x_count}, O={o_count}")]
    InvalidMarkCounts { x_count: usize, o_count: usize },

    #[error("both players have a winning line")]
    BothPlayersWon,
}

pub type Result<T> = std::result::Result<T, EngineError>;
