pub mod config;
pub mod error;
pub mod games;
pub mod logger;

pub use error::{EngineError, Result};
pub use games::tictactoe::*;
pub use games::{MoveRng, SessionRng};
