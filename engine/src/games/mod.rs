mod session_rng;

pub mod tictactoe;

pub use session_rng::{MoveRng, SessionRng};

#[cfg(test)]
pub(crate) use session_rng::scripted::ScriptedRng;
