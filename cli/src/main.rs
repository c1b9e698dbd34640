mod config;
mod console;

use std::io;

use clap::Parser;
use tictactoe_engine::config::Validate;
use tictactoe_engine::logger::{self, LogLevel};
use tictactoe_engine::{Board, Difficulty, GameSession, SessionRng, log};

use config::get_config_manager;
use console::Console;

#[derive(Parser)]
#[command(name = "tictactoe", about = "Play tic-tac-toe against the computer")]
struct Args {
    /// Path to a YAML config file. Defaults to tictactoe_config.yaml next to the executable.
    #[arg(long)]
    config: Option<String>,

    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Seed for the move randomness, for reproducible games.
    #[arg(long)]
    seed: Option<u64>,

    /// Starting position as nine characters, e.g. "X...O....".
    #[arg(long)]
    position: Option<String>,

    #[arg(long)]
    ai_first: bool,

    /// Write the effective settings back to the config file.
    #[arg(long)]
    save_config: bool,

    #[arg(long)]
    use_log_prefix: bool,

    #[arg(long)]
    debug: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config_manager = get_config_manager(args.config.as_deref());
    let mut config = config_manager.get_config()?;
    if let Some(difficulty) = args.difficulty {
        config.difficulty = difficulty;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if args.ai_first {
        config.human_first = false;
    }
    config.validate()?;
    if args.save_config {
        config_manager.set_config(&config)?;
    }

    let prefix = if args.use_log_prefix {
        Some("TicTacToe".to_string())
    } else {
        None
    };
    let level = if args.debug {
        LogLevel::Debug
    } else {
        config.log_level
    };
    logger::init_logger(prefix, level);

    let rng = match config.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    log!("Session seed: {}", rng.seed());

    let settings = config.session_settings();
    let mut session = match &args.position {
        Some(position) => {
            let board: Board = position.parse()?;
            GameSession::from_position(board, settings, rng)?
        }
        None => GameSession::new(settings, rng)?,
    };

    let stdin = io::stdin();
    Console::new(&mut session, io::stdout()).run(stdin.lock())?;

    Ok(())
}
