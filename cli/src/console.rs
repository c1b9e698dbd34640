use std::io::{self, BufRead, Write};

use tictactoe_engine::{
    Board, CELL_COUNT, Difficulty, EngineError, GameOutcome, GameSession, Mark, MoveInsight,
    MoveRng, ScoreBoard,
};

const HELP: &str = "Commands: 1-9 place your mark, new, difficulty <easy|medium|hard>, score, help, quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Place(usize),
    NewGame,
    SetDifficulty(Difficulty),
    Score,
    Help,
    Quit,
}

/// Parses one input line. Cells are numbered 1 to 9 for the player and
/// converted to board indices here.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err("Empty input".to_string());
    };

    if let Ok(cell) = head.parse::<usize>() {
        if cell == 0 || cell > CELL_COUNT {
            return Err(format!("Cell must be between 1 and {}", CELL_COUNT));
        }
        return Ok(Command::Place(cell - 1));
    }

    match head.to_ascii_lowercase().as_str() {
        "new" | "reset" => Ok(Command::NewGame),
        "difficulty" | "d" => {
            let level = words
                .next()
                .ok_or_else(|| "Usage: difficulty <easy|medium|hard>".to_string())?;
            Ok(Command::SetDifficulty(level.parse()?))
        }
        "score" => Ok(Command::Score),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(format!("Unknown command '{}'. Type 'help' for a list", other)),
    }
}

pub fn render_board(board: &Board) -> String {
    let cell = |index: usize| match board.get(index) {
        Some(Mark::X) => 'X',
        Some(Mark::O) => 'O',
        _ => char::from_digit(index as u32 + 1, 10).unwrap_or('?'),
    };

    (0..3)
        .map(|row| {
            format!(
                " {} | {} | {}",
                cell(row * 3),
                cell(row * 3 + 1),
                cell(row * 3 + 2)
            )
        })
        .collect::<Vec<_>>()
        .join("\n---+---+---\n")
}

fn describe_outcome(outcome: &GameOutcome) -> String {
    let cells = |line: &[usize; 3]| {
        line.iter()
            .map(|index| (index + 1).to_string())
            .collect::<Vec<_>>()
            .join("-")
    };
    match outcome {
        GameOutcome::HumanWin(line) => format!("You win! ({})", cells(&line.combination)),
        GameOutcome::AiWin(line) => format!("AI wins. ({})", cells(&line.combination)),
        GameOutcome::Draw => "It's a draw.".to_string(),
    }
}

fn describe_score(scores: ScoreBoard) -> String {
    format!("Score: you {} - AI {}", scores.human, scores.ai)
}

pub struct Console<'a, R: MoveRng, O: Write> {
    session: &'a mut GameSession<R>,
    out: O,
}

impl<'a, R: MoveRng, O: Write> Console<'a, R, O> {
    pub fn new(session: &'a mut GameSession<R>, out: O) -> Self {
        Self { session, out }
    }

    /// Reads commands until `quit` or end of input.
    pub fn run<I: BufRead>(&mut self, input: I) -> io::Result<()> {
        writeln!(self.out, "Tic-tac-toe. You are X, the AI is O. Difficulty: {}", self.session.difficulty())?;
        writeln!(self.out, "{}", HELP)?;
        self.start_game()?;

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match parse_command(&line) {
                Ok(Command::Quit) => break,
                Ok(command) => self.handle(command)?,
                Err(message) => writeln!(self.out, "{}", message)?,
            }
        }

        writeln!(self.out, "{}", describe_score(self.session.scores()))?;
        self.out.flush()
    }

    fn handle(&mut self, command: Command) -> io::Result<()> {
        match command {
            Command::Place(index) => self.human_move(index),
            Command::NewGame => {
                self.session.reset();
                self.start_game()
            }
            Command::SetDifficulty(difficulty) => {
                self.session.set_difficulty(difficulty);
                writeln!(self.out, "Difficulty set to {}. Starting a new game.", difficulty)?;
                self.start_game()
            }
            Command::Score => writeln!(self.out, "{}", describe_score(self.session.scores())),
            Command::Help => writeln!(self.out, "{}", HELP),
            Command::Quit => Ok(()),
        }
    }

    fn start_game(&mut self) -> io::Result<()> {
        if self.session.is_ai_turn() {
            self.ai_move()?;
        } else {
            writeln!(self.out, "{}", render_board(self.session.board()))?;
        }
        self.prompt()
    }

    fn human_move(&mut self, index: usize) -> io::Result<()> {
        if self.session.is_over() {
            return writeln!(self.out, "The game is over. Type 'new' to play again.");
        }

        let report = match self.session.play_human(index) {
            Ok(report) => report,
            Err(EngineError::CellOccupied { position }) => {
                return writeln!(self.out, "Cell {} is already taken", position + 1);
            }
            Err(err) => return writeln!(self.out, "{}", err),
        };

        if let Some(outcome) = report.outcome {
            writeln!(self.out, "{}", render_board(self.session.board()))?;
            return self.announce(&outcome);
        }
        self.ai_move()?;
        self.prompt()
    }

    fn ai_move(&mut self) -> io::Result<()> {
        let report = match self.session.play_ai() {
            Ok(report) => report,
            Err(err) => return writeln!(self.out, "AI could not move: {}", err),
        };

        writeln!(self.out, "AI plays {}.", report.index + 1)?;
        match report.insight {
            Some(MoveInsight::Block) => writeln!(self.out, "The AI blocked your line.")?,
            Some(MoveInsight::Setup) => writeln!(self.out, "The AI is one move from a line.")?,
            _ => {}
        }
        writeln!(self.out, "{}", render_board(self.session.board()))?;
        match report.outcome {
            Some(outcome) => self.announce(&outcome),
            None => Ok(()),
        }
    }

    fn announce(&mut self, outcome: &GameOutcome) -> io::Result<()> {
        writeln!(self.out, "{}", describe_outcome(outcome))?;
        writeln!(self.out, "{}", describe_score(self.session.scores()))?;
        writeln!(self.out, "Type 'new' to play again.")
    }

    fn prompt(&mut self) -> io::Result<()> {
        if self.session.is_human_turn() {
            write!(self.out, "Your move> ")?;
            self.out.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe_engine::{SessionRng, SessionSettings};

    fn hard_session(human_first: bool) -> GameSession {
        let settings = SessionSettings {
            difficulty: Difficulty::Hard,
            human_first,
            ..SessionSettings::default()
        };
        GameSession::new(settings, SessionRng::new(42)).unwrap()
    }

    fn run_script(session: &mut GameSession, script: &str) -> String {
        let mut out = Vec::new();
        Console::new(session, &mut out).run(script.as_bytes()).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_cells_are_one_based() {
        assert_eq!(parse_command("1"), Ok(Command::Place(0)));
        assert_eq!(parse_command(" 9 "), Ok(Command::Place(8)));
        assert!(parse_command("0").is_err());
        assert!(parse_command("10").is_err());
    }

    #[test]
    fn test_parse_words() {
        assert_eq!(parse_command("new"), Ok(Command::NewGame));
        assert_eq!(parse_command("QUIT"), Ok(Command::Quit));
        assert_eq!(parse_command("score"), Ok(Command::Score));
        assert_eq!(
            parse_command("difficulty hard"),
            Ok(Command::SetDifficulty(Difficulty::Hard))
        );
        assert!(parse_command("difficulty").is_err());
        assert!(parse_command("difficulty extreme").is_err());
        assert!(parse_command("jump").is_err());
        assert!(parse_command("   ").is_err());
    }

    #[test]
    fn test_render_board_numbers_empty_cells() {
        let board: Board = "X...O....".parse().unwrap();
        assert_eq!(
            render_board(&board),
            " X | 2 | 3\n---+---+---\n 4 | O | 6\n---+---+---\n 7 | 8 | 9"
        );
    }

    #[test]
    fn test_human_move_is_answered_by_ai() {
        let mut session = hard_session(true);
        let output = run_script(&mut session, "5\nquit\n");
        assert!(output.contains("AI plays 1."));
        assert_eq!(session.board().count(Mark::X), 1);
        assert_eq!(session.board().count(Mark::O), 1);
    }

    #[test]
    fn test_invalid_input_is_reported_and_ignored() {
        let mut session = hard_session(true);
        let output = run_script(&mut session, "10\nfly\n5\n5\nquit\n");
        assert!(output.contains("Cell must be between 1 and 9"));
        assert!(output.contains("Unknown command 'fly'"));
        assert!(output.contains("Cell 5 is already taken"));
        assert_eq!(session.board().count(Mark::X), 1);
    }

    #[test]
    fn test_ai_moves_first_when_configured() {
        let mut session = hard_session(false);
        let output = run_script(&mut session, "");
        assert!(output.contains("AI plays 1."));
        assert!(output.contains("Score: you 0 - AI 0"));
    }

    #[test]
    fn test_difficulty_command_starts_new_game() {
        let mut session = hard_session(true);
        let output = run_script(&mut session, "5\ndifficulty easy\nquit\n");
        assert!(output.contains("Difficulty set to easy"));
        assert_eq!(session.difficulty(), Difficulty::Easy);
        assert_eq!(*session.board(), Board::new());
    }

    #[test]
    fn test_full_game_against_hard_ends_without_human_win() {
        let mut session = hard_session(true);
        let script = "5\n2\n3\n4\n6\n7\n8\n9\n1\nscore\nquit\n";
        let output = run_script(&mut session, script);
        assert!(session.is_over());
        assert_eq!(session.scores().human, 0);
        assert!(output.contains("Type 'new' to play again."));
    }
}
