use crate::error::TermoError;
use crate::feedback::{LetterStatus, WORD_LENGTH, format_statuses, parse_statuses};
use crate::game::GameStatus;
use crate::game_state::{PlayAction, PlayInterface, SessionView, SolverInterface, UserAction};
use crate::wordbank::canonicalize;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::io::BufRead;
use std::path::PathBuf;

const MAX_CANDIDATES_DISPLAY: usize = 10;

/// Word finder and daily-game simulator for 5-letter word games
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited list of possible answers
    #[arg(short = 'a', long = "answers", global = true)]
    pub answers_path: Option<PathBuf>,

    /// Path to a newline-delimited list of extra accepted guesses
    #[arg(short = 'g', long = "guessable", global = true)]
    pub guessable_path: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long = "log-file", global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub mode: Option<Mode>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Narrow down the secret word from the feedback of a real game (default)
    Solve {
        /// Include words that are accepted as guesses but never answers
        #[arg(long)]
        all_words: bool,
        /// Use the full-screen terminal interface
        #[arg(long)]
        tui: bool,
    },
    /// Play against the word of the day
    Play {
        /// Play the word of this day (YYYY-MM-DD) instead of today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

impl Cli {
    pub fn mode(&self) -> Mode {
        self.mode.clone().unwrap_or(Mode::Solve {
            all_words: false,
            tui: false,
        })
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

fn is_valid_word(word: &str) -> bool {
    let canonical = canonicalize(word);
    canonical.chars().count() == WORD_LENGTH && canonical.chars().all(char::is_alphabetic)
}

/// Reads one trimmed line; `None` at end of input or on a read error.
fn read_line<R: BufRead>(reader: &mut R) -> Option<String> {
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_string()),
    }
}

/// Parses one line of solver input.
pub fn parse_solver_command(input: &str) -> Result<UserAction, String> {
    let lower = input.trim().to_lowercase();
    let mut parts = lower.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("exit" | "quit"), None, None) => Ok(UserAction::Exit),
        (Some("reset" | "next"), None, None) => Ok(UserAction::Reset),
        (Some("toggle"), None, None) => Ok(UserAction::ToggleWordList),
        (Some("remove" | "rm"), Some(n), None) => match n.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(UserAction::Remove(n - 1)),
            _ => Err(format!("Invalid guess number '{n}'.")),
        },
        (Some("pick"), Some(n), None) => match n.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(UserAction::Select(n - 1)),
            _ => Err(format!("Invalid candidate number '{n}'.")),
        },
        (Some(word), None, None) if is_valid_word(word) => Ok(UserAction::Guess(word.to_string())),
        _ => Err("Invalid guess. Please enter 5 letters.".to_string()),
    }
}

pub fn read_solver_command<R: BufRead>(reader: &mut R) -> Option<UserAction> {
    println!(
        "\nEnter your guess (5 letters), 'pick N', 'remove N', 'toggle', 'reset' or 'exit':"
    );
    let Some(input) = read_line(reader) else {
        return Some(UserAction::Exit);
    };
    match parse_solver_command(&input) {
        Ok(action) => Some(action),
        Err(message) => {
            println!("{message}");
            None
        }
    }
}

pub fn read_feedback<R: BufRead>(
    reader: &mut R,
    suggested: &[LetterStatus; WORD_LENGTH],
) -> Option<[LetterStatus; WORD_LENGTH]> {
    println!(
        "Enter feedback (G=green, Y=yellow, X=gray), or press ENTER to accept {}:",
        format_statuses(suggested)
    );
    let input = read_line(reader)?;
    if input.is_empty() {
        return Some(*suggested);
    }
    match parse_statuses(&input) {
        Ok(statuses) => Some(statuses),
        Err(_) => {
            println!("Invalid feedback. Please enter 5 characters using G, Y, or X.");
            None
        }
    }
}

pub fn read_play_command<R: BufRead>(reader: &mut R) -> PlayAction {
    println!("\nEnter your guess (5 letters, or 'next' for a new game, or 'exit' to quit):");
    let Some(input) = read_line(reader) else {
        return PlayAction::Exit;
    };
    match input.to_lowercase().as_str() {
        "exit" | "quit" => PlayAction::Exit,
        "next" => PlayAction::NewGame,
        _ => PlayAction::Guess(input),
    }
}

pub fn display_session(view: &SessionView) {
    if !view.guesses.is_empty() {
        println!("Guesses:");
        for (i, guess) in view.guesses.iter().enumerate() {
            println!(
                "{}. {} {}",
                i + 1,
                guess.word.to_uppercase(),
                format_statuses(&guess.statuses)
            );
        }
    }
    println!(
        "Possible candidates ({} of {}, {}):",
        view.candidates.len(),
        view.word_count,
        view.word_list.describe()
    );
    for (i, word) in view.candidates.iter().take(MAX_CANDIDATES_DISPLAY).enumerate() {
        println!("{}. {}", i + 1, word.to_uppercase());
    }
    if view.candidates.len() > MAX_CANDIDATES_DISPLAY {
        println!("...and {} more", view.candidates.len() - MAX_CANDIDATES_DISPLAY);
    }
    if let Some(solution) = &view.solved {
        println!("Solution found: {}", solution.to_uppercase());
    }
    if view.exhausted {
        println!("No candidates remain. Check your inputs, or remove a guess.");
    }
}

pub fn display_exit_message() {
    println!("Exiting.");
}

/// Line-oriented interface over any `BufRead`, printing to stdout.
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> SolverInterface for CliInterface<R> {
    fn display_session(&mut self, view: &SessionView) {
        display_session(view);
    }

    fn read_action(&mut self) -> Option<UserAction> {
        read_solver_command(&mut self.reader)
    }

    fn read_statuses(
        &mut self,
        _word: &str,
        suggested: &[LetterStatus; WORD_LENGTH],
    ) -> Option<[LetterStatus; WORD_LENGTH]> {
        read_feedback(&mut self.reader, suggested)
    }

    fn display_error(&mut self, message: &str) {
        println!("{message}");
    }

    fn display_exit_message(&mut self) {
        display_exit_message();
    }
}

impl<R: BufRead> PlayInterface for CliInterface<R> {
    fn display_new_game(&mut self, max_attempts: usize) {
        println!("New game started. You have {max_attempts} attempts.");
    }

    fn read_play_action(&mut self) -> Option<PlayAction> {
        Some(read_play_command(&mut self.reader))
    }

    fn display_feedback(
        &mut self,
        word: &str,
        statuses: &[LetterStatus; WORD_LENGTH],
        attempt: usize,
    ) {
        println!(
            "{attempt}. {} {}",
            word.to_uppercase(),
            format_statuses(statuses)
        );
    }

    fn display_invalid_guess(&mut self, error: &TermoError) {
        println!("Invalid guess: {error}");
    }

    fn display_outcome(&mut self, status: GameStatus, secret: &str, attempts: usize) {
        match status {
            GameStatus::Won => println!("You got it in {attempts}: {}", secret.to_uppercase()),
            GameStatus::Lost => println!("Out of attempts. The word was {}.", secret.to_uppercase()),
            GameStatus::InProgress => {}
        }
    }

    fn display_exit_message(&mut self) {
        display_exit_message();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use LetterStatus::{Absent, Correct, PresentElsewhere};

    #[test]
    fn test_parse_cli_defaults_to_solve() {
        let cli = Cli::try_parse_from(["termo-solver"]).unwrap();
        assert_eq!(cli.answers_path, None);
        assert_eq!(
            cli.mode(),
            Mode::Solve {
                all_words: false,
                tui: false
            }
        );
    }

    #[test]
    fn test_parse_cli_with_paths() {
        let cli = Cli::try_parse_from([
            "termo-solver",
            "solve",
            "--all-words",
            "-a",
            "answers.txt",
            "--guessable",
            "extra.txt",
        ])
        .unwrap();
        assert_eq!(cli.answers_path, Some(PathBuf::from("answers.txt")));
        assert_eq!(cli.guessable_path, Some(PathBuf::from("extra.txt")));
        assert_eq!(
            cli.mode(),
            Mode::Solve {
                all_words: true,
                tui: false
            }
        );
    }

    #[test]
    fn test_parse_cli_play_with_date() {
        let cli = Cli::try_parse_from(["termo-solver", "play", "--date", "2024-03-01"]).unwrap();
        assert_eq!(
            cli.mode(),
            Mode::Play {
                date: NaiveDate::from_ymd_opt(2024, 3, 1)
            }
        );
        assert!(Cli::try_parse_from(["termo-solver", "play", "--date", "yesterday"]).is_err());
    }

    #[test]
    fn test_is_valid_word() {
        assert!(is_valid_word("termo"));
        assert!(is_valid_word("SÁBIA"));
        assert!(!is_valid_word("TERM"));
        assert!(!is_valid_word("TERMOS"));
        assert!(!is_valid_word("TERM0"));
        assert!(!is_valid_word(""));
    }

    #[test]
    fn test_parse_solver_command() {
        assert_eq!(parse_solver_command("EXIT"), Ok(UserAction::Exit));
        assert_eq!(parse_solver_command("reset"), Ok(UserAction::Reset));
        assert_eq!(parse_solver_command("toggle"), Ok(UserAction::ToggleWordList));
        assert_eq!(parse_solver_command("remove 2"), Ok(UserAction::Remove(1)));
        assert_eq!(parse_solver_command("pick 1"), Ok(UserAction::Select(0)));
        assert!(parse_solver_command("pick").is_err());
        assert!(parse_solver_command("remove 0").is_err());
        assert!(parse_solver_command("remove x").is_err());
        assert_eq!(
            parse_solver_command("  Sábia "),
            Ok(UserAction::Guess("sábia".to_string()))
        );
        assert!(parse_solver_command("cra").is_err());
    }

    #[test]
    fn test_read_solver_command_eof_exits() {
        let mut reader = Cursor::new("");
        assert_eq!(read_solver_command(&mut reader), Some(UserAction::Exit));
    }

    #[test]
    fn test_read_solver_command_invalid() {
        let mut reader = Cursor::new("CR4NE\n");
        assert_eq!(read_solver_command(&mut reader), None);
    }

    #[test]
    fn test_read_feedback_valid_mixed() {
        let mut reader = Cursor::new("gyxxg\n");
        let feedback = read_feedback(&mut reader, &[Absent; 5]).unwrap();
        assert_eq!(feedback, [Correct, PresentElsewhere, Absent, Absent, Correct]);
    }

    #[test]
    fn test_read_feedback_accepts_suggestion() {
        let suggested = [Correct, Absent, Absent, PresentElsewhere, Absent];
        let mut reader = Cursor::new("\n");
        assert_eq!(read_feedback(&mut reader, &suggested), Some(suggested));
    }

    #[test]
    fn test_read_feedback_invalid() {
        for input in ["GGG\n", "GGGGGG\n", "GGGGA\n", ""] {
            let mut reader = Cursor::new(input);
            assert!(read_feedback(&mut reader, &[Absent; 5]).is_none());
        }
    }

    #[test]
    fn test_read_play_command() {
        assert_eq!(read_play_command(&mut Cursor::new("next\n")), PlayAction::NewGame);
        assert_eq!(read_play_command(&mut Cursor::new("Exit\n")), PlayAction::Exit);
        assert_eq!(read_play_command(&mut Cursor::new("")), PlayAction::Exit);
        assert_eq!(
            read_play_command(&mut Cursor::new("termo\n")),
            PlayAction::Guess("termo".to_string())
        );
    }
}
