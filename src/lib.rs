// Library interface for termo-solver
// The binary and the integration tests both go through these modules

pub mod cli;
pub mod error;
pub mod feedback;
pub mod filter;
pub mod game;
pub mod game_state;
pub mod logging;
pub mod solver;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use error::TermoError;
pub use feedback::{Guess, LetterStatus, WORD_LENGTH, compute_feedback};
pub use filter::{filter_candidates, is_consistent};
pub use game::{DateSource, FixedDate, GameSession, GameStatus, MAX_ATTEMPTS, SystemDate};
pub use game_state::{play_loop, solver_loop};
pub use solver::SolverSession;
pub use wordbank::{
    Dictionary, WordList, canonicalize, load_wordbank_from_file, load_wordbank_from_str,
};
