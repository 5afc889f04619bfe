use thiserror::Error;

/// Errors raised by the solver and game sessions.
///
/// Every operation that returns one of these validates its input before
/// touching any state, so an `Err` always means "nothing changed".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TermoError {
    /// A word or status array does not have the expected number of letters.
    #[error("expected {expected} letters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// A solver guess does not have the required length after canonicalization.
    #[error("guess \"{word}\" has {length} letters, expected 5")]
    InvalidGuessLength { word: String, length: usize },

    /// The guessed word is not accepted by the game.
    #[error("the word \"{0}\" is not in the word list")]
    NotInDictionary(String),

    /// There is no logged guess at the given position.
    #[error("no guess at index {index} (there are {len} guesses)")]
    GuessIndexOutOfRange { index: usize, len: usize },

    /// The game already ended; reset it to play again.
    #[error("the game is over")]
    GameOver,

    /// There are no answers to choose a secret word from.
    #[error("the answer list is empty")]
    EmptyWordList,
}
