//! Simulation of the daily game itself.

use crate::error::TermoError;
use crate::feedback::{Guess, WORD_LENGTH, compute_feedback};
use crate::wordbank::{Dictionary, WordIndex, WordList, canonicalize};
use crate::{debug_log, info_log};
use chrono::{NaiveDate, Utc};

/// Guesses allowed per game.
pub const MAX_ATTEMPTS: usize = 6;

/// Day zero of the word-of-the-day sequence.
pub const EPOCH_ANCHOR: NaiveDate = match NaiveDate::from_ymd_opt(2022, 1, 2) {
    Some(date) => date,
    None => panic!("invalid anchor date"),
};

/// Supplies the calendar day a game is played on.
pub trait DateSource {
    fn today(&self) -> NaiveDate;
}

/// The current UTC calendar day.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemDate;

impl DateSource for SystemDate {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Always the same day.
#[derive(Clone, Copy, Debug)]
pub struct FixedDate(pub NaiveDate);

impl DateSource for FixedDate {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Index of the word of the day for `date` in a list of `len` answers.
///
/// Consecutive days walk the list in order, wrapping around; days before
/// the anchor wrap backwards.
pub fn word_of_the_day_index(date: NaiveDate, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let days = date.signed_duration_since(EPOCH_ANCHOR).num_days();
    let len = i64::try_from(len).ok()?;
    usize::try_from(days.rem_euclid(len)).ok()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// One game against the word of the day.
///
/// The secret is chosen when the session is created and never changes until
/// [`GameSession::reset_game`]. Guesses are accepted until the game is won or
/// the attempts run out.
#[derive(Debug)]
pub struct GameSession<'a> {
    dictionary: &'a Dictionary,
    accepted: WordIndex,
    secret: String,
    guesses: Vec<Guess>,
    current: String,
    status: GameStatus,
    invalid_guess: bool,
}

impl<'a> GameSession<'a> {
    pub fn new(dictionary: &'a Dictionary, dates: &dyn DateSource) -> Result<Self, TermoError> {
        let secret = Self::pick_secret(dictionary, dates)?;
        Ok(Self {
            dictionary,
            accepted: dictionary.index(WordList::All),
            secret,
            guesses: Vec::new(),
            current: String::new(),
            status: GameStatus::InProgress,
            invalid_guess: false,
        })
    }

    fn pick_secret(dictionary: &Dictionary, dates: &dyn DateSource) -> Result<String, TermoError> {
        let answers = dictionary.answers();
        let date = dates.today();
        let index = word_of_the_day_index(date, answers.len()).ok_or(TermoError::EmptyWordList)?;
        info_log!("Word of the day for {} is answer #{}", date, index);
        Ok(canonicalize(&answers[index]))
    }

    /// Starts over with the word of the day for the source's current date.
    pub fn reset_game(&mut self, dates: &dyn DateSource) -> Result<(), TermoError> {
        self.secret = Self::pick_secret(self.dictionary, dates)?;
        self.guesses.clear();
        self.current.clear();
        self.status = GameStatus::InProgress;
        self.invalid_guess = false;
        Ok(())
    }

    /// Appends a letter to the guess being typed. Ignored once the buffer
    /// is full or the game is over.
    pub fn push_letter(&mut self, letter: char) {
        if self.status.is_over() || self.current.chars().count() >= WORD_LENGTH {
            return;
        }
        self.current.extend(letter.to_lowercase());
        self.invalid_guess = false;
    }

    pub fn pop_letter(&mut self) {
        self.current.pop();
        self.invalid_guess = false;
    }

    pub fn current_input(&self) -> &str {
        &self.current
    }

    /// Submits the typed buffer as a guess.
    pub fn submit_current(&mut self) -> Result<&Guess, TermoError> {
        let word = self.current.clone();
        self.submit_guess(&word)
    }

    /// Scores `raw_word` against the secret and records it.
    ///
    /// Words of the wrong length or outside the accepted list are rejected
    /// without using an attempt; the rejection is remembered in
    /// [`GameSession::is_invalid_guess`] until the next edit or guess.
    pub fn submit_guess(&mut self, raw_word: &str) -> Result<&Guess, TermoError> {
        if self.status.is_over() {
            return Err(TermoError::GameOver);
        }
        let word = canonicalize(raw_word);
        let length = word.chars().count();
        if length != WORD_LENGTH {
            self.invalid_guess = true;
            return Err(TermoError::InvalidLength {
                expected: WORD_LENGTH,
                actual: length,
            });
        }
        if !self.accepted.contains(&word) {
            self.invalid_guess = true;
            debug_log!("submit_guess() rejected {}", word);
            return Err(TermoError::NotInDictionary(word));
        }

        let statuses = compute_feedback(&self.secret, &word)?;
        let guess = Guess::new(&word, &statuses)?;
        let won = guess.is_all_correct();
        self.guesses.push(guess);
        self.current.clear();
        self.invalid_guess = false;

        self.status = if won {
            GameStatus::Won
        } else if self.guesses.len() >= MAX_ATTEMPTS {
            GameStatus::Lost
        } else {
            GameStatus::InProgress
        };
        info_log!(
            "Guess {}/{}: {} -> {:?}",
            self.guesses.len(),
            MAX_ATTEMPTS,
            word,
            self.status
        );
        Ok(&self.guesses[self.guesses.len() - 1])
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn guesses(&self) -> &[Guess] {
        &self.guesses
    }

    pub fn attempts(&self) -> usize {
        self.guesses.len()
    }

    pub fn remaining_attempts(&self) -> usize {
        MAX_ATTEMPTS - self.guesses.len()
    }

    pub fn is_invalid_guess(&self) -> bool {
        self.invalid_guess
    }

    /// The secret in its display spelling, once the game is over.
    pub fn revealed_secret(&self) -> Option<&str> {
        self.status
            .is_over()
            .then(|| self.accepted.display(&self.secret))
    }

    pub fn display<'b>(&'b self, canonical: &'b str) -> &'b str {
        self.accepted.display(canonical)
    }
}
