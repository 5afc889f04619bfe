//! Narrowing down the secret word from the feedback of real games.

use crate::error::TermoError;
use crate::feedback::{Guess, LetterStatus, WORD_LENGTH, escalate_absent, letters};
use crate::filter::filter_candidates;
use crate::wordbank::{Dictionary, WordIndex, WordList, canonicalize};
use crate::{debug_log, info_log};

/// An interactive solving session over a fixed dictionary.
///
/// The session keeps the guesses entered so far and the candidates still
/// consistent with all of them. Every mutation updates the candidates before
/// returning. Adding a guess only filters the current candidates; removing a
/// guess or switching word lists replays the whole log from the full list.
#[derive(Debug)]
pub struct SolverSession<'a> {
    dictionary: &'a Dictionary,
    word_list: WordList,
    index: WordIndex,
    guesses: Vec<Guess>,
    candidates: Vec<String>,
}

impl<'a> SolverSession<'a> {
    /// Starts an empty session over the answers list.
    pub fn new(dictionary: &'a Dictionary) -> Self {
        Self::with_word_list(dictionary, WordList::Answers)
    }

    pub fn with_word_list(dictionary: &'a Dictionary, word_list: WordList) -> Self {
        let index = dictionary.index(word_list);
        let candidates = index.words().to_vec();
        info_log!(
            "SolverSession started with {} ({} words)",
            word_list.describe(),
            candidates.len()
        );
        Self {
            dictionary,
            word_list,
            index,
            guesses: Vec::new(),
            candidates,
        }
    }

    /// Records a guess with the statuses the player saw and narrows the
    /// candidates accordingly.
    ///
    /// Statuses are escalated before storing: a letter whose every occurrence
    /// was marked absent becomes [`LetterStatus::ConfirmedAbsent`].
    pub fn add_guess(
        &mut self,
        raw_word: &str,
        statuses: &[LetterStatus],
    ) -> Result<&[String], TermoError> {
        let word = canonicalize(raw_word);
        let word_letters = letters(&word).map_err(|_| TermoError::InvalidGuessLength {
            length: word.chars().count(),
            word: word.clone(),
        })?;
        let entered: [LetterStatus; WORD_LENGTH] =
            statuses.try_into().map_err(|_| TermoError::InvalidLength {
                expected: WORD_LENGTH,
                actual: statuses.len(),
            })?;
        let entered = entered.map(|s| match s {
            LetterStatus::ConfirmedAbsent => LetterStatus::Absent,
            other => other,
        });
        let guess = Guess::new(&word, &escalate_absent(&word_letters, &entered))?;

        let before = self.candidates.len();
        self.candidates = filter_candidates(&self.candidates, &guess);
        debug_log!(
            "add_guess({}) narrowed candidates {} -> {}",
            word,
            before,
            self.candidates.len()
        );
        self.guesses.push(guess);
        Ok(&self.candidates)
    }

    /// Deletes the guess at `index` and recomputes the candidates from the
    /// full word list.
    pub fn remove_guess(&mut self, index: usize) -> Result<Guess, TermoError> {
        if index >= self.guesses.len() {
            return Err(TermoError::GuessIndexOutOfRange {
                index,
                len: self.guesses.len(),
            });
        }
        let removed = self.guesses.remove(index);
        info_log!("remove_guess({}) removed {}", index, removed.word());
        self.replay();
        Ok(removed)
    }

    /// Clears every guess.
    pub fn reset_session(&mut self) {
        self.guesses.clear();
        self.candidates = self.index.words().to_vec();
        info_log!("reset_session() - {} candidates", self.candidates.len());
    }

    /// Switches between the answers list and all accepted words, replaying
    /// the logged guesses against the new list.
    pub fn toggle_word_list(&mut self) -> WordList {
        self.set_word_list(self.word_list.toggled());
        self.word_list
    }

    pub fn set_word_list(&mut self, word_list: WordList) {
        self.word_list = word_list;
        self.index = self.dictionary.index(word_list);
        info_log!(
            "Word list set to {} ({} words)",
            word_list.describe(),
            self.index.len()
        );
        self.replay();
    }

    fn replay(&mut self) {
        let mut candidates = self.index.words().to_vec();
        for guess in &self.guesses {
            candidates = filter_candidates(&candidates, guess);
        }
        debug_log!(
            "replay() of {} guesses left {} candidates",
            self.guesses.len(),
            candidates.len()
        );
        self.candidates = candidates;
    }

    /// Suggests statuses for a word that is about to be entered, based on
    /// what earlier guesses showed at the same positions.
    ///
    /// A letter is suggested green if it was green at that position before,
    /// yellow if it was yellow there, and gray otherwise. The suggestion never
    /// affects the candidates.
    pub fn prefill_statuses(&self, raw_word: &str) -> Result<[LetterStatus; WORD_LENGTH], TermoError> {
        let word = canonicalize(raw_word);
        let word_letters = letters(&word).map_err(|_| TermoError::InvalidGuessLength {
            length: word.chars().count(),
            word: word.clone(),
        })?;
        let seen_at = |i: usize, status: LetterStatus| {
            self.guesses
                .iter()
                .any(|g| g.letters()[i] == word_letters[i] && g.statuses()[i] == status)
        };
        let mut statuses = [LetterStatus::Absent; WORD_LENGTH];
        for (i, status) in statuses.iter_mut().enumerate() {
            if seen_at(i, LetterStatus::Correct) {
                *status = LetterStatus::Correct;
            } else if seen_at(i, LetterStatus::PresentElsewhere) {
                *status = LetterStatus::PresentElsewhere;
            }
        }
        Ok(statuses)
    }

    /// Picks a remaining candidate as the next guess, returning it with its
    /// suggested statuses.
    pub fn select_candidate(&self, index: usize) -> Option<(String, [LetterStatus; WORD_LENGTH])> {
        let word = self.candidates.get(index)?;
        let statuses = self.prefill_statuses(word).ok()?;
        Some((word.clone(), statuses))
    }

    /// Exactly one candidate is left after at least one guess.
    pub fn is_solved(&self) -> bool {
        self.candidates.len() == 1 && !self.guesses.is_empty()
    }

    /// No candidate is left: some entered status contradicts the others.
    pub fn is_exhausted(&self) -> bool {
        self.candidates.is_empty() && !self.guesses.is_empty()
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn guesses(&self) -> &[Guess] {
        &self.guesses
    }

    pub fn word_list(&self) -> WordList {
        self.word_list
    }

    /// Number of words in the active list before any filtering.
    pub fn word_count(&self) -> usize {
        self.index.len()
    }

    /// The accented spelling of a canonical word, for display.
    pub fn display<'b>(&'b self, canonical: &'b str) -> &'b str {
        self.index.display(canonical)
    }
}
