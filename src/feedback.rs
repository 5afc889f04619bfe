//! Per-letter feedback for a guess, as the real game reports it.

use crate::error::TermoError;
use std::collections::HashMap;

/// Number of letters in every word.
pub const WORD_LENGTH: usize = 5;

/// The colour a single letter of a guess was given.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LetterStatus {
    /// Right letter in the right place (green).
    Correct,
    /// Letter is in the word, but not here (yellow).
    PresentElsewhere,
    /// Letter is not at this position and has no further occurrences to credit (gray).
    Absent,
    /// Every occurrence of this letter in the guess was absent, so the letter
    /// does not appear in the secret at all. Only ever derived, never entered.
    ConfirmedAbsent,
}

impl LetterStatus {
    /// Parses the G/Y/X notation used on the command line.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'G' => Some(Self::Correct),
            'Y' => Some(Self::PresentElsewhere),
            'X' => Some(Self::Absent),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Self::Correct => 'G',
            Self::PresentElsewhere => 'Y',
            Self::Absent | Self::ConfirmedAbsent => 'X',
        }
    }

    /// Next status in the toggle order: absent, present, correct.
    #[must_use]
    pub fn cycle(self) -> Self {
        match self {
            Self::Absent | Self::ConfirmedAbsent => Self::PresentElsewhere,
            Self::PresentElsewhere => Self::Correct,
            Self::Correct => Self::Absent,
        }
    }

    /// True for statuses that credit an occurrence of the letter to the secret.
    pub fn is_present(self) -> bool {
        matches!(self, Self::Correct | Self::PresentElsewhere)
    }

    pub fn is_absent(self) -> bool {
        matches!(self, Self::Absent | Self::ConfirmedAbsent)
    }
}

/// Parses a full status string such as `"GYXXG"`.
pub fn parse_statuses(input: &str) -> Result<[LetterStatus; WORD_LENGTH], TermoError> {
    let parsed: Vec<LetterStatus> = input
        .trim()
        .chars()
        .map(LetterStatus::from_char)
        .collect::<Option<_>>()
        .ok_or(TermoError::InvalidLength {
            expected: WORD_LENGTH,
            actual: input.trim().chars().count(),
        })?;
    to_status_array(&parsed)
}

pub fn format_statuses(statuses: &[LetterStatus]) -> String {
    statuses.iter().map(|s| s.to_char()).collect()
}

/// A guessed word together with the feedback it received.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Guess {
    word: String,
    letters: [char; WORD_LENGTH],
    statuses: [LetterStatus; WORD_LENGTH],
}

impl Guess {
    /// Builds a guess from a canonical word and its statuses.
    pub fn new(word: &str, statuses: &[LetterStatus]) -> Result<Self, TermoError> {
        Ok(Self {
            word: word.to_string(),
            letters: letters(word)?,
            statuses: to_status_array(statuses)?,
        })
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn letters(&self) -> &[char; WORD_LENGTH] {
        &self.letters
    }

    pub fn statuses(&self) -> &[LetterStatus; WORD_LENGTH] {
        &self.statuses
    }

    pub fn is_all_correct(&self) -> bool {
        self.statuses.iter().all(|s| *s == LetterStatus::Correct)
    }
}

/// Splits a word into exactly [`WORD_LENGTH`] letters.
pub fn letters(word: &str) -> Result<[char; WORD_LENGTH], TermoError> {
    let mut out = [' '; WORD_LENGTH];
    let mut count = 0;
    for c in word.chars() {
        if count < WORD_LENGTH {
            out[count] = c;
        }
        count += 1;
    }
    if count == WORD_LENGTH {
        Ok(out)
    } else {
        Err(TermoError::InvalidLength {
            expected: WORD_LENGTH,
            actual: count,
        })
    }
}

fn to_status_array(statuses: &[LetterStatus]) -> Result<[LetterStatus; WORD_LENGTH], TermoError> {
    statuses.try_into().map_err(|_| TermoError::InvalidLength {
        expected: WORD_LENGTH,
        actual: statuses.len(),
    })
}

/// Computes the feedback the game gives for `guess` when the answer is `secret`.
///
/// Exact matches are credited first so that a repeated letter in the guess
/// cannot steal an occurrence the secret needs for a green. The remaining
/// positions are then credited left to right while occurrences last.
pub fn compute_feedback(
    secret: &str,
    guess: &str,
) -> Result<[LetterStatus; WORD_LENGTH], TermoError> {
    let secret = letters(secret)?;
    let guess = letters(guess)?;

    let mut remaining: HashMap<char, usize> = HashMap::new();
    for c in secret {
        *remaining.entry(c).or_insert(0) += 1;
    }

    let mut statuses = [LetterStatus::Absent; WORD_LENGTH];
    for i in 0..WORD_LENGTH {
        if guess[i] == secret[i] {
            statuses[i] = LetterStatus::Correct;
            if let Some(count) = remaining.get_mut(&guess[i]) {
                *count -= 1;
            }
        }
    }
    for i in 0..WORD_LENGTH {
        if statuses[i] == LetterStatus::Correct {
            continue;
        }
        if let Some(count) = remaining.get_mut(&guess[i])
            && *count > 0
        {
            *count -= 1;
            statuses[i] = LetterStatus::PresentElsewhere;
        }
    }
    Ok(statuses)
}

/// Upgrades `Absent` to `ConfirmedAbsent` for letters whose every occurrence
/// in the guess is absent. Letters with at least one present occurrence keep
/// plain `Absent` markings.
pub fn escalate_absent(
    letters: &[char; WORD_LENGTH],
    statuses: &[LetterStatus; WORD_LENGTH],
) -> [LetterStatus; WORD_LENGTH] {
    let mut escalated = *statuses;
    for i in 0..WORD_LENGTH {
        if !statuses[i].is_absent() {
            continue;
        }
        let all_absent = (0..WORD_LENGTH)
            .filter(|&j| letters[j] == letters[i])
            .all(|j| statuses[j].is_absent());
        escalated[i] = if all_absent {
            LetterStatus::ConfirmedAbsent
        } else {
            LetterStatus::Absent
        };
    }
    escalated
}

#[cfg(test)]
mod tests {
    use super::*;
    use LetterStatus::{Absent, ConfirmedAbsent, Correct, PresentElsewhere};

    #[test]
    fn test_feedback_duplicate_letters_against_repeated_secret() {
        let statuses = compute_feedback("arara", "rarar").unwrap();
        assert_eq!(
            statuses,
            [
                PresentElsewhere,
                PresentElsewhere,
                PresentElsewhere,
                PresentElsewhere,
                Absent
            ]
        );
    }

    #[test]
    fn test_feedback_exact_match() {
        assert_eq!(compute_feedback("amigo", "amigo").unwrap(), [Correct; 5]);
    }

    #[test]
    fn test_feedback_green_reserves_letter() {
        // The only E of the secret is taken by the green in position 4, so the
        // first E of the guess gets nothing.
        let statuses = compute_feedback("crane", "eerie").unwrap();
        assert_eq!(statuses, [Absent, Absent, PresentElsewhere, Absent, Correct]);
    }

    #[test]
    fn test_feedback_left_to_right_credit() {
        // Secret has one L; the first unmatched L of the guess gets the credit.
        let statuses = compute_feedback("plano", "lilas").unwrap();
        assert_eq!(
            statuses,
            [PresentElsewhere, Absent, Absent, PresentElsewhere, Absent]
        );
    }

    #[test]
    fn test_feedback_no_common_letters() {
        assert_eq!(compute_feedback("fuzil", "carta").unwrap(), [Absent; 5]);
    }

    #[test]
    fn test_feedback_rejects_bad_lengths() {
        assert_eq!(
            compute_feedback("fuzil", "branco").unwrap_err(),
            TermoError::InvalidLength {
                expected: 5,
                actual: 6
            }
        );
        assert!(compute_feedback("abc", "amigo").is_err());
        assert!(compute_feedback("amigo", "").is_err());
    }

    #[test]
    fn test_status_chars() {
        assert_eq!(LetterStatus::from_char('g'), Some(Correct));
        assert_eq!(LetterStatus::from_char('Y'), Some(PresentElsewhere));
        assert_eq!(LetterStatus::from_char('x'), Some(Absent));
        assert_eq!(LetterStatus::from_char('Z'), None);
        assert_eq!(ConfirmedAbsent.to_char(), 'X');
    }

    #[test]
    fn test_parse_statuses() {
        assert_eq!(
            parse_statuses("gyxxG").unwrap(),
            [Correct, PresentElsewhere, Absent, Absent, Correct]
        );
        assert!(parse_statuses("GGG").is_err());
        assert!(parse_statuses("GGGGA").is_err());
        assert_eq!(format_statuses(&[Correct, ConfirmedAbsent]), "GX");
    }

    #[test]
    fn test_cycle_order() {
        assert_eq!(Absent.cycle(), PresentElsewhere);
        assert_eq!(PresentElsewhere.cycle(), Correct);
        assert_eq!(Correct.cycle(), Absent);
        assert_eq!(ConfirmedAbsent.cycle(), PresentElsewhere);
    }

    #[test]
    fn test_escalate_only_fully_absent_letters() {
        let word = letters("sabia").unwrap();
        let statuses = [Absent, Correct, Absent, Absent, Absent];
        // A appears twice: once green, once gray, so it stays plain absent.
        assert_eq!(
            escalate_absent(&word, &statuses),
            [ConfirmedAbsent, Correct, ConfirmedAbsent, ConfirmedAbsent, Absent]
        );
    }

    #[test]
    fn test_escalate_repeated_absent_letter() {
        let word = letters("rarar").unwrap();
        let statuses = [Absent, PresentElsewhere, Absent, Absent, Absent];
        assert_eq!(
            escalate_absent(&word, &statuses),
            [
                ConfirmedAbsent,
                PresentElsewhere,
                ConfirmedAbsent,
                Absent,
                ConfirmedAbsent
            ]
        );
    }

    #[test]
    fn test_guess_requires_five_statuses() {
        assert!(Guess::new("amigo", &[Correct; 4]).is_err());
        assert!(Guess::new("amig", &[Correct; 5]).is_err());
        let guess = Guess::new("amigo", &[Correct; 5]).unwrap();
        assert!(guess.is_all_correct());
        assert_eq!(guess.letters(), &['a', 'm', 'i', 'g', 'o']);
    }
}
