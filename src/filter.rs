use crate::feedback::{Guess, LetterStatus, WORD_LENGTH};

/// Returns whether `candidate` could still be the answer given `guess`.
///
/// A candidate is consistent when guessing `guess.word()` against it would
/// have produced exactly `guess.statuses()`. The check works directly on the
/// letter constraints instead of recomputing feedback:
///
/// - green letters must match, gray and yellow letters must not match in place;
/// - a yellow letter must occur somewhere in the candidate;
/// - each letter must occur at least as often as it was marked green or yellow;
/// - if any occurrence of a letter was gray, the candidate must contain the
///   letter exactly as often as it was marked green or yellow.
pub fn is_consistent(candidate: &[char; WORD_LENGTH], guess: &Guess) -> bool {
    let letters = guess.letters();
    let statuses = guess.statuses();

    for i in 0..WORD_LENGTH {
        let here = candidate[i] == letters[i];
        let ok = match statuses[i] {
            LetterStatus::Correct => here,
            LetterStatus::Absent | LetterStatus::ConfirmedAbsent => !here,
            LetterStatus::PresentElsewhere => !here && candidate.contains(&letters[i]),
        };
        if !ok {
            return false;
        }
    }

    for (i, letter) in letters.iter().enumerate() {
        // Each distinct letter is checked once, at its first occurrence.
        if letters[..i].contains(letter) {
            continue;
        }
        let mut required = 0;
        let mut in_guess = 0;
        for j in 0..WORD_LENGTH {
            if letters[j] == *letter {
                in_guess += 1;
                if statuses[j].is_present() {
                    required += 1;
                }
            }
        }
        let in_candidate = candidate.iter().filter(|c| *c == letter).count();
        if in_candidate < required {
            return false;
        }
        if in_guess > required && in_candidate != required {
            return false;
        }
    }
    true
}

/// Keeps the words of `candidates` that are consistent with `guess`,
/// preserving their order. Words that are not exactly [`WORD_LENGTH`]
/// letters long are dropped.
pub fn filter_candidates(candidates: &[String], guess: &Guess) -> Vec<String> {
    candidates
        .iter()
        .filter(|word| {
            crate::feedback::letters(word)
                .map(|letters| is_consistent(&letters, guess))
                .unwrap_or(false)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::{compute_feedback, letters, parse_statuses};

    fn guess(word: &str, feedback: &str) -> Guess {
        Guess::new(word, &parse_statuses(feedback).unwrap()).unwrap()
    }

    fn consistent(candidate: &str, word: &str, feedback: &str) -> bool {
        is_consistent(&letters(candidate).unwrap(), &guess(word, feedback))
    }

    #[test]
    fn test_green_must_match() {
        assert!(consistent("amigo", "aaaaa", "GXXXX"));
        assert!(!consistent("bmigo", "azzzz", "GXXXX"));
    }

    #[test]
    fn test_gray_must_not_match_in_place() {
        assert!(!consistent("amigo", "zmzzz", "XXXXX"));
    }

    #[test]
    fn test_yellow_must_be_elsewhere() {
        assert!(consistent("amigo", "mzzzz", "YXXXX"));
        // Present at the same position is not "elsewhere"
        assert!(!consistent("amigo", "azzzz", "YXXXX"));
        // Not present at all
        assert!(!consistent("amigo", "bzzzz", "YXXXX"));
    }

    #[test]
    fn test_gray_letter_excluded_entirely() {
        assert!(!consistent("amigo", "ozzzz", "XXXXX"));
        assert!(consistent("amigo", "bzzzz", "XXXXX"));
    }

    #[test]
    fn test_minimum_count_from_two_yellows() {
        // Two yellow A's: candidate needs at least two A's.
        assert!(!consistent("amigo", "zaazz", "XYYXX"));
        assert!(consistent("aulas", "zaazz", "XYYXX"));
    }

    #[test]
    fn test_exact_count_when_extra_occurrence_gray() {
        // One yellow R and one gray R: exactly one R.
        assert!(consistent("barco", "rzzzr", "YXXXX"));
        assert!(!consistent("carro", "rzzzr", "YXXXX"));
    }

    #[test]
    fn test_extra_letters_allowed_without_gray() {
        // A single yellow A says nothing about an upper bound.
        assert!(consistent("arara", "zazzz", "XYXXX"));
    }

    #[test]
    fn test_filter_keeps_order() {
        let words: Vec<String> = ["sabia", "fuzil", "plano", "campo", "amigo"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let feedback = compute_feedback("campo", "plano").unwrap();
        let filtered = filter_candidates(&words, &Guess::new("plano", &feedback).unwrap());
        assert_eq!(filtered, vec!["campo".to_string()]);
    }

    #[test]
    fn test_filter_drops_malformed_words() {
        let words = vec!["amigo".to_string(), "ami".to_string()];
        let filtered = filter_candidates(&words, &guess("zzzzz", "XXXXX"));
        assert_eq!(filtered, vec!["amigo".to_string()]);
    }

    #[test]
    fn test_secret_survives_its_own_feedback() {
        let words = ["arara", "rarar", "amigo", "sabia", "termo", "lilas"];
        for secret in words {
            for guessed in words {
                let feedback = compute_feedback(secret, guessed).unwrap();
                let g = Guess::new(guessed, &feedback).unwrap();
                assert!(
                    is_consistent(&letters(secret).unwrap(), &g),
                    "{secret} should survive {guessed}"
                );
            }
        }
    }
}
