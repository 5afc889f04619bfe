//! Property-based tests for feedback, filtering and solver sessions.

use proptest::prelude::*;

use termo_solver::feedback::letters;
use termo_solver::*;

// A tiny alphabet so repeated letters show up in most words
const ALPHABET: [char; 5] = ['a', 'b', 'e', 'r', 'o'];

type Entry = (String, [LetterStatus; WORD_LENGTH]);

/// Strategy: a five-letter word over the small alphabet.
fn word_strategy() -> impl Strategy<Value = String> {
    prop::array::uniform5(prop::sample::select(ALPHABET.to_vec()))
        .prop_map(|letters| letters.iter().collect())
}

/// Strategy: any statuses a player could enter.
fn statuses_strategy() -> impl Strategy<Value = [LetterStatus; WORD_LENGTH]> {
    prop::array::uniform5(prop::sample::select(vec![
        LetterStatus::Correct,
        LetterStatus::PresentElsewhere,
        LetterStatus::Absent,
    ]))
}

fn dictionary_strategy() -> impl Strategy<Value = Dictionary> {
    prop::collection::vec(word_strategy(), 1..60)
        .prop_map(|words| Dictionary::new(words, Vec::new()))
}

fn entries_strategy() -> impl Strategy<Value = Vec<Entry>> {
    prop::collection::vec((word_strategy(), statuses_strategy()), 1..5)
}

fn session_from<'a>(dict: &'a Dictionary, entries: &[Entry]) -> SolverSession<'a> {
    let mut session = SolverSession::new(dict);
    for (word, statuses) in entries {
        session.add_guess(word, statuses).unwrap();
    }
    session
}

proptest! {
    // 1. A candidate passes the filter exactly when it would have produced
    //    the observed feedback
    #[test]
    fn filter_agrees_with_feedback(
        secret in word_strategy(),
        guess in word_strategy(),
        candidate in word_strategy(),
    ) {
        let observed = compute_feedback(&secret, &guess).unwrap();
        let logged = Guess::new(&guess, &observed).unwrap();
        let expected = compute_feedback(&candidate, &guess).unwrap() == observed;
        prop_assert_eq!(
            is_consistent(&letters(&candidate).unwrap(), &logged),
            expected,
            "secret={} guess={} candidate={}", secret, guess, candidate
        );
    }

    // 2. The real secret survives any number of truthful guesses
    #[test]
    fn secret_is_never_filtered_out(
        dict in dictionary_strategy(),
        guesses in prop::collection::vec(word_strategy(), 1..6),
        pick in any::<prop::sample::Index>(),
    ) {
        let secret = pick.get(dict.answers()).clone();
        let mut session = SolverSession::new(&dict);
        for guess in &guesses {
            let statuses = compute_feedback(&secret, guess).unwrap();
            session.add_guess(guess, &statuses).unwrap();
            prop_assert!(session.candidates().contains(&secret));
        }
    }

    // 3. Guess order does not change the result
    #[test]
    fn guess_order_does_not_matter(
        dict in dictionary_strategy(),
        (entries, shuffled) in entries_strategy()
            .prop_flat_map(|entries| (Just(entries.clone()), Just(entries).prop_shuffle())),
    ) {
        let original = session_from(&dict, &entries);
        let permuted = session_from(&dict, &shuffled);
        prop_assert_eq!(original.candidates(), permuted.candidates());
    }

    // 4. Filtering is idempotent
    #[test]
    fn filtering_twice_changes_nothing(
        dict in dictionary_strategy(),
        guess in word_strategy(),
        statuses in statuses_strategy(),
    ) {
        let words = dict.index(WordList::Answers).words().to_vec();
        let logged = Guess::new(&guess, &statuses).unwrap();
        let once = filter_candidates(&words, &logged);
        let twice = filter_candidates(&once, &logged);
        prop_assert_eq!(once, twice);
    }

    // 5. Candidates only shrink until the session is reset
    #[test]
    fn candidates_never_grow(dict in dictionary_strategy(), entries in entries_strategy()) {
        let mut session = SolverSession::new(&dict);
        let mut previous = session.candidates().len();
        for (word, statuses) in &entries {
            let now = session.add_guess(word, statuses).unwrap().len();
            prop_assert!(now <= previous);
            previous = now;
        }
        session.reset_session();
        prop_assert_eq!(session.candidates().len(), session.word_count());
    }

    // 6. Removing a guess is the same as never having entered it
    #[test]
    fn removal_matches_fresh_session(
        dict in dictionary_strategy(),
        entries in entries_strategy(),
        pick in any::<prop::sample::Index>(),
    ) {
        let index = pick.index(entries.len());
        let mut session = session_from(&dict, &entries);
        session.remove_guess(index).unwrap();

        let mut surviving = entries.clone();
        surviving.remove(index);
        let fresh = session_from(&dict, &surviving);
        prop_assert_eq!(session.candidates(), fresh.candidates());
        prop_assert_eq!(session.guesses(), fresh.guesses());
    }

    // 7. A guess equal to the secret is all green
    #[test]
    fn exact_guess_is_all_correct(word in word_strategy()) {
        let statuses = compute_feedback(&word, &word).unwrap();
        prop_assert_eq!(statuses, [LetterStatus::Correct; WORD_LENGTH]);
    }

    // 8. Canonical forms are stable
    #[test]
    fn canonicalize_is_idempotent(word in "[a-zA-ZáàâãéêíóôõúçÁÂÃÉÊÍÓÔÕÚÇ ]{0,8}") {
        let once = canonicalize(&word);
        prop_assert_eq!(canonicalize(&once), once.clone());
    }
}
