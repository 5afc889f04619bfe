use crate::error::TermoError;
use crate::feedback::{LetterStatus, WORD_LENGTH};
use crate::game::{DateSource, GameSession, GameStatus, MAX_ATTEMPTS};
use crate::solver::SolverSession;
use crate::wordbank::{WordList, canonicalize};
use crate::{debug_log, info_log};

/// What the player asked the solver to do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(String),
    /// Remove the logged guess at this (zero-based) position.
    Remove(usize),
    /// Use the remaining candidate at this (zero-based) position as the next guess.
    Select(usize),
    ToggleWordList,
    Reset,
    Exit,
}

/// What the player asked the game to do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayAction {
    Guess(String),
    NewGame,
    Exit,
}

/// A logged guess ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessView {
    pub word: String,
    pub statuses: [LetterStatus; WORD_LENGTH],
}

/// Snapshot of a solver session in display form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub guesses: Vec<GuessView>,
    /// Remaining candidates in their accented spelling, in list order.
    pub candidates: Vec<String>,
    pub word_list: WordList,
    pub word_count: usize,
    pub solved: Option<String>,
    pub exhausted: bool,
}

impl SessionView {
    pub fn from_session(session: &SolverSession) -> Self {
        let guesses = session
            .guesses()
            .iter()
            .map(|g| GuessView {
                word: session.display(g.word()).to_string(),
                statuses: *g.statuses(),
            })
            .collect();
        let candidates: Vec<String> = session
            .candidates()
            .iter()
            .map(|w| session.display(w).to_string())
            .collect();
        let solved = if session.is_solved() {
            candidates.first().cloned()
        } else {
            None
        };
        Self {
            guesses,
            candidates,
            word_list: session.word_list(),
            word_count: session.word_count(),
            solved,
            exhausted: session.is_exhausted(),
        }
    }
}

/// Front end for an interactive solver session.
pub trait SolverInterface {
    fn display_session(&mut self, view: &SessionView);
    /// `None` means the input was rejected and the caller should ask again.
    fn read_action(&mut self) -> Option<UserAction>;
    /// Asks for the feedback of `word`, starting from `suggested`.
    fn read_statuses(
        &mut self,
        word: &str,
        suggested: &[LetterStatus; WORD_LENGTH],
    ) -> Option<[LetterStatus; WORD_LENGTH]>;
    fn display_error(&mut self, message: &str);
    fn display_exit_message(&mut self);
}

/// Front end for a simulated game.
pub trait PlayInterface {
    fn display_new_game(&mut self, max_attempts: usize);
    fn read_play_action(&mut self) -> Option<PlayAction>;
    fn display_feedback(&mut self, word: &str, statuses: &[LetterStatus; WORD_LENGTH], attempt: usize);
    fn display_invalid_guess(&mut self, error: &TermoError);
    fn display_outcome(&mut self, status: GameStatus, secret: &str, attempts: usize);
    fn display_exit_message(&mut self);
}

pub fn solver_loop<I: SolverInterface>(session: &mut SolverSession, interface: &mut I) {
    interface.display_session(&SessionView::from_session(session));

    loop {
        let Some(action) = interface.read_action() else {
            continue;
        };
        debug_log!("solver_loop() - action {:?}", action);

        match action {
            UserAction::Exit => {
                interface.display_exit_message();
                break;
            }
            UserAction::Guess(word) => {
                let suggested = match session.prefill_statuses(&word) {
                    Ok(statuses) => statuses,
                    Err(e) => {
                        interface.display_error(&e.to_string());
                        continue;
                    }
                };
                if !record_guess(session, interface, &word, &suggested) {
                    continue;
                }
            }
            UserAction::Select(index) => {
                let Some((word, suggested)) = session.select_candidate(index) else {
                    interface.display_error(&format!(
                        "No candidate number {} ({} remaining).",
                        index + 1,
                        session.candidates().len()
                    ));
                    continue;
                };
                if !record_guess(session, interface, &word, &suggested) {
                    continue;
                }
            }
            UserAction::Remove(index) => {
                if let Err(e) = session.remove_guess(index) {
                    interface.display_error(&e.to_string());
                    continue;
                }
            }
            UserAction::ToggleWordList => {
                session.toggle_word_list();
            }
            UserAction::Reset => session.reset_session(),
        }

        interface.display_session(&SessionView::from_session(session));
    }
}

/// Asks for the statuses of `word` and logs it. Returns whether the session changed.
fn record_guess<I: SolverInterface>(
    session: &mut SolverSession,
    interface: &mut I,
    word: &str,
    suggested: &[LetterStatus; WORD_LENGTH],
) -> bool {
    let shown = session.display(&canonicalize(word)).to_string();
    let Some(statuses) = interface.read_statuses(&shown, suggested) else {
        return false;
    };
    match session.add_guess(word, &statuses) {
        Ok(_) => true,
        Err(e) => {
            interface.display_error(&e.to_string());
            false
        }
    }
}

pub fn play_loop<I: PlayInterface>(
    game: &mut GameSession,
    dates: &dyn DateSource,
    interface: &mut I,
) {
    interface.display_new_game(MAX_ATTEMPTS);

    loop {
        let Some(action) = interface.read_play_action() else {
            continue;
        };

        match action {
            PlayAction::Exit => {
                interface.display_exit_message();
                break;
            }
            PlayAction::NewGame => {
                if let Err(e) = game.reset_game(dates) {
                    interface.display_invalid_guess(&e);
                    break;
                }
                info_log!("play_loop() - new game");
                interface.display_new_game(MAX_ATTEMPTS);
            }
            PlayAction::Guess(word) => {
                let guess = match game.submit_guess(&word) {
                    Ok(guess) => guess.clone(),
                    Err(e) => {
                        interface.display_invalid_guess(&e);
                        continue;
                    }
                };
                interface.display_feedback(
                    game.display(guess.word()),
                    guess.statuses(),
                    game.attempts(),
                );
                if let Some(secret) = game.revealed_secret() {
                    interface.display_outcome(game.status(), secret, game.attempts());
                }
            }
        }
    }
}
