use std::io;
use termo_solver::cli::{CliInterface, Mode, parse_cli};
use termo_solver::game::{DateSource, FixedDate, GameSession, SystemDate};
use termo_solver::game_state::{play_loop, solver_loop};
use termo_solver::logging;
use termo_solver::solver::SolverSession;
use termo_solver::tui::TuiInterface;
use termo_solver::wordbank::{Dictionary, WordList};
use termo_solver::{debug_log, info_log};

fn main() {
    let cli = parse_cli();
    if let Err(e) = logging::init(cli.log_file.as_deref()) {
        eprintln!("Failed to open log file: {e}");
        return;
    }
    debug_log!("Parsed arguments: {:?}", cli);

    let dictionary = match Dictionary::load(cli.answers_path.as_deref(), cli.guessable_path.as_deref()) {
        Ok(dictionary) => dictionary,
        Err(e) => {
            eprintln!("Failed to load word lists: {e}");
            return;
        }
    };
    info_log!(
        "Loaded {} answers and {} extra guessable words",
        dictionary.answers().len(),
        dictionary.guessable().len()
    );

    match cli.mode() {
        Mode::Solve { all_words, tui } => {
            let word_list = if all_words {
                WordList::All
            } else {
                WordList::Answers
            };
            let mut session = SolverSession::with_word_list(&dictionary, word_list);
            if tui {
                let mut interface = match TuiInterface::new() {
                    Ok(interface) => interface,
                    Err(e) => {
                        eprintln!("Failed to start the terminal interface: {e}");
                        return;
                    }
                };
                solver_loop(&mut session, &mut interface);
            } else {
                println!("Loaded {} words.", session.word_count());
                let mut interface = CliInterface::new(io::stdin().lock());
                solver_loop(&mut session, &mut interface);
            }
        }
        Mode::Play { date } => {
            let dates: Box<dyn DateSource> = match date {
                Some(date) => Box::new(FixedDate(date)),
                None => Box::new(SystemDate),
            };
            let mut game = match GameSession::new(&dictionary, dates.as_ref()) {
                Ok(game) => game,
                Err(e) => {
                    eprintln!("Cannot start a game: {e}");
                    return;
                }
            };
            let mut interface = CliInterface::new(io::stdin().lock());
            play_loop(&mut game, dates.as_ref(), &mut interface);
        }
    }
}
