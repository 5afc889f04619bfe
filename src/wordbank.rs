use crate::feedback::WORD_LENGTH;
use crate::info_log;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

pub const EMBEDDED_ANSWERS: &str = include_str!("resources/answers.txt");
pub const EMBEDDED_GUESSABLE: &str = include_str!("resources/guessable.txt");

const CONFIG_DIR_NAME: &str = "termo-solver";
const ANSWERS_FILE_NAME: &str = "answers.txt";
const GUESSABLE_FILE_NAME: &str = "guessable.txt";

/// Maps a word to the key used for all matching: accents stripped, lowercase.
pub fn canonicalize(word: &str) -> String {
    word.trim()
        .nfd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn is_valid_word(word: &str) -> bool {
    let canonical = canonicalize(word);
    canonical.chars().count() == WORD_LENGTH && canonical.chars().all(char::is_alphabetic)
}

/// Parses a newline-delimited word list.
///
/// Words are trimmed and lowercased, keeping their accents. Blank lines,
/// `#` comments and words that are not five letters long are skipped, as
/// are later words that share a canonical form with an earlier one.
pub fn load_wordbank_from_str(data: &str) -> Vec<String> {
    clean_words(data.lines().filter(|line| !line.trim_start().starts_with('#')))
}

/// Lowercases, drops words that are not five letters long and drops later
/// words sharing a canonical form with an earlier one.
fn clean_words<I, S>(words: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    words
        .into_iter()
        .map(|word| word.as_ref().trim().to_lowercase())
        .filter(|word| is_valid_word(word))
        .filter(|word| seen.insert(canonicalize(word)))
        .collect()
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut data = String::new();
    for line in reader.lines() {
        data.push_str(&line?);
        data.push('\n');
    }
    Ok(load_wordbank_from_str(&data))
}

/// Directory searched for user-provided word lists.
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME))
}

/// Picks the source for one word list: an explicit path, then a file in the
/// config directory, then nothing (the embedded list is used).
fn resolve_list_path(explicit: Option<&Path>, file_name: &str) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let path = get_config_dir()?.join(file_name);
    path.is_file().then_some(path)
}

fn load_list(explicit: Option<&Path>, file_name: &str, embedded: &str) -> io::Result<Vec<String>> {
    match resolve_list_path(explicit, file_name) {
        Some(path) => {
            info_log!("Loading {} from {}", file_name, path.display());
            load_wordbank_from_file(path)
        }
        None => Ok(load_wordbank_from_str(embedded)),
    }
}

/// Which words the solver treats as possible answers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum WordList {
    /// Only words that can be the word of the day.
    #[default]
    Answers,
    /// Answers plus the words that are only accepted as guesses.
    All,
}

impl WordList {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Answers => Self::All,
            Self::All => Self::Answers,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Self::Answers => "answers only",
            Self::All => "all accepted words",
        }
    }
}

/// The static word lists: possible answers and extra accepted guesses.
///
/// Both lists hold the original (possibly accented) spelling. The two lists
/// never share a canonical form.
#[derive(Clone, Debug, Default)]
pub struct Dictionary {
    answers: Vec<String>,
    guessable: Vec<String>,
}

impl Dictionary {
    /// Builds a dictionary from raw lists, applying the same word checks as
    /// list files.
    pub fn new(answers: Vec<String>, guessable: Vec<String>) -> Self {
        let answers = clean_words(answers);
        let answer_keys: HashSet<String> = answers.iter().map(|w| canonicalize(w)).collect();
        let guessable = clean_words(guessable)
            .into_iter()
            .filter(|w| !answer_keys.contains(&canonicalize(w)))
            .collect();
        Self { answers, guessable }
    }

    /// Parses both lists from newline-delimited text.
    pub fn from_strs(answers: &str, guessable: &str) -> Self {
        Self::new(
            load_wordbank_from_str(answers),
            load_wordbank_from_str(guessable),
        )
    }

    /// The lists compiled into the binary.
    pub fn embedded() -> Self {
        Self::from_strs(EMBEDDED_ANSWERS, EMBEDDED_GUESSABLE)
    }

    /// Loads each list from its explicit path, the config directory, or the
    /// embedded copy, in that order.
    pub fn load(answers: Option<&Path>, guessable: Option<&Path>) -> io::Result<Self> {
        let answers = load_list(answers, ANSWERS_FILE_NAME, EMBEDDED_ANSWERS)?;
        let guessable = load_list(guessable, GUESSABLE_FILE_NAME, EMBEDDED_GUESSABLE)?;
        Ok(Self::new(answers, guessable))
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    pub fn guessable(&self) -> &[String] {
        &self.guessable
    }

    /// Builds the canonical word list and display mapping for `list`.
    pub fn index(&self, list: WordList) -> WordIndex {
        match list {
            WordList::Answers => WordIndex::build(self.answers.iter()),
            WordList::All => WordIndex::build(self.answers.iter().chain(self.guessable.iter())),
        }
    }
}

/// Canonical words in dictionary order, plus the way to display each one.
#[derive(Clone, Debug, Default)]
pub struct WordIndex {
    words: Vec<String>,
    display: HashMap<String, String>,
}

impl WordIndex {
    fn build<'a>(originals: impl Iterator<Item = &'a String>) -> Self {
        let mut words = Vec::new();
        let mut display = HashMap::new();
        for original in originals {
            let key = canonicalize(original);
            if !display.contains_key(&key) {
                words.push(key.clone());
                display.insert(key, original.clone());
            }
        }
        Self { words, display }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, canonical: &str) -> bool {
        self.display.contains_key(canonical)
    }

    /// The accented spelling of `canonical`, or the key itself when unknown.
    pub fn display<'a>(&'a self, canonical: &'a str) -> &'a str {
        self.display.get(canonical).map_or(canonical, String::as_str)
    }
}
