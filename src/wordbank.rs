use crate::{WORD_LENGTH, debug_log, info_log};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/wordbank.txt");

fn is_valid_word(word: &str) -> bool {
    word.len() == WORD_LENGTH && word.chars().all(|c| c.is_ascii_alphabetic())
}

pub fn load_wordbank_from_str(data: &str) -> Vec<String> {
    data.lines()
        .map(|line| line.trim().to_uppercase())
        .filter(|word| is_valid_word(word))
        .collect()
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        let word = line?.trim().to_uppercase();
        if is_valid_word(&word) {
            words.push(word);
        }
    }
    Ok(words)
}

/// Error for text that cannot be a target word
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordError {
    InvalidLength(usize),
    InvalidCharacters,
}

impl fmt::Display for WordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength(len) => {
                write!(f, "Word must be exactly {WORD_LENGTH} letters, got {len}")
            }
            Self::InvalidCharacters => write!(f, "Word must contain only letters A-Z"),
        }
    }
}

impl std::error::Error for WordError {}

/// The secret answer of one game: five uppercase ASCII letters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetWord(String);

impl TargetWord {
    /// Validate and upper-case a candidate target.
    ///
    /// # Errors
    /// Returns `WordError` unless `text` is exactly five ASCII letters.
    pub fn new(text: &str) -> Result<Self, WordError> {
        let text = text.trim().to_uppercase();
        let len = text.chars().count();
        if len != WORD_LENGTH {
            return Err(WordError::InvalidLength(len));
        }
        if !text.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(WordError::InvalidCharacters);
        }
        Ok(Self(text))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why no target word could be produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupplyError {
    /// The corpus has no five-letter words to pick from
    EmptyCorpus,
    /// The supplier handed back something that is not a valid target
    InvalidWord(WordError),
}

impl fmt::Display for SupplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCorpus => write!(f, "No five-letter words are available"),
            Self::InvalidWord(e) => write!(f, "Word supply returned an invalid word: {e}"),
        }
    }
}

impl std::error::Error for SupplyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::EmptyCorpus => None,
            Self::InvalidWord(e) => Some(e),
        }
    }
}

impl From<WordError> for SupplyError {
    fn from(e: WordError) -> Self {
        Self::InvalidWord(e)
    }
}

/// Source of target words, asked once per game.
pub trait WordSupply {
    /// Draw the target for a new game.
    ///
    /// # Errors
    /// Returns `SupplyError` when no valid word can be produced.
    fn next_word(&mut self) -> Result<TargetWord, SupplyError>;
}

/// Uniform random draw from a word list.
pub struct RandomWordSupply {
    words: Vec<String>,
    rng: StdRng,
}

impl RandomWordSupply {
    pub fn new(words: Vec<String>) -> Self {
        info_log!("RandomWordSupply::new() - {} words", words.len());
        Self {
            words,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible draws for a given seed
    pub fn seeded(words: Vec<String>, seed: u64) -> Self {
        info_log!(
            "RandomWordSupply::seeded() - {} words, seed {}",
            words.len(),
            seed
        );
        Self {
            words,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl WordSupply for RandomWordSupply {
    fn next_word(&mut self) -> Result<TargetWord, SupplyError> {
        let word = self
            .words
            .choose(&mut self.rng)
            .ok_or(SupplyError::EmptyCorpus)?;
        debug_log!("RandomWordSupply::next_word() - drew a word");
        Ok(TargetWord::new(word)?)
    }
}

/// Always hands out the same word.
pub struct FixedWordSupply {
    word: TargetWord,
}

impl FixedWordSupply {
    pub fn new(word: TargetWord) -> Self {
        Self { word }
    }
}

impl WordSupply for FixedWordSupply {
    fn next_word(&mut self) -> Result<TargetWord, SupplyError> {
        Ok(self.word.clone())
    }
}
