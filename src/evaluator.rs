//! Guess evaluation and keyboard hint tracking.
//!
//! Each position is judged on its own: a letter is `Correct` when it sits in
//! the same slot of the target, `Present` when the target contains it
//! anywhere else, `Absent` otherwise. Repeated letters are not counted, so two
//! misplaced `E`s against a target with a single `E` are both `Present`.

use crate::WORD_LENGTH;
use std::collections::BTreeSet;

/// Feedback for a single guessed letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Right letter, right slot (green)
    Correct,
    /// Letter occurs elsewhere in the target (yellow)
    Present,
    /// Letter does not occur in the target (gray)
    Absent,
}

impl Classification {
    /// Square used in the shareable result grid
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Self::Correct => '🟩',
            Self::Present => '🟨',
            Self::Absent => '⬛',
        }
    }

    /// Single-letter mark used by the plain text board
    #[must_use]
    pub fn mark(self) -> char {
        match self {
            Self::Correct => 'G',
            Self::Present => 'Y',
            Self::Absent => '-',
        }
    }
}

/// Score each guessed letter against the target, position by position.
pub fn classify(guess: &str, target: &str) -> [Classification; WORD_LENGTH] {
    let target_chars: Vec<char> = target.chars().collect();
    let mut result = [Classification::Absent; WORD_LENGTH];

    for (i, letter) in guess.chars().take(WORD_LENGTH).enumerate() {
        result[i] = if target_chars.get(i) == Some(&letter) {
            Classification::Correct
        } else if target_chars.contains(&letter) {
            Classification::Present
        } else {
            Classification::Absent
        };
    }
    result
}

/// Letter knowledge accumulated over every submitted guess of a game.
///
/// The three sets only ever grow. A letter may sit in both `correct` and
/// `present` when it was guessed in the right slot once and a wrong slot
/// another time; `hint_for` resolves that for the keyboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterHints {
    correct: BTreeSet<char>,
    present: BTreeSet<char>,
    absent: BTreeSet<char>,
}

impl LetterHints {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one submitted guess into the hint sets.
    pub fn update(&mut self, guess: &str, target: &str) {
        for (letter, class) in guess.chars().zip(classify(guess, target)) {
            match class {
                Classification::Correct => self.correct.insert(letter),
                Classification::Present => self.present.insert(letter),
                Classification::Absent => self.absent.insert(letter),
            };
        }
    }

    #[must_use]
    pub fn correct(&self) -> &BTreeSet<char> {
        &self.correct
    }

    #[must_use]
    pub fn present(&self) -> &BTreeSet<char> {
        &self.present
    }

    #[must_use]
    pub fn absent(&self) -> &BTreeSet<char> {
        &self.absent
    }

    /// Keys a simpler keyboard would grey out.
    #[must_use]
    pub fn disabled_letters(&self) -> BTreeSet<char> {
        self.absent.clone()
    }

    /// Colour of a keyboard key, best knowledge first.
    #[must_use]
    pub fn hint_for(&self, letter: char) -> Option<Classification> {
        if self.correct.contains(&letter) {
            Some(Classification::Correct)
        } else if self.present.contains(&letter) {
            Some(Classification::Present)
        } else if self.absent.contains(&letter) {
            Some(Classification::Absent)
        } else {
            None
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.correct.is_empty() && self.present.is_empty() && self.absent.is_empty()
    }
}

/// Non-mutating form of [`LetterHints::update`].
#[must_use]
pub fn update_hints(guess: &str, target: &str, hints: &LetterHints) -> LetterHints {
    let mut next = hints.clone();
    next.update(guess, target);
    next
}
