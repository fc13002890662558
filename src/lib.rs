// Library interface for wordle-game
// This allows integration tests to access internal modules

pub mod cli;
pub mod evaluator;
pub mod game_state;
pub mod logging;
pub mod theme;
pub mod tui;
pub mod wordbank;

pub const WORD_LENGTH: usize = 5;
pub const MAX_ATTEMPTS: usize = 6;

// Re-export commonly used items for easier testing
pub use evaluator::{Classification, LetterHints, classify, update_hints};
pub use game_state::{Game, GameStatus, Key, Session, UserAction, game_loop};
pub use theme::{ThemePreference, ThemeSettings};
pub use wordbank::{
    SupplyError, TargetWord, WordSupply, load_wordbank_from_file, load_wordbank_from_str,
};
