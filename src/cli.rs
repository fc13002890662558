use crate::evaluator::Classification;
use crate::game_state::{Game, GameInterface, GameStatus, Key, UserAction};
use crate::theme::ThemePreference;
use crate::wordbank::SupplyError;
use crate::{MAX_ATTEMPTS, WORD_LENGTH, debug_log};
use clap::Parser;
use std::collections::VecDeque;
use std::io::BufRead;
use std::path::PathBuf;

/// Wordle in the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited wordbank file
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<String>,

    /// Play against this word instead of a random one
    #[arg(long)]
    pub word: Option<String>,

    /// Seed for reproducible word draws
    #[arg(long)]
    pub seed: Option<u64>,

    /// Line-based interface instead of the full-screen one
    #[arg(long)]
    pub plain: bool,

    /// Write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

const KEYBOARD_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];

fn is_valid_word(word: &str) -> bool {
    word.len() == WORD_LENGTH && word.chars().all(|c| c.is_ascii_alphabetic())
}

fn parse_position(token: Option<&str>) -> Option<usize> {
    let position: usize = token?.parse().ok()?;
    (1..=WORD_LENGTH).contains(&position).then(|| position - 1)
}

/// Turn one input line into the actions it stands for.
///
/// A plain five-letter word replaces whatever is typed in the current row and
/// submits it. Commands starting with `:` drive the two editing styles
/// directly: `:key` presses on-screen keys, `:set`/`:clear` address a cell
/// (1-based). Returns `None` for lines that mean nothing.
pub fn parse_line(line: &str) -> Option<Vec<UserAction>> {
    let line = line.trim();
    let lower = line.to_lowercase();
    let mut tokens = lower.split_whitespace();

    match tokens.next()? {
        "exit" | "quit" => Some(vec![UserAction::Exit]),
        "next" | ":restart" => Some(vec![UserAction::Restart]),
        ":theme" => Some(vec![UserAction::ToggleTheme]),
        ":enter" => Some(vec![UserAction::Key(Key::Enter)]),
        "<" => Some(vec![UserAction::Key(Key::Backspace)]),
        ":key" => {
            let keys: Option<Vec<UserAction>> = line
                .split_whitespace()
                .skip(1)
                .map(|label| Key::parse(label).map(UserAction::Key))
                .collect();
            keys.filter(|keys| !keys.is_empty())
        }
        ":set" => {
            let position = parse_position(tokens.next())?;
            let mut letter = tokens.next()?.chars();
            match (letter.next(), letter.next()) {
                (Some(c), None) => Some(vec![UserAction::SetLetter(position, c)]),
                _ => None,
            }
        }
        ":clear" => Some(vec![UserAction::ClearLetter(parse_position(tokens.next())?)]),
        word if is_valid_word(word) && tokens.clone().next().is_none() => {
            let mut actions: Vec<UserAction> = word
                .chars()
                .enumerate()
                .map(|(i, c)| UserAction::SetLetter(i, c.to_ascii_uppercase()))
                .collect();
            actions.push(UserAction::Key(Key::Enter));
            Some(actions)
        }
        _ => None,
    }
}

fn format_row(letters: &[Option<char>], marks: Option<&[Classification]>) -> String {
    let cells: Vec<String> = letters
        .iter()
        .map(|c| c.unwrap_or('_').to_string())
        .collect();
    match marks {
        Some(marks) => {
            let marks: String = marks.iter().map(|c| c.mark()).collect();
            format!("{}   {marks}", cells.join(" "))
        }
        None => cells.join(" "),
    }
}

/// Text rendering of the grid and the keyboard hints.
///
/// Committed rows carry a G/Y/- mark per letter. Keys show as `[X]` when
/// correct, `(X)` when present, ` . ` when absent.
pub fn format_board(game: &Game) -> String {
    let mut lines = Vec::new();
    for (attempt, guess) in game.guesses().iter().enumerate() {
        let row = match guess {
            Some(guess) => {
                let letters: Vec<Option<char>> = guess.chars().map(Some).collect();
                let marks = game.classifications(attempt);
                format_row(&letters, marks.as_ref().map(|m| &m[..]))
            }
            None if attempt == game.attempt() && !game.status().is_over() => {
                format!("{} <", format_row(game.current_guess(), None))
            }
            None => format_row(&[None; WORD_LENGTH], None),
        };
        lines.push(format!("{:>2}  {row}", attempt + 1));
    }

    lines.push(String::new());
    for keys in KEYBOARD_ROWS {
        let row: Vec<String> = keys
            .chars()
            .map(|key| match game.hints().hint_for(key) {
                Some(Classification::Correct) => format!("[{key}]"),
                Some(Classification::Present) => format!("({key})"),
                Some(Classification::Absent) => " . ".to_string(),
                None => format!(" {key} "),
            })
            .collect();
        lines.push(row.concat());
    }
    lines.join("\n")
}

pub fn display_board(game: &Game) {
    println!("\n{}", format_board(game));
    let remaining = MAX_ATTEMPTS - game.attempt();
    println!(
        "\nEnter a 5-letter guess ({remaining} left), '<' to erase, ':theme', 'next' for a new word, or 'exit':"
    );
}

pub fn display_game_over(game: &Game) {
    println!();
    match (game.status(), game.revealed_target()) {
        (GameStatus::Won, _) => println!("Congratulations!"),
        (_, Some(target)) => println!("Game Over! The word was {target}"),
        _ => return,
    }
    for line in game.share_grid() {
        println!("{line}");
    }
    println!("Type 'next' to play again or 'exit' to quit.");
}

pub fn display_incomplete_guess() {
    println!("Guess must be exactly {WORD_LENGTH} letters!");
}

pub fn display_unavailable(error: &SupplyError) {
    println!("No word available: {error}. Type 'next' to retry or 'exit' to quit.");
}

pub fn display_invalid_input() {
    println!("Invalid guess. Please enter {WORD_LENGTH} letters.");
}

pub fn display_theme_changed(theme: ThemePreference) {
    println!("Theme set to {}.", theme.as_str());
}

pub fn display_exit_message() {
    println!("Exiting.");
}

pub fn display_new_game_message() {
    println!("New game started.");
}

/// Line-based implementation of `GameInterface` over any `BufRead`.
pub struct CliInterface<R: BufRead> {
    reader: R,
    pending: VecDeque<UserAction>,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_board(&mut self, game: &Game, _theme: ThemePreference) {
        // Only once the whole line has been applied
        if self.pending.is_empty() {
            display_board(game);
        }
    }

    fn display_incomplete_guess(&mut self) {
        display_incomplete_guess();
    }

    fn display_game_over(&mut self, game: &Game) {
        display_game_over(game);
    }

    fn display_unavailable(&mut self, error: &SupplyError) {
        if self.pending.is_empty() {
            display_unavailable(error);
        }
    }

    fn display_new_game_message(&mut self) {
        display_new_game_message();
    }

    fn display_theme_changed(&mut self, theme: ThemePreference) {
        display_theme_changed(theme);
    }

    fn display_exit_message(&mut self) {
        display_exit_message();
    }

    fn read_action(&mut self) -> Option<UserAction> {
        if let Some(action) = self.pending.pop_front() {
            return Some(action);
        }

        let mut input = String::new();
        match self.reader.read_line(&mut input) {
            Ok(0) => return Some(UserAction::Exit),
            Ok(_) => {}
            Err(e) => {
                log::warn!("Failed to read input: {e}");
                return Some(UserAction::Exit);
            }
        }

        match parse_line(&input) {
            Some(actions) => {
                debug_log!("read_action() - {} actions from {:?}", actions.len(), input);
                self.pending.extend(actions);
                self.pending.pop_front()
            }
            None => {
                display_invalid_input();
                None
            }
        }
    }
}
