use crate::evaluator::{Classification, LetterHints, classify};
use crate::theme::{ThemePreference, ThemeSettings};
use crate::wordbank::{SupplyError, TargetWord, WordSupply};
use crate::{MAX_ATTEMPTS, WORD_LENGTH, debug_log, info_log};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    #[must_use]
    pub fn is_over(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// A key from an on-screen keyboard, which has no notion of cell positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Letter(char),
    Backspace,
    Enter,
}

impl Key {
    /// Parse a key label: `Enter`, `Backspace` (any case) or a single letter.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            _ if label.eq_ignore_ascii_case("enter") => Some(Self::Enter),
            _ if label.eq_ignore_ascii_case("backspace") => Some(Self::Backspace),
            _ => {
                let mut chars = label.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_alphabetic() => Some(Self::Letter(c)),
                    _ => None,
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    /// The cell held a letter and is now empty
    Cleared(usize),
    /// The cell was already empty; focus stepped back to this cell
    FocusMoved(usize),
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Guess incomplete or game already over; nothing changed
    Rejected,
    Committed {
        attempt: usize,
        classifications: [Classification; WORD_LENGTH],
        status: GameStatus,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Typed(usize),
    Cleared(usize),
    Submitted(SubmitOutcome),
    Ignored,
}

/// One game: the target, the committed rows, and the row being typed.
///
/// The row being typed is a fixed array of cells plus a focus index. Two thin
/// adapters edit it: [`Game::set_letter`]/[`Game::clear_letter`] address a cell
/// directly, [`Game::type_key`] finds the cell by scanning for the first gap.
/// Every rejected operation leaves the game untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    target: TargetWord,
    guesses: [Option<String>; MAX_ATTEMPTS],
    cells: [Option<char>; WORD_LENGTH],
    focus: usize,
    attempt: usize,
    status: GameStatus,
    hints: LetterHints,
}

impl Game {
    #[must_use]
    pub fn new(target: TargetWord) -> Self {
        Self {
            target,
            guesses: Default::default(),
            cells: [None; WORD_LENGTH],
            focus: 0,
            attempt: 0,
            status: GameStatus::InProgress,
            hints: LetterHints::new(),
        }
    }

    /// Write `letter` into cell `position` and move focus to the next cell.
    ///
    /// Lowercase letters are upper-cased. Returns `false` without touching
    /// anything for non-letters, positions past the row, or a finished game.
    pub fn set_letter(&mut self, position: usize, letter: char) -> bool {
        let letter = letter.to_ascii_uppercase();
        if self.status.is_over() || position >= WORD_LENGTH || !letter.is_ascii_uppercase() {
            debug_log!("set_letter() - ignored {:?} at {}", letter, position);
            return false;
        }
        self.cells[position] = Some(letter);
        self.focus = if position < WORD_LENGTH - 1 {
            position + 1
        } else {
            position
        };
        true
    }

    /// Backspace on cell `position`: empty it, or step focus back if it was
    /// already empty.
    pub fn clear_letter(&mut self, position: usize) -> ClearOutcome {
        if self.status.is_over() || position >= WORD_LENGTH {
            return ClearOutcome::Unchanged;
        }
        if self.cells[position].is_some() {
            self.cells[position] = None;
            self.focus = position;
            ClearOutcome::Cleared(position)
        } else if position > 0 {
            self.focus = position - 1;
            ClearOutcome::FocusMoved(position - 1)
        } else {
            ClearOutcome::Unchanged
        }
    }

    /// Move focus to another cell of the row being typed.
    pub fn focus_cell(&mut self, position: usize) -> bool {
        if self.status.is_over() || position >= WORD_LENGTH {
            return false;
        }
        self.focus = position;
        true
    }

    /// First empty cell of the row being typed.
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.cells.iter().position(Option::is_none)
    }

    pub fn type_key(&mut self, key: Key) -> KeyOutcome {
        if self.status.is_over() {
            return KeyOutcome::Ignored;
        }
        match key {
            Key::Enter => KeyOutcome::Submitted(self.submit()),
            Key::Backspace => {
                let index = match self.active_index() {
                    None => WORD_LENGTH - 1,
                    Some(0) => return KeyOutcome::Ignored,
                    Some(i) => i - 1,
                };
                self.cells[index] = None;
                self.focus = index;
                KeyOutcome::Cleared(index)
            }
            Key::Letter(letter) => match self.active_index() {
                Some(i) if self.set_letter(i, letter) => KeyOutcome::Typed(i),
                _ => KeyOutcome::Ignored,
            },
        }
    }

    /// Commit the typed row as a guess.
    ///
    /// A win is checked before running out of attempts, so guessing the word
    /// on the last row still wins.
    pub fn submit(&mut self) -> SubmitOutcome {
        if self.status.is_over() {
            return SubmitOutcome::Rejected;
        }
        let Some(guess) = self.current_word() else {
            debug_log!("submit() - incomplete guess rejected");
            return SubmitOutcome::Rejected;
        };

        let attempt = self.attempt;
        let classifications = classify(&guess, self.target.as_str());
        self.hints.update(&guess, self.target.as_str());

        if guess == self.target.as_str() {
            self.status = GameStatus::Won;
        } else if attempt + 1 == MAX_ATTEMPTS {
            self.status = GameStatus::Lost;
        } else {
            self.attempt += 1;
            self.cells = [None; WORD_LENGTH];
            self.focus = 0;
        }
        self.guesses[attempt] = Some(guess);
        info_log!(
            "submit() - attempt {} committed, status {:?}",
            attempt + 1,
            self.status
        );

        SubmitOutcome::Committed {
            attempt,
            classifications,
            status: self.status,
        }
    }

    /// The row being typed as a word, once every cell is filled.
    #[must_use]
    pub fn current_word(&self) -> Option<String> {
        self.cells.iter().copied().collect()
    }

    #[must_use]
    pub fn current_guess(&self) -> &[Option<char>; WORD_LENGTH] {
        &self.cells
    }

    #[must_use]
    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Index of the active row, or of the final row once the game is over
    #[must_use]
    pub fn attempt(&self) -> usize {
        self.attempt
    }

    #[must_use]
    pub fn guesses(&self) -> &[Option<String>; MAX_ATTEMPTS] {
        &self.guesses
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn hints(&self) -> &LetterHints {
        &self.hints
    }

    /// Feedback for a committed row
    #[must_use]
    pub fn classifications(&self, attempt: usize) -> Option<[Classification; WORD_LENGTH]> {
        let guess = self.guesses.get(attempt)?.as_ref()?;
        Some(classify(guess, self.target.as_str()))
    }

    /// The answer may only be shown to the player after a loss.
    #[must_use]
    pub fn revealed_target(&self) -> Option<&TargetWord> {
        (self.status == GameStatus::Lost).then_some(&self.target)
    }

    #[must_use]
    pub fn target(&self) -> &TargetWord {
        &self.target
    }

    /// One line of coloured squares per committed guess.
    #[must_use]
    pub fn share_grid(&self) -> Vec<String> {
        (0..MAX_ATTEMPTS)
            .filter_map(|attempt| self.classifications(attempt))
            .map(|row| row.iter().map(|c| c.symbol()).collect())
            .collect()
    }
}

/// Where a session stands with respect to its target word.
#[derive(Debug)]
pub enum Phase {
    /// Waiting for the word supply; gameplay is rejected
    Loading,
    Ready(Game),
    Unavailable(SupplyError),
}

/// A game plus the word supply that feeds it new targets.
pub struct Session {
    supply: Box<dyn WordSupply>,
    phase: Phase,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

impl Session {
    pub fn new(supply: Box<dyn WordSupply>) -> Self {
        Self {
            supply,
            phase: Phase::Loading,
        }
    }

    /// Draw a target and begin the first game.
    pub fn start(&mut self) {
        self.phase = Phase::Loading;
        let result = self.supply.next_word();
        self.provide_word(result);
    }

    /// Throw the current game away and begin a new one with a fresh word.
    pub fn restart(&mut self) {
        info_log!("Session::restart()");
        self.start();
    }

    /// Hand in the result of a word fetch. Ignored unless the session is
    /// waiting for one.
    pub fn provide_word(&mut self, result: Result<TargetWord, SupplyError>) {
        if !matches!(self.phase, Phase::Loading) {
            debug_log!("provide_word() - session not loading, ignoring");
            return;
        }
        self.phase = match result {
            Ok(target) => Phase::Ready(Game::new(target)),
            Err(e) => {
                log::error!("Word supply unavailable: {e}");
                Phase::Unavailable(e)
            }
        };
    }

    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    #[must_use]
    pub fn game(&self) -> Option<&Game> {
        match &self.phase {
            Phase::Ready(game) => Some(game),
            _ => None,
        }
    }

    pub fn game_mut(&mut self) -> Option<&mut Game> {
        match &mut self.phase {
            Phase::Ready(game) => Some(game),
            _ => None,
        }
    }
}

/// Player input, whatever front end it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    SetLetter(usize, char),
    ClearLetter(usize),
    FocusCell(usize),
    Key(Key),
    Restart,
    ToggleTheme,
    Exit,
}

/// Presentation side of the game loop.
pub trait GameInterface {
    fn display_board(&mut self, game: &Game, theme: ThemePreference);
    fn display_incomplete_guess(&mut self);
    fn display_game_over(&mut self, game: &Game);
    fn display_unavailable(&mut self, error: &SupplyError);
    fn display_new_game_message(&mut self);
    fn display_theme_changed(&mut self, theme: ThemePreference);
    fn display_exit_message(&mut self);
    /// Next player action, or `None` if the input produced nothing usable.
    fn read_action(&mut self) -> Option<UserAction>;
}

fn apply_game_action(game: &mut Game, action: UserAction) -> Option<SubmitOutcome> {
    match action {
        UserAction::SetLetter(position, letter) => {
            game.set_letter(position, letter);
            None
        }
        UserAction::ClearLetter(position) => {
            game.clear_letter(position);
            None
        }
        UserAction::FocusCell(position) => {
            game.focus_cell(position);
            None
        }
        UserAction::Key(key) => match game.type_key(key) {
            KeyOutcome::Submitted(outcome) => Some(outcome),
            _ => None,
        },
        UserAction::Restart | UserAction::ToggleTheme | UserAction::Exit => None,
    }
}

pub fn game_loop<I: GameInterface + ?Sized>(
    session: &mut Session,
    settings: &mut ThemeSettings,
    interface: &mut I,
) {
    if matches!(session.phase(), Phase::Loading) {
        session.start();
    }

    loop {
        match session.phase() {
            Phase::Ready(game) => interface.display_board(game, settings.theme()),
            Phase::Unavailable(e) => interface.display_unavailable(e),
            Phase::Loading => {}
        }

        let Some(action) = interface.read_action() else {
            continue;
        };
        debug_log!("game_loop() - action {:?}", action);

        match action {
            UserAction::Exit => {
                interface.display_exit_message();
                break;
            }
            UserAction::Restart => {
                session.restart();
                if session.game().is_some() {
                    interface.display_new_game_message();
                }
            }
            UserAction::ToggleTheme => {
                let theme = settings.toggle();
                interface.display_theme_changed(theme);
            }
            action => {
                let Some(game) = session.game_mut() else {
                    debug_log!("game_loop() - no game ready, ignoring input");
                    continue;
                };
                let was_over = game.status().is_over();
                let is_submit = action == UserAction::Key(Key::Enter);
                match apply_game_action(game, action) {
                    Some(SubmitOutcome::Committed { status, .. }) if status.is_over() && !was_over => {
                        interface.display_game_over(game);
                    }
                    Some(SubmitOutcome::Rejected) if is_submit && !was_over => {
                        interface.display_incomplete_guess();
                    }
                    _ => {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::MemoryPreferenceStore;
    use crate::wordbank::{FixedWordSupply, RandomWordSupply};
    use Classification::{Absent, Correct};

    fn game(target: &str) -> Game {
        Game::new(TargetWord::new(target).unwrap())
    }

    fn type_word(game: &mut Game, word: &str) -> KeyOutcome {
        for c in word.chars() {
            game.type_key(Key::Letter(c));
        }
        game.type_key(Key::Enter)
    }

    #[test]
    fn test_new_game_is_empty() {
        let g = game("CRANE");
        assert_eq!(g.status(), GameStatus::InProgress);
        assert_eq!(g.attempt(), 0);
        assert_eq!(g.focus(), 0);
        assert!(g.guesses().iter().all(Option::is_none));
        assert_eq!(g.current_guess(), &[None; WORD_LENGTH]);
        assert!(g.hints().is_empty());
    }

    #[test]
    fn test_set_letter_advances_focus() {
        let mut g = game("CRANE");
        assert!(g.set_letter(0, 'C'));
        assert_eq!(g.focus(), 1);
        assert!(g.set_letter(4, 'e'));
        assert_eq!(g.current_guess()[4], Some('E'));
        assert_eq!(g.focus(), 4);
    }

    #[test]
    fn test_set_letter_rejects_bad_input() {
        let mut g = game("CRANE");
        assert!(!g.set_letter(0, '1'));
        assert!(!g.set_letter(0, 'é'));
        assert!(!g.set_letter(WORD_LENGTH, 'A'));
        assert_eq!(g, game("CRANE"));
    }

    #[test]
    fn test_clear_letter_steps_back_when_empty() {
        let mut g = game("CRANE");
        g.set_letter(0, 'C');
        g.set_letter(1, 'R');
        assert_eq!(g.clear_letter(2), ClearOutcome::FocusMoved(1));
        assert_eq!(g.focus(), 1);
        assert_eq!(g.clear_letter(1), ClearOutcome::Cleared(1));
        assert_eq!(g.current_guess()[1], None);
        assert_eq!(g.current_guess()[0], Some('C'));
    }

    #[test]
    fn test_clear_letter_first_cell_empty() {
        let mut g = game("CRANE");
        assert_eq!(g.clear_letter(0), ClearOutcome::Unchanged);
        assert_eq!(g.clear_letter(9), ClearOutcome::Unchanged);
        assert_eq!(g.focus(), 0);
    }

    #[test]
    fn test_focus_cell_bounds() {
        let mut g = game("CRANE");
        assert!(g.focus_cell(3));
        assert_eq!(g.focus(), 3);
        assert!(!g.focus_cell(WORD_LENGTH));
        assert_eq!(g.focus(), 3);
    }

    #[test]
    fn test_type_key_fills_first_gap() {
        let mut g = game("CRANE");
        g.set_letter(0, 'C');
        g.set_letter(2, 'A');
        assert_eq!(g.type_key(Key::Letter('R')), KeyOutcome::Typed(1));
        assert_eq!(g.type_key(Key::Letter('N')), KeyOutcome::Typed(3));
        assert_eq!(g.active_index(), Some(4));
    }

    #[test]
    fn test_type_key_ignores_letter_when_full() {
        let mut g = game("CRANE");
        for c in "CRATE".chars() {
            g.type_key(Key::Letter(c));
        }
        assert_eq!(g.type_key(Key::Letter('X')), KeyOutcome::Ignored);
        assert_eq!(g.current_word().as_deref(), Some("CRATE"));
        assert_eq!(g.type_key(Key::Letter('3')), KeyOutcome::Ignored);
    }

    #[test]
    fn test_type_key_backspace_rules() {
        let mut g = game("CRANE");
        assert_eq!(g.type_key(Key::Backspace), KeyOutcome::Ignored);

        for c in "CRATE".chars() {
            g.type_key(Key::Letter(c));
        }
        // Full row clears the last cell
        assert_eq!(g.type_key(Key::Backspace), KeyOutcome::Cleared(4));
        // Otherwise the cell before the first gap
        assert_eq!(g.type_key(Key::Backspace), KeyOutcome::Cleared(3));
        assert_eq!(g.focus(), 3);
        assert_eq!(g.current_word(), None);
    }

    #[test]
    fn test_type_key_backspace_with_gap_in_middle() {
        let mut g = game("CRANE");
        g.set_letter(0, 'C');
        g.set_letter(1, 'R');
        g.set_letter(3, 'N');
        // First gap is 2, so cell 1 goes; the later N stays
        assert_eq!(g.type_key(Key::Backspace), KeyOutcome::Cleared(1));
        assert_eq!(g.current_guess(), &[Some('C'), None, None, Some('N'), None]);
    }

    #[test]
    fn test_both_adapters_commit_same_row() {
        let mut scanned = game("CRANE");
        for _ in 0..WORD_LENGTH {
            scanned.type_key(Key::Letter('A'));
        }
        scanned.type_key(Key::Enter);

        let mut direct = game("CRANE");
        for i in 0..WORD_LENGTH {
            direct.set_letter(i, 'A');
        }
        direct.submit();

        assert_eq!(scanned.guesses()[0].as_deref(), Some("AAAAA"));
        assert_eq!(scanned, direct);
    }

    #[test]
    fn test_both_adapters_agree_on_edits() {
        let mut scanned = game("CRANE");
        for c in "CRA".chars() {
            scanned.type_key(Key::Letter(c));
        }
        scanned.type_key(Key::Backspace);

        let mut direct = game("CRANE");
        for (i, c) in "CRA".chars().enumerate() {
            direct.set_letter(i, c);
        }
        direct.clear_letter(3);
        direct.clear_letter(2);

        assert_eq!(scanned, direct);
        assert_eq!(scanned.focus(), 2);
    }

    #[test]
    fn test_submit_incomplete_is_rejected() {
        let mut g = game("CRANE");
        g.set_letter(0, 'C');
        let before = g.clone();
        assert_eq!(g.submit(), SubmitOutcome::Rejected);
        assert_eq!(g, before);
    }

    #[test]
    fn test_submit_updates_hints_and_advances() {
        let mut g = game("CRANE");
        let outcome = type_word(&mut g, "CRATE");
        assert_eq!(
            outcome,
            KeyOutcome::Submitted(SubmitOutcome::Committed {
                attempt: 0,
                classifications: [Correct, Correct, Correct, Absent, Correct],
                status: GameStatus::InProgress,
            })
        );
        assert_eq!(g.attempt(), 1);
        assert_eq!(g.focus(), 0);
        assert_eq!(g.current_guess(), &[None; WORD_LENGTH]);
        assert_eq!(g.guesses()[0].as_deref(), Some("CRATE"));
        for letter in ['C', 'R', 'A', 'E'] {
            assert!(g.hints().correct().contains(&letter));
        }
        assert!(g.hints().absent().contains(&'T'));
    }

    #[test]
    fn test_win_stops_the_game() {
        let mut g = game("CRANE");
        type_word(&mut g, "SLATE");
        type_word(&mut g, "CRANE");
        assert_eq!(g.status(), GameStatus::Won);
        assert_eq!(g.attempt(), 1);
        assert_eq!(g.revealed_target(), None);

        assert!(!g.set_letter(0, 'A'));
        assert_eq!(g.type_key(Key::Letter('A')), KeyOutcome::Ignored);
        assert_eq!(g.submit(), SubmitOutcome::Rejected);
    }

    #[test]
    fn test_six_misses_lose() {
        let mut g = game("CRANE");
        for _ in 0..MAX_ATTEMPTS - 1 {
            type_word(&mut g, "BUMPY");
            assert_eq!(g.status(), GameStatus::InProgress);
        }
        type_word(&mut g, "BUMPY");
        assert_eq!(g.status(), GameStatus::Lost);
        assert_eq!(g.attempt(), MAX_ATTEMPTS - 1);
        assert_eq!(g.revealed_target().map(TargetWord::as_str), Some("CRANE"));
        assert!(g.guesses().iter().all(Option::is_some));
    }

    #[test]
    fn test_win_on_last_attempt_beats_loss() {
        let mut g = game("CRANE");
        for _ in 0..MAX_ATTEMPTS - 1 {
            type_word(&mut g, "BUMPY");
        }
        type_word(&mut g, "CRANE");
        assert_eq!(g.status(), GameStatus::Won);
    }

    #[test]
    fn test_committed_rows_are_not_rewritten() {
        let mut g = game("CRANE");
        type_word(&mut g, "SLATE");
        type_word(&mut g, "BUMPY");
        assert_eq!(g.guesses()[0].as_deref(), Some("SLATE"));
        assert_eq!(g.guesses()[1].as_deref(), Some("BUMPY"));
        assert_eq!(g.guesses()[2], None);
    }

    #[test]
    fn test_classifications_and_share_grid() {
        let mut g = game("CRANE");
        type_word(&mut g, "CRATE");
        type_word(&mut g, "CRANE");
        assert_eq!(
            g.classifications(0),
            Some([Correct, Correct, Correct, Absent, Correct])
        );
        assert_eq!(g.classifications(2), None);
        assert_eq!(g.share_grid(), vec!["🟩🟩🟩⬛🟩", "🟩🟩🟩🟩🟩"]);
    }

    #[test]
    fn test_key_parse() {
        assert_eq!(Key::parse("Enter"), Some(Key::Enter));
        assert_eq!(Key::parse("Backspace"), Some(Key::Backspace));
        assert_eq!(Key::parse("Q"), Some(Key::Letter('Q')));
        assert_eq!(Key::parse("enter"), Some(Key::Enter));
        assert_eq!(Key::parse("BACKSPACE"), Some(Key::Backspace));
        assert_eq!(Key::parse("QQ"), None);
        assert_eq!(Key::parse("1"), None);
        assert_eq!(Key::parse(""), None);
    }

    #[test]
    fn test_session_starts_loading() {
        let session = Session::new(Box::new(FixedWordSupply::new(
            TargetWord::new("CRANE").unwrap(),
        )));
        assert!(matches!(session.phase(), Phase::Loading));
        assert!(session.game().is_none());
    }

    #[test]
    fn test_session_restart_resets_everything() {
        let words = vec!["CRANE".to_string(), "SLATE".to_string()];
        let mut session = Session::new(Box::new(RandomWordSupply::seeded(words, 3)));
        session.start();

        let g = session.game_mut().unwrap();
        type_word(g, "BUMPY");
        type_word(g, "TRACE");
        assert_eq!(g.attempt(), 2);

        session.restart();
        let g = session.game().unwrap();
        assert_eq!(g.attempt(), 0);
        assert!(g.guesses().iter().all(Option::is_none));
        assert!(g.hints().is_empty());
        assert_eq!(g.status(), GameStatus::InProgress);
        assert!(["CRANE", "SLATE"].contains(&g.target().as_str()));
    }

    #[test]
    fn test_session_debug_shows_phase() {
        let mut session = Session::new(Box::new(FixedWordSupply::new(
            TargetWord::new("CRANE").unwrap(),
        )));
        assert!(format!("{session:?}").contains("Loading"));
        session.start();
        let text = format!("{session:?}");
        assert!(text.starts_with("Session"));
        assert!(text.contains("Ready"));
    }

    #[test]
    fn test_empty_corpus_makes_session_unavailable() {
        let mut session = Session::new(Box::new(RandomWordSupply::seeded(Vec::new(), 0)));
        session.start();
        assert!(matches!(
            session.phase(),
            Phase::Unavailable(SupplyError::EmptyCorpus)
        ));
        assert!(session.game_mut().is_none());
    }

    #[test]
    fn test_provide_word_only_while_loading() {
        let mut session = Session::new(Box::new(FixedWordSupply::new(
            TargetWord::new("CRANE").unwrap(),
        )));
        session.provide_word(Ok(TargetWord::new("SLATE").unwrap()));
        assert_eq!(session.game().unwrap().target().as_str(), "SLATE");

        // A late delivery does not replace the running game
        session.provide_word(Ok(TargetWord::new("TRACE").unwrap()));
        assert_eq!(session.game().unwrap().target().as_str(), "SLATE");
    }

    #[derive(Default)]
    struct ScriptedInterface {
        actions: Vec<UserAction>,
        boards: usize,
        game_overs: Vec<GameStatus>,
        incomplete: usize,
        unavailable: usize,
        new_games: usize,
        themes: Vec<ThemePreference>,
        exited: bool,
    }

    impl GameInterface for ScriptedInterface {
        fn display_board(&mut self, _game: &Game, _theme: ThemePreference) {
            self.boards += 1;
        }

        fn display_incomplete_guess(&mut self) {
            self.incomplete += 1;
        }

        fn display_game_over(&mut self, game: &Game) {
            self.game_overs.push(game.status());
        }

        fn display_unavailable(&mut self, _error: &SupplyError) {
            self.unavailable += 1;
        }

        fn display_new_game_message(&mut self) {
            self.new_games += 1;
        }

        fn display_theme_changed(&mut self, theme: ThemePreference) {
            self.themes.push(theme);
        }

        fn display_exit_message(&mut self) {
            self.exited = true;
        }

        fn read_action(&mut self) -> Option<UserAction> {
            if self.actions.is_empty() {
                Some(UserAction::Exit)
            } else {
                Some(self.actions.remove(0))
            }
        }
    }

    fn keys(word: &str) -> Vec<UserAction> {
        word.chars()
            .map(|c| UserAction::Key(Key::Letter(c)))
            .chain(std::iter::once(UserAction::Key(Key::Enter)))
            .collect()
    }

    #[test]
    fn test_game_loop_win_then_restart() {
        let mut session = Session::new(Box::new(FixedWordSupply::new(
            TargetWord::new("CRANE").unwrap(),
        )));
        let mut settings = ThemeSettings::load(Box::new(MemoryPreferenceStore::new()));
        let mut actions = vec![UserAction::Key(Key::Enter)];
        actions.extend(keys("CRANE"));
        actions.push(UserAction::Key(Key::Enter));
        actions.push(UserAction::Restart);
        actions.push(UserAction::ToggleTheme);
        let mut interface = ScriptedInterface {
            actions,
            ..Default::default()
        };

        game_loop(&mut session, &mut settings, &mut interface);

        assert_eq!(interface.incomplete, 1);
        assert_eq!(interface.game_overs, vec![GameStatus::Won]);
        assert_eq!(interface.new_games, 1);
        assert_eq!(interface.themes, vec![ThemePreference::Dark]);
        assert!(interface.exited);
        assert_eq!(session.game().unwrap().attempt(), 0);
    }

    #[test]
    fn test_game_loop_direct_addressing() {
        let mut session = Session::new(Box::new(FixedWordSupply::new(
            TargetWord::new("CRANE").unwrap(),
        )));
        let mut settings = ThemeSettings::load(Box::new(MemoryPreferenceStore::new()));
        let mut actions: Vec<UserAction> = "CRATE"
            .chars()
            .enumerate()
            .map(|(i, c)| UserAction::SetLetter(i, c))
            .collect();
        actions.push(UserAction::ClearLetter(3));
        actions.push(UserAction::SetLetter(3, 'N'));
        actions.push(UserAction::Key(Key::Enter));
        let mut interface = ScriptedInterface {
            actions,
            ..Default::default()
        };

        game_loop(&mut session, &mut settings, &mut interface);

        assert_eq!(interface.game_overs, vec![GameStatus::Won]);
    }

    #[test]
    fn test_game_loop_ignores_input_when_unavailable() {
        let mut session = Session::new(Box::new(RandomWordSupply::seeded(Vec::new(), 0)));
        let mut settings = ThemeSettings::load(Box::new(MemoryPreferenceStore::new()));
        let mut interface = ScriptedInterface {
            actions: keys("CRANE"),
            ..Default::default()
        };

        game_loop(&mut session, &mut settings, &mut interface);

        assert_eq!(interface.boards, 0);
        assert_eq!(interface.unavailable, 7);
        assert!(interface.game_overs.is_empty());
        assert!(interface.exited);
    }
}
