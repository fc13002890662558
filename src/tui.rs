//! TUI (Terminal User Interface) module for the word game
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # Input
//! - Letters go straight into the focused cell of the current row, the way
//!   typing into a grid of text boxes does; Left/Right move the focus.
//! - Mouse clicks on the on-screen keyboard press that key, which fills the
//!   first empty cell instead.
//!
//! # States
//! `Playing` → `GameOver` on a win or loss, `Unavailable` when no word could
//! be drawn. Restart leads back to `Playing` from either.

use crate::evaluator::Classification;
use crate::game_state::{Game, GameInterface, GameStatus, Key, UserAction};
use crate::theme::ThemePreference;
use crate::wordbank::SupplyError;
use crate::{MAX_ATTEMPTS, WORD_LENGTH, debug_log, info_log};
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ROW_SPACING: u16 = 2;
const CELL_WIDTH: u16 = 3;
const CELL_GAP: u16 = 1;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;
const KEYBOARD_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];
const KEYBOARD_ROW_OFFSETS: [u16; 3] = [0, 2, 4];

const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Colours for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Palette {
    background: Color,
    text: Color,
    accent: Color,
    empty_cell: Color,
    absent: Color,
    key: Color,
    key_text: Color,
}

const LIGHT_PALETTE: Palette = Palette {
    background: Color::White,
    text: Color::Black,
    accent: Color::Blue,
    empty_cell: Color::Gray,
    absent: Color::DarkGray,
    key: Color::Gray,
    key_text: Color::Black,
};

const DARK_PALETTE: Palette = Palette {
    background: Color::Black,
    text: Color::White,
    accent: Color::Cyan,
    empty_cell: Color::Rgb(58, 58, 60),
    absent: Color::Rgb(86, 86, 90),
    key: Color::Rgb(129, 131, 132),
    key_text: Color::White,
};

impl Palette {
    fn for_theme(theme: ThemePreference) -> Self {
        match theme {
            ThemePreference::Light => LIGHT_PALETTE,
            ThemePreference::Dark => DARK_PALETTE,
        }
    }

    fn base(self) -> Style {
        Style::new().fg(self.text).bg(self.background)
    }

    fn title(self) -> Style {
        self.base().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    fn classification(self, class: Classification) -> Style {
        match class {
            Classification::Correct => Style::new().fg(Color::Black).bg(Color::Green),
            Classification::Present => Style::new().fg(Color::Black).bg(Color::Yellow),
            Classification::Absent => Style::new().fg(Color::White).bg(self.absent),
        }
    }

    fn empty_cell(self) -> Style {
        Style::new().fg(self.text).bg(self.empty_cell)
    }

    fn key(self, hint: Option<Classification>) -> Style {
        match hint {
            Some(class) => self.classification(class),
            None => Style::new().fg(self.key_text).bg(self.key),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiState {
    Playing,
    GameOver,
    Unavailable,
}

/// Something on screen a mouse click can hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClickTarget {
    Key(Key),
    Cell(usize),
}

/// What a key press turned into
#[derive(Debug, Clone, PartialEq, Eq)]
enum KeyResponse {
    Action(UserAction),
    Error(String),
    Nothing,
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    game: Option<&'a Game>,
    palette: Palette,
    state: TuiState,
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
}

/// Main TUI interface component.
///
/// Keeps a snapshot of the last game it was shown and renders from that.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    game: Option<Game>,
    theme: ThemePreference,
    state: TuiState,
    click_targets: Vec<(Rect, ClickTarget)>,
    message: String,
    error_message: String,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture, cursor::Hide)?;
        info_log!("Terminal setup complete: alternate screen, mouse capture, cursor hidden");
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            game: None,
            theme: ThemePreference::default(),
            state: TuiState::Playing,
            click_targets: Vec::new(),
            message: String::new(),
            error_message: String::new(),
            status: "Loading word...".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            cursor::Show
        )?;
        Ok(())
    }

    /// Draw the current UI state to the terminal.
    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            game: self.game.as_ref(),
            palette: Palette::for_theme(self.theme),
            state: self.state,
            message: &self.message,
            error_message: &self.error_message,
            status: &self.status,
        };

        let mut targets = Vec::new();
        self.terminal.draw(|f| {
            targets = Self::render_static(f, &ctx);
        })?;
        self.click_targets = targets;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    /// Render the complete UI and return the clickable areas.
    #[allow(clippy::cast_possible_truncation)]
    fn render_static(f: &mut Frame, ctx: &RenderContext) -> Vec<(Rect, ClickTarget)> {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Title
                Constraint::Length(ROW_SPACING * MAX_ATTEMPTS as u16 + 2), // Board
                Constraint::Length(10), // Keyboard
                Constraint::Min(4),     // Messages
                Constraint::Length(3),  // Status line
                Constraint::Length(3),  // Instructions
            ])
            .split(f.area());

        f.render_widget(Block::default().style(ctx.palette.base()), f.area());

        let mut targets = Vec::new();
        Self::render_title(f, chunks[0], ctx.palette);
        Self::render_board(f, chunks[1], ctx, &mut targets);
        Self::render_keyboard(f, chunks[2], ctx, &mut targets);
        Self::render_info(f, chunks[3], ctx);
        Self::render_status(f, chunks[4], ctx);
        Self::render_instructions(f, chunks[5], ctx);
        targets
    }

    fn render_title(f: &mut Frame, area: Rect, palette: Palette) {
        let title = Paragraph::new("WORDLE")
            .style(palette.title())
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn fits(area: Rect, rect: Rect) -> bool {
        rect.right() <= area.right() && rect.bottom() <= area.bottom()
    }

    fn render_box(f: &mut Frame, rect: Rect, label: &str, style: Style) {
        f.render_widget(Paragraph::new(label.to_string()).style(style), rect);
    }

    #[allow(clippy::cast_possible_truncation)]
    fn cell_rect(inner: Rect, attempt: usize, index: usize) -> Rect {
        Rect {
            x: inner.x + 2 + index as u16 * (CELL_WIDTH + CELL_GAP),
            y: inner.y + attempt as u16 * ROW_SPACING,
            width: CELL_WIDTH,
            height: 1,
        }
    }

    fn render_board(
        f: &mut Frame,
        area: Rect,
        ctx: &RenderContext,
        targets: &mut Vec<(Rect, ClickTarget)>,
    ) {
        let block = Block::default()
            .title("Guesses")
            .borders(Borders::ALL)
            .style(ctx.palette.base());
        let inner = block.inner(area);
        f.render_widget(block, area);

        let Some(game) = ctx.game else {
            return;
        };

        for attempt in 0..MAX_ATTEMPTS {
            let committed = game.guesses()[attempt].as_deref();
            let is_active = attempt == game.attempt() && game.status() == GameStatus::InProgress;
            let marks = game.classifications(attempt);

            for index in 0..WORD_LENGTH {
                let rect = Self::cell_rect(inner, attempt, index);
                if !Self::fits(inner, rect) {
                    continue;
                }
                let (letter, style) = match (committed, marks) {
                    (Some(guess), Some(marks)) => (
                        guess.chars().nth(index),
                        ctx.palette.classification(marks[index]),
                    ),
                    _ if is_active => {
                        let mut style = ctx.palette.empty_cell();
                        if index == game.focus() {
                            style = style.add_modifier(Modifier::REVERSED);
                        }
                        (game.current_guess()[index], style)
                    }
                    _ => (None, ctx.palette.empty_cell()),
                };
                let label = format!(" {} ", letter.unwrap_or(' '));
                Self::render_box(f, rect, &label, style);
                if is_active {
                    targets.push((rect, ClickTarget::Cell(index)));
                }
            }
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_keyboard(
        f: &mut Frame,
        area: Rect,
        ctx: &RenderContext,
        targets: &mut Vec<(Rect, ClickTarget)>,
    ) {
        let block = Block::default()
            .title("Keyboard")
            .borders(Borders::ALL)
            .style(ctx.palette.base());
        let inner = block.inner(area);
        f.render_widget(block, area);

        let Some(game) = ctx.game else {
            return;
        };
        if game.status().is_over() {
            return;
        }

        for (row, (keys, offset)) in KEYBOARD_ROWS.iter().zip(KEYBOARD_ROW_OFFSETS).enumerate() {
            let y = inner.y + row as u16 * ROW_SPACING;
            for (i, letter) in keys.chars().enumerate() {
                let rect = Rect {
                    x: inner.x + 2 + offset + i as u16 * (CELL_WIDTH + CELL_GAP),
                    y,
                    width: CELL_WIDTH,
                    height: 1,
                };
                if !Self::fits(inner, rect) {
                    continue;
                }
                let style = ctx.palette.key(game.hints().hint_for(letter));
                Self::render_box(f, rect, &format!(" {letter} "), style);
                targets.push((rect, ClickTarget::Key(Key::Letter(letter))));
            }
        }

        let y = inner.y + KEYBOARD_ROWS.len() as u16 * ROW_SPACING;
        let mut x = inner.x + 2;
        for (label, key) in [(" ENTER ", Key::Enter), (" BACKSPACE ", Key::Backspace)] {
            let rect = Rect {
                x,
                y,
                width: label.len() as u16,
                height: 1,
            };
            if Self::fits(inner, rect) {
                Self::render_box(f, rect, label, ctx.palette.key(None));
                targets.push((rect, ClickTarget::Key(key)));
            }
            x += label.len() as u16 + CELL_GAP;
        }
    }

    fn render_info(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = Vec::new();

        if !ctx.message.is_empty() {
            let style = if ctx.state == TuiState::GameOver {
                SUCCESS_STYLE
            } else {
                ctx.palette.title()
            };
            lines.push(Line::styled(ctx.message.to_string(), style));
        }

        if ctx.state == TuiState::GameOver
            && let Some(game) = ctx.game
        {
            for row in game.share_grid() {
                lines.push(Line::from(row));
            }
        }

        if !ctx.error_message.is_empty() {
            lines.push(Line::styled(ctx.error_message.to_string(), ERROR_STYLE));
        }

        let paragraph = Paragraph::new(lines)
            .style(ctx.palette.base())
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let text = match ctx.state {
            TuiState::Playing => {
                "Type letters | ←/→: Move | BACKSPACE: Erase | ENTER: Submit | TAB: Theme | F5: Restart | ESC: Quit"
            }
            TuiState::GameOver => "N: New Game | TAB: Theme | ESC: Quit",
            TuiState::Unavailable => "F5: Retry | ESC: Quit",
        };

        let paragraph = Paragraph::new(text)
            .style(ctx.palette.base())
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let status_text = if ctx.status.is_empty() {
            "Ready"
        } else {
            ctx.status
        };
        let paragraph = Paragraph::new(status_text.to_string())
            .style(ctx.palette.title())
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(event::KeyModifiers::ALT)
            || key.modifiers.contains(event::KeyModifiers::CONTROL)
    }

    /// Map a key press to a game action for the given screen state.
    fn action_for_key(state: TuiState, focus: usize, key: KeyEvent) -> KeyResponse {
        match (state, key.code) {
            (_, KeyCode::Esc) => KeyResponse::Action(UserAction::Exit),
            (TuiState::Playing | TuiState::GameOver, KeyCode::Tab) => {
                KeyResponse::Action(UserAction::ToggleTheme)
            }
            (_, KeyCode::F(5)) => KeyResponse::Action(UserAction::Restart),
            (TuiState::GameOver | TuiState::Unavailable, KeyCode::Char('n' | 'N')) => {
                KeyResponse::Action(UserAction::Restart)
            }
            (TuiState::Playing, _) if Self::has_modifier_keys(&key) => KeyResponse::Nothing,
            (TuiState::Playing, KeyCode::Enter) => KeyResponse::Action(UserAction::Key(Key::Enter)),
            (TuiState::Playing, KeyCode::Backspace) => {
                KeyResponse::Action(UserAction::ClearLetter(focus))
            }
            (TuiState::Playing, KeyCode::Left) if focus > 0 => {
                KeyResponse::Action(UserAction::FocusCell(focus - 1))
            }
            (TuiState::Playing, KeyCode::Right) if focus < WORD_LENGTH - 1 => {
                KeyResponse::Action(UserAction::FocusCell(focus + 1))
            }
            (TuiState::Playing, KeyCode::Char(c)) if c.is_ascii_alphabetic() => {
                KeyResponse::Action(UserAction::SetLetter(focus, c))
            }
            (TuiState::Playing, KeyCode::Char(c)) => {
                KeyResponse::Error(format!("Only letters are allowed! ('{c}' is not a letter)"))
            }
            _ => KeyResponse::Nothing,
        }
    }

    fn action_for_click(
        targets: &[(Rect, ClickTarget)],
        column: u16,
        row: u16,
    ) -> Option<UserAction> {
        let position = Position::new(column, row);
        targets
            .iter()
            .find(|(rect, _)| rect.contains(position))
            .map(|(_, target)| match *target {
                ClickTarget::Key(key) => UserAction::Key(key),
                ClickTarget::Cell(index) => UserAction::FocusCell(index),
            })
    }

    fn handle_input(&mut self) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        match event::read()? {
            Event::Mouse(mouse) => {
                if mouse.kind != MouseEventKind::Down(MouseButton::Left)
                    || self.state != TuiState::Playing
                {
                    return Ok(None);
                }
                let action = Self::action_for_click(&self.click_targets, mouse.column, mouse.row);
                debug_log!("handle_input() - click at {},{}: {:?}", mouse.column, mouse.row, action);
                Ok(action)
            }
            Event::Key(key) => {
                // Only process Press events, ignore Release and Repeat to avoid double input
                if key.kind != event::KeyEventKind::Press {
                    return Ok(None);
                }

                // Garbage from escape sequences when alt-tabbing
                if let KeyCode::Char(c) = key.code
                    && (c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD)
                {
                    debug_log!("handle_input() - Ignoring invalid character {:?}", c);
                    return Ok(None);
                }

                self.error_message.clear();
                let focus = self.game.as_ref().map_or(0, Game::focus);
                match Self::action_for_key(self.state, focus, key) {
                    KeyResponse::Action(action) => Ok(Some(action)),
                    KeyResponse::Error(message) => {
                        debug_log!("handle_input() - {}", message);
                        self.error_message = message;
                        Ok(None)
                    }
                    KeyResponse::Nothing => Ok(None),
                }
            }
            Event::FocusGained | Event::FocusLost | Event::Paste(_) | Event::Resize(_, _) => {
                Ok(None)
            }
        }
    }
}

impl GameInterface for TuiInterface {
    fn display_board(&mut self, game: &Game, theme: ThemePreference) {
        self.game = Some(game.clone());
        self.theme = theme;
        if game.status().is_over() {
            self.state = TuiState::GameOver;
        } else {
            self.state = TuiState::Playing;
            self.status = format!("Attempt {} of {MAX_ATTEMPTS}", game.attempt() + 1);
        }
    }

    fn display_incomplete_guess(&mut self) {
        self.error_message = format!("Guess must be exactly {WORD_LENGTH} letters!");
    }

    fn display_game_over(&mut self, game: &Game) {
        self.game = Some(game.clone());
        self.state = TuiState::GameOver;
        match (game.status(), game.revealed_target()) {
            (GameStatus::Won, _) => {
                self.message = "Congratulations!".to_string();
                self.status = format!("Solved in {} of {MAX_ATTEMPTS}", game.attempt() + 1);
            }
            (_, Some(target)) => {
                self.message = format!("Game Over! The word was {target}");
                self.status = "Out of attempts".to_string();
            }
            _ => {}
        }
        self.draw_or_log();
    }

    fn display_unavailable(&mut self, error: &SupplyError) {
        self.game = None;
        self.state = TuiState::Unavailable;
        self.error_message = error.to_string();
        self.status = "No word available".to_string();
    }

    fn display_new_game_message(&mut self) {
        self.message = "New game started.".to_string();
        self.error_message.clear();
    }

    fn display_theme_changed(&mut self, theme: ThemePreference) {
        self.theme = theme;
        self.message = format!("Theme: {}", theme.as_str());
    }

    fn display_exit_message(&mut self) {
        self.message = "Exiting...".to_string();
        self.status = "Exiting application...".to_string();
        self.draw_or_log();
    }

    fn read_action(&mut self) -> Option<UserAction> {
        loop {
            if self.draw().is_err() {
                info_log!("read_action() - Draw failed, returning Exit");
                return Some(UserAction::Exit);
            }

            match self.handle_input() {
                Ok(Some(action)) => {
                    info_log!("read_action() - Action received: {:?}", action);
                    return Some(action);
                }
                Ok(None) => {}
                Err(e) => {
                    info_log!("read_action() - Error handling input: {}", e);
                    return Some(UserAction::Exit);
                }
            }
        }
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
