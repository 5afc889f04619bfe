//! TUI (Terminal User Interface) for the solver
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # State Machine
//! - `EnteringGuess` → `MarkingFeedback` → `ConfirmingFeedback` → `FeedbackDone`
//! - `Esc` while marking or confirming moves to `FeedbackCancelled`
//! - `FeedbackDone` / `FeedbackCancelled` hand control back to the solver loop,
//!   which returns to `EnteringGuess`

use crate::feedback::{LetterStatus, WORD_LENGTH};
use crate::game_state::{SessionView, SolverInterface, UserAction};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;

const MAX_CANDIDATES_DISPLAY: usize = 30;
const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ROW_SPACING: u16 = 2;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);
const SELECTED_STYLE: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::Cyan)
    .add_modifier(Modifier::BOLD);

#[derive(Clone, Copy, PartialEq, Debug)]
enum LetterState {
    Empty,
    Marked(LetterStatus),
}

impl LetterState {
    fn colors(self) -> (Color, Color) {
        match self {
            Self::Empty => (Color::DarkGray, Color::White),
            Self::Marked(LetterStatus::Correct) => (Color::Green, Color::Black),
            Self::Marked(LetterStatus::PresentElsewhere) => (Color::Yellow, Color::Black),
            Self::Marked(LetterStatus::Absent | LetterStatus::ConfirmedAbsent) => {
                (Color::Gray, Color::White)
            }
        }
    }

    fn status(self) -> LetterStatus {
        match self {
            Self::Marked(status) => status,
            Self::Empty => LetterStatus::Absent,
        }
    }
}

#[derive(Debug, Clone)]
struct GuessRow {
    letters: [char; WORD_LENGTH],
    states: [LetterState; WORD_LENGTH],
}

impl GuessRow {
    fn new() -> Self {
        Self {
            letters: [' '; WORD_LENGTH],
            states: [LetterState::Empty; WORD_LENGTH],
        }
    }

    fn from_word(word: &str, statuses: &[LetterStatus; WORD_LENGTH]) -> Self {
        let mut row = Self::new();
        for (i, ch) in word.chars().enumerate().take(WORD_LENGTH) {
            row.letters[i] = ch.to_uppercase().next().unwrap_or(ch);
            row.states[i] = LetterState::Marked(statuses[i]);
        }
        row
    }

    fn statuses(&self) -> [LetterStatus; WORD_LENGTH] {
        self.states.map(LetterState::status)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TuiState {
    EnteringGuess,
    MarkingFeedback { marking_index: usize },
    ConfirmingFeedback,
    FeedbackDone,
    FeedbackCancelled,
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    guesses: &'a [GuessRow],
    pending: Option<&'a GuessRow>,
    current_input: &'a str,
    state: TuiState,
    view: Option<&'a SessionView>,
    selected: Option<usize>,
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
}

/// Full-screen solver interface.
///
/// Manages terminal rendering, input handling, and session display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    guesses: Vec<GuessRow>,
    pending: Option<GuessRow>,
    current_input: String,
    state: TuiState,
    view: Option<SessionView>,
    /// Highlighted candidate, moved with Up/Down while no guess is typed.
    selected: Option<usize>,
    message: String,
    error_message: String,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete");

        Ok(Self {
            terminal,
            guesses: Vec::new(),
            pending: None,
            current_input: String::new(),
            state: TuiState::EnteringGuess,
            view: None,
            selected: None,
            message: String::new(),
            error_message: String::new(),
            status: "Ready to start".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            guesses: &self.guesses,
            pending: self.pending.as_ref(),
            current_input: &self.current_input,
            state: self.state,
            view: self.view.as_ref(),
            selected: self.selected,
            message: &self.message,
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Title
                Constraint::Length(14), // Guess board
                Constraint::Min(8),     // Candidates
                Constraint::Length(3),  // Status line
                Constraint::Length(3),  // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        Self::render_board(f, chunks[1], ctx);
        Self::render_info(f, chunks[2], ctx);
        Self::render_status(f, chunks[3], ctx.status);
        Self::render_instructions(f, chunks[4], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("TERMO SOLVER")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_board(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let block = Block::default()
            .title("Guesses")
            .borders(Borders::ALL)
            .style(Style::default());

        let inner = block.inner(area);
        f.render_widget(block, area);

        let available_rows = (inner.height / ROW_SPACING) as usize;
        if available_rows == 0 {
            return;
        }

        let showing_input = matches!(ctx.state, TuiState::EnteringGuess);
        let extra_row = usize::from(ctx.pending.is_some() || showing_input);
        let rows_needed = ctx.guesses.len() + extra_row;

        // Keep the most recent guesses visible
        let skip_count = rows_needed.saturating_sub(available_rows);

        let mut display_index = 0;
        for (i, guess) in ctx.guesses.iter().enumerate().skip(skip_count) {
            Self::render_guess_row(f, guess, Some(i + 1), display_index, inner, None);
            display_index += 1;
        }

        if let Some(pending) = ctx.pending {
            let marking = match ctx.state {
                TuiState::MarkingFeedback { marking_index } => Some(marking_index),
                _ => None,
            };
            Self::render_guess_row(f, pending, None, display_index, inner, marking);
        } else if showing_input {
            Self::render_current_input(f, display_index, inner, ctx.current_input);
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_guess_row(
        f: &mut Frame,
        guess: &GuessRow,
        number: Option<usize>,
        row_index: usize,
        area: Rect,
        marking_index: Option<usize>,
    ) {
        let y = area.y + (row_index as u16 * ROW_SPACING);
        if y >= area.y + area.height {
            return;
        }

        let label = number.map_or_else(|| "   ".to_string(), |n| format!("{n:>2} "));
        let mut spans = vec![Span::raw(label)];
        for i in 0..WORD_LENGTH {
            let (bg_color, fg_color) = guess.states[i].colors();
            let letter = guess.letters[i];
            let mut style = Style::default().fg(fg_color).bg(bg_color);
            if marking_index == Some(i) {
                style = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
            }
            spans.push(Span::styled(format!(" {letter} "), style));
            spans.push(Span::raw(" "));
        }

        if let Some(index) = marking_index {
            spans.push(Span::raw(format!(" <- Marking letter {} (G/Y/X)", index + 1)));
        }

        Self::render_line(f, area, y, spans);
    }

    fn render_line(f: &mut Frame, area: Rect, y: u16, spans: Vec<Span>) {
        let paragraph = Paragraph::new(Line::from(spans));
        f.render_widget(
            paragraph,
            Rect {
                x: area.x,
                y,
                width: area.width,
                height: 1,
            },
        );
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_current_input(f: &mut Frame, row_index: usize, area: Rect, current_input: &str) {
        let y = area.y + (row_index as u16 * ROW_SPACING);
        if y >= area.y + area.height {
            return;
        }

        let mut letters = current_input.chars().flat_map(char::to_uppercase);
        let mut spans = vec![Span::raw("   ")];
        for _ in 0..WORD_LENGTH {
            let letter = letters.next().unwrap_or(' ');
            spans.push(Span::styled(
                format!(" {letter} "),
                Style::default().fg(Color::White).bg(Color::DarkGray),
            ));
            spans.push(Span::raw(" "));
        }

        Self::render_line(f, area, y, spans);
    }

    fn render_info(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = Vec::new();

        if let Some(view) = ctx.view {
            if let Some(solution) = &view.solved {
                lines.push(Line::from(vec![Span::styled(
                    format!("Only one word left: {}", solution.to_uppercase()),
                    SUCCESS_STYLE,
                )]));
                lines.push(Line::from(""));
            } else if view.exhausted {
                lines.push(Line::from(vec![Span::styled(
                    "No word matches every guess. Check your marks or remove a guess.",
                    ERROR_STYLE,
                )]));
                lines.push(Line::from(""));
            }

            lines.push(Line::from(vec![Span::styled(
                format!(
                    "Possible solutions ({} of {}, {}):",
                    view.candidates.len(),
                    view.word_count,
                    view.word_list.describe()
                ),
                INFO_STYLE,
            )]));
            let mut shown = vec![Span::raw(" ")];
            for (i, word) in view.candidates.iter().take(MAX_CANDIDATES_DISPLAY).enumerate() {
                let style = if ctx.selected == Some(i) {
                    SELECTED_STYLE
                } else {
                    Style::default()
                };
                shown.push(Span::raw(" "));
                shown.push(Span::styled(word.to_uppercase(), style));
                shown.push(Span::raw(" "));
            }
            if shown.len() > 1 {
                lines.push(Line::from(shown));
            }
            if view.candidates.len() > MAX_CANDIDATES_DISPLAY {
                lines.push(Line::from(format!(
                    "  ... and {} more",
                    view.candidates.len() - MAX_CANDIDATES_DISPLAY
                )));
            }
            lines.push(Line::from(""));
        }

        if !ctx.message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.message, MESSAGE_STYLE)]));
        }
        if !ctx.error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.error_message, ERROR_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
        let text = match state {
            TuiState::EnteringGuess => {
                "Type a guess | UP/DOWN: Pick solution | ENTER: Submit | 1-9: Remove guess | TAB: Word list | DEL: Reset | ESC: Quit"
            }
            TuiState::MarkingFeedback { .. } => {
                "G: Green | Y: Yellow | X: Gray | UP: Cycle | SPACE: Keep | BACKSPACE: Back | ENTER: Done | ESC: Cancel"
            }
            TuiState::ConfirmingFeedback => "ENTER: Confirm feedback | BACKSPACE: Go back and edit | ESC: Cancel",
            TuiState::FeedbackDone | TuiState::FeedbackCancelled => "",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    /// Waits for one key press, filtering out events that are not input.
    fn next_key(&mut self) -> Result<Option<KeyEvent>, io::Error> {
        if !event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => {
                // Only process Press events, ignore Release and Repeat to avoid double input
                if key.kind != event::KeyEventKind::Press {
                    return Ok(None);
                }
                // Alt-tabbing can leak replacement and control characters
                if let KeyCode::Char(c) = key.code
                    && (c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD)
                {
                    debug_log!("next_key() - Ignoring invalid character: {:?}", c);
                    return Ok(None);
                }
                debug_log!(
                    "next_key() - code={:?}, modifiers={:?}",
                    key.code,
                    key.modifiers
                );
                Ok(Some(key))
            }
            other => {
                debug_log!("next_key() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(event::KeyModifiers::ALT)
            || key.modifiers.contains(event::KeyModifiers::CONTROL)
    }

    fn handle_guess_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        self.error_message.clear();
        if Self::has_modifier_keys(&key) {
            return None;
        }

        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let number = c.to_digit(10).unwrap_or(0) as usize;
                if number == 0 {
                    self.error_message = "Guesses are numbered from 1".to_string();
                    None
                } else {
                    Some(UserAction::Remove(number - 1))
                }
            }
            KeyCode::Char(c)
                if c.is_alphabetic() && self.current_input.chars().count() < WORD_LENGTH =>
            {
                self.current_input.extend(c.to_lowercase());
                None
            }
            KeyCode::Char(c) if !c.is_alphabetic() => {
                self.error_message = format!("Only letters are allowed! ('{c}' is not a letter)");
                None
            }
            KeyCode::Backspace => {
                self.current_input.pop();
                None
            }
            KeyCode::Up | KeyCode::Down if self.current_input.is_empty() => {
                let shown = self
                    .view
                    .as_ref()
                    .map_or(0, |v| v.candidates.len().min(MAX_CANDIDATES_DISPLAY));
                self.selected = step_selection(self.selected, shown, key.code == KeyCode::Down);
                None
            }
            KeyCode::Enter => match enter_action(&self.current_input, self.selected) {
                Ok(action) => {
                    info_log!("handle_guess_input() - {:?}", action);
                    self.current_input.clear();
                    self.selected = None;
                    Some(action)
                }
                Err(message) => {
                    self.error_message = message.to_string();
                    None
                }
            },
            KeyCode::Tab => Some(UserAction::ToggleWordList),
            KeyCode::Delete => Some(UserAction::Reset),
            KeyCode::Esc => Some(UserAction::Exit),
            _ => None,
        }
    }

    fn handle_feedback_input(&mut self, key: KeyEvent) {
        let TuiState::MarkingFeedback { marking_index } = self.state else {
            return;
        };
        if Self::has_modifier_keys(&key) {
            return;
        }
        let Some(pending) = self.pending.as_mut() else {
            return;
        };

        let mark = match key.code {
            KeyCode::Char('g' | 'G') => Some(LetterStatus::Correct),
            KeyCode::Char('y' | 'Y') => Some(LetterStatus::PresentElsewhere),
            KeyCode::Char('x' | 'X') => Some(LetterStatus::Absent),
            _ => None,
        };
        if let Some(status) = mark {
            pending.states[marking_index] = LetterState::Marked(status);
            self.advance_feedback_marking(marking_index);
            return;
        }

        match key.code {
            KeyCode::Up | KeyCode::Down => {
                let next = pending.states[marking_index].status().cycle();
                pending.states[marking_index] = LetterState::Marked(next);
            }
            KeyCode::Char(' ') | KeyCode::Right => self.advance_feedback_marking(marking_index),
            KeyCode::Backspace | KeyCode::Left if marking_index > 0 => {
                self.state = TuiState::MarkingFeedback {
                    marking_index: marking_index - 1,
                };
            }
            KeyCode::Enter => self.state = TuiState::ConfirmingFeedback,
            KeyCode::Esc => self.state = TuiState::FeedbackCancelled,
            KeyCode::Char(c) => {
                self.error_message = format!(
                    "Invalid feedback! Use G (green), Y (yellow), or X (gray). ('{c}' is not valid)"
                );
            }
            _ => {}
        }
    }

    fn handle_confirming_feedback_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.state = TuiState::FeedbackDone,
            KeyCode::Backspace => {
                self.state = TuiState::MarkingFeedback {
                    marking_index: WORD_LENGTH - 1,
                };
            }
            KeyCode::Esc => self.state = TuiState::FeedbackCancelled,
            _ => {}
        }
    }

    fn advance_feedback_marking(&mut self, current_index: usize) {
        self.error_message.clear();
        if current_index < WORD_LENGTH - 1 {
            self.state = TuiState::MarkingFeedback {
                marking_index: current_index + 1,
            };
        } else {
            self.state = TuiState::ConfirmingFeedback;
        }
    }
}

/// Moves the candidate highlight one step, wrapping at both ends.
fn step_selection(selected: Option<usize>, len: usize, down: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match (selected, down) {
        (None, true) => 0,
        (None, false) => len - 1,
        (Some(i), true) => (i + 1) % len,
        (Some(i), false) => (i + len - 1) % len,
    })
}

/// What ENTER does on the guess row: submit a full word, or use the
/// highlighted candidate when nothing is typed.
fn enter_action(current_input: &str, selected: Option<usize>) -> Result<UserAction, &'static str> {
    match (current_input.chars().count(), selected) {
        (WORD_LENGTH, _) => Ok(UserAction::Guess(current_input.to_string())),
        (0, Some(index)) => Ok(UserAction::Select(index)),
        _ => Err("Guess must be exactly 5 letters!"),
    }
}

impl SolverInterface for TuiInterface {
    fn display_session(&mut self, view: &SessionView) {
        self.guesses = view
            .guesses
            .iter()
            .map(|g| GuessRow::from_word(&g.word, &g.statuses))
            .collect();
        self.status = format!(
            "{} guesses | {} candidates remaining",
            view.guesses.len(),
            view.candidates.len()
        );
        self.view = Some(view.clone());
        self.selected = None;
        self.draw_or_log();
    }

    fn read_action(&mut self) -> Option<UserAction> {
        self.state = TuiState::EnteringGuess;
        self.pending = None;
        loop {
            if self.draw().is_err() {
                info_log!("read_action() - Draw failed, returning Exit");
                return Some(UserAction::Exit);
            }
            match self.next_key() {
                Ok(Some(key)) => {
                    if let Some(action) = self.handle_guess_input(key) {
                        self.message.clear();
                        return Some(action);
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    info_log!("read_action() - Input error {}, returning Exit", e);
                    return Some(UserAction::Exit);
                }
            }
        }
    }

    fn read_statuses(
        &mut self,
        word: &str,
        suggested: &[LetterStatus; WORD_LENGTH],
    ) -> Option<[LetterStatus; WORD_LENGTH]> {
        self.pending = Some(GuessRow::from_word(word, suggested));
        self.state = TuiState::MarkingFeedback { marking_index: 0 };
        self.error_message.clear();
        self.status = "Mark each letter: G (green), Y (yellow), or X (gray)".to_string();

        let result = loop {
            if self.draw().is_err() {
                break None;
            }
            match self.next_key() {
                Ok(Some(key)) => match self.state {
                    TuiState::MarkingFeedback { .. } => self.handle_feedback_input(key),
                    TuiState::ConfirmingFeedback => self.handle_confirming_feedback_input(key),
                    _ => {}
                },
                Ok(None) => {}
                Err(e) => {
                    debug_log!("read_statuses() - Input error: {}", e);
                    break None;
                }
            }
            match self.state {
                TuiState::FeedbackDone => break self.pending.as_ref().map(GuessRow::statuses),
                TuiState::FeedbackCancelled => break None,
                TuiState::ConfirmingFeedback => {
                    self.status = "Press ENTER to confirm feedback".to_string();
                }
                _ => {}
            }
        };

        if result.is_none() {
            self.message = "Guess discarded".to_string();
        }
        self.pending = None;
        self.state = TuiState::EnteringGuess;
        result
    }

    fn display_error(&mut self, message: &str) {
        self.error_message = message.to_string();
        self.draw_or_log();
    }

    fn display_exit_message(&mut self) {
        self.message = "Exiting...".to_string();
        self.status = "Exiting application...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
