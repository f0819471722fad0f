//! Options tab: add, remove and bulk-select wheel options.

use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use sw_core::WheelSession;

use super::{Guarded, InputMode, Tab, TabAction};
use crate::shared::option_color;

/// Whether the tab is navigating the list or typing new options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OptionsInput {
    /// Normal vim-like navigation.
    Normal,
    /// Typing into the add field.
    Adding,
}

/// Options tab state.
#[derive(Debug)]
pub struct OptionsTab {
    input: OptionsInput,
    /// Text typed into the add field. Commas separate several options.
    buffer: String,
    /// Cursor position in the option list.
    cursor: usize,
    /// Number of options at the last refresh, for clamping the cursor.
    len: usize,
}

impl OptionsTab {
    /// Create the options tab.
    pub fn new() -> Self {
        Self {
            input: OptionsInput::Normal,
            buffer: String::new(),
            cursor: 0,
            len: 0,
        }
    }

    fn move_down(&mut self) {
        if self.cursor + 1 < self.len {
            self.cursor += 1;
        }
    }

    fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn handle_adding(&mut self, key: KeyEvent, session: &mut WheelSession) {
        match key.code {
            KeyCode::Esc => {
                self.input = OptionsInput::Normal;
                self.buffer.clear();
            }
            KeyCode::Enter => {
                // Rejections are queued as notices; keep the text so it can
                // be fixed.
                let input = self.buffer.replace(',', "\n");
                if session.add_options(&input).is_ok() {
                    self.buffer.clear();
                    self.input = OptionsInput::Normal;
                }
            }
            KeyCode::Backspace => {
                self.buffer.pop();
            }
            KeyCode::Char(c) => self.buffer.push(c),
            _ => {}
        }
    }
}

impl Default for OptionsTab {
    fn default() -> Self {
        Self::new()
    }
}

impl Tab for OptionsTab {
    fn input_mode(&self) -> InputMode {
        match self.input {
            OptionsInput::Normal => InputMode::VimNav,
            OptionsInput::Adding => InputMode::TextInput,
        }
    }

    fn handle_key(&mut self, key: KeyEvent, session: &mut WheelSession, _now_ms: u64) -> TabAction {
        if self.input == OptionsInput::Adding {
            self.handle_adding(key, session);
            return TabAction::None;
        }

        // Rejected operations report through the session's notices.
        match key.code {
            KeyCode::Char('a') | KeyCode::Char('i') => self.input = OptionsInput::Adding,
            KeyCode::Char('j') | KeyCode::Down => self.move_down(),
            KeyCode::Char('k') | KeyCode::Up => self.move_up(),
            KeyCode::Char('g') => self.cursor = 0,
            KeyCode::Char('G') => self.cursor = self.len.saturating_sub(1),
            KeyCode::Char('d') | KeyCode::Delete => {
                if self.cursor < self.len {
                    let _ = session.remove_option(self.cursor);
                }
            }
            KeyCode::Char('v') => {
                let _ = session.toggle_selection_mode();
            }
            KeyCode::Char(' ') => {
                let _ = session.toggle_selected(self.cursor);
                self.move_down();
            }
            KeyCode::Char('A') => {
                let _ = session.select_all();
            }
            KeyCode::Char('N') => {
                let _ = session.deselect_all();
            }
            KeyCode::Char('x') => return TabAction::Attempt(Guarded::RemoveSelected),
            KeyCode::Char('C') => return TabAction::Attempt(Guarded::ClearAll),
            _ => {}
        }
        TabAction::None
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, _session: &mut WheelSession, _now_ms: u64) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.move_up(),
            MouseEventKind::ScrollDown => self.move_down(),
            _ => {}
        }
    }

    fn refresh(&mut self, session: &WheelSession) {
        self.len = session.wheel().len();
        if self.cursor >= self.len {
            self.cursor = self.len.saturating_sub(1);
        }
    }

    fn draw(&self, frame: &mut Frame, area: Rect, session: &WheelSession, _now_ms: u64) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        draw_input(frame, self, chunks[0]);
        draw_list(frame, self, session, chunks[1]);
    }

    fn status_hint(&self) -> &str {
        match self.input {
            OptionsInput::Adding => "Enter:add  Esc:cancel  (comma-separated)",
            OptionsInput::Normal => {
                "a:add  j/k:move  d:remove  v:select mode  x:remove selected  C:clear  ?:help"
            }
        }
    }
}

fn draw_input(frame: &mut Frame, tab: &OptionsTab, area: Rect) {
    let (text, style) = match tab.input {
        OptionsInput::Adding => (
            format!("{}\u{2588}", tab.buffer),
            Style::default().fg(Color::White),
        ),
        OptionsInput::Normal => (
            "press a to add options".to_string(),
            Style::default().fg(Color::DarkGray),
        ),
    };
    let border = if tab.input == OptionsInput::Adding {
        Color::Yellow
    } else {
        Color::DarkGray
    };
    let input = Paragraph::new(text).style(style).block(
        Block::default()
            .title(" Add ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    frame.render_widget(input, area);
}

fn draw_list(frame: &mut Frame, tab: &OptionsTab, session: &WheelSession, area: Rect) {
    let selection_mode = session.selection_mode();
    let items: Vec<ListItem> = session
        .options()
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let mut spans = Vec::with_capacity(4);
            if selection_mode {
                let mark = if session.selection().contains(i) {
                    "[x] "
                } else {
                    "[ ] "
                };
                spans.push(Span::styled(mark, Style::default().fg(Color::Yellow)));
            }
            spans.push(Span::styled(
                "\u{2588}\u{2588} ",
                Style::default().fg(option_color(&option.color)),
            ));
            spans.push(Span::styled(
                option.text.clone(),
                Style::default().fg(Color::White),
            ));
            ListItem::new(Line::from(spans))
        })
        .collect();

    let mut title = format!(
        " Options ({}/{}) ",
        session.wheel().len(),
        session.wheel().max_options()
    );
    if selection_mode {
        title = format!("{title}- {} selected ", session.selection().len());
    }

    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).bold())
        .highlight_symbol("\u{25b6} ");

    let mut state = ListState::default();
    if tab.len > 0 {
        state.select(Some(tab.cursor));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use sw_core::WheelConfig;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn setup() -> (OptionsTab, WheelSession) {
        let session = WheelSession::new(WheelConfig::default().with_seed(3));
        let mut tab = OptionsTab::new();
        tab.refresh(&session);
        (tab, session)
    }

    #[test]
    fn typing_adds_options() {
        let (mut tab, mut session) = setup();
        tab.handle_key(key(KeyCode::Char('a')), &mut session, 0);
        assert_eq!(tab.input_mode(), InputMode::TextInput);
        for c in "Tacos, Sushi".chars() {
            tab.handle_key(key(KeyCode::Char(c)), &mut session, 0);
        }
        tab.handle_key(key(KeyCode::Enter), &mut session, 0);
        assert_eq!(tab.input_mode(), InputMode::VimNav);
        assert_eq!(session.wheel().len(), 6);
        assert!(session.wheel().contains("Sushi"));
    }

    #[test]
    fn blank_input_stays_open() {
        let (mut tab, mut session) = setup();
        tab.handle_key(key(KeyCode::Char('a')), &mut session, 0);
        tab.handle_key(key(KeyCode::Char(' ')), &mut session, 0);
        tab.handle_key(key(KeyCode::Enter), &mut session, 0);
        assert_eq!(tab.input_mode(), InputMode::TextInput);
        tab.handle_key(key(KeyCode::Esc), &mut session, 0);
        assert_eq!(tab.input_mode(), InputMode::VimNav);
        assert_eq!(session.wheel().len(), 4);
    }

    #[test]
    fn remove_under_cursor() {
        let (mut tab, mut session) = setup();
        let second = session.options()[1].text.clone();
        tab.handle_key(key(KeyCode::Char('j')), &mut session, 0);
        tab.handle_key(key(KeyCode::Char('d')), &mut session, 0);
        tab.refresh(&session);
        assert_eq!(session.wheel().len(), 3);
        assert!(!session.wheel().contains(&second));
    }

    #[test]
    fn space_selects_and_x_asks() {
        let (mut tab, mut session) = setup();
        tab.handle_key(key(KeyCode::Char('v')), &mut session, 0);
        assert!(session.selection_mode());
        tab.handle_key(key(KeyCode::Char(' ')), &mut session, 0);
        tab.handle_key(key(KeyCode::Char(' ')), &mut session, 0);
        assert_eq!(session.selection().len(), 2);
        assert_eq!(
            tab.handle_key(key(KeyCode::Char('x')), &mut session, 0),
            TabAction::Attempt(Guarded::RemoveSelected)
        );
    }

    #[test]
    fn cursor_clamps_after_refresh() {
        let (mut tab, mut session) = setup();
        tab.handle_key(key(KeyCode::Char('G')), &mut session, 0);
        tab.handle_key(key(KeyCode::Char('d')), &mut session, 0);
        tab.refresh(&session);
        assert_eq!(tab.cursor, 2);
    }
}
