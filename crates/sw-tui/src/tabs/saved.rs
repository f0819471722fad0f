//! Saved wheels tab: save the current options under a name, load or delete.

use chrono::{DateTime, Local, Utc};
use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use sw_core::WheelSession;

use super::{Guarded, InputMode, Tab, TabAction};

/// One saved wheel as listed in the tab.
#[derive(Debug, Clone, PartialEq)]
struct Entry {
    name: String,
    count: usize,
    saved_at: DateTime<Utc>,
}

/// Text input mode within the saved tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SavedInput {
    /// Normal vim-like navigation.
    Normal,
    /// Typing a name to save under.
    Naming,
}

/// Saved wheels tab state.
#[derive(Debug)]
pub struct SavedTab {
    input: SavedInput,
    name: String,
    entries: Vec<Entry>,
    cursor: usize,
    /// Set when the store could not be read.
    error: Option<String>,
}

impl SavedTab {
    /// Create the saved wheels tab. Entries load on the first refresh.
    pub fn new() -> Self {
        Self {
            input: SavedInput::Normal,
            name: String::new(),
            entries: Vec::new(),
            cursor: 0,
            error: None,
        }
    }

    fn selected_name(&self) -> Option<String> {
        self.entries.get(self.cursor).map(|e| e.name.clone())
    }

    fn handle_naming(&mut self, key: KeyEvent) -> TabAction {
        match key.code {
            KeyCode::Esc => {
                self.input = SavedInput::Normal;
                self.name.clear();
            }
            KeyCode::Enter => {
                self.input = SavedInput::Normal;
                let name = std::mem::take(&mut self.name);
                return TabAction::Attempt(Guarded::SaveWheel(name));
            }
            KeyCode::Backspace => {
                self.name.pop();
            }
            KeyCode::Char(c) => self.name.push(c),
            _ => {}
        }
        TabAction::None
    }
}

impl Default for SavedTab {
    fn default() -> Self {
        Self::new()
    }
}

impl Tab for SavedTab {
    fn input_mode(&self) -> InputMode {
        match self.input {
            SavedInput::Normal => InputMode::VimNav,
            SavedInput::Naming => InputMode::TextInput,
        }
    }

    fn handle_key(&mut self, key: KeyEvent, session: &mut WheelSession, _now_ms: u64) -> TabAction {
        if self.input == SavedInput::Naming {
            return self.handle_naming(key);
        }
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.cursor + 1 < self.entries.len() {
                    self.cursor += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Char('s') => self.input = SavedInput::Naming,
            KeyCode::Enter => {
                if let Some(name) = self.selected_name() {
                    // Rejections are queued as notices.
                    let _ = session.load_wheel(&name);
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(name) = self.selected_name() {
                    return TabAction::Attempt(Guarded::DeleteWheel(name));
                }
            }
            _ => {}
        }
        TabAction::None
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, _session: &mut WheelSession, _now_ms: u64) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.cursor = self.cursor.saturating_sub(1),
            MouseEventKind::ScrollDown => {
                if self.cursor + 1 < self.entries.len() {
                    self.cursor += 1;
                }
            }
            _ => {}
        }
    }

    fn refresh(&mut self, session: &WheelSession) {
        match session.saved_wheels() {
            Ok(wheels) => {
                self.error = None;
                self.entries = wheels
                    .into_iter()
                    .map(|(name, wheel)| Entry {
                        name,
                        count: wheel.options.len(),
                        saved_at: wheel.saved_at,
                    })
                    .collect();
            }
            Err(e) => {
                self.error = Some(e.to_string());
                self.entries.clear();
            }
        }
        if self.cursor >= self.entries.len() {
            self.cursor = self.entries.len().saturating_sub(1);
        }
    }

    fn draw(&self, frame: &mut Frame, area: Rect, _session: &WheelSession, _now_ms: u64) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let (text, style, border) = match self.input {
            SavedInput::Naming => (
                format!("{}\u{2588}", self.name),
                Style::default().fg(Color::White),
                Color::Yellow,
            ),
            SavedInput::Normal => (
                "press s to save the current wheel".to_string(),
                Style::default().fg(Color::DarkGray),
                Color::DarkGray,
            ),
        };
        let input = Paragraph::new(text).style(style).block(
            Block::default()
                .title(" Save as ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
        frame.render_widget(input, chunks[0]);

        let block = Block::default()
            .title(format!(" Saved Wheels ({}) ", self.entries.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        if let Some(error) = &self.error {
            let msg = Paragraph::new(error.as_str())
                .style(Style::default().fg(Color::Red))
                .block(block);
            frame.render_widget(msg, chunks[1]);
            return;
        }
        if self.entries.is_empty() {
            let msg = Paragraph::new("No saved wheels yet.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(msg, chunks[1]);
            return;
        }

        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|entry| {
                let saved_at = entry.saved_at.with_timezone(&Local);
                ListItem::new(Line::from(vec![
                    Span::styled(entry.name.clone(), Style::default().fg(Color::White).bold()),
                    Span::raw("  "),
                    Span::styled(
                        format!("{} options", entry.count),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::raw("  "),
                    Span::styled(
                        saved_at.format("%Y-%m-%d %H:%M").to_string(),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(Color::DarkGray).bold())
            .highlight_symbol("\u{25b6} ");
        let mut state = ListState::default();
        state.select(Some(self.cursor));
        frame.render_stateful_widget(list, chunks[1], &mut state);
    }

    fn status_hint(&self) -> &str {
        match self.input {
            SavedInput::Naming => "Enter:save  Esc:cancel",
            SavedInput::Normal => "j/k:navigate  s:save  Enter:load  d:delete  ?:help  q:quit",
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use sw_core::{AlwaysConfirm, WheelConfig};

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn naming_produces_save_attempt() {
        let mut session = WheelSession::new(WheelConfig::default());
        let mut tab = SavedTab::new();
        tab.handle_key(key(KeyCode::Char('s')), &mut session, 0);
        assert_eq!(tab.input_mode(), InputMode::TextInput);
        for c in "lunch".chars() {
            tab.handle_key(key(KeyCode::Char(c)), &mut session, 0);
        }
        let action = tab.handle_key(key(KeyCode::Enter), &mut session, 0);
        assert_eq!(action, TabAction::Attempt(Guarded::SaveWheel("lunch".into())));
        assert_eq!(tab.input_mode(), InputMode::VimNav);
    }

    #[test]
    fn refresh_lists_and_load_restores() {
        let mut session = WheelSession::new(WheelConfig::default());
        session.add_options("Tacos").unwrap();
        session.save_wheel("lunch", &mut AlwaysConfirm).unwrap();
        session.clear_all(&mut AlwaysConfirm).unwrap();

        let mut tab = SavedTab::new();
        tab.refresh(&session);
        assert_eq!(tab.entries.len(), 1);
        assert_eq!(tab.entries[0].count, 5);

        tab.handle_key(key(KeyCode::Enter), &mut session, 0);
        assert_eq!(session.wheel().len(), 5);
        assert_eq!(
            tab.handle_key(key(KeyCode::Char('d')), &mut session, 0),
            TabAction::Attempt(Guarded::DeleteWheel("lunch".into()))
        );
    }
}
