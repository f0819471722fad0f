//! Tab definitions, trait, and tab bar rendering.

pub mod options;
pub mod saved;
pub mod stats;
pub mod wheel;

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::prelude::*;
use sw_core::{Confirm, WheelResult, WheelSession};

/// Identifies which tab is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabId {
    /// The spinning wheel.
    Wheel,
    /// Option list editing and bulk selection.
    Options,
    /// Win statistics.
    Stats,
    /// Saved wheels.
    Saved,
}

impl TabId {
    /// All tab IDs in display order.
    pub const ALL: [TabId; 4] = [TabId::Wheel, TabId::Options, TabId::Stats, TabId::Saved];

    /// Tab bar labels, in the same order as [`TabId::ALL`].
    pub const TITLES: [&'static str; 4] = ["[1]Wheel", "[2]Options", "[3]Stats", "[4]Saved"];

    /// Parse a tab name from a string.
    pub fn from_name(name: &str) -> Option<TabId> {
        match name.to_lowercase().as_str() {
            "wheel" | "spin" => Some(TabId::Wheel),
            "options" => Some(TabId::Options),
            "stats" | "statistics" => Some(TabId::Stats),
            "saved" => Some(TabId::Saved),
            _ => None,
        }
    }

    /// Index of this tab in the tab bar.
    pub fn index(self) -> usize {
        TabId::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    /// Get the next tab (wrapping).
    pub fn next(self) -> TabId {
        TabId::ALL[(self.index() + 1) % TabId::ALL.len()]
    }

    /// Get the previous tab (wrapping).
    pub fn prev(self) -> TabId {
        let len = TabId::ALL.len();
        TabId::ALL[(self.index() + len - 1) % len]
    }
}

/// Whether a tab consumes keyboard input or uses vim-like navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Vim-like navigation. Top-level handles tab switching.
    VimNav,
    /// Text input: the tab has its own input field. Most keys go to the tab.
    TextInput,
}

/// A session action that sits behind a confirmation prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guarded {
    /// Remove every option.
    ClearAll,
    /// Remove the selected options.
    RemoveSelected,
    /// Forget all win counts.
    ClearStatistics,
    /// Save the current options under a name.
    SaveWheel(String),
    /// Delete a saved wheel.
    DeleteWheel(String),
}

impl Guarded {
    /// Run the action, asking `confirm` wherever the session needs a yes.
    pub fn apply(&self, session: &mut WheelSession, confirm: &mut dyn Confirm) -> WheelResult<()> {
        match self {
            Guarded::ClearAll => session.clear_all(confirm),
            Guarded::RemoveSelected => session.remove_selected(confirm).map(|_| ()),
            Guarded::ClearStatistics => session.clear_statistics(confirm).map(|_| ()),
            Guarded::SaveWheel(name) => session.save_wheel(name, confirm),
            Guarded::DeleteWheel(name) => session.delete_wheel(name, confirm),
        }
    }
}

/// What a tab asks the app to do after handling a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabAction {
    /// Nothing further.
    None,
    /// Quit the application.
    Quit,
    /// Run a guarded action, prompting first if the session asks.
    Attempt(Guarded),
}

/// Trait that each tab screen implements.
pub trait Tab {
    /// Return the input mode for event routing.
    fn input_mode(&self) -> InputMode;

    /// Handle a key event.
    fn handle_key(&mut self, key: KeyEvent, session: &mut WheelSession, now_ms: u64) -> TabAction;

    /// Handle a mouse event.
    fn handle_mouse(&mut self, _mouse: MouseEvent, _session: &mut WheelSession, _now_ms: u64) {}

    /// Re-read whatever the tab caches from the session.
    fn refresh(&mut self, _session: &WheelSession) {}

    /// Draw the tab content into the given area.
    fn draw(&self, frame: &mut Frame, area: Rect, session: &WheelSession, now_ms: u64);

    /// Return context-sensitive status bar text.
    fn status_hint(&self) -> &str;
}

/// Draw the tab bar.
pub fn draw_tab_bar(frame: &mut Frame, active: TabId, area: Rect) {
    let active_idx = active.index();
    let mut spans = Vec::new();

    for (i, title) in TabId::TITLES.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
        }
        let style = if i == active_idx {
            Style::default().fg(Color::White).bold()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(*title, style));
    }

    let paragraph = ratatui::widgets::Paragraph::new(Line::from(spans));
    frame.render_widget(paragraph, area);
}

/// Hit-test the tab bar for a click at column `col`.
pub fn tab_bar_hit_test(col: u16) -> Option<TabId> {
    let divider_len = 3u16;
    let mut x = 0u16;
    for (i, title) in TabId::TITLES.iter().enumerate() {
        let end_x = x + title.len() as u16;
        if col >= x && col < end_x {
            return Some(TabId::ALL[i]);
        }
        x = end_x + divider_len;
    }
    None
}
