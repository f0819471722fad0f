//! Statistics tab: how often each option has won.

use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use sw_core::WheelSession;

use super::{Guarded, InputMode, Tab, TabAction};
use crate::shared::option_color;

/// Widest bar, in cells.
const BAR_WIDTH: usize = 30;

/// Statistics tab state.
#[derive(Debug, Default)]
pub struct StatsTab {
    scroll: u16,
}

impl StatsTab {
    /// Create the statistics tab.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Bar length for `count` out of the leader's `max`.
fn bar_len(count: u32, max: u32) -> usize {
    if max == 0 {
        return 0;
    }
    let len = (f64::from(count) / f64::from(max) * BAR_WIDTH as f64).round() as usize;
    len.max(1)
}

fn stat_lines(session: &WheelSession) -> Vec<Line<'static>> {
    let stats = session.statistics();
    if stats.is_empty() {
        return vec![Line::from(Span::styled(
            "No spins yet. Spin the wheel to start collecting statistics.",
            Style::default().fg(Color::DarkGray),
        ))];
    }

    let sorted = stats.sorted();
    let max = sorted.first().map_or(0, |(_, count)| *count);
    let total = stats.total();
    let width = sorted
        .iter()
        .map(|(text, _)| text.chars().count())
        .max()
        .unwrap_or(0)
        .min(24);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Total spins: ", Style::default().fg(Color::DarkGray)),
            Span::styled(total.to_string(), Style::default().fg(Color::White).bold()),
            Span::styled("   Distinct winners: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                sorted.len().to_string(),
                Style::default().fg(Color::White).bold(),
            ),
        ]),
        Line::from(""),
    ];

    for (text, count) in sorted {
        // Winners no longer on the wheel keep their stats but lose their color.
        let color = session
            .options()
            .iter()
            .find(|o| o.text == text)
            .map_or(Color::Gray, |o| option_color(&o.color));
        let label: String = text.chars().take(width).collect();
        let share = f64::from(count) / total as f64 * 100.0;
        lines.push(Line::from(vec![
            Span::styled(format!("{label:<width$} "), Style::default().fg(Color::White)),
            Span::styled(
                "\u{2588}".repeat(bar_len(count, max)),
                Style::default().fg(color),
            ),
            Span::styled(
                format!(" {count} ({share:.0}%)"),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }
    lines
}

impl Tab for StatsTab {
    fn input_mode(&self) -> InputMode {
        InputMode::VimNav
    }

    fn handle_key(&mut self, key: KeyEvent, _session: &mut WheelSession, _now_ms: u64) -> TabAction {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.scroll = self.scroll.saturating_add(1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Char('g') => self.scroll = 0,
            KeyCode::Char('c') => return TabAction::Attempt(Guarded::ClearStatistics),
            _ => {}
        }
        TabAction::None
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, _session: &mut WheelSession, _now_ms: u64) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
            MouseEventKind::ScrollDown => self.scroll = self.scroll.saturating_add(1),
            _ => {}
        }
    }

    fn refresh(&mut self, session: &WheelSession) {
        if session.statistics().is_empty() {
            self.scroll = 0;
        }
    }

    fn draw(&self, frame: &mut Frame, area: Rect, session: &WheelSession, _now_ms: u64) {
        let paragraph = Paragraph::new(stat_lines(session))
            .block(
                Block::default()
                    .title(" Statistics ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Green)),
            )
            .scroll((self.scroll, 0));
        frame.render_widget(paragraph, area);
    }

    fn status_hint(&self) -> &str {
        "j/k:scroll  c:clear statistics  Tab:view  ?:help  q:quit"
    }
}
