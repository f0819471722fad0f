//! Shared utilities for TUI views: layout helpers, colors, and popups.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use sw_core::option::parse_hex;
use sw_core::{Confirm, Notice, Severity, WheelOption};

/// Declines every prompt but keeps the question, so the app can ask the user
/// in a popup and replay the action on "yes".
#[derive(Debug, Default)]
pub struct DeferredConfirm {
    /// The question the session asked, if any.
    pub question: Option<String>,
}

impl Confirm for DeferredConfirm {
    fn confirm(&mut self, question: &str) -> bool {
        self.question = Some(question.to_string());
        false
    }
}

/// Create a centered rectangle as a percentage of the given area.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Terminal color for an option's hex color. Unparseable colors fall back
/// to gray.
pub fn option_color(hex: &str) -> Color {
    match parse_hex(hex) {
        Some((r, g, b)) => Color::Rgb(r, g, b),
        None => Color::Gray,
    }
}

/// Blend `hex` toward white by `alpha` (`0.0` leaves it unchanged).
pub fn lighten(hex: &str, alpha: f64) -> Color {
    let Some((r, g, b)) = parse_hex(hex) else {
        return Color::White;
    };
    let alpha = alpha.clamp(0.0, 1.0);
    let mix = |c: u8| -> u8 {
        let c = f64::from(c);
        (c + (255.0 - c) * alpha).round().clamp(0.0, 255.0) as u8
    };
    Color::Rgb(mix(r), mix(g), mix(b))
}

/// Style for a notice line.
pub fn notice_style(severity: Severity) -> Style {
    match severity {
        Severity::Success => Style::default().fg(Color::Green),
        Severity::Warning => Style::default().fg(Color::Yellow),
        Severity::Error => Style::default().fg(Color::Red).bold(),
        Severity::Info => Style::default().fg(Color::Cyan),
    }
}

/// Draw a one-line toast in the bottom-right corner of `area`.
pub fn draw_toast(frame: &mut Frame, area: Rect, notice: &Notice) {
    let width = (notice.message.chars().count() as u16 + 4).min(area.width);
    if width < 6 || area.height < 3 {
        return;
    }
    let rect = Rect {
        x: area.x + area.width - width,
        y: area.y + area.height - 3,
        width,
        height: 3,
    };
    let style = notice_style(notice.severity);
    let toast = Paragraph::new(notice.message.as_str())
        .style(style)
        .block(Block::default().borders(Borders::ALL).border_style(style));
    frame.render_widget(Clear, rect);
    frame.render_widget(toast, rect);
}

/// Draw a yes/no popup for a destructive action.
pub fn draw_confirm_popup(frame: &mut Frame, question: &str) {
    let area = centered_rect(50, 25, frame.area());
    let lines = vec![
        Line::from(question.to_string()),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(Color::Green).bold()),
            Span::raw(": yes   "),
            Span::styled("n", Style::default().fg(Color::Red).bold()),
            Span::raw("/Esc: no"),
        ]),
    ];
    let popup = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(" Confirm ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

/// Draw the keep/remove popup for the last winner.
pub fn draw_remove_winner_popup(frame: &mut Frame, winner: &WheelOption) {
    let area = centered_rect(50, 30, frame.area());
    let lines = vec![
        Line::from("Remove the winner from the wheel?"),
        Line::from(""),
        Line::from(vec![
            Span::styled("\u{2588}\u{2588} ", Style::default().fg(option_color(&winner.color))),
            Span::styled(winner.text.clone(), Style::default().fg(Color::White).bold()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("r", Style::default().fg(Color::Red).bold()),
            Span::raw(": remove   "),
            Span::styled("k", Style::default().fg(Color::Green).bold()),
            Span::raw("/Esc: keep"),
        ]),
    ];
    let popup = Paragraph::new(lines).block(
        Block::default()
            .title(" Winner ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta)),
    );
    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

/// Draw a global help popup overlay.
pub fn draw_help_popup(frame: &mut Frame) {
    let area = centered_rect(60, 70, frame.area());

    let help_text = vec![
        Line::from("Keyboard Shortcuts").style(Style::default().bold()),
        Line::from(""),
        Line::from("Tabs:"),
        Line::from("  1-4 / Tab   Switch tab"),
        Line::from(""),
        Line::from("Wheel:"),
        Line::from("  Space/Enter Spin"),
        Line::from("  r           Toggle remove-winner prompt"),
        Line::from(""),
        Line::from("Options:"),
        Line::from("  a           Add options (Enter to submit)"),
        Line::from("  j / k       Move down / up"),
        Line::from("  d           Remove option under cursor"),
        Line::from("  v           Toggle selection mode"),
        Line::from("  Space       Select / deselect (selection mode)"),
        Line::from("  A / N       Select all / none"),
        Line::from("  x           Remove selected"),
        Line::from("  C           Clear all options"),
        Line::from(""),
        Line::from("Stats:  c clear    Saved:  s save, Enter load, d delete"),
        Line::from(""),
        Line::from("  ?           Toggle this help"),
        Line::from("  q / Ctrl+C  Quit"),
    ];

    let popup = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deferred_confirm_records_and_declines() {
        let mut confirm = DeferredConfirm::default();
        assert!(!confirm.confirm("Delete?"));
        assert_eq!(confirm.question.as_deref(), Some("Delete?"));
    }

    #[test]
    fn lighten_endpoints() {
        assert_eq!(lighten("#000000", 0.0), Color::Rgb(0, 0, 0));
        assert_eq!(lighten("#000000", 1.0), Color::Rgb(255, 255, 255));
        assert_eq!(lighten("#FF0000", 0.5), Color::Rgb(255, 128, 128));
        assert_eq!(lighten("bogus", 0.2), Color::White);
    }

    #[test]
    fn option_color_parses_hex() {
        assert_eq!(option_color("#2563EB"), Color::Rgb(0x25, 0x63, 0xEB));
        assert_eq!(option_color("blue"), Color::Gray);
    }
}
