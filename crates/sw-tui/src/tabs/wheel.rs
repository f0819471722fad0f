//! The wheel itself: drawn on a braille canvas, spun with Space.

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::prelude::*;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Circle, Context, Line as CanvasLine};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use sw_core::{SegmentView, WheelSession, WheelView};

use super::{InputMode, Tab, TabAction};
use crate::shared::{lighten, option_color};

/// Angular step between radial fill lines.
const FILL_STEP: f64 = 0.015;
/// Radius of the wheel in canvas units.
const RADIUS: f64 = 1.0;

/// Wheel tab state.
#[derive(Debug, Default)]
pub struct WheelTab {
    /// Area the canvas was last drawn in, for click-to-spin.
    last_canvas: std::cell::Cell<Rect>,
}

impl WheelTab {
    /// Create the wheel tab.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Canvas coordinates for `angle` at `radius`. Angles grow clockwise on
/// screen and the canvas y axis points up.
fn polar(angle: f64, radius: f64) -> (f64, f64) {
    (radius * angle.cos(), -radius * angle.sin())
}

fn paint_segment(ctx: &mut Context, segment: &SegmentView) {
    let color = if segment.highlight_alpha > 0.0 {
        lighten(&segment.color, segment.highlight_alpha)
    } else {
        option_color(&segment.color)
    };
    let mut angle = segment.start_angle;
    while angle < segment.end_angle {
        let (x, y) = polar(angle, RADIUS);
        ctx.draw(&CanvasLine::new(0.0, 0.0, x, y, color));
        angle += FILL_STEP;
    }
}

fn paint_wheel(ctx: &mut Context, view: &WheelView) {
    for segment in &view.segments {
        paint_segment(ctx, segment);
    }
    ctx.layer();

    // Segment borders.
    for segment in &view.segments {
        let (x, y) = polar(segment.start_angle, RADIUS);
        ctx.draw(&CanvasLine::new(0.0, 0.0, x, y, Color::Black));
    }
    ctx.draw(&Circle {
        x: 0.0,
        y: 0.0,
        radius: RADIUS,
        color: Color::White,
    });
    ctx.draw(&Circle {
        x: 0.0,
        y: 0.0,
        radius: 0.08,
        color: Color::White,
    });

    // Pointer at the top, tip facing the wheel.
    let (tip_x, tip_y) = polar(view.pointer_angle, RADIUS - 0.05);
    ctx.draw(&CanvasLine::new(tip_x - 0.08, tip_y + 0.15, tip_x, tip_y, Color::Red));
    ctx.draw(&CanvasLine::new(tip_x + 0.08, tip_y + 0.15, tip_x, tip_y, Color::Red));
    ctx.draw(&CanvasLine::new(tip_x - 0.08, tip_y + 0.15, tip_x + 0.08, tip_y + 0.15, Color::Red));
    ctx.layer();

    // Labels, skipped when the wedges are too thin to read.
    if view.segments.len() <= 16 {
        for segment in &view.segments {
            let (x, y) = polar(segment.mid_angle(), RADIUS * 0.6);
            let label: String = segment.text.chars().take(12).collect();
            let offset = 0.02 * label.chars().count() as f64;
            ctx.print(
                x - offset,
                y,
                Span::styled(label, Style::default().fg(Color::White).bold()),
            );
        }
    }
}

/// Largest roughly-square area for the canvas, given terminal cells are
/// about twice as tall as wide.
fn square_in(area: Rect) -> Rect {
    let width = area.width.min(area.height.saturating_mul(2));
    let height = (width / 2).min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn result_lines(session: &WheelSession) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let headline = if session.is_spinning() {
        Line::from(Span::styled(
            "Spinning...",
            Style::default().fg(Color::Yellow).bold(),
        ))
    } else if let Some(winner) = session.last_winner() {
        Line::from(vec![
            Span::styled("Winner: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                winner.text.clone(),
                Style::default().fg(option_color(&winner.color)).bold(),
            ),
        ])
    } else if session.wheel().len() < session.config().min_options {
        Line::from(Span::styled(
            "Add options and spin!",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(Span::styled(
            "Press Space to spin!",
            Style::default().fg(Color::Green),
        ))
    };
    lines.push(headline);
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Options: ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!(
            "{}/{}",
            session.wheel().len(),
            session.wheel().max_options()
        )),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Spins:   ", Style::default().fg(Color::DarkGray)),
        Span::raw(session.statistics().total().to_string()),
    ]));
    let remove = if session.settings().remove_after_win {
        Span::styled("on", Style::default().fg(Color::Green))
    } else {
        Span::styled("off", Style::default().fg(Color::DarkGray))
    };
    lines.push(Line::from(vec![
        Span::styled("Remove winner: ", Style::default().fg(Color::DarkGray)),
        remove,
    ]));
    lines
}

impl Tab for WheelTab {
    fn input_mode(&self) -> InputMode {
        InputMode::VimNav
    }

    fn handle_key(&mut self, key: KeyEvent, session: &mut WheelSession, now_ms: u64) -> TabAction {
        match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => {
                // Rejections are queued as notices.
                let _ = session.spin(now_ms);
            }
            KeyCode::Char('r') => {
                let enabled = !session.settings().remove_after_win;
                session.set_remove_after_win(enabled);
            }
            _ => {}
        }
        TabAction::None
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, session: &mut WheelSession, now_ms: u64) {
        let canvas = self.last_canvas.get();
        if mouse.kind == MouseEventKind::Down(MouseButton::Left)
            && canvas.contains(Position::new(mouse.column, mouse.row))
        {
            // Rejections are queued as notices.
            let _ = session.spin(now_ms);
        }
    }

    fn draw(&self, frame: &mut Frame, area: Rect, session: &WheelSession, now_ms: u64) {
        let block = Block::default()
            .title(" Spin the Wheel ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.height < 6 || inner.width < 30 {
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(28)])
            .split(inner);

        let view = session.view(now_ms);
        let canvas_area = square_in(chunks[0]);
        self.last_canvas.set(canvas_area);
        if view.is_empty() {
            let empty = Paragraph::new("No options. Add some on the Options tab.")
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(empty, chunks[0]);
        } else {
            let canvas = Canvas::default()
                .marker(Marker::Braille)
                .x_bounds([-1.1, 1.1])
                .y_bounds([-1.1, 1.1])
                .paint(|ctx| paint_wheel(ctx, &view));
            frame.render_widget(canvas, canvas_area);
        }

        let side = Paragraph::new(result_lines(session))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::LEFT));
        frame.render_widget(side, chunks[1]);
    }

    fn status_hint(&self) -> &str {
        "Space/Enter:spin  r:remove-winner prompt  Tab:view  ?:help  q:quit"
    }
}
