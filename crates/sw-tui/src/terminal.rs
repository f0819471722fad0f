//! Terminal setup, teardown, and main event loop.

use std::io;
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    MouseButton, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::TuiApp;
use crate::tabs::{self, InputMode, TabId};

/// Poll interval while something is animating.
const FRAME: Duration = Duration::from_millis(16);
/// Poll interval while idle.
const IDLE: Duration = Duration::from_millis(250);

/// Launch the TUI application.
pub fn run(mut app: TuiApp) -> Result<(), String> {
    enable_raw_mode().map_err(|e| format!("terminal error: {e}"))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .map_err(|e| format!("terminal error: {e}"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| format!("terminal error: {e}"))?;

    let result = run_loop(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    result
}

/// Main loop: tick, draw, then wait for input at most one frame while
/// animating.
fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut TuiApp,
) -> Result<(), String> {
    loop {
        let now = app.now_ms();
        app.tick(now);

        terminal
            .draw(|frame| draw(frame, app, now))
            .map_err(|e| format!("draw error: {e}"))?;

        if app.should_quit {
            return Ok(());
        }

        let timeout = if app.is_busy() { FRAME } else { IDLE };
        if event::poll(timeout).map_err(|e| format!("event error: {e}"))? {
            let event = event::read().map_err(|e| format!("event error: {e}"))?;
            handle_event(app, event);
        }
    }
}

/// Handle a crossterm event.
fn handle_event(app: &mut TuiApp, event: Event) {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Mouse(mouse) => handle_mouse(app, mouse),
        _ => {}
    }
}

/// Handle keyboard input: popups first, then global keys, then the tab.
fn handle_key(app: &mut TuiApp, key: crossterm::event::KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    if app.confirm.is_some() {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.answer_confirm(true),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.answer_confirm(false),
            _ => {}
        }
        return;
    }

    if app.session.pending_winner().is_some() {
        match key.code {
            KeyCode::Char('r') | KeyCode::Char('R') => app.answer_winner(true),
            KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Esc => app.answer_winner(false),
            _ => {}
        }
        return;
    }

    if app.active_input_mode() == InputMode::VimNav {
        match key.code {
            KeyCode::Char('q') => {
                app.should_quit = true;
                return;
            }
            KeyCode::Char('?') => {
                app.show_help = !app.show_help;
                return;
            }
            KeyCode::Tab => {
                app.switch_tab(app.active_tab.next());
                return;
            }
            KeyCode::BackTab => {
                app.switch_tab(app.active_tab.prev());
                return;
            }
            _ => {}
        }
        if let KeyCode::Char(c) = key.code
            && let Some(idx) = c.to_digit(10)
            && (1..=TabId::ALL.len() as u32).contains(&idx)
        {
            app.switch_tab(TabId::ALL[idx as usize - 1]);
            return;
        }
    }

    app.handle_tab_key(key);
}

/// Handle mouse events.
fn handle_mouse(app: &mut TuiApp, mouse: crossterm::event::MouseEvent) {
    if app.confirm.is_some() || app.session.pending_winner().is_some() {
        return;
    }
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if mouse.row == 0
                && let Some(tab) = tabs::tab_bar_hit_test(mouse.column)
            {
                app.switch_tab(tab);
                return;
            }
            app.handle_tab_mouse(mouse);
        }
        MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => app.handle_tab_mouse(mouse),
        _ => {}
    }
}

/// Main draw function.
fn draw(frame: &mut Frame, app: &TuiApp, now_ms: u64) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    tabs::draw_tab_bar(frame, app.active_tab, chunks[0]);
    app.active_tab_ref()
        .draw(frame, chunks[1], &app.session, now_ms);

    let hint = app.active_tab_ref().status_hint();
    let status = Paragraph::new(hint).style(Style::default().fg(Color::Black).bg(Color::White));
    frame.render_widget(status, chunks[2]);

    if let Some((notice, _)) = &app.toast {
        crate::shared::draw_toast(frame, chunks[1], notice);
    }
    if let Some(winner) = app.session.pending_winner() {
        crate::shared::draw_remove_winner_popup(frame, winner);
    }
    if let Some(pending) = &app.confirm {
        crate::shared::draw_confirm_popup(frame, &pending.question);
    }
    if app.show_help {
        crate::shared::draw_help_popup(frame);
    }
}
