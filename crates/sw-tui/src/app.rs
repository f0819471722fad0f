//! Top-level application state: the session, tabs, popups and toast.

use std::collections::VecDeque;
use std::time::Instant;

use sw_core::{AlwaysConfirm, Notice, WheelError, WheelSession};

use crate::shared::DeferredConfirm;
use crate::tabs::options::OptionsTab;
use crate::tabs::saved::SavedTab;
use crate::tabs::stats::StatsTab;
use crate::tabs::wheel::WheelTab;
use crate::tabs::{Guarded, InputMode, Tab, TabAction, TabId};

/// How long a toast stays on screen.
pub const TOAST_MS: u64 = 3000;
/// Notices waiting for the toast slot; older ones drop first.
const TOAST_BACKLOG: usize = 4;

/// A confirmation popup waiting for y/n.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingConfirm {
    /// Question shown to the user.
    pub question: String,
    /// Action replayed on "yes".
    pub action: Guarded,
}

/// Main application state for the TUI.
pub struct TuiApp {
    /// The wheel session every tab works on.
    pub session: WheelSession,
    /// Currently active tab.
    pub active_tab: TabId,
    /// Whether to show the global help popup.
    pub show_help: bool,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Open confirmation popup.
    pub confirm: Option<PendingConfirm>,
    /// Notice on screen and the time it was shown.
    pub toast: Option<(Notice, u64)>,
    /// Notices shown one after another once the current toast expires.
    pending_toasts: VecDeque<Notice>,

    /// Wheel tab.
    pub wheel: WheelTab,
    /// Options tab.
    pub options: OptionsTab,
    /// Statistics tab.
    pub stats: StatsTab,
    /// Saved wheels tab.
    pub saved: SavedTab,

    clock: Instant,
}

impl TuiApp {
    /// Create a new app around an opened session.
    pub fn new(session: WheelSession, start_tab: TabId) -> Self {
        let mut app = Self {
            session,
            active_tab: start_tab,
            show_help: false,
            should_quit: false,
            confirm: None,
            toast: None,
            pending_toasts: VecDeque::new(),
            wheel: WheelTab::new(),
            options: OptionsTab::new(),
            stats: StatsTab::new(),
            saved: SavedTab::new(),
            clock: Instant::now(),
        };
        app.refresh_active();
        app
    }

    /// Milliseconds since the app started.
    pub fn now_ms(&self) -> u64 {
        u64::try_from(self.clock.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// Advance animations and pick up new notices.
    pub fn tick(&mut self, now_ms: u64) {
        if let Err(e) = self.session.tick(now_ms) {
            self.queue_toast(Notice::new(sw_core::Severity::Error, e.to_string()));
        }
        self.collect_notices(now_ms);
    }

    /// Whether the next frame is needed soon (animation or toast running).
    pub fn is_busy(&self) -> bool {
        self.session.machine().is_animating()
            || self.toast.is_some()
            || !self.pending_toasts.is_empty()
    }

    /// Get the input mode of the currently active tab.
    pub fn active_input_mode(&self) -> InputMode {
        self.active_tab_ref().input_mode()
    }

    /// Get a reference to the active tab.
    pub fn active_tab_ref(&self) -> &dyn Tab {
        match self.active_tab {
            TabId::Wheel => &self.wheel,
            TabId::Options => &self.options,
            TabId::Stats => &self.stats,
            TabId::Saved => &self.saved,
        }
    }

    /// Get a mutable reference to the active tab.
    pub fn active_tab_mut(&mut self) -> &mut dyn Tab {
        match self.active_tab {
            TabId::Wheel => &mut self.wheel,
            TabId::Options => &mut self.options,
            TabId::Stats => &mut self.stats,
            TabId::Saved => &mut self.saved,
        }
    }

    /// Switch to a tab by ID.
    pub fn switch_tab(&mut self, tab: TabId) {
        self.active_tab = tab;
        self.refresh_active();
    }

    /// Forward a key to the active tab and act on its answer.
    pub fn handle_tab_key(&mut self, key: crossterm::event::KeyEvent) {
        let now = self.now_ms();
        let action = match self.active_tab {
            TabId::Wheel => self.wheel.handle_key(key, &mut self.session, now),
            TabId::Options => self.options.handle_key(key, &mut self.session, now),
            TabId::Stats => self.stats.handle_key(key, &mut self.session, now),
            TabId::Saved => self.saved.handle_key(key, &mut self.session, now),
        };
        match action {
            TabAction::None => {}
            TabAction::Quit => self.should_quit = true,
            TabAction::Attempt(guarded) => self.attempt(guarded),
        }
        self.after_action(now);
    }

    /// Forward a mouse event to the active tab.
    pub fn handle_tab_mouse(&mut self, mouse: crossterm::event::MouseEvent) {
        let now = self.now_ms();
        match self.active_tab {
            TabId::Wheel => self.wheel.handle_mouse(mouse, &mut self.session, now),
            TabId::Options => self.options.handle_mouse(mouse, &mut self.session, now),
            TabId::Stats => self.stats.handle_mouse(mouse, &mut self.session, now),
            TabId::Saved => self.saved.handle_mouse(mouse, &mut self.session, now),
        }
        self.after_action(now);
    }

    /// Run a guarded action. If the session wants confirmation, open the
    /// popup instead and replay on "yes".
    pub fn attempt(&mut self, action: Guarded) {
        let mut deferred = DeferredConfirm::default();
        match action.apply(&mut self.session, &mut deferred) {
            Err(WheelError::Cancelled) => {
                if let Some(question) = deferred.question {
                    self.confirm = Some(PendingConfirm { question, action });
                }
            }
            // Failures are already queued as notices.
            Ok(()) | Err(_) => {}
        }
    }

    /// Answer the open confirmation popup.
    pub fn answer_confirm(&mut self, yes: bool) {
        let Some(pending) = self.confirm.take() else {
            return;
        };
        if yes {
            // Failures are already queued as notices.
            let _ = pending.action.apply(&mut self.session, &mut AlwaysConfirm);
        }
        let now = self.now_ms();
        self.after_action(now);
    }

    /// Answer the keep/remove popup.
    pub fn answer_winner(&mut self, remove: bool) {
        // Failures are already queued as notices.
        let _ = if remove {
            self.session.remove_winner().map(|_| ())
        } else {
            self.session.keep_winner()
        };
        let now = self.now_ms();
        self.after_action(now);
    }

    fn after_action(&mut self, now_ms: u64) {
        self.collect_notices(now_ms);
        self.refresh_active();
    }

    fn refresh_active(&mut self) {
        match self.active_tab {
            TabId::Wheel => self.wheel.refresh(&self.session),
            TabId::Options => self.options.refresh(&self.session),
            TabId::Stats => self.stats.refresh(&self.session),
            TabId::Saved => self.saved.refresh(&self.session),
        }
    }

    fn queue_toast(&mut self, notice: Notice) {
        if self.pending_toasts.len() == TOAST_BACKLOG {
            self.pending_toasts.pop_front();
        }
        self.pending_toasts.push_back(notice);
    }

    fn collect_notices(&mut self, now_ms: u64) {
        for notice in self.session.drain_notices() {
            self.queue_toast(notice);
        }
        if let Some((_, shown)) = &self.toast
            && now_ms.saturating_sub(*shown) >= TOAST_MS
        {
            self.toast = None;
        }
        if self.toast.is_none()
            && let Some(next) = self.pending_toasts.pop_front()
        {
            self.toast = Some((next, now_ms));
        }
    }
}
