//! One user's working wheel: options, spins, statistics and saved wheels.
//!
//! [`WheelSession`] is the single entry point frontends talk to. Every
//! operation either succeeds and queues a notice describing what happened,
//! or fails with a [`WheelError`] (also queued as an error notice) and leaves
//! the session untouched. Background writes to the store never fail an
//! operation; they are logged and surfaced as warnings.

use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::WheelConfig;
use crate::error::{WheelError, WheelResult};
use crate::machine::{PulseFrame, SpinMachine, SpinRequest, Step};
use crate::notice::{Confirm, Notice, Notices, Severity, plural, plural_noun};
use crate::option::WheelOption;
use crate::persist::{
    self, CURRENT_KEY, CurrentWheel, STATISTICS_KEY, SETTINGS_KEY, SavedWheel, SavedWheels,
    Settings,
};
use crate::render::WheelView;
use crate::selection::Selection;
use crate::stats::StatisticsLog;
use crate::store::{MemoryStore, Store};
use crate::wheel::{AddReport, Wheel};

/// A live wheel plus everything around it.
pub struct WheelSession {
    config: WheelConfig,
    wheel: Wheel,
    machine: SpinMachine,
    stats: StatisticsLog,
    selection: Selection,
    selection_mode: bool,
    settings: Settings,
    store: Box<dyn Store>,
    rng: StdRng,
    notices: Notices,
    last_winner: Option<WheelOption>,
}

impl WheelSession {
    /// A fresh session with the placeholder options and an in-memory store.
    pub fn new(config: WheelConfig) -> Self {
        let wheel = Wheel::with_defaults(config.max_options, config.min_options);
        Self::assemble(
            config,
            wheel,
            0.0,
            StatisticsLog::new(),
            Settings::default(),
            Box::new(MemoryStore::new()),
        )
    }

    /// Restore a session from `store`. A store with no working wheel yields
    /// the placeholder options. Malformed stored data is an error.
    pub fn open(config: WheelConfig, store: Box<dyn Store>) -> WheelResult<Self> {
        let stats = persist::load_statistics(store.as_ref())?;
        let settings = persist::load_settings(store.as_ref())?;
        let (wheel, rotation) = match persist::load_current(store.as_ref())? {
            Some(current) => {
                let mut wheel = Wheel::new(config.max_options, config.min_options);
                wheel.replace(current.options);
                (wheel, current.rotation)
            }
            None => (
                Wheel::with_defaults(config.max_options, config.min_options),
                0.0,
            ),
        };
        log::info!(
            "session opened: {} options, {} recorded wins",
            wheel.len(),
            stats.total()
        );
        Ok(Self::assemble(
            config, wheel, rotation, stats, settings, store,
        ))
    }

    fn assemble(
        config: WheelConfig,
        wheel: Wheel,
        rotation: f64,
        stats: StatisticsLog,
        settings: Settings,
        store: Box<dyn Store>,
    ) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let machine = SpinMachine::new(&config, rotation);
        Self {
            config,
            wheel,
            machine,
            stats,
            selection: Selection::new(),
            selection_mode: false,
            settings,
            store,
            rng,
            notices: Notices::new(),
            last_winner: None,
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Session configuration.
    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    /// The option list.
    pub fn wheel(&self) -> &Wheel {
        &self.wheel
    }

    /// Options in segment order.
    pub fn options(&self) -> &[WheelOption] {
        self.wheel.options()
    }

    /// The spin state machine.
    pub fn machine(&self) -> &SpinMachine {
        &self.machine
    }

    /// Current wheel angle.
    pub fn rotation(&self) -> f64 {
        self.machine.rotation()
    }

    /// Whether a spin is in flight.
    pub fn is_spinning(&self) -> bool {
        self.machine.is_spinning()
    }

    /// Win counts.
    pub fn statistics(&self) -> &StatisticsLog {
        &self.stats
    }

    /// Selected option indices.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Whether bulk selection is active.
    pub fn selection_mode(&self) -> bool {
        self.selection_mode
    }

    /// User settings.
    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Winner of the most recent spin.
    pub fn last_winner(&self) -> Option<&WheelOption> {
        self.last_winner.as_ref()
    }

    /// The winner waiting for a keep/remove answer, if any.
    pub fn pending_winner(&self) -> Option<&WheelOption> {
        if self.machine.is_awaiting_decision() {
            self.last_winner.as_ref()
        } else {
            None
        }
    }

    /// Take queued notices, oldest first.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }

    /// Most recent queued notice.
    pub fn last_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }

    /// Saved wheels by name.
    pub fn saved_wheels(&self) -> WheelResult<SavedWheels> {
        persist::load_saved_wheels(self.store.as_ref())
    }

    /// Geometry of the wheel at `now_ms`.
    pub fn view(&self, now_ms: u64) -> WheelView {
        let pulse = self.machine.highlight().map(|h| PulseFrame {
            index: h.index,
            alpha: h.alpha(now_ms),
        });
        WheelView::build(
            self.wheel.options(),
            self.machine.rotation(),
            pulse,
            |i| self.selection_mode && self.selection.contains(i),
            self.machine.is_spinning(),
        )
    }

    // -----------------------------------------------------------------------
    // Options
    // -----------------------------------------------------------------------

    /// Add every non-empty line of `input` as an option.
    pub fn add_options(&mut self, input: &str) -> WheelResult<AddReport> {
        self.ensure_mutable()?;
        let report = match self.wheel.add_batch(input) {
            Ok(report) => report,
            Err(e) => return self.reject(e),
        };

        if report.hit_limit {
            self.notices.push(
                Severity::Warning,
                format!(
                    "Maximum limit of {} options reached. Added {}.",
                    self.wheel.max_options(),
                    plural(report.added, "option")
                ),
            );
        } else if report.added > 0 {
            let mut message = format!("Successfully added {}", plural(report.added, "option"));
            if report.duplicates > 0 {
                message.push_str(&format!(
                    ". {} skipped.",
                    plural(report.duplicates, "duplicate")
                ));
            }
            self.notices.push(Severity::Success, message);
        } else if report.duplicates > 0 {
            self.notices.push(
                Severity::Warning,
                format!(
                    "No new options added. {} found.",
                    plural(report.duplicates, "duplicate")
                ),
            );
        }

        if report.added > 0 {
            self.after_mutation();
        }
        Ok(report)
    }

    /// Remove the option at `index`.
    pub fn remove_option(&mut self, index: usize) -> WheelResult<WheelOption> {
        self.ensure_mutable()?;
        let removed = match self.wheel.remove(index) {
            Ok(option) => option,
            Err(e) => return self.reject(e),
        };
        self.selection.clear();
        self.after_mutation();
        self.notices.push(Severity::Info, "Option removed");
        Ok(removed)
    }

    /// Remove every option after confirmation.
    pub fn clear_all(&mut self, confirm: &mut dyn Confirm) -> WheelResult<()> {
        self.ensure_mutable()?;
        if self.wheel.is_empty() {
            return Ok(());
        }
        if !confirm.confirm("Are you sure you want to remove all options?") {
            return Err(WheelError::Cancelled);
        }
        self.wheel.clear();
        self.selection.clear();
        self.after_mutation();
        self.notices.push(Severity::Info, "All options cleared");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    /// Enter or leave selection mode. Either way the selection is emptied.
    /// Returns the new mode.
    pub fn toggle_selection_mode(&mut self) -> WheelResult<bool> {
        self.ensure_mutable()?;
        self.selection_mode = !self.selection_mode;
        self.selection.clear();
        if self.selection_mode {
            self.notices.push(
                Severity::Info,
                "Selection mode enabled - select options to remove",
            );
        } else {
            self.notices.push(Severity::Info, "Selection mode disabled");
        }
        Ok(self.selection_mode)
    }

    /// Flip one option's selection. Returns whether it is now selected;
    /// outside selection mode nothing changes.
    pub fn toggle_selected(&mut self, index: usize) -> WheelResult<bool> {
        self.ensure_mutable()?;
        if !self.selection_mode {
            return Ok(false);
        }
        if index >= self.wheel.len() {
            return self.reject(WheelError::IndexOutOfRange(index));
        }
        Ok(self.selection.toggle(index))
    }

    /// Select every option.
    pub fn select_all(&mut self) -> WheelResult<()> {
        self.ensure_mutable()?;
        if !self.selection_mode {
            return Ok(());
        }
        self.selection.select_all(self.wheel.len());
        self.notices.push(
            Severity::Success,
            format!("Selected all {}", plural(self.wheel.len(), "option")),
        );
        Ok(())
    }

    /// Empty the selection.
    pub fn deselect_all(&mut self) -> WheelResult<()> {
        self.ensure_mutable()?;
        if !self.selection_mode {
            return Ok(());
        }
        self.selection.clear();
        self.notices.push(Severity::Info, "Deselected all options");
        Ok(())
    }

    /// Remove the selected options after confirmation. Rejected outright if
    /// too few options would remain.
    pub fn remove_selected(&mut self, confirm: &mut dyn Confirm) -> WheelResult<Vec<WheelOption>> {
        self.ensure_mutable()?;
        if !self.selection_mode || self.selection.is_empty() {
            return Ok(Vec::new());
        }

        let count = self.selection.len();
        let min = self.wheel.min_options();
        if self.wheel.len().saturating_sub(count) < min {
            self.notices.push(
                Severity::Error,
                format!("Cannot remove selected options - at least {min} options must remain"),
            );
            return Err(WheelError::MustKeep { min });
        }
        let question = format!("Remove {} selected {}?", count, plural_noun(count, "option"));
        if !confirm.confirm(&question) {
            return Err(WheelError::Cancelled);
        }

        let removed = match self.wheel.remove_many(&self.selection) {
            Ok(removed) => removed,
            Err(e) => return self.reject(e),
        };
        self.selection.clear();
        self.after_mutation();
        self.notices.push(
            Severity::Success,
            format!("Removed {}", plural(removed.len(), "option")),
        );
        Ok(removed)
    }

    // -----------------------------------------------------------------------
    // Spinning
    // -----------------------------------------------------------------------

    /// Start a spin at `now_ms`. Leaves selection mode. A request while
    /// already spinning is ignored.
    pub fn spin(&mut self, now_ms: u64) -> WheelResult<SpinRequest> {
        let request = match self
            .machine
            .request_spin(now_ms, self.wheel.len(), &mut self.rng)
        {
            Ok(request) => request,
            Err(e) => return self.reject(e),
        };
        if let SpinRequest::Started(plan) = request {
            self.selection_mode = false;
            self.selection.clear();
            log::info!(
                "spinning {} options, {:.2} turns",
                self.wheel.len(),
                plan.delta() / std::f64::consts::TAU
            );
        }
        Ok(request)
    }

    /// Advance animations to `now_ms`. On the frame a spin settles the win
    /// is recorded and, if enabled, a keep/remove decision is opened.
    pub fn tick(&mut self, now_ms: u64) -> WheelResult<Step> {
        let mut step = self.machine.advance(now_ms)?;
        let Some(resolution) = step.resolved else {
            return Ok(step);
        };

        let winner = self
            .wheel
            .get(resolution.index)
            .cloned()
            .ok_or(WheelError::IndexOutOfRange(resolution.index))?;
        let wins = self.stats.record(&winner.text);
        log::info!("winner: {} ({} wins)", winner.text, wins);
        let result = persist::save_statistics(self.store.as_mut(), &self.stats);
        self.report_write(STATISTICS_KEY, result);
        self.persist_current();

        self.notices
            .push(Severity::Success, format!("Winner: {}", winner.text));
        self.last_winner = Some(winner);

        let await_decision =
            self.settings.remove_after_win && self.wheel.len() > self.wheel.min_options();
        self.machine.acknowledge(now_ms, await_decision)?;

        step.pulse = self.machine.highlight().map(|h| PulseFrame {
            index: h.index,
            alpha: h.alpha(now_ms),
        });
        step.done = !self.machine.is_animating();
        Ok(step)
    }

    /// Answer "keep" to the pending winner decision.
    pub fn keep_winner(&mut self) -> WheelResult<()> {
        match self.machine.close_decision() {
            Ok(_) => Ok(()),
            Err(e) => self.reject(e),
        }
    }

    /// Answer "remove" to the pending winner decision. A decision only opens
    /// while more than `min_options` remain and nothing can mutate the wheel
    /// until it closes, so the removal always leaves enough options.
    pub fn remove_winner(&mut self) -> WheelResult<WheelOption> {
        let resolution = match self.machine.close_decision() {
            Ok(resolution) => resolution,
            Err(e) => return self.reject(e),
        };
        let index = self
            .last_winner
            .as_ref()
            .and_then(|w| self.wheel.find(&w.text, &w.color));
        let Some(index) = index else {
            return self.reject(WheelError::IndexOutOfRange(resolution.index));
        };

        let removed = match self.wheel.remove(index) {
            Ok(option) => option,
            Err(e) => return self.reject(e),
        };
        self.selection.clear();
        self.after_mutation();
        self.notices.push(
            Severity::Info,
            format!("\"{}\" removed from wheel", removed.text),
        );
        Ok(removed)
    }

    // -----------------------------------------------------------------------
    // Settings and statistics
    // -----------------------------------------------------------------------

    /// Turn the post-spin removal prompt on or off.
    pub fn set_remove_after_win(&mut self, enabled: bool) {
        self.settings.remove_after_win = enabled;
        let result = persist::save_settings(self.store.as_mut(), &self.settings);
        self.report_write(SETTINGS_KEY, result);
        let message = if enabled {
            "Will ask to remove winners after spinning"
        } else {
            "Winners will stay on wheel after spinning"
        };
        self.notices.push(Severity::Info, message);
    }

    /// Forget all win counts after confirmation. Returns whether anything
    /// was cleared.
    pub fn clear_statistics(&mut self, confirm: &mut dyn Confirm) -> WheelResult<bool> {
        if self.stats.is_empty() {
            self.notices.push(Severity::Info, "No statistics to clear");
            return Ok(false);
        }
        if !confirm.confirm(
            "Are you sure you want to clear all statistics? This action cannot be undone.",
        ) {
            return Err(WheelError::Cancelled);
        }
        self.stats.clear();
        let result = persist::save_statistics(self.store.as_mut(), &self.stats);
        self.report_write(STATISTICS_KEY, result);
        self.notices.push(Severity::Success, "All statistics cleared");
        Ok(true)
    }

    // -----------------------------------------------------------------------
    // Saved wheels
    // -----------------------------------------------------------------------

    /// Save the current options under `name`. Overwriting an existing
    /// wheel needs confirmation.
    pub fn save_wheel(&mut self, name: &str, confirm: &mut dyn Confirm) -> WheelResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return self.reject(WheelError::EmptyName);
        }
        if self.wheel.is_empty() {
            return self.reject(WheelError::NothingToSave);
        }
        let mut wheels = match self.saved_wheels() {
            Ok(wheels) => wheels,
            Err(e) => return self.reject(e),
        };
        if wheels.contains_key(name)
            && !confirm.confirm("A wheel with this name already exists. Overwrite?")
        {
            return Err(WheelError::Cancelled);
        }

        wheels.insert(
            name.to_string(),
            SavedWheel {
                options: self.wheel.options().to_vec(),
                saved_at: Utc::now(),
            },
        );
        if let Err(e) = persist::save_saved_wheels(self.store.as_mut(), &wheels) {
            return self.reject(e);
        }
        log::info!("saved wheel \"{name}\" with {} options", self.wheel.len());
        self.notices.push(
            Severity::Success,
            format!("Wheel \"{name}\" saved successfully"),
        );
        Ok(())
    }

    /// Replace the current options with the saved wheel `name`.
    pub fn load_wheel(&mut self, name: &str) -> WheelResult<()> {
        self.ensure_mutable()?;
        let mut wheels = match self.saved_wheels() {
            Ok(wheels) => wheels,
            Err(e) => return self.reject(e),
        };
        let Some(saved) = wheels.remove(name) else {
            return self.reject(WheelError::UnknownWheel(name.to_string()));
        };
        self.wheel.replace(saved.options);
        self.selection.clear();
        self.after_mutation();
        self.notices.push(
            Severity::Success,
            format!("Wheel \"{name}\" loaded successfully"),
        );
        Ok(())
    }

    /// Delete the saved wheel `name` after confirmation.
    pub fn delete_wheel(&mut self, name: &str, confirm: &mut dyn Confirm) -> WheelResult<()> {
        let mut wheels = match self.saved_wheels() {
            Ok(wheels) => wheels,
            Err(e) => return self.reject(e),
        };
        if !wheels.contains_key(name) {
            return self.reject(WheelError::UnknownWheel(name.to_string()));
        }
        if !confirm.confirm(&format!("Delete wheel \"{name}\"?")) {
            return Err(WheelError::Cancelled);
        }
        wheels.remove(name);
        if let Err(e) = persist::save_saved_wheels(self.store.as_mut(), &wheels) {
            return self.reject(e);
        }
        self.notices
            .push(Severity::Info, format!("Wheel \"{name}\" deleted"));
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn ensure_mutable(&mut self) -> WheelResult<()> {
        if self.machine.is_awaiting_decision() {
            return self.reject(WheelError::DecisionPending);
        }
        if !self.machine.accepts_mutations() {
            return self.reject(WheelError::Busy);
        }
        Ok(())
    }

    fn after_mutation(&mut self) {
        self.machine.invalidate_highlight(self.wheel.len());
        self.persist_current();
    }

    fn persist_current(&mut self) {
        let current = CurrentWheel {
            options: self.wheel.options().to_vec(),
            rotation: self.machine.rotation(),
        };
        let result = persist::save_current(self.store.as_mut(), &current);
        self.report_write(CURRENT_KEY, result);
    }

    fn report_write(&mut self, key: &str, result: WheelResult<()>) {
        if let Err(e) = result {
            log::warn!("failed to write {key}: {e}");
            self.notices
                .push(Severity::Warning, format!("Could not save {key}: {e}"));
        }
    }

    fn reject<T>(&mut self, err: WheelError) -> WheelResult<T> {
        if let Some(message) = user_message(&err) {
            self.notices.push(Severity::Error, message);
        }
        Err(err)
    }
}

/// Sentence-case message for an error, `None` for a declined prompt.
fn user_message(err: &WheelError) -> Option<String> {
    if matches!(err, WheelError::Cancelled) {
        return None;
    }
    let text = err.to_string();
    let mut chars = text.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}
