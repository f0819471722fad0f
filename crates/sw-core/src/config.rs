//! Tunable parameters for a wheel session.

/// Configuration for a wheel session.
#[derive(Debug, Clone)]
pub struct WheelConfig {
    /// RNG seed. `None` draws a fresh seed from the thread RNG.
    pub seed: Option<u64>,
    /// Wall-clock length of a spin animation in milliseconds.
    pub spin_duration_ms: u64,
    /// Length of the winner highlight pulse in milliseconds.
    pub highlight_duration_ms: u64,
    /// Lower bound (inclusive) of full turns added per spin.
    pub min_turns: f64,
    /// Upper bound (exclusive) of full turns added per spin.
    pub max_turns: f64,
    /// Maximum number of live options.
    pub max_options: usize,
    /// Minimum number of options needed to spin, and to keep after removals.
    pub min_options: usize,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            seed: None,
            spin_duration_ms: 4000,
            highlight_duration_ms: 1600,
            min_turns: 5.0,
            max_turns: 10.0,
            max_options: 50,
            min_options: 2,
        }
    }
}

impl WheelConfig {
    /// Set the RNG seed for reproducible spins.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the spin animation duration.
    pub fn with_spin_duration_ms(mut self, ms: u64) -> Self {
        self.spin_duration_ms = ms;
        self
    }

    /// Set the highlight pulse duration.
    pub fn with_highlight_duration_ms(mut self, ms: u64) -> Self {
        self.highlight_duration_ms = ms;
        self
    }

    /// Set the range of full turns per spin. The upper bound is raised to
    /// the lower bound if given smaller.
    pub fn with_turns(mut self, min: f64, max: f64) -> Self {
        self.min_turns = min.max(0.0);
        self.max_turns = max.max(self.min_turns);
        self
    }

    /// Set the option cap (at least `min_options`).
    pub fn with_max_options(mut self, max: usize) -> Self {
        self.max_options = max.max(self.min_options);
        self
    }
}
