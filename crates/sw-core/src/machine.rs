//! The spin state machine.
//!
//! ```text
//! Idle ─spin─▶ Spinning ─settle─▶ Resolved ─▶ Highlighting ─timeout─▶ Idle
//!                                    │
//!                                    └─▶ AwaitingRemovalDecision ─keep/remove─▶ Idle
//! ```
//!
//! The machine owns the wheel's rotation and is driven from outside by
//! [`SpinMachine::advance`], called once per frame with an absolute
//! timestamp. It never reads a clock itself, so tests can feed synthetic
//! time.

use rand::Rng;

use crate::config::WheelConfig;
use crate::error::{WheelError, WheelResult};
use crate::highlight::HighlightState;
use crate::resolver::{normalize_angle, resolve};
use crate::rotation::{SpinPlan, plan_spin};

/// The settled outcome of one spin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// Index of the segment under the pointer.
    pub index: usize,
    /// Normalized angle the wheel stopped at.
    pub settled_angle: f64,
}

/// Where the machine currently is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpinState {
    /// Waiting for a spin request.
    Idle,
    /// Animating toward `plan.target`.
    Spinning {
        /// The planned motion.
        plan: SpinPlan,
        /// Timestamp (ms) the spin started.
        started_at_ms: u64,
        /// Number of segments when the spin started.
        segment_count: usize,
    },
    /// The winner is known and has not been acknowledged yet.
    Resolved(Resolution),
    /// Pulsing the winning segment.
    Highlighting(HighlightState),
    /// Waiting for the user to keep or remove the winner. The highlight may
    /// still be pulsing underneath.
    AwaitingRemovalDecision {
        /// The winning spin.
        resolution: Resolution,
        /// Pulse still running on the winner, if any.
        highlight: Option<HighlightState>,
    },
}

/// Answer to a spin request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpinRequest {
    /// A new spin began.
    Started(SpinPlan),
    /// A spin is already in flight; nothing changed.
    Ignored,
}

/// Highlight data for one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseFrame {
    /// Highlighted segment.
    pub index: usize,
    /// Overlay alpha for this frame.
    pub alpha: f64,
}

/// Result of advancing the machine to a timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// Wheel angle to draw.
    pub angle: f64,
    /// Set on exactly one step per spin: the one where it settled.
    pub resolved: Option<Resolution>,
    /// Active pulse, if any.
    pub pulse: Option<PulseFrame>,
    /// True when nothing is animating and the driver may stop ticking.
    pub done: bool,
}

/// Sequences spins, resolution, highlighting, and the removal decision.
#[derive(Debug, Clone)]
pub struct SpinMachine {
    state: SpinState,
    rotation: f64,
    spin_duration_ms: u64,
    highlight_duration_ms: u64,
    min_turns: f64,
    max_turns: f64,
    min_options: usize,
}

impl SpinMachine {
    /// Create an idle machine resting at `rotation`.
    pub fn new(config: &WheelConfig, rotation: f64) -> Self {
        Self {
            state: SpinState::Idle,
            rotation: normalize_angle(rotation),
            spin_duration_ms: config.spin_duration_ms,
            highlight_duration_ms: config.highlight_duration_ms,
            min_turns: config.min_turns,
            max_turns: config.max_turns,
            min_options: config.min_options.max(1),
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Current state.
    pub fn state(&self) -> &SpinState {
        &self.state
    }

    /// Current wheel angle: the live angle mid-spin, the baseline otherwise.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Whether a spin is in flight.
    pub fn is_spinning(&self) -> bool {
        matches!(self.state, SpinState::Spinning { .. })
    }

    /// Whether a keep/remove decision is pending.
    pub fn is_awaiting_decision(&self) -> bool {
        matches!(self.state, SpinState::AwaitingRemovalDecision { .. })
    }

    /// Whether anything still needs frames (spin or pulse).
    pub fn is_animating(&self) -> bool {
        match self.state {
            SpinState::Spinning { .. } | SpinState::Resolved(_) | SpinState::Highlighting(_) => {
                true
            }
            SpinState::AwaitingRemovalDecision { highlight, .. } => highlight.is_some(),
            SpinState::Idle => false,
        }
    }

    /// Whether the option list may be mutated right now.
    pub fn accepts_mutations(&self) -> bool {
        matches!(self.state, SpinState::Idle | SpinState::Highlighting(_))
    }

    /// The running highlight, if any.
    pub fn highlight(&self) -> Option<HighlightState> {
        match self.state {
            SpinState::Highlighting(h) => Some(h),
            SpinState::AwaitingRemovalDecision { highlight, .. } => highlight,
            _ => None,
        }
    }

    /// The winner awaiting a keep/remove decision.
    pub fn pending_decision(&self) -> Option<Resolution> {
        match self.state {
            SpinState::AwaitingRemovalDecision { resolution, .. } => Some(resolution),
            _ => None,
        }
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    /// Ask for a spin of a wheel with `segment_count` segments.
    ///
    /// A request while spinning is a no-op. A request during a highlight
    /// cancels the highlight and spins.
    pub fn request_spin<R: Rng + ?Sized>(
        &mut self,
        now_ms: u64,
        segment_count: usize,
        rng: &mut R,
    ) -> WheelResult<SpinRequest> {
        match self.state {
            SpinState::Spinning { .. } | SpinState::Resolved(_) => {
                log::debug!("spin request ignored: already spinning");
                return Ok(SpinRequest::Ignored);
            }
            SpinState::AwaitingRemovalDecision { .. } => return Err(WheelError::DecisionPending),
            SpinState::Idle | SpinState::Highlighting(_) => {}
        }
        if segment_count < self.min_options {
            return Err(WheelError::NotEnoughOptions {
                min: self.min_options,
            });
        }

        let plan = plan_spin(self.rotation, self.min_turns, self.max_turns, rng);
        log::debug!(
            "spin started at {now_ms}ms: {:.3} -> {:.3} rad over {} segments",
            plan.start,
            plan.target,
            segment_count
        );
        self.state = SpinState::Spinning {
            plan,
            started_at_ms: now_ms,
            segment_count,
        };
        Ok(SpinRequest::Started(plan))
    }

    /// Advance to `now_ms`. Angles are computed from the absolute time since
    /// the spin started. A `Resolved` state left unacknowledged moves on to
    /// a plain highlight.
    pub fn advance(&mut self, now_ms: u64) -> WheelResult<Step> {
        let mut resolved = None;

        match self.state {
            SpinState::Spinning {
                plan,
                started_at_ms,
                segment_count,
            } => {
                let elapsed = now_ms.saturating_sub(started_at_ms);
                if elapsed >= self.spin_duration_ms {
                    let settled = plan.settled();
                    self.rotation = settled;
                    let resolution = Resolution {
                        index: resolve(settled, segment_count)?,
                        settled_angle: settled,
                    };
                    log::debug!(
                        "spin settled at {settled:.4} rad, segment {}",
                        resolution.index
                    );
                    self.state = SpinState::Resolved(resolution);
                    resolved = Some(resolution);
                } else {
                    self.rotation = plan.angle_at(elapsed, self.spin_duration_ms);
                }
            }
            SpinState::Resolved(_) => {
                self.acknowledge(now_ms, false)?;
            }
            SpinState::Highlighting(h) => {
                if h.is_finished(now_ms) {
                    self.state = SpinState::Idle;
                }
            }
            SpinState::AwaitingRemovalDecision {
                resolution,
                highlight: Some(h),
            } => {
                if h.is_finished(now_ms) {
                    self.state = SpinState::AwaitingRemovalDecision {
                        resolution,
                        highlight: None,
                    };
                }
            }
            SpinState::AwaitingRemovalDecision { highlight: None, .. } | SpinState::Idle => {}
        }

        let pulse = self.highlight().map(|h| PulseFrame {
            index: h.index,
            alpha: h.alpha(now_ms),
        });
        Ok(Step {
            angle: self.rotation,
            resolved,
            pulse,
            done: !self.is_animating(),
        })
    }

    /// Move a resolved spin on to its highlight, optionally holding for a
    /// keep/remove decision.
    pub fn acknowledge(&mut self, now_ms: u64, await_decision: bool) -> WheelResult<()> {
        let SpinState::Resolved(resolution) = self.state else {
            return Err(WheelError::NoPendingDecision);
        };
        let highlight = HighlightState::new(resolution.index, now_ms, self.highlight_duration_ms);
        self.state = if await_decision {
            SpinState::AwaitingRemovalDecision {
                resolution,
                highlight: Some(highlight),
            }
        } else {
            SpinState::Highlighting(highlight)
        };
        Ok(())
    }

    /// Close a pending keep/remove decision, returning the winner it was
    /// about. Any pulse still running continues as a plain highlight.
    pub fn close_decision(&mut self) -> WheelResult<Resolution> {
        let SpinState::AwaitingRemovalDecision {
            resolution,
            highlight,
        } = self.state
        else {
            return Err(WheelError::NoPendingDecision);
        };
        self.state = match highlight {
            Some(h) => SpinState::Highlighting(h),
            None => SpinState::Idle,
        };
        Ok(resolution)
    }

    /// Drop a highlight whose segment no longer exists after the option list
    /// shrank to `option_count`.
    pub fn invalidate_highlight(&mut self, option_count: usize) {
        match self.state {
            SpinState::Highlighting(h) if !h.is_valid_for(option_count) => {
                log::debug!("highlight on segment {} cleared", h.index);
                self.state = SpinState::Idle;
            }
            SpinState::AwaitingRemovalDecision {
                resolution,
                highlight: Some(h),
            } if !h.is_valid_for(option_count) => {
                self.state = SpinState::AwaitingRemovalDecision {
                    resolution,
                    highlight: None,
                };
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::TAU;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn machine() -> SpinMachine {
        SpinMachine::new(&WheelConfig::default(), 0.0)
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    /// Drive the machine with 16ms frames until it settles.
    fn run_spin(m: &mut SpinMachine, start: u64) -> (Resolution, u64) {
        let mut now = start;
        loop {
            now += 16;
            let step = m.advance(now).unwrap();
            if let Some(res) = step.resolved {
                return (res, now);
            }
            assert!(now < start + 10_000, "spin never settled");
        }
    }

    #[test]
    fn rejects_too_few_segments() {
        let mut m = machine();
        let result = m.request_spin(0, 1, &mut rng());
        assert!(matches!(
            result,
            Err(WheelError::NotEnoughOptions { min: 2 })
        ));
        assert_eq!(*m.state(), SpinState::Idle);
    }

    #[test]
    fn second_request_while_spinning_is_ignored() {
        let mut m = machine();
        let mut r = rng();
        let first = m.request_spin(0, 4, &mut r).unwrap();
        assert!(matches!(first, SpinRequest::Started(_)));
        let state_before = *m.state();
        let second = m.request_spin(100, 4, &mut r).unwrap();
        assert_eq!(second, SpinRequest::Ignored);
        assert_eq!(*m.state(), state_before);
    }

    #[test]
    fn full_cycle_returns_to_idle() {
        let mut m = machine();
        m.request_spin(0, 4, &mut rng()).unwrap();
        assert!(m.is_spinning());
        assert!(!m.accepts_mutations());

        let (res, t) = run_spin(&mut m, 0);
        assert!(res.index < 4);
        assert!(matches!(m.state(), SpinState::Resolved(_)));

        m.acknowledge(t, false).unwrap();
        let step = m.advance(t + 100).unwrap();
        assert_eq!(step.pulse.map(|p| p.index), Some(res.index));
        assert!(!step.done);
        assert!(m.accepts_mutations());

        let step = m.advance(t + 1600).unwrap();
        assert!(step.done);
        assert_eq!(*m.state(), SpinState::Idle);
    }

    #[test]
    fn resolution_reported_exactly_once() {
        let mut m = machine();
        m.request_spin(0, 6, &mut rng()).unwrap();
        let mut count = 0;
        for frame in 1..400 {
            if m.advance(frame * 16).unwrap().resolved.is_some() {
                count += 1;
            }
        }
        assert_eq!(count, 1);
    }

    #[test]
    fn winner_matches_resolver_on_settled_angle() {
        let mut m = machine();
        m.request_spin(0, 7, &mut rng()).unwrap();
        let (res, _) = run_spin(&mut m, 0);
        assert_eq!(res.index, resolve(res.settled_angle, 7).unwrap());
        assert_eq!(m.rotation(), res.settled_angle);
    }

    #[test]
    fn baseline_normalized_after_every_spin() {
        let mut m = machine();
        let mut r = rng();
        let mut now = 0;
        for _ in 0..20 {
            m.request_spin(now, 5, &mut r).unwrap();
            let (_, t) = run_spin(&mut m, now);
            assert!((0.0..TAU).contains(&m.rotation()));
            now = t + 2000;
            m.advance(now).unwrap();
            m.advance(now).unwrap();
        }
    }

    #[test]
    fn late_frames_land_on_same_winner() {
        let config = WheelConfig::default();
        let mut smooth = SpinMachine::new(&config, 1.0);
        let mut choppy = SpinMachine::new(&config, 1.0);
        smooth.request_spin(0, 9, &mut rng()).unwrap();
        choppy.request_spin(0, 9, &mut rng()).unwrap();

        let (a, _) = run_spin(&mut smooth, 0);
        choppy.advance(1234).unwrap();
        let b = choppy.advance(9000).unwrap().resolved.unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn spin_during_highlight_cancels_it() {
        let mut m = machine();
        let mut r = rng();
        m.request_spin(0, 4, &mut r).unwrap();
        let (_, t) = run_spin(&mut m, 0);
        m.acknowledge(t, false).unwrap();
        assert!(m.highlight().is_some());

        let req = m.request_spin(t + 10, 4, &mut r).unwrap();
        assert!(matches!(req, SpinRequest::Started(_)));
        assert!(m.highlight().is_none());
    }

    #[test]
    fn decision_blocks_spin_and_mutation_until_closed() {
        let mut m = machine();
        let mut r = rng();
        m.request_spin(0, 4, &mut r).unwrap();
        let (res, t) = run_spin(&mut m, 0);
        m.acknowledge(t, true).unwrap();

        assert!(m.is_awaiting_decision());
        assert!(!m.accepts_mutations());
        assert!(matches!(
            m.request_spin(t, 4, &mut r),
            Err(WheelError::DecisionPending)
        ));

        assert_eq!(m.close_decision().unwrap(), res);
        assert!(!m.is_awaiting_decision());
        assert!(m.accepts_mutations());
    }

    #[test]
    fn decision_outlives_highlight() {
        let mut m = machine();
        m.request_spin(0, 4, &mut rng()).unwrap();
        let (_, t) = run_spin(&mut m, 0);
        m.acknowledge(t, true).unwrap();
        let step = m.advance(t + 5000).unwrap();
        assert!(step.pulse.is_none());
        assert!(step.done);
        assert!(m.is_awaiting_decision());
        m.close_decision().unwrap();
        assert_eq!(*m.state(), SpinState::Idle);
    }

    #[test]
    fn highlight_cleared_when_index_invalidated() {
        let mut m = machine();
        m.request_spin(0, 4, &mut rng()).unwrap();
        let (res, t) = run_spin(&mut m, 0);
        m.acknowledge(t, false).unwrap();

        m.invalidate_highlight(res.index + 1);
        assert!(m.highlight().is_some());
        m.invalidate_highlight(res.index);
        assert!(m.highlight().is_none());
        assert_eq!(*m.state(), SpinState::Idle);
    }

    #[test]
    fn close_without_decision_fails() {
        let mut m = machine();
        assert!(matches!(
            m.close_decision(),
            Err(WheelError::NoPendingDecision)
        ));
        assert!(matches!(
            m.acknowledge(0, false),
            Err(WheelError::NoPendingDecision)
        ));
    }
}
