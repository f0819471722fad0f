//! Frontend-agnostic geometry of the wheel at one instant.

use crate::machine::PulseFrame;
use crate::option::WheelOption;
use crate::resolver::{POINTER_ANGLE, segment_span};

/// One wedge as it should be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentView {
    /// Segment index (option position).
    pub index: usize,
    /// Label.
    pub text: String,
    /// Hex fill color.
    pub color: String,
    /// Leading edge in radians, unnormalized.
    pub start_angle: f64,
    /// Trailing edge in radians, unnormalized.
    pub end_angle: f64,
    /// Overlay alpha of the winner pulse, `0.0` when not highlighted.
    pub highlight_alpha: f64,
    /// Whether the segment is part of the current selection.
    pub selected: bool,
}

impl SegmentView {
    /// Angle through the middle of the wedge, where the label goes.
    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }
}

/// Everything a frontend needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelView {
    /// Current wheel angle.
    pub rotation: f64,
    /// Fixed pointer direction.
    pub pointer_angle: f64,
    /// Segments in index order.
    pub segments: Vec<SegmentView>,
    /// Whether a spin is in flight.
    pub spinning: bool,
}

impl WheelView {
    /// Lay out `options` at `rotation`. Segment `i` spans
    /// `[i·slice + rotation, (i+1)·slice + rotation)`.
    pub fn build(
        options: &[WheelOption],
        rotation: f64,
        pulse: Option<PulseFrame>,
        is_selected: impl Fn(usize) -> bool,
        spinning: bool,
    ) -> Self {
        let span = if options.is_empty() {
            0.0
        } else {
            segment_span(options.len())
        };
        let segments = options
            .iter()
            .enumerate()
            .map(|(i, option)| SegmentView {
                index: i,
                text: option.text.clone(),
                color: option.color.clone(),
                start_angle: i as f64 * span + rotation,
                end_angle: (i + 1) as f64 * span + rotation,
                highlight_alpha: match pulse {
                    Some(p) if p.index == i => p.alpha,
                    _ => 0.0,
                },
                selected: is_selected(i),
            })
            .collect();
        Self {
            rotation,
            pointer_angle: POINTER_ANGLE,
            segments,
            spinning,
        }
    }

    /// Whether there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
