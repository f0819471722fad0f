//! Maps a settled rotation to the segment under the pointer.
//!
//! Segments are laid out from angle 0 in the positive direction (clockwise on
//! screen, where y grows downward), each spanning `2π / n`. The pointer is
//! fixed at the top of the wheel, `-π/2` in the unrotated frame. With the
//! wheel rotated by `θ`, segment `i` covers `[i·s + θ, (i+1)·s + θ)`, so the
//! pointer falls in `floor((-π/2 − θ) / s)` reduced modulo `n`. A pointer
//! on a boundary belongs to the segment with the higher raw index, i.e. the
//! quotient is floored after snapping values within [`BOUNDARY_EPSILON`] of
//! an integer onto it, so rounding noise in `θ` cannot flip the result.

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::error::{WheelError, WheelResult};

/// Angle of the pointer in the unrotated frame (12 o'clock).
pub const POINTER_ANGLE: f64 = -FRAC_PI_2;

/// Tolerance, in segment widths, within which a quotient counts as sitting
/// exactly on a boundary.
pub const BOUNDARY_EPSILON: f64 = 1e-9;

/// Normalize an angle into `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if a >= TAU { 0.0 } else { a }
}

/// Angular width of one segment.
pub fn segment_span(segment_count: usize) -> f64 {
    TAU / segment_count as f64
}

/// Index of the segment under the pointer for a wheel rotated by
/// `settled_angle` with `segment_count` equal segments.
pub fn resolve(settled_angle: f64, segment_count: usize) -> WheelResult<usize> {
    if segment_count == 0 {
        return Err(WheelError::NoSegments);
    }
    let angle = normalize_angle(settled_angle);
    let mut q = (POINTER_ANGLE - angle) / segment_span(segment_count);
    let nearest = q.round();
    if (q - nearest).abs() < BOUNDARY_EPSILON {
        q = nearest;
    }
    let raw = q.floor() as i64;
    Ok(raw.rem_euclid(segment_count as i64) as usize)
}
