//! Angle helpers for walls leaving a junction.
use std::f64::consts::{PI, TAU};

use super::{Point2, Vector2};

/// Angle of the direction from `from` to `to`, in `(-π, π]`.
#[must_use]
pub fn direction_angle(from: &Point2, to: &Point2) -> f64 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Counter-clockwise sweep from angle `a` to angle `b`, in `[0, 2π)`.
#[must_use]
pub fn ccw_sweep(a: f64, b: f64) -> f64 {
    let s = (b - a).rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if s >= TAU {
        0.0
    } else {
        s
    }
}

/// Returns `true` if the sweep is within `tolerance` of zero (or a full turn).
#[must_use]
pub fn is_coincident(sweep: f64, tolerance: f64) -> bool {
    sweep < tolerance || sweep > TAU - tolerance
}

/// Returns `true` if the sweep is within `tolerance` of a half turn.
#[must_use]
pub fn is_opposite(sweep: f64, tolerance: f64) -> bool {
    (sweep - PI).abs() < tolerance
}

/// Unit vector pointing at `angle`.
#[must_use]
pub fn unit(angle: f64) -> Vector2 {
    Vector2::new(angle.cos(), angle.sin())
}
