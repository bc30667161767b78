//! Angle utilities shared by the detectors and the post-filter.

use std::f64::consts::PI;

/// Wraps an angle into the range (-π, π].
#[inline]
pub fn wrap_pi(angle: f64) -> f64 {
    let mut a = angle.rem_euclid(2.0 * PI);
    if a > PI {
        a -= 2.0 * PI;
    }
    a
}

/// Signed turn from direction `a` to direction `b` in (-π, π].
/// Positive turns are counter-clockwise.
#[inline]
pub fn signed_turn(a: &[f64; 2], b: &[f64; 2]) -> f64 {
    wrap_pi(b[1].atan2(b[0]) - a[1].atan2(a[0]))
}

/// Computes the unsigned angle between two 2D vectors in radians.
/// Returns a value in [0, π]. Zero if the vectors are parallel
/// and pointing in the same direction; π if they are opposite.
#[inline]
pub fn angle_between(a: &[f64; 2], b: &[f64; 2]) -> f64 {
    let dot = a[0] * b[0] + a[1] * b[1];
    let na = (a[0] * a[0] + a[1] * a[1]).sqrt().max(1e-12);
    let nb = (b[0] * b[0] + b[1] * b[1]).sqrt().max(1e-12);
    (dot / (na * nb)).clamp(-1.0, 1.0).acos()
}
