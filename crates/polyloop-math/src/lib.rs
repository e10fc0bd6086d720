//! 2D math primitives and curve helpers for the polyloop simulation.
//!
//! Everything here is pure and allocation-free; the heavier per-tick work
//! lives in polyloop-dynamics.

use nalgebra as na;

/// 2D vector alias.
pub type Vec2 = na::Vector2<f64>;
/// 2x2 matrix alias.
pub type Mat2 = na::Matrix2<f64>;

/// Quadratic ease-out: fast start, decelerating finish.
///
/// Maps t in [0, 1] to 1 - (1 - t)^2; input is clamped.
#[inline]
pub fn ease_out_quad(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Triangle wave over one period: 0 at t = 0, peaks at 1 when t = 0.5,
/// back to 0 at t = 1. Input outside [0, 1] wraps.
#[inline]
pub fn triangle_wave(t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    1.0 - (1.0 - 2.0 * t).abs()
}

/// Point on a quadratic Bezier curve at parameter t in [0, 1].
#[inline]
pub fn quadratic_bezier(p0: Vec2, ctrl: Vec2, p1: Vec2, t: f64) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u) + ctrl * (2.0 * u * t) + p1 * (t * t)
}

/// Unit vector for a direction angle in radians.
#[inline]
pub fn unit_from_angle(angle: f64) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
